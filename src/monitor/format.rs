use super::provider::Snapshot;

pub(crate) const TIMESTAMP_FORMAT: &str = "%H:%M:%S %d.%m.%Y";

const BYTES_PER_GIB: f64 = (1u64 << 30) as f64;

/// Renders the live dashboard block. Pure; the same snapshot always yields
/// the same text.
pub fn format_dashboard(snapshot: &Snapshot) -> String {
    format!(
        "📊 System Metrics (Live Dashboard)\nUpdated: {}\nCPU: {:.1}%\nRAM: {:.1}% ({:.2} / {:.2} GB)",
        snapshot.timestamp.format(TIMESTAMP_FORMAT),
        snapshot.cpu_percent,
        snapshot.memory_percent,
        snapshot.memory_used_bytes as f64 / BYTES_PER_GIB,
        snapshot.memory_total_bytes as f64 / BYTES_PER_GIB,
    )
}
