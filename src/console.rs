use std::sync::Arc;

use serde::Serialize;
use tokio::sync::Notify;
use tokio::time::{sleep, Duration};

use crate::config::Config;
use crate::monitor::{MetricsProvider, RealMetricsProvider, Snapshot, TIMESTAMP_FORMAT};

#[derive(Serialize)]
struct ConsoleSample {
    timestamp: String,
    cpu_usage_percent: f32,
    memory_usage_percent: f32,
}

/// Console variant: one pretty-printed JSON object per sample on stdout,
/// diagnostics stay on stderr.
pub async fn run(config: Config) {
    // Bridge the interrupt into a Notify once: the stored permit keeps a
    // Ctrl-C that lands during the sampling window from being lost.
    let shutdown = Arc::new(Notify::new());
    let signal = shutdown.clone();
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => signal.notify_one(),
            Err(error) => log::warn!("failed to listen for interrupt signal: {}", error),
        }
    });

    run_with(RealMetricsProvider::new(), config.monitor_interval, shutdown).await;
}

async fn run_with<P: MetricsProvider>(
    mut provider: P,
    interval_secs: u64,
    shutdown: Arc<Notify>,
) -> u64 {
    let mut samples_emitted = 0;

    loop {
        match provider.collect_metrics().await {
            Ok(snapshot) => match render_sample(&snapshot) {
                Ok(json) => {
                    println!("{}", json);
                    samples_emitted += 1;
                }
                Err(error) => log::warn!("failed to serialize sample: {}", error),
            },
            Err(error) => log::warn!("metrics sampling failed, skipping iteration: {}", error),
        }

        tokio::select! {
            _ = sleep(Duration::from_secs(interval_secs)) => {}
            _ = shutdown.notified() => {
                println!("\nMonitoring stopped");
                return samples_emitted;
            }
        }
    }
}

// The output contract is 4-space indentation; serde_json's default pretty
// printer uses 2.
fn render_sample(snapshot: &Snapshot) -> Result<String, serde_json::Error> {
    let sample = ConsoleSample {
        timestamp: snapshot.timestamp.format(TIMESTAMP_FORMAT).to_string(),
        cpu_usage_percent: snapshot.cpu_percent,
        memory_usage_percent: snapshot.memory_percent,
    };

    let mut buffer = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, formatter);
    sample.serialize(&mut serializer)?;

    Ok(String::from_utf8_lossy(&buffer).into_owned())
}
