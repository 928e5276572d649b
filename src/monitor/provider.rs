use chrono::{DateTime, Local};
use sysinfo::{CpuExt, System, SystemExt};
use thiserror::Error;
use tokio::time::{sleep, Duration};

/// CPU usage is a delta between two refreshes; sampling blocks for this
/// window so the value reflects real utilization instead of a zero-length
/// read.
const CPU_SAMPLE_WINDOW: Duration = Duration::from_millis(250);

#[derive(Debug, Clone, Copy)]
pub struct Snapshot {
    pub(crate) timestamp: DateTime<Local>,
    pub(crate) cpu_percent: f32,
    pub(crate) memory_percent: f32,
    pub(crate) memory_used_bytes: u64,
    pub(crate) memory_total_bytes: u64,
}

impl Snapshot {
    #[cfg(test)]
    pub(crate) fn with_usage(cpu_percent: f32, memory_percent: f32) -> Self {
        Self {
            timestamp: Local::now(),
            cpu_percent,
            memory_percent,
            memory_used_bytes: 4 * 1024 * 1024 * 1024,
            memory_total_bytes: 16 * 1024 * 1024 * 1024,
        }
    }
}

#[derive(Debug, Error, Clone)]
#[error("{message}")]
pub struct MonitorError {
    message: String,
}

impl MonitorError {
    fn memory_accounting_unavailable() -> Self {
        Self {
            message: "virtual memory accounting reported zero total memory".to_string(),
        }
    }

    #[cfg(test)]
    pub(crate) fn mock_metrics_exhausted() -> Self {
        Self {
            message: "mock metrics exhausted".to_string(),
        }
    }
}

pub trait MetricsProvider {
    async fn collect_metrics(&mut self) -> Result<Snapshot, MonitorError>;
}

pub struct RealMetricsProvider {
    system: System,
}

impl RealMetricsProvider {
    pub fn new() -> Self {
        Self {
            system: System::new(),
        }
    }
}

impl MetricsProvider for RealMetricsProvider {
    async fn collect_metrics(&mut self) -> Result<Snapshot, MonitorError> {
        self.system.refresh_cpu();
        sleep(CPU_SAMPLE_WINDOW).await;
        self.system.refresh_cpu();
        self.system.refresh_memory();

        let cpu_percent = self.system.global_cpu_info().cpu_usage();

        let memory_total_bytes = self.system.total_memory();
        let memory_used_bytes = self.system.used_memory();
        if memory_total_bytes == 0 {
            return Err(MonitorError::memory_accounting_unavailable());
        }
        let memory_percent = (memory_used_bytes as f32 / memory_total_bytes as f32) * 100.0;

        Ok(Snapshot {
            timestamp: Local::now(),
            cpu_percent,
            memory_percent,
            memory_used_bytes,
            memory_total_bytes,
        })
    }
}

#[cfg(test)]
pub(crate) struct MockMetricsProvider {
    sequence: Vec<Snapshot>,
}

#[cfg(test)]
impl MockMetricsProvider {
    pub(crate) fn new(sequence: Vec<Snapshot>) -> Self {
        Self { sequence }
    }
}

#[cfg(test)]
impl MetricsProvider for MockMetricsProvider {
    async fn collect_metrics(&mut self) -> Result<Snapshot, MonitorError> {
        if self.sequence.is_empty() {
            return Err(MonitorError::mock_metrics_exhausted());
        }

        Ok(self.sequence.remove(0))
    }
}
