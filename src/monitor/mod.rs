mod evaluator;
mod format;
mod provider;
mod service;
mod state;

pub(crate) use format::TIMESTAMP_FORMAT;
pub use provider::{MetricsProvider, RealMetricsProvider, Snapshot};
pub use state::AlertState;
pub(crate) use service::{monitor_tick_at, TickOutcome};
#[cfg(test)]
pub(crate) use provider::MockMetricsProvider;
