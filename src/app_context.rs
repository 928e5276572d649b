use std::sync::Arc;

use tokio::sync::Notify;

use crate::config::Config;

/// Read-only context shared with background jobs and the message handler.
/// Loop-owned state (alert cooldown, live-message handle) deliberately does
/// not live here.
#[derive(Clone)]
pub struct AppContext {
    pub config: Config,
    pub shutdown: Arc<Notify>,
}

impl AppContext {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            shutdown: Arc::new(Notify::new()),
        }
    }
}
