use teloxide::prelude::*;
use tokio::task::JoinHandle;

use crate::app_context::AppContext;
use crate::monitor::RealMetricsProvider;
use crate::sink::TelegramSink;

mod monitor;

pub fn start_background_jobs(bot: Bot, app_context: AppContext) -> JoinHandle<()> {
    monitor::start_monitor_job(
        TelegramSink::new(bot),
        RealMetricsProvider::new(),
        app_context.config.clone(),
        app_context.shutdown.clone(),
    )
}
