use std::sync::Arc;
use std::time::Instant;

use tokio::sync::Notify;
use tokio::task::JoinHandle;
use tokio::time::{sleep, Duration};

use crate::config::Config;
use crate::monitor::{monitor_tick_at, AlertState, MetricsProvider, RealMetricsProvider, TickOutcome};
use crate::sink::{NotificationSink, TelegramSink};

pub(super) fn start_monitor_job(
    sink: TelegramSink,
    provider: RealMetricsProvider,
    config: Config,
    shutdown: Arc<Notify>,
) -> JoinHandle<()> {
    tokio::spawn(async move { run_monitor(&sink, provider, config, shutdown).await })
}

/// The monitoring task. Starts uninitialized: the target channel must
/// resolve and accept the first dashboard message before the steady-state
/// loop begins; otherwise the task ends quietly, leaving the operator to fix
/// the channel configuration. Alert state and the live-message handle are
/// owned here and die with the task.
pub(super) async fn run_monitor<S: NotificationSink, P: MetricsProvider>(
    sink: &S,
    mut provider: P,
    config: Config,
    shutdown: Arc<Notify>,
) {
    let channel = match sink.resolve_channel(&config.target_channel).await {
        Ok(channel) => channel,
        Err(error) => {
            log::warn!(
                "monitor_channel_unavailable channel={} error={}",
                config.target_channel,
                error
            );
            return;
        }
    };

    log::info!(
        "monitor_started channel={} chat_id={} interval_secs={}",
        config.target_channel,
        channel.0,
        config.monitor_interval
    );

    let mut state = AlertState::default();
    let mut live_message = None;
    let mut initialized = false;

    loop {
        let outcome = monitor_tick_at(
            sink,
            channel,
            &config.alerts,
            &mut state,
            &mut live_message,
            &mut provider,
            Instant::now(),
        )
        .await;

        if !initialized {
            match outcome {
                TickOutcome::SampleSkipped => {}
                _ => {
                    // Writability is decided by the first dashboard send
                    // alone; a failed alert delivery on the same pass is an
                    // ordinary non-fatal delivery error.
                    if live_message.is_some() {
                        initialized = true;
                    } else {
                        log::warn!(
                            "monitor_channel_unwritable channel={} chat_id={}",
                            config.target_channel,
                            channel.0
                        );
                        return;
                    }
                }
            }
        }

        tokio::select! {
            _ = sleep(Duration::from_secs(config.monitor_interval)) => {}
            _ = shutdown.notified() => {
                if let Err(error) = sink.send(channel, "🛑 Monitoring stopped.").await {
                    log::warn!("failed to send final status message: {}", error);
                }
                log::info!("monitor_stopped channel={}", config.target_channel);
                return;
            }
        }
    }
}
