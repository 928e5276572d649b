use std::time::Instant;

use crate::config::Alerts;
use crate::sink::{ChannelId, MessageRef, NotificationSink};

use super::evaluator::evaluate_alerts_at;
use super::format::format_dashboard;
use super::provider::MetricsProvider;
use super::state::AlertState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TickOutcome {
    Completed,
    /// The OS query failed; the iteration was skipped without touching the
    /// channel.
    SampleSkipped,
    /// At least one send/edit against the channel failed. Always non-fatal;
    /// setup decisions look at the live-message handle, not at this.
    DeliveryFailed,
}

/// One full pass of the monitoring loop: sample, refresh the live dashboard
/// message, evaluate alerts and deliver one if due. Never returns an error;
/// every failure is logged and contained here.
pub(crate) async fn monitor_tick_at<S: NotificationSink, P: MetricsProvider>(
    sink: &S,
    channel: ChannelId,
    alerts: &Alerts,
    state: &mut AlertState,
    live_message: &mut Option<MessageRef>,
    provider: &mut P,
    now: Instant,
) -> TickOutcome {
    let snapshot = match provider.collect_metrics().await {
        Ok(snapshot) => snapshot,
        Err(error) => {
            log::warn!("metrics sampling failed, skipping iteration: {}", error);
            return TickOutcome::SampleSkipped;
        }
    };

    tracing::info!(
        target: "monitor",
        cpu = snapshot.cpu_percent,
        ram = snapshot.memory_percent,
        cpu_threshold = alerts.cpu,
        ram_threshold = alerts.ram,
        "monitor_metrics"
    );

    let dashboard = format_dashboard(&snapshot);
    let mut delivered = true;

    match live_message {
        // The handle survives an edit failure so the next iteration retries
        // against the last-known-good message.
        Some(handle) if handle.channel == channel => {
            if let Err(error) = sink.edit(handle, &dashboard).await {
                log::warn!("failed to edit live dashboard message: {}", error);
                delivered = false;
            }
        }
        _ => match sink.send(channel, &dashboard).await {
            Ok(handle) => *live_message = Some(handle),
            Err(error) => {
                log::warn!("failed to send live dashboard message: {}", error);
                delivered = false;
            }
        },
    }

    if let Some(alert) = evaluate_alerts_at(alerts, state, &snapshot, now) {
        // Alerts are standalone messages, never edits of the dashboard.
        match sink.send(channel, &alert).await {
            Ok(_) => log::info!("alert_sent channel={}", channel.0),
            Err(error) => {
                log::error!("failed to send alert to channel {}: {}", channel.0, error);
                delivered = false;
            }
        }
    }

    if delivered {
        TickOutcome::Completed
    } else {
        TickOutcome::DeliveryFailed
    }
}
