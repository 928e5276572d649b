use std::time::Instant;

use crate::config::Alerts;

use super::format::TIMESTAMP_FORMAT;
use super::provider::Snapshot;
use super::state::AlertState;

/// Decides whether this snapshot warrants an alert. CPU and RAM are checked
/// independently (inclusive comparison) but share one cooldown timer, so at
/// most one alert message goes out per cooldown window no matter how many
/// iterations keep breaching.
pub(super) fn evaluate_alerts_at(
    alerts: &Alerts,
    state: &mut AlertState,
    snapshot: &Snapshot,
    now: Instant,
) -> Option<String> {
    let mut reasons = Vec::new();

    if snapshot.cpu_percent >= alerts.cpu {
        reasons.push(format!(
            "CPU {}% >= {}%",
            snapshot.cpu_percent, alerts.cpu
        ));
    }

    if snapshot.memory_percent >= alerts.ram {
        reasons.push(format!(
            "RAM {}% >= {}%",
            snapshot.memory_percent, alerts.ram
        ));
    }

    if reasons.is_empty() {
        return None;
    }

    if !state.cooldown_elapsed(alerts.cooldown_secs, now) {
        return None;
    }

    state.record_alert(now);

    Some(format!(
        "🚨 High Load Warning!\n{}\nTime: {}\nCPU: {:.1}% | RAM: {:.1}%",
        reasons.join("\n"),
        snapshot.timestamp.format(TIMESTAMP_FORMAT),
        snapshot.cpu_percent,
        snapshot.memory_percent,
    ))
}
