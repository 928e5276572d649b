use super::defaults::*;
use super::schema::{Alerts, Config};
use super::validate::ConfigError;

const ENV_BOT_TOKEN: &str = "BOT_TOKEN";
const ENV_MONITOR_INTERVAL: &str = "MONITOR_INTERVAL";
const ENV_CPU_THRESHOLD: &str = "CPU_THRESHOLD";
const ENV_RAM_THRESHOLD: &str = "RAM_THRESHOLD";
const ENV_ALERT_COOLDOWN: &str = "ALERT_COOLDOWN";
const ENV_TARGET_CHANNEL: &str = "TARGET_CHANNEL";

pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(|key| std::env::var(key).ok())
}

/// Loader over an abstract variable lookup so tests never touch the process
/// environment.
pub(super) fn load_config_from(
    var: impl Fn(&str) -> Option<String>,
) -> Result<Config, ConfigError> {
    let config = Config {
        bot_token: var(ENV_BOT_TOKEN).filter(|token| !token.trim().is_empty()),
        monitor_interval: secs_or_default(var(ENV_MONITOR_INTERVAL), default_monitor_interval()),
        target_channel: var(ENV_TARGET_CHANNEL)
            .filter(|name| !name.trim().is_empty())
            .unwrap_or_else(default_target_channel),
        alerts: Alerts {
            cpu: percent_or_default(var(ENV_CPU_THRESHOLD), default_cpu_threshold()),
            ram: percent_or_default(var(ENV_RAM_THRESHOLD), default_ram_threshold()),
            cooldown_secs: secs_or_default(var(ENV_ALERT_COOLDOWN), default_cooldown_secs()),
        },
    };
    config.validate()?;
    Ok(config)
}

// Malformed values fall back silently; only a missing token is fatal and
// that is enforced later, in bot mode.
fn secs_or_default(raw: Option<String>, default: u64) -> u64 {
    raw.and_then(|value| value.trim().parse::<u64>().ok())
        .filter(|secs| *secs > 0)
        .unwrap_or(default)
}

fn percent_or_default(raw: Option<String>, default: f32) -> f32 {
    raw.and_then(|value| value.trim().parse::<f32>().ok())
        .filter(|percent| percent.is_finite() && (0.0..=100.0).contains(percent))
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::load_config_from;

    fn lookup<'a>(vars: &'a [(&'a str, &'a str)]) -> impl Fn(&str) -> Option<String> + 'a {
        let map: HashMap<&str, &str> = vars.iter().copied().collect();
        move |key| map.get(key).map(|value| value.to_string())
    }

    #[test]
    fn defaults_apply_when_nothing_is_set() {
        let config = load_config_from(lookup(&[])).expect("empty environment should load");

        assert_eq!(config.bot_token, None);
        assert_eq!(config.monitor_interval, 30);
        assert_eq!(config.target_channel, "live-metrics");
        assert_eq!(config.alerts.cpu, 80.0);
        assert_eq!(config.alerts.ram, 90.0);
        assert_eq!(config.alerts.cooldown_secs, 300);
    }

    #[test]
    fn malformed_interval_falls_back_to_default() {
        let config = load_config_from(lookup(&[("MONITOR_INTERVAL", "abc")]))
            .expect("malformed interval must not fail startup");
        assert_eq!(config.monitor_interval, 30);
    }

    #[test]
    fn zero_interval_falls_back_to_default() {
        let config = load_config_from(lookup(&[("MONITOR_INTERVAL", "0")]))
            .expect("zero interval must not fail startup");
        assert_eq!(config.monitor_interval, 30);
    }

    #[test]
    fn out_of_range_threshold_falls_back_to_default() {
        let config = load_config_from(lookup(&[("CPU_THRESHOLD", "250"), ("RAM_THRESHOLD", "-4")]))
            .expect("out-of-range thresholds must not fail startup");
        assert_eq!(config.alerts.cpu, 80.0);
        assert_eq!(config.alerts.ram, 90.0);
    }

    #[test]
    fn explicit_values_are_honored() {
        let config = load_config_from(lookup(&[
            ("BOT_TOKEN", "123:abc"),
            ("MONITOR_INTERVAL", "5"),
            ("CPU_THRESHOLD", "70"),
            ("RAM_THRESHOLD", "85"),
            ("ALERT_COOLDOWN", "60"),
            ("TARGET_CHANNEL", "Ops-Room"),
        ]))
        .expect("explicit environment should load");

        assert_eq!(config.bot_token.as_deref(), Some("123:abc"));
        assert_eq!(config.monitor_interval, 5);
        assert_eq!(config.alerts.cpu, 70.0);
        assert_eq!(config.alerts.ram, 85.0);
        assert_eq!(config.alerts.cooldown_secs, 60);
        assert_eq!(config.target_channel, "Ops-Room");
    }

    #[test]
    fn blank_token_counts_as_missing() {
        let config = load_config_from(lookup(&[("BOT_TOKEN", "   ")]))
            .expect("blank token should load as console-capable config");
        assert_eq!(config.bot_token, None);
        assert!(config.require_token().is_err());
    }
}
