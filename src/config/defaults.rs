use super::schema::Alerts;

pub(super) fn default_monitor_interval() -> u64 {
    30
}

pub(super) fn default_cpu_threshold() -> f32 {
    80.0
}

pub(super) fn default_ram_threshold() -> f32 {
    90.0
}

pub(super) fn default_cooldown_secs() -> u64 {
    300
}

pub(super) fn default_target_channel() -> String {
    "live-metrics".to_string()
}

impl Default for Alerts {
    fn default() -> Self {
        Self {
            cpu: default_cpu_threshold(),
            ram: default_ram_threshold(),
            cooldown_secs: default_cooldown_secs(),
        }
    }
}
