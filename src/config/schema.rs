#[derive(Debug, Clone)]
pub struct Config {
    /// Present only when running as a chat bot; the console mode does not
    /// need it.
    pub bot_token: Option<String>,
    pub monitor_interval: u64,
    pub target_channel: String,
    pub alerts: Alerts,
}

#[derive(Debug, Clone)]
pub struct Alerts {
    pub cpu: f32,
    pub ram: f32,
    pub cooldown_secs: u64,
}
