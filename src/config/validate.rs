use thiserror::Error;

use super::schema::Config;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("BOT_TOKEN is not set")]
    MissingToken,
    #[error("invalid config: {0}")]
    Validation(String),
}

impl Config {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.monitor_interval == 0 {
            return Err(ConfigError::Validation(
                "monitor_interval must be greater than 0".to_string(),
            ));
        }
        if self.target_channel.trim().is_empty() {
            return Err(ConfigError::Validation(
                "target_channel must not be empty".to_string(),
            ));
        }
        validate_percentage("cpu threshold", self.alerts.cpu)?;
        validate_percentage("ram threshold", self.alerts.ram)?;
        if self.alerts.cooldown_secs == 0 {
            return Err(ConfigError::Validation(
                "alert cooldown must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }

    /// Bot mode cannot run without a token; the console mode never calls
    /// this.
    pub fn require_token(&self) -> Result<&str, ConfigError> {
        self.bot_token.as_deref().ok_or(ConfigError::MissingToken)
    }
}

fn validate_percentage(field: &str, value: f32) -> Result<(), ConfigError> {
    if value.is_nan() || !(0.0..=100.0).contains(&value) {
        return Err(ConfigError::Validation(format!(
            "{} must be between 0 and 100",
            field
        )));
    }
    Ok(())
}
