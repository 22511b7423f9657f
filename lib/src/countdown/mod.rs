use crate::settings::{keys, ranged_int, ConfigError, Settings};
use chrono::NaiveTime;

/// How often the host should ask for a fresh overlay text.
pub const TICK_INTERVAL: std::time::Duration = std::time::Duration::from_millis(500);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountdownConfig {
    pub target: NaiveTime,
    pub source_name: String,
    pub finished_text: String,
}

impl CountdownConfig {
    pub fn from_settings(settings: &dyn Settings) -> Result<Self, ConfigError> {
        let hour = ranged_int(settings, keys::HOUR, 11, 0, 23)? as u32;
        let minute = ranged_int(settings, keys::MINUTE, 0, 0, 59)? as u32;
        let second = ranged_int(settings, keys::SECOND, 0, 0, 59)? as u32;

        Ok(Self {
            // the ranges above make the construction infallible
            target: NaiveTime::from_hms_opt(hour, minute, second).unwrap_or_default(),
            source_name: settings.get_str(keys::SOURCE_NAME).unwrap_or_default(),
            finished_text: settings
                .get_str(keys::FINISHED_TEXT)
                .unwrap_or_else(|| "Starting soon".to_owned()),
        })
    }
}

/// Render the time left until the target within the current day.
/// At or past the target the configured final text is shown; targets
/// meant for tomorrow are not a thing this handles.
pub fn remaining_text(config: &CountdownConfig, now: NaiveTime) -> String {
    if now >= config.target {
        return config.finished_text.clone();
    }

    let remaining = (config.target - now).num_seconds();
    let hours = remaining / 3600;
    let minutes = remaining % 3600 / 60;
    let seconds = remaining % 60;

    if hours > 0 {
        format!("{hours:02}:{minutes:02}:{seconds:02}")
    } else {
        format!("{minutes:02}:{seconds:02}")
    }
}
