use crate::{
    countdown::{remaining_text, CountdownConfig},
    frontend::TextDisplaying,
    settings::Settings,
};
use chrono::NaiveTime;

/// Host-lifecycle surface for the countdown overlay. The host drives
/// [`CountdownOverlay::tick`] on a periodic timer and the overlay pushes
/// the formatted remainder into the configured text source.
#[derive(Default)]
pub struct CountdownOverlay {
    config: Option<CountdownConfig>,
}

impl CountdownOverlay {
    pub fn describe() -> &'static str {
        "Countdown to a specified time."
    }

    pub fn new() -> Self {
        Self::default()
    }

    pub fn config(&self) -> Option<&CountdownConfig> {
        self.config.as_ref()
    }

    pub fn reconfigure(&mut self, settings: &dyn Settings) {
        match CountdownConfig::from_settings(settings) {
            Ok(config) => self.config = Some(config),
            Err(e) => {
                log::error!("[ countdown ] : rejecting settings : {e}");
                self.config = None;
            }
        }
    }

    pub fn tick<T: TextDisplaying + ?Sized>(&self, frontend: &mut T) {
        self.tick_at(frontend, chrono::Local::now().time());
    }

    /// Like [`CountdownOverlay::tick`] with an explicit clock. Without a
    /// configured target or text source there is nothing to update.
    pub fn tick_at<T: TextDisplaying + ?Sized>(&self, frontend: &mut T, now: NaiveTime) {
        let Some(config) = self.config.as_ref() else {
            return;
        };

        if config.source_name.is_empty() {
            return;
        }

        frontend.set_text(&config.source_name, &remaining_text(config, now));
    }

    pub fn unload(&mut self) {
        self.config = None;
    }
}
