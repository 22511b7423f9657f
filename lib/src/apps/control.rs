use crate::{
    dispatch::{Dispatcher, RecordingTrigger, TransitionTrigger, Trigger},
    frontend::ControlFrontend,
    midi::{resolve_device_name, DeviceNameResolution, EventKind, MidiReceiving},
    settings::{self, keys, ConfigError, Settings},
};

#[derive(Debug, Clone)]
pub struct ControlConfig {
    pub device_name: String,
    pub log_midi_input: bool,
    pub transition: TransitionTrigger,
    pub recording: RecordingTrigger,
}

impl ControlConfig {
    pub fn from_settings(settings: &dyn Settings) -> Result<Self, ConfigError> {
        Ok(Self {
            device_name: settings.get_str(keys::MIDI_DEVICE).unwrap_or_default(),
            log_midi_input: settings.get_bool(keys::LOG_MIDI_INPUT).unwrap_or(false),
            transition: TransitionTrigger {
                kind: settings::event_kind(
                    settings,
                    keys::TRANSITION_KIND,
                    EventKind::ControlChange,
                )?,
                base_address: settings::channel(settings, keys::TRANSITION_BASE_ADDRESS)?,
                duration_ms: settings::ranged_int(settings, keys::TRANSITION_TIME, 300, 0, 5000)?
                    as u32,
                velocity_scaling: settings
                    .get_bool(keys::TRANSITION_VELOCITY_SCALING)
                    .unwrap_or(false),
            },
            recording: RecordingTrigger {
                kind: settings::event_kind(settings, keys::RECORD_KIND, EventKind::Note)?,
                start: settings::channel(settings, keys::RECORD_START)?,
                stop: settings::channel(settings, keys::RECORD_STOP)?,
                pause: settings::channel(settings, keys::RECORD_PAUSE)?,
                resume: settings::channel(settings, keys::RECORD_RESUME)?,
            },
        })
    }
}

/// Host-lifecycle surface for the MIDI control script. Every method is
/// total from the host's point of view: failures are logged and the
/// surface is left in a consistent, possibly disconnected, state.
#[derive(Default)]
pub struct ControlSurface {
    dispatcher: Option<Dispatcher>,
}

impl ControlSurface {
    pub fn describe() -> &'static str {
        "Trigger scene transitions and recording controls with a MIDI controller."
    }

    pub fn new() -> Self {
        Self::default()
    }

    pub fn connected_device(&self) -> Option<&str> {
        self.dispatcher.as_ref()?.connected_device()
    }

    /// Rebuild the dispatcher from the settings store. The previous
    /// dispatcher is dropped before anything else happens, so there is
    /// never more than one live device subscription.
    pub fn reconfigure(&mut self, settings: &mut dyn Settings, midi_in: Box<dyn MidiReceiving>) {
        self.dispatcher = None;

        let config = match ControlConfig::from_settings(settings) {
            Ok(config) => config,
            Err(e) => {
                log::error!("[ control ] : rejecting settings : {e}");
                return;
            }
        };

        let mut dispatcher = Dispatcher::new(
            midi_in,
            vec![
                Trigger::Transition(config.transition),
                Trigger::Recording(config.recording),
            ],
            config.log_midi_input,
        );

        if let Some(device) = Self::resolve_device(&dispatcher, settings, &config.device_name) {
            if let Err(e) = dispatcher.open_device(&device) {
                log::warn!("[ control ] : {e}");
            }
        }

        self.dispatcher = Some(dispatcher);
    }

    fn resolve_device(
        dispatcher: &Dispatcher,
        settings: &mut dyn Settings,
        configured: &str,
    ) -> Option<String> {
        if configured.is_empty() {
            return None;
        }

        let available = match dispatcher.available_devices() {
            Ok(available) => available,
            Err(e) => {
                log::warn!("[ control ] : {e}");
                return None;
            }
        };

        match resolve_device_name(configured, &available) {
            DeviceNameResolution::Configured => Some(configured.to_owned()),
            DeviceNameResolution::Corrected(name) => {
                log::info!("[ control ] : device renamed, using {name} instead of {configured}");
                settings.set_str(keys::MIDI_DEVICE, &name);
                Some(name)
            }
            DeviceNameResolution::Unresolved => {
                log::warn!("[ control ] : no MIDI input port matches {configured}");
                None
            }
        }
    }

    /// Drain and dispatch whatever the device queued since last tick.
    pub fn tick<F: ControlFrontend + ?Sized>(&mut self, frontend: &mut F) {
        if let Some(dispatcher) = self.dispatcher.as_mut() {
            dispatcher.process_pending(frontend);
        }
    }

    pub fn unload(&mut self) {
        self.dispatcher = None;
    }
}
