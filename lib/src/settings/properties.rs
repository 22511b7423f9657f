use super::Settings;

/// Settings keys shared by the host glue, the property schema and the
/// typed configs.
pub mod keys {
    pub const HOUR: &str = "hour";
    pub const MINUTE: &str = "minute";
    pub const SECOND: &str = "second";
    pub const SOURCE_NAME: &str = "source_name";
    pub const FINISHED_TEXT: &str = "finished_text";

    pub const MIDI_DEVICE: &str = "midi_device";
    pub const LOG_MIDI_INPUT: &str = "log_midi_input";
    pub const TRANSITION_KIND: &str = "transition_kind";
    pub const TRANSITION_BASE_ADDRESS: &str = "transition_base_address";
    pub const TRANSITION_TIME: &str = "transition_time";
    pub const TRANSITION_VELOCITY_SCALING: &str = "transition_velocity_scaling";
    pub const RECORD_KIND: &str = "record_kind";
    pub const RECORD_START: &str = "record_start";
    pub const RECORD_STOP: &str = "record_stop";
    pub const RECORD_PAUSE: &str = "record_pause";
    pub const RECORD_RESUME: &str = "record_resume";
}

/// Which widget the host should render for a property.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropertyKind {
    IntRange { min: i64, max: i64 },
    Text,
    Toggle,
    DeviceList,
    TextSourceList,
    EventKindList,
}

#[derive(Debug, Clone, Copy)]
pub struct PropertySpec {
    pub key: &'static str,
    pub label: &'static str,
    pub kind: PropertyKind,
}

const MIDI_RANGE: PropertyKind = PropertyKind::IntRange { min: 0, max: 127 };

pub fn countdown_properties() -> Vec<PropertySpec> {
    vec![
        PropertySpec {
            key: keys::HOUR,
            label: "Hour (0-23)",
            kind: PropertyKind::IntRange { min: 0, max: 23 },
        },
        PropertySpec {
            key: keys::MINUTE,
            label: "Minute (0-59)",
            kind: PropertyKind::IntRange { min: 0, max: 59 },
        },
        PropertySpec {
            key: keys::SECOND,
            label: "Second (0-59)",
            kind: PropertyKind::IntRange { min: 0, max: 59 },
        },
        PropertySpec {
            key: keys::SOURCE_NAME,
            label: "Text source",
            kind: PropertyKind::TextSourceList,
        },
        PropertySpec {
            key: keys::FINISHED_TEXT,
            label: "Countdown final text",
            kind: PropertyKind::Text,
        },
    ]
}

pub fn control_properties() -> Vec<PropertySpec> {
    vec![
        PropertySpec {
            key: keys::MIDI_DEVICE,
            label: "MIDI Device",
            kind: PropertyKind::DeviceList,
        },
        PropertySpec {
            key: keys::TRANSITION_KIND,
            label: "Transition to Scene midi type",
            kind: PropertyKind::EventKindList,
        },
        PropertySpec {
            key: keys::TRANSITION_BASE_ADDRESS,
            label: "First Transition to Scene Midi Note/Address",
            kind: MIDI_RANGE,
        },
        PropertySpec {
            key: keys::TRANSITION_TIME,
            label: "Transition time (MS)",
            kind: PropertyKind::IntRange { min: 0, max: 5000 },
        },
        PropertySpec {
            key: keys::TRANSITION_VELOCITY_SCALING,
            label: "Scale transition time by velocity",
            kind: PropertyKind::Toggle,
        },
        PropertySpec {
            key: keys::RECORD_KIND,
            label: "Recording midi type",
            kind: PropertyKind::EventKindList,
        },
        PropertySpec {
            key: keys::RECORD_START,
            label: "Start Recording Midi Note/Address",
            kind: MIDI_RANGE,
        },
        PropertySpec {
            key: keys::RECORD_STOP,
            label: "Stop Recording Midi Note/Address",
            kind: MIDI_RANGE,
        },
        PropertySpec {
            key: keys::RECORD_PAUSE,
            label: "Pause Recording Midi Note/Address",
            kind: MIDI_RANGE,
        },
        PropertySpec {
            key: keys::RECORD_RESUME,
            label: "Unpause Recording Midi Note/Address",
            kind: MIDI_RANGE,
        },
        PropertySpec {
            key: keys::LOG_MIDI_INPUT,
            label: "Log MIDI input",
            kind: PropertyKind::Toggle,
        },
    ]
}

pub fn apply_countdown_defaults(settings: &mut dyn Settings) {
    settings.set_int(keys::HOUR, 11);
    settings.set_int(keys::MINUTE, 0);
    settings.set_int(keys::SECOND, 0);
    settings.set_str(keys::SOURCE_NAME, "");
    settings.set_str(keys::FINISHED_TEXT, "Starting soon");
}

pub fn apply_control_defaults(settings: &mut dyn Settings) {
    settings.set_str(keys::MIDI_DEVICE, "");
    settings.set_bool(keys::LOG_MIDI_INPUT, false);
    settings.set_str(keys::TRANSITION_KIND, "CC");
    settings.set_int(keys::TRANSITION_BASE_ADDRESS, 0);
    settings.set_int(keys::TRANSITION_TIME, 300);
    settings.set_bool(keys::TRANSITION_VELOCITY_SCALING, false);
    settings.set_str(keys::RECORD_KIND, "Note");
    settings.set_int(keys::RECORD_START, 0);
    settings.set_int(keys::RECORD_STOP, 0);
    settings.set_int(keys::RECORD_PAUSE, 0);
    settings.set_int(keys::RECORD_RESUME, 0);
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{apps::ControlConfig, countdown::CountdownConfig, settings::InMemorySettings};

    #[test]
    fn every_property_key_is_declared_once() {
        for properties in [countdown_properties(), control_properties()] {
            let mut keys: Vec<_> = properties.iter().map(|p| p.key).collect();
            keys.sort_unstable();
            keys.dedup();
            assert_eq!(keys.len(), properties.len());
        }
    }

    #[test]
    fn the_defaults_assemble_into_valid_configs() {
        let mut settings = InMemorySettings::default();
        apply_countdown_defaults(&mut settings);
        apply_control_defaults(&mut settings);

        let countdown = CountdownConfig::from_settings(&settings).unwrap();
        assert_eq!(countdown.finished_text, "Starting soon");

        let control = ControlConfig::from_settings(&settings).unwrap();
        assert!(control.device_name.is_empty());
        assert_eq!(control.transition.duration_ms, 300);
    }
}
