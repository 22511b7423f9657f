mod properties;

pub use properties::*;

use std::collections::HashMap;

/// The host's settings object: an opaque key/value store with typed
/// accessors. The setter side exists so the device-name drift policy can
/// persist a corrected port name.
pub trait Settings {
    fn get_str(&self, key: &str) -> Option<String>;
    fn get_int(&self, key: &str) -> Option<i64>;
    fn get_bool(&self, key: &str) -> Option<bool>;

    fn set_str(&mut self, key: &str, value: &str);
    fn set_int(&mut self, key: &str, value: i64);
    fn set_bool(&mut self, key: &str, value: bool);
}

#[derive(Debug, Clone, PartialEq)]
enum Value {
    Str(String),
    Int(i64),
    Bool(bool),
}

/// Plain `HashMap` settings store for tests and the CLI.
#[derive(Debug, Default, Clone)]
pub struct InMemorySettings {
    values: HashMap<String, Value>,
}

impl Settings for InMemorySettings {
    fn get_str(&self, key: &str) -> Option<String> {
        match self.values.get(key) {
            Some(Value::Str(value)) => Some(value.clone()),
            _ => None,
        }
    }

    fn get_int(&self, key: &str) -> Option<i64> {
        match self.values.get(key) {
            Some(Value::Int(value)) => Some(*value),
            _ => None,
        }
    }

    fn get_bool(&self, key: &str) -> Option<bool> {
        match self.values.get(key) {
            Some(Value::Bool(value)) => Some(*value),
            _ => None,
        }
    }

    fn set_str(&mut self, key: &str, value: &str) {
        self.values
            .insert(key.to_owned(), Value::Str(value.to_owned()));
    }

    fn set_int(&mut self, key: &str, value: i64) {
        self.values.insert(key.to_owned(), Value::Int(value));
    }

    fn set_bool(&mut self, key: &str, value: bool) {
        self.values.insert(key.to_owned(), Value::Bool(value));
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{key} = {value} is outside {min}..={max}")]
    OutOfRange {
        key: &'static str,
        value: i64,
        min: i64,
        max: i64,
    },

    #[error("{key} = {value:?} is not a recognised MIDI message kind")]
    InvalidEventKind { key: &'static str, value: String },
}

pub(crate) fn ranged_int(
    settings: &dyn Settings,
    key: &'static str,
    default: i64,
    min: i64,
    max: i64,
) -> Result<i64, ConfigError> {
    let value = settings.get_int(key).unwrap_or(default);
    if (min..=max).contains(&value) {
        Ok(value)
    } else {
        Err(ConfigError::OutOfRange {
            key,
            value,
            min,
            max,
        })
    }
}

pub(crate) fn channel(settings: &dyn Settings, key: &'static str) -> Result<u8, ConfigError> {
    ranged_int(settings, key, 0, 0, 127).map(|value| value as u8)
}

pub(crate) fn event_kind(
    settings: &dyn Settings,
    key: &'static str,
    default: crate::midi::EventKind,
) -> Result<crate::midi::EventKind, ConfigError> {
    match settings.get_str(key) {
        None => Ok(default),
        Some(value) => value
            .parse()
            .map_err(|_| ConfigError::InvalidEventKind { key, value }),
    }
}
