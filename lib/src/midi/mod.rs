mod event;
mod ports;
mod stream;

pub use event::*;
pub use ports::*;
pub use stream::*;

/// A raw message as delivered by the input callback, before classification.
pub struct MidiData {
    pub timestamp: u64,
    pub bytes: Vec<u8>,
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("no MIDI input port named {0}")]
    DeviceNotFound(String),

    #[error("failed to open MIDI input {name} : {reason}")]
    DeviceOpenFailed { name: String, reason: String },

    #[error("failed to enumerate MIDI input ports : {0}")]
    DeviceEnumerationFailed(String),
}

/// Seam between the dispatch layer and the MIDI backend.
///
/// Implementations deliver messages from the backend's input thread into
/// an internal queue; `try_receive_midi` drains that queue on the caller's
/// thread so no dispatch work ever runs on the backend thread.
pub trait MidiReceiving {
    fn is_midi_stream_active(&self) -> bool;
    fn set_midi_stream_active(&mut self, should_be_active: bool);

    fn list_midi_devices(&self) -> Result<Vec<String>, Error>;
    fn connected_device(&self) -> Option<&str>;
    fn connect_to_midi_device(&mut self, device_name: &str) -> Result<(), Error>;
    fn disconnect(&mut self);
    fn try_receive_midi(&mut self) -> Vec<MidiData>;
}
