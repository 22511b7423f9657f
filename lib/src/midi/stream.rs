use super::*;
use crossbeam::channel::{Receiver, Sender};
use midir::{MidiInput, MidiInputConnection, MidiInputPort};
use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

const CLIENT_NAME: &str = "showcue-midi-in";

/// `midir`-backed input stream. The backend invokes our callback on its
/// own thread; the callback only pushes into a bounded channel, which
/// the owner drains from its own thread via [`MidiReceiving`].
pub struct HostedMidiInput {
    host: MidiInput,
    sender: Sender<MidiData>,
    receiver: Receiver<MidiData>,
    connection: Option<MidiInputConnection<Sender<MidiData>>>,
    connected_name: Option<String>,
    is_running: Arc<AtomicBool>,
}

impl HostedMidiInput {
    pub fn new() -> Result<Self, Error> {
        let (sender, receiver) = crossbeam::channel::bounded(1_000);

        Ok(Self {
            host: MidiInput::new(CLIENT_NAME)
                .map_err(|e| Error::DeviceEnumerationFailed(e.to_string()))?,
            sender,
            receiver,
            connection: None,
            connected_name: None,
            is_running: Arc::new(AtomicBool::new(true)),
        })
    }

    fn open_input_port(
        &self,
        port: &MidiInputPort,
        device_name: &str,
    ) -> Result<MidiInputConnection<Sender<MidiData>>, Error> {
        let callback = {
            let is_running = self.is_running.clone();

            move |timestamp: u64, bytes: &[u8], sender: &mut Sender<MidiData>| {
                if !is_running.load(Ordering::SeqCst) {
                    return;
                }

                let midi = MidiData {
                    timestamp,
                    bytes: bytes.into(),
                };

                if let Err(e) = sender.try_send(midi) {
                    log::error!("Failed to queue midi message for dispatch : {e}");
                }
            }
        };

        MidiInput::new(CLIENT_NAME)
            .map_err(|e| Error::DeviceOpenFailed {
                name: device_name.to_owned(),
                reason: e.to_string(),
            })?
            .connect(port, CLIENT_NAME, callback, self.sender.clone())
            .map_err(|e| Error::DeviceOpenFailed {
                name: device_name.to_owned(),
                reason: e.to_string(),
            })
    }
}

impl MidiReceiving for HostedMidiInput {
    fn is_midi_stream_active(&self) -> bool {
        self.is_running.load(Ordering::SeqCst)
    }

    fn set_midi_stream_active(&mut self, should_be_active: bool) {
        self.is_running.store(should_be_active, Ordering::SeqCst)
    }

    fn list_midi_devices(&self) -> Result<Vec<String>, Error> {
        self.host
            .ports()
            .iter()
            .map(|port| self.host.port_name(port))
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| Error::DeviceEnumerationFailed(e.to_string()))
    }

    fn connected_device(&self) -> Option<&str> {
        self.connected_name.as_deref()
    }

    fn connect_to_midi_device(&mut self, device_name: &str) -> Result<(), Error> {
        // at most one open port: the old connection goes away even if
        // opening the new one fails
        self.disconnect();

        let ports = self.host.ports();
        let port = ports
            .iter()
            .find(|&port| self.host.port_name(port).as_deref() == Ok(device_name))
            .ok_or_else(|| Error::DeviceNotFound(device_name.to_owned()))?;

        self.connection = Some(self.open_input_port(port, device_name)?);
        self.connected_name = Some(device_name.to_owned());
        log::trace!("[ midi ] : connected to {device_name}");
        Ok(())
    }

    fn disconnect(&mut self) {
        if let Some(connection) = self.connection.take() {
            connection.close();
        }

        if let Some(name) = self.connected_name.take() {
            log::trace!("[ midi ] : disconnected from {name}");
        }
    }

    fn try_receive_midi(&mut self) -> Vec<MidiData> {
        self.receiver.try_iter().collect()
    }
}
