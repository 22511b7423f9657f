mod recording;
mod transition;

pub use recording::*;
pub use transition::*;

use crate::{
    frontend::ControlFrontend,
    midi::{classify, ControlEvent, Error, MidiReceiving},
};

/// The closed set of things an incoming event can drive. Each trigger
/// does its own relevance filtering, so several may react to the same
/// event when a user configures overlapping addresses.
#[derive(Debug, Clone)]
pub enum Trigger {
    Transition(TransitionTrigger),
    Recording(RecordingTrigger),
}

impl Trigger {
    fn handle<F: ControlFrontend + ?Sized>(&self, event: &ControlEvent, frontend: &mut F) {
        match self {
            Self::Transition(trigger) => trigger.handle(event, frontend),
            Self::Recording(trigger) => trigger.handle(event, frontend),
        }
    }
}

/// Owns the input stream and the ordered trigger list. All dispatch work
/// happens on the thread that calls [`Dispatcher::process_pending`]; the
/// backend's input thread only ever feeds the stream's queue.
pub struct Dispatcher {
    midi_in: Box<dyn MidiReceiving>,
    triggers: Vec<Trigger>,
    log_input: bool,
}

impl Dispatcher {
    pub fn new(midi_in: Box<dyn MidiReceiving>, triggers: Vec<Trigger>, log_input: bool) -> Self {
        Self {
            midi_in,
            triggers,
            log_input,
        }
    }

    pub fn connected_device(&self) -> Option<&str> {
        self.midi_in.connected_device()
    }

    pub fn is_running(&self) -> bool {
        self.midi_in.is_midi_stream_active()
    }

    pub fn set_running(&mut self, should_run: bool) {
        self.midi_in.set_midi_stream_active(should_run)
    }

    pub fn available_devices(&self) -> Result<Vec<String>, Error> {
        self.midi_in.list_midi_devices()
    }

    /// Connect to `device_name`. Asking for the device that is already
    /// open does nothing. Asking for anything else always closes the
    /// current connection first, so a failed open leaves no connection
    /// behind. An empty name just disconnects.
    pub fn open_device(&mut self, device_name: &str) -> Result<(), Error> {
        if self.midi_in.connected_device() == Some(device_name) {
            return Ok(());
        }

        self.midi_in.disconnect();

        if device_name.is_empty() {
            return Ok(());
        }

        self.midi_in.connect_to_midi_device(device_name)
    }

    /// Drain everything the input thread has queued and run it through
    /// the triggers in registration order. Never fails and never panics;
    /// unclassifiable messages are dropped without comment. Returns the
    /// classified events for callers that display them.
    pub fn process_pending<F: ControlFrontend + ?Sized>(
        &mut self,
        frontend: &mut F,
    ) -> Vec<ControlEvent> {
        let mut processed = vec![];

        for message in self.midi_in.try_receive_midi() {
            let Some(event) = classify(&message.bytes) else {
                continue;
            };

            if self.log_input {
                log::debug!(
                    "[ midi ] : {}\t{}\t{}",
                    event.kind,
                    event.address,
                    event.value
                );
            }

            for trigger in &self.triggers {
                trigger.handle(&event, frontend);
            }

            processed.push(event);
        }

        processed
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::midi::{EventKind, MidiData};
    use std::{cell::RefCell, rc::Rc};

    #[derive(Default)]
    struct FakeMidiIn {
        calls: Rc<RefCell<Vec<String>>>,
        connected: Option<String>,
        fail_next_connect: bool,
        pending: Vec<Vec<u8>>,
    }

    impl MidiReceiving for FakeMidiIn {
        fn is_midi_stream_active(&self) -> bool {
            true
        }

        fn set_midi_stream_active(&mut self, _: bool) {}

        fn list_midi_devices(&self) -> Result<Vec<String>, Error> {
            Ok(vec!["pad".into(), "keys".into()])
        }

        fn connected_device(&self) -> Option<&str> {
            self.connected.as_deref()
        }

        fn connect_to_midi_device(&mut self, device_name: &str) -> Result<(), Error> {
            self.calls.borrow_mut().push(format!("connect:{device_name}"));
            if self.fail_next_connect {
                return Err(Error::DeviceNotFound(device_name.to_owned()));
            }
            self.connected = Some(device_name.to_owned());
            Ok(())
        }

        fn disconnect(&mut self) {
            self.calls.borrow_mut().push("disconnect".to_owned());
            self.connected = None;
        }

        fn try_receive_midi(&mut self) -> Vec<MidiData> {
            std::mem::take(&mut self.pending)
                .into_iter()
                .map(|bytes| MidiData {
                    timestamp: 0,
                    bytes,
                })
                .collect()
        }
    }

    #[derive(Default)]
    struct FakeFrontend {
        scenes: Vec<String>,
        transitions: Vec<(usize, u32)>,
        recordings: Vec<&'static str>,
        paused: bool,
    }

    impl crate::frontend::SceneSwitching for FakeFrontend {
        fn scene_names(&self) -> Vec<String> {
            self.scenes.clone()
        }

        fn start_transition(&mut self, scene_index: usize, duration_ms: u32) {
            self.transitions.push((scene_index, duration_ms));
        }
    }

    impl crate::frontend::RecordingControlling for FakeFrontend {
        fn start_recording(&mut self) {
            self.recordings.push("start");
        }

        fn stop_recording(&mut self) {
            self.recordings.push("stop");
        }

        fn set_recording_paused(&mut self, paused: bool) {
            self.paused = paused;
        }

        fn is_recording_paused(&self) -> bool {
            self.paused
        }
    }

    fn dispatcher_with(midi_in: FakeMidiIn) -> (Dispatcher, Rc<RefCell<Vec<String>>>) {
        let calls = midi_in.calls.clone();
        let triggers = vec![
            Trigger::Transition(TransitionTrigger {
                kind: EventKind::ControlChange,
                base_address: 10,
                duration_ms: 1000,
                velocity_scaling: false,
            }),
            Trigger::Recording(RecordingTrigger {
                kind: EventKind::Note,
                start: 1,
                stop: 2,
                pause: 3,
                resume: 4,
            }),
        ];
        (Dispatcher::new(Box::new(midi_in), triggers, false), calls)
    }

    #[test]
    fn reopening_the_connected_device_is_a_no_op() {
        let midi_in = FakeMidiIn {
            connected: Some("pad".into()),
            ..Default::default()
        };
        let (mut dispatcher, calls) = dispatcher_with(midi_in);

        dispatcher.open_device("pad").unwrap();
        assert!(calls.borrow().is_empty());
    }

    #[test]
    fn switching_devices_disconnects_before_connecting() {
        let midi_in = FakeMidiIn {
            connected: Some("pad".into()),
            ..Default::default()
        };
        let (mut dispatcher, calls) = dispatcher_with(midi_in);

        dispatcher.open_device("keys").unwrap();
        assert_eq!(*calls.borrow(), vec!["disconnect", "connect:keys"]);
    }

    #[test]
    fn a_failed_open_still_drops_the_old_connection() {
        let midi_in = FakeMidiIn {
            connected: Some("pad".into()),
            fail_next_connect: true,
            ..Default::default()
        };
        let (mut dispatcher, calls) = dispatcher_with(midi_in);

        dispatcher.open_device("gone").unwrap_err();
        assert_eq!(*calls.borrow(), vec!["disconnect", "connect:gone"]);
        assert_eq!(dispatcher.connected_device(), None);
    }

    #[test]
    fn an_empty_name_only_disconnects() {
        let midi_in = FakeMidiIn {
            connected: Some("pad".into()),
            ..Default::default()
        };
        let (mut dispatcher, calls) = dispatcher_with(midi_in);

        dispatcher.open_device("").unwrap();
        assert_eq!(*calls.borrow(), vec!["disconnect"]);
    }

    #[test]
    fn pending_messages_are_classified_and_dispatched_in_order() {
        let midi_in = FakeMidiIn {
            pending: vec![
                vec![0xB0, 12, 50], // transition to scene 2
                vec![0xF8],         // clock, dropped silently
                vec![0x90, 1, 100], // start recording
            ],
            ..Default::default()
        };
        let (mut dispatcher, _) = dispatcher_with(midi_in);

        let mut frontend = FakeFrontend {
            scenes: (0..4).map(|i| format!("Scene {i}")).collect(),
            ..Default::default()
        };
        let processed = dispatcher.process_pending(&mut frontend);

        assert_eq!(frontend.transitions, vec![(2, 1000)]);
        assert_eq!(frontend.recordings, vec!["start"]);

        // the clock message never became an event
        assert_eq!(processed.len(), 2);
    }

    #[test]
    fn overlapping_trigger_configuration_fans_out_to_both() {
        let midi_in = FakeMidiIn {
            pending: vec![vec![0x90, 11, 100]],
            ..Default::default()
        };

        let triggers = vec![
            Trigger::Transition(TransitionTrigger {
                kind: EventKind::Note,
                base_address: 10,
                duration_ms: 1000,
                velocity_scaling: false,
            }),
            Trigger::Recording(RecordingTrigger {
                kind: EventKind::Note,
                start: 11,
                stop: 12,
                pause: 13,
                resume: 14,
            }),
        ];
        let mut dispatcher = Dispatcher::new(Box::new(midi_in), triggers, false);

        let mut frontend = FakeFrontend {
            scenes: (0..4).map(|i| format!("Scene {i}")).collect(),
            ..Default::default()
        };
        dispatcher.process_pending(&mut frontend);

        assert_eq!(frontend.transitions, vec![(1, 1000)]);
        assert_eq!(frontend.recordings, vec!["start"]);
    }
}
