use crate::{
    frontend::RecordingControlling,
    midi::{ControlEvent, EventKind},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordingAction {
    Start,
    Stop,
    Pause,
    Resume,
}

/// Maps four configured addresses onto the recording controls. The
/// recording state machine itself lives in the host; pause and resume
/// only consult it to drop requests that would be redundant.
#[derive(Debug, Clone)]
pub struct RecordingTrigger {
    pub kind: EventKind,
    pub start: u8,
    pub stop: u8,
    pub pause: u8,
    pub resume: u8,
}

impl RecordingTrigger {
    pub fn action_for(&self, event: &ControlEvent) -> Option<RecordingAction> {
        if event.kind != self.kind {
            return None;
        }

        // first match wins when addresses overlap
        if event.address == self.start {
            Some(RecordingAction::Start)
        } else if event.address == self.stop {
            Some(RecordingAction::Stop)
        } else if event.address == self.pause {
            Some(RecordingAction::Pause)
        } else if event.address == self.resume {
            Some(RecordingAction::Resume)
        } else {
            None
        }
    }

    pub(crate) fn handle<R: RecordingControlling + ?Sized>(
        &self,
        event: &ControlEvent,
        recorder: &mut R,
    ) {
        match self.action_for(event) {
            Some(RecordingAction::Start) => {
                log::info!("[ dispatch ] : start recording");
                recorder.start_recording();
            }
            Some(RecordingAction::Stop) => {
                log::info!("[ dispatch ] : stop recording");
                recorder.stop_recording();
            }
            Some(RecordingAction::Pause) => {
                if recorder.is_recording_paused() {
                    log::info!("[ dispatch ] : already paused");
                } else {
                    log::info!("[ dispatch ] : pause recording");
                    recorder.set_recording_paused(true);
                }
            }
            Some(RecordingAction::Resume) => {
                if recorder.is_recording_paused() {
                    log::info!("[ dispatch ] : resume recording");
                    recorder.set_recording_paused(false);
                } else {
                    log::info!("[ dispatch ] : not paused");
                }
            }
            None => {}
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn trigger() -> RecordingTrigger {
        RecordingTrigger {
            kind: EventKind::Note,
            start: 1,
            stop: 2,
            pause: 3,
            resume: 4,
        }
    }

    fn note(address: u8) -> ControlEvent {
        ControlEvent {
            kind: EventKind::Note,
            address,
            value: 100,
        }
    }

    #[derive(Default, Debug, PartialEq)]
    struct FakeRecorder {
        paused: bool,
        calls: Vec<&'static str>,
    }

    impl RecordingControlling for FakeRecorder {
        fn start_recording(&mut self) {
            self.calls.push("start");
        }

        fn stop_recording(&mut self) {
            self.calls.push("stop");
        }

        fn set_recording_paused(&mut self, paused: bool) {
            self.paused = paused;
            self.calls.push(if paused { "pause" } else { "resume" });
        }

        fn is_recording_paused(&self) -> bool {
            self.paused
        }
    }

    #[test]
    fn each_address_maps_to_its_action() {
        assert_eq!(trigger().action_for(&note(1)), Some(RecordingAction::Start));
        assert_eq!(trigger().action_for(&note(2)), Some(RecordingAction::Stop));
        assert_eq!(trigger().action_for(&note(3)), Some(RecordingAction::Pause));
        assert_eq!(trigger().action_for(&note(4)), Some(RecordingAction::Resume));
        assert_eq!(trigger().action_for(&note(5)), None);
    }

    #[test]
    fn mismatched_kinds_are_ignored() {
        let event = ControlEvent {
            kind: EventKind::ControlChange,
            address: 1,
            value: 100,
        };
        assert_eq!(trigger().action_for(&event), None);
    }

    #[test]
    fn redundant_pause_and_resume_requests_are_dropped() {
        let mut recorder = FakeRecorder::default();
        for address in [1, 3, 3, 4, 4] {
            trigger().handle(&note(address), &mut recorder);
        }

        // the second pause and the second resume must not reach the host
        assert_eq!(recorder.calls, vec!["start", "pause", "resume"]);
        assert!(!recorder.paused);
    }

    #[test]
    fn stop_passes_through_regardless_of_pause_state() {
        let mut recorder = FakeRecorder {
            paused: true,
            ..Default::default()
        };
        trigger().handle(&note(2), &mut recorder);
        assert_eq!(recorder.calls, vec!["stop"]);
    }
}
