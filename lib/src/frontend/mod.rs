//! Seams for the pieces of the host application the triggers act on.
//! The host owns the scene graph, the transition engine, the recording
//! state machine and the text rendering; these traits only expose the
//! operations this crate needs.

pub trait SceneSwitching {
    fn scene_names(&self) -> Vec<String>;
    fn start_transition(&mut self, scene_index: usize, duration_ms: u32);
}

pub trait RecordingControlling {
    fn start_recording(&mut self);
    fn stop_recording(&mut self);
    fn set_recording_paused(&mut self, paused: bool);
    fn is_recording_paused(&self) -> bool;
}

pub trait ControlFrontend: SceneSwitching + RecordingControlling {}
impl<T: SceneSwitching + RecordingControlling> ControlFrontend for T {}

pub trait TextDisplaying {
    fn text_source_names(&self) -> Vec<String>;
    fn set_text(&mut self, source_name: &str, text: &str);
}
