mod ui;

use crate::{terminal, ui::LogLine, CommonOptions};
use ratatui::prelude::*;
use showcue::{
    apps::ControlConfig,
    dispatch::{Dispatcher, Trigger},
    frontend::{RecordingControlling, SceneSwitching},
    midi::HostedMidiInput,
    settings::{apply_control_defaults, keys, InMemorySettings, Settings},
};
use std::path::PathBuf;

#[derive(Debug, clap::Parser)]
pub struct Options {
    /// Path to log file to write to
    #[arg(long)]
    log: Option<PathBuf>,

    /// Frames per second
    #[arg(long, default_value_t = 30.)]
    fps: f32,

    /// Number of scenes in the simulated frontend
    #[arg(long, default_value_t = 8)]
    scenes: usize,

    /// MIDI message kind that triggers transitions (Note or CC)
    #[arg(long, default_value = "CC")]
    transition_kind: String,

    /// First note/address mapped to scene 0
    #[arg(long, default_value_t = 0)]
    base_address: u8,

    /// Transition time in milliseconds
    #[arg(long, default_value_t = 300)]
    transition_time: u32,

    /// Scale the transition time by the event value
    #[arg(long, default_value_t = false)]
    velocity_scaling: bool,

    /// MIDI message kind that drives recording (Note or CC)
    #[arg(long, default_value = "Note")]
    record_kind: String,

    /// Note/address that starts recording
    #[arg(long, default_value_t = 1)]
    record_start: u8,

    /// Note/address that stops recording
    #[arg(long, default_value_t = 2)]
    record_stop: u8,

    /// Note/address that pauses recording
    #[arg(long, default_value_t = 3)]
    record_pause: u8,

    /// Note/address that resumes recording
    #[arg(long, default_value_t = 4)]
    record_resume: u8,
}

impl Options {
    fn into_settings(self) -> InMemorySettings {
        let mut settings = InMemorySettings::default();
        apply_control_defaults(&mut settings);
        settings.set_bool(keys::LOG_MIDI_INPUT, true);
        settings.set_str(keys::TRANSITION_KIND, &self.transition_kind);
        settings.set_int(keys::TRANSITION_BASE_ADDRESS, i64::from(self.base_address));
        settings.set_int(keys::TRANSITION_TIME, i64::from(self.transition_time));
        settings.set_bool(keys::TRANSITION_VELOCITY_SCALING, self.velocity_scaling);
        settings.set_str(keys::RECORD_KIND, &self.record_kind);
        settings.set_int(keys::RECORD_START, i64::from(self.record_start));
        settings.set_int(keys::RECORD_STOP, i64::from(self.record_stop));
        settings.set_int(keys::RECORD_PAUSE, i64::from(self.record_pause));
        settings.set_int(keys::RECORD_RESUME, i64::from(self.record_resume));
        settings
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RecordingState {
    Idle,
    Recording,
    Paused,
}

impl std::fmt::Display for RecordingState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Idle => write!(f, "idle"),
            Self::Recording => write!(f, "recording"),
            Self::Paused => write!(f, "paused"),
        }
    }
}

/// Stands in for the host frontend so the full dispatch path can be
/// watched without one: a fixed scene list and a recording state
/// machine that reports what each trigger did.
struct SimulatedFrontend {
    scenes: Vec<String>,
    state: RecordingState,
    actions: Vec<String>,
}

impl SimulatedFrontend {
    fn with_scene_count(count: usize) -> Self {
        Self {
            scenes: (0..count).map(|i| format!("Scene {}", i + 1)).collect(),
            state: RecordingState::Idle,
            actions: vec![],
        }
    }

    fn take_actions(&mut self) -> Vec<String> {
        std::mem::take(&mut self.actions)
    }
}

impl SceneSwitching for SimulatedFrontend {
    fn scene_names(&self) -> Vec<String> {
        self.scenes.clone()
    }

    fn start_transition(&mut self, scene_index: usize, duration_ms: u32) {
        self.actions.push(format!(
            "transition to scene #{scene_index} ({}) over {duration_ms}ms",
            self.scenes[scene_index]
        ));
    }
}

impl RecordingControlling for SimulatedFrontend {
    fn start_recording(&mut self) {
        self.state = RecordingState::Recording;
        self.actions.push("start recording".to_owned());
    }

    fn stop_recording(&mut self) {
        self.state = RecordingState::Idle;
        self.actions.push("stop recording".to_owned());
    }

    fn set_recording_paused(&mut self, paused: bool) {
        self.state = if paused {
            RecordingState::Paused
        } else {
            RecordingState::Recording
        };
        self.actions
            .push(if paused { "pause recording" } else { "resume recording" }.to_owned());
    }

    fn is_recording_paused(&self) -> bool {
        self.state == RecordingState::Paused
    }
}

struct Monitor {
    ui: ui::Ui,
    dispatcher: Dispatcher,
    frontend: SimulatedFrontend,
    port_names: Vec<String>,
}

impl Monitor {
    fn new(opts: Options) -> anyhow::Result<Self> {
        let scenes = opts.scenes;
        let settings = opts.into_settings();
        let config = ControlConfig::from_settings(&settings)?;

        let dispatcher = Dispatcher::new(
            Box::new(HostedMidiInput::new()?),
            vec![
                Trigger::Transition(config.transition),
                Trigger::Recording(config.recording),
            ],
            config.log_midi_input,
        );

        let port_names = dispatcher.available_devices()?;
        let ui = ui::Ui::with_port_count(port_names.len());

        Ok(Self {
            ui,
            dispatcher,
            frontend: SimulatedFrontend::with_scene_count(scenes),
            port_names,
        })
    }

    fn connect(&mut self, port_index: usize) {
        let Some(name) = self.port_names.get(port_index) else {
            return;
        };

        if let Err(e) = self.dispatcher.open_device(name) {
            log::warn!("{e}");
            self.ui.push(LogLine::Action(format!("{e}")));
        }
    }
}

impl terminal::Base for Monitor {
    fn update(&mut self) -> anyhow::Result<terminal::Flow> {
        for event in self.dispatcher.process_pending(&mut self.frontend) {
            self.ui.push(LogLine::Input(event));
        }

        for action in self.frontend.take_actions() {
            self.ui.push(LogLine::Action(action));
        }

        Ok(terminal::Flow::Continue)
    }

    fn on_keypress(&mut self, key: crossterm::event::KeyEvent) -> anyhow::Result<terminal::Flow> {
        match self.ui.handle_keypress(key) {
            ui::UiEvent::Continue => (),
            ui::UiEvent::Exit => return Ok(terminal::Flow::Exit),
            ui::UiEvent::ToggleRunningState => {
                let running = self.dispatcher.is_running();
                self.dispatcher.set_running(!running);
            }
            ui::UiEvent::ClearMessages => self.ui.clear(),
            ui::UiEvent::Connect(port_index) => self.connect(port_index),
        }

        Ok(terminal::Flow::Continue)
    }

    fn render(&mut self, f: &mut Frame) {
        let connected = self.dispatcher.connected_device().map(str::to_owned);
        let status = ui::Status {
            running: self.dispatcher.is_running(),
            connected_port: connected,
            recording: self.frontend.state.to_string(),
        };
        self.ui.render(f, &self.port_names, &status);
    }
}

fn start_logger(log: Option<PathBuf>, verbose: bool) -> anyhow::Result<()> {
    match log.or(crate::locations::log_file()) {
        Some(log_file) => crate::logger::start("monitor", log_file, verbose),
        None => Ok(()),
    }
}

pub fn run(
    terminal: &mut Terminal<impl Backend>,
    opts: Options,
    common: CommonOptions,
) -> anyhow::Result<()> {
    start_logger(opts.log.clone(), common.verbose)?;

    let fps = opts.fps.max(1.);
    let mut app = Monitor::new(opts)?;

    terminal::run(terminal, &mut app, fps)
}
