use crate::ui::{render_log, LogLine, Selector};
use crossterm::event::KeyCode;
use ratatui::prelude::*;

pub enum UiEvent {
    Continue,
    ToggleRunningState,
    ClearMessages,
    Connect(usize),
    Exit,
}

pub struct Status {
    pub running: bool,
    pub connected_port: Option<String>,
    pub recording: String,
}

pub struct Ui {
    port_selector: Selector,
    lines: Vec<LogLine>,
}

impl Ui {
    pub fn with_port_count(count: usize) -> Self {
        Self {
            port_selector: Selector::with_len(count),
            lines: vec![],
        }
    }

    pub fn push(&mut self, line: LogLine) {
        self.lines.push(line);
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    pub fn handle_keypress(&mut self, key: crossterm::event::KeyEvent) -> UiEvent {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => return UiEvent::Exit,
            KeyCode::Char('c') => return UiEvent::ClearMessages,
            KeyCode::Char(' ') => return UiEvent::ToggleRunningState,
            KeyCode::Down | KeyCode::Char('j') => self.port_selector.next(),
            KeyCode::Up | KeyCode::Char('k') => self.port_selector.previous(),
            KeyCode::Enter => {
                if let Some(index) = self.port_selector.confirm_selection() {
                    return UiEvent::Connect(index);
                }
            }
            _ => {}
        }

        UiEvent::Continue
    }

    pub fn render(&mut self, f: &mut Frame, port_names: &[String], status: &Status) {
        let sections = Layout::default()
            .direction(Direction::Vertical)
            .margin(1)
            .constraints([Constraint::Min(3), Constraint::Percentage(80)].as_ref())
            .split(f.size());

        self.port_selector
            .render(f, sections[0], "─ports─", port_names);

        let port = match &status.connected_port {
            Some(name) => format!("─port : {name}─"),
            None => "".to_owned(),
        };

        let running = if status.running {
            "─active─"
        } else {
            "─paused─"
        };

        let title = format!("{running}{port}─recording : {}─", status.recording);
        render_log(f, &title, &self.lines, sections[1]);
    }
}
