use ratatui::{
    prelude::*,
    widgets::{Block, Borders, List, ListItem},
};
use showcue::midi::ControlEvent;

pub enum LogLine {
    /// A classified input event.
    Input(ControlEvent),
    /// Something a trigger did (or refused to do) in response.
    Action(String),
}

impl LogLine {
    fn spans(&self, style: Style) -> Line<'_> {
        match self {
            Self::Input(event) => Line::from(vec![
                Span::styled(format!("{}", event.kind), style.fg(Color::Cyan)),
                Span::styled(
                    format!("  addr = {}  val = {}", event.address, event.value),
                    style.fg(Color::Yellow),
                ),
            ]),
            Self::Action(text) => Line::from(vec![
                Span::styled("  └ ", style.fg(Color::DarkGray)),
                Span::styled(text.as_str(), style.fg(Color::Green)),
            ]),
        }
    }
}

pub fn render_log(f: &mut Frame, title: &str, lines: &[LogLine], area: Rect) {
    const MAX_NUM_LINES_ON_SCREEN: usize = 128;

    let visible = MAX_NUM_LINES_ON_SCREEN.min(lines.len());
    let items: Vec<ListItem> = lines
        .iter()
        .skip(lines.len() - visible)
        .enumerate()
        .map(|(i, line)| {
            let style = if i + 1 == visible {
                Style::default().add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };

            ListItem::new(vec![line.spans(style)])
        })
        .collect();

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .style(Style::default().fg(Color::DarkGray))
            .title(Span::styled(
                title,
                Style::default().add_modifier(Modifier::BOLD),
            )),
    );

    f.render_widget(list, area);
}
