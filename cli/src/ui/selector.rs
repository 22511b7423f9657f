use ratatui::{
    prelude::*,
    widgets::{Block, Borders, List, ListItem, ListState},
};

/// Cycles through a list of elements while retaining a confirmed
/// selection. It does not own the rendered data; the caller keeps the
/// element count and the rendered items coherent.
#[derive(Default)]
pub struct Selector {
    state: ListState,
    selection: Option<usize>,
    len: usize,
}

impl Selector {
    pub fn with_len(len: usize) -> Self {
        let mut state = ListState::default();
        state.select(len.ge(&1).then_some(0));

        Self {
            state,
            selection: None,
            len,
        }
    }

    pub fn next(&mut self) {
        if self.len == 0 {
            return;
        }

        let next = self.state.selected().map(|i| (i + 1) % self.len);
        self.state.select(next);
    }

    pub fn previous(&mut self) {
        if self.len == 0 {
            return;
        }

        let prev = self.state.selected().map(|i| (i + self.len - 1) % self.len);
        self.state.select(prev);
    }

    pub fn confirm_selection(&mut self) -> Option<usize> {
        self.selection = self.state.selected();
        self.selection
    }

    pub fn selected(&self) -> Option<usize> {
        self.selection
    }

    pub fn render(&mut self, f: &mut Frame, area: Rect, title: &str, items: &[String]) {
        let items: Vec<ListItem> = items
            .iter()
            .enumerate()
            .map(|(i, item)| {
                let color = if self.selection == Some(i) {
                    Color::Cyan
                } else {
                    Color::Gray
                };

                ListItem::new(Span::styled(item.as_str(), Style::default().fg(color)))
            })
            .collect();

        let items = List::new(items)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .fg(Color::DarkGray)
                    .title(title),
            )
            .highlight_style(Style::default().add_modifier(Modifier::BOLD))
            .highlight_symbol("> ");

        f.render_stateful_widget(items, area, &mut self.state);
    }
}
