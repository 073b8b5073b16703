use ratatui::{
    layout::{Constraint, Direction, Layout},
    prelude::*,
    style::{Modifier, Style},
    widgets::{Block, BorderType, Borders, Clear, List, ListItem, ListState, Paragraph},
    Frame,
};

use crate::system::picker::FilePicker;
use crate::ui::layout::centered_rect;
use crate::ui::theme::*;

pub fn render_file_picker(frame: &mut Frame<'_>, picker: &FilePicker) {
    let area = centered_rect(60, 60, frame.area());
    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(" Select Software Installer ")
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(C_PRIMARY))
        .style(Style::default().bg(C_BG));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .split(inner);

    let filter = picker.active_filter();
    let header = Paragraph::new(vec![
        Line::from(Span::styled(
            picker.dir.display().to_string(),
            Style::default().fg(C_TEXT).add_modifier(Modifier::BOLD),
        )),
        Line::from(vec![
            Span::styled("Filter: ", Style::default().fg(C_MUTED)),
            Span::styled(
                format!("{} ({})", filter.name, filter.extensions.join(", ")),
                Style::default().fg(C_PRIMARY),
            ),
        ]),
    ]);
    frame.render_widget(header, chunks[0]);

    let items: Vec<ListItem> = picker
        .entries
        .iter()
        .map(|entry| {
            let (label, color) = if entry.is_dir {
                (format!("{}/", entry.name), C_PRIMARY)
            } else {
                (entry.name.clone(), C_TEXT)
            };
            ListItem::new(Line::from(Span::styled(label, Style::default().fg(color))))
        })
        .collect();

    let list = List::new(items)
        .highlight_style(
            Style::default()
                .bg(C_HIGHLIGHT)
                .fg(C_TEXT)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol(">> ");
    let mut state = ListState::default();
    if !picker.entries.is_empty() {
        state.select(Some(picker.selected));
    }
    frame.render_stateful_widget(list, chunks[1], &mut state);

    let status = match &picker.error {
        Some(err) => Span::styled(format!("Error: {err}"), Style::default().fg(C_DANGER)),
        None => Span::styled(
            format!("{} item(s)", picker.entries.len()),
            Style::default().fg(C_MUTED),
        ),
    };
    frame.render_widget(Paragraph::new(Line::from(status)), chunks[2]);
}
