use ratatui::{
    layout::{Constraint, Direction, Layout},
    prelude::*,
    style::{Modifier, Style},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::app::form::EntryForm;
use crate::ui::layout::centered_rect;
use crate::ui::theme::*;

const LABEL_WIDTH: usize = 20;

pub fn render_entry_form(frame: &mut Frame<'_>, form: &EntryForm) {
    let area = centered_rect(70, 70, frame.area());
    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(form.title())
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(C_PRIMARY))
        .style(Style::default().bg(C_BG));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(3)])
        .split(inner);

    let focused = form.focused();
    let lines: Vec<Line> = form
        .fields()
        .into_iter()
        .map(|field| {
            let is_focused = field == focused;
            let marker = if is_focused { "> " } else { "  " };
            let value = form.value(field);
            let shown = if field.is_text() && is_focused {
                format!("{value}_")
            } else if field.is_text() {
                value
            } else {
                format!("< {value} >")
            };
            let value_style = if is_focused {
                Style::default()
                    .fg(C_TEXT)
                    .bg(C_HIGHLIGHT)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(C_TEXT)
            };
            Line::from(vec![
                Span::styled(marker, Style::default().fg(C_PRIMARY)),
                Span::styled(
                    format!("{:<width$}", field.label(), width = LABEL_WIDTH),
                    Style::default().fg(C_MUTED),
                ),
                Span::styled(shown, value_style),
            ])
        })
        .collect();
    frame.render_widget(Paragraph::new(lines), chunks[0]);

    let mut bottom = vec![Line::from(vec![
        Span::styled(
            format!("[ {} ]", form.submit_label()),
            Style::default()
                .fg(C_BG)
                .bg(C_SUCCESS)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled("  Enter", Style::default().fg(C_MUTED)),
        Span::styled("   [ Cancel ]", Style::default().fg(C_WARNING)),
        Span::styled("  Esc", Style::default().fg(C_MUTED)),
    ])];
    if let Some(error) = &form.error {
        bottom.push(Line::from(Span::styled(
            error.clone(),
            Style::default().fg(C_DANGER).add_modifier(Modifier::BOLD),
        )));
    }
    let footer = Paragraph::new(bottom).wrap(Wrap { trim: true }).block(
        Block::default()
            .borders(Borders::TOP)
            .border_style(Style::default().fg(C_PANEL)),
    );
    frame.render_widget(footer, chunks[1]);
}
