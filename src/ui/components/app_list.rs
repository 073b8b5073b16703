use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    prelude::*,
    style::{Modifier, Style},
    widgets::{Block, BorderType, Borders, List, ListItem, Paragraph},
    Frame,
};

use crate::app::state::{App, InstallProgress};
use crate::ui::theme::*;
use crate::utils::truncate_with_ellipsis;

const BAR_WIDTH: usize = 10;

fn progress_cell(install: Option<&InstallProgress>) -> (String, Color) {
    match install {
        None => (String::new(), C_MUTED),
        Some(install) => match install.outcome {
            Some(true) => ("installed".to_string(), C_SUCCESS),
            Some(false) => ("failed".to_string(), C_DANGER),
            None => {
                let filled = install.progress as usize * BAR_WIDTH / 100;
                let bar = format!(
                    "[{}{}] {:>3}%",
                    "#".repeat(filled),
                    " ".repeat(BAR_WIDTH - filled),
                    install.progress
                );
                (bar, C_PRIMARY)
            }
        },
    }
}

pub fn render_app_list(frame: &mut Frame<'_>, area: Rect, app: &mut App) {
    let catalog_block = Block::default()
        .title(format!(" Catalog ({}) ", app.visible.len()))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(C_PANEL))
        .style(Style::default().bg(C_BG));
    let catalog_inner = catalog_block.inner(area);
    frame.render_widget(catalog_block, area);

    let left_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(4)])
        .split(catalog_inner);

    let header_line = Paragraph::new(
        "Name                 Version      Size      Category     Method  Status",
    )
    .style(Style::default().fg(C_MUTED).add_modifier(Modifier::BOLD));
    frame.render_widget(header_line, left_chunks[0]);

    if app.visible.is_empty() {
        let empty = Paragraph::new(if app.search_input.is_empty() {
            "No software in this category. Press A to add one."
        } else {
            "No software matches the search."
        })
        .style(Style::default().fg(C_MUTED));
        frame.render_widget(empty, left_chunks[1]);
        return;
    }

    let items: Vec<ListItem> = app
        .visible
        .iter()
        .map(|entry| {
            let (status, status_color) = progress_cell(app.install_state(&entry.id));
            let flag = if entry.is_cracked { "!" } else { " " };

            let line = Line::from(vec![
                Span::styled(
                    format!("{:<21}", truncate_with_ellipsis(&entry.name, 20)),
                    Style::default().fg(C_TEXT),
                ),
                Span::styled(
                    format!("{:<13}", truncate_with_ellipsis(&entry.version, 12)),
                    Style::default().fg(C_MUTED),
                ),
                Span::styled(
                    format!("{:<10}", truncate_with_ellipsis(&entry.size_label(), 9)),
                    Style::default().fg(C_MUTED),
                ),
                Span::styled(
                    format!("{:<13}", entry.category.as_str()),
                    Style::default().fg(C_MUTED),
                ),
                Span::styled(
                    format!("{:<7}", entry.install_method.as_str()),
                    Style::default().fg(if entry.install_method.is_silent() {
                        C_PRIMARY
                    } else {
                        C_TEXT
                    }),
                ),
                Span::styled(flag, Style::default().fg(C_WARNING)),
                Span::styled(status, Style::default().fg(status_color)),
            ]);

            ListItem::new(line)
        })
        .collect();

    let app_list = List::new(items)
        .highlight_style(
            Style::default()
                .bg(C_HIGHLIGHT)
                .fg(C_TEXT)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol(">> ")
        .repeat_highlight_symbol(true);

    frame.render_stateful_widget(app_list, left_chunks[1], &mut app.list_state);
}
