use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    prelude::*,
    style::{Modifier, Style},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::app::state::{App, Mode};
use crate::ui::components::{
    app_list::render_app_list, detail_panel::render_detail_panel,
    entry_form::render_entry_form, file_picker::render_file_picker, footer::render_footer,
    tabs::render_category_tabs,
};
use crate::ui::layout::centered_rect;
use crate::ui::theme::*;

pub fn ui(frame: &mut Frame<'_>, app: &mut App) {
    frame.render_widget(
        Block::default().style(Style::default().bg(C_BG)),
        frame.area(),
    );

    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(10),
            Constraint::Length(4),
        ])
        .split(frame.area());

    render_category_tabs(frame, vertical[0], app);

    let searching = app.mode == Mode::Search;
    let search_title = if searching {
        " Search mode (/): typing... Enter apply, Esc close "
    } else {
        " Search (/ to start, Esc clear) "
    };

    let search_text = if app.search_input.is_empty() {
        "Type to filter by name or description".to_string()
    } else {
        app.search_input.clone()
    };
    let search = Paragraph::new(search_text)
        .block(
            Block::default()
                .title(search_title)
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(if searching { C_PRIMARY } else { C_PANEL })),
        )
        .style(if searching || !app.search_input.is_empty() {
            Style::default().fg(C_TEXT)
        } else {
            Style::default().fg(C_MUTED)
        });
    frame.render_widget(search, vertical[1]);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(62), Constraint::Percentage(38)])
        .split(vertical[2]);

    render_app_list(frame, body[0], app);
    render_detail_panel(frame, body[1], app);
    render_footer(frame, vertical[3], app);

    if let Some(form) = &app.form {
        render_entry_form(frame, form);
    }
    if let Some(picker) = &app.picker {
        render_file_picker(frame, picker);
    }
    if app.mode == Mode::ConfirmDelete {
        render_confirm_delete(frame, app);
    }

    if searching {
        let cursor_x = vertical[1].x + 1 + app.search_input.chars().count() as u16;
        let cursor_y = vertical[1].y + 1;
        frame.set_cursor_position((cursor_x, cursor_y));
    }
}

fn render_confirm_delete(frame: &mut Frame<'_>, app: &App) {
    let area = centered_rect(50, 25, frame.area());
    frame.render_widget(Clear, area);

    let msg = match &app.pending_delete {
        Some(entry) => format!(
            "Are you sure you want to delete:\n{} {}?",
            entry.name, entry.version
        ),
        None => "Confirm delete?".to_string(),
    };

    let block = Paragraph::new(msg)
        .style(Style::default().fg(C_TEXT))
        .wrap(Wrap { trim: true })
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .title(" Confirm Delete ")
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(C_PANEL))
                .style(Style::default().bg(C_BG)),
        );
    frame.render_widget(block, area);

    let btn_area = Rect::new(
        area.x + 2,
        area.y + area.height.saturating_sub(3),
        area.width.saturating_sub(4),
        1,
    );

    let yes_style = if app.confirm_selected {
        Style::default()
            .fg(C_BG)
            .bg(C_DANGER)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(C_DANGER).add_modifier(Modifier::BOLD)
    };
    let no_style = if !app.confirm_selected {
        Style::default()
            .fg(C_BG)
            .bg(C_SUCCESS)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(C_SUCCESS).add_modifier(Modifier::BOLD)
    };

    let btns = Paragraph::new(
        Line::from(vec![
            Span::styled("[ Yes ] ", yes_style),
            Span::styled("[ No ] ", no_style),
        ])
        .alignment(Alignment::Center),
    );
    frame.render_widget(btns, btn_area);
}
