use ratatui::{
    layout::Rect,
    prelude::*,
    style::{Modifier, Style},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

use crate::app::state::{App, LogLevel, Mode};
use crate::ui::theme::*;

fn hints(mode: Mode) -> &'static [(&'static str, &'static str)] {
    match mode {
        Mode::Browse => &[
            ("Move ", "↑/↓ j/k"),
            ("  Category ", "Tab/←/→"),
            ("  Search ", "/"),
            ("  Add ", "A"),
            ("  Edit ", "E"),
            ("  Delete ", "D"),
            ("  Install ", "I"),
            ("  Quit ", "Q"),
        ],
        Mode::Search => &[
            ("Type ", "to filter"),
            ("  Apply ", "Enter"),
            ("  Close ", "Esc"),
        ],
        Mode::Form => &[
            ("Field ", "Tab/↑/↓"),
            ("  Choice ", "←/→ Space"),
            ("  Browse ", "Ctrl+O"),
            ("  Save ", "Enter"),
            ("  Cancel ", "Esc"),
        ],
        Mode::Picker => &[
            ("Move ", "↑/↓ j/k"),
            ("  Open ", "Enter"),
            ("  Up ", "Backspace"),
            ("  Home ", "~"),
            ("  Filter ", "Tab"),
            ("  Cancel ", "Esc"),
        ],
        Mode::ConfirmDelete => &[
            ("Choose ", "←/→"),
            ("  Confirm ", "Enter/Y"),
            ("  Cancel ", "Esc/N"),
        ],
    }
}

pub fn render_footer(frame: &mut Frame<'_>, area: Rect, app: &App) {
    let first_line: Vec<Span> = hints(app.mode)
        .iter()
        .flat_map(|(label, key)| {
            [
                Span::styled(*label, Style::default().fg(C_MUTED)),
                Span::styled(
                    *key,
                    Style::default().fg(C_TEXT).add_modifier(Modifier::BOLD),
                ),
            ]
        })
        .collect();

    let mut second_line: Vec<Span> = vec![
        Span::styled(app.status.clone(), Style::default().fg(C_TEXT)),
        Span::styled("   |   ", Style::default().fg(C_PANEL)),
        Span::styled(
            format!(
                "visible:{} total:{} installing:{} [{}]",
                app.visible.len(),
                app.store.len(),
                app.running_installs(),
                app.platform.label()
            ),
            Style::default().fg(C_MUTED),
        ),
    ];

    for l in &app.logs {
        let color = match l.level {
            LogLevel::Success => C_SUCCESS,
            LogLevel::Error => C_DANGER,
            LogLevel::Info => C_PRIMARY,
        };
        second_line.push(Span::styled("  ", Style::default()));
        second_line.push(Span::styled(
            format!("{} ", l.logged_at.format("%H:%M:%S")),
            Style::default().fg(C_MUTED),
        ));
        second_line.push(Span::styled(l.message.clone(), Style::default().fg(color)));
    }

    let footer = Paragraph::new(vec![Line::from(first_line), Line::from(second_line)]).block(
        Block::default()
            .title(" Command Bar ")
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(C_PANEL)),
    );
    frame.render_widget(footer, area);
}
