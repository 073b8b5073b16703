use ratatui::{
    layout::Rect,
    prelude::*,
    style::{Modifier, Style},
    widgets::{Block, BorderType, Borders, Paragraph, Wrap},
    Frame,
};

use crate::app::state::App;
use crate::system::exec::command_for_kind;
use crate::system::kind::InstallerKind;
use crate::ui::theme::*;

fn field<'a>(label: &'a str, value: String, color: Color) -> Line<'a> {
    Line::from(vec![
        Span::styled(label, Style::default().fg(C_MUTED)),
        Span::styled(value, Style::default().fg(color)),
    ])
}

pub fn render_detail_panel(frame: &mut Frame<'_>, area: Rect, app: &App) {
    let details_block = Block::default()
        .title(" Details ")
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(C_PANEL))
        .style(Style::default().bg(C_BG));
    let details_inner = details_block.inner(area);
    frame.render_widget(details_block, area);

    let details_lines = if let Some(entry) = app.current_entry() {
        let kind = InstallerKind::from_path(&entry.path);
        let command = command_for_kind(
            kind,
            &entry.path,
            entry.install_method.is_silent(),
            &app.installer_config,
        )
        .map(|cmd| cmd.display())
        .unwrap_or_else(|| "Unsupported file format".to_string());

        let mut lines = vec![
            Line::from(vec![
                Span::styled("Name: ", Style::default().fg(C_MUTED)),
                Span::styled(
                    entry.name.clone(),
                    Style::default().fg(C_TEXT).add_modifier(Modifier::BOLD),
                ),
            ]),
            field("Version: ", entry.version.clone(), C_TEXT),
            field("Size: ", entry.size_label(), C_TEXT),
            field("Category: ", entry.category.to_string(), C_TEXT),
            field("ID: ", entry.id.to_string(), C_MUTED),
            Line::from(""),
            field("Path: ", entry.path.clone(), C_PRIMARY),
            field("Type: ", kind.label().to_string(), C_TEXT),
            field(
                "Method: ",
                entry.install_method.to_string(),
                if entry.install_method.is_silent() {
                    C_PRIMARY
                } else {
                    C_TEXT
                },
            ),
            field(
                "Command: ",
                command,
                if kind == InstallerKind::Unsupported {
                    C_DANGER
                } else {
                    C_TEXT
                },
            ),
        ];

        if let Some(install) = app.install_state(&entry.id) {
            let (text, color) = match install.outcome {
                Some(true) => ("installed".to_string(), C_SUCCESS),
                Some(false) => ("failed".to_string(), C_DANGER),
                None => (format!("installing… {}%", install.progress), C_PRIMARY),
            };
            lines.push(field("Status: ", text, color));
        }

        lines.push(Line::from(""));
        if entry.description.is_empty() {
            lines.push(Line::from(Span::styled(
                "No description.",
                Style::default().fg(C_MUTED).add_modifier(Modifier::ITALIC),
            )));
        } else {
            lines.push(Line::from(Span::styled(
                entry.description.clone(),
                Style::default().fg(C_TEXT),
            )));
        }

        if entry.is_cracked {
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                "Cracked software",
                Style::default().fg(C_WARNING).add_modifier(Modifier::BOLD),
            )));
            if let Some(notes) = entry.visible_crack_instructions() {
                lines.push(Line::from(Span::styled(
                    notes.to_string(),
                    Style::default().fg(C_WARNING),
                )));
            }
        }
        lines
    } else {
        vec![Line::from(Span::styled(
            "No software matches the current category/search.",
            Style::default().fg(C_MUTED),
        ))]
    };

    let details_widget = Paragraph::new(details_lines).wrap(Wrap { trim: true });
    frame.render_widget(details_widget, details_inner);

    if !app.platform.runs_windows_installers() {
        let tip_line = Line::from(Span::styled(
            format!(
                "Note: .exe/.msi installers need Windows (running on {})",
                app.platform.label()
            ),
            Style::default().fg(C_MUTED).add_modifier(Modifier::ITALIC),
        ));
        let tip_widget = Paragraph::new(tip_line)
            .style(Style::default().fg(C_MUTED))
            .block(
                Block::default()
                    .borders(Borders::TOP)
                    .border_style(Style::default().fg(C_PANEL)),
            );
        let tip_area = Rect::new(
            details_inner.x,
            details_inner.y + details_inner.height.saturating_sub(2),
            details_inner.width,
            details_inner.height.min(2),
        );
        frame.render_widget(tip_widget, tip_area);
    }
}
