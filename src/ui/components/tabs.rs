use ratatui::{
    layout::Rect,
    prelude::*,
    style::{Modifier, Style},
    widgets::{Block, BorderType, Borders, Tabs},
    Frame,
};

use crate::app::state::App;
use crate::registry::model::Category;
use crate::ui::theme::*;

pub fn render_category_tabs(frame: &mut Frame<'_>, area: Rect, app: &App) {
    let titles = std::iter::once("all")
        .chain(Category::ALL.iter().map(Category::as_str))
        .map(Line::from)
        .collect::<Vec<_>>();
    let tabs = Tabs::new(titles)
        .select(app.selected_category)
        .block(
            Block::default()
                .title(" SetupHub ")
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(C_PANEL)),
        )
        .style(Style::default().fg(if app.search_input.is_empty() {
            C_MUTED
        } else {
            C_PANEL
        }))
        .highlight_style(
            Style::default()
                .fg(C_PRIMARY)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
        )
        .divider(" | ");
    frame.render_widget(tabs, area);
}
