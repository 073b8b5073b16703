use std::io::Stdout;
use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{backend::CrosstermBackend, Terminal};

use super::actions::{
    cancel_delete, cancel_form, confirm_delete, finish_picker, open_add_form, open_edit_form,
    open_picker, poll_bridge, request_delete, start_install, submit_form,
};
use super::state::{App, Mode};
use crate::bridge::Bridge;
use crate::ui::draw::ui;

pub fn run(
    app: &mut App,
    bridge: &mut Bridge,
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
) -> Result<()> {
    loop {
        poll_bridge(app, bridge);
        app.prune_logs();
        terminal.draw(|frame| ui(frame, app))?;

        if !event::poll(Duration::from_millis(100))? {
            continue;
        }

        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            if handle_key(app, bridge, key) {
                break;
            }
        }
    }

    Ok(())
}

/// Applies one key press. Returns `true` when the app should quit.
pub fn handle_key(app: &mut App, bridge: &mut Bridge, key: KeyEvent) -> bool {
    match app.mode {
        Mode::Search => handle_search_key(app, key),
        Mode::Form => handle_form_key(app, key),
        Mode::Picker => handle_picker_key(app, key),
        Mode::ConfirmDelete => handle_confirm_key(app, key),
        Mode::Browse => return handle_browse_key(app, bridge, key),
    }
    false
}

fn handle_browse_key(app: &mut App, bridge: &mut Bridge, key: KeyEvent) -> bool {
    match key.code {
        KeyCode::Char('q') => return true,
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => return true,
        KeyCode::Down | KeyCode::Char('j') => app.move_down(),
        KeyCode::Up | KeyCode::Char('k') => app.move_up(),
        KeyCode::Tab | KeyCode::Right => app.category_right(),
        KeyCode::BackTab | KeyCode::Left => app.category_left(),
        KeyCode::Char('/') => {
            app.mode = Mode::Search;
        }
        KeyCode::Esc => {
            if !app.search_input.is_empty() {
                app.search_input.clear();
                app.refresh_filter();
                app.set_status("Search cleared.");
            }
        }
        KeyCode::Char('a') | KeyCode::Char('A') => open_add_form(app),
        KeyCode::Char('e') | KeyCode::Char('E') | KeyCode::Enter => open_edit_form(app),
        KeyCode::Char('d') | KeyCode::Char('D') | KeyCode::Delete => request_delete(app),
        KeyCode::Char('i') | KeyCode::Char('I') => start_install(app, bridge),
        _ => {}
    }
    false
}

fn handle_search_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => {
            app.mode = Mode::Browse;
        }
        KeyCode::Enter => {
            app.mode = Mode::Browse;
            app.set_status(format!("Search applied: '{}'", app.search_input));
        }
        KeyCode::Backspace => {
            app.search_input.pop();
            app.refresh_filter();
        }
        KeyCode::Char(c) => {
            if !key.modifiers.contains(KeyModifiers::CONTROL) {
                app.search_input.push(c);
                app.refresh_filter();
            }
        }
        _ => {}
    }
}

fn handle_form_key(app: &mut App, key: KeyEvent) {
    if key.code == KeyCode::Char('o') && key.modifiers.contains(KeyModifiers::CONTROL)
        || key.code == KeyCode::F(2)
    {
        open_picker(app);
        return;
    }
    if key.code == KeyCode::Esc {
        cancel_form(app);
        return;
    }
    if key.code == KeyCode::Enter {
        submit_form(app);
        return;
    }

    let Some(form) = app.form.as_mut() else {
        app.mode = Mode::Browse;
        return;
    };
    match key.code {
        KeyCode::Tab | KeyCode::Down => form.focus_next(),
        KeyCode::BackTab | KeyCode::Up => form.focus_prev(),
        KeyCode::Left => form.cycle(false),
        KeyCode::Right => form.cycle(true),
        KeyCode::Backspace => form.backspace(),
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            form.insert_char(c)
        }
        _ => {}
    }
}

fn handle_picker_key(app: &mut App, key: KeyEvent) {
    let Some(picker) = app.picker.as_mut() else {
        app.mode = Mode::Form;
        return;
    };
    match key.code {
        KeyCode::Esc => picker.cancel(),
        KeyCode::Enter => picker.enter(),
        KeyCode::Up | KeyCode::Char('k') => picker.move_up(),
        KeyCode::Down | KeyCode::Char('j') => picker.move_down(),
        KeyCode::Backspace | KeyCode::Left | KeyCode::Char('h') => picker.go_up(),
        KeyCode::Char('~') => picker.go_home(),
        KeyCode::Tab => picker.cycle_filter(),
        _ => {}
    }
    if picker.is_complete() {
        finish_picker(app);
    }
}

fn handle_confirm_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Enter => confirm_delete(app),
        KeyCode::Left | KeyCode::Char('h') => {
            app.confirm_selected = true;
        }
        KeyCode::Right | KeyCode::Char('l') => {
            app.confirm_selected = false;
        }
        KeyCode::Char('y') | KeyCode::Char('Y') => {
            app.confirm_selected = true;
            confirm_delete(app);
        }
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('n') | KeyCode::Char('N') => {
            cancel_delete(app)
        }
        _ => {}
    }
}
