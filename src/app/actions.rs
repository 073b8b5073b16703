use std::time::Instant;

use super::form::{EntryForm, FormSubmission};
use super::state::{App, InstallProgress, LogLevel, Mode};
use crate::bridge::{Bridge, BridgeEvent};
use crate::system::picker::FilePicker;

pub fn open_add_form(app: &mut App) {
    app.form = Some(EntryForm::new_entry());
    app.mode = Mode::Form;
    app.set_status("Adding software. Tab moves, Enter saves, Ctrl+O browses, Esc cancels.");
}

pub fn open_edit_form(app: &mut App) {
    let Some(entry) = app.current_entry().cloned() else {
        app.set_status("No entry focused to edit.");
        return;
    };
    app.form = Some(EntryForm::edit(&entry));
    app.mode = Mode::Form;
    app.set_status(format!("Editing {}. Enter saves, Esc cancels.", entry.name));
}

pub fn cancel_form(app: &mut App) {
    app.form = None;
    app.picker = None;
    app.mode = Mode::Browse;
    app.set_status("Edit cancelled.");
}

pub fn submit_form(app: &mut App) {
    let Some(form) = app.form.as_mut() else {
        app.mode = Mode::Browse;
        return;
    };
    let submission = match form.submit() {
        Ok(submission) => submission,
        Err(message) => {
            app.set_status(message);
            return;
        }
    };

    app.form = None;
    app.mode = Mode::Browse;
    match submission {
        FormSubmission::Create(draft) => {
            let entry = app.store.add(draft);
            app.refresh_filter();
            app.select_entry(&entry.id);
            app.log(format!("Added {}", entry.name), LogLevel::Success);
            app.set_status(format!("Added {} {}.", entry.name, entry.version));
        }
        FormSubmission::Update(entry) => match app.store.update(entry) {
            Ok(entry) => {
                app.refresh_filter();
                app.select_entry(&entry.id);
                app.log(format!("Updated {}", entry.name), LogLevel::Success);
                app.set_status(format!("Updated {}.", entry.name));
            }
            Err(e) => {
                app.refresh_filter();
                app.log(format!("Error: {e}"), LogLevel::Error);
                app.set_status(format!("Update failed: {e}"));
            }
        },
    }
}

pub fn open_picker(app: &mut App) {
    let current = app
        .form
        .as_ref()
        .map(|form| form.draft.path.clone())
        .unwrap_or_default();
    app.picker = Some(FilePicker::open_near(&current));
    app.mode = Mode::Picker;
    app.set_status("Select an installer. Enter opens, Tab switches filter, Esc cancels.");
}

/// Hands a finished picker's choice back to the form.
pub fn finish_picker(app: &mut App) {
    let Some(picker) = app.picker.take() else {
        app.mode = Mode::Form;
        return;
    };
    match picker.selected_path().map(|path| path.display().to_string()) {
        Some(path) => {
            if let Some(form) = app.form.as_mut() {
                form.set_path(path.clone());
            }
            app.set_status(format!("Selected {path}"));
        }
        None => app.set_status("File selection cancelled."),
    }
    app.mode = if app.form.is_some() {
        Mode::Form
    } else {
        Mode::Browse
    };
}

pub fn request_delete(app: &mut App) {
    let Some(entry) = app.current_entry().cloned() else {
        app.set_status("No entry focused to delete.");
        return;
    };
    app.set_status(format!(
        "Delete {}? Enter to confirm, Esc to cancel.",
        entry.name
    ));
    app.pending_delete = Some(entry);
    app.confirm_selected = false;
    app.mode = Mode::ConfirmDelete;
}

pub fn confirm_delete(app: &mut App) {
    let target = app.pending_delete.take();
    app.mode = Mode::Browse;
    let Some(target) = target else {
        return;
    };
    if !app.confirm_selected {
        app.set_status("Delete cancelled.");
        return;
    }

    match app.store.delete(&target.id) {
        Ok(_) => {
            app.log(format!("Deleted {}", target.name), LogLevel::Success);
            app.set_status(format!("Deleted {}.", target.name));
        }
        Err(e) => {
            app.log(format!("Error: {e}"), LogLevel::Error);
            app.set_status(format!("Delete failed: {e}"));
        }
    }
    app.refresh_filter();
}

pub fn cancel_delete(app: &mut App) {
    app.pending_delete = None;
    app.mode = Mode::Browse;
    app.set_status("Delete cancelled.");
}

pub fn start_install(app: &mut App, bridge: &mut Bridge) {
    let Some(entry) = app.current_entry().cloned() else {
        app.set_status("No entry focused to install.");
        return;
    };
    if app
        .install_state(&entry.id)
        .is_some_and(InstallProgress::is_running)
    {
        app.set_status(format!("{} is already installing.", entry.name));
        return;
    }

    let silent = entry.install_method.is_silent();
    let request = bridge.install_software(entry.path.clone(), silent);
    app.requests.insert(request, entry.id);
    app.installs.insert(
        entry.id,
        InstallProgress {
            request,
            name: entry.name.clone(),
            progress: 0,
            outcome: None,
            finished_at: None,
        },
    );
    app.log(format!("Installing {}", entry.name), LogLevel::Info);
    app.set_status(format!(
        "Installing {} ({} install) from {}",
        entry.name, entry.install_method, entry.path
    ));
}

pub fn apply_bridge_event(app: &mut App, event: BridgeEvent) {
    match event {
        BridgeEvent::InstallationProgress { request, progress } => {
            let Some(id) = app.requests.get(&request) else {
                return;
            };
            if let Some(install) = app.installs.get_mut(id) {
                install.progress = install.progress.max(progress);
            }
        }
        BridgeEvent::InstallSoftware { request, result } => {
            let Some(id) = app.requests.remove(&request) else {
                return;
            };
            let Some(install) = app.installs.get_mut(&id) else {
                return;
            };
            install.outcome = Some(result.success);
            install.finished_at = Some(Instant::now());
            let name = install.name.clone();

            if result.success {
                app.log(format!("Installed {name}"), LogLevel::Success);
                app.set_status(format!("{name} installed successfully."));
            } else {
                let reason = result
                    .error
                    .unwrap_or_else(|| "unknown error".to_string());
                app.log(format!("Error: {reason}"), LogLevel::Error);
                app.set_status(format!("Failed to install {name}: {reason}"));
            }
        }
    }
}

/// Drains every event currently queued on the bridge.
pub fn poll_bridge(app: &mut App, bridge: &mut Bridge) {
    while let Some(event) = bridge.try_next_event() {
        apply_bridge_event(app, event);
    }
    app.prune_installs();
}
