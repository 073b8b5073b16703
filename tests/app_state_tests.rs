//! Tests for application state and key handling
//!
//! These tests verify:
//! - Category tabs and search interplay
//! - Add, edit and delete flows through the key handler
//! - Install progress flowing back from the bridge

use std::io;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use pretty_assertions::assert_eq;
use setuphub::app::actions::{apply_bridge_event, poll_bridge};
use setuphub::app::state::{LogLevel, Mode};
use setuphub::app::{handle_key, App};
use setuphub::bridge::{Bridge, BridgeEvent};
use setuphub::config::InstallerConfig;
use setuphub::registry::{CatalogStore, Category, CategoryFilter, InstallMethod};
use setuphub::system::exec::{InstallCommand, Launcher};
use setuphub::system::installer::{InstallResult, Installer};
use tokio::runtime::Runtime;

struct AlwaysOk;

#[async_trait]
impl Launcher for AlwaysOk {
    async fn run(&self, _command: &InstallCommand) -> io::Result<Option<i32>> {
        Ok(Some(0))
    }
}

struct Harness {
    app: App,
    bridge: Bridge,
    _runtime: Runtime,
}

impl Harness {
    fn new() -> Self {
        let runtime = Runtime::new().unwrap();
        let config = InstallerConfig::default().with_progress_interval(Duration::ZERO);
        let installer = Installer::with_launcher(AlwaysOk, config.clone());
        let bridge = Bridge::spawn(runtime.handle(), Arc::new(installer));
        Self {
            app: App::new(CatalogStore::seeded(), config),
            bridge,
            _runtime: runtime,
        }
    }

    fn press(&mut self, code: KeyCode) -> bool {
        handle_key(
            &mut self.app,
            &mut self.bridge,
            KeyEvent::new(code, KeyModifiers::NONE),
        )
    }

    fn press_ctrl(&mut self, c: char) -> bool {
        handle_key(
            &mut self.app,
            &mut self.bridge,
            KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL),
        )
    }

    fn type_text(&mut self, text: &str) {
        for c in text.chars() {
            self.press(KeyCode::Char(c));
        }
    }

    fn visible_names(&self) -> Vec<String> {
        self.app.visible.iter().map(|e| e.name.clone()).collect()
    }
}

// =============================================================================
// Browse And Filter Tests
// =============================================================================

#[test]
fn test_app_starts_browsing_all_entries() {
    let h = Harness::new();
    assert_eq!(h.app.mode, Mode::Browse);
    assert_eq!(h.app.category_filter(), CategoryFilter::All);
    assert_eq!(h.visible_names(), vec!["Chrome", "Adobe Photoshop", "WinRAR"]);
    assert_eq!(h.app.list_state.selected(), Some(0));
}

#[test]
fn test_category_tab_filters_list() {
    let mut h = Harness::new();
    h.press(KeyCode::Tab);
    assert_eq!(
        h.app.category_filter(),
        CategoryFilter::Only(Category::Browsers)
    );
    assert_eq!(h.visible_names(), vec!["Chrome"]);

    h.press(KeyCode::BackTab);
    h.press(KeyCode::BackTab);
    assert_eq!(h.app.category_filter(), CategoryFilter::Only(Category::Other));
    assert!(h.app.visible.is_empty());
    assert_eq!(h.app.current_entry(), None);
}

#[test]
fn test_search_takes_priority_over_category() {
    let mut h = Harness::new();
    h.press(KeyCode::Tab);
    h.press(KeyCode::Char('/'));
    assert_eq!(h.app.mode, Mode::Search);
    h.type_text("rar");
    assert_eq!(h.visible_names(), vec!["WinRAR"]);
    h.press(KeyCode::Enter);
    assert_eq!(h.app.mode, Mode::Browse);
    assert_eq!(h.visible_names(), vec!["WinRAR"]);
}

#[test]
fn test_switching_category_clears_search() {
    let mut h = Harness::new();
    h.press(KeyCode::Char('/'));
    h.type_text("adobe");
    h.press(KeyCode::Enter);
    h.press(KeyCode::Right);
    assert!(h.app.search_input.is_empty());
    assert_eq!(h.visible_names(), vec!["Chrome"]);
}

#[test]
fn test_escape_clears_search_in_browse_mode() {
    let mut h = Harness::new();
    h.press(KeyCode::Char('/'));
    h.type_text("zzz");
    assert!(h.app.visible.is_empty());
    h.press(KeyCode::Esc);
    h.press(KeyCode::Esc);
    assert!(h.app.search_input.is_empty());
    assert_eq!(h.app.visible.len(), 3);
}

#[test]
fn test_navigation_wraps() {
    let mut h = Harness::new();
    h.press(KeyCode::Up);
    assert_eq!(h.app.current_entry().unwrap().name, "WinRAR");
    h.press(KeyCode::Char('j'));
    assert_eq!(h.app.current_entry().unwrap().name, "Chrome");
}

#[test]
fn test_quit_keys() {
    let mut h = Harness::new();
    assert!(!h.press(KeyCode::Char('j')));
    assert!(h.press(KeyCode::Char('q')));
    assert!(h.press_ctrl('c'));
}

#[test]
fn test_log_keeps_three_most_recent_entries() {
    let mut h = Harness::new();
    for n in 0..5 {
        h.app.log(format!("message {n}"), LogLevel::Info);
    }
    h.app.prune_logs();
    let messages: Vec<&str> = h.app.logs.iter().map(|l| l.message.as_str()).collect();
    assert_eq!(messages, vec!["message 2", "message 3", "message 4"]);
}

// =============================================================================
// Form Flow Tests
// =============================================================================

#[test]
fn test_add_flow_creates_and_selects_entry() {
    let mut h = Harness::new();
    h.press(KeyCode::Char('a'));
    assert_eq!(h.app.mode, Mode::Form);

    h.type_text("Firefox");
    h.press(KeyCode::Tab);
    h.type_text("124.0");
    h.press(KeyCode::Tab);
    h.type_text("60");
    h.press(KeyCode::Tab);
    h.press(KeyCode::Right);
    h.press(KeyCode::Tab);
    h.type_text("D:\\setup\\firefox.exe");
    h.press(KeyCode::Enter);

    assert_eq!(h.app.mode, Mode::Browse);
    assert!(h.app.form.is_none());
    assert_eq!(h.app.store.len(), 4);
    let added = h.app.current_entry().unwrap();
    assert_eq!(added.name, "Firefox");
    assert_eq!(added.size_label(), "60 GB");
    assert_eq!(added.category, Category::Other);
    assert!(h
        .app
        .logs
        .iter()
        .any(|l| l.level == LogLevel::Success && l.message == "Added Firefox"));
}

#[test]
fn test_add_flow_rejects_missing_fields() {
    let mut h = Harness::new();
    h.press(KeyCode::Char('a'));
    h.press(KeyCode::Enter);
    assert_eq!(h.app.mode, Mode::Form);
    assert_eq!(
        h.app.form.as_ref().and_then(|f| f.error.as_deref()),
        Some("Name is required")
    );
    assert_eq!(h.app.store.len(), 3);
}

#[test]
fn test_form_letters_are_text_not_commands() {
    let mut h = Harness::new();
    h.press(KeyCode::Char('a'));
    assert!(!h.press(KeyCode::Char('q')));
    assert_eq!(h.app.form.as_ref().unwrap().draft.name, "q");
}

#[test]
fn test_edit_flow_updates_entry() {
    let mut h = Harness::new();
    h.press(KeyCode::Char('e'));
    assert_eq!(
        h.app.form.as_ref().map(|f| f.title()),
        Some(" Edit Software ")
    );
    h.press(KeyCode::Tab);
    h.type_text("-beta");
    for _ in 0..6 {
        h.press(KeyCode::Down);
    }
    h.press(KeyCode::Char(' '));
    h.press(KeyCode::Enter);

    let chrome = h.app.store.list().remove(0);
    assert_eq!(chrome.version, "v122.0.6261.69-beta");
    assert_eq!(chrome.install_method, InstallMethod::Silent);
    assert_eq!(h.app.store.len(), 3);
}

#[test]
fn test_escape_cancels_form() {
    let mut h = Harness::new();
    h.press(KeyCode::Char('e'));
    h.type_text("changed");
    h.press(KeyCode::Esc);
    assert_eq!(h.app.mode, Mode::Browse);
    assert_eq!(h.app.store.list()[0].name, "Chrome");
}

#[test]
fn test_picker_opens_from_form_and_cancels_back() {
    let mut h = Harness::new();
    h.press(KeyCode::Char('a'));
    h.press_ctrl('o');
    assert_eq!(h.app.mode, Mode::Picker);
    assert!(h.app.picker.is_some());
    h.press(KeyCode::Esc);
    assert_eq!(h.app.mode, Mode::Form);
    assert!(h.app.picker.is_none());
    assert!(h.app.form.is_some());
}

// =============================================================================
// Delete Flow Tests
// =============================================================================

#[test]
fn test_delete_defaults_to_no() {
    let mut h = Harness::new();
    h.press(KeyCode::Char('d'));
    assert_eq!(h.app.mode, Mode::ConfirmDelete);
    h.press(KeyCode::Enter);
    assert_eq!(h.app.mode, Mode::Browse);
    assert_eq!(h.app.store.len(), 3);
}

#[test]
fn test_delete_confirmed_removes_entry() {
    let mut h = Harness::new();
    h.press(KeyCode::Down);
    h.press(KeyCode::Char('d'));
    h.press(KeyCode::Left);
    h.press(KeyCode::Enter);
    assert_eq!(h.visible_names(), vec!["Chrome", "WinRAR"]);
    assert_eq!(h.app.current_entry().unwrap().name, "WinRAR");
}

#[test]
fn test_delete_with_y_shortcut() {
    let mut h = Harness::new();
    h.press(KeyCode::Char('d'));
    h.press(KeyCode::Char('y'));
    assert_eq!(h.app.store.len(), 2);
}

// =============================================================================
// Install Flow Tests
// =============================================================================

#[test]
fn test_install_tracks_request_until_result() {
    let mut h = Harness::new();
    h.press(KeyCode::Char('i'));
    let chrome = h.app.current_entry().unwrap().id;
    let install = h.app.install_state(&chrome).cloned().unwrap();
    assert!(install.is_running());
    assert_eq!(h.app.running_installs(), 1);

    for _ in 0..200 {
        poll_bridge(&mut h.app, &mut h.bridge);
        if h.app.install_state(&chrome).is_some_and(|i| !i.is_running()) {
            break;
        }
        std::thread::sleep(Duration::from_millis(10));
    }

    let install = h.app.install_state(&chrome).unwrap();
    assert_eq!(install.outcome, Some(true));
    assert_eq!(install.progress, 100);
    assert!(h.app.requests.is_empty());
    assert!(h.app.status.contains("installed successfully"));
}

#[test]
fn test_second_install_of_running_entry_is_refused() {
    let mut h = Harness::new();
    h.press(KeyCode::Char('i'));
    h.press(KeyCode::Char('i'));
    assert_eq!(h.app.requests.len(), 1);
    assert!(h.app.status.contains("already installing"));
}

#[test]
fn test_bridge_events_update_progress_and_failure() {
    let mut h = Harness::new();
    h.press(KeyCode::Down);
    h.press(KeyCode::Char('i'));
    let photoshop = h.app.current_entry().unwrap().id;
    let request = h.app.install_state(&photoshop).unwrap().request;

    apply_bridge_event(
        &mut h.app,
        BridgeEvent::InstallationProgress {
            request,
            progress: 40,
        },
    );
    assert_eq!(h.app.install_state(&photoshop).unwrap().progress, 40);

    apply_bridge_event(
        &mut h.app,
        BridgeEvent::InstallSoftware {
            request,
            result: InstallResult {
                success: false,
                error: Some("installer exited with code 2".into()),
                code: Some(2),
            },
        },
    );
    let install = h.app.install_state(&photoshop).unwrap();
    assert_eq!(install.outcome, Some(false));
    assert!(h
        .app
        .logs
        .iter()
        .any(|l| l.level == LogLevel::Error && l.message.contains("code 2")));
}

#[test]
fn test_events_for_unknown_requests_are_ignored() {
    let mut h = Harness::new();
    apply_bridge_event(
        &mut h.app,
        BridgeEvent::InstallSoftware {
            request: 999,
            result: InstallResult::succeeded(0),
        },
    );
    assert!(h.app.installs.is_empty());
}
