//! Tests for the UI/backend message bridge
//!
//! These tests verify:
//! - Each request yields its progress events followed by one result
//! - Request ids keep concurrent invocations apart
//! - Validation failures produce a result with no progress

use std::collections::HashMap;
use std::io;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use pretty_assertions::assert_eq;
use setuphub::bridge::{Bridge, BridgeEvent, RequestId};
use setuphub::config::InstallerConfig;
use setuphub::system::exec::{InstallCommand, Launcher};
use setuphub::system::installer::{InstallResult, Installer};
use tokio::runtime::Handle;

/// Exits 0 for `.exe` and 1 for `.msi`.
struct ByKind;

#[async_trait]
impl Launcher for ByKind {
    async fn run(&self, command: &InstallCommand) -> io::Result<Option<i32>> {
        tokio::time::sleep(Duration::from_millis(5)).await;
        Ok(Some(if command.program == "cmd.exe" { 1 } else { 0 }))
    }
}

fn bridge() -> Bridge {
    let installer = Installer::with_launcher(
        ByKind,
        InstallerConfig::default().with_progress_interval(Duration::from_millis(1)),
    );
    Bridge::spawn(&Handle::current(), Arc::new(installer))
}

/// Reads events until every id in `pending` has its result.
async fn collect(
    bridge: &mut Bridge,
    mut pending: usize,
) -> HashMap<RequestId, (Vec<u8>, Option<InstallResult>)> {
    let mut seen: HashMap<RequestId, (Vec<u8>, Option<InstallResult>)> = HashMap::new();
    while pending > 0 {
        let event = tokio::time::timeout(Duration::from_secs(5), bridge.next_event())
            .await
            .expect("bridge event timed out")
            .expect("bridge closed");
        let slot = seen.entry(event.request()).or_default();
        match event {
            BridgeEvent::InstallationProgress { progress, .. } => {
                assert!(slot.1.is_none(), "progress after result");
                slot.0.push(progress);
            }
            BridgeEvent::InstallSoftware { result, .. } => {
                assert!(slot.1.is_none(), "second result for one request");
                slot.1 = Some(result);
                pending -= 1;
            }
        }
    }
    seen
}

const TICKS: [u8; 11] = [0, 10, 20, 30, 40, 50, 60, 70, 80, 90, 100];

// =============================================================================
// Single Request Tests
// =============================================================================

#[tokio::test(flavor = "multi_thread")]
async fn test_install_request_streams_progress_then_result() {
    let mut bridge = bridge();
    let id = bridge.install_software("C:\\setup.exe", false);
    let seen = collect(&mut bridge, 1).await;
    let (progress, result) = &seen[&id];
    assert_eq!(progress, &TICKS.to_vec());
    assert_eq!(result, &Some(InstallResult::succeeded(0)));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_unsupported_request_reports_without_progress() {
    let mut bridge = bridge();
    let id = bridge.install_software("notes.txt", false);
    let seen = collect(&mut bridge, 1).await;
    let (progress, result) = &seen[&id];
    assert!(progress.is_empty());
    let result = result.as_ref().unwrap();
    assert!(!result.success);
    assert_eq!(result.error.as_deref(), Some("Unsupported file format"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_empty_path_request_reports_invalid_input() {
    let mut bridge = bridge();
    let id = bridge.install_software("", true);
    let seen = collect(&mut bridge, 1).await;
    assert_eq!(
        seen[&id].1.as_ref().and_then(|r| r.error.as_deref()),
        Some("No path provided")
    );
}

// =============================================================================
// Concurrency Tests
// =============================================================================

#[tokio::test(flavor = "multi_thread")]
async fn test_request_ids_are_distinct() {
    let mut bridge = bridge();
    let a = bridge.install_software("a.exe", false);
    let b = bridge.install_software("b.exe", false);
    assert_ne!(a, b);
    collect(&mut bridge, 2).await;
}

#[tokio::test(flavor = "multi_thread")]
async fn test_concurrent_requests_are_reported_independently() {
    let mut bridge = bridge();
    let ok = bridge.install_software("C:\\a.exe", true);
    let failing = bridge.install_software("C:\\b.msi", true);
    let rejected = bridge.install_software("C:\\c.zip", true);

    let seen = collect(&mut bridge, 3).await;

    assert_eq!(seen[&ok].0, TICKS.to_vec());
    assert_eq!(seen[&ok].1, Some(InstallResult::succeeded(0)));

    assert_eq!(seen[&failing].0, TICKS.to_vec());
    let failed = seen[&failing].1.as_ref().unwrap();
    assert!(!failed.success);
    assert_eq!(failed.code, Some(1));

    assert!(seen[&rejected].0.is_empty());
    assert!(!seen[&rejected].1.as_ref().unwrap().success);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_try_next_event_is_non_blocking() {
    let mut bridge = bridge();
    assert_eq!(bridge.try_next_event(), None);
}
