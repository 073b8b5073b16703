//! Request/event channel between the UI and the install backend.
//!
//! The UI never waits on an installer directly. It posts a [`Request`] and
//! later drains [`BridgeEvent`]s: zero or more `installation-progress`
//! events followed by exactly one `install-software` result per request.
//! Each request runs on its own task, so one slow or failing installer
//! never holds up another.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::runtime::Handle;
use tokio::sync::mpsc::{self, error::TryRecvError, UnboundedReceiver, UnboundedSender};

use crate::system::exec::Launcher;
use crate::system::installer::{InstallResult, Installer};

pub type RequestId = u64;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "channel", rename_all = "kebab-case")]
pub enum Request {
    InstallSoftware { path: String, silent: bool },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "channel", rename_all = "kebab-case")]
pub enum BridgeEvent {
    InstallationProgress { request: RequestId, progress: u8 },
    InstallSoftware { request: RequestId, result: InstallResult },
}

impl BridgeEvent {
    pub fn request(&self) -> RequestId {
        match self {
            BridgeEvent::InstallationProgress { request, .. }
            | BridgeEvent::InstallSoftware { request, .. } => *request,
        }
    }
}

struct Envelope {
    id: RequestId,
    request: Request,
}

/// UI-side handle. Dropping it stops the host loop once in-flight requests finish.
pub struct Bridge {
    requests: UnboundedSender<Envelope>,
    events: UnboundedReceiver<BridgeEvent>,
    next_id: RequestId,
}

impl Bridge {
    /// Starts the host loop on `runtime`.
    pub fn spawn<L>(runtime: &Handle, installer: Arc<Installer<L>>) -> Self
    where
        L: Launcher + 'static,
    {
        let (request_tx, request_rx) = mpsc::unbounded_channel();
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        runtime.spawn(host_loop(request_rx, event_tx, installer));
        Self {
            requests: request_tx,
            events: event_rx,
            next_id: 1,
        }
    }

    pub fn send(&mut self, request: Request) -> RequestId {
        let id = self.next_id;
        self.next_id += 1;
        tracing::debug!(request = id, payload = ?request, "bridge request");
        if self.requests.send(Envelope { id, request }).is_err() {
            tracing::error!(request = id, "bridge host is gone; request dropped");
        }
        id
    }

    pub fn install_software(&mut self, path: impl Into<String>, silent: bool) -> RequestId {
        self.send(Request::InstallSoftware {
            path: path.into(),
            silent,
        })
    }

    /// Non-blocking; for polling from a UI loop.
    pub fn try_next_event(&mut self) -> Option<BridgeEvent> {
        match self.events.try_recv() {
            Ok(event) => Some(event),
            Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => None,
        }
    }

    pub async fn next_event(&mut self) -> Option<BridgeEvent> {
        self.events.recv().await
    }
}

async fn host_loop<L>(
    mut requests: UnboundedReceiver<Envelope>,
    events: UnboundedSender<BridgeEvent>,
    installer: Arc<Installer<L>>,
) where
    L: Launcher + 'static,
{
    while let Some(Envelope { id, request }) = requests.recv().await {
        let installer = Arc::clone(&installer);
        let events = events.clone();
        tokio::spawn(async move {
            match request {
                Request::InstallSoftware { path, silent } => {
                    let progress_events = events.clone();
                    let result = installer
                        .install(&path, silent, move |progress| {
                            let _ = progress_events.send(BridgeEvent::InstallationProgress {
                                request: id,
                                progress,
                            });
                        })
                        .await;
                    let _ = events.send(BridgeEvent::InstallSoftware {
                        request: id,
                        result,
                    });
                }
            }
        });
    }
    tracing::debug!("bridge host loop stopped");
}
