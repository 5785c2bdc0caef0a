//! Engine runtime - runs a [`LandmarksEngine`] on its own task
//!
//! Design decisions:
//! 1. One task owns the engine; everything else talks to it over channels
//! 2. Change batches and requests are handled one at a time, so a scan never
//!    races a focus request or another scan
//! 3. Requests get their reply over a oneshot, like a request/response pair
//! 4. The deferred rescan is just one more `select!` branch on the deadline
//! 5. Branches are polled in order (deadline, changes, requests), so a request
//!    sees every change batch sent before it

use dom::ChangeBatch;
use serde_json::Value;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tokio::time::{sleep_until, Instant};
use tracing::Instrument;

use crate::engine::LandmarksEngine;
use crate::error::{EngineError, Result};
use crate::protocol::{Request, Response};
use crate::router;

struct PendingRequest {
    request: Request,
    reply: oneshot::Sender<Result<Response>>,
}

/// Cloneable handle to a running engine
///
/// The engine task stops once every handle is dropped.
#[derive(Clone)]
pub struct EngineHandle {
    changes: mpsc::Sender<ChangeBatch>,
    requests: mpsc::Sender<PendingRequest>,
}

impl EngineHandle {
    /// Deliver a batch of change notifications
    pub async fn notify(&self, batch: ChangeBatch) -> Result<()> {
        self.changes
            .send(batch)
            .await
            .map_err(|_| EngineError::EngineStopped)
    }

    /// Send a request and wait for the reply
    pub async fn request(&self, request: Request) -> Result<Response> {
        let (tx, rx) = oneshot::channel();
        self.requests
            .send(PendingRequest { request, reply: tx })
            .await
            .map_err(|_| EngineError::EngineStopped)?;
        rx.await.map_err(|_| EngineError::EngineStopped)?
    }

    /// Decode a raw request message, then send it
    pub async fn request_value(&self, message: &Value) -> Result<Response> {
        let request = Request::from_value(message)?;
        self.request(request).await
    }

    /// Run a keyboard shortcut; unknown commands are ignored
    pub async fn command(&self, command: &str) -> Result<Option<Response>> {
        match Request::from_command(command) {
            Some(request) => self.request(request).await.map(Some),
            None => {
                tracing::debug!("[Runtime] Ignoring command {}", command);
                Ok(None)
            }
        }
    }

    pub fn is_closed(&self) -> bool {
        self.requests.is_closed()
    }
}

/// Start the engine on a new task
///
/// The task bootstraps first; a bootstrap failure ends it with that error.
pub fn spawn(engine: LandmarksEngine) -> (EngineHandle, JoinHandle<Result<()>>) {
    let (changes_tx, changes_rx) = mpsc::channel(engine.config().change_capacity.max(1));
    let (requests_tx, requests_rx) = mpsc::channel(engine.config().request_capacity.max(1));

    let span = tracing::info_span!("engine", id = %engine.config().id);
    let task = tokio::spawn(run(engine, changes_rx, requests_rx).instrument(span));

    let handle = EngineHandle {
        changes: changes_tx,
        requests: requests_tx,
    };
    (handle, task)
}

async fn run(
    mut engine: LandmarksEngine,
    mut changes: mpsc::Receiver<ChangeBatch>,
    mut requests: mpsc::Receiver<PendingRequest>,
) -> Result<()> {
    engine.bootstrap().await?;
    tracing::info!("[Runtime] Engine started with {} landmarks", engine.index().count());

    let mut changes_open = true;
    loop {
        let deadline = engine.rescan_deadline();

        tokio::select! {
            biased;

            _ = sleep_until(deadline.unwrap_or_else(Instant::now)), if deadline.is_some() => {
                if let Err(e) = engine.on_deadline().await {
                    tracing::error!("[Runtime] Deferred rescan failed: {}", e);
                }
            }
            batch = changes.recv(), if changes_open => {
                match batch {
                    Some(batch) => {
                        if let Err(e) = engine.on_changes(batch).await {
                            tracing::error!("[Runtime] Rescan after change failed: {}", e);
                        }
                    }
                    None => changes_open = false,
                }
            }
            pending = requests.recv() => {
                let Some(PendingRequest { request, reply }) = pending else {
                    break;
                };
                let result = router::route(&mut engine, request).await;
                if let Err(e) = &result {
                    tracing::warn!("[Runtime] {} failed: {}", request.kind(), e);
                }
                let _ = reply.send(result); // Requester may have gone away
            }
        }
    }

    tracing::info!("[Runtime] All handles dropped, engine stopping");
    Ok(())
}
