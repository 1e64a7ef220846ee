//! Task bridge between request threads and the single host thread.
//!
//! Any number of threads may submit work; exactly one dedicated thread (the
//! host executor, see [`executor`]) owns the host value and runs every
//! handler. Submitters send a task plus a one-shot reply channel and wait on
//! the reply with a bounded timeout, so a stuck handler can never wedge the
//! network side. A handler that completes after its submitter gave up has its
//! result discarded; that is the only place the two populations race, and it
//! is resolved by the reply channel, never by shared host state.

mod executor;

use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;
use thiserror::Error;
use tokio::sync::{mpsc, oneshot};
use uuid::Uuid;

/// A handler runs on the host thread with exclusive access to the host value.
pub type Handler<H> = Arc<dyn Fn(&mut H, Value) -> anyhow::Result<Value> + Send + Sync>;

/// How long `submit` waits for the host executor by default.
pub const DEFAULT_SUBMIT_TIMEOUT: Duration = Duration::from_secs(30);

/// Result of one task, delivered exactly once.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// Handler returned normally
    Ok(Value),
    /// Handler failed, timed out, or the bridge was unavailable
    Failed {
        error: String,
        trace: Option<String>,
    },
}

impl Outcome {
    /// Failure outcome with no trace attached.
    pub fn failed(error: impl Into<String>) -> Self {
        Outcome::Failed {
            error: error.into(),
            trace: None,
        }
    }

    pub fn is_ok(&self) -> bool {
        matches!(self, Outcome::Ok(_))
    }

    /// Wire shape used by the HTTP layer and fed back to the model:
    /// `{"ok":true,"result":…}` or `{"ok":false,"error":…,"trace":…}`.
    pub fn to_json(&self) -> Value {
        match self {
            Outcome::Ok(result) => serde_json::json!({"ok": true, "result": result}),
            Outcome::Failed { error, trace } => {
                let mut body = serde_json::json!({"ok": false, "error": error});
                if let Some(trace) = trace {
                    body["trace"] = Value::String(trace.clone());
                }
                body
            }
        }
    }
}

/// The bridge was asked for work after its executor thread exited.
#[derive(Debug, Error)]
#[error("task bridge is not running")]
pub struct BridgeClosed;

pub(crate) struct Task<H> {
    pub id: Uuid,
    pub tool: String,
    pub handler: Handler<H>,
    pub payload: Value,
    pub reply: oneshot::Sender<Outcome>,
}

pub(crate) enum Command<H> {
    Run(Task<H>),
    Shutdown,
}

/// Owns the host executor thread. Dropping (or calling [`Bridge::stop`])
/// shuts the executor down after it finishes already-queued tasks.
pub struct Bridge<H> {
    handle: BridgeHandle<H>,
    join: Option<std::thread::JoinHandle<()>>,
}

impl<H: Send + 'static> Bridge<H> {
    /// Spawn the host executor thread, giving it exclusive ownership of `host`.
    pub fn start(host: H) -> Self {
        Self::start_with_timeout(host, DEFAULT_SUBMIT_TIMEOUT)
    }

    /// Like [`Bridge::start`] with a custom submitter wait bound.
    pub fn start_with_timeout(host: H, timeout: Duration) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let join = std::thread::spawn(move || executor::run(host, rx));
        Self {
            handle: BridgeHandle { tx, timeout },
            join: Some(join),
        }
    }
}

impl<H> Bridge<H> {
    /// A cloneable submission handle, safe to share across request threads.
    pub fn handle(&self) -> BridgeHandle<H> {
        self.handle.clone()
    }

    /// Stop the executor and wait for it to exit.
    pub fn stop(mut self) {
        self.shutdown();
    }

    fn shutdown(&mut self) {
        if let Some(join) = self.join.take() {
            let _ = self.handle.tx.send(Command::Shutdown);
            if join.join().is_err() {
                tracing::error!("host executor thread panicked during shutdown");
            }
        }
    }
}

impl<H> Drop for Bridge<H> {
    fn drop(&mut self) {
        self.shutdown();
    }
}

/// Submission side of the bridge.
pub struct BridgeHandle<H> {
    tx: mpsc::UnboundedSender<Command<H>>,
    timeout: Duration,
}

impl<H> Clone for BridgeHandle<H> {
    fn clone(&self) -> Self {
        Self {
            tx: self.tx.clone(),
            timeout: self.timeout,
        }
    }
}

impl<H> BridgeHandle<H> {
    /// Queue a task without waiting for it. The returned [`PendingTask`] is
    /// the only way to read the outcome; dropping it discards the result.
    pub fn enqueue(
        &self,
        tool: &str,
        handler: Handler<H>,
        payload: Value,
    ) -> Result<PendingTask, BridgeClosed> {
        let id = Uuid::new_v4();
        let (reply_tx, reply_rx) = oneshot::channel();
        let task = Task {
            id,
            tool: tool.to_string(),
            handler,
            payload,
            reply: reply_tx,
        };
        self.tx.send(Command::Run(task)).map_err(|_| BridgeClosed)?;
        Ok(PendingTask {
            id,
            reply: reply_rx,
        })
    }

    /// Queue a task and wait for its outcome, bounded by the bridge timeout.
    ///
    /// Never returns a raw error: unavailability, handler failure, and
    /// timeout all surface as `Outcome::Failed`.
    pub async fn submit(&self, tool: &str, handler: Handler<H>, payload: Value) -> Outcome {
        match self.enqueue(tool, handler, payload) {
            Ok(pending) => pending.wait(self.timeout).await,
            Err(BridgeClosed) => Outcome::failed("bridge is not running"),
        }
    }
}

/// A queued task whose outcome has not been read yet.
pub struct PendingTask {
    pub id: Uuid,
    reply: oneshot::Receiver<Outcome>,
}

impl PendingTask {
    /// Wait for the outcome, up to `timeout`.
    pub async fn wait(self, timeout: Duration) -> Outcome {
        match tokio::time::timeout(timeout, self.reply).await {
            Ok(Ok(outcome)) => outcome,
            Ok(Err(_)) => Outcome::failed("host executor dropped the task before completing it"),
            Err(_) => Outcome::failed("timeout waiting for host execution"),
        }
    }
}
