//! Host executor: the single thread allowed to touch host-owned state.
//!
//! The thread blocks on the command channel and, each time it wakes, drains
//! everything already queued in FIFO order before going back to sleep.
//! Handler failures of any kind are converted into outcomes here; nothing a
//! handler does can take the thread down.

use std::panic::{catch_unwind, AssertUnwindSafe};

use tokio::sync::mpsc::error::TryRecvError;
use tokio::sync::mpsc::UnboundedReceiver;

use super::{Command, Outcome, Task};

pub(crate) fn run<H>(mut host: H, mut rx: UnboundedReceiver<Command<H>>) {
    while let Some(command) = rx.blocking_recv() {
        if !handle_command(&mut host, command) {
            return;
        }
        // Drain whatever else arrived before this wakeup.
        loop {
            match rx.try_recv() {
                Ok(command) => {
                    if !handle_command(&mut host, command) {
                        return;
                    }
                }
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => return,
            }
        }
    }
}

/// Returns `false` when the executor should exit.
fn handle_command<H>(host: &mut H, command: Command<H>) -> bool {
    match command {
        Command::Shutdown => {
            tracing::info!("host executor shutting down");
            false
        }
        Command::Run(task) => {
            run_task(host, task);
            true
        }
    }
}

fn run_task<H>(host: &mut H, task: Task<H>) {
    let Task {
        id,
        tool,
        handler,
        payload,
        reply,
    } = task;

    let outcome = match catch_unwind(AssertUnwindSafe(|| handler(host, payload))) {
        Ok(Ok(value)) => Outcome::Ok(value),
        Ok(Err(err)) => Outcome::Failed {
            error: err.to_string(),
            trace: Some(format!("{:?}", err)),
        },
        Err(panic) => Outcome::Failed {
            error: panic_message(panic.as_ref()),
            trace: None,
        },
    };

    if reply.send(outcome).is_err() {
        // Submitter timed out and dropped its receiver; the result is
        // discarded without touching any other task.
        tracing::debug!(task_id = %id, tool = %tool, "caller gave up before completion; result discarded");
    }
}

fn panic_message(panic: &(dyn std::any::Any + Send)) -> String {
    if let Some(msg) = panic.downcast_ref::<&str>() {
        format!("handler panicked: {}", msg)
    } else if let Some(msg) = panic.downcast_ref::<String>() {
        format!("handler panicked: {}", msg)
    } else {
        "handler panicked".to_string()
    }
}
