//! Rotator Driver
//!
//! Runs a [`Rotator`] on the tokio runtime. Each rotator gets one task that
//! holds exactly one pending sleep at a time; when it fires the task applies
//! a tick, publishes a [`RotatorFrame`], and sleeps for the delay the tick
//! returned.
//!
//! # Lifecycle
//!
//! [`RotatorDriver::spawn`] is the mount. The returned [`RotatorHandle`] is
//! the scope: [`RotatorHandle::dispose`] (or dropping the handle) aborts the
//! task, so no tick can fire against a torn-down view. Cancellation happens
//! once; a disposed handle cannot be used again.
//!
//! Frames travel over a `watch` channel, so a slow view only ever sees the
//! latest frame and never blocks the timer.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;

use super::{RoleList, Rotator, RotatorFrame};

/// Messages from the handle to the driver task
#[derive(Debug)]
enum DriverCommand {
    /// Replace the role list and restart the cycle
    Reconfigure(RoleList),
}

/// Spawns rotator tasks
pub struct RotatorDriver;

impl RotatorDriver {
    /// Start driving `rotator`. Must be called from within a tokio runtime.
    pub fn spawn(rotator: Rotator) -> RotatorHandle {
        let (frame_tx, frame_rx) = watch::channel(rotator.frame());
        let (command_tx, command_rx) = mpsc::unbounded_channel();
        let ticks = Arc::new(AtomicU64::new(0));

        tracing::debug!(roles = rotator.roles().len(), "spawning rotator driver");
        let task = tokio::spawn(run(rotator, frame_tx, command_rx, Arc::clone(&ticks)));

        RotatorHandle {
            frames: frame_rx,
            commands: command_tx,
            task: Some(task),
            ticks,
        }
    }
}

/// The timer loop. Only one `sleep` is ever pending; a reconfigure drops it
/// and starts a fresh one.
async fn run(
    mut rotator: Rotator,
    frames: watch::Sender<RotatorFrame>,
    mut commands: mpsc::UnboundedReceiver<DriverCommand>,
    ticks: Arc<AtomicU64>,
) {
    let mut delay = rotator.initial_delay();

    loop {
        tokio::select! {
            _ = tokio::time::sleep(delay) => {
                delay = rotator.tick();
                ticks.fetch_add(1, Ordering::SeqCst);
                frames.send_replace(rotator.frame());
            }
            command = commands.recv() => match command {
                Some(DriverCommand::Reconfigure(roles)) => {
                    tracing::debug!(roles = roles.len(), "rotator reconfigured");
                    rotator.reset_roles(roles);
                    delay = rotator.initial_delay();
                    frames.send_replace(rotator.frame());
                }
                None => break,
            },
        }
    }
}

/// Owner of a running rotator
///
/// Dropping the handle cancels the pending timer.
#[derive(Debug)]
pub struct RotatorHandle {
    frames: watch::Receiver<RotatorFrame>,
    commands: mpsc::UnboundedSender<DriverCommand>,
    task: Option<JoinHandle<()>>,
    ticks: Arc<AtomicU64>,
}

impl RotatorHandle {
    /// Latest published frame
    pub fn frame(&self) -> RotatorFrame {
        self.frames.borrow().clone()
    }

    /// A receiver notified on every published frame
    pub fn subscribe(&self) -> watch::Receiver<RotatorFrame> {
        self.frames.clone()
    }

    /// Ticks applied by the driver task so far
    pub fn tick_count(&self) -> u64 {
        self.ticks.load(Ordering::SeqCst)
    }

    /// Shared tick counter; stays readable after disposal
    pub fn tick_counter(&self) -> Arc<AtomicU64> {
        Arc::clone(&self.ticks)
    }

    /// Whether the driver task is still scheduled
    pub fn is_active(&self) -> bool {
        self.task.as_ref().is_some_and(|task| !task.is_finished())
    }

    /// Switch to a new role list. The cycle restarts from the first role
    /// with nothing typed.
    pub fn reconfigure(&self, roles: RoleList) {
        if self.commands.send(DriverCommand::Reconfigure(roles)).is_err() {
            tracing::warn!("rotator driver is gone; reconfigure ignored");
        }
    }

    /// Cancel the pending timer and tear the rotator down
    pub fn dispose(mut self) {
        self.cancel();
    }

    fn cancel(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
            tracing::debug!(ticks = self.tick_count(), "rotator driver cancelled");
        }
    }
}

impl Drop for RotatorHandle {
    fn drop(&mut self) {
        self.cancel();
    }
}
