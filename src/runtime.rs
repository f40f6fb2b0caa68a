//! Async shell: one tokio task per controller.
//!
//! The task owns the controller and is the single consumer of its event
//! queue, so events are handled strictly in arrival order and never
//! concurrently. Timer expiry is folded into the same loop and is checked
//! before the queue, so a burst of events cannot hold back a due timer.
//! After every event the task publishes a fresh [`Snapshot`] on a watch
//! channel.
//!
//! ```text
//! rendering layer ─┐                       ┌─► watch<Snapshot>
//! host (ack/push) ─┼─► mpsc<Event> ─► run ─┤
//! deadline sleep ──┘                       └─► commit callback
//! ```
//!
//! The task stops once every [`EditorHandle`] is dropped; dropping the
//! controller cancels its pending timer.

use crate::config::ConfigUpdate;
use crate::controller::{Controller, Event, Snapshot, Value};
use crate::input::InputKind;
use crate::timer::DeadlineTimer;
use thiserror::Error;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::{self, Instant};
use tracing::debug;

/// Errors returned by [`EditorHandle`].
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RuntimeError {
    #[error("editor runtime has stopped")]
    Stopped,
}

/// Cloneable handle to a running controller.
pub struct EditorHandle<V: Value> {
    events: mpsc::UnboundedSender<Event<V>>,
    snapshots: watch::Receiver<Snapshot<V>>,
}

impl<V: Value> Clone for EditorHandle<V> {
    fn clone(&self) -> Self {
        Self {
            events: self.events.clone(),
            snapshots: self.snapshots.clone(),
        }
    }
}

/// Spawn `controller` onto the current tokio runtime.
pub fn spawn<V: Value>(
    controller: Controller<V, DeadlineTimer>,
) -> (EditorHandle<V>, JoinHandle<()>) {
    let (events_tx, events_rx) = mpsc::unbounded_channel();
    let (snapshots_tx, snapshots_rx) = watch::channel(controller.snapshot());
    let join = tokio::spawn(run(controller, events_rx, snapshots_tx));
    let handle = EditorHandle {
        events: events_tx,
        snapshots: snapshots_rx,
    };
    (handle, join)
}

async fn run<V: Value>(
    mut controller: Controller<V, DeadlineTimer>,
    mut events: mpsc::UnboundedReceiver<Event<V>>,
    snapshots: watch::Sender<Snapshot<V>>,
) {
    debug!(widget = %controller.id(), "editor runtime started");
    loop {
        // A deadline that is already due goes ahead of queued events.
        if controller.fire_due(Instant::now()).is_some() {
            snapshots.send_replace(controller.snapshot());
            continue;
        }

        let deadline = controller.timer().deadline();
        let sleep = time::sleep_until(deadline.unwrap_or_else(Instant::now));

        tokio::select! {
            biased;
            event = events.recv() => match event {
                Some(event) => {
                    controller.handle(event);
                }
                None => break,
            },
            _ = sleep, if deadline.is_some() => {
                controller.fire_due(Instant::now());
            }
        }

        snapshots.send_replace(controller.snapshot());
    }
    debug!(widget = %controller.id(), "editor runtime stopped");
}

impl<V: Value> EditorHandle<V> {
    /// Queue an event for the controller.
    pub fn send(&self, event: Event<V>) -> Result<(), RuntimeError> {
        self.events.send(event).map_err(|_| RuntimeError::Stopped)
    }

    pub fn activate(&self) -> Result<(), RuntimeError> {
        self.send(Event::Activate)
    }

    pub fn change(&self, value: V) -> Result<(), RuntimeError> {
        self.send(Event::Change(value))
    }

    /// Report a change from an input of `kind`, confirming if that input
    /// auto-confirms.
    pub fn change_with(&self, kind: InputKind, value: V) -> Result<(), RuntimeError> {
        kind.change_events(value)
            .into_iter()
            .try_for_each(|event| self.send(event))
    }

    pub fn confirm(&self) -> Result<(), RuntimeError> {
        self.send(Event::Confirm)
    }

    pub fn cancel(&self) -> Result<(), RuntimeError> {
        self.send(Event::Cancel)
    }

    /// Acknowledge the in-flight commit as sent.
    pub fn ack(&self) -> Result<(), RuntimeError> {
        self.send(Event::Ack(None))
    }

    /// Acknowledge the in-flight commit with the value the host stored.
    pub fn ack_with(&self, value: V) -> Result<(), RuntimeError> {
        self.send(Event::Ack(Some(value)))
    }

    /// Push a new externally confirmed value.
    pub fn push_value(&self, value: V) -> Result<(), RuntimeError> {
        self.send(Event::ExternalValue(value))
    }

    pub fn configure(&self, update: ConfigUpdate) -> Result<(), RuntimeError> {
        self.send(Event::Configure(update))
    }

    /// Latest published snapshot.
    pub fn snapshot(&self) -> Snapshot<V> {
        self.snapshots.borrow().clone()
    }

    /// Receiver notified after every processed event.
    pub fn subscribe(&self) -> watch::Receiver<Snapshot<V>> {
        self.snapshots.clone()
    }

    /// Wait until a published snapshot satisfies `predicate`.
    pub async fn wait_for<F>(&self, mut predicate: F) -> Result<Snapshot<V>, RuntimeError>
    where
        F: FnMut(&Snapshot<V>) -> bool,
    {
        let mut snapshots = self.snapshots.clone();
        let snapshot = snapshots
            .wait_for(|s| predicate(s))
            .await
            .map_err(|_| RuntimeError::Stopped)?
            .clone();
        Ok(snapshot)
    }
}
