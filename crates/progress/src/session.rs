//! Play sessions.
//!
//! Gesture callbacks may arrive on a different thread than the one owning
//! progress state. [`GameSession::spawn`] splits a session into an
//! [`InputPort`] that classifies on the caller's side and posts semantic
//! events over a channel, and an owner task that applies them one at a time.
//! [`Session`] is the same pipeline for hosts that already deliver input on
//! the owning thread.

use clicker_core::{
    ClickerError, GestureEvent, ProgressSnapshot, RawInput, Result, SessionId, TaskId,
};
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tracing::{debug, error, info};

use crate::classifier::GestureClassifier;
use crate::engine::ProgressEngine;
use crate::store::ProgressStore;

/// Single-threaded session: classifier, engine and store in one place.
#[derive(Debug)]
pub struct Session {
    classifier: GestureClassifier,
    engine: ProgressEngine,
    store: ProgressStore,
}

impl Session {
    /// Start a fresh session.
    pub fn new() -> Self {
        let id = SessionId::new();
        info!(session = %id, "Session started");
        Self {
            classifier: GestureClassifier::new(),
            engine: ProgressEngine::new(),
            store: ProgressStore::new(id),
        }
    }

    /// Session identifier.
    pub fn id(&self) -> SessionId {
        self.store.session()
    }

    /// Feed one raw input. Returns the tasks it completed.
    pub fn handle(&mut self, raw: &RawInput) -> Result<Vec<TaskId>> {
        match self.classifier.classify(raw) {
            Some(event) => self.apply(&event),
            None => Ok(Vec::new()),
        }
    }

    /// Apply an already classified event.
    pub fn apply(&mut self, event: &GestureEvent) -> Result<Vec<TaskId>> {
        let engine = self.engine;
        self.store.commit(|state| engine.apply(event, state))
    }

    /// The progress store.
    pub fn store(&self) -> &ProgressStore {
        &self.store
    }

    /// The gesture classifier.
    pub fn classifier(&self) -> &GestureClassifier {
        &self.classifier
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

/// Entry point for channel-backed sessions.
pub struct GameSession;

impl GameSession {
    /// Spawn the state-owning task on the current tokio runtime.
    ///
    /// Dropping the returned [`InputPort`] ends the session; the final
    /// snapshot is available from [`SessionHandle::join`].
    pub fn spawn() -> (InputPort, SessionHandle) {
        let id = SessionId::new();
        let store = ProgressStore::new(id);
        let snapshots = store.subscribe();
        let (tx, rx) = mpsc::unbounded_channel();

        let task = tokio::spawn(run_owner(store, rx));

        let port = InputPort {
            session: id,
            classifier: GestureClassifier::new(),
            tx,
        };
        let handle = SessionHandle {
            session: id,
            snapshots,
            task,
        };
        (port, handle)
    }
}

async fn run_owner(
    mut store: ProgressStore,
    mut rx: mpsc::UnboundedReceiver<GestureEvent>,
) -> ProgressSnapshot {
    let engine = ProgressEngine::new();
    info!(session = %store.session(), "Session started");

    while let Some(event) = rx.recv().await {
        match store.commit(|state| engine.apply(&event, state)) {
            Ok(unlocked) => {
                debug!(session = %store.session(), ?event, unlocked = unlocked.len(), "Gesture applied");
            }
            Err(e) => {
                error!(session = %store.session(), ?event, "Gesture dropped: {}", e);
            }
        }
    }

    let snapshot = store.snapshot();
    info!(
        session = %store.session(),
        score = snapshot.state.score,
        completed = snapshot.state.completed.len(),
        "Session ended"
    );
    snapshot
}

/// Input side of a spawned session.
///
/// Owns the gesture classifier, so it can live on whatever thread delivers
/// gesture callbacks.
#[derive(Debug)]
pub struct InputPort {
    session: SessionId,
    classifier: GestureClassifier,
    tx: mpsc::UnboundedSender<GestureEvent>,
}

impl InputPort {
    /// Session identifier.
    pub fn session(&self) -> SessionId {
        self.session
    }

    /// The gesture classifier.
    pub fn classifier(&self) -> &GestureClassifier {
        &self.classifier
    }

    /// Classify `raw` and post the resulting event, if any.
    pub fn feed(&mut self, raw: &RawInput) -> Result<Option<GestureEvent>> {
        let Some(event) = self.classifier.classify(raw) else {
            return Ok(None);
        };
        self.post(event)?;
        Ok(Some(event))
    }

    /// Post an already classified event.
    pub fn post(&self, event: GestureEvent) -> Result<()> {
        debug!(session = %self.session, ?event, "Posting gesture");
        self.tx.send(event).map_err(|_| ClickerError::SessionClosed)
    }
}

/// Output side of a spawned session.
pub struct SessionHandle {
    session: SessionId,
    snapshots: watch::Receiver<ProgressSnapshot>,
    task: JoinHandle<ProgressSnapshot>,
}

impl SessionHandle {
    /// Session identifier.
    pub fn session(&self) -> SessionId {
        self.session
    }

    /// A receiver for published snapshots.
    pub fn snapshots(&self) -> watch::Receiver<ProgressSnapshot> {
        self.snapshots.clone()
    }

    /// Wait for the owner task to drain its queue and return the final snapshot.
    pub async fn join(self) -> Result<ProgressSnapshot> {
        self.task.await.map_err(|_| ClickerError::SessionClosed)
    }
}
