//! Progress store - the single owner of a session's state.

use chrono::Utc;
use clicker_core::{
    ClickerError, ProgressSnapshot, ProgressState, Result, SessionId, TaskCatalog, TaskId,
};
use tokio::sync::watch;
use tracing::{info, warn};

use crate::engine::Applied;

/// Owns [`ProgressState`] and publishes a snapshot after every commit.
///
/// `commit` needs `&mut self`, so commits on one store can never interleave.
/// Observers hold a [`watch::Receiver`] and always see the latest revision.
pub struct ProgressStore {
    session: SessionId,
    state: ProgressState,
    revision: u64,
    observers: watch::Sender<ProgressSnapshot>,
}

impl ProgressStore {
    /// Create an empty store for `session`.
    pub fn new(session: SessionId) -> Self {
        let (observers, _) = watch::channel(ProgressSnapshot::initial(session));
        Self {
            session,
            state: ProgressState::new(),
            revision: 0,
            observers,
        }
    }

    /// Session this store belongs to.
    pub fn session(&self) -> SessionId {
        self.session
    }

    /// Copy of the current state.
    pub fn get(&self) -> ProgressState {
        self.state
    }

    /// Commits applied so far.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// The most recently published snapshot.
    pub fn snapshot(&self) -> ProgressSnapshot {
        self.observers.borrow().clone()
    }

    /// Subscribe to snapshots.
    pub fn subscribe(&self) -> watch::Receiver<ProgressSnapshot> {
        self.observers.subscribe()
    }

    /// Apply a transition atomically.
    ///
    /// `mutator` proposes the next state together with the tasks it claims
    /// to complete. The proposal is rejected whole, leaving the store
    /// untouched, if the mutator fails, if score or completions would
    /// regress, or if the claimed completions do not match the actual
    /// difference in the completion set.
    pub fn commit<F>(&mut self, mutator: F) -> Result<Vec<TaskId>>
    where
        F: FnOnce(&ProgressState) -> Result<Applied>,
    {
        let result = mutator(&self.state).and_then(|applied| {
            self.verify(&applied)?;
            Ok(applied)
        });

        let applied = match result {
            Ok(applied) => applied,
            Err(e) => {
                warn!(session = %self.session, revision = self.revision, "Commit rejected: {}", e);
                return Err(e);
            }
        };

        self.state = applied.state;
        self.revision += 1;

        for id in &applied.newly_completed {
            info!(
                session = %self.session,
                task = %id,
                score = self.state.score,
                "Task completed: {}",
                TaskCatalog::get(*id).title
            );
        }

        self.observers.send_replace(ProgressSnapshot {
            session: self.session,
            revision: self.revision,
            taken_at: Utc::now(),
            state: self.state,
            unlocked: applied.newly_completed.clone(),
        });

        Ok(applied.newly_completed)
    }

    /// Mark a single task complete without touching the score.
    ///
    /// Completing an already completed task commits nothing and reports
    /// nothing new.
    pub fn complete_task(&mut self, id: TaskId) -> Result<Vec<TaskId>> {
        if self.state.is_completed(id) {
            return Ok(Vec::new());
        }
        self.commit(|state| {
            let mut next = *state;
            next.completed.insert(id);
            Ok(Applied {
                state: next,
                newly_completed: vec![id],
            })
        })
    }

    fn verify(&self, applied: &Applied) -> Result<()> {
        applied.state.ensure_advances_from(&self.state)?;

        let mut claimed = applied.newly_completed.clone();
        claimed.sort();
        claimed.dedup();
        let actual: Vec<TaskId> = applied
            .state
            .completed
            .iter()
            .filter(|id| !self.state.is_completed(*id))
            .collect();

        if claimed.len() != applied.newly_completed.len() || claimed != actual {
            return Err(ClickerError::InvariantViolation(format!(
                "claimed completions {:?} do not match {:?}",
                applied.newly_completed, actual
            )));
        }
        Ok(())
    }
}

impl std::fmt::Debug for ProgressStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProgressStore")
            .field("session", &self.session)
            .field("state", &self.state)
            .field("revision", &self.revision)
            .finish()
    }
}
