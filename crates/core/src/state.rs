//! Progress state - score and unlocked tasks for one session.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{ClickerError, Result};
use crate::id::SessionId;
use crate::task::TaskId;
use crate::Time;

/// Set of completed tasks, one flag per catalog entry.
///
/// Serializes as a `{ "<id>": true }` map holding only completed tasks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "BTreeMap<TaskId, bool>", from = "BTreeMap<TaskId, bool>")]
pub struct CompletionSet([bool; TaskId::COUNT]);

impl CompletionSet {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `id` is complete.
    pub fn contains(&self, id: TaskId) -> bool {
        self.0[id.index()]
    }

    /// Mark `id` complete. Returns `true` only if it was not complete before.
    pub fn insert(&mut self, id: TaskId) -> bool {
        let slot = &mut self.0[id.index()];
        let newly = !*slot;
        *slot = true;
        newly
    }

    /// Completed ids in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = TaskId> + '_ {
        TaskId::ALL.into_iter().filter(|id| self.contains(*id))
    }

    /// Number of completed tasks.
    pub fn len(&self) -> usize {
        self.0.iter().filter(|done| **done).count()
    }

    /// Whether nothing is complete yet.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether every task in `other` is also complete here.
    pub fn is_superset(&self, other: &CompletionSet) -> bool {
        other.iter().all(|id| self.contains(id))
    }
}

impl From<CompletionSet> for BTreeMap<TaskId, bool> {
    fn from(set: CompletionSet) -> Self {
        set.iter().map(|id| (id, true)).collect()
    }
}

impl From<BTreeMap<TaskId, bool>> for CompletionSet {
    fn from(map: BTreeMap<TaskId, bool>) -> Self {
        let mut set = CompletionSet::new();
        for (id, done) in map {
            if done {
                set.insert(id);
            }
        }
        set
    }
}

impl FromIterator<TaskId> for CompletionSet {
    fn from_iter<I: IntoIterator<Item = TaskId>>(iter: I) -> Self {
        let mut set = CompletionSet::new();
        for id in iter {
            set.insert(id);
        }
        set
    }
}

/// Score and completions accumulated during one session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressState {
    /// Current score
    pub score: u32,

    /// Completed tasks
    pub completed: CompletionSet,
}

impl ProgressState {
    /// Fresh state: no score, nothing completed.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `id` is complete.
    pub fn is_completed(&self, id: TaskId) -> bool {
        self.completed.contains(id)
    }

    /// Score after adding `delta`, or an overflow error.
    pub fn score_plus(&self, delta: u32) -> Result<u32> {
        self.score.checked_add(delta).ok_or(ClickerError::ScoreOverflow {
            score: self.score,
            delta,
        })
    }

    /// Check that `self` is a legal successor of `prev`.
    ///
    /// Score never goes down and completed tasks never revert.
    pub fn ensure_advances_from(&self, prev: &ProgressState) -> Result<()> {
        if self.score < prev.score {
            return Err(ClickerError::InvariantViolation(format!(
                "score would drop from {} to {}",
                prev.score, self.score
            )));
        }
        if !self.completed.is_superset(&prev.completed) {
            let lost: Vec<String> = prev
                .completed
                .iter()
                .filter(|id| !self.completed.contains(*id))
                .map(|id| id.to_string())
                .collect();
            return Err(ClickerError::InvariantViolation(format!(
                "completed tasks would revert: {}",
                lost.join(", ")
            )));
        }
        Ok(())
    }
}

/// A read-only view of a session's progress, published after each commit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressSnapshot {
    /// Session this snapshot belongs to
    pub session: SessionId,

    /// Number of commits applied so far
    pub revision: u64,

    /// When the snapshot was taken
    pub taken_at: Time,

    /// Progress at this revision
    pub state: ProgressState,

    /// Tasks newly completed by the commit that produced this revision
    pub unlocked: Vec<TaskId>,
}

impl ProgressSnapshot {
    /// Initial snapshot for a new session.
    pub fn initial(session: SessionId) -> Self {
        Self {
            session,
            revision: 0,
            taken_at: chrono::Utc::now(),
            state: ProgressState::new(),
            unlocked: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_reports_first_completion_only() {
        let mut set = CompletionSet::new();
        assert!(set.insert(TaskId::Pan));
        assert!(!set.insert(TaskId::Pan));
        assert!(set.contains(TaskId::Pan));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_iter_is_catalog_ordered() {
        let set: CompletionSet = [TaskId::ReachHundred, TaskId::ReachTen, TaskId::Pinch]
            .into_iter()
            .collect();
        let ids: Vec<TaskId> = set.iter().collect();
        assert_eq!(ids, vec![TaskId::ReachTen, TaskId::Pinch, TaskId::ReachHundred]);
    }

    #[test]
    fn test_state_serializes_completed_as_map() {
        let mut state = ProgressState::new();
        state.score = 10;
        state.completed.insert(TaskId::LongPress);
        state.completed.insert(TaskId::ReachTen);

        let json = serde_json::to_value(state).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "score": 10, "completed": { "1": true, "3": true } })
        );

        let back: ProgressState = serde_json::from_value(json).unwrap();
        assert_eq!(back, state);
    }

    #[test]
    fn test_score_plus_overflow() {
        let state = ProgressState { score: u32::MAX, ..Default::default() };
        assert_eq!(
            state.score_plus(1),
            Err(ClickerError::ScoreOverflow { score: u32::MAX, delta: 1 })
        );
        assert_eq!(ProgressState::new().score_plus(5), Ok(5));
    }

    #[test]
    fn test_ensure_advances_from() {
        let mut prev = ProgressState::new();
        prev.score = 7;
        prev.completed.insert(TaskId::SwipeLeft);

        let mut next = prev;
        next.score = 9;
        next.completed.insert(TaskId::SwipeRight);
        assert!(next.ensure_advances_from(&prev).is_ok());
        assert!(prev.ensure_advances_from(&prev).is_ok());

        let lower = ProgressState { score: 3, completed: prev.completed };
        assert!(matches!(
            lower.ensure_advances_from(&prev),
            Err(ClickerError::InvariantViolation(_))
        ));

        let reverted = ProgressState { score: 9, completed: CompletionSet::new() };
        assert!(matches!(
            reverted.ensure_advances_from(&prev),
            Err(ClickerError::InvariantViolation(_))
        ));
    }
}
