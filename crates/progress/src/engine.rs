//! The scoring rule table.
//!
//! Every gesture kind maps to one [`Rule`]: a score delta plus an optional
//! task it unlocks. Score milestones are re-checked whenever a rule raises
//! the score, and only then.

use clicker_core::limits::{DOUBLE_TAP_STREAK_GOAL, SCORE_MILESTONE_HIGH, SCORE_MILESTONE_LOW};
use clicker_core::{GestureEvent, GestureKind, ProgressState, Result, TaskId};
use tracing::debug;

/// When a rule's task unlock applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Condition {
    /// Every occurrence qualifies
    Always,
    /// The double-tap streak carried by the event has reached the bound
    StreakAtLeast(u32),
}

impl Condition {
    /// Whether `event` satisfies this condition.
    pub fn holds(&self, event: &GestureEvent) -> bool {
        match self {
            Self::Always => true,
            Self::StreakAtLeast(goal) => {
                matches!(event, GestureEvent::DoubleTap { streak } if streak >= goal)
            }
        }
    }
}

/// One row of the rule table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rule {
    /// Gesture this row handles
    pub kind: GestureKind,
    /// Points added on every occurrence
    pub score_delta: u32,
    /// Task completed when the condition holds
    pub unlocks: Option<TaskId>,
    /// Gate on the unlock
    pub condition: Condition,
}

/// A score threshold that completes a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Milestone {
    /// Score at or above which the task completes
    pub threshold: u32,
    /// Task to complete
    pub task: TaskId,
}

// Indexed by `GestureKind` discriminant.
static RULES: [Rule; 7] = [
    Rule {
        kind: GestureKind::Tap,
        score_delta: 1,
        unlocks: None,
        condition: Condition::Always,
    },
    Rule {
        kind: GestureKind::DoubleTap,
        score_delta: 2,
        unlocks: Some(TaskId::DoubleTapStreak),
        condition: Condition::StreakAtLeast(DOUBLE_TAP_STREAK_GOAL),
    },
    Rule {
        kind: GestureKind::LongPress,
        score_delta: 5,
        unlocks: Some(TaskId::LongPress),
        condition: Condition::Always,
    },
    Rule {
        kind: GestureKind::PanCommit,
        score_delta: 0,
        unlocks: Some(TaskId::Pan),
        condition: Condition::Always,
    },
    Rule {
        kind: GestureKind::PinchCommit,
        score_delta: 0,
        unlocks: Some(TaskId::Pinch),
        condition: Condition::Always,
    },
    Rule {
        kind: GestureKind::SwipeRight,
        score_delta: 0,
        unlocks: Some(TaskId::SwipeRight),
        condition: Condition::Always,
    },
    Rule {
        kind: GestureKind::SwipeLeft,
        score_delta: 0,
        unlocks: Some(TaskId::SwipeLeft),
        condition: Condition::Always,
    },
];

// Ascending thresholds.
static MILESTONES: [Milestone; 2] = [
    Milestone {
        threshold: SCORE_MILESTONE_LOW,
        task: TaskId::ReachTen,
    },
    Milestone {
        threshold: SCORE_MILESTONE_HIGH,
        task: TaskId::ReachHundred,
    },
];

/// Result of applying one gesture to a state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Applied {
    /// State after the gesture
    pub state: ProgressState,
    /// Tasks this gesture completed, in the order they fired
    pub newly_completed: Vec<TaskId>,
}

/// Deterministic gesture-to-progress rules.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProgressEngine;

impl ProgressEngine {
    /// Create a new engine.
    pub fn new() -> Self {
        Self
    }

    /// The full rule table.
    pub fn rules() -> &'static [Rule] {
        &RULES
    }

    /// Rule for a gesture kind.
    pub fn rule(kind: GestureKind) -> &'static Rule {
        &RULES[kind as usize]
    }

    /// Score milestones, lowest first.
    pub fn milestones() -> &'static [Milestone] {
        &MILESTONES
    }

    /// Apply `event` to `state`.
    ///
    /// Completions are idempotent: a task already in `state` is never
    /// reported again. Score deltas always apply. The only failure is a
    /// score overflow, in which case nothing is returned to commit.
    pub fn apply(&self, event: &GestureEvent, state: &ProgressState) -> Result<Applied> {
        let rule = Self::rule(event.kind());
        let mut next = *state;
        let mut newly_completed = Vec::new();

        if let Some(task) = rule.unlocks {
            if rule.condition.holds(event) && next.completed.insert(task) {
                newly_completed.push(task);
            }
        }

        if rule.score_delta > 0 {
            next.score = state.score_plus(rule.score_delta)?;
            for milestone in &MILESTONES {
                if next.score >= milestone.threshold && next.completed.insert(milestone.task) {
                    newly_completed.push(milestone.task);
                }
            }
        }

        debug!(
            kind = %rule.kind,
            score = next.score,
            unlocked = newly_completed.len(),
            "Applied gesture rule"
        );

        Ok(Applied {
            state: next,
            newly_completed,
        })
    }
}
