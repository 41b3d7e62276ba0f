//! Task model - the achievements a play session can unlock.

use serde::{Deserialize, Serialize};

use crate::error::{ClickerError, Result};

/// Identifier of a catalog task.
///
/// The catalog is closed, so ids are an enum rather than free-form strings.
/// Each id still displays and serializes as its catalog string (`"1"`..`"8"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TaskId {
    /// Score reaches the low milestone
    #[serde(rename = "1")]
    ReachTen,
    /// Enough double taps in one session
    #[serde(rename = "2")]
    DoubleTapStreak,
    /// Any long press
    #[serde(rename = "3")]
    LongPress,
    /// A committed pan
    #[serde(rename = "4")]
    Pan,
    /// A fling to the right
    #[serde(rename = "5")]
    SwipeRight,
    /// A fling to the left
    #[serde(rename = "6")]
    SwipeLeft,
    /// A committed pinch
    #[serde(rename = "7")]
    Pinch,
    /// Score reaches the high milestone
    #[serde(rename = "8")]
    ReachHundred,
}

impl TaskId {
    /// Number of tasks in the catalog.
    pub const COUNT: usize = 8;

    /// Every id, in catalog order.
    pub const ALL: [TaskId; Self::COUNT] = [
        Self::ReachTen,
        Self::DoubleTapStreak,
        Self::LongPress,
        Self::Pan,
        Self::SwipeRight,
        Self::SwipeLeft,
        Self::Pinch,
        Self::ReachHundred,
    ];

    /// Position of this id in the catalog.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Catalog string for this id.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ReachTen => "1",
            Self::DoubleTapStreak => "2",
            Self::LongPress => "3",
            Self::Pan => "4",
            Self::SwipeRight => "5",
            Self::SwipeLeft => "6",
            Self::Pinch => "7",
            Self::ReachHundred => "8",
        }
    }
}

impl std::fmt::Display for TaskId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for TaskId {
    type Err = ClickerError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|id| id.as_str() == s)
            .ok_or_else(|| ClickerError::UnknownTask(s.to_string()))
    }
}

/// A task definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Task {
    /// Unique identifier
    pub id: TaskId,

    /// Task title
    pub title: &'static str,
}

static TASKS: [Task; TaskId::COUNT] = [
    Task { id: TaskId::ReachTen, title: "Reach 10 points" },
    Task { id: TaskId::DoubleTapStreak, title: "Double tap 5 times" },
    Task { id: TaskId::LongPress, title: "Long press the button" },
    Task { id: TaskId::Pan, title: "Drag the button" },
    Task { id: TaskId::SwipeRight, title: "Swipe right" },
    Task { id: TaskId::SwipeLeft, title: "Swipe left" },
    Task { id: TaskId::Pinch, title: "Pinch the button" },
    Task { id: TaskId::ReachHundred, title: "Reach 100 points" },
];

/// The fixed task catalog.
pub struct TaskCatalog;

impl TaskCatalog {
    /// All tasks, in display order.
    pub fn list() -> &'static [Task] {
        &TASKS
    }

    /// Look up a task by id.
    pub fn get(id: TaskId) -> &'static Task {
        &TASKS[id.index()]
    }

    /// Resolve a catalog string to a task id.
    ///
    /// An unknown id is a programming error on the caller's side.
    pub fn resolve(id: &str) -> Result<TaskId> {
        id.parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_is_ordered_by_id() {
        let ids: Vec<&str> = TaskCatalog::list().iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2", "3", "4", "5", "6", "7", "8"]);
    }

    #[test]
    fn test_get_matches_index() {
        for id in TaskId::ALL {
            assert_eq!(TaskCatalog::get(id).id, id);
        }
    }

    #[test]
    fn test_resolve_known_ids() {
        assert_eq!(TaskCatalog::resolve("1").unwrap(), TaskId::ReachTen);
        assert_eq!(TaskCatalog::resolve("7").unwrap(), TaskId::Pinch);
        for id in TaskId::ALL {
            assert_eq!(TaskCatalog::resolve(&id.to_string()).unwrap(), id);
        }
    }

    #[test]
    fn test_resolve_unknown_id() {
        let err = TaskCatalog::resolve("9").unwrap_err();
        assert_eq!(err, ClickerError::UnknownTask("9".to_string()));
        assert!(TaskCatalog::resolve("").is_err());
    }

    #[test]
    fn test_task_id_serializes_as_catalog_string() {
        let json = serde_json::to_string(&TaskId::ReachHundred).unwrap();
        assert_eq!(json, "\"8\"");
        let back: TaskId = serde_json::from_str("\"3\"").unwrap();
        assert_eq!(back, TaskId::LongPress);
    }
}
