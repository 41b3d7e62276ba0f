//! Gesture model - raw pointer input and the semantic events derived from it.

use serde::{Deserialize, Serialize};

use crate::Time;

/// Direction resolved for a fling at gesture end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlingDirection {
    /// Toward the left edge
    Left,
    /// Toward the right edge
    Right,
    /// Toward the top edge
    Up,
    /// Toward the bottom edge
    Down,
}

/// A raw gesture callback as delivered by the host.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RawInput {
    /// Finger went down on the button
    PressDown {
        /// When the press started
        at: Time,
    },

    /// Finger lifted
    PressUp {
        /// When the press ended
        at: Time,
    },

    /// The platform's long-press threshold elapsed while held
    LongPress {
        /// When the threshold fired
        at: Time,
    },

    /// Pan in progress
    PanUpdate {
        /// Distance travelled so far
        distance: f64,
    },

    /// Pan released
    PanEnd {
        /// Total distance travelled
        distance: f64,
    },

    /// Pinch in progress
    PinchUpdate {
        /// Current scale factor (1.0 = untouched)
        scale: f64,
    },

    /// Pinch released
    PinchEnd {
        /// Final scale factor
        scale: f64,
    },

    /// Fling released
    FlingEnd {
        /// Resolved direction, if any
        #[serde(default)]
        direction: Option<FlingDirection>,
    },
}

/// A classified, named interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GestureEvent {
    /// Single press
    Tap,

    /// Press shortly after the previous one
    DoubleTap {
        /// Double taps seen this session, including this one
        streak: u32,
    },

    /// Press held past the long-press threshold
    LongPress,

    /// First qualifying pan of the session
    PanCommit,

    /// First qualifying pinch of the session
    PinchCommit,

    /// Fling to the right
    SwipeRight,

    /// Fling to the left
    SwipeLeft,
}

/// Payload-free discriminant of [`GestureEvent`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GestureKind {
    /// See [`GestureEvent::Tap`]
    Tap,
    /// See [`GestureEvent::DoubleTap`]
    DoubleTap,
    /// See [`GestureEvent::LongPress`]
    LongPress,
    /// See [`GestureEvent::PanCommit`]
    PanCommit,
    /// See [`GestureEvent::PinchCommit`]
    PinchCommit,
    /// See [`GestureEvent::SwipeRight`]
    SwipeRight,
    /// See [`GestureEvent::SwipeLeft`]
    SwipeLeft,
}

impl GestureEvent {
    /// The event's kind.
    pub fn kind(&self) -> GestureKind {
        match self {
            Self::Tap => GestureKind::Tap,
            Self::DoubleTap { .. } => GestureKind::DoubleTap,
            Self::LongPress => GestureKind::LongPress,
            Self::PanCommit => GestureKind::PanCommit,
            Self::PinchCommit => GestureKind::PinchCommit,
            Self::SwipeRight => GestureKind::SwipeRight,
            Self::SwipeLeft => GestureKind::SwipeLeft,
        }
    }
}

impl std::fmt::Display for GestureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Tap => write!(f, "tap"),
            Self::DoubleTap => write!(f, "double_tap"),
            Self::LongPress => write!(f, "long_press"),
            Self::PanCommit => write!(f, "pan_commit"),
            Self::PinchCommit => write!(f, "pinch_commit"),
            Self::SwipeRight => write!(f, "swipe_right"),
            Self::SwipeLeft => write!(f, "swipe_left"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_input_from_json() {
        let input: RawInput =
            serde_json::from_str(r#"{"kind":"pinch_update","scale":1.25}"#).unwrap();
        assert_eq!(input, RawInput::PinchUpdate { scale: 1.25 });

        let fling: RawInput = serde_json::from_str(r#"{"kind":"fling_end"}"#).unwrap();
        assert_eq!(fling, RawInput::FlingEnd { direction: None });

        let fling: RawInput =
            serde_json::from_str(r#"{"kind":"fling_end","direction":"left"}"#).unwrap();
        assert_eq!(fling, RawInput::FlingEnd { direction: Some(FlingDirection::Left) });
    }

    #[test]
    fn test_event_kind() {
        assert_eq!(GestureEvent::DoubleTap { streak: 3 }.kind(), GestureKind::DoubleTap);
        assert_eq!(GestureEvent::SwipeLeft.kind(), GestureKind::SwipeLeft);
        assert_eq!(GestureKind::PinchCommit.to_string(), "pinch_commit");
    }
}
