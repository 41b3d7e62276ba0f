//! Gesture classification.
//!
//! Turns raw pointer callbacks into at most one [`GestureEvent`] each. The
//! classifier never touches progress state; it only tracks what it needs to
//! tell taps from double taps and to keep pan and pinch one-shot.

use clicker_core::limits::{self, PAN_MIN_DISTANCE, PINCH_SCALE_DELTA};
use clicker_core::{FlingDirection, GestureEvent, RawInput, Time};
use tracing::{debug, trace};

/// Per-session gesture bookkeeping.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GestureSession {
    /// Time of the previous press-down
    pub last_tap: Option<Time>,

    /// Double taps seen so far
    pub double_tap_streak: u32,

    /// A pan has already been committed
    pub pan_milestone_reached: bool,

    /// A pinch has already been committed
    pub pinch_milestone_reached: bool,
}

/// Classifies raw input into semantic gesture events.
#[derive(Debug, Clone, Default)]
pub struct GestureClassifier {
    session: GestureSession,
}

impl GestureClassifier {
    /// Create a classifier for a freshly mounted session.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current session bookkeeping.
    pub fn session(&self) -> &GestureSession {
        &self.session
    }

    /// Classify one raw input.
    ///
    /// Returns `None` for inputs that carry no meaning on their own and for
    /// shapes that cannot be resolved (a fling with no usable direction, a
    /// non-finite distance or scale).
    pub fn classify(&mut self, raw: &RawInput) -> Option<GestureEvent> {
        let event = match *raw {
            RawInput::PressDown { at } => Some(self.press_down(at)),
            RawInput::LongPress { .. } => Some(GestureEvent::LongPress),
            RawInput::PanEnd { distance } => self.pan_end(distance),
            RawInput::PinchUpdate { scale } => self.pinch_update(scale),
            RawInput::FlingEnd { direction } => match direction {
                Some(FlingDirection::Right) => Some(GestureEvent::SwipeRight),
                Some(FlingDirection::Left) => Some(GestureEvent::SwipeLeft),
                Some(FlingDirection::Up | FlingDirection::Down) | None => None,
            },
            RawInput::PressUp { .. } | RawInput::PanUpdate { .. } | RawInput::PinchEnd { .. } => {
                None
            }
        };

        match &event {
            Some(event) => debug!(?event, "Classified gesture"),
            None => trace!(?raw, "Input produced no gesture"),
        }
        event
    }

    fn press_down(&mut self, at: Time) -> GestureEvent {
        let is_double = self
            .session
            .last_tap
            .is_some_and(|last| at - last < limits::double_tap_window());
        self.session.last_tap = Some(at);

        if is_double {
            self.session.double_tap_streak += 1;
            GestureEvent::DoubleTap {
                streak: self.session.double_tap_streak,
            }
        } else {
            GestureEvent::Tap
        }
    }

    fn pan_end(&mut self, distance: f64) -> Option<GestureEvent> {
        if self.session.pan_milestone_reached
            || !distance.is_finite()
            || distance < PAN_MIN_DISTANCE
        {
            return None;
        }
        self.session.pan_milestone_reached = true;
        Some(GestureEvent::PanCommit)
    }

    fn pinch_update(&mut self, scale: f64) -> Option<GestureEvent> {
        if self.session.pinch_milestone_reached
            || !scale.is_finite()
            || (scale - 1.0).abs() <= PINCH_SCALE_DELTA
        {
            return None;
        }
        self.session.pinch_milestone_reached = true;
        Some(GestureEvent::PinchCommit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};

    fn at(ms: i64) -> Time {
        Utc.timestamp_millis_opt(1_700_000_000_000).unwrap() + Duration::milliseconds(ms)
    }

    fn press(ms: i64) -> RawInput {
        RawInput::PressDown { at: at(ms) }
    }

    #[test]
    fn test_first_press_is_tap() {
        let mut classifier = GestureClassifier::new();
        assert_eq!(classifier.classify(&press(0)), Some(GestureEvent::Tap));
        assert_eq!(classifier.session().last_tap, Some(at(0)));
    }

    #[test]
    fn test_double_tap_window() {
        let mut classifier = GestureClassifier::new();
        classifier.classify(&press(0));
        assert_eq!(
            classifier.classify(&press(299)),
            Some(GestureEvent::DoubleTap { streak: 1 })
        );
        // measured from the previous press, not the first one
        assert_eq!(
            classifier.classify(&press(550)),
            Some(GestureEvent::DoubleTap { streak: 2 })
        );
        assert_eq!(classifier.classify(&press(850)), Some(GestureEvent::Tap));
        assert_eq!(classifier.session().double_tap_streak, 2);
    }

    #[test]
    fn test_streak_survives_slow_taps() {
        let mut classifier = GestureClassifier::new();
        classifier.classify(&press(0));
        classifier.classify(&press(100));
        classifier.classify(&press(1_000));
        assert_eq!(
            classifier.classify(&press(1_100)),
            Some(GestureEvent::DoubleTap { streak: 2 })
        );
    }

    #[test]
    fn test_press_up_and_long_press() {
        let mut classifier = GestureClassifier::new();
        assert_eq!(classifier.classify(&RawInput::PressUp { at: at(0) }), None);
        assert_eq!(
            classifier.classify(&RawInput::LongPress { at: at(500) }),
            Some(GestureEvent::LongPress)
        );
        assert_eq!(
            classifier.classify(&RawInput::LongPress { at: at(1_500) }),
            Some(GestureEvent::LongPress)
        );
        assert_eq!(classifier.session().last_tap, None);
    }

    #[test]
    fn test_pan_commits_once() {
        let mut classifier = GestureClassifier::new();
        assert_eq!(classifier.classify(&RawInput::PanUpdate { distance: 40.0 }), None);
        assert_eq!(classifier.classify(&RawInput::PanEnd { distance: 9.5 }), None);
        assert!(!classifier.session().pan_milestone_reached);
        assert_eq!(
            classifier.classify(&RawInput::PanEnd { distance: 10.0 }),
            Some(GestureEvent::PanCommit)
        );
        assert_eq!(classifier.classify(&RawInput::PanEnd { distance: 80.0 }), None);
        assert!(classifier.session().pan_milestone_reached);
    }

    #[test]
    fn test_pinch_threshold_is_exclusive() {
        let mut classifier = GestureClassifier::new();
        assert_eq!(classifier.classify(&RawInput::PinchUpdate { scale: 1.2 }), None);
        assert_eq!(classifier.classify(&RawInput::PinchUpdate { scale: 0.8 }), None);
        assert!(!classifier.session().pinch_milestone_reached);
        assert_eq!(
            classifier.classify(&RawInput::PinchUpdate { scale: 1.21 }),
            Some(GestureEvent::PinchCommit)
        );
    }

    #[test]
    fn test_pinch_commits_on_update_once() {
        let mut classifier = GestureClassifier::new();
        assert_eq!(classifier.classify(&RawInput::PinchUpdate { scale: 1.05 }), None);
        assert_eq!(classifier.classify(&RawInput::PinchEnd { scale: 2.0 }), None);
        assert_eq!(
            classifier.classify(&RawInput::PinchUpdate { scale: 0.75 }),
            Some(GestureEvent::PinchCommit)
        );
        assert_eq!(classifier.classify(&RawInput::PinchUpdate { scale: 1.5 }), None);
    }

    #[test]
    fn test_pinch_ignores_non_finite_scale() {
        let mut classifier = GestureClassifier::new();
        assert_eq!(classifier.classify(&RawInput::PinchUpdate { scale: f64::NAN }), None);
        assert_eq!(
            classifier.classify(&RawInput::PinchUpdate { scale: f64::INFINITY }),
            None
        );
        assert!(!classifier.session().pinch_milestone_reached);
    }

    #[test]
    fn test_fling_directions() {
        let mut classifier = GestureClassifier::new();
        let fling = |direction| RawInput::FlingEnd { direction };
        assert_eq!(
            classifier.classify(&fling(Some(FlingDirection::Right))),
            Some(GestureEvent::SwipeRight)
        );
        assert_eq!(
            classifier.classify(&fling(Some(FlingDirection::Left))),
            Some(GestureEvent::SwipeLeft)
        );
        assert_eq!(classifier.classify(&fling(Some(FlingDirection::Up))), None);
        assert_eq!(classifier.classify(&fling(Some(FlingDirection::Down))), None);
        assert_eq!(classifier.classify(&fling(None)), None);
        assert_eq!(classifier.session(), &GestureSession::default());
    }
}
