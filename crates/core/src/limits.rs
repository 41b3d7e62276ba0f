//! Compile-time game constants.
//!
//! The game has no tuning surface; every threshold lives here.

/// Maximum gap between two press-downs for the second to count as a double tap.
pub const DOUBLE_TAP_WINDOW_MS: i64 = 300;

/// Minimum travel for a pan to count once it ends.
pub const PAN_MIN_DISTANCE: f64 = 10.0;

/// Pinch scale must move strictly further than this from 1.0.
pub const PINCH_SCALE_DELTA: f64 = 0.2;

/// Double taps needed before the streak task unlocks.
pub const DOUBLE_TAP_STREAK_GOAL: u32 = 5;

/// First score milestone.
pub const SCORE_MILESTONE_LOW: u32 = 10;

/// Second score milestone.
pub const SCORE_MILESTONE_HIGH: u32 = 100;

/// Double tap window as a chrono duration.
pub fn double_tap_window() -> chrono::Duration {
    chrono::Duration::milliseconds(DOUBLE_TAP_WINDOW_MS)
}
