//! Replay scripts: recorded raw input for driving a session from the CLI.
//!
//! A script is a JSON array of steps:
//!
//! ```text
//! [
//!   { "t_ms": 0,   "input": { "kind": "press_down" } },
//!   { "t_ms": 120, "input": { "kind": "press_down" } },
//!   { "input": { "kind": "fling_end", "direction": "right" } }
//! ]
//! ```
//!
//! `t_ms` is an offset from the start of the replay and becomes the `at`
//! timestamp of press-type inputs.

use anyhow::{anyhow, Context, Result};
use chrono::Duration;
use clicker_core::{RawInput, Time};
use serde::Deserialize;

/// One recorded input.
#[derive(Debug, Deserialize)]
pub struct ScriptStep {
    /// Milliseconds since the start of the replay
    #[serde(default)]
    pub t_ms: i64,

    /// Raw input without its timestamp
    pub input: serde_json::Value,
}

/// Parse a script, stamping inputs relative to `start`.
pub fn parse(text: &str, start: Time) -> Result<Vec<RawInput>> {
    let steps: Vec<ScriptStep> = serde_json::from_str(text).context("Invalid script JSON")?;

    steps
        .into_iter()
        .enumerate()
        .map(|(i, step)| {
            let at = Duration::try_milliseconds(step.t_ms)
                .and_then(|offset| start.checked_add_signed(offset))
                .ok_or_else(|| anyhow!("offset {}ms is out of range", step.t_ms))
                .with_context(|| format!("Invalid t_ms in step {}", i))?;

            let mut input = step.input;
            if let Some(fields) = input.as_object_mut() {
                fields
                    .entry("at")
                    .or_insert_with(|| serde_json::json!(at));
            }
            serde_json::from_value(input).with_context(|| format!("Invalid input in step {}", i))
        })
        .collect()
}
