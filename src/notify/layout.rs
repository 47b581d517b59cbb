// SPDX-License-Identifier: MPL-2.0
//! Slot layout and animation interpolation.
//!
//! An entry's visual offset is a pure function of its slot index, so
//! re-running layout over the same live sequence always yields identical
//! offsets.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Screen position the toast stack grows from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Anchor {
    /// Stack grows downward from the top edge.
    #[default]
    Top,
    /// Stack grows downward from the vertical center.
    Center,
    /// Stack grows upward from the bottom edge.
    Bottom,
}

impl Anchor {
    /// Direction the stack grows in: `1.0` downward, `-1.0` upward.
    #[must_use]
    pub fn direction(self) -> f32 {
        match self {
            Anchor::Top | Anchor::Center => 1.0,
            Anchor::Bottom => -1.0,
        }
    }
}

/// Vertical offset, in pixels from the anchor, of the entry at `slot`.
#[must_use]
pub fn offset_for_slot(anchor: Anchor, slot: usize, toast_height: f32, gap: f32) -> f32 {
    anchor.direction() * (slot as f32) * (toast_height + gap)
}

/// Linear interpolation between `start` and `end`.
#[must_use]
pub fn lerp(start: f32, end: f32, t: f32) -> f32 {
    start + (end - start) * t
}

/// Fraction of `total` covered by `elapsed`, clamped to `0.0..=1.0`.
///
/// A zero `total` counts as already complete.
#[must_use]
pub fn progress(elapsed: Duration, total: Duration) -> f32 {
    if total.is_zero() {
        return 1.0;
    }
    (elapsed.as_secs_f32() / total.as_secs_f32()).clamp(0.0, 1.0)
}

/// Cubic ease-out, matching the entrance/exit transition curve.
#[must_use]
pub fn ease_out(t: f32) -> f32 {
    let inverse = 1.0 - t.clamp(0.0, 1.0);
    1.0 - inverse * inverse * inverse
}
