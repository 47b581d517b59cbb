// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for all configuration constants.
//!
//! This module is the single source of truth for scheduler defaults.
//! Every duration is in milliseconds; the conversion to `Duration`
//! happens once, in `SchedulerSettings`.

// ==========================================================================
// Queue Defaults
// ==========================================================================

/// Maximum number of notifications visible at once.
pub const CAPACITY: usize = 3;

/// Maximum accepted queue capacity.
pub const MAX_CAPACITY: usize = 16;

// ==========================================================================
// Timing Defaults
// ==========================================================================

/// Display time for success/info notifications (in milliseconds).
pub const DISPLAY_TIME_MS: u64 = 4_000;

/// Display time for warning notifications (in milliseconds).
pub const WARNING_DISPLAY_TIME_MS: u64 = 6_000;

/// Settle delay before a freshly attached toast is revealed
/// (in milliseconds).
pub const ENTRANCE_DELAY_MS: u64 = 20;

/// Exit animation length before the element is detached
/// (in milliseconds).
pub const EXIT_DELAY_MS: u64 = 200;

// ==========================================================================
// Layout Defaults
// ==========================================================================

/// Height of one toast, in pixels, for slot offsets.
pub const TOAST_HEIGHT: f32 = 64.0;

/// Vertical gap between stacked toasts, in pixels.
pub const TOAST_GAP: f32 = 12.0;

/// Distance a toast travels during its entrance and exit, in pixels.
pub const ENTRANCE_SHIFT: f32 = 16.0;
