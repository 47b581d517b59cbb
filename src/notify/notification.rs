// SPDX-License-Identifier: MPL-2.0
//! Core notification data structures.

use std::time::Duration;

use crate::notify::layout::Anchor;
use crate::style::{palette, Paint, Rgba};

/// Unique identifier for a notification.
///
/// Ids are allocated by the owning [`crate::notify::Scheduler`] from a
/// monotonically increasing counter; they are unique within that scheduler
/// and never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NotificationId(pub(crate) u64);

impl NotificationId {
    /// The raw sequence number.
    #[must_use]
    pub fn value(self) -> u64 {
        self.0
    }
}

/// Severity level determines default styling and display duration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Severity {
    /// Operation completed successfully.
    #[default]
    Success,
    /// Informational message.
    Info,
    /// Warning that doesn't block operation.
    Warning,
    /// Error requiring attention; stays until dismissed or evicted.
    Error,
}

impl Severity {
    /// Returns the accent color for this severity level.
    #[must_use]
    pub fn accent(self) -> Rgba {
        match self {
            Severity::Success => palette::SUCCESS_500,
            Severity::Info => palette::INFO_500,
            Severity::Warning => palette::WARNING_500,
            Severity::Error => palette::ERROR_500,
        }
    }

    /// Whether this severity auto-exits at all.
    ///
    /// Errors are sticky: they stay visible until dismissed or evicted,
    /// unless the popup sets an explicit display time.
    #[must_use]
    pub fn is_sticky(self) -> bool {
        matches!(self, Severity::Error)
    }
}

/// Appearance state of a notification entry.
///
/// Strictly linear: `Entering → Visible → Exiting → Removed`. Forced
/// eviction and early dismissal can pull an entry into `Exiting` ahead of
/// its timeout, but nothing skips `Exiting` or leaves `Removed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Attached, entrance animation pending.
    Entering,
    /// Fully shown, auto-exit timer (if any) armed.
    Visible,
    /// Exit animation running, removal scheduled.
    Exiting,
    /// Detached and dropped from the live sequence. Terminal.
    Removed,
}

/// Per-popup configuration.
///
/// Unset fields fall back to the scheduler settings and the severity's
/// defaults.
#[derive(Debug, Clone, Copy, Default)]
pub struct PopupOptions {
    pub(crate) severity: Severity,
    pub(crate) anchor: Option<Anchor>,
    pub(crate) background: Option<Paint>,
    pub(crate) text_color: Option<Rgba>,
    pub(crate) border_color: Option<Rgba>,
    pub(crate) display_time: Option<Duration>,
}

impl PopupOptions {
    /// Options with every field defaulted.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the severity level.
    #[must_use]
    pub fn severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    /// Anchors the toast stack at a specific screen position.
    #[must_use]
    pub fn anchor(mut self, anchor: Anchor) -> Self {
        self.anchor = Some(anchor);
        self
    }

    /// Overrides the background fill.
    #[must_use]
    pub fn background(mut self, background: impl Into<Paint>) -> Self {
        self.background = Some(background.into());
        self
    }

    /// Overrides the text color.
    #[must_use]
    pub fn text_color(mut self, color: Rgba) -> Self {
        self.text_color = Some(color);
        self
    }

    /// Overrides the border color (defaults to the severity accent).
    #[must_use]
    pub fn border_color(mut self, color: Rgba) -> Self {
        self.border_color = Some(color);
        self
    }

    /// How long the notification stays visible before auto-exiting.
    ///
    /// The unit is explicit in the `Duration`; zero is rejected by
    /// [`crate::notify::Scheduler::popup`]. An explicit display time makes
    /// even an `Error` popup auto-exit.
    #[must_use]
    pub fn display_time(mut self, duration: Duration) -> Self {
        self.display_time = Some(duration);
        self
    }
}
