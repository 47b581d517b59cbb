// SPDX-License-Identifier: MPL-2.0
//! Transient notification system.
//!
//! Notifications follow toast/snackbar UX patterns: they appear briefly to
//! report on an action without blocking interaction, stack below one
//! another, and yield their place to newer messages when the queue fills.
//!
//! # Components
//!
//! - [`notification`] - Ids, severity levels and per-popup options
//! - [`scheduler`] - `Scheduler` queue, state machine and dismissal
//! - [`layout`] - Pure slot-to-offset mapping and animation easing
//!
//! # Usage
//!
//! ```
//! use std::time::Instant;
//! use iced_notify::notify::{PopupOptions, Scheduler, Severity};
//! use iced_notify::stage::MemoryStage;
//!
//! let mut stage = MemoryStage::new();
//! let mut scheduler = Scheduler::with_defaults();
//!
//! let now = Instant::now();
//! let handle = scheduler
//!     .popup(
//!         &mut stage,
//!         now,
//!         "Image saved",
//!         PopupOptions::new().severity(Severity::Success),
//!     )
//!     .expect("valid options");
//!
//! // Drive the lifecycle from the host's clock.
//! scheduler.advance(&mut stage, Instant::now());
//!
//! // Or cut it short.
//! scheduler.dismiss(&mut stage, Instant::now(), handle.id());
//! ```

pub mod layout;
mod notification;
mod scheduler;

pub use layout::Anchor;
pub use notification::{NotificationId, Phase, PopupOptions, Severity};
pub use scheduler::{DismissHandle, NotificationEntry, Scheduler, SchedulerSettings};
