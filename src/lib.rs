// SPDX-License-Identifier: MPL-2.0
//! `iced_notify` provides transient toast notifications and element
//! lifecycle management for applications built with the Iced GUI toolkit.
//!
//! The core is toolkit-agnostic: a [`notify::Scheduler`] runs a bounded
//! FIFO queue of notification entries against an abstract [`stage::Stage`]
//! and an internal cancellable timeline, so the whole lifecycle (entrance,
//! display, eviction, exit, removal) is testable headless. The
//! [`listener::ListenerRegistry`] keeps event bindings and element-bound
//! timers from outliving their elements. The [`ui`] module renders live
//! entries as Iced widgets.

#![doc(html_root_url = "https://docs.rs/iced_notify/0.1.0")]

pub mod config;
pub mod diagnostics;
pub mod error;
pub mod listener;
pub mod notify;
pub mod stage;
pub mod style;
pub mod timer;
pub mod ui;

pub use error::{Error, Result};
