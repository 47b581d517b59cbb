// SPDX-License-Identifier: MPL-2.0
//! Iced adapter.
//!
//! Widgets and helpers for hosts built on the Iced GUI toolkit: design
//! tokens, toast rendering of live scheduler entries, and the tick
//! subscription that drives [`crate::notify::Scheduler::advance`].
//!
//! ```ignore
//! // In an Iced application:
//! fn subscription(&self) -> iced::Subscription<AppMessage> {
//!     iced_notify::ui::tick(std::time::Duration::from_millis(50)).map(AppMessage::Tick)
//! }
//!
//! fn view(&self) -> iced::Element<'_, AppMessage> {
//!     iced_notify::ui::Toast::view_overlay(&self.scheduler, &self.stage, self.last_tick)
//!         .map(AppMessage::Toast)
//! }
//! ```

pub mod design_tokens;
mod toast;

pub use toast::{Message as ToastMessage, Toast};

use std::time::{Duration, Instant};

use iced::{time, Subscription};

/// Subscription delivering the instants that drive scheduler advancement.
///
/// 50ms keeps entrance/exit fades smooth without burning frames; a host
/// with no animated toasts on screen can use a coarser period.
pub fn tick(period: Duration) -> Subscription<Instant> {
    time::every(period)
}
