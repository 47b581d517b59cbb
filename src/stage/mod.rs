// SPDX-License-Identifier: MPL-2.0
//! Visual-element capability port.
//!
//! The scheduler and the listener registry never talk to a concrete UI
//! toolkit. They drive a [`Stage`]: an abstract surface that can create,
//! attach, detach and mutate elements, and that owns the platform side of
//! event subscriptions. [`MemoryStage`] is the in-process implementation
//! used both headless (tests, state inspection) and as the retained element
//! model behind the Iced adapter.
//!
//! # Design Notes
//!
//! - All handles are generational: operations on a removed element are
//!   observable no-ops, never stale-reference bugs.
//! - Methods return `bool` for "was the handle valid"; invalid handles are
//!   not an error (the platform layer decides what invalid means).

mod element;
mod memory;

pub use element::{ElementId, ElementSpec};
pub use memory::MemoryStage;

use crate::style::StyleProperty;

/// Identifier of one platform-side event subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(pub(crate) u64);

/// Delivery configuration for an event subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ListenOptions {
    /// Deliver during the capture phase instead of the bubble phase.
    pub capture: bool,
    /// Tear the binding down after its first delivery.
    pub once: bool,
    /// The callback promises not to cancel the event.
    pub passive: bool,
}

impl ListenOptions {
    /// Options for a binding that fires at most once.
    #[must_use]
    pub const fn once() -> Self {
        Self {
            capture: false,
            once: true,
            passive: false,
        }
    }
}

/// An event delivered to listener callbacks.
#[derive(Debug, Clone)]
pub struct Event {
    /// The element the event was dispatched on.
    pub element: ElementId,
    /// Event kind tag, e.g. `"click"`.
    pub kind: String,
}

/// Abstract surface the core renders to.
pub trait Stage {
    /// Creates a new element and returns its handle. The element starts
    /// detached.
    fn create(&mut self, spec: ElementSpec) -> ElementId;

    /// Attaches an element to a parent, or to the stage root when `parent`
    /// is `None`.
    fn attach(&mut self, element: ElementId, parent: Option<ElementId>) -> bool;

    /// Detaches an element from its parent. The element and its styles
    /// survive; only the attachment is severed.
    fn detach(&mut self, element: ElementId) -> bool;

    /// Removes an element entirely, invalidating its handle.
    fn remove(&mut self, element: ElementId) -> bool;

    /// Sets one style property, replacing any earlier value with the same
    /// [`crate::style::StyleKey`].
    fn set_style(&mut self, element: ElementId, style: StyleProperty) -> bool;

    /// Replaces the element's text content.
    fn set_text(&mut self, element: ElementId, text: &str) -> bool;

    /// Replaces the element's content with markup the renderer may
    /// interpret. A renderer without markup support falls back to showing
    /// it as plain text.
    fn set_html(&mut self, element: ElementId, html: &str) -> bool;

    /// Opens a platform subscription for `kind` events on `element`.
    ///
    /// Returns `None` when the handle is invalid; no subscription is
    /// recorded in that case.
    fn subscribe(
        &mut self,
        element: ElementId,
        kind: &str,
        options: ListenOptions,
    ) -> Option<SubscriptionId>;

    /// Closes a platform subscription. Safe to call with an already-closed
    /// id.
    fn unsubscribe(&mut self, subscription: SubscriptionId) -> bool;

    /// Whether the element currently hangs off the stage (root or parent).
    fn is_attached(&self, element: ElementId) -> bool;

    /// Number of open platform subscriptions attributable to `element`.
    fn subscription_count(&self, element: ElementId) -> usize;
}
