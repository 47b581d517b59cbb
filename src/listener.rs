// SPDX-License-Identifier: MPL-2.0
//! Listener lifecycle registry.
//!
//! Every event binding made through [`ListenerRegistry::listen`] is recorded
//! against its element, so the element can later be torn down in one call
//! with no dangling platform subscriptions left behind. The registry also
//! owns the shared timer-cleanup convention: timers adopted by an element
//! via [`ListenerRegistry::adopt_timer`] are cancelled when the element is
//! forgotten or removed.
//!
//! The registry is an ownership ledger, not a set: registering the same
//! `(element, kind, callback)` twice yields two live bindings and two
//! platform subscriptions, and both are torn down by `forget`.

use std::collections::HashMap;
use std::fmt;

use crate::diagnostics::{DiagnosticsHandle, LifecycleEvent};
use crate::stage::{ElementId, Event, ListenOptions, Stage, SubscriptionId};
use crate::timer::{TimerHost, TimerToken};

/// Callback invoked when a bound event is dispatched.
pub type Callback = Box<dyn FnMut(&Event)>;

/// One active event subscription, recorded against its element.
///
/// A binding exists in the registry if and only if its platform
/// subscription is active. Bindings are never mutated in place; a `once`
/// binding is destroyed after its first delivery.
pub struct Binding {
    kind: String,
    options: ListenOptions,
    subscription: SubscriptionId,
    callback: Callback,
}

impl fmt::Debug for Binding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Binding")
            .field("kind", &self.kind)
            .field("options", &self.options)
            .field("subscription", &self.subscription)
            .finish_non_exhaustive()
    }
}

/// Per-element ownership table of active event bindings.
#[derive(Debug, Default)]
pub struct ListenerRegistry {
    bindings: HashMap<ElementId, Vec<Binding>>,
    adopted_timers: HashMap<ElementId, Vec<TimerToken>>,
    diagnostics: Option<DiagnosticsHandle>,
}

impl ListenerRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the handle used to publish teardown events.
    pub fn set_diagnostics(&mut self, handle: DiagnosticsHandle) {
        self.diagnostics = Some(handle);
    }

    /// Subscribes `callback` to `kind` events on `element` and records the
    /// binding.
    ///
    /// A stale element handle makes this a no-op: the stage refuses the
    /// subscription and nothing is recorded.
    pub fn listen(
        &mut self,
        stage: &mut dyn Stage,
        element: ElementId,
        kind: &str,
        options: ListenOptions,
        callback: impl FnMut(&Event) + 'static,
    ) {
        let Some(subscription) = stage.subscribe(element, kind, options) else {
            return;
        };
        self.bindings.entry(element).or_default().push(Binding {
            kind: kind.to_string(),
            options,
            subscription,
            callback: Box::new(callback),
        });
        if let Some(handle) = &self.diagnostics {
            handle.record(LifecycleEvent::ListenerBound {
                kind: kind.to_string(),
            });
        }
    }

    /// Tears down every binding and adopted timer recorded for `element`.
    ///
    /// No-op if the element has nothing recorded; safe to call repeatedly.
    pub fn forget(
        &mut self,
        stage: &mut dyn Stage,
        timers: &mut dyn TimerHost,
        element: ElementId,
    ) {
        let bindings = self.bindings.remove(&element).unwrap_or_default();
        let removed_bindings = bindings.len();
        for binding in bindings {
            stage.unsubscribe(binding.subscription);
        }

        let tokens = self.adopted_timers.remove(&element).unwrap_or_default();
        let removed_timers = tokens.len();
        for token in tokens {
            timers.cancel_timer(token);
        }

        if removed_bindings + removed_timers > 0 {
            if let Some(handle) = &self.diagnostics {
                handle.record(LifecycleEvent::ListenersForgotten {
                    bindings: removed_bindings,
                    timers: removed_timers,
                });
            }
        }
    }

    /// Tears the element down completely: `forget`, detach from its parent,
    /// and free the stage slot so the caller's handle is invalidated.
    ///
    /// Any later use of the handle is an observable no-op rather than a
    /// silent stale-reference bug.
    pub fn remove(
        &mut self,
        stage: &mut dyn Stage,
        timers: &mut dyn TimerHost,
        element: ElementId,
    ) {
        self.forget(stage, timers, element);
        stage.detach(element);
        stage.remove(element);
    }

    /// Associates a scheduled timer with an element's lifetime.
    ///
    /// The token is cancelled when the element is forgotten or removed,
    /// so a looping animation or clock tied to the element cannot outlive
    /// it.
    pub fn adopt_timer(&mut self, element: ElementId, token: TimerToken) {
        self.adopted_timers.entry(element).or_default().push(token);
    }

    /// Delivers an event to the callbacks bound for `(element, kind)`, in
    /// registration order, and destroys `once` bindings afterwards.
    ///
    /// Returns the number of callbacks invoked. Dispatching on an element
    /// with no bindings (including one already removed) delivers nothing.
    pub fn dispatch(&mut self, stage: &mut dyn Stage, element: ElementId, kind: &str) -> usize {
        let Some(bindings) = self.bindings.remove(&element) else {
            return 0;
        };
        let event = Event {
            element,
            kind: kind.to_string(),
        };

        let mut delivered = 0;
        let mut retained = Vec::with_capacity(bindings.len());
        for mut binding in bindings {
            if binding.kind == kind {
                (binding.callback)(&event);
                delivered += 1;
                if binding.options.once {
                    stage.unsubscribe(binding.subscription);
                    continue;
                }
            }
            retained.push(binding);
        }
        // No empty entries persist.
        if !retained.is_empty() {
            self.bindings.insert(element, retained);
        }
        delivered
    }

    /// Number of bindings recorded for `element`.
    #[must_use]
    pub fn binding_count(&self, element: ElementId) -> usize {
        self.bindings.get(&element).map_or(0, Vec::len)
    }

    /// Whether any element has recorded bindings.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}
