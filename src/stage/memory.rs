// SPDX-License-Identifier: MPL-2.0
//! In-process stage implementation.
//!
//! `MemoryStage` keeps elements in a generational arena and tracks platform
//! subscriptions by id. It is the reference [`Stage`]: tests assert against
//! it directly, and the Iced adapter reads it as the retained element model
//! when building widget trees.

use std::collections::HashMap;

use super::{ElementId, ElementSpec, ListenOptions, Stage, SubscriptionId};
use crate::style::{StyleKey, StyleProperty};

#[derive(Debug, Clone)]
struct Node {
    tag: String,
    classes: Vec<String>,
    text: Option<String>,
    html: Option<String>,
    styles: Vec<StyleProperty>,
    parent: Option<ElementId>,
    attached: bool,
}

#[derive(Debug, Clone)]
struct Slot {
    generation: u32,
    node: Option<Node>,
}

/// Arena-backed stage with generational element handles.
#[derive(Debug, Default)]
pub struct MemoryStage {
    slots: Vec<Slot>,
    free: Vec<usize>,
    subscriptions: HashMap<SubscriptionId, (ElementId, String, ListenOptions)>,
    next_subscription: u64,
}

impl MemoryStage {
    /// Creates an empty stage.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn node(&self, element: ElementId) -> Option<&Node> {
        self.slots
            .get(element.slot)
            .filter(|slot| slot.generation == element.generation)
            .and_then(|slot| slot.node.as_ref())
    }

    fn node_mut(&mut self, element: ElementId) -> Option<&mut Node> {
        self.slots
            .get_mut(element.slot)
            .filter(|slot| slot.generation == element.generation)
            .and_then(|slot| slot.node.as_mut())
    }

    /// Whether the handle still resolves to a live element.
    #[must_use]
    pub fn contains(&self, element: ElementId) -> bool {
        self.node(element).is_some()
    }

    /// Number of live elements.
    #[must_use]
    pub fn element_count(&self) -> usize {
        self.slots.iter().filter(|slot| slot.node.is_some()).count()
    }

    /// The element's tag, if the handle is live.
    #[must_use]
    pub fn tag(&self, element: ElementId) -> Option<&str> {
        self.node(element).map(|node| node.tag.as_str())
    }

    /// The element's text content, if any.
    #[must_use]
    pub fn text(&self, element: ElementId) -> Option<&str> {
        self.node(element).and_then(|node| node.text.as_deref())
    }

    /// The element's markup content, if any.
    #[must_use]
    pub fn html(&self, element: ElementId) -> Option<&str> {
        self.node(element).and_then(|node| node.html.as_deref())
    }

    /// Class names the element was created with.
    #[must_use]
    pub fn classes(&self, element: ElementId) -> &[String] {
        self.node(element)
            .map_or(&[], |node| node.classes.as_slice())
    }

    /// The element's parent, if it is attached below another element.
    #[must_use]
    pub fn parent(&self, element: ElementId) -> Option<ElementId> {
        self.node(element).and_then(|node| node.parent)
    }

    /// All currently applied style properties, one per key.
    #[must_use]
    pub fn styles(&self, element: ElementId) -> &[StyleProperty] {
        self.node(element).map_or(&[], |node| node.styles.as_slice())
    }

    /// The current value for one style key, if set.
    #[must_use]
    pub fn style(&self, element: ElementId, key: StyleKey) -> Option<StyleProperty> {
        self.styles(element)
            .iter()
            .copied()
            .find(|style| style.key() == key)
    }

    /// Total open subscriptions across all elements.
    #[must_use]
    pub fn total_subscriptions(&self) -> usize {
        self.subscriptions.len()
    }
}

impl Stage for MemoryStage {
    fn create(&mut self, spec: ElementSpec) -> ElementId {
        let mut styles: Vec<StyleProperty> = Vec::new();
        for style in spec.styles {
            styles.retain(|existing| existing.key() != style.key());
            styles.push(style);
        }
        let node = Node {
            tag: spec.tag,
            classes: spec.classes,
            text: spec.text,
            html: None,
            styles,
            parent: None,
            attached: false,
        };

        if let Some(slot) = self.free.pop() {
            let entry = &mut self.slots[slot];
            entry.node = Some(node);
            ElementId {
                slot,
                generation: entry.generation,
            }
        } else {
            self.slots.push(Slot {
                generation: 0,
                node: Some(node),
            });
            ElementId {
                slot: self.slots.len() - 1,
                generation: 0,
            }
        }
    }

    fn attach(&mut self, element: ElementId, parent: Option<ElementId>) -> bool {
        if let Some(id) = parent {
            if !self.contains(id) {
                return false;
            }
        }
        match self.node_mut(element) {
            Some(node) => {
                node.parent = parent;
                node.attached = true;
                true
            }
            None => false,
        }
    }

    fn detach(&mut self, element: ElementId) -> bool {
        match self.node_mut(element) {
            Some(node) => {
                node.parent = None;
                node.attached = false;
                true
            }
            None => false,
        }
    }

    fn remove(&mut self, element: ElementId) -> bool {
        let Some(slot) = self
            .slots
            .get_mut(element.slot)
            .filter(|slot| slot.generation == element.generation && slot.node.is_some())
        else {
            return false;
        };
        slot.node = None;
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(element.slot);
        self.subscriptions
            .retain(|_, (owner, _, _)| *owner != element);
        true
    }

    fn set_style(&mut self, element: ElementId, style: StyleProperty) -> bool {
        match self.node_mut(element) {
            Some(node) => {
                node.styles.retain(|existing| existing.key() != style.key());
                node.styles.push(style);
                true
            }
            None => false,
        }
    }

    fn set_text(&mut self, element: ElementId, text: &str) -> bool {
        match self.node_mut(element) {
            Some(node) => {
                node.text = Some(text.to_string());
                true
            }
            None => false,
        }
    }

    fn set_html(&mut self, element: ElementId, html: &str) -> bool {
        match self.node_mut(element) {
            Some(node) => {
                node.html = Some(html.to_string());
                true
            }
            None => false,
        }
    }

    fn subscribe(
        &mut self,
        element: ElementId,
        kind: &str,
        options: ListenOptions,
    ) -> Option<SubscriptionId> {
        if !self.contains(element) {
            return None;
        }
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.subscriptions
            .insert(id, (element, kind.to_string(), options));
        Some(id)
    }

    fn unsubscribe(&mut self, subscription: SubscriptionId) -> bool {
        self.subscriptions.remove(&subscription).is_some()
    }

    fn is_attached(&self, element: ElementId) -> bool {
        self.node(element).is_some_and(|node| node.attached)
    }

    fn subscription_count(&self, element: ElementId) -> usize {
        self.subscriptions
            .values()
            .filter(|(owner, _, _)| *owner == element)
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::palette;

    fn element(stage: &mut MemoryStage) -> ElementId {
        stage.create(ElementSpec::new("div"))
    }

    #[test]
    fn create_and_inspect_element() {
        let mut stage = MemoryStage::new();
        let id = stage.create(
            ElementSpec::new("toast")
                .text("hello")
                .style(StyleProperty::Opacity(0.5)),
        );

        assert!(stage.contains(id));
        assert_eq!(stage.tag(id), Some("toast"));
        assert_eq!(stage.text(id), Some("hello"));
        assert_eq!(stage.html(id), None);
        assert!(stage.set_html(id, "<em>hello</em>"));
        assert_eq!(stage.html(id), Some("<em>hello</em>"));
        assert_eq!(
            stage.style(id, StyleKey::Opacity),
            Some(StyleProperty::Opacity(0.5))
        );
        assert!(!stage.is_attached(id));
    }

    #[test]
    fn attach_and_detach_toggle_attachment() {
        let mut stage = MemoryStage::new();
        let id = element(&mut stage);

        assert!(stage.attach(id, None));
        assert!(stage.is_attached(id));
        assert!(stage.detach(id));
        assert!(!stage.is_attached(id));
    }

    #[test]
    fn parent_and_classes_are_inspectable() {
        let mut stage = MemoryStage::new();
        let panel = stage.create(ElementSpec::new("panel"));
        let toast = stage.create(ElementSpec::new("toast").class("notification"));
        stage.attach(panel, None);
        stage.attach(toast, Some(panel));

        assert_eq!(stage.parent(toast), Some(panel));
        assert_eq!(stage.classes(toast).to_vec(), vec!["notification".to_string()]);

        stage.detach(toast);
        assert_eq!(stage.parent(toast), None);
    }

    #[test]
    fn attach_to_unknown_parent_fails() {
        let mut stage = MemoryStage::new();
        let parent = element(&mut stage);
        let child = element(&mut stage);
        stage.remove(parent);

        assert!(!stage.attach(child, Some(parent)));
        assert!(!stage.is_attached(child));
    }

    #[test]
    fn remove_invalidates_the_handle() {
        let mut stage = MemoryStage::new();
        let id = element(&mut stage);

        assert!(stage.remove(id));
        assert!(!stage.contains(id));
        assert!(!stage.set_style(id, StyleProperty::Opacity(1.0)));
        assert!(!stage.set_text(id, "stale"));
        assert!(!stage.set_html(id, "<b>stale</b>"));
        assert!(!stage.remove(id));
    }

    #[test]
    fn slot_reuse_does_not_resurrect_old_handles() {
        let mut stage = MemoryStage::new();
        let first = element(&mut stage);
        stage.remove(first);

        let second = element(&mut stage);
        assert_eq!(first.slot, second.slot);
        assert_ne!(first, second);
        assert!(!stage.contains(first));
        assert!(stage.contains(second));
    }

    #[test]
    fn set_style_replaces_same_key() {
        let mut stage = MemoryStage::new();
        let id = element(&mut stage);

        stage.set_style(id, StyleProperty::Opacity(0.0));
        stage.set_style(id, StyleProperty::Opacity(1.0));
        stage.set_style(id, StyleProperty::TextColor(palette::WHITE));

        assert_eq!(stage.styles(id).len(), 2);
        assert_eq!(
            stage.style(id, StyleKey::Opacity),
            Some(StyleProperty::Opacity(1.0))
        );
    }

    #[test]
    fn subscriptions_are_counted_per_element() {
        let mut stage = MemoryStage::new();
        let a = element(&mut stage);
        let b = element(&mut stage);

        let sub_a = stage
            .subscribe(a, "click", ListenOptions::default())
            .expect("live handle");
        stage
            .subscribe(a, "keydown", ListenOptions::default())
            .expect("live handle");
        stage
            .subscribe(b, "click", ListenOptions::default())
            .expect("live handle");

        assert_eq!(stage.subscription_count(a), 2);
        assert_eq!(stage.subscription_count(b), 1);
        assert_eq!(stage.total_subscriptions(), 3);

        assert!(stage.unsubscribe(sub_a));
        assert!(!stage.unsubscribe(sub_a));
        assert_eq!(stage.subscription_count(a), 1);
    }

    #[test]
    fn subscribe_on_stale_handle_returns_none() {
        let mut stage = MemoryStage::new();
        let id = element(&mut stage);
        stage.remove(id);

        assert!(stage
            .subscribe(id, "click", ListenOptions::default())
            .is_none());
    }

    #[test]
    fn remove_drops_remaining_subscriptions() {
        let mut stage = MemoryStage::new();
        let id = element(&mut stage);
        stage.subscribe(id, "click", ListenOptions::default());

        stage.remove(id);
        assert_eq!(stage.total_subscriptions(), 0);
    }
}
