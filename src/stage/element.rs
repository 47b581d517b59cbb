// SPDX-License-Identifier: MPL-2.0
//! Element handles and creation specs.

use crate::style::StyleProperty;

/// Opaque handle to a stage element.
///
/// Handles are generational: once the element is removed, the slot may be
/// reused, but the stale handle's generation no longer matches and every
/// operation through it becomes a no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ElementId {
    pub(crate) slot: usize,
    pub(crate) generation: u32,
}

/// Description of an element to create: tag, classes, initial styles, text.
#[derive(Debug, Clone, Default)]
pub struct ElementSpec {
    pub tag: String,
    pub classes: Vec<String>,
    pub styles: Vec<StyleProperty>,
    pub text: Option<String>,
}

impl ElementSpec {
    /// Starts a spec for an element with the given tag.
    #[must_use]
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Self::default()
        }
    }

    /// Adds a class name.
    #[must_use]
    pub fn class(mut self, class: impl Into<String>) -> Self {
        self.classes.push(class.into());
        self
    }

    /// Adds an initial style property.
    #[must_use]
    pub fn style(mut self, style: StyleProperty) -> Self {
        self.styles.push(style);
        self
    }

    /// Sets the initial text content.
    #[must_use]
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }
}
