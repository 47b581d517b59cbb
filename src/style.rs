// SPDX-License-Identifier: MPL-2.0
//! Color and style value model.
//!
//! Styles are applied to stage elements as typed properties rather than
//! stringly-typed CSS pairs, so a headless stage can store and assert on
//! them. Colors support the common `#rgb` / `#rrggbb` hex notations with
//! shorthand expansion and opacity application.

use crate::error::{Error, Result};

// ============================================================================
// Rgba
// ============================================================================

/// An RGBA color with components in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Rgba {
    /// Creates an opaque color from float components.
    #[must_use]
    pub const fn from_rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Parses a hex color string.
    ///
    /// Accepts `#rgb` and `#rrggbb`, with or without the leading `#`.
    /// Three-digit shorthand is expanded by doubling each digit
    /// (`#27f` → `#2277ff`).
    pub fn from_hex(hex: &str) -> Result<Self> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);

        let expanded;
        let digits = match digits.len() {
            6 => digits,
            3 => {
                expanded = digits
                    .chars()
                    .flat_map(|c| [c, c])
                    .collect::<String>();
                expanded.as_str()
            }
            _ => {
                return Err(Error::Style(format!(
                    "expected 3 or 6 hex digits, got {:?}",
                    hex
                )))
            }
        };

        let component = |range: std::ops::Range<usize>| -> Result<f32> {
            let value = u8::from_str_radix(&digits[range], 16)
                .map_err(|_| Error::Style(format!("invalid hex digit in {:?}", hex)))?;
            Ok(f32::from(value) / 255.0)
        };

        Ok(Self {
            r: component(0..2)?,
            g: component(2..4)?,
            b: component(4..6)?,
            a: 1.0,
        })
    }

    /// Returns this color with the given opacity, clamped to `0.0..=1.0`.
    #[must_use]
    pub fn with_opacity(self, opacity: f32) -> Self {
        Self {
            a: opacity.clamp(0.0, 1.0),
            ..self
        }
    }
}

// ============================================================================
// Base Palette
// ============================================================================

/// Base colors shared by the core and the Iced adapter.
pub mod palette {
    use super::Rgba;

    // Grayscale
    pub const BLACK: Rgba = Rgba::from_rgb(0.0, 0.0, 0.0);
    pub const WHITE: Rgba = Rgba::from_rgb(1.0, 1.0, 1.0);
    pub const GRAY_900: Rgba = Rgba::from_rgb(0.1, 0.1, 0.1);
    pub const GRAY_700: Rgba = Rgba::from_rgb(0.3, 0.3, 0.3);
    pub const GRAY_200: Rgba = Rgba::from_rgb(0.75, 0.75, 0.75);

    // Semantic colors
    pub const ERROR_500: Rgba = Rgba::from_rgb(0.898, 0.224, 0.208);
    pub const WARNING_500: Rgba = Rgba::from_rgb(0.945, 0.651, 0.125);
    pub const SUCCESS_500: Rgba = Rgba::from_rgb(0.263, 0.702, 0.404);
    pub const INFO_500: Rgba = Rgba::from_rgb(0.392, 0.588, 1.0);
}

// ============================================================================
// Paint
// ============================================================================

/// Shape of a radial gradient.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RadialShape {
    #[default]
    Circle,
    Ellipse,
}

/// A fill: solid color or gradient.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Paint {
    Solid(Rgba),
    Linear {
        start: Rgba,
        end: Rgba,
        /// Gradient direction in degrees; 180.0 is top-to-bottom.
        angle: f32,
    },
    Radial {
        start: Rgba,
        end: Rgba,
        shape: RadialShape,
    },
}

impl Paint {
    /// Top-to-bottom linear gradient.
    #[must_use]
    pub const fn vertical(start: Rgba, end: Rgba) -> Self {
        Paint::Linear {
            start,
            end,
            angle: 180.0,
        }
    }

    /// The color a renderer without gradient support should fall back to.
    #[must_use]
    pub fn base_color(&self) -> Rgba {
        match self {
            Paint::Solid(color) => *color,
            Paint::Linear { start, .. } | Paint::Radial { start, .. } => *start,
        }
    }
}

impl From<Rgba> for Paint {
    fn from(color: Rgba) -> Self {
        Paint::Solid(color)
    }
}

// ============================================================================
// Style Properties
// ============================================================================

/// A typed style mutation, applied to one element.
///
/// Setting a property replaces any earlier value for the same [`StyleKey`];
/// properties with different keys accumulate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StyleProperty {
    Background(Paint),
    TextColor(Rgba),
    BorderColor(Rgba),
    /// Element opacity in `0.0..=1.0`.
    Opacity(f32),
    /// Vertical offset from the element's anchor position, in pixels.
    OffsetY(f32),
    FontSize(f32),
    Padding(f32),
    CornerRadius(f32),
}

/// Identity of a style property, independent of its value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StyleKey {
    Background,
    TextColor,
    BorderColor,
    Opacity,
    OffsetY,
    FontSize,
    Padding,
    CornerRadius,
}

impl StyleProperty {
    /// Returns the key this property sets.
    #[must_use]
    pub fn key(&self) -> StyleKey {
        match self {
            StyleProperty::Background(_) => StyleKey::Background,
            StyleProperty::TextColor(_) => StyleKey::TextColor,
            StyleProperty::BorderColor(_) => StyleKey::BorderColor,
            StyleProperty::Opacity(_) => StyleKey::Opacity,
            StyleProperty::OffsetY(_) => StyleKey::OffsetY,
            StyleProperty::FontSize(_) => StyleKey::FontSize,
            StyleProperty::Padding(_) => StyleKey::Padding,
            StyleProperty::CornerRadius(_) => StyleKey::CornerRadius,
        }
    }
}
