// SPDX-License-Identifier: MPL-2.0
//! Toast widgets for rendering scheduler entries.
//!
//! The scheduler keeps the authoritative toast state (phase, slot, colors)
//! in the stage; this module reads it back and builds the Iced widget tree
//! each frame, smoothing entrance and exit with an eased fade so discrete
//! phase changes read as animation.

use std::time::Instant;

use crate::notify::{layout, Anchor, NotificationEntry, NotificationId, Phase, Scheduler};
use crate::stage::MemoryStage;
use crate::style::{palette, Rgba, StyleKey, StyleProperty};
use crate::ui::design_tokens::{border, color, opacity, radius, shadow, sizing, spacing, typography};
use iced::widget::{button, container, text, Column, Container, Row, Text};
use iced::{alignment, Color, Element, Length, Theme};

/// Messages produced by toast widgets.
#[derive(Debug, Clone)]
pub enum Message {
    /// Dismiss a specific notification by ID.
    Dismiss(NotificationId),
}

/// Colors resolved for one toast, read back from the stage.
#[derive(Debug, Clone, Copy)]
struct ToastColors {
    background: Rgba,
    text: Rgba,
    accent: Rgba,
}

fn toast_colors(stage: &MemoryStage, entry: &NotificationEntry) -> ToastColors {
    let element = entry.element();
    let background = match stage.style(element, StyleKey::Background) {
        Some(StyleProperty::Background(paint)) => paint.base_color(),
        _ => palette::GRAY_900,
    };
    let text = match stage.style(element, StyleKey::TextColor) {
        Some(StyleProperty::TextColor(rgba)) => rgba,
        _ => palette::WHITE,
    };
    let accent = match stage.style(element, StyleKey::BorderColor) {
        Some(StyleProperty::BorderColor(rgba)) => rgba,
        _ => entry.severity().accent(),
    };
    ToastColors {
        background,
        text,
        accent,
    }
}

/// Animation opacity for an entry, eased across its current phase.
fn phase_opacity(entry: &NotificationEntry, scheduler: &Scheduler, now: Instant) -> f32 {
    let settings = scheduler.settings();
    match entry.phase() {
        Phase::Entering => {
            let t = layout::progress(entry.phase_elapsed(now), settings.entrance_delay);
            layout::lerp(opacity::TRANSPARENT, opacity::OPAQUE, layout::ease_out(t))
        }
        Phase::Visible => opacity::OPAQUE,
        Phase::Exiting => {
            let t = layout::progress(entry.phase_elapsed(now), settings.exit_delay);
            layout::lerp(opacity::OPAQUE, opacity::TRANSPARENT, layout::ease_out(t))
        }
        Phase::Removed => opacity::TRANSPARENT,
    }
}

/// Toast widget configuration.
pub struct Toast;

impl Toast {
    /// Renders a single toast for a live scheduler entry.
    pub fn view<'a>(
        entry: &NotificationEntry,
        scheduler: &Scheduler,
        stage: &'a MemoryStage,
        now: Instant,
    ) -> Element<'a, Message> {
        let colors = toast_colors(stage, entry);
        let fade = phase_opacity(entry, scheduler, now);
        let message = stage.text(entry.element()).unwrap_or_default();

        let text_color = Color {
            a: fade,
            ..color(colors.text)
        };
        let message_widget = Text::new(message.to_string())
            .size(typography::BODY)
            .style(move |_theme: &Theme| text::Style {
                color: Some(text_color),
            });

        let notification_id = entry.id();
        let dismiss_button = button(
            Text::new("×")
                .size(sizing::ICON_SM)
                .style(move |_theme: &Theme| text::Style {
                    color: Some(text_color),
                }),
        )
        .on_press(Message::Dismiss(notification_id))
        .padding(spacing::XXS)
        .style(dismiss_button_style);

        let content = Row::new()
            .spacing(spacing::SM)
            .align_y(alignment::Vertical::Center)
            .push(
                Container::new(message_widget)
                    .width(Length::Fill)
                    .align_x(alignment::Horizontal::Left),
            )
            .push(dismiss_button);

        Container::new(content)
            .width(Length::Fixed(sizing::TOAST_WIDTH))
            .padding(spacing::SM)
            .style(move |theme: &Theme| toast_container_style(theme, colors, fade))
            .into()
    }

    /// Renders the toast overlay with every live entry, stacked away from
    /// the scheduler's anchor.
    pub fn view_overlay<'a>(
        scheduler: &Scheduler,
        stage: &'a MemoryStage,
        now: Instant,
    ) -> Element<'a, Message> {
        let anchor = scheduler.settings().anchor;
        let mut toasts: Vec<Element<'a, Message>> = scheduler
            .entries()
            .map(|entry| Self::view(entry, scheduler, stage, now))
            .collect();
        if anchor == Anchor::Bottom {
            // Slot zero sits closest to the bottom edge.
            toasts.reverse();
        }

        if toasts.is_empty() {
            // An empty container that takes no space.
            Container::new(text(""))
                .width(Length::Shrink)
                .height(Length::Shrink)
                .into()
        } else {
            let toast_column = Column::with_children(toasts)
                .spacing(spacing::SM)
                .align_x(alignment::Horizontal::Center);

            Container::new(toast_column)
                .width(Length::Fill)
                .height(Length::Fill)
                .align_x(alignment::Horizontal::Center)
                .align_y(anchor_alignment(anchor))
                .padding(spacing::LG)
                .into()
        }
    }
}

fn anchor_alignment(anchor: Anchor) -> alignment::Vertical {
    match anchor {
        Anchor::Top => alignment::Vertical::Top,
        Anchor::Center => alignment::Vertical::Center,
        Anchor::Bottom => alignment::Vertical::Bottom,
    }
}

/// Style function for the toast container.
fn toast_container_style(_theme: &Theme, colors: ToastColors, fade: f32) -> container::Style {
    container::Style {
        background: Some(iced::Background::Color(Color {
            a: fade,
            ..color(colors.background)
        })),
        border: iced::Border {
            color: Color {
                a: fade,
                ..color(colors.accent)
            },
            width: border::WIDTH_MD,
            radius: radius::MD.into(),
        },
        shadow: shadow::MD,
        text_color: Some(Color {
            a: fade,
            ..color(colors.text)
        }),
        ..Default::default()
    }
}

/// Style function for the dismiss button.
fn dismiss_button_style(theme: &Theme, status: button::Status) -> button::Style {
    let base = theme.extended_palette().background.base;

    match status {
        button::Status::Hovered | button::Status::Pressed => button::Style {
            background: Some(iced::Background::Color(Color {
                a: opacity::OVERLAY_SUBTLE,
                ..color(palette::GRAY_200)
            })),
            text_color: base.text,
            border: iced::Border {
                radius: radius::SM.into(),
                ..Default::default()
            },
            shadow: shadow::NONE,
            snap: true,
        },
        button::Status::Active | button::Status::Disabled => button::Style {
            background: None,
            text_color: base.text,
            border: iced::Border::default(),
            shadow: shadow::NONE,
            snap: true,
        },
    }
}
