// SPDX-License-Identifier: MPL-2.0
//! Notification lifecycle scheduling.
//!
//! The `Scheduler` owns a bounded FIFO queue of notification entries and a
//! private [`Timeline`] of pending transitions. `popup` enqueues and
//! returns immediately; every state change happens later, when the host
//! drives [`Scheduler::advance`] with the current instant.
//!
//! Per-entry state machine: `Entering → Visible → Exiting → Removed`.
//! Forced eviction (queue full) and early dismissal pull an entry into
//! `Exiting` ahead of its timeout; removal never happens before the exit
//! delay has run.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use crate::config::defaults;
use crate::diagnostics::{DiagnosticsHandle, LifecycleEvent};
use crate::error::{Error, Result};
use crate::notify::layout::{self, Anchor};
use crate::notify::notification::{NotificationId, Phase, PopupOptions, Severity};
use crate::stage::{ElementId, ElementSpec, Stage};
use crate::style::{palette, Paint, StyleProperty};
use crate::timer::{TimerHost, TimerToken, Timeline};

const TOAST_PADDING: f32 = 16.0;
const TOAST_CORNER_RADIUS: f32 = 12.0;
const TOAST_FONT_SIZE: f32 = 14.0;

// ============================================================================
// Settings
// ============================================================================

/// Resolved scheduler configuration.
///
/// Usually built from [`crate::config::Config::scheduler_settings`]; the
/// `Default` implementation matches the crate defaults.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SchedulerSettings {
    /// Maximum number of entries in `Entering` or `Visible` state.
    pub capacity: usize,
    /// Display time for `Success` and `Info` notifications.
    pub display_time: Duration,
    /// Display time for `Warning` notifications.
    pub warning_display_time: Duration,
    /// Delay before an attached entry is revealed.
    pub entrance_delay: Duration,
    /// How long the exit animation runs before the element is detached.
    pub exit_delay: Duration,
    /// Height of one toast, used for slot offsets.
    pub toast_height: f32,
    /// Vertical gap between stacked toasts.
    pub toast_gap: f32,
    /// Distance a toast travels during its entrance and exit.
    pub entrance_shift: f32,
    /// Default anchor for the toast stack.
    pub anchor: Anchor,
}

impl Default for SchedulerSettings {
    fn default() -> Self {
        Self {
            capacity: defaults::CAPACITY,
            display_time: Duration::from_millis(defaults::DISPLAY_TIME_MS),
            warning_display_time: Duration::from_millis(defaults::WARNING_DISPLAY_TIME_MS),
            entrance_delay: Duration::from_millis(defaults::ENTRANCE_DELAY_MS),
            exit_delay: Duration::from_millis(defaults::EXIT_DELAY_MS),
            toast_height: defaults::TOAST_HEIGHT,
            toast_gap: defaults::TOAST_GAP,
            entrance_shift: defaults::ENTRANCE_SHIFT,
            anchor: Anchor::default(),
        }
    }
}

impl SchedulerSettings {
    /// Checks that the settings describe a usable scheduler.
    pub fn validate(&self) -> Result<()> {
        if self.capacity == 0 || self.capacity > defaults::MAX_CAPACITY {
            return Err(Error::Config(format!(
                "capacity must be between 1 and {}",
                defaults::MAX_CAPACITY
            )));
        }
        if self.display_time.is_zero() || self.warning_display_time.is_zero() {
            return Err(Error::Config(
                "display times must be positive".to_string(),
            ));
        }
        if self.toast_height <= 0.0 || self.toast_gap < 0.0 {
            return Err(Error::Config(
                "toast height must be positive and gap non-negative".to_string(),
            ));
        }
        Ok(())
    }
}

// ============================================================================
// Entries
// ============================================================================

/// One notification in the live sequence.
#[derive(Debug)]
pub struct NotificationEntry {
    id: NotificationId,
    element: ElementId,
    severity: Severity,
    anchor: Anchor,
    enqueued_at: Instant,
    display_time: Option<Duration>,
    slot: usize,
    phase: Phase,
    phase_since: Instant,
    reveal_token: Option<TimerToken>,
    expire_token: Option<TimerToken>,
}

impl NotificationEntry {
    /// The notification's unique id.
    #[must_use]
    pub fn id(&self) -> NotificationId {
        self.id
    }

    /// Handle of the toast element on the stage.
    #[must_use]
    pub fn element(&self) -> ElementId {
        self.element
    }

    /// Severity the notification was created with.
    #[must_use]
    pub fn severity(&self) -> Severity {
        self.severity
    }

    /// Anchor the entry's offsets are computed from.
    #[must_use]
    pub fn anchor(&self) -> Anchor {
        self.anchor
    }

    /// Current appearance state.
    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Index in the live sequence, driving the layout offset.
    #[must_use]
    pub fn slot(&self) -> usize {
        self.slot
    }

    /// When the notification entered the queue.
    #[must_use]
    pub fn enqueued_at(&self) -> Instant {
        self.enqueued_at
    }

    /// Configured display duration; `None` means the entry is sticky.
    #[must_use]
    pub fn display_time(&self) -> Option<Duration> {
        self.display_time
    }

    /// Time spent in the current phase.
    #[must_use]
    pub fn phase_elapsed(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.phase_since)
    }

    /// Whether the entry counts toward queue capacity.
    #[must_use]
    pub fn is_live(&self) -> bool {
        matches!(self.phase, Phase::Entering | Phase::Visible)
    }
}

/// Reference returned by [`Scheduler::popup`] for early dismissal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DismissHandle {
    id: NotificationId,
}

impl DismissHandle {
    /// Id of the notification this handle dismisses.
    #[must_use]
    pub fn id(&self) -> NotificationId {
        self.id
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Transition {
    Reveal(NotificationId),
    Expire(NotificationId),
    Drop(NotificationId),
}

#[derive(Debug, Clone, Copy)]
enum ExitReason {
    Expired,
    Evicted,
    Dismissed,
}

// ============================================================================
// Scheduler
// ============================================================================

/// Bounded FIFO queue of transient notifications.
#[derive(Debug)]
pub struct Scheduler {
    settings: SchedulerSettings,
    entries: VecDeque<NotificationEntry>,
    timeline: Timeline<Transition>,
    next_id: u64,
    diagnostics: Option<DiagnosticsHandle>,
}

impl Scheduler {
    /// Creates a scheduler with validated settings.
    pub fn new(settings: SchedulerSettings) -> Result<Self> {
        settings.validate()?;
        Ok(Self::unchecked(settings))
    }

    /// Creates a scheduler with the crate defaults.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::unchecked(SchedulerSettings::default())
    }

    fn unchecked(settings: SchedulerSettings) -> Self {
        Self {
            settings,
            entries: VecDeque::new(),
            timeline: Timeline::new(),
            next_id: 0,
            diagnostics: None,
        }
    }

    /// Sets the handle used to publish queue-mutation events.
    pub fn set_diagnostics(&mut self, handle: DiagnosticsHandle) {
        self.diagnostics = Some(handle);
    }

    /// The settings this scheduler runs with.
    #[must_use]
    pub fn settings(&self) -> &SchedulerSettings {
        &self.settings
    }

    /// Enqueues a notification and returns a handle for early dismissal.
    ///
    /// If the queue is at capacity, the oldest live entry is forced into
    /// its exit ahead of its timeout. The new entry is attached
    /// immediately, revealed after the entrance delay, and auto-exits
    /// once its display time has elapsed after the reveal (sticky
    /// severities exit only on dismissal or eviction).
    ///
    /// # Errors
    ///
    /// Rejects a zero display-time override with [`Error::Config`].
    pub fn popup(
        &mut self,
        stage: &mut dyn Stage,
        now: Instant,
        message: &str,
        options: PopupOptions,
    ) -> Result<DismissHandle> {
        let display_time = match options.display_time {
            Some(duration) if duration.is_zero() => {
                return Err(Error::Config(
                    "display time must be positive".to_string(),
                ));
            }
            Some(duration) => Some(duration),
            None => self.severity_display_time(options.severity),
        };

        while self.live_count() >= self.settings.capacity {
            let Some(oldest) = self
                .entries
                .iter()
                .find(|entry| entry.is_live())
                .map(NotificationEntry::id)
            else {
                break;
            };
            self.begin_exit(stage, now, oldest, ExitReason::Evicted);
        }

        let id = NotificationId(self.next_id);
        self.next_id += 1;
        let severity = options.severity;
        let anchor = options.anchor.unwrap_or(self.settings.anchor);
        let background = options
            .background
            .unwrap_or(Paint::Solid(palette::GRAY_900));
        let text_color = options.text_color.unwrap_or(palette::WHITE);
        let border_color = options.border_color.unwrap_or_else(|| severity.accent());

        let slot = self.entries.len();
        let offset = self.phase_offset(anchor, slot, Phase::Entering);
        let element = stage.create(
            ElementSpec::new("toast")
                .class("notification")
                .style(StyleProperty::Background(background))
                .style(StyleProperty::TextColor(text_color))
                .style(StyleProperty::BorderColor(border_color))
                .style(StyleProperty::Padding(TOAST_PADDING))
                .style(StyleProperty::CornerRadius(TOAST_CORNER_RADIUS))
                .style(StyleProperty::FontSize(TOAST_FONT_SIZE))
                .style(StyleProperty::Opacity(0.0))
                .style(StyleProperty::OffsetY(offset))
                .text(message),
        );
        stage.attach(element, None);

        let reveal_token =
            self.timeline
                .schedule_after(now, self.settings.entrance_delay, Transition::Reveal(id));
        let expire_token = display_time.map(|duration| {
            self.timeline.schedule_after(
                now,
                self.settings.entrance_delay + duration,
                Transition::Expire(id),
            )
        });

        self.entries.push_back(NotificationEntry {
            id,
            element,
            severity,
            anchor,
            enqueued_at: now,
            display_time,
            slot,
            phase: Phase::Entering,
            phase_since: now,
            reveal_token: Some(reveal_token),
            expire_token,
        });
        self.record(LifecycleEvent::Enqueued { id, severity });
        self.relayout(stage);
        Ok(DismissHandle { id })
    }

    /// Force-dismisses a notification ahead of its timeout.
    ///
    /// Cancels the pending auto-exit so it cannot fire a second exit
    /// transition later. Returns `false` for ids that are unknown, already
    /// exiting, or already removed.
    pub fn dismiss(&mut self, stage: &mut dyn Stage, now: Instant, id: NotificationId) -> bool {
        self.begin_exit(stage, now, id, ExitReason::Dismissed)
    }

    /// Applies every transition whose deadline has passed.
    pub fn advance(&mut self, stage: &mut dyn Stage, now: Instant) {
        for transition in self.timeline.advance(now) {
            match transition {
                Transition::Reveal(id) => self.apply_reveal(stage, now, id),
                Transition::Expire(id) => {
                    self.begin_exit(stage, now, id, ExitReason::Expired);
                }
                Transition::Drop(id) => self.apply_drop(stage, id),
            }
        }
    }

    /// Immediately removes every entry and cancels its pending timers.
    pub fn clear(&mut self, stage: &mut dyn Stage) {
        let entries: Vec<NotificationEntry> = self.entries.drain(..).collect();
        for entry in entries {
            for token in [entry.reveal_token, entry.expire_token]
                .into_iter()
                .flatten()
            {
                self.timeline.cancel_timer(token);
            }
            stage.detach(entry.element);
            stage.remove(entry.element);
            self.record(LifecycleEvent::Removed { id: entry.id });
        }
    }

    /// Entries in the live sequence (everything not yet removed), in
    /// arrival order.
    pub fn entries(&self) -> impl Iterator<Item = &NotificationEntry> {
        self.entries.iter()
    }

    /// Number of entries counting toward capacity.
    #[must_use]
    pub fn live_count(&self) -> usize {
        self.entries.iter().filter(|entry| entry.is_live()).count()
    }

    /// Whether the queue holds no entries at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of transitions still scheduled.
    ///
    /// Zero means the queue is at a settle point: offsets are a pure
    /// function of the live indices until the next `popup` or `dismiss`.
    #[must_use]
    pub fn pending_transitions(&self) -> usize {
        self.timeline.pending()
    }

    fn severity_display_time(&self, severity: Severity) -> Option<Duration> {
        if severity.is_sticky() {
            return None;
        }
        Some(match severity {
            Severity::Warning => self.settings.warning_display_time,
            _ => self.settings.display_time,
        })
    }

    fn phase_offset(&self, anchor: Anchor, slot: usize, phase: Phase) -> f32 {
        let base = layout::offset_for_slot(
            anchor,
            slot,
            self.settings.toast_height,
            self.settings.toast_gap,
        );
        match phase {
            Phase::Entering | Phase::Exiting => {
                base + anchor.direction() * self.settings.entrance_shift
            }
            Phase::Visible | Phase::Removed => base,
        }
    }

    fn begin_exit(
        &mut self,
        stage: &mut dyn Stage,
        now: Instant,
        id: NotificationId,
        reason: ExitReason,
    ) -> bool {
        let Some(entry) = self.entries.iter_mut().find(|entry| entry.id == id) else {
            return false;
        };
        if !entry.is_live() {
            return false;
        }
        let reveal = entry.reveal_token.take();
        let expire = entry.expire_token.take();
        entry.phase = Phase::Exiting;
        entry.phase_since = now;
        let element = entry.element;
        let anchor = entry.anchor;
        let slot = entry.slot;

        for token in [reveal, expire].into_iter().flatten() {
            self.timeline.cancel_timer(token);
        }
        self.timeline
            .schedule_after(now, self.settings.exit_delay, Transition::Drop(id));

        stage.set_style(element, StyleProperty::Opacity(0.0));
        let offset = self.phase_offset(anchor, slot, Phase::Exiting);
        stage.set_style(element, StyleProperty::OffsetY(offset));

        self.record(match reason {
            ExitReason::Expired => LifecycleEvent::Expired { id },
            ExitReason::Evicted => LifecycleEvent::Evicted { id },
            ExitReason::Dismissed => LifecycleEvent::Dismissed { id },
        });
        true
    }

    fn apply_reveal(&mut self, stage: &mut dyn Stage, now: Instant, id: NotificationId) {
        let Some(entry) = self.entries.iter_mut().find(|entry| entry.id == id) else {
            return;
        };
        if entry.phase != Phase::Entering {
            return;
        }
        entry.phase = Phase::Visible;
        entry.phase_since = now;
        entry.reveal_token = None;
        let element = entry.element;
        let anchor = entry.anchor;
        let slot = entry.slot;

        stage.set_style(element, StyleProperty::Opacity(1.0));
        let offset = self.phase_offset(anchor, slot, Phase::Visible);
        stage.set_style(element, StyleProperty::OffsetY(offset));
        self.record(LifecycleEvent::Revealed { id });
    }

    fn apply_drop(&mut self, stage: &mut dyn Stage, id: NotificationId) {
        let Some(index) = self.entries.iter().position(|entry| entry.id == id) else {
            return;
        };
        if self.entries[index].phase != Phase::Exiting {
            return;
        }
        let Some(entry) = self.entries.remove(index) else {
            return;
        };
        stage.detach(entry.element);
        stage.remove(entry.element);
        self.record(LifecycleEvent::Removed { id });
        self.relayout(stage);
    }

    fn relayout(&mut self, stage: &mut dyn Stage) {
        let settings = self.settings;
        for (index, entry) in self.entries.iter_mut().enumerate() {
            entry.slot = index;
            let base = layout::offset_for_slot(
                entry.anchor,
                index,
                settings.toast_height,
                settings.toast_gap,
            );
            let offset = match entry.phase {
                Phase::Entering | Phase::Exiting => {
                    base + entry.anchor.direction() * settings.entrance_shift
                }
                Phase::Visible | Phase::Removed => base,
            };
            stage.set_style(entry.element, StyleProperty::OffsetY(offset));
        }
    }

    fn record(&self, event: LifecycleEvent) {
        if let Some(handle) = &self.diagnostics {
            handle.record(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stage::MemoryStage;
    use crate::style::StyleKey;

    fn ms(millis: u64) -> Duration {
        Duration::from_millis(millis)
    }

    fn test_settings(capacity: usize) -> SchedulerSettings {
        SchedulerSettings {
            capacity,
            display_time: ms(3_000),
            warning_display_time: ms(5_000),
            entrance_delay: ms(20),
            exit_delay: ms(200),
            toast_height: 64.0,
            toast_gap: 12.0,
            entrance_shift: 16.0,
            anchor: Anchor::Top,
        }
    }

    fn scheduler(capacity: usize) -> Scheduler {
        Scheduler::new(test_settings(capacity)).expect("valid settings")
    }

    fn offset_of(stage: &MemoryStage, entry: &NotificationEntry) -> f32 {
        match stage.style(entry.element(), StyleKey::OffsetY) {
            Some(StyleProperty::OffsetY(offset)) => offset,
            other => panic!("expected an offset, got {other:?}"),
        }
    }

    fn opacity_of(stage: &MemoryStage, entry: &NotificationEntry) -> f32 {
        match stage.style(entry.element(), StyleKey::Opacity) {
            Some(StyleProperty::Opacity(opacity)) => opacity,
            other => panic!("expected an opacity, got {other:?}"),
        }
    }

    #[test]
    fn new_scheduler_is_empty() {
        let scheduler = Scheduler::with_defaults();
        assert!(scheduler.is_empty());
        assert_eq!(scheduler.live_count(), 0);
        assert_eq!(scheduler.pending_transitions(), 0);
    }

    #[test]
    fn zero_capacity_is_rejected() {
        let settings = SchedulerSettings {
            capacity: 0,
            ..test_settings(1)
        };
        assert!(Scheduler::new(settings).is_err());
    }

    #[test]
    fn popup_attaches_an_entering_entry() {
        let mut stage = MemoryStage::new();
        let mut scheduler = scheduler(3);
        let now = Instant::now();

        let handle = scheduler
            .popup(&mut stage, now, "saved", PopupOptions::new())
            .expect("popup succeeds");

        let entry = scheduler.entries().next().expect("entry exists");
        assert_eq!(entry.id(), handle.id());
        assert_eq!(entry.phase(), Phase::Entering);
        assert_eq!(entry.slot(), 0);
        assert!(stage.is_attached(entry.element()));
        assert_eq!(stage.text(entry.element()), Some("saved"));
        assert_eq!(opacity_of(&stage, entry), 0.0);
    }

    #[test]
    fn entry_is_revealed_after_entrance_delay() {
        let mut stage = MemoryStage::new();
        let mut scheduler = scheduler(3);
        let now = Instant::now();

        scheduler
            .popup(&mut stage, now, "saved", PopupOptions::new())
            .expect("popup succeeds");
        scheduler.advance(&mut stage, now + ms(20));

        let entry = scheduler.entries().next().expect("entry exists");
        assert_eq!(entry.phase(), Phase::Visible);
        assert_eq!(opacity_of(&stage, entry), 1.0);
        assert_eq!(offset_of(&stage, entry), 0.0);
    }

    #[test]
    fn entry_auto_exits_and_is_removed() {
        let mut stage = MemoryStage::new();
        let mut scheduler = scheduler(3);
        let now = Instant::now();

        let handle = scheduler
            .popup(&mut stage, now, "saved", PopupOptions::new())
            .expect("popup succeeds");
        let element = scheduler.entries().next().expect("entry").element();

        scheduler.advance(&mut stage, now + ms(20));
        // Auto-exit fires at entrance delay + display time.
        scheduler.advance(&mut stage, now + ms(3_020));
        let entry = scheduler.entries().next().expect("entry exists");
        assert_eq!(entry.phase(), Phase::Exiting);
        assert_eq!(opacity_of(&stage, entry), 0.0);

        scheduler.advance(&mut stage, now + ms(3_220));
        assert!(scheduler.is_empty());
        assert!(!stage.contains(element));
        assert_eq!(scheduler.pending_transitions(), 0);
        assert!(!scheduler.dismiss(&mut stage, now + ms(3_300), handle.id()));
    }

    #[test]
    fn live_count_never_exceeds_capacity() {
        let mut stage = MemoryStage::new();
        let mut scheduler = scheduler(2);
        let now = Instant::now();

        for index in 0..5 {
            scheduler
                .popup(
                    &mut stage,
                    now + ms(index * 10),
                    &format!("message {index}"),
                    PopupOptions::new(),
                )
                .expect("popup succeeds");
            assert!(scheduler.live_count() <= 2);
        }
    }

    #[test]
    fn eviction_follows_arrival_order() {
        use crate::diagnostics::DiagnosticsCollector;

        let mut stage = MemoryStage::new();
        let mut scheduler = scheduler(2);
        let mut collector = DiagnosticsCollector::new(64);
        scheduler.set_diagnostics(collector.handle());
        let now = Instant::now();

        let mut ids = Vec::new();
        for index in 0..4 {
            let handle = scheduler
                .popup(
                    &mut stage,
                    now + ms(index * 10),
                    "message",
                    PopupOptions::new(),
                )
                .expect("popup succeeds");
            ids.push(handle.id());
        }
        collector.drain();

        let evicted: Vec<NotificationId> = collector
            .events()
            .filter_map(|event| match event.kind() {
                LifecycleEvent::Evicted { id } => Some(*id),
                _ => None,
            })
            .collect();
        assert_eq!(evicted, vec![ids[0], ids[1]]);
    }

    #[test]
    fn forced_eviction_precedes_natural_timeout() {
        let mut stage = MemoryStage::new();
        let mut scheduler = scheduler(1);
        let now = Instant::now();

        let first = scheduler
            .popup(
                &mut stage,
                now,
                "A",
                PopupOptions::new().display_time(ms(3_000)),
            )
            .expect("popup succeeds");
        scheduler.advance(&mut stage, now + ms(20));

        let second = scheduler
            .popup(
                &mut stage,
                now + ms(500),
                "B",
                PopupOptions::new().display_time(ms(3_000)),
            )
            .expect("popup succeeds");

        // "A" exits at t=500 (evicted), far ahead of its t=3020 timeout.
        let first_entry = scheduler
            .entries()
            .find(|entry| entry.id() == first.id())
            .expect("first entry");
        assert_eq!(first_entry.phase(), Phase::Exiting);

        scheduler.advance(&mut stage, now + ms(520));
        let second_entry = scheduler
            .entries()
            .find(|entry| entry.id() == second.id())
            .expect("second entry");
        assert_eq!(second_entry.phase(), Phase::Visible);

        // "A" is dropped after its exit delay; "B" auto-exits around t=3520.
        scheduler.advance(&mut stage, now + ms(700));
        assert!(scheduler.entries().all(|entry| entry.id() != first.id()));

        scheduler.advance(&mut stage, now + ms(3_520));
        let second_entry = scheduler
            .entries()
            .find(|entry| entry.id() == second.id())
            .expect("second entry");
        assert_eq!(second_entry.phase(), Phase::Exiting);
    }

    #[test]
    fn dismiss_cancels_the_pending_auto_exit() {
        let mut stage = MemoryStage::new();
        let mut scheduler = scheduler(1);
        let now = Instant::now();

        let handle = scheduler
            .popup(&mut stage, now, "saved", PopupOptions::new())
            .expect("popup succeeds");
        scheduler.advance(&mut stage, now + ms(20));

        assert!(scheduler.dismiss(&mut stage, now + ms(1_000), handle.id()));
        scheduler.advance(&mut stage, now + ms(1_200));
        assert!(scheduler.is_empty());

        // The original expire deadline passes without any stale transition.
        scheduler.advance(&mut stage, now + ms(4_000));
        assert_eq!(scheduler.pending_transitions(), 0);
        assert!(scheduler.is_empty());
    }

    #[test]
    fn dismiss_is_single_shot() {
        let mut stage = MemoryStage::new();
        let mut scheduler = scheduler(1);
        let now = Instant::now();

        let handle = scheduler
            .popup(&mut stage, now, "saved", PopupOptions::new())
            .expect("popup succeeds");
        scheduler.advance(&mut stage, now + ms(20));

        assert!(scheduler.dismiss(&mut stage, now + ms(100), handle.id()));
        assert!(!scheduler.dismiss(&mut stage, now + ms(110), handle.id()));
    }

    #[test]
    fn dismiss_of_unknown_id_returns_false() {
        let mut stage = MemoryStage::new();
        let mut scheduler = scheduler(1);
        let now = Instant::now();

        let handle = scheduler
            .popup(&mut stage, now, "saved", PopupOptions::new())
            .expect("popup succeeds");
        scheduler.advance(&mut stage, now + ms(20));
        scheduler.advance(&mut stage, now + ms(3_020));
        scheduler.advance(&mut stage, now + ms(3_220));

        assert!(!scheduler.dismiss(&mut stage, now + ms(3_300), handle.id()));
    }

    #[test]
    fn zero_display_time_is_rejected() {
        let mut stage = MemoryStage::new();
        let mut scheduler = scheduler(1);
        let now = Instant::now();

        let result = scheduler.popup(
            &mut stage,
            now,
            "saved",
            PopupOptions::new().display_time(Duration::ZERO),
        );
        assert!(matches!(result, Err(Error::Config(_))));
        assert!(scheduler.is_empty());
    }

    #[test]
    fn offsets_follow_live_indices() {
        let mut stage = MemoryStage::new();
        let mut scheduler = scheduler(3);
        let now = Instant::now();

        let mut handles = Vec::new();
        for index in 0..3 {
            handles.push(
                scheduler
                    .popup(
                        &mut stage,
                        now + ms(index),
                        "message",
                        PopupOptions::new(),
                    )
                    .expect("popup succeeds"),
            );
        }
        scheduler.advance(&mut stage, now + ms(25));

        let step = 64.0 + 12.0;
        for (index, entry) in scheduler.entries().enumerate() {
            assert_eq!(entry.slot(), index);
            assert!((offset_of(&stage, entry) - step * index as f32).abs() < 1e-4);
        }

        // Dismissing the middle entry re-packs the survivors.
        scheduler.dismiss(&mut stage, now + ms(100), handles[1].id());
        scheduler.advance(&mut stage, now + ms(400));

        let remaining: Vec<NotificationId> =
            scheduler.entries().map(NotificationEntry::id).collect();
        assert_eq!(remaining, vec![handles[0].id(), handles[2].id()]);
        for (index, entry) in scheduler.entries().enumerate() {
            assert_eq!(entry.slot(), index);
            assert!((offset_of(&stage, entry) - step * index as f32).abs() < 1e-4);
        }
    }

    #[test]
    fn error_notifications_stay_until_dismissed() {
        let mut stage = MemoryStage::new();
        let mut scheduler = scheduler(2);
        let now = Instant::now();

        let handle = scheduler
            .popup(
                &mut stage,
                now,
                "disk full",
                PopupOptions::new().severity(Severity::Error),
            )
            .expect("popup succeeds");
        scheduler.advance(&mut stage, now + ms(20));
        scheduler.advance(&mut stage, now + Duration::from_secs(60));

        let entry = scheduler.entries().next().expect("entry exists");
        assert_eq!(entry.phase(), Phase::Visible);

        assert!(scheduler.dismiss(&mut stage, now + Duration::from_secs(61), handle.id()));
    }

    #[test]
    fn warnings_use_the_longer_display_tier() {
        let mut stage = MemoryStage::new();
        let mut scheduler = scheduler(2);
        let now = Instant::now();

        scheduler
            .popup(
                &mut stage,
                now,
                "low disk space",
                PopupOptions::new().severity(Severity::Warning),
            )
            .expect("popup succeeds");
        scheduler.advance(&mut stage, now + ms(20));

        // Still visible past the success tier, gone after the warning tier.
        scheduler.advance(&mut stage, now + ms(3_020));
        let entry = scheduler.entries().next().expect("entry exists");
        assert_eq!(entry.phase(), Phase::Visible);

        scheduler.advance(&mut stage, now + ms(5_020));
        let entry = scheduler.entries().next().expect("entry exists");
        assert_eq!(entry.phase(), Phase::Exiting);
    }

    #[test]
    fn explicit_display_time_overrides_sticky_error() {
        let mut stage = MemoryStage::new();
        let mut scheduler = scheduler(2);
        let now = Instant::now();

        scheduler
            .popup(
                &mut stage,
                now,
                "disk full",
                PopupOptions::new()
                    .severity(Severity::Error)
                    .display_time(ms(1_000)),
            )
            .expect("popup succeeds");
        scheduler.advance(&mut stage, now + ms(20));
        scheduler.advance(&mut stage, now + ms(1_020));

        let entry = scheduler.entries().next().expect("entry exists");
        assert_eq!(entry.phase(), Phase::Exiting);
    }

    #[test]
    fn dismissed_while_entering_never_reveals() {
        let mut stage = MemoryStage::new();
        let mut scheduler = scheduler(1);
        let now = Instant::now();

        let handle = scheduler
            .popup(&mut stage, now, "saved", PopupOptions::new())
            .expect("popup succeeds");
        assert!(scheduler.dismiss(&mut stage, now + ms(5), handle.id()));

        // The reveal deadline passes, but the entry is already exiting.
        scheduler.advance(&mut stage, now + ms(20));
        let entry = scheduler.entries().next().expect("entry exists");
        assert_eq!(entry.phase(), Phase::Exiting);
        assert_eq!(opacity_of(&stage, entry), 0.0);

        scheduler.advance(&mut stage, now + ms(205));
        assert!(scheduler.is_empty());
        assert_eq!(scheduler.pending_transitions(), 0);
    }

    #[test]
    fn burst_evicts_entries_that_never_became_visible() {
        let mut stage = MemoryStage::new();
        let mut scheduler = scheduler(1);
        let now = Instant::now();

        let first = scheduler
            .popup(&mut stage, now, "A", PopupOptions::new())
            .expect("popup succeeds");
        let second = scheduler
            .popup(&mut stage, now + ms(1), "B", PopupOptions::new())
            .expect("popup succeeds");

        let first_entry = scheduler
            .entries()
            .find(|entry| entry.id() == first.id())
            .expect("first entry");
        assert_eq!(first_entry.phase(), Phase::Exiting);

        // A's cancelled reveal never fires; B reveals normally.
        scheduler.advance(&mut stage, now + ms(21));
        let first_entry = scheduler
            .entries()
            .find(|entry| entry.id() == first.id())
            .expect("first entry");
        assert_eq!(first_entry.phase(), Phase::Exiting);
        let second_entry = scheduler
            .entries()
            .find(|entry| entry.id() == second.id())
            .expect("second entry");
        assert_eq!(second_entry.phase(), Phase::Visible);
    }

    #[test]
    fn clear_removes_everything_at_once() {
        let mut stage = MemoryStage::new();
        let mut scheduler = scheduler(3);
        let now = Instant::now();

        for index in 0..3 {
            scheduler
                .popup(&mut stage, now + ms(index), "message", PopupOptions::new())
                .expect("popup succeeds");
        }
        scheduler.advance(&mut stage, now + ms(25));
        scheduler.clear(&mut stage);

        assert!(scheduler.is_empty());
        assert_eq!(stage.element_count(), 0);
        assert_eq!(scheduler.pending_transitions(), 0);
    }
}
