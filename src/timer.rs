// SPDX-License-Identifier: MPL-2.0
//! Deferred-action scheduling.
//!
//! All waiting in this crate is expressed as actions scheduled on a
//! [`Timeline`] and drained by the host calling [`Timeline::advance`] with
//! the current instant. Nothing blocks, and nothing reads the wall clock
//! behind the caller's back, which keeps every lifecycle test deterministic.
//!
//! Tokens are generational: cancelling an already-fired or already-cancelled
//! timer is a no-op, and a token can never cancel a timer that later reused
//! its slot.

use std::time::{Duration, Instant};

use crate::error::{Error, Result};

// ============================================================================
// Human-readable delays
// ============================================================================

/// Unit for human-readable delay construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeUnit {
    Millis,
    Secs,
    Mins,
    Hours,
}

impl TimeUnit {
    fn millis_per_unit(self) -> f64 {
        match self {
            TimeUnit::Millis => 1.0,
            TimeUnit::Secs => 1_000.0,
            TimeUnit::Mins => 60_000.0,
            TimeUnit::Hours => 3_600_000.0,
        }
    }
}

/// Converts a value in the given unit to a [`Duration`].
///
/// The canonical time unit throughout this crate is the `Duration` itself;
/// this helper only exists for call sites that read better as
/// `delay(1.5, TimeUnit::Secs)`. Non-finite and non-positive values are
/// rejected.
pub fn delay(value: f64, unit: TimeUnit) -> Result<Duration> {
    let millis = value * unit.millis_per_unit();
    if !millis.is_finite() || millis <= 0.0 {
        return Err(Error::Config(format!(
            "delay must be a positive finite value, got {value}"
        )));
    }
    let secs = millis / 1_000.0;
    if secs > u64::MAX as f64 {
        return Err(Error::Config(format!("delay out of range: {value}")));
    }
    Ok(Duration::from_secs_f64(secs))
}

// ============================================================================
// Timeline
// ============================================================================

/// Handle to one scheduled action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerToken {
    slot: usize,
    generation: u32,
}

/// Cancellation seam for collaborators that hold [`TimerToken`]s without
/// knowing the timeline's action type.
pub trait TimerHost {
    /// Cancels a scheduled action. Idempotent; returns whether a live timer
    /// was cancelled.
    fn cancel_timer(&mut self, token: TimerToken) -> bool;
}

#[derive(Debug)]
struct Scheduled<A> {
    deadline: Instant,
    period: Option<Duration>,
    action: A,
    seq: u64,
}

#[derive(Debug)]
struct Slot<A> {
    generation: u32,
    scheduled: Option<Scheduled<A>>,
}

/// Deadline-ordered scheduler of domain actions.
#[derive(Debug)]
pub struct Timeline<A> {
    slots: Vec<Slot<A>>,
    free: Vec<usize>,
    next_seq: u64,
}

impl<A> Default for Timeline<A> {
    fn default() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
            next_seq: 0,
        }
    }
}

impl<A> Timeline<A> {
    /// Creates an empty timeline.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn insert(&mut self, scheduled: Scheduled<A>) -> TimerToken {
        if let Some(slot) = self.free.pop() {
            let entry = &mut self.slots[slot];
            entry.scheduled = Some(scheduled);
            TimerToken {
                slot,
                generation: entry.generation,
            }
        } else {
            self.slots.push(Slot {
                generation: 0,
                scheduled: Some(scheduled),
            });
            TimerToken {
                slot: self.slots.len() - 1,
                generation: 0,
            }
        }
    }

    fn next_seq(&mut self) -> u64 {
        let seq = self.next_seq;
        self.next_seq += 1;
        seq
    }

    /// Schedules `action` to fire once, `after` from `now`.
    pub fn schedule_after(&mut self, now: Instant, after: Duration, action: A) -> TimerToken {
        let seq = self.next_seq();
        self.insert(Scheduled {
            deadline: now + after,
            period: None,
            action,
            seq,
        })
    }

    /// Schedules `action` to fire every `period`, first firing one period
    /// from `now`.
    ///
    /// A slow host that advances past several periods at once gets a single
    /// firing; missed periods are skipped, not replayed.
    pub fn schedule_every(&mut self, now: Instant, period: Duration, action: A) -> TimerToken {
        let seq = self.next_seq();
        self.insert(Scheduled {
            deadline: now + period,
            period: Some(period),
            action,
            seq,
        })
    }

    /// Whether the token still refers to a pending timer.
    #[must_use]
    pub fn is_scheduled(&self, token: TimerToken) -> bool {
        self.slots
            .get(token.slot)
            .is_some_and(|slot| slot.generation == token.generation && slot.scheduled.is_some())
    }

    /// Number of pending timers.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.slots
            .iter()
            .filter(|slot| slot.scheduled.is_some())
            .count()
    }

    fn release(&mut self, slot: usize) {
        let entry = &mut self.slots[slot];
        entry.scheduled = None;
        entry.generation = entry.generation.wrapping_add(1);
        self.free.push(slot);
    }
}

impl<A: Clone> Timeline<A> {
    /// Drains every action whose deadline has passed, in deadline order
    /// (ties broken by scheduling order).
    ///
    /// One-shot timers are freed; repeating timers are re-armed at
    /// `now + period`.
    pub fn advance(&mut self, now: Instant) -> Vec<A> {
        let mut due: Vec<(Instant, u64, usize)> = self
            .slots
            .iter()
            .enumerate()
            .filter_map(|(index, slot)| {
                let scheduled = slot.scheduled.as_ref()?;
                (scheduled.deadline <= now).then_some((scheduled.deadline, scheduled.seq, index))
            })
            .collect();
        due.sort_unstable_by(|a, b| (a.0, a.1).cmp(&(b.0, b.1)));

        let mut actions = Vec::with_capacity(due.len());
        for (_, _, index) in due {
            let entry = &mut self.slots[index];
            let Some(scheduled) = entry.scheduled.as_mut() else {
                continue;
            };
            match scheduled.period {
                Some(period) => {
                    scheduled.deadline = now + period;
                    actions.push(scheduled.action.clone());
                }
                None => {
                    actions.push(scheduled.action.clone());
                    self.release(index);
                }
            }
        }
        actions
    }
}

impl<A> TimerHost for Timeline<A> {
    fn cancel_timer(&mut self, token: TimerToken) -> bool {
        if !self.is_scheduled(token) {
            return false;
        }
        self.release(token.slot);
        true
    }
}
