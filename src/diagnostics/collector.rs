// SPDX-License-Identifier: MPL-2.0
//! Collector for lifecycle events.
//!
//! Events travel over a bounded channel so publishing never blocks the
//! caller; the collector pulls them into a circular buffer on demand.

use crossbeam_channel::{bounded, Receiver, Sender};

use super::{CircularBuffer, DiagnosticEvent, LifecycleEvent};

/// Size of the in-flight event channel.
const EVENT_CHANNEL_CAPACITY: usize = 256;

/// Handle for publishing lifecycle events to the collector.
///
/// Cheap to clone and shareable across threads. Publishing drops the event
/// if the channel is full (backpressure protection).
#[derive(Debug, Clone)]
pub struct DiagnosticsHandle {
    event_tx: Sender<DiagnosticEvent>,
}

impl DiagnosticsHandle {
    /// Records a lifecycle event. Non-blocking.
    pub fn record(&self, kind: LifecycleEvent) {
        let _ = self.event_tx.try_send(DiagnosticEvent::new(kind));
    }
}

/// Central store for lifecycle events.
#[derive(Debug)]
pub struct DiagnosticsCollector {
    buffer: CircularBuffer<DiagnosticEvent>,
    event_rx: Receiver<DiagnosticEvent>,
    event_tx: Sender<DiagnosticEvent>,
}

impl DiagnosticsCollector {
    /// Creates a collector retaining up to `capacity` events.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (event_tx, event_rx) = bounded(EVENT_CHANNEL_CAPACITY);
        Self {
            buffer: CircularBuffer::new(capacity),
            event_rx,
            event_tx,
        }
    }

    /// Creates a publishing handle for this collector.
    #[must_use]
    pub fn handle(&self) -> DiagnosticsHandle {
        DiagnosticsHandle {
            event_tx: self.event_tx.clone(),
        }
    }

    /// Pulls pending events from the channel into the buffer.
    ///
    /// Returns the number of events absorbed.
    pub fn drain(&mut self) -> usize {
        let mut absorbed = 0;
        while let Ok(event) = self.event_rx.try_recv() {
            self.buffer.push(event);
            absorbed += 1;
        }
        absorbed
    }

    /// Iterates the retained events, oldest first.
    pub fn events(&self) -> impl Iterator<Item = &DiagnosticEvent> {
        self.buffer.iter()
    }

    /// Number of retained events.
    #[must_use]
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    /// Whether no events are retained.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Drops all retained events.
    pub fn clear(&mut self) {
        self.buffer.clear();
    }
}
