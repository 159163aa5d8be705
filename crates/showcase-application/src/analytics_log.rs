//! Bounded, newest-first analytics log.

use std::collections::VecDeque;

use showcase_core::{AnalyticsEvent, EventCategory, MAX_ANALYTICS_EVENTS};
use tokio::sync::watch;

use crate::published::Published;

/// Append-only event log capped at [`MAX_ANALYTICS_EVENTS`] entries.
///
/// Index 0 is always the newest event. When the cap is exceeded the oldest
/// entry is evicted.
#[derive(Debug, Default)]
pub struct AnalyticsLog {
    events: Published<VecDeque<AnalyticsEvent>>,
}

impl AnalyticsLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self, event: AnalyticsEvent) {
        self.events.modify(|events| {
            events.push_front(event);
            events.truncate(MAX_ANALYTICS_EVENTS);
        });
    }

    /// Shorthand for recording a fresh event.
    pub fn push(&self, category: EventCategory, detail: impl Into<String>) {
        self.record(AnalyticsEvent::new(category, detail));
    }

    pub fn clear(&self) {
        self.events.modify_if(|events| {
            let had_events = !events.is_empty();
            events.clear();
            had_events
        });
    }

    pub fn len(&self) -> usize {
        self.events.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.borrow().is_empty()
    }

    pub fn latest(&self) -> Option<AnalyticsEvent> {
        self.events.borrow().front().cloned()
    }

    /// Copy of the log, newest first.
    pub fn snapshot(&self) -> Vec<AnalyticsEvent> {
        self.events.borrow().iter().cloned().collect()
    }

    pub fn subscribe(&self) -> watch::Receiver<VecDeque<AnalyticsEvent>> {
        self.events.subscribe()
    }
}
