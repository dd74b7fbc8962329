use log::debug;
use messages::events::{EventIdentity, EventRecord, ObservationEvent};
use std::collections::HashSet;

#[cfg(test)]
#[path = "tests/dedup_tests.rs"]
pub mod dedup_tests;

/// Filters already-seen events out of window scans. Consecutive scan
/// windows deliberately overlap, so repeated deliveries of the same
/// event are the norm rather than the exception.
pub struct EventDeduplicator {
    /// The identities of all events already reported. Only grows for
    /// the lifetime of the process.
    seen: HashSet<EventIdentity>,
}

impl EventDeduplicator {
    pub fn new() -> Self {
        Self {
            seen: HashSet::new(),
        }
    }

    /// Validate a batch of raw event records and retain only the events
    /// not seen before, preserving their relative order. Accepted
    /// identities are registered immediately so duplicates within the
    /// same batch are also rejected. Malformed records are dropped.
    pub fn filter_new(&mut self, records: Vec<EventRecord>) -> Vec<ObservationEvent> {
        records
            .into_iter()
            .filter_map(|record| match ObservationEvent::try_from(record) {
                Ok(event) => self
                    .seen
                    .insert(event.identity.clone())
                    .then(|| event),
                Err(e) => {
                    debug!("Dropping event record: {}", e);
                    None
                }
            })
            .collect()
    }
}

impl Default for EventDeduplicator {
    fn default() -> Self {
        Self::new()
    }
}
