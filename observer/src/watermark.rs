use messages::events::{BlockNumber, Snapshot};

#[cfg(test)]
#[path = "tests/watermark_tests.rs"]
pub mod watermark_tests;

/// Tracks the highest observation block already reported through the
/// state-snapshot path.
pub struct Watermark {
    /// The block of the last reported observation.
    last_observation_block: BlockNumber,
}

impl Watermark {
    pub fn new() -> Self {
        Self {
            last_observation_block: 0,
        }
    }

    /// Report a freshly read snapshot if it carries new information.
    /// The comparison is strictly greater-than: re-reading the same
    /// block is a no-op, and the watermark never regresses.
    pub fn observe(&mut self, snapshot: Snapshot) -> Option<Snapshot> {
        if snapshot.block > self.last_observation_block {
            self.last_observation_block = snapshot.block;
            Some(snapshot)
        } else {
            None
        }
    }
}

impl Default for Watermark {
    fn default() -> Self {
        Self::new()
    }
}
