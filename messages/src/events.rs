use crate::error::{MessageError, MessageResult};
use serde::{Deserialize, Serialize};
use std::convert::TryFrom;

#[cfg(test)]
#[path = "tests/event_tests.rs"]
pub mod event_tests;

/// The height of a block on the ledger.
pub type BlockNumber = u64;

/// The value of an aggregated observation.
pub type ObservationValue = u128;

/// The digest of a ledger transaction.
#[derive(Serialize, Deserialize, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct TransactionDigest(pub [u8; 32]);

impl std::fmt::Display for TransactionDigest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> Result<(), std::fmt::Error> {
        write!(f, "{}", base64::encode(self.0))
    }
}

impl std::fmt::Debug for TransactionDigest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> Result<(), std::fmt::Error> {
        write!(f, "{}", base64::encode(self.0))
    }
}

/// Uniquely identifies one emitted event within the ledger's history
/// (the transaction that emitted it and the log's index within that
/// transaction). Used only as a deduplication key.
#[derive(Serialize, Deserialize, Clone, PartialEq, Eq, Hash)]
pub struct EventIdentity {
    /// The digest of the emitting transaction.
    pub digest: TransactionDigest,
    /// The index of the log within the transaction.
    pub index: u64,
}

impl std::fmt::Debug for EventIdentity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> Result<(), std::fmt::Error> {
        write!(f, "{}-{}", self.digest, self.index)
    }
}

/// An aggregation event as returned by the ledger node's log query.
/// Providers may return partial records, so the identity fields are
/// optional until validated into an `ObservationEvent`.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct EventRecord {
    /// The aggregated observation value.
    pub value: ObservationValue,
    /// The block at which the observation was recorded.
    pub block: BlockNumber,
    /// The block containing the emitting transaction.
    pub block_number: BlockNumber,
    /// The digest of the emitting transaction (if known).
    pub digest: Option<TransactionDigest>,
    /// The index of the log within the transaction (if known).
    pub index: Option<u64>,
}

/// A validated aggregation event as seen through the event-log view.
#[derive(Clone, PartialEq, Eq)]
pub struct ObservationEvent {
    /// The aggregated observation value.
    pub value: ObservationValue,
    /// The block at which the observation was recorded.
    pub block: BlockNumber,
    /// The block containing the emitting transaction.
    pub block_number: BlockNumber,
    /// The identity of the event within the ledger's history.
    pub identity: EventIdentity,
}

impl std::fmt::Debug for ObservationEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> Result<(), std::fmt::Error> {
        write!(f, "{:?}: E{}({})", self.identity, self.block, self.value)
    }
}

impl TryFrom<EventRecord> for ObservationEvent {
    type Error = MessageError;

    /// Validating parse of a loosely-shaped event record.
    fn try_from(record: EventRecord) -> MessageResult<Self> {
        match (record.digest, record.index) {
            (Some(digest), Some(index)) => Ok(Self {
                value: record.value,
                block: record.block,
                block_number: record.block_number,
                identity: EventIdentity { digest, index },
            }),
            _ => Err(MessageError::MalformedEvent),
        }
    }
}

/// The ledger's current last observation as seen through direct state
/// reads. Independent of the event-log view: it may reflect an update
/// whose originating event fell outside the scanned window.
#[derive(Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct Snapshot {
    /// The aggregated observation value.
    pub value: ObservationValue,
    /// The block at which the observation was recorded.
    pub block: BlockNumber,
}

impl std::fmt::Debug for Snapshot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> Result<(), std::fmt::Error> {
        write!(f, "S{}({})", self.block, self.value)
    }
}
