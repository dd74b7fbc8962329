use crate::ensure;
use crate::error::{MessageError, MessageResult};
use crate::events::{BlockNumber, ObservationValue, TransactionDigest};
use serde::{Deserialize, Serialize};

#[cfg(test)]
#[path = "tests/receipt_tests.rs"]
pub mod receipt_tests;

/// The signature of the event emitted when enough submissions
/// accumulate and the ledger records an aggregated observation.
pub const OBSERVATION_SUBMITTED: &str = "ObservationSubmitted";

/// The payload of an `ObservationSubmitted` event.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ObservationSubmitted {
    /// The aggregated observation value.
    pub value: ObservationValue,
    /// The block at which the observation was recorded.
    pub block: BlockNumber,
}

/// One log entry of a transaction receipt.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct LogEntry {
    /// The signature of the event that produced this log.
    pub signature: String,
    /// The event payload.
    pub data: Vec<u8>,
}

impl LogEntry {
    /// Encode an `ObservationSubmitted` event into a log entry.
    pub fn observation_submitted(value: ObservationValue, block: BlockNumber) -> Self {
        let event = ObservationSubmitted { value, block };
        Self {
            signature: OBSERVATION_SUBMITTED.to_string(),
            data: bincode::serialize(&event).expect("Failed to serialize event payload"),
        }
    }

    /// Attempt to decode this log against an expected event signature.
    /// Logs belonging to unrelated events fail to decode; this is
    /// expected during receipt scanning.
    pub fn decode(&self, expected_signature: &str) -> MessageResult<ObservationSubmitted> {
        ensure!(
            self.signature == expected_signature,
            MessageError::DecodeMismatch(self.signature.clone())
        );
        bincode::deserialize(&self.data)
            .map_err(|_| MessageError::DecodeMismatch(self.signature.clone()))
    }
}

/// The receipt of a mined and confirmed ledger transaction.
#[derive(Serialize, Deserialize, Clone)]
pub struct TransactionReceipt {
    /// The digest of the transaction.
    pub digest: TransactionDigest,
    /// The block containing the transaction.
    pub block_number: BlockNumber,
    /// The logs emitted by the transaction.
    pub logs: Vec<LogEntry>,
}

impl std::fmt::Debug for TransactionReceipt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> Result<(), std::fmt::Error> {
        write!(
            f,
            "{}: R{}({} logs)",
            self.digest,
            self.block_number,
            self.logs.len()
        )
    }
}
