use messages::events::{BlockNumber, ObservationValue};
use messages::receipt::TransactionReceipt;

#[cfg(test)]
#[path = "tests/resolver_tests.rs"]
pub mod resolver_tests;

/// The classified outcome of a single observation submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionOutcome {
    /// The submission tipped the ledger over its threshold and an
    /// aggregated observation was recorded.
    Aggregated {
        value: ObservationValue,
        block: BlockNumber,
    },
    /// The submission was accepted but queued below the threshold.
    /// This is a normal outcome, not an error.
    Pending,
}

/// Classify the outcome of one submission from its receipt. The receipt
/// is assumed final (already mined and confirmed by the caller). Scans
/// the logs in order; the first log decoding against the expected event
/// signature wins, and logs belonging to unrelated events are skipped.
pub fn resolve(receipt: &TransactionReceipt, expected_signature: &str) -> SubmissionOutcome {
    receipt
        .logs
        .iter()
        .find_map(|log| log.decode(expected_signature).ok())
        .map(|event| SubmissionOutcome::Aggregated {
            value: event.value,
            block: event.block,
        })
        .unwrap_or(SubmissionOutcome::Pending)
}
