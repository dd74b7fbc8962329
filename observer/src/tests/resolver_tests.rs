use super::*;
use messages::receipt::{LogEntry, OBSERVATION_SUBMITTED};
use messages::events::TransactionDigest;

// Test receipt carrying the provided logs.
fn receipt(logs: Vec<LogEntry>) -> TransactionReceipt {
    TransactionReceipt {
        digest: TransactionDigest([1; 32]),
        block_number: 100,
        logs,
    }
}

#[test]
fn aggregated_submission() {
    let receipt = receipt(vec![LogEntry::observation_submitted(42, 100)]);
    let outcome = resolve(&receipt, OBSERVATION_SUBMITTED);
    assert_eq!(
        outcome,
        SubmissionOutcome::Aggregated {
            value: 42,
            block: 100
        }
    );
}

#[test]
fn pending_submission() {
    let receipt = receipt(Vec::new());
    assert_eq!(resolve(&receipt, OBSERVATION_SUBMITTED), SubmissionOutcome::Pending);
}

#[test]
fn foreign_logs_are_skipped() {
    let receipt = receipt(vec![
        LogEntry {
            signature: "Transfer".to_string(),
            data: vec![0, 1, 2],
        },
        LogEntry::observation_submitted(42, 100),
    ]);
    assert_eq!(
        resolve(&receipt, OBSERVATION_SUBMITTED),
        SubmissionOutcome::Aggregated {
            value: 42,
            block: 100
        }
    );
}

#[test]
fn only_foreign_logs_is_pending() {
    let receipt = receipt(vec![LogEntry {
        signature: "Transfer".to_string(),
        data: vec![0, 1, 2],
    }]);
    assert_eq!(resolve(&receipt, OBSERVATION_SUBMITTED), SubmissionOutcome::Pending);
}
