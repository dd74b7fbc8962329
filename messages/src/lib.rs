pub mod error;
pub mod events;
pub mod receipt;

use error::LedgerResult;
use events::{BlockNumber, EventRecord, ObservationValue, Snapshot};
use receipt::TransactionReceipt;
use serde::{Deserialize, Serialize};

/// Requests sent by the observer to the ledger node.
#[derive(Serialize, Deserialize, Debug)]
pub enum ObserverToLedgerMessage {
    CurrentHeight,
    ObservationEvents { from: BlockNumber, to: BlockNumber },
    LastObservation,
    SubmitObservation(ObservationValue),
}

/// Replies sent by the ledger node to the observer.
#[derive(Serialize, Deserialize, Debug)]
pub enum LedgerToObserverMessage {
    CurrentHeight(BlockNumber),
    ObservationEvents(Vec<EventRecord>),
    LastObservation(LedgerResult<Snapshot>),
    SubmitReceipt(LedgerResult<TransactionReceipt>),
}
