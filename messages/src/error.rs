use serde::{Deserialize, Serialize};
use thiserror::Error;

#[macro_export]
macro_rules! bail {
    ($e:expr) => {
        return Err($e);
    };
}

#[macro_export(local_inner_macros)]
macro_rules! ensure {
    ($cond:expr, $e:expr) => {
        if !($cond) {
            bail!($e);
        }
    };
}

pub type MessageResult<T> = Result<T, MessageError>;

#[derive(Debug, Error)]
pub enum MessageError {
    #[error("Event record is missing its identity fields")]
    MalformedEvent,

    #[error("Log does not decode against the event signature '{0}'")]
    DecodeMismatch(String),
}

pub type LedgerResult<T> = Result<T, LedgerError>;

/// Failures reported by the ledger itself. They travel inside replies,
/// so they must be serializable.
#[derive(Clone, Debug, Error, Serialize, Deserialize)]
pub enum LedgerError {
    #[error("No observation available")]
    NoObservationAvailable,

    #[error("The ledger rejected the submission: {0}")]
    SubmissionRejected(String),
}
