use messages::error::LedgerError;
use network::error::NetworkError;
use thiserror::Error;

pub type ObserverResult<T> = Result<T, ObserverError>;

#[derive(Debug, Error)]
pub enum ObserverError {
    #[error(transparent)]
    NetworkError(#[from] NetworkError),

    #[error("Ledger reported: {0}")]
    LedgerError(#[from] LedgerError),

    #[error("Received an unexpected reply from the ledger node")]
    UnexpectedReply,
}
