use std::net::SocketAddr;
use thiserror::Error;

pub type NetworkResult<T> = Result<T, NetworkError>;

#[derive(Debug, Error)]
pub enum NetworkError {
    #[error("Failed to connect to {0}: {1}")]
    FailedToConnect(SocketAddr, std::io::Error),

    #[error("Failed to send message to {0}: {1}")]
    FailedToSendMessage(SocketAddr, std::io::Error),

    #[error("Failed to receive reply from {0}: {1}")]
    FailedToReceiveReply(SocketAddr, std::io::Error),

    #[error("Peer {0} closed the connection")]
    Disconnected(SocketAddr),
}
