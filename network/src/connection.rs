use crate::error::{NetworkError, NetworkResult};
use bytes::Bytes;
use futures::sink::SinkExt as _;
use futures::stream::StreamExt as _;
use log::{debug, warn};
use std::net::SocketAddr;
use tokio::net::TcpStream;
use tokio_util::codec::{Framed, LengthDelimitedCodec};

#[cfg(test)]
#[path = "tests/connection_tests.rs"]
pub mod connection_tests;

/// A request/reply connection to a single peer. The underlying TCP
/// stream is established lazily and re-established on the next request
/// after a failure.
pub struct Connection {
    /// The address of the peer.
    address: SocketAddr,
    /// The framed transport, if currently connected.
    transport: Option<Framed<TcpStream, LengthDelimitedCodec>>,
}

impl Connection {
    pub fn new(address: SocketAddr) -> Self {
        Self {
            address,
            transport: None,
        }
    }

    /// Return the framed transport, connecting first if needed.
    async fn transport(&mut self) -> NetworkResult<&mut Framed<TcpStream, LengthDelimitedCodec>> {
        if self.transport.is_none() {
            let stream = TcpStream::connect(self.address)
                .await
                .map_err(|e| NetworkError::FailedToConnect(self.address, e))?;
            debug!("Outgoing connection established with {}", self.address);
            self.transport = Some(Framed::new(stream, LengthDelimitedCodec::new()));
        }
        Ok(self.transport.as_mut().unwrap())
    }

    /// Send a request and wait for the single matching reply. Any
    /// failure tears down the transport so the next request reconnects.
    pub async fn request(&mut self, message: Bytes) -> NetworkResult<Bytes> {
        let address = self.address;
        let result = async {
            let transport = self.transport().await?;
            transport
                .send(message)
                .await
                .map_err(|e| NetworkError::FailedToSendMessage(address, e))?;
            match transport.next().await {
                Some(Ok(reply)) => Ok(reply.freeze()),
                Some(Err(e)) => Err(NetworkError::FailedToReceiveReply(address, e)),
                None => Err(NetworkError::Disconnected(address)),
            }
        }
        .await;

        if result.is_err() {
            warn!("Resetting connection with {}", address);
            self.transport = None;
        }
        result
    }
}
