use super::*;
use crate::receiver::{MessageHandler, Receiver, Writer};
use async_trait::async_trait;
use futures::sink::SinkExt as _;
use std::error::Error;

/// A test handler echoing every message back to the sender.
#[derive(Clone)]
struct EchoHandler;

#[async_trait]
impl MessageHandler for EchoHandler {
    async fn dispatch(&self, writer: &mut Writer, message: Bytes) -> Result<(), Box<dyn Error>> {
        writer.send(message).await?;
        Ok(())
    }
}

#[tokio::test]
async fn request_reply() {
    let address: SocketAddr = "127.0.0.1:6100".parse().unwrap();
    Receiver::spawn(address, EchoHandler);
    tokio::task::yield_now().await;

    let mut connection = Connection::new(address);
    let reply = connection.request(Bytes::from("hello")).await.unwrap();
    assert_eq!(reply, Bytes::from("hello"));

    // The connection is reused across requests.
    let reply = connection.request(Bytes::from("again")).await.unwrap();
    assert_eq!(reply, Bytes::from("again"));
}

#[tokio::test]
async fn connect_failure() {
    // Nothing listens on this port.
    let address: SocketAddr = "127.0.0.1:6200".parse().unwrap();
    let mut connection = Connection::new(address);
    assert!(connection.request(Bytes::from("hello")).await.is_err());
}
