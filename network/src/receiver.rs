use async_trait::async_trait;
use bytes::Bytes;
use futures::stream::{SplitSink, StreamExt as _};
use log::{debug, info, warn};
use std::error::Error;
use std::net::SocketAddr;
use tokio::net::{TcpListener, TcpStream};
use tokio_util::codec::{Framed, LengthDelimitedCodec};

/// Convenient alias for the writer end of the framed transport.
pub type Writer = SplitSink<Framed<TcpStream, LengthDelimitedCodec>, Bytes>;

/// Defines how to handle an incoming message. A handler is cloned for
/// every incoming connection.
#[async_trait]
pub trait MessageHandler: Clone + Send + Sync + 'static {
    /// Process one message and possibly reply through the writer.
    async fn dispatch(&self, writer: &mut Writer, message: Bytes) -> Result<(), Box<dyn Error>>;
}

/// Listens for incoming TCP connections and dispatches every framed
/// message to the provided handler.
pub struct Receiver<Handler: MessageHandler> {
    /// The address to listen on.
    address: SocketAddr,
    /// The handler processing incoming messages.
    handler: Handler,
}

impl<Handler: MessageHandler> Receiver<Handler> {
    /// Spawn a new network receiver task.
    pub fn spawn(address: SocketAddr, handler: Handler) {
        tokio::spawn(async move {
            Self { address, handler }.run().await;
        });
    }

    /// Main loop accepting incoming connections.
    async fn run(&self) {
        let listener = TcpListener::bind(&self.address)
            .await
            .expect("Failed to bind TCP address");

        debug!("Listening on {}", self.address);
        loop {
            let (socket, peer) = match listener.accept().await {
                Ok(value) => value,
                Err(e) => {
                    warn!("Failed to accept connection: {}", e);
                    continue;
                }
            };
            info!("Incoming connection established with {}", peer);
            Self::spawn_runner(socket, peer, self.handler.clone());
        }
    }

    /// Spawn a new runner to handle a specific TCP connection. It
    /// receives messages and processes them using the provided handler.
    fn spawn_runner(socket: TcpStream, peer: SocketAddr, handler: Handler) {
        tokio::spawn(async move {
            let transport = Framed::new(socket, LengthDelimitedCodec::new());
            let (mut writer, mut reader) = transport.split();
            while let Some(frame) = reader.next().await {
                match frame {
                    Ok(message) => {
                        if let Err(e) = handler.dispatch(&mut writer, message.freeze()).await {
                            warn!("{}", e);
                            break;
                        }
                    }
                    Err(e) => {
                        warn!("{}", e);
                        break;
                    }
                }
            }
            debug!("Connection closed by peer {}", peer);
        });
    }
}
