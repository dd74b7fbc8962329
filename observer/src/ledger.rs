use crate::error::{ObserverError, ObserverResult};
use async_trait::async_trait;
use bytes::Bytes;
use messages::events::{BlockNumber, EventRecord, ObservationValue, Snapshot};
use messages::receipt::TransactionReceipt;
use messages::{LedgerToObserverMessage, ObserverToLedgerMessage};
use network::connection::Connection;
use std::net::SocketAddr;

/// The ledger operations the observer consumes. The ledger's internal
/// aggregation rules are opaque; only these call/return shapes matter.
#[async_trait]
pub trait LedgerClient: Send {
    /// Read the current chain height.
    async fn current_height(&mut self) -> ObserverResult<BlockNumber>;

    /// Query the aggregation events emitted in the inclusive block
    /// range `[from, to]`. Returns raw records; validation is the
    /// caller's concern.
    async fn observation_events(
        &mut self,
        from: BlockNumber,
        to: BlockNumber,
    ) -> ObserverResult<Vec<EventRecord>>;

    /// Read the ledger's last recorded observation.
    async fn last_observation(&mut self) -> ObserverResult<Snapshot>;

    /// Submit an observation value and wait for the transaction
    /// receipt.
    async fn submit_observation(
        &mut self,
        value: ObservationValue,
    ) -> ObserverResult<TransactionReceipt>;
}

/// A ledger client backed by a framed TCP connection to a ledger node.
pub struct RemoteLedger {
    /// The connection to the ledger node.
    connection: Connection,
}

impl RemoteLedger {
    pub fn new(address: SocketAddr) -> Self {
        Self {
            connection: Connection::new(address),
        }
    }

    /// Send a request to the ledger node and deserialize its reply.
    async fn request(
        &mut self,
        request: ObserverToLedgerMessage,
    ) -> ObserverResult<LedgerToObserverMessage> {
        let serialized = bincode::serialize(&request).expect("Failed to serialize request");
        let reply = self.connection.request(Bytes::from(serialized)).await?;
        bincode::deserialize(&reply).map_err(|_| ObserverError::UnexpectedReply)
    }
}

#[async_trait]
impl LedgerClient for RemoteLedger {
    async fn current_height(&mut self) -> ObserverResult<BlockNumber> {
        match self.request(ObserverToLedgerMessage::CurrentHeight).await? {
            LedgerToObserverMessage::CurrentHeight(height) => Ok(height),
            _ => Err(ObserverError::UnexpectedReply),
        }
    }

    async fn observation_events(
        &mut self,
        from: BlockNumber,
        to: BlockNumber,
    ) -> ObserverResult<Vec<EventRecord>> {
        let request = ObserverToLedgerMessage::ObservationEvents { from, to };
        match self.request(request).await? {
            LedgerToObserverMessage::ObservationEvents(records) => Ok(records),
            _ => Err(ObserverError::UnexpectedReply),
        }
    }

    async fn last_observation(&mut self) -> ObserverResult<Snapshot> {
        match self.request(ObserverToLedgerMessage::LastObservation).await? {
            LedgerToObserverMessage::LastObservation(result) => Ok(result?),
            _ => Err(ObserverError::UnexpectedReply),
        }
    }

    async fn submit_observation(
        &mut self,
        value: ObservationValue,
    ) -> ObserverResult<TransactionReceipt> {
        let request = ObserverToLedgerMessage::SubmitObservation(value);
        match self.request(request).await? {
            LedgerToObserverMessage::SubmitReceipt(result) => Ok(result?),
            _ => Err(ObserverError::UnexpectedReply),
        }
    }
}
