use async_trait::async_trait;
use bytes::Bytes;
use futures::sink::SinkExt as _;
use messages::error::LedgerError;
use messages::events::{EventRecord, ObservationValue, Snapshot, TransactionDigest};
use messages::receipt::{LogEntry, TransactionReceipt};
use messages::{LedgerToObserverMessage, ObserverToLedgerMessage};
use network::receiver::{MessageHandler, Receiver, Writer};
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use std::error::Error;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

/// Test event record with a distinct identity derived from the seed.
pub fn record(seed: u8) -> EventRecord {
    EventRecord {
        value: seed as u128,
        block: seed as u64,
        block_number: seed as u64,
        digest: Some(TransactionDigest([seed; 32])),
        index: Some(0),
    }
}

/// The mutable state of a test ledger node.
struct LedgerState {
    /// The current chain height.
    height: u64,
    /// The number of pending submissions triggering an aggregation.
    threshold: usize,
    /// The submissions queued below the threshold.
    pending: Vec<ObservationValue>,
    /// The last recorded observation.
    last: Option<Snapshot>,
    /// All aggregation events emitted so far.
    events: Vec<EventRecord>,
    /// Deterministic source of transaction digests.
    rng: StdRng,
}

/// An in-process ledger node emulating the observable behavior of the
/// threshold oracle: submissions queue up until the threshold is
/// reached, then an aggregated observation is recorded and an
/// `ObservationSubmitted` event is emitted. Every submission mines one
/// block.
#[derive(Clone)]
pub struct LedgerNode {
    state: Arc<Mutex<LedgerState>>,
}

impl LedgerNode {
    pub fn new(threshold: usize) -> Self {
        Self {
            state: Arc::new(Mutex::new(LedgerState {
                height: 0,
                threshold,
                pending: Vec::new(),
                last: None,
                events: Vec::new(),
                rng: StdRng::from_seed([0; 32]),
            })),
        }
    }

    /// Spawn a test ledger node listening on the given address.
    pub fn spawn(address: SocketAddr, threshold: usize) -> Self {
        let node = Self::new(threshold);
        Receiver::spawn(address, node.clone());
        node
    }

    /// Process one request against the ledger state.
    fn handle(&self, request: ObserverToLedgerMessage) -> LedgerToObserverMessage {
        let mut state = self.state.lock().unwrap();
        match request {
            ObserverToLedgerMessage::CurrentHeight => {
                LedgerToObserverMessage::CurrentHeight(state.height)
            }
            ObserverToLedgerMessage::ObservationEvents { from, to } => {
                let records = state
                    .events
                    .iter()
                    .filter(|record| from <= record.block_number && record.block_number <= to)
                    .cloned()
                    .collect();
                LedgerToObserverMessage::ObservationEvents(records)
            }
            ObserverToLedgerMessage::LastObservation => LedgerToObserverMessage::LastObservation(
                state.last.ok_or(LedgerError::NoObservationAvailable),
            ),
            ObserverToLedgerMessage::SubmitObservation(value) => {
                // Mine one block per submission.
                state.height += 1;
                let block_number = state.height;

                let mut digest = [0; 32];
                state.rng.fill_bytes(&mut digest);
                let digest = TransactionDigest(digest);

                state.pending.push(value);
                let logs = if state.pending.len() >= state.threshold {
                    // Aggregate the pending values (the aggregation
                    // rule itself is irrelevant to the tests; only the
                    // emitted shapes matter).
                    let sum: ObservationValue = state.pending.iter().sum();
                    let aggregate = sum / state.pending.len() as ObservationValue;
                    state.pending.clear();

                    state.last = Some(Snapshot {
                        value: aggregate,
                        block: block_number,
                    });
                    state.events.push(EventRecord {
                        value: aggregate,
                        block: block_number,
                        block_number,
                        digest: Some(digest),
                        index: Some(0),
                    });
                    vec![LogEntry::observation_submitted(aggregate, block_number)]
                } else {
                    Vec::new()
                };

                LedgerToObserverMessage::SubmitReceipt(Ok(TransactionReceipt {
                    digest,
                    block_number,
                    logs,
                }))
            }
        }
    }

    /// The current chain height (test assertions).
    pub fn height(&self) -> u64 {
        self.state.lock().unwrap().height
    }
}

#[async_trait]
impl MessageHandler for LedgerNode {
    async fn dispatch(&self, writer: &mut Writer, message: Bytes) -> Result<(), Box<dyn Error>> {
        let request = bincode::deserialize(&message)?;
        let reply = self.handle(request);
        let serialized = bincode::serialize(&reply)?;
        writer.send(Bytes::from(serialized)).await?;
        Ok(())
    }
}
