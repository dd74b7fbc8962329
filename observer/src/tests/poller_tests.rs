use super::*;
use crate::error::ObserverResult;
use async_trait::async_trait;
use messages::events::BlockNumber;
use messages::receipt::TransactionReceipt;
use network::error::NetworkError;
use std::collections::VecDeque;
use test_utils::record;
use tokio::sync::mpsc::channel;

/// A scripted ledger client replaying canned replies, one per cycle.
struct ScriptedLedger {
    heights: VecDeque<ObserverResult<BlockNumber>>,
    events: VecDeque<ObserverResult<Vec<EventRecord>>>,
    snapshots: VecDeque<ObserverResult<Snapshot>>,
}

#[async_trait]
impl LedgerClient for ScriptedLedger {
    async fn current_height(&mut self) -> ObserverResult<BlockNumber> {
        self.heights.pop_front().expect("Unscripted height read")
    }

    async fn observation_events(
        &mut self,
        _from: BlockNumber,
        _to: BlockNumber,
    ) -> ObserverResult<Vec<EventRecord>> {
        self.events.pop_front().expect("Unscripted event query")
    }

    async fn last_observation(&mut self) -> ObserverResult<Snapshot> {
        self.snapshots.pop_front().expect("Unscripted snapshot read")
    }

    async fn submit_observation(&mut self, _value: u128) -> ObserverResult<TransactionReceipt> {
        panic!("The poller never submits observations")
    }
}

fn transport_error() -> ObserverError {
    ObserverError::NetworkError(NetworkError::Disconnected("127.0.0.1:0".parse().unwrap()))
}

fn no_observation() -> ObserverError {
    ObserverError::LedgerError(LedgerError::NoObservationAvailable)
}

#[tokio::test]
async fn overlapping_cycles_report_events_once() {
    let client = ScriptedLedger {
        heights: [Ok(100), Ok(101)].into_iter().collect(),
        events: [
            Ok(vec![record(1), record(2)]),
            // The second window overlaps the first by one event.
            Ok(vec![record(2), record(3)]),
        ]
        .into_iter()
        .collect(),
        snapshots: [Err(no_observation()), Err(no_observation())]
            .into_iter()
            .collect(),
    };

    let (tx_change, mut rx_change) = channel(100);
    let mut poller = Poller::new(client, Parameters::default(), tx_change);
    poller.poll_once().await;
    poller.poll_once().await;

    let mut values = Vec::new();
    while let Ok(notification) = rx_change.try_recv() {
        match notification {
            ChangeNotification::EventSourced(event) => values.push(event.value),
            notification => panic!("Unexpected notification: {:?}", notification),
        }
    }
    assert_eq!(values, vec![1, 2, 3]);
}

#[tokio::test]
async fn snapshot_changes_are_monotonic() {
    let client = ScriptedLedger {
        heights: [Ok(100), Ok(101), Ok(102), Ok(103)].into_iter().collect(),
        events: (0..4).map(|_| Ok(Vec::new())).collect(),
        snapshots: [
            Ok(Snapshot { value: 7, block: 50 }),
            Ok(Snapshot { value: 7, block: 50 }),
            Ok(Snapshot { value: 9, block: 40 }),
            Ok(Snapshot { value: 9, block: 51 }),
        ]
        .into_iter()
        .collect(),
    };

    let (tx_change, mut rx_change) = channel(100);
    let mut poller = Poller::new(client, Parameters::default(), tx_change);
    for _ in 0..4 {
        poller.poll_once().await;
    }

    let mut snapshots = Vec::new();
    while let Ok(notification) = rx_change.try_recv() {
        match notification {
            ChangeNotification::SnapshotSourced(snapshot) => snapshots.push(snapshot),
            notification => panic!("Unexpected notification: {:?}", notification),
        }
    }
    assert_eq!(
        snapshots,
        vec![
            Snapshot { value: 7, block: 50 },
            Snapshot { value: 9, block: 51 }
        ]
    );
}

#[tokio::test]
async fn height_failure_skips_the_cycle() {
    // The snapshot script is empty: reading it would panic, so this
    // test also checks the snapshot path is skipped.
    let client = ScriptedLedger {
        heights: [Err(transport_error())].into_iter().collect(),
        events: VecDeque::new(),
        snapshots: VecDeque::new(),
    };

    let (tx_change, mut rx_change) = channel(100);
    let mut poller = Poller::new(client, Parameters::default(), tx_change);
    poller.poll_once().await;

    assert!(matches!(
        rx_change.try_recv(),
        Ok(ChangeNotification::PollFailed(_))
    ));
    assert!(rx_change.try_recv().is_err());
}

#[tokio::test]
async fn missing_observation_is_suppressed() {
    let client = ScriptedLedger {
        heights: [Ok(100)].into_iter().collect(),
        events: [Ok(Vec::new())].into_iter().collect(),
        snapshots: [Err(no_observation())].into_iter().collect(),
    };

    let (tx_change, mut rx_change) = channel(100);
    let mut poller = Poller::new(client, Parameters::default(), tx_change);
    poller.poll_once().await;

    assert!(rx_change.try_recv().is_err());
}

#[tokio::test]
async fn snapshot_transport_failure_is_surfaced() {
    let client = ScriptedLedger {
        heights: [Ok(100)].into_iter().collect(),
        events: [Ok(Vec::new())].into_iter().collect(),
        snapshots: [Err(transport_error())].into_iter().collect(),
    };

    let (tx_change, mut rx_change) = channel(100);
    let mut poller = Poller::new(client, Parameters::default(), tx_change);
    poller.poll_once().await;

    assert!(matches!(
        rx_change.try_recv(),
        Ok(ChangeNotification::PollFailed(_))
    ));
}
