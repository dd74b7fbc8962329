use crate::dedup::EventDeduplicator;
use crate::error::{ObserverError, ObserverResult};
use crate::ledger::LedgerClient;
use crate::watermark::Watermark;
use config::Parameters;
use log::{info, warn};
use messages::error::LedgerError;
use messages::events::{EventRecord, ObservationEvent, Snapshot};
use tokio::sync::mpsc::Sender;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio::time::{sleep, Duration, Instant};

#[cfg(test)]
#[path = "tests/poller_tests.rs"]
pub mod poller_tests;

/// A change detected on the ledger, delivered to the caller-supplied
/// sink. The event-sourced and snapshot-sourced paths are deliberately
/// redundant: both may report the same underlying ledger change, and no
/// cross-deduplication is performed between them.
#[derive(Debug)]
pub enum ChangeNotification {
    /// A new aggregation event found by the window scan. Carries the
    /// provenance (transaction identity) the snapshot path lacks.
    EventSourced(ObservationEvent),
    /// The ledger's last observation advanced past the watermark.
    SnapshotSourced(Snapshot),
    /// A poll cycle failed; the loop continues and retries on the next
    /// cycle.
    PollFailed(ObserverError),
}

/// Continuously reconciles two independent, lossy views of the ledger
/// (a sliding-window event-log scan and a periodic state read) into a
/// single deduplicated stream of change notifications.
pub struct Poller<Client> {
    /// The client used to query the ledger node.
    client: Client,
    /// The poll interval and window lookback.
    parameters: Parameters,
    /// Rejects events already reported.
    deduplicator: EventDeduplicator,
    /// Tracks the highest observation block already reported.
    watermark: Watermark,
    /// Output channel delivering change notifications.
    tx_change: Sender<ChangeNotification>,
}

impl<Client: LedgerClient + Sync + 'static> Poller<Client> {
    /// Spawn a new poller task. The task stops (between cycles) when
    /// the shutdown signal fires; no cycle failure ever terminates it.
    pub fn spawn(
        client: Client,
        parameters: Parameters,
        tx_change: Sender<ChangeNotification>,
        rx_shutdown: oneshot::Receiver<()>,
    ) -> JoinHandle<()> {
        tokio::spawn(async move {
            Self::new(client, parameters, tx_change)
                .run(rx_shutdown)
                .await;
        })
    }

    pub fn new(
        client: Client,
        parameters: Parameters,
        tx_change: Sender<ChangeNotification>,
    ) -> Self {
        Self {
            client,
            parameters,
            deduplicator: EventDeduplicator::new(),
            watermark: Watermark::new(),
            tx_change,
        }
    }

    /// Main loop alternating between one poll cycle and a fixed delay.
    async fn run(&mut self, mut rx_shutdown: oneshot::Receiver<()>) {
        let timer = sleep(Duration::from_millis(self.parameters.poll_interval));
        tokio::pin!(timer);

        loop {
            tokio::select! {
                () = &mut timer => {
                    self.poll_once().await;
                    timer
                        .as_mut()
                        .reset(Instant::now() + Duration::from_millis(self.parameters.poll_interval));
                },
                _ = &mut rx_shutdown => break,
            }
        }
    }

    /// Run a single poll cycle. Public so tests can drive cycles
    /// synchronously without timers.
    pub async fn poll_once(&mut self) {
        // Scan the recent window for aggregation events. A failure here
        // skips the snapshot read as well; the next cycle retries.
        let records = match self.scan_window().await {
            Ok(records) => records,
            Err(e) => {
                warn!("Failed to scan the event window: {}", e);
                self.notify(ChangeNotification::PollFailed(e)).await;
                return;
            }
        };
        for event in self.deduplicator.filter_new(records) {
            info!("Detected {:?}", event);
            self.notify(ChangeNotification::EventSourced(event)).await;
        }

        // Independently read the last observation to catch updates
        // whose events fell outside the window.
        match self.client.last_observation().await {
            Ok(snapshot) => {
                if let Some(snapshot) = self.watermark.observe(snapshot) {
                    info!("Detected {:?}", snapshot);
                    self.notify(ChangeNotification::SnapshotSourced(snapshot))
                        .await;
                }
            }
            // Expected before the first aggregation or after retention
            // expiry; not a poll failure.
            Err(ObserverError::LedgerError(LedgerError::NoObservationAvailable)) => (),
            Err(e) => {
                warn!("Failed to read the last observation: {}", e);
                self.notify(ChangeNotification::PollFailed(e)).await;
            }
        }
    }

    /// Query the events emitted in the recent block window. The window
    /// range is derived from the chain height, so the height read
    /// happens before the log query.
    async fn scan_window(&mut self) -> ObserverResult<Vec<EventRecord>> {
        let height = self.client.current_height().await?;
        let from = height.saturating_sub(self.parameters.lookback);
        self.client.observation_events(from, height).await
    }

    async fn notify(&self, notification: ChangeNotification) {
        self.tx_change
            .send(notification)
            .await
            .expect("Failed to deliver change notification");
    }
}
