use anyhow::{Context, Result};
use clap::{arg, crate_name, crate_version, App, AppSettings, ArgMatches};
use config::{Import, Parameters};
use env_logger::Env;
use messages::error::LedgerError;
use messages::receipt::OBSERVATION_SUBMITTED;
use observer::error::ObserverError;
use observer::ledger::{LedgerClient, RemoteLedger};
use observer::poller::{ChangeNotification, Poller};
use observer::resolver::{resolve, SubmissionOutcome};
use rand::Rng;
use std::net::SocketAddr;
use tokio::sync::mpsc::channel;
use tokio::sync::oneshot;

/// The capacity of the change notification channel.
const CHANNEL_CAPACITY: usize = 1_000;

#[tokio::main]
async fn main() -> Result<()> {
    // Read the cli parameters.
    let matches = App::new(crate_name!())
        .version(crate_version!())
        .about("Change-aware observer for a threshold oracle ledger.")
        .arg(arg!(-v... "Sets the level of verbosity"))
        .subcommand(
            App::new("poll")
                .about("Continuously surface ledger state changes")
                .args(&[
                    arg!(--node <ADDR> "The network address of the ledger node"),
                    arg!(--parameters [FILE] "The path to the poller parameters file"),
                ]),
        )
        .subcommand(
            App::new("query")
                .about("Print the ledger's last observation")
                .arg(arg!(--node <ADDR> "The network address of the ledger node")),
        )
        .subcommand(
            App::new("submit")
                .about("Submit an observation value to the ledger")
                .args(&[
                    arg!(--node <ADDR> "The network address of the ledger node"),
                    arg!(--value [INT] "The observation value (defaults to random)"),
                ]),
        )
        .setting(AppSettings::ArgRequiredElseHelp)
        .get_matches();

    // Configure the logger.
    let log_level = match matches.occurrences_of("v") {
        0 => "error",
        1 => "warn",
        2 => "info",
        3 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level))
        .format_timestamp_millis()
        .init();

    // Parse the input parameters.
    match matches.subcommand() {
        Some(("poll", sub_matches)) => poll(sub_matches)
            .await
            .context("Failed to run the poller")?,
        Some(("query", sub_matches)) => query(sub_matches)
            .await
            .context("Failed to query the ledger")?,
        Some(("submit", sub_matches)) => submit(sub_matches)
            .await
            .context("Failed to submit an observation")?,
        _ => unreachable!(),
    }
    Ok(())
}

/// Parse the ledger node address from the cli.
fn node_address(matches: &ArgMatches) -> Result<SocketAddr> {
    matches
        .value_of("node")
        .unwrap()
        .parse()
        .context("The node address is malformed")
}

/// Run the poller until the process is killed, printing every change
/// notification to the console.
async fn poll(matches: &ArgMatches) -> Result<()> {
    let address = node_address(matches)?;
    let parameters = match matches.value_of("parameters") {
        Some(path) => Parameters::import(path).context("Failed to load poller parameters")?,
        None => Parameters::default(),
    };
    parameters.log();

    let (tx_change, mut rx_change) = channel(CHANNEL_CAPACITY);
    let (_tx_shutdown, rx_shutdown) = oneshot::channel();
    Poller::spawn(RemoteLedger::new(address), parameters, tx_change, rx_shutdown);

    println!("Polling ledger node at {} for changes...", address);
    while let Some(notification) = rx_change.recv().await {
        match notification {
            ChangeNotification::EventSourced(event) => {
                println!("Observation event (from log scan):");
                println!("  - Value: {}", event.value);
                println!("  - Block: {}", event.block);
                println!("  - Tx: {}", event.identity.digest);
                println!("  - Block number: {}", event.block_number);
            }
            ChangeNotification::SnapshotSourced(snapshot) => {
                println!("Last observation updated (from state read):");
                println!("  - Value: {}", snapshot.value);
                println!("  - Block: {}", snapshot.block);
            }
            ChangeNotification::PollFailed(e) => {
                println!("Polling error: {}", e);
            }
        }
    }
    Ok(())
}

/// Print the ledger's last observation (if any).
async fn query(matches: &ArgMatches) -> Result<()> {
    let address = node_address(matches)?;
    let mut client = RemoteLedger::new(address);
    match client.last_observation().await {
        Ok(snapshot) => {
            println!("Last observation: {}", snapshot.value);
            println!("Last update at:   {}", snapshot.block);
        }
        Err(ObserverError::LedgerError(LedgerError::NoObservationAvailable)) => {
            println!("No last observation available.");
        }
        Err(e) => return Err(e).context("Failed to read the last observation"),
    }
    Ok(())
}

/// Submit an observation value and classify the outcome from the
/// transaction receipt.
async fn submit(matches: &ArgMatches) -> Result<()> {
    let address = node_address(matches)?;
    let value = match matches.value_of("value") {
        Some(x) => x
            .parse::<u128>()
            .context("The observation value must be a non-negative integer")?,
        None => rand::thread_rng().gen_range(0, 1_000_000),
    };

    println!("Submitting observation: {}", value);
    let mut client = RemoteLedger::new(address);
    let receipt = client.submit_observation(value).await?;
    println!("Transaction {} confirmed in block {}", receipt.digest, receipt.block_number);

    match resolve(&receipt, OBSERVATION_SUBMITTED) {
        SubmissionOutcome::Aggregated { value, block } => {
            println!("Observation aggregated and recorded!");
            println!("  - Aggregated value: {}", value);
            println!("  - Block: {}", block);
        }
        SubmissionOutcome::Pending => {
            println!("Observation added to the pending queue (threshold not yet reached)");
        }
    }
    Ok(())
}
