pub mod dedup;
pub mod error;
pub mod ledger;
pub mod poller;
pub mod resolver;
pub mod watermark;
