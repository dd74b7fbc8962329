use log::info;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fs;
use thiserror::Error;

#[cfg(test)]
#[path = "tests/config_tests.rs"]
pub mod config_tests;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{file}': {message}")]
    ImportError { file: String, message: String },

    #[error("Failed to write config file '{file}': {message}")]
    ExportError { file: String, message: String },
}

pub trait Import: DeserializeOwned {
    fn import(path: &str) -> Result<Self, ConfigError> {
        let reader = || -> Result<Self, std::io::Error> {
            let data = fs::read(path)?;
            Ok(serde_json::from_slice(data.as_slice())?)
        };
        reader().map_err(|e| ConfigError::ImportError {
            file: path.to_string(),
            message: e.to_string(),
        })
    }
}

pub trait Export: Serialize {
    fn export(&self, path: &str) -> Result<(), ConfigError> {
        let writer = || -> Result<(), std::io::Error> {
            let data = serde_json::to_string_pretty(self).unwrap();
            fs::write(path, data)?;
            Ok(())
        };
        writer().map_err(|e| ConfigError::ExportError {
            file: path.to_string(),
            message: e.to_string(),
        })
    }
}

/// The tuning knobs of the change-aware poller.
#[derive(Clone, Serialize, Deserialize)]
pub struct Parameters {
    /// The delay between two poll cycles (in ms).
    pub poll_interval: u64,
    /// How many blocks behind the chain head to scan for events. The
    /// window is wider than the block production expected within one
    /// poll interval to tolerate missed cycles; the deduplicator
    /// absorbs the resulting repeated deliveries.
    pub lookback: u64,
}

impl Default for Parameters {
    fn default() -> Self {
        Self {
            poll_interval: 2_000,
            lookback: 10,
        }
    }
}

impl Import for Parameters {}
impl Export for Parameters {}

impl Parameters {
    pub fn log(&self) {
        info!("Poll interval set to {} ms", self.poll_interval);
        info!("Event lookback set to {} blocks", self.lookback);
    }
}
