//! Shared plumbing of the gypsy command line tools: connecting to the bus,
//! wiring handlers to the daemon and formatting what it reports.

use gypsy_client::{Bus, SystemBus};
use gypsy_config::Config;
use std::time::Duration;
use thiserror::Error;

pub mod format;
pub mod session;

#[derive(Error, Debug)]
pub enum Error {
    #[error("io error: {0}")]
    IO(#[from] std::io::Error),
    #[error("client error: {0}")]
    Client(#[from] gypsy_client::Error),
    #[error("{0}")]
    Error(String),
}
pub type Result<T> = std::result::Result<T, Error>;

/// Load the configuration (`config_path`, or the default file) and connect
/// to the bus it names.
pub fn connect(config_path: Option<&str>) -> Result<(Config, SystemBus)> {
    let config = gypsy_config::conf_load(config_path)?;
    let bus = SystemBus::new(&config)?;
    Ok((config, bus))
}

/// Dispatch incoming signals until the bus fails.
pub fn dispatch_forever<B: Bus>(bus: &B, timeout: Duration) -> Result<()> {
    loop {
        bus.process(timeout)?;
    }
}
