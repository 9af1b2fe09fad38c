//! Gypsy client helper structs and functions.
//!
//! Every daemon interface gets a small typed proxy borrowing a [`Bus`] and an
//! object path. The `Bus` trait is the only place that knows about the
//! transport: [`SystemBus`] talks to a real D-Bus daemon, `gypsy-mock`
//! answers from an in-memory object tree.

use dbus::{
    arg::{AppendAll, ReadAll},
    channel::Token,
    message::SignalArgs,
    Path,
};
use std::time::Duration;
use thiserror::Error;

pub mod accuracy;
pub mod bus;
pub mod control;
pub mod course;
pub mod device;
pub mod discovery;
pub mod position;
pub mod satellite;
pub mod signals;
pub mod time;

pub use accuracy::{Accuracy, AccuracyFields, AccuracyProxy};
pub use bus::SystemBus;
pub use control::Control;
pub use course::{Course, CourseFields, CourseProxy};
pub use device::{Device, FixStatus};
pub use discovery::Discovery;
pub use position::{Position, PositionFields, PositionProxy};
pub use satellite::{SatelliteDetails, SatelliteProxy};
pub use time::TimeProxy;

#[derive(Error, Debug)]
pub enum Error {
    #[error("dbus error: {0}")]
    Dbus(#[from] dbus::Error),
    #[error("bad arguments: {0}")]
    Args(#[from] dbus::arg::TypeMismatchError),
    #[error("unknown fix status: {0}")]
    FixStatus(i32),
    #[error("{0}")]
    Error(String),
}
pub type Result<T> = std::result::Result<T, Error>;

/// Transport used by the typed proxies.
///
/// Method calls are addressed to the configured daemon service; signal
/// subscriptions match on the signal's interface and member, and on `path`
/// when one is given.
pub trait Bus {
    fn call<A, R>(&self, path: &Path<'_>, interface: &str, method: &str, args: A) -> Result<R>
    where
        A: AppendAll,
        R: ReadAll;

    /// `handler` is dropped as soon as it returns `false`.
    fn subscribe<S, F>(&self, path: Option<&Path<'static>>, handler: F) -> Result<Token>
    where
        S: SignalArgs + ReadAll + 'static,
        F: FnMut(S) -> bool + Send + 'static;

    fn unsubscribe(&self, token: Token) -> Result<()>;

    /// Dispatch incoming messages to subscriptions, waiting at most
    /// `timeout` for something to arrive.
    fn process(&self, timeout: Duration) -> Result<bool>;
}

/// Object path of the control service.
pub fn control_path() -> Path<'static> {
    Path::from(gypsy_utils::GYPSY_CONTROL_PATH)
}

/// Object path of the discovery service.
pub fn discovery_path() -> Path<'static> {
    Path::from(gypsy_utils::GYPSY_DISCOVERY_PATH)
}
