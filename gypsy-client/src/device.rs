use crate::{
    signals::{ConnectionStatusChanged, FixStatusChanged},
    Bus, Error, Result,
};
use dbus::{channel::Token, Path};
use gypsy_utils::GYPSY_DEVICE_INTERFACE;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FixStatus {
    #[default]
    Invalid = 0,
    None = 1,
    Fix2D = 2,
    Fix3D = 3,
}

impl TryFrom<i32> for FixStatus {
    type Error = Error;

    fn try_from(value: i32) -> Result<Self> {
        match value {
            0 => Ok(FixStatus::Invalid),
            1 => Ok(FixStatus::None),
            2 => Ok(FixStatus::Fix2D),
            3 => Ok(FixStatus::Fix3D),
            _ => Err(Error::FixStatus(value)),
        }
    }
}

/// `org.freedesktop.Gypsy.Device`: lifecycle of one GPS device object.
pub struct Device<'a, B: Bus> {
    bus: &'a B,
    path: Path<'static>,
}

impl<'a, B: Bus> Device<'a, B> {
    pub fn new(bus: &'a B, path: Path<'static>) -> Self {
        Device { bus, path }
    }

    /// Ask the daemon to open the device and start parsing its sentences.
    pub fn start(&self) -> Result<()> {
        log::debug!("start {}", self.path);
        self.bus
            .call(&self.path, GYPSY_DEVICE_INTERFACE, "Start", ())
    }

    pub fn stop(&self) -> Result<()> {
        log::debug!("stop {}", self.path);
        self.bus
            .call(&self.path, GYPSY_DEVICE_INTERFACE, "Stop", ())
    }

    pub fn fix_status(&self) -> Result<FixStatus> {
        let (status,): (i32,) =
            self.bus
                .call(&self.path, GYPSY_DEVICE_INTERFACE, "GetFixStatus", ())?;
        FixStatus::try_from(status)
    }

    pub fn connection_status(&self) -> Result<bool> {
        let (connected,): (bool,) = self.bus.call(
            &self.path,
            GYPSY_DEVICE_INTERFACE,
            "GetConnectionStatus",
            (),
        )?;
        Ok(connected)
    }

    pub fn on_connection_changed<F>(&self, mut f: F) -> Result<Token>
    where
        F: FnMut(bool) + Send + 'static,
    {
        self.bus
            .subscribe(Some(&self.path), move |signal: ConnectionStatusChanged| {
                f(signal.connected);
                true
            })
    }

    /// Statuses the daemon should never send are logged and skipped.
    pub fn on_fix_status_changed<F>(&self, mut f: F) -> Result<Token>
    where
        F: FnMut(FixStatus) + Send + 'static,
    {
        self.bus
            .subscribe(Some(&self.path), move |signal: FixStatusChanged| {
                match FixStatus::try_from(signal.fix_status) {
                    Ok(status) => f(status),
                    Err(err) => log::warn!("{}", err),
                }
                true
            })
    }
}
