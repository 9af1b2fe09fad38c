use crate::{signals::TimeChanged, Bus, Result};
use dbus::{channel::Token, Path};
use gypsy_utils::GYPSY_TIME_INTERFACE;

/// GPS time of the last sentence, in seconds since the epoch.
pub struct TimeProxy<'a, B: Bus> {
    bus: &'a B,
    path: Path<'static>,
}

impl<'a, B: Bus> TimeProxy<'a, B> {
    pub fn new(bus: &'a B, path: Path<'static>) -> Self {
        TimeProxy { bus, path }
    }

    pub fn time(&self) -> Result<i32> {
        let (timestamp,): (i32,) = self
            .bus
            .call(&self.path, GYPSY_TIME_INTERFACE, "GetTime", ())?;
        Ok(timestamp)
    }

    pub fn on_time_changed<F>(&self, mut f: F) -> Result<Token>
    where
        F: FnMut(i32) + Send + 'static,
    {
        self.bus
            .subscribe(Some(&self.path), move |signal: TimeChanged| {
                f(signal.timestamp);
                true
            })
    }
}
