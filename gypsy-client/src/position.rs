use crate::{signals::PositionChanged, Bus, Result};
use bitflags::bitflags;
use dbus::{channel::Token, Path};
use gypsy_utils::{GYPSY_POSITION_INTERFACE, UNSET_SENTINEL};

bitflags! {
    /// Which of the position values the daemon filled in.
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct PositionFields: i32 {
        const LATITUDE = 1 << 0;
        const LONGITUDE = 1 << 1;
        const ALTITUDE = 1 << 2;
    }
}

impl Default for PositionFields {
    fn default() -> Self {
        PositionFields::empty()
    }
}

/// A position fix. A value is meaningful only when its bit is set in
/// `fields`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Position {
    pub fields: PositionFields,
    pub timestamp: i32,
    pub latitude: f64,
    pub longitude: f64,
    pub altitude: f64,
}

impl Position {
    pub fn latitude(&self) -> Option<f64> {
        self.fields
            .contains(PositionFields::LATITUDE)
            .then_some(self.latitude)
    }

    pub fn longitude(&self) -> Option<f64> {
        self.fields
            .contains(PositionFields::LONGITUDE)
            .then_some(self.longitude)
    }

    pub fn altitude(&self) -> Option<f64> {
        self.fields
            .contains(PositionFields::ALTITUDE)
            .then_some(self.altitude)
    }

    /// Latitude, longitude and altitude with unset ones replaced by the
    /// `-1.0` sentinel.
    pub fn or_sentinel(&self) -> (f64, f64, f64) {
        (
            self.latitude().unwrap_or(UNSET_SENTINEL),
            self.longitude().unwrap_or(UNSET_SENTINEL),
            self.altitude().unwrap_or(UNSET_SENTINEL),
        )
    }
}

impl From<PositionChanged> for Position {
    fn from(signal: PositionChanged) -> Self {
        Position {
            fields: PositionFields::from_bits_truncate(signal.fields_set),
            timestamp: signal.timestamp,
            latitude: signal.latitude,
            longitude: signal.longitude,
            altitude: signal.altitude,
        }
    }
}

impl From<Position> for PositionChanged {
    fn from(position: Position) -> Self {
        PositionChanged {
            fields_set: position.fields.bits(),
            timestamp: position.timestamp,
            latitude: position.latitude,
            longitude: position.longitude,
            altitude: position.altitude,
        }
    }
}

/// `org.freedesktop.Gypsy.Position` on one device object.
pub struct PositionProxy<'a, B: Bus> {
    bus: &'a B,
    path: Path<'static>,
}

impl<'a, B: Bus> PositionProxy<'a, B> {
    pub fn new(bus: &'a B, path: Path<'static>) -> Self {
        PositionProxy { bus, path }
    }

    pub fn position(&self) -> Result<Position> {
        // GetPosition replies with the same arguments as the signal
        let signal: PositionChanged =
            self.bus
                .call(&self.path, GYPSY_POSITION_INTERFACE, "GetPosition", ())?;
        Ok(signal.into())
    }

    pub fn on_position_changed<F>(&self, mut f: F) -> Result<Token>
    where
        F: FnMut(Position) + Send + 'static,
    {
        self.bus
            .subscribe(Some(&self.path), move |signal: PositionChanged| {
                f(signal.into());
                true
            })
    }
}
