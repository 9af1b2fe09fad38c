use crate::{signals::AccuracyChanged, Bus, Result};
use bitflags::bitflags;
use dbus::{channel::Token, Path};
use gypsy_utils::GYPSY_ACCURACY_INTERFACE;

bitflags! {
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct AccuracyFields: i32 {
        const POSITION = 1 << 0;
        const HORIZONTAL = 1 << 1;
        const VERTICAL = 1 << 2;
    }
}

impl Default for AccuracyFields {
    fn default() -> Self {
        AccuracyFields::empty()
    }
}

/// Dilution of precision of the current fix.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Accuracy {
    pub fields: AccuracyFields,
    pub position: f64,
    pub horizontal: f64,
    pub vertical: f64,
}

impl From<AccuracyChanged> for Accuracy {
    fn from(signal: AccuracyChanged) -> Self {
        Accuracy {
            fields: AccuracyFields::from_bits_truncate(signal.fields_set),
            position: signal.position,
            horizontal: signal.horizontal,
            vertical: signal.vertical,
        }
    }
}

impl From<Accuracy> for AccuracyChanged {
    fn from(accuracy: Accuracy) -> Self {
        AccuracyChanged {
            fields_set: accuracy.fields.bits(),
            position: accuracy.position,
            horizontal: accuracy.horizontal,
            vertical: accuracy.vertical,
        }
    }
}

pub struct AccuracyProxy<'a, B: Bus> {
    bus: &'a B,
    path: Path<'static>,
}

impl<'a, B: Bus> AccuracyProxy<'a, B> {
    pub fn new(bus: &'a B, path: Path<'static>) -> Self {
        AccuracyProxy { bus, path }
    }

    pub fn accuracy(&self) -> Result<Accuracy> {
        let signal: AccuracyChanged =
            self.bus
                .call(&self.path, GYPSY_ACCURACY_INTERFACE, "GetAccuracy", ())?;
        Ok(signal.into())
    }

    pub fn on_accuracy_changed<F>(&self, mut f: F) -> Result<Token>
    where
        F: FnMut(Accuracy) + Send + 'static,
    {
        self.bus
            .subscribe(Some(&self.path), move |signal: AccuracyChanged| {
                f(signal.into());
                true
            })
    }
}
