use crate::{
    signals::{RawSatellite, SatellitesChanged},
    Bus, Result,
};
use dbus::{channel::Token, Path};
use gypsy_utils::GYPSY_SATELLITE_INTERFACE;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SatelliteDetails {
    pub satellite_id: u32,
    pub in_use: bool,
    pub elevation: u32,
    pub azimuth: u32,
    pub snr: u32,
}

impl From<RawSatellite> for SatelliteDetails {
    fn from((satellite_id, in_use, elevation, azimuth, snr): RawSatellite) -> Self {
        SatelliteDetails {
            satellite_id,
            in_use,
            elevation,
            azimuth,
            snr,
        }
    }
}

impl From<SatelliteDetails> for RawSatellite {
    fn from(sat: SatelliteDetails) -> Self {
        (sat.satellite_id, sat.in_use, sat.elevation, sat.azimuth, sat.snr)
    }
}

pub struct SatelliteProxy<'a, B: Bus> {
    bus: &'a B,
    path: Path<'static>,
}

impl<'a, B: Bus> SatelliteProxy<'a, B> {
    pub fn new(bus: &'a B, path: Path<'static>) -> Self {
        SatelliteProxy { bus, path }
    }

    pub fn satellites(&self) -> Result<Vec<SatelliteDetails>> {
        let (satellites,): (Vec<RawSatellite>,) =
            self.bus
                .call(&self.path, GYPSY_SATELLITE_INTERFACE, "GetSatellites", ())?;
        Ok(satellites.into_iter().map(SatelliteDetails::from).collect())
    }

    pub fn on_satellites_changed<F>(&self, mut f: F) -> Result<Token>
    where
        F: FnMut(Vec<SatelliteDetails>) + Send + 'static,
    {
        self.bus
            .subscribe(Some(&self.path), move |signal: SatellitesChanged| {
                f(signal
                    .satellites
                    .into_iter()
                    .map(SatelliteDetails::from)
                    .collect());
                true
            })
    }
}
