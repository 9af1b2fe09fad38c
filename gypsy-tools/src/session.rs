//! Wiring between the daemon and the tools' output.
//!
//! Handlers run on the dispatch thread and must be `Send + 'static`, so the
//! output is a closure receiving each formatted block rather than a writer.

use crate::{
    format::{
        format_course, format_devices, format_position, format_raw_course,
        format_raw_position, format_satellites,
    },
    Result,
};
use dbus::Path;
use gypsy_client::{
    signals::{CourseChanged, PositionChanged},
    Bus, Control, CourseProxy, Device, Discovery, PositionProxy, SatelliteProxy,
};

/// Create the daemon object for `device_name`, print every position it
/// reports and start the device. The subscription is in place before
/// `Start` so the first fix isn't lost.
pub fn watch_position<B, F>(bus: &B, device_name: &str, mut out: F) -> Result<Path<'static>>
where
    B: Bus,
    F: FnMut(String) + Send + 'static,
{
    let path = Control::new(bus).create(device_name)?;
    PositionProxy::new(bus, path.clone())
        .on_position_changed(move |position| out(format_position(&position)))?;
    Device::new(bus, path.clone()).start()?;
    Ok(path)
}

/// Print both the position and the course of `device_name`, each update on
/// its own line, then start the device.
pub fn watch_track<B, F>(bus: &B, device_name: &str, out: F) -> Result<Path<'static>>
where
    B: Bus,
    F: FnMut(String) + Clone + Send + 'static,
{
    let path = Control::new(bus).create(device_name)?;
    let mut position_out = out.clone();
    PositionProxy::new(bus, path.clone())
        .on_position_changed(move |position| position_out(format_position(&position)))?;
    let mut course_out = out;
    CourseProxy::new(bus, path.clone())
        .on_course_changed(move |course| course_out(format_course(&course)))?;
    Device::new(bus, path.clone()).start()?;
    Ok(path)
}

/// Same as [`watch_position`] for the satellites in view.
pub fn watch_satellites<B, F>(bus: &B, device_name: &str, mut out: F) -> Result<Path<'static>>
where
    B: Bus,
    F: FnMut(String) + Send + 'static,
{
    let path = Control::new(bus).create(device_name)?;
    SatelliteProxy::new(bus, path.clone())
        .on_satellites_changed(move |satellites| out(format_satellites(&satellites)))?;
    Device::new(bus, path.clone()).start()?;
    Ok(path)
}

/// Print the raw position and course signals of every device object, without
/// creating or starting anything.
pub fn monitor<B, F>(bus: &B, out: F) -> Result<()>
where
    B: Bus,
    F: FnMut(String) + Clone + Send + 'static,
{
    let mut position_out = out.clone();
    bus.subscribe(None, move |signal: PositionChanged| {
        position_out(format_raw_position(&signal));
        true
    })?;
    let mut course_out = out;
    bus.subscribe(None, move |signal: CourseChanged| {
        course_out(format_raw_course(&signal));
        true
    })?;
    Ok(())
}

pub fn list_devices<B: Bus>(bus: &B) -> Result<String> {
    let devices = Discovery::new(bus).list_devices()?;
    log::debug!("daemon knows {} device(s)", devices.len());
    Ok(format_devices(&devices))
}
