use crate::{
    discovery_path,
    signals::{DeviceAdded, DeviceRemoved},
    Bus, Result,
};
use dbus::{channel::Token, Path};
use gypsy_utils::GYPSY_DISCOVERY_INTERFACE;

/// `org.freedesktop.Gypsy.Discovery`: GPS devices known to the daemon.
pub struct Discovery<'a, B: Bus> {
    bus: &'a B,
    path: Path<'static>,
}

impl<'a, B: Bus> Discovery<'a, B> {
    pub fn new(bus: &'a B) -> Self {
        Discovery {
            bus,
            path: discovery_path(),
        }
    }

    /// Device nodes or Bluetooth addresses, in the order the daemon found
    /// them.
    pub fn list_devices(&self) -> Result<Vec<String>> {
        let (devices,): (Vec<String>,) =
            self.bus
                .call(&self.path, GYPSY_DISCOVERY_INTERFACE, "ListDevices", ())?;
        Ok(devices)
    }

    pub fn start_scanning(&self) -> Result<()> {
        self.bus
            .call(&self.path, GYPSY_DISCOVERY_INTERFACE, "StartScanning", ())
    }

    pub fn stop_scanning(&self) -> Result<()> {
        self.bus
            .call(&self.path, GYPSY_DISCOVERY_INTERFACE, "StopScanning", ())
    }

    pub fn on_device_added<F>(&self, mut f: F) -> Result<Token>
    where
        F: FnMut(String) + Send + 'static,
    {
        self.bus
            .subscribe(Some(&self.path), move |signal: DeviceAdded| {
                f(signal.device);
                true
            })
    }

    pub fn on_device_removed<F>(&self, mut f: F) -> Result<Token>
    where
        F: FnMut(String) + Send + 'static,
    {
        self.bus
            .subscribe(Some(&self.path), move |signal: DeviceRemoved| {
                f(signal.device);
                true
            })
    }
}
