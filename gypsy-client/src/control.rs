use crate::{control_path, Bus, Result};
use dbus::Path;
use gypsy_utils::GYPSY_CONTROL_INTERFACE;

/// `org.freedesktop.Gypsy.Server`: creates and releases device objects.
pub struct Control<'a, B: Bus> {
    bus: &'a B,
    path: Path<'static>,
}

impl<'a, B: Bus> Control<'a, B> {
    pub fn new(bus: &'a B) -> Self {
        Control {
            bus,
            path: control_path(),
        }
    }

    /// Create (or reuse) the daemon object for `device_name`, a device node
    /// or a Bluetooth address, and return its object path.
    pub fn create(&self, device_name: &str) -> Result<Path<'static>> {
        log::debug!("create client for {}", device_name);
        let (path,): (Path<'static>,) =
            self.bus
                .call(&self.path, GYPSY_CONTROL_INTERFACE, "Create", (device_name,))?;
        log::info!("{} is {}", device_name, path);
        Ok(path)
    }

    /// Release the object created for `device_name`. The daemon closes the
    /// device once no client holds it.
    pub fn shutdown(&self, device_name: &str) -> Result<()> {
        log::debug!("shutdown client for {}", device_name);
        self.bus.call(
            &self.path,
            GYPSY_CONTROL_INTERFACE,
            "Shutdown",
            (device_name,),
        )
    }
}
