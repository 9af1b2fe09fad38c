//! Gypsy bus names, client defaults and logging utility.

pub mod clap;
pub mod log;

/// Well-known bus name owned by the positioning daemon.
pub const GYPSY_SERVICE: &str = "org.freedesktop.Gypsy";
pub const GYPSY_CONTROL_PATH: &str = "/org/freedesktop/Gypsy";
pub const GYPSY_DISCOVERY_PATH: &str = "/org/freedesktop/Gypsy/Discovery";

pub const GYPSY_CONTROL_INTERFACE: &str = "org.freedesktop.Gypsy.Server";
pub const GYPSY_DEVICE_INTERFACE: &str = "org.freedesktop.Gypsy.Device";
pub const GYPSY_POSITION_INTERFACE: &str = "org.freedesktop.Gypsy.Position";
pub const GYPSY_COURSE_INTERFACE: &str = "org.freedesktop.Gypsy.Course";
pub const GYPSY_ACCURACY_INTERFACE: &str = "org.freedesktop.Gypsy.Accuracy";
pub const GYPSY_SATELLITE_INTERFACE: &str = "org.freedesktop.Gypsy.Satellite";
pub const GYPSY_TIME_INTERFACE: &str = "org.freedesktop.Gypsy.Time";
pub const GYPSY_DISCOVERY_INTERFACE: &str = "org.freedesktop.Gypsy.Discovery";

/// Printed in place of a value whose field bit is not set.
pub const UNSET_SENTINEL: f64 = -1.0;

pub const CALL_TIMEOUT_MS: u64 = 25_000;
pub const PROCESS_TIMEOUT_MS: u64 = 1000;

pub const GYPSY_CONFIG: &str = match option_env!("GYPSY_CONFIG") {
    Some(val) => val,
    None => "/etc/gypsy/client.toml",
};
pub const GYPSY_VERSION: &str = env!("GYPSY_VERSION");
