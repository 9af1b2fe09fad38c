//! Signals emitted by the Gypsy daemon, with their raw wire arguments.
//!
//! Each signal is a struct implementing `ReadAll` / `AppendAll` and
//! `SignalArgs`, so it can be handed to `Bus::subscribe` or turned into an
//! emitted message.

use gypsy_utils::{
    GYPSY_ACCURACY_INTERFACE, GYPSY_COURSE_INTERFACE, GYPSY_DEVICE_INTERFACE,
    GYPSY_DISCOVERY_INTERFACE, GYPSY_POSITION_INTERFACE, GYPSY_SATELLITE_INTERFACE,
    GYPSY_TIME_INTERFACE,
};

/// Wire form of one satellite: id, in use, elevation, azimuth, SNR.
pub type RawSatellite = (u32, bool, u32, u32, u32);

/// This macro defines a signal struct and implements the dbus argument and
/// signal traits on it, fields are read / appended in declaration order.
///
/// ```rust,ignore
/// gypsy_signal!(
///     TimeChanged,
///     GYPSY_TIME_INTERFACE,
///     "TimeChanged",
///     timestamp: i32
/// );
/// ```
#[macro_export]
macro_rules! gypsy_signal {
    ($(#[$meta:meta])*
     $name:ident,
     $iface:expr,
     $member:literal,
     $($field:ident: $ty:ty),+) => {
        $(#[$meta])*
        #[derive(Clone, Debug, PartialEq)]
        pub struct $name {
            $(pub $field: $ty,)+
        }

        impl dbus::arg::ReadAll for $name {
            fn read(i: &mut dbus::arg::Iter) -> std::result::Result<Self, dbus::arg::TypeMismatchError> {
                Ok($name {
                    $($field: i.read()?,)+
                })
            }
        }

        impl dbus::arg::AppendAll for $name {
            fn append(&self, ia: &mut dbus::arg::IterAppend) {
                $(ia.append(self.$field.clone());)+
            }
        }

        impl dbus::message::SignalArgs for $name {
            const NAME: &'static str = $member;
            const INTERFACE: &'static str = $iface;
        }
    };
}

gypsy_signal!(
    PositionChanged,
    GYPSY_POSITION_INTERFACE,
    "PositionChanged",
    fields_set: i32,
    timestamp: i32,
    latitude: f64,
    longitude: f64,
    altitude: f64
);

gypsy_signal!(
    CourseChanged,
    GYPSY_COURSE_INTERFACE,
    "CourseChanged",
    fields_set: i32,
    timestamp: i32,
    speed: f64,
    direction: f64,
    climb: f64
);

gypsy_signal!(
    AccuracyChanged,
    GYPSY_ACCURACY_INTERFACE,
    "AccuracyChanged",
    fields_set: i32,
    position: f64,
    horizontal: f64,
    vertical: f64
);

gypsy_signal!(
    SatellitesChanged,
    GYPSY_SATELLITE_INTERFACE,
    "SatellitesChanged",
    satellites: Vec<RawSatellite>
);

gypsy_signal!(
    TimeChanged,
    GYPSY_TIME_INTERFACE,
    "TimeChanged",
    timestamp: i32
);

gypsy_signal!(
    ConnectionStatusChanged,
    GYPSY_DEVICE_INTERFACE,
    "ConnectionStatusChanged",
    connected: bool
);

gypsy_signal!(
    FixStatusChanged,
    GYPSY_DEVICE_INTERFACE,
    "FixStatusChanged",
    fix_status: i32
);

gypsy_signal!(
    DeviceAdded,
    GYPSY_DISCOVERY_INTERFACE,
    "DeviceAdded",
    device: String
);

gypsy_signal!(
    DeviceRemoved,
    GYPSY_DISCOVERY_INTERFACE,
    "DeviceRemoved",
    device: String
);
