//! Scripted Gypsy object tree served with `dbus-crossroads`.
//!
//! The tree answers method calls from `GypsyState` only; nothing here opens
//! or parses a GPS device.

use dbus::{message::SignalArgs, Path};
use dbus_crossroads::{Context, Crossroads, IfaceBuilder, IfaceToken, MethodErr};
use gypsy_client::{
    signals::{
        AccuracyChanged, ConnectionStatusChanged, CourseChanged, DeviceAdded, DeviceRemoved,
        FixStatusChanged, PositionChanged, RawSatellite, SatellitesChanged, TimeChanged,
    },
    Accuracy, Course, FixStatus, Position, SatelliteDetails,
};
use gypsy_utils::{
    GYPSY_ACCURACY_INTERFACE, GYPSY_CONTROL_INTERFACE, GYPSY_CONTROL_PATH, GYPSY_COURSE_INTERFACE,
    GYPSY_DEVICE_INTERFACE, GYPSY_DISCOVERY_INTERFACE, GYPSY_DISCOVERY_PATH,
    GYPSY_POSITION_INTERFACE, GYPSY_SATELLITE_INTERFACE, GYPSY_TIME_INTERFACE,
};
use std::{
    collections::BTreeMap,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};

#[derive(Clone, Debug, Default, PartialEq)]
pub struct DeviceState {
    pub started: u32,
    pub stopped: u32,
    pub connected: bool,
    pub fix_status: FixStatus,
    pub position: Position,
    pub course: Course,
    pub accuracy: Accuracy,
    pub satellites: Vec<SatelliteDetails>,
    pub time: i32,
}

#[derive(Debug, Default)]
pub struct GypsyState {
    /// Device objects, keyed by object path.
    pub devices: BTreeMap<String, DeviceState>,
    /// Answer to `ListDevices`.
    pub known_devices: Vec<String>,
    /// Device names passed to `Create` and not shut down yet.
    pub clients: Vec<String>,
    pub scanning: bool,
}

pub type Shared = Arc<Mutex<GypsyState>>;

pub(crate) fn lock_state(state: &Shared) -> MutexGuard<'_, GypsyState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Object path the daemon gives to `device_name`: the base name of the
/// device, with characters a path element can't hold replaced by `_`.
pub fn device_object_path(device_name: &str) -> Result<Path<'static>, String> {
    let base = device_name
        .trim_end_matches('/')
        .rsplit('/')
        .next()
        .unwrap_or_default();
    if base.is_empty() {
        return Err(format!("no device name in \"{device_name}\""));
    }
    let element: String = base
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect();
    Path::new(format!("{GYPSY_CONTROL_PATH}/{element}"))
}

/// Data of the control and discovery objects.
pub struct ServiceObject {
    state: Shared,
}

/// Data of one device object.
pub struct DeviceObject {
    path: Path<'static>,
    state: Shared,
}

impl DeviceObject {
    pub(crate) fn new(path: Path<'static>, state: Shared) -> Self {
        DeviceObject { path, state }
    }

    fn with_device<R>(&self, f: impl FnOnce(&mut DeviceState) -> R) -> Result<R, MethodErr> {
        let mut state = lock_state(&self.state);
        state
            .devices
            .get_mut(&*self.path)
            .map(f)
            .ok_or_else(|| MethodErr::failed(&format!("No such client: {}", self.path)))
    }
}

pub(crate) struct Tree {
    pub cr: Crossroads,
    pub device_ifaces: Vec<IfaceToken<DeviceObject>>,
}

pub(crate) fn build(state: Shared) -> Tree {
    let mut cr = Crossroads::new();

    let control = cr.register(GYPSY_CONTROL_INTERFACE, |b: &mut IfaceBuilder<ServiceObject>| {
        b.method(
            "Create",
            ("device_name",),
            ("path",),
            |_: &mut Context, obj: &mut ServiceObject, (name,): (String,)| {
                let path = device_object_path(&name).map_err(|err| MethodErr::failed(&err))?;
                let mut state = lock_state(&obj.state);
                if !state.devices.contains_key(&*path) {
                    return Err(MethodErr::failed(&format!("No such device: {name}")));
                }
                log::debug!("mock: create {} -> {}", name, path);
                state.clients.push(name);
                Ok((path,))
            },
        );
        b.method(
            "Shutdown",
            ("device_name",),
            (),
            |_: &mut Context, obj: &mut ServiceObject, (name,): (String,)| {
                let mut state = lock_state(&obj.state);
                match state.clients.iter().position(|client| *client == name) {
                    Some(idx) => {
                        state.clients.remove(idx);
                        Ok(())
                    }
                    None => Err(MethodErr::failed(&format!("No such client: {name}"))),
                }
            },
        );
    });

    let discovery = cr.register(
        GYPSY_DISCOVERY_INTERFACE,
        |b: &mut IfaceBuilder<ServiceObject>| {
            b.signal::<(String,), _>(DeviceAdded::NAME, ("device",));
            b.signal::<(String,), _>(DeviceRemoved::NAME, ("device",));
            b.method(
                "ListDevices",
                (),
                ("devices",),
                |_: &mut Context, obj: &mut ServiceObject, _: ()| {
                    Ok((lock_state(&obj.state).known_devices.clone(),))
                },
            );
            b.method(
                "StartScanning",
                (),
                (),
                |_: &mut Context, obj: &mut ServiceObject, _: ()| {
                    lock_state(&obj.state).scanning = true;
                    Ok(())
                },
            );
            b.method(
                "StopScanning",
                (),
                (),
                |_: &mut Context, obj: &mut ServiceObject, _: ()| {
                    lock_state(&obj.state).scanning = false;
                    Ok(())
                },
            );
        },
    );

    let device = cr.register(GYPSY_DEVICE_INTERFACE, |b: &mut IfaceBuilder<DeviceObject>| {
        b.signal::<(bool,), _>(ConnectionStatusChanged::NAME, ("connected",));
        b.signal::<(i32,), _>(FixStatusChanged::NAME, ("fix_status",));
        b.method(
            "Start",
            (),
            (),
            |ctx: &mut Context, obj: &mut DeviceObject, _: ()| {
                let first = obj.with_device(|dev| {
                    dev.started += 1;
                    !std::mem::replace(&mut dev.connected, true)
                })?;
                if first {
                    ctx.push_msg(
                        ConnectionStatusChanged { connected: true }.to_emit_message(&obj.path),
                    );
                }
                Ok(())
            },
        );
        b.method(
            "Stop",
            (),
            (),
            |ctx: &mut Context, obj: &mut DeviceObject, _: ()| {
                let was_connected = obj.with_device(|dev| {
                    dev.stopped += 1;
                    std::mem::replace(&mut dev.connected, false)
                })?;
                if was_connected {
                    ctx.push_msg(
                        ConnectionStatusChanged { connected: false }.to_emit_message(&obj.path),
                    );
                }
                Ok(())
            },
        );
        b.method(
            "GetFixStatus",
            (),
            ("fix_status",),
            |_: &mut Context, obj: &mut DeviceObject, _: ()| {
                obj.with_device(|dev| (dev.fix_status as i32,))
            },
        );
        b.method(
            "GetConnectionStatus",
            (),
            ("connected",),
            |_: &mut Context, obj: &mut DeviceObject, _: ()| {
                obj.with_device(|dev| (dev.connected,))
            },
        );
    });

    let position = cr.register(GYPSY_POSITION_INTERFACE, |b: &mut IfaceBuilder<DeviceObject>| {
        b.signal::<(i32, i32, f64, f64, f64), _>(
            PositionChanged::NAME,
            ("fields", "timestamp", "latitude", "longitude", "altitude"),
        );
        b.method(
            "GetPosition",
            (),
            ("fields", "timestamp", "latitude", "longitude", "altitude"),
            |_: &mut Context, obj: &mut DeviceObject, _: ()| {
                obj.with_device(|dev| {
                    let p = PositionChanged::from(dev.position);
                    (p.fields_set, p.timestamp, p.latitude, p.longitude, p.altitude)
                })
            },
        );
    });

    let course = cr.register(GYPSY_COURSE_INTERFACE, |b: &mut IfaceBuilder<DeviceObject>| {
        b.signal::<(i32, i32, f64, f64, f64), _>(
            CourseChanged::NAME,
            ("fields", "timestamp", "speed", "direction", "climb"),
        );
        b.method(
            "GetCourse",
            (),
            ("fields", "timestamp", "speed", "direction", "climb"),
            |_: &mut Context, obj: &mut DeviceObject, _: ()| {
                obj.with_device(|dev| {
                    let c = CourseChanged::from(dev.course);
                    (c.fields_set, c.timestamp, c.speed, c.direction, c.climb)
                })
            },
        );
    });

    let accuracy = cr.register(GYPSY_ACCURACY_INTERFACE, |b: &mut IfaceBuilder<DeviceObject>| {
        b.signal::<(i32, f64, f64, f64), _>(
            AccuracyChanged::NAME,
            ("fields", "position", "horizontal", "vertical"),
        );
        b.method(
            "GetAccuracy",
            (),
            ("fields", "position", "horizontal", "vertical"),
            |_: &mut Context, obj: &mut DeviceObject, _: ()| {
                obj.with_device(|dev| {
                    let a = AccuracyChanged::from(dev.accuracy);
                    (a.fields_set, a.position, a.horizontal, a.vertical)
                })
            },
        );
    });

    let satellite = cr.register(
        GYPSY_SATELLITE_INTERFACE,
        |b: &mut IfaceBuilder<DeviceObject>| {
            b.signal::<(Vec<RawSatellite>,), _>(SatellitesChanged::NAME, ("satellites",));
            b.method(
                "GetSatellites",
                (),
                ("satellites",),
                |_: &mut Context, obj: &mut DeviceObject, _: ()| {
                    obj.with_device(|dev| {
                        let satellites: Vec<RawSatellite> =
                            dev.satellites.iter().copied().map(RawSatellite::from).collect();
                        (satellites,)
                    })
                },
            );
        },
    );

    let time = cr.register(GYPSY_TIME_INTERFACE, |b: &mut IfaceBuilder<DeviceObject>| {
        b.signal::<(i32,), _>(TimeChanged::NAME, ("timestamp",));
        b.method(
            "GetTime",
            (),
            ("timestamp",),
            |_: &mut Context, obj: &mut DeviceObject, _: ()| obj.with_device(|dev| (dev.time,)),
        );
    });

    cr.insert(
        GYPSY_CONTROL_PATH,
        &[control],
        ServiceObject {
            state: state.clone(),
        },
    );
    cr.insert(GYPSY_DISCOVERY_PATH, &[discovery], ServiceObject { state });

    Tree {
        cr,
        device_ifaces: vec![device, position, course, accuracy, satellite, time],
    }
}
