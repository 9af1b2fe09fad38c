use dbus::arg::messageitem::MessageItem;
use gypsy_client::{
    signals::{
        AccuracyChanged, CourseChanged, DeviceAdded, DeviceRemoved, FixStatusChanged,
        PositionChanged, TimeChanged,
    },
    Accuracy, AccuracyFields, AccuracyProxy, Bus, Control, Course, CourseFields, CourseProxy,
    Device, Discovery, Error, FixStatus, Position, PositionFields, PositionProxy,
    SatelliteDetails, SatelliteProxy, TimeProxy,
};
use gypsy_mock::{Event, MockBus};
use std::sync::{Arc, Mutex};

const GPS: &str = "00:11:22:33:44:55";

fn bus() -> MockBus {
    MockBus::new().with_device(GPS).with_device("/dev/ttyUSB0")
}

#[test]
fn test_create_returns_device_path() {
    let bus = bus();
    let path = Control::new(&bus).create(GPS).expect("create");
    assert_eq!(&*path, "/org/freedesktop/Gypsy/00_11_22_33_44_55");
    assert_eq!(
        bus.calls("Create"),
        vec![vec![MessageItem::Str(GPS.to_string())]]
    );
    assert_eq!(bus.clients(), vec![GPS.to_string()]);
}

#[test]
fn test_create_unknown_device() {
    let bus = bus();
    match Control::new(&bus).create("/dev/rfcomm7") {
        Err(Error::Dbus(err)) => {
            assert!(err.message().unwrap_or_default().contains("rfcomm7"));
        }
        other => panic!("unexpected {:?}", other),
    }
}

#[test]
fn test_shutdown() {
    let bus = bus();
    let control = Control::new(&bus);
    control.create("/dev/ttyUSB0").expect("create");
    control.shutdown("/dev/ttyUSB0").expect("shutdown");
    assert!(bus.clients().is_empty());
    assert!(control.shutdown("/dev/ttyUSB0").is_err());
}

#[test]
fn test_device_lifecycle() {
    let bus = bus();
    let path = Control::new(&bus).create(GPS).expect("create");
    let device = Device::new(&bus, path);

    let changes = Arc::new(Mutex::new(Vec::new()));
    let sink = changes.clone();
    device
        .on_connection_changed(move |connected| sink.lock().unwrap().push(connected))
        .expect("subscribe");

    assert!(!device.connection_status().expect("status"));
    device.start().expect("start");
    assert!(device.connection_status().expect("status"));
    device.stop().expect("stop");
    bus.drain().expect("drain");

    assert_eq!(*changes.lock().unwrap(), vec![true, false]);
    let state = bus.device_state(GPS).expect("device state");
    assert_eq!((state.started, state.stopped), (1, 1));
}

#[test]
fn test_fix_status() {
    let bus = bus();
    let path = Control::new(&bus).create(GPS).expect("create");
    let device = Device::new(&bus, path.clone());
    assert_eq!(device.fix_status().expect("fix"), FixStatus::Invalid);

    bus.update_device(GPS, |dev| dev.fix_status = FixStatus::Fix3D);
    assert_eq!(device.fix_status().expect("fix"), FixStatus::Fix3D);

    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = seen.clone();
    device
        .on_fix_status_changed(move |status| sink.lock().unwrap().push(status))
        .expect("subscribe");
    bus.emit(&path, FixStatusChanged { fix_status: 2 });
    bus.emit(&path, FixStatusChanged { fix_status: 9 });
    bus.drain().expect("drain");
    assert_eq!(*seen.lock().unwrap(), vec![FixStatus::Fix2D]);
}

#[test]
fn test_position_getter() {
    let bus = bus();
    let path = Control::new(&bus).create(GPS).expect("create");
    let position = Position {
        fields: PositionFields::LATITUDE | PositionFields::LONGITUDE,
        timestamp: 1_190_000_000,
        latitude: 51.5,
        longitude: -0.12,
        altitude: 0.0,
    };
    bus.update_device(GPS, |dev| dev.position = position);
    assert_eq!(
        PositionProxy::new(&bus, path).position().expect("position"),
        position
    );
}

#[test]
fn test_course_and_accuracy_getters() {
    let bus = bus();
    let path = Control::new(&bus).create(GPS).expect("create");
    let course = Course {
        fields: CourseFields::SPEED | CourseFields::DIRECTION,
        timestamp: 42,
        speed: 12.5,
        direction: 270.0,
        climb: 0.0,
    };
    let accuracy = Accuracy {
        fields: AccuracyFields::all(),
        position: 2.1,
        horizontal: 1.2,
        vertical: 1.7,
    };
    bus.update_device(GPS, |dev| {
        dev.course = course;
        dev.accuracy = accuracy;
    });
    assert_eq!(
        CourseProxy::new(&bus, path.clone()).course().expect("course"),
        course
    );
    assert_eq!(
        AccuracyProxy::new(&bus, path).accuracy().expect("accuracy"),
        accuracy
    );
}

#[test]
fn test_satellites_and_time() {
    let bus = bus();
    let path = Control::new(&bus).create(GPS).expect("create");
    let satellites = vec![
        SatelliteDetails {
            satellite_id: 4,
            in_use: true,
            elevation: 61,
            azimuth: 120,
            snr: 42,
        },
        SatelliteDetails {
            satellite_id: 17,
            in_use: false,
            elevation: 9,
            azimuth: 300,
            snr: 0,
        },
    ];
    bus.update_device(GPS, |dev| {
        dev.satellites = satellites.clone();
        dev.time = 1_200_000_000;
    });
    assert_eq!(
        SatelliteProxy::new(&bus, path.clone())
            .satellites()
            .expect("satellites"),
        satellites
    );
    assert_eq!(
        TimeProxy::new(&bus, path).time().expect("time"),
        1_200_000_000
    );
}

#[test]
fn test_subscription_is_path_restricted() {
    let bus = bus();
    let control = Control::new(&bus);
    let gps = control.create(GPS).expect("create");
    let usb = control.create("/dev/ttyUSB0").expect("create");

    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = seen.clone();
    PositionProxy::new(&bus, gps.clone())
        .on_position_changed(move |p| sink.lock().unwrap().push(p.timestamp))
        .expect("subscribe");

    let fix = |timestamp| PositionChanged {
        fields_set: 7,
        timestamp,
        latitude: 1.0,
        longitude: 2.0,
        altitude: 3.0,
    };
    bus.emit(&usb, fix(1));
    bus.emit(&gps, fix(2));
    bus.emit(&gps, TimeChanged { timestamp: 3 });
    bus.emit(&gps, fix(4));
    assert_eq!(bus.drain().expect("drain"), 4);
    assert_eq!(*seen.lock().unwrap(), vec![2, 4]);
}

#[test]
fn test_handler_returning_false_is_dropped() {
    let bus = bus();
    let path = Control::new(&bus).create(GPS).expect("create");
    let count = Arc::new(Mutex::new(0));
    let sink = count.clone();
    bus.subscribe(Some(&path), move |_: TimeChanged| {
        *sink.lock().unwrap() += 1;
        false
    })
    .expect("subscribe");
    assert_eq!(bus.subscription_count(), 1);

    bus.emit(&path, TimeChanged { timestamp: 1 });
    bus.emit(&path, TimeChanged { timestamp: 2 });
    bus.drain().expect("drain");
    assert_eq!(*count.lock().unwrap(), 1);
    assert_eq!(bus.subscription_count(), 0);
}

#[test]
fn test_unsubscribe() {
    let bus = bus();
    let path = Control::new(&bus).create(GPS).expect("create");
    let token = TimeProxy::new(&bus, path.clone())
        .on_time_changed(|_| panic!("unsubscribed handler called"))
        .expect("subscribe");
    bus.unsubscribe(token).expect("unsubscribe");
    bus.emit(&path, TimeChanged { timestamp: 1 });
    bus.drain().expect("drain");
    assert!(bus.journal().contains(&Event::Unsubscribe(token.0)));
}

#[test]
fn test_discovery() {
    let bus = MockBus::new().with_known_devices(&["/dev/ttyUSB0", "00:0D:B5:38:9B:1C"]);
    let discovery = Discovery::new(&bus);
    assert_eq!(
        discovery.list_devices().expect("list"),
        vec!["/dev/ttyUSB0".to_string(), "00:0D:B5:38:9B:1C".to_string()]
    );
    discovery.start_scanning().expect("start scanning");
    assert!(bus.scanning());
    discovery.stop_scanning().expect("stop scanning");
    assert!(!bus.scanning());

    assert!(Discovery::new(&MockBus::new())
        .list_devices()
        .expect("list")
        .is_empty());
}

#[test]
fn test_course_and_accuracy_signals() {
    let bus = bus();
    let path = Control::new(&bus).create(GPS).expect("create");

    let courses = Arc::new(Mutex::new(Vec::new()));
    let sink = courses.clone();
    CourseProxy::new(&bus, path.clone())
        .on_course_changed(move |course| sink.lock().unwrap().push(course))
        .expect("subscribe");
    let accuracies = Arc::new(Mutex::new(Vec::new()));
    let sink = accuracies.clone();
    AccuracyProxy::new(&bus, path.clone())
        .on_accuracy_changed(move |accuracy| sink.lock().unwrap().push(accuracy))
        .expect("subscribe");

    bus.emit(
        &path,
        CourseChanged {
            fields_set: 1 | 4,
            timestamp: 9,
            speed: 4.0,
            direction: 12.0,
            climb: -1.0,
        },
    );
    bus.emit(
        &path,
        AccuracyChanged {
            fields_set: 2,
            position: 0.0,
            horizontal: 1.4,
            vertical: 0.0,
        },
    );
    bus.drain().expect("drain");

    let courses = courses.lock().unwrap();
    assert_eq!(courses.len(), 1);
    assert_eq!(courses[0].fields, CourseFields::SPEED | CourseFields::CLIMB);
    assert_eq!(courses[0].timestamp, 9);
    let accuracies = accuracies.lock().unwrap();
    assert_eq!(accuracies.len(), 1);
    assert_eq!(accuracies[0].fields, AccuracyFields::HORIZONTAL);
    assert_eq!(accuracies[0].horizontal, 1.4);
}

#[test]
fn test_discovery_signals() {
    let bus = MockBus::new();
    let discovery = Discovery::new(&bus);
    let events = Arc::new(Mutex::new(Vec::new()));
    let added = events.clone();
    discovery
        .on_device_added(move |device| added.lock().unwrap().push(format!("+{device}")))
        .expect("subscribe");
    let removed = events.clone();
    discovery
        .on_device_removed(move |device| removed.lock().unwrap().push(format!("-{device}")))
        .expect("subscribe");

    let path = gypsy_client::discovery_path();
    bus.emit(
        &path,
        DeviceAdded {
            device: "/dev/ttyACM0".to_string(),
        },
    );
    bus.emit(
        &path,
        DeviceRemoved {
            device: "/dev/ttyACM0".to_string(),
        },
    );
    bus.drain().expect("drain");
    assert_eq!(*events.lock().unwrap(), vec!["+/dev/ttyACM0", "-/dev/ttyACM0"]);
}
