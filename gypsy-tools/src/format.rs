use gypsy_client::{
    signals::{CourseChanged, PositionChanged},
    Course, Position, SatelliteDetails,
};

/// `<timestamp>: <lat>, <lon> (<alt>m)`, unset values printed as `-1.0`.
pub fn format_position(position: &Position) -> String {
    let (latitude, longitude, altitude) = position.or_sentinel();
    format!(
        "{}: {:.6}, {:.6} ({:.1}m)",
        position.timestamp, latitude, longitude, altitude
    )
}

/// `<timestamp>: <speed>, <direction>, <climb>m/s`, unset values printed as
/// `-1.0`.
pub fn format_course(course: &Course) -> String {
    let (speed, direction, climb) = course.or_sentinel();
    format!(
        "{}: {:.6}, {:.6}, {:.6}m/s",
        course.timestamp, speed, direction, climb
    )
}

/// Values as carried by the signal, whatever its fields say.
pub fn format_raw_position(signal: &PositionChanged) -> String {
    format!(
        "Latitude: {:.6}\nLongitude: {:.6}\nAltitude: {:.6}",
        signal.latitude, signal.longitude, signal.altitude
    )
}

pub fn format_raw_course(signal: &CourseChanged) -> String {
    format!(
        "Speed: {:.6}\nDirection: {:.6}\nClimb: {:.6}",
        signal.speed, signal.direction, signal.climb
    )
}

pub fn format_satellites(satellites: &[SatelliteDetails]) -> String {
    let in_use = satellites.iter().filter(|sat| sat.in_use).count();
    let mut out = format!("{} satellites, {} in use", satellites.len(), in_use);
    for sat in satellites {
        out.push_str(&format!(
            "\n  PRN {}: elevation {}, azimuth {}, SNR {}{}",
            sat.satellite_id,
            sat.elevation,
            sat.azimuth,
            sat.snr,
            if sat.in_use { " (in use)" } else { "" }
        ));
    }
    out
}

pub fn format_devices(devices: &[String]) -> String {
    if devices.is_empty() {
        return "No GPS devices found".to_string();
    }
    devices
        .iter()
        .enumerate()
        .map(|(idx, device)| format!("[{}] {}", idx + 1, device))
        .collect::<Vec<_>>()
        .join("\n")
}
