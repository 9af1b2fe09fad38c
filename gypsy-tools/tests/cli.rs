use assert_cmd::prelude::*;
use std::process::Command;

#[test]
fn test_watch_without_device() {
    Command::cargo_bin("gypsy-watch")
        .expect("gypsy-watch binary")
        .assert()
        .code(1)
        .stdout("Usage: gypsy-watch <device>\n");
}

#[test]
fn test_watch_with_two_devices() {
    Command::cargo_bin("gypsy-watch")
        .expect("gypsy-watch binary")
        .args(["/dev/ttyUSB0", "/dev/ttyUSB1"])
        .assert()
        .code(1)
        .stdout("Usage: gypsy-watch <device>\n");
}

#[test]
fn test_watch_help() {
    Command::cargo_bin("gypsy-watch")
        .expect("gypsy-watch binary")
        .arg("--help")
        .assert()
        .success();
}

#[test]
fn test_satellites_usage() {
    Command::cargo_bin("gypsy-satellites")
        .expect("gypsy-satellites binary")
        .assert()
        .code(1)
        .stdout("Usage: gypsy-satellites <device>\n");
}

#[test]
fn test_missing_explicit_config() {
    Command::cargo_bin("gypsy-watch")
        .expect("gypsy-watch binary")
        .args(["-c", "/nonexistent/gypsy/client.toml", "/dev/ttyUSB0"])
        .assert()
        .failure()
        .stdout("");
}

#[test]
fn test_track_usage() {
    Command::cargo_bin("gypsy-track")
        .expect("gypsy-track binary")
        .args(["/dev/ttyUSB0", "/dev/ttyUSB1"])
        .assert()
        .code(1)
        .stdout("Usage: gypsy-track <device>\n");
}

#[test]
fn test_monitor_rejects_positionals() {
    Command::cargo_bin("gypsy-monitor")
        .expect("gypsy-monitor binary")
        .arg("/dev/ttyUSB0")
        .assert()
        .code(1)
        .stdout("Usage: gypsy-monitor\n");
}

#[test]
fn test_devices_rejects_unknown_option() {
    Command::cargo_bin("gypsy-devices")
        .expect("gypsy-devices binary")
        .arg("--verbose")
        .assert()
        .code(1)
        .stdout("Usage: gypsy-devices\n");
}
