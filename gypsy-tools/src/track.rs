//! Print position and course updates of a GPS device.

use gypsy_tools::{connect, dispatch_forever, session, Error, Result};
use gypsy_utils::clap::{get_matches_or_usage, new_gypsy_cmd, GypsyClap};

const USAGE: &str = "Usage: gypsy-track <device>";

fn main() -> Result<()> {
    let matches = get_matches_or_usage(
        new_gypsy_cmd("gypsy-track")
            .about("Print position and course of a GPS device")
            .add_config_arg()
            .add_device_arg(),
        std::env::args_os(),
        USAGE,
    );
    gypsy_utils::log::init_logger();

    let device = matches
        .get_one::<String>("device")
        .ok_or_else(|| Error::Error(USAGE.to_string()))?;
    let (config, bus) = connect(matches.get_one::<String>("config").map(String::as_str))?;

    let path = session::watch_track(&bus, device, |line| println!("{line}"))?;
    log::debug!("tracking {}", path);

    dispatch_forever(&bus, config.process_timeout())
}
