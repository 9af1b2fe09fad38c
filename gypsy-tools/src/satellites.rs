//! Print the satellites a GPS device sees, on every update.

use gypsy_client::Control;
use gypsy_tools::{connect, dispatch_forever, session, Error, Result};
use gypsy_utils::clap::{get_matches_or_usage, new_gypsy_cmd, GypsyClap};

const USAGE: &str = "Usage: gypsy-satellites <device>";

fn main() -> Result<()> {
    let matches = get_matches_or_usage(
        new_gypsy_cmd("gypsy-satellites")
            .about("Print satellites in view of a GPS device")
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

    session::watch_satellites(&bus, device, |block| println!("{block}"))?;
    let res = dispatch_forever(&bus, config.process_timeout());

    // release the daemon object even when dispatching failed
    if let Err(err) = Control::new(&bus).shutdown(device) {
        log::error!("Couldn't shutdown {}: {}", device, err);
    }
    res
}
