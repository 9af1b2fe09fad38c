//! Dump position and course signals of every Gypsy device on the bus.

use gypsy_tools::{connect, dispatch_forever, session, Result};
use gypsy_utils::clap::{get_matches_or_usage, new_gypsy_cmd, GypsyClap};

const USAGE: &str = "Usage: gypsy-monitor";

fn main() -> Result<()> {
    let matches = get_matches_or_usage(
        new_gypsy_cmd("gypsy-monitor")
            .about("Print raw position and course signals of all GPS devices")
            .add_config_arg(),
        std::env::args_os(),
        USAGE,
    );
    gypsy_utils::log::init_logger();

    let (config, bus) = connect(matches.get_one::<String>("config").map(String::as_str))?;
    session::monitor(&bus, |block| println!("{block}"))?;
    log::info!("monitoring {}", config.service);

    dispatch_forever(&bus, config.process_timeout())
}
