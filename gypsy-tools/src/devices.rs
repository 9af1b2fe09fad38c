//! List the GPS devices the Gypsy daemon knows about.

use gypsy_tools::{connect, session, Result};
use gypsy_utils::clap::{get_matches_or_usage, new_gypsy_cmd, GypsyClap};

const USAGE: &str = "Usage: gypsy-devices";

fn main() -> Result<()> {
    let matches = get_matches_or_usage(
        new_gypsy_cmd("gypsy-devices")
            .about("List GPS devices known to the Gypsy daemon")
            .add_config_arg(),
        std::env::args_os(),
        USAGE,
    );
    gypsy_utils::log::init_logger();

    let (_, bus) = connect(matches.get_one::<String>("config").map(String::as_str))?;
    println!("{}", session::list_devices(&bus)?);
    Ok(())
}
