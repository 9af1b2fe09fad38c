pub trait GypsyClap {
    fn add_config_arg(self) -> Self;
    fn add_device_arg(self) -> Self;
}

impl GypsyClap for clap::Command {
    fn add_config_arg(self) -> Self {
        self.arg(
            clap::Arg::new("config")
                .short('c')
                .long("config")
                .value_name("CONFIG_PATH")
                .help("Path of the configuration file")
                .num_args(1)
                .required(false),
        )
    }

    fn add_device_arg(self) -> Self {
        self.arg(
            clap::Arg::new("device")
                .value_name("DEVICE")
                .help("GPS device to open (device node or Bluetooth address)")
                .num_args(1)
                .required(true),
        )
    }
}

pub fn new_gypsy_cmd(name: impl Into<clap::builder::Str>) -> clap::Command {
    clap::Command::new(name).version(crate::GYPSY_VERSION)
}

/// Parse `args` with `command`. Help and version requests are displayed
/// and exit 0; any other parse error prints `usage` on stdout and exits 1.
pub fn get_matches_or_usage<I, T>(command: clap::Command, args: I, usage: &str) -> clap::ArgMatches
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    match command.try_get_matches_from(args) {
        Ok(matches) => matches,
        Err(err) => match err.kind() {
            clap::error::ErrorKind::DisplayHelp | clap::error::ErrorKind::DisplayVersion => {
                err.exit()
            }
            _ => {
                println!("{usage}");
                std::process::exit(1);
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cmd() -> clap::Command {
        new_gypsy_cmd("gypsy-test").add_config_arg().add_device_arg()
    }

    #[test]
    fn test_device_and_config() {
        let matches = cmd()
            .try_get_matches_from(["gypsy-test", "-c", "/tmp/client.toml", "00:11:22:33:44:55"])
            .expect("valid command line");
        assert_eq!(
            matches.get_one::<String>("device").map(String::as_str),
            Some("00:11:22:33:44:55")
        );
        assert_eq!(
            matches.get_one::<String>("config").map(String::as_str),
            Some("/tmp/client.toml")
        );
    }

    #[test]
    fn test_device_count() {
        assert!(cmd().try_get_matches_from(["gypsy-test"]).is_err());
        assert!(cmd()
            .try_get_matches_from(["gypsy-test", "/dev/rfcomm0", "/dev/rfcomm1"])
            .is_err());
        let matches = cmd()
            .try_get_matches_from(["gypsy-test", "/dev/rfcomm0"])
            .expect("one device");
        assert!(matches.get_one::<String>("config").is_none());
    }
}
