//! Parse the gypsy client toml configuration file. `conf_read()` and
//! `conf_parse()` are separated like in every tool of the workspace;
//! `conf_load()` combines them and falls back to defaults when the default
//! configuration file is absent.

use serde::Deserialize;
use std::{fs, io, time::Duration};

#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum BusKind {
    #[default]
    System,
    Session,
}

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub bus: BusKind,
    pub service: String,
    pub call_timeout_ms: u64,
    pub process_timeout_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            bus: BusKind::System,
            service: gypsy_utils::GYPSY_SERVICE.to_string(),
            call_timeout_ms: gypsy_utils::CALL_TIMEOUT_MS,
            process_timeout_ms: gypsy_utils::PROCESS_TIMEOUT_MS,
        }
    }
}

impl Config {
    pub fn call_timeout(&self) -> Duration {
        Duration::from_millis(self.call_timeout_ms)
    }

    pub fn process_timeout(&self) -> Duration {
        Duration::from_millis(self.process_timeout_ms)
    }
}

pub fn conf_read(config_path: &str) -> io::Result<String> {
    log::debug!("read config file: {}", config_path);
    fs::read_to_string(config_path)
}

pub fn conf_parse(conf_str: &str) -> io::Result<Config> {
    toml::from_str(conf_str).map_err(|err| {
        io::Error::new(
            io::ErrorKind::InvalidData,
            format!("Couldn't parse config: {}", err),
        )
    })
}

/// Load the configuration at `config_path`, or at the default location when
/// `None`. Only a missing default file is tolerated.
pub fn conf_load(config_path: Option<&str>) -> io::Result<Config> {
    match config_path {
        Some(path) => conf_parse(&conf_read(path)?),
        None => match conf_read(gypsy_utils::GYPSY_CONFIG) {
            Ok(conf_str) => conf_parse(&conf_str),
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                log::debug!("no config file, using defaults");
                Ok(Config::default())
            }
            Err(err) => Err(err),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const CONF: &str = r#"
bus = "session"
service = "org.example.Gypsy"
call_timeout_ms = 500
"#;

    #[test]
    fn test_partial_config() {
        let config = conf_parse(CONF).expect("can't parse toml");
        assert_eq!(config.bus, BusKind::Session);
        assert_eq!(config.service, "org.example.Gypsy");
        assert_eq!(config.call_timeout(), Duration::from_millis(500));
        assert_eq!(
            config.process_timeout_ms,
            gypsy_utils::PROCESS_TIMEOUT_MS
        );
    }

    #[test]
    fn test_empty_config() {
        assert_eq!(conf_parse("").expect("empty config"), Config::default());
        assert_eq!(Config::default().service, "org.freedesktop.Gypsy");
    }

    #[test]
    fn test_bad_config() {
        let err = conf_parse("bus = \"tcp\"").unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
        let err = conf_parse("unknown_key = 1").unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
    }

    #[test]
    fn test_load_explicit_path() {
        let mut file = tempfile::NamedTempFile::new().expect("tmp file");
        file.write_all(CONF.as_bytes()).expect("write config");
        let path = file.path().to_str().expect("utf8 path").to_string();
        let config = conf_load(Some(&path)).expect("load config");
        assert_eq!(config.bus, BusKind::Session);

        let missing = format!("{path}.missing");
        let err = conf_load(Some(&missing)).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }
}
