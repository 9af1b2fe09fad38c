#[cfg(feature = "log-json")]
use {
    env_logger::{Builder, Env},
    std::io::Write,
};

#[cfg(feature = "log-json")]
pub fn init_logger() {
    let mut builder = Builder::from_env(Env::default().filter_or("RUST_LOG", "info"));
    builder.format(move |buf, record| {
        write!(buf, "{{")?;
        write!(
            buf,
            "\"ts\":\"{}\",",
            time::OffsetDateTime::now_utc()
                .format(&time::format_description::well_known::Rfc3339)
                .unwrap_or_default()
        )?;
        write!(buf, " \"level\":\"{}\",", record.level())?;
        write!(buf, " \"target\":\"{}\",", record.target())?;
        write!(buf, " \"msg\":{},", serde_json::to_string(&record.args())?)?;
        write!(buf, " \"pid\":{}", std::process::id())?;
        writeln!(buf, "}}")?;

        Ok(())
    });
    builder.init();
}

// Records go to stderr, stdout is reserved for tool output.
#[cfg(not(feature = "log-json"))]
pub fn init_logger() {
    env_logger::init_from_env(env_logger::Env::default().filter_or("RUST_LOG", "info"));
}
