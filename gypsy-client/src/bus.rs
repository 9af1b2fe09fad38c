use crate::{Bus, Error, Result};
use dbus::{
    arg::{AppendAll, ReadAll},
    blocking::Connection,
    channel::Token,
    message::SignalArgs,
    strings::BusName,
    Message, Path,
};
use gypsy_config::{BusKind, Config};
use std::time::Duration;

/// [`Bus`] over a blocking libdbus connection.
pub struct SystemBus {
    conn: Connection,
    service: BusName<'static>,
    timeout: Duration,
}

impl SystemBus {
    pub fn new(config: &Config) -> Result<Self> {
        let service = BusName::new(config.service.clone()).map_err(Error::Error)?;
        let conn = match config.bus {
            BusKind::System => Connection::new_system()?,
            BusKind::Session => Connection::new_session()?,
        };
        log::debug!(
            "connected to {:?} bus as {}, service {}",
            config.bus,
            conn.unique_name(),
            service
        );
        Ok(SystemBus {
            conn,
            service,
            timeout: config.call_timeout(),
        })
    }
}

impl Bus for SystemBus {
    fn call<A, R>(&self, path: &Path<'_>, interface: &str, method: &str, args: A) -> Result<R>
    where
        A: AppendAll,
        R: ReadAll,
    {
        log::trace!("call {}.{} on {}", interface, method, path);
        let proxy = self
            .conn
            .with_proxy(self.service.clone(), path.clone(), self.timeout);
        Ok(proxy.method_call(interface, method, args)?)
    }

    fn subscribe<S, F>(&self, path: Option<&Path<'static>>, mut handler: F) -> Result<Token>
    where
        S: SignalArgs + ReadAll + 'static,
        F: FnMut(S) -> bool + Send + 'static,
    {
        let rule = S::match_rule(None, path).static_clone();
        log::debug!("add match {}", rule.match_str());
        Ok(self
            .conn
            .add_match(rule, move |signal: S, _: &Connection, _: &Message| {
                handler(signal)
            })?)
    }

    fn unsubscribe(&self, token: Token) -> Result<()> {
        Ok(self.conn.remove_match(token)?)
    }

    fn process(&self, timeout: Duration) -> Result<bool> {
        Ok(self.conn.process(timeout)?)
    }
}
