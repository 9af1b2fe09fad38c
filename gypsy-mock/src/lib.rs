//! In-memory [`Bus`] answering like the Gypsy daemon.
//!
//! Method calls are turned into real D-Bus messages and dispatched through a
//! `dbus-crossroads` object tree, so argument signatures are checked the same
//! way a daemon would check them. Signals pushed by the tree or by tests are
//! queued and delivered by `process()`, one per call, in order.

use dbus::{
    arg::{messageitem::MessageItem, AppendAll, IterAppend, ReadAll},
    channel::{Sender, Token},
    message::SignalArgs,
    Message, Path,
};
use dbus_crossroads::{Crossroads, IfaceToken};
use gypsy_client::{Bus, Error, Result};
use std::{
    cell::{Cell, RefCell},
    collections::VecDeque,
    sync::{Arc, Mutex},
    time::Duration,
};

pub mod daemon;

pub use daemon::{device_object_path, DeviceState, GypsyState};
use daemon::{lock_state, DeviceObject, Shared};

/// What the code under test did with the bus, in order.
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    Call {
        path: String,
        interface: String,
        method: String,
        args: Vec<MessageItem>,
    },
    Subscribe {
        path: Option<String>,
        interface: String,
        member: String,
    },
    /// Id of the removed subscription token.
    Unsubscribe(usize),
}

impl Event {
    pub fn is_call(&self, name: &str) -> bool {
        matches!(self, Event::Call { method, .. } if method == name)
    }

    pub fn is_subscribe(&self, name: &str) -> bool {
        matches!(self, Event::Subscribe { member, .. } if member == name)
    }
}

struct Subscription {
    token: Token,
    path: Option<Path<'static>>,
    handler: Box<dyn FnMut(&Message) -> bool>,
}

/// Collects what the object tree sends back.
#[derive(Default)]
struct Outbox(RefCell<Vec<Message>>);

impl Sender for Outbox {
    fn send(&self, msg: Message) -> std::result::Result<u32, ()> {
        self.0.borrow_mut().push(msg);
        Ok(0)
    }
}

pub struct MockBus {
    service: String,
    state: Shared,
    cr: RefCell<Crossroads>,
    device_ifaces: Vec<IfaceToken<DeviceObject>>,
    journal: RefCell<Vec<Event>>,
    incoming: RefCell<VecDeque<Message>>,
    subscriptions: RefCell<Vec<Subscription>>,
    serial: Cell<u32>,
    next_token: Cell<usize>,
}

impl Default for MockBus {
    fn default() -> Self {
        MockBus::new()
    }
}

impl MockBus {
    pub fn new() -> Self {
        let state: Shared = Arc::new(Mutex::new(GypsyState::default()));
        let tree = daemon::build(state.clone());
        MockBus {
            service: gypsy_utils::GYPSY_SERVICE.to_string(),
            state,
            cr: RefCell::new(tree.cr),
            device_ifaces: tree.device_ifaces,
            journal: RefCell::new(Vec::new()),
            incoming: RefCell::new(VecDeque::new()),
            subscriptions: RefCell::new(Vec::new()),
            serial: Cell::new(0),
            next_token: Cell::new(1),
        }
    }

    pub fn with_device(self, device_name: &str) -> Self {
        self.add_device(device_name);
        self
    }

    pub fn with_known_devices(self, devices: &[&str]) -> Self {
        lock_state(&self.state).known_devices = devices.iter().map(|d| d.to_string()).collect();
        self
    }

    /// Register a device object the daemon can hand out for `device_name`.
    ///
    /// Panics if `device_name` has no usable base name.
    pub fn add_device(&self, device_name: &str) -> Path<'static> {
        let path = match device_object_path(device_name) {
            Ok(path) => path,
            Err(err) => panic!("{err}"),
        };
        lock_state(&self.state)
            .devices
            .insert(path.to_string(), DeviceState::default());
        self.cr.borrow_mut().insert(
            path.clone(),
            &self.device_ifaces,
            DeviceObject::new(path.clone(), self.state.clone()),
        );
        path
    }

    /// Change the scripted state of the object created for `device_name`.
    pub fn update_device<F: FnOnce(&mut DeviceState)>(&self, device_name: &str, f: F) {
        let path = self.path_of(device_name);
        let mut state = lock_state(&self.state);
        match state.devices.get_mut(&*path) {
            Some(dev) => f(dev),
            None => panic!("no mock device {device_name}"),
        }
    }

    pub fn device_state(&self, device_name: &str) -> Option<DeviceState> {
        let path = device_object_path(device_name).ok()?;
        lock_state(&self.state).devices.get(&*path).cloned()
    }

    /// Device names created and not shut down yet.
    pub fn clients(&self) -> Vec<String> {
        lock_state(&self.state).clients.clone()
    }

    pub fn scanning(&self) -> bool {
        lock_state(&self.state).scanning
    }

    /// Queue `signal` as emitted by the daemon on `path`.
    pub fn emit<S: SignalArgs + AppendAll>(&self, path: &Path<'_>, signal: S) {
        self.incoming
            .borrow_mut()
            .push_back(signal.to_emit_message(path));
    }

    /// Queue `signal` as emitted by the object of `device_name`.
    pub fn emit_for<S: SignalArgs + AppendAll>(&self, device_name: &str, signal: S) {
        self.emit(&self.path_of(device_name), signal)
    }

    /// Deliver everything queued.
    pub fn drain(&self) -> Result<usize> {
        let mut count = 0;
        while self.process(Duration::ZERO)? {
            count += 1;
        }
        Ok(count)
    }

    pub fn journal(&self) -> Vec<Event> {
        self.journal.borrow().clone()
    }

    /// Arguments of every call to `method`, in order.
    pub fn calls(&self, method: &str) -> Vec<Vec<MessageItem>> {
        self.journal
            .borrow()
            .iter()
            .filter_map(|event| match event {
                Event::Call {
                    method: name, args, ..
                } if name == method => Some(args.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn subscription_count(&self) -> usize {
        self.subscriptions.borrow().len()
    }

    fn path_of(&self, device_name: &str) -> Path<'static> {
        match device_object_path(device_name) {
            Ok(path) => path,
            Err(err) => panic!("{err}"),
        }
    }

    fn next_serial(&self) -> u32 {
        let serial = self.serial.get() + 1;
        self.serial.set(serial);
        serial
    }
}

impl Bus for MockBus {
    fn call<A, R>(&self, path: &Path<'_>, interface: &str, method: &str, args: A) -> Result<R>
    where
        A: AppendAll,
        R: ReadAll,
    {
        let mut msg = Message::new_method_call(self.service.as_str(), path.clone(), interface, method)
            .map_err(Error::Error)?;
        AppendAll::append(&args, &mut IterAppend::new(&mut msg));
        let serial = self.next_serial();
        msg.set_serial(serial);

        self.journal.borrow_mut().push(Event::Call {
            path: path.to_string(),
            interface: interface.to_string(),
            method: method.to_string(),
            args: msg.get_items(),
        });

        let outbox = Outbox::default();
        self.cr
            .borrow_mut()
            .handle_message(msg, &outbox)
            .map_err(|_| Error::Error(format!("{interface}.{method} not handled")))?;

        let mut reply = None;
        for sent in outbox.0.into_inner() {
            if sent.get_reply_serial() == Some(serial) {
                reply = Some(sent);
            } else {
                self.incoming.borrow_mut().push_back(sent);
            }
        }
        let mut reply =
            reply.ok_or_else(|| Error::Error(format!("no reply to {interface}.{method}")))?;
        reply.as_result()?;
        Ok(R::read(&mut reply.iter_init())?)
    }

    fn subscribe<S, F>(&self, path: Option<&Path<'static>>, mut handler: F) -> Result<Token>
    where
        S: SignalArgs + ReadAll + 'static,
        F: FnMut(S) -> bool + Send + 'static,
    {
        let token = Token(self.next_token.get());
        self.next_token.set(token.0 + 1);

        self.journal.borrow_mut().push(Event::Subscribe {
            path: path.map(|p| p.to_string()),
            interface: S::INTERFACE.to_string(),
            member: S::NAME.to_string(),
        });
        self.subscriptions.borrow_mut().push(Subscription {
            token,
            path: path.cloned(),
            handler: Box::new(move |msg: &Message| match S::from_message(msg) {
                Some(signal) => handler(signal),
                None => true,
            }),
        });
        Ok(token)
    }

    fn unsubscribe(&self, token: Token) -> Result<()> {
        self.journal.borrow_mut().push(Event::Unsubscribe(token.0));
        self.subscriptions
            .borrow_mut()
            .retain(|sub| sub.token != token);
        Ok(())
    }

    fn process(&self, _timeout: Duration) -> Result<bool> {
        let msg = match self.incoming.borrow_mut().pop_front() {
            Some(msg) => msg,
            None => return Ok(false),
        };
        self.subscriptions.borrow_mut().retain_mut(|sub| {
            if let Some(path) = &sub.path {
                if msg.path().as_deref() != Some(&**path) {
                    return true;
                }
            }
            (sub.handler)(&msg)
        });
        Ok(true)
    }
}
