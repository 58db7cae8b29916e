// NetworkManager signal subscription
//
// One match rule per watched (interface, member) pair, merged into a single
// stream. Each message is reduced to the few header fields needed to
// classify it; the consumer never sees raw zbus messages.

use std::collections::HashMap;
use std::pin::Pin;

use futures_util::stream::{self, SelectAll, Stream, StreamExt};
use tracing::{debug, warn};
use zbus::message::Type as MessageType;
use zbus::zvariant::OwnedValue;
use zbus::{MatchRule, Message, MessageStream};

use crate::client::{
    DEVICE_IFACE, NM_IFACE, NM_PATH, NmClient, PROPERTIES_IFACE, SETTINGS_IFACE, WIRELESS_IFACE,
};
use crate::error::Result;

/// Queue depth per match rule before zbus starts dropping messages.
const RULE_QUEUE: usize = 64;

/// Every signal the dashboard reacts to.
pub const WATCHED_SIGNALS: [(&str, &str); 8] = [
    (PROPERTIES_IFACE, "PropertiesChanged"),
    (NM_IFACE, "DeviceAdded"),
    (NM_IFACE, "DeviceRemoved"),
    (DEVICE_IFACE, "StateChanged"),
    (SETTINGS_IFACE, "NewConnection"),
    (SETTINGS_IFACE, "ConnectionRemoved"),
    (WIRELESS_IFACE, "AccessPointAdded"),
    (WIRELESS_IFACE, "AccessPointRemoved"),
];

/// Header summary of one received signal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawSignal {
    pub interface: String,
    pub member: String,
    /// Object path the signal was emitted from.
    pub path: String,
    /// For `PropertiesChanged`, the interface whose properties changed.
    pub changed_interface: Option<String>,
}

impl RawSignal {
    pub fn new(interface: impl Into<String>, member: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            interface: interface.into(),
            member: member.into(),
            path: path.into(),
            changed_interface: None,
        }
    }

    #[must_use]
    pub fn with_changed_interface(mut self, interface: impl Into<String>) -> Self {
        self.changed_interface = Some(interface.into());
        self
    }

    pub fn from_message(msg: &Message) -> Self {
        let header = msg.header();
        let interface = header.interface().map(|i| i.to_string()).unwrap_or_default();
        let member = header.member().map(|m| m.to_string()).unwrap_or_default();
        let path = header.path().map(|p| p.to_string()).unwrap_or_default();

        let changed_interface = if interface == PROPERTIES_IFACE {
            msg.body()
                .deserialize::<(String, HashMap<String, OwnedValue>, Vec<String>)>()
                .map(|(iface, _, _)| iface)
                .ok()
        } else {
            None
        };

        Self {
            interface,
            member,
            path,
            changed_interface,
        }
    }

    /// `interface.member`, as printed in logs.
    pub fn name(&self) -> String {
        format!("{}.{}", self.interface, self.member)
    }
}

type BoxedMessages = Pin<Box<dyn Stream<Item = zbus::Result<Message>> + Send>>;

/// Merged stream of every watched NetworkManager signal.
pub struct SignalStream {
    inner: SelectAll<BoxedMessages>,
}

impl SignalStream {
    /// Register all match rules on the client's connection.
    pub async fn subscribe(client: &NmClient) -> Result<Self> {
        let mut streams: Vec<BoxedMessages> = Vec::with_capacity(WATCHED_SIGNALS.len());
        for (interface, member) in WATCHED_SIGNALS {
            let rule = MatchRule::builder()
                .msg_type(MessageType::Signal)
                .interface(interface)?
                .member(member)?
                .path_namespace(NM_PATH)?
                .build();
            let messages =
                MessageStream::for_match_rule(rule, client.connection(), Some(RULE_QUEUE)).await?;
            streams.push(Box::pin(messages));
        }
        debug!(rules = streams.len(), "subscribed to NetworkManager signals");

        Ok(Self {
            inner: stream::select_all(streams),
        })
    }

    /// Wait for the next signal. `None` once the bus connection is gone.
    pub async fn next(&mut self) -> Option<RawSignal> {
        loop {
            match self.inner.next().await? {
                Ok(msg) => return Some(RawSignal::from_message(&msg)),
                Err(e) => warn!(error = %e, "dropping unreadable signal"),
            }
        }
    }
}
