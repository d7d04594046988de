//! Message channel boundary
//!
//! The transport that discovers senders and moves serialized messages is an
//! external collaborator. The bridge only needs a way to send an outbound
//! payload and a stream of [`ChannelEvent`]s delivered by whoever owns the
//! real session layer.

use crate::error::Result;
use std::sync::Mutex;

/// Notifications delivered by the transport
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChannelEvent {
    /// A remote sender attached to the session
    SenderConnected(String),
    /// A remote sender detached from the session
    SenderDisconnected(String),
    /// A serialized inbound message from a sender
    Message { sender: String, payload: String },
}

/// Outbound half of the transport
///
/// Delivery is fire-and-forget; the bridge never waits for confirmation.
/// `target` is the addressed sender id, or `None` when no sender is
/// connected (the transport may drop such messages).
pub trait MessageChannel {
    fn send(&self, payload: &str, target: Option<&str>) -> Result<()>;
}

/// In-memory channel that records outbound traffic for inspection
pub struct RecordingChannel {
    sent: Mutex<Vec<(Option<String>, String)>>,
}

impl RecordingChannel {
    pub fn new() -> Self {
        RecordingChannel {
            sent: Mutex::new(Vec::new()),
        }
    }

    /// All (target, payload) pairs sent so far, in order
    pub fn sent(&self) -> Vec<(Option<String>, String)> {
        self.sent.lock().unwrap().clone()
    }

    /// Payload of the most recent send, if any
    pub fn last_payload(&self) -> Option<String> {
        self.sent.lock().unwrap().last().map(|(_, p)| p.clone())
    }

    pub fn sent_count(&self) -> usize {
        self.sent.lock().unwrap().len()
    }
}

impl Default for RecordingChannel {
    fn default() -> Self {
        Self::new()
    }
}

impl MessageChannel for RecordingChannel {
    fn send(&self, payload: &str, target: Option<&str>) -> Result<()> {
        self.sent
            .lock()
            .unwrap()
            .push((target.map(|s| s.to_string()), payload.to_string()));
        Ok(())
    }
}
