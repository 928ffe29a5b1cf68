use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::broadcast;

/// Event key type
pub type EventKey = String;

/// Event payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EventPayload {
    String(String),
    Map(HashMap<String, serde_json::Value>),
}

/// Pool lifecycle event
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IpamEvent {
    /// Event key (e.g., "pool.registered", "child.released")
    pub key: EventKey,

    /// Event payload
    pub payload: EventPayload,

    /// Timestamp
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

impl IpamEvent {
    /// Create a new event
    pub fn new(key: impl Into<String>, payload: EventPayload) -> Self {
        Self {
            key: key.into(),
            payload,
            timestamp: chrono::Utc::now(),
        }
    }

    /// Create an event with a string payload
    pub fn with_string(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(key, EventPayload::String(message.into()))
    }

    /// Create an event with a map payload
    pub fn with_map(key: impl Into<String>, map: HashMap<String, serde_json::Value>) -> Self {
        Self::new(key, EventPayload::Map(map))
    }
}

/// Event emitter
#[derive(Clone)]
pub struct EventEmitter {
    sender: Arc<broadcast::Sender<IpamEvent>>,
}

impl EventEmitter {
    /// Create a new event emitter
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self {
            sender: Arc::new(sender),
        }
    }

    /// Emit an event. Dropped silently when nobody is subscribed.
    pub fn emit(&self, event: IpamEvent) {
        let _ = self.sender.send(event);
    }

    /// Subscribe to events
    pub fn subscribe(&self) -> broadcast::Receiver<IpamEvent> {
        self.sender.subscribe()
    }
}

impl std::fmt::Debug for EventEmitter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventEmitter")
            .field("subscribers", &self.sender.receiver_count())
            .finish()
    }
}

/// Event catalog - predefined event keys
pub mod events {
    pub const POOL_REGISTERED: &str = "pool.registered";
    pub const POOL_RELEASED: &str = "pool.released";
    pub const POOL_AUTO_RELEASED: &str = "pool.auto_released";
    pub const CHILD_ALLOCATED: &str = "child.allocated";
    pub const CHILD_RELEASED: &str = "child.released";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_emit_and_receive() {
        let emitter = EventEmitter::new(8);
        let mut rx = emitter.subscribe();

        emitter.emit(IpamEvent::with_string(
            events::POOL_REGISTERED,
            "LocalDefault/10.0.0.0/24",
        ));

        let event = rx.recv().await.unwrap();
        assert_eq!(event.key, "pool.registered");
        assert!(matches!(event.payload, EventPayload::String(ref s) if s == "LocalDefault/10.0.0.0/24"));
    }

    #[test]
    fn test_emit_without_subscribers() {
        let emitter = EventEmitter::new(4);
        emitter.emit(IpamEvent::with_string(events::POOL_RELEASED, "x"));
    }

    #[test]
    fn test_map_payload_serializes_untagged() {
        let mut map = HashMap::new();
        map.insert("pool".to_string(), serde_json::json!("LocalDefault/10.0.0.0/16"));
        let event = IpamEvent::with_map(events::CHILD_ALLOCATED, map);
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["key"], "child.allocated");
        assert_eq!(json["payload"]["pool"], "LocalDefault/10.0.0.0/16");
    }
}
