//! Realtime fan-out of chat events.
//!
//! Each ride with at least one subscriber owns a broadcast channel; every
//! subscriber receives a copy of every event published for that ride. A
//! websocket layer is expected to hold one receiver per connection and
//! forward events to the socket. Slow subscribers lag rather than block
//! publishers: a receiver that falls more than the channel capacity behind
//! observes `RecvError::Lagged` and can resync from stored history.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use tokio::sync::broadcast;

use crate::model::chat::ChatEvent;

/// Events buffered per ride before slow subscribers start lagging.
const DEFAULT_CHANNEL_CAPACITY: usize = 256;

/// Per-ride broadcast hub for chat events.
///
/// Cheap to clone; clones share the channel map.
#[derive(Clone)]
pub struct ChatHub {
    channels: Arc<Mutex<HashMap<i32, broadcast::Sender<ChatEvent>>>>,
    capacity: usize,
}

impl ChatHub {
    /// Creates a hub whose per-ride channels buffer `capacity` events.
    pub fn new(capacity: usize) -> Self {
        Self {
            channels: Arc::new(Mutex::new(HashMap::new())),
            capacity,
        }
    }

    /// Subscribes to a ride's chat events, creating the channel on first use.
    pub fn subscribe(&self, ride_id: i32) -> broadcast::Receiver<ChatEvent> {
        let mut channels = self
            .channels
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        channels
            .entry(ride_id)
            .or_insert_with(|| broadcast::channel(self.capacity).0)
            .subscribe()
    }

    /// Delivers an event to every current subscriber of the ride.
    ///
    /// A ride nobody listens to is not an error; the event is simply
    /// dropped and the stale channel pruned.
    ///
    /// # Returns
    /// - Number of subscribers the event was delivered to
    pub fn publish(&self, ride_id: i32, event: ChatEvent) -> usize {
        let mut channels = self
            .channels
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        let Some(sender) = channels.get(&ride_id) else {
            return 0;
        };

        match sender.send(event) {
            Ok(receivers) => receivers,
            Err(_) => {
                // Every receiver is gone; drop the channel.
                channels.remove(&ride_id);
                0
            }
        }
    }

    /// Number of rides that currently have a live channel.
    pub fn active_rides(&self) -> usize {
        self.channels
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .len()
    }
}

impl Default for ChatHub {
    fn default() -> Self {
        Self::new(DEFAULT_CHANNEL_CAPACITY)
    }
}
