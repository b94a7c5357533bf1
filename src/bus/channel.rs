//! EventBus - in-process publish/subscribe channel
//!
//! The bus is a plain value handed to whoever publishes; there is no global
//! instance. Publishing only queues an event. The owner of the subscribers
//! (the simulation) drains the queue and hands each event to the
//! subscribers of its topic, in the order they subscribed, before the
//! publishing phase returns.

use std::collections::VecDeque;

use ahash::AHashMap;

use crate::bus::events::{GameEvent, Topic};
use crate::core::random::GameRng;
use crate::core::types::{Coords, RaceId};

/// Address of a subscriber, resolved by the owner of the subscribers
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SubscriberId {
    Race(RaceId),
    Cell(Coords),
}

/// Something that reacts to bus events
pub trait Subscriber {
    fn subscriber_id(&self) -> SubscriberId;

    /// Topics this subscriber registers for
    fn topics(&self) -> &'static [Topic];

    /// React to an event; replies go back onto `bus`
    fn on_event(&mut self, event: &GameEvent, bus: &mut EventBus, rng: &mut GameRng);
}

#[derive(Debug, Default)]
pub struct EventBus {
    pending: VecDeque<GameEvent>,
    subscriptions: AHashMap<Topic, Vec<SubscriberId>>,
    published: u64,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribe `id` to `topic`; subscribing twice is a no-op
    pub fn subscribe(&mut self, id: SubscriberId, topic: Topic) {
        let list = self.subscriptions.entry(topic).or_default();
        if !list.contains(&id) {
            list.push(id);
        }
    }

    /// Subscribe to every topic the subscriber lists
    pub fn register(&mut self, subscriber: &dyn Subscriber) {
        let id = subscriber.subscriber_id();
        for &topic in subscriber.topics() {
            self.subscribe(id, topic);
        }
    }

    /// Subscribers of `topic` in subscription order
    pub fn subscribers(&self, topic: Topic) -> &[SubscriberId] {
        self.subscriptions
            .get(&topic)
            .map(|list| list.as_slice())
            .unwrap_or(&[])
    }

    pub fn publish(&mut self, event: GameEvent) {
        self.published += 1;
        self.pending.push_back(event);
    }

    /// Oldest undelivered event
    pub fn next_pending(&mut self) -> Option<GameEvent> {
        self.pending.pop_front()
    }

    /// True when nothing is waiting to be delivered
    pub fn is_idle(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// Total events published over the bus lifetime
    pub fn published(&self) -> u64 {
        self.published
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::Process;

    fn declined(to: u32) -> GameEvent {
        GameEvent::ProcessDeclined {
            to: RaceId(to),
            target: Coords::new(0, 0),
            process: Process::BuildFabric,
        }
    }

    #[test]
    fn test_fifo_delivery_order() {
        let mut bus = EventBus::new();
        bus.publish(declined(1));
        bus.publish(declined(2));

        assert_eq!(bus.pending_len(), 2);
        assert_eq!(bus.next_pending(), Some(declined(1)));
        assert_eq!(bus.next_pending(), Some(declined(2)));
        assert!(bus.is_idle());
        assert_eq!(bus.published(), 2);
    }

    #[test]
    fn test_subscription_order_is_kept() {
        let mut bus = EventBus::new();
        bus.subscribe(SubscriberId::Race(RaceId(2)), Topic::ProcessDeclined);
        bus.subscribe(SubscriberId::Race(RaceId(0)), Topic::ProcessDeclined);
        bus.subscribe(SubscriberId::Race(RaceId(2)), Topic::ProcessDeclined);

        assert_eq!(
            bus.subscribers(Topic::ProcessDeclined),
            &[SubscriberId::Race(RaceId(2)), SubscriberId::Race(RaceId(0))]
        );
        assert!(bus.subscribers(Topic::CellEligible).is_empty());
    }
}
