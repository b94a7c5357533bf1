//! Event channel shared by cells and races

pub mod channel;
pub mod events;
pub mod history;

pub use channel::{EventBus, Subscriber, SubscriberId};
pub use events::{CellInfo, GameEvent, Recipient, Topic};
pub use history::{HistoryEntry, HistoryLog};
