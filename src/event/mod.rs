//! Vending events and the type tags the bus routes them by.

mod event_type;
mod vending_event;

pub use event_type::{EventType, UnknownEventType};
pub use vending_event::VendingEvent;
