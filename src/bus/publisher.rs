//! Core publisher trait for the publish/subscribe service.

use serde::{Deserialize, Serialize};

use crate::error::PublishError;
use crate::event::VendingEvent;

/// What `publish` does when a handler returns an error.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DispatchPolicy {
    /// Abort the publish on the first failing handler and return its error.
    /// Handlers registered after it do not see the event.
    #[default]
    FailFast,
    /// Log each failure and keep dispatching to the remaining handlers.
    Isolate,
}

/// Trait for publishing events onto the bus.
///
/// Implemented by [`PublishSubscribeService`](super::PublishSubscribeService)
/// and by the [`BusHandle`](super::BusHandle) that subscribers hold.
pub trait Publisher: Send + Sync {
    /// Dispatch `event` to every handler registered for its type.
    ///
    /// Returns how many handlers were invoked for this event; handlers
    /// reached through nested publishes are not counted.
    fn publish(&self, event: VendingEvent) -> Result<usize, PublishError>;

    /// Publish several events in order.
    ///
    /// Default implementation publishes events sequentially and stops at
    /// the first error.
    fn publish_batch(&self, events: Vec<VendingEvent>) -> Result<usize, PublishError> {
        let mut invoked = 0;
        for event in events {
            invoked += self.publish(event)?;
        }
        Ok(invoked)
    }
}
