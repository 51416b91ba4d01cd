//! Core subscriber trait for the publish/subscribe service.

use crate::error::HandlerError;
use crate::event::VendingEvent;

/// A handler registered against one or more event types.
///
/// This is a push-based interface: the bus calls [`Subscriber::handle`]
/// synchronously from inside `publish`, on the publisher's thread. A handler
/// may publish further events; those are dispatched before `handle` returns.
pub trait Subscriber: Send + Sync {
    /// React to a single event.
    fn handle(&self, event: &VendingEvent) -> Result<(), HandlerError>;

    /// Name used in logs and in [`PublishError::Handler`](crate::PublishError::Handler).
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}
