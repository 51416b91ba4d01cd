//! Non-owning publish handle given to subscribers.

use std::fmt;
use std::sync::Weak;

use super::service::Registry;
use super::Publisher;
use crate::error::PublishError;
use crate::event::VendingEvent;

/// Publishes onto the bus it was created from without keeping it alive.
///
/// The registry owns the subscribers and subscribers own a handle, so the
/// handle is weak to avoid a reference cycle. Publishing after the bus is
/// dropped fails with [`PublishError::BusClosed`].
#[derive(Clone)]
pub struct BusHandle {
    registry: Weak<Registry>,
}

impl BusHandle {
    pub(crate) fn new(registry: Weak<Registry>) -> Self {
        Self { registry }
    }

    /// Whether the bus behind this handle still exists.
    pub fn is_alive(&self) -> bool {
        self.registry.strong_count() > 0
    }
}

impl Publisher for BusHandle {
    fn publish(&self, event: VendingEvent) -> Result<usize, PublishError> {
        let registry = self.registry.upgrade().ok_or(PublishError::BusClosed)?;
        registry.dispatch(&event)
    }
}

impl fmt::Debug for BusHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BusHandle")
            .field("alive", &self.is_alive())
            .finish()
    }
}
