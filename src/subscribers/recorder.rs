use std::sync::{Arc, Mutex, PoisonError};

use crate::bus::Subscriber;
use crate::error::HandlerError;
use crate::event::{EventType, VendingEvent};

/// Appends every event it receives to a shared, ordered log.
///
/// Clones share the same log, so a clone can be registered on the bus while
/// another handle is kept for inspection.
#[derive(Clone, Default)]
pub struct EventRecorder {
    log: Arc<Mutex<Vec<VendingEvent>>>,
}

impl EventRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// All recorded events, in arrival order.
    pub fn events(&self) -> Vec<VendingEvent> {
        self.log
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Tags of the recorded events, in arrival order.
    pub fn event_types(&self) -> Vec<EventType> {
        self.log
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .map(VendingEvent::event_type)
            .collect()
    }

    /// Recorded events of one type.
    pub fn find_all_by_type(&self, event_type: EventType) -> Vec<VendingEvent> {
        self.log
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter(|e| e.event_type() == event_type)
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.log.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop everything recorded so far.
    pub fn clear(&self) {
        self.log
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

impl Subscriber for EventRecorder {
    fn handle(&self, event: &VendingEvent) -> Result<(), HandlerError> {
        self.log
            .lock()
            .map_err(|_| HandlerError::LockPoisoned("recorder"))?
            .push(event.clone());
        Ok(())
    }

    fn name(&self) -> &'static str {
        "recorder"
    }
}
