use tracing::info;

use crate::bus::Subscriber;
use crate::error::HandlerError;
use crate::event::VendingEvent;

/// Logs every event it receives through `tracing` at `info` level.
#[derive(Clone, Copy, Debug, Default)]
pub struct TraceSubscriber;

impl Subscriber for TraceSubscriber {
    fn handle(&self, event: &VendingEvent) -> Result<(), HandlerError> {
        match event.quantity() {
            Some(quantity) => info!(
                event_type = %event.event_type(),
                machine_id = %event.machine_id(),
                quantity,
                "event observed"
            ),
            None => info!(
                event_type = %event.event_type(),
                machine_id = %event.machine_id(),
                "event observed"
            ),
        }
        Ok(())
    }

    fn name(&self) -> &'static str {
        "trace"
    }
}
