use tracing::{debug, info};

use crate::bus::{BusHandle, Publisher, Subscriber};
use crate::error::HandlerError;
use crate::event::VendingEvent;
use crate::machine::{Fleet, LOW_STOCK_THRESHOLD};

/// Applies `refill` events to machine stock.
///
/// Publishes `StockLevelOk` when a refill lifts stock from below the
/// threshold to at or above it.
pub struct RefillSubscriber {
    fleet: Fleet,
    bus: BusHandle,
    emit_alerts: bool,
}

impl RefillSubscriber {
    pub fn new(fleet: Fleet, bus: BusHandle) -> Self {
        Self {
            fleet,
            bus,
            emit_alerts: true,
        }
    }

    /// Only mutate stock; leave ok events to [`StockLevelOkSubscriber`](super::StockLevelOkSubscriber).
    pub fn without_alerts(fleet: Fleet, bus: BusHandle) -> Self {
        Self {
            fleet,
            bus,
            emit_alerts: false,
        }
    }
}

impl Subscriber for RefillSubscriber {
    fn handle(&self, event: &VendingEvent) -> Result<(), HandlerError> {
        let (machine_id, quantity) = match event {
            VendingEvent::Refill {
                machine_id,
                quantity,
            } => (machine_id, *quantity),
            VendingEvent::Sale { .. }
            | VendingEvent::LowStockWarning { .. }
            | VendingEvent::StockLevelOk { .. } => return Ok(()),
        };

        debug!(machine_id = %machine_id, quantity, "handling refill event");

        let applied = self.fleet.update(machine_id, |m| {
            m.refill(quantity).map(|previous| (previous, m.stock_level()))
        })?;
        let (previous, stock_level) = match applied {
            Some(Some(levels)) => levels,
            Some(None) => {
                return Err(HandlerError::StockOverflow {
                    machine_id: machine_id.clone(),
                    quantity,
                })
            }
            None => {
                debug!(machine_id = %machine_id, "refill for unknown machine ignored");
                return Ok(());
            }
        };

        let recovered = previous < LOW_STOCK_THRESHOLD && stock_level >= LOW_STOCK_THRESHOLD;
        if self.emit_alerts && recovered {
            self.bus
                .publish(VendingEvent::stock_level_ok(machine_id.as_str()))?;
            info!(machine_id = %machine_id, stock_level, "published stock level ok");
        }

        Ok(())
    }

    fn name(&self) -> &'static str {
        "refill"
    }
}
