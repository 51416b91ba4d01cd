use tracing::{debug, info, warn};

use crate::bus::{BusHandle, Publisher, Subscriber};
use crate::error::HandlerError;
use crate::event::VendingEvent;
use crate::machine::{Fleet, LOW_STOCK_THRESHOLD};

/// Applies `sale` events to machine stock.
///
/// Unless built with [`SaleSubscriber::without_alerts`], every sale that
/// leaves stock below the threshold publishes a `LowStockWarning`, with no
/// latch check.
pub struct SaleSubscriber {
    fleet: Fleet,
    bus: BusHandle,
    emit_alerts: bool,
}

impl SaleSubscriber {
    pub fn new(fleet: Fleet, bus: BusHandle) -> Self {
        Self {
            fleet,
            bus,
            emit_alerts: true,
        }
    }

    /// Only mutate stock; leave warnings to [`LowStockWarningSubscriber`](super::LowStockWarningSubscriber).
    pub fn without_alerts(fleet: Fleet, bus: BusHandle) -> Self {
        Self {
            fleet,
            bus,
            emit_alerts: false,
        }
    }
}

impl Subscriber for SaleSubscriber {
    fn handle(&self, event: &VendingEvent) -> Result<(), HandlerError> {
        let (machine_id, quantity) = match event {
            VendingEvent::Sale {
                machine_id,
                quantity,
            } => (machine_id, *quantity),
            VendingEvent::Refill { .. }
            | VendingEvent::LowStockWarning { .. }
            | VendingEvent::StockLevelOk { .. } => return Ok(()),
        };

        debug!(machine_id = %machine_id, quantity, "handling sale event");

        let stock_level = match self.fleet.update(machine_id, |m| m.sell(quantity))? {
            Some(Some(stock_level)) => stock_level,
            Some(None) => {
                return Err(HandlerError::StockOverflow {
                    machine_id: machine_id.clone(),
                    quantity,
                })
            }
            None => {
                debug!(machine_id = %machine_id, "sale for unknown machine ignored");
                return Ok(());
            }
        };

        if stock_level < 0 {
            warn!(machine_id = %machine_id, stock_level, "stock level went negative");
        }

        if self.emit_alerts && stock_level < LOW_STOCK_THRESHOLD {
            self.bus
                .publish(VendingEvent::low_stock_warning(machine_id.as_str()))?;
            info!(machine_id = %machine_id, stock_level, "published low stock warning");
        }

        Ok(())
    }

    fn name(&self) -> &'static str {
        "sale"
    }
}
