//! Hysteresis gates around the low-stock threshold.
//!
//! Both subscribers read stock after the stock subscribers have run, so they
//! must be registered after them on the same tag.

use tracing::info;

use crate::bus::{BusHandle, Publisher, Subscriber};
use crate::error::HandlerError;
use crate::event::VendingEvent;
use crate::machine::Fleet;

/// Subscribed to `sale`. Publishes `LowStockWarning` once per downward crossing.
pub struct LowStockWarningSubscriber {
    fleet: Fleet,
    bus: BusHandle,
}

impl LowStockWarningSubscriber {
    pub fn new(fleet: Fleet, bus: BusHandle) -> Self {
        Self { fleet, bus }
    }
}

impl Subscriber for LowStockWarningSubscriber {
    fn handle(&self, event: &VendingEvent) -> Result<(), HandlerError> {
        let machine_id = match event {
            VendingEvent::Sale { machine_id, .. } => machine_id,
            VendingEvent::Refill { .. }
            | VendingEvent::LowStockWarning { .. }
            | VendingEvent::StockLevelOk { .. } => return Ok(()),
        };

        let armed = self
            .fleet
            .update(machine_id, |m| m.is_low_stock() && m.arm_low_stock_warning())?;

        if armed == Some(true) {
            self.bus
                .publish(VendingEvent::low_stock_warning(machine_id.as_str()))?;
            info!(machine_id = %machine_id, "low stock latch armed");
        }
        Ok(())
    }

    fn name(&self) -> &'static str {
        "low_stock_warning"
    }
}

/// Subscribed to `refill`. Publishes `StockLevelOk` once per upward crossing.
///
/// Machines built at or above the threshold start with the ok latch set, so a
/// refill of a machine that was never low is silent.
pub struct StockLevelOkSubscriber {
    fleet: Fleet,
    bus: BusHandle,
}

impl StockLevelOkSubscriber {
    pub fn new(fleet: Fleet, bus: BusHandle) -> Self {
        Self { fleet, bus }
    }
}

impl Subscriber for StockLevelOkSubscriber {
    fn handle(&self, event: &VendingEvent) -> Result<(), HandlerError> {
        let machine_id = match event {
            VendingEvent::Refill { machine_id, .. } => machine_id,
            VendingEvent::Sale { .. }
            | VendingEvent::LowStockWarning { .. }
            | VendingEvent::StockLevelOk { .. } => return Ok(()),
        };

        let armed = self
            .fleet
            .update(machine_id, |m| !m.is_low_stock() && m.arm_stock_level_ok())?;

        if armed == Some(true) {
            self.bus
                .publish(VendingEvent::stock_level_ok(machine_id.as_str()))?;
            info!(machine_id = %machine_id, "stock level ok latch armed");
        }
        Ok(())
    }

    fn name(&self) -> &'static str {
        "stock_level_ok"
    }
}
