use serde::{Deserialize, Serialize};

use super::EventType;

/// Something that happened to (or should happen to) a single machine.
///
/// The variant set is closed; subscribers `match` on it instead of
/// inspecting runtime types.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum VendingEvent {
    Sale { machine_id: String, quantity: u32 },
    Refill { machine_id: String, quantity: u32 },
    LowStockWarning { machine_id: String },
    StockLevelOk { machine_id: String },
}

impl VendingEvent {
    /// `quantity` units sold from `machine_id`.
    pub fn sale(quantity: u32, machine_id: impl Into<String>) -> Self {
        VendingEvent::Sale {
            machine_id: machine_id.into(),
            quantity,
        }
    }

    /// `quantity` units added to `machine_id`.
    pub fn refill(quantity: u32, machine_id: impl Into<String>) -> Self {
        VendingEvent::Refill {
            machine_id: machine_id.into(),
            quantity,
        }
    }

    /// Alert: `machine_id` dropped below the low-stock threshold.
    pub fn low_stock_warning(machine_id: impl Into<String>) -> Self {
        VendingEvent::LowStockWarning {
            machine_id: machine_id.into(),
        }
    }

    /// Alert: `machine_id` is back at or above the threshold.
    pub fn stock_level_ok(machine_id: impl Into<String>) -> Self {
        VendingEvent::StockLevelOk {
            machine_id: machine_id.into(),
        }
    }

    /// The tag this event is dispatched under.
    pub fn event_type(&self) -> EventType {
        match self {
            VendingEvent::Sale { .. } => EventType::Sale,
            VendingEvent::Refill { .. } => EventType::Refill,
            VendingEvent::LowStockWarning { .. } => EventType::LowStockWarning,
            VendingEvent::StockLevelOk { .. } => EventType::StockLevelOk,
        }
    }

    /// The machine every variant refers to.
    pub fn machine_id(&self) -> &str {
        match self {
            VendingEvent::Sale { machine_id, .. }
            | VendingEvent::Refill { machine_id, .. }
            | VendingEvent::LowStockWarning { machine_id }
            | VendingEvent::StockLevelOk { machine_id } => machine_id,
        }
    }

    /// Units sold or refilled; `None` for alert events.
    pub fn quantity(&self) -> Option<u32> {
        match self {
            VendingEvent::Sale { quantity, .. } | VendingEvent::Refill { quantity, .. } => {
                Some(*quantity)
            }
            VendingEvent::LowStockWarning { .. } | VendingEvent::StockLevelOk { .. } => None,
        }
    }
}
