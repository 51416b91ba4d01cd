use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Type tag used as the subscription key on the bus.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EventType {
    Sale,
    Refill,
    LowStockWarning,
    StockLevelOk,
}

impl EventType {
    pub const ALL: [EventType; 4] = [
        EventType::Sale,
        EventType::Refill,
        EventType::LowStockWarning,
        EventType::StockLevelOk,
    ];

    /// The wire tag for this type (`sale`, `refill`, `lowStockWarning`, `stockLevelOk`).
    pub fn as_str(&self) -> &'static str {
        match self {
            EventType::Sale => "sale",
            EventType::Refill => "refill",
            EventType::LowStockWarning => "lowStockWarning",
            EventType::StockLevelOk => "stockLevelOk",
        }
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown event type tag: {0:?}")]
pub struct UnknownEventType(pub String);

impl FromStr for EventType {
    type Err = UnknownEventType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EventType::ALL
            .into_iter()
            .find(|ty| ty.as_str() == s)
            .ok_or_else(|| UnknownEventType(s.to_string()))
    }
}
