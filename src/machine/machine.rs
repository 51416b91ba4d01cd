use serde::{Deserialize, Serialize};

/// Stock every machine starts with unless told otherwise.
pub const DEFAULT_STOCK_LEVEL: i64 = 10;

/// Stock below this level counts as low.
pub const LOW_STOCK_THRESHOLD: i64 = 3;

/// Mutable stock state for one vending machine.
///
/// The two latches are mutually exclusive: arming one clears the other, so
/// each threshold crossing can notify exactly once. A machine that starts at
/// or above the threshold starts with the ok latch set.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Machine {
    id: String,
    stock_level: i64,
    low_stock_warning_fired: bool,
    stock_level_ok_fired: bool,
}

impl Machine {
    /// A machine holding [`DEFAULT_STOCK_LEVEL`] units.
    pub fn new(id: impl Into<String>) -> Self {
        Self::with_stock(id, DEFAULT_STOCK_LEVEL)
    }

    /// A machine holding `stock_level` units, with the ok latch set when that
    /// level is already healthy.
    pub fn with_stock(id: impl Into<String>, stock_level: i64) -> Self {
        Machine {
            id: id.into(),
            stock_level,
            low_stock_warning_fired: false,
            stock_level_ok_fired: stock_level >= LOW_STOCK_THRESHOLD,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn stock_level(&self) -> i64 {
        self.stock_level
    }

    /// True while stock is below [`LOW_STOCK_THRESHOLD`].
    pub fn is_low_stock(&self) -> bool {
        self.stock_level < LOW_STOCK_THRESHOLD
    }

    pub fn is_low_stock_warning_fired(&self) -> bool {
        self.low_stock_warning_fired
    }

    pub fn is_stock_level_ok_fired(&self) -> bool {
        self.stock_level_ok_fired
    }

    /// Removes `quantity` units and returns the new level. Stock is allowed
    /// to go negative.
    ///
    /// Returns `None`, leaving stock untouched, if the level would overflow.
    pub fn sell(&mut self, quantity: u32) -> Option<i64> {
        self.stock_level = self.stock_level.checked_sub(i64::from(quantity))?;
        Some(self.stock_level)
    }

    /// Adds `quantity` units and returns the stock level before the refill.
    ///
    /// Returns `None`, leaving stock untouched, if the level would overflow.
    pub fn refill(&mut self, quantity: u32) -> Option<i64> {
        let previous = self.stock_level;
        self.stock_level = previous.checked_add(i64::from(quantity))?;
        Some(previous)
    }

    /// Sets the low-stock latch and clears the ok latch.
    ///
    /// Returns `false` if the latch was already set.
    pub fn arm_low_stock_warning(&mut self) -> bool {
        if self.low_stock_warning_fired {
            return false;
        }
        self.low_stock_warning_fired = true;
        self.stock_level_ok_fired = false;
        true
    }

    /// Sets the ok latch and clears the low-stock latch.
    ///
    /// Returns `false` if the latch was already set.
    pub fn arm_stock_level_ok(&mut self) -> bool {
        if self.stock_level_ok_fired {
            return false;
        }
        self.stock_level_ok_fired = true;
        self.low_stock_warning_fired = false;
        true
    }
}
