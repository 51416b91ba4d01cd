use std::sync::{Arc, RwLock};

use super::Machine;
use crate::error::FleetError;

/// Shared handle to the machine collection.
///
/// Cloning is cheap; every clone sees the same machines. Subscribers hold a
/// clone and mutate through [`Fleet::update`].
#[derive(Clone, Debug, Default)]
pub struct Fleet {
    machines: Arc<RwLock<Vec<Machine>>>,
}

impl Fleet {
    /// A fleet holding `machines` in the given order.
    pub fn new(machines: Vec<Machine>) -> Self {
        Fleet {
            machines: Arc::new(RwLock::new(machines)),
        }
    }

    /// One machine per id, each starting at `initial_stock`.
    pub fn with_ids<I, S>(ids: I, initial_stock: i64) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(
            ids.into_iter()
                .map(|id| Machine::with_stock(id, initial_stock))
                .collect(),
        )
    }

    /// Number of machines in the fleet.
    pub fn len(&self) -> Result<usize, FleetError> {
        let machines = self
            .machines
            .read()
            .map_err(|_| FleetError::LockPoisoned("len"))?;
        Ok(machines.len())
    }

    pub fn is_empty(&self) -> Result<bool, FleetError> {
        Ok(self.len()? == 0)
    }

    /// Copy of the machine with `id`, if any.
    pub fn get(&self, id: &str) -> Result<Option<Machine>, FleetError> {
        let machines = self
            .machines
            .read()
            .map_err(|_| FleetError::LockPoisoned("read"))?;
        Ok(machines.iter().find(|m| m.id() == id).cloned())
    }

    /// Machine ids, in insertion order.
    pub fn ids(&self) -> Result<Vec<String>, FleetError> {
        let machines = self
            .machines
            .read()
            .map_err(|_| FleetError::LockPoisoned("read"))?;
        Ok(machines.iter().map(|m| m.id().to_string()).collect())
    }

    /// Point-in-time copy of every machine, in insertion order.
    pub fn snapshot(&self) -> Result<Vec<Machine>, FleetError> {
        let machines = self
            .machines
            .read()
            .map_err(|_| FleetError::LockPoisoned("snapshot"))?;
        Ok(machines.clone())
    }

    /// Runs `f` against the machine with `id` under the write lock.
    ///
    /// Returns `Ok(None)` when no machine has that id. The lock is released
    /// before this returns, so callers may publish afterwards.
    pub fn update<R>(
        &self,
        id: &str,
        f: impl FnOnce(&mut Machine) -> R,
    ) -> Result<Option<R>, FleetError> {
        let mut machines = self
            .machines
            .write()
            .map_err(|_| FleetError::LockPoisoned("write"))?;
        Ok(machines.iter_mut().find(|m| m.id() == id).map(f))
    }
}
