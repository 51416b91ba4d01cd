//! Random sale/refill event stream.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::event::VendingEvent;

const SALE_QUANTITIES: [u32; 2] = [1, 2];
const REFILL_QUANTITIES: [u32; 2] = [3, 5];

/// Endless stream of input events for a fixed set of machines.
///
/// Half the events are sales of 1 or 2 units, the other half refills of 3
/// or 5 units; the target machine is picked uniformly. Yields nothing when
/// there are no machine ids.
pub struct EventGenerator {
    rng: StdRng,
    machine_ids: Vec<String>,
}

impl EventGenerator {
    /// Generator over `machine_ids`; `None` seeds from the OS.
    pub fn new(machine_ids: Vec<String>, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self { rng, machine_ids }
    }
}

impl Iterator for EventGenerator {
    type Item = VendingEvent;

    fn next(&mut self) -> Option<VendingEvent> {
        let machine_id = self.machine_ids.choose(&mut self.rng)?.clone();
        let event = if self.rng.gen_bool(0.5) {
            let quantity = *SALE_QUANTITIES.choose(&mut self.rng)?;
            VendingEvent::sale(quantity, machine_id)
        } else {
            let quantity = *REFILL_QUANTITIES.choose(&mut self.rng)?;
            VendingEvent::refill(quantity, machine_id)
        };
        Some(event)
    }
}
