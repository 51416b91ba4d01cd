use serde::Serialize;

use crate::event::{EventType, VendingEvent};
use crate::machine::Machine;

/// Outcome of one [`Simulation`](super::Simulation) run.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationReport {
    /// Fleet state before the first event.
    pub initial: Vec<Machine>,
    /// Fleet state after the last event.
    pub final_state: Vec<Machine>,
    /// Input events, in publish order.
    pub published: Vec<VendingEvent>,
    /// Alerts observed on the bus during the run, in dispatch order.
    pub alerts: Vec<VendingEvent>,
    /// Handlers invoked by top-level publishes.
    pub handler_invocations: usize,
}

impl SimulationReport {
    /// Alerts raised for one machine, in order.
    pub fn alerts_for(&self, machine_id: &str) -> Vec<&VendingEvent> {
        self.alerts
            .iter()
            .filter(|e| e.machine_id() == machine_id)
            .collect()
    }

    /// Number of alerts of `event_type`.
    pub fn count(&self, event_type: EventType) -> usize {
        self.alerts
            .iter()
            .filter(|e| e.event_type() == event_type)
            .count()
    }

    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
