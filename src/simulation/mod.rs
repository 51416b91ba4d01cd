//! Fleet simulation driver: builds machines, wires subscribers, publishes
//! a stream of random sale/refill events and reports the outcome.

mod config;
mod generator;
mod report;

pub use config::{Alerting, SimulationConfig, MAX_INITIAL_STOCK};
pub use generator::EventGenerator;
pub use report::SimulationReport;

use std::sync::Arc;

use tracing::info;

use crate::bus::{Publisher, PublishSubscribeService};
use crate::error::{PublishError, SimulationError};
use crate::event::{EventType, VendingEvent};
use crate::machine::Fleet;
use crate::subscribers::{
    EventRecorder, LowStockWarningSubscriber, RefillSubscriber, SaleSubscriber,
    StockLevelOkSubscriber, TraceSubscriber,
};

/// Register the stock and alert subscribers for `fleet` on `bus`.
///
/// With [`Alerting::Latched`] each latch subscriber is registered after the
/// stock subscriber on the same tag, so it sees the updated stock level.
pub fn wire(
    bus: &PublishSubscribeService,
    fleet: &Fleet,
    alerting: Alerting,
) -> Result<(), PublishError> {
    match alerting {
        Alerting::Direct => {
            bus.subscribe(
                EventType::Sale,
                Arc::new(SaleSubscriber::new(fleet.clone(), bus.handle())),
            )?;
            bus.subscribe(
                EventType::Refill,
                Arc::new(RefillSubscriber::new(fleet.clone(), bus.handle())),
            )?;
        }
        Alerting::Latched => {
            bus.subscribe(
                EventType::Sale,
                Arc::new(SaleSubscriber::without_alerts(fleet.clone(), bus.handle())),
            )?;
            bus.subscribe(
                EventType::Sale,
                Arc::new(LowStockWarningSubscriber::new(fleet.clone(), bus.handle())),
            )?;
            bus.subscribe(
                EventType::Refill,
                Arc::new(RefillSubscriber::without_alerts(fleet.clone(), bus.handle())),
            )?;
            bus.subscribe(
                EventType::Refill,
                Arc::new(StockLevelOkSubscriber::new(fleet.clone(), bus.handle())),
            )?;
        }
    }
    Ok(())
}

/// A wired fleet plus the bus that drives it.
pub struct Simulation {
    config: SimulationConfig,
    fleet: Fleet,
    bus: PublishSubscribeService,
    alerts: EventRecorder,
}

impl Simulation {
    /// Validate `config`, build its fleet and wire every subscriber.
    pub fn new(config: SimulationConfig) -> Result<Self, SimulationError> {
        config.validate()?;

        let fleet = Fleet::with_ids(config.machine_ids.iter().cloned(), config.initial_stock);
        let bus = PublishSubscribeService::with_policy(config.dispatch);
        wire(&bus, &fleet, config.alerting)?;

        let alerts = EventRecorder::new();
        for event_type in [EventType::LowStockWarning, EventType::StockLevelOk] {
            bus.subscribe(event_type, Arc::new(alerts.clone()))?;
            bus.subscribe(event_type, Arc::new(TraceSubscriber))?;
        }

        Ok(Self {
            config,
            fleet,
            bus,
            alerts,
        })
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn fleet(&self) -> &Fleet {
        &self.fleet
    }

    pub fn bus(&self) -> &PublishSubscribeService {
        &self.bus
    }

    /// Publish `config.event_count` generated events.
    pub fn run(&self) -> Result<SimulationReport, SimulationError> {
        let generator = EventGenerator::new(self.config.machine_ids.clone(), self.config.seed);
        self.run_events(generator.take(self.config.event_count).collect())
    }

    /// Publish `events` in order and report what happened.
    pub fn run_events(&self, events: Vec<VendingEvent>) -> Result<SimulationReport, SimulationError> {
        let initial = self.fleet.snapshot()?;
        for machine in &initial {
            info!(machine_id = machine.id(), stock_level = machine.stock_level(), "initial stock level");
        }

        let alerts_before = self.alerts.len();
        let mut handler_invocations = 0;
        for event in &events {
            handler_invocations += self.bus.publish(event.clone())?;
        }

        let final_state = self.fleet.snapshot()?;
        for machine in &final_state {
            info!(machine_id = machine.id(), stock_level = machine.stock_level(), "final stock level");
        }

        let alerts = self.alerts.events().split_off(alerts_before);
        Ok(SimulationReport {
            initial,
            final_state,
            published: events,
            alerts,
            handler_invocations,
        })
    }
}
