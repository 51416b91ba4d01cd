//! Synchronous in-process publish/subscribe bus driving a simulated fleet of
//! vending machines.
//!
//! ```
//! use vending_bus::{Alerting, Simulation, SimulationConfig, VendingEvent};
//!
//! let sim = Simulation::new(SimulationConfig {
//!     machine_ids: vec!["001".into()],
//!     alerting: Alerting::Latched,
//!     ..SimulationConfig::default()
//! })
//! .unwrap();
//!
//! let report = sim.run_events(vec![VendingEvent::sale(2, "001"); 4]).unwrap();
//! assert_eq!(report.final_state[0].stock_level(), 2);
//! assert_eq!(report.alerts, vec![VendingEvent::low_stock_warning("001")]);
//! ```

pub mod bus;
mod error;
mod event;
mod machine;
mod simulation;
mod subscribers;

pub use bus::{BusHandle, DispatchPolicy, PublishSubscribeService, Publisher, Subscriber};
pub use error::{ConfigError, FleetError, HandlerError, PublishError, SimulationError};
pub use event::{EventType, UnknownEventType, VendingEvent};
pub use machine::{Fleet, Machine, DEFAULT_STOCK_LEVEL, LOW_STOCK_THRESHOLD};
pub use simulation::{
    wire, Alerting, EventGenerator, Simulation, SimulationConfig, SimulationReport, MAX_INITIAL_STOCK,
};
pub use subscribers::{
    EventRecorder, LowStockWarningSubscriber, RefillSubscriber, SaleSubscriber,
    StockLevelOkSubscriber, TraceSubscriber,
};
