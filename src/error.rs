//! Error types for the bus, the fleet, and the simulation driver.

use thiserror::Error;

use crate::event::EventType;

/// Failure raised by a [`Subscriber`](crate::bus::Subscriber) while handling an event.
#[derive(Debug, Error)]
pub enum HandlerError {
    #[error("fleet lock poisoned during {0}")]
    LockPoisoned(&'static str),

    /// Applying the event would push the stock level past `i64` bounds.
    #[error("stock level of machine {machine_id} would overflow applying {quantity} units")]
    StockOverflow { machine_id: String, quantity: u32 },

    /// A derived event could not be published.
    #[error("nested publish failed: {0}")]
    Publish(#[source] Box<PublishError>),
}

impl From<PublishError> for HandlerError {
    fn from(err: PublishError) -> Self {
        HandlerError::Publish(Box::new(err))
    }
}

impl From<FleetError> for HandlerError {
    fn from(err: FleetError) -> Self {
        match err {
            FleetError::LockPoisoned(operation) => HandlerError::LockPoisoned(operation),
        }
    }
}

#[derive(Debug, Error)]
pub enum PublishError {
    #[error("subscriber registry lock poisoned during {0}")]
    LockPoisoned(&'static str),

    /// The bus behind a [`BusHandle`](crate::bus::BusHandle) has been dropped.
    #[error("publish/subscribe service is no longer alive")]
    BusClosed,

    #[error("subscriber {subscriber} failed handling {event_type} event: {source}")]
    Handler {
        subscriber: &'static str,
        event_type: EventType,
        #[source]
        source: HandlerError,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FleetError {
    #[error("fleet lock poisoned during {0}")]
    LockPoisoned(&'static str),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid simulation config json: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("failed to read simulation config: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid simulation config: {0}")]
    Invalid(String),
}

#[derive(Debug, Error)]
pub enum SimulationError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Publish(#[from] PublishError),

    #[error(transparent)]
    Fleet(#[from] FleetError),
}
