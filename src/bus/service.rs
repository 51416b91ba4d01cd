//! The publish/subscribe service and its subscription registry.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use tracing::{debug, warn};

use super::{BusHandle, DispatchPolicy, Publisher, Subscriber};
use crate::error::PublishError;
use crate::event::{EventType, VendingEvent};

type HandlerList = Vec<Arc<dyn Subscriber>>;

/// Subscription table shared between the service and its handles.
pub(crate) struct Registry {
    subscribers: RwLock<HashMap<EventType, HandlerList>>,
    policy: DispatchPolicy,
}

impl Registry {
    pub(crate) fn dispatch(&self, event: &VendingEvent) -> Result<usize, PublishError> {
        let event_type = event.event_type();

        // Copy the list so handlers can subscribe or publish while we iterate.
        let handlers: HandlerList = {
            let subscribers = self
                .subscribers
                .read()
                .map_err(|_| PublishError::LockPoisoned("publish"))?;
            subscribers.get(&event_type).cloned().unwrap_or_default()
        };

        debug!(
            event_type = %event_type,
            machine_id = %event.machine_id(),
            handlers = handlers.len(),
            "publishing event"
        );

        for handler in &handlers {
            if let Err(source) = handler.handle(event) {
                match self.policy {
                    DispatchPolicy::FailFast => {
                        return Err(PublishError::Handler {
                            subscriber: handler.name(),
                            event_type,
                            source,
                        });
                    }
                    DispatchPolicy::Isolate => {
                        warn!(
                            subscriber = handler.name(),
                            event_type = %event_type,
                            machine_id = %event.machine_id(),
                            error = %source,
                            "subscriber failed; continuing dispatch"
                        );
                    }
                }
            }
        }

        Ok(handlers.len())
    }
}

fn same_handler<S: Subscriber + ?Sized>(registered: &Arc<dyn Subscriber>, handler: &Arc<S>) -> bool {
    Arc::as_ptr(registered) as *const () == Arc::as_ptr(handler) as *const ()
}

/// In-process, synchronous publish/subscribe bus.
///
/// Handlers are keyed by [`EventType`] and invoked in registration order.
/// `publish` is re-entrant: a handler that publishes causes a depth-first
/// dispatch that completes before the outer `publish` returns.
///
/// ## Example
///
/// ```
/// use std::sync::Arc;
/// use vending_bus::{
///     EventType, Fleet, Machine, PublishSubscribeService, Publisher, SaleSubscriber,
///     VendingEvent,
/// };
///
/// let fleet = Fleet::new(vec![Machine::new("001")]);
/// let bus = PublishSubscribeService::new();
/// bus.subscribe(EventType::Sale, Arc::new(SaleSubscriber::new(fleet.clone(), bus.handle())))
///     .unwrap();
///
/// assert_eq!(bus.publish(VendingEvent::sale(2, "001")).unwrap(), 1);
/// assert_eq!(fleet.get("001").unwrap().unwrap().stock_level(), 8);
/// ```
pub struct PublishSubscribeService {
    registry: Arc<Registry>,
}

impl Default for PublishSubscribeService {
    fn default() -> Self {
        Self::new()
    }
}

impl PublishSubscribeService {
    /// Create a bus using [`DispatchPolicy::FailFast`].
    pub fn new() -> Self {
        Self::with_policy(DispatchPolicy::default())
    }

    /// Create a bus that handles handler failures according to `policy`.
    pub fn with_policy(policy: DispatchPolicy) -> Self {
        Self {
            registry: Arc::new(Registry {
                subscribers: RwLock::new(HashMap::new()),
                policy,
            }),
        }
    }

    /// The failure policy this bus dispatches with.
    pub fn policy(&self) -> DispatchPolicy {
        self.registry.policy
    }

    /// A non-owning handle for subscribers that need to publish.
    pub fn handle(&self) -> BusHandle {
        BusHandle::new(Arc::downgrade(&self.registry))
    }

    /// Append `handler` to the list for `event_type`. Duplicates are kept.
    pub fn subscribe(
        &self,
        event_type: EventType,
        handler: Arc<dyn Subscriber>,
    ) -> Result<(), PublishError> {
        let mut subscribers = self
            .registry
            .subscribers
            .write()
            .map_err(|_| PublishError::LockPoisoned("subscribe"))?;
        debug!(event_type = %event_type, subscriber = handler.name(), "subscribing");
        subscribers.entry(event_type).or_default().push(handler);
        Ok(())
    }

    /// Remove every registration of `handler` (by identity) for `event_type`.
    ///
    /// Returns the number of entries removed; 0 if nothing was registered.
    pub fn unsubscribe<S: Subscriber + ?Sized>(
        &self,
        event_type: EventType,
        handler: &Arc<S>,
    ) -> Result<usize, PublishError> {
        let mut subscribers = self
            .registry
            .subscribers
            .write()
            .map_err(|_| PublishError::LockPoisoned("unsubscribe"))?;
        let Some(handlers) = subscribers.get_mut(&event_type) else {
            return Ok(0);
        };
        let before = handlers.len();
        handlers.retain(|registered| !same_handler(registered, handler));
        Ok(before - handlers.len())
    }

    /// Number of registrations for `event_type`, duplicates included.
    pub fn subscriber_count(&self, event_type: EventType) -> Result<usize, PublishError> {
        let subscribers = self
            .registry
            .subscribers
            .read()
            .map_err(|_| PublishError::LockPoisoned("read"))?;
        Ok(subscribers.get(&event_type).map_or(0, Vec::len))
    }

    /// True when no handler is registered for any event type.
    pub fn is_empty(&self) -> Result<bool, PublishError> {
        let subscribers = self
            .registry
            .subscribers
            .read()
            .map_err(|_| PublishError::LockPoisoned("read"))?;
        Ok(subscribers.values().all(Vec::is_empty))
    }
}

impl Publisher for PublishSubscribeService {
    fn publish(&self, event: VendingEvent) -> Result<usize, PublishError> {
        self.registry.dispatch(&event)
    }
}
