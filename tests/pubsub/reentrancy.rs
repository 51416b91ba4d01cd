use std::sync::{Arc, Mutex};

use crate::support::{stock, Probe, Tagged};
use vending_bus::{
    BusHandle, DispatchPolicy, EventType, Fleet, HandlerError, Machine, PublishError,
    PublishSubscribeService, Publisher, SaleSubscriber, Subscriber, VendingEvent,
};

/// On any sale, records itself and then publishes a warning for the machine.
struct Escalator {
    bus: BusHandle,
    trace: Arc<Mutex<Vec<String>>>,
}

impl Subscriber for Escalator {
    fn handle(&self, event: &VendingEvent) -> Result<(), HandlerError> {
        self.trace.lock().unwrap().push("escalator:enter".into());
        self.bus
            .publish(VendingEvent::low_stock_warning(event.machine_id()))?;
        self.trace.lock().unwrap().push("escalator:exit".into());
        Ok(())
    }
}

/// Subscribes a probe to `refill` the first time it sees a sale.
struct LateJoiner {
    bus: Arc<PublishSubscribeService>,
    probe: Arc<Probe>,
}

impl Subscriber for LateJoiner {
    fn handle(&self, _event: &VendingEvent) -> Result<(), HandlerError> {
        self.bus
            .subscribe(EventType::Refill, self.probe.clone())
            .map_err(HandlerError::from)
    }
}

struct AlwaysFails;

impl Subscriber for AlwaysFails {
    fn handle(&self, _event: &VendingEvent) -> Result<(), HandlerError> {
        Err(HandlerError::LockPoisoned("always"))
    }

    fn name(&self) -> &'static str {
        "always_fails"
    }
}

fn tagged(label: &str, trace: &Arc<Mutex<Vec<String>>>) -> Arc<Tagged> {
    Arc::new(Tagged {
        label: label.to_string(),
        trace: Arc::clone(trace),
    })
}

#[test]
fn nested_publish_completes_before_outer_continues() {
    let trace = Arc::new(Mutex::new(Vec::new()));
    let bus = PublishSubscribeService::new();
    bus.subscribe(
        EventType::Sale,
        Arc::new(Escalator {
            bus: bus.handle(),
            trace: Arc::clone(&trace),
        }),
    )
    .unwrap();
    bus.subscribe(EventType::Sale, tagged("after", &trace)).unwrap();
    bus.subscribe(EventType::LowStockWarning, tagged("alert", &trace))
        .unwrap();

    assert_eq!(bus.publish(VendingEvent::sale(1, "001")).unwrap(), 2);

    assert_eq!(
        *trace.lock().unwrap(),
        vec![
            "escalator:enter",
            "alert:lowStockWarning",
            "escalator:exit",
            "after:sale",
        ]
    );
}

#[test]
fn subscribing_during_dispatch_applies_to_next_publish() {
    let bus = Arc::new(PublishSubscribeService::new());
    let probe = Arc::new(Probe::default());
    bus.subscribe(
        EventType::Sale,
        Arc::new(LateJoiner {
            bus: Arc::clone(&bus),
            probe: probe.clone(),
        }),
    )
    .unwrap();

    bus.publish(VendingEvent::sale(1, "001")).unwrap();
    assert_eq!(bus.subscriber_count(EventType::Refill).unwrap(), 1);

    bus.publish(VendingEvent::refill(3, "001")).unwrap();
    assert_eq!(probe.calls(), 1);
}

#[test]
fn fail_fast_surfaces_nested_failure() {
    let fleet = Fleet::new(vec![Machine::with_stock("001", 3)]);
    let bus = PublishSubscribeService::new();
    let after = Arc::new(Probe::default());
    bus.subscribe(
        EventType::Sale,
        Arc::new(SaleSubscriber::new(fleet.clone(), bus.handle())),
    )
    .unwrap();
    bus.subscribe(EventType::Sale, after.clone()).unwrap();
    bus.subscribe(EventType::LowStockWarning, Arc::new(AlwaysFails))
        .unwrap();

    let err = bus.publish(VendingEvent::sale(1, "001")).unwrap_err();

    let source = match err {
        PublishError::Handler {
            subscriber: "sale",
            event_type: EventType::Sale,
            source,
        } => source,
        other => panic!("expected sale handler error, got {other:?}"),
    };
    let inner = match source {
        HandlerError::Publish(inner) => inner,
        other => panic!("expected nested publish error, got {other:?}"),
    };
    assert!(matches!(
        *inner,
        PublishError::Handler {
            subscriber: "always_fails",
            event_type: EventType::LowStockWarning,
            ..
        }
    ));

    // The sale itself was applied before the warning failed.
    assert_eq!(stock(&fleet, "001"), 2);
    assert_eq!(after.calls(), 0);
}

#[test]
fn isolate_contains_nested_failure() {
    let fleet = Fleet::new(vec![Machine::with_stock("001", 3)]);
    let bus = PublishSubscribeService::with_policy(DispatchPolicy::Isolate);
    let after = Arc::new(Probe::default());
    bus.subscribe(
        EventType::Sale,
        Arc::new(SaleSubscriber::new(fleet.clone(), bus.handle())),
    )
    .unwrap();
    bus.subscribe(EventType::Sale, after.clone()).unwrap();
    bus.subscribe(EventType::LowStockWarning, Arc::new(AlwaysFails))
        .unwrap();

    assert_eq!(bus.publish(VendingEvent::sale(1, "001")).unwrap(), 2);
    assert_eq!(stock(&fleet, "001"), 2);
    assert_eq!(after.calls(), 1);
}

#[test]
fn subscriber_outliving_bus_reports_closed() {
    let fleet = Fleet::new(vec![Machine::with_stock("001", 1)]);
    let sale = {
        let bus = PublishSubscribeService::new();
        SaleSubscriber::new(fleet.clone(), bus.handle())
    };

    let err = sale.handle(&VendingEvent::sale(1, "001")).unwrap_err();

    assert!(matches!(err, HandlerError::Publish(inner) if matches!(*inner, PublishError::BusClosed)));
    assert_eq!(stock(&fleet, "001"), 0);
}
