//! Integration tests for the seeded fleet simulation.

use vending_bus::{
    Alerting, DispatchPolicy, EventType, Simulation, SimulationConfig, VendingEvent,
    DEFAULT_STOCK_LEVEL,
};

fn seeded(seed: u64, alerting: Alerting) -> SimulationConfig {
    SimulationConfig {
        seed: Some(seed),
        event_count: 40,
        alerting,
        ..SimulationConfig::default()
    }
}

fn net_change(events: &[VendingEvent], machine_id: &str) -> i64 {
    events
        .iter()
        .filter(|e| e.machine_id() == machine_id)
        .map(|e| match e {
            VendingEvent::Sale { quantity, .. } => -i64::from(*quantity),
            VendingEvent::Refill { quantity, .. } => i64::from(*quantity),
            VendingEvent::LowStockWarning { .. } | VendingEvent::StockLevelOk { .. } => 0,
        })
        .sum()
}

#[test]
fn default_run_publishes_ten_events_over_three_machines() {
    let sim = Simulation::new(SimulationConfig {
        seed: Some(1),
        ..SimulationConfig::default()
    })
    .unwrap();

    let report = sim.run().unwrap();

    assert_eq!(report.published.len(), 10);
    assert_eq!(report.initial.len(), 3);
    assert!(report
        .initial
        .iter()
        .all(|m| m.stock_level() == DEFAULT_STOCK_LEVEL));
    // Two handlers per input tag in latched mode.
    assert_eq!(report.handler_invocations, 20);
}

#[test]
fn same_seed_same_outcome() {
    let a = Simulation::new(seeded(2024, Alerting::Latched))
        .unwrap()
        .run()
        .unwrap();
    let b = Simulation::new(seeded(2024, Alerting::Latched))
        .unwrap()
        .run()
        .unwrap();

    assert_eq!(a.published, b.published);
    assert_eq!(a.final_state, b.final_state);
    assert_eq!(a.alerts, b.alerts);
}

#[test]
fn final_stock_matches_published_events() {
    for alerting in [Alerting::Direct, Alerting::Latched] {
        let report = Simulation::new(seeded(77, alerting)).unwrap().run().unwrap();

        for machine in &report.final_state {
            assert_eq!(
                machine.stock_level(),
                DEFAULT_STOCK_LEVEL + net_change(&report.published, machine.id()),
                "{alerting:?} machine {}",
                machine.id()
            );
        }
    }
}

#[test]
fn latched_run_never_repeats_an_alert_back_to_back() {
    let report = Simulation::new(SimulationConfig {
        event_count: 200,
        ..seeded(5, Alerting::Latched)
    })
    .unwrap()
    .run()
    .unwrap();

    for machine in &report.final_state {
        let alerts: Vec<EventType> = report
            .alerts_for(machine.id())
            .into_iter()
            .map(VendingEvent::event_type)
            .collect();
        for pair in alerts.windows(2) {
            assert_ne!(pair[0], pair[1], "machine {} repeated {:?}", machine.id(), pair[0]);
        }
    }
}

#[test]
fn report_serializes_to_camel_case_json() {
    let sim = Simulation::new(SimulationConfig {
        machine_ids: vec!["001".into()],
        dispatch: DispatchPolicy::Isolate,
        ..SimulationConfig::default()
    })
    .unwrap();
    let report = sim
        .run_events(vec![VendingEvent::sale(2, "001"); 4])
        .unwrap();

    let json: serde_json::Value = serde_json::from_str(&report.to_json_pretty().unwrap()).unwrap();

    assert_eq!(json["finalState"][0]["id"], "001");
    assert_eq!(json["finalState"][0]["stockLevel"], 2);
    assert_eq!(json["finalState"][0]["lowStockWarningFired"], true);
    assert_eq!(
        json["alerts"],
        serde_json::json!([{"type": "lowStockWarning", "machineId": "001"}])
    );
    assert_eq!(json["handlerInvocations"], 8);
}

#[test]
fn config_file_round_trip() {
    let path = std::env::temp_dir().join(format!("vending_bus_config_{}.json", std::process::id()));
    std::fs::write(
        &path,
        r#"{"machineIds": ["A1", "B2"], "initialStock": 3, "eventCount": 5, "seed": 11}"#,
    )
    .unwrap();

    let config = SimulationConfig::from_path(&path).unwrap();
    std::fs::remove_file(&path).unwrap();

    let report = Simulation::new(config).unwrap().run().unwrap();
    assert_eq!(report.published.len(), 5);
    assert!(report
        .published
        .iter()
        .all(|e| e.machine_id() == "A1" || e.machine_id() == "B2"));
    assert!(report.initial.iter().all(|m| m.stock_level() == 3));
}
