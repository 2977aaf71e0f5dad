mod support;

use std::sync::Arc;

use support::{make_toll, scenario, seed, setup_db, ts};
use toll_core::TimeWindow;
use toll_db::{Db, MemoryStore, ReportStore, SqliteStore};

fn memory_store() -> MemoryStore {
    let (trips, tolls, vehicles) = scenario();
    MemoryStore::new()
        .with_trips(trips)
        .with_tolls(tolls)
        .with_vehicles(vehicles)
}

fn windows() -> Vec<TimeWindow> {
    vec![
        TimeWindow::new(ts("2024-04-09T00:00:00Z"), ts("2024-04-09T23:59:59Z")),
        TimeWindow::new(ts("2024-04-09T06:00:00Z"), ts("2024-04-09T08:00:00Z")),
        TimeWindow::new(ts("2024-04-09T07:00:00Z"), ts("2024-04-09T07:00:00Z")),
        TimeWindow::new(ts("2024-04-09T09:00:00Z"), ts("2024-04-09T06:00:00Z")),
    ]
}

#[test]
fn sqlite_and_memory_stores_agree() {
    let mut test_db = setup_db();
    seed(&mut test_db.db);
    let sqlite = SqliteStore::new(Db::open(&test_db.path).expect("open"));
    let memory = memory_store();

    for user in ["U1", "U2", "U3"] {
        for window in windows() {
            assert_eq!(
                sqlite.trips_in_window(user, &window).expect("sqlite trips"),
                memory.trips_in_window(user, &window).expect("memory trips"),
                "trips for {user} in {window:?}"
            );
            assert_eq!(
                sqlite.tolls_in_window(user, &window).expect("sqlite tolls"),
                memory.tolls_in_window(user, &window).expect("memory tolls"),
                "tolls for {user} in {window:?}"
            );
            assert_eq!(
                sqlite
                    .toll_totals_by_vehicle(user, &window)
                    .expect("sqlite totals"),
                memory
                    .toll_totals_by_vehicle(user, &window)
                    .expect("memory totals"),
                "totals for {user} in {window:?}"
            );
        }
    }

    let ids = vec!["V1".to_string(), "V2".to_string()];
    assert_eq!(
        sqlite.vehicles_by_id(&ids).expect("sqlite vehicles"),
        memory.vehicles_by_id(&ids).expect("memory vehicles")
    );
}

#[test]
fn sqlite_store_opens_migrates_and_closes() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("store.sqlite");

    let store = SqliteStore::open(&path).expect("open store");
    store.with_db(|db| db.insert_trips(&scenario().0)).expect("seed");
    let trips = store
        .trips_in_window(
            "U1",
            &TimeWindow::new(ts("2024-04-09T00:00:00Z"), ts("2024-04-10T00:00:00Z")),
        )
        .expect("trips");
    assert_eq!(trips.len(), 2);
    store.close().expect("close");

    let reopened = SqliteStore::open(&path).expect("reopen");
    let empty: Vec<String> = Vec::new();
    assert!(reopened.vehicles_by_id(&empty).expect("vehicles").is_empty());
}

#[test]
fn sqlite_store_serves_concurrent_readers() {
    let mut test_db = setup_db();
    seed(&mut test_db.db);
    let store = Arc::new(SqliteStore::new(Db::open(&test_db.path).expect("open")));
    let window = TimeWindow::new(ts("2024-04-09T00:00:00Z"), ts("2024-04-09T23:59:59Z"));

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let store = Arc::clone(&store);
            std::thread::spawn(move || store.toll_totals_by_vehicle("U1", &window))
        })
        .collect();
    for handle in handles {
        let totals = handle.join().expect("join").expect("totals");
        assert_eq!(totals[0].toll_cost, 5.5);
    }
}

#[test]
fn sub_millisecond_bounds_and_entries_are_exact() {
    let mut test_db = setup_db();
    let tolls = vec![
        make_toll("on-the-hour", "U1", "V1", "2024-04-09T07:00:00Z", Some(3.5)),
        make_toll("fraction", "U1", "V2", "2024-04-09T07:00:00.000900Z", Some(2.0)),
    ];
    test_db.db.insert_toll_events(&tolls).expect("insert tolls");
    let sqlite = SqliteStore::new(Db::open(&test_db.path).expect("open"));
    let memory = MemoryStore::new().with_tolls(tolls.clone());

    let loaded = sqlite
        .tolls_in_window(
            "U1",
            &TimeWindow::new(ts("2024-04-09T06:00:00Z"), ts("2024-04-09T08:00:00Z")),
        )
        .expect("tolls");
    assert_eq!(loaded, tolls);

    let windows = [
        TimeWindow::new(ts("2024-04-09T07:00:00.0005Z"), ts("2024-04-09T08:00:00Z")),
        TimeWindow::new(ts("2024-04-09T06:00:00Z"), ts("2024-04-09T07:00:00.0008Z")),
        TimeWindow::new(
            ts("2024-04-09T07:00:00.000900Z"),
            ts("2024-04-09T07:00:00.000900Z"),
        ),
    ];
    for window in windows {
        let from_sqlite = sqlite
            .toll_totals_by_vehicle("U1", &window)
            .expect("sqlite totals");
        let from_memory = memory
            .toll_totals_by_vehicle("U1", &window)
            .expect("memory totals");
        assert_eq!(from_sqlite, from_memory, "totals in {window:?}");
        assert_eq!(from_sqlite.len(), 1, "totals in {window:?}");
    }
}
