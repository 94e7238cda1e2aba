use carlease_core::db::open_db_in_memory;
use carlease_core::{
    CarLeaseService, ErrorKind, NewVehicle, RepoError, SqliteCarLeaseRepository,
    ValidationError, VehicleRepository, VehicleStatus,
};
use std::collections::HashSet;

fn corolla(status: VehicleStatus) -> NewVehicle {
    NewVehicle {
        make: "Toyota".to_string(),
        model: "Corolla".to_string(),
        year: 2022,
        daily_rate: 45.0,
        status,
        passenger_capacity: 5,
        engine_capacity: 1.8,
    }
}

#[test]
fn add_and_find_vehicle_roundtrip() {
    let conn = open_db_in_memory().unwrap();
    let service = CarLeaseService::new(SqliteCarLeaseRepository::try_new(&conn).unwrap());

    let id = service.add_vehicle(&corolla(VehicleStatus::Available)).unwrap();
    let vehicle = service.find_vehicle_by_id(id).unwrap();

    assert_eq!(vehicle.vehicle_id, id);
    assert_eq!(vehicle.make, "Toyota");
    assert_eq!(vehicle.model, "Corolla");
    assert_eq!(vehicle.year, 2022);
    assert_eq!(vehicle.daily_rate, 45.0);
    assert_eq!(vehicle.passenger_capacity, 5);
    assert_eq!(vehicle.engine_capacity, 1.8);
    assert!(vehicle.is_available());
}

#[test]
fn store_assigns_distinct_vehicle_ids() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteCarLeaseRepository::try_new(&conn).unwrap();

    let first = repo.add_vehicle(&corolla(VehicleStatus::Available)).unwrap();
    let second = repo.add_vehicle(&corolla(VehicleStatus::Available)).unwrap();
    assert_ne!(first, second);
}

#[test]
fn removed_vehicle_is_no_longer_found() {
    let conn = open_db_in_memory().unwrap();
    let service = CarLeaseService::new(SqliteCarLeaseRepository::try_new(&conn).unwrap());

    let id = service.add_vehicle(&corolla(VehicleStatus::Available)).unwrap();
    service.remove_vehicle(id).unwrap();

    let err = service.find_vehicle_by_id(id).unwrap_err();
    assert!(matches!(err, RepoError::VehicleNotFound(missing) if missing == id));
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[test]
fn removing_missing_vehicle_reports_not_found_and_changes_nothing() {
    let conn = open_db_in_memory().unwrap();
    let service = CarLeaseService::new(SqliteCarLeaseRepository::try_new(&conn).unwrap());
    let kept = service.add_vehicle(&corolla(VehicleStatus::Available)).unwrap();

    let err = service.remove_vehicle(kept + 100).unwrap_err();
    assert!(matches!(err, RepoError::VehicleNotFound(id) if id == kept + 100));
    assert!(err.is_not_found());

    let available = service.list_available_vehicles().unwrap();
    assert_eq!(available.len(), 1);
    assert_eq!(available[0].vehicle_id, kept);
}

#[test]
fn available_and_rented_listings_partition_by_status() {
    let conn = open_db_in_memory().unwrap();
    let service = CarLeaseService::new(SqliteCarLeaseRepository::try_new(&conn).unwrap());

    let mut all_ids = HashSet::new();
    for status in [
        VehicleStatus::Available,
        VehicleStatus::NotAvailable,
        VehicleStatus::Available,
        VehicleStatus::NotAvailable,
        VehicleStatus::Available,
    ] {
        all_ids.insert(service.add_vehicle(&corolla(status)).unwrap());
    }

    let available: HashSet<_> = service
        .list_available_vehicles()
        .unwrap()
        .into_iter()
        .map(|vehicle| vehicle.vehicle_id)
        .collect();
    let rented: HashSet<_> = service
        .list_rented_vehicles()
        .unwrap()
        .into_iter()
        .map(|vehicle| vehicle.vehicle_id)
        .collect();

    assert_eq!(available.len(), 3);
    assert_eq!(rented.len(), 2);
    assert!(available.is_disjoint(&rented));
    let union: HashSet<_> = available.union(&rented).copied().collect();
    assert_eq!(union, all_ids);
}

#[test]
fn listing_is_ordered_by_id() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteCarLeaseRepository::try_new(&conn).unwrap();
    for _ in 0..3 {
        repo.add_vehicle(&corolla(VehicleStatus::Available)).unwrap();
    }

    let ids: Vec<_> = repo
        .list_vehicles_by_status(VehicleStatus::Available)
        .unwrap()
        .into_iter()
        .map(|vehicle| vehicle.vehicle_id)
        .collect();
    let mut sorted = ids.clone();
    sorted.sort_unstable();
    assert_eq!(ids, sorted);
}

#[test]
fn invalid_vehicle_is_rejected_before_insert() {
    let conn = open_db_in_memory().unwrap();
    let service = CarLeaseService::new(SqliteCarLeaseRepository::try_new(&conn).unwrap());

    let mut blank_make = corolla(VehicleStatus::Available);
    blank_make.make = "  ".to_string();
    let err = service.add_vehicle(&blank_make).unwrap_err();
    assert!(matches!(
        err,
        RepoError::Validation(ValidationError::BlankField("make"))
    ));

    let mut negative_rate = corolla(VehicleStatus::Available);
    negative_rate.daily_rate = -1.0;
    let err = service.add_vehicle(&negative_rate).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidInput);

    let mut no_seats = corolla(VehicleStatus::Available);
    no_seats.passenger_capacity = 0;
    assert!(service.add_vehicle(&no_seats).is_err());

    assert!(service.list_available_vehicles().unwrap().is_empty());
}

#[test]
fn unknown_persisted_status_is_reported_as_invalid_data() {
    let conn = open_db_in_memory().unwrap();
    conn.execute_batch(
        "PRAGMA ignore_check_constraints = ON;
         INSERT INTO vehicles (make, model, year, daily_rate, status, passenger_capacity, engine_capacity)
         VALUES ('Ford', 'Focus', 2019, 30.0, 'scrapped', 5, 1.6);",
    )
    .unwrap();
    let id = conn.last_insert_rowid();
    let repo = SqliteCarLeaseRepository::try_new(&conn).unwrap();

    let err = repo.find_vehicle(id).unwrap_err();
    assert!(matches!(err, RepoError::InvalidData(_)));
    assert!(err.is_store_fault());
}
