use carlease_core::db::open_db_in_memory;
use carlease_core::{
    CarLeaseService, Customer, CustomerRemoval, ErrorKind, LeaseType, NewLease, NewPayment,
    NewVehicle, RepoError, SqliteCarLeaseRepository, ValidationError, VehicleStatus,
};
use rusqlite::Connection;

fn setup() -> Connection {
    open_db_in_memory().unwrap()
}

fn ann() -> Customer {
    Customer::new(1, "Ann", "Lee", "ann@x.com", "555-0100")
}

fn vehicle() -> NewVehicle {
    NewVehicle {
        make: "Honda".to_string(),
        model: "Civic".to_string(),
        year: 2021,
        daily_rate: 40.0,
        status: VehicleStatus::Available,
        passenger_capacity: 5,
        engine_capacity: 1.5,
    }
}

fn count(conn: &Connection, sql: &str) -> i64 {
    conn.query_row(sql, [], |row| row.get(0)).unwrap()
}

/// Seeds one customer with two leases (one active, one returned) and three payments.
fn seed_customer_with_history(service: &CarLeaseService<SqliteCarLeaseRepository<'_>>) {
    service.add_customer(&ann()).unwrap();
    let first_vehicle = service.add_vehicle(&vehicle()).unwrap();
    let second_vehicle = service.add_vehicle(&vehicle()).unwrap();

    let returned = service
        .create_lease(&NewLease {
            customer_id: 1,
            vehicle_id: first_vehicle,
            start_date: 1_000,
            end_date: Some(2_000),
            lease_type: LeaseType::Daily,
        })
        .unwrap();
    let active = service
        .create_lease(&NewLease {
            customer_id: 1,
            vehicle_id: second_vehicle,
            start_date: 3_000,
            end_date: None,
            lease_type: LeaseType::Monthly,
        })
        .unwrap();

    for (lease_id, amount) in [(returned, 80.0), (active, 500.0), (active, 500.0)] {
        service
            .record_payment(&NewPayment {
                lease_id,
                payment_date: 4_000,
                amount,
            })
            .unwrap();
    }
}

#[test]
fn add_find_and_list_customers() {
    let conn = setup();
    let service = CarLeaseService::new(SqliteCarLeaseRepository::try_new(&conn).unwrap());

    service.add_customer(&ann()).unwrap();
    service
        .add_customer(&Customer::new(7, "Bob", "Ray", "bob@y.org", "555-0199"))
        .unwrap();

    assert_eq!(service.find_customer_by_id(1).unwrap(), ann());
    let ids: Vec<_> = service
        .list_customers()
        .unwrap()
        .into_iter()
        .map(|customer| customer.customer_id)
        .collect();
    assert_eq!(ids, vec![1, 7]);
}

#[test]
fn missing_customer_reports_not_found() {
    let conn = setup();
    let service = CarLeaseService::new(SqliteCarLeaseRepository::try_new(&conn).unwrap());

    let err = service.find_customer_by_id(42).unwrap_err();
    assert!(matches!(err, RepoError::CustomerNotFound(42)));
    assert_eq!(err.kind(), ErrorKind::NotFound);

    let err = service.remove_customer(42).unwrap_err();
    assert!(matches!(err, RepoError::CustomerNotFound(42)));
}

#[test]
fn duplicate_customer_id_is_a_conflict() {
    let conn = setup();
    let service = CarLeaseService::new(SqliteCarLeaseRepository::try_new(&conn).unwrap());

    service.add_customer(&ann()).unwrap();
    let err = service
        .add_customer(&Customer::new(1, "Other", "Person", "o@p.com", "1"))
        .unwrap_err();
    assert!(matches!(err, RepoError::DuplicateCustomer(1)));
    assert_eq!(service.find_customer_by_id(1).unwrap().first_name, "Ann");
}

#[test]
fn invalid_email_is_rejected() {
    let conn = setup();
    let service = CarLeaseService::new(SqliteCarLeaseRepository::try_new(&conn).unwrap());

    let err = service
        .add_customer(&Customer::new(2, "Cy", "Doe", "not-an-email", "555"))
        .unwrap_err();
    assert!(matches!(
        err,
        RepoError::Validation(ValidationError::InvalidEmail)
    ));
    assert!(service.list_customers().unwrap().is_empty());
}

#[test]
fn remove_customer_cascades_only_that_customers_payments_and_leases() {
    let conn = setup();
    let service = CarLeaseService::new(SqliteCarLeaseRepository::try_new(&conn).unwrap());
    seed_customer_with_history(&service);

    service
        .add_customer(&Customer::new(2, "Bob", "Ray", "bob@y.org", "555-0199"))
        .unwrap();
    let bob_vehicle = service.add_vehicle(&vehicle()).unwrap();
    let bob_lease = service
        .create_lease(&NewLease {
            customer_id: 2,
            vehicle_id: bob_vehicle,
            start_date: 5_000,
            end_date: None,
            lease_type: LeaseType::Daily,
        })
        .unwrap();
    let bob_payment = service
        .record_payment(&NewPayment {
            lease_id: bob_lease,
            payment_date: 6_000,
            amount: 40.0,
        })
        .unwrap();

    let removal = service.remove_customer(1).unwrap();
    assert_eq!(
        removal,
        CustomerRemoval {
            payments_removed: 3,
            leases_removed: 2,
        }
    );

    assert_eq!(
        count(
            &conn,
            "SELECT COUNT(*) FROM payments p
             JOIN leases l ON l.lease_id = p.lease_id
             WHERE l.customer_id = 1;"
        ),
        0
    );
    assert_eq!(
        count(&conn, "SELECT COUNT(*) FROM leases WHERE customer_id = 1;"),
        0
    );
    assert!(service.find_customer_by_id(1).unwrap_err().is_not_found());

    assert_eq!(service.find_customer_by_id(2).unwrap().first_name, "Bob");
    let remaining_leases: Vec<_> = service
        .list_lease_history()
        .unwrap()
        .into_iter()
        .map(|lease| lease.lease_id)
        .collect();
    assert_eq!(remaining_leases, vec![bob_lease]);
    assert!(service.find_lease_by_id(bob_lease).unwrap().is_active());
    let bob_payments: Vec<_> = service
        .list_payments_for_lease(bob_lease)
        .unwrap()
        .into_iter()
        .map(|payment| payment.payment_id)
        .collect();
    assert_eq!(bob_payments, vec![bob_payment]);
    assert_eq!(count(&conn, "SELECT COUNT(*) FROM payments;"), 1);
    assert_eq!(
        service.find_vehicle_by_id(bob_vehicle).unwrap().status,
        VehicleStatus::NotAvailable
    );
}

#[test]
fn remove_customer_without_leases_removes_only_the_customer() {
    let conn = setup();
    let service = CarLeaseService::new(SqliteCarLeaseRepository::try_new(&conn).unwrap());
    service.add_customer(&ann()).unwrap();

    let removal = service.remove_customer(1).unwrap();
    assert_eq!(removal, CustomerRemoval::default());
    assert!(service.list_customers().unwrap().is_empty());
}

#[test]
fn failure_before_customer_delete_rolls_back_every_step() {
    let conn = setup();
    let service = CarLeaseService::new(SqliteCarLeaseRepository::try_new(&conn).unwrap());
    seed_customer_with_history(&service);

    conn.execute_batch(
        "CREATE TRIGGER inject_customer_delete_failure
         BEFORE DELETE ON customers
         BEGIN
            SELECT RAISE(ABORT, 'injected failure');
         END;",
    )
    .unwrap();

    let err = service.remove_customer(1).unwrap_err();
    assert!(err.is_store_fault());

    assert_eq!(count(&conn, "SELECT COUNT(*) FROM payments;"), 3);
    assert_eq!(count(&conn, "SELECT COUNT(*) FROM leases;"), 2);
    assert_eq!(service.find_customer_by_id(1).unwrap(), ann());

    conn.execute_batch("DROP TRIGGER inject_customer_delete_failure;")
        .unwrap();
    service.remove_customer(1).unwrap();
    assert_eq!(count(&conn, "SELECT COUNT(*) FROM payments;"), 0);
    assert_eq!(count(&conn, "SELECT COUNT(*) FROM leases;"), 0);
}

#[test]
fn removing_customer_releases_vehicles_of_active_leases() {
    let conn = setup();
    let service = CarLeaseService::new(SqliteCarLeaseRepository::try_new(&conn).unwrap());
    seed_customer_with_history(&service);
    let rented = service.list_rented_vehicles().unwrap();
    assert_eq!(rented.len(), 1);

    service.remove_customer(1).unwrap();

    assert!(service.list_rented_vehicles().unwrap().is_empty());
    assert_eq!(service.list_available_vehicles().unwrap().len(), 2);
    service.remove_vehicle(rented[0].vehicle_id).unwrap();
}
