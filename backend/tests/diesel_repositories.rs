//! Integration tests for the Diesel repositories against PostgreSQL.
//!
//! Set `TRAVEL_TEST_DATABASE_URL` to a disposable database to run them;
//! each test migrates and truncates it first. Without the variable every
//! test prints a `SKIP-TEST-DATABASE` marker and passes.

use chrono::NaiveDate;
use rstest::{fixture, rstest};
use travel_backend::domain::ports::{
    BookingRepository, BookingRepositoryError, CustomerRepository, CustomerRepositoryError,
    FlightRepository, FlightRepositoryError, GuestBookingRepository,
    GuestBookingRepositoryError, TravelAgentRepository,
};
use travel_backend::domain::{
    CustomerId, FlightId, GuestBookingLeg, NewBooking, NewCustomer, NewFlight, NewGuestBooking,
    NewTravelAgent,
};
use travel_backend::outbound::persistence::{
    DieselBookingRepository, DieselCustomerRepository, DieselFlightRepository,
    DieselGuestBookingRepository, DieselTravelAgentRepository,
};

mod support;

use support::database::prepare;

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}

#[fixture]
fn jane() -> NewCustomer {
    NewCustomer {
        first_name: "Jane".to_owned(),
        last_name: "Doe".to_owned(),
        email: "jane@mailinator.com".to_owned(),
        phone_number: "(212) 555-1234".to_owned(),
        birth_date: date(1985, 10, 10),
    }
}

#[fixture]
fn flight() -> NewFlight {
    NewFlight {
        flight_number: "TR101".to_owned(),
        departure: "LHR".to_owned(),
        destination: "JFK".to_owned(),
    }
}

#[rstest]
#[tokio::test]
async fn customers_round_trip_and_enforce_unique_email(jane: NewCustomer) {
    let Some(db) = prepare("customers_round_trip_and_enforce_unique_email").await else {
        return;
    };
    let repo = DieselCustomerRepository::new(db.pool.clone());

    let stored = repo.create(&jane).await.expect("insert customer");
    assert_eq!(
        repo.find_by_email("jane@mailinator.com").await.expect("lookup"),
        Some(stored.clone())
    );

    let err = repo.create(&jane).await.expect_err("duplicate email");
    assert!(matches!(err, CustomerRepositoryError::DuplicateEmail { .. }));

    let mut renamed = jane.clone();
    renamed.first_name = "Janet".to_owned();
    let updated = repo
        .update(stored.id, &renamed)
        .await
        .expect("update")
        .expect("row exists");
    assert_eq!(updated.first_name, "Janet");
    assert!(
        repo.update(CustomerId::new(stored.id.get() + 100), &renamed)
            .await
            .expect("update missing")
            .is_none()
    );

    assert!(repo.delete(stored.id).await.expect("delete"));
    assert!(!repo.delete(stored.id).await.expect("delete again"));
}

#[rstest]
#[tokio::test]
async fn flights_list_in_number_order_with_booking_ids(jane: NewCustomer, flight: NewFlight) {
    let Some(db) = prepare("flights_list_in_number_order_with_booking_ids").await else {
        return;
    };
    let flights = DieselFlightRepository::new(db.pool.clone());
    let customers = DieselCustomerRepository::new(db.pool.clone());
    let bookings = DieselBookingRepository::new(db.pool.clone());

    let later = flights.create(&flight).await.expect("insert flight");
    let mut earlier_flight = flight.clone();
    earlier_flight.flight_number = "AA1".to_owned();
    let earlier = flights.create(&earlier_flight).await.expect("insert flight");

    let err = flights.create(&flight).await.expect_err("duplicate number");
    assert!(matches!(err, FlightRepositoryError::DuplicateFlightNumber { .. }));

    let customer = customers.create(&jane).await.expect("insert customer");
    let booking = bookings
        .create(&NewBooking {
            customer_id: customer.id,
            flight_id: later.id,
            booking_date: date(2024, 1, 1),
        })
        .await
        .expect("insert booking");

    let listed = flights.find_all().await.expect("list flights");
    let ids: Vec<_> = listed.iter().map(|f| f.id).collect();
    assert_eq!(ids, vec![earlier.id, later.id]);
    assert_eq!(listed[1].booking_ids, vec![booking.id]);
}

#[rstest]
#[tokio::test]
async fn bookings_join_customer_names_and_cascade(jane: NewCustomer, flight: NewFlight) {
    let Some(db) = prepare("bookings_join_customer_names_and_cascade").await else {
        return;
    };
    let customers = DieselCustomerRepository::new(db.pool.clone());
    let flights = DieselFlightRepository::new(db.pool.clone());
    let bookings = DieselBookingRepository::new(db.pool.clone());

    let customer = customers.create(&jane).await.expect("insert customer");
    let stored_flight = flights.create(&flight).await.expect("insert flight");
    let booking = bookings
        .create(&NewBooking {
            customer_id: customer.id,
            flight_id: stored_flight.id,
            booking_date: date(2024, 1, 1),
        })
        .await
        .expect("insert booking");
    assert_eq!(booking.customer, customer);

    let by_name = bookings
        .find_by_customer_last_name("Doe")
        .await
        .expect("lookup by last name");
    assert_eq!(by_name.len(), 1);

    let err = bookings
        .create(&NewBooking {
            customer_id: customer.id,
            flight_id: FlightId::new(stored_flight.id.get() + 100),
            booking_date: date(2024, 1, 1),
        })
        .await
        .expect_err("unknown flight");
    assert!(matches!(err, BookingRepositoryError::MissingFlight { .. }));

    assert!(customers.delete(customer.id).await.expect("delete customer"));
    assert!(bookings.find_by_id(booking.id).await.expect("lookup").is_none());
}

#[rstest]
#[tokio::test]
async fn guest_booking_rolls_back_on_unknown_flight(jane: NewCustomer, flight: NewFlight) {
    let Some(db) = prepare("guest_booking_rolls_back_on_unknown_flight").await else {
        return;
    };
    let guest_bookings = DieselGuestBookingRepository::new(db.pool.clone());
    let customers = DieselCustomerRepository::new(db.pool.clone());
    let flights = DieselFlightRepository::new(db.pool.clone());

    let err = guest_bookings
        .create(&NewGuestBooking {
            customer: jane.clone(),
            leg: GuestBookingLeg {
                flight_id: FlightId::new(4242),
                booking_date: date(2024, 1, 1),
            },
        })
        .await
        .expect_err("unknown flight");
    assert!(matches!(err, GuestBookingRepositoryError::MissingFlight { .. }));
    assert!(customers.find_all().await.expect("list customers").is_empty());

    let stored_flight = flights.create(&flight).await.expect("insert flight");
    let booking = guest_bookings
        .create(&NewGuestBooking {
            customer: jane,
            leg: GuestBookingLeg {
                flight_id: stored_flight.id,
                booking_date: date(2024, 1, 1),
            },
        })
        .await
        .expect("guest booking");
    assert_eq!(booking.customer.email, "jane@mailinator.com");
    assert_eq!(booking.flight.id, stored_flight.id);
}

#[rstest]
#[tokio::test]
async fn travel_agents_filter_by_customer_id() {
    let Some(db) = prepare("travel_agents_filter_by_customer_id").await else {
        return;
    };
    let repo = DieselTravelAgentRepository::new(db.pool.clone());
    for customer_id in [1, 2, 1] {
        repo.create(&NewTravelAgent {
            customer_id,
            hotel_id: 0,
            flight_id: 7,
            taxi_id: 0,
            booking_date: date(2024, 1, 1),
        })
        .await
        .expect("insert travel agent");
    }

    let records = repo.find_by_customer_id(1).await.expect("lookup");
    assert_eq!(records.len(), 2);
    assert!(records.windows(2).all(|w| w[0].id < w[1].id));
}
