//! Guest booking service: one customer and one booking, all or nothing.
//!
//! Every check that can be made before the write is made here so that the
//! common failures never open a transaction. The repository still runs
//! both inserts in one transaction and reports the races it loses.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::{info, warn};

use crate::domain::customer_service::map_customer_error;
use crate::domain::flight_service::map_flight_error;
use crate::domain::ports::{
    CustomerRepository, FlightRepository, GuestBookingCommand, GuestBookingRepository,
    GuestBookingRepositoryError,
};
use crate::domain::service_support::{duplicate_email, not_found, storage_failure, today};
use crate::domain::{Booking, Error, GuestBookingDraft, GuestBookingState, NewGuestBooking};

/// Guest booking service over the composite repository plus the customer
/// and flight lookups used for pre-checks.
#[derive(Clone)]
pub struct GuestBookingService<G, C, F> {
    guest_bookings: Arc<G>,
    customers: Arc<C>,
    flights: Arc<F>,
    clock: Arc<dyn Clock>,
}

impl<G, C, F> GuestBookingService<G, C, F> {
    /// Create a new service; `customers` and `flights` back the pre-checks.
    pub fn new(
        guest_bookings: Arc<G>,
        customers: Arc<C>,
        flights: Arc<F>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            guest_bookings,
            customers,
            flights,
            clock,
        }
    }
}

fn map_guest_booking_error(error: GuestBookingRepositoryError) -> Error {
    match error {
        GuestBookingRepositoryError::DuplicateEmail { .. } => duplicate_email(),
        GuestBookingRepositoryError::MissingFlight { id } => not_found("Flight", id),
        other => storage_failure("GuestBooking", other.kind(), &other),
    }
}

impl<G, C, F> GuestBookingService<G, C, F>
where
    G: GuestBookingRepository,
    C: CustomerRepository,
    F: FlightRepository,
{
    async fn precheck(&self, guest_booking: &NewGuestBooking) -> Result<(), Error> {
        let email = &guest_booking.customer.email;
        if self
            .customers
            .find_by_email(email)
            .await
            .map_err(map_customer_error)?
            .is_some()
        {
            return Err(duplicate_email());
        }

        let flight_id = guest_booking.leg.flight_id;
        self.flights
            .find_by_id(flight_id)
            .await
            .map_err(map_flight_error)?
            .ok_or_else(|| not_found("Flight", flight_id))?;
        Ok(())
    }
}

#[async_trait]
impl<G, C, F> GuestBookingCommand for GuestBookingService<G, C, F>
where
    G: GuestBookingRepository,
    C: CustomerRepository,
    F: FlightRepository,
{
    async fn create(&self, draft: GuestBookingDraft) -> Result<Booking, Error> {
        let guest_booking = draft.validate(today(self.clock.as_ref()))?;
        self.precheck(&guest_booking).await?;

        let outcome = self.guest_bookings.create(&guest_booking).await;
        let state = GuestBookingState::Pending.settle(&outcome);
        match outcome {
            Ok(booking) => {
                info!(
                    state = state.as_str(),
                    booking_id = %booking.id,
                    customer_id = %booking.customer.id,
                    "guest booking written"
                );
                Ok(booking)
            }
            Err(error) => {
                warn!(state = state.as_str(), kind = error.kind(), "guest booking abandoned");
                Err(map_guest_booking_error(error))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::{
        MockCustomerRepository, MockFlightRepository, MockGuestBookingRepository,
    };
    use crate::domain::service_support::test_clock::{date, fixture_clock};
    use crate::domain::{
        BookingId, Customer, CustomerDraft, CustomerId, ErrorCode, Flight, FlightId,
    };
    use rstest::{fixture, rstest};

    type Service = GuestBookingService<
        MockGuestBookingRepository,
        MockCustomerRepository,
        MockFlightRepository,
    >;

    fn service(
        guest_bookings: MockGuestBookingRepository,
        customers: MockCustomerRepository,
        flights: MockFlightRepository,
    ) -> Service {
        GuestBookingService::new(
            Arc::new(guest_bookings),
            Arc::new(customers),
            Arc::new(flights),
            fixture_clock(),
        )
    }

    fn flight() -> Flight {
        Flight {
            id: FlightId::new(1),
            flight_number: "NCL1".to_owned(),
            departure: "LHR".to_owned(),
            destination: "NCL".to_owned(),
            booking_ids: Vec::new(),
        }
    }

    #[fixture]
    fn draft() -> GuestBookingDraft {
        GuestBookingDraft {
            customer: CustomerDraft {
                first_name: "Jane".to_owned(),
                last_name: "Doe".to_owned(),
                email: "jane@mailinator.com".to_owned(),
                phone_number: "(212) 555-1234".to_owned(),
                birth_date: Some(date(1985, 10, 10)),
            },
            flight_id: Some(FlightId::new(1)),
            booking_date: Some(date(2024, 1, 1)),
        }
    }

    fn stored(guest_booking: &NewGuestBooking) -> Booking {
        Booking {
            id: BookingId::new(1),
            customer: guest_booking.customer.clone().with_id(CustomerId::new(1)),
            flight: flight(),
            booking_date: guest_booking.leg.booking_date,
        }
    }

    #[rstest]
    #[tokio::test]
    async fn valid_guest_booking_is_written_once(draft: GuestBookingDraft) {
        let mut customers = MockCustomerRepository::new();
        customers.expect_find_by_email().return_once(|_| Ok(None));
        let mut flights = MockFlightRepository::new();
        flights.expect_find_by_id().return_once(|_| Ok(Some(flight())));
        let mut guest_bookings = MockGuestBookingRepository::new();
        guest_bookings
            .expect_create()
            .times(1)
            .returning(|gb| Ok(stored(gb)));

        let booking = service(guest_bookings, customers, flights)
            .create(draft)
            .await
            .expect("written");
        assert_eq!(booking.customer.email, "jane@mailinator.com");
    }

    #[rstest]
    #[tokio::test]
    async fn taken_email_never_opens_transaction(draft: GuestBookingDraft) {
        let mut customers = MockCustomerRepository::new();
        customers.expect_find_by_email().return_once(|_| {
            Ok(Some(Customer {
                id: CustomerId::new(4),
                first_name: "Jane".to_owned(),
                last_name: "Doe".to_owned(),
                email: "jane@mailinator.com".to_owned(),
                phone_number: "(212) 555-1234".to_owned(),
                birth_date: date(1985, 10, 10),
            }))
        });
        let mut guest_bookings = MockGuestBookingRepository::new();
        guest_bookings.expect_create().never();

        let error = service(guest_bookings, customers, MockFlightRepository::new())
            .create(draft)
            .await
            .expect_err("duplicate");
        assert_eq!(error.code(), ErrorCode::DuplicateKey);
    }

    #[rstest]
    #[tokio::test]
    async fn unknown_flight_never_opens_transaction(draft: GuestBookingDraft) {
        let mut customers = MockCustomerRepository::new();
        customers.expect_find_by_email().return_once(|_| Ok(None));
        let mut flights = MockFlightRepository::new();
        flights.expect_find_by_id().return_once(|_| Ok(None));
        let mut guest_bookings = MockGuestBookingRepository::new();
        guest_bookings.expect_create().never();

        let error = service(guest_bookings, customers, flights)
            .create(draft)
            .await
            .expect_err("unknown flight");
        assert_eq!(error.code(), ErrorCode::NotFound);
    }

    #[rstest]
    #[tokio::test]
    async fn invalid_halves_are_reported_together(mut draft: GuestBookingDraft) {
        draft.customer.email = "not-an-email".to_owned();
        draft.booking_date = Some(date(2030, 1, 1));

        let error = service(
            MockGuestBookingRepository::new(),
            MockCustomerRepository::new(),
            MockFlightRepository::new(),
        )
        .create(draft)
        .await
        .expect_err("invalid");
        assert_eq!(error.code(), ErrorCode::ValidationFailed);
        let details = error.details().and_then(|d| d.as_object()).expect("map");
        assert!(details.contains_key("email"));
        assert!(details.contains_key("bookingDate"));
    }

    #[rstest]
    #[case(GuestBookingRepositoryError::duplicate_email("jane@mailinator.com"), ErrorCode::DuplicateKey)]
    #[case(GuestBookingRepositoryError::missing_flight(1_i64), ErrorCode::NotFound)]
    #[case(GuestBookingRepositoryError::query("deadlock"), ErrorCode::InternalError)]
    #[tokio::test]
    async fn rolled_back_writes_surface_their_cause(
        draft: GuestBookingDraft,
        #[case] failure: GuestBookingRepositoryError,
        #[case] expected: ErrorCode,
    ) {
        let mut customers = MockCustomerRepository::new();
        customers.expect_find_by_email().return_once(|_| Ok(None));
        let mut flights = MockFlightRepository::new();
        flights.expect_find_by_id().return_once(|_| Ok(Some(flight())));
        let mut guest_bookings = MockGuestBookingRepository::new();
        guest_bookings.expect_create().return_once(move |_| Err(failure));

        let error = service(guest_bookings, customers, flights)
            .create(draft)
            .await
            .expect_err("rolled back");
        assert_eq!(error.code(), expected);
    }
}
