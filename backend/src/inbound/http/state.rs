//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use mockable::Clock;

use crate::domain::ports::{
    BookingCommand, BookingQuery, BookingRepository, CustomerCommand, CustomerQuery,
    CustomerRepository, FlightCommand, FlightQuery, FlightRepository, GuestBookingCommand,
    GuestBookingRepository, TravelAgentCommand, TravelAgentQuery, TravelAgentRepository,
};
use crate::domain::{
    BookingService, CustomerService, FlightService, GuestBookingService, TravelAgentService,
};

/// Parameter object bundling all port implementations for HTTP handlers.
#[derive(Clone)]
pub struct HttpStatePorts {
    pub customers: Arc<dyn CustomerCommand>,
    pub customers_query: Arc<dyn CustomerQuery>,
    pub flights: Arc<dyn FlightCommand>,
    pub flights_query: Arc<dyn FlightQuery>,
    pub bookings: Arc<dyn BookingCommand>,
    pub bookings_query: Arc<dyn BookingQuery>,
    pub travel_agents: Arc<dyn TravelAgentCommand>,
    pub travel_agents_query: Arc<dyn TravelAgentQuery>,
    pub guest_bookings: Arc<dyn GuestBookingCommand>,
}

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub customers: Arc<dyn CustomerCommand>,
    pub customers_query: Arc<dyn CustomerQuery>,
    pub flights: Arc<dyn FlightCommand>,
    pub flights_query: Arc<dyn FlightQuery>,
    pub bookings: Arc<dyn BookingCommand>,
    pub bookings_query: Arc<dyn BookingQuery>,
    pub travel_agents: Arc<dyn TravelAgentCommand>,
    pub travel_agents_query: Arc<dyn TravelAgentQuery>,
    pub guest_bookings: Arc<dyn GuestBookingCommand>,
}

impl HttpState {
    /// Construct state from the port bundle.
    pub fn new(ports: HttpStatePorts) -> Self {
        let HttpStatePorts {
            customers,
            customers_query,
            flights,
            flights_query,
            bookings,
            bookings_query,
            travel_agents,
            travel_agents_query,
            guest_bookings,
        } = ports;
        Self {
            customers,
            customers_query,
            flights,
            flights_query,
            bookings,
            bookings_query,
            travel_agents,
            travel_agents_query,
            guest_bookings,
        }
    }
}

/// Repository adapters the domain services are built over.
///
/// The server and the HTTP tests share this wiring so both exercise the same
/// service graph whatever the backing store.
pub struct Repositories<C, F, B, T, G> {
    pub customers: Arc<C>,
    pub flights: Arc<F>,
    pub bookings: Arc<B>,
    pub travel_agents: Arc<T>,
    pub guest_bookings: Arc<G>,
}

impl<S> Repositories<S, S, S, S, S> {
    /// Use one adapter for every repository port.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use mockable::DefaultClock;
    /// use travel_backend::inbound::http::state::{HttpState, Repositories};
    /// use travel_backend::outbound::memory::InMemoryStore;
    ///
    /// let store = Arc::new(InMemoryStore::default());
    /// let ports = Repositories::shared(store).into_ports(Arc::new(DefaultClock));
    /// let _state = HttpState::new(ports);
    /// ```
    pub fn shared(store: Arc<S>) -> Self {
        Self {
            customers: store.clone(),
            flights: store.clone(),
            bookings: store.clone(),
            travel_agents: store.clone(),
            guest_bookings: store,
        }
    }
}

impl<C, F, B, T, G> Repositories<C, F, B, T, G>
where
    C: CustomerRepository + 'static,
    F: FlightRepository + 'static,
    B: BookingRepository + 'static,
    T: TravelAgentRepository + 'static,
    G: GuestBookingRepository + 'static,
{
    /// Build the domain services and expose them as driving ports.
    pub fn into_ports(self, clock: Arc<dyn Clock>) -> HttpStatePorts {
        let Self {
            customers,
            flights,
            bookings,
            travel_agents,
            guest_bookings,
        } = self;

        let customer_service = Arc::new(CustomerService::new(customers.clone(), clock.clone()));
        let flight_service = Arc::new(FlightService::new(flights.clone()));
        let booking_service = Arc::new(BookingService::new(
            bookings,
            customers.clone(),
            flights.clone(),
            clock.clone(),
        ));
        let travel_agent_service = Arc::new(TravelAgentService::new(travel_agents, clock.clone()));
        let guest_booking_service = Arc::new(GuestBookingService::new(
            guest_bookings,
            customers,
            flights,
            clock,
        ));

        HttpStatePorts {
            customers: customer_service.clone(),
            customers_query: customer_service,
            flights: flight_service.clone(),
            flights_query: flight_service,
            bookings: booking_service.clone(),
            bookings_query: booking_service,
            travel_agents: travel_agent_service.clone(),
            travel_agents_query: travel_agent_service,
            guest_bookings: guest_booking_service,
        }
    }
}

impl From<HttpStatePorts> for HttpState {
    fn from(ports: HttpStatePorts) -> Self {
        Self::new(ports)
    }
}
