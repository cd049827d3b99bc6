//! Shared helpers for the Diesel repositories.
//!
//! - [`classify`] sorts a Diesel error into the few failure shapes the
//!   repository ports distinguish, logging the raw cause at `debug`.
//! - [`load_bookings`] and [`load_flights`] assemble the nested domain
//!   values (a booking embeds its customer and flight; a flight lists the
//!   ids of its bookings) from joined rows.

use std::collections::HashMap;

use diesel::QueryResult;
use diesel::prelude::*;
use diesel_async::{AsyncPgConnection, RunQueryDsl};
use tracing::debug;

use crate::domain::{Booking, BookingId, Flight};

use super::models::{BookingRow, CustomerRow, FlightRow};
use super::schema::{bookings, customers, flights};

pub(crate) const CUSTOMER_EMAIL_CONSTRAINT: &str = "customers_email_key";
pub(crate) const FLIGHT_NUMBER_CONSTRAINT: &str = "flights_flight_number_key";
pub(crate) const BOOKING_CUSTOMER_CONSTRAINT: &str = "bookings_customer_id_fkey";
pub(crate) const BOOKING_FLIGHT_CONSTRAINT: &str = "bookings_flight_id_fkey";

/// Failure shapes shared by every repository port.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum StoreFailure {
    Connection(String),
    Query(String),
    UniqueViolation { constraint: Option<String> },
    ForeignKeyViolation { constraint: Option<String> },
}

impl StoreFailure {
    /// Whether the failure is a violation of the named constraint.
    ///
    /// Drivers that do not report constraint names match any constraint of
    /// the same kind.
    pub(crate) fn names(&self, constraint: &str) -> bool {
        match self {
            Self::UniqueViolation { constraint: found }
            | Self::ForeignKeyViolation { constraint: found } => {
                found.as_deref().is_none_or(|name| name == constraint)
            }
            Self::Connection(_) | Self::Query(_) => false,
        }
    }

    pub(crate) fn into_message(self) -> String {
        match self {
            Self::Connection(message) | Self::Query(message) => message,
            Self::UniqueViolation { constraint } => {
                format!("unique constraint violated: {}", constraint.unwrap_or_default())
            }
            Self::ForeignKeyViolation { constraint } => {
                format!("foreign key violated: {}", constraint.unwrap_or_default())
            }
        }
    }
}

/// Classify a Diesel error.
pub(crate) fn classify(error: diesel::result::Error) -> StoreFailure {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(
                ?kind,
                message = info.message(),
                constraint = info.constraint_name(),
                "diesel operation failed"
            );
        }
        _ => debug!(error = %error, "diesel operation failed"),
    }

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => {
            StoreFailure::UniqueViolation {
                constraint: info.constraint_name().map(str::to_owned),
            }
        }
        DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, info) => {
            StoreFailure::ForeignKeyViolation {
                constraint: info.constraint_name().map(str::to_owned),
            }
        }
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            StoreFailure::Connection("database connection error".to_owned())
        }
        DieselError::NotFound => StoreFailure::Query("record not found".to_owned()),
        DieselError::QueryBuilderError(_) => {
            StoreFailure::Query("database query error".to_owned())
        }
        _ => StoreFailure::Query("database error".to_owned()),
    }
}

/// Ids of the bookings on each of `flight_ids`, ascending.
pub(crate) async fn load_booking_ids(
    conn: &mut AsyncPgConnection,
    flight_ids: &[i64],
) -> QueryResult<HashMap<i64, Vec<BookingId>>> {
    if flight_ids.is_empty() {
        return Ok(HashMap::new());
    }
    let pairs: Vec<(i64, i64)> = bookings::table
        .filter(bookings::flight_id.eq_any(flight_ids))
        .select((bookings::flight_id, bookings::id))
        .order_by(bookings::id.asc())
        .load(conn)
        .await?;

    let mut grouped: HashMap<i64, Vec<BookingId>> = HashMap::new();
    for (flight_id, booking_id) in pairs {
        grouped
            .entry(flight_id)
            .or_default()
            .push(BookingId::new(booking_id));
    }
    Ok(grouped)
}

/// Attach booking ids to flight rows, keeping their order.
pub(crate) async fn load_flights(
    conn: &mut AsyncPgConnection,
    rows: Vec<FlightRow>,
) -> QueryResult<Vec<Flight>> {
    let ids: Vec<i64> = rows.iter().map(|row| row.id).collect();
    let mut booking_ids = load_booking_ids(conn, &ids).await?;
    Ok(rows
        .into_iter()
        .map(|row| {
            let ids = booking_ids.remove(&row.id).unwrap_or_default();
            row.into_flight(ids)
        })
        .collect())
}

/// Which bookings [`load_bookings`] returns.
#[derive(Debug, Clone, Copy)]
pub(crate) enum BookingLookup<'a> {
    All,
    Id(i64),
    CustomerFirstName(&'a str),
    CustomerLastName(&'a str),
}

/// Bookings with their customer and flight, ordered by booking id.
pub(crate) async fn load_bookings(
    conn: &mut AsyncPgConnection,
    lookup: BookingLookup<'_>,
) -> QueryResult<Vec<Booking>> {
    let query = bookings::table
        .inner_join(customers::table)
        .inner_join(flights::table)
        .select((
            BookingRow::as_select(),
            CustomerRow::as_select(),
            FlightRow::as_select(),
        ))
        .order_by(bookings::id.asc())
        .into_boxed();
    let query = match lookup {
        BookingLookup::All => query,
        BookingLookup::Id(id) => query.filter(bookings::id.eq(id)),
        BookingLookup::CustomerFirstName(name) => query.filter(customers::first_name.eq(name)),
        BookingLookup::CustomerLastName(name) => query.filter(customers::last_name.eq(name)),
    };
    let rows: Vec<(BookingRow, CustomerRow, FlightRow)> = query.load(conn).await?;

    let mut flight_ids: Vec<i64> = rows.iter().map(|(_, _, flight)| flight.id).collect();
    flight_ids.sort_unstable();
    flight_ids.dedup();
    let booking_ids = load_booking_ids(conn, &flight_ids).await?;

    Ok(rows
        .into_iter()
        .map(|(booking, customer, flight)| {
            let ids = booking_ids.get(&flight.id).cloned().unwrap_or_default();
            Booking {
                id: BookingId::new(booking.id),
                customer: customer.into(),
                flight: flight.into_flight(ids),
                booking_date: booking.booking_date,
            }
        })
        .collect())
}
