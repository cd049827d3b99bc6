//! Diesel table definitions. Must match `backend/migrations` exactly.

diesel::table! {
    /// Registered customers. `email` carries the `customers_email_key` unique constraint.
    customers (id) {
        id -> Int8,
        first_name -> Varchar,
        last_name -> Varchar,
        email -> Varchar,
        phone_number -> Varchar,
        birth_date -> Date,
    }
}

diesel::table! {
    /// Flights. `flight_number` carries the `flights_flight_number_key` unique constraint.
    flights (id) {
        id -> Int8,
        flight_number -> Varchar,
        departure -> Varchar,
        destination -> Varchar,
    }
}

diesel::table! {
    /// Bookings of one customer on one flight; rows cascade with either parent.
    bookings (id) {
        id -> Int8,
        customer_id -> Int8,
        flight_id -> Int8,
        booking_date -> Date,
    }
}

diesel::table! {
    /// Travel agent records holding raw, unenforced resource ids.
    travel_agents (id) {
        id -> Int8,
        customer_id -> Int8,
        hotel_id -> Int8,
        flight_id -> Int8,
        taxi_id -> Int8,
        booking_date -> Date,
    }
}

diesel::joinable!(bookings -> customers (customer_id));
diesel::joinable!(bookings -> flights (flight_id));

diesel::allow_tables_to_appear_in_same_query!(bookings, customers, flights, travel_agents);
