//! Store-assigned entity identifiers.
//!
//! Every entity receives a positive 64-bit identity on its first write. The
//! newtypes keep a booking's customer reference from being confused with its
//! flight reference at compile time.

macro_rules! define_entity_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(i64);

        impl $name {
            /// Wrap a raw store identity.
            #[must_use]
            pub const fn new(raw: i64) -> Self {
                Self(raw)
            }

            /// Raw store identity.
            #[must_use]
            pub const fn get(self) -> i64 {
                self.0
            }
        }

        impl From<i64> for $name {
            fn from(raw: i64) -> Self {
                Self(raw)
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

define_entity_id!(
    /// Identity of a persisted [`crate::domain::Customer`].
    CustomerId
);
define_entity_id!(
    /// Identity of a persisted [`crate::domain::Flight`].
    FlightId
);
define_entity_id!(
    /// Identity of a persisted [`crate::domain::Booking`].
    BookingId
);
define_entity_id!(
    /// Identity of a persisted [`crate::domain::TravelAgent`].
    TravelAgentId
);
