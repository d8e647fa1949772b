pub mod entitlement;
pub mod hotels;
pub mod repository;

#[cfg(test)]
mod testing;

use std::fmt;

pub use entitlement::{EntitlementGate, TicketContext};
pub use hotels::{HotelId, HotelService};

/// What was missing when a lookup came back empty.
///
/// `HotelCollection` (no hotels at all) and `Hotel` (one id with no row) stay
/// separate even though both surface as 404.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Missing {
    Enrollment,
    Ticket,
    HotelCollection,
    Hotel(HotelId),
}

impl fmt::Display for Missing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Missing::Enrollment => f.write_str("enrollment"),
            Missing::Ticket => f.write_str("ticket"),
            Missing::HotelCollection => f.write_str("hotels"),
            Missing::Hotel(id) => write!(f, "hotel {}", id),
        }
    }
}

/// Why an existing ticket does not grant hotel access.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unentitled {
    TicketReserved,
    RemoteTicketType,
    HotelNotIncluded,
}

impl fmt::Display for Unentitled {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Unentitled::TicketReserved => f.write_str("ticket is reserved but not paid"),
            Unentitled::RemoteTicketType => f.write_str("ticket type is remote"),
            Unentitled::HotelNotIncluded => f.write_str("ticket type does not include hotel"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AccessError {
    #[error("Not found: {0}")]
    NotFound(Missing),
    #[error("Payment required: {0}")]
    PaymentRequired(Unentitled),
    #[error("Invalid hotel id: {0:?}")]
    InvalidHotelId(String),
    #[error("Store lookup failed: {0}")]
    Store(#[from] repository::RepoError),
}

pub type AccessResult<T> = Result<T, AccessError>;
