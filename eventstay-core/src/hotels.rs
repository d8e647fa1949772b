use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use eventstay_shared::{Hotel, HotelWithRooms};
use tracing::{debug, info};

use crate::entitlement::EntitlementGate;
use crate::repository::HotelRepository;
use crate::{AccessError, AccessResult, Missing};

/// Identifier of a hotel as accepted from callers: a positive 32-bit integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HotelId(i32);

impl HotelId {
    pub fn new(id: i32) -> Option<Self> {
        (id > 0).then_some(Self(id))
    }

    pub fn get(self) -> i32 {
        self.0
    }
}

impl fmt::Display for HotelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for HotelId {
    type Err = AccessError;

    /// Digits only; no sign, whitespace, or fraction.
    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let invalid = || AccessError::InvalidHotelId(raw.to_string());

        if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        raw.parse::<i32>()
            .ok()
            .and_then(HotelId::new)
            .ok_or_else(invalid)
    }
}

/// Hotel listing and detail, both behind the entitlement gate.
#[derive(Clone)]
pub struct HotelService {
    gate: EntitlementGate,
    hotels: Arc<dyn HotelRepository>,
}

impl HotelService {
    pub fn new(gate: EntitlementGate, hotels: Arc<dyn HotelRepository>) -> Self {
        Self { gate, hotels }
    }

    /// All hotels, in id order. An empty inventory is `NotFound`.
    pub async fn list(&self, user_id: i32) -> AccessResult<Vec<Hotel>> {
        self.gate.evaluate(user_id).await?;

        let hotels = self.hotels.find_all_hotels().await?;
        if hotels.is_empty() {
            debug!("No hotels registered");
            return Err(AccessError::NotFound(Missing::HotelCollection));
        }

        info!("Listing {} hotels for user {}", hotels.len(), user_id);
        Ok(hotels)
    }

    /// One hotel with its rooms. `raw_hotel_id` is validated before any lookup.
    pub async fn detail(&self, user_id: i32, raw_hotel_id: &str) -> AccessResult<HotelWithRooms> {
        let hotel_id: HotelId = raw_hotel_id.parse()?;
        self.detail_by_id(user_id, hotel_id).await
    }

    pub async fn detail_by_id(&self, user_id: i32, hotel_id: HotelId) -> AccessResult<HotelWithRooms> {
        self.gate.evaluate(user_id).await?;

        let found = self
            .hotels
            .find_hotel_with_rooms(hotel_id.get())
            .await?
            .ok_or(AccessError::NotFound(Missing::Hotel(hotel_id)))?;

        debug!("Hotel {} has {} rooms", hotel_id, found.rooms.len());
        Ok(found)
    }
}
