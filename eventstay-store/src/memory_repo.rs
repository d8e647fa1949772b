use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use eventstay_core::repository::{
    EnrollmentRepository, HotelRepository, RepoError, SessionRepository, TicketRepository,
};
use eventstay_shared::pii::Masked;
use eventstay_shared::{
    Enrollment, Hotel, HotelWithRooms, Room, Session, Ticket, TicketStatus, TicketType,
    TicketWithType,
};
use tokio::sync::RwLock;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum MemoryStoreError {
    #[error("User {0} already has an enrollment")]
    DuplicateEnrollment(i32),
    #[error("Enrollment not found: {0}")]
    EnrollmentNotFound(i32),
    #[error("Enrollment {0} already has a ticket")]
    DuplicateTicket(i32),
    #[error("Ticket type not found: {0}")]
    TicketTypeNotFound(i32),
    #[error("Hotel not found: {0}")]
    HotelNotFound(i32),
    #[error("Hotel {hotel_id} still has {rooms} rooms")]
    HotelHasRooms { hotel_id: i32, rooms: usize },
}

#[derive(Default)]
struct Tables {
    next_id: i32,
    sessions: BTreeMap<i32, Session>,
    enrollments: BTreeMap<i32, Enrollment>,
    ticket_types: BTreeMap<i32, TicketType>,
    tickets: BTreeMap<i32, Ticket>,
    hotels: BTreeMap<i32, Hotel>,
    rooms: BTreeMap<i32, Room>,
}

impl Tables {
    fn next_id(&mut self) -> i32 {
        self.next_id += 1;
        self.next_id
    }
}

/// In-process store implementing every lookup trait. Used by tests and by
/// local runs without Postgres. Rows are kept in id order, so reads are
/// stable for a fixed state.
///
/// The fixture constructors below mirror what the upstream registration and
/// inventory flows would write; they are not exposed over HTTP.
#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
    offline: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every lookup fail as if the database were unreachable.
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    fn check_online(&self) -> Result<(), RepoError> {
        if self.offline.load(Ordering::SeqCst) {
            return Err("memory store is offline".into());
        }
        Ok(())
    }

    pub async fn create_session(&self, user_id: i32, token: &str) -> Session {
        let mut tables = self.tables.write().await;
        let now = Utc::now();
        let session = Session {
            id: tables.next_id(),
            user_id,
            token: token.to_string(),
            created_at: now,
            updated_at: now,
        };
        tables.sessions.insert(session.id, session.clone());
        session
    }

    pub async fn create_enrollment(
        &self,
        user_id: i32,
        name: &str,
        cpf: &str,
        phone: &str,
    ) -> Result<Enrollment, MemoryStoreError> {
        let mut tables = self.tables.write().await;
        if tables.enrollments.values().any(|e| e.user_id == user_id) {
            return Err(MemoryStoreError::DuplicateEnrollment(user_id));
        }

        let now = Utc::now();
        let enrollment = Enrollment {
            id: tables.next_id(),
            name: name.to_string(),
            cpf: Masked(cpf.to_string()),
            birthday: now,
            phone: Masked(phone.to_string()),
            user_id,
            created_at: now,
            updated_at: now,
        };
        tables.enrollments.insert(enrollment.id, enrollment.clone());
        Ok(enrollment)
    }

    pub async fn create_ticket_type(
        &self,
        name: &str,
        price: i32,
        is_remote: bool,
        includes_hotel: bool,
    ) -> TicketType {
        let mut tables = self.tables.write().await;
        let now = Utc::now();
        let ticket_type = TicketType {
            id: tables.next_id(),
            name: name.to_string(),
            price,
            is_remote,
            includes_hotel,
            created_at: now,
            updated_at: now,
        };
        tables.ticket_types.insert(ticket_type.id, ticket_type.clone());
        ticket_type
    }

    pub async fn create_ticket(
        &self,
        enrollment_id: i32,
        ticket_type_id: i32,
        status: TicketStatus,
    ) -> Result<Ticket, MemoryStoreError> {
        let mut tables = self.tables.write().await;
        if !tables.enrollments.contains_key(&enrollment_id) {
            return Err(MemoryStoreError::EnrollmentNotFound(enrollment_id));
        }
        if !tables.ticket_types.contains_key(&ticket_type_id) {
            return Err(MemoryStoreError::TicketTypeNotFound(ticket_type_id));
        }
        if tables.tickets.values().any(|t| t.enrollment_id == enrollment_id) {
            return Err(MemoryStoreError::DuplicateTicket(enrollment_id));
        }

        let now = Utc::now();
        let ticket = Ticket {
            id: tables.next_id(),
            ticket_type_id,
            enrollment_id,
            status,
            created_at: now,
            updated_at: now,
        };
        tables.tickets.insert(ticket.id, ticket.clone());
        Ok(ticket)
    }

    pub async fn create_hotel(&self, name: &str, image: &str) -> Hotel {
        let mut tables = self.tables.write().await;
        let now = Utc::now();
        let hotel = Hotel {
            id: tables.next_id(),
            name: name.to_string(),
            image: image.to_string(),
            created_at: now,
            updated_at: now,
        };
        tables.hotels.insert(hotel.id, hotel.clone());
        hotel
    }

    pub async fn create_room(
        &self,
        hotel_id: i32,
        name: &str,
        capacity: i32,
    ) -> Result<Room, MemoryStoreError> {
        let mut tables = self.tables.write().await;
        if !tables.hotels.contains_key(&hotel_id) {
            return Err(MemoryStoreError::HotelNotFound(hotel_id));
        }

        let now = Utc::now();
        let room = Room {
            id: tables.next_id(),
            name: name.to_string(),
            capacity,
            hotel_id,
            created_at: now,
            updated_at: now,
        };
        tables.rooms.insert(room.id, room.clone());
        Ok(room)
    }

    /// Removes every room of a hotel, returning how many were removed.
    pub async fn delete_rooms(&self, hotel_id: i32) -> usize {
        let mut tables = self.tables.write().await;
        let before = tables.rooms.len();
        tables.rooms.retain(|_, room| room.hotel_id != hotel_id);
        before - tables.rooms.len()
    }

    /// Rooms reference their hotel, so they have to be deleted first.
    pub async fn delete_hotel(&self, hotel_id: i32) -> Result<Hotel, MemoryStoreError> {
        let mut tables = self.tables.write().await;
        let rooms = tables.rooms.values().filter(|r| r.hotel_id == hotel_id).count();
        if rooms > 0 {
            return Err(MemoryStoreError::HotelHasRooms { hotel_id, rooms });
        }
        tables
            .hotels
            .remove(&hotel_id)
            .ok_or(MemoryStoreError::HotelNotFound(hotel_id))
    }
}

#[async_trait]
impl EnrollmentRepository for MemoryStore {
    async fn find_enrollment_by_user(
        &self,
        user_id: i32,
    ) -> Result<Option<Enrollment>, RepoError> {
        self.check_online()?;
        let tables = self.tables.read().await;
        Ok(tables.enrollments.values().find(|e| e.user_id == user_id).cloned())
    }
}

#[async_trait]
impl TicketRepository for MemoryStore {
    async fn find_ticket_with_type_by_enrollment(
        &self,
        enrollment_id: i32,
    ) -> Result<Option<TicketWithType>, RepoError> {
        self.check_online()?;
        let tables = self.tables.read().await;
        let Some(ticket) = tables.tickets.values().find(|t| t.enrollment_id == enrollment_id) else {
            return Ok(None);
        };
        let ticket_type = tables
            .ticket_types
            .get(&ticket.ticket_type_id)
            .ok_or_else(|| format!("ticket {} references missing type {}", ticket.id, ticket.ticket_type_id))?;

        Ok(Some(TicketWithType {
            ticket: ticket.clone(),
            ticket_type: ticket_type.clone(),
        }))
    }
}

#[async_trait]
impl HotelRepository for MemoryStore {
    async fn find_all_hotels(&self) -> Result<Vec<Hotel>, RepoError> {
        self.check_online()?;
        let tables = self.tables.read().await;
        Ok(tables.hotels.values().cloned().collect())
    }

    async fn find_hotel_with_rooms(
        &self,
        hotel_id: i32,
    ) -> Result<Option<HotelWithRooms>, RepoError> {
        self.check_online()?;
        let tables = self.tables.read().await;
        let Some(hotel) = tables.hotels.get(&hotel_id) else {
            return Ok(None);
        };
        let rooms = tables
            .rooms
            .values()
            .filter(|r| r.hotel_id == hotel_id)
            .cloned()
            .collect();

        Ok(Some(HotelWithRooms {
            hotel: hotel.clone(),
            rooms,
        }))
    }
}

#[async_trait]
impl SessionRepository for MemoryStore {
    async fn find_session_by_token(
        &self,
        token: &str,
    ) -> Result<Option<Session>, RepoError> {
        self.check_online()?;
        let tables = self.tables.read().await;
        Ok(tables.sessions.values().rev().find(|s| s.token == token).cloned())
    }
}
