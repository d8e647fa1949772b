//! Fixed-content repositories for unit tests.

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use eventstay_shared::pii::Masked;
use eventstay_shared::{
    Enrollment, Hotel, HotelWithRooms, Room, Ticket, TicketStatus, TicketType, TicketWithType,
};

use crate::repository::{EnrollmentRepository, HotelRepository, RepoError, TicketRepository};

const ENROLLMENT_ID: i32 = 10;

#[derive(Default)]
pub struct StubStore {
    enrollment: Option<Enrollment>,
    ticket: Option<TicketWithType>,
    hotels: Vec<HotelWithRooms>,
    offline: bool,
    ticket_lookups: AtomicUsize,
}

fn epoch() -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
}

impl StubStore {
    pub fn with_enrollment(mut self, user_id: i32) -> Self {
        self.enrollment = Some(Enrollment {
            id: ENROLLMENT_ID,
            name: "Test User".to_string(),
            cpf: Masked("00000000000".to_string()),
            birthday: epoch(),
            phone: Masked("(00) 00000-0000".to_string()),
            user_id,
            created_at: epoch(),
            updated_at: epoch(),
        });
        self
    }

    pub fn with_ticket(mut self, status: TicketStatus, is_remote: bool, includes_hotel: bool) -> Self {
        self.ticket = Some(TicketWithType {
            ticket: Ticket {
                id: 20,
                ticket_type_id: 30,
                enrollment_id: ENROLLMENT_ID,
                status,
                created_at: epoch(),
                updated_at: epoch(),
            },
            ticket_type: TicketType {
                id: 30,
                name: "Standard".to_string(),
                price: 250,
                is_remote,
                includes_hotel,
                created_at: epoch(),
                updated_at: epoch(),
            },
        });
        self
    }

    pub fn entitled(user_id: i32) -> Self {
        Self::default()
            .with_enrollment(user_id)
            .with_ticket(TicketStatus::Paid, false, true)
    }

    pub fn with_hotel(mut self, id: i32, name: &str, room_count: i32) -> Self {
        let rooms = (1..=room_count)
            .map(|n| Room {
                id: id * 100 + n,
                name: format!("Room {}", n),
                capacity: n,
                hotel_id: id,
                created_at: epoch(),
                updated_at: epoch(),
            })
            .collect();
        self.hotels.push(HotelWithRooms {
            hotel: Hotel {
                id,
                name: name.to_string(),
                image: format!("https://img.example/{}.png", id),
                created_at: epoch(),
                updated_at: epoch(),
            },
            rooms,
        });
        self
    }

    pub fn offline(mut self) -> Self {
        self.offline = true;
        self
    }

    pub fn ticket_lookups(&self) -> usize {
        self.ticket_lookups.load(Ordering::SeqCst)
    }

    fn check_online(&self) -> Result<(), RepoError> {
        if self.offline {
            return Err("connection refused".into());
        }
        Ok(())
    }
}

#[async_trait]
impl EnrollmentRepository for StubStore {
    async fn find_enrollment_by_user(&self, user_id: i32) -> Result<Option<Enrollment>, RepoError> {
        self.check_online()?;
        Ok(self.enrollment.clone().filter(|e| e.user_id == user_id))
    }
}

#[async_trait]
impl TicketRepository for StubStore {
    async fn find_ticket_with_type_by_enrollment(
        &self,
        enrollment_id: i32,
    ) -> Result<Option<TicketWithType>, RepoError> {
        self.check_online()?;
        self.ticket_lookups.fetch_add(1, Ordering::SeqCst);
        Ok(self.ticket.clone().filter(|t| t.ticket.enrollment_id == enrollment_id))
    }
}

#[async_trait]
impl HotelRepository for StubStore {
    async fn find_all_hotels(&self) -> Result<Vec<Hotel>, RepoError> {
        self.check_online()?;
        Ok(self.hotels.iter().map(|h| h.hotel.clone()).collect())
    }

    async fn find_hotel_with_rooms(&self, hotel_id: i32) -> Result<Option<HotelWithRooms>, RepoError> {
        self.check_online()?;
        Ok(self.hotels.iter().find(|h| h.hotel.id == hotel_id).cloned())
    }
}
