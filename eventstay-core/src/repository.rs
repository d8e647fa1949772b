use async_trait::async_trait;
use eventstay_shared::{Enrollment, Hotel, HotelWithRooms, Session, TicketWithType};

/// Error type returned by every store lookup. The core never inspects it;
/// it is carried to the boundary as `AccessError::Store`.
pub type RepoError = Box<dyn std::error::Error + Send + Sync>;

/// Repository trait for enrollment lookups
#[async_trait]
pub trait EnrollmentRepository: Send + Sync {
    async fn find_enrollment_by_user(
        &self,
        user_id: i32,
    ) -> Result<Option<Enrollment>, RepoError>;
}

/// Repository trait for ticket lookups
#[async_trait]
pub trait TicketRepository: Send + Sync {
    /// Ticket of the enrollment joined with its type, in one read.
    async fn find_ticket_with_type_by_enrollment(
        &self,
        enrollment_id: i32,
    ) -> Result<Option<TicketWithType>, RepoError>;
}

/// Repository trait for hotel inventory reads
#[async_trait]
pub trait HotelRepository: Send + Sync {
    /// All hotels ordered by id.
    async fn find_all_hotels(&self) -> Result<Vec<Hotel>, RepoError>;

    /// One hotel with its rooms ordered by id.
    async fn find_hotel_with_rooms(
        &self,
        hotel_id: i32,
    ) -> Result<Option<HotelWithRooms>, RepoError>;
}

/// Repository trait for session lookups, used by the authentication layer
#[async_trait]
pub trait SessionRepository: Send + Sync {
    async fn find_session_by_token(
        &self,
        token: &str,
    ) -> Result<Option<Session>, RepoError>;
}
