pub mod app_config;
pub mod database;
pub mod enrollment_repo;
pub mod hotel_repo;
pub mod memory_repo;
pub mod session_repo;
pub mod ticket_repo;

pub use database::DbClient;
pub use enrollment_repo::PostgresEnrollmentRepository;
pub use hotel_repo::PostgresHotelRepository;
pub use memory_repo::{MemoryStore, MemoryStoreError};
pub use session_repo::PostgresSessionRepository;
pub use ticket_repo::PostgresTicketRepository;
