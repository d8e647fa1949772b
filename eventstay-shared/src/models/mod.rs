pub mod enrollment;
pub mod hotel;
pub mod session;
pub mod ticket;

pub use enrollment::Enrollment;
pub use hotel::{Hotel, HotelWithRooms, Room};
pub use session::Session;
pub use ticket::{Ticket, TicketStatus, TicketType, TicketWithType};
