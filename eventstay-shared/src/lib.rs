pub mod models;
pub mod pii;
pub mod timestamp;

pub use models::{
    Enrollment, Hotel, HotelWithRooms, Room, Session, Ticket, TicketStatus, TicketType,
    TicketWithType,
};
