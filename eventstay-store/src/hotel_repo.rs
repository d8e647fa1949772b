use async_trait::async_trait;
use chrono::{DateTime, Utc};
use eventstay_core::repository::{HotelRepository, RepoError};
use eventstay_shared::{Hotel, HotelWithRooms, Room};
use sqlx::PgPool;

pub struct PostgresHotelRepository {
    pool: PgPool,
}

impl PostgresHotelRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct HotelRow {
    id: i32,
    name: String,
    image: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<HotelRow> for Hotel {
    fn from(row: HotelRow) -> Self {
        Hotel {
            id: row.id,
            name: row.name,
            image: row.image,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct RoomRow {
    id: i32,
    name: String,
    capacity: i32,
    hotel_id: i32,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<RoomRow> for Room {
    fn from(row: RoomRow) -> Self {
        Room {
            id: row.id,
            name: row.name,
            capacity: row.capacity,
            hotel_id: row.hotel_id,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[async_trait]
impl HotelRepository for PostgresHotelRepository {
    async fn find_all_hotels(&self) -> Result<Vec<Hotel>, RepoError> {
        let rows = sqlx::query_as::<_, HotelRow>(
            "SELECT id, name, image, created_at, updated_at FROM hotels ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Hotel::from).collect())
    }

    async fn find_hotel_with_rooms(
        &self,
        hotel_id: i32,
    ) -> Result<Option<HotelWithRooms>, RepoError> {
        let hotel = sqlx::query_as::<_, HotelRow>(
            "SELECT id, name, image, created_at, updated_at FROM hotels WHERE id = $1",
        )
        .bind(hotel_id)
        .fetch_optional(&self.pool)
        .await?;

        let Some(hotel) = hotel else {
            return Ok(None);
        };

        let rooms = sqlx::query_as::<_, RoomRow>(
            "SELECT id, name, capacity, hotel_id, created_at, updated_at FROM rooms WHERE hotel_id = $1 ORDER BY id",
        )
        .bind(hotel_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(Some(HotelWithRooms {
            hotel: hotel.into(),
            rooms: rooms.into_iter().map(Room::from).collect(),
        }))
    }
}
