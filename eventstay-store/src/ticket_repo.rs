use async_trait::async_trait;
use chrono::{DateTime, Utc};
use eventstay_core::repository::{RepoError, TicketRepository};
use eventstay_shared::{Ticket, TicketStatus, TicketType, TicketWithType};
use sqlx::PgPool;

pub struct PostgresTicketRepository {
    pool: PgPool,
}

impl PostgresTicketRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// One row per ticket, type columns joined in and prefixed with `type_`.
#[derive(sqlx::FromRow)]
struct TicketWithTypeRow {
    id: i32,
    ticket_type_id: i32,
    enrollment_id: i32,
    status: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    type_name: String,
    type_price: i32,
    type_is_remote: bool,
    type_includes_hotel: bool,
    type_created_at: DateTime<Utc>,
    type_updated_at: DateTime<Utc>,
}

impl TryFrom<TicketWithTypeRow> for TicketWithType {
    type Error = RepoError;

    fn try_from(row: TicketWithTypeRow) -> Result<Self, Self::Error> {
        let status: TicketStatus = row.status.parse()?;

        Ok(TicketWithType {
            ticket: Ticket {
                id: row.id,
                ticket_type_id: row.ticket_type_id,
                enrollment_id: row.enrollment_id,
                status,
                created_at: row.created_at,
                updated_at: row.updated_at,
            },
            ticket_type: TicketType {
                id: row.ticket_type_id,
                name: row.type_name,
                price: row.type_price,
                is_remote: row.type_is_remote,
                includes_hotel: row.type_includes_hotel,
                created_at: row.type_created_at,
                updated_at: row.type_updated_at,
            },
        })
    }
}

#[async_trait]
impl TicketRepository for PostgresTicketRepository {
    async fn find_ticket_with_type_by_enrollment(
        &self,
        enrollment_id: i32,
    ) -> Result<Option<TicketWithType>, RepoError> {
        let row = sqlx::query_as::<_, TicketWithTypeRow>(
            r#"
            SELECT
                t.id, t.ticket_type_id, t.enrollment_id, t.status, t.created_at, t.updated_at,
                tt.name AS type_name,
                tt.price AS type_price,
                tt.is_remote AS type_is_remote,
                tt.includes_hotel AS type_includes_hotel,
                tt.created_at AS type_created_at,
                tt.updated_at AS type_updated_at
            FROM tickets t
            JOIN ticket_types tt ON t.ticket_type_id = tt.id
            WHERE t.enrollment_id = $1
            "#,
        )
        .bind(enrollment_id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(TicketWithType::try_from).transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn row(status: &str, is_remote: bool, includes_hotel: bool) -> TicketWithTypeRow {
        let t = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        TicketWithTypeRow {
            id: 5,
            ticket_type_id: 9,
            enrollment_id: 3,
            status: status.to_string(),
            created_at: t,
            updated_at: t,
            type_name: "Presencial + Hotel".to_string(),
            type_price: 600,
            type_is_remote: is_remote,
            type_includes_hotel: includes_hotel,
            type_created_at: t,
            type_updated_at: t,
        }
    }

    #[test]
    fn test_row_maps_status_and_type_flags() {
        let joined = TicketWithType::try_from(row("RESERVED", true, false)).unwrap();

        assert_eq!(joined.ticket.status, TicketStatus::Reserved);
        assert_eq!(joined.ticket.id, 5);
        assert_eq!(joined.ticket.enrollment_id, 3);
        assert_eq!(joined.ticket_type.id, joined.ticket.ticket_type_id);
        assert!(joined.ticket_type.is_remote);
        assert!(!joined.ticket_type.includes_hotel);
        assert_eq!(joined.ticket_type.price, 600);
    }

    #[test]
    fn test_row_flags_are_not_swapped() {
        let joined = TicketWithType::try_from(row("PAID", false, true)).unwrap();

        assert_eq!(joined.ticket.status, TicketStatus::Paid);
        assert!(!joined.ticket_type.is_remote);
        assert!(joined.ticket_type.includes_hotel);
    }

    #[test]
    fn test_unknown_status_is_rejected() {
        let err = TicketWithType::try_from(row("CANCELLED", false, true)).unwrap_err();
        assert_eq!(err.to_string(), "unknown ticket status: CANCELLED");
    }
}
