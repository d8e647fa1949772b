use async_trait::async_trait;
use chrono::{DateTime, Utc};
use eventstay_core::repository::{EnrollmentRepository, RepoError};
use eventstay_shared::pii::Masked;
use eventstay_shared::Enrollment;
use sqlx::PgPool;

pub struct PostgresEnrollmentRepository {
    pool: PgPool,
}

impl PostgresEnrollmentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct EnrollmentRow {
    id: i32,
    name: String,
    cpf: String,
    birthday: DateTime<Utc>,
    phone: String,
    user_id: i32,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<EnrollmentRow> for Enrollment {
    fn from(row: EnrollmentRow) -> Self {
        Enrollment {
            id: row.id,
            name: row.name,
            cpf: Masked(row.cpf),
            birthday: row.birthday,
            phone: Masked(row.phone),
            user_id: row.user_id,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[async_trait]
impl EnrollmentRepository for PostgresEnrollmentRepository {
    async fn find_enrollment_by_user(
        &self,
        user_id: i32,
    ) -> Result<Option<Enrollment>, RepoError> {
        let row = sqlx::query_as::<_, EnrollmentRow>(
            "SELECT id, name, cpf, birthday, phone, user_id, created_at, updated_at FROM enrollments WHERE user_id = $1",
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Enrollment::from))
    }
}
