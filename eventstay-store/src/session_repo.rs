use async_trait::async_trait;
use chrono::{DateTime, Utc};
use eventstay_core::repository::{RepoError, SessionRepository};
use eventstay_shared::Session;
use sqlx::PgPool;

pub struct PostgresSessionRepository {
    pool: PgPool,
}

impl PostgresSessionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct SessionRow {
    id: i32,
    user_id: i32,
    token: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

#[async_trait]
impl SessionRepository for PostgresSessionRepository {
    async fn find_session_by_token(
        &self,
        token: &str,
    ) -> Result<Option<Session>, RepoError> {
        let row = sqlx::query_as::<_, SessionRow>(
            "SELECT id, user_id, token, created_at, updated_at FROM sessions WHERE token = $1 ORDER BY id DESC LIMIT 1",
        )
        .bind(token)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|row| Session {
            id: row.id,
            user_id: row.user_id,
            token: row.token,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }))
    }
}
