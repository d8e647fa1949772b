use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::pii::Masked;

/// A user's event registration. Exists at most once per user and is the
/// entry point of every ticket lookup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Enrollment {
    pub id: i32,
    pub name: String,
    pub cpf: Masked<String>,
    #[serde(with = "crate::timestamp")]
    pub birthday: DateTime<Utc>,
    pub phone: Masked<String>,
    pub user_id: i32,
    #[serde(with = "crate::timestamp")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "crate::timestamp")]
    pub updated_at: DateTime<Utc>,
}
