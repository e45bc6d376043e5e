use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A registered reporter. The core only ever mutates `points`, and only
/// through the points ledger; account management lives outside this service.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub points: i32,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn new(username: &str, email: &str) -> Self {
        Self {
            id: Uuid::new_v4(),
            username: username.to_string(),
            email: email.to_string(),
            points: 0,
            created_at: Utc::now(),
        }
    }
}
