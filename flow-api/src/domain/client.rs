use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::ownership::Owned;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Client {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub email: String,
    pub company: Option<String>,
    pub hourly_rate: Option<f64>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Owned for Client {
    const KIND: &'static str = "Client";

    fn owner_id(&self) -> Uuid {
        self.user_id
    }
}
