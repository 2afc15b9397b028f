pub mod clients;
pub mod dashboard;
mod error;
pub mod payments;
pub mod projects;

use serde::Serialize;
use uuid::Uuid;

pub use error::ApiError;

/// Body returned by every delete endpoint.
#[derive(Debug, Serialize)]
pub struct Deleted {
    pub id: Uuid,
}
