use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::ownership::Owned;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum PaymentStatus {
    Paid,
    Unpaid,
}

impl From<String> for PaymentStatus {
    fn from(status: String) -> Self {
        match status.as_str() {
            "Paid" => PaymentStatus::Paid,
            _ => PaymentStatus::Unpaid,
        }
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let status_str = match self {
            PaymentStatus::Paid => "Paid",
            PaymentStatus::Unpaid => "Unpaid",
        };
        write!(f, "{status_str}")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    pub id: Uuid,
    pub user_id: Uuid,
    pub project_id: Uuid,
    pub amount: f64,
    pub due_date: DateTime<Utc>,
    #[sqlx(try_from = "String")]
    pub status: PaymentStatus,
    pub paid_date: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

/// Allow-listed partial update; owner and project reference stay fixed.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePayment {
    pub amount: Option<f64>,
    pub due_date: Option<DateTime<Utc>>,
    pub status: Option<PaymentStatus>,
    pub paid_date: Option<DateTime<Utc>>,
}

impl Payment {
    /// A payment created as Paid gets the supplied paid date, or `now` when
    /// none was given. An Unpaid payment never carries a paid date.
    pub fn new(
        owner: Uuid,
        project_id: Uuid,
        amount: f64,
        due_date: DateTime<Utc>,
        status: Option<PaymentStatus>,
        paid_date: Option<DateTime<Utc>>,
        now: DateTime<Utc>,
    ) -> Self {
        let status = status.unwrap_or(PaymentStatus::Unpaid);
        let paid_date = match status {
            PaymentStatus::Paid => paid_date.or(Some(now)),
            PaymentStatus::Unpaid => None,
        };

        Self {
            id: Uuid::new_v4(),
            user_id: owner,
            project_id,
            amount,
            due_date,
            status,
            paid_date,
            created_at: now,
        }
    }

    /// Paid-date rules: moving to Paid without a supplied date stamps `now`
    /// (unless already Paid, which keeps the existing date); moving to Unpaid
    /// clears the date no matter what the payload said.
    pub fn apply_update(&mut self, update: UpdatePayment, now: DateTime<Utc>) {
        if let Some(amount) = update.amount {
            self.amount = amount;
        }
        if let Some(due_date) = update.due_date {
            self.due_date = due_date;
        }

        match update.status {
            Some(PaymentStatus::Paid) => {
                if let Some(paid_date) = update.paid_date {
                    self.paid_date = Some(paid_date);
                } else if self.status != PaymentStatus::Paid {
                    self.paid_date = Some(now);
                }
                self.status = PaymentStatus::Paid;
            }
            Some(PaymentStatus::Unpaid) => {
                self.status = PaymentStatus::Unpaid;
                self.paid_date = None;
            }
            None => {
                if let Some(paid_date) = update.paid_date {
                    self.paid_date = Some(paid_date);
                }
            }
        }
    }
}

impl Owned for Payment {
    const KIND: &'static str = "Payment";

    fn owner_id(&self) -> Uuid {
        self.user_id
    }
}

/// A payment as listed, with the project's title resolved by the repository's
/// join. `project_title` is null when the project no longer exists.
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct PaymentWithProject {
    pub id: Uuid,
    pub user_id: Uuid,
    pub project_id: Uuid,
    pub amount: f64,
    pub due_date: DateTime<Utc>,
    #[sqlx(try_from = "String")]
    pub status: PaymentStatus,
    pub paid_date: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub project_title: Option<String>,
}
