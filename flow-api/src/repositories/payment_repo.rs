use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::{Payment, PaymentWithProject};

use super::repo_error::RepositoryError;

#[async_trait]
pub trait PaymentRepository: Send + Sync {
    /// Plain listing for aggregation; no join.
    async fn list_payments(&self, user_id: Uuid) -> Result<Vec<Payment>, RepositoryError>;
    /// Listing for the API, with each payment's project title resolved.
    async fn list_payments_with_project(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<PaymentWithProject>, RepositoryError>;
    async fn find_payment(&self, id: Uuid) -> Result<Option<Payment>, RepositoryError>;
    async fn insert_payment(&self, payment: &Payment) -> Result<(), RepositoryError>;
    async fn update_payment(&self, payment: &Payment) -> Result<(), RepositoryError>;
    async fn delete_payment(&self, id: Uuid) -> Result<(), RepositoryError>;
}

pub struct PaymentRepositoryImpl {
    pool: PgPool,
}

impl PaymentRepositoryImpl {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PaymentRepository for PaymentRepositoryImpl {
    async fn list_payments(&self, user_id: Uuid) -> Result<Vec<Payment>, RepositoryError> {
        let payments = sqlx::query_as::<_, Payment>(
            r#"
            SELECT id, user_id, project_id, amount, due_date, status, paid_date, created_at
            FROM payments
            WHERE user_id = $1
            ORDER BY created_at
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(payments)
    }

    async fn list_payments_with_project(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<PaymentWithProject>, RepositoryError> {
        let payments = sqlx::query_as::<_, PaymentWithProject>(
            r#"
            SELECT pay.id, pay.user_id, pay.project_id, pay.amount, pay.due_date,
                   pay.status, pay.paid_date, pay.created_at, p.title AS project_title
            FROM payments pay
            LEFT JOIN projects p ON p.id = pay.project_id
            WHERE pay.user_id = $1
            ORDER BY pay.created_at
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(payments)
    }

    async fn find_payment(&self, id: Uuid) -> Result<Option<Payment>, RepositoryError> {
        let payment = sqlx::query_as::<_, Payment>(
            r#"
            SELECT id, user_id, project_id, amount, due_date, status, paid_date, created_at
            FROM payments
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(payment)
    }

    async fn insert_payment(&self, payment: &Payment) -> Result<(), RepositoryError> {
        sqlx::query(
            r#"
            INSERT INTO payments (id, user_id, project_id, amount, due_date, status, paid_date, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(payment.id)
        .bind(payment.user_id)
        .bind(payment.project_id)
        .bind(payment.amount)
        .bind(payment.due_date)
        .bind(payment.status.to_string())
        .bind(payment.paid_date)
        .bind(payment.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn update_payment(&self, payment: &Payment) -> Result<(), RepositoryError> {
        sqlx::query(
            r#"
            UPDATE payments
            SET amount = $2, due_date = $3, status = $4, paid_date = $5
            WHERE id = $1
            "#,
        )
        .bind(payment.id)
        .bind(payment.amount)
        .bind(payment.due_date)
        .bind(payment.status.to_string())
        .bind(payment.paid_date)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn delete_payment(&self, id: Uuid) -> Result<(), RepositoryError> {
        sqlx::query("DELETE FROM payments WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
