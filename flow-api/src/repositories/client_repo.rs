use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::Client;

use super::repo_error::RepositoryError;

#[async_trait]
pub trait ClientRepository: Send + Sync {
    async fn list_clients(&self, user_id: Uuid) -> Result<Vec<Client>, RepositoryError>;
    async fn find_client(&self, id: Uuid) -> Result<Option<Client>, RepositoryError>;
    async fn insert_client(&self, client: &Client) -> Result<(), RepositoryError>;
    async fn delete_client(&self, id: Uuid) -> Result<(), RepositoryError>;
    async fn count_clients(&self, user_id: Uuid) -> Result<i64, RepositoryError>;
}

pub struct ClientRepositoryImpl {
    pool: PgPool,
}

impl ClientRepositoryImpl {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ClientRepository for ClientRepositoryImpl {
    async fn list_clients(&self, user_id: Uuid) -> Result<Vec<Client>, RepositoryError> {
        let clients = sqlx::query_as::<_, Client>(
            r#"
            SELECT id, user_id, name, email, company, hourly_rate, notes, created_at
            FROM clients
            WHERE user_id = $1
            ORDER BY created_at
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(clients)
    }

    async fn find_client(&self, id: Uuid) -> Result<Option<Client>, RepositoryError> {
        let client = sqlx::query_as::<_, Client>(
            r#"
            SELECT id, user_id, name, email, company, hourly_rate, notes, created_at
            FROM clients
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(client)
    }

    async fn insert_client(&self, client: &Client) -> Result<(), RepositoryError> {
        sqlx::query(
            r#"
            INSERT INTO clients (id, user_id, name, email, company, hourly_rate, notes, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(client.id)
        .bind(client.user_id)
        .bind(&client.name)
        .bind(&client.email)
        .bind(&client.company)
        .bind(client.hourly_rate)
        .bind(&client.notes)
        .bind(client.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn delete_client(&self, id: Uuid) -> Result<(), RepositoryError> {
        sqlx::query("DELETE FROM clients WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn count_clients(&self, user_id: Uuid) -> Result<i64, RepositoryError> {
        let count =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM clients WHERE user_id = $1")
                .bind(user_id)
                .fetch_one(&self.pool)
                .await?;

        Ok(count)
    }
}
