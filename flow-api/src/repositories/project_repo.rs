use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::{Project, ProjectWithClient};

use super::repo_error::RepositoryError;

#[async_trait]
pub trait ProjectRepository: Send + Sync {
    async fn list_projects(&self, user_id: Uuid)
        -> Result<Vec<ProjectWithClient>, RepositoryError>;
    async fn find_project(&self, id: Uuid) -> Result<Option<Project>, RepositoryError>;
    async fn insert_project(&self, project: &Project) -> Result<(), RepositoryError>;
    async fn update_project(&self, project: &Project) -> Result<(), RepositoryError>;
    async fn delete_project(&self, id: Uuid) -> Result<(), RepositoryError>;
    async fn count_active_projects(&self, user_id: Uuid) -> Result<i64, RepositoryError>;
}

pub struct ProjectRepositoryImpl {
    pool: PgPool,
}

impl ProjectRepositoryImpl {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProjectRepository for ProjectRepositoryImpl {
    async fn list_projects(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<ProjectWithClient>, RepositoryError> {
        // LEFT JOIN: a deleted client leaves client_name null rather than
        // dropping the project from the listing.
        let projects = sqlx::query_as::<_, ProjectWithClient>(
            r#"
            SELECT p.id, p.user_id, p.client_id, p.title, p.deadline, p.budget,
                   p.status, p.created_at, c.name AS client_name
            FROM projects p
            LEFT JOIN clients c ON c.id = p.client_id
            WHERE p.user_id = $1
            ORDER BY p.created_at
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(projects)
    }

    async fn find_project(&self, id: Uuid) -> Result<Option<Project>, RepositoryError> {
        let project = sqlx::query_as::<_, Project>(
            r#"
            SELECT id, user_id, client_id, title, deadline, budget, status, created_at
            FROM projects
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(project)
    }

    async fn insert_project(&self, project: &Project) -> Result<(), RepositoryError> {
        sqlx::query(
            r#"
            INSERT INTO projects (id, user_id, client_id, title, deadline, budget, status, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(project.id)
        .bind(project.user_id)
        .bind(project.client_id)
        .bind(&project.title)
        .bind(project.deadline)
        .bind(project.budget)
        .bind(project.status.to_string())
        .bind(project.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn update_project(&self, project: &Project) -> Result<(), RepositoryError> {
        sqlx::query(
            r#"
            UPDATE projects
            SET client_id = $2, title = $3, deadline = $4, budget = $5, status = $6
            WHERE id = $1
            "#,
        )
        .bind(project.id)
        .bind(project.client_id)
        .bind(&project.title)
        .bind(project.deadline)
        .bind(project.budget)
        .bind(project.status.to_string())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn delete_project(&self, id: Uuid) -> Result<(), RepositoryError> {
        sqlx::query("DELETE FROM projects WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn count_active_projects(&self, user_id: Uuid) -> Result<i64, RepositoryError> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM projects WHERE user_id = $1 AND status = 'Active'",
        )
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(count)
    }
}
