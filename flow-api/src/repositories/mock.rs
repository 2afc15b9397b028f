//! In-memory store implementing every repository trait, for tests.

use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Client, Payment, PaymentWithProject, Project, ProjectStatus, ProjectWithClient, User};

use super::client_repo::ClientRepository;
use super::payment_repo::PaymentRepository;
use super::project_repo::ProjectRepository;
use super::repo_error::RepositoryError;
use super::user_repo::UserRepository;

/// Mock document store backed by insertion-ordered Vecs, mirroring the
/// Postgres repositories' observable behavior (including the read-time joins
/// and their null fields for dangling references).
#[derive(Clone, Default)]
pub struct MockDatabase {
    users: Arc<RwLock<Vec<User>>>,
    clients: Arc<RwLock<Vec<Client>>>,
    projects: Arc<RwLock<Vec<Project>>>,
    payments: Arc<RwLock<Vec<Payment>>>,
}

impl MockDatabase {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_clients(self, clients: Vec<Client>) -> Self {
        self.clients.write().unwrap().extend(clients);
        self
    }

    pub fn with_projects(self, projects: Vec<Project>) -> Self {
        self.projects.write().unwrap().extend(projects);
        self
    }

    pub fn with_payments(self, payments: Vec<Payment>) -> Self {
        self.payments.write().unwrap().extend(payments);
        self
    }

    pub fn client_count(&self) -> usize {
        self.clients.read().unwrap().len()
    }

    pub fn project_count(&self) -> usize {
        self.projects.read().unwrap().len()
    }

    pub fn payment_count(&self) -> usize {
        self.payments.read().unwrap().len()
    }
}

#[async_trait]
impl UserRepository for MockDatabase {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepositoryError> {
        let user = self
            .users
            .read()
            .unwrap()
            .iter()
            .find(|u| u.email == email)
            .cloned();
        Ok(user)
    }

    async fn insert_user(&self, user: &User) -> Result<(), RepositoryError> {
        self.users.write().unwrap().push(user.clone());
        Ok(())
    }
}

#[async_trait]
impl ClientRepository for MockDatabase {
    async fn list_clients(&self, user_id: Uuid) -> Result<Vec<Client>, RepositoryError> {
        let clients = self
            .clients
            .read()
            .unwrap()
            .iter()
            .filter(|c| c.user_id == user_id)
            .cloned()
            .collect();
        Ok(clients)
    }

    async fn find_client(&self, id: Uuid) -> Result<Option<Client>, RepositoryError> {
        let client = self
            .clients
            .read()
            .unwrap()
            .iter()
            .find(|c| c.id == id)
            .cloned();
        Ok(client)
    }

    async fn insert_client(&self, client: &Client) -> Result<(), RepositoryError> {
        self.clients.write().unwrap().push(client.clone());
        Ok(())
    }

    async fn delete_client(&self, id: Uuid) -> Result<(), RepositoryError> {
        self.clients.write().unwrap().retain(|c| c.id != id);
        Ok(())
    }

    async fn count_clients(&self, user_id: Uuid) -> Result<i64, RepositoryError> {
        let count = self
            .clients
            .read()
            .unwrap()
            .iter()
            .filter(|c| c.user_id == user_id)
            .count();
        Ok(count as i64)
    }
}

#[async_trait]
impl ProjectRepository for MockDatabase {
    async fn list_projects(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<ProjectWithClient>, RepositoryError> {
        let clients = self.clients.read().unwrap();
        let projects = self
            .projects
            .read()
            .unwrap()
            .iter()
            .filter(|p| p.user_id == user_id)
            .map(|p| ProjectWithClient {
                id: p.id,
                user_id: p.user_id,
                client_id: p.client_id,
                title: p.title.clone(),
                deadline: p.deadline,
                budget: p.budget,
                status: p.status,
                created_at: p.created_at,
                client_name: clients
                    .iter()
                    .find(|c| c.id == p.client_id)
                    .map(|c| c.name.clone()),
            })
            .collect();
        Ok(projects)
    }

    async fn find_project(&self, id: Uuid) -> Result<Option<Project>, RepositoryError> {
        let project = self
            .projects
            .read()
            .unwrap()
            .iter()
            .find(|p| p.id == id)
            .cloned();
        Ok(project)
    }

    async fn insert_project(&self, project: &Project) -> Result<(), RepositoryError> {
        self.projects.write().unwrap().push(project.clone());
        Ok(())
    }

    async fn update_project(&self, project: &Project) -> Result<(), RepositoryError> {
        let mut projects = self.projects.write().unwrap();
        if let Some(existing) = projects.iter_mut().find(|p| p.id == project.id) {
            *existing = project.clone();
        }
        Ok(())
    }

    async fn delete_project(&self, id: Uuid) -> Result<(), RepositoryError> {
        self.projects.write().unwrap().retain(|p| p.id != id);
        Ok(())
    }

    async fn count_active_projects(&self, user_id: Uuid) -> Result<i64, RepositoryError> {
        let count = self
            .projects
            .read()
            .unwrap()
            .iter()
            .filter(|p| p.user_id == user_id && p.status == ProjectStatus::Active)
            .count();
        Ok(count as i64)
    }
}

#[async_trait]
impl PaymentRepository for MockDatabase {
    async fn list_payments(&self, user_id: Uuid) -> Result<Vec<Payment>, RepositoryError> {
        let payments = self
            .payments
            .read()
            .unwrap()
            .iter()
            .filter(|p| p.user_id == user_id)
            .cloned()
            .collect();
        Ok(payments)
    }

    async fn list_payments_with_project(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<PaymentWithProject>, RepositoryError> {
        let projects = self.projects.read().unwrap();
        let payments = self
            .payments
            .read()
            .unwrap()
            .iter()
            .filter(|p| p.user_id == user_id)
            .map(|p| PaymentWithProject {
                id: p.id,
                user_id: p.user_id,
                project_id: p.project_id,
                amount: p.amount,
                due_date: p.due_date,
                status: p.status,
                paid_date: p.paid_date,
                created_at: p.created_at,
                project_title: projects
                    .iter()
                    .find(|pr| pr.id == p.project_id)
                    .map(|pr| pr.title.clone()),
            })
            .collect();
        Ok(payments)
    }

    async fn find_payment(&self, id: Uuid) -> Result<Option<Payment>, RepositoryError> {
        let payment = self
            .payments
            .read()
            .unwrap()
            .iter()
            .find(|p| p.id == id)
            .cloned();
        Ok(payment)
    }

    async fn insert_payment(&self, payment: &Payment) -> Result<(), RepositoryError> {
        self.payments.write().unwrap().push(payment.clone());
        Ok(())
    }

    async fn update_payment(&self, payment: &Payment) -> Result<(), RepositoryError> {
        let mut payments = self.payments.write().unwrap();
        if let Some(existing) = payments.iter_mut().find(|p| p.id == payment.id) {
            *existing = payment.clone();
        }
        Ok(())
    }

    async fn delete_payment(&self, id: Uuid) -> Result<(), RepositoryError> {
        self.payments.write().unwrap().retain(|p| p.id != id);
        Ok(())
    }
}
