use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::ownership::Owned;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum ProjectStatus {
    Active,
    Completed,
    Cancelled,
}

impl From<String> for ProjectStatus {
    fn from(status: String) -> Self {
        match status.as_str() {
            "Completed" => ProjectStatus::Completed,
            "Cancelled" => ProjectStatus::Cancelled,
            _ => ProjectStatus::Active,
        }
    }
}

impl fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let status_str = match self {
            ProjectStatus::Active => "Active",
            ProjectStatus::Completed => "Completed",
            ProjectStatus::Cancelled => "Cancelled",
        };
        write!(f, "{status_str}")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: Uuid,
    pub user_id: Uuid,
    pub client_id: Uuid,
    pub title: String,
    pub deadline: DateTime<Utc>,
    pub budget: f64,
    #[sqlx(try_from = "String")]
    pub status: ProjectStatus,
    pub created_at: DateTime<Utc>,
}

/// Allow-listed partial update. The owner is deliberately absent: it is set
/// once at creation and can never be patched in.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProject {
    pub client_id: Option<Uuid>,
    pub title: Option<String>,
    pub deadline: Option<DateTime<Utc>>,
    pub budget: Option<f64>,
    pub status: Option<ProjectStatus>,
}

impl Project {
    pub fn apply_update(&mut self, update: UpdateProject) {
        if let Some(client_id) = update.client_id {
            self.client_id = client_id;
        }
        if let Some(title) = update.title {
            self.title = title;
        }
        if let Some(deadline) = update.deadline {
            self.deadline = deadline;
        }
        if let Some(budget) = update.budget {
            self.budget = budget;
        }
        if let Some(status) = update.status {
            self.status = status;
        }
    }
}

impl Owned for Project {
    const KIND: &'static str = "Project";

    fn owner_id(&self) -> Uuid {
        self.user_id
    }
}

/// A project as listed, with the client's display name resolved by the
/// repository's join. `client_name` is null when the client no longer exists.
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ProjectWithClient {
    pub id: Uuid,
    pub user_id: Uuid,
    pub client_id: Uuid,
    pub title: String,
    pub deadline: DateTime<Utc>,
    pub budget: f64,
    #[sqlx(try_from = "String")]
    pub status: ProjectStatus,
    pub created_at: DateTime<Utc>,
    pub client_name: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_project() -> Project {
        Project {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            client_id: Uuid::new_v4(),
            title: "Website redesign".to_string(),
            deadline: Utc::now(),
            budget: 4500.0,
            status: ProjectStatus::Active,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn status_parses_known_values() {
        assert_eq!(
            ProjectStatus::from("Completed".to_string()),
            ProjectStatus::Completed
        );
        assert_eq!(
            ProjectStatus::from("Cancelled".to_string()),
            ProjectStatus::Cancelled
        );
        assert_eq!(
            ProjectStatus::from("Active".to_string()),
            ProjectStatus::Active
        );
    }

    #[test]
    fn status_defaults_to_active_for_unknown_values() {
        assert_eq!(
            ProjectStatus::from("garbage".to_string()),
            ProjectStatus::Active
        );
    }

    #[test]
    fn update_changes_only_supplied_fields() {
        let mut project = sample_project();
        let previous_budget = project.budget;

        project.apply_update(UpdateProject {
            status: Some(ProjectStatus::Completed),
            ..Default::default()
        });

        assert_eq!(project.status, ProjectStatus::Completed);
        assert_eq!(project.budget, previous_budget);
        assert_eq!(project.title, "Website redesign");
    }

    #[test]
    fn update_cannot_touch_owner() {
        let mut project = sample_project();
        let owner = project.user_id;

        project.apply_update(UpdateProject {
            title: Some("New title".to_string()),
            budget: Some(9000.0),
            ..Default::default()
        });

        assert_eq!(project.user_id, owner);
    }
}
