//!
//! # Task Model and Store
//!
//! Task records are keyed by a generated UUID and owned by exactly one user.
//! Every read, update, and delete is scoped to the owner: a task that exists
//! but belongs to someone else surfaces as `NotFound`, never as forbidden, so
//! the existence of other users' tasks is not leaked.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;
use validator::Validate;

use crate::error::AppError;

/// Represents the status of a task.
/// Corresponds to the `task_status` SQL enum.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default, sqlx::Type)]
#[sqlx(type_name = "task_status", rename_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum TaskStatus {
    /// Task is yet to be started.
    #[default]
    Pending,
    /// Task is currently being worked on.
    InProgress,
    /// Task is finished.
    Completed,
}

/// Input structure for creating a task or fully replacing one (PUT).
#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct TaskInput {
    /// The title of the task. Must be between 1 and 200 characters.
    #[validate(length(min = 1, max = 200, message = "Title must not be empty"))]
    pub title: String,

    /// An optional description. Maximum length of 1000 characters.
    #[validate(length(max = 1000))]
    pub description: Option<String>,

    /// The status of the task; defaults to `pending` when omitted.
    pub status: Option<TaskStatus>,
}

/// Partial update payload (PATCH). Fields left out of the request body are
/// left unchanged on the stored task.
#[derive(Debug, Serialize, Deserialize, Validate, Default)]
pub struct TaskUpdate {
    #[validate(length(min = 1, max = 200, message = "Title must not be empty"))]
    pub title: Option<String>,

    #[validate(length(max = 1000))]
    pub description: Option<String>,

    pub status: Option<TaskStatus>,
}

/// Query parameters accepted when listing tasks.
#[derive(Debug, Deserialize)]
pub struct TaskQuery {
    /// Filter tasks by status.
    pub status: Option<TaskStatus>,
    /// Case-insensitive search over title and description.
    pub search: Option<String>,
}

/// A task entity as stored in the database and returned by the API.
///
/// `user_id` is the ownership back-reference used for access-control
/// filtering; it is withheld from serialized responses.
#[derive(Debug, Serialize, Deserialize, FromRow)]
pub struct Task {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub status: TaskStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(skip_serializing, default)]
    pub user_id: i32,
}

const TASK_COLUMNS: &str = "id, title, description, status, created_at, updated_at, user_id";

impl Task {
    /// Builds a new `Task` from `TaskInput` and the owner's user id, with a
    /// fresh UUID and current timestamps. Missing status defaults to
    /// `pending`.
    pub fn new(input: TaskInput, user_id: i32) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            title: input.title,
            description: input.description,
            status: input.status.unwrap_or_default(),
            created_at: now,
            updated_at: now,
            user_id,
        }
    }

    /// Persists a new task owned by `user_id` and returns the stored row.
    pub async fn create(pool: &PgPool, user_id: i32, input: TaskInput) -> Result<Task, AppError> {
        let task = Task::new(input, user_id);

        let sql = format!(
            "INSERT INTO tasks (id, title, description, status, created_at, updated_at, user_id) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) \
             RETURNING {}",
            TASK_COLUMNS
        );
        let created = sqlx::query_as::<_, Task>(&sql)
            .bind(task.id)
            .bind(&task.title)
            .bind(&task.description)
            .bind(task.status)
            .bind(task.created_at)
            .bind(task.updated_at)
            .bind(task.user_id)
            .fetch_one(pool)
            .await?;

        Ok(created)
    }

    /// Lists the owner's tasks, newest first. Ordering is stable across
    /// repeated calls absent mutation (`created_at` with the id as a
    /// tiebreaker). Supports an optional status filter and a
    /// case-insensitive search over title and description.
    pub async fn find_all(
        pool: &PgPool,
        user_id: i32,
        query: &TaskQuery,
    ) -> Result<Vec<Task>, AppError> {
        let mut sql = format!("SELECT {} FROM tasks WHERE user_id = $1", TASK_COLUMNS);
        let mut param_count = 2;

        if query.status.is_some() {
            sql.push_str(&format!(" AND status = ${}", param_count));
            param_count += 1;
        }
        if query.search.is_some() {
            sql.push_str(&format!(
                " AND (title ILIKE ${} OR description ILIKE ${})",
                param_count,
                param_count + 1
            ));
        }
        sql.push_str(" ORDER BY created_at DESC, id");

        let mut query_builder = sqlx::query_as::<_, Task>(&sql).bind(user_id);

        if let Some(status) = query.status {
            query_builder = query_builder.bind(status);
        }
        if let Some(search) = &query.search {
            let pattern = format!("%{}%", search);
            query_builder = query_builder.bind(pattern.clone());
            query_builder = query_builder.bind(pattern);
        }

        let tasks = query_builder.fetch_all(pool).await?;

        Ok(tasks)
    }

    /// Fetches a single task by id, scoped to the owner. A task that does not
    /// exist and a task owned by another user yield the same `NotFound`.
    pub async fn find_by_id(pool: &PgPool, user_id: i32, id: Uuid) -> Result<Task, AppError> {
        let sql = format!(
            "SELECT {} FROM tasks WHERE id = $1 AND user_id = $2",
            TASK_COLUMNS
        );
        let task = sqlx::query_as::<_, Task>(&sql)
            .bind(id)
            .bind(user_id)
            .fetch_optional(pool)
            .await?;

        task.ok_or_else(|| AppError::NotFound("Task not found".into()))
    }

    /// Applies a partial update to a task the user owns. Fields absent from
    /// `update` keep their stored values; `updated_at` is always refreshed.
    /// Same ownership semantics as `find_by_id`.
    pub async fn update(
        pool: &PgPool,
        user_id: i32,
        id: Uuid,
        update: &TaskUpdate,
    ) -> Result<Task, AppError> {
        let sql = format!(
            "UPDATE tasks SET \
                 title = COALESCE($1, title), \
                 description = COALESCE($2, description), \
                 status = COALESCE($3, status), \
                 updated_at = $4 \
             WHERE id = $5 AND user_id = $6 \
             RETURNING {}",
            TASK_COLUMNS
        );
        let task = sqlx::query_as::<_, Task>(&sql)
            .bind(&update.title)
            .bind(&update.description)
            .bind(update.status)
            .bind(Utc::now())
            .bind(id)
            .bind(user_id)
            .fetch_optional(pool)
            .await?;

        task.ok_or_else(|| AppError::NotFound("Task not found".into()))
    }

    /// Fully replaces a task's fields (PUT semantics): an absent description
    /// clears the stored one and an absent status resets to the default.
    pub async fn replace(
        pool: &PgPool,
        user_id: i32,
        id: Uuid,
        input: TaskInput,
    ) -> Result<Task, AppError> {
        let sql = format!(
            "UPDATE tasks SET \
                 title = $1, \
                 description = $2, \
                 status = $3, \
                 updated_at = $4 \
             WHERE id = $5 AND user_id = $6 \
             RETURNING {}",
            TASK_COLUMNS
        );
        let task = sqlx::query_as::<_, Task>(&sql)
            .bind(&input.title)
            .bind(&input.description)
            .bind(input.status.unwrap_or_default())
            .bind(Utc::now())
            .bind(id)
            .bind(user_id)
            .fetch_optional(pool)
            .await?;

        task.ok_or_else(|| AppError::NotFound("Task not found".into()))
    }

    /// Deletes a task the user owns. Deleting an already-absent or
    /// foreign-owned task yields `NotFound`, not silent success.
    pub async fn delete(pool: &PgPool, user_id: i32, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Task not found".into()));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_task_creation_defaults() {
        let input = TaskInput {
            title: "Test Task".to_string(),
            description: Some("Test Description".to_string()),
            status: None,
        };

        let task = Task::new(input, 1);
        assert_eq!(task.title, "Test Task");
        assert_eq!(task.user_id, 1);
        // Omitted status defaults to pending
        assert_eq!(task.status, TaskStatus::Pending);
        assert_eq!(task.created_at, task.updated_at);
    }

    #[test]
    fn test_task_input_validation() {
        let valid_input = TaskInput {
            title: "Valid Task".to_string(),
            description: Some("Valid Description".to_string()),
            status: Some(TaskStatus::Completed),
        };
        assert!(valid_input.validate().is_ok());

        let empty_title = TaskInput {
            title: "".to_string(),
            description: None,
            status: None,
        };
        assert!(empty_title.validate().is_err());

        let long_title = TaskInput {
            title: "a".repeat(201),
            description: None,
            status: None,
        };
        assert!(long_title.validate().is_err());

        let long_description = TaskInput {
            title: "Valid".to_string(),
            description: Some("b".repeat(1001)),
            status: None,
        };
        assert!(long_description.validate().is_err());
    }

    #[test]
    fn test_task_update_validation() {
        // An empty patch is valid: all fields stay unchanged.
        assert!(TaskUpdate::default().validate().is_ok());

        let status_only = TaskUpdate {
            status: Some(TaskStatus::Completed),
            ..TaskUpdate::default()
        };
        assert!(status_only.validate().is_ok());

        let empty_title = TaskUpdate {
            title: Some("".to_string()),
            ..TaskUpdate::default()
        };
        assert!(empty_title.validate().is_err());
    }

    #[test]
    fn test_status_serialization() {
        // Wire format is kebab-case, matching the SQL enum labels.
        assert_eq!(
            serde_json::to_value(TaskStatus::InProgress).unwrap(),
            serde_json::json!("in-progress")
        );
        assert_eq!(
            serde_json::to_value(TaskStatus::Pending).unwrap(),
            serde_json::json!("pending")
        );

        // Unknown status values are rejected at deserialization.
        assert!(serde_json::from_value::<TaskStatus>(serde_json::json!("archived")).is_err());
    }

    #[test]
    fn test_serialized_task_hides_owner() {
        let task = Task::new(
            TaskInput {
                title: "Private".to_string(),
                description: None,
                status: None,
            },
            42,
        );
        let value = serde_json::to_value(&task).unwrap();
        assert!(value.get("user_id").is_none());
        assert!(value.get("id").is_some());
    }
}
