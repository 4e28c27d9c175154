use crate::{
    auth::AuthenticatedUserId,
    error::AppError,
    models::{Task, TaskInput, TaskQuery, TaskUpdate},
};
use actix_web::{delete, get, patch, post, put, web, HttpResponse, Responder};
use serde_json::json;
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

/// Retrieves the authenticated user's tasks.
///
/// Only tasks owned by the caller are returned, newest first. Supports an
/// optional `status` filter and a case-insensitive `search` over titles and
/// descriptions.
///
/// ## Responses:
/// - `200 OK`: JSON array of task objects.
/// - `401 Unauthorized`: If the request lacks a valid authentication token.
#[get("")]
pub async fn get_tasks(
    pool: web::Data<PgPool>,
    query_params: web::Query<TaskQuery>,
    user: AuthenticatedUserId,
) -> Result<impl Responder, AppError> {
    let tasks = Task::find_all(&pool, user.0, &query_params).await?;

    Ok(HttpResponse::Ok().json(tasks))
}

/// Creates a new task owned by the authenticated user.
///
/// The owner is taken from the verified token, never from the request body.
///
/// ## Request Body:
/// - `title`: required, 1–200 characters.
/// - `description` (optional): up to 1000 characters.
/// - `status` (optional): `pending`, `in-progress`, or `completed`;
///   defaults to `pending`.
///
/// ## Responses:
/// - `201 Created`: `{id, message}` with the generated task id.
/// - `400 Bad Request`: If validation fails or the body is malformed.
/// - `401 Unauthorized`: If the request lacks a valid authentication token.
#[post("")]
pub async fn create_task(
    pool: web::Data<PgPool>,
    task_data: web::Json<TaskInput>,
    user: AuthenticatedUserId,
) -> Result<impl Responder, AppError> {
    // Validate input
    task_data.validate()?;

    let task = Task::create(&pool, user.0, task_data.into_inner()).await?;

    log::info!("user {} created task {}", user.0, task.id);

    Ok(HttpResponse::Created().json(json!({
        "id": task.id,
        "message": "Task created"
    })))
}

/// Retrieves a specific task by its ID.
///
/// ## Responses:
/// - `200 OK`: The task as JSON.
/// - `401 Unauthorized`: If the request lacks a valid authentication token.
/// - `404 Not Found`: If no such task exists or it belongs to another user.
#[get("/{id}")]
pub async fn get_task(
    pool: web::Data<PgPool>,
    task_id: web::Path<Uuid>,
    user: AuthenticatedUserId,
) -> Result<impl Responder, AppError> {
    let task = Task::find_by_id(&pool, user.0, task_id.into_inner()).await?;

    Ok(HttpResponse::Ok().json(task))
}

/// Fully replaces a task's fields (PUT semantics).
///
/// All fields take the request values: an absent description clears the
/// stored one and an absent status resets to `pending`.
///
/// ## Responses:
/// - `200 OK`: The replaced task as JSON.
/// - `400 Bad Request`: If validation fails.
/// - `401 Unauthorized`: If the request lacks a valid authentication token.
/// - `404 Not Found`: If no such task exists or it belongs to another user.
#[put("/{id}")]
pub async fn replace_task(
    pool: web::Data<PgPool>,
    task_id: web::Path<Uuid>,
    task_data: web::Json<TaskInput>,
    user: AuthenticatedUserId,
) -> Result<impl Responder, AppError> {
    task_data.validate()?;

    let task = Task::replace(&pool, user.0, task_id.into_inner(), task_data.into_inner()).await?;

    log::info!("user {} replaced task {}", user.0, task.id);

    Ok(HttpResponse::Ok().json(task))
}

/// Partially updates a task (PATCH semantics).
///
/// Only the fields present in the body are changed; absent fields keep their
/// stored values. Concurrent updates to the same task are last-write-wins.
///
/// ## Responses:
/// - `200 OK`: The updated task as JSON.
/// - `400 Bad Request`: If validation fails or an unknown status is supplied.
/// - `401 Unauthorized`: If the request lacks a valid authentication token.
/// - `404 Not Found`: If no such task exists or it belongs to another user.
#[patch("/{id}")]
pub async fn update_task(
    pool: web::Data<PgPool>,
    task_id: web::Path<Uuid>,
    task_data: web::Json<TaskUpdate>,
    user: AuthenticatedUserId,
) -> Result<impl Responder, AppError> {
    task_data.validate()?;

    let task = Task::update(&pool, user.0, task_id.into_inner(), &task_data).await?;

    log::info!("user {} updated task {}", user.0, task.id);

    Ok(HttpResponse::Ok().json(task))
}

/// Deletes a task by its ID.
///
/// Deleting an already-absent or foreign-owned task yields 404, not silent
/// success.
///
/// ## Responses:
/// - `204 No Content`: On successful deletion.
/// - `401 Unauthorized`: If the request lacks a valid authentication token.
/// - `404 Not Found`: If no such task exists or it belongs to another user.
#[delete("/{id}")]
pub async fn delete_task(
    pool: web::Data<PgPool>,
    task_id: web::Path<Uuid>,
    user: AuthenticatedUserId,
) -> Result<impl Responder, AppError> {
    let task_uuid = task_id.into_inner();
    Task::delete(&pool, user.0, task_uuid).await?;

    log::info!("user {} deleted task {}", user.0, task_uuid);

    Ok(HttpResponse::NoContent().finish())
}
