use crate::{
    auth::{generate_token, AuthResponse, LoginRequest, RegisterRequest},
    error::AppError,
    models::User,
};
use actix_web::{post, web, HttpResponse, Responder};
use serde_json::json;
use sqlx::PgPool;
use validator::Validate;

/// Register a new user
///
/// Creates a new user account and returns its generated id.
#[post("/register")]
pub async fn register(
    pool: web::Data<PgPool>,
    register_data: web::Json<RegisterRequest>,
) -> Result<impl Responder, AppError> {
    // Validate input shape and password policy
    register_data.validate()?;

    let user_id = User::create(&pool, &register_data.username, &register_data.password).await?;

    log::info!("registered user {}", register_data.username);

    Ok(HttpResponse::Created().json(json!({ "id": user_id })))
}

/// Login user
///
/// Authenticates a username/password pair and returns a bearer access token.
#[post("/login")]
pub async fn login(
    pool: web::Data<PgPool>,
    login_data: web::Json<LoginRequest>,
) -> Result<impl Responder, AppError> {
    // Validate input
    login_data.validate()?;

    let user_id = User::authenticate(&pool, &login_data.username, &login_data.password).await?;
    let access_token = generate_token(user_id)?;

    log::info!("user {} logged in", login_data.username);

    Ok(HttpResponse::Ok().json(AuthResponse { access_token }))
}
