//!
//! # User Model and Credential Store
//!
//! Persists usernames and salted bcrypt password hashes, enforcing username
//! uniqueness at write time. Plaintext passwords never leave the registration
//! and login code paths and are never stored or logged.

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::{FromRow, PgPool};

use crate::auth::{hash_password, verify_password};
use crate::error::AppError;

/// A registered user as stored in the database.
///
/// The password hash is deliberately excluded from serialization so the
/// record can never leak credentials through a response body.
#[derive(Debug, Serialize, FromRow)]
pub struct User {
    pub id: i32,
    pub username: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Registers a new user and returns its generated id.
    ///
    /// The username must not already exist; a duplicate yields
    /// `AppError::Conflict`. The password is hashed with bcrypt before the
    /// row is written. Input shape and strength checks happen at the request
    /// layer before this is called.
    pub async fn create(pool: &PgPool, username: &str, password: &str) -> Result<i32, AppError> {
        let existing = sqlx::query_as::<_, (i32,)>("SELECT id FROM users WHERE username = $1")
            .bind(username)
            .fetch_optional(pool)
            .await?;

        if existing.is_some() {
            return Err(AppError::Conflict("Username already exists".into()));
        }

        let password_hash = hash_password(password)?;

        // The unique constraint still backstops a concurrent registration of
        // the same username; sqlx maps that violation to Conflict as well.
        let (id,) = sqlx::query_as::<_, (i32,)>(
            "INSERT INTO users (username, password_hash) VALUES ($1, $2) RETURNING id",
        )
        .bind(username)
        .bind(&password_hash)
        .fetch_one(pool)
        .await?;

        Ok(id)
    }

    /// Checks a username/password pair and returns the matching user id.
    ///
    /// An unknown username and a wrong password both produce the identical
    /// `Unauthorized` error, so callers cannot distinguish which credential
    /// was wrong (no username enumeration).
    pub async fn authenticate(
        pool: &PgPool,
        username: &str,
        password: &str,
    ) -> Result<i32, AppError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, username, password_hash, created_at FROM users WHERE username = $1",
        )
        .bind(username)
        .fetch_optional(pool)
        .await?;

        match user {
            Some(user) if verify_password(password, &user.password_hash)? => Ok(user.id),
            _ => Err(AppError::Unauthorized("Invalid credentials".into())),
        }
    }
}
