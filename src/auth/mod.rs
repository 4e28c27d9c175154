pub mod extractors;
pub mod middleware;
pub mod password;
pub mod token;

use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

// Re-export necessary items
pub use extractors::AuthenticatedUserId;
pub use middleware::AuthMiddleware;
pub use password::{hash_password, verify_password};
pub use token::{generate_token, verify_token, Claims};

lazy_static! {
    // Regex for username validation: alphanumeric, underscores, hyphens
    static ref USERNAME_REGEX: regex::Regex = regex::Regex::new(r"^[a-zA-Z0-9_-]+$").unwrap();
}

/// Checks the password strength policy: at least 8 characters with one
/// uppercase letter, one lowercase letter, and one digit.
fn validate_password_strength(password: &str) -> Result<(), ValidationError> {
    let strong = password.len() >= 8
        && password.chars().any(|c| c.is_ascii_uppercase())
        && password.chars().any(|c| c.is_ascii_lowercase())
        && password.chars().any(|c| c.is_ascii_digit());

    if strong {
        Ok(())
    } else {
        let mut error = ValidationError::new("password_strength");
        error.message = Some(
            "Password must be at least 8 characters and include uppercase, lowercase, and a number"
                .into(),
        );
        Err(error)
    }
}

/// Represents the payload for a new user registration request.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    /// Desired username for the new account.
    /// Must be between 3 and 32 characters, alphanumeric, and can include
    /// underscores or hyphens.
    #[validate(
        length(min = 3, max = 32),
        regex(
            path = "USERNAME_REGEX",
            message = "Username must be alphanumeric, underscores, or hyphens"
        )
    )]
    pub username: String,
    /// Password for the new account.
    /// Must be at least 8 characters and include an uppercase letter, a
    /// lowercase letter, and a digit.
    #[validate(custom = "validate_password_strength")]
    pub password: String,
}

/// Represents the payload for a user login request.
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    /// Registered username.
    #[validate(length(min = 3))]
    pub username: String,
    /// The account password. Strength rules are only enforced at
    /// registration; login just checks the credential pair.
    pub password: String,
}

/// Response structure after a successful login, carrying the JWT used for
/// session authentication on protected routes.
#[derive(Debug, Serialize, Deserialize)]
pub struct AuthResponse {
    pub access_token: String,
}
