use std::env;

/// Runtime environment the server was started in.
///
/// Only affects logging verbosity; request handling is identical across
/// environments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production,
    Testing,
}

impl Environment {
    fn from_str(value: &str) -> Self {
        match value {
            "production" => Environment::Production,
            "testing" => Environment::Testing,
            _ => Environment::Development,
        }
    }

    /// Default log filter applied when `RUST_LOG` is not set.
    pub fn default_log_filter(&self) -> &'static str {
        match self {
            Environment::Development => "debug",
            Environment::Production => "info",
            Environment::Testing => "warn",
        }
    }
}

pub struct Config {
    pub database_url: String,
    pub server_port: u16,
    pub server_host: String,
    pub environment: Environment,
}

impl Config {
    pub fn from_env() -> Self {
        // JWT_SECRET is read by the token module on demand; assert its
        // presence here so a misconfigured deployment fails at boot rather
        // than on the first login.
        env::var("JWT_SECRET").expect("JWT_SECRET must be set");

        Self {
            database_url: env::var("DATABASE_URL").expect("DATABASE_URL must be set"),
            server_port: env::var("SERVER_PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .expect("SERVER_PORT must be a number"),
            server_host: env::var("SERVER_HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            environment: Environment::from_str(
                &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
            ),
        }
    }

    pub fn server_url(&self) -> String {
        format!("http://{}:{}", self.server_host, self.server_port)
    }
}
