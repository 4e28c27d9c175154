#![doc = "The `task_manager` library crate."]
#![doc = ""]
#![doc = "This crate contains the domain models, authentication mechanisms, request"]
#![doc = "middleware, routing configuration, and error handling for the task manager"]
#![doc = "API. It is used by the main binary (`main.rs`) to construct and run the"]
#![doc = "application."]

pub mod auth;
pub mod config;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;

#[cfg(test)]
pub(crate) mod test_env {
    use lazy_static::lazy_static;

    lazy_static! {
        // Serializes unit tests that mutate process environment variables.
        pub static ref ENV_LOCK: std::sync::Mutex<()> = std::sync::Mutex::new(());
    }
}
