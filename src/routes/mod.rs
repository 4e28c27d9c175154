pub mod auth;
pub mod health;
pub mod tasks;

use actix_web::web;
use std::time::Duration;

use crate::middleware::RateLimiter;

// Registration and login share one fixed window per client to slow down
// signup abuse and credential brute-forcing.
const AUTH_RATE_LIMIT: u32 = 10;
const AUTH_RATE_WINDOW: Duration = Duration::from_secs(60);

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/auth")
            .wrap(RateLimiter::new(AUTH_RATE_LIMIT, AUTH_RATE_WINDOW))
            .service(auth::register)
            .service(auth::login),
    )
    .service(
        web::scope("/tasks")
            .service(tasks::get_tasks)
            .service(tasks::create_task)
            .service(tasks::get_task)
            .service(tasks::replace_task)
            .service(tasks::update_task)
            .service(tasks::delete_task),
    );
}
