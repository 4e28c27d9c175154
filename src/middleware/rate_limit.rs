use actix_web::{
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    Error,
};
use futures::future::{ready, LocalBoxFuture, Ready};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use crate::error::AppError;

/// Fixed-window in-memory rate limiter, keyed by client address.
///
/// Wrapped around the auth scope to slow down registration abuse and
/// credential brute-forcing. The window state is the only in-process shared
/// mutable state in the application; it lives behind a mutex and is never
/// held across an await point.
pub struct RateLimiter {
    max_requests: u32,
    window: Duration,
}

impl RateLimiter {
    pub fn new(max_requests: u32, window: Duration) -> Self {
        Self {
            max_requests,
            window,
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for RateLimiter
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Transform = RateLimiterService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RateLimiterService {
            service,
            max_requests: self.max_requests,
            window: self.window,
            clients: Arc::new(Mutex::new(HashMap::new())),
        }))
    }
}

pub struct RateLimiterService<S> {
    service: S,
    max_requests: u32,
    window: Duration,
    clients: Arc<Mutex<HashMap<String, (u32, Instant)>>>,
}

impl<S, B> Service<ServiceRequest> for RateLimiterService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let client = req
            .connection_info()
            .realip_remote_addr()
            .unwrap_or("unknown")
            .to_string();

        let over_limit = {
            let mut clients = self.clients.lock().expect("rate limit map poisoned");
            let now = Instant::now();
            let entry = clients.entry(client.clone()).or_insert((0, now));

            if now.duration_since(entry.1) > self.window {
                *entry = (0, now);
            }

            entry.0 += 1;
            entry.0 > self.max_requests
        };

        if over_limit {
            log::warn!("rate limit exceeded for {}", client);
            let app_err =
                AppError::TooManyRequests("Too many requests, please try again later".into());
            return Box::pin(async move { Err(app_err.into()) });
        }

        let fut = self.service.call(req);
        Box::pin(fut)
    }
}
