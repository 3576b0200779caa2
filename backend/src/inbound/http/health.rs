//! Liveness and readiness probes.
//!
//! Readiness additionally pings the store when a [`StoreProbe`] is attached,
//! so the service drops out of rotation while the database is unreachable.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use actix_web::{HttpResponse, get, http::header, web};
use tracing::warn;

use crate::domain::ports::StoreProbe;

/// Process health flags shared between `main` and the probe handlers.
pub struct HealthState {
    ready: AtomicBool,
    live: AtomicBool,
    store: Option<Arc<dyn StoreProbe>>,
}

impl Default for HealthState {
    fn default() -> Self {
        Self {
            ready: AtomicBool::new(false),
            live: AtomicBool::new(true),
            store: None,
        }
    }
}

impl HealthState {
    /// Starts live but not ready.
    pub fn new() -> Self {
        Self::default()
    }

    /// Consult `probe` on every readiness check.
    pub fn with_store_probe(mut self, probe: Arc<dyn StoreProbe>) -> Self {
        self.store = Some(probe);
        self
    }

    pub fn mark_ready(&self) {
        self.ready.store(true, Ordering::Release);
    }

    /// Fail liveness so orchestrators notice the drain during shutdown.
    pub fn mark_unhealthy(&self) {
        self.live.store(false, Ordering::Release);
    }

    pub fn is_ready(&self) -> bool {
        self.ready.load(Ordering::Acquire)
    }

    pub fn is_alive(&self) -> bool {
        self.live.load(Ordering::Acquire)
    }

    async fn store_reachable(&self) -> bool {
        let Some(probe) = &self.store else {
            return true;
        };
        match probe.ping().await {
            Ok(()) => true,
            Err(err) => {
                warn!(error = %err, "readiness probe could not reach the store");
                false
            }
        }
    }
}

fn probe_response(probe_ok: bool) -> HttpResponse {
    let mut response = if probe_ok {
        HttpResponse::Ok()
    } else {
        HttpResponse::ServiceUnavailable()
    };
    response
        .insert_header((header::CACHE_CONTROL, "no-store"))
        .finish()
}

/// 200 once start-up finished and the store answers, 503 otherwise.
#[utoipa::path(
    get,
    path = "/health/ready",
    tags = ["health"],
    responses(
        (status = 200, description = "Server is ready to handle traffic"),
        (status = 503, description = "Server is starting or the store is unreachable")
    )
)]
#[get("/health/ready")]
pub async fn ready(state: web::Data<HealthState>) -> HttpResponse {
    probe_response(state.is_ready() && state.store_reachable().await)
}

/// 200 while alive, 503 once shutdown has begun.
#[utoipa::path(
    get,
    path = "/health/live",
    tags = ["health"],
    responses(
        (status = 200, description = "Server is alive"),
        (status = 503, description = "Server is shutting down")
    )
)]
#[get("/health/live")]
pub async fn live(state: web::Data<HealthState>) -> HttpResponse {
    probe_response(state.is_alive())
}
