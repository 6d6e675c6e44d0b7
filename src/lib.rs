//! # Superheroes - Vault Dynamic Credentials Demo
//!
//! A small API listing and creating random superheroes in PostgreSQL. The
//! database login can be issued on demand by HashiCorp Vault.
//!
//! ## Modules
//!
//! - [`handlers`] - HTTP request handlers
//! - [`models`] - The superhero record and shared application state
//! - [`services`] - Storage, name generation and credential sources
//! - [`telemetry`] - Structured logging setup
//! - [`utils`] - Constants and secret lookup

pub mod error;
pub mod handlers;
pub mod models;
pub mod services;
pub mod telemetry;
pub mod utils;

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use sqlx::PgPool;
use tower_http::trace::TraceLayer;

use crate::handlers::{create_superhero, health_check, list_superheroes};
use crate::models::AppState;
use crate::services::generator::{HeroGenerator, RandomHeroGenerator};

/// Creates an Axum router using the [`RandomHeroGenerator`].
#[inline]
pub fn app(db_pool: PgPool) -> Router {
    app_with_generator(db_pool, Arc::new(RandomHeroGenerator))
}

/// Creates an Axum router with application routes and state.
///
/// # Arguments
///
/// * `db_pool` - PostgreSQL database connection pool, already migrated
/// * `generator` - Source of names and powers for `POST /new`
pub fn app_with_generator(db_pool: PgPool, generator: Arc<dyn HeroGenerator>) -> Router {
    let state = Arc::new(AppState::new(db_pool, generator));

    Router::new()
        .route("/", get(list_superheroes))
        .route("/new", post(create_superhero))
        .route("/health-check", get(health_check))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
