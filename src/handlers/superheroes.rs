//! # Superhero Handlers
//!
//! `GET /` lists every stored superhero, newest first.
//! `POST /new` creates a random one and returns it.

use std::sync::Arc;

use axum::{Json, extract::State};
use tracing::{debug, info, instrument};
use validator::Validate;

use crate::error::AppResult;
use crate::models::{AppState, Superhero};

/// Lists all superheroes.
///
/// GET /
///
/// # Returns
///
/// - `200 OK` with a JSON array of [`Superhero`], ordered by `created` descending
/// - `500 Internal Server Error` - Database error
#[instrument(skip_all, fields(request_id = %uuid::Uuid::new_v4()))]
pub async fn list_superheroes(
    State(state): State<Arc<AppState>>,
) -> AppResult<Json<Vec<Superhero>>> {
    debug!("Listing superheroes");
    let heroes = state.repository.find_all_newest_first().await?;
    Ok(Json(heroes))
}

/// Creates a superhero with a random name and power.
///
/// POST /new
///
/// A generated name that already exists overwrites the stored row.
///
/// # Returns
///
/// - `200 OK` with the stored [`Superhero`]
/// - `500 Internal Server Error` - Database error
#[instrument(skip_all, fields(request_id = %uuid::Uuid::new_v4()))]
pub async fn create_superhero(State(state): State<Arc<AppState>>) -> AppResult<Json<Superhero>> {
    let generated = state.generator.generate();
    let hero = Superhero::new(generated.name, generated.power);
    hero.validate()?;

    let hero = state.repository.save(&hero).await?;
    info!(?hero, "Created superhero");
    Ok(Json(hero))
}
