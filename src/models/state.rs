use std::sync::Arc;

use sqlx::PgPool;
use tracing::info;

use crate::services::{generator::HeroGenerator, repository::SuperheroRepository};

/// Application state shared across requests. Needs to be thread-safe.
pub struct AppState {
    /// Store for superhero records.
    pub repository: SuperheroRepository,
    /// Source of random names and powers for new records.
    pub generator: Arc<dyn HeroGenerator>,
}

impl AppState {
    /// Creates a new application state.
    ///
    /// # Arguments
    ///
    /// * `db_pool` - PostgreSQL database connection pool
    /// * `generator` - Generator used by the create endpoint
    pub fn new(db_pool: PgPool, generator: Arc<dyn HeroGenerator>) -> Self {
        info!("Initializing application state");

        Self {
            repository: SuperheroRepository::new(db_pool),
            generator,
        }
    }
}
