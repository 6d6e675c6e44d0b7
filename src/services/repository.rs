//! # Superhero Repository
//!
//! Thin wrapper around the `superhero` table. Writes are upserts keyed on
//! `name`: saving a record whose name already exists replaces that row.

use sqlx::PgPool;
use tracing::{debug, instrument};

use crate::error::AppResult;
use crate::models::Superhero;

pub struct SuperheroRepository {
    db_pool: PgPool,
}

impl SuperheroRepository {
    pub fn new(db_pool: PgPool) -> Self {
        Self { db_pool }
    }

    /// Returns every record, most recently created first. Equal timestamps
    /// fall back to descending `name` so the order is stable.
    #[instrument(skip_all)]
    pub async fn find_all_newest_first(&self) -> AppResult<Vec<Superhero>> {
        let heroes = sqlx::query_as::<_, Superhero>(
            r#"
            SELECT name, power, created
            FROM superhero
            ORDER BY created DESC, name DESC
            "#,
        )
        .fetch_all(&self.db_pool)
        .await?;

        debug!(count = heroes.len(), "Fetched superheroes");
        Ok(heroes)
    }

    /// Inserts the record, or overwrites the row with the same name.
    ///
    /// Returns the row as stored, so `created` carries the database's
    /// timestamp precision.
    #[instrument(skip_all, fields(name = %hero.name))]
    pub async fn save(&self, hero: &Superhero) -> AppResult<Superhero> {
        let saved = sqlx::query_as::<_, Superhero>(
            r#"
            INSERT INTO superhero (name, power, created)
            VALUES ($1, $2, $3)
            ON CONFLICT (name)
            DO UPDATE SET power = EXCLUDED.power, created = EXCLUDED.created
            RETURNING name, power, created
            "#,
        )
        .bind(&hero.name)
        .bind(&hero.power)
        .bind(hero.created)
        .fetch_one(&self.db_pool)
        .await?;

        Ok(saved)
    }
}
