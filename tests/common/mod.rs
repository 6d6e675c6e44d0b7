#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, Once};

use sqlx::PgPool;
use superheroes::services::generator::{GeneratedHero, HeroGenerator, RandomHeroGenerator};
use tokio::net::TcpListener;

pub fn init_tracing_once() {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter("superheroes=debug")
            .with_test_writer()
            .init();
    });
}

/// A generator that hands out a scripted sequence of heroes, then falls back
/// to random ones. Lets tests force name collisions.
#[derive(Debug, Default)]
pub struct FixedGenerator {
    queue: Mutex<VecDeque<GeneratedHero>>,
}

impl FixedGenerator {
    pub fn new(heroes: &[(&str, &str)]) -> Self {
        let queue = heroes
            .iter()
            .map(|(name, power)| GeneratedHero {
                name: name.to_string(),
                power: power.to_string(),
            })
            .collect();
        Self {
            queue: Mutex::new(queue),
        }
    }
}

impl HeroGenerator for FixedGenerator {
    fn generate(&self) -> GeneratedHero {
        self.queue
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| RandomHeroGenerator.generate())
    }
}

/// Spawns the application with the random generator.
///
/// Returned address format: `http://127.0.0.1:8492`
pub async fn spawn_app(test_db_pool: PgPool) -> String {
    spawn_app_with_generator(test_db_pool, Arc::new(RandomHeroGenerator)).await
}

/// Spawns the application with a custom generator and returns its address.
pub async fn spawn_app_with_generator(
    test_db_pool: PgPool,
    generator: Arc<dyn HeroGenerator>,
) -> String {
    init_tracing_once();

    // Randomly choose an available port
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind random port at localhost");
    let port = listener.local_addr().unwrap().port();

    tokio::spawn(async move {
        let app = superheroes::app_with_generator(test_db_pool, generator);
        axum::serve(listener, app).await.unwrap();
    });

    let address = format!("http://127.0.0.1:{port}");

    // Wait for server to be ready
    let client = reqwest::Client::new();
    for _ in 0..10 {
        if client
            .get(format!("{address}/health-check"))
            .send()
            .await
            .is_ok()
        {
            break;
        }
        tokio::time::sleep(std::time::Duration::from_millis(100)).await;
    }

    address
}
