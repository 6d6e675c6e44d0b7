//! # HTTP Request Handlers
//!
//! - **Superheroes** (`superheroes`) - Listing and creating superhero records
//! - **Health Check** (`health_check`) - Application health monitoring

mod health_check;
mod superheroes;

pub use health_check::*;
pub use superheroes::*;
