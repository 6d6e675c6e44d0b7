mod state;
mod superhero;

pub use state::AppState;
pub use superhero::Superhero;
