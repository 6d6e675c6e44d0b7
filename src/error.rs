//! # Centralized Error Handling
//!
//! Every handler returns [`AppResult`]; failures are logged here once and
//! turned into a JSON `{ "message": ... }` body. Nothing is recovered locally,
//! so every variant maps to a server error.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;
use tracing::error;

/// Central application error type.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("database error")]
    Db(#[from] sqlx::Error),

    /// A generated record broke the column limits. The client sent nothing,
    /// so this is reported as a server fault.
    #[error("generated record is invalid")]
    Validation(#[from] validator::ValidationErrors),
}

#[derive(Serialize)]
struct ErrorBody {
    message: &'static str,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let message = match &self {
            AppError::Db(e) => {
                error!(?e, "Database error occurred");
                "Database error"
            }
            AppError::Validation(e) => {
                error!(%e, "Generated record failed validation");
                "Generated record is invalid"
            }
        };

        let body = Json(ErrorBody { message });
        (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
    }
}

/// Convenience Result type alias that uses AppError as the error type.
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_variant_is_a_server_error() {
        let db = AppError::Db(sqlx::Error::PoolTimedOut).into_response();
        assert_eq!(db.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let validation = AppError::Validation(validator::ValidationErrors::new()).into_response();
        assert_eq!(validation.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
