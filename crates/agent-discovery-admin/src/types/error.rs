//! Error types for the admin server and their HTTP rendering.

use axum::extract::rejection::QueryRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use agent_discovery::RegistryError;

/// All errors that can occur in the admin server.
#[derive(thiserror::Error, Debug)]
pub enum AdminError {
    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    #[error("Registry error: {0}")]
    Registry(#[from] RegistryError),

    #[error("Config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Transport error: {0}")]
    Transport(String),
}

impl AdminError {
    pub fn status(&self) -> StatusCode {
        match self {
            AdminError::InvalidQuery(_) => StatusCode::BAD_REQUEST,
            AdminError::Registry(_)
            | AdminError::Config(_)
            | AdminError::Io(_)
            | AdminError::Transport(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<QueryRejection> for AdminError {
    fn from(rejection: QueryRejection) -> Self {
        AdminError::InvalidQuery(rejection.body_text())
    }
}

impl IntoResponse for AdminError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("{self}");
        } else {
            tracing::debug!("{self}");
        }

        let body = serde_json::json!({
            "error": {
                "code": status.as_u16(),
                "message": self.to_string(),
            }
        });
        (status, Json(body)).into_response()
    }
}

pub type AdminResult<T> = Result<T, AdminError>;
