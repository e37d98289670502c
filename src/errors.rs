use axum::{http::StatusCode, response::IntoResponse, Json};

/// Error taxonomy for the whole API, matched exhaustively at the response
/// boundary. Validation errors are raised before any store access; not-found
/// and conflict conditions are read off store results.
#[derive(Debug)]
pub enum ApiError {
    Validation(&'static str),
    NotFound(&'static str),
    Conflict(&'static str),
    Internal(&'static str),
    Database(sqlx::Error),
}

#[derive(serde::Serialize)]
pub struct ErrorBody {
    msg: String,
}

impl ErrorBody {
    pub fn new(msg: &str) -> ErrorBody {
        ErrorBody {
            msg: msg.to_string(),
        }
    }
}

impl From<sqlx::Error> for ApiError {
    fn from(value: sqlx::Error) -> Self {
        Self::Database(value)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let (status_code, body) = match self {
            ApiError::Validation(msg) => (StatusCode::BAD_REQUEST, ErrorBody::new(msg)),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, ErrorBody::new(msg)),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, ErrorBody::new(msg)),
            ApiError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, ErrorBody::new(msg)),
            ApiError::Database(error) => {
                // The client only ever sees the generic message.
                tracing::error!("database error: {error}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorBody::new("Internal server error"),
                )
            }
        };
        (status_code, Json(body)).into_response()
    }
}
