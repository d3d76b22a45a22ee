//! Error translation from the domain core to HTTP responses
//!
//! The core raises typed failures; this layer maps each kind to a status
//! code and a structured error body carrying timestamp, message, and
//! request path. Status refusals surface as 409 rather than a generic
//! internal error so clients can tell a guarded rejection from a fault.

use axum::{
    extract::Request,
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::error;

use bankcards::Error;

/// Wrapper turning a domain error into an HTTP response
#[derive(Debug)]
pub struct ApiError(pub Error);

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            Error::NotFound(_) => StatusCode::NOT_FOUND,
            Error::AccessDenied(_) => StatusCode::FORBIDDEN,
            Error::StateConflict(_) | Error::DuplicateUsername(_) => StatusCode::CONFLICT,
            Error::Validation(_) => StatusCode::BAD_REQUEST,
            Error::InvalidCredentials(_) => StatusCode::UNAUTHORIZED,
            Error::Encryption(_) | Error::Configuration(_) => {
                error!(error = %self.0, "internal failure while handling request");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        // The response middleware picks the message up and completes the
        // body with the request path, which is unknown here.
        let mut response = status.into_response();
        response.extensions_mut().insert(ErrorMessage(self.0.to_string()));
        response
    }
}

/// Error message carried from the handler to the response middleware
#[derive(Debug, Clone)]
pub struct ErrorMessage(pub String);

/// Structured error body returned for every refused request
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorDetails {
    pub timestamp: DateTime<Utc>,
    pub message: String,
    pub path: String,
}

/// Response middleware filling in the structured error body
pub async fn error_details(request: Request, next: Next) -> Response {
    let path = request.uri().path().to_string();
    let mut response = next.run(request).await;

    if let Some(ErrorMessage(message)) = response.extensions_mut().remove::<ErrorMessage>() {
        let status = response.status();
        let details = ErrorDetails {
            timestamp: Utc::now(),
            message,
            path,
        };
        return (status, Json(details)).into_response();
    }

    response
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn state_conflicts_map_to_409() {
        let response = ApiError(Error::StateConflict("card is already blocked".into()))
            .into_response();
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }

    #[test]
    fn each_error_kind_has_a_distinct_status() {
        let cases = [
            (Error::NotFound("x".into()), StatusCode::NOT_FOUND),
            (Error::AccessDenied("x".into()), StatusCode::FORBIDDEN),
            (Error::Validation("x".into()), StatusCode::BAD_REQUEST),
            (Error::DuplicateUsername("x".into()), StatusCode::CONFLICT),
            (Error::InvalidCredentials("x".into()), StatusCode::UNAUTHORIZED),
            (Error::Encryption("x".into()), StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (err, expected) in cases {
            assert_eq!(ApiError(err).into_response().status(), expected);
        }
    }
}
