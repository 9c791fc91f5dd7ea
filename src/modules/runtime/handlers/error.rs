//! Conversion of gateway errors into HTTP responses

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use climate_api_core::ClimateError;
use climate_api_types::ErrorResponse;
use tracing::{error, warn};

/// Error returned from a handler.
///
/// Every failure surfaces to the caller as a server error; nothing is retried.
#[derive(Debug)]
pub struct ApiError(pub ClimateError);

impl From<ClimateError> for ApiError {
    fn from(err: ClimateError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let err = self.0;
        if err.is_error() {
            error!("Request failed: {}", err);
        } else {
            warn!("Request failed: {}", err);
        }

        let status = StatusCode::from_u16(err.status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(ErrorResponse::new(err.sanitized_message()))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_database_error_is_500() {
        let response =
            ApiError::from(ClimateError::Database("sqlite://secret".into())).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_query_error_is_500() {
        let response = ApiError(ClimateError::QueryExecution("boom".into())).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
