use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};

use crate::api::rest::dto::ErrorResponseDto;
use crate::contract::error::SearchErrorCode;
use crate::domain::error::DomainError;

/// Failures of the search endpoint as they go out on the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// 401, empty body.
    Unauthorized,
    /// 400 with `{"Error": code}`.
    BadRequest(SearchErrorCode),
    /// 500, empty body.
    Internal,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            Self::Unauthorized => StatusCode::UNAUTHORIZED.into_response(),
            Self::BadRequest(code) => (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponseDto {
                    error: code.as_str().to_string(),
                }),
            )
                .into_response(),
            Self::Internal => StatusCode::INTERNAL_SERVER_ERROR.into_response(),
        }
    }
}

/// Map domain errors to API errors
pub fn map_domain_error(error: &DomainError) -> ApiError {
    match error {
        DomainError::InvalidQuery { code } => ApiError::BadRequest(*code),
        DomainError::Dataset { .. } => ApiError::Internal,
    }
}
