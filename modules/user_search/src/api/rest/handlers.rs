use std::sync::Arc;

use axum::{
    extract::RawQuery,
    http::HeaderMap,
    response::Json,
    Extension,
};
use serde_json::{json, Value};
use tracing::{debug, error, warn};

use crate::api::rest::auth::AccessPolicy;
use crate::api::rest::dto::UserDto;
use crate::api::rest::error::{map_domain_error, ApiError};
use crate::domain::error::DomainError;
use crate::domain::query::QueryParams;
use crate::domain::service::Service;

/// Search users: validate the query string, then sort, window and filter.
pub async fn search_users(
    Extension(svc): Extension<Arc<Service>>,
    Extension(policy): Extension<AccessPolicy>,
    headers: HeaderMap,
    RawQuery(raw): RawQuery,
) -> Result<Json<Vec<UserDto>>, ApiError> {
    if !policy.allows(&headers) {
        warn!("Rejected search request with bad access token");
        return Err(ApiError::Unauthorized);
    }

    let params = QueryParams::parse(raw.as_deref().unwrap_or(""));
    debug!("Searching users with query: {:?}", raw);

    match svc.search_params(&params).await {
        Ok(users) => Ok(Json(users.into_iter().map(UserDto::from).collect())),
        Err(e) => {
            match &e {
                DomainError::InvalidQuery { code } => debug!("Rejected search query: {}", code),
                DomainError::Dataset { .. } => error!("Failed to search users: {}", e),
            }
            Err(map_domain_error(&e))
        }
    }
}

pub async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}
