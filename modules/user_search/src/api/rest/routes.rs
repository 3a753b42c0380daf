use std::sync::Arc;

use anyhow::{bail, Result};
use axum::{routing::get, Extension, Router};

use crate::api::rest::{auth::AccessPolicy, handlers};
use crate::config::UserSearchConfig;
use crate::domain::service::Service;

pub const HEALTH_PATH: &str = "/health";

pub fn register_routes(
    mut router: Router,
    service: Arc<Service>,
    config: &UserSearchConfig,
) -> Result<Router> {
    let route = config.route.as_str();
    if !route.starts_with('/') {
        bail!("user_search route must start with '/', got {route:?}");
    }
    if route == HEALTH_PATH {
        bail!("user_search route {route:?} collides with the health endpoint");
    }

    // GET <route> - search users
    router = router.route(route, get(handlers::search_users));

    // GET /health - liveness
    router = router.route(HEALTH_PATH, get(handlers::health_check));

    router = router
        .layer(Extension(AccessPolicy::new(config.access_token.clone())))
        .layer(Extension(service));

    Ok(router)
}
