use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use axum::{http::StatusCode, middleware::from_fn, Router};
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
};
use tracing::info;

use crate::api::rest::{request_id, routes};
use crate::config::UserSearchConfig;
use crate::domain::repo::RecordStore;
use crate::domain::service::Service;
use crate::gateways::local::LocalSearchClient;
use crate::infra::storage::FileRecordStore;

/// The user search module: owns the record store and the domain service and
/// knows how to expose them over REST or in-process.
pub struct UserSearch {
    config: UserSearchConfig,
    store: Arc<dyn RecordStore>,
    service: Arc<Service>,
}

impl UserSearch {
    /// Build a file-backed module. A relative `dataset_path` is resolved
    /// against `base_dir`.
    pub fn init(config: UserSearchConfig, base_dir: &Path) -> Self {
        let path = dataset_path(&config.dataset_path, base_dir);
        let store: Arc<dyn RecordStore> = if config.cache_dataset {
            Arc::new(FileRecordStore::with_cache(&path))
        } else {
            Arc::new(FileRecordStore::new(&path))
        };
        info!(
            dataset = %path.display(),
            cached = config.cache_dataset,
            route = %config.route,
            "user_search module initialized"
        );
        Self::with_store(config, store)
    }

    pub fn with_store(config: UserSearchConfig, store: Arc<dyn RecordStore>) -> Self {
        let service = Arc::new(Service::new(store.clone()));
        Self {
            config,
            store,
            service,
        }
    }

    pub fn config(&self) -> &UserSearchConfig {
        &self.config
    }

    pub fn service(&self) -> Arc<Service> {
        self.service.clone()
    }

    pub fn local_client(&self) -> LocalSearchClient {
        LocalSearchClient::new(self.service.clone())
    }

    /// Load the dataset once and report how many records it holds.
    pub async fn check_dataset(&self) -> Result<usize> {
        let records = self
            .store
            .load_all()
            .await
            .context("dataset check failed")?;
        Ok(records.len())
    }

    /// Add the search and health routes to `router`.
    pub fn register_rest(&self, router: Router) -> Result<Router> {
        routes::register_routes(router, self.service.clone(), &self.config)
    }

    /// Complete HTTP application: routes plus request-id, tracing and the
    /// optional per-request timeout. A request that runs past the timeout
    /// gets `408 Request Timeout`.
    pub fn router(&self, timeout: Option<Duration>) -> Result<Router> {
        let mut router = self.register_rest(Router::new())?;

        // Middleware order (outermost to innermost):
        // SetRequestId -> PropagateRequestId -> Trace -> push_req_id_to_extensions -> Timeout
        if let Some(t) = timeout {
            router = router.layer(TimeoutLayer::with_status_code(
                StatusCode::REQUEST_TIMEOUT,
                t,
            ));
        }
        router = router.layer(from_fn(request_id::push_req_id_to_extensions));
        router = router.layer(request_id::create_trace_layer());

        let x_request_id = request_id::header();
        router = router.layer(PropagateRequestIdLayer::new(x_request_id.clone()));
        router = router.layer(SetRequestIdLayer::new(x_request_id, request_id::MakeReqId));

        Ok(router)
    }
}

fn dataset_path(configured: &str, base_dir: &Path) -> PathBuf {
    let p = Path::new(configured);
    if p.is_absolute() {
        p.to_path_buf()
    } else {
        base_dir.join(p)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contract::model::UserRecord;
    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::Request;
    use tower::ServiceExt;

    struct SlowStore(Duration);

    #[async_trait]
    impl RecordStore for SlowStore {
        async fn load_all(&self) -> Result<Arc<Vec<UserRecord>>> {
            tokio::time::sleep(self.0).await;
            Ok(Arc::new(Vec::new()))
        }
    }

    fn slow_module(delay: Duration) -> UserSearch {
        UserSearch::with_store(UserSearchConfig::default(), Arc::new(SlowStore(delay)))
    }

    fn search_request(route: &str) -> Request<Body> {
        Request::builder()
            .uri(format!("{route}?order_field=Id&order_by=0&limit=1&offset=0"))
            .body(Body::empty())
            .unwrap()
    }

    #[tokio::test]
    async fn slow_search_answers_request_timeout() {
        let module = slow_module(Duration::from_millis(500));
        let route = module.config().route.clone();
        let router = module.router(Some(Duration::from_millis(20))).unwrap();

        let resp = router.oneshot(search_request(&route)).await.unwrap();
        assert_eq!(resp.status(), StatusCode::REQUEST_TIMEOUT);
        assert!(resp.headers().contains_key("x-request-id"));
    }

    #[tokio::test]
    async fn search_within_timeout_succeeds() {
        let module = slow_module(Duration::from_millis(1));
        let route = module.config().route.clone();
        let router = module.router(Some(Duration::from_secs(5))).unwrap();

        let resp = router.oneshot(search_request(&route)).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[test]
    fn dataset_path_resolution() {
        let base = Path::new("/srv/home");
        assert_eq!(
            dataset_path("dataset.json", base),
            PathBuf::from("/srv/home/dataset.json")
        );
        assert_eq!(
            dataset_path("/data/users.json", base),
            PathBuf::from("/data/users.json")
        );
    }

    #[test]
    fn bad_route_is_rejected() {
        let cfg = UserSearchConfig {
            route: "search".into(),
            ..Default::default()
        };
        let module = UserSearch::init(cfg, Path::new("/tmp"));
        assert!(module.router(None).is_err());
    }
}
