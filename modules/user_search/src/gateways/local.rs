use async_trait::async_trait;
use std::sync::Arc;
use tracing::instrument;

use crate::contract::{
    client::UserSearchApi,
    error::SearchClientError,
    model::{SearchRequest, SearchResponse},
};
use crate::domain::{error::DomainError, query::QueryParams, service::Service};

/// Local implementation of the UserSearchApi trait that delegates to the domain service.
///
/// Requests take the same path as over HTTP: local checks, clamp, over-fetch,
/// then server-side validation of the encoded parameters.
pub struct LocalSearchClient {
    service: Arc<Service>,
}

impl LocalSearchClient {
    pub fn new(service: Arc<Service>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl UserSearchApi for LocalSearchClient {
    #[instrument(name = "user_search.gateways.local.find_users", skip(self))]
    async fn find_users(&self, req: SearchRequest) -> Result<SearchResponse, SearchClientError> {
        let prepared = req.prepare()?;
        let params = QueryParams::from_pairs(prepared.query_pairs());

        let users = self
            .service
            .search_params(&params)
            .await
            .map_err(|e| map_domain_error(e, &prepared.order_field))?;

        Ok(SearchResponse::from_overfetched(users, prepared.fetch_limit))
    }
}

/// Map domain errors to contract errors
fn map_domain_error(domain_error: DomainError, order_field: &str) -> SearchClientError {
    match domain_error {
        DomainError::InvalidQuery { code } => {
            SearchClientError::from_bad_request(code.as_str(), order_field)
        }
        DomainError::Dataset { .. } => SearchClientError::ServerFatal,
    }
}
