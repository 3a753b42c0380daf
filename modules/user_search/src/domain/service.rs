use std::sync::Arc;

use tracing::{debug, instrument};

use crate::contract::model::User;
use crate::domain::engine;
use crate::domain::error::DomainError;
use crate::domain::query::{QueryParams, SearchQuery};
use crate::domain::repo::RecordStore;

/// Domain service: validates a query and runs it against the record store.
/// Stateless apart from the store handle, so it is shared as `Arc<Service>`.
#[derive(Clone)]
pub struct Service {
    store: Arc<dyn RecordStore>,
}

impl Service {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    /// Validate raw query pairs, then search.
    pub async fn search_params(&self, params: &QueryParams) -> Result<Vec<User>, DomainError> {
        let query = SearchQuery::from_params(params).map_err(DomainError::invalid_query)?;
        self.search(&query).await
    }

    #[instrument(
        name = "user_search.domain.service.search",
        skip(self),
        fields(limit = query.limit, offset = query.offset)
    )]
    pub async fn search(&self, query: &SearchQuery) -> Result<Vec<User>, DomainError> {
        let records = self
            .store
            .load_all()
            .await
            .map_err(|e| DomainError::dataset(format!("{e:#}")))?;

        let users: Vec<User> = engine::run(&records, query)
            .into_iter()
            .map(User::from)
            .collect();

        debug!(total = records.len(), returned = users.len(), "search finished");
        Ok(users)
    }
}
