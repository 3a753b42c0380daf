use async_trait::async_trait;

use crate::contract::{
    error::SearchClientError,
    model::{SearchRequest, SearchResponse},
};

/// Public API of the user search service.
///
/// Implemented over HTTP by [`crate::gateways::http::HttpSearchClient`] and
/// in-process by [`crate::gateways::local::LocalSearchClient`]; both apply the
/// same local checks and over-fetch pagination.
#[async_trait]
pub trait UserSearchApi: Send + Sync {
    /// Fetch one page of users; `next_page` tells whether another page exists.
    async fn find_users(&self, req: SearchRequest) -> Result<SearchResponse, SearchClientError>;
}
