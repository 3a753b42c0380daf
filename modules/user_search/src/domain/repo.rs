use std::sync::Arc;

use async_trait::async_trait;

use crate::contract::model::UserRecord;

/// Port for the domain layer: where the user records come from.
/// Object-safe and async-friendly via `async_trait`.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// The full dataset in its stored order.
    async fn load_all(&self) -> anyhow::Result<Arc<Vec<UserRecord>>>;
}
