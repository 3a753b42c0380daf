// === PUBLIC CONTRACT ===
// Only the contract module should be public for other crates to consume
pub mod contract;

// Re-export the public contract components
pub use contract::{client, error, model};

// === CLIENTS ===
// HTTP and in-process implementations of `contract::client::UserSearchApi`
pub mod gateways;
pub use gateways::{
    http::{HttpSearchClient, SearchClientConfig},
    local::LocalSearchClient,
};

// === MODULE ===
pub mod module;
pub use module::UserSearch;

// === INTERNAL MODULES ===
// WARNING: These modules are internal implementation details!
// They are exposed for the server binary and for comprehensive testing.
// Only use the `contract` module for stable public APIs.
#[doc(hidden)]
pub mod api;
#[doc(hidden)]
pub mod config;
#[doc(hidden)]
pub mod domain;
#[doc(hidden)]
pub mod infra;

pub use config::UserSearchConfig;
