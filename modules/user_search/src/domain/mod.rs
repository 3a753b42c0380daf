pub mod engine;
pub mod error;
pub mod query;
pub mod repo;
pub mod service;
