pub mod entity;
pub mod file_store;
pub mod memory_store;

pub use entity::UserRow;
pub use file_store::FileRecordStore;
pub use memory_store::InMemoryRecordStore;
