#![allow(dead_code)]

use std::io::Write;
use std::sync::Arc;

use tempfile::NamedTempFile;

use user_search::{
    config::UserSearchConfig, infra::storage::InMemoryRecordStore, model::UserRecord,
    UserSearch,
};

pub fn record(id: i64, first: &str, last: &str, age: i64, about: &str, gender: &str) -> UserRecord {
    UserRecord {
        id,
        first_name: first.into(),
        last_name: last.into(),
        age,
        about: about.into(),
        gender: gender.into(),
    }
}

/// Six records in deliberately unsorted order.
pub fn records() -> Vec<UserRecord> {
    vec![
        record(3, "Everett", "Dillard", 27, "Sint eu id sint irure officia amet.", "male"),
        record(0, "Boyd", "Wolf", 22, "Nulla cillum enim voluptate consequat.", "male"),
        record(5, "Beulah", "Stark", 30, "Enim cillum eu cillum velit labore.", "female"),
        record(1, "Hilda", "Mayer", 21, "Sit commodo consectetur minim amet ex.", "female"),
        record(4, "Owen", "Lynn", 30, "Elit anim elit eu et deserunt veniam.", "male"),
        record(2, "Brooks", "Aguilar", 25, "Velit ullamco est aliqua voluptate.", "male"),
    ]
}

pub fn dataset_json() -> String {
    let rows: Vec<serde_json::Value> = records()
        .iter()
        .map(|r| {
            serde_json::json!({
                "id": r.id,
                "age": r.age,
                "first_name": r.first_name,
                "last_name": r.last_name,
                "about": r.about,
                "gender": r.gender,
            })
        })
        .collect();
    serde_json::Value::Array(rows).to_string()
}

pub fn dataset_file() -> NamedTempFile {
    let mut f = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
    f.write_all(dataset_json().as_bytes()).unwrap();
    f.flush().unwrap();
    f
}

pub fn in_memory_module(config: UserSearchConfig) -> UserSearch {
    UserSearch::with_store(config, Arc::new(InMemoryRecordStore::new(records())))
}
