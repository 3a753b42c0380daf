use serde::{Deserialize, Serialize};

use crate::contract::model::UserRecord;

/// One element of the dataset file.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRow {
    pub id: i64,
    pub age: i64,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub about: String,
    #[serde(default)]
    pub gender: String,
}

impl From<UserRow> for UserRecord {
    fn from(row: UserRow) -> Self {
        Self {
            id: row.id,
            first_name: row.first_name,
            last_name: row.last_name,
            age: row.age,
            about: row.about,
            gender: row.gender,
        }
    }
}

impl From<&UserRecord> for UserRow {
    fn from(r: &UserRecord) -> Self {
        Self {
            id: r.id,
            age: r.age,
            first_name: r.first_name.clone(),
            last_name: r.last_name.clone(),
            about: r.about.clone(),
            gender: r.gender.clone(),
        }
    }
}
