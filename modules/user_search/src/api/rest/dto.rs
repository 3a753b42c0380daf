use serde::{Deserialize, Serialize};

use crate::contract::model::User;

/// REST DTO for one search hit. Written with lowercase keys; capitalized keys
/// are accepted on read as well.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserDto {
    #[serde(alias = "Id")]
    pub id: i64,
    #[serde(alias = "Name")]
    pub name: String,
    #[serde(alias = "Age")]
    pub age: i64,
    #[serde(alias = "About")]
    pub about: String,
    #[serde(alias = "Gender")]
    pub gender: String,
}

/// Body of every 400 response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponseDto {
    #[serde(rename = "Error")]
    pub error: String,
}

// Conversion implementations between REST DTOs and contract models

impl From<User> for UserDto {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            age: user.age,
            about: user.about,
            gender: user.gender,
        }
    }
}

impl From<UserDto> for User {
    fn from(dto: UserDto) -> Self {
        Self {
            id: dto.id,
            name: dto.name,
            age: dto.age,
            about: dto.about,
            gender: dto.gender,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn user_serializes_with_lowercase_keys_and_combined_name() {
        let dto = UserDto {
            id: 3,
            name: "Everett Dillard".into(),
            age: 27,
            about: "Sint".into(),
            gender: "male".into(),
        };
        assert_eq!(
            serde_json::to_value(&dto).unwrap(),
            json!({"id": 3, "name": "Everett Dillard", "age": 27, "about": "Sint", "gender": "male"})
        );
    }

    #[test]
    fn user_reads_capitalized_keys() {
        let dto: UserDto = serde_json::from_value(json!({
            "Id": 1, "Name": "Hilda Mayer", "Age": 21, "About": "x", "Gender": "female"
        }))
        .unwrap();
        assert_eq!(dto.id, 1);
        assert_eq!(dto.name, "Hilda Mayer");
        assert_eq!(dto.gender, "female");
    }

    #[test]
    fn error_body_uses_capitalized_key() {
        let body = ErrorResponseDto {
            error: "ErrorBadOrderField".into(),
        };
        assert_eq!(
            serde_json::to_string(&body).unwrap(),
            r#"{"Error":"ErrorBadOrderField"}"#
        );
    }
}
