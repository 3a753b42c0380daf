use serde::{Deserialize, Serialize};

/// `modules.user_search` section of the application config.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct UserSearchConfig {
    /// Dataset file; relative paths resolve against the server home dir.
    #[serde(default = "default_dataset_path")]
    pub dataset_path: String,
    /// When set, requests must carry this value in the `AccessToken` header.
    #[serde(default)]
    pub access_token: Option<String>,
    /// Reuse the parsed dataset while the file is unchanged.
    #[serde(default)]
    pub cache_dataset: bool,
    #[serde(default = "default_route")]
    pub route: String,
}

fn default_dataset_path() -> String {
    "dataset.json".to_string()
}

fn default_route() -> String {
    "/".to_string()
}

impl Default for UserSearchConfig {
    fn default() -> Self {
        Self {
            dataset_path: default_dataset_path(),
            access_token: None,
            cache_dataset: false,
            route: default_route(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn empty_section_uses_defaults() {
        let cfg: UserSearchConfig = serde_json::from_value(json!({})).unwrap();
        assert_eq!(cfg, UserSearchConfig::default());
        assert_eq!(cfg.route, "/");
        assert_eq!(cfg.dataset_path, "dataset.json");
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let res: Result<UserSearchConfig, _> =
            serde_json::from_value(json!({"dataset": "x.json"}));
        assert!(res.is_err());
    }

    #[test]
    fn partial_section_keeps_other_defaults() {
        let cfg: UserSearchConfig =
            serde_json::from_value(json!({"access_token": "secret", "cache_dataset": true}))
                .unwrap();
        assert_eq!(cfg.access_token.as_deref(), Some("secret"));
        assert!(cfg.cache_dataset);
        assert_eq!(cfg.route, "/");
    }
}
