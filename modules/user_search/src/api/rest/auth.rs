use axum::http::HeaderMap;

use crate::contract::model::ACCESS_TOKEN_HEADER;

/// Server-side access check on the `AccessToken` header.
///
/// With no configured token every request passes, and the header is ignored.
#[derive(Debug, Clone, Default)]
pub struct AccessPolicy {
    token: Option<String>,
}

impl AccessPolicy {
    pub fn new(token: Option<String>) -> Self {
        Self {
            token: token.filter(|t| !t.is_empty()),
        }
    }

    pub fn allows(&self, headers: &HeaderMap) -> bool {
        let Some(expected) = &self.token else {
            return true;
        };
        headers
            .get(ACCESS_TOKEN_HEADER)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|got| got == expected)
    }
}
