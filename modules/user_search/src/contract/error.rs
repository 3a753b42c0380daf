use std::fmt;

use thiserror::Error;

/// Error codes the search endpoint puts in a 400 response body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchErrorCode {
    BadQueryParams,
    BadOrderField,
    BadOrderBy,
    BadLimit,
    BadOffset,
}

impl SearchErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::BadQueryParams => "ErrorBadQueryParams",
            Self::BadOrderField => "ErrorBadOrderField",
            Self::BadOrderBy => "ErrorBadOrderBy",
            Self::BadLimit => "ErrorBadLimit",
            Self::BadOffset => "ErrorBadOffset",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "ErrorBadQueryParams" => Some(Self::BadQueryParams),
            "ErrorBadOrderField" => Some(Self::BadOrderField),
            "ErrorBadOrderBy" => Some(Self::BadOrderBy),
            "ErrorBadLimit" => Some(Self::BadLimit),
            "ErrorBadOffset" => Some(Self::BadOffset),
            _ => None,
        }
    }
}

impl fmt::Display for SearchErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors surfaced to callers of the search client. Nothing is retried.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SearchClientError {
    #[error("limit must be > 0")]
    InvalidLimit { limit: i64 },

    #[error("offset must be > 0")]
    InvalidOffset { offset: i64 },

    #[error("timeout for {params}")]
    Timeout { params: String },

    #[error("unknown error {message}")]
    Transport { message: String },

    #[error("Bad AccessToken")]
    BadAccessToken,

    #[error("SearchServer fatal error")]
    ServerFatal,

    #[error("OrderField {field} invalid")]
    BadOrderField { field: String },

    #[error("unknown bad request error: {code}")]
    UnknownBadRequest { code: String },

    #[error("cant unpack error json: {message}")]
    UnpackError { message: String },

    #[error("cant unpack result json: {message}")]
    UnpackResult { message: String },

    #[error("invalid client configuration: {message}")]
    Config { message: String },
}

impl SearchClientError {
    /// Map a 400 error code. Only the order field is attributable to a caller
    /// input, everything else is reported with its raw code.
    pub fn from_bad_request(code: &str, order_field: &str) -> Self {
        match SearchErrorCode::parse(code) {
            Some(SearchErrorCode::BadOrderField) => Self::BadOrderField {
                field: order_field.to_string(),
            },
            _ => Self::UnknownBadRequest {
                code: code.to_string(),
            },
        }
    }

    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }
}
