use std::fmt;

use url::form_urlencoded;

use crate::contract::error::SearchClientError;

/// Largest page a caller may ask for; bigger limits are clamped.
pub const MAX_PAGE_SIZE: i64 = 25;

/// Header carrying the opaque access token from client to server.
pub const ACCESS_TOKEN_HEADER: &str = "AccessToken";

/// A dataset record as held by the record store (immutable).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRecord {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub age: i64,
    pub about: String,
    pub gender: String,
}

impl UserRecord {
    /// Display name, derived on every read.
    pub fn name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Pure user model returned to search callers (no serde)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub age: i64,
    pub about: String,
    pub gender: String,
}

impl From<&UserRecord> for User {
    fn from(r: &UserRecord) -> Self {
        Self {
            id: r.id,
            name: r.name(),
            age: r.age,
            about: r.about.clone(),
            gender: r.gender.clone(),
        }
    }
}

/// Record attribute used as the primary sort key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OrderField {
    /// Empty `order_field`; sorts like `Name`.
    #[default]
    Unset,
    Name,
    Id,
    Age,
}

impl OrderField {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unset => "",
            Self::Name => "Name",
            Self::Id => "Id",
            Self::Age => "Age",
        }
    }

    /// Exact, case-sensitive match against the accepted wire values.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "" => Some(Self::Unset),
            "Name" => Some(Self::Name),
            "Id" => Some(Self::Id),
            "Age" => Some(Self::Age),
            _ => None,
        }
    }
}

impl fmt::Display for OrderField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sort direction, carried on the wire as -1, 0 or 1.
///
/// The wire value multiplies the natural comparison: -1 reverses it (the
/// whole `Name` chain including the id tie-break), 1 keeps it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OrderBy {
    /// -1
    Desc,
    /// 0, keep dataset order.
    #[default]
    AsIs,
    /// 1
    Asc,
}

impl OrderBy {
    pub fn as_i64(&self) -> i64 {
        match self {
            Self::Desc => -1,
            Self::AsIs => 0,
            Self::Asc => 1,
        }
    }

    pub fn from_i64(v: i64) -> Option<Self> {
        match v {
            -1 => Some(Self::Desc),
            0 => Some(Self::AsIs),
            1 => Some(Self::Asc),
            _ => None,
        }
    }
}

/// Caller-facing search request.
///
/// `order_field` stays a plain string so that the server remains the judge of
/// which fields are sortable; an unknown field comes back as
/// [`SearchClientError::BadOrderField`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SearchRequest {
    pub limit: i64,
    pub offset: i64,
    pub query: String,
    pub order_field: String,
    pub order_by: OrderBy,
}

impl SearchRequest {
    /// Local checks, clamp to [`MAX_PAGE_SIZE`], then ask for one extra record
    /// so the response tells whether another page exists.
    pub fn prepare(&self) -> Result<PreparedRequest, SearchClientError> {
        if self.limit < 0 {
            return Err(SearchClientError::InvalidLimit { limit: self.limit });
        }
        if self.offset < 0 {
            return Err(SearchClientError::InvalidOffset {
                offset: self.offset,
            });
        }

        let limit = self.limit.min(MAX_PAGE_SIZE);
        Ok(PreparedRequest {
            fetch_limit: limit + 1,
            offset: self.offset,
            query: self.query.clone(),
            order_field: self.order_field.clone(),
            order_by: self.order_by,
        })
    }
}

/// A request that passed local checks and carries the over-fetched limit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedRequest {
    pub fetch_limit: i64,
    pub offset: i64,
    pub query: String,
    pub order_field: String,
    pub order_by: OrderBy,
}

impl PreparedRequest {
    /// Query parameters in key order.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        vec![
            ("limit", self.fetch_limit.to_string()),
            ("offset", self.offset.to_string()),
            ("order_by", self.order_by.as_i64().to_string()),
            ("order_field", self.order_field.clone()),
            ("query", self.query.clone()),
        ]
    }

    /// `application/x-www-form-urlencoded` form of [`Self::query_pairs`].
    pub fn encoded(&self) -> String {
        let mut ser = form_urlencoded::Serializer::new(String::new());
        for (k, v) in self.query_pairs() {
            ser.append_pair(k, &v);
        }
        ser.finish()
    }
}

/// One page of search results.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SearchResponse {
    pub users: Vec<User>,
    pub next_page: bool,
}

impl SearchResponse {
    /// Build a page from a response fetched with `fetch_limit = limit + 1`.
    /// A full response means another page exists; the extra record is dropped.
    pub fn from_overfetched(mut users: Vec<User>, fetch_limit: i64) -> Self {
        let next_page = i64::try_from(users.len()).is_ok_and(|n| n == fetch_limit);
        if next_page {
            users.pop();
        }
        Self { users, next_page }
    }
}
