use url::form_urlencoded;

use crate::contract::error::SearchErrorCode;
use crate::contract::model::{OrderBy, OrderField};

/// Raw query-string pairs in arrival order. Lookups return the first value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    pairs: Vec<(String, String)>,
}

impl QueryParams {
    /// Decode a raw (still percent-encoded) query string.
    pub fn parse(raw: &str) -> Self {
        Self {
            pairs: form_urlencoded::parse(raw.as_bytes())
                .into_owned()
                .collect(),
        }
    }

    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            pairs: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// First value for `key`, or "" when absent.
    pub fn get(&self, key: &str) -> &str {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
            .unwrap_or("")
    }
}

/// A validated search request.
///
/// `limit` is only required to be an integer: zero and negative values pass
/// validation and produce an empty window in the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    pub limit: i64,
    pub offset: i64,
    pub substring: String,
    pub order_field: OrderField,
    pub order_by: OrderBy,
}

impl SearchQuery {
    /// Validate in fixed precedence: empty set, order field, order by, limit,
    /// offset. The first failure wins.
    pub fn from_params(params: &QueryParams) -> Result<Self, SearchErrorCode> {
        if params.is_empty() {
            return Err(SearchErrorCode::BadQueryParams);
        }

        let order_field =
            OrderField::parse(params.get("order_field")).ok_or(SearchErrorCode::BadOrderField)?;

        let order_by = params
            .get("order_by")
            .parse::<i64>()
            .ok()
            .and_then(OrderBy::from_i64)
            .ok_or(SearchErrorCode::BadOrderBy)?;

        let limit = params
            .get("limit")
            .parse::<i64>()
            .map_err(|_| SearchErrorCode::BadLimit)?;

        let offset = params
            .get("offset")
            .parse::<i64>()
            .ok()
            .filter(|o| *o >= 0)
            .ok_or(SearchErrorCode::BadOffset)?;

        Ok(Self {
            limit,
            offset,
            substring: params.get("query").to_string(),
            order_field,
            order_by,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid() -> Vec<(String, String)> {
        [
            ("query", "dolor"),
            ("order_field", "Id"),
            ("order_by", "-1"),
            ("limit", "10"),
            ("offset", "0"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
    }

    fn with(key: &str, value: &str) -> QueryParams {
        let mut pairs = valid();
        pairs.retain(|(k, _)| k != key);
        pairs.push((key.to_string(), value.to_string()));
        QueryParams::from_pairs(pairs)
    }

    #[test]
    fn parses_a_valid_query() {
        let q = SearchQuery::from_params(&QueryParams::from_pairs(valid())).unwrap();
        assert_eq!(
            q,
            SearchQuery {
                limit: 10,
                offset: 0,
                substring: "dolor".into(),
                order_field: OrderField::Id,
                order_by: OrderBy::Desc,
            }
        );
    }

    #[test]
    fn empty_parameter_set_is_rejected_first() {
        assert_eq!(
            SearchQuery::from_params(&QueryParams::default()),
            Err(SearchErrorCode::BadQueryParams)
        );
        assert_eq!(
            SearchQuery::from_params(&QueryParams::parse("")),
            Err(SearchErrorCode::BadQueryParams)
        );
    }

    #[test]
    fn order_field_must_be_known() {
        assert_eq!(
            SearchQuery::from_params(&with("order_field", "Bogus")),
            Err(SearchErrorCode::BadOrderField)
        );
        assert_eq!(
            SearchQuery::from_params(&with("order_field", "id")),
            Err(SearchErrorCode::BadOrderField)
        );
        // empty and missing both mean "unset"
        let q = SearchQuery::from_params(&with("order_field", "")).unwrap();
        assert_eq!(q.order_field, OrderField::Unset);
    }

    #[test]
    fn order_by_must_be_in_range() {
        for bad in ["2", "-2", "", "asc", "1.0"] {
            assert_eq!(
                SearchQuery::from_params(&with("order_by", bad)),
                Err(SearchErrorCode::BadOrderBy),
                "order_by={bad:?}"
            );
        }
        assert_eq!(
            SearchQuery::from_params(&with("order_by", "0")).unwrap().order_by,
            OrderBy::AsIs
        );
    }

    #[test]
    fn limit_only_needs_to_parse() {
        assert_eq!(
            SearchQuery::from_params(&with("limit", "ten")),
            Err(SearchErrorCode::BadLimit)
        );
        assert_eq!(
            SearchQuery::from_params(&with("limit", "")),
            Err(SearchErrorCode::BadLimit)
        );
        assert_eq!(
            SearchQuery::from_params(&with("limit", "-5")).unwrap().limit,
            -5
        );
        assert_eq!(SearchQuery::from_params(&with("limit", "0")).unwrap().limit, 0);
    }

    #[test]
    fn offset_must_be_non_negative() {
        assert_eq!(
            SearchQuery::from_params(&with("offset", "-1")),
            Err(SearchErrorCode::BadOffset)
        );
        assert_eq!(
            SearchQuery::from_params(&with("offset", "x")),
            Err(SearchErrorCode::BadOffset)
        );
    }

    #[test]
    fn earlier_failures_suppress_later_ones() {
        let params = QueryParams::from_pairs([
            ("order_field", "Bogus"),
            ("order_by", "7"),
            ("limit", "x"),
            ("offset", "-1"),
        ]);
        assert_eq!(
            SearchQuery::from_params(&params),
            Err(SearchErrorCode::BadOrderField)
        );

        let params = QueryParams::from_pairs([("order_by", "7"), ("limit", "x")]);
        assert_eq!(
            SearchQuery::from_params(&params),
            Err(SearchErrorCode::BadOrderBy)
        );

        let params = QueryParams::from_pairs([("order_by", "1"), ("limit", "x"), ("offset", "-1")]);
        assert_eq!(
            SearchQuery::from_params(&params),
            Err(SearchErrorCode::BadLimit)
        );
    }

    #[test]
    fn unrelated_parameter_makes_the_set_non_empty() {
        let params = QueryParams::parse("foo=bar");
        assert_eq!(
            SearchQuery::from_params(&params),
            Err(SearchErrorCode::BadOrderBy)
        );
    }

    #[test]
    fn raw_query_is_percent_decoded_and_first_value_wins() {
        let params = QueryParams::parse(
            "query=Hilda+Mayer&query=ignored&order_by=1&limit=3&offset=0&order_field=Name",
        );
        let q = SearchQuery::from_params(&params).unwrap();
        assert_eq!(q.substring, "Hilda Mayer");
        assert_eq!(q.order_by, OrderBy::Asc);
        assert_eq!(q.order_field, OrderField::Name);
    }
}
