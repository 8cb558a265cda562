//! Query-string builder for the Strapi bracket syntax.
//!
//! Nested parameters are flattened the way the API expects them:
//! `filters[slug][$eq]=hello-world`, `pagination[limit]=12`,
//! `sort=publishedAt:desc`, `populate=*`. Pairs keep insertion order.

use std::fmt;

/// Sort direction for list endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

impl SortDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }
}

/// A sort key such as `publishedAt:desc`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortKey {
    pub field: String,
    pub direction: SortDirection,
}

impl SortKey {
    pub fn new(field: impl Into<String>, direction: SortDirection) -> Self {
        Self {
            field: field.into(),
            direction,
        }
    }

    /// Newest first by publish date.
    pub fn newest_first() -> Self {
        Self::new("publishedAt", SortDirection::Desc)
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.field, self.direction.as_str())
    }
}

/// Ordered list of query parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    pairs: Vec<(String, String)>,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a raw key/value pair.
    pub fn param(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.pairs.push((key.into(), value.to_string()));
        self
    }

    /// Expand every relation (`populate=*`).
    pub fn populate_all(self) -> Self {
        self.param("populate", "*")
    }

    /// Equality filter on a (possibly nested) field path:
    /// `["post", "id"]` becomes `filters[post][id][$eq]`.
    pub fn filter_eq(self, path: &[&str], value: impl ToString) -> Self {
        let mut key = String::from("filters");
        for segment in path {
            key.push('[');
            key.push_str(segment);
            key.push(']');
        }
        key.push_str("[$eq]");
        self.param(key, value)
    }

    /// Cap the number of returned records (`pagination[limit]`).
    pub fn limit(self, limit: u32) -> Self {
        self.param("pagination[limit]", limit)
    }

    pub fn sort(self, key: &SortKey) -> Self {
        self.param("sort", key)
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn pairs(&self) -> &[(String, String)] {
        &self.pairs
    }

    /// Value of the first pair with the given key.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Encoded query string without the leading `?`.
    pub fn to_query_string(&self) -> String {
        self.pairs
            .iter()
            .map(|(k, v)| format!("{}={}", encode_component(k), encode_component(v)))
            .collect::<Vec<_>>()
            .join("&")
    }
}

/// Percent-encode a component, leaving the characters the bracket syntax
/// relies on readable.
fn encode_component(raw: &str) -> String {
    urlencoding::encode(raw)
        .replace("%5B", "[")
        .replace("%5D", "]")
        .replace("%24", "$")
        .replace("%3A", ":")
        .replace("%2C", ",")
        .replace("%2A", "*")
        .replace("%20", "+")
}
