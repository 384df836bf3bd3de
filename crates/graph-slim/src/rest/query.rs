//! Query-string resolution.

use std::collections::BTreeMap;

use url::form_urlencoded;

/// A flat query parameter mapping. Keys are unique; order is irrelevant.
pub(crate) type QueryMap = BTreeMap<String, String>;

/// Split a path into its path and query components.
pub(crate) fn split(path: &str) -> (&str, &str) {
    match path.split_once('?') {
        Some((route, query)) => (route, query),
        None => (path, ""),
    }
}

/// Decode the query-string component embedded in a path.
///
/// Standard `www-form-urlencoded` semantics: `+` and `%XX` escapes are
/// resolved, repeated keys collapse to last-wins. A path without a query
/// component yields an empty mapping.
pub(crate) fn resolve(path: &str) -> QueryMap {
    let (_, query) = split(path);
    form_urlencoded::parse(query.as_bytes())
        .into_owned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_path_and_query() {
        assert_eq!(split("/v1.0/users?$top=5"), ("/v1.0/users", "$top=5"));
        assert_eq!(split("/v1.0/users"), ("/v1.0/users", ""));
    }

    #[test]
    fn resolves_embedded_parameters() {
        let params = resolve("/v1.0/users?$top=5&$select=id");
        assert_eq!(params.get("$top").map(String::as_str), Some("5"));
        assert_eq!(params.get("$select").map(String::as_str), Some("id"));
    }

    #[test]
    fn path_without_query_yields_empty_map() {
        assert!(resolve("/v1.0/users").is_empty());
    }

    #[test]
    fn decodes_form_escapes() {
        let params = resolve("/users?$filter=displayName+eq+%27Alice%27");
        assert_eq!(
            params.get("$filter").map(String::as_str),
            Some("displayName eq 'Alice'")
        );
    }

    #[test]
    fn repeated_keys_collapse_last_wins() {
        let params = resolve("/users?page=1&page=2");
        assert_eq!(params.get("page").map(String::as_str), Some("2"));
    }
}
