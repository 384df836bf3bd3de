//! Wire shapes for Graph responses.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One page of a paginated Graph collection response.
///
/// Both fields are optional on the wire: a body without a `value`
/// collection contributes zero records, and only a missing
/// `@odata.nextLink` terminates pagination.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct PageBody {
    #[serde(default)]
    pub value: Vec<Value>,
    #[serde(rename = "@odata.nextLink")]
    pub next_link: Option<String>,
}

impl PageBody {
    /// Lenient read: a body that is not a collection envelope is an empty,
    /// final page.
    pub fn from_value(body: &Value) -> Self {
        serde_json::from_value(body.clone()).unwrap_or_default()
    }
}

/// A raw HTTP response, retained by the client for diagnostics.
///
/// The most recent response of a fetch call stays inspectable via
/// [`GraphClient::last_response`](crate::GraphClient::last_response)
/// regardless of whether the call succeeded.
#[derive(Debug, Clone, Serialize)]
pub struct RawResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response body (JSON, or a string when the body was not JSON).
    pub body: Value,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn page_body_reads_value_and_next_link() {
        let page = PageBody::from_value(&json!({
            "value": [{"id": "1"}],
            "@odata.nextLink": "https://graph.microsoft.com/v1.0/users?$skiptoken=x"
        }));
        assert_eq!(page.value.len(), 1);
        assert!(page.next_link.is_some());
    }

    #[test]
    fn missing_value_is_empty_page() {
        let page = PageBody::from_value(&json!({"@odata.nextLink": "next"}));
        assert!(page.value.is_empty());
        assert_eq!(page.next_link.as_deref(), Some("next"));
    }

    #[test]
    fn non_envelope_body_is_final_empty_page() {
        let page = PageBody::from_value(&Value::String("not json object".to_string()));
        assert!(page.value.is_empty());
        assert!(page.next_link.is_none());
    }
}
