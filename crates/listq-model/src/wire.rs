use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{FetchError, ListPage};

/// Pagination block as reported by the list endpoint. Any field may be absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerPagination {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_page: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_items: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_pages: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_next_page: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_prev_page: Option<bool>,
}

/// Response body of the list endpoint.
///
/// `data` is kept as raw JSON because the key holding the items differs per
/// resource (`logs`, `users`, ...).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListEnvelope {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl ListEnvelope {
    /// Extracts the page stored under `data.<items_key>`.
    ///
    /// A missing or null items array is an empty page; a missing pagination
    /// block is `None`. `success: false` becomes [`FetchError::Rejected`].
    pub fn into_page<T: DeserializeOwned>(self, items_key: &str) -> Result<ListPage<T>, FetchError> {
        if !self.success {
            return Err(FetchError::Rejected(self.message));
        }
        let mut data = match self.data {
            Some(Value::Object(map)) => map,
            Some(Value::Null) | None => return Ok(ListPage::new(Vec::new())),
            Some(other) => {
                return Err(FetchError::Decode(format!(
                    "expected `data` to be an object, got {}",
                    kind_of(&other)
                )));
            }
        };

        let items = match data.remove(items_key) {
            Some(Value::Null) | None => Vec::new(),
            Some(raw) => serde_json::from_value(raw)
                .map_err(|e| FetchError::Decode(format!("`data.{items_key}`: {e}")))?,
        };
        let pagination = match data.remove("pagination") {
            Some(Value::Null) | None => None,
            Some(raw) => Some(
                serde_json::from_value(raw)
                    .map_err(|e| FetchError::Decode(format!("`data.pagination`: {e}")))?,
            ),
        };

        Ok(ListPage { items, pagination })
    }
}

fn kind_of(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Row {
        id: u32,
    }

    fn envelope(v: Value) -> ListEnvelope {
        serde_json::from_value(v).unwrap()
    }

    #[test]
    fn extracts_items_and_pagination() {
        let env = envelope(json!({
            "success": true,
            "data": {
                "logs": [{"id": 1}, {"id": 2}],
                "pagination": {
                    "currentPage": 1, "limit": 10, "totalItems": 2,
                    "totalPages": 1, "hasNextPage": false, "hasPrevPage": false
                }
            }
        }));

        let page: ListPage<Row> = env.into_page("logs").unwrap();
        assert_eq!(page.items, vec![Row { id: 1 }, Row { id: 2 }]);

        let p = page.pagination.unwrap();
        assert_eq!(p.total_items, Some(2));
        assert_eq!(p.has_next_page, Some(false));
    }

    #[test]
    fn success_false_is_rejected() {
        let env = envelope(json!({"success": false, "message": "forbidden"}));
        let err = env.into_page::<Row>("logs").unwrap_err();
        assert_eq!(err, FetchError::Rejected(Some("forbidden".into())));
    }

    #[test]
    fn missing_items_key_is_empty_page() {
        let env = envelope(json!({"success": true, "data": {"pagination": {"totalItems": 0}}}));
        let page: ListPage<Row> = env.into_page("users").unwrap();
        assert!(page.items.is_empty());
        assert_eq!(page.pagination.unwrap().total_items, Some(0));
    }

    #[test]
    fn partial_pagination_block() {
        let env = envelope(json!({"success": true, "data": {"users": [], "pagination": {"limit": 5}}}));
        let page: ListPage<Row> = env.into_page("users").unwrap();
        let p = page.pagination.unwrap();
        assert_eq!(p.limit, Some(5));
        assert_eq!(p.current_page, None);
    }

    #[test]
    fn malformed_items_is_decode_error() {
        let env = envelope(json!({"success": true, "data": {"logs": "nope"}}));
        let err = env.into_page::<Row>("logs").unwrap_err();
        assert!(matches!(err, FetchError::Decode(_)));
    }

    #[test]
    fn non_object_data_is_decode_error() {
        let env = envelope(json!({"success": true, "data": [1, 2]}));
        let err = env.into_page::<Row>("logs").unwrap_err();
        assert!(matches!(err, FetchError::Decode(msg) if msg.contains("an array")));
    }
}
