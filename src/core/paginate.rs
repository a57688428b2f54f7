use serde_json::Value;
use tracing::debug;

use crate::core::api::{Query, ResourceClient};
use crate::core::error::AzaError;
use crate::core::shape::Payload;

/// Largest page size the service accepts.
pub const MAX_PAGE_SIZE: u32 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.to_ascii_lowercase().as_str() {
            "asc" => Some(SortOrder::Asc),
            "desc" => Some(SortOrder::Desc),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }
}

/// Collection query options shared by every page request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageRequest {
    pub limit: Option<u32>,
    pub order: Option<SortOrder>,
    pub after: Option<String>,
    pub before: Option<String>,
}

impl PageRequest {
    pub fn page_size(&self) -> Option<u32> {
        self.limit.map(|l| l.clamp(1, MAX_PAGE_SIZE))
    }

    /// Query for one page, starting after `cursor`.
    pub fn query(&self, cursor: Option<&str>) -> Query {
        let mut query = Query::new();
        if let Some(limit) = self.page_size() {
            query.insert("limit".to_string(), limit.to_string());
        }
        if let Some(order) = self.order {
            query.insert("order".to_string(), order.as_str().to_string());
        }
        if let Some(cursor) = cursor {
            query.insert("after".to_string(), cursor.to_string());
        }
        if let Some(before) = &self.before {
            query.insert("before".to_string(), before.clone());
        }
        query
    }
}

/// One server response to a collection query.
#[derive(Debug, Clone, PartialEq)]
pub struct ListPage {
    pub items: Vec<Value>,
    pub has_more: bool,
    pub cursor: Option<String>,
}

impl ListPage {
    pub fn from_payload(payload: Value, plural_key: Option<&str>) -> Self {
        Self::from_classified(Payload::classify(payload, plural_key))
    }

    pub fn from_classified(payload: Payload) -> Self {
        let (has_more, last_id) = match payload.meta() {
            Some(meta) => (
                meta.get("has_more").and_then(Value::as_bool).unwrap_or(false),
                meta.get("last_id")
                    .and_then(Value::as_str)
                    .filter(|s| !s.is_empty())
                    .map(str::to_string),
            ),
            None => (false, None),
        };
        let items = payload.into_items();
        let cursor = last_id.or_else(|| {
            items
                .last()
                .and_then(|item| item.get("id"))
                .and_then(Value::as_str)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
        });
        Self {
            items,
            has_more,
            cursor,
        }
    }
}

/// Fetch exactly one page of a collection.
pub async fn fetch_page(
    client: &dyn ResourceClient,
    path: &str,
    request: &PageRequest,
) -> Result<Value, AzaError> {
    client
        .fetch(path, &request.query(request.after.as_deref()))
        .await
}

/// A first page that is neither a collection nor empty.
fn is_unrecognised(payload: &Payload) -> bool {
    match payload {
        Payload::Single(_) => true,
        Payload::Scalar(value) => !value.is_null(),
        _ => false,
    }
}

/// Walk every page of `path` and return all items in server order as
/// `Payload::List`.
///
/// When the first page is not a collection (a bare object or a text body) the
/// walk stops and that classified payload is returned unchanged. A failed page
/// request aborts the walk; a partial listing is never returned.
pub async fn collect_all(
    client: &dyn ResourceClient,
    path: &str,
    plural_key: Option<&str>,
    request: &PageRequest,
) -> Result<Payload, AzaError> {
    let mut items = Vec::new();
    let mut cursor = request.after.clone();
    let mut pages = 0usize;

    loop {
        let payload = client.fetch(path, &request.query(cursor.as_deref())).await?;
        let payload = Payload::classify(payload, plural_key);
        if pages == 0 && is_unrecognised(&payload) {
            debug!("{}: first page is not a collection", path);
            return Ok(payload);
        }
        let page = ListPage::from_classified(payload);
        pages += 1;
        debug!(
            "{}: page {} returned {} items (has_more={})",
            path,
            pages,
            page.items.len(),
            page.has_more
        );
        items.extend(page.items);

        if !page.has_more {
            break;
        }
        match page.cursor {
            Some(next) if cursor.as_deref() != Some(next.as_str()) => cursor = Some(next),
            Some(_) => {
                debug!("{}: cursor did not advance, stopping", path);
                break;
            }
            None => {
                debug!("{}: has_more without a cursor, stopping", path);
                break;
            }
        }
    }
    Ok(Payload::List(items))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::api::mock::MockClient;
    use serde_json::json;

    fn ids(items: &[Value]) -> Vec<&str> {
        items
            .iter()
            .map(|i| i.get("id").and_then(Value::as_str).unwrap_or("?"))
            .collect()
    }

    #[test]
    fn page_size_is_clamped() {
        let req = PageRequest {
            limit: Some(500),
            ..Default::default()
        };
        assert_eq!(req.page_size(), Some(MAX_PAGE_SIZE));
        let req = PageRequest {
            limit: Some(0),
            ..Default::default()
        };
        assert_eq!(req.page_size(), Some(1));
        assert_eq!(PageRequest::default().page_size(), None);
    }

    #[test]
    fn list_page_prefers_last_id_over_item_id() {
        let page = ListPage::from_payload(
            json!({"data": [{"id": "a"}, {"id": "b"}], "has_more": true, "last_id": "cursor_b"}),
            None,
        );
        assert!(page.has_more);
        assert_eq!(page.cursor.as_deref(), Some("cursor_b"));

        let page = ListPage::from_payload(json!({"data": [{"id": "a"}], "has_more": true}), None);
        assert_eq!(page.cursor.as_deref(), Some("a"));
    }

    #[test]
    fn bare_list_has_no_more_pages() {
        let page = ListPage::from_payload(json!([{"id": "a"}]), Some("threads"));
        assert!(!page.has_more);
        assert_eq!(page.items.len(), 1);
    }

    #[tokio::test]
    async fn collects_every_page_in_order() {
        let client = MockClient::new()
            .route(
                "assistants",
                None,
                json!({"data": [{"id": "a"}, {"id": "b"}], "has_more": true, "last_id": "b"}),
            )
            .route(
                "assistants",
                Some("b"),
                json!({"data": [{"id": "c"}], "has_more": true}),
            )
            .route(
                "assistants",
                Some("c"),
                json!({"data": [{"id": "d"}, {"id": "e"}], "has_more": false, "last_id": "e"}),
            );
        let req = PageRequest {
            limit: Some(2),
            order: Some(SortOrder::Asc),
            ..Default::default()
        };

        let items = collect_all(&client, "assistants", Some("assistants"), &req)
            .await
            .unwrap()
            .into_items();
        assert_eq!(ids(&items), vec!["a", "b", "c", "d", "e"]);

        let requests = client.requests();
        assert_eq!(requests.len(), 3);
        let cursors: Vec<Option<&str>> = requests
            .iter()
            .map(|(_, q)| q.get("after").map(String::as_str))
            .collect();
        assert_eq!(cursors, vec![None, Some("b"), Some("c")]);
        for (path, query) in &requests {
            assert_eq!(path, "assistants");
            assert_eq!(query.get("limit").map(String::as_str), Some("2"));
            assert_eq!(query.get("order").map(String::as_str), Some("asc"));
        }
    }

    #[tokio::test]
    async fn stops_when_has_more_but_no_cursor() {
        let client = MockClient::new().route(
            "threads",
            None,
            json!({"data": [], "has_more": true}),
        );
        let items = collect_all(&client, "threads", Some("threads"), &PageRequest::default())
            .await
            .unwrap()
            .into_items();
        assert!(items.is_empty());
        assert_eq!(client.requests().len(), 1);
    }

    #[tokio::test]
    async fn stops_when_cursor_repeats() {
        let client = MockClient::new()
            .route(
                "files",
                None,
                json!({"data": [{"id": "f1"}], "has_more": true, "last_id": "f1"}),
            )
            .route(
                "files",
                Some("f1"),
                json!({"data": [{"id": "f2"}], "has_more": true, "last_id": "f1"}),
            );
        let items = collect_all(&client, "files", Some("files"), &PageRequest::default())
            .await
            .unwrap()
            .into_items();
        assert_eq!(ids(&items), vec!["f1", "f2"]);
        assert_eq!(client.requests().len(), 2);
    }

    #[tokio::test]
    async fn starts_from_the_requested_after_cursor() {
        let client = MockClient::new().route(
            "threads",
            Some("thread_5"),
            json!({"data": [{"id": "thread_6"}], "has_more": false}),
        );
        let req = PageRequest {
            after: Some("thread_5".to_string()),
            before: Some("thread_9".to_string()),
            ..Default::default()
        };
        let items = collect_all(&client, "threads", None, &req)
            .await
            .unwrap()
            .into_items();
        assert_eq!(ids(&items), vec!["thread_6"]);
        let requests = client.requests();
        assert_eq!(
            requests[0].1.get("before").map(String::as_str),
            Some("thread_9")
        );
    }

    #[tokio::test]
    async fn non_collection_first_page_is_returned_as_is() {
        let client = MockClient::new()
            .route("vector_stores", None, json!({"id": "vs_1", "name": "docs"}))
            .route("threads", None, json!("upstream said no"));

        let out = collect_all(&client, "vector_stores", Some("vector_stores"), &PageRequest::default())
            .await
            .unwrap();
        assert!(matches!(out, Payload::Single(ref map) if map.get("id") == Some(&json!("vs_1"))));

        let out = collect_all(&client, "threads", Some("threads"), &PageRequest::default())
            .await
            .unwrap();
        assert_eq!(out, Payload::Scalar(json!("upstream said no")));
        assert_eq!(client.requests().len(), 2);
    }

    #[tokio::test]
    async fn null_first_page_is_an_empty_listing() {
        let client = MockClient::new().route("files", None, Value::Null);
        let out = collect_all(&client, "files", Some("files"), &PageRequest::default())
            .await
            .unwrap();
        assert_eq!(out, Payload::List(Vec::new()));
    }

    #[tokio::test]
    async fn page_failure_aborts_the_walk() {
        let client = MockClient::new()
            .route(
                "vector_stores",
                None,
                json!({"data": [{"id": "vs_1"}], "has_more": true}),
            )
            .fail("vector_stores", Some("vs_1"), 503);
        let err = collect_all(&client, "vector_stores", None, &PageRequest::default())
            .await
            .unwrap_err();
        assert_eq!(err.status(), Some(503));
    }

    #[tokio::test]
    async fn fetch_page_issues_a_single_request() {
        let client = MockClient::new().route(
            "files",
            None,
            json!({"data": [{"id": "f1"}], "has_more": true, "last_id": "f1"}),
        );
        let body = fetch_page(&client, "files", &PageRequest::default())
            .await
            .unwrap();
        assert_eq!(body["last_id"], json!("f1"));
        assert_eq!(client.requests().len(), 1);
    }
}
