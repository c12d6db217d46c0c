//! Stateless HTTP request builder and response parser for the todo API.
//!
//! # Design
//! `TodoClient` holds only a `base_url` and carries no mutable state between
//! calls. Each operation is split into a `build_*` method that produces an
//! `HttpRequest` and a `parse_*` method that consumes an `HttpResponse`.

use serde::de::DeserializeOwned;

use crate::error::ClientError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{CreateItem, TodoItem};

/// Synchronous, stateless client for the todo API.
#[derive(Debug, Clone)]
pub struct TodoClient {
    base_url: String,
}

impl TodoClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn item_url(&self, index: i64) -> String {
        format!("{}/todoapp/item/{index}", self.base_url)
    }

    pub fn build_list_items(&self) -> HttpRequest {
        HttpRequest::new(
            HttpMethod::Get,
            format!("{}/todoapp/items/", self.base_url),
        )
    }

    pub fn build_get_item(&self, index: i64) -> HttpRequest {
        HttpRequest::new(HttpMethod::Get, self.item_url(index))
    }

    pub fn build_create_item(&self, input: &CreateItem) -> Result<HttpRequest, ClientError> {
        let body =
            serde_json::to_string(input).map_err(|e| ClientError::Serialization(e.to_string()))?;
        Ok(HttpRequest::new(
            HttpMethod::Post,
            format!("{}/todoapp/item/", self.base_url),
        )
        .with_json_body(body))
    }

    pub fn build_mark_complete(&self, index: i64) -> HttpRequest {
        HttpRequest::new(HttpMethod::Put, self.item_url(index))
    }

    pub fn build_delete_item(&self, index: i64) -> HttpRequest {
        HttpRequest::new(HttpMethod::Delete, self.item_url(index))
    }

    pub fn parse_list_items(&self, response: HttpResponse) -> Result<Vec<TodoItem>, ClientError> {
        check_status(&response, 200)?;
        decode(&response.body)
    }

    pub fn parse_get_item(&self, response: HttpResponse) -> Result<TodoItem, ClientError> {
        check_status(&response, 200)?;
        decode(&response.body)
    }

    /// Returns the item echoed back by the server.
    pub fn parse_create_item(&self, response: HttpResponse) -> Result<TodoItem, ClientError> {
        check_status(&response, 201)?;
        decode(&response.body)
    }

    /// Returns the server's confirmation message.
    pub fn parse_mark_complete(&self, response: HttpResponse) -> Result<String, ClientError> {
        check_status(&response, 200)?;
        decode(&response.body)
    }

    /// Returns the server's confirmation message.
    pub fn parse_delete_item(&self, response: HttpResponse) -> Result<String, ClientError> {
        check_status(&response, 200)?;
        decode(&response.body)
    }
}

fn decode<T: DeserializeOwned>(body: &str) -> Result<T, ClientError> {
    serde_json::from_str(body).map_err(|e| ClientError::Deserialization(e.to_string()))
}

/// Map non-success status codes to the appropriate `ClientError` variant.
fn check_status(response: &HttpResponse, expected: u16) -> Result<(), ClientError> {
    match response.status {
        s if s == expected => Ok(()),
        400 => Err(ClientError::InvalidParameter(response.body.clone())),
        404 => Err(ClientError::NotFound),
        503 => Err(ClientError::Unavailable(response.body.clone())),
        status => Err(ClientError::Http {
            status,
            body: response.body.clone(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> TodoClient {
        TodoClient::new("http://localhost:8080")
    }

    #[test]
    fn build_list_items_produces_correct_request() {
        let req = client().build_list_items();
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(req.url, "http://localhost:8080/todoapp/items/");
        assert!(req.body.is_none());
        assert!(req.headers.is_empty());
    }

    #[test]
    fn build_get_item_uses_index() {
        let req = client().build_get_item(3);
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(req.url, "http://localhost:8080/todoapp/item/3");
    }

    #[test]
    fn build_get_item_keeps_negative_index() {
        let req = client().build_get_item(-1);
        assert_eq!(req.url, "http://localhost:8080/todoapp/item/-1");
    }

    #[test]
    fn build_create_item_produces_correct_request() {
        let req = client()
            .build_create_item(&CreateItem::new("Buy milk"))
            .unwrap();
        assert_eq!(req.method, HttpMethod::Post);
        assert_eq!(req.url, "http://localhost:8080/todoapp/item/");
        let body: serde_json::Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(body, serde_json::json!({ "Name": "Buy milk" }));
    }

    #[test]
    fn build_mark_complete_and_delete() {
        let put = client().build_mark_complete(0);
        assert_eq!(put.method, HttpMethod::Put);
        assert_eq!(put.url, "http://localhost:8080/todoapp/item/0");
        assert!(put.body.is_none());

        let delete = client().build_delete_item(2);
        assert_eq!(delete.method, HttpMethod::Delete);
        assert_eq!(delete.url, "http://localhost:8080/todoapp/item/2");
    }

    #[test]
    fn parse_list_items_success() {
        let response = HttpResponse::new(200, r#"[{"Name":"A","Complete":false},{"Name":"B","Complete":true}]"#);
        let items = client().parse_list_items(response).unwrap();
        assert_eq!(items.len(), 2);
        assert!(items[1].complete);
    }

    #[test]
    fn parse_get_item_not_found() {
        let response = HttpResponse::new(404, "item at specified index does not exist");
        let err = client().parse_get_item(response).unwrap_err();
        assert!(matches!(err, ClientError::NotFound));
    }

    #[test]
    fn parse_get_item_bad_index() {
        let response = HttpResponse::new(400, "invalid request parameter type");
        let err = client().parse_get_item(response).unwrap_err();
        assert!(matches!(err, ClientError::InvalidParameter(msg) if msg == "invalid request parameter type"));
    }

    #[test]
    fn parse_create_item_success() {
        let response = HttpResponse::new(201, r#"{"Name":"New","Complete":false}"#);
        let item = client().parse_create_item(response).unwrap();
        assert_eq!(item.name, "New");
    }

    #[test]
    fn parse_create_item_validation_failure() {
        let response = HttpResponse::new(500, "name cannot be empty");
        let err = client().parse_create_item(response).unwrap_err();
        assert!(matches!(err, ClientError::Http { status: 500, ref body } if body == "name cannot be empty"));
    }

    #[test]
    fn parse_mark_complete_returns_message() {
        let response = HttpResponse::new(200, r#""Item Successfully marked as completed""#);
        let msg = client().parse_mark_complete(response).unwrap();
        assert_eq!(msg, "Item Successfully marked as completed");
    }

    #[test]
    fn parse_delete_item_out_of_range_is_500() {
        let response = HttpResponse::new(500, "item at specified index does not exist");
        let err = client().parse_delete_item(response).unwrap_err();
        assert!(matches!(err, ClientError::Http { status: 500, .. }));
    }

    #[test]
    fn parse_unavailable() {
        let response = HttpResponse::new(503, "todo service is unavailable");
        let err = client().parse_list_items(response).unwrap_err();
        assert!(matches!(err, ClientError::Unavailable(_)));
    }

    #[test]
    fn trailing_slash_is_stripped() {
        let client = TodoClient::new("http://localhost:8080/");
        let req = client.build_list_items();
        assert_eq!(req.url, "http://localhost:8080/todoapp/items/");
    }

    #[test]
    fn parse_list_items_bad_json() {
        let response = HttpResponse::new(200, "not json");
        let err = client().parse_list_items(response).unwrap_err();
        assert!(matches!(err, ClientError::Deserialization(_)));
    }
}
