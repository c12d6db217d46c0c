//! HTTP surface for the todo service.
//!
//! # Overview
//! Every handler turns its request into one command on a shared
//! [`TodoHandle`], waits for the reply and maps it to a response. The
//! handlers never see the item store itself.
//!
//! # Routes
//! | Method | Path | Success |
//! |---|---|---|
//! | POST | `/todoapp/item/` | 201 + created item |
//! | GET | `/todoapp/item/{index}` | 200 + item |
//! | PUT | `/todoapp/item/{index}` | 200 + confirmation string |
//! | DELETE | `/todoapp/item/{index}` | 200 + confirmation string |
//! | GET | `/todoapp/items/` | 200 + all items |
//!
//! Everything after `/todoapp/item/` is the index, slashes included. If it
//! is not a base-10 integer the request is rejected with 400 before any
//! command is sent.

pub mod config;
pub mod error;

use std::future::Future;

use axum::{
    body::Bytes,
    extract::{FromRequestParts, Path, State},
    http::{request::Parts, StatusCode},
    routing::{get, post},
    Json, Router,
};
use tokio::net::TcpListener;
use todo_core::{CreateItem, Dispatcher, DispatcherConfig, ItemStore, TodoHandle, TodoItem};

pub use config::ServerConfig;
pub use error::ApiError;

pub const ROOT_MESSAGE: &str = "Server Successfully launched";
pub const MARKED_COMPLETE: &str = "Item Successfully marked as completed";
pub const DELETED: &str = "Item successfully deleted";

/// Build the router around an existing dispatcher handle.
pub fn router(handle: TodoHandle) -> Router {
    Router::new()
        .route("/", get(root))
        .route(
            "/todoapp/item/",
            post(create_item)
                .get(missing_index)
                .put(missing_index)
                .delete(missing_index),
        )
        .route(
            "/todoapp/item/{*index}",
            get(get_item)
                .put(mark_complete)
                .delete(delete_item)
                .post(post_with_index),
        )
        .route("/todoapp/items/", get(list_items))
        .with_state(handle)
}

/// Router over a fresh, empty store. The dispatcher lives as long as the
/// router does. Must be called from within a tokio runtime.
pub fn app() -> Router {
    let dispatcher = Dispatcher::spawn(ItemStore::new(), DispatcherConfig::default());
    router(dispatcher.handle())
}

/// Serve [`app`] on `listener` until the process ends.
pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

/// Serve with `config` until `shutdown` resolves, then stop the dispatcher
/// and return the final store.
pub async fn serve(
    listener: TcpListener,
    config: &ServerConfig,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> anyhow::Result<ItemStore> {
    let dispatcher = Dispatcher::spawn(config.initial_store(), config.dispatcher_config());
    axum::serve(listener, router(dispatcher.handle()))
        .with_graceful_shutdown(shutdown)
        .await?;
    tracing::info!("http server stopped, shutting down dispatcher");
    Ok(dispatcher.shutdown().await?)
}

fn parse_index(raw: &str) -> Result<i64, ApiError> {
    raw.parse().map_err(|_| {
        tracing::debug!(raw, "rejecting non-integer index");
        ApiError::invalid_parameter()
    })
}

/// The positional index from the remainder of an item path.
///
/// A segment that cannot even be decoded (bad percent-encoding, invalid
/// UTF-8) is reported the same way as one that is not an integer.
pub struct ItemIndex(pub i64);

impl<S: Send + Sync> FromRequestParts<S> for ItemIndex {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| {
                tracing::debug!(%rejection, "undecodable index segment");
                ApiError::invalid_parameter()
            })?;
        parse_index(&raw).map(Self)
    }
}

async fn root() -> &'static str {
    ROOT_MESSAGE
}

async fn create_item(
    State(handle): State<TodoHandle>,
    body: Bytes,
) -> Result<(StatusCode, Json<TodoItem>), ApiError> {
    // An unreadable body counts as a missing name and fails validation.
    let input: CreateItem = serde_json::from_slice(&body).unwrap_or_else(|err| {
        tracing::debug!(error = %err, "create body is not a valid item");
        CreateItem::default()
    });
    handle
        .create(input.name.clone())
        .await
        .map_err(|e| ApiError::from_dispatch(e, StatusCode::INTERNAL_SERVER_ERROR))?;
    Ok((StatusCode::CREATED, Json(TodoItem::new(input.name))))
}

async fn get_item(
    State(handle): State<TodoHandle>,
    ItemIndex(index): ItemIndex,
) -> Result<Json<TodoItem>, ApiError> {
    handle
        .get(index)
        .await
        .map(Json)
        .map_err(|e| ApiError::from_dispatch(e, StatusCode::NOT_FOUND))
}

async fn list_items(State(handle): State<TodoHandle>) -> Result<Json<Vec<TodoItem>>, ApiError> {
    handle
        .get_all()
        .await
        .map(Json)
        .map_err(|e| ApiError::from_dispatch(e, StatusCode::INTERNAL_SERVER_ERROR))
}

async fn mark_complete(
    State(handle): State<TodoHandle>,
    ItemIndex(index): ItemIndex,
) -> Result<Json<&'static str>, ApiError> {
    handle
        .mark_complete(index)
        .await
        .map_err(|e| ApiError::from_dispatch(e, StatusCode::INTERNAL_SERVER_ERROR))?;
    Ok(Json(MARKED_COMPLETE))
}

async fn delete_item(
    State(handle): State<TodoHandle>,
    ItemIndex(index): ItemIndex,
) -> Result<Json<&'static str>, ApiError> {
    handle
        .delete(index)
        .await
        .map_err(|e| ApiError::from_dispatch(e, StatusCode::INTERNAL_SERVER_ERROR))?;
    Ok(Json(DELETED))
}

/// GET/PUT/DELETE on `/todoapp/item/` with no index: the empty segment is
/// not an integer.
async fn missing_index() -> ApiError {
    ApiError::invalid_parameter()
}

/// POST is only valid on the collection path. The index is still checked
/// first so a malformed one reports the same 400 as the other methods.
async fn post_with_index(ItemIndex(_): ItemIndex) -> ApiError {
    ApiError::new(StatusCode::METHOD_NOT_ALLOWED, "method not allowed")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_index_accepts_signed_integers() {
        assert_eq!(parse_index("0"), Ok(0));
        assert_eq!(parse_index("42"), Ok(42));
        assert_eq!(parse_index("-1"), Ok(-1));
        assert_eq!(parse_index("+3"), Ok(3));
    }

    #[test]
    fn parse_index_rejects_non_integers() {
        for raw in ["abc", "", "1.5", " 1", "0x10", "99999999999999999999"] {
            assert_eq!(parse_index(raw), Err(ApiError::invalid_parameter()), "{raw:?}");
        }
    }
}
