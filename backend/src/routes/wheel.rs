use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get, post},
    Json, Router,
};
use serde::Serialize;
use shared::constants::{
    WHEEL_ITEMS_ENDPOINT, WHEEL_ITEM_ENDPOINT, WHEEL_SEGMENTS_ENDPOINT, WHEEL_SPIN_ENDPOINT,
};
use shared::items::AddItemRequest;
use shared::{build, Item, Segment, SpinResult};
use tracing::info;

use crate::error::Error;
use crate::identity::UserId;
use crate::AppState;

pub fn create_router() -> Router<AppState> {
    Router::new()
        .route(WHEEL_ITEMS_ENDPOINT, get(list_items).post(add_item))
        .route(WHEEL_ITEM_ENDPOINT, delete(remove_item))
        .route(WHEEL_SEGMENTS_ENDPOINT, get(get_segments))
        .route(WHEEL_SPIN_ENDPOINT, get(spin_status).post(spin_wheel))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpinStatus {
    pub is_animating: bool,
}

async fn list_items(
    State(state): State<AppState>,
    UserId(user_id): UserId,
) -> Result<Json<Vec<Item>>, Error> {
    Ok(Json(state.store.list_user_items(user_id).await?))
}

async fn add_item(
    State(state): State<AppState>,
    UserId(user_id): UserId,
    Json(request): Json<AddItemRequest>,
) -> Result<(StatusCode, Json<Item>), Error> {
    let item = state
        .store
        .add_item(user_id, &request.label, request.source)
        .await?;
    info!("🍽️ User {} added '{}' ({})", user_id, item.label, item.source);
    Ok((StatusCode::CREATED, Json(item)))
}

async fn remove_item(
    State(state): State<AppState>,
    UserId(user_id): UserId,
    Path(item_id): Path<i64>,
) -> Result<StatusCode, Error> {
    state.store.remove_user_item(user_id, item_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn get_segments(
    State(state): State<AppState>,
    UserId(user_id): UserId,
) -> Result<Json<Vec<Segment>>, Error> {
    let items = state.store.list_user_items(user_id).await?;
    Ok(Json(build(&items)))
}

async fn spin_wheel(
    State(state): State<AppState>,
    UserId(user_id): UserId,
) -> Result<Json<SpinResult>, Error> {
    let items = state.store.list_user_items(user_id).await?;
    let result = state
        .sessions
        .spin(user_id, &items)
        .await?
        .ok_or(Error::SpinInProgress)?;

    info!(
        "🎡 WHEEL SPIN: User {} landed on '{}' at {:.2} degrees",
        user_id, result.selected_segment.label, result.final_rotation
    );
    Ok(Json(result))
}

/// Lets a view disable its spin trigger while the wheel is still turning.
async fn spin_status(
    State(state): State<AppState>,
    UserId(user_id): UserId,
) -> Json<SpinStatus> {
    Json(SpinStatus {
        is_animating: state.sessions.is_animating(user_id).await,
    })
}
