use axum::{extract::State, response::Json};
use serde::Serialize;
use shared::identity::generate_user_id;
use shared::CatalogRecipe;
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::Error;
use crate::identity::UserId;
use crate::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub user_id: Uuid,
}

pub async fn health_check() -> &'static str {
    "OK"
}

/// Registers the caller's id, or hands out a fresh one when the client has none yet.
pub async fn provision_user(
    State(state): State<AppState>,
    user_id: Option<UserId>,
) -> Result<Json<UserResponse>, Error> {
    let user_id = match user_id {
        Some(UserId(id)) => id,
        None => {
            let id = generate_user_id();
            info!("👋 New wheel user {}", id);
            id
        }
    };

    state.store.ensure_user(user_id).await?;
    Ok(Json(UserResponse { user_id }))
}

pub async fn list_catalog(State(state): State<AppState>) -> Result<Json<Vec<CatalogRecipe>>, Error> {
    let recipes = state.store.list_catalog().await?;
    debug!("Serving {} catalog recipes", recipes.len());
    Ok(Json(recipes))
}
