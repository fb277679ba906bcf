use std::sync::Arc;

use axum::{
    debug_handler,
    extract::{Path, State},
    http::StatusCode,
};
use serde_json::Value;

use crate::{
    appresult::{AppError, AppResult},
    clock::Clock,
    db::MessageId,
    session::ActingUser,
    store::{SqliteStore, Store},
    validate::{self, JsonBody},
    AppState,
};

use super::{ensure_registered, owned_message, parse_id};

/// Rewrites `to`, `text`, `type` and `time`. Identity and sender stay put.
pub async fn update(
    store: &impl Store,
    clock: &dyn Clock,
    id: MessageId,
    user: &str,
    input: &Value,
) -> AppResult<()> {
    ensure_registered(store, user).await?;
    let body = validate::message_body(input)?;
    owned_message(store, id, user).await?;

    if !store.update_message(id, &body, &clock.time_of_day()).await? {
        return Err(AppError::NotFound);
    }

    tracing::debug!(%id, by = user, "message updated");
    Ok(())
}

#[debug_handler(state = AppState)]
pub(crate) async fn put_message(
    State(store): State<SqliteStore>,
    State(clock): State<Arc<dyn Clock>>,
    user: ActingUser,
    Path(id): Path<String>,
    JsonBody(body): JsonBody,
) -> AppResult<StatusCode> {
    update(&store, clock.as_ref(), parse_id(&id)?, user.as_str(), &body).await?;
    Ok(StatusCode::OK)
}
