use std::sync::Arc;

use axum::{debug_handler, extract::State, http::StatusCode};
use serde_json::Value;

use crate::{
    appresult::AppResult,
    clock::Clock,
    db::MessageId,
    session::ActingUser,
    store::{SqliteStore, Store},
    validate::{self, JsonBody},
    AppState,
};

use super::ensure_registered;

/// The sender must be registered before the body is even looked at.
pub async fn post(store: &impl Store, clock: &dyn Clock, user: &str, input: &Value) -> AppResult<MessageId> {
    ensure_registered(store, user).await?;
    let body = validate::message_body(input)?;

    let id = store.insert_message(user, &body, &clock.time_of_day()).await?;
    tracing::debug!(%id, from = user, to = %body.to, kind = %body.kind, "message posted");

    Ok(id)
}

#[debug_handler(state = AppState)]
pub(crate) async fn post_message(
    State(store): State<SqliteStore>,
    State(clock): State<Arc<dyn Clock>>,
    user: ActingUser,
    JsonBody(body): JsonBody,
) -> AppResult<StatusCode> {
    post(&store, clock.as_ref(), user.as_str(), &body).await?;
    Ok(StatusCode::CREATED)
}
