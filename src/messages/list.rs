use axum::{
    debug_handler,
    extract::{Query, State},
    Json,
};
use serde::Deserialize;

use crate::{
    appresult::AppResult,
    db::Message,
    session::ActingUser,
    store::{SqliteStore, Store},
    visibility,
};

#[derive(Debug, Default, Deserialize)]
pub(crate) struct ListMessagesQuery {
    limit: Option<String>,
}

/// Messages `user` may see, oldest first, trimmed to the last `limit`.
pub async fn list(store: &impl Store, user: &str, limit: Option<usize>) -> AppResult<Vec<Message>> {
    let messages = store.list_messages().await?;
    Ok(visibility::limit(visibility::visible(messages, user), limit))
}

#[debug_handler]
pub(crate) async fn get_messages(
    State(store): State<SqliteStore>,
    user: ActingUser,
    Query(ListMessagesQuery { limit }): Query<ListMessagesQuery>,
) -> AppResult<Json<Vec<Message>>> {
    let limit = visibility::parse_limit(limit.as_deref());
    Ok(Json(list(&store, user.as_str(), limit).await?))
}
