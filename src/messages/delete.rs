use axum::{
    debug_handler,
    extract::{Path, State},
    http::StatusCode,
};

use crate::{
    appresult::{AppError, AppResult},
    db::MessageId,
    session::ActingUser,
    store::{SqliteStore, Store},
};

use super::{owned_message, parse_id};

pub async fn delete(store: &impl Store, id: MessageId, user: &str) -> AppResult<()> {
    owned_message(store, id, user).await?;

    // gone between the lookup and now
    if !store.delete_message(id).await? {
        return Err(AppError::NotFound);
    }

    tracing::debug!(%id, by = user, "message deleted");
    Ok(())
}

#[debug_handler]
pub(crate) async fn delete_message(
    State(store): State<SqliteStore>,
    user: ActingUser,
    Path(id): Path<String>,
) -> AppResult<StatusCode> {
    delete(&store, parse_id(&id)?, user.as_str()).await?;
    Ok(StatusCode::OK)
}
