use std::sync::Arc;

use axum::{debug_handler, extract::State, http::StatusCode};

use crate::{
    appresult::{AppError, AppResult},
    clock::Clock,
    session::ActingUser,
    store::{SqliteStore, Store},
    AppState,
};

/// Refreshes `last_status`; the name is left as is.
pub async fn ping(store: &impl Store, clock: &dyn Clock, name: &str) -> AppResult<()> {
    if !store.touch_participant(name, clock.now_millis()).await? {
        return Err(AppError::NotFound);
    }

    tracing::debug!(name, "status ping");
    Ok(())
}

#[debug_handler(state = AppState)]
pub(crate) async fn post_status(
    State(store): State<SqliteStore>,
    State(clock): State<Arc<dyn Clock>>,
    user: ActingUser,
) -> AppResult<StatusCode> {
    ping(&store, clock.as_ref(), user.as_str()).await?;
    Ok(StatusCode::OK)
}
