use std::sync::Arc;

use axum::{debug_handler, extract::State, http::StatusCode, response::IntoResponse};

use crate::{
    appresult::{AppError, AppResult},
    clock::Clock,
    db::Participant,
    store::{SqliteStore, Store},
    validate::{self, JsonBody},
    AppState,
};

pub async fn register(store: &impl Store, clock: &dyn Clock, name: &str) -> AppResult<Participant> {
    if name.is_empty() {
        return Err(AppError::unprocessable("name", "\"name\" is not allowed to be empty"));
    }

    let participant = Participant { name: name.to_owned(), last_status: clock.now_millis() };
    if !store.insert_participant(&participant).await? {
        return Err(AppError::Conflict);
    }

    tracing::info!(name, "participant joined");
    Ok(participant)
}

#[debug_handler(state = AppState)]
pub(crate) async fn post_participant(
    State(store): State<SqliteStore>,
    State(clock): State<Arc<dyn Clock>>,
    JsonBody(body): JsonBody,
) -> AppResult<impl IntoResponse> {
    let name = validate::participant_name(&body)?;
    register(&store, clock.as_ref(), &name).await?;

    Ok((StatusCode::CREATED, "OK"))
}
