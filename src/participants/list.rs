use axum::{debug_handler, extract::State, Json};

use crate::{
    appresult::AppResult,
    db::Participant,
    store::{SqliteStore, Store},
};

pub async fn list(store: &impl Store) -> AppResult<Vec<Participant>> {
    Ok(store.list_participants().await?)
}

#[debug_handler]
pub(crate) async fn get_participants(State(store): State<SqliteStore>) -> AppResult<Json<Vec<Participant>>> {
    Ok(Json(list(&store).await?))
}
