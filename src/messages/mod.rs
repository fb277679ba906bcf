//! Posting, reading and rewriting chat messages.

mod delete;
mod list;
mod post;
mod update;

use axum::{
    routing::{get, put},
    Router,
};
use uuid::Uuid;

use crate::{
    appresult::{AppError, AppResult},
    db::{Message, MessageId},
    store::Store,
    AppState,
};

pub use delete::delete;
pub use list::list;
pub use post::post;
pub use update::update;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/messages", get(list::get_messages).post(post::post_message))
        .route("/messages/{id}", put(update::put_message).delete(delete::delete_message))
}

/// Ids that don't parse can't name a stored message.
pub(crate) fn parse_id(raw: &str) -> AppResult<MessageId> {
    Uuid::parse_str(raw).map_err(|_| AppError::NotFound)
}

/// Only registered participants may write.
async fn ensure_registered(store: &impl Store, user: &str) -> AppResult<()> {
    match store.find_participant(user).await? {
        Some(_) => Ok(()),
        None => Err(AppError::unprocessable("user", format!("\"{user}\" is not a registered participant"))),
    }
}

/// Loads a message the acting user sent.
async fn owned_message(store: &impl Store, id: MessageId, user: &str) -> AppResult<Message> {
    let message = store.find_message(id).await?.ok_or(AppError::NotFound)?;
    if message.from != user {
        return Err(AppError::Forbidden);
    }

    Ok(message)
}
