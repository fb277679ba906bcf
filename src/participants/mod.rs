//! Presence tracking: who is registered and when they were last seen.

mod list;
mod register;
mod status;

use axum::{
    routing::{get, post},
    Router,
};

use crate::{db::Participant, AppState};

pub use list::list;
pub use register::register;
pub use status::ping;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/participants", get(list::get_participants).post(register::post_participant))
        .route("/status", post(status::post_status))
}

/// Stale once more than `timeout_ms` has passed since the last ping.
pub fn is_stale(participant: &Participant, now: i64, timeout_ms: i64) -> bool {
    now - participant.last_status > timeout_ms
}
