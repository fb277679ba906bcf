//! Persistence of the two collections, participants and messages.
//!
//! Every call is a single statement; the store guarantees atomicity per call
//! and nothing more. Callers that read and then write may lose updates under
//! concurrency.

mod sqlite;

use std::future::Future;

use thiserror::Error;

use crate::db::{Message, MessageBody, MessageId, Participant};

pub use sqlite::SqliteStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("migration failed: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),

    #[error("corrupt row: {0}")]
    Corrupt(String),
}

/// Uses native async fn in traits, so implementations can be written with
/// plain `async fn`.
pub trait Store: Send + Sync {
    fn find_participant(
        &self,
        name: &str,
    ) -> impl Future<Output = Result<Option<Participant>, StoreError>> + Send;

    fn list_participants(&self) -> impl Future<Output = Result<Vec<Participant>, StoreError>> + Send;

    /// Returns `false` without writing when the name is already taken.
    fn insert_participant(
        &self,
        participant: &Participant,
    ) -> impl Future<Output = Result<bool, StoreError>> + Send;

    /// Returns `false` when no participant has that name.
    fn touch_participant(
        &self,
        name: &str,
        last_status: i64,
    ) -> impl Future<Output = Result<bool, StoreError>> + Send;

    fn delete_participant(&self, name: &str) -> impl Future<Output = Result<bool, StoreError>> + Send;

    fn find_message(
        &self,
        id: MessageId,
    ) -> impl Future<Output = Result<Option<Message>, StoreError>> + Send;

    /// All messages in insertion order.
    fn list_messages(&self) -> impl Future<Output = Result<Vec<Message>, StoreError>> + Send;

    fn insert_message(
        &self,
        from: &str,
        body: &MessageBody,
        time: &str,
    ) -> impl Future<Output = Result<MessageId, StoreError>> + Send;

    /// Overwrites `to`, `text`, `type` and `time`. Returns `false` when the id is unknown.
    fn update_message(
        &self,
        id: MessageId,
        body: &MessageBody,
        time: &str,
    ) -> impl Future<Output = Result<bool, StoreError>> + Send;

    fn delete_message(&self, id: MessageId) -> impl Future<Output = Result<bool, StoreError>> + Send;
}
