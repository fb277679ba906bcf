use std::{str::FromStr, time::Duration};

use sqlx::{
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
    SqlitePool,
};
use uuid::Uuid;

use crate::db::{Message, MessageBody, MessageId, MessageKind, Participant};

use super::{Store, StoreError};

type MessageRow = (String, String, String, String, String, String);

#[derive(Clone)]
pub struct SqliteStore {
    db_pool: SqlitePool,
}

impl SqliteStore {
    pub async fn connect(database_url: &str) -> Result<Self, StoreError> {
        let options = SqliteConnectOptions::from_str(database_url)?
            .create_if_missing(true)
            .busy_timeout(Duration::from_secs(5));

        let db_pool = SqlitePoolOptions::new()
            .max_connections(16)
            .connect_with(options)
            .await?;

        Self::from_pool(db_pool).await
    }

    /// Applies pending migrations before handing the pool out.
    pub async fn from_pool(db_pool: SqlitePool) -> Result<Self, StoreError> {
        sqlx::migrate!().run(&db_pool).await?;
        Ok(Self { db_pool })
    }

    /// A private in-memory database. One connection that never expires, since
    /// every new connection would see an empty database.
    #[cfg(test)]
    pub(crate) async fn in_memory() -> Self {
        let db_pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None::<Duration>)
            .max_lifetime(None::<Duration>)
            .connect("sqlite::memory:")
            .await
            .unwrap();

        Self::from_pool(db_pool).await.unwrap()
    }
}

fn message_from_row((id, from, to, text, kind, time): MessageRow) -> Result<Message, StoreError> {
    Ok(Message {
        id: Uuid::parse_str(&id).map_err(|e| StoreError::Corrupt(format!("message id {id}: {e}")))?,
        from,
        to,
        text,
        kind: kind.parse().map_err(StoreError::Corrupt)?,
        time,
    })
}

impl Store for SqliteStore {
    async fn find_participant(&self, name: &str) -> Result<Option<Participant>, StoreError> {
        let row: Option<(String, i64)> =
            sqlx::query_as("SELECT name,last_status FROM participants WHERE name=?")
                .bind(name)
                .fetch_optional(&self.db_pool)
                .await?;

        Ok(row.map(|(name, last_status)| Participant { name, last_status }))
    }

    async fn list_participants(&self) -> Result<Vec<Participant>, StoreError> {
        let rows: Vec<(String, i64)> = sqlx::query_as("SELECT name,last_status FROM participants")
            .fetch_all(&self.db_pool)
            .await?;

        Ok(rows
            .into_iter()
            .map(|(name, last_status)| Participant { name, last_status })
            .collect())
    }

    async fn insert_participant(&self, participant: &Participant) -> Result<bool, StoreError> {
        let result = sqlx::query(
            "INSERT INTO participants (name,last_status) VALUES (?,?) ON CONFLICT(name) DO NOTHING",
        )
        .bind(&participant.name)
        .bind(participant.last_status)
        .execute(&self.db_pool)
        .await?;

        Ok(result.rows_affected() == 1)
    }

    async fn touch_participant(&self, name: &str, last_status: i64) -> Result<bool, StoreError> {
        let result = sqlx::query("UPDATE participants SET last_status=? WHERE name=?")
            .bind(last_status)
            .bind(name)
            .execute(&self.db_pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_participant(&self, name: &str) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM participants WHERE name=?")
            .bind(name)
            .execute(&self.db_pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn find_message(&self, id: MessageId) -> Result<Option<Message>, StoreError> {
        let row: Option<MessageRow> =
            sqlx::query_as("SELECT id,sender,recipient,text,kind,time FROM messages WHERE id=?")
                .bind(id.to_string())
                .fetch_optional(&self.db_pool)
                .await?;

        row.map(message_from_row).transpose()
    }

    async fn list_messages(&self) -> Result<Vec<Message>, StoreError> {
        let rows: Vec<MessageRow> =
            sqlx::query_as("SELECT id,sender,recipient,text,kind,time FROM messages ORDER BY seq")
                .fetch_all(&self.db_pool)
                .await?;

        rows.into_iter().map(message_from_row).collect()
    }

    async fn insert_message(
        &self,
        from: &str,
        body: &MessageBody,
        time: &str,
    ) -> Result<MessageId, StoreError> {
        let id = Uuid::now_v7();
        sqlx::query(
            "INSERT INTO messages (id,sender,recipient,text,kind,time) VALUES (?,?,?,?,?,?)",
        )
        .bind(id.to_string())
        .bind(from)
        .bind(&body.to)
        .bind(&body.text)
        .bind(body.kind.as_str())
        .bind(time)
        .execute(&self.db_pool)
        .await?;

        Ok(id)
    }

    async fn update_message(
        &self,
        id: MessageId,
        body: &MessageBody,
        time: &str,
    ) -> Result<bool, StoreError> {
        let result =
            sqlx::query("UPDATE messages SET recipient=?,text=?,kind=?,time=? WHERE id=?")
                .bind(&body.to)
                .bind(&body.text)
                .bind(body.kind.as_str())
                .bind(time)
                .bind(id.to_string())
                .execute(&self.db_pool)
                .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_message(&self, id: MessageId) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM messages WHERE id=?")
            .bind(id.to_string())
            .execute(&self.db_pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
