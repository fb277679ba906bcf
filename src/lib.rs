pub mod appresult;
pub mod clock;
pub mod config;
pub mod db;
pub mod messages;
pub mod participants;
pub mod reaper;
pub mod session;
pub mod store;
pub mod telemetry;
pub mod validate;
pub mod visibility;

use std::sync::Arc;

use axum::{extract::FromRef, Router};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub use appresult::{AppError, AppResult};
use clock::Clock;
use store::SqliteStore;

#[derive(Clone, FromRef)]
pub struct AppState {
    pub store: SqliteStore,
    pub clock: Arc<dyn Clock>,
}

pub fn app(state: AppState) -> Router {
    Router::new()
        .merge(participants::router())
        .merge(messages::router())
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

#[cfg(test)]
mod tests {
    use reqwest::StatusCode;
    use serde_json::{json, Value};

    use super::*;
    use crate::clock::SystemClock;

    async fn serve() -> String {
        let state = AppState { store: SqliteStore::in_memory().await, clock: Arc::new(SystemClock) };
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move { axum::serve(listener, app(state)).await.unwrap() });
        format!("http://{addr}")
    }

    async fn texts_for(client: &reqwest::Client, base: &str, user: &str) -> Vec<String> {
        let messages: Vec<Value> = client
            .get(format!("{base}/messages"))
            .header(session::USER, user)
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        messages.iter().map(|m| m["text"].as_str().unwrap().to_owned()).collect()
    }

    #[tokio::test]
    async fn chat_scenario_over_http() {
        let base = serve().await;
        let client = reqwest::Client::new();

        let register =
            |name: &'static str| client.post(format!("{base}/participants")).json(&json!({ "name": name })).send();
        assert_eq!(register("Alice").await.unwrap().status(), StatusCode::CREATED);
        assert_eq!(register("Alice").await.unwrap().status(), StatusCode::CONFLICT);
        assert_eq!(register("Bob").await.unwrap().status(), StatusCode::CREATED);

        let participants: Vec<Value> =
            client.get(format!("{base}/participants")).send().await.unwrap().json().await.unwrap();
        assert_eq!(participants.len(), 2);

        let post = |body: Value| {
            client
                .post(format!("{base}/messages"))
                .header(session::USER, "Alice")
                .json(&body)
                .send()
        };
        assert_eq!(
            post(json!({ "to": "Todos", "text": "hi", "type": "message" })).await.unwrap().status(),
            StatusCode::CREATED
        );
        assert_eq!(
            post(json!({ "to": "Bob", "text": "secret", "type": "private_message" })).await.unwrap().status(),
            StatusCode::CREATED
        );

        assert_eq!(texts_for(&client, &base, "Bob").await, ["hi", "secret"]);
        assert_eq!(texts_for(&client, &base, "Carol").await, ["hi"]);

        let limited: Vec<Value> = client
            .get(format!("{base}/messages?limit=1"))
            .header(session::USER, "Bob")
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert_eq!(limited.len(), 1);
        assert_eq!(limited[0]["text"], "secret");
        assert_eq!(limited[0]["from"], "Alice");
        assert_eq!(limited[0]["type"], "private_message");

        let id = limited[0]["_id"].as_str().unwrap().to_owned();
        let delete_as = |user: &'static str| {
            client
                .delete(format!("{base}/messages/{id}"))
                .header(session::USER, user)
                .send()
        };
        assert_eq!(delete_as("Bob").await.unwrap().status(), StatusCode::UNAUTHORIZED);
        assert_eq!(delete_as("Alice").await.unwrap().status(), StatusCode::OK);
        assert_eq!(delete_as("Alice").await.unwrap().status(), StatusCode::NOT_FOUND);

        let ping = client.post(format!("{base}/status")).header(session::USER, "Bob").send().await.unwrap();
        assert_eq!(ping.status(), StatusCode::OK);
        let ping = client.post(format!("{base}/status")).header(session::USER, "Carol").send().await.unwrap();
        assert_eq!(ping.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn violations_come_back_as_a_list() {
        let base = serve().await;
        let client = reqwest::Client::new();
        client.post(format!("{base}/participants")).json(&json!({ "name": "Alice" })).send().await.unwrap();

        let response = client
            .post(format!("{base}/messages"))
            .header(session::USER, "Alice")
            .json(&json!({ "to": "", "type": "status" }))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let violations: Vec<Value> = response.json().await.unwrap();
        let fields: Vec<&str> = violations.iter().map(|v| v["field"].as_str().unwrap()).collect();
        assert_eq!(fields, ["to", "text", "type"]);
    }

    #[tokio::test]
    async fn missing_or_broken_bodies_are_violations() {
        let base = serve().await;
        let client = reqwest::Client::new();
        client.post(format!("{base}/participants")).json(&json!({ "name": "Alice" })).send().await.unwrap();

        let response = client
            .post(format!("{base}/messages"))
            .header(session::USER, "Alice")
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let violations: Vec<Value> = response.json().await.unwrap();
        let fields: Vec<&str> = violations.iter().map(|v| v["field"].as_str().unwrap()).collect();
        assert_eq!(fields, ["to", "text", "type"]);

        let response = client
            .post(format!("{base}/messages"))
            .header(session::USER, "Alice")
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .body("{")
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let violations: Vec<Value> = response.json().await.unwrap();
        assert_eq!(violations[0]["field"], "value");

        let response = client.post(format!("{base}/participants")).send().await.unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }
}
