//! Input schemas for participant names and message bodies.
//!
//! Every failing clause is collected; nothing short-circuits.

use axum::{
    body::Bytes,
    extract::{FromRequest, Request},
};
use serde::Serialize;
use serde_json::{Map, Value};

use crate::{
    appresult::AppError,
    db::{MessageBody, MessageKind},
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    pub field: String,
    pub reason: String,
}

impl Violation {
    pub fn new(field: &str, reason: impl Into<String>) -> Self {
        Self { field: field.to_owned(), reason: reason.into() }
    }
}

pub type Validated<T> = Result<T, Vec<Violation>>;

/// Types a sender may pick; `status` is reserved for the server.
const USER_KINDS: [MessageKind; 2] = [MessageKind::Message, MessageKind::PrivateMessage];

fn required_str(input: &Value, field: &str, violations: &mut Vec<Violation>) -> Option<String> {
    match input.get(field) {
        None | Some(Value::Null) => {
            violations.push(Violation::new(field, format!("\"{field}\" is required")));
            None
        }
        Some(Value::String(s)) if s.is_empty() => {
            violations.push(Violation::new(field, format!("\"{field}\" is not allowed to be empty")));
            None
        }
        Some(Value::String(s)) => Some(s.clone()),
        Some(_) => {
            violations.push(Violation::new(field, format!("\"{field}\" must be a string")));
            None
        }
    }
}

fn object(input: &Value) -> Validated<()> {
    if input.is_object() {
        Ok(())
    } else {
        Err(vec![Violation::new("value", "\"value\" must be of type object")])
    }
}

fn unknown_keys(input: &Value, allowed: &[&str], violations: &mut Vec<Violation>) {
    let Some(fields) = input.as_object() else {
        return;
    };

    for key in fields.keys().filter(|key| !allowed.contains(&key.as_str())) {
        violations.push(Violation::new(key, format!("\"{key}\" is not allowed")));
    }
}

pub fn participant_name(input: &Value) -> Validated<String> {
    object(input)?;

    let mut violations = Vec::new();
    let name = required_str(input, "name", &mut violations);
    unknown_keys(input, &["name"], &mut violations);

    match name {
        Some(name) if violations.is_empty() => Ok(name),
        _ => Err(violations),
    }
}

pub fn message_body(input: &Value) -> Validated<MessageBody> {
    object(input)?;

    let mut violations = Vec::new();
    let to = required_str(input, "to", &mut violations);
    let text = required_str(input, "text", &mut violations);
    let kind = required_str(input, "type", &mut violations).and_then(|raw| {
        let kind = raw.parse::<MessageKind>().ok().filter(|kind| USER_KINDS.contains(kind));
        if kind.is_none() {
            violations.push(Violation::new(
                "type",
                "\"type\" must be one of [message, private_message]",
            ));
        }
        kind
    });
    unknown_keys(input, &["to", "text", "type"], &mut violations);

    match (to, text, kind) {
        (Some(to), Some(text), Some(kind)) if violations.is_empty() => {
            Ok(MessageBody { to, text, kind })
        }
        _ => Err(violations),
    }
}

/// A JSON request body that is checked by the schemas above rather than
/// rejected up front. An empty body reads as `{}`, and the content type is
/// not required. Unparseable JSON is a violation on `value`.
#[derive(Debug, Clone, PartialEq)]
pub struct JsonBody(pub Value);

impl<S: Send + Sync> FromRequest<S> for JsonBody {
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|rejection| AppError::unprocessable("value", rejection.body_text()))?;

        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(JsonBody(Value::Object(Map::new())));
        }

        serde_json::from_slice(&bytes)
            .map(JsonBody)
            .map_err(|err| AppError::unprocessable("value", format!("\"value\" is not valid JSON: {err}")))
    }
}
