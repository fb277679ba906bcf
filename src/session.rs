use std::convert::Infallible;

use axum::{extract::FromRequestParts, http::request::Parts};

/// Header carrying the acting participant's name.
pub const USER: &str = "user";

/// Name from the `user` header, empty when absent or not valid UTF-8.
/// An empty name never matches a participant or a sender.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActingUser(pub String);

impl ActingUser {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl<S: Send + Sync> FromRequestParts<S> for ActingUser {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let name = parts
            .headers
            .get(USER)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default();

        Ok(ActingUser(name.to_owned()))
    }
}
