use std::{fmt, str::FromStr};

use serde::Serialize;
use uuid::Uuid;

pub type MessageId = Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Participant {
    pub name: String,
    /// Millis since epoch of the last registration or status ping.
    pub last_status: i64,

    // unique: name
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageKind {
    Message,
    PrivateMessage,
    /// System notices; never accepted from user input.
    Status,
}

impl MessageKind {
    pub fn as_str(&self) -> &'static str {
        use MessageKind::*;
        match self {
            Message => "message",
            PrivateMessage => "private_message",
            Status => "status",
        }
    }
}

impl fmt::Display for MessageKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MessageKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        use MessageKind::*;
        match s {
            "message" => Ok(Message),
            "private_message" => Ok(PrivateMessage),
            "status" => Ok(Status),
            other => Err(format!("unknown message type '{other}'")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Message {
    #[serde(rename = "_id")]
    pub id: MessageId,

    pub from: String,
    pub to: String,
    pub text: String,
    #[serde(rename = "type")]
    pub kind: MessageKind,
    /// `HH:MM:SS` wall clock at the last write.
    pub time: String,

    // unique: id
}

/// The part of a message its sender may rewrite.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageBody {
    pub to: String,
    pub text: String,
    pub kind: MessageKind,
}
