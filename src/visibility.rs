//! Which stored messages a requesting user gets to see.

use crate::db::{Message, MessageKind};

/// Reserved recipient meaning every participant.
pub const BROADCAST: &str = "Todos";

/// Public messages and status notices are visible to everyone; anything else
/// only to its addressee.
pub fn is_visible(message: &Message, user: &str) -> bool {
    message.to == user || matches!(message.kind, MessageKind::Message | MessageKind::Status)
}

pub fn visible(messages: Vec<Message>, user: &str) -> Vec<Message> {
    messages.into_iter().filter(|m| is_visible(m, user)).collect()
}

/// Keeps the trailing `n` messages. `None` keeps everything.
pub fn limit(mut messages: Vec<Message>, n: Option<usize>) -> Vec<Message> {
    match n {
        Some(n) if n > 0 && n < messages.len() => messages.split_off(messages.len() - n),
        _ => messages,
    }
}

/// Anything that is not a positive integer means "no limit".
pub fn parse_limit(raw: Option<&str>) -> Option<usize> {
    raw?.trim().parse::<usize>().ok().filter(|n| *n > 0)
}

#[cfg(test)]
mod tests {
    use uuid::Uuid;

    use super::*;

    fn msg(from: &str, to: &str, kind: MessageKind, text: &str) -> Message {
        Message {
            id: Uuid::now_v7(),
            from: from.to_owned(),
            to: to.to_owned(),
            text: text.to_owned(),
            kind,
            time: "12:00:00".to_owned(),
        }
    }

    fn texts(messages: &[Message]) -> Vec<&str> {
        messages.iter().map(|m| m.text.as_str()).collect()
    }

    fn sample() -> Vec<Message> {
        vec![
            msg("Alice", BROADCAST, MessageKind::Message, "hi"),
            msg("Alice", "Bob", MessageKind::PrivateMessage, "secret"),
            msg("Dave", BROADCAST, MessageKind::Status, "sai da sala..."),
            msg("Bob", "Carol", MessageKind::PrivateMessage, "for carol"),
            msg("Carol", "Bob", MessageKind::Message, "public reply"),
        ]
    }

    #[test]
    fn private_messages_only_reach_their_addressee() {
        assert_eq!(texts(&visible(sample(), "Bob")), ["hi", "secret", "sai da sala...", "public reply"]);
        assert_eq!(texts(&visible(sample(), "Carol")), ["hi", "sai da sala...", "for carol", "public reply"]);
        assert_eq!(texts(&visible(sample(), "Alice")), ["hi", "sai da sala...", "public reply"]);
    }

    #[test]
    fn anonymous_readers_see_public_traffic() {
        assert_eq!(texts(&visible(sample(), "")), ["hi", "sai da sala...", "public reply"]);
    }

    #[test]
    fn visible_matches_definition_for_every_user() {
        let all = sample();
        for user in ["Alice", "Bob", "Carol", "Dave", "Todos", ""] {
            let expected: Vec<&str> = all
                .iter()
                .filter(|m| m.to == user || m.kind != MessageKind::PrivateMessage)
                .map(|m| m.text.as_str())
                .collect();
            assert_eq!(texts(&visible(all.clone(), user)), expected, "user {user:?}");
        }
    }

    #[test]
    fn limit_keeps_the_tail_in_order() {
        assert_eq!(texts(&limit(sample(), Some(2))), ["for carol", "public reply"]);
        assert_eq!(texts(&limit(sample(), Some(5))).len(), 5);
        assert_eq!(texts(&limit(sample(), Some(50))).len(), 5);
        assert_eq!(texts(&limit(sample(), Some(0))).len(), 5);
        assert_eq!(texts(&limit(sample(), None)).len(), 5);
        assert!(limit(Vec::new(), Some(3)).is_empty());
    }

    #[test]
    fn parse_limit_ignores_garbage() {
        assert_eq!(parse_limit(Some("3")), Some(3));
        assert_eq!(parse_limit(Some(" 10 ")), Some(10));
        assert_eq!(parse_limit(Some("0")), None);
        assert_eq!(parse_limit(Some("-2")), None);
        assert_eq!(parse_limit(Some("many")), None);
        assert_eq!(parse_limit(None), None);
    }
}
