//! Canned chat responder. There is no intelligence behind it: every user
//! message gets echoed back in a fixed phrasing. The transcript lives for the
//! session so closing and reopening the chat panel keeps the history.

/// Who authored a transcript entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sender {
    User,
    Bot,
}

/// One transcript entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub sender: Sender,
    pub text: String,
}

/// Ordered transcript of the session's chat exchange.
#[derive(Debug, Default)]
pub struct ChatLog {
    messages: Vec<ChatMessage>,
}

impl ChatLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// Append the user's message followed by the canned reply. Empty input is
    /// ignored. Returns whether anything was appended so the caller knows
    /// whether to clear its input line.
    pub fn send(&mut self, input: &str) -> bool {
        if input.is_empty() {
            return false;
        }
        self.messages.push(ChatMessage {
            sender: Sender::User,
            text: input.to_string(),
        });
        self.messages.push(ChatMessage {
            sender: Sender::Bot,
            text: format!("You said: \"{input}\""),
        });
        true
    }
}

#[cfg(test)]
mod chat_tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn send_appends_user_message_and_echo() {
        let mut log = ChatLog::new();
        assert!(log.send("hello"));
        assert_eq!(
            log.messages(),
            &[
                ChatMessage {
                    sender: Sender::User,
                    text: "hello".to_string(),
                },
                ChatMessage {
                    sender: Sender::Bot,
                    text: "You said: \"hello\"".to_string(),
                },
            ]
        );
    }

    #[test]
    fn empty_input_appends_nothing() {
        let mut log = ChatLog::new();
        assert!(!log.send(""));
        assert!(log.messages().is_empty());
    }

    #[test]
    fn transcript_accumulates_in_order() {
        let mut log = ChatLog::new();
        log.send("first");
        log.send("second");
        let texts: Vec<&str> = log.messages().iter().map(|m| m.text.as_str()).collect();
        assert_eq!(
            texts,
            vec![
                "first",
                "You said: \"first\"",
                "second",
                "You said: \"second\"",
            ]
        );
    }
}
