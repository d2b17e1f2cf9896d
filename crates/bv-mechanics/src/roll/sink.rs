//! The publish sink: where narrated roll results end up.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::dice::RollResult;

/// A completed roll ready to be narrated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RollOutcome {
    /// Narration shown with the roll, e.g. "Stealth (Agility) Check".
    pub flavor: String,
    /// The formula actually evaluated.
    pub formula: String,
    /// Final numeric result.
    pub total: i32,
    /// Individual dice behind the total.
    pub dice: RollResult,
}

/// A message published to the chat.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChatMessage {
    /// A dice roll.
    Roll(RollOutcome),
    /// A plain announcement with no dice.
    Announcement {
        /// Heading shown with the message.
        flavor: String,
        /// Message body.
        content: String,
    },
}

impl ChatMessage {
    /// The narration heading of the message.
    pub fn flavor(&self) -> &str {
        match self {
            Self::Roll(outcome) => &outcome.flavor,
            Self::Announcement { flavor, .. } => flavor,
        }
    }

    /// The roll, if this message is one.
    pub fn as_roll(&self) -> Option<&RollOutcome> {
        match self {
            Self::Roll(outcome) => Some(outcome),
            Self::Announcement { .. } => None,
        }
    }
}

impl fmt::Display for ChatMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Roll(outcome) => write!(
                f,
                "{}: {} {} -> {}",
                outcome.flavor, outcome.formula, outcome.dice, outcome.total
            ),
            Self::Announcement { flavor, content } => write!(f, "{flavor}\n{content}"),
        }
    }
}

/// Append-only destination for published messages.
pub trait ChatSink {
    /// Publish a message.
    fn publish(&mut self, message: ChatMessage);
}

/// An in-memory chat log.
#[derive(Debug, Clone, Default)]
pub struct ChatLog {
    messages: Vec<ChatMessage>,
}

impl ChatLog {
    /// Create an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// All messages in publish order.
    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// The most recent message.
    pub fn last(&self) -> Option<&ChatMessage> {
        self.messages.last()
    }

    /// Number of messages.
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Returns true if nothing was published.
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

impl ChatSink for ChatLog {
    fn publish(&mut self, message: ChatMessage) {
        self.messages.push(message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dice::{Die, DieResult};

    fn roll_message() -> ChatMessage {
        ChatMessage::Roll(RollOutcome {
            flavor: "Sabre Attack".to_string(),
            formula: "1d20+2".to_string(),
            total: 14,
            dice: RollResult {
                dice: vec![DieResult {
                    die: Die::D20,
                    value: 12,
                    negative: false,
                }],
            },
        })
    }

    #[test]
    fn display_roll() {
        assert_eq!(roll_message().to_string(), "Sabre Attack: 1d20+2 [12] = 12 -> 14");
    }

    #[test]
    fn display_announcement() {
        let msg = ChatMessage::Announcement {
            flavor: "Rift Storm".to_string(),
            content: "Ash falls.".to_string(),
        };
        assert_eq!(msg.to_string(), "Rift Storm\nAsh falls.");
        assert!(msg.as_roll().is_none());
    }

    #[test]
    fn log_keeps_order() {
        let mut log = ChatLog::new();
        assert!(log.is_empty());
        log.publish(roll_message());
        log.publish(ChatMessage::Announcement {
            flavor: "Rift Storm".to_string(),
            content: String::new(),
        });
        assert_eq!(log.len(), 2);
        assert_eq!(log.messages()[0].flavor(), "Sabre Attack");
        assert_eq!(log.last().unwrap().flavor(), "Rift Storm");
    }
}
