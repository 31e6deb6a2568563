//! Multi-turn conversation model

use serde::{Deserialize, Serialize};

/// One user/assistant turn pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatExchange {
    pub user: String,
    pub assistant: String,
    /// Provider-issued identifier for this turn, passed back on the next
    /// request for continuity.
    pub turn_id: String,
}

/// Conversation history for one page, cached keyed by URL
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Conversation {
    pub exchanges: Vec<ChatExchange>,
}

impl Conversation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.exchanges.is_empty()
    }

    /// Identifier of the most recent turn, used as the "previous turn"
    /// pointer for the next request. None on a fresh conversation.
    pub fn last_turn_id(&self) -> Option<&str> {
        self.exchanges.last().map(|e| e.turn_id.as_str())
    }

    pub fn push(&mut self, exchange: ChatExchange) {
        self.exchanges.push(exchange);
    }
}

/// Response to one chat request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatReply {
    pub text: String,
    pub turn_id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_conversation_has_no_prior_turn() {
        let conversation = Conversation::new();
        assert!(conversation.is_empty());
        assert_eq!(conversation.last_turn_id(), None);
    }

    #[test]
    fn test_last_turn_id_tracks_most_recent_exchange() {
        let mut conversation = Conversation::new();
        conversation.push(ChatExchange {
            user: "what is this about?".to_string(),
            assistant: "rust".to_string(),
            turn_id: "turn-1".to_string(),
        });
        conversation.push(ChatExchange {
            user: "more detail".to_string(),
            assistant: "a lot of rust".to_string(),
            turn_id: "turn-2".to_string(),
        });

        assert_eq!(conversation.last_turn_id(), Some("turn-2"));
    }

    #[test]
    fn test_conversation_round_trips_through_json() {
        let mut conversation = Conversation::new();
        conversation.push(ChatExchange {
            user: "q".to_string(),
            assistant: "a".to_string(),
            turn_id: "t".to_string(),
        });

        let json = serde_json::to_string(&conversation).unwrap();
        let back: Conversation = serde_json::from_str(&json).unwrap();
        assert_eq!(back, conversation);
    }
}
