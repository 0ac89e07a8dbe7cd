use tracing::info;

use crate::{
    core::assistant::TravelAssistant,
    types::{
        conversation::ChatTurn,
        language::{FallbackMessage, Language},
    },
};

/// Caller-side state of one chat: the transcript plus the fallback policy.
///
/// `send` takes `&mut self`, so a session can only have one request in
/// flight at a time.
#[derive(Debug, Clone)]
pub struct ChatSession {
    turns: Vec<ChatTurn>,
    language: Language,
}

impl ChatSession {
    /// Start with the localized welcome message from the assistant.
    pub fn new(language: Language) -> Self {
        Self {
            turns: vec![ChatTurn::assistant(
                language.fallback(FallbackMessage::ChatWelcome),
            )],
            language,
        }
    }

    pub fn language(&self) -> Language {
        self.language
    }

    /// Switch the language used for the persona and fallback text of
    /// subsequent sends. Existing turns are kept.
    pub fn set_language(&mut self, language: Language) {
        self.language = language;
    }

    pub fn turns(&self) -> &[ChatTurn] {
        &self.turns
    }

    pub fn last_turn(&self) -> Option<&ChatTurn> {
        self.turns.last()
    }

    /// Append `text` and the assistant's answer to the transcript.
    ///
    /// Blank input is ignored and returns `None`. Otherwise the returned turn
    /// is the reply, the "couldn't generate" text when the model sent no text,
    /// or an errored bubble when the assistant could not be reached.
    pub async fn send(&mut self, assistant: &TravelAssistant, text: &str) -> Option<&ChatTurn> {
        if text.trim().is_empty() {
            return None;
        }

        let history_len = self.turns.len();
        self.turns.push(ChatTurn::user(text));

        let reply = assistant
            .send_conversation_turn(&self.turns[..history_len], text, self.language)
            .await;

        let turn = match reply {
            Ok(Some(reply)) => ChatTurn::assistant(reply),
            Ok(None) => ChatTurn::assistant(self.language.fallback(FallbackMessage::ChatOffline)),
            Err(err) => {
                info!(target: "safar::session", error_code = err.error_code(), "chat turn failed");
                ChatTurn::error(self.language.fallback(FallbackMessage::ChatError))
            }
        };

        self.turns.push(turn);
        self.turns.last()
    }
}
