//! Narrative message log.
//!
//! Write-only sink for the resolver, combat, and AI; the rendering
//! collaborator reads messages back in insertion order. Messages carry a
//! tone tag instead of a concrete color so display styling stays outside
//! the core.

use serde::{Deserialize, Serialize};

/// Display tone attached to a message; the renderer maps tones to colors.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MessageTone {
    Info,
    PlayerAttack,
    EnemyAttack,
    PlayerDeath,
    EnemyDeath,
    ItemUse,
    StatusEffect,
    Impossible,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub text: String,
    pub tone: MessageTone,
    /// How many consecutive times this message repeated.
    pub count: u32,
}

impl Message {
    /// The text as rendered, with a repeat marker when coalesced.
    pub fn full_text(&self) -> String {
        if self.count > 1 {
            format!("{} (x{})", self.text, self.count)
        } else {
            self.text.clone()
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageLog {
    messages: Vec<Message>,
}

impl MessageLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a message, coalescing consecutive duplicates into a count.
    pub fn add(&mut self, text: impl Into<String>, tone: MessageTone) {
        let text = text.into();
        if let Some(last) = self.messages.last_mut() {
            if last.text == text && last.tone == tone {
                last.count += 1;
                return;
            }
        }
        self.messages.push(Message {
            text,
            tone,
            count: 1,
        });
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }
}
