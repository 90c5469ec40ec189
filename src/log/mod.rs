//! In-game message log
//!
//! Collects player-facing messages with their colors. Consecutive identical
//! messages stack into a repeat count instead of flooding the log.

pub mod colors;

use serde::{Deserialize, Serialize};

use crate::core::types::Color;

/// A logged message: text, color, and number of occurrences
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub text: String,
    pub color: Color,
    pub count: u32,
}

impl Message {
    pub fn new(text: impl Into<String>, color: Color) -> Self {
        Self {
            text: text.into(),
            color,
            count: 1,
        }
    }

    /// The display text, including the repeat count when above one
    pub fn full_text(&self) -> String {
        if self.count > 1 {
            format!("{} (x{})", self.text, self.count)
        } else {
            self.text.clone()
        }
    }
}

/// Ordered collection of game messages
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MessageLog {
    messages: Vec<Message>,
}

impl MessageLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a message, stacking onto the previous entry if the text matches
    pub fn add(&mut self, text: impl Into<String>, color: Color) {
        self.push(text, color, true);
    }

    /// Add a message with explicit stacking behavior
    pub fn push(&mut self, text: impl Into<String>, color: Color, stack: bool) {
        let text = text.into();
        if stack {
            if let Some(last) = self.messages.last_mut() {
                if last.text == text {
                    last.count += 1;
                    return;
                }
            }
        }
        self.messages.push(Message::new(text, color));
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// The most recent `n` messages, oldest first
    pub fn recent(&self, n: usize) -> &[Message] {
        let start = self.messages.len().saturating_sub(n);
        &self.messages[start..]
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}
