//! Styled text lines for item names and lore.

use serde::{Deserialize, Serialize};

/// One line of display text with optional styling.
///
/// `None` styling means "inherit the client default".
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TextLine {
    pub text: String,
    pub color: Option<u32>,
    pub italic: Option<bool>,
}

impl TextLine {
    /// Unstyled text.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            color: None,
            italic: None,
        }
    }

    /// Set the color (builder pattern).
    #[must_use]
    pub fn with_color(mut self, color: u32) -> Self {
        self.color = Some(color);
        self
    }

    /// Disable the client's default italic styling.
    #[must_use]
    pub fn non_italic(mut self) -> Self {
        self.italic = Some(false);
        self
    }

    /// The text without styling.
    #[must_use]
    pub fn plain(&self) -> &str {
        &self.text
    }

    /// Does the plain text start with `prefix`?
    #[must_use]
    pub fn starts_with(&self, prefix: &str) -> bool {
        self.text.starts_with(prefix)
    }
}

impl From<&str> for TextLine {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

impl From<String> for TextLine {
    fn from(text: String) -> Self {
        Self::new(text)
    }
}

impl std::fmt::Display for TextLine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.text)
    }
}
