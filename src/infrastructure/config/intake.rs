//! Parser keywords and message history sizing.

use serde::Deserialize;

use crate::application::parser::WagerTextParser;

/// `[parser]` section.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    /// Extra words that mark a token as a venue.
    pub venue_keywords: Vec<String>,
    /// Extra words that mark a token as a competition code.
    pub code_keywords: Vec<String>,
}

impl ParserConfig {
    #[must_use]
    pub fn build(&self) -> WagerTextParser {
        WagerTextParser::new().with_extra_keywords(&self.venue_keywords, &self.code_keywords)
    }
}

/// `[history]` section.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HistoryConfig {
    /// Messages remembered for resolving deletions.
    pub capacity: usize,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self { capacity: 512 }
    }
}
