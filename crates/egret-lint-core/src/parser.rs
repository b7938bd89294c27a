//! Parser seam.
//!
//! `SourceParser` is the extension point for front ends. Implement it to turn
//! raw source text of some language into a [`SyntaxTree`] the rules can walk.

use crate::tree::SyntaxTree;

/// Errors a front end reports for source it cannot lower.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// The grammar could not be loaded into the parser.
    #[error("failed to load {language} grammar: {message}")]
    Language {
        /// Language identifier.
        language: &'static str,
        /// Underlying error message.
        message: String,
    },

    /// The parser returned no tree.
    #[error("parser produced no tree")]
    NoTree,

    /// The source contains a syntax error.
    #[error("syntax error at {line}:{column}")]
    Syntax {
        /// Line number (1-indexed).
        line: usize,
        /// Column number (1-indexed).
        column: usize,
    },
}

/// Trait for language front ends.
pub trait SourceParser: Send + Sync {
    /// Language identifier (e.g., `"typescript"`).
    fn language_id(&self) -> &'static str;

    /// File extensions this parser handles (e.g., `&[".ts"]`).
    fn extensions(&self) -> &'static [&'static str];

    /// Parses source text into a syntax tree.
    ///
    /// # Errors
    ///
    /// Returns a [`ParseError`] if the source cannot be parsed.
    fn parse(&self, source: &str) -> Result<SyntaxTree, ParseError>;

    /// Whether this parser handles `path`, judged by its extension.
    fn handles(&self, path: &std::path::Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .map(|e| format!(".{e}"))
            .is_some_and(|ext| self.extensions().contains(&ext.as_str()))
    }
}

/// Type alias for boxed parser trait objects.
pub type ParserBox = Box<dyn SourceParser>;
