//! # egret-lint-core
//!
//! Core framework for naming-convention linting over a language-neutral
//! syntax tree.
//!
//! This crate provides the foundational traits and types for building
//! linters. It includes:
//!
//! - [`SyntaxTree`] the arena tree front ends lower their parse into
//! - [`SourceParser`] trait for pluggable front ends
//! - [`Rule`] trait for per-file rules
//! - [`Analyzer`] for orchestrating lint execution
//! - [`Violation`] for representing lint findings
//!
//! ## Example
//!
//! ```ignore
//! use egret_lint_core::Analyzer;
//!
//! let analyzer = Analyzer::builder()
//!     .root("./src")
//!     .parser(MyParser::new())
//!     .rule(MyRule::new())
//!     .build()?;
//!
//! let result = analyzer.analyze()?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod analyzer;
mod config;
mod context;
mod parser;
mod rule;
mod tree;
mod types;

pub use analyzer::{Analyzer, AnalyzerBuilder, AnalyzerError};
pub use config::{AnalyzerConfig, Config, ConfigError, RuleConfig};
pub use context::FileContext;
pub use parser::{ParseError, ParserBox, SourceParser};
pub use rule::{Rule, RuleBox};
pub use tree::{Modifier, Modifiers, Node, NodeId, NodeKind, Preorder, Span, SyntaxTree, TreeError};
pub use types::{LintResult, Location, Severity, Violation, ViolationDiagnostic};
