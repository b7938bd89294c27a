//! # egret-lint-ts
//!
//! Tree-sitter based TypeScript front end for egret-lint.
//!
//! [`TypeScriptParser`] implements `egret_lint_core::SourceParser`: it parses
//! `.ts` or `.tsx` source with `tree-sitter-typescript` and lowers the result
//! into the language-neutral `SyntaxTree` the naming rules walk.
//!
//! ```ignore
//! use egret_lint_core::Analyzer;
//! use egret_lint_rules::TsEgret;
//! use egret_lint_ts::TypeScriptParser;
//!
//! let analyzer = Analyzer::builder()
//!     .root("./src")
//!     .parser(TypeScriptParser::typescript())
//!     .parser(TypeScriptParser::tsx())
//!     .rule(TsEgret::new())
//!     .build()?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod typescript;

pub use typescript::TypeScriptParser;
