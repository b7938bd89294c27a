//! # egret-lint-rules
//!
//! Built-in naming rules for egret-lint.
//!
//! ## Available Rules
//!
//! | Code | Name | Description |
//! |------|------|-------------|
//! | EG001 | `ts-egret` | Enforces the Egret TypeScript naming convention |
//!
//! ## Usage
//!
//! ```ignore
//! use egret_lint_core::Analyzer;
//! use egret_lint_rules::TsEgret;
//!
//! let analyzer = Analyzer::builder()
//!     .root("./src")
//!     .parser(parser)
//!     .rule(TsEgret::new())
//!     .build()?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod ts_egret;

pub use ts_egret::{Declaration, Finding, Scope, TipKey, TsEgret, WarnTips, EGRET_TIPS};

/// Re-export core types for convenience.
pub use egret_lint_core::{Rule, Severity, Violation};

use egret_lint_core::RuleBox;

/// Returns every built-in rule with its default settings.
#[must_use]
pub fn all_rules() -> Vec<RuleBox> {
    vec![Box::new(TsEgret::new())]
}
