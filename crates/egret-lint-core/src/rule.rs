//! Rule trait for defining lint rules.

use crate::context::FileContext;
use crate::tree::{SyntaxTree, TreeError};
use crate::types::{Severity, Violation};

/// A per-file lint rule over a [`SyntaxTree`].
///
/// Rules receive the lowered tree of one file and return every violation
/// they find. A rule never stops at the first failure.
///
/// # Example
///
/// ```ignore
/// use egret_lint_core::{FileContext, Rule, SyntaxTree, TreeError, Violation};
///
/// pub struct NoEmptyFiles;
///
/// impl Rule for NoEmptyFiles {
///     fn name(&self) -> &'static str { "no-empty-files" }
///     fn code(&self) -> &'static str { "EG900" }
///
///     fn check(&self, ctx: &FileContext, tree: &SyntaxTree) -> Result<Vec<Violation>, TreeError> {
///         Ok(Vec::new())
///     }
/// }
/// ```
pub trait Rule: Send + Sync {
    /// Returns the kebab-case name of this rule (e.g., "ts-egret").
    fn name(&self) -> &'static str;

    /// Returns the rule code (e.g., "EG001").
    fn code(&self) -> &'static str;

    /// Returns a brief description of what this rule checks.
    fn description(&self) -> &'static str {
        ""
    }

    /// Returns the severity for violations from this rule.
    fn default_severity(&self) -> Severity {
        Severity::Error
    }

    /// Checks a single file and returns any violations found.
    ///
    /// # Errors
    ///
    /// Returns a [`TreeError`] if the tree breaks a structural precondition
    /// the rule depends on, such as a declaration without a name.
    fn check(&self, ctx: &FileContext, tree: &SyntaxTree) -> Result<Vec<Violation>, TreeError>;
}

/// Type alias for boxed Rule trait objects.
pub type RuleBox = Box<dyn Rule>;
