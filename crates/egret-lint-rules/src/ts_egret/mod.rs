//! Rule enforcing the Egret TypeScript naming convention.
//!
//! # Conventions
//!
//! | Declaration | Convention | Example |
//! |-------------|------------|---------|
//! | class | PascalCase | `TextField` |
//! | module / namespace | lower snake_case | `name_space` |
//! | interface | `I` + PascalCase | `IWatch` |
//! | enum | `E` + PascalCase | `EGameType` |
//! | `var` | forbidden | |
//! | global `const` | `C_` + UPPER_SNAKE_CASE | `C_GAME_NAME` |
//! | root `let` | `g_` + lower snake_case | `g_scene_hall` |
//! | namespace `let` | `p_` + lower snake_case | `p_hall` |
//! | method | camelCase | `toString` |
//! | static method | PascalCase | `CreateIns` |
//! | static property | `s_` + lower snake_case | `s_instance` |
//! | static readonly property | UPPER_SNAKE_CASE | `FAIL_CODE` |
//! | public property | `m_` + lower snake_case | `m_id` |
//! | private / protected property | `_` + lower snake_case | `_name` |
//!
//! Variables declared inside functions or blocks are exempt from the
//! `const`/`let` rules; `var` is reported everywhere.
//!
//! # Known limitation
//!
//! A statement is classified as `var` or `const` by searching its text before
//! the first `=` for those substrings, so `let variable = 1` is reported as a
//! `var` statement.

mod casing;
mod declaration;
mod scope;
mod tips;

pub use casing::{has_type_prefix, is_camel_case, is_lower_snake, is_pascal_case, is_upper_snake};
pub use declaration::{Binding, Declaration};
pub use scope::{resolve_scope, Scope};
pub use tips::{TipKey, WarnTips, EGRET_TIPS};

use egret_lint_core::{
    FileContext, Modifiers, NodeId, Rule, Severity, Span, SyntaxTree, TreeError, Violation,
};
use tracing::debug;

/// Rule code for ts-egret.
pub const CODE: &str = "EG001";

/// Rule name for ts-egret.
pub const NAME: &str = "ts-egret";

/// A failed naming check: where, which rule, and its message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Finding {
    /// Rule kind that failed.
    pub key: TipKey,
    /// Span the finding is anchored at.
    pub span: Span,
    /// Message from the tip table.
    pub message: &'static str,
}

/// How a variable statement was declared, judged from its text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VariableKind {
    /// `var`
    Var,
    /// `const`
    Const,
    /// Anything else, i.e. `let`.
    Let,
}

impl VariableKind {
    /// Classifies a statement by the text before its first `=`.
    #[must_use]
    pub fn classify(text: &str) -> Self {
        let head = text.split_once('=').map_or(text, |(head, _)| head);
        if head.contains("var") {
            Self::Var
        } else if head.contains("const") {
            Self::Const
        } else {
            Self::Let
        }
    }
}

/// Naming class of a property, decided by its modifiers alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropertyClass {
    /// `static readonly`
    StaticReadonly,
    /// `static`
    Static,
    /// Public instance property.
    Member,
    /// `private` or `protected` instance property.
    Private,
}

impl PropertyClass {
    /// Classifies a property.
    #[must_use]
    pub const fn of(modifiers: Modifiers) -> Self {
        if modifiers.is_static() {
            if modifiers.is_readonly() {
                Self::StaticReadonly
            } else {
                Self::Static
            }
        } else if modifiers.is_public() {
            Self::Member
        } else {
            Self::Private
        }
    }

    /// Key reported when a property of this class is misnamed.
    #[must_use]
    pub const fn tip(self) -> TipKey {
        match self {
            Self::StaticReadonly => TipKey::PropertySRd,
            Self::Static => TipKey::PropertyS,
            Self::Member => TipKey::PropertyM,
            Self::Private => TipKey::PropertyP,
        }
    }

    /// Whether `name` follows the convention for this class.
    #[must_use]
    pub fn accepts(self, name: &str) -> bool {
        match self {
            Self::StaticReadonly => is_upper_snake(name),
            Self::Static => name.starts_with("s_") && is_lower_snake(name),
            Self::Member => name.starts_with("m_") && is_lower_snake(name),
            Self::Private => name.starts_with('_') && is_lower_snake(name),
        }
    }
}

/// Enforces the Egret naming convention on TypeScript declarations.
#[derive(Debug, Clone, Copy)]
pub struct TsEgret {
    tips: &'static WarnTips,
}

impl Default for TsEgret {
    fn default() -> Self {
        Self::new()
    }
}

impl TsEgret {
    /// Creates the rule with the standard messages.
    #[must_use]
    pub fn new() -> Self {
        Self::with_tips(&EGRET_TIPS)
    }

    /// Creates the rule reporting messages from `tips`.
    #[must_use]
    pub const fn with_tips(tips: &'static WarnTips) -> Self {
        Self { tips }
    }

    /// Checks every node of `tree` in pre-order.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::MissingName`] on the first unnamed declaration.
    pub fn apply(&self, tree: &SyntaxTree) -> Result<Vec<Finding>, TreeError> {
        let mut findings = Vec::new();
        for id in tree.preorder() {
            self.visit(tree, id, &mut findings)?;
        }
        Ok(findings)
    }

    /// Checks the single node `id`, appending any findings.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::MissingName`] if the node is an unnamed
    /// declaration.
    pub fn visit(
        &self,
        tree: &SyntaxTree,
        id: NodeId,
        findings: &mut Vec<Finding>,
    ) -> Result<(), TreeError> {
        if let Some(decl) = Declaration::from_node(tree, id)? {
            self.check_declaration(&decl, findings);
        }
        Ok(())
    }

    /// Applies the naming checks for one declaration.
    pub fn check_declaration(&self, decl: &Declaration<'_>, findings: &mut Vec<Finding>) {
        let mut report = |key: TipKey, span: Span| {
            findings.push(Finding {
                key,
                span,
                message: self.tips.get(key),
            });
        };

        match decl {
            Declaration::Class { name, span } => {
                if !is_pascal_case(name) {
                    report(TipKey::Cls, *span);
                }
            }
            Declaration::Module { name, span } => {
                if !is_lower_snake(name) {
                    report(TipKey::Module, *span);
                }
            }
            Declaration::Interface { name, span } => {
                if !has_type_prefix(name, 'I') {
                    report(TipKey::Interface, *span);
                }
            }
            Declaration::Enum { name, span } => {
                if !has_type_prefix(name, 'E') {
                    report(TipKey::Enum, *span);
                }
            }
            Declaration::VariableStatement {
                text,
                span,
                parent,
                bindings,
            } => match VariableKind::classify(text) {
                VariableKind::Var => report(TipKey::Var, *span),
                VariableKind::Const => {
                    if !resolve_scope(*parent).is_global() {
                        return;
                    }
                    for binding in bindings {
                        if !is_upper_snake(binding.name) || !binding.name.starts_with("C_") {
                            report(TipKey::Const, binding.span);
                        }
                    }
                }
                VariableKind::Let => {
                    let scope = resolve_scope(*parent);
                    for binding in bindings {
                        let key = match scope {
                            Scope::Local => None,
                            _ if !is_lower_snake(binding.name) => Some(TipKey::Let),
                            Scope::Root if !binding.name.starts_with("g_") => Some(TipKey::LetG),
                            Scope::Namespace if !binding.name.starts_with("p_") => {
                                Some(TipKey::LetP)
                            }
                            Scope::Root | Scope::Namespace => None,
                        };
                        if let Some(key) = key {
                            report(key, binding.span);
                        }
                    }
                }
            },
            Declaration::Method {
                name,
                name_span,
                modifiers,
            } => {
                if modifiers.is_static() {
                    if !is_pascal_case(name) {
                        report(TipKey::MethodS, *name_span);
                    }
                } else if !is_camel_case(name) {
                    report(TipKey::Method, *name_span);
                }
            }
            Declaration::Property {
                name,
                name_span,
                modifiers,
            } => {
                let class = PropertyClass::of(*modifiers);
                if !class.accepts(name) {
                    report(class.tip(), *name_span);
                }
            }
        }
    }
}

impl Rule for TsEgret {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Enforces the Egret TypeScript naming convention"
    }

    fn default_severity(&self) -> Severity {
        Severity::Error
    }

    fn check(&self, ctx: &FileContext, tree: &SyntaxTree) -> Result<Vec<Violation>, TreeError> {
        let findings = self.apply(tree)?;
        Ok(findings
            .into_iter()
            .map(|finding| {
                debug!(
                    key = finding.key.as_str(),
                    offset = finding.span.offset,
                    "{}: naming violation",
                    ctx.relative_path.display()
                );
                Violation::new(
                    CODE,
                    NAME,
                    self.default_severity(),
                    ctx.location(finding.span),
                    finding.message,
                )
            })
            .collect())
    }
}
