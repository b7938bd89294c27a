//! Scope resolution for variable statements.

use egret_lint_core::NodeKind;

/// Where a variable statement is declared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scope {
    /// Inside a function or block. Global naming rules do not apply.
    Local,
    /// Top level of the compilation unit.
    Root,
    /// Directly inside a module or namespace body.
    Namespace,
}

impl Scope {
    /// Whether global naming rules apply.
    #[must_use]
    pub const fn is_global(self) -> bool {
        !matches!(self, Self::Local)
    }
}

/// Classifies a declaration site by the kind of its parent node.
///
/// A missing parent counts as the root.
#[must_use]
pub fn resolve_scope(parent: Option<NodeKind>) -> Scope {
    match parent {
        None | Some(NodeKind::SourceFile) => Scope::Root,
        Some(NodeKind::ModuleBlock) => Scope::Namespace,
        Some(_) => Scope::Local,
    }
}
