//! Typed view of the declaration nodes the naming rules inspect.

use egret_lint_core::{Modifiers, NodeId, NodeKind, Span, SyntaxTree, TreeError};

/// A name bound by a variable statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Binding<'t> {
    /// Bound identifier.
    pub name: &'t str,
    /// Span of the binding.
    pub span: Span,
}

/// A declaration, carrying exactly what its naming check needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Declaration<'t> {
    /// `class Foo {}`
    Class {
        /// Class name.
        name: &'t str,
        /// Span of the whole declaration.
        span: Span,
    },
    /// `interface IFoo {}`
    Interface {
        /// Interface name.
        name: &'t str,
        /// Span of the whole declaration.
        span: Span,
    },
    /// `enum EFoo {}`
    Enum {
        /// Enum name.
        name: &'t str,
        /// Span of the whole declaration.
        span: Span,
    },
    /// `module foo {}` / `namespace foo {}`
    Module {
        /// Module name.
        name: &'t str,
        /// Span of the whole declaration.
        span: Span,
    },
    /// Class method.
    Method {
        /// Method name.
        name: &'t str,
        /// Span of the name.
        name_span: Span,
        /// Declared modifiers.
        modifiers: Modifiers,
    },
    /// Class field.
    Property {
        /// Property name.
        name: &'t str,
        /// Span of the name.
        name_span: Span,
        /// Declared modifiers.
        modifiers: Modifiers,
    },
    /// `var` / `let` / `const` statement.
    VariableStatement {
        /// Source text of the statement.
        text: &'t str,
        /// Span of the statement.
        span: Span,
        /// Kind of the statement's parent, `None` if it has none.
        parent: Option<NodeKind>,
        /// Bound names in declaration order.
        bindings: Vec<Binding<'t>>,
    },
}

impl<'t> Declaration<'t> {
    /// Reads the declaration at `id`, or `None` for nodes no rule inspects.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::MissingName`] when a declaration node, or a
    /// binding of a variable statement, has no name.
    pub fn from_node(tree: &'t SyntaxTree, id: NodeId) -> Result<Option<Self>, TreeError> {
        let span = tree.span(id);
        let decl = match tree.kind(id) {
            NodeKind::ClassDeclaration => Self::Class {
                name: required_name(tree, id)?,
                span,
            },
            NodeKind::InterfaceDeclaration => Self::Interface {
                name: required_name(tree, id)?,
                span,
            },
            NodeKind::EnumDeclaration => Self::Enum {
                name: required_name(tree, id)?,
                span,
            },
            NodeKind::ModuleDeclaration => Self::Module {
                name: required_name(tree, id)?,
                span,
            },
            NodeKind::MethodDeclaration => Self::Method {
                name: required_name(tree, id)?,
                name_span: required_name_span(tree, id)?,
                modifiers: tree.modifiers(id),
            },
            NodeKind::PropertyDeclaration => Self::Property {
                name: required_name(tree, id)?,
                name_span: required_name_span(tree, id)?,
                modifiers: tree.modifiers(id),
            },
            NodeKind::VariableStatement => {
                let bindings = tree
                    .children(id)
                    .iter()
                    .filter(|child| tree.kind(**child) == NodeKind::VariableDeclaration)
                    .map(|child| {
                        Ok(Binding {
                            name: required_name(tree, *child)?,
                            span: tree.span(*child),
                        })
                    })
                    .collect::<Result<Vec<_>, TreeError>>()?;
                Self::VariableStatement {
                    text: tree.text(id),
                    span,
                    parent: tree.parent(id).map(|p| tree.kind(p)),
                    bindings,
                }
            }
            NodeKind::SourceFile
            | NodeKind::ModuleBlock
            | NodeKind::VariableDeclaration
            | NodeKind::Other => return Ok(None),
        };
        Ok(Some(decl))
    }
}

fn missing_name(tree: &SyntaxTree, id: NodeId) -> TreeError {
    TreeError::MissingName {
        kind: tree.kind(id),
        offset: tree.span(id).offset,
    }
}

fn required_name(tree: &SyntaxTree, id: NodeId) -> Result<&str, TreeError> {
    tree.name(id).ok_or_else(|| missing_name(tree, id))
}

fn required_name_span(tree: &SyntaxTree, id: NodeId) -> Result<Span, TreeError> {
    tree.name_span(id).ok_or_else(|| missing_name(tree, id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use egret_lint_core::Modifier;

    fn span_of(src: &str, needle: &str) -> Span {
        Span::new(src.find(needle).unwrap(), needle.len())
    }

    #[test]
    fn reads_class() {
        let src = "class TextField {}";
        let mut tree = SyntaxTree::new(src);
        let root = tree.root();
        let id = tree.push(root, NodeKind::ClassDeclaration, span_of(src, src));
        tree.set_name(id, span_of(src, "TextField"));

        let decl = Declaration::from_node(&tree, id).unwrap();
        assert_eq!(
            decl,
            Some(Declaration::Class {
                name: "TextField",
                span: Span::new(0, src.len())
            })
        );
    }

    #[test]
    fn reads_property_modifiers() {
        let src = "class A { private static s_x = 1; }";
        let mut tree = SyntaxTree::new(src);
        let root = tree.root();
        let class = tree.push(root, NodeKind::ClassDeclaration, span_of(src, src));
        tree.set_name(class, span_of(src, "A"));
        let prop = tree.push(
            class,
            NodeKind::PropertyDeclaration,
            span_of(src, "private static s_x = 1;"),
        );
        tree.set_name(prop, span_of(src, "s_x"));
        tree.set_modifiers(
            prop,
            [Modifier::Private, Modifier::Static].into_iter().collect(),
        );

        match Declaration::from_node(&tree, prop).unwrap() {
            Some(Declaration::Property {
                name, modifiers, ..
            }) => {
                assert_eq!(name, "s_x");
                assert!(modifiers.is_static());
                assert!(!modifiers.is_public());
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn reads_variable_bindings_in_order() {
        let src = "let g_a = 1, g_b = 2;";
        let mut tree = SyntaxTree::new(src);
        let root = tree.root();
        let stmt = tree.push(root, NodeKind::VariableStatement, span_of(src, src));
        for name in ["g_a", "g_b"] {
            let b = tree.push(stmt, NodeKind::VariableDeclaration, span_of(src, name));
            tree.set_name(b, span_of(src, name));
        }

        match Declaration::from_node(&tree, stmt).unwrap() {
            Some(Declaration::VariableStatement {
                text,
                parent,
                bindings,
                ..
            }) => {
                assert_eq!(text, src);
                assert_eq!(parent, Some(NodeKind::SourceFile));
                let names: Vec<&str> = bindings.iter().map(|b| b.name).collect();
                assert_eq!(names, ["g_a", "g_b"]);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn other_nodes_are_skipped() {
        let mut tree = SyntaxTree::new("foo();");
        let root = tree.root();
        let id = tree.push(root, NodeKind::Other, Span::new(0, 6));
        assert_eq!(Declaration::from_node(&tree, root).unwrap(), None);
        assert_eq!(Declaration::from_node(&tree, id).unwrap(), None);
    }

    #[test]
    fn unnamed_binding_fails_fast() {
        let src = "let = 1;";
        let mut tree = SyntaxTree::new(src);
        let root = tree.root();
        let stmt = tree.push(root, NodeKind::VariableStatement, span_of(src, src));
        tree.push(stmt, NodeKind::VariableDeclaration, Span::new(4, 0));

        assert_eq!(
            Declaration::from_node(&tree, stmt),
            Err(TreeError::MissingName {
                kind: NodeKind::VariableDeclaration,
                offset: 4
            })
        );
    }
}
