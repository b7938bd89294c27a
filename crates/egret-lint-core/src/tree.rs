//! Language-neutral syntax tree handed to rules.
//!
//! Parsers lower their concrete syntax tree into a [`SyntaxTree`]: an arena of
//! [`Node`]s keyed by [`NodeId`], each with a kind, an optional name, a
//! modifier set, a parent link and a byte span into the original source.
//! Only the declaration kinds rules care about get a dedicated [`NodeKind`];
//! everything else is [`NodeKind::Other`] and exists only to keep parent
//! links and traversal order faithful to the source.

use std::ops::Range;

/// Byte range of a node in the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Span {
    /// Byte offset of the first character.
    pub offset: usize,
    /// Length in bytes.
    pub width: usize,
}

impl Span {
    /// Creates a span from an offset and a width.
    #[must_use]
    pub const fn new(offset: usize, width: usize) -> Self {
        Self { offset, width }
    }

    /// Creates a span covering `start..end`.
    #[must_use]
    pub const fn from_range(start: usize, end: usize) -> Self {
        Self {
            offset: start,
            width: end.saturating_sub(start),
        }
    }

    /// Exclusive end offset.
    #[must_use]
    pub const fn end(&self) -> usize {
        self.offset + self.width
    }

    /// Byte range for slicing the source.
    #[must_use]
    pub const fn range(&self) -> Range<usize> {
        self.offset..self.end()
    }

    /// Whether `other` lies entirely inside this span.
    #[must_use]
    pub const fn contains(&self, other: Span) -> bool {
        other.offset >= self.offset && other.end() <= self.end()
    }
}

/// Kinds of nodes the naming rules distinguish.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// The compilation unit. Always the root.
    SourceFile,
    /// Body block of a module or namespace.
    ModuleBlock,
    /// `class Foo {}`
    ClassDeclaration,
    /// `interface IFoo {}`
    InterfaceDeclaration,
    /// `enum EFoo {}`
    EnumDeclaration,
    /// `module foo {}` / `namespace foo {}`
    ModuleDeclaration,
    /// Class method.
    MethodDeclaration,
    /// Class field.
    PropertyDeclaration,
    /// `var` / `let` / `const` statement.
    VariableStatement,
    /// One binding inside a variable statement.
    VariableDeclaration,
    /// Any other syntax.
    Other,
}

impl NodeKind {
    /// Whether nodes of this kind must carry a name.
    #[must_use]
    pub const fn requires_name(self) -> bool {
        matches!(
            self,
            Self::ClassDeclaration
                | Self::InterfaceDeclaration
                | Self::EnumDeclaration
                | Self::ModuleDeclaration
                | Self::MethodDeclaration
                | Self::PropertyDeclaration
                | Self::VariableDeclaration
        )
    }
}

impl std::fmt::Display for NodeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::SourceFile => "source file",
            Self::ModuleBlock => "module block",
            Self::ClassDeclaration => "class declaration",
            Self::InterfaceDeclaration => "interface declaration",
            Self::EnumDeclaration => "enum declaration",
            Self::ModuleDeclaration => "module declaration",
            Self::MethodDeclaration => "method declaration",
            Self::PropertyDeclaration => "property declaration",
            Self::VariableStatement => "variable statement",
            Self::VariableDeclaration => "variable declaration",
            Self::Other => "node",
        };
        f.write_str(s)
    }
}

/// A declaration modifier keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Modifier {
    /// `public`
    Public,
    /// `private`
    Private,
    /// `protected`
    Protected,
    /// `static`
    Static,
    /// `readonly`
    Readonly,
}

impl Modifier {
    const fn bit(self) -> u8 {
        match self {
            Self::Public => 1,
            Self::Private => 1 << 1,
            Self::Protected => 1 << 2,
            Self::Static => 1 << 3,
            Self::Readonly => 1 << 4,
        }
    }

    /// Maps a keyword to its modifier.
    #[must_use]
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "public" => Some(Self::Public),
            "private" => Some(Self::Private),
            "protected" => Some(Self::Protected),
            "static" => Some(Self::Static),
            "readonly" => Some(Self::Readonly),
            _ => None,
        }
    }
}

/// Set of modifiers attached to a declaration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Modifiers(u8);

impl Modifiers {
    /// The empty set.
    #[must_use]
    pub const fn empty() -> Self {
        Self(0)
    }

    /// Returns the set with `modifier` added.
    #[must_use]
    pub const fn with(self, modifier: Modifier) -> Self {
        Self(self.0 | modifier.bit())
    }

    /// Whether `modifier` is present.
    #[must_use]
    pub const fn contains(self, modifier: Modifier) -> bool {
        self.0 & modifier.bit() != 0
    }

    /// `static` present.
    #[must_use]
    pub const fn is_static(self) -> bool {
        self.contains(Modifier::Static)
    }

    /// `readonly` present.
    #[must_use]
    pub const fn is_readonly(self) -> bool {
        self.contains(Modifier::Readonly)
    }

    /// Neither `private` nor `protected`.
    #[must_use]
    pub const fn is_public(self) -> bool {
        !self.contains(Modifier::Private) && !self.contains(Modifier::Protected)
    }
}

impl FromIterator<Modifier> for Modifiers {
    fn from_iter<I: IntoIterator<Item = Modifier>>(iter: I) -> Self {
        iter.into_iter().fold(Self::empty(), Self::with)
    }
}

/// Index of a node inside its [`SyntaxTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    /// Position of the node in the arena.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

/// A single node of the tree.
#[derive(Debug, Clone)]
pub struct Node {
    kind: NodeKind,
    name: Option<Span>,
    modifiers: Modifiers,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    span: Span,
}

/// Errors raised when a tree breaks the contract rules rely on.
///
/// These indicate a defect in the parser that built the tree, not a problem
/// with the code being linted.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TreeError {
    /// A declaration node has no name.
    #[error("{kind} at byte {offset} has no name")]
    MissingName {
        /// Kind of the offending node.
        kind: NodeKind,
        /// Byte offset of the node.
        offset: usize,
    },

    /// A span points outside the source text or its node.
    #[error("{kind} at byte {offset} has a span outside its bounds")]
    SpanOutOfBounds {
        /// Kind of the offending node.
        kind: NodeKind,
        /// Byte offset of the node.
        offset: usize,
    },
}

/// Immutable syntax tree of one compilation unit plus its source text.
#[derive(Debug, Clone)]
pub struct SyntaxTree {
    source: String,
    nodes: Vec<Node>,
}

impl SyntaxTree {
    /// Creates a tree whose root is a [`NodeKind::SourceFile`] spanning the
    /// whole source.
    #[must_use]
    pub fn new(source: impl Into<String>) -> Self {
        let source = source.into();
        let root = Node {
            kind: NodeKind::SourceFile,
            name: None,
            modifiers: Modifiers::empty(),
            parent: None,
            children: Vec::new(),
            span: Span::new(0, source.len()),
        };
        Self {
            source,
            nodes: vec![root],
        }
    }

    /// Appends a node under `parent` and returns its id.
    ///
    /// Children are visited in insertion order.
    ///
    /// # Panics
    ///
    /// Panics if `parent` belongs to a different tree.
    pub fn push(&mut self, parent: NodeId, kind: NodeKind, span: Span) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            kind,
            name: None,
            modifiers: Modifiers::empty(),
            parent: Some(parent),
            children: Vec::new(),
            span,
        });
        self.nodes[parent.0].children.push(id);
        id
    }

    /// Sets the span of the node's name.
    pub fn set_name(&mut self, id: NodeId, name: Span) {
        self.nodes[id.0].name = Some(name);
    }

    /// Sets the node's modifiers.
    pub fn set_modifiers(&mut self, id: NodeId, modifiers: Modifiers) {
        self.nodes[id.0].modifiers = modifiers;
    }

    /// Id of the root node.
    #[must_use]
    pub const fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Full source text.
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Number of nodes including the root.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always false: the root node exists from construction.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Node by id.
    #[must_use]
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    /// Kind of a node.
    #[must_use]
    pub fn kind(&self, id: NodeId) -> NodeKind {
        self.nodes[id.0].kind
    }

    /// Span of a node.
    #[must_use]
    pub fn span(&self, id: NodeId) -> Span {
        self.nodes[id.0].span
    }

    /// Parent of a node, `None` for the root.
    #[must_use]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.0].parent
    }

    /// Children of a node in source order.
    #[must_use]
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id.0].children
    }

    /// Modifiers of a node.
    #[must_use]
    pub fn modifiers(&self, id: NodeId) -> Modifiers {
        self.nodes[id.0].modifiers
    }

    /// Span of the node's name, if it has one.
    #[must_use]
    pub fn name_span(&self, id: NodeId) -> Option<Span> {
        self.nodes[id.0].name
    }

    /// Text of the node's name, if it has one.
    #[must_use]
    pub fn name(&self, id: NodeId) -> Option<&str> {
        self.name_span(id)
            .and_then(|span| self.source.get(span.range()))
    }

    /// Source text covered by the node. Empty if the span is invalid.
    #[must_use]
    pub fn text(&self, id: NodeId) -> &str {
        self.source.get(self.span(id).range()).unwrap_or("")
    }

    /// Iterates over all nodes in pre-order, depth first.
    #[must_use]
    pub fn preorder(&self) -> Preorder<'_> {
        Preorder {
            tree: self,
            stack: vec![self.root()],
        }
    }

    /// Checks that every span lies in the source and inside its parent, and
    /// that named kinds carry a name.
    ///
    /// # Errors
    ///
    /// Returns the first [`TreeError`] found in pre-order.
    pub fn validate(&self) -> Result<(), TreeError> {
        for id in self.preorder() {
            let node = self.node(id);
            let in_source = self.source.get(node.span.range()).is_some();
            let in_parent = node
                .parent
                .map_or(true, |p| self.span(p).contains(node.span));
            let name_inside = node.name.map_or(true, |n| node.span.contains(n));
            if !in_source || !in_parent || !name_inside {
                return Err(TreeError::SpanOutOfBounds {
                    kind: node.kind,
                    offset: node.span.offset,
                });
            }
            if node.kind.requires_name() && node.name.is_none() {
                return Err(TreeError::MissingName {
                    kind: node.kind,
                    offset: node.span.offset,
                });
            }
        }
        Ok(())
    }
}

impl Node {
    /// Kind of this node.
    #[must_use]
    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    /// Span of this node.
    #[must_use]
    pub fn span(&self) -> Span {
        self.span
    }

    /// Parent of this node.
    #[must_use]
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Modifiers of this node.
    #[must_use]
    pub fn modifiers(&self) -> Modifiers {
        self.modifiers
    }

    /// Span of this node's name.
    #[must_use]
    pub fn name_span(&self) -> Option<Span> {
        self.name
    }
}

/// Pre-order iterator returned by [`SyntaxTree::preorder`].
pub struct Preorder<'a> {
    tree: &'a SyntaxTree,
    stack: Vec<NodeId>,
}

impl Iterator for Preorder<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let id = self.stack.pop()?;
        self.stack
            .extend(self.tree.children(id).iter().rev().copied());
        Some(id)
    }
}
