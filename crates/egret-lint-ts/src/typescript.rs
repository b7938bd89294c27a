//! TypeScript front end using Tree-sitter.
//!
//! Parses with `tree-sitter-typescript` and lowers the concrete syntax tree
//! into a [`SyntaxTree`]. Only the declarations the naming rules inspect get
//! a dedicated [`NodeKind`]; other nodes with children become
//! [`NodeKind::Other`] so parent links stay faithful, and leaves are dropped.

use egret_lint_core::{
    Modifier, Modifiers, NodeId, NodeKind, ParseError, SourceParser, Span, SyntaxTree,
};
use tracing::debug;
use tree_sitter::{Language, Node, Parser};

/// Parses TypeScript (`.ts`) or TSX (`.tsx`) source.
pub struct TypeScriptParser {
    language: Language,
    language_id: &'static str,
    extensions: &'static [&'static str],
}

impl TypeScriptParser {
    /// Parser for `.ts` files, declaration files included.
    #[must_use]
    pub fn typescript() -> Self {
        Self {
            language: tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into(),
            language_id: "typescript",
            extensions: &[".ts"],
        }
    }

    /// Parser for `.tsx` files.
    #[must_use]
    pub fn tsx() -> Self {
        Self {
            language: tree_sitter_typescript::LANGUAGE_TSX.into(),
            language_id: "tsx",
            extensions: &[".tsx"],
        }
    }
}

impl Default for TypeScriptParser {
    fn default() -> Self {
        Self::typescript()
    }
}

impl SourceParser for TypeScriptParser {
    fn language_id(&self) -> &'static str {
        self.language_id
    }

    fn extensions(&self) -> &'static [&'static str] {
        self.extensions
    }

    fn parse(&self, source: &str) -> Result<SyntaxTree, ParseError> {
        let mut parser = Parser::new();
        parser
            .set_language(&self.language)
            .map_err(|e| ParseError::Language {
                language: self.language_id,
                message: e.to_string(),
            })?;

        let cst = parser.parse(source, None).ok_or(ParseError::NoTree)?;
        let root = cst.root_node();
        if root.has_error() {
            let at = first_error(root).unwrap_or(root).start_position();
            return Err(ParseError::Syntax {
                line: at.row + 1,
                column: at.column + 1,
            });
        }

        let mut lowering = Lowering {
            src: source.as_bytes(),
            tree: SyntaxTree::new(source),
        };
        let top = lowering.tree.root();
        lowering.children(root, top);

        debug!(
            language = self.language_id,
            nodes = lowering.tree.len(),
            "lowered syntax tree"
        );
        Ok(lowering.tree)
    }
}

/// Depth-first search for the first error or missing node.
fn first_error(node: Node<'_>) -> Option<Node<'_>> {
    if node.is_error() || node.is_missing() {
        return Some(node);
    }
    if !node.has_error() {
        return None;
    }
    let mut cursor = node.walk();
    let found = node.children(&mut cursor).find_map(first_error);
    found
}

fn span(node: Node<'_>) -> Span {
    Span::from_range(node.start_byte(), node.end_byte())
}

/// `namespace foo {}` parses as an expression statement.
fn wraps_namespace(node: Node<'_>) -> bool {
    let mut cursor = node.walk();
    let wraps = node
        .named_children(&mut cursor)
        .any(|child| child.kind() == "internal_module");
    wraps
}

/// Whether `node` has an anonymous child token with one of `kinds`.
fn has_token(node: Node<'_>, kinds: &[&str]) -> bool {
    let mut cursor = node.walk();
    let found = node
        .children(&mut cursor)
        .any(|child| !child.is_named() && kinds.contains(&child.kind()));
    found
}

/// Name span of a module; string names exclude the quotes.
fn module_name_span(name: Node<'_>) -> Span {
    if name.kind() == "string" && name.end_byte() - name.start_byte() >= 2 {
        Span::from_range(name.start_byte() + 1, name.end_byte() - 1)
    } else {
        span(name)
    }
}

/// Identifiers bound by a declarator name, in source order.
///
/// Default values and property keys of patterns are not bindings.
fn collect_bindings<'t>(node: Node<'t>, out: &mut Vec<Node<'t>>) {
    match node.kind() {
        "identifier" | "shorthand_property_identifier_pattern" => out.push(node),
        "pair_pattern" => {
            if let Some(value) = node.child_by_field_name("value") {
                collect_bindings(value, out);
            }
        }
        "assignment_pattern" | "object_assignment_pattern" => {
            if let Some(left) = node.child_by_field_name("left") {
                collect_bindings(left, out);
            }
        }
        "object_pattern" | "array_pattern" | "rest_pattern" => {
            let mut cursor = node.walk();
            for child in node.named_children(&mut cursor) {
                collect_bindings(child, out);
            }
        }
        _ => {}
    }
}

struct Lowering<'s> {
    src: &'s [u8],
    tree: SyntaxTree,
}

impl Lowering<'_> {
    fn text(&self, node: Node<'_>) -> &str {
        node.utf8_text(self.src).unwrap_or("")
    }

    fn push(&mut self, parent: NodeId, kind: NodeKind, node: Node<'_>) -> NodeId {
        self.tree.push(parent, kind, span(node))
    }

    fn children(&mut self, node: Node<'_>, parent: NodeId) {
        let mut cursor = node.walk();
        for child in node.named_children(&mut cursor) {
            self.lower(child, parent);
        }
    }

    fn lower(&mut self, node: Node<'_>, parent: NodeId) {
        match node.kind() {
            "comment" => {}
            "export_statement" => self.children(node, parent),
            "ambient_declaration" => self.ambient(node, parent),
            "expression_statement" if wraps_namespace(node) => self.children(node, parent),
            "module" | "internal_module" => self.module(node, parent),
            "class_declaration" | "abstract_class_declaration" => {
                self.named(node, parent, NodeKind::ClassDeclaration);
            }
            "interface_declaration" => self.named(node, parent, NodeKind::InterfaceDeclaration),
            "enum_declaration" => self.named(node, parent, NodeKind::EnumDeclaration),
            "class_body" => self.class_body(node, parent),
            "method_definition" | "abstract_method_signature" => self.method(node, parent),
            "public_field_definition" => self.property(node, parent),
            "lexical_declaration" | "variable_declaration" => self.variables(node, parent),
            "for_statement" => self.for_statement(node, parent),
            _ => self.other(node, parent),
        }
    }

    fn other(&mut self, node: Node<'_>, parent: NodeId) {
        if node.named_child_count() == 0 {
            return;
        }
        let id = self.push(parent, NodeKind::Other, node);
        self.children(node, id);
    }

    fn named(&mut self, node: Node<'_>, parent: NodeId, kind: NodeKind) {
        let id = self.push(parent, kind, node);
        if let Some(name) = node.child_by_field_name("name") {
            self.tree.set_name(id, span(name));
        }
        self.children(node, id);
    }

    fn module(&mut self, node: Node<'_>, parent: NodeId) {
        let id = self.push(parent, NodeKind::ModuleDeclaration, node);
        if let Some(name) = node.child_by_field_name("name") {
            self.tree.set_name(id, module_name_span(name));
        }
        let body = node.child_by_field_name("body");
        let mut cursor = node.walk();
        for child in node.named_children(&mut cursor) {
            if Some(child) == body {
                let block = self.push(id, NodeKind::ModuleBlock, child);
                self.children(child, block);
            } else {
                self.lower(child, id);
            }
        }
    }

    /// `declare` is transparent, except `declare global {}` which is a module.
    fn ambient(&mut self, node: Node<'_>, parent: NodeId) {
        let mut cursor = node.walk();
        let global = node
            .children(&mut cursor)
            .find(|child| !child.is_named() && child.kind() == "global");
        let Some(global) = global else {
            self.children(node, parent);
            return;
        };

        let id = self.push(parent, NodeKind::ModuleDeclaration, node);
        self.tree.set_name(id, span(global));
        let mut cursor = node.walk();
        for child in node.named_children(&mut cursor) {
            if child.kind() == "statement_block" {
                let block = self.push(id, NodeKind::ModuleBlock, child);
                self.children(child, block);
            } else {
                self.lower(child, id);
            }
        }
    }

    /// Members attach directly to the class; overload signatures are methods.
    fn class_body(&mut self, node: Node<'_>, parent: NodeId) {
        let mut cursor = node.walk();
        for child in node.named_children(&mut cursor) {
            if child.kind() == "method_signature" {
                self.method(child, parent);
            } else {
                self.lower(child, parent);
            }
        }
    }

    /// Identifier name of a member, `None` for computed or literal names.
    fn member_name<'t>(node: Node<'t>) -> Option<Node<'t>> {
        node.child_by_field_name("name").filter(|name| {
            matches!(
                name.kind(),
                "property_identifier" | "private_property_identifier"
            )
        })
    }

    fn modifiers(&self, node: Node<'_>) -> Modifiers {
        let mut cursor = node.walk();
        let modifiers = node
            .children(&mut cursor)
            .filter_map(|child| match child.kind() {
                "accessibility_modifier" => Modifier::from_keyword(self.text(child)),
                "static" | "readonly" if !child.is_named() => Modifier::from_keyword(child.kind()),
                _ => None,
            })
            .collect();
        modifiers
    }

    fn member(&mut self, node: Node<'_>, parent: NodeId, kind: NodeKind, name: Node<'_>) {
        let modifiers = self.modifiers(node);
        let id = self.push(parent, kind, node);
        self.tree.set_name(id, span(name));
        self.tree.set_modifiers(id, modifiers);
        self.children(node, id);
    }

    fn method(&mut self, node: Node<'_>, parent: NodeId) {
        let accessor = has_token(node, &["get", "set"]);
        match Self::member_name(node) {
            Some(name) if !accessor && self.text(name) != "constructor" => {
                self.member(node, parent, NodeKind::MethodDeclaration, name);
            }
            _ => self.other(node, parent),
        }
    }

    fn property(&mut self, node: Node<'_>, parent: NodeId) {
        match Self::member_name(node) {
            Some(name) => self.member(node, parent, NodeKind::PropertyDeclaration, name),
            None => self.other(node, parent),
        }
    }

    fn variables(&mut self, node: Node<'_>, parent: NodeId) {
        let id = self.push(parent, NodeKind::VariableStatement, node);
        let mut cursor = node.walk();
        let declarators: Vec<Node<'_>> = node
            .named_children(&mut cursor)
            .filter(|child| child.kind() == "variable_declarator")
            .collect();

        for declarator in &declarators {
            let mut bound = Vec::new();
            if let Some(pattern) = declarator.child_by_field_name("name") {
                collect_bindings(pattern, &mut bound);
            }
            for name in bound {
                let binding = self.push(id, NodeKind::VariableDeclaration, name);
                self.tree.set_name(binding, span(name));
            }
        }
        for declarator in declarators {
            if let Some(value) = declarator.child_by_field_name("value") {
                self.lower(value, id);
            }
        }
    }

    /// A `for` initializer declares loop variables, not a statement.
    fn for_statement(&mut self, node: Node<'_>, parent: NodeId) {
        let id = self.push(parent, NodeKind::Other, node);
        let initializer = node.child_by_field_name("initializer");
        let mut cursor = node.walk();
        for child in node.named_children(&mut cursor) {
            let is_declaration = matches!(
                child.kind(),
                "lexical_declaration" | "variable_declaration"
            );
            if is_declaration && Some(child) == initializer {
                self.children(child, id);
            } else {
                self.lower(child, id);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn parse(src: &str) -> SyntaxTree {
        TypeScriptParser::typescript()
            .parse(src)
            .expect("valid TypeScript")
    }

    /// Declaration nodes in pre-order as `(kind, name)`.
    fn declarations(tree: &SyntaxTree) -> Vec<(NodeKind, &str)> {
        tree.preorder()
            .filter(|id| !matches!(tree.kind(*id), NodeKind::Other | NodeKind::SourceFile))
            .map(|id| (tree.kind(id), tree.name(id).unwrap_or("")))
            .collect()
    }

    fn find(tree: &SyntaxTree, kind: NodeKind, name: &str) -> NodeId {
        tree.preorder()
            .find(|id| tree.kind(*id) == kind && tree.name(*id) == Some(name))
            .expect("node present")
    }

    fn parent_kind(tree: &SyntaxTree, id: NodeId) -> Option<NodeKind> {
        tree.parent(id).map(|p| tree.kind(p))
    }

    #[test]
    fn lowers_namespace_body() {
        let tree = parse("namespace game {\n    let p_hall = 1;\n}\n");
        assert_eq!(
            declarations(&tree),
            [
                (NodeKind::ModuleDeclaration, "game"),
                (NodeKind::ModuleBlock, ""),
                (NodeKind::VariableStatement, ""),
                (NodeKind::VariableDeclaration, "p_hall"),
            ]
        );
        let module = find(&tree, NodeKind::ModuleDeclaration, "game");
        assert_eq!(parent_kind(&tree, module), Some(NodeKind::SourceFile));

        let stmt = tree
            .preorder()
            .find(|id| tree.kind(*id) == NodeKind::VariableStatement)
            .expect("statement");
        assert_eq!(parent_kind(&tree, stmt), Some(NodeKind::ModuleBlock));
        assert_eq!(tree.text(stmt), "let p_hall = 1;");
    }

    #[test]
    fn module_names() {
        let tree = parse("declare module \"egret\" {}\nmodule a.b {}\n");
        let names: Vec<&str> = declarations(&tree)
            .into_iter()
            .filter(|(kind, _)| *kind == NodeKind::ModuleDeclaration)
            .map(|(_, name)| name)
            .collect();
        assert_eq!(names, ["egret", "a.b"]);
    }

    #[test]
    fn declare_global_is_a_module() {
        let tree = parse("declare global {\n    let p_stage: number;\n}\ndeclare var g_x: number;\n");
        let module = find(&tree, NodeKind::ModuleDeclaration, "global");
        assert_eq!(parent_kind(&tree, module), Some(NodeKind::SourceFile));

        let stage = find(&tree, NodeKind::VariableDeclaration, "p_stage");
        let stmt = tree.parent(stage).expect("statement");
        assert_eq!(parent_kind(&tree, stmt), Some(NodeKind::ModuleBlock));

        let x = find(&tree, NodeKind::VariableDeclaration, "g_x");
        let stmt = tree.parent(x).expect("statement");
        assert_eq!(parent_kind(&tree, stmt), Some(NodeKind::SourceFile));
    }

    #[test]
    fn export_is_transparent() {
        let tree = parse("export class Hall {}\nexport const C_X = 1;\n");
        let class = find(&tree, NodeKind::ClassDeclaration, "Hall");
        assert_eq!(parent_kind(&tree, class), Some(NodeKind::SourceFile));
        let binding = find(&tree, NodeKind::VariableDeclaration, "C_X");
        let stmt = tree.parent(binding).expect("statement");
        assert_eq!(parent_kind(&tree, stmt), Some(NodeKind::SourceFile));
    }

    #[test]
    fn class_members() {
        let src = "abstract class Hall {
    private static readonly FAIL_CODE = 1;
    protected _name: string;
    m_id = 0;
    constructor() {}
    get size() { return 1; }
    set size(v: number) {}
    static CreateIns(): Hall { return null; }
    public toString(): string { return ''; }
    abstract run(): void;
}";
        let tree = parse(src);
        assert_eq!(
            declarations(&tree),
            [
                (NodeKind::ClassDeclaration, "Hall"),
                (NodeKind::PropertyDeclaration, "FAIL_CODE"),
                (NodeKind::PropertyDeclaration, "_name"),
                (NodeKind::PropertyDeclaration, "m_id"),
                (NodeKind::MethodDeclaration, "CreateIns"),
                (NodeKind::MethodDeclaration, "toString"),
                (NodeKind::MethodDeclaration, "run"),
            ]
        );

        let code = find(&tree, NodeKind::PropertyDeclaration, "FAIL_CODE");
        let modifiers = tree.modifiers(code);
        assert!(modifiers.contains(Modifier::Private));
        assert!(modifiers.is_static());
        assert!(modifiers.is_readonly());

        let name = find(&tree, NodeKind::PropertyDeclaration, "_name");
        assert!(tree.modifiers(name).contains(Modifier::Protected));

        let create = find(&tree, NodeKind::MethodDeclaration, "CreateIns");
        assert!(tree.modifiers(create).is_static());
        assert!(tree.modifiers(create).is_public());

        let to_string = find(&tree, NodeKind::MethodDeclaration, "toString");
        assert!(tree.modifiers(to_string).contains(Modifier::Public));
        assert!(!tree.modifiers(to_string).is_static());
    }

    #[test]
    fn computed_member_names_are_not_declarations() {
        let tree = parse("class Hall {\n    [\"x\"]() {}\n    'y' = 1;\n    2 = 3;\n}\n");
        assert_eq!(declarations(&tree), [(NodeKind::ClassDeclaration, "Hall")]);
    }

    #[test]
    fn interface_and_enum() {
        let tree = parse("interface IWatch { run(): void; }\nenum EGameType { A, B }\n");
        assert_eq!(
            declarations(&tree),
            [
                (NodeKind::InterfaceDeclaration, "IWatch"),
                (NodeKind::EnumDeclaration, "EGameType"),
            ]
        );
    }

    #[test]
    fn destructuring_binds_each_identifier() {
        let tree = parse(
            "const { a, b: c, d = 1, ...rest } = obj;\nlet [x, , y = 2] = arr;\nvar p = 1, q;\n",
        );
        let names: Vec<&str> = declarations(&tree)
            .into_iter()
            .filter(|(kind, _)| *kind == NodeKind::VariableDeclaration)
            .map(|(_, name)| name)
            .collect();
        assert_eq!(names, ["a", "c", "d", "rest", "x", "y", "p", "q"]);
    }

    #[test]
    fn binding_span_is_the_identifier() {
        let src = "let g_a = 1, g_b = 2;";
        let tree = parse(src);
        let b = find(&tree, NodeKind::VariableDeclaration, "g_b");
        assert_eq!(tree.span(b), Span::new(src.find("g_b").expect("name"), 3));
        assert_eq!(tree.name_span(b), Some(tree.span(b)));
    }

    #[test]
    fn for_initializer_is_not_a_statement() {
        let tree = parse("for (let i = 0; i < 2; i++) {\n    let g_x = i;\n}\n");
        let statements: Vec<NodeId> = tree
            .preorder()
            .filter(|id| tree.kind(*id) == NodeKind::VariableStatement)
            .collect();
        assert_eq!(statements.len(), 1);
        assert_eq!(tree.text(statements[0]), "let g_x = i;");
        assert_eq!(parent_kind(&tree, statements[0]), Some(NodeKind::Other));
    }

    #[test]
    fn function_locals_have_a_non_declaration_parent() {
        let tree = parse("function f() {\n    var x = 1;\n}\n");
        let x = find(&tree, NodeKind::VariableDeclaration, "x");
        let stmt = tree.parent(x).expect("statement");
        assert_eq!(parent_kind(&tree, stmt), Some(NodeKind::Other));
    }

    #[test]
    fn nested_declarations_in_initializers() {
        let tree = parse("const C_F = function () {\n    var inner = 1;\n};\n");
        assert!(tree
            .preorder()
            .any(|id| tree.name(id) == Some("inner")));
    }

    #[test]
    fn lowered_tree_is_valid() {
        let src = "namespace game {\n    export class Hall {\n        private _a = 1;\n        run() { let b = [1, 2].map(x => x * 2); }\n    }\n}\n";
        assert_eq!(parse(src).validate(), Ok(()));
    }

    #[test]
    fn syntax_errors_are_rejected() {
        let err = TypeScriptParser::typescript()
            .parse("let g_a = 1;\nlet g_b = ;\n")
            .expect_err("invalid TypeScript");
        assert!(matches!(err, ParseError::Syntax { line: 2, .. }), "{err:?}");
        assert!(err.to_string().starts_with("syntax error at 2:"));
    }

    #[test]
    fn tsx_parses_jsx() {
        let parser = TypeScriptParser::tsx();
        let tree = parser
            .parse("const C_VIEW = <div className=\"hall\" />;\n")
            .expect("valid TSX");
        assert!(tree
            .preorder()
            .any(|id| tree.name(id) == Some("C_VIEW")));
    }

    #[test]
    fn parser_selection_by_extension() {
        let ts = TypeScriptParser::typescript();
        let tsx = TypeScriptParser::tsx();
        assert!(ts.handles(Path::new("src/Main.ts")));
        assert!(ts.handles(Path::new("libs/egret.d.ts")));
        assert!(!ts.handles(Path::new("src/View.tsx")));
        assert!(tsx.handles(Path::new("src/View.tsx")));
        assert_eq!(ts.language_id(), "typescript");
        assert_eq!(tsx.language_id(), "tsx");
    }
}
