//! Lowers a Tree-sitter concrete syntax tree to [`SyntaxNode`]s.
//!
//! Only nodes with a [`SyntaxKind`] survive; everything else is flattened
//! away and its interesting descendants are attached to the nearest kept
//! ancestor, preserving source order.

use std::path::Path;
use tree_sitter::Node;

use cstyle_core::{Location, SyntaxKind, SyntaxNode};

/// Node kinds that name the entity a declarator declares.
const NAME_KINDS: &[&str] = &[
    "identifier",
    "field_identifier",
    "type_identifier",
    "qualified_identifier",
    "destructor_name",
    "operator_name",
    "template_function",
];

/// What a declarator chain resolves to.
#[derive(Default)]
struct Declarator<'t> {
    name: Option<Node<'t>>,
    /// One `*` per pointer, `[]` per array, `()` per function level.
    suffix: String,
    /// Set when the name sits directly in a function declarator.
    parameters: Option<Node<'t>>,
    is_function: bool,
    value: Option<Node<'t>>,
}

/// Pending work for the lowering walk.
///
/// The walk runs off an explicit stack, so arbitrarily deep expressions or
/// `else if` chains cost heap, not call stack.
enum Task<'t> {
    /// Lower a concrete node into the innermost open node.
    Visit(Node<'t>),
    /// Start collecting children for a new node.
    Open(SyntaxNode),
    /// Finish the innermost open node and attach it to its parent.
    Close,
}

pub(crate) struct Lowering<'s> {
    src: &'s [u8],
    file: &'s Path,
}

impl<'s> Lowering<'s> {
    pub(crate) fn new(src: &'s [u8], file: &'s Path) -> Self {
        Self { src, file }
    }

    /// Lowers a whole file. The root carries the file path as spelling and
    /// no location.
    pub(crate) fn translation_unit(&self, root: Node<'_>) -> SyntaxNode {
        let mut unit = SyntaxNode::new(SyntaxKind::TranslationUnit, self.file.display().to_string());
        let mut open: Vec<SyntaxNode> = Vec::new();
        let mut tasks = vec![Task::Visit(root)];

        while let Some(task) = tasks.pop() {
            match task {
                Task::Visit(node) => tasks.extend(self.lower(node).into_iter().rev()),
                Task::Open(node) => open.push(node),
                Task::Close => {
                    if let Some(done) = open.pop() {
                        match open.last_mut() {
                            Some(parent) => parent.children.push(done),
                            None => unit.children.push(done),
                        }
                    }
                }
            }
        }

        unit
    }

    fn text(&self, node: Node<'_>) -> &'s str {
        node.utf8_text(self.src).unwrap_or("")
    }

    fn location(&self, node: Node<'_>) -> Location {
        let start = node.start_position();
        Location::new(self.file, start.row + 1, start.column + 1)
            .with_span(node.start_byte(), node.end_byte() - node.start_byte())
    }

    /// Tasks for one concrete node, in source order.
    fn lower<'t>(&self, node: Node<'t>) -> Vec<Task<'t>> {
        match node.kind() {
            "function_definition" => self.function_definition(node),
            "declaration" => self.declaration(node, SyntaxKind::VarDecl),
            "parameter_declaration" | "optional_parameter_declaration" => {
                self.declaration(node, SyntaxKind::ParmDecl)
            }
            "field_declaration" => self.declaration(node, SyntaxKind::FieldDecl),
            "type_definition" => self.declaration(node, SyntaxKind::TypedefDecl),
            "struct_specifier" => self.tagged(node, SyntaxKind::StructDecl),
            "union_specifier" => self.tagged(node, SyntaxKind::UnionDecl),
            "enum_specifier" => self.tagged(node, SyntaxKind::EnumDecl),
            "class_specifier" => self.tagged(node, SyntaxKind::ClassDecl),
            "namespace_definition" => self.named(node, SyntaxKind::Namespace, "name"),
            "enumerator" => self.named(node, SyntaxKind::EnumConstantDecl, "name"),
            "labeled_statement" => self.named(node, SyntaxKind::LabelStmt, "label"),
            "preproc_def" | "preproc_function_def" => {
                let name = node.child_by_field_name("name");
                single(self.leaf(node, SyntaxKind::MacroDefinition, name))
            }
            "return_statement" => {
                let leaf = self.leaf(node, SyntaxKind::ReturnStmt, None);
                enclose(leaf, named_children(node))
            }
            "goto_statement" => single(self.leaf(node, SyntaxKind::GotoStmt, None)),
            "comment" => Vec::new(),
            _ => named_children(node).into_iter().map(Task::Visit).collect(),
        }
    }

    /// A node whose spelling is `name` (or empty) and whose location is the
    /// name when present, the node itself otherwise.
    fn leaf<'t>(&self, node: Node<'t>, kind: SyntaxKind, name: Option<Node<'t>>) -> SyntaxNode {
        let spelling = name.map(|n| self.text(n)).unwrap_or_default();
        SyntaxNode::new(kind, spelling).at(self.location(name.unwrap_or(node)))
    }

    /// Named node whose every other named child is lowered beneath it.
    fn named<'t>(&self, node: Node<'t>, kind: SyntaxKind, field: &str) -> Vec<Task<'t>> {
        let name = node.child_by_field_name(field);
        let rest = named_children(node).into_iter().filter(|c| Some(*c) != name);
        enclose(self.leaf(node, kind, name), rest)
    }

    /// `struct`/`union`/`enum`/`class` specifiers. Only definitions (with a
    /// body) become nodes; references such as `struct stat *st` do not.
    fn tagged<'t>(&self, node: Node<'t>, kind: SyntaxKind) -> Vec<Task<'t>> {
        let Some(body) = node.child_by_field_name("body") else {
            return Vec::new();
        };
        let name = node.child_by_field_name("name");
        enclose(self.leaf(node, kind, name), [body])
    }

    fn function_definition<'t>(&self, node: Node<'t>) -> Vec<Task<'t>> {
        let mut tasks: Vec<Task<'t>> = node
            .child_by_field_name("type")
            .map(Task::Visit)
            .into_iter()
            .collect();

        let base = self.base_type(node);
        let decl = node
            .child_by_field_name("declarator")
            .map(unwrap_declarator)
            .unwrap_or_default();

        let func = self
            .leaf(node, SyntaxKind::FunctionDecl, decl.name.map(last_name))
            .with_type(join_type(&base, &decl.suffix));
        let inner = decl
            .parameters
            .into_iter()
            .chain(node.child_by_field_name("body"));
        tasks.extend(enclose(func, inner));
        tasks
    }

    /// Declarations, parameters, fields and typedefs: one node per declarator.
    fn declaration<'t>(&self, node: Node<'t>, kind: SyntaxKind) -> Vec<Task<'t>> {
        let mut tasks: Vec<Task<'t>> = node
            .child_by_field_name("type")
            .map(Task::Visit)
            .into_iter()
            .collect();
        let base = self.base_type(node);

        let mut cursor = node.walk();
        let declarators: Vec<Node<'t>> = node
            .children_by_field_name("declarator", &mut cursor)
            .collect();

        if declarators.is_empty() {
            // `void` or an unnamed parameter still occupies a slot.
            if kind == SyntaxKind::ParmDecl {
                tasks.extend(single(self.leaf(node, kind, None).with_type(base)));
            }
            return tasks;
        }

        for declarator in declarators {
            let decl = unwrap_declarator(declarator);
            let kind = match kind {
                SyntaxKind::VarDecl | SyntaxKind::FieldDecl if decl.is_function => {
                    SyntaxKind::FunctionDecl
                }
                other => other,
            };

            let lowered = self
                .leaf(declarator, kind, decl.name.map(last_name))
                .with_type(join_type(&base, &decl.suffix));
            let params = decl.parameters.filter(|_| decl.is_function);
            tasks.extend(enclose(lowered, params.into_iter().chain(decl.value)));
        }
        tasks
    }

    /// Declared type without declarators, e.g. `const char`.
    fn base_type(&self, node: Node<'_>) -> String {
        let ty = node.child_by_field_name("type");
        let mut parts: Vec<String> = Vec::new();
        let mut cursor = node.walk();
        for child in node.named_children(&mut cursor) {
            if child.kind() == "type_qualifier" {
                parts.push(self.text(child).to_string());
            } else if Some(child) == ty {
                parts.push(self.type_name(child));
            }
        }
        parts.join(" ")
    }

    /// Type specifier text; tagged definitions are reduced to `struct name`
    /// so member declarations do not leak into the type.
    fn type_name(&self, ty: Node<'_>) -> String {
        let keyword = match ty.kind() {
            "struct_specifier" => "struct",
            "union_specifier" => "union",
            "enum_specifier" => "enum",
            "class_specifier" => "class",
            _ => return self.text(ty).to_string(),
        };
        match ty.child_by_field_name("name") {
            Some(name) => format!("{keyword} {}", self.text(name)),
            None => keyword.to_string(),
        }
    }
}

/// Follows a declarator chain down to the declared name.
fn unwrap_declarator(node: Node<'_>) -> Declarator<'_> {
    let mut decl = Declarator::default();
    let mut current = Some(node);

    while let Some(node) = current {
        current = match node.kind() {
            kind if NAME_KINDS.contains(&kind) => {
                decl.name = Some(node);
                None
            }
            "pointer_declarator" | "abstract_pointer_declarator" => {
                decl.suffix.push('*');
                node.child_by_field_name("declarator")
            }
            "array_declarator" | "abstract_array_declarator" => {
                decl.suffix.push_str("[]");
                node.child_by_field_name("declarator")
            }
            "function_declarator" | "abstract_function_declarator" => {
                decl.suffix.push_str("()");
                let inner = node.child_by_field_name("declarator");
                if inner.is_some_and(|n| NAME_KINDS.contains(&n.kind())) {
                    decl.is_function = true;
                    decl.parameters = node.child_by_field_name("parameters");
                }
                inner
            }
            "init_declarator" => {
                decl.value = node.child_by_field_name("value");
                node.child_by_field_name("declarator")
            }
            "parenthesized_declarator"
            | "abstract_parenthesized_declarator"
            | "reference_declarator"
            | "abstract_reference_declarator"
            | "attributed_declarator" => inner_declarator(node),
            _ => None,
        };
    }

    decl
}

/// Opens `node`, visits `inner` beneath it, then closes it.
fn enclose<'t>(node: SyntaxNode, inner: impl IntoIterator<Item = Node<'t>>) -> Vec<Task<'t>> {
    let mut tasks = vec![Task::Open(node)];
    tasks.extend(inner.into_iter().map(Task::Visit));
    tasks.push(Task::Close);
    tasks
}

fn single<'t>(node: SyntaxNode) -> Vec<Task<'t>> {
    vec![Task::Open(node), Task::Close]
}

fn named_children(node: Node<'_>) -> Vec<Node<'_>> {
    let mut cursor = node.walk();
    let children = node.named_children(&mut cursor).collect();
    children
}

/// First named child that continues the declarator chain.
fn inner_declarator(node: Node<'_>) -> Option<Node<'_>> {
    let mut cursor = node.walk();
    let inner = node
        .named_children(&mut cursor)
        .find(|c| c.kind().ends_with("declarator") || NAME_KINDS.contains(&c.kind()));
    inner
}

/// `ns::Widget::resize` is spelled `resize`.
fn last_name(node: Node<'_>) -> Node<'_> {
    let mut node = node;
    while matches!(node.kind(), "qualified_identifier" | "template_function") {
        match node.child_by_field_name("name") {
            Some(inner) => node = inner,
            None => break,
        }
    }
    node
}

fn join_type(base: &str, suffix: &str) -> String {
    match (base.is_empty(), suffix.is_empty()) {
        (_, true) => base.to_string(),
        (true, false) => suffix.to_string(),
        (false, false) => format!("{base} {suffix}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn join_type_spacing() {
        assert_eq!(join_type("char", "**"), "char **");
        assert_eq!(join_type("int", ""), "int");
        assert_eq!(join_type("", "*"), "*");
    }
}
