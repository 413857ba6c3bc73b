//! Read-only syntax tree facade handed over by a parser.

use crate::kind::SyntaxKind;
use crate::types::Location;

/// One node of a parsed translation unit.
///
/// Parsers lower their concrete syntax into this shape and only keep the
/// nodes whose kind is a [`SyntaxKind`]. Children are in source order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxNode {
    /// Syntactic category.
    pub kind: SyntaxKind,
    /// Declared identifier, empty for statements and anonymous entities.
    pub spelling: String,
    /// Textual type, e.g. `char **` or `int []`.
    pub type_text: String,
    /// Where the node comes from. `None` means no associated source.
    pub location: Option<Location>,
    /// Nested nodes in source order.
    pub children: Vec<SyntaxNode>,
}

impl SyntaxNode {
    /// Creates a node without type text, location or children.
    #[must_use]
    pub fn new(kind: SyntaxKind, spelling: impl Into<String>) -> Self {
        Self {
            kind,
            spelling: spelling.into(),
            type_text: String::new(),
            location: None,
            children: Vec::new(),
        }
    }

    /// Sets the textual type.
    #[must_use]
    pub fn with_type(mut self, type_text: impl Into<String>) -> Self {
        self.type_text = type_text.into();
        self
    }

    /// Sets the source location.
    #[must_use]
    pub fn at(mut self, location: Location) -> Self {
        self.location = Some(location);
        self
    }

    /// Appends a child node.
    #[must_use]
    pub fn with_child(mut self, child: SyntaxNode) -> Self {
        self.children.push(child);
        self
    }

    /// Appends several child nodes.
    #[must_use]
    pub fn with_children(mut self, children: impl IntoIterator<Item = SyntaxNode>) -> Self {
        self.children.extend(children);
        self
    }

    /// Number of pointer indirections in the type text.
    ///
    /// Array brackets count as indirections when `arrays_are_pointers` is set.
    #[must_use]
    pub fn pointer_depth(&self, arrays_are_pointers: bool) -> usize {
        let stars = self.type_text.matches('*').count();
        if arrays_are_pointers {
            stars + self.type_text.matches('[').count()
        } else {
            stars
        }
    }

    /// Iterates the tree parent-first, children in source order.
    #[must_use]
    pub fn walk_preorder(&self) -> Preorder<'_> {
        Preorder { stack: vec![self] }
    }
}

/// Pre-order iterator over a [`SyntaxNode`] tree.
#[derive(Debug)]
pub struct Preorder<'a> {
    stack: Vec<&'a SyntaxNode>,
}

impl<'a> Iterator for Preorder<'a> {
    type Item = &'a SyntaxNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children.iter().rev());
        Some(node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preorder_visits_parent_before_children() {
        let tree = SyntaxNode::new(SyntaxKind::FunctionDecl, "main")
            .with_child(SyntaxNode::new(SyntaxKind::ParmDecl, "argc"))
            .with_child(
                SyntaxNode::new(SyntaxKind::VarDecl, "buf")
                    .with_child(SyntaxNode::new(SyntaxKind::LabelStmt, "inner")),
            )
            .with_child(SyntaxNode::new(SyntaxKind::ReturnStmt, ""));

        let names: Vec<&str> = tree
            .walk_preorder()
            .map(|n| n.spelling.as_str())
            .collect();
        assert_eq!(names, ["main", "argc", "buf", "inner", ""]);
    }

    #[test]
    fn pointer_depth_counts_stars() {
        let node = SyntaxNode::new(SyntaxKind::ParmDecl, "ppArgv").with_type("char **");
        assert_eq!(node.pointer_depth(false), 2);
    }

    #[test]
    fn pointer_depth_counts_arrays_only_when_enabled() {
        let node = SyntaxNode::new(SyntaxKind::ParmDecl, "argv").with_type("char *[]");
        assert_eq!(node.pointer_depth(false), 1);
        assert_eq!(node.pointer_depth(true), 2);
    }
}
