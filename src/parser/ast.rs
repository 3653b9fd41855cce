// AST (Abstract Syntax Tree) definitions for minic

use std::fmt;

/// Kind tag of an AST node.
///
/// The kind decides how many children a node has and whether it carries leaf
/// text; see [`Node`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Program,
    Function,
    Params,
    Param,
    Statements,
    Declaration,
    Identifier,
    Type,
    IfStatement,
    If,
    Condition,
    Operator,
    Assignment,
    Expression,
    Term,
    Integer,
    ReturnStatement,
    Return,
}

impl NodeKind {
    pub fn name(self) -> &'static str {
        match self {
            NodeKind::Program => "program",
            NodeKind::Function => "function",
            NodeKind::Params => "params",
            NodeKind::Param => "param",
            NodeKind::Statements => "statements",
            NodeKind::Declaration => "declaration",
            NodeKind::Identifier => "identifier",
            NodeKind::Type => "type",
            NodeKind::IfStatement => "if_statement",
            NodeKind::If => "if",
            NodeKind::Condition => "condition",
            NodeKind::Operator => "operator",
            NodeKind::Assignment => "assignment",
            NodeKind::Expression => "expression",
            NodeKind::Term => "term",
            NodeKind::Integer => "integer",
            NodeKind::ReturnStatement => "return_statement",
            NodeKind::Return => "return",
        }
    }

    /// Terminal kinds always carry leaf text and never have children.
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            NodeKind::Param
                | NodeKind::Identifier
                | NodeKind::Type
                | NodeKind::If
                | NodeKind::Operator
                | NodeKind::Integer
                | NodeKind::Return
        )
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One node of the syntax tree.
///
/// A node is either a composite (ordered children, no leaf) or a terminal
/// (leaf text, no children). Children are owned exclusively by their parent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub kind: NodeKind,
    pub children: Vec<Node>,
    pub leaf: Option<String>,
}

impl Node {
    pub fn composite(kind: NodeKind, children: Vec<Node>) -> Self {
        Self {
            kind,
            children,
            leaf: None,
        }
    }

    pub fn terminal(kind: NodeKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            children: Vec::new(),
            leaf: Some(text.into()),
        }
    }

    pub fn child(&self, index: usize) -> Option<&Node> {
        self.children.get(index)
    }

    pub fn leaf(&self) -> Option<&str> {
        self.leaf.as_deref()
    }

    /// Indented multi-line rendering, two spaces per level.
    ///
    /// Walks the tree with an explicit stack, so long operator chains render
    /// without deep recursion.
    pub fn pretty(&self) -> String {
        let mut out = String::new();
        let mut pending = vec![(self, 0usize)];

        while let Some((node, level)) = pending.pop() {
            out.push_str(&"  ".repeat(level));
            out.push_str(node.kind.name());
            if let Some(leaf) = &node.leaf {
                out.push_str(" (");
                out.push_str(leaf);
                out.push(')');
            }
            out.push('\n');
            pending.extend(node.children.iter().rev().map(|child| (child, level + 1)));
        }
        out
    }

    /// The pretty rendering split into lines, as the UI wants it.
    pub fn pretty_lines(&self) -> Vec<String> {
        self.pretty().lines().map(str::to_string).collect()
    }
}

/// Children are released iteratively; the parser builds left-deep chains
/// thousands of levels deep for flat sums.
impl Drop for Node {
    fn drop(&mut self) {
        let mut pending = std::mem::take(&mut self.children);
        while let Some(mut node) = pending.pop() {
            pending.append(&mut node.children);
        }
    }
}

/// Compact single-line form, e.g. `assignment[identifier(b), operator(=), integer(1)]`.
impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.leaf {
            Some(leaf) => write!(f, "{}({})", self.kind, leaf),
            None => {
                write!(f, "{}[", self.kind)?;
                for (i, child) in self.children.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", child)?;
                }
                write!(f, "]")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compact_display() {
        let node = Node::composite(
            NodeKind::Declaration,
            vec![
                Node::terminal(NodeKind::Type, "int"),
                Node::terminal(NodeKind::Identifier, "b"),
            ],
        );
        assert_eq!(node.to_string(), "declaration[type(int), identifier(b)]");
    }

    #[test]
    fn test_pretty_indentation() {
        let node = Node::composite(
            NodeKind::Params,
            vec![
                Node::terminal(NodeKind::Param, "int"),
                Node::terminal(NodeKind::Identifier, "a"),
            ],
        );
        assert_eq!(node.pretty(), "params\n  param (int)\n  identifier (a)\n");
    }

    #[test]
    fn test_deep_chain_pretty_and_drop() {
        let mut node = Node::terminal(NodeKind::Integer, "1");
        for _ in 0..100_000 {
            node = Node::composite(
                NodeKind::Expression,
                vec![
                    node,
                    Node::terminal(NodeKind::Operator, "+"),
                    Node::terminal(NodeKind::Integer, "1"),
                ],
            );
        }
        let shallow = node.children[1].pretty();
        assert_eq!(shallow, "operator (+)\n");
        drop(node);

        let mut nested = Node::terminal(NodeKind::Integer, "1");
        for _ in 0..3 {
            nested = Node::composite(NodeKind::Expression, vec![nested]);
        }
        assert_eq!(
            nested.pretty(),
            "expression\n  expression\n    expression\n      integer (1)\n"
        );
    }

    #[test]
    fn test_empty_composite() {
        let node = Node::composite(NodeKind::Params, Vec::new());
        assert_eq!(node.to_string(), "params[]");
        assert!(node.leaf().is_none());
        assert!(!NodeKind::Params.is_terminal());
    }
}
