//! Concrete syntax tree decoded from the external HCL grammar.
//!
//! The grammar reports node kinds as strings. They are decoded exactly once,
//! at this boundary, into the closed [`NodeKind`] enumeration so the compiler
//! can match exhaustively. Kinds outside the taxonomy land in
//! [`NodeKind::Other`] with their raw string kept for diagnostics, never in a
//! silent default.

use crate::error::{Result, TfxError};

/// The grammar's node taxonomy, as far as the compiler cares about it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    ConfigFile,
    Body,
    Block,
    Attribute,
    Expression,
    VariableExpr,
    Identifier,
    FunctionCall,
    FunctionArguments,
    GetAttr,
    Index,
    Conditional,
    Operation,
    UnaryOperation,
    BinaryOperation,
    Splat,
    AttrSplat,
    FullSplat,
    LiteralValue,
    NumericLit,
    BoolLit,
    NullLit,
    StringLit,
    CollectionValue,
    Tuple,
    TupleStart,
    TupleEnd,
    Object,
    ObjectElem,
    ObjectStart,
    ObjectEnd,
    Comment,
    /// Anything outside the taxonomy above (for-expressions, template
    /// expressions, ...), with the grammar's raw kind string.
    Other(String),
}

impl NodeKind {
    fn from_grammar(kind: &str) -> NodeKind {
        match kind {
            "config_file" => NodeKind::ConfigFile,
            "body" => NodeKind::Body,
            "block" => NodeKind::Block,
            "attribute" => NodeKind::Attribute,
            "expression" => NodeKind::Expression,
            "variable_expr" => NodeKind::VariableExpr,
            "identifier" => NodeKind::Identifier,
            "function_call" => NodeKind::FunctionCall,
            "function_arguments" => NodeKind::FunctionArguments,
            "get_attr" => NodeKind::GetAttr,
            "index" => NodeKind::Index,
            "conditional" => NodeKind::Conditional,
            "operation" => NodeKind::Operation,
            "unary_operation" => NodeKind::UnaryOperation,
            "binary_operation" => NodeKind::BinaryOperation,
            "splat" => NodeKind::Splat,
            "attr_splat" => NodeKind::AttrSplat,
            "full_splat" => NodeKind::FullSplat,
            "literal_value" => NodeKind::LiteralValue,
            "numeric_lit" => NodeKind::NumericLit,
            "bool_lit" => NodeKind::BoolLit,
            "null_lit" => NodeKind::NullLit,
            "string_lit" => NodeKind::StringLit,
            "collection_value" => NodeKind::CollectionValue,
            "tuple" => NodeKind::Tuple,
            "tuple_start" => NodeKind::TupleStart,
            "tuple_end" => NodeKind::TupleEnd,
            "object" => NodeKind::Object,
            "object_elem" => NodeKind::ObjectElem,
            "object_start" => NodeKind::ObjectStart,
            "object_end" => NodeKind::ObjectEnd,
            "comment" => NodeKind::Comment,
            other => NodeKind::Other(other.to_string()),
        }
    }

    /// Grammar name of this kind, for diagnostics.
    pub fn name(&self) -> &str {
        match self {
            NodeKind::ConfigFile => "config_file",
            NodeKind::Body => "body",
            NodeKind::Block => "block",
            NodeKind::Attribute => "attribute",
            NodeKind::Expression => "expression",
            NodeKind::VariableExpr => "variable_expr",
            NodeKind::Identifier => "identifier",
            NodeKind::FunctionCall => "function_call",
            NodeKind::FunctionArguments => "function_arguments",
            NodeKind::GetAttr => "get_attr",
            NodeKind::Index => "index",
            NodeKind::Conditional => "conditional",
            NodeKind::Operation => "operation",
            NodeKind::UnaryOperation => "unary_operation",
            NodeKind::BinaryOperation => "binary_operation",
            NodeKind::Splat => "splat",
            NodeKind::AttrSplat => "attr_splat",
            NodeKind::FullSplat => "full_splat",
            NodeKind::LiteralValue => "literal_value",
            NodeKind::NumericLit => "numeric_lit",
            NodeKind::BoolLit => "bool_lit",
            NodeKind::NullLit => "null_lit",
            NodeKind::StringLit => "string_lit",
            NodeKind::CollectionValue => "collection_value",
            NodeKind::Tuple => "tuple",
            NodeKind::TupleStart => "tuple_start",
            NodeKind::TupleEnd => "tuple_end",
            NodeKind::Object => "object",
            NodeKind::ObjectElem => "object_elem",
            NodeKind::ObjectStart => "object_start",
            NodeKind::ObjectEnd => "object_end",
            NodeKind::Comment => "comment",
            NodeKind::Other(kind) => kind,
        }
    }
}

/// One node of the concrete syntax tree, detached from the grammar's arena.
///
/// `children` holds *every* child in source order, punctuation and separator
/// tokens included. `is_named` is the grammar's own flag marking the
/// semantically meaningful subset; it is copied verbatim and never changed.
#[derive(Debug, Clone)]
pub struct CstNode {
    pub kind: NodeKind,
    /// Raw source text spanned by this node.
    pub text: String,
    pub is_named: bool,
    pub children: Vec<CstNode>,
}

impl CstNode {
    /// Decode a tree-sitter node (and its whole subtree) into a detached CST.
    pub fn from_tree_sitter(node: tree_sitter::Node<'_>, source: &str) -> Result<CstNode> {
        let text = node
            .utf8_text(source.as_bytes())
            .map_err(|e| TfxError::Structural(format!("node text is not valid UTF-8: {e}")))?
            .to_string();
        let mut children = Vec::with_capacity(node.child_count());
        for i in 0..node.child_count() {
            if let Some(child) = node.child(i) {
                children.push(CstNode::from_tree_sitter(child, source)?);
            }
        }
        Ok(CstNode {
            kind: NodeKind::from_grammar(node.kind()),
            text,
            is_named: node.is_named(),
            children,
        })
    }

    /// The semantically meaningful children, in source order.
    pub fn named_children(&self) -> impl Iterator<Item = &CstNode> {
        self.children.iter().filter(|child| child.is_named)
    }

    /// First named child of the given kind, if any.
    pub fn find_named(&self, kind: &NodeKind) -> Option<&CstNode> {
        self.named_children().find(|child| &child.kind == kind)
    }
}
