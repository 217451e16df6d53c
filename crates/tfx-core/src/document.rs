//! Legacy whole-document compiler — builds a value tree straight from the
//! CST, without the external converter.
//!
//! Superseded by [`crate::pipeline::convert`], which delegates block and
//! attribute semantics to the external converter and keeps array-of-blocks
//! fidelity. This path flattens a document body into one ordered object:
//! attributes insert under their identifier, named blocks under a composite
//! key built by [`encode_block_key`], and an anonymous block merges its
//! entries into the parent ("inline merge"). Sibling blocks that share a
//! composite key come out as duplicate entries; a naive JSON decoder keeps
//! only the last one. Retained for converter-free use.
//!
//! Unlike the expression compiler, collection values are in scope here:
//! tuples become arrays and object literals become ordered objects, so a
//! `tags = ["a", "b"]` attribute survives the direct path.

use crate::compiler::{compile_with, CompileOptions};
use crate::cst::{CstNode, NodeKind};
use crate::error::{Result, TfxError};
use crate::parser::HclParser;
use crate::value::Value;
use tracing::warn;

/// Separator joining a block's name and labels into one composite object key.
///
/// Required property: it must never occur in block names, identifiers, or
/// label strings, so the composite key can be split back into its parts.
/// Consumers splitting keys must treat this constant as the single source of
/// truth rather than hardcoding the character.
pub const BLOCK_KEY_SEPARATOR: char = '\u{0633}';

/// A block label as the grammar reports it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlockLabel {
    /// Bare identifier label, joined verbatim.
    Identifier(String),
    /// Quoted string label, carrying its raw source text; JSON-decoded
    /// before joining.
    StringLit(String),
}

/// Compose the object key for a named block: the bare name when there are no
/// labels, otherwise name and labels joined with [`BLOCK_KEY_SEPARATOR`].
pub fn encode_block_key(name: &str, labels: &[BlockLabel]) -> Result<String> {
    let mut key = String::from(name);
    for label in labels {
        key.push(BLOCK_KEY_SEPARATOR);
        match label {
            BlockLabel::Identifier(text) => key.push_str(text),
            BlockLabel::StringLit(raw) => {
                let decoded: String = serde_json::from_str(raw).map_err(|e| {
                    TfxError::Structural(format!("block label {raw:?} is not a string literal: {e}"))
                })?;
                key.push_str(&decoded);
            }
        }
    }
    Ok(key)
}

/// Compile a whole HCL document from source text, with default options.
pub fn compile_document(source: &str) -> Result<Value> {
    compile_document_with(source, &CompileOptions::default())
}

/// Compile a whole HCL document from source text.
pub fn compile_document_with(source: &str, options: &CompileOptions) -> Result<Value> {
    let mut parser = HclParser::new()?;
    let root = parser.parse(source)?;
    if root.kind != NodeKind::ConfigFile {
        return Err(TfxError::Structural(format!(
            "document root is {:?}, expected config_file",
            root.kind.name()
        )));
    }
    let body = root
        .find_named(&NodeKind::Body)
        .ok_or_else(|| TfxError::Structural("document has no body".to_string()))?;
    emit_body(body, options)
}

/// A body becomes an ordered object: attributes and named blocks insert in
/// source order, anonymous blocks merge their entries in place, comments are
/// skipped.
fn emit_body(node: &CstNode, options: &CompileOptions) -> Result<Value> {
    let mut entries: Vec<(String, Value)> = Vec::new();
    for child in node.named_children() {
        match &child.kind {
            NodeKind::Attribute => {
                let (key, value) = emit_attribute(child, options)?;
                entries.push((key, value));
            }
            NodeKind::Block => emit_block_into(child, &mut entries, options)?,
            NodeKind::Comment => {}
            other => {
                if options.strict {
                    return Err(TfxError::Unsupported(other.name().to_string()));
                }
                warn!("unsupported HCL node kind in body: {}", other.name());
            }
        }
    }
    Ok(Value::Object(entries))
}

fn emit_attribute(node: &CstNode, options: &CompileOptions) -> Result<(String, Value)> {
    let id = node
        .find_named(&NodeKind::Identifier)
        .ok_or_else(|| TfxError::Structural(format!("attribute has no identifier: {:?}", node.text)))?;
    let expr = node
        .find_named(&NodeKind::Expression)
        .ok_or_else(|| TfxError::Structural(format!("attribute has no expression: {:?}", node.text)))?;
    Ok((id.text.clone(), emit_document_value(expr, options)?))
}

/// Compile an attribute value. Collections are handled on this path;
/// everything else goes through the shared expression compiler.
fn emit_document_value(node: &CstNode, options: &CompileOptions) -> Result<Value> {
    match &node.kind {
        NodeKind::Expression => {
            let mut named = node.named_children();
            let term = named.next().ok_or_else(|| {
                TfxError::Structural(format!("expression has no term: {:?}", node.text))
            })?;
            let has_postfix = named.next().is_some();
            if !has_postfix && is_collection(&term.kind) {
                return emit_document_value(term, options);
            }
            compile_with(node, options)
        }
        NodeKind::CollectionValue => {
            let inner = node.named_children().next().ok_or_else(|| {
                TfxError::Structural(format!("empty collection value: {:?}", node.text))
            })?;
            emit_document_value(inner, options)
        }
        NodeKind::Tuple => {
            let items = node
                .named_children()
                .filter(|child| {
                    child.kind != NodeKind::TupleStart && child.kind != NodeKind::TupleEnd
                })
                .map(|child| emit_document_value(child, options))
                .collect::<Result<Vec<_>>>()?;
            Ok(Value::Array(items))
        }
        NodeKind::Object => {
            let entries = node
                .named_children()
                .filter(|child| child.kind == NodeKind::ObjectElem)
                .map(|child| emit_object_elem(child, options))
                .collect::<Result<Vec<_>>>()?;
            Ok(Value::Object(entries))
        }
        _ => compile_with(node, options),
    }
}

fn is_collection(kind: &NodeKind) -> bool {
    matches!(
        kind,
        NodeKind::CollectionValue | NodeKind::Tuple | NodeKind::Object
    )
}

/// An object element's first expression is the key, the second the value.
fn emit_object_elem(node: &CstNode, options: &CompileOptions) -> Result<(String, Value)> {
    let mut exprs = node
        .named_children()
        .filter(|child| child.kind == NodeKind::Expression);
    let key_expr = exprs
        .next()
        .ok_or_else(|| TfxError::Structural(format!("object element has no key: {:?}", node.text)))?;
    let value_expr = exprs.next().ok_or_else(|| {
        TfxError::Structural(format!("object element has no value: {:?}", node.text))
    })?;
    Ok((
        object_key_text(key_expr)?,
        emit_document_value(value_expr, options)?,
    ))
}

/// Extract an object key as a plain string: identifier text verbatim, quoted
/// string literals JSON-decoded.
fn object_key_text(expr: &CstNode) -> Result<String> {
    let mut node = expr;
    // Unwrap single-child wrapper nodes down to the concrete key term.
    while matches!(
        node.kind,
        NodeKind::Expression | NodeKind::VariableExpr | NodeKind::LiteralValue
    ) {
        match node.named_children().next() {
            Some(child) => node = child,
            None => break,
        }
    }
    let text = node.text.as_str();
    if text.starts_with('"') && text.ends_with('"') && text.len() >= 2 {
        let decoded: String = serde_json::from_str(text).map_err(|e| {
            TfxError::Structural(format!("object key {text:?} is not a string literal: {e}"))
        })?;
        return Ok(decoded);
    }
    Ok(text.to_string())
}

/// Insert one block's contribution into its parent body's entries.
///
/// A named block inserts its compiled body (empty object when bodyless)
/// under the composite key. A nameless block merges its body's entries into
/// the parent; such a body must compile to a plain object — an intrinsic
/// there is a structural error.
fn emit_block_into(
    node: &CstNode,
    entries: &mut Vec<(String, Value)>,
    options: &CompileOptions,
) -> Result<()> {
    let mut name: Option<&CstNode> = None;
    let mut labels: Vec<BlockLabel> = Vec::new();
    let mut body: Option<&CstNode> = None;
    for child in node.named_children() {
        match &child.kind {
            NodeKind::Identifier if name.is_none() => name = Some(child),
            NodeKind::Identifier => labels.push(BlockLabel::Identifier(child.text.clone())),
            NodeKind::StringLit => labels.push(BlockLabel::StringLit(child.text.clone())),
            NodeKind::Body => body = Some(child),
            _ => {}
        }
    }

    let Some(name) = name else {
        let body = body.ok_or_else(|| {
            TfxError::Structural(format!("anonymous block has no body: {:?}", node.text))
        })?;
        match emit_body(body, options)? {
            Value::Object(inner) => entries.extend(inner),
            other => {
                return Err(TfxError::Structural(format!(
                    "anonymous block body must compile to an object, got {other:?}"
                )))
            }
        }
        return Ok(());
    };

    let key = encode_block_key(&name.text, &labels)?;
    let value = match body {
        Some(body) => emit_body(body, options)?,
        None => Value::Object(Vec::new()),
    };
    entries.push((key, value));
    Ok(())
}
