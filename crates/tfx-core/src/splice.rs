//! Interpolation splicing — find `${...}` string leaves in a converted
//! document and replace them with compiled expression trees.
//!
//! The external converter preserves every interpolation template verbatim as
//! a string starting with `${` and ending with the matching `}`. The splicer
//! walks the document depth-first and, for each such leaf, re-parses the
//! embedded expression and substitutes the compiled value in place. The walk
//! is functional: it produces a new tree and leaves the input untouched.
//!
//! # The synthetic wrapper
//!
//! The grammar only parses whole documents, so a template is rewritten into
//! a one-attribute block before parsing: the leading `${` becomes
//! `tfxwrap{tfxwrap=`, and the template's own trailing `}` closes the block.
//! `${1 + 2}` thus parses as the document `tfxwrap{tfxwrap=1 + 2}`, whose
//! only attribute value is exactly the embedded expression. The fixed
//! navigation path down to that expression is asserted step by step; a miss
//! means malformed interpolation content or a grammar mismatch and fails the
//! whole document.
//!
//! # Scope
//!
//! Only leaves *starting* with `${` are touched — object values and array
//! elements, never object keys. Strings mixing literal text and
//! interpolation (`"x-${y}-z"`) fail the prefix test and pass through
//! unchanged; template expressions are out of scope. Spliced intrinsics are
//! objects, not strings, so a second pass matches nothing new.

use crate::compiler::{compile_with, CompileOptions};
use crate::cst::{CstNode, NodeKind};
use crate::error::{Result, TfxError};
use crate::parser::HclParser;
use crate::value::Value;

/// Reserved identifier used for the synthetic block and attribute wrapping
/// an interpolation body. A parse scaffold only; it never appears in output.
const SYNTHETIC_NAME: &str = "tfxwrap";

/// Marker prefix identifying an interpolation template string.
const INTERPOLATION_PREFIX: &str = "${";

/// Splice all interpolation leaves of a document, with default options.
pub fn splice(document: &Value) -> Result<Value> {
    splice_with(document, &CompileOptions::default())
}

/// Splice all interpolation leaves of a document.
pub fn splice_with(document: &Value, options: &CompileOptions) -> Result<Value> {
    let mut parser = HclParser::new()?;
    splice_value(document, &mut parser, options)
}

fn splice_value(value: &Value, parser: &mut HclParser, options: &CompileOptions) -> Result<Value> {
    match value {
        Value::String(s) if s.starts_with(INTERPOLATION_PREFIX) => {
            compile_template(s, parser, options)
        }
        Value::Array(items) => Ok(Value::Array(
            items
                .iter()
                .map(|item| splice_value(item, parser, options))
                .collect::<Result<Vec<_>>>()?,
        )),
        Value::Object(entries) => Ok(Value::Object(
            entries
                .iter()
                .map(|(key, child)| Ok((key.clone(), splice_value(child, parser, options)?)))
                .collect::<Result<Vec<_>>>()?,
        )),
        other => Ok(other.clone()),
    }
}

/// Compile a single interpolation template (`"${expr}"`) into a value, with
/// default options.
///
/// The result is usually an intrinsic, but a bare literal when the template
/// wraps one (`"${5}"` compiles to the number 5).
pub fn compile_interpolation(template: &str) -> Result<Value> {
    let mut parser = HclParser::new()?;
    compile_template(template, &mut parser, &CompileOptions::default())
}

/// Compile a single interpolation template with explicit options.
pub fn compile_interpolation_with(template: &str, options: &CompileOptions) -> Result<Value> {
    let mut parser = HclParser::new()?;
    compile_template(template, &mut parser, options)
}

fn compile_template(
    template: &str,
    parser: &mut HclParser,
    options: &CompileOptions,
) -> Result<Value> {
    let rest = template.strip_prefix(INTERPOLATION_PREFIX).ok_or_else(|| {
        TfxError::Structural(format!("not an interpolation template: {template:?}"))
    })?;
    let synthetic = format!("{SYNTHETIC_NAME}{{{SYNTHETIC_NAME}={rest}");
    let root = parser.parse(&synthetic)?;
    if root.kind != NodeKind::ConfigFile {
        return Err(TfxError::Structural(format!(
            "synthetic document root is {:?}, expected config_file",
            root.kind.name()
        )));
    }
    let body = find_step(&root, NodeKind::Body, "document body")?;
    let block = find_step(body, NodeKind::Block, "synthetic block")?;
    let inner = find_step(block, NodeKind::Body, "synthetic block body")?;
    let attribute = find_step(inner, NodeKind::Attribute, "synthetic attribute")?;
    let expression = find_step(attribute, NodeKind::Expression, "interpolation expression")?;
    compile_with(expression, options)
}

fn find_step<'a>(node: &'a CstNode, kind: NodeKind, what: &str) -> Result<&'a CstNode> {
    node.find_named(&kind)
        .ok_or_else(|| TfxError::Structural(format!("{what} not found while splicing")))
}
