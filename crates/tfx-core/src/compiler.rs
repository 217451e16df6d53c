//! Expression compiler — maps one CST expression node to one [`Value`].
//!
//! The compiler is a stateless recursive walk over the decoded CST. Each
//! supported node kind has an exact rule:
//!
//! - Literals coerce by text: `null`, all-digit integers, `d.d` floats,
//!   booleans; anything else passes through verbatim (string literals keep
//!   their quotes).
//! - Identifier references, function calls, operators, conditionals, and
//!   postfix chains become [`Intrinsic`] trees a later stage can evaluate.
//! - Postfix steps (`.name`, `[0]`, splats) compile to bare strings/numbers
//!   collected into an `expression` intrinsic's flattened `rest` list.
//!
//! Two failure regimes, deliberately different:
//!
//! - **Structural** mismatches (wrong arity, missing child) are fatal:
//!   they mean the grammar and this compiler disagree, so the whole
//!   conversion aborts with [`TfxError::Structural`].
//! - **Unsupported** kinds (collections, for-expressions, template
//!   expressions, comments) degrade softly: a `warn` diagnostic and an empty
//!   string placeholder, so one exotic construct does not sink the document.
//!   [`CompileOptions::strict`] turns this into a hard
//!   [`TfxError::Unsupported`] for callers that prefer failing fast.

use crate::cst::{CstNode, NodeKind};
use crate::error::{Result, TfxError};
use crate::value::{Arg, Intrinsic, Value};
use tracing::warn;

/// Options controlling compilation behavior.
#[derive(Debug, Clone, Default)]
pub struct CompileOptions {
    /// Fail with [`TfxError::Unsupported`] on the first construct outside the
    /// supported taxonomy instead of degrading it to an empty string.
    pub strict: bool,
}

/// Compile a CST expression node into a value, with default options.
pub fn compile(node: &CstNode) -> Result<Value> {
    compile_with(node, &CompileOptions::default())
}

/// Compile a CST expression node into a value.
pub fn compile_with(node: &CstNode, options: &CompileOptions) -> Result<Value> {
    match &node.kind {
        NodeKind::BoolLit
        | NodeKind::NullLit
        | NodeKind::StringLit
        | NodeKind::NumericLit
        | NodeKind::LiteralValue => Ok(emit_literal(node)),
        NodeKind::Expression => emit_expression(node, options),
        NodeKind::VariableExpr => emit_variable_expr(node, options),
        NodeKind::FunctionCall => emit_function_call(node, options),
        NodeKind::Identifier => Ok(emit_identifier(node)),
        NodeKind::GetAttr => emit_get_attr(node),
        NodeKind::Conditional => emit_conditional(node, options),
        NodeKind::Index => emit_index(node),
        NodeKind::Splat => emit_splat(node, options),
        NodeKind::AttrSplat | NodeKind::FullSplat => emit_attr_splat(node, options),
        NodeKind::Operation => emit_operation(node, options),
        NodeKind::UnaryOperation => emit_unary_operation(node, options),
        NodeKind::BinaryOperation => emit_binary_operation(node, options),
        other => {
            if options.strict {
                return Err(TfxError::Unsupported(other.name().to_string()));
            }
            warn!("unsupported HCL node kind: {}", other.name());
            Ok(Value::String(String::new()))
        }
    }
}

/// Coerce a literal's raw text.
///
/// String literals are not unquoted: their text, quotes included, passes
/// through verbatim.
fn emit_literal(node: &CstNode) -> Value {
    let text = node.text.as_str();
    if text == "null" {
        return Value::Null;
    }
    if is_integer_text(text) {
        // A digit run too long for i64 falls through to the verbatim arm.
        if let Ok(n) = text.parse::<i64>() {
            return Value::Integer(n);
        }
    }
    if is_float_text(text) {
        if let Ok(f) = text.parse::<f64>() {
            return Value::Float(f);
        }
    }
    if text == "true" || text == "false" {
        return Value::Bool(text == "true");
    }
    Value::String(text.to_string())
}

fn is_integer_text(text: &str) -> bool {
    !text.is_empty() && text.bytes().all(|b| b.is_ascii_digit())
}

fn is_float_text(text: &str) -> bool {
    match text.split_once('.') {
        Some((whole, frac)) => is_integer_text(whole) && is_integer_text(frac),
        None => false,
    }
}

fn emit_identifier(node: &CstNode) -> Value {
    Value::Intrinsic(Intrinsic::new(
        "identifier",
        vec![Arg::new("name", Value::String(node.text.clone()))],
    ))
}

fn emit_variable_expr(node: &CstNode, options: &CompileOptions) -> Result<Value> {
    let child = first_named_child(node)?;
    compile_with(child, options)
}

/// A postfix attribute step. The single named child's text, leading separator
/// stripped, as a bare string — one element of an `expression` chain's
/// `rest` list, not an intrinsic.
fn emit_get_attr(node: &CstNode) -> Result<Value> {
    Ok(Value::String(step_text(node)?))
}

/// A postfix `[n]` step, parsed as an integer index.
///
/// A non-integer subscript (a variable, a wider expression) is outside the
/// supported taxonomy and degrades to null with a diagnostic.
fn emit_index(node: &CstNode) -> Result<Value> {
    let text = step_text(node)?;
    match text.parse::<i64>() {
        Ok(n) => Ok(Value::Integer(n)),
        Err(_) => {
            warn!("non-integer index subscript: {text:?}");
            Ok(Value::Null)
        }
    }
}

/// Shared extraction for postfix steps: exactly one named child, its text
/// with a leading `.` removed.
///
/// Grammar versions differ on whether a step wraps its operand in
/// intermediate nodes (`index` → `new_index` → `expression`); single-child
/// wrappers are descended until the concrete text.
fn step_text(node: &CstNode) -> Result<String> {
    let mut child = single_named_child(node)?;
    loop {
        let mut named = child.named_children();
        match (named.next(), named.next()) {
            (Some(inner), None) => child = inner,
            _ => break,
        }
    }
    let text = child.text.as_str();
    Ok(text.strip_prefix('.').unwrap_or(text).to_string())
}

/// `name(args...)`. The intrinsic's `fn` is the callee identifier's raw text;
/// arguments compile into a single `args` list entry, absent when the call
/// has no argument list.
fn emit_function_call(node: &CstNode, options: &CompileOptions) -> Result<Value> {
    let callee = node
        .find_named(&NodeKind::Identifier)
        .ok_or_else(|| structural(node, "function call has no callee identifier"))?;
    let args = match node.find_named(&NodeKind::FunctionArguments) {
        Some(list) => {
            let compiled = list
                .named_children()
                .map(|arg| compile_with(arg, options))
                .collect::<Result<Vec<_>>>()?;
            vec![Arg::new("args", Value::Array(compiled))]
        }
        None => Vec::new(),
    };
    Ok(Value::Intrinsic(Intrinsic::new(callee.text.clone(), args)))
}

/// `cond ? a : b`. The grammar yields the three expressions in source order.
fn emit_conditional(node: &CstNode, options: &CompileOptions) -> Result<Value> {
    let mut exprs = node
        .named_children()
        .filter(|child| child.kind == NodeKind::Expression);
    let cond = exprs
        .next()
        .ok_or_else(|| structural(node, "conditional has no condition"))?;
    let when_true = exprs
        .next()
        .ok_or_else(|| structural(node, "conditional has no true branch"))?;
    let when_false = exprs
        .next()
        .ok_or_else(|| structural(node, "conditional has no false branch"))?;
    Ok(Value::Intrinsic(Intrinsic::new(
        "conditional",
        vec![
            Arg::new("cond", compile_with(cond, options)?),
            Arg::new("true", compile_with(when_true, options)?),
            Arg::new("false", compile_with(when_false, options)?),
        ],
    )))
}

fn emit_operation(node: &CstNode, options: &CompileOptions) -> Result<Value> {
    let child = first_named_child(node)?;
    compile_with(child, options)
}

/// Exactly `[lhs, operator, rhs]`. The operator token maps through
/// [`operator_name`]; operands compile recursively.
fn emit_binary_operation(node: &CstNode, options: &CompileOptions) -> Result<Value> {
    if node.children.len() != 3 {
        return Err(structural(node, "binary operation does not have 3 children"));
    }
    let lhs = compile_with(&node.children[0], options)?;
    let op = operator_name(&node.children[1].text);
    let rhs = compile_with(&node.children[2], options)?;
    Ok(Value::Intrinsic(Intrinsic::new(
        op,
        vec![Arg::new("lhs", lhs), Arg::new("rhs", rhs)],
    )))
}

/// Fixed operator-text table. Unrecognized operator text passes through
/// verbatim.
fn operator_name(op: &str) -> String {
    match op {
        "-" => "sub",
        "+" => "add",
        "*" => "mul",
        "/" => "div",
        "%" => "mod",
        "==" => "eq",
        "!=" => "ne",
        ">" => "gt",
        "<" => "lt",
        ">=" => "ge",
        "<=" => "le",
        "&&" => "and",
        "||" => "or",
        other => other,
    }
    .to_string()
}

/// Exactly `[operator, operand]`. A literal operand bypasses the operator
/// entirely: `-5` compiles to `5`, the sign dropped. Only non-literal
/// operands produce a `neg`/`not` intrinsic.
fn emit_unary_operation(node: &CstNode, options: &CompileOptions) -> Result<Value> {
    if node.children.len() != 2 {
        return Err(structural(node, "unary operation does not have 2 children"));
    }
    let operand = &node.children[1];
    if operand.kind != NodeKind::LiteralValue {
        let fn_name = match node.children[0].text.as_str() {
            "-" => "neg".to_string(),
            "!" => "not".to_string(),
            other => other.to_string(),
        };
        return Ok(Value::Intrinsic(Intrinsic::new(
            fn_name,
            vec![Arg::new("operand", compile_with(operand, options)?)],
        )));
    }
    let literal = first_named_child(node)?;
    compile_with(literal, options)
}

fn emit_splat(node: &CstNode, options: &CompileOptions) -> Result<Value> {
    let child = first_named_child(node)?;
    compile_with(child, options)
}

/// `.*` / `[*]` chains map over *all* children in source order: named
/// children compile recursively, punctuation becomes the literal string
/// `"*"`.
fn emit_attr_splat(node: &CstNode, options: &CompileOptions) -> Result<Value> {
    let items = node
        .children
        .iter()
        .map(|child| {
            if child.is_named {
                compile_with(child, options)
            } else {
                Ok(Value::String("*".to_string()))
            }
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(Value::Array(items))
}

/// A base term plus zero or more postfix steps. Without steps the term passes
/// through; with steps the result is an `expression` intrinsic carrying the
/// compiled term and a flattened `rest` list (a step that compiles to an
/// array, i.e. a splat, contributes its elements).
fn emit_expression(node: &CstNode, options: &CompileOptions) -> Result<Value> {
    let mut named = node.named_children();
    let term = named
        .next()
        .ok_or_else(|| structural(node, "expression has no term"))?;
    let rest: Vec<&CstNode> = named.collect();
    if rest.is_empty() {
        return compile_with(term, options);
    }
    let mut steps = Vec::new();
    for step in rest {
        match compile_with(step, options)? {
            Value::Array(items) => steps.extend(items),
            value => steps.push(value),
        }
    }
    Ok(Value::Intrinsic(Intrinsic::new(
        "expression",
        vec![
            Arg::new("term", compile_with(term, options)?),
            Arg::new("rest", Value::Array(steps)),
        ],
    )))
}

fn first_named_child(node: &CstNode) -> Result<&CstNode> {
    node.named_children()
        .next()
        .ok_or_else(|| structural(node, "node has no named children"))
}

/// Postfix steps carry exactly one named child; more means the grammar and
/// this compiler disagree.
fn single_named_child(node: &CstNode) -> Result<&CstNode> {
    let mut named = node.named_children();
    let first = named
        .next()
        .ok_or_else(|| structural(node, "node has no named children"))?;
    if named.next().is_some() {
        return Err(structural(node, "node has more than one named child"));
    }
    Ok(first)
}

fn structural(node: &CstNode, message: &str) -> TfxError {
    TfxError::Structural(format!("{message} in {:?} node {:?}", node.kind.name(), node.text))
}
