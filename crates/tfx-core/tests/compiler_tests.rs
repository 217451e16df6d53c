use serde_json::json;
use tfx_core::{compile_interpolation, compile_interpolation_with, CompileOptions, TfxError, Value};

/// Helper: serialize a compiled value for shape comparisons.
fn to_json(value: &Value) -> serde_json::Value {
    serde_json::to_value(value).unwrap()
}

// ============================================================================
// Literal coercion
// ============================================================================

#[test]
fn integer_literal() {
    let value = compile_interpolation("${42}").unwrap();
    assert_eq!(value, Value::Integer(42));
}

#[test]
fn float_literal() {
    let value = compile_interpolation("${3.14}").unwrap();
    assert_eq!(value, Value::Float(3.14));
}

#[test]
fn bool_literals() {
    assert_eq!(compile_interpolation("${true}").unwrap(), Value::Bool(true));
    assert_eq!(
        compile_interpolation("${false}").unwrap(),
        Value::Bool(false)
    );
}

#[test]
fn null_literal() {
    assert_eq!(compile_interpolation("${null}").unwrap(), Value::Null);
}

#[test]
fn string_literal_keeps_quotes() {
    // String literals pass through verbatim, quotes included.
    let value = compile_interpolation(r#"${"hello"}"#).unwrap();
    assert_eq!(value, Value::String(r#""hello""#.to_string()));
}

// ============================================================================
// Identifiers and references
// ============================================================================

#[test]
fn identifier_reference() {
    let value = compile_interpolation("${foo}").unwrap();
    assert_eq!(
        to_json(&value),
        json!({"fn": "identifier", "args": [{"name": "name", "value": "foo"}]})
    );
}

#[test]
fn attribute_chain() {
    let value = compile_interpolation("${var.region}").unwrap();
    assert_eq!(
        to_json(&value),
        json!({
            "fn": "expression",
            "args": [
                {"name": "term", "value": {"fn": "identifier", "args": [{"name": "name", "value": "var"}]}},
                {"name": "rest", "value": ["region"]},
            ]
        })
    );
}

#[test]
fn index_step() {
    let value = compile_interpolation("${a[0]}").unwrap();
    let json = to_json(&value);
    assert_eq!(json["fn"], "expression");
    assert_eq!(json["args"][1]["name"], "rest");
    assert_eq!(json["args"][1]["value"], json!([0]));
}

#[test]
fn splat_chain() {
    let value = compile_interpolation("${a.*.b}").unwrap();
    let json = to_json(&value);
    assert_eq!(json["fn"], "expression");
    let rest = json["args"][1]["value"].as_array().unwrap();
    // The splat marker becomes a "*" sentinel; the trailing attribute step
    // follows it.
    assert!(rest.contains(&json!("*")), "no splat sentinel in {rest:?}");
    assert_eq!(rest.last().unwrap(), &json!("b"));
}

// ============================================================================
// Operators
// ============================================================================

#[test]
fn binary_addition() {
    let value = compile_interpolation("${1 + 2}").unwrap();
    assert_eq!(
        to_json(&value),
        json!({
            "fn": "add",
            "args": [
                {"name": "lhs", "value": 1},
                {"name": "rhs", "value": 2},
            ]
        })
    );
}

#[test]
fn operator_table() {
    let cases = [
        ("${a - b}", "sub"),
        ("${a * b}", "mul"),
        ("${a / b}", "div"),
        ("${a % b}", "mod"),
        ("${a == b}", "eq"),
        ("${a != b}", "ne"),
        ("${a > b}", "gt"),
        ("${a < b}", "lt"),
        ("${a >= b}", "ge"),
        ("${a <= b}", "le"),
        ("${a && b}", "and"),
        ("${a || b}", "or"),
    ];
    for (template, fn_name) in cases {
        let value = compile_interpolation(template).unwrap();
        assert_eq!(to_json(&value)["fn"], fn_name, "for {template}");
    }
}

#[test]
fn unary_on_reference() {
    let value = compile_interpolation("${-foo}").unwrap();
    assert_eq!(
        to_json(&value),
        json!({
            "fn": "neg",
            "args": [{"name": "operand", "value": {"fn": "identifier", "args": [{"name": "name", "value": "foo"}]}}]
        })
    );

    let value = compile_interpolation("${!foo}").unwrap();
    assert_eq!(to_json(&value)["fn"], "not");
}

#[test]
fn unary_minus_on_literal_drops_sign() {
    // A literal operand bypasses the operator: the sign is dropped. This is
    // intentional compiled output; changing it must break this test.
    let value = compile_interpolation("${-5}").unwrap();
    assert_eq!(value, Value::Integer(5));
}

// ============================================================================
// Conditionals and function calls
// ============================================================================

#[test]
fn conditional() {
    let value = compile_interpolation("${a ? b : c}").unwrap();
    let ident = |name: &str| json!({"fn": "identifier", "args": [{"name": "name", "value": name}]});
    assert_eq!(
        to_json(&value),
        json!({
            "fn": "conditional",
            "args": [
                {"name": "cond", "value": ident("a")},
                {"name": "true", "value": ident("b")},
                {"name": "false", "value": ident("c")},
            ]
        })
    );
}

#[test]
fn function_call_with_arguments() {
    let value = compile_interpolation("${max(1, 2)}").unwrap();
    assert_eq!(
        to_json(&value),
        json!({"fn": "max", "args": [{"name": "args", "value": [1, 2]}]})
    );
}

#[test]
fn function_call_without_arguments() {
    let value = compile_interpolation("${now()}").unwrap();
    assert_eq!(to_json(&value), json!({"fn": "now", "args": []}));
}

// ============================================================================
// Unsupported constructs
// ============================================================================

#[test]
fn unsupported_kind_degrades_to_empty_string() {
    // Collections are outside the expression compiler's taxonomy.
    let value = compile_interpolation("${[1, 2]}").unwrap();
    assert_eq!(value, Value::String(String::new()));
}

#[test]
fn unsupported_kind_does_not_abort_siblings() {
    let value = compile_interpolation("${f([1], 2)}").unwrap();
    assert_eq!(
        to_json(&value),
        json!({"fn": "f", "args": [{"name": "args", "value": ["", 2]}]})
    );
}

#[test]
fn strict_mode_rejects_unsupported_kind() {
    let err = compile_interpolation_with("${[1, 2]}", &CompileOptions { strict: true })
        .unwrap_err();
    assert!(matches!(err, TfxError::Unsupported(_)), "got {err:?}");
}

// ============================================================================
// Compiling straight from a parsed document
// ============================================================================

#[test]
fn compile_from_a_parsed_document() {
    use tfx_core::cst::NodeKind;
    use tfx_core::HclParser;

    let mut parser = HclParser::new().unwrap();
    let root = parser.parse("x = 1 + 2\n").unwrap();
    let body = root.find_named(&NodeKind::Body).unwrap();
    let attribute = body.find_named(&NodeKind::Attribute).unwrap();
    let expression = attribute.find_named(&NodeKind::Expression).unwrap();
    let value = tfx_core::compile(expression).unwrap();
    assert_eq!(to_json(&value)["fn"], "add");
}

// ============================================================================
// Malformed templates
// ============================================================================

#[test]
fn missing_prefix_is_rejected() {
    let err = compile_interpolation("1 + 2").unwrap_err();
    assert!(matches!(err, TfxError::Structural(_)), "got {err:?}");
}

#[test]
fn empty_template_body_is_rejected() {
    assert!(compile_interpolation("${").is_err());
}
