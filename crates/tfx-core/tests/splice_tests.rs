use serde_json::json;
use tfx_core::{splice, Value};

fn from_json(value: serde_json::Value) -> Value {
    Value::from_json(&value)
}

fn to_json(value: &Value) -> serde_json::Value {
    serde_json::to_value(value).unwrap()
}

// ============================================================================
// Splicing interpolation leaves
// ============================================================================

#[test]
fn splices_expression_into_intrinsic() {
    let document = from_json(json!({"x": "${1+2}"}));
    let spliced = splice(&document).unwrap();
    assert_eq!(
        to_json(&spliced),
        json!({
            "x": {
                "fn": "add",
                "args": [
                    {"name": "lhs", "value": 1},
                    {"name": "rhs", "value": 2},
                ]
            }
        })
    );
}

#[test]
fn splices_bare_literal() {
    let document = from_json(json!({"x": "${5}"}));
    let spliced = splice(&document).unwrap();
    assert_eq!(to_json(&spliced), json!({"x": 5}));
}

#[test]
fn splices_inside_arrays_and_nested_objects() {
    let document = from_json(json!({
        "outer": [
            {"ref": "${var.region}"},
            "${count}",
            7,
        ]
    }));
    let spliced = splice(&document).unwrap();
    let json = to_json(&spliced);
    assert_eq!(json["outer"][0]["ref"]["fn"], "expression");
    assert_eq!(json["outer"][1]["fn"], "identifier");
    assert_eq!(json["outer"][2], 7);
}

// ============================================================================
// What splicing must not touch
// ============================================================================

#[test]
fn identity_without_interpolation_leaves() {
    let document = from_json(json!({
        "name": "web",
        "count": 3,
        "ratio": 0.5,
        "on": true,
        "none": null,
        "mixed": "a-${x}-b",
        "nested": {"tags": ["a", "b"], "empty": {}},
    }));
    let spliced = splice(&document).unwrap();
    assert_eq!(spliced, document);
}

#[test]
fn mixed_template_passes_through() {
    // Template expressions mixing literal text and interpolation are out of
    // scope; they fail the prefix test and survive unchanged.
    let document = from_json(json!({"x": "name-${var.a}-suffix"}));
    let spliced = splice(&document).unwrap();
    assert_eq!(spliced, document);
}

#[test]
fn object_keys_are_never_spliced() {
    let document = Value::Object(vec![(
        "${key}".to_string(),
        Value::String("${1}".to_string()),
    )]);
    let spliced = splice(&document).unwrap();
    assert_eq!(
        spliced,
        Value::Object(vec![("${key}".to_string(), Value::Integer(1))])
    );
}

// ============================================================================
// Idempotence and failure
// ============================================================================

#[test]
fn splice_is_idempotent() {
    let document = from_json(json!({
        "a": "${1 + 2}",
        "b": ["${foo}", "${x ? y : z}"],
        "c": "plain",
    }));
    let once = splice(&document).unwrap();
    let twice = splice(&once).unwrap();
    assert_eq!(once, twice);
}

#[test]
fn malformed_interpolation_aborts_the_document() {
    let document = from_json(json!({"ok": "${1}", "bad": "${"}));
    assert!(splice(&document).is_err());
}
