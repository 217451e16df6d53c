//! Pipeline driver: converter → JSON → value tree → interpolation splice.

use crate::compiler::CompileOptions;
use crate::converter::{DocumentConverter, Hcl2JsonConverter};
use crate::error::Result;
use crate::splice::splice_with;
use crate::value::Value;

/// Convert HCL source text into a value tree, using the default `hcl2json`
/// converter from `PATH`.
///
/// Fails with a typed error — [`crate::TfxError::Converter`] for external
/// tool failures, [`crate::TfxError::Structural`] for grammar mismatches —
/// rather than returning a partial document.
pub fn convert(source: &str) -> Result<Value> {
    convert_with(source, &Hcl2JsonConverter::new(), &CompileOptions::default())
}

/// Convert HCL source text with an explicit converter and options.
///
/// The converter's complete stdout is parsed as JSON, lowered into a
/// [`Value`] tree, and every interpolation string leaf is replaced with its
/// compiled expression.
pub fn convert_with(
    source: &str,
    converter: &dyn DocumentConverter,
    options: &CompileOptions,
) -> Result<Value> {
    let raw = converter.convert(source)?;
    let json: serde_json::Value = serde_json::from_str(raw.trim())?;
    let document = Value::from_json(&json);
    splice_with(&document, options)
}
