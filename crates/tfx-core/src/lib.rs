//! # tfx-core
//!
//! Converts HCL-family configuration (Terraform and friends) into a
//! JSON-compatible value tree while *preserving* interpolation expressions
//! (`${...}`) as structured, machine-readable intrinsic trees instead of
//! flattening them into opaque strings. A later evaluation stage can resolve
//! variable references and apply functions without re-parsing HCL.
//!
//! ## Quick start
//!
//! ```rust
//! use tfx_core::compile_interpolation;
//!
//! let value = compile_interpolation("${1 + 2}").unwrap();
//! let json = serde_json::to_string(&value).unwrap();
//! assert_eq!(
//!     json,
//!     r#"{"fn":"add","args":[{"name":"lhs","value":1},{"name":"rhs","value":2}]}"#
//! );
//! ```
//!
//! The full pipeline, [`convert`], additionally needs an `hcl2json` binary on
//! `PATH` (or a [`DocumentConverter`] of your own): it produces the baseline
//! JSON document, and [`splice`] replaces every `"${...}"` leaf with its
//! compiled expression.
//!
//! ## Modules
//!
//! - [`compiler`] — CST expression node → [`Value`] (the core mapping)
//! - [`splice`] — find and replace interpolation leaves in a document
//! - [`pipeline`] — converter → JSON → value tree → splice
//! - [`document`] — legacy converter-free whole-document path
//! - [`converter`] — external `hcl2json` process boundary
//! - [`cst`] / [`parser`] — grammar boundary (tree-sitter HCL)
//! - [`value`] — the value model, intrinsics included
//! - [`error`] — error taxonomy

pub mod compiler;
pub mod converter;
pub mod cst;
pub mod document;
pub mod error;
pub mod parser;
pub mod pipeline;
pub mod splice;
pub mod value;

pub use compiler::{compile, compile_with, CompileOptions};
pub use converter::{DocumentConverter, Hcl2JsonConverter};
pub use document::{
    compile_document, compile_document_with, encode_block_key, BlockLabel, BLOCK_KEY_SEPARATOR,
};
pub use error::{Result, TfxError};
pub use parser::HclParser;
pub use pipeline::{convert, convert_with};
pub use splice::{compile_interpolation, compile_interpolation_with, splice, splice_with};
pub use value::{is_intrinsic_shaped, Arg, Intrinsic, Value};
