//! Thin wrapper around the external tree-sitter HCL grammar.

use crate::cst::CstNode;
use crate::error::{Result, TfxError};

/// An HCL parser: a `tree_sitter::Parser` with the HCL grammar loaded.
pub struct HclParser {
    inner: tree_sitter::Parser,
}

impl HclParser {
    pub fn new() -> Result<Self> {
        let mut inner = tree_sitter::Parser::new();
        inner
            .set_language(&tree_sitter_hcl::LANGUAGE.into())
            .map_err(|e| TfxError::Structural(format!("failed to load HCL grammar: {e}")))?;
        Ok(Self { inner })
    }

    /// Parse HCL source text into a detached CST rooted at the document node.
    pub fn parse(&mut self, source: &str) -> Result<CstNode> {
        let tree = self
            .inner
            .parse(source, None)
            .ok_or_else(|| TfxError::Structural("parser returned no tree".to_string()))?;
        CstNode::from_tree_sitter(tree.root_node(), source)
    }
}
