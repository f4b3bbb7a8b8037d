//! Thin wrapper over `rowan::GreenNodeBuilder` that speaks in markup kinds

use rowan::{GreenNode, GreenNodeBuilder};

use super::{CstToken, MarkupSyntaxKind};

/// Incremental builder for markup green trees
#[derive(Default)]
pub struct CstBuilder {
    inner: GreenNodeBuilder<'static>,
}

impl CstBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start_node(&mut self, kind: MarkupSyntaxKind) {
        self.inner.start_node(kind.into());
    }

    pub fn finish_node(&mut self) {
        self.inner.finish_node();
    }

    /// Add a token with explicit kind and text
    pub fn token(&mut self, kind: MarkupSyntaxKind, text: &str) {
        self.inner.token(kind.into(), text);
    }

    /// Add a lexed token verbatim
    pub fn add_token(&mut self, token: &CstToken) {
        self.token(token.kind, &token.text);
    }

    pub fn finish(self) -> GreenNode {
        self.inner.finish()
    }
}
