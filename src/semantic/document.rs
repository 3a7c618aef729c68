//! Document model
//!
//! Owns the source text, the current parse, and a monotonically increasing
//! version counter bumped on every edit. All semantic caches hang off the
//! document and key themselves on that counter, so an edit invalidates
//! everything with no explicit notification.

use super::catalog::{DeclCatalog, FileIndex};
use super::resolver;
use super::scope::{ScopeCache, ScopeTable};
use crate::parser::{parse, Parse, SyntaxNode};
use crate::syntax::{
    AssetDecl, AstNode, Decl, DeclKind, NameRef, PartyDecl, PolicyDecl, RecordDecl, SourceFile,
    TxDecl, TypeDecl, TypeRef,
};
use rowan::TextRange;
use smol_str::SmolStr;
use std::sync::Arc;
use tracing::trace;

#[derive(Debug)]
pub struct Document {
    text: String,
    parse: Parse,
    version: u64,
    catalog: DeclCatalog,
    scopes: ScopeCache,
}

impl Document {
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let parse = parse(&text);
        Self {
            text,
            parse,
            version: 0,
            catalog: DeclCatalog::default(),
            scopes: ScopeCache::default(),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// The modification counter. Increments on every edit.
    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn parse(&self) -> &Parse {
        &self.parse
    }

    pub fn syntax(&self) -> SyntaxNode {
        self.parse.syntax()
    }

    pub fn source_file(&self) -> SourceFile {
        SourceFile::cast(self.syntax()).expect("parse root is always SOURCE_FILE")
    }

    // =========================================================================
    // Edits
    // =========================================================================

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.reparse();
    }

    pub fn replace_range(&mut self, range: TextRange, replacement: &str) {
        let start = usize::from(range.start()).min(self.text.len());
        let end = usize::from(range.end()).clamp(start, self.text.len());
        self.text.replace_range(start..end, replacement);
        self.reparse();
    }

    fn reparse(&mut self) {
        self.parse = parse(&self.text);
        self.version += 1;
        trace!(version = self.version, "document reparsed");
    }

    // =========================================================================
    // Declaration catalog
    // =========================================================================

    pub fn parties(&self) -> Arc<Vec<PartyDecl>> {
        self.catalog.parties(self.version, &self.source_file())
    }

    pub fn policies(&self) -> Arc<Vec<PolicyDecl>> {
        self.catalog.policies(self.version, &self.source_file())
    }

    pub fn records(&self) -> Arc<Vec<RecordDecl>> {
        self.catalog.records(self.version, &self.source_file())
    }

    pub fn type_decls(&self) -> Arc<Vec<TypeDecl>> {
        self.catalog.type_decls(self.version, &self.source_file())
    }

    pub fn assets(&self) -> Arc<Vec<AssetDecl>> {
        self.catalog.assets(self.version, &self.source_file())
    }

    pub fn txs(&self) -> Arc<Vec<TxDecl>> {
        self.catalog.txs(self.version, &self.source_file())
    }

    pub fn env_field_names(&self) -> Arc<Vec<SmolStr>> {
        self.catalog.env_field_names(self.version, &self.source_file())
    }

    pub fn file_index(&self) -> Arc<FileIndex> {
        self.catalog.file_index(self.version, &self.source_file())
    }

    /// Top-level declarations of one kind, in source order. Kinds that only
    /// occur inside a tx body yield nothing here.
    pub fn decls_of_kind(&self, kind: DeclKind) -> Vec<Decl> {
        match kind {
            DeclKind::Party => self.parties().iter().cloned().map(Decl::Party).collect(),
            DeclKind::Policy => self.policies().iter().cloned().map(Decl::Policy).collect(),
            DeclKind::Record => self.records().iter().cloned().map(Decl::Record).collect(),
            DeclKind::Type => self.type_decls().iter().cloned().map(Decl::Type).collect(),
            DeclKind::Asset => self.assets().iter().cloned().map(Decl::Asset).collect(),
            DeclKind::Tx => self.txs().iter().cloned().map(Decl::Tx).collect(),
            DeclKind::Param | DeclKind::Input | DeclKind::Output | DeclKind::Let => Vec::new(),
        }
    }

    // =========================================================================
    // Scopes and resolution
    // =========================================================================

    pub fn local_scope(&self, tx: &TxDecl) -> Arc<ScopeTable> {
        self.scopes.get_or_compute(self.version, tx)
    }

    pub fn resolve_value_reference(&self, name_ref: &NameRef) -> Option<Decl> {
        resolver::resolve_value_reference(self, name_ref)
    }

    pub fn resolve_type_reference(&self, type_ref: &TypeRef) -> Option<Decl> {
        resolver::resolve_type_reference(self, type_ref)
    }

    /// True when `node` belongs to the document's current tree. Nodes held
    /// over from before an edit fail this check and resolve to nothing.
    pub(crate) fn owns(&self, node: &SyntaxNode) -> bool {
        node.ancestors()
            .last()
            .map(|root| root == self.syntax())
            .unwrap_or(false)
    }
}
