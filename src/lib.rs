//! # tx3-base
//!
//! Core library for the tx3 transaction-template DSL: parsing, typed AST,
//! and incremental name resolution for editor integrations.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! ide       → editor features (goto-def, completion, find-usages, rename)
//!   ↓
//! semantic  → Document, declaration catalog, scopes, resolvers, memo cells
//!   ↓
//! syntax    → typed AST wrappers over the rowan CST
//!   ↓
//! parser    → Logos lexer, recursive-descent parser, SyntaxKind
//!   ↓
//! base      → primitives (TextRange, LineIndex)
//! ```
//!
//! The crate owns no I/O and persists nothing: every query is answered from
//! the in-memory syntax tree of a single [`semantic::Document`], and every
//! derived structure is re-validated against the document's modification
//! counter before reuse.

/// Foundation types: TextRange re-exports, LineIndex
pub mod base;

/// Parser: Logos lexer, recursive-descent parser, syntax kinds
pub mod parser;

/// Syntax: typed AST wrappers, declaration enum
pub mod syntax;

/// Semantic model: document, catalogs, scopes, resolvers
pub mod semantic;

/// IDE features: goto-definition, completion, find-usages, rename
pub mod ide;

// Re-export foundation types
pub use base::{LineCol, LineIndex, TextRange, TextSize};
pub use parser::{SyntaxElement, SyntaxKind, SyntaxNode, SyntaxToken, Tx3Language};
pub use semantic::Document;
pub use syntax::{Decl, DeclKind};
