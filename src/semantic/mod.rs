//! Semantic layer
//!
//! The [`Document`] owns source text, the current parse, and a version
//! counter; the catalog, scope tables, and resolver hang off it and
//! memoize their results against that counter.

mod catalog;
mod document;
mod memo;
mod resolver;
mod scope;

#[cfg(test)]
mod tests;

pub use catalog::{DeclCatalog, FileIndex};
pub use document::Document;
pub use resolver::{resolve_type_reference, resolve_value_reference};
pub use scope::{build_scope, ScopeCache, ScopeTable};
