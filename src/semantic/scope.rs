//! Transaction-local scope tables
//!
//! A scope table maps names visible inside one tx to the declarations that
//! introduce them: parameters, named input blocks, named output blocks, and
//! every let binding in the tx subtree. Insertion order follows that list,
//! and a later entry overwrites an earlier one of the same name.

use crate::parser::SyntaxNode;
use crate::syntax::{AstNode, Decl, TxDecl};
use indexmap::IndexMap;
use parking_lot::Mutex;
use rustc_hash::FxHashMap;
use smol_str::SmolStr;
use std::sync::Arc;
use tracing::trace;

#[derive(Debug, Default)]
pub struct ScopeTable {
    entries: IndexMap<SmolStr, Decl>,
}

impl ScopeTable {
    pub fn get(&self, name: &str) -> Option<&Decl> {
        self.entries.get(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &SmolStr> {
        self.entries.keys()
    }

    pub fn entries(&self) -> impl Iterator<Item = (&SmolStr, &Decl)> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

pub fn build_scope(tx: &TxDecl) -> ScopeTable {
    trace!(tx = ?tx.name(), "building local scope");
    let mut entries = IndexMap::default();
    let mut add = |decl: Decl| {
        if let Some(name) = decl.name() {
            entries.insert(name, decl);
        }
    };

    for param in tx.params() {
        add(Decl::Param(param));
    }
    for input in tx.input_blocks() {
        add(Decl::Input(input));
    }
    for output in tx.output_blocks() {
        add(Decl::Output(output));
    }
    for binding in tx.let_bindings() {
        add(Decl::Let(binding));
    }

    ScopeTable { entries }
}

/// Per-tx scope cache, keyed by the tx syntax node and guarded by the
/// document version. A version change drops every cached table at once.
#[derive(Debug, Default)]
pub struct ScopeCache {
    inner: Mutex<ScopeCacheState>,
}

#[derive(Debug, Default)]
struct ScopeCacheState {
    stamp: u64,
    tables: FxHashMap<SyntaxNode, Arc<ScopeTable>>,
}

impl ScopeCache {
    pub fn get_or_compute(&self, stamp: u64, tx: &TxDecl) -> Arc<ScopeTable> {
        let mut state = self.inner.lock();
        if state.stamp != stamp {
            state.tables.clear();
            state.stamp = stamp;
        }
        if let Some(table) = state.tables.get(tx.syntax()) {
            return table.clone();
        }
        let table = Arc::new(build_scope(tx));
        state.tables.insert(tx.syntax().clone(), table.clone());
        table
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;
    use crate::syntax::{DeclKind, SourceFile};

    fn first_tx(input: &str) -> TxDecl {
        SourceFile::cast(parse(input).syntax())
            .unwrap()
            .txs()
            .next()
            .unwrap()
    }

    #[test]
    fn test_scope_collects_all_kinds() {
        let tx = first_tx(
            r#"
            tx t(amt: Int) {
                input src { from: A }
                output dst { to: B }
                let half = amt / 2;
            }
            "#,
        );
        let scope = build_scope(&tx);
        assert_eq!(scope.len(), 4);
        assert_eq!(scope.get("amt").unwrap().kind(), DeclKind::Param);
        assert_eq!(scope.get("src").unwrap().kind(), DeclKind::Input);
        assert_eq!(scope.get("dst").unwrap().kind(), DeclKind::Output);
        assert_eq!(scope.get("half").unwrap().kind(), DeclKind::Let);
    }

    #[test]
    fn test_anonymous_blocks_skipped() {
        let tx = first_tx("tx t() { output { to: B } }");
        let scope = build_scope(&tx);
        assert!(scope.is_empty());
    }

    #[test]
    fn test_let_shadows_param() {
        let tx = first_tx(
            r#"
            tx t(x: Int) {
                let x = 1;
            }
            "#,
        );
        let scope = build_scope(&tx);
        assert_eq!(scope.get("x").unwrap().kind(), DeclKind::Let);
    }

    #[test]
    fn test_input_shadows_param() {
        let tx = first_tx("tx t(src: Int) { input src { from: A } }");
        let scope = build_scope(&tx);
        assert_eq!(scope.get("src").unwrap().kind(), DeclKind::Input);
    }

    #[test]
    fn test_nested_let_visible() {
        let tx = first_tx("tx t() { output { let inner = 1; amount: inner } }");
        let scope = build_scope(&tx);
        assert_eq!(scope.get("inner").unwrap().kind(), DeclKind::Let);
    }

    #[test]
    fn test_cache_reuses_table_within_stamp() {
        let tx = first_tx("tx t(a: Int) {}");
        let cache = ScopeCache::default();
        let first = cache.get_or_compute(7, &tx);
        let second = cache.get_or_compute(7, &tx);
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn test_cache_drops_tables_on_new_stamp() {
        let tx = first_tx("tx t(a: Int) {}");
        let cache = ScopeCache::default();
        let first = cache.get_or_compute(1, &tx);
        let second = cache.get_or_compute(2, &tx);
        assert!(!Arc::ptr_eq(&first, &second));
    }
}
