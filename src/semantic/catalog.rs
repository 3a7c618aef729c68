//! Declaration catalog
//!
//! Per-kind lists of top-level declarations plus the aggregate file index,
//! each memoized against the document version. All lists come from a linear
//! scan of the root's direct children; declarations without a name token
//! contribute nothing to the indexes.

use super::memo::Memo;
use crate::syntax::{
    AssetDecl, Decl, PartyDecl, PolicyDecl, RecordDecl, SourceFile, TxDecl, TypeDecl,
};
use indexmap::IndexMap;
use smol_str::SmolStr;
use std::sync::Arc;
use tracing::trace;

/// Aggregate name-to-declaration mapping for a whole file.
///
/// Built parties, then policies, records, type declarations, assets, and
/// txs; a later kind overwrites an earlier one on name collision.
pub type FileIndex = IndexMap<SmolStr, Decl>;

#[derive(Debug, Default)]
pub struct DeclCatalog {
    parties: Memo<Vec<PartyDecl>>,
    policies: Memo<Vec<PolicyDecl>>,
    records: Memo<Vec<RecordDecl>>,
    type_decls: Memo<Vec<TypeDecl>>,
    assets: Memo<Vec<AssetDecl>>,
    txs: Memo<Vec<TxDecl>>,
    env_field_names: Memo<Vec<SmolStr>>,
    file_index: Memo<FileIndex>,
}

impl DeclCatalog {
    pub fn parties(&self, stamp: u64, file: &SourceFile) -> Arc<Vec<PartyDecl>> {
        self.parties.get_or_compute(stamp, || {
            trace!(stamp, "recomputing party list");
            file.parties().collect()
        })
    }

    pub fn policies(&self, stamp: u64, file: &SourceFile) -> Arc<Vec<PolicyDecl>> {
        self.policies.get_or_compute(stamp, || {
            trace!(stamp, "recomputing policy list");
            file.policies().collect()
        })
    }

    pub fn records(&self, stamp: u64, file: &SourceFile) -> Arc<Vec<RecordDecl>> {
        self.records.get_or_compute(stamp, || {
            trace!(stamp, "recomputing record list");
            file.records().collect()
        })
    }

    pub fn type_decls(&self, stamp: u64, file: &SourceFile) -> Arc<Vec<TypeDecl>> {
        self.type_decls.get_or_compute(stamp, || {
            trace!(stamp, "recomputing type declaration list");
            file.type_decls().collect()
        })
    }

    pub fn assets(&self, stamp: u64, file: &SourceFile) -> Arc<Vec<AssetDecl>> {
        self.assets.get_or_compute(stamp, || {
            trace!(stamp, "recomputing asset list");
            file.assets().collect()
        })
    }

    pub fn txs(&self, stamp: u64, file: &SourceFile) -> Arc<Vec<TxDecl>> {
        self.txs.get_or_compute(stamp, || {
            trace!(stamp, "recomputing tx list");
            file.txs().collect()
        })
    }

    /// Ordered field names across all `env` declarations in the file.
    pub fn env_field_names(&self, stamp: u64, file: &SourceFile) -> Arc<Vec<SmolStr>> {
        self.env_field_names.get_or_compute(stamp, || {
            file.env_decls()
                .flat_map(|env| env.fields().collect::<Vec<_>>())
                .filter_map(|field| field.name())
                .collect()
        })
    }

    pub fn file_index(&self, stamp: u64, file: &SourceFile) -> Arc<FileIndex> {
        self.file_index.get_or_compute(stamp, || {
            trace!(stamp, "rebuilding file index");
            build_file_index(file)
        })
    }
}

fn build_file_index(file: &SourceFile) -> FileIndex {
    let mut index = FileIndex::default();
    let mut add = |index: &mut FileIndex, decl: Decl| {
        if let Some(name) = decl.name() {
            index.insert(name, decl);
        }
    };

    for party in file.parties() {
        add(&mut index, Decl::Party(party));
    }
    for policy in file.policies() {
        add(&mut index, Decl::Policy(policy));
    }
    for record in file.records() {
        add(&mut index, Decl::Record(record));
    }
    for type_decl in file.type_decls() {
        add(&mut index, Decl::Type(type_decl));
    }
    for asset in file.assets() {
        add(&mut index, Decl::Asset(asset));
    }
    for tx in file.txs() {
        add(&mut index, Decl::Tx(tx));
    }

    index
}
