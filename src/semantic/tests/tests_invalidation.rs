#![allow(clippy::unwrap_used)]
use crate::semantic::Document;
use crate::syntax::{AstNode, DeclKind, NameRef};
use rowan::TextRange;
use std::sync::Arc;

fn name_ref(doc: &Document, text: &str) -> NameRef {
    doc.syntax()
        .descendants()
        .filter_map(NameRef::cast)
        .find(|r| r.referenced_name().as_deref() == Some(text))
        .unwrap()
}

#[test]
fn test_version_increments_on_edit() {
    let mut doc = Document::new("party A;");
    assert_eq!(doc.version(), 0);
    doc.set_text("party B;");
    assert_eq!(doc.version(), 1);
    doc.replace_range(TextRange::new(6.into(), 7.into()), "C");
    assert_eq!(doc.version(), 2);
    assert_eq!(doc.text(), "party C;");
}

#[test]
fn test_caches_survive_reads_but_not_edits() {
    let mut doc = Document::new("party A; party B;");
    let before = doc.file_index();
    assert!(Arc::ptr_eq(&before, &doc.file_index()));

    doc.set_text("party A; party B; party C;");
    let after = doc.file_index();
    assert!(!Arc::ptr_eq(&before, &after));
    assert_eq!(after.len(), 3);
}

#[test]
fn test_scope_recomputed_after_edit() {
    let mut doc = Document::new("tx t(a: Int) {}");
    let tx = doc.txs()[0].clone();
    let before = doc.local_scope(&tx);
    assert!(before.get("a").is_some());
    assert!(before.get("b").is_none());

    doc.set_text("tx t(a: Int, b: Int) {}");
    let tx = doc.txs()[0].clone();
    let after = doc.local_scope(&tx);
    assert!(after.get("b").is_some());
}

#[test]
fn test_rename_invalidates_old_resolution() {
    let source = "party Sender; tx go() { output { to: Sender } }";
    let mut doc = Document::new(source);

    let reference = name_ref(&doc, "Sender");
    let resolved = doc.resolve_value_reference(&reference).unwrap();
    assert_eq!(resolved.kind(), DeclKind::Party);

    // Rename the declaration in place: "party Sender" -> "party Origin".
    let decl_name = resolved.name_token().unwrap();
    doc.replace_range(decl_name.text_range(), "Origin");

    // The pre-edit reference node belongs to the old tree and no longer
    // resolves; a fresh reference to the old spelling is unresolved too.
    assert!(doc.resolve_value_reference(&reference).is_none());
    let stale_spelling = name_ref(&doc, "Sender");
    assert!(doc.resolve_value_reference(&stale_spelling).is_none());

    assert!(doc.file_index().get("Origin").is_some());
    assert!(doc.file_index().get("Sender").is_none());
}

#[test]
fn test_reads_do_not_bump_version() {
    let doc = Document::new("party A; tx t() {}");
    let v = doc.version();
    let _ = doc.file_index();
    let _ = doc.parties();
    let tx = doc.txs()[0].clone();
    let _ = doc.local_scope(&tx);
    assert_eq!(doc.version(), v);
}
