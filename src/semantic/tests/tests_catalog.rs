#![allow(clippy::unwrap_used)]
use crate::semantic::Document;
use crate::syntax::DeclKind;

const SAMPLE: &str = r#"
party Sender;
party Receiver;
policy Escrow = 0xFF;
asset Token = 0xCAFE;
record State { amount: Int }
type Datum { state: State }
env { deadline: Int }

tx transfer(quantity: Int) {
    input source { from: Sender }
    output { to: Receiver }
}
"#;

#[test]
fn test_catalog_lists_by_kind() {
    let doc = Document::new(SAMPLE);

    assert_eq!(doc.parties().len(), 2);
    assert_eq!(doc.policies().len(), 1);
    assert_eq!(doc.assets().len(), 1);
    assert_eq!(doc.records().len(), 1);
    assert_eq!(doc.type_decls().len(), 1);
    assert_eq!(doc.txs().len(), 1);
}

#[test]
fn test_catalog_source_order() {
    let doc = Document::new(SAMPLE);
    let names: Vec<_> = doc.parties().iter().filter_map(|p| p.name()).collect();
    assert_eq!(names, vec!["Sender", "Receiver"]);
}

#[test]
fn test_catalog_only_top_level() {
    // Nothing inside a tx body leaks into the top-level lists.
    let doc = Document::new(SAMPLE);
    assert_eq!(doc.decls_of_kind(DeclKind::Let).len(), 0);
    assert_eq!(doc.decls_of_kind(DeclKind::Tx).len(), 1);
}

#[test]
fn test_env_field_names() {
    let doc = Document::new(SAMPLE);
    assert_eq!(doc.env_field_names().as_slice(), ["deadline"]);
}

#[test]
fn test_env_field_names_merge_across_blocks() {
    let doc = Document::new("env { a: Int } env { b: Bytes }");
    assert_eq!(doc.env_field_names().as_slice(), ["a", "b"]);
}

#[test]
fn test_file_index_contains_all_named_decls() {
    let doc = Document::new(SAMPLE);
    let index = doc.file_index();

    assert_eq!(index.get("Sender").unwrap().kind(), DeclKind::Party);
    assert_eq!(index.get("Escrow").unwrap().kind(), DeclKind::Policy);
    assert_eq!(index.get("Token").unwrap().kind(), DeclKind::Asset);
    assert_eq!(index.get("State").unwrap().kind(), DeclKind::Record);
    assert_eq!(index.get("Datum").unwrap().kind(), DeclKind::Type);
    assert_eq!(index.get("transfer").unwrap().kind(), DeclKind::Tx);
    assert!(index.get("source").is_none());
}

#[test]
fn test_file_index_later_kind_wins_on_collision() {
    let doc = Document::new("party Clash; record Clash { x: Int } tx Clash() {}");
    let index = doc.file_index();
    assert_eq!(index.len(), 1);
    assert_eq!(index.get("Clash").unwrap().kind(), DeclKind::Tx);
}

#[test]
fn test_nameless_decl_skipped() {
    // The party is missing its identifier; it indexes nothing but the
    // rest of the file is unaffected.
    let doc = Document::new("party ; party Ok;");
    let index = doc.file_index();
    assert_eq!(index.len(), 1);
    assert!(index.get("Ok").is_some());
}

#[test]
fn test_catalog_memoized_within_version() {
    let doc = Document::new(SAMPLE);
    let first = doc.parties();
    let second = doc.parties();
    assert!(std::sync::Arc::ptr_eq(&first, &second));
}
