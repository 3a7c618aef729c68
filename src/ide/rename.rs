//! Rename a declaration and all references to it.

use super::references::find_usages;
use crate::parser::tokenize;
use crate::semantic::Document;
use crate::syntax::Decl;
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tracing::trace;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RenameError {
    #[error("`{0}` is not a valid identifier")]
    InvalidIdentifier(String),
    #[error("declaration has no name to rename")]
    Anonymous,
}

/// Replace the declaration's name token and every reference that resolves
/// to it, then reparse. The edit is applied as a single text change, so
/// the document version moves by exactly one.
pub fn rename(doc: &mut Document, decl: &Decl, new_name: &str) -> Result<(), RenameError> {
    if !is_valid_identifier(new_name) {
        return Err(RenameError::InvalidIdentifier(new_name.to_string()));
    }
    let name_token = decl.name_token().ok_or(RenameError::Anonymous)?;

    let cancel = CancellationToken::new();
    let mut ranges = find_usages(doc, decl, &cancel).unwrap_or_default();
    ranges.push(name_token.text_range());
    ranges.sort_by_key(|r| r.start());
    ranges.dedup();

    trace!(count = ranges.len(), new_name, "applying rename edits");

    let mut text = doc.text().to_string();
    for range in ranges.iter().rev() {
        text.replace_range(
            usize::from(range.start())..usize::from(range.end()),
            new_name,
        );
    }
    doc.set_text(text);
    Ok(())
}

/// A valid name lexes as exactly one identifier-shaped token. Soft
/// keywords are fine; hard keywords and anything with punctuation or
/// whitespace in it are not.
fn is_valid_identifier(name: &str) -> bool {
    let tokens = tokenize(name);
    tokens.len() == 1 && tokens[0].kind.is_name_like()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::DeclKind;

    fn decl_named(doc: &Document, name: &str) -> Decl {
        doc.file_index().get(name).cloned().unwrap()
    }

    #[test]
    fn test_rename_party_and_references() {
        let mut doc =
            Document::new("party Sender; tx go() { input s { from: Sender } output { to: Sender } }");
        let decl = decl_named(&doc, "Sender");

        rename(&mut doc, &decl, "Origin").unwrap();
        assert_eq!(
            doc.text(),
            "party Origin; tx go() { input s { from: Origin } output { to: Origin } }"
        );
        assert_eq!(doc.file_index().get("Origin").unwrap().kind(), DeclKind::Party);
        assert!(doc.file_index().get("Sender").is_none());
    }

    #[test]
    fn test_rename_leaves_shadowed_references_alone() {
        let mut doc = Document::new("party x; tx t() { let x = 1; output { amount: x } }");
        let party = decl_named(&doc, "x");

        rename(&mut doc, &party, "outer").unwrap();
        // The let binding and its reference keep their spelling.
        assert_eq!(doc.text(), "party outer; tx t() { let x = 1; output { amount: x } }");
    }

    #[test]
    fn test_rename_to_soft_keyword_allowed() {
        let mut doc = Document::new("party A; tx t() { output { to: A } }");
        let decl = decl_named(&doc, "A");

        rename(&mut doc, &decl, "metadata").unwrap();
        assert_eq!(doc.text(), "party metadata; tx t() { output { to: metadata } }");
        assert!(doc.file_index().get("metadata").is_some());
    }

    #[test]
    fn test_rename_rejects_invalid_names() {
        let mut doc = Document::new("party A;");
        let decl = decl_named(&doc, "A");

        for bad in ["", "two words", "1starts_with_digit", "party", "a-b", "Int"] {
            let result = rename(&mut doc, &decl, bad);
            assert_eq!(
                result,
                Err(RenameError::InvalidIdentifier(bad.to_string())),
                "expected {bad:?} to be rejected"
            );
        }
        assert_eq!(doc.text(), "party A;");
    }

    #[test]
    fn test_rename_anonymous_block_rejected() {
        use crate::syntax::AstNode;

        let mut doc = Document::new("tx t() { output { to: A } }");
        let block = doc
            .syntax()
            .descendants()
            .find_map(crate::syntax::OutputBlock::cast)
            .unwrap();

        let result = rename(&mut doc, &Decl::Output(block), "named");
        assert_eq!(result, Err(RenameError::Anonymous));
    }

    #[test]
    fn test_rename_bumps_version_once() {
        let mut doc = Document::new("party A; tx t() { output { to: A } }");
        let decl = decl_named(&doc, "A");
        let before = doc.version();

        rename(&mut doc, &decl, "B").unwrap();
        assert_eq!(doc.version(), before + 1);
    }
}
