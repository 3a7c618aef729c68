//! Go-to-definition implementation.

use crate::base::{LineCol, LineIndex};
use crate::semantic::Document;
use crate::syntax::{AstNode, Decl, DeclKind, NameRef, TypeRef};
use rowan::{TextRange, TextSize};
use smol_str::SmolStr;

/// A target location for go-to-definition.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NavigationTarget {
    /// Range of the declaration's name token.
    pub name_range: TextRange,
    /// Range of the whole declaration.
    pub full_range: TextRange,
    /// Line/column of the name token start (0-indexed).
    pub position: LineCol,
    pub kind: DeclKind,
    pub name: SmolStr,
}

impl NavigationTarget {
    pub fn from_decl(doc: &Document, decl: &Decl) -> Option<Self> {
        let name_token = decl.name_token()?;
        let line_index = LineIndex::new(doc.text());
        Some(Self {
            name_range: name_token.text_range(),
            full_range: decl.text_range(),
            position: line_index.line_col(name_token.text_range().start()),
            kind: decl.kind(),
            name: SmolStr::new(name_token.text()),
        })
    }
}

/// Find the definition of the name under the cursor.
///
/// Returns None when the cursor is not on a reference or the reference
/// does not resolve.
pub fn goto_definition(doc: &Document, offset: TextSize) -> Option<NavigationTarget> {
    let token = doc
        .syntax()
        .token_at_offset(offset)
        .find(|t| t.kind().is_name_like())?;
    let parent = token.parent()?;

    let resolved = if let Some(name_ref) = parent.ancestors().find_map(NameRef::cast) {
        doc.resolve_value_reference(&name_ref)
    } else if let Some(type_ref) = parent.ancestors().find_map(TypeRef::cast) {
        doc.resolve_type_reference(&type_ref)
    } else {
        None
    }?;

    NavigationTarget::from_decl(doc, &resolved)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn offset_of(text: &str, needle: &str) -> TextSize {
        let pos = text.find(needle).unwrap() + needle.len() - 1;
        TextSize::new(pos as u32)
    }

    #[test]
    fn test_goto_party_from_reference() {
        let source = "party Sender; tx go() { input src { from: Sender } }";
        let doc = Document::new(source);
        let target = goto_definition(&doc, offset_of(source, "from: Sender")).unwrap();

        assert_eq!(target.kind, DeclKind::Party);
        assert_eq!(target.name, "Sender");
        assert_eq!(target.position, LineCol { line: 0, col: 6 });
    }

    #[test]
    fn test_goto_type_from_annotation() {
        let source = "record State { x: Int } tx t(s: State) {}";
        let doc = Document::new(source);
        let target = goto_definition(&doc, offset_of(source, "s: State")).unwrap();

        assert_eq!(target.kind, DeclKind::Record);
        assert_eq!(target.name, "State");
    }

    #[test]
    fn test_goto_local_let() {
        let source = "tx t() { let fee = 2; output { amount: fee } }";
        let doc = Document::new(source);
        let target = goto_definition(&doc, offset_of(source, "amount: fee")).unwrap();

        assert_eq!(target.kind, DeclKind::Let);
        assert_eq!(target.name, "fee");
    }

    #[test]
    fn test_goto_on_unresolved_returns_none() {
        let source = "tx t() { output { to: Nobody } }";
        let doc = Document::new(source);
        assert!(goto_definition(&doc, offset_of(source, "Nobody")).is_none());
    }

    #[test]
    fn test_goto_on_keyword_returns_none() {
        let source = "party Sender;";
        let doc = Document::new(source);
        assert!(goto_definition(&doc, TextSize::new(1)).is_none());
    }
}
