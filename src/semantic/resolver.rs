//! Name resolution
//!
//! Value references resolve against the enclosing tx scope first and fall
//! back to the file index. Type references live in their own namespace and
//! only ever match type and record declarations. An unresolved name is a
//! normal `None`, never an error.

use super::document::Document;
use crate::syntax::{AstNode, Decl, NameRef, TxDecl, TypeRef};
use tracing::trace;

pub fn resolve_value_reference(doc: &Document, name_ref: &NameRef) -> Option<Decl> {
    if !doc.owns(name_ref.syntax()) {
        trace!("value reference is not part of the current tree");
        return None;
    }
    let name = name_ref.referenced_name()?;

    if let Some(tx) = name_ref.syntax().ancestors().find_map(TxDecl::cast) {
        let scope = doc.local_scope(&tx);
        if let Some(decl) = scope.get(&name) {
            trace!(%name, kind = ?decl.kind(), "resolved in local tx scope");
            return Some(decl.clone());
        }
    }

    let resolved = doc.file_index().get(name.as_str()).cloned();
    match &resolved {
        Some(decl) => trace!(%name, kind = ?decl.kind(), "resolved in file index"),
        None => trace!(%name, "unresolved value reference"),
    }
    resolved
}

pub fn resolve_type_reference(doc: &Document, type_ref: &TypeRef) -> Option<Decl> {
    if !doc.owns(type_ref.syntax()) {
        trace!("type reference is not part of the current tree");
        return None;
    }
    // Builtin types are keyword tokens; only identifiers resolve.
    let token = type_ref.ident_token()?;
    let name = token.text();

    if let Some(decl) = doc
        .type_decls()
        .iter()
        .find(|t| t.name().as_deref() == Some(name))
    {
        trace!(%name, "resolved type reference to type declaration");
        return Some(Decl::Type(decl.clone()));
    }

    let resolved = doc
        .records()
        .iter()
        .find(|r| r.name().as_deref() == Some(name))
        .map(|r| Decl::Record(r.clone()));
    match &resolved {
        Some(_) => trace!(%name, "resolved type reference to record declaration"),
        None => trace!(%name, "unresolved type reference"),
    }
    resolved
}
