//! Find-usages over a single document.
//!
//! Resolves every reference in the file and keeps the ones that land on
//! the requested declaration. The walk checks the cancellation token
//! between references so a host can abort a pass that is no longer
//! wanted; a cancelled pass returns None instead of a partial list.

use crate::semantic::Document;
use crate::syntax::{AstNode, Decl, NameRef, TypeRef};
use rowan::TextRange;
use tokio_util::sync::CancellationToken;
use tracing::trace;

pub fn find_usages(
    doc: &Document,
    decl: &Decl,
    cancel: &CancellationToken,
) -> Option<Vec<TextRange>> {
    let mut usages = Vec::new();

    for node in doc.syntax().descendants() {
        if cancel.is_cancelled() {
            trace!("find-usages cancelled");
            return None;
        }

        if let Some(name_ref) = NameRef::cast(node.clone()) {
            if doc.resolve_value_reference(&name_ref).as_ref() == Some(decl) {
                usages.push(reference_range(&name_ref));
            }
        } else if let Some(type_ref) = TypeRef::cast(node) {
            if doc.resolve_type_reference(&type_ref).as_ref() == Some(decl) {
                usages.push(type_ref.syntax().text_range());
            }
        }
    }

    Some(usages)
}

fn reference_range(name_ref: &NameRef) -> TextRange {
    name_ref
        .token()
        .map(|t| t.text_range())
        .unwrap_or_else(|| name_ref.syntax().text_range())
}
