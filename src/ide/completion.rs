//! Context-aware completion.
//!
//! The offered items depend on where the cursor sits: declaration keywords
//! at the top level, block keywords inside a tx body, field names inside
//! input/output blocks, builtin and user types after a type colon, and
//! in-scope values in expression position.

use crate::parser::{SyntaxKind, SyntaxToken};
use crate::semantic::Document;
use crate::syntax::{AstNode, DeclKind, TxDecl};
use rowan::TextSize;
use smol_str::SmolStr;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CompletionItem {
    pub label: SmolStr,
    pub kind: CompletionItemKind,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CompletionItemKind {
    Keyword,
    Field,
    BuiltinType,
    Function,
    Decl(DeclKind),
}

impl CompletionItem {
    fn keyword(label: &str) -> Self {
        Self {
            label: SmolStr::new(label),
            kind: CompletionItemKind::Keyword,
        }
    }

    fn field(label: &str) -> Self {
        Self {
            label: SmolStr::new(label),
            kind: CompletionItemKind::Field,
        }
    }

    fn decl(label: SmolStr, kind: DeclKind) -> Self {
        Self {
            label,
            kind: CompletionItemKind::Decl(kind),
        }
    }
}

const TOP_LEVEL_KEYWORDS: &[&str] = &["party", "policy", "asset", "record", "type", "env", "tx"];
const TX_BODY_KEYWORDS: &[&str] = &[
    "input",
    "output",
    "let",
    "mint",
    "burn",
    "validity",
    "metadata",
    "collateral",
];
const INPUT_FIELDS: &[&str] = &["from", "min_amount", "ref", "redeemer", "datum"];
const OUTPUT_FIELDS: &[&str] = &["to", "amount", "datum"];
const BUILTIN_TYPES: &[&str] = &["Int", "Bytes", "Bool", "Unit", "UtxoRef", "Address", "Value"];

pub fn completions(doc: &Document, offset: TextSize) -> Vec<CompletionItem> {
    let root = doc.syntax();
    let Some(token) = root.token_at_offset(offset).left_biased() else {
        return keyword_items(TOP_LEVEL_KEYWORDS);
    };
    let context = match token.parent() {
        Some(node) => node,
        None => return keyword_items(TOP_LEVEL_KEYWORDS),
    };

    let enclosing_tx = context.ancestors().find_map(TxDecl::cast);
    let after_colon = prev_non_trivia(&token)
        .map(|t| t.kind() == SyntaxKind::COLON)
        .unwrap_or(false);

    for node in context.ancestors() {
        match node.kind() {
            SyntaxKind::TYPE_REF | SyntaxKind::LIST_TYPE => return type_items(doc),
            SyntaxKind::RECORD_FIELD | SyntaxKind::TX_PARAM if after_colon => {
                return type_items(doc);
            }
            SyntaxKind::INPUT_BLOCK => {
                return if after_colon {
                    expression_items(doc, enclosing_tx.as_ref())
                } else {
                    keyword_fields(INPUT_FIELDS)
                };
            }
            SyntaxKind::OUTPUT_BLOCK => {
                return if after_colon {
                    expression_items(doc, enclosing_tx.as_ref())
                } else {
                    keyword_fields(OUTPUT_FIELDS)
                };
            }
            SyntaxKind::TX_BLOCK => {
                return if after_colon {
                    expression_items(doc, enclosing_tx.as_ref())
                } else {
                    keyword_items(&["let"])
                };
            }
            SyntaxKind::POLICY_DECL | SyntaxKind::ASSET_DECL | SyntaxKind::LET_BINDING
                if after_colon_or_eq(&token) =>
            {
                return expression_items(doc, enclosing_tx.as_ref());
            }
            SyntaxKind::TX_DECL => return keyword_items(TX_BODY_KEYWORDS),
            SyntaxKind::SOURCE_FILE => break,
            _ => {}
        }
    }

    keyword_items(TOP_LEVEL_KEYWORDS)
}

fn keyword_items(labels: &[&str]) -> Vec<CompletionItem> {
    labels.iter().map(|l| CompletionItem::keyword(l)).collect()
}

fn keyword_fields(labels: &[&str]) -> Vec<CompletionItem> {
    labels.iter().map(|l| CompletionItem::field(l)).collect()
}

/// Builtins first, then user-defined types and legacy records.
fn type_items(doc: &Document) -> Vec<CompletionItem> {
    let mut items: Vec<_> = BUILTIN_TYPES
        .iter()
        .map(|l| CompletionItem {
            label: SmolStr::new(l),
            kind: CompletionItemKind::BuiltinType,
        })
        .collect();
    items.push(CompletionItem::keyword("List"));

    for decl in doc.type_decls().iter() {
        if let Some(name) = decl.name() {
            items.push(CompletionItem::decl(name, DeclKind::Type));
        }
    }
    for decl in doc.records().iter() {
        if let Some(name) = decl.name() {
            items.push(CompletionItem::decl(name, DeclKind::Record));
        }
    }
    items
}

/// Names usable in expression position: the local tx scope, file-level
/// value declarations, env fields, and the chain builtins.
fn expression_items(doc: &Document, tx: Option<&TxDecl>) -> Vec<CompletionItem> {
    let mut items = Vec::new();

    if let Some(tx) = tx {
        let scope = doc.local_scope(tx);
        for (name, decl) in scope.entries() {
            items.push(CompletionItem::decl(name.clone(), decl.kind()));
        }
    }

    for party in doc.parties().iter() {
        if let Some(name) = party.name() {
            items.push(CompletionItem::decl(name, DeclKind::Party));
        }
    }
    for policy in doc.policies().iter() {
        if let Some(name) = policy.name() {
            items.push(CompletionItem::decl(name, DeclKind::Policy));
        }
    }
    for asset in doc.assets().iter() {
        if let Some(name) = asset.name() {
            items.push(CompletionItem::decl(name, DeclKind::Asset));
        }
    }
    for name in doc.env_field_names().iter() {
        items.push(CompletionItem::field(name));
    }

    items.push(CompletionItem {
        label: SmolStr::new("Ada"),
        kind: CompletionItemKind::Function,
    });
    items.push(CompletionItem::field("fees"));

    items
}

fn prev_non_trivia(token: &SyntaxToken) -> Option<SyntaxToken> {
    let mut current = if token.kind().is_trivia() {
        Some(token.clone())
    } else {
        return non_trivia_before(token.clone());
    };
    while let Some(t) = current {
        if !t.kind().is_trivia() && &t != token {
            return Some(t);
        }
        current = t.prev_token();
    }
    None
}

fn non_trivia_before(token: SyntaxToken) -> Option<SyntaxToken> {
    let mut current = token.prev_token();
    while let Some(t) = current {
        if !t.kind().is_trivia() {
            return Some(t);
        }
        current = t.prev_token();
    }
    None
}

fn after_colon_or_eq(token: &SyntaxToken) -> bool {
    prev_non_trivia(token)
        .map(|t| matches!(t.kind(), SyntaxKind::COLON | SyntaxKind::EQ))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn offset_after(text: &str, needle: &str) -> TextSize {
        let pos = text.find(needle).unwrap() + needle.len();
        TextSize::new(pos as u32)
    }

    fn labels(items: &[CompletionItem]) -> Vec<&str> {
        items.iter().map(|i| i.label.as_str()).collect()
    }

    #[test]
    fn test_top_level_keywords() {
        let doc = Document::new("party A; ");
        let items = completions(&doc, offset_after("party A; ", "party A; "));
        assert!(labels(&items).contains(&"tx"));
        assert!(labels(&items).contains(&"record"));
    }

    #[test]
    fn test_tx_body_keywords() {
        let source = "tx t() {  }";
        let doc = Document::new(source);
        let items = completions(&doc, offset_after(source, "tx t() { "));
        let labels = labels(&items);
        assert!(labels.contains(&"input"));
        assert!(labels.contains(&"output"));
        assert!(labels.contains(&"let"));
        assert!(labels.contains(&"validity"));
    }

    #[test]
    fn test_input_block_field_names() {
        let source = "tx t() { input src {  } }";
        let doc = Document::new(source);
        let items = completions(&doc, offset_after(source, "input src { "));
        assert_eq!(
            labels(&items),
            vec!["from", "min_amount", "ref", "redeemer", "datum"]
        );
    }

    #[test]
    fn test_output_block_field_names() {
        let source = "tx t() { output {  } }";
        let doc = Document::new(source);
        let items = completions(&doc, offset_after(source, "output { "));
        assert_eq!(labels(&items), vec!["to", "amount", "datum"]);
    }

    #[test]
    fn test_expression_position_offers_scope_and_parties() {
        let source = "party Sender; env { deadline: Int } tx t(amt: Int) { input s { from:  } }";
        let doc = Document::new(source);
        let items = completions(&doc, offset_after(source, "from: "));
        let labels = labels(&items);
        assert!(labels.contains(&"amt"));
        assert!(labels.contains(&"s"));
        assert!(labels.contains(&"Sender"));
        assert!(labels.contains(&"deadline"));
        assert!(labels.contains(&"Ada"));
        assert!(labels.contains(&"fees"));
    }

    #[test]
    fn test_type_position_offers_builtins_and_user_types() {
        let source = "record State { x: Int } tx t(p: ) {}";
        let doc = Document::new(source);
        let items = completions(&doc, offset_after(source, "t(p: "));
        let labels = labels(&items);
        assert!(labels.contains(&"Int"));
        assert!(labels.contains(&"Address"));
        assert!(labels.contains(&"List"));
        assert!(labels.contains(&"State"));
        assert!(!labels.contains(&"t"));
    }
}
