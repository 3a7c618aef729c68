//! Typed AST wrappers over the untyped rowan CST.
//!
//! Each struct wraps a SyntaxNode and provides methods to access children.
//! Named nodes expose their name through a shared lookup that accepts both
//! plain identifiers and soft keywords used in name position.

use crate::parser::{SyntaxKind, SyntaxNode, SyntaxToken};
use smol_str::SmolStr;

/// Trait for AST nodes that wrap a SyntaxNode
pub trait AstNode: Sized {
    fn can_cast(kind: SyntaxKind) -> bool;
    fn cast(node: SyntaxNode) -> Option<Self>;
    fn syntax(&self) -> &SyntaxNode;
}

// ============================================================================
// Helper macros
// ============================================================================

macro_rules! ast_node {
    ($name:ident, $kind:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        pub struct $name(SyntaxNode);

        impl AstNode for $name {
            fn can_cast(kind: SyntaxKind) -> bool {
                kind == SyntaxKind::$kind
            }

            fn cast(node: SyntaxNode) -> Option<Self> {
                if Self::can_cast(node.kind()) {
                    Some(Self(node))
                } else {
                    None
                }
            }

            fn syntax(&self) -> &SyntaxNode {
                &self.0
            }
        }
    };
}

/// Find the name token of a named node: the first IDENT token child,
/// falling back to the first soft keyword used in name position.
fn name_token_of(node: &SyntaxNode) -> Option<SyntaxToken> {
    node.children_with_tokens()
        .filter_map(|e| e.into_token())
        .find(|t| t.kind() == SyntaxKind::IDENT)
        .or_else(|| {
            node.children_with_tokens()
                .filter_map(|e| e.into_token())
                .find(|t| t.kind().is_soft_keyword())
        })
}

macro_rules! impl_named {
    ($name:ident) => {
        impl $name {
            pub fn name_token(&self) -> Option<SyntaxToken> {
                name_token_of(&self.0)
            }

            pub fn name(&self) -> Option<SmolStr> {
                self.name_token().map(|t| SmolStr::new(t.text()))
            }
        }
    };
}

// ============================================================================
// Root
// ============================================================================

ast_node!(SourceFile, SOURCE_FILE);

impl SourceFile {
    pub fn decls(&self) -> impl Iterator<Item = Decl> + '_ {
        self.0.children().filter_map(Decl::cast)
    }

    pub fn parties(&self) -> impl Iterator<Item = PartyDecl> + '_ {
        self.0.children().filter_map(PartyDecl::cast)
    }

    pub fn policies(&self) -> impl Iterator<Item = PolicyDecl> + '_ {
        self.0.children().filter_map(PolicyDecl::cast)
    }

    pub fn records(&self) -> impl Iterator<Item = RecordDecl> + '_ {
        self.0.children().filter_map(RecordDecl::cast)
    }

    pub fn type_decls(&self) -> impl Iterator<Item = TypeDecl> + '_ {
        self.0.children().filter_map(TypeDecl::cast)
    }

    pub fn assets(&self) -> impl Iterator<Item = AssetDecl> + '_ {
        self.0.children().filter_map(AssetDecl::cast)
    }

    pub fn txs(&self) -> impl Iterator<Item = TxDecl> + '_ {
        self.0.children().filter_map(TxDecl::cast)
    }

    pub fn env_decls(&self) -> impl Iterator<Item = EnvDecl> + '_ {
        self.0.children().filter_map(EnvDecl::cast)
    }
}

// ============================================================================
// Top-level declarations
// ============================================================================

ast_node!(PartyDecl, PARTY_DECL);
impl_named!(PartyDecl);

ast_node!(PolicyDecl, POLICY_DECL);
impl_named!(PolicyDecl);

ast_node!(AssetDecl, ASSET_DECL);
impl_named!(AssetDecl);

ast_node!(RecordDecl, RECORD_DECL);
impl_named!(RecordDecl);

impl RecordDecl {
    pub fn fields(&self) -> impl Iterator<Item = RecordField> + '_ {
        self.0.children().filter_map(RecordField::cast)
    }
}

ast_node!(TypeDecl, TYPE_DECL);
impl_named!(TypeDecl);

impl TypeDecl {
    pub fn fields(&self) -> impl Iterator<Item = RecordField> + '_ {
        self.0.children().filter_map(RecordField::cast)
    }
}

ast_node!(EnvDecl, ENV_DECL);

impl EnvDecl {
    pub fn fields(&self) -> impl Iterator<Item = RecordField> + '_ {
        self.0.children().filter_map(RecordField::cast)
    }
}

ast_node!(RecordField, RECORD_FIELD);
impl_named!(RecordField);

impl RecordField {
    pub fn ty(&self) -> Option<Type> {
        self.0.children().find_map(Type::cast)
    }
}

// ============================================================================
// Transactions
// ============================================================================

ast_node!(TxDecl, TX_DECL);
impl_named!(TxDecl);

impl TxDecl {
    pub fn param_list(&self) -> Option<ParamList> {
        self.0.children().find_map(ParamList::cast)
    }

    pub fn params(&self) -> impl Iterator<Item = TxParam> + '_ {
        self.param_list()
            .into_iter()
            .flat_map(|list| list.params().collect::<Vec<_>>())
    }

    pub fn input_blocks(&self) -> impl Iterator<Item = InputBlock> + '_ {
        self.0.children().filter_map(InputBlock::cast)
    }

    pub fn output_blocks(&self) -> impl Iterator<Item = OutputBlock> + '_ {
        self.0.children().filter_map(OutputBlock::cast)
    }

    /// Let bindings anywhere in the tx body, including inside nested blocks,
    /// in source order.
    pub fn let_bindings(&self) -> impl Iterator<Item = LetBinding> + '_ {
        self.0.descendants().filter_map(LetBinding::cast)
    }
}

ast_node!(ParamList, PARAM_LIST);

impl ParamList {
    pub fn params(&self) -> impl Iterator<Item = TxParam> + '_ {
        self.0.children().filter_map(TxParam::cast)
    }
}

ast_node!(TxParam, TX_PARAM);
impl_named!(TxParam);

impl TxParam {
    pub fn ty(&self) -> Option<Type> {
        self.0.children().find_map(Type::cast)
    }
}

ast_node!(InputBlock, INPUT_BLOCK);
impl_named!(InputBlock);

impl InputBlock {
    pub fn fields(&self) -> impl Iterator<Item = BlockField> + '_ {
        self.0.children().filter_map(BlockField::cast)
    }
}

ast_node!(OutputBlock, OUTPUT_BLOCK);
impl_named!(OutputBlock);

impl OutputBlock {
    pub fn fields(&self) -> impl Iterator<Item = BlockField> + '_ {
        self.0.children().filter_map(BlockField::cast)
    }
}

ast_node!(TxBlock, TX_BLOCK);

impl TxBlock {
    /// The introducing keyword (mint, burn, validity, metadata, collateral).
    pub fn keyword(&self) -> Option<SyntaxToken> {
        self.0
            .children_with_tokens()
            .filter_map(|e| e.into_token())
            .find(|t| t.kind().is_soft_keyword())
    }

    pub fn fields(&self) -> impl Iterator<Item = BlockField> + '_ {
        self.0.children().filter_map(BlockField::cast)
    }
}

ast_node!(BlockField, BLOCK_FIELD);
impl_named!(BlockField);

impl BlockField {
    pub fn value(&self) -> Option<SyntaxNode> {
        self.0.children().next()
    }
}

ast_node!(LetBinding, LET_BINDING);
impl_named!(LetBinding);

impl LetBinding {
    pub fn value(&self) -> Option<SyntaxNode> {
        self.0.children().next()
    }
}

// ============================================================================
// References and types
// ============================================================================

ast_node!(NameRef, NAME_REF);

impl NameRef {
    pub fn token(&self) -> Option<SyntaxToken> {
        self.0
            .children_with_tokens()
            .filter_map(|e| e.into_token())
            .find(|t| t.kind().is_name_like())
    }

    pub fn referenced_name(&self) -> Option<SmolStr> {
        self.token().map(|t| SmolStr::new(t.text()))
    }
}

ast_node!(TypeRef, TYPE_REF);

impl TypeRef {
    pub fn token(&self) -> Option<SyntaxToken> {
        self.0
            .children_with_tokens()
            .filter_map(|e| e.into_token())
            .find(|t| !t.kind().is_trivia())
    }

    /// The identifier token, when this names a user-defined type.
    /// Builtin types are keyword tokens and return None.
    pub fn ident_token(&self) -> Option<SyntaxToken> {
        self.token().filter(|t| t.kind() == SyntaxKind::IDENT)
    }

    pub fn type_name(&self) -> Option<SmolStr> {
        self.token().map(|t| SmolStr::new(t.text()))
    }

    pub fn is_builtin(&self) -> bool {
        self.token()
            .map(|t| t.kind().is_builtin_type())
            .unwrap_or(false)
    }
}

ast_node!(ListType, LIST_TYPE);

impl ListType {
    pub fn element(&self) -> Option<Type> {
        self.0.children().find_map(Type::cast)
    }
}

/// A type annotation: a plain named type or a List instantiation.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Type {
    Ref(TypeRef),
    List(ListType),
}

impl AstNode for Type {
    fn can_cast(kind: SyntaxKind) -> bool {
        matches!(kind, SyntaxKind::TYPE_REF | SyntaxKind::LIST_TYPE)
    }

    fn cast(node: SyntaxNode) -> Option<Self> {
        match node.kind() {
            SyntaxKind::TYPE_REF => Some(Self::Ref(TypeRef(node))),
            SyntaxKind::LIST_TYPE => Some(Self::List(ListType(node))),
            _ => None,
        }
    }

    fn syntax(&self) -> &SyntaxNode {
        match self {
            Self::Ref(n) => n.syntax(),
            Self::List(n) => n.syntax(),
        }
    }
}

// ============================================================================
// Declarations (resolution targets)
// ============================================================================

/// The kind of a declaration a name can resolve to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeclKind {
    Party,
    Policy,
    Asset,
    Record,
    Type,
    Tx,
    Param,
    Input,
    Output,
    Let,
}

/// Any declaration that introduces a resolvable name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Decl {
    Party(PartyDecl),
    Policy(PolicyDecl),
    Asset(AssetDecl),
    Record(RecordDecl),
    Type(TypeDecl),
    Tx(TxDecl),
    Param(TxParam),
    Input(InputBlock),
    Output(OutputBlock),
    Let(LetBinding),
}

impl AstNode for Decl {
    fn can_cast(kind: SyntaxKind) -> bool {
        matches!(
            kind,
            SyntaxKind::PARTY_DECL
                | SyntaxKind::POLICY_DECL
                | SyntaxKind::ASSET_DECL
                | SyntaxKind::RECORD_DECL
                | SyntaxKind::TYPE_DECL
                | SyntaxKind::TX_DECL
                | SyntaxKind::TX_PARAM
                | SyntaxKind::INPUT_BLOCK
                | SyntaxKind::OUTPUT_BLOCK
                | SyntaxKind::LET_BINDING
        )
    }

    fn cast(node: SyntaxNode) -> Option<Self> {
        match node.kind() {
            SyntaxKind::PARTY_DECL => Some(Self::Party(PartyDecl(node))),
            SyntaxKind::POLICY_DECL => Some(Self::Policy(PolicyDecl(node))),
            SyntaxKind::ASSET_DECL => Some(Self::Asset(AssetDecl(node))),
            SyntaxKind::RECORD_DECL => Some(Self::Record(RecordDecl(node))),
            SyntaxKind::TYPE_DECL => Some(Self::Type(TypeDecl(node))),
            SyntaxKind::TX_DECL => Some(Self::Tx(TxDecl(node))),
            SyntaxKind::TX_PARAM => Some(Self::Param(TxParam(node))),
            SyntaxKind::INPUT_BLOCK => Some(Self::Input(InputBlock(node))),
            SyntaxKind::OUTPUT_BLOCK => Some(Self::Output(OutputBlock(node))),
            SyntaxKind::LET_BINDING => Some(Self::Let(LetBinding(node))),
            _ => None,
        }
    }

    fn syntax(&self) -> &SyntaxNode {
        match self {
            Self::Party(n) => n.syntax(),
            Self::Policy(n) => n.syntax(),
            Self::Asset(n) => n.syntax(),
            Self::Record(n) => n.syntax(),
            Self::Type(n) => n.syntax(),
            Self::Tx(n) => n.syntax(),
            Self::Param(n) => n.syntax(),
            Self::Input(n) => n.syntax(),
            Self::Output(n) => n.syntax(),
            Self::Let(n) => n.syntax(),
        }
    }
}

impl Decl {
    pub fn kind(&self) -> DeclKind {
        match self {
            Self::Party(_) => DeclKind::Party,
            Self::Policy(_) => DeclKind::Policy,
            Self::Asset(_) => DeclKind::Asset,
            Self::Record(_) => DeclKind::Record,
            Self::Type(_) => DeclKind::Type,
            Self::Tx(_) => DeclKind::Tx,
            Self::Param(_) => DeclKind::Param,
            Self::Input(_) => DeclKind::Input,
            Self::Output(_) => DeclKind::Output,
            Self::Let(_) => DeclKind::Let,
        }
    }

    pub fn name_token(&self) -> Option<SyntaxToken> {
        name_token_of(self.syntax())
    }

    pub fn name(&self) -> Option<SmolStr> {
        self.name_token().map(|t| SmolStr::new(t.text()))
    }

    pub fn text_range(&self) -> rowan::TextRange {
        self.syntax().text_range()
    }
}
