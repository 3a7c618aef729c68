//! Syntax kinds for the Rowan-based CST
//!
//! This enum defines all possible node and token kinds in the tx3 syntax
//! tree: tokens are leaves (identifiers, keywords, punctuation), nodes are
//! composite (declarations, blocks, expressions).

/// All syntax kinds (tokens and nodes) in tx3
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u16)]
#[allow(non_camel_case_types)]
pub enum SyntaxKind {
    // =========================================================================
    // TRIVIA (preserved but not semantically meaningful)
    // =========================================================================
    WHITESPACE = 0,
    LINE_COMMENT,
    BLOCK_COMMENT,

    // =========================================================================
    // LITERALS
    // =========================================================================
    IDENT,   // identifier
    INTEGER, // 42
    HEX,     // 0xDEADBEEF
    STRING,  // "hello"

    // =========================================================================
    // PUNCTUATION
    // =========================================================================
    L_BRACE,   // {
    R_BRACE,   // }
    L_PAREN,   // (
    R_PAREN,   // )
    L_BRACKET, // [
    R_BRACKET, // ]
    SEMICOLON, // ;
    COLON,     // :
    COMMA,     // ,
    EQ,        // =
    DOT,       // .
    PLUS,      // +
    MINUS,     // -
    STAR,      // *
    SLASH,     // /
    PERCENT,   // %
    BANG,      // !
    LT,        // <
    GT,        // >
    LT_EQ,     // <=
    GT_EQ,     // >=
    EQ_EQ,     // ==
    BANG_EQ,   // !=
    AMP_AMP,   // &&
    PIPE_PIPE, // ||

    // =========================================================================
    // KEYWORDS
    // =========================================================================
    // Declaration keywords
    PARTY_KW,
    POLICY_KW,
    RECORD_KW,
    TYPE_KW,
    ASSET_KW,
    ENV_KW,
    TX_KW,

    // Tx body keywords
    INPUT_KW,
    OUTPUT_KW,
    LET_KW,

    // Literals
    TRUE_KW,
    FALSE_KW,

    // Type constructor
    LIST_KW,

    // Soft keywords — also accepted in identifier positions
    MINT_KW,
    BURN_KW,
    VALIDITY_KW,
    METADATA_KW,
    COLLATERAL_KW,
    IMPORT_KW,

    // Built-in type keywords. Lexically distinct from identifiers, so they
    // never reach the type-reference resolver.
    INT_KW,
    BYTES_KW,
    BOOL_KW,
    UNIT_KW,
    UTXO_REF_KW,
    ADDRESS_KW,
    VALUE_KW,

    // =========================================================================
    // COMPOSITE NODES
    // =========================================================================
    // Root
    SOURCE_FILE,

    // Top-level declarations
    PARTY_DECL,
    POLICY_DECL,
    RECORD_DECL,
    TYPE_DECL,
    ASSET_DECL,
    ENV_DECL,
    TX_DECL,

    // Tx internals
    PARAM_LIST,
    TX_PARAM,
    INPUT_BLOCK,
    OUTPUT_BLOCK,
    TX_BLOCK, // mint/burn/validity/metadata/collateral bodies
    BLOCK_FIELD,
    LET_BINDING,

    // Record internals
    RECORD_FIELD,

    // Types
    TYPE_REF,
    LIST_TYPE,

    // Expressions
    NAME_REF,
    LITERAL,
    BINARY_EXPR,
    UNARY_EXPR,
    CALL_EXPR,
    RECORD_LITERAL,
    RECORD_FIELD_INIT,
    ARG_LIST,
    PAREN_EXPR,

    // Special
    ERROR,

    #[doc(hidden)]
    __LAST,
}

impl SyntaxKind {
    /// Check if this is a trivia token (whitespace or comment)
    pub fn is_trivia(self) -> bool {
        matches!(
            self,
            Self::WHITESPACE | Self::LINE_COMMENT | Self::BLOCK_COMMENT
        )
    }

    /// Check if this is a keyword
    pub fn is_keyword(self) -> bool {
        (self as u16) >= (Self::PARTY_KW as u16) && (self as u16) <= (Self::VALUE_KW as u16)
    }

    /// Soft keywords may appear wherever an identifier is expected
    /// (e.g. a tx param named `metadata`).
    pub fn is_soft_keyword(self) -> bool {
        matches!(
            self,
            Self::MINT_KW
                | Self::BURN_KW
                | Self::VALIDITY_KW
                | Self::METADATA_KW
                | Self::COLLATERAL_KW
                | Self::IMPORT_KW
        )
    }

    /// Built-in type keywords (`Int`, `Bytes`, ...).
    pub fn is_builtin_type(self) -> bool {
        (self as u16) >= (Self::INT_KW as u16) && (self as u16) <= (Self::VALUE_KW as u16)
    }

    /// Tokens accepted in a name position.
    pub fn is_name_like(self) -> bool {
        self == Self::IDENT || self.is_soft_keyword()
    }
}

impl From<SyntaxKind> for rowan::SyntaxKind {
    fn from(kind: SyntaxKind) -> Self {
        Self(kind as u16)
    }
}

impl From<rowan::SyntaxKind> for SyntaxKind {
    fn from(raw: rowan::SyntaxKind) -> Self {
        assert!(raw.0 < SyntaxKind::__LAST as u16);
        // Safety: we control all syntax kinds and check bounds above
        unsafe { std::mem::transmute::<u16, SyntaxKind>(raw.0) }
    }
}

/// Language definition for Rowan
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Tx3Language {}

impl rowan::Language for Tx3Language {
    type Kind = SyntaxKind;

    fn kind_from_raw(raw: rowan::SyntaxKind) -> Self::Kind {
        raw.into()
    }

    fn kind_to_raw(kind: Self::Kind) -> rowan::SyntaxKind {
        kind.into()
    }
}

/// Type aliases for convenience
pub type SyntaxNode = rowan::SyntaxNode<Tx3Language>;
pub type SyntaxToken = rowan::SyntaxToken<Tx3Language>;
pub type SyntaxElement = rowan::SyntaxElement<Tx3Language>;
pub type SyntaxNodeChildren = rowan::SyntaxNodeChildren<Tx3Language>;
