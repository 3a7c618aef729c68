//! Logos-based lexer for tx3
//!
//! Fast tokenization using the logos crate.

use super::syntax_kind::SyntaxKind;
use logos::Logos;
use rowan::TextSize;

/// A token with its kind, text, and position
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: SyntaxKind,
    pub text: &'a str,
    pub offset: TextSize,
}

/// Lexer wrapping the logos-generated tokenizer
pub struct Lexer<'a> {
    inner: logos::Lexer<'a, LogosToken>,
    offset: u32,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            inner: LogosToken::lexer(input),
            offset: 0,
        }
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let logos_token = self.inner.next()?;
        let text = self.inner.slice();
        let offset = TextSize::new(self.offset);
        self.offset += text.len() as u32;

        let kind = match logos_token {
            Ok(t) => t.into(),
            Err(()) => SyntaxKind::ERROR,
        };

        Some(Token { kind, text, offset })
    }
}

/// Tokenize an entire string into a Vec
pub fn tokenize(input: &str) -> Vec<Token<'_>> {
    Lexer::new(input).collect()
}

/// Logos token enum - maps to SyntaxKind
#[derive(Logos, Debug, Clone, Copy, PartialEq)]
pub enum LogosToken {
    // =========================================================================
    // TRIVIA
    // =========================================================================
    #[regex(r"[ \t\r\n]+")]
    Whitespace,

    #[regex(r"//[^\n]*")]
    LineComment,

    #[regex(r"/\*([^*]|\*[^/])*\*/")]
    BlockComment,

    // =========================================================================
    // LITERALS
    // =========================================================================
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*")]
    Ident,

    #[regex(r"0x[0-9a-fA-F]+")]
    Hex,

    #[regex(r"[0-9]+")]
    Integer,

    #[regex(r#""([^"\\]|\\.)*""#)]
    String,

    // =========================================================================
    // MULTI-CHARACTER PUNCTUATION (must come before single-char)
    // =========================================================================
    #[token("==")]
    EqEq,

    #[token("!=")]
    BangEq,

    #[token("<=")]
    LtEq,

    #[token(">=")]
    GtEq,

    #[token("&&")]
    AmpAmp,

    #[token("||")]
    PipePipe,

    // =========================================================================
    // SINGLE-CHARACTER PUNCTUATION
    // =========================================================================
    #[token("{")]
    LBrace,

    #[token("}")]
    RBrace,

    #[token("(")]
    LParen,

    #[token(")")]
    RParen,

    #[token("[")]
    LBracket,

    #[token("]")]
    RBracket,

    #[token(";")]
    Semicolon,

    #[token(":")]
    Colon,

    #[token(",")]
    Comma,

    #[token("=")]
    Eq,

    #[token(".")]
    Dot,

    #[token("+")]
    Plus,

    #[token("-")]
    Minus,

    #[token("*")]
    Star,

    #[token("/")]
    Slash,

    #[token("%")]
    Percent,

    #[token("!")]
    Bang,

    #[token("<")]
    Lt,

    #[token(">")]
    Gt,

    // =========================================================================
    // KEYWORDS
    // =========================================================================
    #[token("party")]
    PartyKw,

    #[token("policy")]
    PolicyKw,

    #[token("record")]
    RecordKw,

    #[token("type")]
    TypeKw,

    #[token("asset")]
    AssetKw,

    #[token("env")]
    EnvKw,

    #[token("tx")]
    TxKw,

    #[token("input")]
    InputKw,

    #[token("output")]
    OutputKw,

    #[token("let")]
    LetKw,

    #[token("true")]
    TrueKw,

    #[token("false")]
    FalseKw,

    #[token("List")]
    ListKw,

    #[token("mint")]
    MintKw,

    #[token("burn")]
    BurnKw,

    #[token("validity")]
    ValidityKw,

    #[token("metadata")]
    MetadataKw,

    #[token("collateral")]
    CollateralKw,

    #[token("import")]
    ImportKw,

    // Built-in types
    #[token("Int")]
    IntKw,

    #[token("Bytes")]
    BytesKw,

    #[token("Bool")]
    BoolKw,

    #[token("Unit")]
    UnitKw,

    #[token("UtxoRef")]
    UtxoRefKw,

    #[token("Address")]
    AddressKw,

    #[token("Value")]
    ValueKw,
}

impl From<LogosToken> for SyntaxKind {
    fn from(token: LogosToken) -> Self {
        match token {
            LogosToken::Whitespace => SyntaxKind::WHITESPACE,
            LogosToken::LineComment => SyntaxKind::LINE_COMMENT,
            LogosToken::BlockComment => SyntaxKind::BLOCK_COMMENT,
            LogosToken::Ident => SyntaxKind::IDENT,
            LogosToken::Hex => SyntaxKind::HEX,
            LogosToken::Integer => SyntaxKind::INTEGER,
            LogosToken::String => SyntaxKind::STRING,
            LogosToken::EqEq => SyntaxKind::EQ_EQ,
            LogosToken::BangEq => SyntaxKind::BANG_EQ,
            LogosToken::LtEq => SyntaxKind::LT_EQ,
            LogosToken::GtEq => SyntaxKind::GT_EQ,
            LogosToken::AmpAmp => SyntaxKind::AMP_AMP,
            LogosToken::PipePipe => SyntaxKind::PIPE_PIPE,
            LogosToken::LBrace => SyntaxKind::L_BRACE,
            LogosToken::RBrace => SyntaxKind::R_BRACE,
            LogosToken::LParen => SyntaxKind::L_PAREN,
            LogosToken::RParen => SyntaxKind::R_PAREN,
            LogosToken::LBracket => SyntaxKind::L_BRACKET,
            LogosToken::RBracket => SyntaxKind::R_BRACKET,
            LogosToken::Semicolon => SyntaxKind::SEMICOLON,
            LogosToken::Colon => SyntaxKind::COLON,
            LogosToken::Comma => SyntaxKind::COMMA,
            LogosToken::Eq => SyntaxKind::EQ,
            LogosToken::Dot => SyntaxKind::DOT,
            LogosToken::Plus => SyntaxKind::PLUS,
            LogosToken::Minus => SyntaxKind::MINUS,
            LogosToken::Star => SyntaxKind::STAR,
            LogosToken::Slash => SyntaxKind::SLASH,
            LogosToken::Percent => SyntaxKind::PERCENT,
            LogosToken::Bang => SyntaxKind::BANG,
            LogosToken::Lt => SyntaxKind::LT,
            LogosToken::Gt => SyntaxKind::GT,
            LogosToken::PartyKw => SyntaxKind::PARTY_KW,
            LogosToken::PolicyKw => SyntaxKind::POLICY_KW,
            LogosToken::RecordKw => SyntaxKind::RECORD_KW,
            LogosToken::TypeKw => SyntaxKind::TYPE_KW,
            LogosToken::AssetKw => SyntaxKind::ASSET_KW,
            LogosToken::EnvKw => SyntaxKind::ENV_KW,
            LogosToken::TxKw => SyntaxKind::TX_KW,
            LogosToken::InputKw => SyntaxKind::INPUT_KW,
            LogosToken::OutputKw => SyntaxKind::OUTPUT_KW,
            LogosToken::LetKw => SyntaxKind::LET_KW,
            LogosToken::TrueKw => SyntaxKind::TRUE_KW,
            LogosToken::FalseKw => SyntaxKind::FALSE_KW,
            LogosToken::ListKw => SyntaxKind::LIST_KW,
            LogosToken::MintKw => SyntaxKind::MINT_KW,
            LogosToken::BurnKw => SyntaxKind::BURN_KW,
            LogosToken::ValidityKw => SyntaxKind::VALIDITY_KW,
            LogosToken::MetadataKw => SyntaxKind::METADATA_KW,
            LogosToken::CollateralKw => SyntaxKind::COLLATERAL_KW,
            LogosToken::ImportKw => SyntaxKind::IMPORT_KW,
            LogosToken::IntKw => SyntaxKind::INT_KW,
            LogosToken::BytesKw => SyntaxKind::BYTES_KW,
            LogosToken::BoolKw => SyntaxKind::BOOL_KW,
            LogosToken::UnitKw => SyntaxKind::UNIT_KW,
            LogosToken::UtxoRefKw => SyntaxKind::UTXO_REF_KW,
            LogosToken::AddressKw => SyntaxKind::ADDRESS_KW,
            LogosToken::ValueKw => SyntaxKind::VALUE_KW,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(input: &str) -> Vec<SyntaxKind> {
        tokenize(input)
            .into_iter()
            .filter(|t| !t.kind.is_trivia())
            .map(|t| t.kind)
            .collect()
    }

    #[test]
    fn lex_party_decl() {
        assert_eq!(
            kinds("party Sender;"),
            vec![SyntaxKind::PARTY_KW, SyntaxKind::IDENT, SyntaxKind::SEMICOLON]
        );
    }

    #[test]
    fn lex_builtin_types_are_keywords() {
        assert_eq!(
            kinds("Int Bytes UtxoRef"),
            vec![SyntaxKind::INT_KW, SyntaxKind::BYTES_KW, SyntaxKind::UTXO_REF_KW]
        );
    }

    #[test]
    fn lex_hex_over_integer() {
        assert_eq!(kinds("0xAB12"), vec![SyntaxKind::HEX]);
        assert_eq!(kinds("42"), vec![SyntaxKind::INTEGER]);
    }

    #[test]
    fn lex_offsets_are_cumulative() {
        let tokens = tokenize("tx go");
        assert_eq!(tokens[0].offset, TextSize::new(0));
        assert_eq!(tokens[1].offset, TextSize::new(2));
        assert_eq!(tokens[2].offset, TextSize::new(3));
    }

    #[test]
    fn lex_soft_keywords() {
        assert!(kinds("metadata").iter().all(|k| k.is_soft_keyword()));
        assert_eq!(kinds("metadata_field"), vec![SyntaxKind::IDENT]);
    }
}
