//! Recursive descent parser for tx3
//!
//! Builds a rowan GreenNode tree from tokens.
//! Supports error recovery and produces a lossless CST.

use super::lexer::{Lexer, Token};
use super::syntax_kind::SyntaxKind;
use rowan::{Checkpoint, GreenNode, GreenNodeBuilder, TextRange, TextSize};

/// Parse result containing the green tree and any errors
#[derive(Debug, Clone)]
pub struct Parse {
    pub green: GreenNode,
    pub errors: Vec<SyntaxError>,
}

impl Parse {
    /// Get the root syntax node
    pub fn syntax(&self) -> super::SyntaxNode {
        super::SyntaxNode::new_root(self.green.clone())
    }

    /// Check if parsing succeeded without errors
    pub fn ok(&self) -> bool {
        self.errors.is_empty()
    }
}

/// A syntax error with location and message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxError {
    pub message: String,
    pub range: TextRange,
}

impl SyntaxError {
    pub fn new(message: impl Into<String>, range: TextRange) -> Self {
        Self {
            message: message.into(),
            range,
        }
    }
}

/// Parse tx3 source code into a CST
pub fn parse(input: &str) -> Parse {
    let tokens: Vec<_> = Lexer::new(input).collect();
    let mut parser = Parser::new(&tokens);
    parser.parse_source_file();
    parser.finish()
}

const TOP_LEVEL_FIRST: &[SyntaxKind] = &[
    SyntaxKind::PARTY_KW,
    SyntaxKind::POLICY_KW,
    SyntaxKind::RECORD_KW,
    SyntaxKind::TYPE_KW,
    SyntaxKind::ASSET_KW,
    SyntaxKind::ENV_KW,
    SyntaxKind::TX_KW,
];

const TX_BODY_FIRST: &[SyntaxKind] = &[
    SyntaxKind::INPUT_KW,
    SyntaxKind::OUTPUT_KW,
    SyntaxKind::MINT_KW,
    SyntaxKind::BURN_KW,
    SyntaxKind::VALIDITY_KW,
    SyntaxKind::METADATA_KW,
    SyntaxKind::COLLATERAL_KW,
    SyntaxKind::LET_KW,
];

/// The parser state
struct Parser<'a> {
    tokens: &'a [Token<'a>],
    pos: usize,
    builder: GreenNodeBuilder<'static>,
    errors: Vec<SyntaxError>,
}

impl<'a> Parser<'a> {
    fn new(tokens: &'a [Token<'a>]) -> Self {
        Self {
            tokens,
            pos: 0,
            builder: GreenNodeBuilder::new(),
            errors: Vec::new(),
        }
    }

    fn finish(self) -> Parse {
        Parse {
            green: self.builder.finish(),
            errors: self.errors,
        }
    }

    // =========================================================================
    // Token inspection
    // =========================================================================

    fn current(&self) -> Option<&Token<'a>> {
        self.tokens.get(self.pos)
    }

    fn current_kind(&self) -> SyntaxKind {
        self.current().map(|t| t.kind).unwrap_or(SyntaxKind::ERROR)
    }

    fn at(&self, kind: SyntaxKind) -> bool {
        self.current_kind() == kind
    }

    fn at_any(&self, kinds: &[SyntaxKind]) -> bool {
        kinds.contains(&self.current_kind())
    }

    fn at_eof(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    fn nth(&self, n: usize) -> SyntaxKind {
        // Look ahead, skipping trivia
        let mut idx = self.pos;
        let mut count = 0;
        while idx < self.tokens.len() {
            if !self.tokens[idx].kind.is_trivia() {
                if count == n {
                    return self.tokens[idx].kind;
                }
                count += 1;
            }
            idx += 1;
        }
        SyntaxKind::ERROR
    }

    // =========================================================================
    // Token consumption
    // =========================================================================

    fn bump(&mut self) {
        if let Some(token) = self.current() {
            self.builder.token(token.kind.into(), token.text);
            self.pos += 1;
        }
    }

    fn bump_any(&mut self) {
        self.bump();
    }

    fn eat(&mut self, kind: SyntaxKind) -> bool {
        if self.at(kind) {
            self.bump();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, kind: SyntaxKind) -> bool {
        if self.eat(kind) {
            true
        } else {
            self.error(format!("expected {:?}", kind));
            false
        }
    }

    fn skip_trivia(&mut self) {
        while self.current().map(|t| t.kind.is_trivia()).unwrap_or(false) {
            self.bump();
        }
    }

    /// Consume a name token: an IDENT or a soft keyword in identifier position.
    fn name(&mut self) {
        if self.current_kind().is_name_like() {
            self.bump();
        } else {
            self.error("expected a name");
        }
    }

    // =========================================================================
    // Error handling
    // =========================================================================

    fn error(&mut self, message: impl Into<String>) {
        let range = self
            .current()
            .map(|t| TextRange::at(t.offset, TextSize::of(t.text)))
            .unwrap_or_else(|| TextRange::empty(TextSize::new(0)));
        self.errors.push(SyntaxError::new(message, range));
    }

    fn error_recover(&mut self, message: impl Into<String>, recovery: &[SyntaxKind]) {
        self.error(message);
        self.builder.start_node(SyntaxKind::ERROR.into());
        // Always consume at least one token to make progress
        let mut consumed = false;
        while !self.at_eof() && !self.at_any(recovery) {
            self.bump_any();
            consumed = true;
        }
        if !consumed && !self.at_eof() {
            self.bump_any();
        }
        self.builder.finish_node();
    }

    // =========================================================================
    // Node building helpers
    // =========================================================================

    fn start_node(&mut self, kind: SyntaxKind) {
        self.builder.start_node(kind.into());
    }

    fn start_node_at(&mut self, checkpoint: Checkpoint, kind: SyntaxKind) {
        self.builder.start_node_at(checkpoint, kind.into());
    }

    fn checkpoint(&self) -> Checkpoint {
        self.builder.checkpoint()
    }

    fn finish_node(&mut self) {
        self.builder.finish_node();
    }

    // =========================================================================
    // Grammar rules
    // =========================================================================

    /// SourceFile = TopLevelDecl*
    fn parse_source_file(&mut self) {
        self.start_node(SyntaxKind::SOURCE_FILE);

        while !self.at_eof() {
            let pos_before = self.pos;
            self.skip_trivia();
            if self.at_eof() {
                break;
            }
            self.parse_top_level_decl();
            // Safety: if we didn't make progress, force-skip a token
            if self.pos == pos_before && !self.at_eof() {
                self.error(format!("stuck on token: {:?}", self.current_kind()));
                self.bump_any();
            }
        }

        self.finish_node();
    }

    /// TopLevelDecl = PartyDecl | PolicyDecl | RecordDecl | TypeDecl
    ///              | AssetDecl | EnvDecl | TxDecl
    fn parse_top_level_decl(&mut self) {
        match self.current_kind() {
            SyntaxKind::PARTY_KW => self.parse_party_decl(),
            SyntaxKind::POLICY_KW => {
                self.parse_value_decl(SyntaxKind::POLICY_DECL, SyntaxKind::POLICY_KW)
            }
            SyntaxKind::ASSET_KW => {
                self.parse_value_decl(SyntaxKind::ASSET_DECL, SyntaxKind::ASSET_KW)
            }
            SyntaxKind::RECORD_KW => {
                self.parse_record_like(SyntaxKind::RECORD_DECL, SyntaxKind::RECORD_KW)
            }
            SyntaxKind::TYPE_KW => {
                self.parse_record_like(SyntaxKind::TYPE_DECL, SyntaxKind::TYPE_KW)
            }
            SyntaxKind::ENV_KW => self.parse_env_decl(),
            SyntaxKind::TX_KW => self.parse_tx_decl(),
            _ => {
                self.error_recover(
                    format!("expected a declaration, found {:?}", self.current_kind()),
                    TOP_LEVEL_FIRST,
                );
            }
        }
    }

    /// PartyDecl = 'party' Name ';'
    fn parse_party_decl(&mut self) {
        self.start_node(SyntaxKind::PARTY_DECL);

        self.expect(SyntaxKind::PARTY_KW);
        self.skip_trivia();
        self.name();
        self.skip_trivia();
        self.expect(SyntaxKind::SEMICOLON);

        self.finish_node();
    }

    /// PolicyDecl = 'policy' Name '=' Expr ';'
    /// AssetDecl  = 'asset'  Name '=' Expr ';'
    fn parse_value_decl(&mut self, node: SyntaxKind, kw: SyntaxKind) {
        self.start_node(node);

        self.expect(kw);
        self.skip_trivia();
        self.name();
        self.skip_trivia();
        self.expect(SyntaxKind::EQ);
        self.skip_trivia();
        self.parse_expr();
        self.skip_trivia();
        self.expect(SyntaxKind::SEMICOLON);

        self.finish_node();
    }

    /// RecordDecl = 'record' Name '{' RecordField,* '}'
    /// TypeDecl   = 'type'   Name '{' RecordField,* '}'
    fn parse_record_like(&mut self, node: SyntaxKind, kw: SyntaxKind) {
        self.start_node(node);

        self.expect(kw);
        self.skip_trivia();
        self.name();
        self.skip_trivia();
        self.parse_record_field_list();

        self.finish_node();
    }

    /// EnvDecl = 'env' '{' RecordField,* '}'
    fn parse_env_decl(&mut self) {
        self.start_node(SyntaxKind::ENV_DECL);

        self.expect(SyntaxKind::ENV_KW);
        self.skip_trivia();
        self.parse_record_field_list();

        self.finish_node();
    }

    fn parse_record_field_list(&mut self) {
        self.expect(SyntaxKind::L_BRACE);

        while !self.at_eof() && !self.at(SyntaxKind::R_BRACE) {
            let pos_before = self.pos;
            self.skip_trivia();
            if self.at_eof() || self.at(SyntaxKind::R_BRACE) {
                break;
            }
            self.parse_record_field();
            self.skip_trivia();
            self.eat(SyntaxKind::COMMA);
            if self.pos == pos_before {
                self.error(format!("stuck on token: {:?}", self.current_kind()));
                self.bump_any();
            }
        }

        self.expect(SyntaxKind::R_BRACE);
    }

    /// RecordField = Name ':' Type
    fn parse_record_field(&mut self) {
        self.start_node(SyntaxKind::RECORD_FIELD);

        self.name();
        self.skip_trivia();
        self.expect(SyntaxKind::COLON);
        self.skip_trivia();
        self.parse_type();

        self.finish_node();
    }

    /// TxDecl = 'tx' Name '(' ParamList? ')' '{' TxBodyItem* '}'
    fn parse_tx_decl(&mut self) {
        self.start_node(SyntaxKind::TX_DECL);

        self.expect(SyntaxKind::TX_KW);
        self.skip_trivia();
        self.name();
        self.skip_trivia();
        if self.at(SyntaxKind::L_PAREN) {
            self.parse_param_list();
        }
        self.skip_trivia();
        self.expect(SyntaxKind::L_BRACE);

        while !self.at_eof() && !self.at(SyntaxKind::R_BRACE) {
            let pos_before = self.pos;
            self.skip_trivia();
            if self.at_eof() || self.at(SyntaxKind::R_BRACE) {
                break;
            }
            self.parse_tx_body_item();
            if self.pos == pos_before {
                self.error(format!("stuck on token: {:?}", self.current_kind()));
                self.bump_any();
            }
        }

        self.expect(SyntaxKind::R_BRACE);

        self.finish_node();
    }

    /// ParamList = '(' TxParam (',' TxParam)* ','? ')'
    fn parse_param_list(&mut self) {
        self.start_node(SyntaxKind::PARAM_LIST);

        self.expect(SyntaxKind::L_PAREN);

        while !self.at_eof() && !self.at(SyntaxKind::R_PAREN) {
            let pos_before = self.pos;
            self.skip_trivia();
            if self.at_eof() || self.at(SyntaxKind::R_PAREN) {
                break;
            }
            self.parse_tx_param();
            self.skip_trivia();
            self.eat(SyntaxKind::COMMA);
            if self.pos == pos_before {
                self.error(format!("stuck on token: {:?}", self.current_kind()));
                self.bump_any();
            }
        }

        self.expect(SyntaxKind::R_PAREN);

        self.finish_node();
    }

    /// TxParam = Name ':' Type
    fn parse_tx_param(&mut self) {
        self.start_node(SyntaxKind::TX_PARAM);

        self.name();
        self.skip_trivia();
        self.expect(SyntaxKind::COLON);
        self.skip_trivia();
        self.parse_type();

        self.finish_node();
    }

    /// TxBodyItem = InputBlock | OutputBlock | TxBlock | LetBinding
    fn parse_tx_body_item(&mut self) {
        match self.current_kind() {
            SyntaxKind::INPUT_KW => self.parse_io_block(SyntaxKind::INPUT_BLOCK),
            SyntaxKind::OUTPUT_KW => self.parse_io_block(SyntaxKind::OUTPUT_BLOCK),
            SyntaxKind::MINT_KW
            | SyntaxKind::BURN_KW
            | SyntaxKind::VALIDITY_KW
            | SyntaxKind::METADATA_KW
            | SyntaxKind::COLLATERAL_KW => self.parse_tx_block(),
            SyntaxKind::LET_KW => self.parse_let_binding(),
            _ => {
                let mut recovery = TX_BODY_FIRST.to_vec();
                recovery.push(SyntaxKind::R_BRACE);
                self.error_recover(
                    format!("expected a tx body item, found {:?}", self.current_kind()),
                    &recovery,
                );
            }
        }
    }

    /// InputBlock  = 'input'  Name? '{' BlockItem* '}'
    /// OutputBlock = 'output' Name? '{' BlockItem* '}'
    fn parse_io_block(&mut self, node: SyntaxKind) {
        self.start_node(node);

        self.bump(); // 'input' | 'output'
        self.skip_trivia();
        // Blocks may be anonymous
        if self.current_kind().is_name_like() {
            self.bump();
            self.skip_trivia();
        }
        self.parse_block_body();

        self.finish_node();
    }

    /// TxBlock = ('mint'|'burn'|'validity'|'metadata'|'collateral') '{' BlockItem* '}'
    fn parse_tx_block(&mut self) {
        self.start_node(SyntaxKind::TX_BLOCK);

        self.bump(); // block keyword
        self.skip_trivia();
        self.parse_block_body();

        self.finish_node();
    }

    /// BlockItem = BlockField ','? | LetBinding
    fn parse_block_body(&mut self) {
        self.expect(SyntaxKind::L_BRACE);

        while !self.at_eof() && !self.at(SyntaxKind::R_BRACE) {
            let pos_before = self.pos;
            self.skip_trivia();
            if self.at_eof() || self.at(SyntaxKind::R_BRACE) {
                break;
            }
            if self.at(SyntaxKind::LET_KW) {
                self.parse_let_binding();
            } else {
                self.parse_block_field();
                self.skip_trivia();
                self.eat(SyntaxKind::COMMA);
            }
            if self.pos == pos_before {
                self.error(format!("stuck on token: {:?}", self.current_kind()));
                self.bump_any();
            }
        }

        self.expect(SyntaxKind::R_BRACE);
    }

    /// BlockField = Name ':' Expr
    fn parse_block_field(&mut self) {
        self.start_node(SyntaxKind::BLOCK_FIELD);

        self.name();
        self.skip_trivia();
        self.expect(SyntaxKind::COLON);
        self.skip_trivia();
        self.parse_expr();

        self.finish_node();
    }

    /// LetBinding = 'let' Name '=' Expr ';'
    fn parse_let_binding(&mut self) {
        self.start_node(SyntaxKind::LET_BINDING);

        self.expect(SyntaxKind::LET_KW);
        self.skip_trivia();
        self.name();
        self.skip_trivia();
        self.expect(SyntaxKind::EQ);
        self.skip_trivia();
        self.parse_expr();
        self.skip_trivia();
        self.expect(SyntaxKind::SEMICOLON);

        self.finish_node();
    }

    /// Type = 'List' '<' Type '>' | TYPE_REF(builtin-kw | IDENT)
    fn parse_type(&mut self) {
        if self.at(SyntaxKind::LIST_KW) {
            self.start_node(SyntaxKind::LIST_TYPE);
            self.bump();
            self.skip_trivia();
            self.expect(SyntaxKind::LT);
            self.skip_trivia();
            self.parse_type();
            self.skip_trivia();
            self.expect(SyntaxKind::GT);
            self.finish_node();
        } else if self.current_kind().is_builtin_type() || self.at(SyntaxKind::IDENT) {
            self.start_node(SyntaxKind::TYPE_REF);
            self.bump();
            self.finish_node();
        } else {
            self.error(format!("expected a type, found {:?}", self.current_kind()));
        }
    }

    // =========================================================================
    // Expressions (precedence climbing, left-associative via checkpoints)
    // =========================================================================

    fn parse_expr(&mut self) {
        self.parse_or_expr();
    }

    /// OrExpr = AndExpr ('||' AndExpr)*
    fn parse_or_expr(&mut self) {
        let cp = self.checkpoint();
        self.parse_and_expr();

        while self.at_after_trivia(SyntaxKind::PIPE_PIPE) {
            self.start_node_at(cp, SyntaxKind::BINARY_EXPR);
            self.skip_trivia();
            self.bump();
            self.skip_trivia();
            self.parse_and_expr();
            self.finish_node();
        }
    }

    /// AndExpr = EqExpr ('&&' EqExpr)*
    fn parse_and_expr(&mut self) {
        let cp = self.checkpoint();
        self.parse_eq_expr();

        while self.at_after_trivia(SyntaxKind::AMP_AMP) {
            self.start_node_at(cp, SyntaxKind::BINARY_EXPR);
            self.skip_trivia();
            self.bump();
            self.skip_trivia();
            self.parse_eq_expr();
            self.finish_node();
        }
    }

    /// EqExpr = RelExpr (('==' | '!=') RelExpr)*
    fn parse_eq_expr(&mut self) {
        let cp = self.checkpoint();
        self.parse_rel_expr();

        while self.any_after_trivia(&[SyntaxKind::EQ_EQ, SyntaxKind::BANG_EQ]) {
            self.start_node_at(cp, SyntaxKind::BINARY_EXPR);
            self.skip_trivia();
            self.bump();
            self.skip_trivia();
            self.parse_rel_expr();
            self.finish_node();
        }
    }

    /// RelExpr = AddExpr (('<' | '>' | '<=' | '>=') AddExpr)*
    fn parse_rel_expr(&mut self) {
        let cp = self.checkpoint();
        self.parse_add_expr();

        while self.any_after_trivia(&[
            SyntaxKind::LT,
            SyntaxKind::GT,
            SyntaxKind::LT_EQ,
            SyntaxKind::GT_EQ,
        ]) {
            self.start_node_at(cp, SyntaxKind::BINARY_EXPR);
            self.skip_trivia();
            self.bump();
            self.skip_trivia();
            self.parse_add_expr();
            self.finish_node();
        }
    }

    /// AddExpr = MulExpr (('+' | '-') MulExpr)*
    fn parse_add_expr(&mut self) {
        let cp = self.checkpoint();
        self.parse_mul_expr();

        while self.any_after_trivia(&[SyntaxKind::PLUS, SyntaxKind::MINUS]) {
            self.start_node_at(cp, SyntaxKind::BINARY_EXPR);
            self.skip_trivia();
            self.bump();
            self.skip_trivia();
            self.parse_mul_expr();
            self.finish_node();
        }
    }

    /// MulExpr = UnaryExpr (('*' | '/' | '%') UnaryExpr)*
    fn parse_mul_expr(&mut self) {
        let cp = self.checkpoint();
        self.parse_unary_expr();

        while self.any_after_trivia(&[SyntaxKind::STAR, SyntaxKind::SLASH, SyntaxKind::PERCENT]) {
            self.start_node_at(cp, SyntaxKind::BINARY_EXPR);
            self.skip_trivia();
            self.bump();
            self.skip_trivia();
            self.parse_unary_expr();
            self.finish_node();
        }
    }

    /// UnaryExpr = ('-' | '!') UnaryExpr | PostfixExpr
    fn parse_unary_expr(&mut self) {
        if self.at(SyntaxKind::MINUS) || self.at(SyntaxKind::BANG) {
            self.start_node(SyntaxKind::UNARY_EXPR);
            self.bump();
            self.skip_trivia();
            self.parse_unary_expr();
            self.finish_node();
        } else {
            self.parse_postfix_expr();
        }
    }

    /// PostfixExpr = Primary ('.' Name)*
    fn parse_postfix_expr(&mut self) {
        self.parse_primary_expr();

        // Property access chains like `src.amount`; the leading name
        // reference carries the resolvable identifier.
        while self.at_after_trivia(SyntaxKind::DOT) {
            self.skip_trivia();
            self.bump(); // .
            self.skip_trivia();
            self.name();
        }
    }

    /// Primary = Literal | CallExpr | RecordLiteral | NameRef | '(' Expr ')'
    fn parse_primary_expr(&mut self) {
        match self.current_kind() {
            SyntaxKind::INTEGER
            | SyntaxKind::HEX
            | SyntaxKind::STRING
            | SyntaxKind::TRUE_KW
            | SyntaxKind::FALSE_KW => {
                self.start_node(SyntaxKind::LITERAL);
                self.bump();
                self.finish_node();
            }

            SyntaxKind::L_PAREN => {
                self.start_node(SyntaxKind::PAREN_EXPR);
                self.bump();
                self.skip_trivia();
                self.parse_expr();
                self.skip_trivia();
                self.expect(SyntaxKind::R_PAREN);
                self.finish_node();
            }

            kind if kind.is_name_like() => match self.nth(1) {
                SyntaxKind::L_PAREN => {
                    self.start_node(SyntaxKind::CALL_EXPR);
                    self.parse_name_ref();
                    self.skip_trivia();
                    self.parse_arg_list();
                    self.finish_node();
                }
                SyntaxKind::L_BRACE => {
                    self.start_node(SyntaxKind::RECORD_LITERAL);
                    self.parse_name_ref();
                    self.skip_trivia();
                    self.parse_record_literal_body();
                    self.finish_node();
                }
                _ => self.parse_name_ref(),
            },

            _ => {
                self.error(format!(
                    "expected an expression, found {:?}",
                    self.current_kind()
                ));
            }
        }
    }

    fn parse_name_ref(&mut self) {
        self.start_node(SyntaxKind::NAME_REF);
        self.name();
        self.finish_node();
    }

    /// ArgList = '(' (Expr (',' Expr)*)? ')'
    fn parse_arg_list(&mut self) {
        self.start_node(SyntaxKind::ARG_LIST);

        self.expect(SyntaxKind::L_PAREN);
        self.skip_trivia();

        if !self.at(SyntaxKind::R_PAREN) {
            self.parse_expr();
            self.skip_trivia();

            while self.at(SyntaxKind::COMMA) {
                self.bump();
                self.skip_trivia();
                self.parse_expr();
                self.skip_trivia();
            }
        }

        self.expect(SyntaxKind::R_PAREN);

        self.finish_node();
    }

    /// RecordLiteralBody = '{' (RecordFieldInit ','?)* '}'
    fn parse_record_literal_body(&mut self) {
        self.expect(SyntaxKind::L_BRACE);

        while !self.at_eof() && !self.at(SyntaxKind::R_BRACE) {
            let pos_before = self.pos;
            self.skip_trivia();
            if self.at_eof() || self.at(SyntaxKind::R_BRACE) {
                break;
            }
            self.start_node(SyntaxKind::RECORD_FIELD_INIT);
            self.name();
            self.skip_trivia();
            self.expect(SyntaxKind::COLON);
            self.skip_trivia();
            self.parse_expr();
            self.finish_node();
            self.skip_trivia();
            self.eat(SyntaxKind::COMMA);
            if self.pos == pos_before {
                self.error(format!("stuck on token: {:?}", self.current_kind()));
                self.bump_any();
            }
        }

        self.expect(SyntaxKind::R_BRACE);
    }

    // =========================================================================
    // Lookahead over trivia
    // =========================================================================

    /// True when the next non-trivia token is `kind`, without consuming trivia.
    fn at_after_trivia(&self, kind: SyntaxKind) -> bool {
        self.nth(0) == kind
    }

    fn any_after_trivia(&self, kinds: &[SyntaxKind]) -> bool {
        kinds.contains(&self.nth(0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_empty() {
        let parse = parse("");
        assert!(parse.ok());
    }

    #[test]
    fn test_parse_party() {
        let parse = parse("party Sender;");
        assert!(parse.ok(), "errors: {:?}", parse.errors);

        let root = parse.syntax();
        assert_eq!(root.kind(), SyntaxKind::SOURCE_FILE);
        assert_eq!(
            root.children().next().map(|n| n.kind()),
            Some(SyntaxKind::PARTY_DECL)
        );
    }

    #[test]
    fn test_parse_policy_and_asset() {
        let parse = parse(
            r#"policy Escrow = import("escrow");
               asset Token = 0xCAFE;"#,
        );
        assert!(parse.ok(), "errors: {:?}", parse.errors);
    }

    #[test]
    fn test_parse_record() {
        let parse = parse("record State { owner: Bytes, amount: Int }");
        assert!(parse.ok(), "errors: {:?}", parse.errors);
    }

    #[test]
    fn test_parse_type_decl_and_list() {
        let parse = parse("type Datum { entries: List<Int> }");
        assert!(parse.ok(), "errors: {:?}", parse.errors);
    }

    #[test]
    fn test_parse_env() {
        let parse = parse("env { deadline: Int, owner: Address }");
        assert!(parse.ok(), "errors: {:?}", parse.errors);
    }

    #[test]
    fn test_parse_tx_with_blocks() {
        let source = r#"
            party Sender;
            party Receiver;

            tx transfer(quantity: Int) {
                input source {
                    from: Sender,
                    min_amount: Ada(quantity),
                }
                output {
                    to: Receiver,
                    amount: Ada(quantity) - fees,
                }
            }
        "#;
        let parse = parse(source);
        assert!(parse.ok(), "errors: {:?}", parse.errors);
    }

    #[test]
    fn test_parse_let_binding_nested_in_block() {
        let source = r#"
            tx t() {
                let base = 10;
                output {
                    let doubled = base * 2;
                    amount: doubled,
                }
            }
        "#;
        let parse = parse(source);
        assert!(parse.ok(), "errors: {:?}", parse.errors);
    }

    #[test]
    fn test_parse_record_literal() {
        let parse = parse(r#"tx t() { output { datum: State { amount: 5 } } }"#);
        assert!(parse.ok(), "errors: {:?}", parse.errors);
    }

    #[test]
    fn test_soft_keyword_as_param_name() {
        let parse = parse("tx t(metadata: Int) { validity { since: metadata } }");
        assert!(parse.ok(), "errors: {:?}", parse.errors);
    }

    #[test]
    fn test_lossless_roundtrip() {
        let source = "party A; // trailing comment\ntx go() { /* body */ }";
        let parse = parse(source);
        assert_eq!(parse.syntax().text().to_string(), source);
    }

    #[test]
    fn test_error_recovery_continues() {
        let parse = parse("party ; record R { x: Int } garbage tx t() {}");
        assert!(!parse.ok());
        let root = parse.syntax();
        let kinds: Vec<_> = root.children().map(|n| n.kind()).collect();
        assert!(kinds.contains(&SyntaxKind::RECORD_DECL));
        assert!(kinds.contains(&SyntaxKind::TX_DECL));
    }

    #[test]
    fn test_binary_expr_nesting() {
        let parse = parse("tx t() { output { amount: 1 + 2 * 3 } }");
        assert!(parse.ok(), "errors: {:?}", parse.errors);
        let root = parse.syntax();
        let binary = root
            .descendants()
            .filter(|n| n.kind() == SyntaxKind::BINARY_EXPR)
            .count();
        assert_eq!(binary, 2);
    }
}
