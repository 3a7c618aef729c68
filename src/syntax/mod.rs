//! Typed syntax tree layer
//!
//! Wraps the untyped rowan CST produced by the parser with typed
//! accessors for tx3 declarations, blocks, and expressions.

mod ast;

pub use ast::{
    AssetDecl, AstNode, BlockField, Decl, DeclKind, EnvDecl, InputBlock, LetBinding, ListType,
    NameRef, OutputBlock, ParamList, PartyDecl, PolicyDecl, RecordDecl, RecordField, SourceFile,
    TxBlock, TxDecl, TxParam, Type, TypeDecl, TypeRef,
};
