//! Source parser for the toy C-like language.
//!
//! This module transforms source text into a scope tree:
//! - [`lexer`]: tokenisation (source text → tokens, one at a time)
//! - [`parser`]: recursive descent over declarations, prototypes and scopes
//! - [`expressions`]: streaming lowering of operator chains to temporaries
//! - [`symbols`]: name resolution and the temporary-name factory
//! - [`ast`]: scope tree and expression definitions
//!
//! # Supported subset
//!
//! - Types: `int`, `void` (the latter a 1-byte placeholder, not a true void)
//! - Declarations, function prototypes, function bodies, nested brace blocks
//! - Expression statements: `ident (op ident)* ;` with `+ - * /` only
//! - Comments: `/* */` always; `//` depending on the configured dialect
//!
//! # Implementation
//!
//! Hand-written recursive descent driven one token at a time; the lexer is
//! pulled by the parser rather than tokenising up front, because comment
//! handling and error reporting depend on parse-time options. Expressions
//! are never built as trees: a three-name window is reduced on the fly into
//! temporary assignments (see [`expressions`]).
//!
//! Parser methods are split across files using `impl Parser` blocks so each
//! module extends the parser with related functionality while sharing state.

pub mod ast;
pub mod expressions;
pub mod lexer;
pub mod parser;
pub mod symbols;
