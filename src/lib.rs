//! # Introduction
//!
//! minicc is the front end of a minimal compiler for a toy C-like language.
//! It tokenises source text, parses declarations, function prototypes and
//! nested block scopes with a hand-written recursive descent parser, and
//! lowers infix arithmetic chains into an ordered sequence of
//! temporary-variable assignments (a simplified three-address form).
//!
//! ## Pipeline
//!
//! ```text
//! Source → Lexer → Parser (+ lowering) → SyntaxTree → Dumper
//! ```
//!
//! 1. [`source`]: named immutable source buffer with offset-based peeking.
//! 2. [`parser`]: tokenises the source, builds the scope tree, and lowers
//!    expressions to temporaries while parsing.
//! 3. [`dumper`]: renders a finished tree back to canonical text; it is the
//!    observer used to verify the lowering.
//! 4. [`driver`]: sequences the passes according to [`options::Options`].
//!
//! ## Supported language subset
//!
//! Types: `int` (32-bit) and `void` (modelled as a 1-byte placeholder).
//! Declarations, function prototypes, function bodies and nested brace
//! blocks. Expression statements are flat chains of identifiers joined by
//! `+`, `-`, `*`, `/`; no parentheses, literals, calls or control flow.

pub mod diagnostics;
pub mod driver;
pub mod dumper;
pub mod options;
pub mod parser;
pub mod source;
