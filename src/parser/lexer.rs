//! Lexer (tokenizer) for the toy C-like language.
//!
//! Produces one [`Token`] at a time from a [`SourceFile`]; the parser pulls
//! tokens as it needs them. Identifier text is not carried on the token: the
//! lexer keeps the most recently scanned word and exposes it through
//! [`Lexer::identifier`], valid while the current token is [`Token::Word`].

use std::fmt;

use once_cell::sync::Lazy;
use rustc_hash::FxHashMap;

use crate::options::Dialect;
use crate::source::{Cursor, SourceFile};

/// All token variants produced by the lexer.
///
/// Tokens carry no payload; the only variable data (identifier text) lives
/// on the lexer itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token {
    Eof,

    Semicolon,
    Comma,

    OpenParen,
    CloseParen,
    OpenBrace,
    CloseBrace,

    Plus,
    Minus,
    Star,
    Division,

    Word,
    Int,
    Void,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Eof => write!(f, "end of file"),
            Token::Semicolon => write!(f, "';'"),
            Token::Comma => write!(f, "','"),
            Token::OpenParen => write!(f, "'('"),
            Token::CloseParen => write!(f, "')'"),
            Token::OpenBrace => write!(f, "'{{'"),
            Token::CloseBrace => write!(f, "'}}'"),
            Token::Plus => write!(f, "'+'"),
            Token::Minus => write!(f, "'-'"),
            Token::Star => write!(f, "'*'"),
            Token::Division => write!(f, "'/'"),
            Token::Word => write!(f, "identifier"),
            Token::Int => write!(f, "'int'"),
            Token::Void => write!(f, "'void'"),
        }
    }
}

static KEYWORDS: Lazy<FxHashMap<&'static str, Token>> = Lazy::new(|| {
    let mut map = FxHashMap::default();
    map.insert("int", Token::Int);
    map.insert("void", Token::Void);
    map
});

/// Lexer error type.
///
/// Only comment termination can fail recoverably; everything else the lexer
/// can be fed by the grammar either tokenises or is an internal-invariant
/// failure (see [`Lexer::advance_token`]).
#[derive(Debug)]
pub struct LexError {
    pub message: String,
}

impl LexError {
    fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for LexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for LexError {}

/// Single-token-lookahead lexer over a source buffer.
pub struct Lexer<'a> {
    cursor: Cursor<'a>,
    dialect: Dialect,
    current: Token,
    identifier: String,
}

impl<'a> Lexer<'a> {
    pub fn new(file: &'a SourceFile, dialect: Dialect) -> Self {
        Self {
            cursor: Cursor::new(file),
            dialect,
            current: Token::Eof,
            identifier: String::new(),
        }
    }

    /// The token most recently returned by [`Lexer::advance_token`].
    pub fn peek_token(&self) -> Token {
        self.current
    }

    /// Text of the most recently scanned word. Only meaningful while the
    /// current token is [`Token::Word`] (or a keyword).
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    /// Consume input until the next token and make it current.
    ///
    /// Characters outside the language's character set, and the compound
    /// operator spellings (`++`, `+=`, `--`, `-=`, `->`, `*=`, `/=`) the
    /// grammar never offers, are internal-invariant failures and panic;
    /// they are not part of the user-facing error taxonomy.
    pub fn advance_token(&mut self) -> Result<Token, LexError> {
        let token = self.scan_token()?;
        self.current = token;
        Ok(token)
    }

    fn scan_token(&mut self) -> Result<Token, LexError> {
        self.identifier.clear();
        loop {
            let c = match self.cursor.peek_and_advance() {
                Some(c) => c,
                None => return Ok(Token::Eof),
            };

            match c {
                '\n' | ' ' | '\t' => {}
                ';' => return Ok(Token::Semicolon),
                ',' => return Ok(Token::Comma),
                '(' => return Ok(Token::OpenParen),
                ')' => return Ok(Token::CloseParen),
                '{' => return Ok(Token::OpenBrace),
                '}' => return Ok(Token::CloseBrace),
                'a'..='z' | 'A'..='Z' | '_' => return Ok(self.scan_word(c)),
                '+' => match self.cursor.peek() {
                    Some('+') | Some('=') => {
                        unreachable!("compound '+' operators are not in the grammar")
                    }
                    _ => return Ok(Token::Plus),
                },
                '-' => match self.cursor.peek() {
                    Some('-') | Some('=') | Some('>') => {
                        unreachable!("compound '-' operators are not in the grammar")
                    }
                    _ => return Ok(Token::Minus),
                },
                '*' => match self.cursor.peek() {
                    Some('=') => unreachable!("'*=' is not in the grammar"),
                    _ => return Ok(Token::Star),
                },
                '/' => match self.cursor.peek() {
                    Some('=') => unreachable!("'/=' is not in the grammar"),
                    Some('*') => self.skip_c_comment()?,
                    Some('/') => {
                        if self.dialect == Dialect::C89 {
                            // Not a comment in the older dialect: emit the
                            // division; the second '/' stays pending.
                            return Ok(Token::Division);
                        }
                        self.skip_cpp_comment()?;
                    }
                    _ => return Ok(Token::Division),
                },
                _ => unreachable!("character {c:?} is outside the language's character set"),
            }
        }
    }

    /// Scan the tail of a word whose first character was already consumed,
    /// then classify it against the keyword table.
    fn scan_word(&mut self, first: char) -> Token {
        self.identifier.push(first);
        while let Some(c) = self.cursor.peek() {
            if c.is_ascii_alphanumeric() || c == '_' {
                self.identifier.push(c);
                self.cursor.advance();
            } else {
                break;
            }
        }
        KEYWORDS
            .get(self.identifier.as_str())
            .copied()
            .unwrap_or(Token::Word)
    }

    /// Skip a `//` comment. On entry the second `/` has been peeked but not
    /// consumed. The terminating newline is left for the scan loop to eat.
    fn skip_cpp_comment(&mut self) -> Result<(), LexError> {
        loop {
            self.cursor.advance();
            match self.cursor.peek() {
                Some('\n') => return Ok(()),
                Some(_) => {}
                None => {
                    return Err(LexError::new(
                        "c++ style comment should be finished by a new-line",
                    ))
                }
            }
        }
    }

    /// Skip a `/* */` comment. On entry the `*` has been peeked but not
    /// consumed.
    fn skip_c_comment(&mut self) -> Result<(), LexError> {
        loop {
            self.cursor.advance();
            loop {
                match self.cursor.peek() {
                    Some('*') => {
                        self.cursor.advance();
                        if self.cursor.peek() == Some('/') {
                            self.cursor.advance();
                            return Ok(());
                        }
                        // Lone '*': re-examine the next character without
                        // consuming, it may itself start the closer.
                    }
                    Some(_) => break,
                    None => return Err(LexError::new("unfinished c comment")),
                }
            }
        }
    }
}
