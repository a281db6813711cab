//! Main parser coordinator.
//!
//! Provides the [`Parser`] struct, the error type, and the grammar for
//! declarations, prototypes and nested scopes. Expression lowering lives in
//! [`crate::parser::expressions`], name resolution and temporaries in
//! [`crate::parser::symbols`]; both extend [`Parser`] with further
//! `impl` blocks.
//!
//! # Scope construction
//!
//! Scopes under construction live on an explicit stack whose bottom entry is
//! the root. A child scope is pushed when its `{` is seen and is attached to
//! its parent only after its `}` parses successfully, so an in-progress
//! scope is never reachable from the root during parsing. On any failure the
//! whole stack is dropped with the parser; nothing leaks and no partial tree
//! escapes.

use std::fmt;

use crate::options::Options;
use crate::parser::ast::{
    FunctionPrototype, Scope, SyntaxTree, VarArena, Variable, BITS_PER_BYTE, SIZEOF_INT,
    SIZEOF_VOID,
};
use crate::parser::lexer::{LexError, Lexer, Token};
use crate::parser::symbols::TempFactory;
use crate::source::SourceFile;

/// Parser error type.
///
/// Carries the single human-readable diagnostic line (without its trailing
/// newline) and no source position.
#[derive(Debug)]
pub struct ParseError {
    message: String,
}

impl ParseError {
    pub(crate) fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ParseError {}

impl From<LexError> for ParseError {
    fn from(err: LexError) -> Self {
        ParseError {
            message: err.message,
        }
    }
}

/// Recursive descent parser producing a [`SyntaxTree`].
pub struct Parser<'a> {
    pub(crate) lexer: Lexer<'a>,
    pub(crate) arena: VarArena,
    /// Scopes under construction; `stack[0]` is the root.
    pub(crate) stack: Vec<Scope>,
    /// Current brace nesting depth; 0 is the root.
    pub(crate) scope_level: u32,
    /// Temporary-name counter for this compilation unit.
    pub(crate) temps: &'a mut TempFactory,
}

impl<'a> Parser<'a> {
    pub fn new(file: &'a SourceFile, options: &Options, temps: &'a mut TempFactory) -> Self {
        Self {
            lexer: Lexer::new(file, options.dialect),
            arena: VarArena::new(),
            stack: vec![Scope::new()],
            scope_level: 0,
            temps,
        }
    }

    /// Parse the whole compilation unit.
    ///
    /// On success the returned tree owns every scope and variable built,
    /// synthesized temporaries included. On failure the partially built tree
    /// is dropped here and only the error escapes.
    pub fn parse(mut self) -> Result<SyntaxTree, ParseError> {
        self.parse_scope()?;
        if self.scope_level != 0 {
            return Err(ParseError::new("missing '}'"));
        }
        debug_assert_eq!(self.stack.len(), 1);
        let root = self.stack.pop().expect("scope stack underflow");
        Ok(SyntaxTree {
            arena: self.arena,
            root,
        })
    }

    /// Statement loop for the scope currently on top of the stack. Returns
    /// when the scope closes (`}`) or input ends.
    fn parse_scope(&mut self) -> Result<(), ParseError> {
        loop {
            match self.advance_token()? {
                // Empty statement.
                Token::Semicolon => continue,
                Token::Eof => return Ok(()),
                Token::OpenBrace => {
                    if self.scope_level == 0 {
                        // A bare top-level block is a declaration-context
                        // error.
                        return Err(ParseError::new("expected identifier"));
                    }
                    self.parse_child_scope(FunctionPrototype::default())?;
                }
                Token::CloseBrace => return self.leave_scope(),
                Token::Int | Token::Void => self.parse_declaration()?,
                Token::Word => self.parse_expression()?,
                _ => return Err(ParseError::new("expected declaration or identifier")),
            }
        }
    }

    /// Parse a child scope: push it, run the statement loop, and attach it
    /// to its parent on success.
    fn parse_child_scope(&mut self, proto: FunctionPrototype) -> Result<(), ParseError> {
        self.scope_level += 1;
        self.stack.push(Scope::with_proto(proto));
        self.parse_scope()?;
        let child = self.stack.pop().expect("scope stack underflow");
        self.current_scope_mut().children.push(child);
        Ok(())
    }

    fn leave_scope(&mut self) -> Result<(), ParseError> {
        if self.scope_level == 0 {
            return Err(ParseError::new("too many '}'"));
        }
        self.scope_level -= 1;
        Ok(())
    }

    /// A typed declaration: plain variable, forward prototype, or function
    /// body. The current token is the type keyword.
    fn parse_declaration(&mut self) -> Result<(), ParseError> {
        let mut var = Variable::default();
        self.parse_variable(&mut var)?;
        match self.lexer.peek_token() {
            Token::Semicolon => {
                let id = self.arena.alloc(var);
                self.current_scope_mut().vars.push(id);
                Ok(())
            }
            Token::OpenParen => {
                let proto = self.parse_function_prototype(var)?;
                match self.advance_token()? {
                    Token::Semicolon => {
                        self.current_scope_mut().prototypes.push(proto);
                        Ok(())
                    }
                    Token::OpenBrace => self.parse_child_scope(proto),
                    _ => Err(ParseError::new("expected ';' or '{'")),
                }
            }
            _ => {
                if var.name.is_empty() {
                    Err(ParseError::new("expected identifier or '('"))
                } else {
                    Err(ParseError::new("expected ';' or '('"))
                }
            }
        }
    }

    /// Type then optional name. The current token is the type keyword; on
    /// return the current token is the declaration's follower.
    fn parse_variable(&mut self, var: &mut Variable) -> Result<(), ParseError> {
        let is_type = self.parse_type(var);
        debug_assert!(is_type, "caller checked for a type keyword");
        self.parse_identifier(var)
    }

    /// Record the width of the peeked type keyword into `var`. Consumes
    /// nothing; returns false if the current token is not a type, so callers
    /// can use it as backtracking-free lookahead.
    pub(crate) fn parse_type(&self, var: &mut Variable) -> bool {
        match self.lexer.peek_token() {
            Token::Int => var.size = SIZEOF_INT * BITS_PER_BYTE,
            Token::Void => var.size = SIZEOF_VOID * BITS_PER_BYTE,
            _ => return false,
        }
        true
    }

    /// Optional name after a type. `;`, `,` and `)` leave the variable
    /// unnamed and stay current; a word is captured and consumed.
    fn parse_identifier(&mut self, var: &mut Variable) -> Result<(), ParseError> {
        match self.advance_token()? {
            Token::Semicolon | Token::Comma | Token::CloseParen => Ok(()),
            Token::Word => {
                var.name = self.lexer.identifier().to_string();
                self.advance_token()?;
                Ok(())
            }
            _ => Err(ParseError::new("expected identifier or '('")),
        }
    }

    /// Parameter list. The current token is `(`; on success the current
    /// token is `)`.
    fn parse_function_prototype(
        &mut self,
        var: Variable,
    ) -> Result<FunctionPrototype, ParseError> {
        let mut proto = FunctionPrototype {
            return_type: var,
            params: Vec::new(),
        };
        while self.lexer.peek_token() != Token::CloseParen {
            let mut param = Variable::default();

            self.advance_token()?;
            if self.parse_type(&mut param) {
                self.advance_token()?;
                if self.lexer.peek_token() == Token::Word {
                    param.name = self.lexer.identifier().to_string();
                    self.advance_token()?;
                }
                proto.params.push(param);
                match self.lexer.peek_token() {
                    Token::Comma => {}
                    Token::CloseParen => return Ok(proto),
                    _ => return Err(ParseError::new("expected identifier or ','")),
                }
            } else if self.lexer.peek_token() == Token::CloseParen {
                // Empty parameter list.
                return Ok(proto);
            } else {
                return Err(ParseError::new("expected params or ')'"));
            }
        }
        Ok(proto)
    }

    // ===== Helper methods =====

    pub(crate) fn advance_token(&mut self) -> Result<Token, ParseError> {
        Ok(self.lexer.advance_token()?)
    }

    /// The scope statements are currently being recorded into.
    pub(crate) fn current_scope_mut(&mut self) -> &mut Scope {
        self.stack.last_mut().expect("scope stack underflow")
    }

    /// The root scope, for name resolution. In-progress child scopes are not
    /// attached to it yet and are therefore invisible to lookups.
    pub(crate) fn root_scope(&self) -> &Scope {
        &self.stack[0]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::ast::Expression;

    fn parse(source: &str) -> Result<SyntaxTree, ParseError> {
        let file = SourceFile::new("<test>", source);
        let options = Options::default();
        let mut temps = TempFactory::new();
        Parser::new(&file, &options, &mut temps).parse()
    }

    #[test]
    fn test_empty_inputs_parse() {
        for source in ["", ";", ";;;;;;;;;;;;;;;", "\n \t\t\t     \n   \t\t"] {
            let tree = parse(source).unwrap();
            assert!(tree.root.vars.is_empty());
            assert!(tree.root.children.is_empty());
        }
    }

    #[test]
    fn test_variable_declarations() {
        let tree = parse("int i; void v; int;").unwrap();
        assert_eq!(tree.root.vars.len(), 3);
        assert_eq!(tree.var(tree.root.vars[0]).name, "i");
        assert_eq!(tree.var(tree.root.vars[0]).size, 32);
        assert_eq!(tree.var(tree.root.vars[1]).name, "v");
        assert_eq!(tree.var(tree.root.vars[1]).size, 8);
        assert_eq!(tree.var(tree.root.vars[2]).name, "");
    }

    #[test]
    fn test_declaration_errors() {
        assert_eq!(
            parse("int").unwrap_err().message(),
            "expected identifier or '('"
        );
        assert_eq!(
            parse("int, int").unwrap_err().message(),
            "expected identifier or '('"
        );
        assert_eq!(parse("int y").unwrap_err().message(), "expected ';' or '('");
    }

    #[test]
    fn test_forward_prototype() {
        let tree = parse("int f(int a, void, int c);").unwrap();
        assert_eq!(tree.root.prototypes.len(), 1);
        let proto = &tree.root.prototypes[0];
        assert_eq!(proto.return_type.name, "f");
        assert_eq!(proto.params.len(), 3);
        assert_eq!(proto.params[0].name, "a");
        assert_eq!(proto.params[1].name, "");
        assert_eq!(proto.params[2].name, "c");
    }

    #[test]
    fn test_prototype_errors() {
        assert_eq!(
            parse("int f()").unwrap_err().message(),
            "expected ';' or '{'"
        );
        assert_eq!(parse("int()").unwrap_err().message(), "expected identifier or '('");
        assert_eq!(
            parse("int f(void int);").unwrap_err().message(),
            "expected identifier or ','"
        );
        assert_eq!(
            parse("int f(,);").unwrap_err().message(),
            "expected params or ')'"
        );
    }

    #[test]
    fn test_function_body_becomes_child_scope() {
        let tree = parse("int f(int i){int j;}").unwrap();
        assert_eq!(tree.root.children.len(), 1);
        let body = &tree.root.children[0];
        assert_eq!(body.proto.return_type.name, "f");
        assert_eq!(body.vars.len(), 1);
        assert_eq!(tree.var(body.vars[0]).name, "j");
    }

    #[test]
    fn test_nested_scopes() {
        let tree = parse("int f(){{}{{}}}").unwrap();
        let body = &tree.root.children[0];
        assert_eq!(body.children.len(), 2);
        assert_eq!(body.children[1].children.len(), 1);
    }

    #[test]
    fn test_scope_balance_errors() {
        assert_eq!(parse("{}").unwrap_err().message(), "expected identifier");
        assert_eq!(parse("int f(){").unwrap_err().message(), "missing '}'");
        assert_eq!(parse("int f(){}}").unwrap_err().message(), "too many '}'");
        assert_eq!(
            parse("int f(){{}{}{}{}{}{}{}").unwrap_err().message(),
            "missing '}'"
        );
    }

    #[test]
    fn test_lexer_error_propagates_once() {
        assert_eq!(parse("/*").unwrap_err().message(), "unfinished c comment");
    }

    #[test]
    fn test_expression_statement_is_recorded() {
        let tree = parse("int i; i;").unwrap();
        assert_eq!(tree.root.exprs.len(), 1);
        match tree.root.exprs[0] {
            Expression::Noop { operand } => assert_eq!(tree.var(operand).name, "i"),
            _ => panic!("expected a noop expression"),
        }
    }
}
