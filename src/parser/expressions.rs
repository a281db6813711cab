//! Expression lowering.
//!
//! The grammar recognised here is a flat chain `ident (op ident)* ;` with
//! `op ∈ {+, -, *, /}`: no parentheses, no literals, no unary forms. Rather
//! than building an expression tree, the parser folds the chain as tokens
//! stream in, emitting one temporary assignment per operator.
//!
//! # The window
//!
//! Lowering maintains a window of three operand names and two pending
//! operators, filled left to right. The window is reduced, folding one
//! operand pair into a fresh temporary, whenever a third operator arrives or
//! the terminating `;` is reached:
//!
//! - if `op[0]` is multiplicative, fold `name[0] op[0] name[1]`;
//! - else if `op[1]` is multiplicative, fold `name[1] op[1] name[2]`;
//! - else fold the leftmost pair.
//!
//! A left-pair fold shifts the window (`name[0]` becomes the temporary,
//! `name[1]` takes `name[2]`, `op[0]` takes `op[1]`); a right-pair fold only
//! replaces `name[1]` with the temporary. This folds a chain of any length
//! left to right while still letting a single trailing multiplicative pair
//! bind tighter than a preceding additive one.
//!
//! A bare identifier with no operator lowers to a [`Expression::Noop`]
//! placeholder instead.
//!
//! All methods are implemented as `pub(crate)` methods on [`Parser`].

use crate::parser::ast::{BinaryKind, Expression};
use crate::parser::lexer::Token;
use crate::parser::parser::{ParseError, Parser};

/// Operators that bind tighter in the tie-break.
fn multiplicative(op: Option<Token>) -> bool {
    matches!(op, Some(Token::Star) | Some(Token::Division))
}

impl Parser<'_> {
    /// Lower one expression statement into the current scope.
    ///
    /// On entry the current token is the leading identifier ([`Token::Word`])
    /// and the lexer still holds its text.
    pub(crate) fn parse_expression(&mut self) -> Result<(), ParseError> {
        let mut names: [String; 3] = Default::default();
        let mut ops: [Option<Token>; 2] = [None, None];

        loop {
            if names[0].is_empty() {
                names[0] = self.lexer.identifier().to_string();
            } else if names[1].is_empty() {
                names[1] = self.lexer.identifier().to_string();
            } else if names[2].is_empty() {
                names[2] = self.lexer.identifier().to_string();
            } else {
                unreachable!("the name window never holds more than three operands");
            }

            match self.advance_token()? {
                op @ (Token::Plus | Token::Minus | Token::Star | Token::Division) => {
                    if ops[0].is_none() {
                        ops[0] = Some(op);
                    } else if ops[1].is_none() {
                        ops[1] = Some(op);
                    } else {
                        // Window full: fold one pair before recording the
                        // incoming operator.
                        self.reduce(&mut names, &mut ops)?;
                        ops[1] = Some(op);
                    }
                }
                Token::Semicolon => {
                    self.reduce(&mut names, &mut ops)?;
                    if names[1].is_empty() {
                        return Ok(());
                    }
                    // Two operands were still pending: fold the remainder.
                    return self.reduce(&mut names, &mut ops);
                }
                _ => return Err(ParseError::new("expected operator or ';'")),
            }

            if self.advance_token()? != Token::Word {
                return Err(ParseError::new("expected identifier or constant"));
            }
        }
    }

    /// Fold one pair out of the window into a temporary assignment, or emit
    /// a noop for a lone operand.
    fn reduce(
        &mut self,
        names: &mut [String; 3],
        ops: &mut [Option<Token>; 2],
    ) -> Result<(), ParseError> {
        if names[0].is_empty() {
            unreachable!("reduction with an empty window");
        }

        if names[1].is_empty() {
            // A bare identifier used as a statement.
            let operand = self.lookup_or_missing(&names[0])?;
            self.current_scope_mut()
                .exprs
                .push(Expression::Noop { operand });
            names[0].clear();
            return Ok(());
        }

        let idx = if multiplicative(ops[0]) {
            0
        } else if multiplicative(ops[1]) {
            1
        } else {
            0
        };
        let kind = match ops[idx] {
            Some(Token::Plus) => BinaryKind::Addition,
            Some(Token::Minus) => BinaryKind::Subtraction,
            Some(Token::Star) => BinaryKind::Multiplication,
            Some(Token::Division) => BinaryKind::Division,
            _ => unreachable!("a filled operand pair always has a pending operator"),
        };

        let left = self.lookup_or_missing(&names[idx])?;
        let right = self.lookup_or_missing(&names[idx + 1])?;
        let result = self.create_temp(left);
        self.current_scope_mut().exprs.push(Expression::Binary {
            kind,
            left,
            right,
            result,
        });

        if idx == 0 {
            names[0] = self.arena[result].name.clone();
            names[1] = names[2].clone();
            ops[0] = ops[1];
        } else {
            names[1] = self.arena[result].name.clone();
        }
        names[2].clear();
        ops[1] = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::options::Options;
    use crate::parser::ast::{BinaryKind, Expression, SyntaxTree};
    use crate::parser::parser::{ParseError, Parser};
    use crate::parser::symbols::TempFactory;
    use crate::source::SourceFile;

    fn parse(source: &str) -> Result<SyntaxTree, ParseError> {
        let file = SourceFile::new("<test>", source);
        let options = Options::default();
        let mut temps = TempFactory::new();
        Parser::new(&file, &options, &mut temps).parse()
    }

    /// Renders the lowered expressions of the root scope as
    /// `result = left op right` / `name` lines for compact assertions.
    fn lowered(tree: &SyntaxTree) -> Vec<String> {
        tree.root
            .exprs
            .iter()
            .map(|expr| match *expr {
                Expression::Noop { operand } => tree.var(operand).name.clone(),
                Expression::Binary {
                    kind,
                    left,
                    right,
                    result,
                } => format!(
                    "{} = {}{}{}",
                    tree.var(result).name,
                    tree.var(left).name,
                    kind.symbol(),
                    tree.var(right).name
                ),
            })
            .collect()
    }

    #[test]
    fn test_left_to_right_chain() {
        let tree = parse("int i; int j; int k; int l; i + j + k + l;").unwrap();
        assert_eq!(
            lowered(&tree),
            vec![".0 = i + j", ".1 = .0 + k", ".2 = .1 + l"]
        );
    }

    #[test]
    fn test_trailing_multiplicative_pair_binds_first() {
        let tree = parse("int i; int j; int k; i + j * k;").unwrap();
        assert_eq!(lowered(&tree), vec![".0 = j * k", ".1 = i + .0"]);
    }

    #[test]
    fn test_leading_multiplicative_pair_binds_first() {
        let tree = parse("int i; int j; int k; i * j + k;").unwrap();
        assert_eq!(lowered(&tree), vec![".0 = i * j", ".1 = .0 + k"]);
    }

    #[test]
    fn test_mixed_four_operand_chain() {
        let tree = parse("int i; int j; int k; int l; i * j + k / l;").unwrap();
        assert_eq!(
            lowered(&tree),
            vec![".0 = i * j", ".1 = k / l", ".2 = .0 + .1"]
        );
    }

    #[test]
    fn test_temporaries_are_declared_in_scope() {
        let tree = parse("int i; int j; i - j;").unwrap();
        let names: Vec<&str> = tree
            .root
            .vars
            .iter()
            .map(|&id| tree.var(id).name.as_str())
            .collect();
        assert_eq!(names, vec!["i", "j", ".0"]);
        // The temporary copies the left operand's width.
        assert_eq!(tree.var(tree.root.vars[2]).size, 32);
    }

    #[test]
    fn test_bare_identifier_is_noop() {
        let tree = parse("int i; i;").unwrap();
        assert!(matches!(tree.root.exprs[0], Expression::Noop { .. }));
    }

    #[test]
    fn test_unresolved_name_reports_it() {
        assert_eq!(
            parse("i;").unwrap_err().message(),
            "could not find the var i"
        );
        assert_eq!(
            parse("int i; i + j;").unwrap_err().message(),
            "could not find the var j"
        );
    }

    #[test]
    fn test_dangling_operator() {
        assert_eq!(
            parse("int i; i +").unwrap_err().message(),
            "expected identifier or constant"
        );
    }

    #[test]
    fn test_missing_operator() {
        assert_eq!(
            parse("int i; i").unwrap_err().message(),
            "expected operator or ';'"
        );
    }

    #[test]
    fn test_binary_kinds() {
        let tree = parse("int i; int j; i / j; i * j; i - j; i + j;").unwrap();
        let kinds: Vec<BinaryKind> = tree
            .root
            .exprs
            .iter()
            .map(|expr| match *expr {
                Expression::Binary { kind, .. } => kind,
                _ => panic!("expected binary expressions"),
            })
            .collect();
        assert_eq!(
            kinds,
            vec![
                BinaryKind::Division,
                BinaryKind::Multiplication,
                BinaryKind::Subtraction,
                BinaryKind::Addition,
            ]
        );
    }
}
