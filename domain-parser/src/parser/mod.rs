pub mod binary;
pub mod call;
pub mod error;
pub mod expr;
pub mod fmt;
pub mod iter;
pub mod literal;
pub mod paren;
pub mod token;
pub mod unary;

use error::{kind::{self, ErrorKind}, Error};
use super::tokenizer::{tokenize_complete, Token, TokenKind};
use std::ops::Range;

/// Recursive-descent parser over the tokens of a normalized function expression.
///
/// Parsing is speculative: every `try_parse*` method rewinds the cursor when it fails, so callers
/// can try one alternative after another.
#[derive(Debug, Clone)]
pub struct Parser<'source> {
    tokens: Box<[Token<'source>]>,

    /// Index of the next token to read.
    cursor: usize,
}

impl<'source> Parser<'source> {
    pub fn new(source: &'source str) -> Self {
        Self {
            tokens: tokenize_complete(source),
            cursor: 0,
        }
    }

    /// An error located at the next token, or at the end of the input.
    pub fn error(&self, kind: impl ErrorKind + 'static) -> Error {
        Error::new(vec![self.span()], kind)
    }

    /// The span of the next token. Past the last token, an empty span at the end of the input.
    pub fn span(&self) -> Range<usize> {
        match self.tokens.get(self.cursor) {
            Some(token) => token.span.clone(),
            None => {
                let end = self.tokens.last().map_or(0, |token| token.span.end);
                end..end
            },
        }
    }

    /// Moves the cursor to where `other` is. Both parsers must read the same input.
    pub fn set_cursor(&mut self, other: &Self) {
        self.cursor = other.cursor;
    }

    /// The last token read, if any.
    pub fn prev_token(&self) -> Option<&Token<'source>> {
        self.tokens.get(self.cursor.checked_sub(1)?)
    }

    fn skip_whitespace(&mut self) {
        while self.tokens.get(self.cursor).is_some_and(Token::is_whitespace) {
            self.cursor += 1;
        }
    }

    /// Reads the next token that is not whitespace.
    pub fn next_token(&mut self) -> Result<Token<'source>, Error> {
        self.skip_whitespace();
        let token = self.tokens.get(self.cursor)
            .cloned()
            .ok_or_else(|| self.error(kind::UnexpectedEof))?;
        self.cursor += 1;
        Ok(token)
    }

    /// Parses a `T`, or leaves the cursor untouched and returns the error.
    pub fn try_parse<T: Parse>(&mut self) -> Result<T, Error> {
        self.try_parse_with_fn(T::parse)
    }

    /// Parses one or more `T`s separated by `delimiter`, such as the arguments of a call. Leaves
    /// the cursor untouched if any of them fails to parse.
    pub fn try_parse_delimited<T: Parse>(&mut self, delimiter: TokenKind) -> Result<Vec<T>, Error> {
        self.try_parse_with_fn(|input| {
            let mut values = vec![input.try_parse::<T>()?];
            loop {
                let mut ahead = input.clone();
                match ahead.next_token() {
                    Ok(token) if token.kind == delimiter => input.set_cursor(&ahead),
                    _ => return Ok(values),
                }
                values.push(input.try_parse::<T>()?);
            }
        })
    }

    /// Runs `f`, rewinding the cursor if it fails.
    pub fn try_parse_with_fn<T, F>(&mut self, f: F) -> Result<T, Error>
    where
        F: FnOnce(&mut Parser<'source>) -> Result<T, Error>,
    {
        let start = self.cursor;
        let result = f(self);
        if result.is_err() {
            self.cursor = start;
        }
        result
    }

    /// Parses a `T` that must span the whole input, trailing whitespace aside.
    pub fn try_parse_full<T: Parse>(&mut self) -> Result<T, Error> {
        let value = T::parse(self)?;
        self.skip_whitespace();
        if self.cursor < self.tokens.len() {
            return Err(self.error(kind::ExpectedEof));
        }
        Ok(value)
    }
}

/// A syntax node that can be read from a [`Parser`].
pub trait Parse: Sized {
    /// Reads a value, advancing past its tokens. On failure, the cursor position is unspecified;
    /// use [`Parser::try_parse`] to rewind it.
    fn parse(input: &mut Parser) -> Result<Self, Error>;
}

/// How a chain of the same operator groups.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Associativity {
    /// `x - 1 - 2` is `(x - 1) - 2`.
    Left,

    /// `x^2^3` is `x^(2^3)`.
    Right,
}

/// How tightly an operator binds, loosest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Precedence {
    /// Accepts any operator; where a full expression starts.
    Any,

    /// `+` and `-`.
    Term,

    /// `*` and `/`.
    Factor,

    /// Prefix `-`.
    Neg,

    /// `^`.
    Exp,
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    use binary::Binary;
    use call::Call;
    use expr::Expr;
    use literal::{LitInt, LitSym, Literal};
    use paren::Paren;
    use token::op::{BinOp, BinOpKind, UnaryOp, UnaryOpKind};
    use unary::Unary;

    fn sym(name: &str, span: Range<usize>) -> Expr {
        Expr::Literal(Literal::Symbol(LitSym { name: name.to_string(), span }))
    }

    fn int(value: &str, span: Range<usize>) -> Expr {
        Expr::Literal(Literal::Integer(LitInt { value: value.to_string(), span }))
    }

    fn bin(lhs: Expr, kind: BinOpKind, op_span: Range<usize>, rhs: Expr) -> Expr {
        let span = lhs.span().start..rhs.span().end;
        Expr::Binary(Binary {
            lhs: Box::new(lhs),
            op: BinOp { kind, span: op_span },
            rhs: Box::new(rhs),
            span,
        })
    }

    #[test]
    fn literal_int() {
        let mut parser = Parser::new("16");
        let expr = parser.try_parse_full::<Expr>().unwrap();
        assert_eq!(expr, int("16", 0..2));
    }

    #[test]
    fn precedence() {
        let mut parser = Parser::new("1 + 2*x");
        let expr = parser.try_parse_full::<Expr>().unwrap();
        assert_eq!(expr, bin(
            int("1", 0..1),
            BinOpKind::Add,
            2..3,
            bin(int("2", 4..5), BinOpKind::Mul, 5..6, sym("x", 6..7)),
        ));
    }

    #[test]
    fn left_associative_sub() {
        let mut parser = Parser::new("x-1-2");
        let expr = parser.try_parse_full::<Expr>().unwrap();
        assert_eq!(expr, bin(
            bin(sym("x", 0..1), BinOpKind::Sub, 1..2, int("1", 2..3)),
            BinOpKind::Sub,
            3..4,
            int("2", 4..5),
        ));
    }

    #[test]
    fn right_associative_exp() {
        let mut parser = Parser::new("x^2^3");
        let expr = parser.try_parse_full::<Expr>().unwrap();
        assert_eq!(expr, bin(
            sym("x", 0..1),
            BinOpKind::Exp,
            1..2,
            bin(int("2", 2..3), BinOpKind::Exp, 3..4, int("3", 4..5)),
        ));
    }

    #[test]
    fn negation_binds_looser_than_exp() {
        let mut parser = Parser::new("-x^2");
        let expr = parser.try_parse_full::<Expr>().unwrap();
        assert_eq!(expr, Expr::Unary(Unary {
            operand: Box::new(bin(sym("x", 1..2), BinOpKind::Exp, 2..3, int("2", 3..4))),
            op: UnaryOp { kind: UnaryOpKind::Neg, span: 0..1 },
            span: 0..4,
        }));
    }

    #[test]
    fn call_with_paren_divisor() {
        let mut parser = Parser::new("1/sqrt(x-2)");
        let expr = parser.try_parse_full::<Expr>().unwrap();
        assert_eq!(expr, bin(
            int("1", 0..1),
            BinOpKind::Div,
            1..2,
            Expr::Call(Call {
                name: LitSym { name: "sqrt".to_string(), span: 2..6 },
                args: vec![bin(sym("x", 7..8), BinOpKind::Sub, 8..9, int("2", 9..10))],
                span: 2..11,
                paren_span: 6..11,
            }),
        ));
    }

    #[test]
    fn paren() {
        let mut parser = Parser::new("(x + 1)");
        let expr = parser.try_parse_full::<Expr>().unwrap();
        assert_eq!(expr, Expr::Paren(Paren {
            expr: Box::new(bin(sym("x", 1..2), BinOpKind::Add, 3..4, int("1", 5..6))),
            span: 0..7,
        }));
    }

    #[test]
    fn unclosed_paren() {
        let mut parser = Parser::new("(x + 1");
        let err = parser.try_parse_full::<Expr>().unwrap_err();
        assert!(err.is::<kind::UnclosedParenthesis>());
        assert_eq!(err.spans, vec![0..1]);
    }

    #[test]
    fn stray_close_paren() {
        let mut parser = Parser::new("x + 1)");
        let err = parser.try_parse_full::<Expr>().unwrap_err();
        assert!(err.is::<kind::ExpectedEof>());
    }

    #[test]
    fn empty_paren() {
        let mut parser = Parser::new("sqrt()");
        let err = parser.try_parse_full::<Expr>().unwrap_err();
        assert!(err.is::<kind::EmptyParenthesis>());
    }

    #[test]
    fn dangling_operator() {
        let mut parser = Parser::new("x +");
        let err = parser.try_parse_full::<Expr>().unwrap_err();
        assert!(err.is::<kind::UnexpectedEof>());
    }
}
