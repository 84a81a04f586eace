use ariadne::Fmt;
use domain_attrs::ErrorKind;
pub use domain_error::ErrorKind;
use domain_error::EXPR;
use crate::tokenizer::TokenKind;

/// The end of the source code was reached unexpectedly.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "unexpected end of expression",
    labels = [format!("you might need to add another {} here", "expression".fg(EXPR))],
)]
pub struct UnexpectedEof;

/// The end of the source code was expected, but something else was found.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "expected end of expression",
    labels = [format!("I could not understand the remaining {} here", "expression".fg(EXPR))],
)]
pub struct ExpectedEof;

/// An unexpected token was encountered.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "unexpected token",
    labels = [format!("expected one of: {}", expected.iter().map(|t| format!("{:?}", t)).collect::<Vec<_>>().join(", "))],
    help = format!("found {:?}", found),
)]
pub struct UnexpectedToken {
    /// The token(s) that were expected.
    pub expected: &'static [TokenKind],

    /// The token that was found.
    pub found: TokenKind,
}

/// A parenthesis was not closed.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "unclosed parenthesis",
    labels = ["this parenthesis is not closed"],
    help = if *opening {
        "add a closing parenthesis `)` somewhere after this"
    } else {
        "add an opening parenthesis `(` somewhere before this"
    },
)]
pub struct UnclosedParenthesis {
    /// Whether the parenthesis was an opening parenthesis `(`. Otherwise, the parenthesis was a
    /// closing parenthesis `)`.
    pub opening: bool,
}

/// There was no expression inside a pair of parentheses.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "missing expression inside parenthesis",
    labels = ["add an expression here"],
)]
pub struct EmptyParenthesis;

/// No function declaration of the form `f(x) = ...` could be found in the text.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "no function declaration found",
    labels = [format!("I expected a declaration such as {} in here", "f(x) = 1/(x-2)".fg(EXPR))],
    help = "declare the function with `f(x) = ` followed by its expression",
)]
pub struct NoFunctionFound;

/// The function declaration has nothing after the `=` sign.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "missing function expression",
    labels = [format!("add the {} of the function after this", "expression".fg(EXPR))],
)]
pub struct MissingFunctionBody;
