//! Extraction of a function declaration from free text, and rewriting of its expression into the
//! canonical spelling understood by the [parser](crate::parser).
//!
//! The normalizer works on the token stream, so it never has to care about how many spaces the
//! student typed or which of the many spellings of an operator they used.

use crate::{
    parser::error::{kind, Error},
    tokenizer::{tokenize_complete, Token, TokenKind},
};
use std::ops::Range;
use tracing::debug;

/// A function declaration found in the input text, such as `f(x) = 1/sqrt(x-2)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Normalized {
    /// The canonical spelling of the function expression, such as `1/sqrt(x-2)`.
    pub expr: String,

    /// The region of the input text that the expression was taken from.
    pub span: Range<usize>,
}

impl Normalized {
    /// Returns the full declaration, such as `f(x) = 1/sqrt(x-2)`.
    pub fn declaration(&self) -> String {
        format!("f(x) = {}", self.expr)
    }
}

/// Returns true if the text contains a function declaration of the form `f(x) =`.
pub fn is_declaration(raw: &str) -> bool {
    let tokens = tokenize_complete(raw);
    let significant = tokens.iter().filter(|token| !token.is_whitespace()).collect::<Vec<_>>();
    find_declaration(&significant).is_some()
}

/// Locates `f(x) = <expr>` in the raw text and rewrites the expression into its canonical form.
///
/// The declaration may appear anywhere in the text (`Soit f(x) = ...`), with any capitalization
/// and spacing. The expression stops at the end of the text or at the first `,` or `;` outside
/// parentheses; trailing sentence punctuation is dropped.
pub fn normalize(raw: &str) -> Result<Normalized, Error> {
    let tokens = tokenize_complete(raw);
    let significant = tokens.iter().filter(|token| !token.is_whitespace()).collect::<Vec<_>>();

    let Some(body_start) = find_declaration(&significant) else {
        return Err(Error::new(vec![0..raw.len()], kind::NoFunctionFound));
    };

    let body = take_body(&significant[body_start..]);
    if body.is_empty() {
        let assign = significant[body_start - 1].span.clone();
        return Err(Error::new(vec![assign], kind::MissingFunctionBody));
    }

    let span = body[0].span.start..body[body.len() - 1].span.end;
    let expr = rewrite(body);
    debug!(raw, %expr, "normalized function declaration");
    Ok(Normalized { expr, span })
}

/// Applies the canonical rewrites to a bare expression, with no declaration around it. Used for
/// numbers written by students, such as `2√3` or `(1−√5)/2`.
pub fn normalize_expr(raw: &str) -> String {
    let tokens = tokenize_complete(raw);
    let significant = tokens.iter().filter(|token| !token.is_whitespace()).collect::<Vec<_>>();
    rewrite(trim_punctuation(&significant))
}

/// Returns the index of the first token after `f(x) =`, if the declaration is present.
fn find_declaration(tokens: &[&Token]) -> Option<usize> {
    tokens.windows(5).position(|window| {
        matches!(window, [name, open, var, close, assign]
            if name.kind == TokenKind::Name && name.lexeme.eq_ignore_ascii_case("f")
                && open.kind == TokenKind::OpenParen
                && var.kind == TokenKind::Name && var.lexeme.eq_ignore_ascii_case("x")
                && close.kind == TokenKind::CloseParen
                && assign.kind == TokenKind::Assign)
    }).map(|position| position + 5)
}

/// Cuts the expression at the first separator outside parentheses, then drops trailing
/// punctuation.
fn take_body<'a, 'source>(tokens: &'a [&'a Token<'source>]) -> &'a [&'a Token<'source>] {
    let mut depth = 0usize;
    let end = tokens.iter().position(|token| match token.kind {
        TokenKind::OpenParen => {
            depth += 1;
            false
        },
        TokenKind::CloseParen => {
            depth = depth.saturating_sub(1);
            false
        },
        TokenKind::Comma | TokenKind::Semicolon => depth == 0,
        _ => false,
    }).unwrap_or(tokens.len());

    trim_punctuation(&tokens[..end])
}

fn trim_punctuation<'a, 'source>(mut tokens: &'a [&'a Token<'source>]) -> &'a [&'a Token<'source>] {
    while let [rest @ .., last] = tokens {
        if last.kind == TokenKind::Symbol && matches!(last.lexeme, "." | "?" | "!") {
            tokens = rest;
        } else {
            break;
        }
    }
    tokens
}

/// A token of the canonical output.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Piece<'a> {
    /// Something that ends an operand: a number, a name, or `)`.
    Number(&'a str),
    Name(&'a str),
    Close,

    /// Anything else, written as-is.
    Other(&'a str),
}

impl Piece<'_> {
    fn text(&self) -> &str {
        match self {
            Piece::Number(text) | Piece::Name(text) | Piece::Other(text) => text,
            Piece::Close => ")",
        }
    }
}

/// Canonical spelling of a name: function names and the variable are case-insensitive, and `ln`
/// is the same function as `log`.
fn canonical_name(name: &str) -> &str {
    match name.to_ascii_lowercase().as_str() {
        "x" => "x",
        "sqrt" | "racine" => "sqrt",
        "log" | "ln" => "log",
        _ => name,
    }
}

/// Rewrites the tokens of an expression into its canonical spelling.
fn rewrite(tokens: &[&Token]) -> String {
    let mut pieces = Vec::with_capacity(tokens.len());
    let mut iter = tokens.iter().peekable();

    while let Some(token) = iter.next() {
        match token.kind {
            TokenKind::Sub => pieces.push(Piece::Other("-")),
            TokenKind::Mul => pieces.push(Piece::Other("*")),
            TokenKind::Div => pieces.push(Piece::Other("/")),
            TokenKind::Exp => pieces.push(Piece::Other("^")),
            TokenKind::Squared => pieces.extend([Piece::Other("^"), Piece::Number("2")]),
            TokenKind::Cubed => pieces.extend([Piece::Other("^"), Piece::Number("3")]),
            TokenKind::Radical => {
                push_operand(&mut pieces, Piece::Name("sqrt"));
                match iter.peek().map(|next| next.kind) {
                    // `√(...)`: the parenthesis that follows becomes the call's
                    Some(TokenKind::OpenParen) => {
                        iter.next();
                        pieces.push(Piece::Other("("));
                    },
                    // `√x`, `√2`: the radical covers a single atom
                    Some(TokenKind::Int | TokenKind::Float | TokenKind::Name) => {
                        pieces.push(Piece::Other("("));
                        if let Some(atom) = iter.next() {
                            pieces.push(if atom.kind == TokenKind::Name {
                                Piece::Name(canonical_name(atom.lexeme))
                            } else {
                                Piece::Number(atom.lexeme)
                            });
                        }
                        pieces.push(Piece::Close);
                    },
                    _ => (),
                }
            },
            TokenKind::Name => push_operand(&mut pieces, Piece::Name(canonical_name(token.lexeme))),
            TokenKind::Int | TokenKind::Float => push_operand(&mut pieces, Piece::Number(token.lexeme)),
            TokenKind::OpenParen => push_operand(&mut pieces, Piece::Other("(")),
            TokenKind::CloseParen => pieces.push(Piece::Close),
            _ => pieces.push(Piece::Other(token.lexeme)),
        }
    }

    let mut out = String::new();
    let mut prev: Option<Piece> = None;
    for piece in pieces {
        // keep two adjacent words or numbers apart so they are not glued into one
        if matches!(
            (prev, piece),
            (Some(Piece::Number(_) | Piece::Name(_)), Piece::Number(_) | Piece::Name(_))
        ) {
            out.push(' ');
        }
        out.push_str(piece.text());
        prev = Some(piece);
    }
    out
}

/// Pushes the start of an operand, inserting the multiplication that the student left implicit:
/// `2x`, `2(x+1)`, `(x+1)(x-1)`, `2√x`, `x(x+1)`.
fn push_operand<'a>(pieces: &mut Vec<Piece<'a>>, piece: Piece<'a>) {
    let implicit = match (pieces.last(), piece) {
        (Some(Piece::Number(_) | Piece::Close), Piece::Name(_) | Piece::Other("(")) => true,
        (Some(Piece::Name("x")), Piece::Other("(")) => true,
        _ => false,
    };

    if implicit {
        pieces.push(Piece::Other("*"));
    }
    pieces.push(piece);
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    fn expr(raw: &str) -> String {
        normalize(raw).unwrap().expr
    }

    #[test]
    fn plain_declaration() {
        assert_eq!(expr("f(x) = 1/sqrt(x-2)"), "1/sqrt(x-2)");
    }

    #[test]
    fn declaration_inside_sentence() {
        assert_eq!(expr("Soit F(X)=ln(x+1) . "), "log(x+1)");
        assert_eq!(expr("quel est le domaine de f (x) = 1/x ?"), "1/x");
    }

    #[test]
    fn radical_glyph() {
        assert_eq!(expr("f(x) = 1/√(x−2)"), "1/sqrt(x-2)");
        assert_eq!(expr("f(x) = √x + 1"), "sqrt(x)+1");
        assert_eq!(expr("f(x) = 2√x"), "2*sqrt(x)");
    }

    #[test]
    fn powers_and_operators() {
        assert_eq!(expr("f(x) = x² − 4"), "x^2-4");
        assert_eq!(expr("f(x) = x**3 ÷ 2"), "x^3/2");
        assert_eq!(expr("f(x) = 3×x·x"), "3*x*x");
    }

    #[test]
    fn implicit_multiplication() {
        assert_eq!(expr("f(x) = 2x(x+1)"), "2*x*(x+1)");
        assert_eq!(expr("f(x) = (x+1)(x-1)"), "(x+1)*(x-1)");
        assert_eq!(expr("f(x) = 3log(x)"), "3*log(x)");
    }

    #[test]
    fn stops_at_separator() {
        assert_eq!(expr("f(x) = sqrt(x), trouve le domaine"), "sqrt(x)");
    }

    #[test]
    fn missing_declaration() {
        let err = normalize("bonjour").unwrap_err();
        assert!(err.is::<kind::NoFunctionFound>());
        assert_eq!(err.spans, vec![0..7]);
    }

    #[test]
    fn missing_body() {
        let err = normalize("f(x) = ").unwrap_err();
        assert!(err.is::<kind::MissingFunctionBody>());
    }

    #[test]
    fn bare_expressions() {
        assert_eq!(normalize_expr("2√3"), "2*sqrt(3)");
        assert_eq!(normalize_expr("(1−√5)/2"), "(1-sqrt(5))/2");
        assert_eq!(normalize_expr("1 2"), "1 2");
    }

    #[test]
    fn detects_declaration() {
        assert!(is_declaration("f(x)=x"));
        assert!(!is_declaration("x >= 2"));
    }
}
