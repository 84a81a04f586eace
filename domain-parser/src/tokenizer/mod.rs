pub mod token;

use logos::{Lexer, Logos};
pub use token::{Token, TokenKind};

/// Returns an iterator over the token kinds produced by the tokenizer.
pub fn tokenize(input: &str) -> Lexer<TokenKind> {
    TokenKind::lexer(input)
}

/// Returns an owned array containing all of the tokens produced by the tokenizer. This allows us
/// to backtrack in case of an error.
pub fn tokenize_complete(input: &str) -> Box<[Token]> {
    let mut lexer = tokenize(input);
    let mut tokens = Vec::new();

    while let Some(Ok(kind)) = lexer.next() {
        tokens.push(Token {
            span: lexer.span(),
            kind,
            lexeme: lexer.slice(),
        });
    }

    tokens.into_boxed_slice()
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Compares the tokens produced by the tokenizer to the raw expected tokens.
    fn compare_tokens<'source, const N: usize>(input: &'source str, expected: [(TokenKind, &'source str); N]) {
        let mut lexer = tokenize(input);

        for (expected_kind, expected_lexeme) in expected.into_iter() {
            assert_eq!(lexer.next(), Some(Ok(expected_kind)));
            assert_eq!(lexer.slice(), expected_lexeme);
        }

        assert_eq!(lexer.next(), None);
    }

    #[test]
    fn declaration() {
        compare_tokens(
            "f(x) = 1/√(x-2)",
            [
                (TokenKind::Name, "f"),
                (TokenKind::OpenParen, "("),
                (TokenKind::Name, "x"),
                (TokenKind::CloseParen, ")"),
                (TokenKind::Whitespace, " "),
                (TokenKind::Assign, "="),
                (TokenKind::Whitespace, " "),
                (TokenKind::Int, "1"),
                (TokenKind::Div, "/"),
                (TokenKind::Radical, "√"),
                (TokenKind::OpenParen, "("),
                (TokenKind::Name, "x"),
                (TokenKind::Sub, "-"),
                (TokenKind::Int, "2"),
                (TokenKind::CloseParen, ")"),
            ],
        );
    }

    #[test]
    fn operator_spellings() {
        compare_tokens(
            "3×x**2 − x² ÷ 4.5",
            [
                (TokenKind::Int, "3"),
                (TokenKind::Mul, "×"),
                (TokenKind::Name, "x"),
                (TokenKind::Exp, "**"),
                (TokenKind::Int, "2"),
                (TokenKind::Whitespace, " "),
                (TokenKind::Sub, "−"),
                (TokenKind::Whitespace, " "),
                (TokenKind::Name, "x"),
                (TokenKind::Squared, "²"),
                (TokenKind::Whitespace, " "),
                (TokenKind::Div, "÷"),
                (TokenKind::Whitespace, " "),
                (TokenKind::Float, "4.5"),
            ],
        );
    }

    #[test]
    fn interval_answer() {
        compare_tokens(
            "]2,+∞[ ∪ ℝ",
            [
                (TokenKind::CloseSquare, "]"),
                (TokenKind::Int, "2"),
                (TokenKind::Comma, ","),
                (TokenKind::Add, "+"),
                (TokenKind::Infinity, "∞"),
                (TokenKind::OpenSquare, "["),
                (TokenKind::Whitespace, " "),
                (TokenKind::Union, "∪"),
                (TokenKind::Whitespace, " "),
                (TokenKind::Reals, "ℝ"),
            ],
        );
    }

    #[test]
    fn comparisons() {
        compare_tokens(
            "x>=2 ≠ =/= réel",
            [
                (TokenKind::Name, "x"),
                (TokenKind::GreaterEq, ">="),
                (TokenKind::Int, "2"),
                (TokenKind::Whitespace, " "),
                (TokenKind::NotEq, "≠"),
                (TokenKind::Whitespace, " "),
                (TokenKind::NotEq, "=/="),
                (TokenKind::Whitespace, " "),
                (TokenKind::Name, "réel"),
            ],
        );
    }
}
