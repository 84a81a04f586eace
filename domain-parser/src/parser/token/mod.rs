pub mod op;

use crate::{
    parser::{error::{kind, Error}, Parser, Parse},
    tokenizer::TokenKind,
};
use std::ops::Range;

/// Declares a struct per listed [`TokenKind`], parsed by consuming exactly one token of that kind.
///
/// `input.try_parse::<OpenParen>()` reads better than matching on the kind of the next token, and
/// keeps the span of the consumed token around.
macro_rules! single_tokens {
    ($($(#[$doc:meta])* $kind:ident,)*) => {
        $(
            $(#[$doc])*
            #[derive(Clone, Debug, PartialEq)]
            pub struct $kind {
                pub lexeme: String,
                pub span: Range<usize>,
            }

            impl Parse for $kind {
                fn parse(input: &mut Parser) -> Result<Self, Error> {
                    let token = input.next_token()?;
                    if token.kind != TokenKind::$kind {
                        return Err(Error::new(vec![token.span], kind::UnexpectedToken {
                            expected: &[TokenKind::$kind],
                            found: token.kind,
                        }));
                    }

                    Ok(Self { lexeme: token.lexeme.to_owned(), span: token.span })
                }
            }
        )*
    };
}

single_tokens! {
    /// A variable or function name.
    Name,
    OpenParen,
    CloseParen,
    /// An integer literal.
    Int,
    /// A decimal literal, such as `0.5`.
    Float,
}
