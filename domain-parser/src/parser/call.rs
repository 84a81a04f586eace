use std::ops::Range;
use super::{
    error::Error,
    expr::Expr,
    literal::LitSym,
    paren::parse_closing,
    token::OpenParen,
    Parse,
    Parser,
};
use crate::tokenizer::TokenKind;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A function call, such as `sqrt(x - 2)` or `log(x)`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Call {
    /// The name of the function to call.
    pub name: LitSym,

    /// The arguments to the function.
    pub args: Vec<Expr>,

    /// The region of the source code that this function call was parsed from.
    pub span: Range<usize>,

    /// The span of the parentheses that surround the arguments.
    pub paren_span: Range<usize>,
}

impl Call {
    /// Returns the span of the function call.
    pub fn span(&self) -> Range<usize> {
        self.span.clone()
    }

    /// Returns the single argument of the call, if it was called with exactly one argument.
    pub fn single_arg(&self) -> Option<&Expr> {
        match self.args.as_slice() {
            [arg] => Some(arg),
            _ => None,
        }
    }
}

impl Parse for Call {
    fn parse(input: &mut Parser) -> Result<Self, Error> {
        let name = input.try_parse::<LitSym>()?;
        let open_paren = input.try_parse::<OpenParen>()?;
        let (args, paren_span) = parse_closing(input, &open_paren, |input| {
            input.try_parse_delimited::<Expr>(TokenKind::Comma)
        })?;

        // use `name` here before it is moved into the struct
        let span = name.span.start..paren_span.end;
        Ok(Self {
            name,
            args,
            span,
            paren_span,
        })
    }
}
