//! Tokenizer and parser for the small algebraic language used by the domain-of-definition tutor,
//! along with the normalizer that extracts a function declaration such as `f(x) = 1/√(x-2)` from
//! free text.

pub mod normalize;
pub mod parser;
pub mod tokenizer;
