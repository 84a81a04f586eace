//! Lenient judging of the free-text replies a student gives for conditions.

use domain_parser::tokenizer::{tokenize_complete, TokenKind};
use domain_solve::{
    condition::{Condition, Relation},
    notation::parse_answer,
    set::SolutionSet,
};

/// Paraphrases of `> 0`. Checked first, since they usually contain a paraphrase of `≥ 0`.
const STRICTLY_POSITIVE: &[&str] = &[
    "strictement positif",
    "strictement positive",
    "strictement superieur",
    "superieur strictement",
    "strictly positive",
    "strictly greater",
];

/// Paraphrases of `≠ 0`.
const NON_ZERO: &[&str] = &[
    "non nul",
    "non-nul",
    "pas nul",
    "pas egal a 0",
    "pas egal a zero",
    "different de 0",
    "different de zero",
    "ne doit pas s'annuler",
    "ne s'annule pas",
    "non zero",
    "non-zero",
    "nonzero",
    "not zero",
    "different from zero",
];

/// Paraphrases of `≥ 0`. In French, `positif` includes zero.
const NON_NEGATIVE: &[&str] = &[
    "positif",
    "positive",
    "superieur ou egal",
    "non negatif",
    "non negative",
    "non-negatif",
    "non-negative",
    "nonnegative",
    "greater than or equal",
];

/// Replies meaning that the student does not know the answer.
const GIVING_UP: &[&str] = &[
    "je ne sais pas",
    "je sais pas",
    "sais pas",
    "aucune idee",
    "jsp",
    "i don't know",
    "i dont know",
    "no idea",
];

/// Lowercases the text and removes the accents of French letters.
fn fold(text: &str) -> String {
    text.to_lowercase()
        .chars()
        .map(|c| match c {
            'à' | 'â' | 'ä' => 'a',
            'é' | 'è' | 'ê' | 'ë' => 'e',
            'î' | 'ï' => 'i',
            'ô' | 'ö' => 'o',
            'ù' | 'û' | 'ü' => 'u',
            'ç' => 'c',
            '’' => '\'',
            c => c,
        })
        .collect()
}

/// The relation written with a symbol in the reply, such as `≥` or `>=`, if there is exactly one
/// kind of relation symbol in it.
fn written_relation(reply: &str) -> Option<Relation> {
    let mut found = None;
    for token in tokenize_complete(reply).iter() {
        let relation = match token.kind {
            TokenKind::GreaterEq => Relation::GreaterEq,
            TokenKind::Greater => Relation::Greater,
            TokenKind::NotEq => Relation::NotEq,
            TokenKind::Less | TokenKind::LessEq | TokenKind::Assign => return None,
            _ => continue,
        };
        match found {
            Some(previous) if previous != relation => return None,
            _ => found = Some(relation),
        }
    }
    found
}

/// The relation described in words in the reply, such as `strictement positif`.
fn paraphrased_relation(reply: &str) -> Option<Relation> {
    let reply = fold(reply);
    let mentions = |phrases: &[&str]| phrases.iter().any(|phrase| reply.contains(phrase));

    if mentions(STRICTLY_POSITIVE) {
        Some(Relation::Greater)
    } else if mentions(NON_ZERO) {
        Some(Relation::NotEq)
    } else if mentions(NON_NEGATIVE) {
        Some(Relation::GreaterEq)
    } else {
        None
    }
}

/// Returns true if the reply states the expected condition.
///
/// The reply may give the relation with its symbol (`≥ 0`, `>= 0`, `≠ 0`, `!= 0`), describe it in
/// words (`positif ou nul`, `strictement positif`, `non nul`), or solve it directly with an
/// inequality whose solutions are exactly the expected ones (`x ≥ 2` for `x - 2 ≥ 0`).
pub fn matches_condition(reply: &str, condition: &Condition, solution: Option<&SolutionSet>) -> bool {
    if written_relation(reply) == Some(condition.relation) {
        return true;
    }

    if let Some(expected) = solution {
        if parse_answer(reply).is_ok_and(|answer| answer == *expected) {
            return true;
        }
    }

    paraphrased_relation(reply) == Some(condition.relation)
}

/// Returns true if the reply says that the student does not know the answer.
pub fn is_giving_up(reply: &str) -> bool {
    let reply = fold(reply.trim());
    reply == "?" || GIVING_UP.iter().any(|phrase| reply.contains(phrase))
}
