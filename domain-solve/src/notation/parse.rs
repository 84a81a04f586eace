use crate::{
    error::{Error, UnparseableStudentAnswer},
    expr::Expr,
    real::ExactReal,
    set::{Bound, BoundType, Endpoint, Interval, SolutionSet},
};
use domain_parser::{
    normalize::normalize_expr,
    parser::{expr::Expr as AstExpr, Parser},
    tokenizer::{tokenize_complete, Token, TokenKind},
};
use std::ops::Range;
use tracing::{debug, warn};

/// Names that introduce the answer, as in `Df = ]2,+∞[`.
const DOMAIN_NAMES: &[&str] = &["d", "df", "d_f", "dom"];

/// Names of the real line.
const REALS_NAMES: &[&str] = &["r", "ir", "reel", "reels", "réel", "réels"];

/// Names of infinity.
const INFINITY_NAMES: &[&str] = &["oo", "inf", "infini", "infinity"];

/// Words joining two sets into their union.
const UNION_WORDS: &[&str] = &["u", "ou", "or"];

/// Words joining two sets into their intersection.
const INTERSECTION_WORDS: &[&str] = &["et", "and"];

/// Reads a student's answer as a set of real numbers.
///
/// The answer can be written in interval notation (`]-∞,2[ ∪ ]2,+∞[`, `(2, +inf)`,
/// `ℝ \ {2}`, `∅`), or as inequalities on `x` joined with `et` and `ou` (`x < 2 ou x > 2`,
/// `x ≠ 2`, `-1 < x ≤ 3`), where `et` binds tighter than `ou`. Prefixes such as `Df =` or `x ∈`
/// are ignored. Endpoints are exact numbers, such as `1/2`, `√2`, `2√3` or `(1-√5)/2`.
///
/// Anything that cannot be read completely is rejected with [`UnparseableStudentAnswer`], rather
/// than guessed at.
pub fn parse_answer(text: &str) -> Result<SolutionSet, Error> {
    let tokens = tokenize_complete(text);
    let mut significant = tokens.iter()
        .filter(|token| !token.is_whitespace())
        .cloned()
        .collect::<Vec<_>>();
    while significant.last().is_some_and(|token| matches!(token.lexeme, "." | "!")) {
        significant.pop();
    }

    let mut reader = Reader { source: text, tokens: &significant, cursor: 0 };
    let result = reader.answer();
    match &result {
        Ok(set) => debug!(text, ?set, "parsed answer"),
        Err(_) => warn!(text, "answer could not be read as a set"),
    }
    result
}

/// Returns true if the token is one of the given names, ignoring case.
fn is_name(token: &Token, names: &[&str]) -> bool {
    token.kind == TokenKind::Name && names.contains(&token.lexeme.to_lowercase().as_str())
}

/// Returns true if the token ends one side of an inequality.
fn ends_inequality_side(token: &Token) -> bool {
    Comparison::from_token(token.kind).is_some()
        || token.kind == TokenKind::Union
        || is_name(token, UNION_WORDS)
        || is_name(token, INTERSECTION_WORDS)
}

/// A comparison between two sides of an inequality.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Comparison {
    Less,
    LessEq,
    Greater,
    GreaterEq,
    Eq,
    NotEq,
}

impl Comparison {
    fn from_token(kind: TokenKind) -> Option<Self> {
        match kind {
            TokenKind::Less => Some(Self::Less),
            TokenKind::LessEq => Some(Self::LessEq),
            TokenKind::Greater => Some(Self::Greater),
            TokenKind::GreaterEq => Some(Self::GreaterEq),
            TokenKind::Assign => Some(Self::Eq),
            TokenKind::NotEq => Some(Self::NotEq),
            _ => None,
        }
    }

    /// The comparison with its sides swapped: `a < x` is `x > a`.
    fn flip(self) -> Self {
        match self {
            Self::Less => Self::Greater,
            Self::LessEq => Self::GreaterEq,
            Self::Greater => Self::Less,
            Self::GreaterEq => Self::LessEq,
            other => other,
        }
    }

    /// The set of `x` such that `x <comparison> value`. Returns [`None`] for equality with an
    /// infinity, which is not a number.
    fn solutions(self, value: Endpoint) -> Option<SolutionSet> {
        let ray = |lower: Bound, upper: Bound| {
            Interval::new(lower, upper).map_or_else(SolutionSet::empty, SolutionSet::interval)
        };

        match self {
            Self::Less => Some(ray(Bound::open(Endpoint::NegInfinity), Bound::open(value))),
            Self::LessEq => Some(ray(Bound::open(Endpoint::NegInfinity), Bound::closed(value))),
            Self::Greater => Some(ray(Bound::open(value), Bound::open(Endpoint::PosInfinity))),
            Self::GreaterEq => Some(ray(Bound::closed(value), Bound::open(Endpoint::PosInfinity))),
            Self::Eq => Some(SolutionSet::points([value.as_finite()?.clone()])),
            Self::NotEq => Some(SolutionSet::all_reals_except([value.as_finite()?.clone()])),
        }
    }
}

/// A cursor over the significant tokens of an answer.
struct Reader<'a, 'source> {
    source: &'source str,
    tokens: &'a [Token<'source>],
    cursor: usize,
}

impl<'a, 'source> Reader<'a, 'source> {
    fn peek(&self) -> Option<&'a Token<'source>> {
        self.tokens.get(self.cursor)
    }

    fn peek_kind(&self, offset: usize) -> Option<TokenKind> {
        self.tokens.get(self.cursor + offset).map(|token| token.kind)
    }

    fn eat_kind(&mut self, kind: TokenKind) -> bool {
        let found = self.peek_kind(0) == Some(kind);
        if found {
            self.cursor += 1;
        }
        found
    }

    fn eat_name(&mut self, names: &[&str]) -> bool {
        let found = self.peek().is_some_and(|token| is_name(token, names));
        if found {
            self.cursor += 1;
        }
        found
    }

    /// An error pointing at the current token, or at the end of the answer.
    fn error_here(&self) -> Error {
        let span = match self.peek() {
            Some(token) => token.span.clone(),
            None => self.source.len()..self.source.len(),
        };
        Error::new(vec![span], UnparseableStudentAnswer)
    }

    /// An error pointing at the given tokens.
    fn error_at(&self, tokens: Range<usize>) -> Error {
        let span = match (self.tokens.get(tokens.start), tokens.end.checked_sub(1).and_then(|i| self.tokens.get(i))) {
            (Some(first), Some(last)) => first.span.start..last.span.end,
            _ => 0..self.source.len(),
        };
        Error::new(vec![span], UnparseableStudentAnswer)
    }

    fn answer(&mut self) -> Result<SolutionSet, Error> {
        if self.peek().is_some_and(|token| is_name(token, DOMAIN_NAMES))
            && self.peek_kind(1) == Some(TokenKind::Assign)
        {
            self.cursor += 2;
        }
        if self.peek().is_some_and(|token| is_name(token, &["x"]))
            && self.peek_kind(1) == Some(TokenKind::In)
        {
            self.cursor += 2;
        }

        let set = self.disjunction()?;
        match self.peek() {
            Some(_) => Err(self.error_here()),
            None => Ok(set),
        }
    }

    fn disjunction(&mut self) -> Result<SolutionSet, Error> {
        let mut set = self.conjunction()?;
        while self.eat_kind(TokenKind::Union) || self.eat_name(UNION_WORDS) {
            set = set.union(&self.conjunction()?);
        }
        Ok(set)
    }

    fn conjunction(&mut self) -> Result<SolutionSet, Error> {
        let mut set = self.atom()?;
        while self.eat_name(INTERSECTION_WORDS) {
            set = set.intersect(&self.atom()?);
        }
        Ok(set)
    }

    fn atom(&mut self) -> Result<SolutionSet, Error> {
        let Some(token) = self.peek() else {
            return Err(self.error_here());
        };

        match token.kind {
            TokenKind::EmptySet => {
                self.cursor += 1;
                Ok(SolutionSet::empty())
            },
            TokenKind::Reals => {
                self.cursor += 1;
                self.reals()
            },
            TokenKind::OpenCurly => Ok(SolutionSet::points(self.points()?)),
            TokenKind::OpenSquare | TokenKind::CloseSquare => self.interval(),
            TokenKind::OpenParen => {
                // `(2, 3)` is an interval, but `(1-√5)/2 < x` is an inequality
                let start = self.cursor;
                self.interval().or_else(|_| {
                    self.cursor = start;
                    self.chain()
                })
            },
            TokenKind::Name if is_name(token, REALS_NAMES) => {
                self.cursor += 1;
                self.reals()
            },
            TokenKind::Name if is_name(token, &["vide"]) => {
                self.cursor += 1;
                Ok(SolutionSet::empty())
            },
            TokenKind::Name if is_name(token, &["ensemble"]) => {
                self.cursor += 1;
                if !self.eat_name(&["vide"]) {
                    return Err(self.error_here());
                }
                Ok(SolutionSet::empty())
            },
            TokenKind::Name if is_name(token, &["aucune", "aucun"]) => {
                self.cursor += 1;
                if !self.eat_name(&["valeur", "valeurs", "solution", "solutions", "réel", "reel"]) {
                    return Err(self.error_here());
                }
                if self.eat_name(&["de", "pour"]) && !self.eat_name(&["x"]) {
                    return Err(self.error_here());
                }
                Ok(SolutionSet::empty())
            },
            _ => self.chain(),
        }
    }

    /// The rest of a set that starts with `ℝ`: `ℝ \ {a, b}`, `ℝ - {a}`, or the usual subsets
    /// `ℝ*`, `ℝ+`, `ℝ-`, `ℝ+*` and `ℝ-*`.
    fn reals(&mut self) -> Result<SolutionSet, Error> {
        if matches!(self.peek_kind(0), Some(TokenKind::Minus | TokenKind::Sub))
            && self.peek_kind(1) == Some(TokenKind::OpenCurly)
        {
            self.cursor += 1;
            return Ok(SolutionSet::all_reals_except(self.points()?));
        }

        let positive = if self.eat_kind(TokenKind::Add) {
            Some(true)
        } else if self.eat_kind(TokenKind::Sub) {
            Some(false)
        } else {
            None
        };
        let nonzero = self.eat_kind(TokenKind::Mul);

        let zero = Endpoint::Finite(ExactReal::zero());
        let comparison = match (positive, nonzero) {
            (None, false) => return Ok(SolutionSet::all_reals()),
            (None, true) => Comparison::NotEq,
            (Some(true), false) => Comparison::GreaterEq,
            (Some(true), true) => Comparison::Greater,
            (Some(false), false) => Comparison::LessEq,
            (Some(false), true) => Comparison::Less,
        };
        comparison.solutions(zero).ok_or_else(|| self.error_here())
    }

    /// A list of numbers between braces, such as `{1; 2}`.
    fn points(&mut self) -> Result<Vec<ExactReal>, Error> {
        if !self.eat_kind(TokenKind::OpenCurly) {
            return Err(self.error_here());
        }

        let mut points = Vec::new();
        if self.eat_kind(TokenKind::CloseCurly) {
            return Ok(points);
        }

        loop {
            let tokens = self.operand(|token| {
                matches!(token.kind, TokenKind::Comma | TokenKind::Semicolon | TokenKind::CloseCurly)
            })?;
            match self.endpoint(tokens.clone())? {
                Endpoint::Finite(value) => points.push(value),
                _ => return Err(self.error_at(tokens)),
            }

            if self.eat_kind(TokenKind::CloseCurly) {
                return Ok(points);
            }
            if !self.eat_kind(TokenKind::Comma) && !self.eat_kind(TokenKind::Semicolon) {
                return Err(self.error_here());
            }
        }
    }

    /// An interval such as `]2,+∞[`, `[0; 1]` or `(2, 3]`.
    fn interval(&mut self) -> Result<SolutionSet, Error> {
        let start = self.cursor;
        let lower_kind = match self.peek_kind(0) {
            Some(TokenKind::OpenSquare) => BoundType::Closed,
            Some(TokenKind::CloseSquare | TokenKind::OpenParen) => BoundType::Open,
            _ => return Err(self.error_here()),
        };
        self.cursor += 1;

        let lower = self.operand(|token| matches!(token.kind, TokenKind::Comma | TokenKind::Semicolon))?;
        if !self.eat_kind(TokenKind::Comma) && !self.eat_kind(TokenKind::Semicolon) {
            return Err(self.error_here());
        }
        let upper = self.operand(|token| {
            matches!(token.kind, TokenKind::CloseSquare | TokenKind::OpenSquare | TokenKind::CloseParen)
        })?;

        let upper_kind = match self.peek_kind(0) {
            Some(TokenKind::CloseSquare) => BoundType::Closed,
            Some(TokenKind::OpenSquare | TokenKind::CloseParen) => BoundType::Open,
            _ => return Err(self.error_here()),
        };
        self.cursor += 1;

        let lower = Bound { value: self.endpoint(lower)?, kind: lower_kind };
        let upper = Bound { value: self.endpoint(upper)?, kind: upper_kind };
        Interval::new(lower, upper)
            .map(SolutionSet::interval)
            .ok_or_else(|| self.error_at(start..self.cursor))
    }

    /// Inequalities on `x`, such as `x ≥ 2`, `2 < x` or `-1 < x ≤ 3`.
    fn chain(&mut self) -> Result<SolutionSet, Error> {
        let start = self.cursor;
        let mut operands = vec![self.operand(ends_inequality_side)?];
        let mut comparisons = Vec::new();
        while let Some(comparison) = self.peek_kind(0).and_then(Comparison::from_token) {
            self.cursor += 1;
            comparisons.push(comparison);
            operands.push(self.operand(ends_inequality_side)?);
        }
        if comparisons.is_empty() {
            return Err(self.error_at(start..self.cursor));
        }

        let mut set = SolutionSet::all_reals();
        for (comparison, sides) in comparisons.into_iter().zip(operands.windows(2)) {
            let (lhs, rhs) = (sides[0].clone(), sides[1].clone());
            let solutions = match (self.is_variable(&lhs), self.is_variable(&rhs)) {
                (true, false) => comparison.solutions(self.endpoint(rhs.clone())?),
                (false, true) => comparison.flip().solutions(self.endpoint(lhs.clone())?),
                _ => None,
            };
            let solutions = solutions.ok_or_else(|| self.error_at(lhs.start..rhs.end))?;
            set = set.intersect(&solutions);
        }
        Ok(set)
    }

    /// Advances over the tokens of one operand, stopping before the first token outside
    /// parentheses that matches `stop`, or before a closing parenthesis that was never opened.
    fn operand(&mut self, stop: impl Fn(&Token) -> bool) -> Result<Range<usize>, Error> {
        let start = self.cursor;
        let mut depth = 0usize;
        while let Some(token) = self.peek() {
            if depth == 0 && stop(token) {
                break;
            }
            match token.kind {
                TokenKind::OpenParen => depth += 1,
                TokenKind::CloseParen if depth == 0 => break,
                TokenKind::CloseParen => depth -= 1,
                _ => (),
            }
            self.cursor += 1;
        }

        if self.cursor == start || depth != 0 {
            return Err(self.error_here());
        }
        Ok(start..self.cursor)
    }

    fn is_variable(&self, tokens: &Range<usize>) -> bool {
        matches!(&self.tokens[tokens.clone()], [token] if is_name(token, &["x"]))
    }

    /// Reads the given tokens as an infinity or an exact number.
    fn endpoint(&self, tokens: Range<usize>) -> Result<Endpoint, Error> {
        let is_infinity = |token: &Token| {
            token.kind == TokenKind::Infinity || is_name(token, INFINITY_NAMES)
        };

        match &self.tokens[tokens.clone()] {
            [token] if is_infinity(token) => return Ok(Endpoint::PosInfinity),
            [sign, token] if is_infinity(token) => match sign.kind {
                TokenKind::Add => return Ok(Endpoint::PosInfinity),
                TokenKind::Sub => return Ok(Endpoint::NegInfinity),
                _ => (),
            },
            _ => (),
        }

        let (first, last) = (&self.tokens[tokens.start], &self.tokens[tokens.end - 1]);
        let text = &self.source[first.span.start..last.span.end];
        exact_number(text)
            .map(Endpoint::Finite)
            .ok_or_else(|| self.error_at(tokens))
    }
}

/// Evaluates a number written by a student, such as `2√3` or `(1-√5)/2`.
fn exact_number(text: &str) -> Option<ExactReal> {
    let normalized = normalize_expr(text);
    let ast = Parser::new(&normalized).try_parse_full::<AstExpr>().ok()?;
    Expr::from(&ast).eval_constant()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use crate::primitive::{int, rat};
    use super::*;

    fn real(n: i32) -> ExactReal {
        ExactReal::rational(n)
    }

    fn ray_from(n: i32, kind: BoundType) -> SolutionSet {
        let lower = Bound { value: Endpoint::Finite(real(n)), kind };
        SolutionSet::interval(Interval::new(lower, Bound::open(Endpoint::PosInfinity)).unwrap())
    }

    fn between(a: i32, lower: BoundType, b: i32, upper: BoundType) -> SolutionSet {
        let lower = Bound { value: Endpoint::Finite(real(a)), kind: lower };
        let upper = Bound { value: Endpoint::Finite(real(b)), kind: upper };
        SolutionSet::interval(Interval::new(lower, upper).unwrap())
    }

    fn parse(text: &str) -> SolutionSet {
        parse_answer(text).unwrap()
    }

    #[test]
    fn french_intervals() {
        assert_eq!(parse("]2,+∞["), ray_from(2, BoundType::Open));
        assert_eq!(parse("[ 2 ; +oo ["), ray_from(2, BoundType::Closed));
        assert_eq!(parse("]-1;3]"), between(-1, BoundType::Open, 3, BoundType::Closed));
    }

    #[test]
    fn international_intervals() {
        assert_eq!(parse("(2, +inf)"), ray_from(2, BoundType::Open));
        assert_eq!(parse("(-1, 3]"), between(-1, BoundType::Open, 3, BoundType::Closed));
    }

    #[test]
    fn prefixes() {
        assert_eq!(parse("Df = ]2,+∞["), ray_from(2, BoundType::Open));
        assert_eq!(parse("D=]2,+∞["), ray_from(2, BoundType::Open));
        assert_eq!(parse("x ∈ ]2,+∞[."), ray_from(2, BoundType::Open));
    }

    #[test]
    fn unions() {
        let expected = SolutionSet::all_reals_except([real(2)]);
        assert_eq!(parse("]-∞,2[ ∪ ]2,+∞["), expected);
        assert_eq!(parse("]-infini,2[ U ]2,+infini["), expected);
        assert_eq!(parse("]-∞,2[u]2,+∞["), expected);
    }

    #[test]
    fn reals_minus_points() {
        assert_eq!(parse("ℝ \\ {1}"), SolutionSet::all_reals_except([real(1)]));
        assert_eq!(parse("R - {-2; 2}"), SolutionSet::all_reals_except([real(-2), real(2)]));
        assert_eq!(parse("ℝ*"), SolutionSet::all_reals_except([real(0)]));
        assert_eq!(parse("ℝ+*"), ray_from(0, BoundType::Open));
    }

    #[test]
    fn special_sets() {
        for text in ["ℝ", "R", "IR", "réels", "x ∈ ℝ", "]-∞,+∞["] {
            assert_eq!(parse(text), SolutionSet::all_reals(), "{}", text);
        }
        for text in ["∅", "vide", "{}", "aucune valeur de x", "ensemble vide"] {
            assert_eq!(parse(text), SolutionSet::empty(), "{}", text);
        }
    }

    #[test]
    fn inequalities() {
        assert_eq!(parse("x ≥ 2"), ray_from(2, BoundType::Closed));
        assert_eq!(parse("x>=2"), ray_from(2, BoundType::Closed));
        assert_eq!(parse("2 < x"), ray_from(2, BoundType::Open));
        assert_eq!(parse("-1 < x <= 3"), between(-1, BoundType::Open, 3, BoundType::Closed));
        assert_eq!(parse("x = 0"), SolutionSet::points([real(0)]));
    }

    #[test]
    fn connectives() {
        assert_eq!(parse("x ≠ 2 et x ≠ -2"), SolutionSet::all_reals_except([real(-2), real(2)]));
        assert_eq!(
            parse("x < -2 ou x > 2"),
            between(-2, BoundType::Closed, 2, BoundType::Closed).complement(),
        );
        // `et` binds tighter than `ou`
        assert_eq!(
            parse("x > 5 ou x > 0 et x < 1"),
            between(0, BoundType::Open, 1, BoundType::Open).union(&ray_from(5, BoundType::Open)),
        );
    }

    #[test]
    fn exact_endpoints() {
        let golden = ExactReal::with_surd(rat((1, 2)), rat((1, 2)), &int(5)).unwrap();
        let expected = SolutionSet::interval(
            Interval::new(Bound::closed(golden), Bound::open(Endpoint::PosInfinity)).unwrap(),
        );
        assert_eq!(parse("[(1+√5)/2,+∞["), expected);
        assert_eq!(parse("x ≥ (1 + sqrt(5))/2"), expected);

        let half = SolutionSet::points([ExactReal::rational(rat((1, 2)))]);
        assert_eq!(parse("{1/2}"), half);
        assert_eq!(parse("{0.5}"), half);

        let root = ExactReal::with_surd(rat(0), rat(2), &int(3)).unwrap();
        assert_eq!(parse("{2√3}"), SolutionSet::points([root]));
    }

    #[test]
    fn parenthesized_endpoint_in_inequality() {
        let expected = SolutionSet::interval(Interval::new(
            Bound::open(ExactReal::with_surd(rat((1, 2)), rat((-1, 2)), &int(5)).unwrap()),
            Bound::open(Endpoint::PosInfinity),
        ).unwrap());
        assert_eq!(parse("(1-√5)/2 < x"), expected);
    }

    #[test]
    fn rejected_answers() {
        for text in ["", "bonjour", "[3,1]", "]2,+∞", "x ≥", "1 < 2", "x ≥ y", "]2,+∞[ ∪", "{+∞}", "x = +∞"] {
            let err = parse_answer(text).unwrap_err();
            assert!(err.is::<UnparseableStudentAnswer>(), "{}", text);
        }
    }
}
