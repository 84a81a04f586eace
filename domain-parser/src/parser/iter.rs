use super::expr::Expr;

/// An iterator that iteratively traverses the tree of expressions in left-to-right post-order
/// (i.e. depth-first).
///
/// This iterator is created by [`Expr::post_order_iter`].
pub struct ExprIter<'a> {
    /// Expressions waiting to be visited, paired with whether their children were already pushed.
    stack: Vec<(&'a Expr, bool)>,
}

impl<'a> ExprIter<'a> {
    /// Creates a new iterator that traverses the tree of expressions in left-to-right post-order
    /// (i.e. depth-first).
    pub fn new(expr: &'a Expr) -> Self {
        Self {
            stack: vec![(expr, false)],
        }
    }
}

impl<'a> Iterator for ExprIter<'a> {
    type Item = &'a Expr;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let (expr, expanded) = self.stack.pop()?;
            if expanded {
                return Some(expr);
            }

            self.stack.push((expr, true));
            match expr {
                Expr::Literal(_) => (),
                Expr::Paren(paren) => self.stack.push((&paren.expr, false)),
                Expr::Call(call) => {
                    // pushed in reverse so the first argument is visited first
                    self.stack.extend(call.args.iter().rev().map(|arg| (arg, false)));
                },
                Expr::Unary(unary) => self.stack.push((&unary.operand, false)),
                Expr::Binary(binary) => {
                    self.stack.push((&binary.rhs, false));
                    self.stack.push((&binary.lhs, false));
                },
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use crate::parser::{expr::Expr, literal::Literal, Parser};

    #[test]
    fn visits_children_first() {
        let mut parser = Parser::new("1/sqrt(x-2)");
        let expr = parser.try_parse_full::<Expr>().unwrap();
        let leaves = expr.post_order_iter()
            .filter_map(|expr| match expr {
                Expr::Literal(Literal::Integer(int)) => Some(int.value.clone()),
                Expr::Literal(Literal::Symbol(sym)) => Some(sym.name.clone()),
                _ => None,
            })
            .collect::<Vec<_>>();
        assert_eq!(leaves, vec!["1", "x", "2"]);

        let last = expr.post_order_iter().last().unwrap();
        assert_eq!(last, &expr);
    }

    #[test]
    fn counts_every_node() {
        let mut parser = Parser::new("log(x) + (x^2)");
        let expr = parser.try_parse_full::<Expr>().unwrap();
        // x, log(x), x, 2, x^2, (x^2), sum
        assert_eq!(expr.post_order_iter().count(), 7);
    }
}
