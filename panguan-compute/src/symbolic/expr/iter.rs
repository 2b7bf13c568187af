use super::{Primary, SymExpr};

/// An iterator that iteratively traverses the tree of expressions in left-to-right post-order
/// (i.e. depth-first). The arguments of function calls are visited before the call itself.
///
/// This iterator is created by [`SymExpr::post_order_iter`].
pub struct ExprIter<'a> {
    stack: Vec<&'a SymExpr>,
    last_visited: Option<&'a SymExpr>,
}

impl<'a> ExprIter<'a> {
    /// Creates a new iterator that traverses the tree of expressions in left-to-right post-order
    /// (i.e. depth-first).
    pub fn new(expr: &'a SymExpr) -> Self {
        Self {
            stack: vec![expr],
            last_visited: None,
        }
    }

    /// Pops the current expression in the stack and marks it as the last visited expression.
    fn visit(&mut self) -> Option<&'a SymExpr> {
        self.last_visited = Some(self.stack.pop()?);
        self.last_visited
    }

    /// Returns true if the children have already been visited, which is the case when there are
    /// none, or the last child was the last expression visited.
    fn children_done(&self, children: &'a [SymExpr]) -> bool {
        match (children.last(), self.last_visited) {
            (None, _) => true,
            (Some(last), Some(last_visited)) => std::ptr::eq(last, last_visited),
            (Some(_), None) => false,
        }
    }

    /// Pushes the children onto the stack so that the leftmost child is visited first.
    fn descend(&mut self, children: &'a [SymExpr]) {
        for child in children.iter().rev() {
            self.stack.push(child);
        }
    }
}

impl<'a> Iterator for ExprIter<'a> {
    type Item = &'a SymExpr;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let expr = *self.stack.last()?;
            match expr {
                SymExpr::Primary(Primary::Call(_, args)) => {
                    if self.children_done(args) {
                        return self.visit();
                    }
                    self.descend(args);
                },
                SymExpr::Primary(_) => return self.visit(),
                SymExpr::Add(children) | SymExpr::Mul(children) => {
                    if self.children_done(children) {
                        return self.visit();
                    }
                    self.descend(children);
                },
                SymExpr::Exp(lhs, rhs) => {
                    if self.last_visited.map_or(false, |last| std::ptr::eq(last, &**rhs)) {
                        return self.visit();
                    }
                    self.stack.push(rhs);
                    self.stack.push(lhs);
                },
            }
        }
    }
}
