//! Helpers for building sql::ast types in certain shapes and patterns.

use super::ast::*;

// Empty clauses //

/// An empty `WHERE` clause.
pub fn empty_where() -> Where {
    Where(None)
}

/// An empty `ORDER BY` clause.
pub fn empty_order_by() -> OrderBy {
    OrderBy { elements: vec![] }
}

// Expressions //

/// Conditions joined by AND. A single condition is returned as is.
pub fn conjunction(expressions: Vec<Expression>) -> Expression {
    unwrap_single(expressions, Expression::And)
}

/// Conditions joined by OR. A single condition is returned as is.
pub fn disjunction(expressions: Vec<Expression>) -> Expression {
    unwrap_single(expressions, Expression::Or)
}

fn unwrap_single(
    mut expressions: Vec<Expression>,
    join: fn(Vec<Expression>) -> Expression,
) -> Expression {
    if expressions.len() == 1 {
        if let Some(expression) = expressions.pop() {
            return expression;
        }
    }
    join(expressions)
}

/// Wrap an expression in parentheses.
pub fn nested(expression: Expression) -> Expression {
    Expression::Nested(Box::new(expression))
}

/// Whether ANDing another condition onto this expression requires parentheses.
pub fn needs_parentheses_for_and(expression: &Expression) -> bool {
    matches!(expression, Expression::Or(expressions) if expressions.len() > 1)
}
