//! Type definitions of a SQL AST representation.
//!
//! Only the clauses a listing appends to a caller's base statement are modelled:
//! WHERE, ORDER BY and paging.

use serde::{Deserialize, Serialize};

use super::string::Param;

/// The clauses appended after a base `SELECT ... FROM ...` statement.
#[derive(Debug, Clone, PartialEq)]
pub struct Fragment {
    pub where_: Where,
    pub order_by: OrderBy,
    pub limit: Option<Limit>,
}

/// A WHERE clause. Nothing is emitted for `Where(None)`.
#[derive(Debug, Clone, PartialEq)]
pub struct Where(pub Option<Expression>);

/// A boolean expression
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    /// Operands joined by AND, without surrounding parentheses
    And(Vec<Expression>),
    /// Operands joined by OR, without surrounding parentheses
    Or(Vec<Expression>),
    /// A parenthesized expression
    Nested(Box<Expression>),
    /// A comparison of a column against a bound parameter
    BinaryOperation {
        left: ColumnName,
        operator: BinaryOperator,
        right: Param,
    },
    /// A comparison that takes no parameter, such as `IS NULL`
    UnaryOperation {
        expression: ColumnName,
        operator: UnaryOperator,
    },
    /// A predicate written by the caller
    RawPredicate(RawPredicate),
}

/// Caller-written SQL with one `?` marker per parameter, in order.
///
/// The text is trusted: it is emitted as is, apart from renumbering its markers.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RawPredicate {
    pub sql: String,
    #[serde(default)]
    pub params: Vec<Param>,
}

impl RawPredicate {
    pub fn new(sql: impl Into<String>, params: Vec<Param>) -> Self {
        RawPredicate {
            sql: sql.into(),
            params,
        }
    }
}

/// A database column name. Emitted verbatim, never quoted.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ColumnName(pub String);

/// Represents the SQL text of a binary operator, such as `=` or `NOT LIKE`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinaryOperator(pub String);

/// Represents the SQL text of a unary operator, such as `IS NULL`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnaryOperator(pub String);

/// An ORDER BY clause
#[derive(Debug, Clone, PartialEq)]
pub struct OrderBy {
    pub elements: Vec<OrderByElement>,
}

/// A single element in an ORDER BY clause
#[derive(Debug, Clone, PartialEq)]
pub struct OrderByElement {
    pub target: ColumnName,
    pub direction: OrderByDirection,
}

/// A direction for a single ORDER BY element
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrderByDirection {
    Asc,
    Desc,
}

/// Paging. A `limit` of `None` means every remaining row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Limit {
    pub limit: Option<u32>,
    pub offset: u32,
}
