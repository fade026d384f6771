//! Helpers for processing a query description and building SQL.

use query_engine_sql::sql::dialect::Dialect;

use super::operators::Operators;

/// Static information shared by every translation.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Env {
    pub dialect: Dialect,
    pub operators: Operators,
    /// Upper bound for the page size, also applied when every row is requested.
    pub max_page_size: Option<u32>,
}

impl Env {
    pub fn new(dialect: Dialect) -> Env {
        Env {
            dialect,
            operators: Operators::standard(),
            max_page_size: None,
        }
    }

    #[must_use]
    pub fn with_max_page_size(mut self, max_page_size: Option<u32>) -> Env {
        self.max_page_size = max_page_size;
        self
    }

    #[must_use]
    pub fn with_operators(mut self, operators: Operators) -> Env {
        self.operators = operators;
        self
    }
}
