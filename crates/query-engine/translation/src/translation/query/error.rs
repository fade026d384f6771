//! Errors for query translation.

use query_engine_sql::sql::dialect::Dialect;

/// A type for translation errors.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    UnsupportedOperator(String),
    MalformedFilterNode(String),
    MissingFilterValue {
        field: String,
        operator: String,
    },
    UnsupportedFilterValue {
        field: String,
        value: serde_json::Value,
    },
    PlaceholderMismatch {
        placeholders: usize,
        parameters: usize,
    },
    AmbiguousQuestionMark(Dialect),
    ColumnNotFoundInTable {
        field: String,
        table: String,
    },
    TableNotFound(String),
}

/// Display errors.
impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Error::UnsupportedOperator(operator) => {
                write!(f, "Filter operator '{operator}' is not supported.")
            }
            Error::MalformedFilterNode(reason) => {
                write!(f, "Malformed filter node: {reason}.")
            }
            Error::MissingFilterValue { field, operator } => write!(
                f,
                "Filter on '{field}' with operator '{operator}' requires a value."
            ),
            Error::UnsupportedFilterValue { field, value } => write!(
                f,
                "Filter on '{field}' has a value that is not a scalar: {value}."
            ),
            Error::PlaceholderMismatch {
                placeholders,
                parameters,
            } => write!(
                f,
                "Predicate has {placeholders} placeholders but {parameters} parameters."
            ),
            Error::AmbiguousQuestionMark(dialect) => write!(
                f,
                "Predicate contains '??', which {dialect} cannot tell apart from a parameter marker."
            ),
            Error::ColumnNotFoundInTable { field, table } => {
                write!(f, "Column '{field}' not found in table '{table}'.")
            }
            Error::TableNotFound(table) => write!(f, "Table '{table}' not found."),
        }
    }
}

impl std::error::Error for Error {}
