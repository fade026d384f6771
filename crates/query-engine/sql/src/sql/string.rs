//! Type definitions of a low-level SQL string representation.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};

use super::ast::RawPredicate;
use super::dialect::{BindStyle, Dialect};
use super::rebind::{self, Segment};

/// A SQL fragment being built, with its parameters in placeholder order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SQL {
    pub sql: String,
    pub params: Vec<Param>,
    /// for internal use and tests only
    pub param_index: u64,
    dialect: Dialect,
}

impl Default for SQL {
    fn default() -> Self {
        Self::new(Dialect::default())
    }
}

/// A parameter for a parameterized query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Param {
    /// A literal string, such as a decorated filter value
    String(String),
    /// A JSON value supplied by the caller along with its predicate
    Value(serde_json::Value),
}

impl From<String> for Param {
    fn from(value: String) -> Self {
        Param::String(value)
    }
}

impl From<&str> for Param {
    fn from(value: &str) -> Self {
        Param::String(value.to_string())
    }
}

impl From<serde_json::Value> for Param {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::String(string) => Param::String(string),
            other => Param::Value(other),
        }
    }
}

impl Param {
    /// The text a database receives for this parameter. `None` stands for SQL NULL.
    pub fn as_text(&self) -> Option<Cow<'_, str>> {
        match self {
            Param::String(string) => Some(Cow::Borrowed(string)),
            Param::Value(serde_json::Value::Null) => None,
            Param::Value(serde_json::Value::String(string)) => Some(Cow::Borrowed(string)),
            Param::Value(value) => Some(Cow::Owned(value.to_string())),
        }
    }
}

impl SQL {
    pub fn new(dialect: Dialect) -> SQL {
        SQL {
            sql: String::new(),
            params: vec![],
            param_index: 0,
            dialect,
        }
    }

    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    /// Append a piece of SQL syntax. Leading spaces are dropped when the text
    /// built so far already ends with one.
    pub fn append_syntax(&mut self, sql: &str) {
        if self.sql.ends_with(' ') {
            self.sql.push_str(sql.trim_start_matches(' '));
        } else {
            self.sql.push_str(sql);
        }
    }

    pub fn append_param(&mut self, param: Param) {
        self.param_index += 1;
        let placeholder = self.dialect.bind_style().placeholder(self.param_index);
        self.sql.push_str(&placeholder);
        self.params.push(param);
    }

    /// Append caller-written SQL, replacing each of its `?` markers with a
    /// placeholder for the next parameter of the predicate.
    ///
    /// The number of markers must already have been checked against the number of
    /// parameters (see [`rebind::placeholder_count`]): surplus markers are kept as a
    /// literal `?` and surplus parameters are not bound. A `??` is written as `?`,
    /// except for dialects binding with `?`, where it is kept as `??`.
    pub fn append_raw(&mut self, predicate: &RawPredicate) {
        let mut params = predicate.params.iter();
        for segment in rebind::segments(predicate.sql.trim(), self.dialect) {
            match segment {
                Segment::Code(text) | Segment::Verbatim(text) => self.sql.push_str(text),
                Segment::Marker => match params.next() {
                    Some(param) => self.append_param(param.clone()),
                    None => self.sql.push('?'),
                },
                Segment::Question => {
                    if self.dialect.bind_style() == BindStyle::Question {
                        self.sql.push_str("??");
                    } else {
                        self.sql.push('?');
                    }
                }
            }
        }
    }
}
