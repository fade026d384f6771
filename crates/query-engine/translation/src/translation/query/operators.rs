//! The filter operators a grid client may use, and how each one is written in SQL.

use std::collections::BTreeMap;

use enum_iterator::Sequence;

use super::error::Error;

/// The operator vocabulary of grid components.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Sequence)]
pub enum GridOperator {
    Eq,
    Neq,
    Contains,
    DoesNotContain,
    StartsWith,
    EndsWith,
    IsNull,
    IsNotNull,
    IsEmpty,
    IsNotEmpty,
}

impl GridOperator {
    /// The name used on the wire.
    pub fn name(self) -> &'static str {
        match self {
            GridOperator::Eq => "eq",
            GridOperator::Neq => "neq",
            GridOperator::Contains => "contains",
            GridOperator::DoesNotContain => "doesnotcontain",
            GridOperator::StartsWith => "startswith",
            GridOperator::EndsWith => "endswith",
            GridOperator::IsNull => "isnull",
            GridOperator::IsNotNull => "isnotnull",
            GridOperator::IsEmpty => "isempty",
            GridOperator::IsNotEmpty => "isnotempty",
        }
    }

    pub fn descriptor(self) -> OperatorDescriptor {
        match self {
            GridOperator::Eq => OperatorDescriptor::binary("="),
            GridOperator::Neq => OperatorDescriptor::binary("<>"),
            GridOperator::Contains => OperatorDescriptor::pattern("LIKE", true, true),
            GridOperator::DoesNotContain => OperatorDescriptor::pattern("NOT LIKE", true, true),
            GridOperator::StartsWith => OperatorDescriptor::pattern("LIKE", false, true),
            GridOperator::EndsWith => OperatorDescriptor::pattern("LIKE", true, false),
            GridOperator::IsNull => OperatorDescriptor::unary("IS NULL"),
            GridOperator::IsNotNull => OperatorDescriptor::unary("IS NOT NULL"),
            GridOperator::IsEmpty => OperatorDescriptor::unary("= ''"),
            GridOperator::IsNotEmpty => OperatorDescriptor::unary("<> ''"),
        }
    }
}

/// How an operator is emitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperatorDescriptor {
    pub sql_operator: String,
    /// No value is bound for a unary operator.
    pub is_unary: bool,
    pub wildcard_before: bool,
    pub wildcard_after: bool,
}

impl OperatorDescriptor {
    pub fn binary(sql_operator: &str) -> Self {
        Self::pattern(sql_operator, false, false)
    }

    pub fn unary(sql_operator: &str) -> Self {
        OperatorDescriptor {
            sql_operator: sql_operator.to_string(),
            is_unary: true,
            wildcard_before: false,
            wildcard_after: false,
        }
    }

    pub fn pattern(sql_operator: &str, wildcard_before: bool, wildcard_after: bool) -> Self {
        OperatorDescriptor {
            sql_operator: sql_operator.to_string(),
            is_unary: false,
            wildcard_before,
            wildcard_after,
        }
    }

    /// Surround a value with the `LIKE` wildcards this operator calls for.
    pub fn decorate(&self, value: &str) -> String {
        let before = if self.wildcard_before { "%" } else { "" };
        let after = if self.wildcard_after { "%" } else { "" };
        format!("{before}{value}{after}")
    }
}

/// The operator table: operator name to its descriptor.
///
/// Built once and only read afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Operators(BTreeMap<String, OperatorDescriptor>);

impl Default for Operators {
    fn default() -> Self {
        Self::standard()
    }
}

impl Operators {
    /// The operators of [`GridOperator`].
    pub fn standard() -> Self {
        Operators(
            enum_iterator::all::<GridOperator>()
                .map(|operator| (operator.name().to_string(), operator.descriptor()))
                .collect(),
        )
    }

    /// Add an operator, or replace the descriptor of an existing one.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, descriptor: OperatorDescriptor) -> Self {
        self.0.insert(name.into(), descriptor);
        self
    }

    pub fn lookup(&self, name: &str) -> Result<&OperatorDescriptor, Error> {
        self.0
            .get(name)
            .ok_or_else(|| Error::UnsupportedOperator(name.to_string()))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }
}
