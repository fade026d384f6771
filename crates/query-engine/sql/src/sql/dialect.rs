//! The SQL dialects a fragment can be rendered for.
//!
//! Dialects differ in how parameters are referenced from the SQL text and in the
//! syntax of the paging clause. Everything else the translator emits is shared.

use std::fmt;
use std::str::FromStr;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    JsonSchema,
    enum_iterator::Sequence,
)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    #[default]
    Postgres,
    Mysql,
    Sqlite,
    Oracle,
    Sqlserver,
}

/// How a parameter is referenced from SQL text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindStyle {
    /// `$1`, `$2`, ...
    Dollar,
    /// `?` for every parameter
    Question,
    /// `:arg1`, `:arg2`, ...
    Named,
    /// `@p1`, `@p2`, ...
    At,
}

/// The syntax of the paging clause.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PagingStyle {
    /// `OFFSET s LIMIT n`
    OffsetLimit,
    /// `LIMIT n OFFSET s`
    LimitOffset,
    /// `OFFSET s ROWS FETCH NEXT n ROWS ONLY`
    OffsetFetch,
}

impl BindStyle {
    /// The placeholder for the parameter at a 1-based position.
    pub fn placeholder(self, index: u64) -> String {
        match self {
            BindStyle::Dollar => format!("${index}"),
            BindStyle::Question => "?".to_string(),
            BindStyle::Named => format!(":arg{index}"),
            BindStyle::At => format!("@p{index}"),
        }
    }
}

impl Dialect {
    pub fn name(self) -> &'static str {
        match self {
            Dialect::Postgres => "postgres",
            Dialect::Mysql => "mysql",
            Dialect::Sqlite => "sqlite",
            Dialect::Oracle => "oracle",
            Dialect::Sqlserver => "sqlserver",
        }
    }

    pub fn bind_style(self) -> BindStyle {
        match self {
            Dialect::Postgres => BindStyle::Dollar,
            Dialect::Mysql | Dialect::Sqlite => BindStyle::Question,
            Dialect::Oracle => BindStyle::Named,
            Dialect::Sqlserver => BindStyle::At,
        }
    }

    pub fn paging_style(self) -> PagingStyle {
        match self {
            Dialect::Postgres => PagingStyle::OffsetLimit,
            Dialect::Mysql | Dialect::Sqlite => PagingStyle::LimitOffset,
            Dialect::Oracle | Dialect::Sqlserver => PagingStyle::OffsetFetch,
        }
    }

    /// Whether `$tag$ ... $tag$` quotes a string.
    pub fn has_dollar_quotes(self) -> bool {
        self == Dialect::Postgres
    }

    /// Whether a paging clause is only valid after an ORDER BY.
    pub fn requires_order_by_for_paging(self) -> bool {
        self == Dialect::Sqlserver
    }

    /// The dialect spoken by a database driver, by the driver's registered name.
    pub fn from_driver_name(driver: &str) -> Option<Dialect> {
        match driver {
            "postgres" | "pgx" | "pq-timeouts" | "cloudsqlpostgres" | "ql" | "nrpostgres"
            | "cockroach" => Some(Dialect::Postgres),
            "mysql" | "nrmysql" => Some(Dialect::Mysql),
            "sqlite3" | "nrsqlite3" => Some(Dialect::Sqlite),
            "oci8" | "ora" | "goracle" | "godror" => Some(Dialect::Oracle),
            "sqlserver" | "azuresql" => Some(Dialect::Sqlserver),
            _ => None,
        }
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A dialect name that is not known.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownDialect(pub String);

impl fmt::Display for UnknownDialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown SQL dialect '{}'", self.0)
    }
}

impl std::error::Error for UnknownDialect {}

impl FromStr for Dialect {
    type Err = UnknownDialect;

    /// Accepts a dialect name, or the name of a driver for it.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_ascii_lowercase();
        enum_iterator::all::<Dialect>()
            .find(|dialect| dialect.name() == name)
            .or_else(|| Dialect::from_driver_name(&name))
            .ok_or_else(|| UnknownDialect(s.to_string()))
    }
}
