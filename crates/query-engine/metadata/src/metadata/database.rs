//! Metadata information regarding the database and tracked information.

use std::collections::BTreeMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Mapping from a collection name, as requested by clients, to its table.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
pub struct TablesInfo(pub BTreeMap<String, TableInfo>);

impl TablesInfo {
    pub fn empty() -> Self {
        TablesInfo(BTreeMap::new())
    }

    pub fn get(&self, collection: &str) -> Option<&TableInfo> {
        self.0.get(collection)
    }
}

/// Information about a database table (or any other kind of relation).
///
/// `columns` is the allow-list of fields a client may filter and sort on: it maps
/// each client-facing field name to the database column behind it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct TableInfo {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub schema_name: String,
    pub table_name: String,
    pub columns: BTreeMap<String, ColumnInfo>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Information about a database column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ColumnInfo {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl ColumnInfo {
    pub fn new(name: impl Into<String>) -> Self {
        ColumnInfo {
            name: name.into(),
            description: None,
        }
    }
}

impl TableInfo {
    pub fn new(
        schema_name: impl Into<String>,
        table_name: impl Into<String>,
        columns: impl IntoIterator<Item = (String, ColumnInfo)>,
    ) -> Self {
        TableInfo {
            schema_name: schema_name.into(),
            table_name: table_name.into(),
            columns: columns.into_iter().collect(),
            description: None,
        }
    }

    /// `schema.table`, or just `table` when no schema is declared.
    pub fn qualified_name(&self) -> String {
        if self.schema_name.is_empty() {
            self.table_name.clone()
        } else {
            format!("{}.{}", self.schema_name, self.table_name)
        }
    }

    /// The database column behind a client field, if the field is declared.
    pub fn column(&self, field: &str) -> Option<&ColumnInfo> {
        self.columns.get(field)
    }

    /// A SELECT of every declared column. Columns whose name differs from their
    /// field are aliased back to the field name.
    pub fn select_statement(&self) -> String {
        if self.columns.is_empty() {
            return format!("SELECT * FROM {}", self.qualified_name());
        }

        let select_list = self
            .columns
            .iter()
            .map(|(field, column)| {
                if *field == column.name {
                    column.name.clone()
                } else {
                    format!("{} AS \"{}\"", column.name, field.replace('"', "\"\""))
                }
            })
            .collect::<Vec<_>>()
            .join(", ");

        format!("SELECT {select_list} FROM {}", self.qualified_name())
    }

    /// Counts the rows of the table.
    pub fn count_statement(&self) -> String {
        format!("SELECT count(*) FROM {}", self.qualified_name())
    }
}
