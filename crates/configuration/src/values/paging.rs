use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Limits on the pages a client may request.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct PagingSettings {
    /// Largest number of rows a single page may hold. Also bounds requests for every row.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_page_size: Option<u32>,
}

impl PagingSettings {
    pub fn is_default(&self) -> bool {
        *self == PagingSettings::default()
    }
}
