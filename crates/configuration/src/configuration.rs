//! Configuration for the translator and executor at runtime.

use query_engine_metadata::metadata;
use query_engine_sql::sql::dialect::Dialect;

use crate::environment::Environment;
use crate::error::MakeRuntimeConfigurationError;
use crate::values::{ConnectionUri, Secret};
use crate::version1::ParsedConfiguration;

/// The 'Configuration' type collects all the information necessary to serve queries at runtime.
///
/// Values of this type are produced from a 'ParsedConfiguration' using
/// 'make_runtime_configuration', which resolves secrets against an environment.
#[derive(Debug, Clone, PartialEq)]
pub struct Configuration {
    pub dialect: Dialect,
    pub connection_uri: String,
    pub max_page_size: Option<u32>,
    pub metadata: metadata::Metadata,
}

/// Resolve a parsed configuration into a runtime one.
pub fn make_runtime_configuration(
    parsed_config: ParsedConfiguration,
    environment: impl Environment,
) -> Result<Configuration, MakeRuntimeConfigurationError> {
    let connection_uri = match parsed_config.connection_uri {
        ConnectionUri(Secret::Plain(uri)) => uri,
        ConnectionUri(Secret::FromEnvironment { variable }) => environment.read(&variable)?,
    };

    Ok(Configuration {
        dialect: parsed_config.dialect,
        connection_uri,
        max_page_size: parsed_config.paging.max_page_size,
        metadata: parsed_config.metadata,
    })
}
