use std::fs;
use std::path::PathBuf;

use grid_query_configuration::environment::FixedEnvironment;
use grid_query_configuration::version1::{CONFIGURATION_FILENAME, DEFAULT_CONNECTION_URI_VARIABLE};
use grid_query_configuration::ParsedConfiguration;
use query_engine_metadata::metadata::Metadata;
use query_engine_models::QueryDescription;
use query_engine_sql::sql;
use query_engine_translation::translation;
use query_engine_translation::translation::query::helpers::Env;
use query_engine_translation::translation::query::list::ListPlan;

/// Everything a goldenfile directory describes.
pub struct Goldenfile {
    pub env: Env,
    pub metadata: Metadata,
    pub request: QueryDescription,
    pub predicate: Option<sql::ast::RawPredicate>,
}

/// Load `tests/goldenfiles/<testname>`: `request.json`, plus `predicate.json` and
/// `configuration.json` when present.
pub async fn load(testname: &str) -> anyhow::Result<Goldenfile> {
    let directory = PathBuf::from("tests/goldenfiles").join(testname);

    let parsed_configuration = if directory.join(CONFIGURATION_FILENAME).exists() {
        grid_query_configuration::parse_configuration(&directory).await?
    } else {
        ParsedConfiguration::empty()
    };
    let configuration = grid_query_configuration::make_runtime_configuration(
        parsed_configuration,
        FixedEnvironment::from([(
            DEFAULT_CONNECTION_URI_VARIABLE.into(),
            "the translation tests do not rely on a database connection".into(),
        )]),
    )?;

    let request = serde_json::from_str(&fs::read_to_string(directory.join("request.json"))?)?;

    let predicate_file = directory.join("predicate.json");
    let predicate = if predicate_file.exists() {
        Some(serde_json::from_str(&fs::read_to_string(predicate_file)?)?)
    } else {
        None
    };

    Ok(Goldenfile {
        env: Env::new(configuration.dialect).with_max_page_size(configuration.max_page_size),
        metadata: configuration.metadata,
        request,
        predicate,
    })
}

/// Translate the full query of a goldenfile.
pub async fn test_translation(testname: &str) -> anyhow::Result<sql::string::SQL> {
    let goldenfile = load(testname).await?;
    Ok(translation::query::translate_full_query(
        &goldenfile.env,
        &goldenfile.request,
        goldenfile.predicate.as_ref(),
    )?)
}

/// Translate only the WHERE clause of a goldenfile.
pub async fn test_filter_translation(testname: &str) -> anyhow::Result<sql::string::SQL> {
    let goldenfile = load(testname).await?;
    Ok(translation::query::translate_filter_query(
        &goldenfile.env,
        &goldenfile.request,
        goldenfile.predicate.as_ref(),
    )?)
}

/// Plan a listing of `collection` from a goldenfile.
pub async fn test_list_translation(testname: &str, collection: &str) -> anyhow::Result<ListPlan> {
    let goldenfile = load(testname).await?;
    Ok(translation::query::list::translate_list(
        &goldenfile.env,
        &goldenfile.metadata,
        collection,
        &goldenfile.request,
        goldenfile.predicate.as_ref(),
    )?)
}

/// The error a goldenfile's full query fails with.
pub async fn test_translation_error(
    testname: &str,
) -> anyhow::Result<translation::query::error::Error> {
    let goldenfile = load(testname).await?;
    match translation::query::translate_full_query(
        &goldenfile.env,
        &goldenfile.request,
        goldenfile.predicate.as_ref(),
    ) {
        Ok(sql) => anyhow::bail!("expected an error, got {:?}", sql.sql),
        Err(error) => Ok(error),
    }
}
