//! The command line: set up a configuration directory, translate grid requests,
//! and run listings against a database.

use std::path::{Path, PathBuf};

use clap::{Args, Subcommand};
use serde::Serialize;
use tokio::fs;

use grid_query_configuration::environment::Environment;
use grid_query_configuration::version1::CONFIGURATION_FILENAME;
use grid_query_configuration::ParsedConfiguration;
use query_engine_models::{ListParams, QueryDescription};
use query_engine_sql::sql;
use query_engine_translation::translation;
use query_engine_translation::translation::query::helpers::Env;

/// The commands accepted by the tool.
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Write an initial configuration into the context directory.
    Initialize,
    /// Translate a grid request into SQL and parameters.
    Translate {
        #[command(flatten)]
        request: RequestArgs,
        /// Plan a listing of this declared table instead of a bare fragment.
        #[arg(long)]
        collection: Option<String>,
        /// Only translate the WHERE clause.
        #[arg(long, conflicts_with = "collection")]
        filter_only: bool,
        /// Lay the SQL out over several lines.
        #[arg(long)]
        pretty: bool,
    },
    /// Run a listing of a declared table and print the page with its total.
    List {
        #[command(flatten)]
        request: RequestArgs,
        #[arg(long)]
        collection: String,
    },
    /// Print a JSON schema.
    PrintSchema {
        #[arg(long, value_enum, default_value_t = Schema::Configuration)]
        schema: Schema,
    },
}

/// Where a grid request comes from, and the caller's predicate.
#[derive(Debug, Clone, Args)]
pub struct RequestArgs {
    /// A JSON file holding a grid request.
    #[arg(long, conflicts_with = "query_string", required_unless_present = "query_string")]
    pub request: Option<PathBuf>,
    /// JSON:API list parameters, such as `page[size]=10&sort=-name&filter[status]=active`.
    #[arg(long)]
    pub query_string: Option<String>,
    /// SQL ANDed ahead of the client's filters, with a `?` per parameter.
    #[arg(long)]
    pub predicate: Option<String>,
    /// A parameter of the predicate: JSON, or else a plain string.
    #[arg(long = "param", requires = "predicate")]
    pub params: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Schema {
    Configuration,
    Request,
}

/// The context in which a command runs.
pub struct Context<E: Environment> {
    pub context_path: PathBuf,
    pub environment: E,
}

#[derive(Debug, Serialize)]
struct TranslatedQuery {
    sql: String,
    params: Vec<sql::string::Param>,
}

#[derive(Debug, Serialize)]
struct TranslatedList {
    collection: String,
    rows: TranslatedQuery,
    count: TranslatedQuery,
}

/// Run a command, returning what it prints.
pub async fn run(command: Command, context: Context<impl Environment>) -> anyhow::Result<String> {
    match command {
        Command::Initialize => initialize(&context).await,
        Command::Translate {
            request,
            collection,
            filter_only,
            pretty,
        } => translate(&context, &request, collection.as_deref(), filter_only, pretty).await,
        Command::List {
            request,
            collection,
        } => list(context, &request, &collection).await,
        Command::PrintSchema { schema } => print_schema(schema),
    }
}

async fn initialize(context: &Context<impl Environment>) -> anyhow::Result<String> {
    let configuration_file = context.context_path.join(CONFIGURATION_FILENAME);
    if fs::try_exists(&configuration_file).await? {
        anyhow::bail!(
            "refusing to overwrite the existing configuration {}",
            configuration_file.display()
        );
    }

    grid_query_configuration::write_parsed_configuration(
        ParsedConfiguration::initial(),
        &context.context_path,
    )
    .await?;

    tracing::info!(path = %context.context_path.display(), "initialized configuration");
    Ok(String::new())
}

async fn translate(
    context: &Context<impl Environment>,
    request: &RequestArgs,
    collection: Option<&str>,
    filter_only: bool,
    pretty: bool,
) -> anyhow::Result<String> {
    let parsed = read_configuration(&context.context_path).await?;
    let env = Env::new(parsed.dialect).with_max_page_size(parsed.paging.max_page_size);
    let description = read_request(request).await?;
    let predicate = predicate(request);

    let output = if let Some(collection) = collection {
        let plan = translation::query::list::translate_list(
            &env,
            &parsed.metadata,
            collection,
            &description,
            predicate.as_ref(),
        )?;
        serde_json::to_string_pretty(&TranslatedList {
            collection: plan.collection,
            rows: translated(plan.rows, pretty),
            count: translated(plan.count, pretty),
        })?
    } else {
        let sql = if filter_only {
            translation::query::translate_filter_query(&env, &description, predicate.as_ref())?
        } else {
            translation::query::translate_full_query(&env, &description, predicate.as_ref())?
        };
        serde_json::to_string_pretty(&translated(sql, pretty))?
    };

    Ok(output)
}

async fn list(
    context: Context<impl Environment>,
    request: &RequestArgs,
    collection: &str,
) -> anyhow::Result<String> {
    let parsed = read_configuration(&context.context_path).await?;
    let configuration =
        grid_query_configuration::make_runtime_configuration(parsed, context.environment)?;
    let env =
        Env::new(configuration.dialect).with_max_page_size(configuration.max_page_size);

    let description = read_request(request).await?;
    let plan = translation::query::list::translate_list(
        &env,
        &configuration.metadata,
        collection,
        &description,
        predicate(request).as_ref(),
    )?;

    let mut client =
        query_engine_execution::connection::connect(&configuration.connection_uri).await?;
    let response = query_engine_execution::query::execute_list(&mut client, &plan).await?;

    Ok(String::from_utf8(response.to_bytes()?.to_vec())?)
}

fn print_schema(schema: Schema) -> anyhow::Result<String> {
    let schema = match schema {
        Schema::Configuration => schemars::schema_for!(ParsedConfiguration),
        Schema::Request => schemars::schema_for!(QueryDescription),
    };
    Ok(serde_json::to_string_pretty(&schema)?)
}

/// The configuration of the context directory, or the defaults when it has none.
async fn read_configuration(context_path: &Path) -> anyhow::Result<ParsedConfiguration> {
    if fs::try_exists(context_path.join(CONFIGURATION_FILENAME)).await? {
        Ok(grid_query_configuration::parse_configuration(context_path).await?)
    } else {
        tracing::debug!(path = %context_path.display(), "no configuration, using defaults");
        Ok(ParsedConfiguration::empty())
    }
}

async fn read_request(request: &RequestArgs) -> anyhow::Result<QueryDescription> {
    match (&request.request, &request.query_string) {
        (Some(path), _) => {
            let contents = fs::read_to_string(path).await?;
            Ok(serde_json::from_str(&contents)?)
        }
        (None, Some(query_string)) => {
            Ok(QueryDescription::from(ListParams::from_query_string(query_string)?))
        }
        (None, None) => anyhow::bail!("either --request or --query-string is required"),
    }
}

fn predicate(request: &RequestArgs) -> Option<sql::ast::RawPredicate> {
    request.predicate.as_ref().map(|predicate| {
        let params = request
            .params
            .iter()
            .map(|param| {
                serde_json::from_str::<serde_json::Value>(param)
                    .map_or_else(|_| sql::string::Param::from(param.as_str()), Into::into)
            })
            .collect();
        sql::ast::RawPredicate::new(predicate.as_str(), params)
    })
}

fn translated(sql: sql::string::SQL, pretty: bool) -> TranslatedQuery {
    let text = if pretty {
        sqlformat::format(
            &sql.sql,
            &sqlformat::QueryParams::None,
            sqlformat::FormatOptions::default(),
        )
    } else {
        sql.sql
    };
    TranslatedQuery {
        sql: text,
        params: sql.params,
    }
}
