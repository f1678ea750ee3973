mod config;
mod logging;

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::{Args, Parser, Subcommand};
use datamaker_client::{API_KEY_ENV, ClientError, ClientOptions, DataMaker, ExportOptions};
use datamaker_core::{CustomEndpoint, EndpointRef, FieldType, Template};
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use config::{
    ConfigError, OptionOverrides, load_client_options, load_env_file, resolve_client_options,
    write_json_atomic,
};

#[derive(Debug, Error)]
enum CliError {
    #[error("client error: {0}")]
    Client(#[from] ClientError),
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("json error in {path}: {source}")]
    InputJson {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("logging error: {0}")]
    Logging(String),
}

#[derive(Parser, Debug)]
#[command(name = "datamaker", version, about = "DataMaker CLI")]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,
    #[command(subcommand)]
    command: Command,
}

#[derive(Args, Debug)]
struct GlobalArgs {
    /// TOML file with client options.
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Dotenv-style file consulted for DATAMAKER_API_KEY.
    #[arg(long, global = true, value_name = "PATH")]
    env_file: Option<PathBuf>,
    /// API key; overrides every other source.
    #[arg(long, global = true, value_name = "KEY")]
    api_key: Option<String>,
    /// Service base URL.
    #[arg(long, global = true, value_name = "URL")]
    base_url: Option<String>,
    /// Per-request timeout in milliseconds.
    #[arg(long, global = true, value_name = "MS")]
    timeout_ms: Option<u64>,
    /// Emit JSON log lines on stderr.
    #[arg(long, global = true, default_value_t = false)]
    log_json: bool,
    /// Write the command output to this file instead of stdout.
    #[arg(long, global = true, value_name = "PATH")]
    out: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate records from an inline or stored template.
    Generate(GenerateArgs),
    /// Send records to an API endpoint, one request per record.
    ExportApi(ExportApiArgs),
    /// Send records to a table through the database bridge.
    ExportDb(ExportDbArgs),
    /// List templates stored in the account.
    Templates,
    /// List endpoints stored in the account.
    Endpoints,
    /// Print the field type catalogue.
    Fields,
}

#[derive(Args, Debug)]
struct GenerateArgs {
    /// JSON template file.
    #[arg(
        long,
        value_name = "PATH",
        conflicts_with = "template_id",
        required_unless_present = "template_id"
    )]
    template: Option<PathBuf>,
    /// Identifier of a template stored in the account.
    #[arg(long, value_name = "ID")]
    template_id: Option<String>,
    /// Number of records to generate from a stored template.
    #[arg(long, requires = "template_id")]
    quantity: Option<u32>,
}

#[derive(Args, Debug)]
struct ExportApiArgs {
    /// Identifier of an endpoint stored in the account.
    #[arg(
        long,
        value_name = "ID",
        conflicts_with = "endpoint_file",
        required_unless_present = "endpoint_file"
    )]
    endpoint: Option<String>,
    /// JSON file describing an endpoint as {url, method, headers?}.
    #[arg(long, value_name = "PATH")]
    endpoint_file: Option<PathBuf>,
    /// JSON array of records to export.
    #[arg(long, value_name = "PATH")]
    records: PathBuf,
    /// Maximum requests in flight; 1 keeps the export strictly sequential.
    #[arg(long, default_value_t = 1)]
    concurrency: usize,
}

#[derive(Args, Debug)]
struct ExportDbArgs {
    /// Database connection identifier.
    #[arg(long, value_name = "ID")]
    connection: String,
    /// Target table.
    #[arg(long, value_name = "NAME")]
    table: String,
    /// JSON array of records to export.
    #[arg(long, value_name = "PATH")]
    records: PathBuf,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CatalogueEntry {
    #[serde(rename = "type")]
    field_type: &'static str,
    requires_options: bool,
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    let cli = Cli::parse();
    logging::init_logging(cli.global.log_json).map_err(CliError::Logging)?;

    let timer = Instant::now();
    let command = command_name(&cli.command);
    tracing::info!(event = "command_started", command = command);

    let output = run(&cli.global, cli.command).await?;
    emit(&output, cli.global.out.as_deref())?;

    tracing::info!(
        event = "command_finished",
        command = command,
        duration_ms = timer.elapsed().as_millis() as u64
    );
    Ok(())
}

async fn run(global: &GlobalArgs, command: Command) -> Result<Value, CliError> {
    match command {
        Command::Fields => Ok(serde_json::to_value(catalogue())?),
        Command::Templates => {
            let client = build_client(global)?;
            Ok(serde_json::to_value(client.list_templates().await?)?)
        }
        Command::Endpoints => {
            let client = build_client(global)?;
            Ok(serde_json::to_value(client.list_endpoints().await?)?)
        }
        Command::Generate(args) => run_generate(&build_client(global)?, args).await,
        Command::ExportApi(args) => run_export_api(&build_client(global)?, args).await,
        Command::ExportDb(args) => run_export_db(&build_client(global)?, args).await,
    }
}

async fn run_generate(client: &DataMaker, args: GenerateArgs) -> Result<Value, CliError> {
    let records = match (args.template, args.template_id) {
        (Some(path), None) => {
            let template = read_json(&path)?;
            lint_template(&template);
            client.generate_value(&template).await?
        }
        (None, Some(id)) => client.generate_from_template_id(&id, args.quantity).await?,
        _ => {
            return Err(CliError::InvalidInput(
                "use either --template or --template-id".to_string(),
            ));
        }
    };
    Ok(serde_json::to_value(records)?)
}

async fn run_export_api(client: &DataMaker, args: ExportApiArgs) -> Result<Value, CliError> {
    let endpoint = match (args.endpoint, args.endpoint_file) {
        (Some(id), None) => EndpointRef::Id(id),
        (None, Some(path)) => {
            let custom: CustomEndpoint =
                serde_json::from_value(read_json(&path)?).map_err(|source| {
                    CliError::InputJson {
                        path: path.clone(),
                        source,
                    }
                })?;
            EndpointRef::Custom(custom)
        }
        _ => {
            return Err(CliError::InvalidInput(
                "use either --endpoint or --endpoint-file".to_string(),
            ));
        }
    };
    let records = read_records(&args.records)?;
    let results = client
        .export_to_api_with(
            endpoint,
            &records,
            ExportOptions::concurrent(args.concurrency),
        )
        .await?;
    Ok(Value::Array(results))
}

async fn run_export_db(client: &DataMaker, args: ExportDbArgs) -> Result<Value, CliError> {
    let records = read_records(&args.records)?;
    let results = client
        .export_to_db(&args.connection, &args.table, &records)
        .await?;
    Ok(Value::Array(results))
}

fn build_client(global: &GlobalArgs) -> Result<DataMaker, CliError> {
    let file = global
        .config
        .as_deref()
        .map(load_client_options)
        .transpose()?;
    let env_file = match global.env_file.as_deref() {
        Some(path) => load_env_file(path)?,
        None => BTreeMap::new(),
    };
    let overrides = OptionOverrides {
        api_key: global.api_key.clone(),
        base_url: global.base_url.clone(),
        timeout_ms: global.timeout_ms,
    };
    let options: ClientOptions = resolve_client_options(
        file,
        overrides,
        &env_file,
        std::env::var(API_KEY_ENV).ok(),
    );
    Ok(DataMaker::new(options)?)
}

fn catalogue() -> Vec<CatalogueEntry> {
    FieldType::ALL
        .iter()
        .map(|field_type| CatalogueEntry {
            field_type: field_type.as_str(),
            requires_options: field_type.requires_options(),
        })
        .collect()
}

/// Log non-fatal template issues; parse failures are left to the client.
fn lint_template(template: &Value) {
    if let Ok(template) = serde_json::from_value::<Template>(template.clone()) {
        for warning in template.lint() {
            tracing::warn!(event = "template_warning", warning = %warning);
        }
    }
}

fn read_json(path: &Path) -> Result<Value, CliError> {
    let content = std::fs::read_to_string(path).map_err(|source| CliError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&content).map_err(|source| CliError::InputJson {
        path: path.to_path_buf(),
        source,
    })
}

fn read_records(path: &Path) -> Result<Vec<Value>, CliError> {
    match read_json(path)? {
        Value::Array(records) => Ok(records),
        _ => Err(CliError::InvalidInput(format!(
            "{} must contain a JSON array of records",
            path.display()
        ))),
    }
}

fn emit(output: &Value, out: Option<&Path>) -> Result<(), CliError> {
    match out {
        Some(path) => {
            write_json_atomic(path, output)?;
            tracing::info!(event = "output_written", path = %path.display());
        }
        None => println!("{}", serde_json::to_string_pretty(output)?),
    }
    Ok(())
}

fn command_name(command: &Command) -> &'static str {
    match command {
        Command::Generate(_) => "generate",
        Command::ExportApi(_) => "export-api",
        Command::ExportDb(_) => "export-db",
        Command::Templates => "templates",
        Command::Endpoints => "endpoints",
        Command::Fields => "fields",
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn generate_requires_a_template_source() {
        assert!(Cli::try_parse_from(["datamaker", "generate"]).is_err());
        assert!(
            Cli::try_parse_from([
                "datamaker",
                "generate",
                "--template",
                "t.json",
                "--template-id",
                "T1"
            ])
            .is_err()
        );
        assert!(
            Cli::try_parse_from(["datamaker", "generate", "--template", "t.json", "--quantity", "2"])
                .is_err()
        );
    }

    #[test]
    fn global_flags_follow_the_subcommand() {
        let cli = Cli::try_parse_from([
            "datamaker",
            "generate",
            "--template-id",
            "T1",
            "--quantity",
            "2",
            "--api-key",
            "dm-key",
            "--out",
            "records.json",
        ])
        .expect("parse");

        assert_eq!(cli.global.api_key.as_deref(), Some("dm-key"));
        assert_eq!(cli.global.out.as_deref(), Some(Path::new("records.json")));
        match cli.command {
            Command::Generate(args) => {
                assert_eq!(args.template_id.as_deref(), Some("T1"));
                assert_eq!(args.quantity, Some(2));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn export_api_takes_exactly_one_endpoint_source() {
        assert!(Cli::try_parse_from(["datamaker", "export-api", "--records", "r.json"]).is_err());
        let cli = Cli::try_parse_from([
            "datamaker",
            "export-api",
            "--endpoint",
            "E1",
            "--records",
            "r.json",
        ])
        .expect("parse");
        match cli.command {
            Command::ExportApi(args) => assert_eq!(args.concurrency, 1),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn catalogue_lists_every_field_type() {
        let entries = catalogue();
        assert_eq!(entries.len(), FieldType::ALL.len());
        let derived = entries
            .iter()
            .find(|entry| entry.field_type == "Derived")
            .expect("derived entry");
        assert!(derived.requires_options);
    }

    #[test]
    fn records_file_must_hold_an_array() {
        let path = std::env::temp_dir().join(format!(
            "datamaker_records_{}.json",
            std::process::id()
        ));
        std::fs::write(&path, r#"{"id": 1}"#).expect("write records");

        let err = read_records(&path).expect_err("not an array");
        let _ = std::fs::remove_file(&path);

        assert!(matches!(err, CliError::InvalidInput(_)));
    }
}
