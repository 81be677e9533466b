//! CLI entry point for `ddl2grafana`.

use std::path::PathBuf;
use std::process;

use clap::Parser;
use ddl2grafana::classifier::classify_schema;
use ddl2grafana::generator::{compile, DashboardOptions, DatasourceRef};
use ddl2grafana::output::formatter;
use ddl2grafana::parser::sql_parser::{self, Dialect};
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "ddl2grafana",
    about = "Compile CREATE TABLE schemas into Grafana dashboards"
)]
struct Cli {
    /// Input SQL files
    #[arg(required_unless_present = "schema_dir")]
    input: Vec<PathBuf>,

    /// Process all .sql files in directory
    #[arg(long)]
    schema_dir: Option<PathBuf>,

    /// SQL dialect of the input (generic, sqlite, mysql, postgres, mssql)
    #[arg(long, default_value = "generic")]
    dialect: Dialect,

    /// Output directory
    #[arg(long, default_value = "ddl2grafana-output")]
    output_dir: PathBuf,

    /// Dashboard title
    #[arg(long)]
    title: Option<String>,

    /// Datasource uid referenced by every panel
    #[arg(long)]
    datasource_uid: Option<String>,

    /// Datasource plugin type referenced by every panel
    #[arg(long)]
    datasource_type: Option<String>,

    /// Print the dashboard JSON to stdout instead of writing files
    #[arg(long)]
    stdout: bool,

    /// Print verbose diagnostics
    #[arg(long)]
    verbose: bool,
}

impl Cli {
    fn dashboard_options(&self) -> DashboardOptions {
        let defaults = DashboardOptions::default();
        DashboardOptions {
            title: self.title.clone().unwrap_or(defaults.title),
            datasource: DatasourceRef {
                type_name: self
                    .datasource_type
                    .clone()
                    .unwrap_or(defaults.datasource.type_name),
                uid: self
                    .datasource_uid
                    .clone()
                    .unwrap_or(defaults.datasource.uid),
            },
        }
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    // Collect input files
    let mut sql_files = cli.input.clone();
    if let Some(dir) = &cli.schema_dir {
        match std::fs::read_dir(dir) {
            Ok(entries) => {
                let mut found: Vec<PathBuf> = entries
                    .flatten()
                    .map(|entry| entry.path())
                    .filter(|path| path.extension().is_some_and(|e| e == "sql"))
                    .collect();
                found.sort();
                sql_files.extend(found);
            }
            Err(e) => {
                eprintln!("Error reading schema directory: {e}");
                process::exit(2);
            }
        }
    }

    if sql_files.is_empty() {
        eprintln!("No input SQL files provided");
        process::exit(2);
    }

    // Read and concatenate all SQL
    let mut combined_sql = String::new();
    for path in &sql_files {
        match std::fs::read_to_string(path) {
            Ok(content) => {
                combined_sql.push_str(&content);
                combined_sql.push('\n');
            }
            Err(e) => {
                eprintln!("Error reading {}: {e}", path.display());
                process::exit(2);
            }
        }
    }

    // Stage 1: Parse DDL
    let raw_tables = match sql_parser::parse_schema(&combined_sql, cli.dialect) {
        Ok(tables) => tables,
        Err(e) => {
            eprintln!("{e}");
            process::exit(2);
        }
    };

    // Stage 2: Classify columns
    let tables = classify_schema(&raw_tables);
    for table in &tables {
        for column in table.columns() {
            debug!(
                table = table.name(),
                column = column.name(),
                data_type = column.declared_type(),
                roles = ?column.roles().names(),
                unit = %column.unit(),
                "classified"
            );
        }
    }

    // Stage 3: Compile dashboard
    let Some(dashboard) = compile(&tables, &cli.dashboard_options()) else {
        warn!("no panels were generated");
        eprintln!("No panels were generated: no table has a time column with metrics or categories");
        process::exit(1);
    };

    // Stage 4: Write output
    if cli.stdout {
        match dashboard.to_json_pretty() {
            Ok(json) => println!("{json}"),
            Err(e) => {
                eprintln!("{e}");
                process::exit(2);
            }
        }
        return;
    }

    // Derive name from first input file
    let name = sql_files
        .first()
        .and_then(|p| p.file_stem())
        .and_then(|s| s.to_str())
        .unwrap_or("dashboard");

    if let Err(e) = formatter::write_output(&cli.output_dir, name, &dashboard, &tables) {
        eprintln!("Error writing output: {e}");
        process::exit(2);
    }

    eprintln!(
        "Generated {} panels into {}",
        dashboard.panels.len(),
        cli.output_dir.display()
    );
}
