//! fb-meta-tool CLI - Firebird schema export and script application.

use clap::{Parser, Subcommand};
use fb_meta_tool::script::{load_script, split_script_detailed};
use fb_meta_tool::{orchestrator, Config, ExportConfig, ExportResult, MetaError, UpdateResult};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{info, warn, Level};
use tracing_subscriber::fmt::format::FmtSpan;

#[derive(Parser)]
#[command(name = "fb-meta-tool")]
#[command(about = "Export, rebuild and update Firebird database metadata")]
#[command(version)]
struct Cli {
    /// Path to YAML configuration file
    #[arg(short, long, default_value = "config.yaml")]
    config: PathBuf,

    /// Connection string (User=...;Password=...;Database=...;DataSource=...;Port=...),
    /// used instead of the configuration file
    #[arg(long, env = "FB_META_CONNECTION_STRING")]
    connection_string: Option<String>,

    /// Output JSON result to stdout
    #[arg(long)]
    output_json: bool,

    /// Log format: text or json
    #[arg(long, default_value = "text")]
    log_format: String,

    /// Log verbosity: debug, info, warn, error
    #[arg(long, default_value = "info")]
    verbosity: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Export domains, tables and procedures of a database as a DDL script
    ExportScripts {
        /// Directory the script is written to
        #[arg(long)]
        output_dir: PathBuf,
    },

    /// Apply the script of a directory to an existing database in one transaction
    UpdateDb {
        /// Directory containing the *.sql script
        #[arg(long)]
        scripts_dir: PathBuf,
    },

    /// Create a new database and apply the script of a directory to it
    BuildDb {
        /// Directory the database file is created in
        #[arg(long)]
        db_dir: PathBuf,

        /// Directory containing the *.sql script
        #[arg(long)]
        scripts_dir: PathBuf,
    },

    /// Render a JSON schema snapshot as a DDL script (no database needed)
    Render {
        /// Snapshot written by export-scripts
        #[arg(long)]
        snapshot: PathBuf,

        /// Directory the script is written to
        #[arg(long)]
        output_dir: PathBuf,
    },

    /// Print the statements a script would be split into (no database needed)
    Split {
        /// Directory containing the *.sql script
        #[arg(long)]
        scripts_dir: PathBuf,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", e.format_detailed());
            ExitCode::from(e.exit_code())
        }
    }
}

async fn run() -> Result<(), MetaError> {
    let cli = Cli::parse();

    setup_logging(&cli.verbosity, &cli.log_format).map_err(MetaError::Config)?;

    match &cli.command {
        Commands::ExportScripts { output_dir } => {
            let config = load_config(&cli)?;
            let result = export_scripts(&config, output_dir).await?;
            print_export(&result, cli.output_json)?;
        }

        Commands::UpdateDb { scripts_dir } => {
            let config = load_config(&cli)?;
            let result = update_db(&config, scripts_dir).await?;
            print_update(&result, cli.output_json)?;
        }

        Commands::BuildDb {
            db_dir,
            scripts_dir,
        } => {
            let config = load_config(&cli)?;
            let result = build_db(&config, db_dir, scripts_dir).await?;
            print_update(&result, cli.output_json)?;
        }

        Commands::Render {
            snapshot,
            output_dir,
        } => {
            let options = export_options(&cli)?;
            let result = orchestrator::render_snapshot(snapshot, output_dir, &options).await?;
            print_export(&result, cli.output_json)?;
        }

        Commands::Split { scripts_dir } => {
            let (path, content) = load_script(scripts_dir)?;
            let split = split_script_detailed(&content);
            if let Some(rest) = &split.discarded {
                warn!("Unterminated text at end of {} would be discarded: '{}'", path.display(), rest);
            }

            if cli.output_json {
                println!("{}", serde_json::to_string_pretty(&split.statements)?);
            } else {
                for (index, statement) in split.statements.iter().enumerate() {
                    println!("-- [{}]", index);
                    println!("{}", statement);
                }
                println!("\n{} statements in {}", split.statements.len(), path.display());
            }
        }
    }

    Ok(())
}

/// Configuration from `--connection-string` if given, otherwise from the file.
fn load_config(cli: &Cli) -> Result<Config, MetaError> {
    if let Some(conn_str) = &cli.connection_string {
        let config = Config::from_connection_string(conn_str)?;
        info!("Using connection string for {}", config.connection.display_target());
        return Ok(config);
    }

    let config = Config::load(&cli.config)?;
    info!("Loaded configuration from {:?}", cli.config);
    Ok(config)
}

/// Export options for offline rendering; the configuration file is optional
/// and only its `export` section is read.
fn export_options(cli: &Cli) -> Result<ExportConfig, MetaError> {
    if cli.config.exists() {
        ExportConfig::load(&cli.config)
    } else {
        Ok(ExportConfig::default())
    }
}

#[cfg(feature = "firebird")]
async fn export_scripts(config: &Config, output_dir: &Path) -> Result<ExportResult, MetaError> {
    let reader = fb_meta_tool::drivers::FirebirdReader::new(&config.connection).await?;
    orchestrator::export_scripts(&reader, output_dir, &config.export).await
}

#[cfg(feature = "firebird")]
async fn update_db(config: &Config, scripts_dir: &Path) -> Result<UpdateResult, MetaError> {
    let writer = fb_meta_tool::drivers::FirebirdWriter::new(&config.connection).await?;
    orchestrator::update_database(&writer, scripts_dir).await
}

#[cfg(feature = "firebird")]
async fn build_db(
    config: &Config,
    db_dir: &Path,
    scripts_dir: &Path,
) -> Result<UpdateResult, MetaError> {
    orchestrator::build_database(config, db_dir, scripts_dir).await
}

#[cfg(not(feature = "firebird"))]
async fn export_scripts(_config: &Config, _output_dir: &Path) -> Result<ExportResult, MetaError> {
    Err(firebird_disabled())
}

#[cfg(not(feature = "firebird"))]
async fn update_db(_config: &Config, _scripts_dir: &Path) -> Result<UpdateResult, MetaError> {
    Err(firebird_disabled())
}

#[cfg(not(feature = "firebird"))]
async fn build_db(
    _config: &Config,
    _db_dir: &Path,
    _scripts_dir: &Path,
) -> Result<UpdateResult, MetaError> {
    Err(firebird_disabled())
}

#[cfg(not(feature = "firebird"))]
fn firebird_disabled() -> MetaError {
    MetaError::Config(
        "this build has no database support; rebuild with `--features firebird`".to_string(),
    )
}

fn print_export(result: &ExportResult, json: bool) -> Result<(), MetaError> {
    if json {
        println!("{}", result.to_json()?);
    } else {
        println!("\nExport completed!");
        println!("  Script: {}", result.script_path.display());
        if let Some(snapshot) = &result.snapshot_path {
            println!("  Snapshot: {}", snapshot.display());
        }
        println!("  Domains: {}", result.domains);
        println!("  Tables: {}", result.tables);
        println!("  Procedures: {}", result.procedures);
        println!("  Duration: {:.2}s", result.duration_seconds);
    }
    Ok(())
}

fn print_update(result: &UpdateResult, json: bool) -> Result<(), MetaError> {
    if json {
        println!("{}", result.to_json()?);
    } else {
        println!("\nUpdate completed!");
        println!("  Script: {}", result.script_path.display());
        println!("  Statements executed: {}", result.executed);
        println!("  Statements skipped: {}", result.skipped);
        println!("  Duration: {:.2}s", result.duration_seconds);
    }
    Ok(())
}

fn setup_logging(verbosity: &str, format: &str) -> Result<(), String> {
    let level = match verbosity.to_lowercase().as_str() {
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        other => return Err(format!("unknown verbosity '{}'", other)),
    };

    // Logs go to stderr so --output-json stays parseable.
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_span_events(FmtSpan::CLOSE)
        .with_target(false)
        .with_writer(std::io::stderr);

    match format {
        "json" => subscriber.json().init(),
        "text" => subscriber.init(),
        other => return Err(format!("unknown log format '{}'", other)),
    }

    Ok(())
}
