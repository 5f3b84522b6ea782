use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use rust_dbmeta::{inspect, report, InspectOptions, LoadOptions, OutputFormat};

#[derive(Parser)]
#[command(name = "rust-dbmeta")]
#[command(author, version, about = "Table metadata from MySQL SHOW CREATE TABLE output")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Report column, primary key and unique index metadata for DDL files
    Inspect {
        /// A .sql file, or a directory searched for .sql files
        #[arg(short, long)]
        input: PathBuf,

        /// Only inspect files matching this glob (relative to the input directory)
        #[arg(long)]
        include: Option<String>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,

        /// Prefix for the type name of unsigned columns
        #[arg(long, default_value = "u")]
        unsigned_prefix: String,

        /// Do not mark the first column as primary key on tables without one
        #[arg(long)]
        no_fallback_pk: bool,

        /// Enable verbose output
        #[arg(short, long)]
        verbose: bool,
    },
}

/// Log to stderr so reports on stdout stay clean. `RUST_LOG` wins over `--verbose`.
fn setup_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .try_init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Inspect {
            input,
            include,
            format,
            unsigned_prefix,
            no_fallback_pk,
            verbose,
        } => {
            setup_logging(verbose);

            let options = InspectOptions {
                input_path: input,
                include,
                load: LoadOptions {
                    unsigned_prefix,
                    apply_fallback_primary_key: !no_fallback_pk,
                    ..Default::default()
                },
            };

            let tables = inspect(&options)?;
            match format {
                OutputFormat::Text => {
                    for table in &tables {
                        println!("{}", report::render_text(table));
                    }
                }
                OutputFormat::Json => println!("{}", report::render_json(&tables)?),
            }
        }
    }

    Ok(())
}
