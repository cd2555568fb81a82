//! Feast entity definition tool
//!
//! Validates and converts entity definition files without talking to a
//! registry.
//!
//! Usage:
//!   feast-entity validate entities.yaml
//!   feast-entity describe driver.yaml --format json
//!   feast-entity encode driver.yaml --output driver.pb
//!   feast-entity decode driver.pb

use std::{io, path::PathBuf};
use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use feast_cli::OutputFormat;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser, Debug)]
#[command(name = "feast-entity")]
#[command(about = "Validate and convert Feast entity definitions")]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Enable verbose debug logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Check that every entity has a name and a value type
    Validate {
        file: PathBuf,
    },
    /// Print entities as YAML or JSON
    Describe {
        file: PathBuf,
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Yaml)]
        format: OutputFormat,
    },
    /// Encode a single entity as protobuf
    Encode {
        file: PathBuf,
        #[arg(short, long)]
        output: PathBuf,
    },
    /// Decode a protobuf entity and print it as YAML
    Decode {
        file: PathBuf,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();
    let log_level = if args.verbose { Level::DEBUG } else { Level::INFO };
    FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .with_writer(io::stderr)
        .compact()
        .init();

    let mut stdout = io::stdout().lock();
    match args.command {
        Command::Validate { file } => {
            let report = feast_cli::validate(&file, &mut stdout)?;
            if !report.is_ok() {
                bail!("{} invalid entities in {}", report.invalid.len(), file.display());
            }
        }
        Command::Describe { file, format } => feast_cli::describe(&file, format, &mut stdout)?,
        Command::Encode { file, output } => {
            let written = feast_cli::encode(&file, &output)?;
            info!("Wrote {} bytes to {}", written, output.display());
        }
        Command::Decode { file } => {
            feast_cli::decode(&file, &mut stdout)?;
        }
    }
    Ok(())
}
