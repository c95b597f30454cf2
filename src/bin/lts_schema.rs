//! LTS Schema CLI
//!
//! Inspects a variable schema and checks option values against it.

use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use lts_schema::{LtsSchemaConfig, SchemaStore, SettingsChecker};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "lts-schema")]
#[command(about = "Inspect the lts.conf variable schema and check values against it")]
struct Cli {
    /// Configuration file (layered over lts-schema.toml and LTS_SCHEMA__* variables)
    #[arg(short, long)]
    config: Option<String>,

    /// Schema file (overrides the configured path)
    #[arg(short, long)]
    schema: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse the schema and list its variables and any skipped lines
    Inspect {
        /// Print definitions as JSON
        #[arg(long)]
        json: bool,
    },

    /// List registered data types
    Types,

    /// Check option values against the schema
    Check {
        /// OPTION=VALUE pair (repeatable)
        #[arg(long = "set", value_name = "OPTION=VALUE", required = true)]
        pairs: Vec<String>,
    },

    /// Fuzzy-search variable names
    Search {
        query: String,
        /// Maximum number of results
        #[arg(short, long, default_value_t = 10)]
        limit: usize,
    },

    /// Print the effective configuration
    Config,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config = LtsSchemaConfig::load_from(cli.config.as_deref())
        .context("failed to load configuration")?;

    if let Commands::Config = cli.command {
        print!("{}", toml::to_string_pretty(&config)?);
        return Ok(());
    }

    let registry = config.build_registry();

    if let Commands::Types = cli.command {
        for name in registry.type_names() {
            println!("{}", name);
        }
        return Ok(());
    }

    let schema_path = cli.schema.unwrap_or_else(|| config.schema.path.clone());
    let report = SchemaStore::load(&schema_path, &registry)
        .with_context(|| format!("failed to read schema {}", schema_path.display()))?;

    match cli.command {
        Commands::Inspect { json } => {
            if json {
                let variables: Vec<_> = report.store.iter().collect();
                println!("{}", serde_json::to_string_pretty(&variables)?);
            } else {
                for var in &report.store {
                    println!("{:<28} {:<22} default {}", var.name, var.data_type, var.default);
                }
                println!();
                println!(
                    "{} variables, fingerprint {}",
                    report.store.len(),
                    report.store.fingerprint()
                );
            }
            for issue in &report.issues {
                eprintln!("{}", issue);
            }
            Ok(())
        }

        Commands::Check { pairs } => {
            let checker = SettingsChecker::new(&report.store, &registry);
            let mut warnings = 0;

            for pair in &pairs {
                let Some((option, value)) = pair.split_once('=') else {
                    bail!("expected OPTION=VALUE, got '{}'", pair);
                };
                let (option, value) = (option.trim(), value.trim());

                if !report.store.contains(option) {
                    if config.validation.report_unknown_options {
                        println!("? {} is not declared by the schema", option);
                    }
                    continue;
                }

                match checker.check(option, value) {
                    Some(warning) => {
                        warnings += 1;
                        println!("✗ {}", warning);
                    }
                    None => println!("✓ {}={}", option, value),
                }
            }

            if warnings > 0 && config.validation.fail_on_warnings {
                std::process::exit(1);
            }
            Ok(())
        }

        Commands::Search { query, limit } => {
            for var in report.store.search(&query, limit) {
                println!("{:<28} {}", var.name, var.description.lines().next().unwrap_or(""));
            }
            Ok(())
        }

        Commands::Types | Commands::Config => Ok(()),
    }
}
