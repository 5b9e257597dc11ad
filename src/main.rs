use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use declgraph::cli::commands;
use declgraph::cli::{Cli, Commands};
use declgraph::config::AnalyzerConfig;
use declgraph::discovery::DiscoveryConfig;
use declgraph::resolver::normalize_path;

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli);

    let project_path = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));

    match cli.command {
        Commands::Deps {
            ref file,
            ref identifier,
            source,
        } => {
            let config = commands::load_config(&project_path, cli.config.as_deref())?;
            let output =
                commands::run_deps(&project_path, &config, file, identifier, source, &cli.format)?;
            print_or_exit(output, identifier, file);
        }

        Commands::Definition {
            ref file,
            ref identifier,
        } => {
            let config = commands::load_config(&project_path, cli.config.as_deref())?;
            let output =
                commands::run_definition(&project_path, &config, file, identifier, &cli.format)?;
            print_or_exit(output, identifier, file);
        }

        Commands::Chunk {
            ref file,
            ref identifier,
        } => {
            let output = commands::run_chunk(&project_path, file, identifier, &cli.format)?;
            print_or_exit(output, identifier, file);
        }

        Commands::Exports { ref file } => {
            let output = commands::run_exports(&project_path, file, &cli.format)?;
            println!("{}", output);
        }

        Commands::Scan { ref path } => {
            let scan_root = normalize_path(&project_path.join(path));
            let config = commands::load_config(&scan_root, cli.config.as_deref())?;
            let discovery = build_discovery_config(&cli, &config);
            let output = commands::run_scan(&scan_root, &config, &discovery, &cli.format)?;
            println!("{}", output);
        }
    }

    Ok(())
}

fn init_logging(cli: &Cli) {
    let log_level = if cli.quiet {
        "error"
    } else if cli.verbose {
        "debug"
    } else {
        "warn"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("declgraph={}", log_level).into()),
        )
        .without_time()
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn print_or_exit(output: Option<String>, identifier: &str, file: &str) {
    match output {
        Some(output) => println!("{}", output),
        None => {
            eprintln!("could not resolve `{}` from {}", identifier, file);
            std::process::exit(1);
        }
    }
}

fn build_discovery_config(cli: &Cli, config: &AnalyzerConfig) -> DiscoveryConfig {
    let mut discovery = DiscoveryConfig::from(&config.discovery);
    discovery.include.extend(cli.include.iter().cloned());
    discovery.exclude.extend(cli.exclude.iter().cloned());
    discovery
}
