//! `cff`: command line front end for the cognitive fortress.
//!
//! Usage:
//!   cff demo
//!   cff analyze "Act now, limited time!"
//!   echo "studies show" | cff analyze --json
//!   cff analyze --module bias_detection "Most people agree"
//!   cff analyze --input-json '["free gift", 3]'
//!   cff train
//!   cff config --module awareness

use anyhow::Result;
use clap::{Parser, Subcommand};
use cognitive_fortress::defense::DefenseResults;
use cognitive_fortress::report::{format_report, overall_confidence};
use cognitive_fortress::training::cognitive_defense_basics;
use cognitive_fortress::{CognitiveFortressError, Config, InputValue, standard_fortress};
use prettytable::{Table, row};
use serde_json::Value;
use std::io::Read;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

const DEMO_INPUTS: &[&str] = &[
    "URGENT: Limited time offer! Act now before it's too late!",
    "According to leading experts, this is the best solution available.",
    "This is a factual statement without manipulation.",
];

#[derive(Parser)]
#[command(name = "cff")]
#[command(about = "Screen text for manipulation triggers and cognitive biases", long_about = None)]
struct Cli {
    /// TOML configuration file (overrides CFF_CONFIG)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the sample inputs through every module
    Demo,
    /// Analyze TEXT, or stdin when TEXT is omitted
    Analyze {
        text: Option<String>,
        /// Print results as JSON instead of text reports
        #[arg(long)]
        json: bool,
        /// Only show this module's result
        #[arg(long)]
        module: Option<String>,
        /// Parse the input as JSON: a string, number, bool, array of scalars or null
        #[arg(long)]
        input_json: bool,
    },
    /// Print the Cognitive Defense Basics course
    Train,
    /// Show the flattened configuration as JSON
    Config {
        #[arg(long)]
        module: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = Config::load_from(cli.config.as_deref()).map_err(|e| {
        eprintln!("Failed to load configuration: {}", e);
        e
    })?;
    init_logging(&config);

    match cli.command {
        Commands::Demo => demo(&config),
        Commands::Analyze {
            text,
            json,
            module,
            input_json,
        } => analyze(&config, text, json, module, input_json),
        Commands::Train => {
            println!("{}", cognitive_defense_basics().start());
            Ok(())
        }
        Commands::Config { module } => {
            let flat = config.flattened(module.as_deref())?;
            println!("{}", serde_json::to_string_pretty(&flat)?);
            Ok(())
        }
    }
}

/// RUST_LOG wins; otherwise `framework.log_level`. Nothing is installed when
/// logging is disabled in the configuration.
fn init_logging(config: &Config) {
    if !config.framework.enable_logging {
        return;
    }
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.framework.log_directive()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();
}

fn demo(config: &Config) -> Result<()> {
    println!("Initializing Cognitive Fortress...");
    let mut fortress = standard_fortress(config);

    println!("\nAnalyzing inputs with Cognitive Fortress...\n");
    for (i, text) in DEMO_INPUTS.iter().enumerate() {
        println!("Input {}: {}", i + 1, text);
        let results = fortress.apply_defenses(&InputValue::from(*text));
        print_reports(&results)?;
        print_summary(&results);
        println!("\n{}\n", "-".repeat(50));
    }

    fortress.deactivate();
    println!("Cognitive Fortress deactivated.");
    Ok(())
}

fn analyze(
    config: &Config,
    text: Option<String>,
    json: bool,
    module: Option<String>,
    input_json: bool,
) -> Result<()> {
    let text = match text {
        Some(text) => text,
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            buf.trim_end_matches(['\r', '\n']).to_string()
        }
    };
    let input = if input_json {
        InputValue::from_json_str(&text)?
    } else {
        InputValue::from(text)
    };
    if !input.is_meaningful() {
        info!("Analyzing blank input");
    }

    let fortress = standard_fortress(config);
    if let Some(name) = module.as_deref() {
        if fortress.module(name).is_none() {
            return Err(CognitiveFortressError::InvalidModule {
                name: name.to_string(),
            }
            .into());
        }
    }
    let results = fortress.apply_defenses(&input);

    if json {
        let value = serde_json::to_value(&results)?;
        let out = match module.as_deref() {
            Some(name) => value.get(name).cloned().unwrap_or(Value::Null),
            None => value,
        };
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    match module.as_deref() {
        Some(name) => {
            if let Some(outcome) = results.get(name) {
                println!("{}", format_report(&serde_json::to_value(outcome)?));
            }
        }
        None => {
            print_reports(&results)?;
            print_summary(&results);
        }
    }
    Ok(())
}

fn print_reports(results: &DefenseResults) -> Result<()> {
    for (name, outcome) in results.iter() {
        println!("\n[{} REPORT]", name.to_uppercase());
        println!("{}", format_report(&serde_json::to_value(outcome)?));
    }
    Ok(())
}

fn print_summary(results: &DefenseResults) {
    let mut table = Table::new();
    table.add_row(row!["Module", "Score", "Hits", "Status"]);
    for (name, outcome) in results.iter() {
        match outcome.result() {
            Some(result) => {
                let score = result
                    .score()
                    .map(|s| s.to_string())
                    .unwrap_or_else(|| "-".to_string());
                let hits = result.hits().len();
                table.add_row(row![name, score, hits, "ok"]);
            }
            None => {
                let error = outcome.error().unwrap_or("failed");
                table.add_row(row![name, "-", "-", error]);
            }
        }
    }
    println!();
    table.printstd();
    println!("Overall confidence: {:.1}", overall_confidence(results));
}
