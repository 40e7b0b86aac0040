//! larder: search recipe exports from the command line.
//!
//! Reads a JSON recipe export, evaluates a query written in the recipe
//! search language and prints the matching recipes with the evidence for
//! each match.

use clap::builder::RangedU64ValueParser;
use clap::{Parser, Subcommand, ValueEnum};
use larder_cli::output::{format_count, report_error, report_error_json, Status};
use larder_cli::render::{render_query_node, render_recipe_match};
use larder_core::config::{Config, OutputFormat};
use larder_search::{normalize, parse_query, search_recipes, RecipeMatch, SearchParams};
use larder_telemetry::{TelemetryConfig, Timer};
use serde::Serialize;
use std::io::IsTerminal;
use std::path::PathBuf;
use std::process::ExitCode;

mod catalog;

/// Search recipe exports
///
/// Options go before the query: every argument after the first query term is
/// part of the query, so negated terms like `-tag:spicy` need no escaping.
#[derive(Parser)]
#[command(name = "larder")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Path to a configuration file (defaults to .larder.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output format, overrides the configuration file
    #[arg(short, long, global = true, value_enum)]
    format: Option<FormatArg>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum FormatArg {
    Text,
    Json,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Text => OutputFormat::Text,
            FormatArg::Json => OutputFormat::Json,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Search a recipe export
    Search {
        /// JSON recipe export, or - for stdin
        file: PathBuf,

        /// Query terms, e.g. `soup -tag:spicy ingredient:"green beans"`.
        /// Options must come before the query.
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        query: Vec<String>,

        /// Drop archived recipes from the results
        #[arg(long, conflicts_with = "include_archived")]
        exclude_archived: bool,

        /// Keep archived recipes even if the configuration hides them
        #[arg(long)]
        include_archived: bool,

        /// Maximum number of results to print
        #[arg(short, long, value_parser = RangedU64ValueParser::<usize>::new().range(1..))]
        limit: Option<usize>,

        /// Print only the matching recipes, not the match evidence
        #[arg(long)]
        no_matches: bool,
    },

    /// Show how a query is parsed
    Parse {
        /// Query terms. Options must come before the query.
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        query: Vec<String>,
    },

    /// Show the normalized form search compares against
    Normalize {
        /// Text to normalize
        #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
        text: Vec<String>,
    },
}

#[derive(Serialize)]
struct SearchOutput<'a> {
    total: usize,
    recipes: &'a [RecipeMatch<'a>],
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let requested = cli.format.map(OutputFormat::from);

    let config = match Config::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(err) => return fail(&err, requested.unwrap_or_default()),
    };
    let format = requested.unwrap_or(config.schema.output.format);

    match run(cli, &config, format) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let err = err
                .downcast::<larder_core::Error>()
                .unwrap_or_else(|other| larder_core::Error::internal(format!("{:#}", other)));
            fail(&err, format)
        }
    }
}

/// Report an error in the requested format and map it to an exit code
fn fail(err: &larder_core::Error, format: OutputFormat) -> ExitCode {
    match format {
        OutputFormat::Json => report_error_json(err),
        OutputFormat::Text => report_error(err),
    }
    let code = err.code.exit_code();
    ExitCode::from(u8::try_from(code).unwrap_or(1))
}

fn run(cli: Cli, config: &Config, format: OutputFormat) -> anyhow::Result<()> {
    let logging = &config.schema.logging;
    larder_telemetry::init_with_config(TelemetryConfig {
        log_level: if cli.verbose {
            "debug".to_string()
        } else {
            logging.level.clone()
        },
        show_target: logging.show_target,
        json: logging.json,
    })?;
    tracing::debug!(config = ?config.path, "Using configuration");

    match cli.command {
        Commands::Search {
            file,
            query,
            exclude_archived,
            include_archived,
            limit,
            no_matches,
        } => {
            let recipes = catalog::load(&catalog::Source::from(file))?;
            let query = query.join(" ");
            let include_archived = if exclude_archived {
                false
            } else {
                include_archived || config.schema.search.include_archived
            };

            let timer = Timer::start("search");
            let params = SearchParams::new(&recipes, &query).include_archived(include_archived);
            let results = search_recipes(&params);
            timer.stop();

            let total = results.len();
            let shown = limit
                .or(config.schema.search.limit)
                .map_or(total, |n| n.min(total));
            let hits = &results.recipes[..shown];

            match format {
                OutputFormat::Json => {
                    let output = SearchOutput { total, recipes: hits };
                    println!("{}", serde_json::to_string_pretty(&output)?);
                }
                OutputFormat::Text => {
                    let show_matches = !no_matches && config.schema.output.show_matches;
                    let color = std::io::stdout().is_terminal();
                    for hit in hits {
                        println!("{}", render_recipe_match(hit, show_matches, color));
                    }
                    if shown < total {
                        Status::info(&format!(
                            "Showing {} of {}",
                            shown,
                            format_count(total, "matching recipe", "matching recipes")
                        ));
                    } else {
                        Status::info(&format_count(total, "matching recipe", "matching recipes"));
                    }
                }
            }
        }

        Commands::Parse { query } => {
            let nodes = parse_query(&query.join(" "));
            match format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&nodes)?),
                OutputFormat::Text => {
                    if nodes.is_empty() {
                        Status::info("Empty query, every recipe matches");
                    }
                    for node in &nodes {
                        println!("{:<24} {}", node.to_string(), render_query_node(node));
                    }
                }
            }
        }

        Commands::Normalize { text } => {
            let normalized = normalize(&text.join(" "));
            match format {
                OutputFormat::Json => println!("{}", serde_json::to_string(&normalized)?),
                OutputFormat::Text => println!("{}", normalized),
            }
        }
    }

    Ok(())
}
