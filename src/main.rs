//! DogTable CLI
//!
//! Launches the searchable dog image table as a window, a terminal UI, or a
//! one-shot listing on stdout.

use clap::{Parser, Subcommand};
use console::style;
use dogtable::logging::{self, LogTarget, Verbosity};
use dogtable::{catalog, AppConfig, DogApiClient, DogView, LoadState, DEFAULT_ENDPOINT};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

/// How long `list` waits for the API when no timeout is configured
const LIST_WAIT: Duration = Duration::from_secs(120);

/// DogTable - browse The Dog API by breed
///
/// Fetches one page of breed-tagged dog images and filters them by breed name.
#[derive(Parser)]
#[command(name = "dogtable")]
#[command(author = "DogTable Contributors")]
#[command(version)]
#[command(about = "Searchable table of dog images", long_about = None)]
struct Cli {
    /// API key sent as the x-api-key header
    #[arg(long, env = "DOG_API_KEY", hide_env_values = true, global = true)]
    api_key: Option<String>,

    /// Image search endpoint
    #[arg(long, env = "DOG_API_ENDPOINT", default_value = DEFAULT_ENDPOINT, global = true)]
    endpoint: String,

    /// Request timeout in seconds (no timeout by default)
    #[arg(long, global = true)]
    timeout_secs: Option<u64>,

    /// Log file for the interactive modes (default: dogtable.log in the temp dir)
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    /// Only log errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Log debug detail
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Open the table in a window (default)
    Gui,

    /// Show the table in the terminal
    Tui,

    /// Fetch once and print the matching rows
    List {
        /// Breed substring to filter by (case-insensitive)
        #[arg(short = 'b', long, default_value = "", allow_hyphen_values = true)]
        query: String,

        /// Print the matching records as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("{} {}", style("Error:").red().bold(), e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> dogtable::Result<()> {
    let verbosity = Verbosity::from_flags(cli.quiet, cli.verbose);
    let command = cli.command.unwrap_or(Commands::Gui);

    let target = match command {
        Commands::List { .. } => LogTarget::Stderr,
        _ => LogTarget::File(cli.log_file.unwrap_or_else(logging::default_log_path)),
    };
    logging::init(target, verbosity);
    tracing::info!(version = dogtable::VERSION, "dogtable starting up");

    let config = AppConfig::default()
        .with_endpoint(cli.endpoint)
        .with_api_key(cli.api_key)
        .with_timeout(cli.timeout_secs.map(Duration::from_secs));
    let wait = config.timeout.map_or(LIST_WAIT, |t| t + Duration::from_secs(5));
    let view = DogView::new(Arc::new(DogApiClient::new(config)?));

    match command {
        Commands::Gui => dogtable::gui::run(view),
        Commands::Tui => dogtable::tui::run(view),
        Commands::List { query, json } => cmd_list(view, query, json, wait),
    }
}

fn cmd_list(mut view: DogView, query: String, json: bool, wait: Duration) -> dogtable::Result<()> {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message("Fetching dog images...");
    spinner.enable_steady_tick(Duration::from_millis(100));

    view.mount();
    let settled = view.wait_for_load(wait);
    spinner.finish_and_clear();

    if !settled {
        eprintln!(
            "{} no response after {}s; showing an empty table",
            style("Warning:").yellow().bold(),
            wait.as_secs()
        );
    } else if let LoadState::Failed(reason) = view.state() {
        eprintln!(
            "{} could not load images: {}",
            style("Warning:").yellow().bold(),
            reason
        );
    }

    view.set_query(query);

    if json {
        println!("{}", serde_json::to_string_pretty(&view.filtered())?);
        return Ok(());
    }

    let rows = view.rows();
    let [breed_header, image_header] = dogtable::COLUMN_HEADERS;
    println!("{}", style(dogtable::TITLE).bold().underlined());
    println!(
        "{:<28} {}",
        style(breed_header).bold(),
        style(image_header).bold()
    );
    for row in &rows {
        let breed = if row.breed == catalog::UNKNOWN_BREED {
            style(row.breed).dim().italic()
        } else {
            style(row.breed).cyan()
        };
        println!("{:<28} {}", breed, row.image_url);
    }
    println!(
        "\n{} of {} dogs",
        style(rows.len()).green(),
        view.records().len()
    );

    Ok(())
}
