use std::io::Read;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use tracing::{error, info};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use repo_query::config::{QueryConfig, config_path, data_dir, log_path};
use repo_query::search::controller::{SearchController, SearchOutcome, process};
use repo_query::search::provider::{HttpSearchProvider, SearchRequest};
use repo_query::search::render::{render_groups, render_json, render_text};
use repo_query::search::types::RawSearchResultSet;
use repo_query::version::ordering::SortMode;

/// Environment variable holding the log filter (e.g. `debug`)
const LOG_ENV: &str = "REPO_QUERY_LOG";

#[derive(Parser)]
#[command(name = "repo-query")]
#[command(version, about = "Query package repositories and rank every known version")]
struct Cli {
    /// Config file [default: $XDG_CONFIG_HOME/repo-query/config.json]
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Write the log file as JSON lines
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Search a package across repositories
    Search {
        /// Package name
        package: String,

        /// Limit the search to one repository id
        #[arg(long)]
        repo: Option<String>,

        /// Base URL of the search provider
        #[arg(long, env = "REPO_QUERY_URL")]
        url: Option<String>,

        #[command(flatten)]
        output: OutputArgs,
    },
    /// Rank a saved search response (reads stdin when FILE is omitted or `-`)
    Rank {
        file: Option<PathBuf>,

        #[command(flatten)]
        output: OutputArgs,
    },
    /// List the configured repository ids
    Repos,
}

#[derive(Args)]
struct OutputArgs {
    /// Version ordering [default: from config, else legacy]
    #[arg(long, value_enum)]
    sort: Option<SortMode>,

    /// Print JSON instead of text
    #[arg(long)]
    json: bool,

    /// Print one block per package name
    #[arg(long, conflicts_with = "json")]
    group: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let _guard = init_logging(cli.log_json);

    let config_file = cli.config.unwrap_or_else(config_path);
    let config = QueryConfig::load(&config_file)?;

    match cli.command {
        Command::Search {
            package,
            repo,
            url,
            output,
        } => {
            let request = SearchRequest::new(&package, repo.as_deref())?;
            let base_url = url.unwrap_or_else(|| config.server.base_url.clone());
            let provider = HttpSearchProvider::new(
                &base_url,
                Duration::from_millis(config.server.timeout_ms),
            );
            let controller = SearchController::new(
                Arc::new(provider),
                output.sort.unwrap_or(config.ranking.sort_mode),
            )
            .with_repositories(config.repositories.clone());

            let outcome = tokio::runtime::Builder::new_multi_thread()
                .enable_all()
                .build()?
                .block_on(controller.search(request))
                .inspect_err(|e| error!("Search against {} failed: {}", base_url, e))
                .context("Search failed")?;

            print_outcome(&outcome, &output)
        }
        Command::Rank { file, output } => {
            let content = read_input(file.as_ref())?;
            let raw: RawSearchResultSet =
                serde_json::from_str(&content).context("Failed to parse search response")?;
            let outcome = process(raw, output.sort.unwrap_or(config.ranking.sort_mode));

            print_outcome(&outcome, &output)
        }
        Command::Repos => {
            for repo in &config.repositories {
                println!("{}", repo);
            }
            Ok(())
        }
    }
}

fn print_outcome(outcome: &SearchOutcome, output: &OutputArgs) -> anyhow::Result<()> {
    let rendered = if output.json {
        let mut json = render_json(outcome)?;
        json.push('\n');
        json
    } else if output.group {
        render_groups(outcome)
    } else {
        render_text(outcome)
    };
    print!("{}", rendered);
    Ok(())
}

fn read_input(file: Option<&PathBuf>) -> anyhow::Result<String> {
    match file {
        Some(path) if path.as_os_str() != "-" => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display())),
        _ => {
            let mut content = String::new();
            std::io::stdin()
                .read_to_string(&mut content)
                .context("Failed to read stdin")?;
            Ok(content)
        }
    }
}

/// Log to a file in the data directory so stdout only carries results
fn init_logging(json: bool) -> Option<WorkerGuard> {
    let dir = data_dir();
    if let Err(e) = std::fs::create_dir_all(&dir) {
        eprintln!("Failed to create data directory {:?}: {}", dir, e);
        return None;
    }

    let appender = tracing_appender::rolling::never(&dir, "repo-query.log");
    let (writer, guard) = tracing_appender::non_blocking(appender);
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }

    info!("Logging to {:?}", log_path());
    Some(guard)
}
