//! CLI binary for querylens.

use clap::{Parser, Subcommand};
use querylens::analysis::report::to_csv;
use querylens::{AppConfig, Pipeline, PipelineOutcome};
use querylens_search::{DEFAULT_MAX_RESULTS, Fetcher};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// QueryLens: search the web and analyse the results.
#[derive(Parser)]
#[command(name = "querylens", version, about)]
struct Cli {
    /// Path to TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Subcommand to run.
    #[command(subcommand)]
    command: Option<Command>,
}

/// Available commands.
#[derive(Subcommand)]
enum Command {
    /// Serve the browser UI.
    Serve {
        /// Address to bind, overriding `server.host` and `server.port`.
        #[arg(long)]
        bind: Option<String>,
    },

    /// Search, analyse and print the report.
    Search {
        /// Search query.
        query: String,

        /// Maximum number of results (5 to 20).
        #[arg(long, default_value_t = DEFAULT_MAX_RESULTS)]
        max_results: usize,

        /// Print the full outcome as JSON.
        #[arg(long)]
        json: bool,

        /// Also write the report as CSV to this path.
        #[arg(long)]
        csv: Option<PathBuf>,
    },

    /// Fetch a page and print its visible text.
    Fetch {
        /// Page URL.
        url: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("querylens=info,querylens_search=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = AppConfig::load(cli.config.as_deref())?;

    match cli.command.unwrap_or(Command::Serve { bind: None }) {
        Command::Serve { bind } => run_serve(config, bind).await,
        Command::Search {
            query,
            max_results,
            json,
            csv,
        } => run_search(config, &query, max_results, json, csv).await,
        Command::Fetch { url } => run_fetch(config, &url).await,
    }
}

async fn run_serve(config: AppConfig, bind: Option<String>) -> anyhow::Result<()> {
    let addr = bind.unwrap_or_else(|| config.server.bind_addr());
    let pipeline = Pipeline::from_config(&config)?;
    info!("QueryLens v{}", env!("CARGO_PKG_VERSION"));
    querylens::presenter::serve(&addr, pipeline).await?;
    Ok(())
}

async fn run_search(
    config: AppConfig,
    query: &str,
    max_results: usize,
    json: bool,
    csv: Option<PathBuf>,
) -> anyhow::Result<()> {
    let pipeline = Pipeline::from_config(&config)?;
    let output = match pipeline.run(query, max_results).await {
        PipelineOutcome::EmptyQuery => anyhow::bail!("Please enter a search query."),
        PipelineOutcome::NoResults { .. } => {
            anyhow::bail!("No results found. Please try a different search query.")
        }
        PipelineOutcome::Complete(output) => output,
    };

    if let Some(path) = csv {
        std::fs::write(&path, to_csv(&output.report)?)?;
        info!("report written to {}", path.display());
    }

    if json {
        let value = serde_json::json!({
            "query": output.query,
            "max_results": output.max_results,
            "results": output.results.as_slice(),
            "analysis": output.analysis,
            "report": output.report,
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    for (i, result) in output.results.iter().enumerate() {
        println!("{}. {}\n   {}\n   {}", i + 1, result.title, result.url, result.snippet);
    }
    println!("\nSummary: {}\n", output.analysis.summary);
    for row in &output.report.rows {
        println!("{:<40} {}", row.metric, row.value);
    }
    Ok(())
}

async fn run_fetch(config: AppConfig, url: &str) -> anyhow::Result<()> {
    let fetcher = Fetcher::new(config.fetcher_config())?;
    println!("{}", fetcher.try_fetch_content(url).await?);
    Ok(())
}
