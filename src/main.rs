use anyhow::Context;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use comfy_table::{Cell, CellAlignment, Table, presets::UTF8_FULL};
use comparison::{Comparator, parse_tickers};
use configuration::ServerOverrides;
use core_types::ComparisonResult;
use market_data::YahooClient;
use std::path::PathBuf;
use std::sync::Arc;

/// The main entry point for the StockPulse application.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A .env file is optional; it only supplies STOCKPULSE__* overrides.
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let mut config = configuration::load_config(&cli.config)
        .with_context(|| format!("loading configuration from {}", cli.config.display()))?;
    let _log_guard = configuration::init_tracing(&config.logging)?;

    let client = YahooClient::new(&config.market_data).context("building market data client")?;

    match cli.command {
        Commands::Serve(args) => {
            args.server.apply(&mut config.server);
            let comparator = Comparator::from_config(Arc::new(client), &config);
            web_server::run_server(config.server.socket_addr(), comparator).await?;
        }
        Commands::Compare(args) => {
            let comparator = Comparator::from_config(Arc::new(client), &config);
            handle_compare(args, &comparator).await?;
        }
    }

    Ok(())
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// Compare the performance of stock tickers over a date range.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path of the TOML configuration file. A missing file means defaults.
    #[arg(long, global = true, default_value = "config.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the comparison API over HTTP.
    Serve(ServeArgs),
    /// Run one comparison and print the summary statistics.
    Compare(CompareArgs),
}

#[derive(Parser)]
struct ServeArgs {
    #[command(flatten)]
    server: ServerOverrides,
}

#[derive(Parser)]
struct CompareArgs {
    /// Comma-separated symbols (e.g., "AAPL,MSFT,GOOG").
    #[arg(long)]
    tickers: String,

    /// The first date of the range (format: YYYY-MM-DD).
    #[arg(long)]
    from: NaiveDate,

    /// The last date of the range (format: YYYY-MM-DD).
    #[arg(long)]
    to: NaiveDate,

    /// Print the full result, including normalized series, as JSON.
    #[arg(long)]
    json: bool,
}

// ==============================================================================
// Compare Command Logic
// ==============================================================================

async fn handle_compare(args: CompareArgs, comparator: &Comparator) -> anyhow::Result<()> {
    let tickers = parse_tickers(&args.tickers);
    let result = comparator.compare(&tickers, args.from, args.to).await;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    println!(
        "Stock Performance Comparison ({} to {})",
        result.start_date, result.end_date
    );
    println!("{}", stats_table(&result));

    let missing = result.missing_tickers();
    if !missing.is_empty() {
        let names: Vec<_> = missing.iter().map(|t| t.as_str()).collect();
        println!("No data for: {}", names.join(", "));
    }

    Ok(())
}

/// Renders the summary statistics as a table, one row per ticker with data.
fn stats_table(result: &ComparisonResult) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL).set_header(vec![
        "Ticker",
        "Total Change",
        "Total Percent Change (%)",
        "Average Daily Change (%)",
        "Standard Deviation of Daily Change (%)",
    ]);

    for stats in &result.summary_stats {
        let number = |value: rust_decimal::Decimal| {
            Cell::new(format!("{:.2}", value)).set_alignment(CellAlignment::Right)
        };
        table.add_row(vec![
            Cell::new(stats.ticker.as_str()),
            number(stats.total_change),
            number(stats.total_percent_change),
            number(stats.avg_daily_change_percent),
            number(stats.std_daily_change_percent),
        ]);
    }

    table
}
