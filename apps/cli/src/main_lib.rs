use anyhow::Context;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use finvault_core::constants::DISPLAY_DECIMAL_PRECISION;
use finvault_core::utils::time_utils::valuation_date_today;
use finvault_core::{
    parse_purchase_and_sale_summary, FuturesSummary, PortfolioInput, PortfolioService,
    PortfolioServiceTrait, QuoteSnapshot,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::{Config, LogFormat};

#[derive(Parser)]
#[command(name = "finvault")]
#[command(about = "Value a portfolio from its transaction history and a quote snapshot")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print holdings, per-class totals and warnings as JSON
    Summary {
        /// Portfolio file (records, quotes and an optional asOf date)
        file: PathBuf,
        /// Valuation date, overriding the file and FV_AS_OF_DATE
        #[arg(long)]
        as_of: Option<NaiveDate>,
    },

    /// Print only the per-instrument holdings as JSON
    Holdings {
        file: PathBuf,
        #[arg(long)]
        as_of: Option<NaiveDate>,
    },

    /// Preview the futures round trips found in a statement's text
    Futures {
        /// Statement exported to plain text
        statement: PathBuf,
        /// Print rows as JSON instead of a table
        #[arg(long)]
        json: bool,
    },
}

pub fn init_tracing(log_format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    match log_format {
        LogFormat::Json => registry
            .with(fmt::layer().json().with_current_span(false).with_writer(std::io::stderr))
            .init(),
        LogFormat::Text => registry
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_line_number(true)
                    .with_writer(std::io::stderr),
            )
            .init(),
    }
}

/// Fields of a portfolio file that sit next to the records.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct PortfolioFileHeader {
    as_of: Option<NaiveDate>,
    quotes: QuoteSnapshot,
}

/// A portfolio file: the records plus the quotes to value them against.
#[derive(Debug)]
pub struct PortfolioFile {
    pub as_of: Option<NaiveDate>,
    pub quotes: QuoteSnapshot,
    pub input: PortfolioInput,
}

impl PortfolioFile {
    pub fn from_json(contents: &str) -> anyhow::Result<Self> {
        let value: serde_json::Value =
            serde_json::from_str(contents).context("Portfolio file is not valid JSON")?;
        let header: PortfolioFileHeader = serde_json::from_value(value.clone())
            .context("Invalid asOf or quotes in portfolio file")?;
        let input: PortfolioInput =
            serde_json::from_value(value).context("Invalid records in portfolio file")?;
        Ok(Self {
            as_of: header.as_of,
            quotes: header.quotes,
            input,
        })
    }

    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::from_json(&contents).with_context(|| format!("Failed to load {}", path.display()))
    }
}

/// Valuation date: command-line flag, then the file, then the environment,
/// then today in the valuation timezone.
pub fn resolve_as_of(
    flag: Option<NaiveDate>,
    file: Option<NaiveDate>,
    config: &Config,
) -> NaiveDate {
    flag.or(file)
        .or(config.as_of)
        .unwrap_or_else(valuation_date_today)
}

pub fn run(cli: Cli, config: &Config) -> anyhow::Result<()> {
    match cli.command {
        Commands::Summary { file, as_of } => {
            let summary = summarize(&file, as_of, config)?;
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
        Commands::Holdings { file, as_of } => {
            let summary = summarize(&file, as_of, config)?;
            println!("{}", serde_json::to_string_pretty(&summary.holdings)?);
        }
        Commands::Futures { statement, json } => {
            let text = std::fs::read_to_string(&statement)
                .with_context(|| format!("Failed to read {}", statement.display()))?;
            let rows = parse_purchase_and_sale_summary(&text)
                .with_context(|| format!("Failed to parse {}", statement.display()))?;
            tracing::info!("{} summary rows found in {}", rows.len(), statement.display());
            if json {
                println!("{}", serde_json::to_string_pretty(&rows)?);
            } else {
                print!("{}", render_futures_table(&rows));
            }
        }
    }
    Ok(())
}

fn summarize(
    path: &Path,
    as_of: Option<NaiveDate>,
    config: &Config,
) -> anyhow::Result<finvault_core::PortfolioSummary> {
    let file = PortfolioFile::load(path)?;
    let as_of = resolve_as_of(as_of, file.as_of, config);
    let service = PortfolioService::new(config.engine_config()?);

    let summary = service.build_summary(&file.input, &file.quotes, as_of)?;
    tracing::info!(
        "Valued {} holdings as of {}: market value {}, {} warnings",
        summary.holdings.len(),
        summary.as_of,
        summary.totals.market_value,
        summary.warnings.len()
    );
    Ok(summary)
}

/// Fixed-width preview of statement rows, ordered by date then ticker.
pub fn render_futures_table(rows: &[FuturesSummary]) -> String {
    let mut sorted: Vec<&FuturesSummary> = rows.iter().collect();
    sorted.sort_by(|a, b| (a.trade_date, &a.ticker).cmp(&(b.trade_date, &b.ticker)));

    let precision = DISPLAY_DECIMAL_PRECISION as usize;
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<12} {:<6} {:>5} {:<10} {:>12}",
        "Date", "Ticker", "Qty", "Contract", "Gross P&L"
    );
    let _ = writeln!(out, "{}", "-".repeat(52));
    for row in &sorted {
        let _ = writeln!(
            out,
            "{:<12} {:<6} {:>5} {:<10} {:>12.*}",
            row.trade_date.to_string(),
            row.ticker,
            row.quantity,
            row.contract_month,
            precision,
            row.gross_pl
        );
    }
    let total: Decimal = rows.iter().map(|r| r.gross_pl).sum();
    let _ = writeln!(out, "{}", "-".repeat(52));
    let _ = writeln!(out, "{:<36} {:>12.*}", "Total", precision, total);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use finvault_core::PriceSource;
    use rust_decimal_macros::dec;

    const PORTFOLIO: &str = r#"{
        "asOf": "2024-03-14",
        "quotes": {
            "ACME": { "spotPrice": 110, "previousClose": 105 }
        },
        "equity": [
            { "ticker": "ACME", "side": "BUY", "date": "2024-01-02", "quantity": 10, "price": 100, "fees": 5 },
            { "ticker": "ACME", "side": "SELL", "date": "2024-02-01", "quantity": 4, "price": 120, "fees": 2 }
        ],
        "manualAssets": [ { "name": "Car", "value": 15000, "cost": 18000 } ]
    }"#;

    fn config() -> Config {
        Config {
            quote_currency: "USD".to_string(),
            as_of: NaiveDate::from_ymd_opt(2020, 1, 1),
            log_format: LogFormat::Text,
        }
    }

    #[test]
    fn parses_a_portfolio_file() {
        let file = PortfolioFile::from_json(PORTFOLIO).unwrap();
        assert_eq!(file.as_of, NaiveDate::from_ymd_opt(2024, 3, 14));
        assert_eq!(file.quotes.len(), 1);
        assert_eq!(file.input.equity.len(), 2);
        assert_eq!(file.input.manual_assets.len(), 1);
    }

    #[test]
    fn summarizes_a_portfolio_file() {
        let file = PortfolioFile::from_json(PORTFOLIO).unwrap();
        let as_of = resolve_as_of(None, file.as_of, &config());
        let summary = PortfolioService::new(config().engine_config().unwrap())
            .build_summary(&file.input, &file.quotes, as_of)
            .unwrap();

        let acme = summary.holding("ACME").unwrap();
        assert_eq!(acme.price_source, PriceSource::Market);
        assert_eq!(acme.market_value, dec!(660));
        assert_eq!(summary.totals.market_value, dec!(15660));
        assert_eq!(summary.totals.unrealized_gain, dec!(57) - dec!(3000));
    }

    #[test]
    fn flag_date_wins_over_file_and_environment() {
        let flag = NaiveDate::from_ymd_opt(2025, 1, 1);
        let file = NaiveDate::from_ymd_opt(2024, 3, 14);
        assert_eq!(resolve_as_of(flag, file, &config()), flag.unwrap());
        assert_eq!(resolve_as_of(None, file, &config()), file.unwrap());
        assert_eq!(
            resolve_as_of(None, None, &config()),
            NaiveDate::from_ymd_opt(2020, 1, 1).unwrap()
        );
    }

    #[test]
    fn rejects_malformed_files() {
        assert!(PortfolioFile::from_json("not json").is_err());
        assert!(PortfolioFile::from_json(r#"{"asOf": "yesterday"}"#).is_err());
    }

    #[test]
    fn futures_table_is_sorted_and_totaled() {
        let row = |ticker: &str, day: u32, gross_pl: Decimal| FuturesSummary {
            ticker: ticker.to_string(),
            contract_month: "Mar25".to_string(),
            trade_date: NaiveDate::from_ymd_opt(2025, 2, day).unwrap(),
            quantity: 1,
            gross_pl,
        };
        let table = render_futures_table(&[
            row("MNQ", 14, dec!(-80)),
            row("MES", 3, dec!(125.5)),
        ]);
        let lines: Vec<&str> = table.lines().collect();

        assert!(lines[0].starts_with("Date"));
        assert!(lines[2].starts_with("2025-02-03   MES"));
        assert!(lines[2].ends_with("125.50"));
        assert!(lines[3].contains("MNQ"));
        assert!(lines[3].ends_with("-80.00"));
        assert!(lines[5].starts_with("Total"));
        assert!(lines[5].ends_with("45.50"));
    }
}
