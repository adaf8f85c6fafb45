use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use std::io::Cursor;
use std::path::Path;

use crate::config;
use crate::data::models::{Holding, Portfolio, PortfolioData, PriceTable, SectorMap};
use serde::Deserialize;

/// A portfolio entry in `portfolios.json`: either explicit holdings or the
/// parallel `assets` / `weights` arrays emitted by the optimizer.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum PortfolioRecord {
    Holdings {
        name: String,
        holdings: Vec<Holding>,
    },
    Parallel {
        name: String,
        assets: Vec<String>,
        weights: Vec<f64>,
    },
}

impl PortfolioRecord {
    fn into_portfolio(self) -> Result<Portfolio> {
        match self {
            PortfolioRecord::Holdings { name, holdings } => Ok(Portfolio { name, holdings }),
            PortfolioRecord::Parallel {
                name,
                assets,
                weights,
            } => {
                let holdings = Holding::zip(weights.as_slice(), assets.as_slice())
                    .with_context(|| format!("Portfolio '{}'", name))?;
                Ok(Portfolio { name, holdings })
            }
        }
    }
}

/// Parse date from various formats (YYYY-MM-DD, M/D/YYYY, etc.)
fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .ok()
        .or_else(|| NaiveDate::parse_from_str(s.trim(), "%m/%d/%Y").ok())
        .or_else(|| NaiveDate::parse_from_str(s.trim(), "%m/%d/%y").ok())
}

/// Load every input file from `dir`.
///
/// `returns.csv` is optional: without it, daily simple returns are derived
/// from the price table.
pub fn load_portfolio_data(dir: &Path) -> Result<PortfolioData> {
    tracing::info!("Loading portfolio data from {}", dir.display());

    let portfolios = load_portfolios(&dir.join(config::PORTFOLIOS_FILE))?;
    let sector_map = load_sector_map(&dir.join(config::SECTORS_FILE))?;
    let prices_path = dir.join(config::PRICES_FILE);
    let prices = load_table(&prices_path, "price")?;
    check_prices(&prices)
        .with_context(|| format!("Invalid price table in {}", prices_path.display()))?;

    let returns_path = dir.join(config::RETURNS_FILE);
    let returns = if returns_path.exists() {
        load_table(&returns_path, "return")?
    } else {
        tracing::info!(
            "{} not found, deriving daily returns from prices",
            returns_path.display()
        );
        prices.simple_returns()
    };

    tracing::info!(
        "Loaded {} portfolios, {} sectors, {} price rows, {} return rows",
        portfolios.len(),
        sector_map.len(),
        prices.rows.len(),
        returns.rows.len()
    );

    Ok(PortfolioData {
        portfolios,
        sector_map,
        prices,
        returns,
        loaded_at: Some(chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string()),
    })
}

pub fn load_portfolios(path: &Path) -> Result<Vec<Portfolio>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    parse_portfolios(&text).with_context(|| format!("Invalid portfolios in {}", path.display()))
}

fn parse_portfolios(text: &str) -> Result<Vec<Portfolio>> {
    let records: Vec<PortfolioRecord> = serde_json::from_str(text)?;
    let portfolios = records
        .into_iter()
        .map(PortfolioRecord::into_portfolio)
        .collect::<Result<Vec<_>>>()?;
    for p in &portfolios {
        if let Some(h) = p.holdings.iter().find(|h| h.weight < 0.0 || !h.weight.is_finite()) {
            bail!("Portfolio '{}' has invalid weight {} for {}", p.name, h.weight, h.asset);
        }
        let total: f64 = p.holdings.iter().map(|h| h.weight).sum();
        if (total - 1.0).abs() > 1e-6 {
            tracing::debug!("Weights of '{}' sum to {:.6}", p.name, total);
        }
    }
    Ok(portfolios)
}

pub fn load_sector_map(path: &Path) -> Result<SectorMap> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let map: SectorMap = serde_json::from_str(&text)
        .with_context(|| format!("Invalid sector map in {}", path.display()))?;
    if map.is_empty() {
        tracing::warn!("Sector map in {} is empty", path.display());
    }
    Ok(map)
}

pub fn load_table(path: &Path, name: &str) -> Result<PriceTable> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    parse_table(&text, name).with_context(|| format!("Invalid {} table in {}", name, path.display()))
}

/// Prices feed both the value series and derived returns, so every cell must
/// be present and strictly positive.
fn check_prices(table: &PriceTable) -> Result<()> {
    for (date, row) in table.dates.iter().zip(&table.rows) {
        for (column, price) in table.columns.iter().zip(row) {
            if price.is_nan() {
                bail!("Missing price for {} on {}", column, date);
            }
            if *price <= 0.0 {
                bail!("Price of {} on {} must be positive, got {}", column, date, price);
            }
        }
    }
    Ok(())
}

/// Numeric cell; empty and `NaN` cells are missing values, infinities are rejected.
fn parse_cell(cell: &str) -> Result<f64> {
    if cell.is_empty() || cell.eq_ignore_ascii_case("nan") {
        return Ok(f64::NAN);
    }
    let value: f64 = cell.parse()?;
    if !value.is_finite() {
        bail!("non-finite value");
    }
    Ok(value)
}

/// Parse `Date,<asset>,<asset>,...` CSV into a table sorted by date.
fn parse_table(text: &str, name: &str) -> Result<PriceTable> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(Cursor::new(text));

    let headers = reader.headers().context("Missing CSV headers")?.clone();
    let date_idx = headers
        .iter()
        .position(|h| h.eq_ignore_ascii_case("Date"))
        .context("No Date column")?;
    let columns: Vec<String> = headers
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != date_idx)
        .map(|(_, h)| h.to_string())
        .collect();

    let mut records: Vec<(NaiveDate, Vec<f64>)> = Vec::new();
    for (line, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("Invalid CSV row {}", line + 2))?;
        let date_str = record.get(date_idx).unwrap_or("");
        let date = parse_date(date_str)
            .with_context(|| format!("Bad date '{}' on row {}", date_str, line + 2))?;

        let values = record
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != date_idx)
            .map(|(i, cell)| {
                parse_cell(cell).with_context(|| {
                    format!("Bad number '{}' in column {} on row {}", cell, &headers[i], line + 2)
                })
            })
            .collect::<Result<Vec<f64>>>()?;

        records.push((date, values));
    }

    records.sort_by_key(|(d, _)| *d);
    let (dates, rows): (Vec<NaiveDate>, Vec<Vec<f64>>) = records.into_iter().unzip();

    Ok(PriceTable {
        name: name.to_string(),
        dates,
        columns,
        rows,
    })
}
