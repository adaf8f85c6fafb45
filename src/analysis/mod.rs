pub mod allocation;
pub mod horizon;
pub mod metrics;
pub mod performance;

use crate::config;
use crate::data::models::{Portfolio, PortfolioData, Series};
use crate::error::PresentationError;

use allocation::Slice;
use metrics::PortfolioMetrics;

/// Everything the dashboard draws for one portfolio, derived from the full
/// history. Horizon filtering happens per frame on top of `value_series`.
#[derive(Debug, Clone)]
pub struct PortfolioView {
    pub name: String,
    pub metrics: PortfolioMetrics,
    pub value_series: Series,
    pub weight_rows: Vec<(String, String)>,
    pub asset_slices: Vec<Slice>,
    pub sector_slices: Vec<Slice>,
}

/// Compute metrics, value series and breakdowns for one portfolio.
pub fn build_portfolio_view(
    portfolio: &Portfolio,
    data: &PortfolioData,
) -> Result<PortfolioView, PresentationError> {
    let holdings = &portfolio.holdings;

    let returns = data.returns.dot(holdings)?;
    let value_series = data.prices.dot(holdings)?;
    if value_series.is_empty() {
        tracing::warn!("Price table has no rows for '{}'", portfolio.name);
    }
    tracing::debug!(
        "'{}': {} return points, {} value points",
        portfolio.name,
        returns.len(),
        value_series.len()
    );

    Ok(PortfolioView {
        name: portfolio.name.clone(),
        metrics: metrics::compute_metrics(&returns.values),
        value_series,
        weight_rows: allocation::weight_rows(holdings),
        asset_slices: allocation::asset_slices(holdings, config::WEIGHT_THRESHOLD),
        sector_slices: allocation::sector_slices(
            holdings,
            &data.sector_map,
            config::WEIGHT_THRESHOLD,
        )?,
    })
}
