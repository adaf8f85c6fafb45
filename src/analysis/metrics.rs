use crate::config;

/// Finite entries of a slice; missing (NaN) and infinite values are skipped
fn finite(data: &[f64]) -> Vec<f64> {
    data.iter().copied().filter(|x| x.is_finite()).collect()
}

/// Compute the mean of a slice, skipping missing values
fn mean(data: &[f64]) -> f64 {
    let data = finite(data);
    if data.is_empty() {
        return 0.0;
    }
    data.iter().sum::<f64>() / data.len() as f64
}

/// Compute the standard deviation (population) of a slice, skipping missing values
fn std_dev(data: &[f64]) -> f64 {
    let data = finite(data);
    if data.len() < 2 {
        return 0.0;
    }
    let m = mean(&data);
    let variance = data.iter().map(|x| (x - m).powi(2)).sum::<f64>() / data.len() as f64;
    variance.sqrt()
}

/// Headline risk/return figures shown in the metric cards
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PortfolioMetrics {
    pub annualized_return: f64,
    pub annualized_volatility: f64,
    pub return_risk_ratio: f64,
}

pub fn annualized_return(daily_returns: &[f64]) -> f64 {
    mean(daily_returns) * config::TRADING_DAYS_PER_YEAR
}

pub fn annualized_volatility(daily_returns: &[f64]) -> f64 {
    std_dev(daily_returns) * config::TRADING_DAYS_PER_YEAR.sqrt()
}

/// Return divided by volatility; 0.0 when volatility is exactly zero
pub fn return_risk_ratio(annual_return: f64, annual_vol: f64) -> f64 {
    if annual_vol == 0.0 {
        0.0
    } else {
        annual_return / annual_vol
    }
}

pub fn compute_metrics(daily_returns: &[f64]) -> PortfolioMetrics {
    let annualized_return = annualized_return(daily_returns);
    let annualized_volatility = annualized_volatility(daily_returns);
    PortfolioMetrics {
        annualized_return,
        annualized_volatility,
        return_risk_ratio: return_risk_ratio(annualized_return, annualized_volatility),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn repeated_pattern() -> Vec<f64> {
        [0.01, -0.01, 0.02].iter().copied().cycle().take(252).collect()
    }

    #[test]
    fn test_annualized_return_matches_direct_arithmetic() {
        let returns = repeated_pattern();
        let direct = returns.iter().sum::<f64>() / returns.len() as f64 * 252.0;
        let m = compute_metrics(&returns);
        assert!((m.annualized_return - direct).abs() < 1e-12);
        // pattern mean is 0.02 / 3
        assert!((m.annualized_return - 252.0 * 0.02 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_volatility_is_population_std() {
        let returns = repeated_pattern();
        let m = mean(&returns);
        let var = returns.iter().map(|r| (r - m).powi(2)).sum::<f64>() / returns.len() as f64;
        let vol = annualized_volatility(&returns);
        assert!((vol - var.sqrt() * 252f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_zero_volatility_ratio_is_zero() {
        let flat = vec![0.25; 100];
        let m = compute_metrics(&flat);
        assert_eq!(m.annualized_volatility, 0.0);
        assert_eq!(m.return_risk_ratio, 0.0);
        assert!(m.return_risk_ratio.is_finite());
    }

    #[test]
    fn test_ratio() {
        assert!((return_risk_ratio(0.10, 0.20) - 0.5).abs() < 1e-12);
        assert_eq!(return_risk_ratio(0.10, 0.0), 0.0);
    }

    #[test]
    fn test_missing_returns_are_skipped() {
        let with_gaps = [f64::NAN, 0.01, f64::INFINITY, 0.03, f64::NAN];
        let m = compute_metrics(&with_gaps);
        assert_eq!(m, compute_metrics(&[0.01, 0.03]));
        assert!((m.annualized_return - 0.02 * 252.0).abs() < 1e-9);
        assert!(m.return_risk_ratio.is_finite());
    }

    #[test]
    fn test_all_missing_returns() {
        assert_eq!(compute_metrics(&[f64::NAN, f64::NAN]), PortfolioMetrics::default());
    }

    #[test]
    fn test_empty_returns() {
        assert_eq!(compute_metrics(&[]), PortfolioMetrics::default());
    }
}
