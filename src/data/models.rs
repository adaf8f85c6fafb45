use std::collections::HashMap;

use chrono::NaiveDate;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::PresentationError;

/// One portfolio position: asset name and its weight fraction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Holding {
    pub asset: String,
    pub weight: f64,
}

impl Holding {
    pub fn new(asset: impl Into<String>, weight: f64) -> Self {
        Self {
            asset: asset.into(),
            weight,
        }
    }

    /// Pair a weight vector with its asset names, position by position.
    pub fn zip<S: AsRef<str>>(
        weights: &[f64],
        names: &[S],
    ) -> Result<Vec<Holding>, PresentationError> {
        if weights.len() != names.len() {
            return Err(PresentationError::LengthMismatch {
                weights: weights.len(),
                names: names.len(),
            });
        }
        Ok(weights
            .iter()
            .zip(names)
            .map(|(w, n)| Holding::new(n.as_ref(), *w))
            .collect())
    }
}

/// A named set of holdings as produced by the portfolio-construction step
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Portfolio {
    /// Portfolio type label, e.g. "Minimum Variance"
    pub name: String,
    pub holdings: Vec<Holding>,
}

/// Static grouping of companies into sectors, in the order the file lists them
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SectorMap {
    sectors: IndexMap<String, Vec<String>>,
}

impl SectorMap {
    pub fn new(sectors: IndexMap<String, Vec<String>>) -> Self {
        Self { sectors }
    }

    /// Company -> sector lookup. A company listed under several sectors keeps
    /// the last one listed.
    pub fn invert(&self) -> HashMap<&str, &str> {
        self.sectors
            .iter()
            .flat_map(|(sector, companies)| {
                companies
                    .iter()
                    .map(move |company| (company.as_str(), sector.as_str()))
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.sectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sectors.is_empty()
    }
}

/// Date-indexed numeric series
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Series {
    pub dates: Vec<NaiveDate>,
    pub values: Vec<f64>,
}

impl Series {
    pub fn new(dates: Vec<NaiveDate>, values: Vec<f64>) -> Self {
        Self { dates, values }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Points dated on or after `start`
    pub fn since(&self, start: NaiveDate) -> Series {
        let (dates, values): (Vec<NaiveDate>, Vec<f64>) = self
            .dates
            .iter()
            .zip(&self.values)
            .filter(|(d, _)| **d >= start)
            .map(|(d, v)| (*d, *v))
            .unzip();
        Series { dates, values }
    }
}

/// Date-indexed table with one column per asset (prices or daily returns)
#[derive(Debug, Clone, Default)]
pub struct PriceTable {
    /// Table label used in error messages ("price", "return")
    pub name: String,
    pub dates: Vec<NaiveDate>,
    pub columns: Vec<String>,
    /// rows[i][j] is the value of columns[j] at dates[i]
    pub rows: Vec<Vec<f64>>,
}

impl PriceTable {
    fn column_index(&self, asset: &str) -> Result<usize, PresentationError> {
        self.columns
            .iter()
            .position(|c| c == asset)
            .ok_or_else(|| PresentationError::MissingColumn {
                asset: asset.to_string(),
                table: self.name.clone(),
            })
    }

    /// Weighted sum of the holdings' columns for every date.
    pub fn dot(&self, holdings: &[Holding]) -> Result<Series, PresentationError> {
        let indexed: Vec<(usize, f64)> = holdings
            .iter()
            .map(|h| self.column_index(&h.asset).map(|j| (j, h.weight)))
            .collect::<Result<_, _>>()?;

        let values: Vec<f64> = self
            .rows
            .iter()
            .map(|row| indexed.iter().map(|(j, w)| row[*j] * w).sum::<f64>())
            .collect();

        Ok(Series::new(self.dates.clone(), values))
    }

    /// Daily simple returns `p[t] / p[t-1] - 1`, dated on `t`.
    /// A missing or non-positive previous price leaves the return missing (NaN).
    pub fn simple_returns(&self) -> PriceTable {
        let rows: Vec<Vec<f64>> = self
            .rows
            .windows(2)
            .map(|w| {
                w[1].iter()
                    .zip(&w[0])
                    .map(|(cur, prev)| {
                        if *prev > 0.0 {
                            cur / prev - 1.0
                        } else {
                            f64::NAN
                        }
                    })
                    .collect::<Vec<f64>>()
            })
            .collect();

        PriceTable {
            name: "return".to_string(),
            dates: self.dates.iter().skip(1).copied().collect(),
            columns: self.columns.clone(),
            rows,
        }
    }
}

/// All inputs needed to draw every portfolio page
#[derive(Debug, Clone, Default)]
pub struct PortfolioData {
    pub portfolios: Vec<Portfolio>,
    pub sector_map: SectorMap,
    pub prices: PriceTable,
    pub returns: PriceTable,
    pub loaded_at: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn table() -> PriceTable {
        PriceTable {
            name: "price".to_string(),
            dates: vec![date(2024, 1, 2), date(2024, 1, 3)],
            columns: vec!["A".into(), "B".into()],
            rows: vec![vec![100.0, 50.0], vec![110.0, 40.0]],
        }
    }

    #[test]
    fn test_zip_rejects_length_mismatch() {
        let err = Holding::zip(&[0.5, 0.5], &["A"]).unwrap_err();
        assert_eq!(err, PresentationError::LengthMismatch { weights: 2, names: 1 });
    }

    #[test]
    fn test_zip_keeps_order() {
        let holdings = Holding::zip(&[0.7, 0.3], &["B", "A"]).unwrap();
        assert_eq!(holdings, vec![Holding::new("B", 0.7), Holding::new("A", 0.3)]);
    }

    #[test]
    fn test_dot_weights_columns_by_name() {
        let holdings = vec![Holding::new("B", 0.5), Holding::new("A", 0.5)];
        let series = table().dot(&holdings).unwrap();
        assert_eq!(series.values, vec![75.0, 75.0]);
        assert_eq!(series.dates.len(), 2);
    }

    #[test]
    fn test_dot_missing_column() {
        let err = table().dot(&[Holding::new("Z", 1.0)]).unwrap_err();
        assert!(matches!(err, PresentationError::MissingColumn { ref asset, .. } if asset == "Z"));
    }

    #[test]
    fn test_simple_returns() {
        let returns = table().simple_returns();
        assert_eq!(returns.dates, vec![date(2024, 1, 3)]);
        assert!((returns.rows[0][0] - 0.10).abs() < 1e-12);
        assert!((returns.rows[0][1] + 0.20).abs() < 1e-12);
    }

    #[test]
    fn test_simple_returns_zero_price_is_missing() {
        let prices = PriceTable {
            name: "price".to_string(),
            dates: vec![date(2024, 1, 2), date(2024, 1, 3), date(2024, 1, 4)],
            columns: vec!["A".into()],
            rows: vec![vec![0.0], vec![1.0], vec![1.1]],
        };
        let returns = prices.simple_returns();
        assert!(returns.rows[0][0].is_nan());
        assert!((returns.rows[1][0] - 0.1).abs() < 1e-12);
    }

    #[test]
    fn test_invert_sector_map() {
        let mut sectors = IndexMap::new();
        sectors.insert("Tech".to_string(), vec!["A".to_string(), "B".to_string()]);
        sectors.insert("Energy".to_string(), vec!["C".to_string()]);
        let map = SectorMap::new(sectors);
        let lookup = map.invert();
        assert_eq!(lookup.get("A"), Some(&"Tech"));
        assert_eq!(lookup.get("C"), Some(&"Energy"));
        assert_eq!(lookup.get("D"), None);
    }

    #[test]
    fn test_duplicate_company_keeps_last_listed_sector() {
        let map: SectorMap = serde_json::from_str(r#"{"Tech": ["X"], "Energy": ["X"]}"#).unwrap();
        assert_eq!(map.invert().get("X"), Some(&"Energy"));

        let map: SectorMap = serde_json::from_str(r#"{"Energy": ["X"], "Tech": ["X"]}"#).unwrap();
        assert_eq!(map.invert().get("X"), Some(&"Tech"));
    }

    #[test]
    fn test_series_since_is_inclusive() {
        let s = Series::new(
            vec![date(2024, 1, 1), date(2024, 1, 2), date(2024, 1, 3)],
            vec![1.0, 2.0, 3.0],
        );
        assert_eq!(s.since(date(2024, 1, 2)).values, vec![2.0, 3.0]);
    }
}
