//! Weight breakdowns feeding the weights table and the two donut charts.

use crate::data::models::{Holding, SectorMap};
use crate::error::PresentationError;

/// One donut slice: category label and its weight fraction
#[derive(Debug, Clone, PartialEq)]
pub struct Slice {
    pub label: String,
    pub weight: f64,
}

impl Slice {
    pub fn new(label: impl Into<String>, weight: f64) -> Self {
        Self {
            label: label.into(),
            weight,
        }
    }
}

/// Weight fraction as a 2-decimal percentage string (0.1234 -> "12.34%")
pub fn format_percent(weight: f64) -> String {
    format!("{:.2}%", weight * 100.0)
}

/// Keep only labels whose weight is strictly above `threshold`.
pub fn filter_significant(slices: Vec<Slice>, threshold: f64) -> Vec<Slice> {
    slices.into_iter().filter(|s| s.weight > threshold).collect()
}

/// Sum weights of repeated labels, keeping first-seen order.
pub fn aggregate(slices: Vec<Slice>) -> Vec<Slice> {
    let mut summed: Vec<Slice> = Vec::new();
    for slice in slices {
        match summed.iter_mut().find(|s| s.label == slice.label) {
            Some(existing) => existing.weight += slice.weight,
            None => summed.push(slice),
        }
    }
    summed
}

/// Per-asset slices above `threshold`
pub fn asset_slices(holdings: &[Holding], threshold: f64) -> Vec<Slice> {
    let slices = holdings
        .iter()
        .map(|h| Slice::new(h.asset.clone(), h.weight))
        .collect();
    filter_significant(slices, threshold)
}

/// Per-sector slices: each asset is mapped to its sector, filtered at asset
/// level against `threshold`, then summed by sector.
pub fn sector_slices(
    holdings: &[Holding],
    sector_map: &SectorMap,
    threshold: f64,
) -> Result<Vec<Slice>, PresentationError> {
    let company_to_sector = sector_map.invert();

    let slices = holdings
        .iter()
        .map(|h| {
            company_to_sector
                .get(h.asset.as_str())
                .map(|sector| Slice::new(*sector, h.weight))
                .ok_or_else(|| PresentationError::UnknownAsset(h.asset.clone()))
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(aggregate(filter_significant(slices, threshold)))
}

/// (asset, formatted weight) pairs for the weights table, in holding order
pub fn weight_rows(holdings: &[Holding]) -> Vec<(String, String)> {
    holdings
        .iter()
        .map(|h| (h.asset.clone(), format_percent(h.weight)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use indexmap::IndexMap;
    use std::collections::HashSet;

    const THRESHOLD: f64 = 0.002;

    fn sector_map(entries: &[(&str, &[&str])]) -> SectorMap {
        let map: IndexMap<String, Vec<String>> = entries
            .iter()
            .map(|(s, cs)| (s.to_string(), cs.iter().map(|c| c.to_string()).collect()))
            .collect();
        SectorMap::new(map)
    }

    #[test]
    fn test_format_percent() {
        assert_eq!(format_percent(0.1234), "12.34%");
        assert_eq!(format_percent(1.0), "100.00%");
        assert_eq!(format_percent(0.0), "0.00%");
    }

    #[test]
    fn test_threshold_is_strict() {
        let holdings = vec![
            Holding::new("A", 0.002),
            Holding::new("B", 0.0021),
            Holding::new("C", 0.001),
            Holding::new("D", 0.5),
        ];
        let kept: Vec<String> = asset_slices(&holdings, THRESHOLD)
            .into_iter()
            .map(|s| s.label)
            .collect();
        assert_eq!(kept, vec!["B", "D"], "boundary weight must be excluded");
    }

    #[test]
    fn test_sector_scenario() {
        let holdings = Holding::zip(&[0.5, 0.3, 0.2], &["A", "B", "C"]).unwrap();
        let map = sector_map(&[("Tech", &["A", "B"]), ("Energy", &["C"])]);
        let slices = sector_slices(&holdings, &map, THRESHOLD).unwrap();
        assert_eq!(slices.len(), 2);
        assert_eq!(slices[0].label, "Tech");
        assert!((slices[0].weight - 0.8).abs() < 1e-12);
        assert_eq!(slices[1].label, "Energy");
        assert!((slices[1].weight - 0.2).abs() < 1e-12);
    }

    #[test]
    fn test_sector_mass_conservation() {
        let holdings = Holding::zip(
            &[0.25, 0.001, 0.15, 0.3, 0.0015, 0.2975],
            &["A", "B", "C", "D", "E", "F"],
        )
        .unwrap();
        let map = sector_map(&[
            ("Tech", &["A", "D"]),
            ("Energy", &["B", "C"]),
            ("Health", &["E", "F"]),
        ]);
        let slices = sector_slices(&holdings, &map, THRESHOLD).unwrap();

        let filtered_total: f64 = holdings
            .iter()
            .filter(|h| h.weight > THRESHOLD)
            .map(|h| h.weight)
            .sum();
        let sector_total: f64 = slices.iter().map(|s| s.weight).sum();
        assert!((filtered_total - sector_total).abs() < 1e-12);

        let unique: HashSet<&str> = slices.iter().map(|s| s.label.as_str()).collect();
        assert_eq!(unique.len(), slices.len(), "sectors must not repeat");
    }

    #[test]
    fn test_sector_first_seen_order() {
        let holdings = Holding::zip(&[0.1, 0.2, 0.3], &["C", "A", "B"]).unwrap();
        let map = sector_map(&[("Tech", &["A", "B"]), ("Energy", &["C"])]);
        let labels: Vec<String> = sector_slices(&holdings, &map, THRESHOLD)
            .unwrap()
            .into_iter()
            .map(|s| s.label)
            .collect();
        assert_eq!(labels, vec!["Energy", "Tech"]);
    }

    #[test]
    fn test_unknown_asset_fails() {
        let holdings = vec![Holding::new("A", 0.5), Holding::new("X", 0.5)];
        let map = sector_map(&[("Tech", &["A"])]);
        let err = sector_slices(&holdings, &map, THRESHOLD).unwrap_err();
        assert_eq!(err, PresentationError::UnknownAsset("X".to_string()));
    }

    #[test]
    fn test_unknown_asset_fails_even_below_threshold() {
        let holdings = vec![Holding::new("X", 0.0001)];
        let map = sector_map(&[("Tech", &["A"])]);
        assert!(sector_slices(&holdings, &map, THRESHOLD).is_err());
    }

    #[test]
    fn test_all_below_threshold_is_empty() {
        let holdings = vec![Holding::new("A", 0.001), Holding::new("B", 0.002)];
        assert!(asset_slices(&holdings, THRESHOLD).is_empty());
        let map = sector_map(&[("Tech", &["A", "B"])]);
        assert!(sector_slices(&holdings, &map, THRESHOLD).unwrap().is_empty());
    }

    #[test]
    fn test_weight_rows() {
        let holdings = Holding::zip(&[0.1234, 0.8766], &["A", "B"]).unwrap();
        let rows = weight_rows(&holdings);
        assert_eq!(rows[0], ("A".to_string(), "12.34%".to_string()));
        assert_eq!(rows[1], ("B".to_string(), "87.66%".to_string()));
    }
}
