use crate::analysis::horizon::Horizon;
use crate::config;
use crate::data::models::Series;
use crate::error::PresentationError;

/// Direction of the move over the displayed window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trend {
    Gain,
    Loss,
}

/// Headline of the performance chart
#[derive(Debug, Clone, PartialEq)]
pub struct PerformanceSummary {
    /// Last value minus the value at index 1, rounded to cents
    pub delta: f64,
    /// Delta as a percentage of the value at index 1, rounded to 2 decimals
    pub move_pct: f64,
    pub trend: Trend,
    pub subtitle: String,
    /// Fixed y-axis domain (whole units)
    pub y_min: f64,
    pub y_max: f64,
}

fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

/// Padded y-axis domain rounded to whole units.
pub fn y_domain(values: &[f64]) -> (f64, f64) {
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    (
        (min * config::Y_AXIS_LOWER_PAD).round_ties_even(),
        (max * config::Y_AXIS_UPPER_PAD).round_ties_even(),
    )
}

/// Summarize a cumulative value series over the selected horizon.
///
/// The move is measured against the second observation (index 1), not the
/// first.
pub fn summarize(series: &Series, horizon: Horizon) -> Result<PerformanceSummary, PresentationError> {
    let values = &series.values;
    if values.len() < 2 {
        return Err(PresentationError::SeriesTooShort(values.len()));
    }

    let baseline = values[1];
    let last = values[values.len() - 1];
    let delta = round2(last - baseline);
    let move_pct = if baseline == 0.0 {
        0.0
    } else {
        round2(100.0 * delta / baseline)
    };

    let (trend, subtitle) = if delta > 0.0 {
        (
            Trend::Gain,
            format!(
                "+ {:.2} {} in {} : +{:.2} %",
                delta,
                config::CURRENCY_SUFFIX,
                horizon,
                move_pct
            ),
        )
    } else {
        (
            Trend::Loss,
            format!(
                "{:.2} {} in {} : {:.2} %",
                delta,
                config::CURRENCY_SUFFIX,
                horizon,
                move_pct
            ),
        )
    };

    let (y_min, y_max) = y_domain(values);

    Ok(PerformanceSummary {
        delta,
        move_pct,
        trend,
        subtitle,
        y_min,
        y_max,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn series(values: &[f64]) -> Series {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let dates = (0..values.len())
            .map(|i| start + chrono::Days::new(i as u64))
            .collect();
        Series::new(dates, values.to_vec())
    }

    #[test]
    fn test_delta_uses_second_observation() {
        let s = summarize(&series(&[100.0, 105.0, 110.0]), Horizon::OneYear).unwrap();
        assert_eq!(s.delta, 5.0);
        assert_eq!(s.move_pct, 4.76);
        assert_eq!(s.trend, Trend::Gain);
        assert_eq!(s.subtitle, "+ 5.00 € in 1Y : +4.76 %");
    }

    #[test]
    fn test_loss_subtitle() {
        let s = summarize(&series(&[90.0, 100.0, 96.5]), Horizon::SixMonths).unwrap();
        assert_eq!(s.delta, -3.5);
        assert_eq!(s.move_pct, -3.5);
        assert_eq!(s.trend, Trend::Loss);
        assert_eq!(s.subtitle, "-3.50 € in 6M : -3.50 %");
    }

    #[test]
    fn test_flat_is_loss_colour() {
        let s = summarize(&series(&[100.0, 100.0, 100.0]), Horizon::Max).unwrap();
        assert_eq!(s.delta, 0.0);
        assert_eq!(s.trend, Trend::Loss);
    }

    #[test]
    fn test_too_short() {
        let err = summarize(&series(&[100.0]), Horizon::OneMonth).unwrap_err();
        assert_eq!(err, PresentationError::SeriesTooShort(1));
        assert!(summarize(&series(&[]), Horizon::OneMonth).is_err());
    }

    #[test]
    fn test_y_domain_padding() {
        let (lo, hi) = y_domain(&[100.0, 105.0, 110.0]);
        assert_eq!(lo, 95.0);
        assert_eq!(hi, 116.0);
        let s = summarize(&series(&[1000.0, 1000.0]), Horizon::Max).unwrap();
        assert!(s.y_min < s.y_max, "flat series must still span a range");
    }
}
