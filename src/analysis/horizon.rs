use chrono::{Months, NaiveDate};

use crate::data::models::Series;

/// Lookback window selectable above the performance chart
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Horizon {
    #[default]
    OneMonth,
    SixMonths,
    OneYear,
    FiveYears,
    TenYears,
    TwentyYears,
    Max,
}

impl Horizon {
    pub const ALL: [Horizon; 7] = [
        Horizon::OneMonth,
        Horizon::SixMonths,
        Horizon::OneYear,
        Horizon::FiveYears,
        Horizon::TenYears,
        Horizon::TwentyYears,
        Horizon::Max,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Horizon::OneMonth => "1M",
            Horizon::SixMonths => "6M",
            Horizon::OneYear => "1Y",
            Horizon::FiveYears => "5Y",
            Horizon::TenYears => "10Y",
            Horizon::TwentyYears => "20Y",
            Horizon::Max => "MAX",
        }
    }

    /// Calendar months covered by the window, `None` for the full history
    fn months(self) -> Option<u32> {
        match self {
            Horizon::OneMonth => Some(1),
            Horizon::SixMonths => Some(6),
            Horizon::OneYear => Some(12),
            Horizon::FiveYears => Some(5 * 12),
            Horizon::TenYears => Some(10 * 12),
            Horizon::TwentyYears => Some(20 * 12),
            Horizon::Max => None,
        }
    }

    /// First calendar date of the window ending at `today`.
    /// Days past the end of the target month clamp to its last day.
    pub fn target_date(self, today: NaiveDate) -> Option<NaiveDate> {
        today.checked_sub_months(Months::new(self.months()?))
    }
}

impl std::fmt::Display for Horizon {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Index of the date closest to `target` in ascending `dates`.
/// Equidistant neighbours resolve to the later date.
pub fn nearest_index(dates: &[NaiveDate], target: NaiveDate) -> Option<usize> {
    if dates.is_empty() {
        return None;
    }
    let right = dates.partition_point(|d| *d < target);
    if right == 0 {
        return Some(0);
    }
    if right == dates.len() {
        return Some(dates.len() - 1);
    }
    let left = right - 1;
    if target - dates[left] < dates[right] - target {
        Some(left)
    } else {
        Some(right)
    }
}

/// Points of `series` from the available date nearest to the horizon start.
pub fn filter_to_horizon(series: &Series, horizon: Horizon, today: NaiveDate) -> Series {
    let Some(target) = horizon.target_date(today) else {
        return series.clone();
    };
    match nearest_index(&series.dates, target) {
        Some(idx) => series.since(series.dates[idx]),
        None => Series::default(),
    }
}

/// Horizon window for display. When the history ended so long before `today`
/// that the window holds fewer than two points, it is measured back from the
/// last available date instead.
pub fn filter_for_display(series: &Series, horizon: Horizon, today: NaiveDate) -> Series {
    let filtered = filter_to_horizon(series, horizon, today);
    if filtered.len() >= 2 {
        return filtered;
    }
    match series.dates.last() {
        Some(&last) if last < today => {
            tracing::debug!(
                "No {} window ending {}, measuring from last date {}",
                horizon,
                today,
                last
            );
            filter_to_horizon(series, horizon, last)
        }
        _ => filtered,
    }
}
