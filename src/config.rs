use std::path::PathBuf;

/// Weights at or below this fraction are left out of the donut charts
pub const WEIGHT_THRESHOLD: f64 = 0.002;

/// Trading days per year used to annualize daily statistics
pub const TRADING_DAYS_PER_YEAR: f64 = 252.0;

/// Y-axis padding applied around the performance series
pub const Y_AXIS_LOWER_PAD: f64 = 0.95;
pub const Y_AXIS_UPPER_PAD: f64 = 1.05;

/// Suffix used when printing portfolio value moves
pub const CURRENCY_SUFFIX: &str = "€";

/// The area fill under the performance line is built but not shown until
/// the dashboard owner confirms it should be.
pub const SHOW_AREA_FILL: bool = false;
pub const AREA_FILL_ALPHA: f32 = 0.15;

/// Donut geometry (pixels)
pub const DONUT_OUTER_RADIUS: f32 = 120.0;
pub const DONUT_INNER_RADIUS: f32 = 60.0;

/// Range the user can resize any chart to (pixels)
pub const CHART_MIN_HEIGHT: f32 = 120.0;
pub const CHART_MAX_HEIGHT: f32 = 800.0;

/// Sequential teal scheme endpoints (light -> dark)
pub const TEAL_LIGHT: [u8; 3] = [187, 223, 223];
pub const TEAL_DARK: [u8; 3] = [30, 84, 90];

/// Accent colour of the disclaimer line
pub const DISCLAIMER_COLOR: [u8; 3] = [0x1F, 0xC5, 0xA3];

pub const DISCLAIMER: &str = "Historical returns are provided for informational purposes only \
and do not guarantee, or even reliably predict, future performance.";

/// Input file names inside the data directory
pub const PORTFOLIOS_FILE: &str = "portfolios.json";
pub const SECTORS_FILE: &str = "sectors.json";
pub const PRICES_FILE: &str = "prices.csv";
pub const RETURNS_FILE: &str = "returns.csv";

/// Environment variable overriding the data directory
pub const DATA_DIR_ENV: &str = "PORTFOLIO_DATA_DIR";
pub const DEFAULT_DATA_DIR: &str = "data";

/// Directory holding the portfolio input files
pub fn data_dir() -> PathBuf {
    std::env::var(DATA_DIR_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(DEFAULT_DATA_DIR))
}
