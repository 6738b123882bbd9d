//! Historical dataset support for the portfolio-growth and inflation calculators

mod loader;
mod series;

pub use loader::{load_series, parse_series_json};
pub use series::{MonthlySeries, SeriesPoint};
