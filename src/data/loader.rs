//! JSON dataset loader
//!
//! Reads the pre-built monthly dataset files the data tooling emits:
//! `{"source": ..., "frequency": "monthly", "start": "YYYY-MM",
//! "end": "YYYY-MM", "series": [{"date": "YYYY-MM", "value": ...}]}`.

use std::error::Error;
use std::fs;
use std::path::Path;

use chrono::NaiveDate;
use serde::Deserialize;

use super::series::{MonthlySeries, SeriesPoint};

#[derive(Debug, Deserialize)]
struct RawDataset {
    source: String,
    frequency: String,
    series: Vec<RawPoint>,
}

#[derive(Debug, Deserialize)]
struct RawPoint {
    date: String,
    value: f64,
}

/// Parse a `YYYY-MM` month label into the first day of that month.
fn parse_month(label: &str) -> Result<NaiveDate, Box<dyn Error>> {
    let (year, month) = label
        .split_once('-')
        .ok_or_else(|| format!("month label {label:?} is not YYYY-MM"))?;
    let year: i32 = year.parse()?;
    let month: u32 = month.parse()?;
    NaiveDate::from_ymd_opt(year, month, 1)
        .ok_or_else(|| format!("month label {label:?} is out of range").into())
}

/// Parse a dataset from its JSON text.
pub fn parse_series_json(text: &str) -> Result<MonthlySeries, Box<dyn Error>> {
    let raw: RawDataset = serde_json::from_str(text)?;

    if raw.frequency != "monthly" {
        return Err(format!("expected monthly dataset, got frequency {:?}", raw.frequency).into());
    }

    let mut points = Vec::with_capacity(raw.series.len());
    for point in &raw.series {
        points.push(SeriesPoint {
            month: parse_month(&point.date)?,
            value: point.value,
        });
    }

    Ok(MonthlySeries::new(raw.source, points)?)
}

/// Load a dataset JSON file from disk.
pub fn load_series(path: &Path) -> Result<MonthlySeries, Box<dyn Error>> {
    let text = fs::read_to_string(path)?;
    parse_series_json(&text)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "source": "Bank of Canada Valet API",
        "frequency": "monthly",
        "start": "2023-01",
        "end": "2023-03",
        "series": [
            {"date": "2023-01", "value": 153.9},
            {"date": "2023-02", "value": 154.5},
            {"date": "2023-03", "value": 155.3}
        ]
    }"#;

    #[test]
    fn test_parse_sample_dataset() {
        let series = parse_series_json(SAMPLE).unwrap();
        assert_eq!(series.source(), "Bank of Canada Valet API");
        assert_eq!(series.len(), 3);
        assert_eq!(
            series.value_at(NaiveDate::from_ymd_opt(2023, 2, 1).unwrap()),
            Some(154.5)
        );
    }

    #[test]
    fn test_rejects_non_monthly_frequency() {
        let text = SAMPLE.replace("monthly", "daily");
        assert!(parse_series_json(&text).is_err());
    }

    #[test]
    fn test_rejects_bad_month_label() {
        let text = SAMPLE.replace("2023-02", "2023/02");
        assert!(parse_series_json(&text).is_err());
    }
}
