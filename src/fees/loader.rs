//! CSV-based tier schedule loader
//!
//! Reads advisor fee brackets from a `lower,upper,annual_rate` CSV file. An
//! empty `upper` field marks the unbounded top tier.

use std::error::Error;
use std::fs::File;
use std::path::Path;

use super::tiers::{Tier, TierSchedule};

/// Load a tier schedule from a CSV file.
///
/// Expected columns: `lower,upper,annual_rate` with a header row. The
/// resulting schedule is validated on construction, so gaps, overlaps, or a
/// bounded top tier fail the load.
pub fn load_tier_schedule(path: &Path) -> Result<TierSchedule, Box<dyn Error>> {
    let file = File::open(path)?;
    let mut reader = csv::Reader::from_reader(file);

    let mut tiers = Vec::new();

    for result in reader.records() {
        let record = result?;
        let lower: f64 = record[0].parse()?;
        let upper = match record[1].trim() {
            "" => None,
            text => Some(text.parse::<f64>()?),
        };
        let annual_rate: f64 = record[2].parse()?;

        tiers.push(Tier { lower, upper, annual_rate });
    }

    Ok(TierSchedule::new(tiers)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_schedule_from_csv() {
        let dir = std::env::temp_dir();
        let path = dir.join("longmath_test_tiers.csv");
        let mut file = File::create(&path).unwrap();
        writeln!(file, "lower,upper,annual_rate").unwrap();
        writeln!(file, "0,500000,0.012").unwrap();
        writeln!(file, "500000,,0.008").unwrap();
        drop(file);

        let schedule = load_tier_schedule(&path).unwrap();
        assert_eq!(schedule.tiers().len(), 2);
        assert_eq!(schedule.tiers()[1].upper, None);
        assert_eq!(schedule.single_bracket_rate(600_000.0), 0.008);

        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_load_rejects_invalid_schedule() {
        let dir = std::env::temp_dir();
        let path = dir.join("longmath_test_tiers_bad.csv");
        let mut file = File::create(&path).unwrap();
        writeln!(file, "lower,upper,annual_rate").unwrap();
        writeln!(file, "0,500000,0.012").unwrap();
        writeln!(file, "600000,,0.008").unwrap();
        drop(file);

        assert!(load_tier_schedule(&path).is_err());

        std::fs::remove_file(&path).ok();
    }
}
