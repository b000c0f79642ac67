//! Bundled income statistics and JSON loading for alternative inputs.

use crate::models::{RawBand, StatInput};
use anyhow::{Context, Result};
use std::fs::File;
use std::io::{BufReader, Write};
use std::path::Path;

/// Combine adjacent brackets into one: min lower bound, max upper bound, summed share.
pub fn merge(first: RawBand, rest: &[RawBand]) -> RawBand {
    rest.iter().fold(first, |total, row| RawBand {
        from: total.from.min(row.from),
        to: match (total.to, row.to) {
            (Some(a), Some(b)) => Some(a.max(b)),
            _ => None,
        },
        percent: total.percent + row.percent,
    })
}

/// Belarus, per-capita monthly resources by bracket (Belstat), amounts in BYN.
pub fn belstat() -> StatInput {
    StatInput {
        usd_to_local: 2.02,
        avg_salary_local: 841.0,
        avg_pension_local: 297.0,
        tax_percent: 13.0,
        social_tax_percent: 35.0,
        people: 9_507_000.0,
        working_people: 4_496_000.0,
        retired_people: 2_619_300.0,
        bands: vec![
            merge(
                RawBand::closed(0.0, 150.0, 1.5),
                &[RawBand::closed(150.0, 200.0, 5.4)],
            ),
            merge(
                RawBand::closed(200.0, 250.0, 8.8),
                &[RawBand::closed(250.0, 300.0, 12.1)],
            ),
            merge(
                RawBand::closed(300.0, 350.0, 14.0),
                &[RawBand::closed(350.0, 400.0, 11.7)],
            ),
            RawBand::closed(400.0, 500.0, 18.7),
            RawBand::closed(500.0, 600.0, 10.9),
            RawBand::open(600.0, 16.9),
        ],
    }
}

/// Read a `StatInput` from a JSON file.
pub fn load_json<P: AsRef<Path>>(path: P) -> Result<StatInput> {
    let path = path.as_ref();
    let f = File::open(path).with_context(|| format!("open {}", path.display()))?;
    let input: StatInput = serde_json::from_reader(BufReader::new(f))
        .with_context(|| format!("parse {}", path.display()))?;
    log::debug!("loaded {} bands from {}", input.bands.len(), path.display());
    Ok(input)
}

/// Write a `StatInput` as pretty JSON.
pub fn save_json<P: AsRef<Path>>(input: &StatInput, path: P) -> Result<()> {
    let mut f = File::create(path)?;
    let s = serde_json::to_string_pretty(input)?;
    f.write_all(s.as_bytes())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merge_spans_both_brackets() {
        let m = merge(
            RawBand::closed(0.0, 150.0, 1.5),
            &[RawBand::closed(150.0, 200.0, 5.4)],
        );
        assert_eq!(m.from, 0.0);
        assert_eq!(m.to, Some(200.0));
        assert!((m.percent - 6.9).abs() < 1e-9);
    }

    #[test]
    fn bundled_dataset_is_valid() {
        let data = belstat();
        assert_eq!(data.bands.len(), 6);
        assert!(data.bands.last().unwrap().is_open());
        data.validate().unwrap();
        let total: f64 = data.bands.iter().map(|b| b.percent).sum();
        assert!((total - 100.0).abs() < 1e-6);
    }
}
