use crate::models::DerivedBand;
use anyhow::Result;
use csv::WriterBuilder;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Save derived bands as CSV with header.
pub fn save_csv<P: AsRef<Path>>(bands: &[DerivedBand], path: P) -> Result<()> {
    let mut wtr = WriterBuilder::new().from_path(path)?;
    wtr.serialize(("from_usd", "to_usd", "people", "total_usd", "usd_per_person"))?;
    for b in bands {
        wtr.serialize((b.from_usd, b.to_usd, b.people, b.total_usd, b.usd_per_person()))?;
    }
    wtr.flush()?;
    Ok(())
}

/// Save derived bands as a pretty JSON array.
pub fn save_json<P: AsRef<Path>>(bands: &[DerivedBand], path: P) -> Result<()> {
    let mut f = File::create(path)?;
    let s = serde_json::to_string_pretty(bands)?;
    f.write_all(s.as_bytes())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn write_csv_and_json() {
        let dir = tempdir().unwrap();
        let csvp = dir.path().join("x.csv");
        let jsonp = dir.path().join("x.json");
        let bands = vec![DerivedBand {
            from_usd: 0.0,
            to_usd: 100.0,
            people: 10.0,
            total_usd: 500.0,
        }];
        save_csv(&bands, &csvp).unwrap();
        save_json(&bands, &jsonp).unwrap();
        let csv_text = std::fs::read_to_string(&csvp).unwrap();
        assert!(csv_text.starts_with("from_usd,to_usd,people,total_usd,usd_per_person"));
        assert_eq!(csv_text.lines().count(), 2);
        assert!(jsonp.exists());
    }
}
