//! Band derivation: converts local-currency brackets into USD bands with
//! headcounts and money totals, closing the accounting identity on the last band.
//!
//! Each closed band's money is the trapezoid estimate `people × (from + to) / 2`.
//! The last band takes whatever is left of the aggregate income, and its upper
//! bound is back-solved so that its mean income sits at the band midpoint.

use crate::error::{ChartError, ChartResult};
use crate::models::{DerivedBand, Derivation, StatInput};

/// Derive USD bands and the aggregate totals from raw statistics.
///
/// ### Errors
/// - `InvalidInput` when the raw bands are malformed (see `StatInput::validate`).
/// - `InconsistentData` when the reconciled last band cannot be drawn: no people in
///   it, a negative money total, or a back-solved upper bound below its lower bound.
pub fn derive(input: &StatInput) -> ChartResult<Derivation> {
    input.validate()?;

    let rate = input.usd_to_local;
    let avg_salary_usd = input.avg_salary_local / rate;
    let avg_pension_usd = input.avg_pension_local / rate;
    let all_usd = input.working_people * avg_salary_usd * (1.0 - input.tax_percent / 100.0)
        + input.retired_people * avg_pension_usd;
    let taxes_usd = avg_salary_usd * input.working_people
        * (input.tax_percent + input.social_tax_percent)
        / 100.0;

    let mut bands: Vec<DerivedBand> = input
        .bands
        .iter()
        .enumerate()
        .map(|(i, raw)| {
            let people = input.people * raw.percent / 100.0;
            let from_usd = raw.from / rate;
            let to_usd = match raw.to {
                Some(to) => to / rate,
                None => {
                    // validate() guarantees a closed predecessor
                    let prev = &input.bands[i - 1];
                    let prev_width = prev.to.unwrap_or(prev.from) - prev.from;
                    from_usd + 2.0 * prev_width / rate
                }
            };
            let total_usd = if raw.is_open() {
                0.0
            } else {
                people * (from_usd + to_usd) / 2.0
            };
            DerivedBand { from_usd, to_usd, people, total_usd }
        })
        .collect();

    let split = bands.len() - 1;
    let others: f64 = bands[..split].iter().map(|b| b.total_usd).sum();
    let last = &mut bands[split];
    last.total_usd = all_usd - others;

    if !(last.people > 0.0) {
        return Err(ChartError::InconsistentData(
            "the last band has no people to carry the remaining income".into(),
        ));
    }
    if last.total_usd < 0.0 {
        return Err(ChartError::InconsistentData(format!(
            "lower bands already account for {others:.0} USD, more than the total {all_usd:.0} USD"
        )));
    }
    last.to_usd = last.from_usd + 2.0 * (last.total_usd / last.people - last.from_usd);
    if last.to_usd < last.from_usd {
        return Err(ChartError::InconsistentData(format!(
            "the last band averages {:.2} USD per person, below its lower bound {:.2} USD",
            last.total_usd / last.people,
            last.from_usd
        )));
    }

    log::debug!(
        "derived {} bands: all={all_usd:.0} USD, taxes={taxes_usd:.0} USD, open band up to {:.2} USD",
        bands.len(),
        bands[split].to_usd
    );

    Ok(Derivation {
        bands,
        avg_salary_usd,
        avg_pension_usd,
        all_usd,
        taxes_usd,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::belstat;

    #[test]
    fn open_band_is_back_solved() {
        let d = derive(&belstat()).unwrap();
        let last = d.bands.last().unwrap();
        assert!(last.to_usd > last.from_usd);
        let mean = last.total_usd / last.people;
        assert!((mean - last.mid_usd()).abs() < 1e-6);
    }
}
