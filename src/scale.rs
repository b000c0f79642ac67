//! Horizontal axis scale over non-uniform income bands.
//!
//! Two policies map a USD value to a pixel column inside `[padding, width - padding]`:
//! - population-proportional: every band is as wide as its share of people, and values
//!   are interpolated linearly inside a band;
//! - range-proportional: a single linear map over `[floor, max(to_usd)]`, where values
//!   below the optional floor are pinned to the left edge.

use crate::error::{ChartError, ChartResult};
use crate::models::DerivedBand;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ScalePolicy {
    #[default]
    PopulationProportional,
    RangeProportional {
        /// Lower end of the linear domain; values below it map to the left edge.
        #[serde(default)]
        floor_usd: Option<f64>,
    },
}

/// Scale built once per render from the derived bands and the logical chart width.
#[derive(Debug, Clone, PartialEq)]
pub struct AxisScale {
    domain: Vec<(f64, f64)>,
    ticks: Vec<f64>,
    x0: f64,
    x1: f64,
    policy: ScalePolicy,
    floor: f64,
}

impl AxisScale {
    pub fn new(
        bands: &[DerivedBand],
        width: f64,
        padding: f64,
        policy: ScalePolicy,
    ) -> ChartResult<Self> {
        if bands.is_empty() {
            return Err(ChartError::InvalidInput("no bands to scale".into()));
        }
        let x0 = padding;
        let x1 = width - padding;
        if !(x1 > x0) {
            return Err(ChartError::InvalidInput(format!(
                "chart width {width} leaves no room inside padding {padding}"
            )));
        }

        let domain: Vec<(f64, f64)> = bands.iter().map(|b| (b.from_usd, b.to_usd)).collect();
        let lo = domain.iter().map(|d| d.0).fold(f64::INFINITY, f64::min);
        let hi = domain.iter().map(|d| d.1).fold(f64::NEG_INFINITY, f64::max);

        let (ticks, floor) = match policy {
            ScalePolicy::PopulationProportional => {
                let mut cumulative = Vec::with_capacity(bands.len() + 1);
                cumulative.push(0.0);
                for b in bands {
                    let prev = cumulative[cumulative.len() - 1];
                    cumulative.push(prev + b.people);
                }
                let total = cumulative[cumulative.len() - 1];
                if !(total > 0.0) {
                    return Err(ChartError::InvalidInput("bands have no people".into()));
                }
                let ticks = cumulative
                    .iter()
                    .map(|p| {
                        let t = p / total;
                        x0 * (1.0 - t) + x1 * t
                    })
                    .collect();
                (ticks, lo)
            }
            ScalePolicy::RangeProportional { floor_usd } => {
                // the floor may lift the start of the domain, but never past the first band
                let floor = floor_usd.map_or(lo, |f| f.max(lo).min(domain[0].1));
                if !(hi > floor) {
                    return Err(ChartError::InvalidInput("degenerate USD range".into()));
                }
                let ticks = std::iter::once(lo)
                    .chain(domain.iter().map(|d| d.1))
                    .map(|v| x0 + (v.max(floor) - floor) / (hi - floor) * (x1 - x0))
                    .collect();
                (ticks, floor)
            }
        };

        Ok(Self { domain, ticks, x0, x1, policy, floor })
    }

    /// Smallest and largest USD value the scale accepts.
    pub fn domain(&self) -> (f64, f64) {
        (self.domain[0].0, self.domain[self.domain.len() - 1].1)
    }

    /// Pixel positions of the band boundaries, left to right.
    pub fn ticks(&self) -> &[f64] {
        &self.ticks
    }

    pub fn range(&self) -> (f64, f64) {
        (self.x0, self.x1)
    }

    pub fn policy(&self) -> ScalePolicy {
        self.policy
    }

    /// Map a USD value to a horizontal pixel position.
    ///
    /// Calling this outside the band range is a caller bug and yields `OutOfDomain`.
    pub fn scale_x(&self, usd: f64) -> ChartResult<f64> {
        let (min, max) = self.domain();
        let index = self
            .domain
            .iter()
            .position(|&(from, to)| usd >= from && usd <= to)
            .ok_or(ChartError::OutOfDomain { value: usd, min, max })?;

        match self.policy {
            ScalePolicy::PopulationProportional => {
                let (from, to) = self.domain[index];
                let t = if to > from { (usd - from) / (to - from) } else { 0.0 };
                Ok(self.ticks[index] * (1.0 - t) + self.ticks[index + 1] * t)
            }
            ScalePolicy::RangeProportional { .. } => {
                let t = (usd.max(self.floor) - self.floor) / (max - self.floor);
                Ok(self.x0 + t * (self.x1 - self.x0))
            }
        }
    }

    /// Pixel span `[left, right]` of a band.
    pub fn band_span(&self, band: &DerivedBand) -> ChartResult<(f64, f64)> {
        Ok((self.scale_x(band.from_usd)?, self.scale_x(band.to_usd)?))
    }
}
