use crate::error::{ChartError, ChartResult};
use serde::{Deserialize, Serialize};

/// One income bracket of the source statistics, in local currency per person
/// per month. `to == None` marks the open-ended top bracket.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RawBand {
    pub from: f64,
    /// Accepts a number, `null`, or `"inf"`/`"Infinity"`; serialized as `null` when open.
    #[serde(deserialize_with = "de_upper_bound", default)]
    pub to: Option<f64>,
    pub percent: f64,
}

impl RawBand {
    pub fn closed(from: f64, to: f64, percent: f64) -> Self {
        Self { from, to: Some(to), percent }
    }

    pub fn open(from: f64, percent: f64) -> Self {
        Self { from, to: None, percent }
    }

    pub fn is_open(&self) -> bool {
        self.to.is_none()
    }
}

/// Serde helper: parse an upper bound from a number, `null`, or an infinity string.
fn de_upper_bound<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::{self, Visitor};
    struct BoundVisitor;

    impl<'de> Visitor<'de> for BoundVisitor {
        type Value = Option<f64>;

        fn expecting(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
            write!(f, "a number, null, or \"inf\"")
        }

        fn visit_f64<E>(self, v: f64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(if v.is_infinite() { None } else { Some(v) })
        }

        fn visit_u64<E>(self, v: u64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Some(v as f64))
        }

        fn visit_i64<E>(self, v: i64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Some(v as f64))
        }

        fn visit_str<E>(self, s: &str) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            match s.trim().to_ascii_lowercase().as_str() {
                "inf" | "infinity" | "+inf" => Ok(None),
                other => other.parse::<f64>().map(Some).map_err(E::custom),
            }
        }

        fn visit_none<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(None)
        }

        fn visit_unit<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(None)
        }
    }

    deserializer.deserialize_any(BoundVisitor)
}

/// Income statistics the chart is drawn from. Supplied once, never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatInput {
    /// Local currency units per USD.
    pub usd_to_local: f64,
    pub avg_salary_local: f64,
    pub avg_pension_local: f64,
    /// Income tax withheld from salaries, percent.
    pub tax_percent: f64,
    /// Social contributions paid on top of salaries, percent.
    pub social_tax_percent: f64,
    pub people: f64,
    pub working_people: f64,
    pub retired_people: f64,
    pub bands: Vec<RawBand>,
}

impl StatInput {
    /// Structural checks that do not depend on the derived totals.
    pub fn validate(&self) -> ChartResult<()> {
        if self.bands.is_empty() {
            return Err(ChartError::InvalidInput("no income bands".into()));
        }
        if !(self.usd_to_local.is_finite() && self.usd_to_local > 0.0) {
            return Err(ChartError::InvalidInput(format!(
                "exchange rate must be positive, got {}",
                self.usd_to_local
            )));
        }
        for (name, v) in [
            ("people", self.people),
            ("working_people", self.working_people),
            ("retired_people", self.retired_people),
            ("avg_salary_local", self.avg_salary_local),
            ("avg_pension_local", self.avg_pension_local),
        ] {
            if !(v.is_finite() && v >= 0.0) {
                return Err(ChartError::InvalidInput(format!("{name} must be non-negative, got {v}")));
            }
        }

        let last = self.bands.len() - 1;
        for (i, band) in self.bands.iter().enumerate() {
            if !(band.percent.is_finite() && band.percent >= 0.0) {
                return Err(ChartError::InvalidInput(format!(
                    "band {i} has invalid percent {}",
                    band.percent
                )));
            }
            match band.to {
                None if i != last => {
                    return Err(ChartError::InvalidInput(format!(
                        "band {i} is open-ended but is not the last band"
                    )));
                }
                None if i == 0 => {
                    return Err(ChartError::InvalidInput(
                        "the open-ended band needs a closed band before it".into(),
                    ));
                }
                Some(to) if !(to > band.from) => {
                    return Err(ChartError::InvalidInput(format!(
                        "band {i} is reversed: from {} to {to}",
                        band.from
                    )));
                }
                _ => {}
            }
            if i > 0 {
                let prev_to = self.bands[i - 1].to.unwrap_or(f64::INFINITY);
                if (band.from - prev_to).abs() > 1e-9 * prev_to.abs().max(1.0) {
                    return Err(ChartError::InvalidInput(format!(
                        "band {i} starts at {} but band {} ends at {prev_to}",
                        band.from,
                        i - 1
                    )));
                }
            }
        }
        Ok(())
    }
}

/// A band in USD with absolute headcount and the money attributed to it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DerivedBand {
    pub from_usd: f64,
    pub to_usd: f64,
    pub people: f64,
    pub total_usd: f64,
}

impl DerivedBand {
    pub fn usd_per_person(&self) -> f64 {
        if self.people > 0.0 {
            self.total_usd / self.people
        } else {
            0.0
        }
    }

    pub fn mid_usd(&self) -> f64 {
        (self.from_usd + self.to_usd) / 2.0
    }

    pub fn contains(&self, usd: f64) -> bool {
        usd >= self.from_usd && usd <= self.to_usd
    }
}

/// Band list plus the aggregate money figures it was reconciled against.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Derivation {
    pub bands: Vec<DerivedBand>,
    pub avg_salary_usd: f64,
    pub avg_pension_usd: f64,
    /// Net salaries plus pensions, USD per month.
    pub all_usd: f64,
    /// Income tax plus social contributions, USD per month.
    pub taxes_usd: f64,
}
