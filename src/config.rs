//! Layout constants, colors and captions of the chart, loadable from JSON.

use crate::scale::ScalePolicy;
use crate::viz::palette::{Fill, Hsl, Rgb8};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// How many USD / people one icon stands for.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum IconDensity {
    /// Sized so the band with the most money per person fills its share of the chart.
    #[default]
    Densest,
    Fixed { money_per_icon: f64, people_per_icon: f64 },
}

/// Fixed texts drawn on the chart; numbers are appended by the composer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Captions {
    pub title: String,
    pub axis: String,
    /// Prefix of the USD tick labels at band boundaries.
    pub tick_prefix: String,
    /// Suffix of the income formula in the totals comparison.
    pub income: String,
    /// Prefix of the taxes formula in the totals comparison.
    pub taxes: String,
}

impl Default for Captions {
    fn default() -> Self {
        Self {
            title: "Per-capita monthly income (Belstat)".into(),
            axis: "income per person per month".into(),
            tick_prefix: "up to ".into(),
            income: "(salaries and pensions)".into(),
            taxes: "(income tax and social fund)".into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    pub min_width: f64,
    pub max_width: f64,
    pub icon_size: f64,
    pub padding: f64,
    pub bar_label_size: f64,
    pub title_size: f64,
    /// Share of the upper half (minus padding) the densest money bar may use.
    pub money_height_ratio: f64,
    /// Share of the lower half (minus padding) the people bars may use.
    pub people_height_ratio: f64,
    pub bar_padding: f64,
    /// Baseline sits this far below the vertical middle.
    pub baseline_offset: f64,
    /// Height of the totals comparison as a share of the chart height.
    pub totals_height_ratio: f64,
    pub grid_fill: Fill,
    pub money_color: Rgb8,
    pub taxes_color: Rgb8,
    pub people_color_from: Hsl,
    pub people_color_to: Hsl,
    pub scale: ScalePolicy,
    pub density: IconDensity,
    /// Physical size used for static markup rendering.
    pub server_size: (f64, f64),
    /// Height / width of the container in interactive mode.
    pub container_aspect: f64,
    pub captions: Captions,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            min_width: 800.0,
            max_width: 1200.0,
            icon_size: 16.0,
            padding: 20.0,
            bar_label_size: 10.0,
            title_size: 24.0,
            money_height_ratio: 0.7,
            people_height_ratio: 0.3,
            bar_padding: 2.0,
            baseline_offset: 5.0,
            totals_height_ratio: 1.0 / 7.0,
            grid_fill: Fill { rgb: Rgb8::new(64, 128, 172), opacity: 0.05 },
            money_color: Rgb8::new(0, 128, 0),
            taxes_color: Rgb8::new(200, 48, 24),
            people_color_from: Hsl::new(280.0, 0.9, 0.2),
            people_color_to: Hsl::new(20.0, 0.7, 0.5),
            scale: ScalePolicy::PopulationProportional,
            density: IconDensity::Densest,
            server_size: (1200.0, 500.0),
            container_aspect: 5.0 / 12.0,
            captions: Captions::default(),
        }
    }
}

impl ChartConfig {
    /// Alternate layout: linear USD axis with fixed icon values and a lower baseline.
    pub fn range_layout() -> Self {
        Self {
            scale: ScalePolicy::RangeProportional { floor_usd: None },
            density: IconDensity::Fixed {
                money_per_icon: 5_000_000.0,
                people_per_icon: 100_000.0,
            },
            baseline_offset: 12.0,
            ..Self::default()
        }
    }

    /// Read a config from JSON; missing fields keep their defaults.
    pub fn load_json<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let f = File::open(path).with_context(|| format!("open {}", path.display()))?;
        let cfg = serde_json::from_reader(BufReader::new(f))
            .with_context(|| format!("parse {}", path.display()))?;
        Ok(cfg)
    }

    /// Clamp a physical width into the configured range and derive the logical
    /// height that keeps the physical aspect ratio.
    pub fn logical_size(&self, width: f64, height: f64) -> (f64, f64) {
        let w = width.max(self.min_width).min(self.max_width);
        (w, height / width * w)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let cfg: ChartConfig =
            serde_json::from_str(r#"{"icon_size": 12, "scale": {"kind": "range_proportional"}}"#)
                .unwrap();
        assert_eq!(cfg.icon_size, 12.0);
        assert_eq!(cfg.padding, 20.0);
        assert_eq!(cfg.scale, ScalePolicy::RangeProportional { floor_usd: None });
        assert_eq!(cfg.density, IconDensity::Densest);
    }

    #[test]
    fn logical_size_clamps_width() {
        let cfg = ChartConfig::default();
        assert_eq!(cfg.logical_size(400.0, 200.0), (800.0, 400.0));
        assert_eq!(cfg.logical_size(2400.0, 1000.0), (1200.0, 500.0));
        assert_eq!(cfg.logical_size(1000.0, 500.0), (1000.0, 500.0));
    }
}
