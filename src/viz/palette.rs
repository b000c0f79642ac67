//! Colors: RGB/HSL values, hex output, and the people color ramp.

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb8 {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn to_hex(self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Hsl {
    pub h_deg: f64, // 0..360
    pub s: f64,     // 0..1
    pub l: f64,     // 0..1
}

impl Hsl {
    pub const fn new(h_deg: f64, s: f64, l: f64) -> Self {
        Self { h_deg, s, l }
    }
}

/// Solid color with an opacity in `0..=1`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Fill {
    pub rgb: Rgb8,
    pub opacity: f64,
}

impl Fill {
    pub const fn solid(rgb: Rgb8) -> Self {
        Self { rgb, opacity: 1.0 }
    }

    pub fn with_opacity(self, opacity: f64) -> Self {
        Self { rgb: self.rgb, opacity: clamp01(opacity * self.opacity) }
    }
}

fn clamp01(x: f64) -> f64 {
    x.clamp(0.0, 1.0)
}

// HSL -> RGB conversion (linear; sufficient for chart colors)
pub fn hsl_to_rgb8(hsl: Hsl) -> Rgb8 {
    let h = hsl.h_deg.rem_euclid(360.0) / 360.0;
    let s = clamp01(hsl.s);
    let l = clamp01(hsl.l);

    if s == 0.0 {
        let v = (l * 255.0).round() as u8;
        return Rgb8 { r: v, g: v, b: v };
    }

    let q = if l < 0.5 {
        l * (1.0 + s)
    } else {
        l + s - l * s
    };
    let p = 2.0 * l - q;

    fn hue_to_rgb(p: f64, q: f64, mut t: f64) -> f64 {
        if t < 0.0 {
            t += 1.0;
        }
        if t > 1.0 {
            t -= 1.0;
        }
        if t < 1.0 / 6.0 {
            p + (q - p) * 6.0 * t
        } else if t < 1.0 / 2.0 {
            q
        } else if t < 2.0 / 3.0 {
            p + (q - p) * (2.0 / 3.0 - t) * 6.0
        } else {
            p
        }
    }

    let r = hue_to_rgb(p, q, h + 1.0 / 3.0);
    let g = hue_to_rgb(p, q, h);
    let b = hue_to_rgb(p, q, h - 1.0 / 3.0);

    Rgb8 {
        r: (r * 255.0).round() as u8,
        g: (g * 255.0).round() as u8,
        b: (b * 255.0).round() as u8,
    }
}

/// Color for band `index` of `count`, interpolating `from → to` in HSL.
/// Components are rounded to whole degrees/percent before conversion.
pub fn ramp(from: Hsl, to: Hsl, index: usize, count: usize) -> Rgb8 {
    let t = if count > 1 {
        index as f64 / (count - 1) as f64
    } else {
        0.0
    };
    let mix = |a: f64, b: f64| (a * (1.0 - t) + b * t).round();
    hsl_to_rgb8(Hsl {
        h_deg: mix(from.h_deg, to.h_deg),
        s: mix(from.s * 100.0, to.s * 100.0) / 100.0,
        l: mix(from.l * 100.0, to.l * 100.0) / 100.0,
    })
}
