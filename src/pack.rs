//! Icon-grid packing for pictogram bars.
//!
//! A bar of `thickness` pixels holds `rows` icons side by side; icons fill one
//! such column after another, growing away from the anchor. A trailing partial
//! column is centered across the bar.

use crate::error::{ChartError, ChartResult};
use crate::viz::text::{HAlign, VAlign};
use serde::{Deserialize, Serialize};

/// Gutter kept around each icon, as a fraction of the cell size.
pub const CELL_PADDING: f64 = 0.1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Direction {
    ToTop,
    ToBottom,
    ToLeft,
    ToRight,
}

impl Direction {
    /// Label alignment so the text reads away from the anchor, centered across the bar.
    fn label_align(self) -> (HAlign, VAlign) {
        match self {
            Direction::ToLeft => (HAlign::Left, VAlign::Center),
            Direction::ToRight => (HAlign::Right, VAlign::Center),
            Direction::ToTop => (HAlign::Center, VAlign::Top),
            Direction::ToBottom => (HAlign::Center, VAlign::Bottom),
        }
    }

    /// Map (across, along) bar coordinates to (x, y).
    fn orient(self, across: f64, along: f64) -> (f64, f64) {
        match self {
            Direction::ToTop => (across, -along),
            Direction::ToBottom => (across, along),
            Direction::ToLeft => (-along, across),
            Direction::ToRight => (along, across),
        }
    }
}

/// Centre and size of one icon, relative to the bar anchor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IconPlacement {
    pub x: f64,
    pub y: f64,
    pub size: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LabelPlacement {
    pub x: f64,
    pub y: f64,
    pub halign: HAlign,
    pub valign: VAlign,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PackedBar {
    /// Icon count of each column, in growth order.
    pub columns: Vec<usize>,
    pub cell_size: f64,
    pub icons: Vec<IconPlacement>,
    pub label: Option<LabelPlacement>,
}

impl PackedBar {
    /// Extent of the icons along the growth direction.
    pub fn length(&self) -> f64 {
        self.columns.len() as f64 * self.cell_size
    }
}

/// Lay out `count` icons in columns of `rows` across a bar `thickness` pixels wide.
///
/// ### Errors
/// `InvalidPacking` when `rows` is zero or `thickness` is not a positive finite number.
pub fn pack(
    count: usize,
    rows: usize,
    thickness: f64,
    direction: Direction,
    label: Option<&str>,
) -> ChartResult<PackedBar> {
    if rows < 1 {
        return Err(ChartError::InvalidPacking("rows must be at least 1".into()));
    }
    if !(thickness.is_finite() && thickness > 0.0) {
        return Err(ChartError::InvalidPacking(format!(
            "thickness must be positive, got {thickness}"
        )));
    }

    let full = count / rows;
    let mut columns = vec![rows; full];
    if count % rows > 0 {
        columns.push(count % rows);
    }

    let cell_size = thickness / rows as f64;
    let icon_size = cell_size * (1.0 - CELL_PADDING * 2.0);

    let mut icons = Vec::with_capacity(count);
    for (i, &filled) in columns.iter().enumerate() {
        let centering = if filled < rows {
            (rows - filled) as f64 * cell_size / 2.0
        } else {
            0.0
        };
        let along = cell_size / 2.0 + cell_size * i as f64;
        for j in 0..filled {
            let across = -thickness / 2.0 + cell_size / 2.0 + cell_size * j as f64 + centering;
            let (x, y) = direction.orient(across, along);
            icons.push(IconPlacement { x, y, size: icon_size });
        }
    }

    let label = label.map(|text| {
        let (halign, valign) = direction.label_align();
        let offset = cell_size * columns.len() as f64 + cell_size * CELL_PADDING;
        let (x, y) = direction.orient(0.0, offset);
        LabelPlacement { x, y, halign, valign, text: text.to_string() }
    });

    Ok(PackedBar { columns, cell_size, icons, label })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_column_is_centered() {
        let bar = pack(5, 3, 30.0, Direction::ToTop, None).unwrap();
        assert_eq!(bar.columns, vec![3, 2]);
        // second column holds two icons, shifted by half a cell
        let second: Vec<_> = bar.icons[3..].iter().map(|p| p.x).collect();
        assert_eq!(second, vec![-5.0, 5.0]);
        assert_eq!(bar.icons[0].x, -10.0);
        assert_eq!(bar.icons[0].y, -5.0);
        assert_eq!(bar.icons[3].y, -15.0);
    }

    #[test]
    fn zero_rows_is_rejected() {
        assert!(matches!(
            pack(3, 0, 16.0, Direction::ToLeft, None),
            Err(ChartError::InvalidPacking(_))
        ));
        assert!(pack(3, 2, -1.0, Direction::ToLeft, None).is_err());
    }
}
