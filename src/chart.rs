//! Chart composition: derives the bands, builds the axis scale, packs every
//! icon bar and assembles the drawable tree.
//!
//! Layout in logical coordinates (width clamped to the configured range):
//! - shaded grid stripes behind every other band;
//! - a horizontal baseline slightly below the middle, with USD tick labels at
//!   band boundaries;
//! - money bars growing up from the baseline, people bars growing down;
//! - at the bottom, income and taxes bars growing left and right from the centre.

use crate::bands;
use crate::config::{ChartConfig, IconDensity};
use crate::error::{ChartError, ChartResult};
use crate::format::{format_long, format_short};
use crate::models::{Derivation, DerivedBand, StatInput};
use crate::pack::{self, Direction, PackedBar};
use crate::scale::AxisScale;
use crate::viz::icons::{IconRenderer, MoneyIcon, PersonIcon};
use crate::viz::node::{Document, Node, Transform};
use crate::viz::palette::ramp;
use crate::viz::text::{first_fitting, label, HAlign, VAlign};

/// Geometry and icon counts chosen for one band.
#[derive(Debug, Clone, PartialEq)]
pub struct BandLayout {
    pub left: f64,
    pub right: f64,
    pub rows: usize,
    pub thickness: f64,
    pub money_icons: usize,
    pub people_icons: usize,
    pub money_label: String,
    pub people_label: String,
}

/// The income-vs-taxes comparison at the bottom of the chart.
#[derive(Debug, Clone, PartialEq)]
pub struct Totals {
    pub rows: usize,
    pub usd_per_icon: f64,
    pub income_usd: f64,
    pub taxes_usd: f64,
    pub income_icons: usize,
    pub taxes_icons: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Layout {
    pub width: f64,
    pub height: f64,
    pub baseline_y: f64,
    pub usd_per_icon: f64,
    pub people_per_icon: f64,
    pub bands: Vec<BandLayout>,
    pub totals: Totals,
}

/// A composed chart: the drawable tree plus the numbers it was built from.
#[derive(Debug, Clone, PartialEq)]
pub struct Chart {
    pub document: Document,
    pub derivation: Derivation,
    pub layout: Layout,
}

/// Compose the chart for a physical size of `width × height` pixels.
///
/// ### Errors
/// Any derivation, scaling or packing error aborts the whole chart, as does a
/// viewport too small to hold the bars.
pub fn compose(
    input: &StatInput,
    width: f64,
    height: f64,
    config: &ChartConfig,
) -> ChartResult<Chart> {
    if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
        return Err(ChartError::InvalidViewport { width, height });
    }

    let derivation = bands::derive(input)?;
    let bands = &derivation.bands;
    let (w, h) = config.logical_size(width, height);
    let scale = AxisScale::new(bands, w, config.padding, config.scale)?;
    let baseline_y = h / 2.0 + config.baseline_offset;

    let (usd_per_icon, people_per_icon) = icon_density(input, bands, &scale, (w, h), config)?;
    log::debug!("icon density: {usd_per_icon:.0} USD, {people_per_icon:.0} people per icon");

    let mut grid = Vec::new();
    let mut ticks = Vec::new();
    let mut money = Vec::new();
    let mut people = Vec::new();
    let mut band_layouts = Vec::with_capacity(bands.len());

    for (i, band) in bands.iter().enumerate() {
        let (left, right) = scale.band_span(band)?;
        if i % 2 == 1 {
            grid.push(Node::rect(
                left,
                config.padding,
                right - left,
                h - 2.0 * config.padding,
                config.grid_fill,
            ));
        }
        if i > 0 {
            ticks.push(label(
                left,
                baseline_y,
                config.bar_label_size,
                HAlign::Center,
                VAlign::Center,
                Some("tick-label"),
                format!(
                    "{}${}",
                    config.captions.tick_prefix,
                    (band.from_usd / 5.0).round() * 5.0
                ),
            ));
        }

        let bar_width = right - left - 2.0 * config.bar_padding;
        let fitted = (bar_width / config.icon_size).floor();
        let rows = if fitted >= 1.0 {
            fitted as usize
        } else {
            log::warn!("band {i} is {bar_width:.1}px wide, narrower than one icon");
            1
        };
        let thickness = rows as f64 * config.icon_size;
        let center_x = scale.scale_x(band.mid_usd())?;

        let money_icons = icon_count(band.total_usd, usd_per_icon)?;
        let money_label = fitted_number(band.total_usd, "$", thickness, config.bar_label_size);
        let money_bar = pack::pack(
            money_icons,
            rows,
            thickness,
            Direction::ToTop,
            Some(&money_label),
        )?;
        money.push(bar_node(
            (center_x, baseline_y - config.bar_padding - config.bar_label_size / 2.0),
            &money_bar,
            &MoneyIcon { color: config.money_color },
            config.bar_label_size,
        ));

        let people_icons = icon_count(band.people, people_per_icon)?;
        let people_label = fitted_number(band.people, "", thickness, config.bar_label_size);
        let people_bar = pack::pack(
            people_icons,
            rows,
            thickness,
            Direction::ToBottom,
            Some(&people_label),
        )?;
        let color = ramp(config.people_color_from, config.people_color_to, i, bands.len());
        people.push(bar_node(
            (center_x, baseline_y + config.bar_padding + config.bar_label_size / 2.0),
            &people_bar,
            &PersonIcon { color },
            config.bar_label_size,
        ));

        band_layouts.push(BandLayout {
            left,
            right,
            rows,
            thickness,
            money_icons,
            people_icons,
            money_label,
            people_label,
        });
    }

    let (totals_node, totals) = compose_totals(input, &derivation, w, h, config)?;

    let captions = &config.captions;
    let children = vec![
        Node::classed_group("grid", grid),
        Node::classed_group("ticks", ticks),
        Node::classed_group("money", money),
        Node::classed_group("people", people),
        label(
            w / 2.0,
            config.padding,
            config.title_size,
            HAlign::Center,
            VAlign::Bottom,
            Some("chart-title"),
            captions.title.clone(),
        ),
        label(
            w - config.padding,
            baseline_y,
            config.bar_label_size,
            HAlign::Left,
            VAlign::Center,
            Some("axis-label"),
            captions.axis.clone(),
        ),
        totals_node,
    ];

    let document = Document {
        width,
        height,
        view_width: w,
        view_height: h,
        children,
    };
    log::info!(
        "composed chart {width}x{height} (logical {w:.0}x{h:.0}), {} nodes",
        document.node_count()
    );

    Ok(Chart {
        document,
        layout: Layout {
            width: w,
            height: h,
            baseline_y,
            usd_per_icon,
            people_per_icon,
            bands: band_layouts,
            totals,
        },
        derivation,
    })
}

fn icon_density(
    input: &StatInput,
    bands: &[DerivedBand],
    scale: &AxisScale,
    (w, h): (f64, f64),
    config: &ChartConfig,
) -> ChartResult<(f64, f64)> {
    let (money, people) = match config.density {
        IconDensity::Fixed { money_per_icon, people_per_icon } => (money_per_icon, people_per_icon),
        IconDensity::Densest => {
            let icon_area = config.icon_size * config.icon_size;
            let half = h / 2.0 - config.padding;

            let densest = bands
                .iter()
                .filter(|b| b.people > 0.0)
                .max_by(|a, b| a.usd_per_person().total_cmp(&b.usd_per_person()))
                .ok_or_else(|| ChartError::InconsistentData("no band has people".into()))?;
            let (left, right) = scale.band_span(densest)?;
            let money_area = (right - left - 2.0 * config.bar_padding) * config.money_height_ratio * half;

            let (first, last) = (&bands[0], &bands[bands.len() - 1]);
            let span = scale.scale_x(last.to_usd)? - scale.scale_x(first.from_usd)?;
            let people_area = (span - 2.0 * config.bar_padding) * config.people_height_ratio * half;

            if !(money_area > 0.0 && people_area > 0.0) {
                return Err(ChartError::InvalidViewport { width: w, height: h });
            }
            (
                densest.total_usd / (money_area / icon_area),
                input.people / (people_area / icon_area),
            )
        }
    };
    if !(money.is_finite() && money > 0.0 && people.is_finite() && people > 0.0) {
        return Err(ChartError::InconsistentData(format!(
            "icon values must be positive, got {money} USD and {people} people per icon"
        )));
    }
    Ok((money, people))
}

fn compose_totals(
    input: &StatInput,
    derivation: &Derivation,
    w: f64,
    h: f64,
    config: &ChartConfig,
) -> ChartResult<(Node, Totals)> {
    let totals_height = h * config.totals_height_ratio;
    let rows = ((totals_height / config.icon_size).floor() as usize).max(1);
    let thickness = rows as f64 * config.icon_size;
    let income_usd = derivation.all_usd;
    let taxes_usd = derivation.taxes_usd;
    let largest = income_usd.max(taxes_usd);
    if !(largest > 0.0) {
        return Err(ChartError::InconsistentData("no income to compare against taxes".into()));
    }
    let usd_per_icon = largest / (rows * rows) as f64;
    let income_icons = icon_count(income_usd, usd_per_icon)?;
    let taxes_icons = icon_count(taxes_usd, usd_per_icon)?;

    let salary = format_short(derivation.avg_salary_usd);
    let working = format_short(input.working_people);
    let income_label = format!(
        "${salary} × {working} × (1 − {}%) + ${} × {} = ${} {}",
        input.tax_percent,
        format_short(derivation.avg_pension_usd),
        format_short(input.retired_people),
        format_long(income_usd),
        config.captions.income,
    );
    let taxes_label = format!(
        "{} ${salary} × {working} × ({}% + {}%) = ${}",
        config.captions.taxes,
        input.tax_percent,
        input.social_tax_percent,
        format_long(taxes_usd),
    );

    let anchor = (w / 2.0, h - config.padding - totals_height / 2.0);
    let income_bar = pack::pack(income_icons, rows, thickness, Direction::ToLeft, Some(&income_label))?;
    let taxes_bar = pack::pack(taxes_icons, rows, thickness, Direction::ToRight, Some(&taxes_label))?;
    let node = Node::classed_group(
        "totals",
        vec![
            bar_node(anchor, &income_bar, &MoneyIcon { color: config.money_color }, config.bar_label_size),
            bar_node(anchor, &taxes_bar, &MoneyIcon { color: config.taxes_color }, config.bar_label_size),
        ],
    );

    Ok((
        node,
        Totals {
            rows,
            usd_per_icon,
            income_usd,
            taxes_usd,
            income_icons,
            taxes_icons,
        },
    ))
}

/// Upper bound on the icons of a single bar.
const MAX_ICONS_PER_BAR: f64 = 1_000_000.0;

fn icon_count(amount: f64, per_icon: f64) -> ChartResult<usize> {
    let count = (amount / per_icon).round().max(0.0);
    if !(count.is_finite() && count <= MAX_ICONS_PER_BAR) {
        return Err(ChartError::InvalidInput(format!(
            "{amount} at {per_icon} per icon needs {count} icons, more than {MAX_ICONS_PER_BAR}"
        )));
    }
    Ok(count as usize)
}

/// Space-grouped number when it fits across the bar, compact form otherwise.
fn fitted_number(value: f64, prefix: &str, thickness: f64, font_px: f64) -> String {
    let long = format!("{prefix}{}", format_long(value));
    let short = format!("{prefix}{}", format_short(value));
    first_fitting(&[&long, &short], font_px, thickness).to_string()
}

fn bar_node(
    anchor: (f64, f64),
    bar: &PackedBar,
    icon: &dyn IconRenderer,
    label_size: f64,
) -> Node {
    let mut children: Vec<Node> = bar
        .icons
        .iter()
        .map(|p| icon.draw(p.x, p.y, p.size))
        .collect();
    if let Some(l) = &bar.label {
        children.push(label(l.x, l.y, label_size, l.halign, l.valign, Some("bar-label"), l.text.clone()));
    }
    Node::group(Transform::translate(anchor.0, anchor.1), children)
}
