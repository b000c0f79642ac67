use approx::assert_relative_eq;
use income_pictogram::dataset::belstat;
use income_pictogram::viz::node::Node;
use income_pictogram::{compose, ChartConfig, ChartError, IconDensity, RawBand, StatInput};

#[test]
fn bundled_chart_has_every_part() {
    let config = ChartConfig::default();
    let chart = compose(&belstat(), 1200.0, 500.0, &config).unwrap();

    assert_eq!(chart.derivation.bands.len(), 6);
    assert_eq!(chart.layout.bands.len(), 6);
    for class in ["grid", "ticks", "money", "people", "totals"] {
        assert!(chart.document.find_class(class).is_some(), "missing group {class}");
    }

    // shaded stripes behind every other band
    assert_eq!(chart.document.find_class("grid").unwrap().children.len(), 3);

    let ticks = &chart.document.find_class("ticks").unwrap().children;
    assert_eq!(ticks.len(), 5);
    for t in ticks {
        match t {
            Node::Text(t) => assert!(t.content.starts_with("up to $"), "{}", t.content),
            other => panic!("tick is not text: {other:?}"),
        }
    }

    let texts = chart.document.texts();
    assert!(texts.iter().any(|t| t.content == config.captions.title));
    assert!(chart.document.node_count() > 100);
}

#[test]
fn bands_tile_the_axis_left_to_right() {
    let chart = compose(&belstat(), 1200.0, 500.0, &ChartConfig::default()).unwrap();
    let bands = &chart.layout.bands;
    assert_relative_eq!(bands[0].left, 20.0);
    assert_relative_eq!(bands[5].right, 1180.0, max_relative = 1e-9);
    for pair in bands.windows(2) {
        assert_relative_eq!(pair[0].right, pair[1].left, max_relative = 1e-9);
    }
    for b in bands {
        assert!(b.rows >= 1);
        assert_relative_eq!(b.thickness, b.rows as f64 * 16.0);
        assert!(b.thickness <= b.right - b.left);
        assert!(!b.money_label.is_empty() && !b.people_label.is_empty());
        assert!(b.money_label.starts_with('$'));
    }
}

#[test]
fn densest_band_fills_the_money_area() {
    let config = ChartConfig::default();
    let chart = compose(&belstat(), 1200.0, 500.0, &config).unwrap();
    let d = &chart.derivation;
    let densest = d
        .bands
        .iter()
        .enumerate()
        .max_by(|a, b| a.1.usd_per_person().total_cmp(&b.1.usd_per_person()))
        .map(|(i, _)| i)
        .unwrap();
    let l = &chart.layout.bands[densest];
    let half = 500.0 / 2.0 - 20.0;
    let expected = (l.right - l.left - 4.0) * 0.7 * half / (16.0 * 16.0);
    assert!((l.money_icons as f64 - expected).abs() <= 1.0);

    let people_icons: usize = chart.layout.bands.iter().map(|b| b.people_icons).sum();
    let expected_people = (1160.0 - 4.0) * 0.3 * half / (16.0 * 16.0);
    // per-band rounding drifts by at most half an icon per band
    assert!((people_icons as f64 - expected_people).abs() <= 3.0);
}

#[test]
fn totals_compare_income_and_taxes() {
    let chart = compose(&belstat(), 1200.0, 500.0, &ChartConfig::default()).unwrap();
    let t = &chart.layout.totals;
    assert_eq!(t.rows, 4); // floor(500 / 7 / 16)
    assert_eq!(t.income_icons, t.rows * t.rows);
    assert!(t.taxes_icons < t.income_icons);
    assert_relative_eq!(t.income_usd, chart.derivation.all_usd);

    let totals = chart.document.find_class("totals").unwrap();
    let mut labels = Vec::new();
    for c in &totals.children {
        c.texts(&mut labels);
    }
    assert_eq!(labels.len(), 2);
    assert!(labels.iter().any(|l| l.content.contains("2 013 623 9")));
}

#[test]
fn narrow_viewport_is_scaled_from_the_minimum_width() {
    let chart = compose(&belstat(), 400.0, 200.0, &ChartConfig::default()).unwrap();
    assert_relative_eq!(chart.document.width, 400.0);
    assert_relative_eq!(chart.document.view_width, 800.0);
    assert_relative_eq!(chart.document.view_height, 400.0);
    assert_relative_eq!(chart.document.viewport_scale(), 0.5);
}

#[test]
fn range_layout_uses_fixed_icon_values() {
    let config = ChartConfig::range_layout();
    let chart = compose(&belstat(), 1200.0, 500.0, &config).unwrap();
    assert_relative_eq!(chart.layout.usd_per_icon, 5_000_000.0);
    assert_relative_eq!(chart.layout.people_per_icon, 100_000.0);
    let people: usize = chart.layout.bands.iter().map(|b| b.people_icons).sum();
    assert!((90..=100).contains(&people));
    assert_relative_eq!(chart.layout.baseline_y, 262.0);
}

#[test]
fn composing_twice_gives_the_same_tree() {
    let config = ChartConfig::default();
    let a = compose(&belstat(), 1024.0, 426.0, &config).unwrap();
    let b = compose(&belstat(), 1024.0, 426.0, &config).unwrap();
    assert_eq!(a, b);
}

#[test]
fn bad_viewport_fails() {
    let config = ChartConfig::default();
    for (w, h) in [(0.0, 500.0), (1200.0, -1.0), (f64::NAN, 500.0)] {
        assert!(matches!(
            compose(&belstat(), w, h, &config),
            Err(ChartError::InvalidViewport { .. })
        ));
    }
}

#[test]
fn inconsistent_input_fails_the_whole_chart() {
    let input = StatInput {
        bands: vec![
            RawBand::closed(0.0, 100_000.0, 90.0),
            RawBand::open(100_000.0, 10.0),
        ],
        ..belstat()
    };
    assert!(matches!(
        compose(&input, 1200.0, 500.0, &ChartConfig::default()),
        Err(ChartError::InconsistentData(_))
    ));
}

#[test]
fn fixed_density_must_be_positive() {
    let config = ChartConfig {
        density: IconDensity::Fixed { money_per_icon: 0.0, people_per_icon: 1.0 },
        ..ChartConfig::default()
    };
    assert!(compose(&belstat(), 1200.0, 500.0, &config).is_err());
}

#[test]
fn tiny_fixed_density_is_rejected_instead_of_allocating() {
    let config = ChartConfig {
        density: IconDensity::Fixed { money_per_icon: 1e-300, people_per_icon: 1.0 },
        ..ChartConfig::default()
    };
    assert!(matches!(
        compose(&belstat(), 1200.0, 500.0, &config),
        Err(ChartError::InvalidInput(_))
    ));
}
