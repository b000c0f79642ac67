use approx::assert_relative_eq;
use income_pictogram::bands::derive;
use income_pictogram::dataset::belstat;
use income_pictogram::{AxisScale, ChartError, DerivedBand, ScalePolicy};
use proptest::prelude::*;

fn bundled() -> Vec<DerivedBand> {
    derive(&belstat()).unwrap().bands
}

#[test]
fn population_ticks_follow_people_share() {
    let bands = bundled();
    let scale = AxisScale::new(&bands, 1200.0, 20.0, ScalePolicy::PopulationProportional).unwrap();
    let ticks = scale.ticks();
    assert_eq!(ticks.len(), bands.len() + 1);
    assert_relative_eq!(ticks[0], 20.0);
    assert_relative_eq!(ticks[ticks.len() - 1], 1180.0, max_relative = 1e-12);

    let total: f64 = bands.iter().map(|b| b.people).sum();
    for (i, b) in bands.iter().enumerate() {
        let (left, right) = scale.band_span(b).unwrap();
        assert_relative_eq!(right - left, 1160.0 * b.people / total, max_relative = 1e-9);
        assert_relative_eq!(left, ticks[i], max_relative = 1e-12);
    }
}

#[test]
fn midpoint_lands_in_the_middle_of_its_band() {
    let bands = bundled();
    let scale = AxisScale::new(&bands, 1000.0, 20.0, ScalePolicy::default()).unwrap();
    let b = &bands[2];
    let (left, right) = scale.band_span(b).unwrap();
    assert_relative_eq!(scale.scale_x(b.mid_usd()).unwrap(), (left + right) / 2.0, max_relative = 1e-9);
}

#[test]
fn values_outside_the_bands_are_rejected() {
    let bands = bundled();
    let scale = AxisScale::new(&bands, 1200.0, 20.0, ScalePolicy::default()).unwrap();
    let (_, max) = scale.domain();
    match scale.scale_x(max + 1.0) {
        Err(ChartError::OutOfDomain { value, .. }) => assert_relative_eq!(value, max + 1.0),
        other => panic!("expected OutOfDomain, got {other:?}"),
    }
    assert!(scale.scale_x(-1.0).is_err());
}

#[test]
fn range_policy_is_linear_above_the_floor() {
    let bands = bundled();
    let policy = ScalePolicy::RangeProportional { floor_usd: Some(12.0) };
    let scale = AxisScale::new(&bands, 1200.0, 20.0, policy).unwrap();
    let (_, max) = scale.domain();

    assert_relative_eq!(scale.scale_x(0.0).unwrap(), 20.0);
    assert_relative_eq!(scale.scale_x(12.0).unwrap(), 20.0);
    assert_relative_eq!(scale.scale_x(max).unwrap(), 1180.0, max_relative = 1e-12);

    let a = scale.scale_x(100.0).unwrap();
    let b = scale.scale_x(200.0).unwrap();
    let c = scale.scale_x(300.0).unwrap();
    assert_relative_eq!(b - a, c - b, max_relative = 1e-9);
}

#[test]
fn viewport_without_room_is_rejected() {
    let bands = bundled();
    assert!(AxisScale::new(&bands, 40.0, 20.0, ScalePolicy::default()).is_err());
    assert!(AxisScale::new(&[], 1200.0, 20.0, ScalePolicy::default()).is_err());
}

proptest! {
    #[test]
    fn scale_is_monotonic(a in 0.0f64..1.0, b in 0.0f64..1.0, width in 300.0f64..2400.0, range in any::<bool>()) {
        let bands = bundled();
        let policy = if range {
            ScalePolicy::RangeProportional { floor_usd: None }
        } else {
            ScalePolicy::PopulationProportional
        };
        let scale = AxisScale::new(&bands, width, 20.0, policy).unwrap();
        let (min, max) = scale.domain();
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        let x_lo = scale.scale_x(min + lo * (max - min)).unwrap();
        let x_hi = scale.scale_x(min + hi * (max - min)).unwrap();
        prop_assert!(x_lo <= x_hi + 1e-9);
        prop_assert!(x_lo >= 20.0 - 1e-9 && x_hi <= width - 20.0 + 1e-9);
    }
}
