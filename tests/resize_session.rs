use anyhow::Result;
use approx::assert_relative_eq;
use income_pictogram::dataset::belstat;
use income_pictogram::session::Session;
use income_pictogram::viz::{render, Document, Patch, RenderTarget, Rendered, Surface};
use income_pictogram::{compose, ChartConfig};
use proptest::prelude::*;

/// Surface that only remembers what it was asked to show.
#[derive(Default)]
struct Recorder {
    width: f64,
    applied: Vec<(f64, Patch)>,
}

impl Recorder {
    fn new(width: f64) -> Self {
        Self { width, applied: Vec::new() }
    }
}

impl Surface for Recorder {
    fn measure(&self) -> (f64, f64) {
        (self.width, 0.0)
    }

    fn apply(&mut self, document: &Document, patch: &Patch) -> Result<()> {
        self.applied.push((document.width, patch.clone()));
        Ok(())
    }
}

fn session(width: f64) -> Session<Recorder> {
    Session::new(belstat(), ChartConfig::default(), Recorder::new(width))
}

#[test]
fn first_render_replaces_everything() {
    let mut s = session(1200.0);
    assert_eq!(s.start().unwrap(), Patch::Replace);
    assert_eq!(s.renders(), 1);
    let doc = s.mounted().unwrap();
    assert_relative_eq!(doc.width, 1200.0);
    assert_relative_eq!(doc.height, 500.0);
    assert_eq!(s.surface().applied.len(), 1);
}

#[test]
fn same_size_leaves_the_surface_alone() {
    let mut s = session(1000.0);
    s.start().unwrap();
    s.frame().unwrap();
    assert_eq!(s.resize().unwrap(), Some(Patch::Unchanged));
    assert_eq!(s.renders(), 2);
    assert_eq!(s.surface().applied.len(), 1);
}

#[test]
fn resize_in_the_first_frame_waits_for_the_next_tick() {
    let mut s = session(1200.0);
    s.start().unwrap();
    s.surface_mut().width = 1000.0;
    assert_eq!(s.resize().unwrap(), None);
    assert_eq!(s.renders(), 1);

    assert_eq!(s.frame().unwrap(), Some(Patch::Replace));
    assert_eq!(s.renders(), 2);
    assert_relative_eq!(s.mounted().unwrap().width, 1000.0);
}

#[test]
fn resize_burst_renders_once_per_frame() {
    let mut s = session(1200.0);
    s.start().unwrap();
    s.frame().unwrap();

    for w in [1100.0, 1000.0, 900.0] {
        s.surface_mut().width = w;
        s.resize().unwrap();
    }
    // one immediate render for the first event of the burst
    assert_eq!(s.renders(), 2);
    assert_relative_eq!(s.mounted().unwrap().width, 1100.0);

    // the coalesced follow-up catches up with the latest size
    assert_eq!(s.frame().unwrap(), Some(Patch::Replace));
    assert_eq!(s.renders(), 3);
    assert_relative_eq!(s.mounted().unwrap().width, 900.0);

    assert_eq!(s.frame().unwrap(), None);
    assert_eq!(s.renders(), 3);
}

#[test]
fn mount_target_reports_the_patch() {
    let config = ChartConfig::default();
    let mut surface = Recorder::new(1200.0);
    let a = compose(&belstat(), 1200.0, 500.0, &config).unwrap();
    let first = render(&a.document, RenderTarget::Mount(&mut surface), None).unwrap();
    assert_eq!(first, Rendered::Mounted(Patch::Replace));
    let again = render(&a.document, RenderTarget::Mount(&mut surface), Some(&a.document)).unwrap();
    assert_eq!(again, Rendered::Mounted(Patch::Unchanged));
    assert_eq!(surface.applied.len(), 1);
}

#[derive(Debug, Clone)]
enum Event {
    Resize(f64),
    Frame,
}

fn event() -> impl Strategy<Value = Event> {
    prop_oneof![
        (600.0f64..1600.0).prop_map(Event::Resize),
        Just(Event::Frame),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn throttled_session_never_loses_the_last_size(events in prop::collection::vec(event(), 1..24)) {
        let mut s = session(1200.0);
        s.start().unwrap();
        // the initial render belongs to the first frame
        let mut in_frame = 1usize;

        for e in &events {
            match *e {
                Event::Resize(w) => {
                    s.surface_mut().width = w;
                    if s.resize().unwrap().is_some() {
                        in_frame += 1;
                    }
                }
                Event::Frame => {
                    in_frame = usize::from(s.frame().unwrap().is_some());
                }
            }
            prop_assert!(in_frame <= 1);
        }

        s.frame().unwrap();
        s.frame().unwrap();
        let latest = s.surface().width;
        prop_assert!((s.mounted().unwrap().width - latest).abs() < 1e-9);
    }
}
