//! Interactive rendering session: re-composes the chart whenever the surface
//! is resized, throttled to animation frames.

use anyhow::Result;

use crate::chart::{self, Chart};
use crate::config::ChartConfig;
use crate::models::StatInput;
use crate::schedule::FrameScheduler;
use crate::viz::mount::{self, Patch, Surface};
use crate::viz::node::Document;

pub struct Session<S: Surface> {
    input: StatInput,
    config: ChartConfig,
    surface: S,
    scheduler: FrameScheduler,
    mounted: Option<Document>,
    renders: usize,
}

impl<S: Surface> Session<S> {
    pub fn new(input: StatInput, config: ChartConfig, surface: S) -> Self {
        Self {
            input,
            config,
            surface,
            scheduler: FrameScheduler::new(),
            mounted: None,
            renders: 0,
        }
    }

    /// Initial render. It occupies the current frame, so resizes arriving
    /// before the next tick are coalesced like any other burst.
    pub fn start(&mut self) -> Result<Patch> {
        self.scheduler.request();
        self.render()
    }

    /// The container was resized. Renders immediately unless a render already
    /// ran in this frame, in which case one follow-up is queued for the next tick.
    pub fn resize(&mut self) -> Result<Option<Patch>> {
        if self.scheduler.request() {
            self.render().map(Some)
        } else {
            Ok(None)
        }
    }

    /// An animation frame elapsed.
    pub fn frame(&mut self) -> Result<Option<Patch>> {
        if self.scheduler.tick() {
            self.render().map(Some)
        } else {
            Ok(None)
        }
    }

    /// Compose for the surface's current width and mount the result.
    pub fn render(&mut self) -> Result<Patch> {
        let (width, _) = self.surface.measure();
        let height = width * self.config.container_aspect;
        let Chart { document, .. } = chart::compose(&self.input, width, height, &self.config)?;
        let patch = mount::mount(&mut self.surface, &document, self.mounted.as_ref())?;
        self.mounted = Some(document);
        self.renders += 1;
        Ok(patch)
    }

    /// Number of renders executed so far.
    pub fn renders(&self) -> usize {
        self.renders
    }

    pub fn mounted(&self) -> Option<&Document> {
        self.mounted.as_ref()
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }
}
