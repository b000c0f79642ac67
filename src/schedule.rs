//! Resize throttling: at most one render per animation frame, with bursts of
//! resize events inside a frame coalesced into a single follow-up render.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FrameState {
    /// No render in this frame yet.
    #[default]
    Idle,
    /// A render ran in the current frame.
    Rendering,
    /// A render ran and more resizes arrived before the frame ended.
    RenderingWithPending,
}

/// Two-state frame scheduler driven by resize requests and frame ticks.
#[derive(Debug, Clone, Default)]
pub struct FrameScheduler {
    state: FrameState,
}

impl FrameScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> FrameState {
        self.state
    }

    /// A resize happened. Returns `true` when the caller must render now.
    pub fn request(&mut self) -> bool {
        match self.state {
            FrameState::Idle => {
                self.state = FrameState::Rendering;
                true
            }
            FrameState::Rendering | FrameState::RenderingWithPending => {
                self.state = FrameState::RenderingWithPending;
                false
            }
        }
    }

    /// An animation frame elapsed. Returns `true` when the coalesced pending
    /// render must run now; that render occupies the next frame in turn.
    pub fn tick(&mut self) -> bool {
        match self.state {
            FrameState::Idle | FrameState::Rendering => {
                self.state = FrameState::Idle;
                false
            }
            FrameState::RenderingWithPending => {
                self.state = FrameState::Rendering;
                true
            }
        }
    }
}
