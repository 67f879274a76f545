use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::WheelError;
use crate::items::Item;
use crate::segments::{self, Segment};
use crate::spin::{self, SpinResult, SpinState};

/// One user's wheel: the current segment partition plus the spin state that survives
/// between spins.
#[derive(Debug)]
pub struct WheelSession<R: Rng = StdRng> {
    segments: Vec<Segment>,
    state: SpinState,
    last_result: Option<SpinResult>,
    rng: R,
}

impl WheelSession<StdRng> {
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }
}

impl Default for WheelSession<StdRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> WheelSession<R> {
    pub fn with_rng(rng: R) -> Self {
        Self {
            segments: Vec::new(),
            state: SpinState::new(),
            last_result: None,
            rng,
        }
    }

    /// Rebuilds the partition from `items`. The rotation is left alone so the wheel does not
    /// jump when the list changes.
    pub fn replace_items(&mut self, items: &[Item]) {
        self.segments = segments::build(items);
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn state(&self) -> SpinState {
        self.state
    }

    pub fn is_animating(&self) -> bool {
        self.state.is_animating
    }

    pub fn last_result(&self) -> Option<&SpinResult> {
        self.last_result.as_ref()
    }

    /// Starts a spin. Returns `Ok(None)` without touching anything while a previous spin is
    /// still animating; repeat triggers are dropped, not queued.
    pub fn trigger_spin(&mut self) -> Result<Option<SpinResult>, WheelError> {
        if self.state.is_animating {
            log::debug!("Spin trigger ignored while the wheel is animating");
            return Ok(None);
        }

        let result = spin::spin(&mut self.state, &self.segments, &mut self.rng)?;
        self.last_result = Some(result.clone());
        Ok(Some(result))
    }

    /// Called once the animation window has elapsed.
    pub fn complete_spin(&mut self) -> Option<&SpinResult> {
        self.state.is_animating = false;
        self.last_result.as_ref()
    }
}
