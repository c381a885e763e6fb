//! Fixed-timestep accumulator decoupling simulation from rendering.

use std::time::Duration;

/// Simulation step applied per update, one sixtieth of a second.
pub(crate) const SIMULATION_STEP: Duration = Duration::from_nanos(16_666_667);

/// Longest frame delta the accumulator will absorb in one go.
///
/// Frames stalled longer than this (window drags, breakpoints) would
/// otherwise trigger a burst of catch-up steps.
const MAX_FRAME: Duration = Duration::from_secs(1);

/// Accumulates rendered frame time and doles it out in fixed steps.
#[derive(Clone, Copy, Debug)]
pub(crate) struct FixedTimestep {
    step: Duration,
    accumulator: Duration,
}

impl FixedTimestep {
    /// Creates an accumulator producing steps of the provided length.
    #[must_use]
    pub(crate) const fn new(step: Duration) -> Self {
        Self {
            step,
            accumulator: Duration::ZERO,
        }
    }

    /// Absorbs one rendered frame and returns how many fixed steps it covers.
    ///
    /// The remainder below one step stays in the accumulator and is carried
    /// into the next frame.
    pub(crate) fn advance(&mut self, frame: Duration) -> u32 {
        self.accumulator += frame.min(MAX_FRAME);

        let mut steps = 0;
        while self.accumulator > self.step {
            self.accumulator -= self.step;
            steps += 1;
        }
        steps
    }

    /// Length of one fixed step.
    #[must_use]
    pub(crate) const fn step(&self) -> Duration {
        self.step
    }
}

impl Default for FixedTimestep {
    fn default() -> Self {
        Self::new(SIMULATION_STEP)
    }
}
