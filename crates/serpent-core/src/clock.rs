/// Fixed-timestep accumulator.
///
/// The outer loop calls [`FixedStep::begin_frame`] once per rendered frame
/// with a monotonic millisecond timestamp, then drains [`FixedStep::step`]
/// until it returns false. Simulation therefore advances in whole
/// fixed-size ticks regardless of frame render time: zero steps on a fast
/// frame, several on a slow one.
#[derive(Debug)]
pub struct FixedStep {
    interval_ms: u64,
    last_ms: Option<u64>,
    accumulator_ms: u64,
}

impl FixedStep {
    pub fn new(interval_ms: u64) -> Self {
        assert!(interval_ms > 0, "tick interval must be positive");
        Self {
            interval_ms,
            last_ms: None,
            accumulator_ms: 0,
        }
    }

    /// Fold the elapsed time since the previous frame into the accumulator.
    pub fn begin_frame(&mut self, now_ms: u64) {
        let delta = match self.last_ms {
            Some(last) => now_ms.saturating_sub(last),
            None => 0,
        };
        self.last_ms = Some(now_ms);
        self.accumulator_ms += delta;
    }

    /// Consume one tick interval if enough time has accumulated.
    pub fn step(&mut self) -> bool {
        if self.accumulator_ms >= self.interval_ms {
            self.accumulator_ms -= self.interval_ms;
            true
        } else {
            false
        }
    }

    pub fn interval_ms(&self) -> u64 {
        self.interval_ms
    }
}
