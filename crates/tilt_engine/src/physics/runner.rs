//! Fixed-timestep driver for the physics world
//!
//! The simulation advances on its own cadence, independent of the render
//! frame rate. The host pumps elapsed wall time in; the runner converts it to
//! zero or more fixed-size steps through an accumulator. Starting and
//! stopping are explicit: scene teardown must call `stop`, nothing cancels
//! the driver implicitly.

/// Default fixed timestep (60 steps per second)
pub const DEFAULT_FIXED_DT: f32 = 1.0 / 60.0;

/// Upper bound on catch-up steps per pump, so a long stall cannot
/// spiral the simulation
const MAX_CATCH_UP_STEPS: u32 = 8;

/// Fixed-timestep accumulator
#[derive(Debug, Clone)]
pub struct StepRunner {
    fixed_dt: f32,
    accumulator: f32,
    running: bool,
}

impl Default for StepRunner {
    fn default() -> Self {
        Self::new(DEFAULT_FIXED_DT)
    }
}

impl StepRunner {
    /// Create a stopped runner with the given fixed timestep in seconds
    pub fn new(fixed_dt: f32) -> Self {
        Self {
            fixed_dt,
            accumulator: 0.0,
            running: false,
        }
    }

    /// Fixed timestep in seconds
    pub fn fixed_dt(&self) -> f32 {
        self.fixed_dt
    }

    /// Start advancing; subsequent pumps produce steps
    pub fn start(&mut self) {
        self.running = true;
    }

    /// Stop advancing and discard any accumulated time
    pub fn stop(&mut self) {
        self.running = false;
        self.accumulator = 0.0;
    }

    /// Whether the driver is currently running
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Convert elapsed wall time into a number of fixed steps to take
    ///
    /// Returns zero while stopped. Time beyond the catch-up bound is dropped
    /// rather than simulated.
    pub fn pump(&mut self, elapsed: f32) -> u32 {
        if !self.running {
            return 0;
        }
        self.accumulator += elapsed.max(0.0);

        let mut steps = 0;
        while self.accumulator >= self.fixed_dt && steps < MAX_CATCH_UP_STEPS {
            self.accumulator -= self.fixed_dt;
            steps += 1;
        }
        if steps == MAX_CATCH_UP_STEPS {
            // Drop the backlog instead of spiralling
            self.accumulator = 0.0;
        }
        steps
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stopped_runner_produces_no_steps() {
        let mut runner = StepRunner::default();
        assert_eq!(runner.pump(1.0), 0);
    }

    #[test]
    fn test_elapsed_time_converts_to_fixed_steps() {
        let mut runner = StepRunner::new(1.0 / 60.0);
        runner.start();
        assert_eq!(runner.pump(3.5 / 60.0), 3);
        // The remaining half step stays in the accumulator
        assert_eq!(runner.pump(0.6 / 60.0), 1);
    }

    #[test]
    fn test_catch_up_is_bounded() {
        let mut runner = StepRunner::new(1.0 / 60.0);
        runner.start();
        assert_eq!(runner.pump(10.0), MAX_CATCH_UP_STEPS);
        // Backlog was dropped, not deferred
        assert_eq!(runner.pump(0.0), 0);
    }

    #[test]
    fn test_stop_discards_accumulated_time() {
        let mut runner = StepRunner::new(1.0 / 60.0);
        runner.start();
        runner.pump(0.5 / 60.0);
        runner.stop();
        runner.start();
        assert_eq!(runner.pump(0.6 / 60.0), 0);
    }
}
