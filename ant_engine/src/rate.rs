// rate.rs - Speed control to steps per second, drained on a fixed tick
// The tick is independent of how often anything is drawn.

use std::time::Duration;

use tokio::time::MissedTickBehavior;

use crate::engine::Engine;

// Speed control and tick configuration
pub const SLIDER_MAX: u32 = 100;                              // Control range is 0..=SLIDER_MAX
pub const MIN_RATE: f64 = 1.0;                                // Steps per second at 0
pub const MAX_RATE: f64 = 100_000.0;                          // Steps per second at SLIDER_MAX
pub const DEFAULT_RATE: u32 = 100;
pub const TICK_INTERVAL: Duration = Duration::from_millis(50);
pub const MAX_CATCH_UP_TICKS: u32 = 4;                        // Ticks one frame may replay

/// Logarithmic control curve: `10 ^ (log MIN + (log MAX - log MIN) * v / SLIDER_MAX)`.
pub fn slider_to_speed(value: u32) -> u32 {
    let fraction = f64::from(value.min(SLIDER_MAX)) / f64::from(SLIDER_MAX);
    let (lo, hi) = (MIN_RATE.log10(), MAX_RATE.log10());
    10f64.powf(lo + (hi - lo) * fraction).round() as u32
}

/// Control position that displays `rate`, for initializing the control.
pub fn speed_to_slider(rate: u32) -> u32 {
    let rate = f64::from(rate).clamp(MIN_RATE, MAX_RATE);
    let (lo, hi) = (MIN_RATE.log10(), MAX_RATE.log10());
    let value = (rate.log10() - lo) / (hi - lo) * f64::from(SLIDER_MAX);
    (value.round() as u32).min(SLIDER_MAX)
}

/// Target rate, pending fractional steps and the pause gate.
#[derive(Debug, Clone)]
pub struct RateController {
    steps_per_second: u32,
    accumulator: f64,
    paused: bool,
    tick: Duration,
    // Wall time seen by `catch_up` that has not yet filled a whole tick
    carry: Duration,
}

impl Default for RateController {
    fn default() -> Self {
        Self::new(DEFAULT_RATE)
    }
}

impl RateController {
    /// A paused controller at `steps_per_second`.
    pub fn new(steps_per_second: u32) -> Self {
        Self {
            steps_per_second,
            accumulator: 0.0,
            paused: true,
            tick: TICK_INTERVAL,
            carry: Duration::ZERO,
        }
    }

    pub fn steps_per_second(&self) -> u32 {
        self.steps_per_second
    }

    /// Fractional steps waiting for the next tick.
    pub fn pending(&self) -> f64 {
        self.accumulator
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Change the target rate. Pending steps are dropped so the old rate
    /// cannot leak into the new one.
    pub fn set_rate(&mut self, steps_per_second: u32) {
        tracing::debug!(steps_per_second, "rate changed");
        self.steps_per_second = steps_per_second;
        self.discard_pending();
    }

    pub fn set_slider(&mut self, value: u32) {
        self.set_rate(slider_to_speed(value));
    }

    pub fn slider(&self) -> u32 {
        speed_to_slider(self.steps_per_second)
    }

    pub fn pause(&mut self) {
        self.paused = true;
    }

    /// Start running. Coming out of a pause starts from an empty accumulator.
    pub fn resume(&mut self) {
        if self.paused {
            self.discard_pending();
        }
        self.paused = false;
    }

    pub fn toggle(&mut self) {
        if self.paused {
            self.resume();
        } else {
            self.pause();
        }
    }

    fn discard_pending(&mut self) {
        self.accumulator = 0.0;
        self.carry = Duration::ZERO;
    }

    /// One batch tick: accrue `rate * tick` steps and run the whole ones.
    /// Returns how many steps ran.
    pub fn tick(&mut self, engine: &mut Engine) -> u64 {
        if self.paused {
            return 0;
        }
        self.accumulator += f64::from(self.steps_per_second) * self.tick.as_secs_f64();
        let due = self.accumulator.floor();
        self.accumulator -= due;
        let due = due as u64;
        engine.step_n(due);
        due
    }

    /// Run every whole tick contained in `elapsed` plus the leftover from the
    /// previous call. Meant for a frame loop; the step rate still follows the
    /// fixed tick, not the frame rate. A long gap between frames replays at
    /// most `MAX_CATCH_UP_TICKS` ticks, the rest is dropped like a delayed
    /// interval tick.
    pub fn catch_up(&mut self, elapsed: Duration, engine: &mut Engine) -> u64 {
        if self.paused {
            return 0;
        }
        self.carry = (self.carry + elapsed).min(self.tick * MAX_CATCH_UP_TICKS);
        let mut ran = 0;
        while self.carry >= self.tick {
            self.carry -= self.tick;
            ran += self.tick(engine);
        }
        ran
    }

    /// Drive the engine from a tokio interval for `duration` of wall time.
    pub async fn run_for(&mut self, engine: &mut Engine, duration: Duration) -> u64 {
        let ticks = (duration.as_nanos() / self.tick.as_nanos().max(1)) as u64;
        let mut interval = tokio::time::interval(self.tick);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // The first tick completes immediately.
        interval.tick().await;

        let mut ran = 0;
        for _ in 0..ticks {
            interval.tick().await;
            ran += self.tick(engine);
            tokio::task::yield_now().await;
        }
        tracing::debug!(ticks, steps = ran, "driver finished");
        ran
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::CELL_SIZE;
    use crate::presets;
    use std::sync::Arc;

    fn engine_with_ant() -> Engine {
        let cfg = Arc::new(presets::PRESETS[0].build().unwrap());
        let mut engine = Engine::new(cfg, 64 * CELL_SIZE, 64 * CELL_SIZE);
        engine.add_ant(32, 32, None);
        engine
    }

    #[test]
    fn curve_endpoints() {
        assert_eq!(slider_to_speed(0), 1);
        assert_eq!(slider_to_speed(SLIDER_MAX), 100_000);
        assert_eq!(slider_to_speed(SLIDER_MAX / 2), 316);
        assert_eq!(speed_to_slider(1), 0);
        assert_eq!(speed_to_slider(100_000), SLIDER_MAX);
        assert_eq!(speed_to_slider(0), 0);
        assert_eq!(speed_to_slider(u32::MAX), SLIDER_MAX);
    }

    #[test]
    fn recovered_position_shows_the_same_rate() {
        for value in 0..=SLIDER_MAX {
            let rate = slider_to_speed(value);
            let back = speed_to_slider(rate);
            assert_eq!(slider_to_speed(back), rate, "control {value} -> {rate} -> {back}");
        }
    }

    #[test]
    fn exact_inverse_where_rates_are_distinct() {
        // From 100 steps/s upward every control unit is a distinct rate.
        for value in 40..=SLIDER_MAX {
            assert_eq!(speed_to_slider(slider_to_speed(value)), value);
        }
    }

    #[test]
    fn paused_controller_does_nothing() {
        let mut engine = engine_with_ant();
        let mut rate = RateController::new(1000);
        assert!(rate.is_paused());
        assert_eq!(rate.tick(&mut engine), 0);
        assert_eq!(rate.pending(), 0.0);
        assert_eq!(engine.steps(), 0);
    }

    #[test]
    fn fractions_carry_between_ticks() {
        let mut engine = engine_with_ant();
        // 30 steps/s at 50 ms is 1.5 steps per tick.
        let mut rate = RateController::new(30);
        rate.resume();
        assert_eq!(rate.tick(&mut engine), 1);
        assert!((rate.pending() - 0.5).abs() < 1e-9);
        assert_eq!(rate.tick(&mut engine), 2);
        assert_eq!(engine.steps(), 3);
    }

    #[test]
    fn long_run_matches_rate() {
        let mut engine = engine_with_ant();
        let mut rate = RateController::new(7);
        rate.resume();
        // 1000 ticks of 50 ms is 50 seconds.
        let ran: u64 = (0..1000).map(|_| rate.tick(&mut engine)).sum();
        assert!((ran as i64 - 350).abs() <= 1, "ran {ran}");
        assert_eq!(engine.steps(), ran);
    }

    #[test]
    fn rate_change_and_resume_drop_pending() {
        let mut engine = engine_with_ant();
        let mut rate = RateController::new(30);
        rate.resume();
        rate.tick(&mut engine);
        assert!(rate.pending() > 0.0);

        rate.set_slider(10);
        assert_eq!(rate.pending(), 0.0);
        assert_eq!(rate.steps_per_second(), slider_to_speed(10));

        rate.set_rate(30);
        rate.tick(&mut engine);
        rate.pause();
        assert!(rate.pending() > 0.0);
        rate.toggle();
        assert!(!rate.is_paused());
        assert_eq!(rate.pending(), 0.0);
    }

    #[test]
    fn frame_loop_follows_fixed_tick() {
        let mut engine = engine_with_ant();
        let mut rate = RateController::new(100);
        rate.resume();
        // Sixty 16 ms frames is 960 ms: 19 whole ticks of 5 steps.
        let ran: u64 = (0..60).map(|_| rate.catch_up(Duration::from_millis(16), &mut engine)).sum();
        assert_eq!(ran, 95);
    }

    #[test]
    fn long_frame_gap_is_capped() {
        let mut engine = engine_with_ant();
        let mut rate = RateController::new(MAX_RATE as u32);
        rate.resume();
        // 5000 steps per tick; a minute-long frame must not replay a minute.
        let ran = rate.catch_up(Duration::from_secs(60), &mut engine);
        assert_eq!(ran, 5000 * u64::from(MAX_CATCH_UP_TICKS));
        assert_eq!(engine.steps(), ran);

        // The dropped time does not come back on the next frame.
        assert_eq!(rate.catch_up(Duration::from_millis(10), &mut engine), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn async_driver_runs_ticks() {
        let mut engine = engine_with_ant();
        let mut rate = RateController::new(200);
        rate.resume();
        let ran = rate.run_for(&mut engine, Duration::from_secs(2)).await;
        assert_eq!(ran, 400);
        assert_eq!(engine.steps(), 400);
    }
}
