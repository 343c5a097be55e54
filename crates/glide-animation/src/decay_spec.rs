//! Exponential decay used by flick animations.
//!
//! A flick moves the panel by a per-frame delta that shrinks exponentially
//! with the time elapsed since release:
//!
//! ```text
//! delta(t) = -(velocity / friction) * e^(-t / time_constant)
//! ```
//!
//! Velocity is expressed along the screen axis of the gesture, so a positive
//! velocity (finger moving down) drives the value toward `min`.

use glide_core::MotionConfig;

/// Decay curve parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExponentialDecaySpec {
    time_constant_ms: f32,
    min_delta: f32,
    horizon_steps: u32,
    step_ms: f32,
}

impl ExponentialDecaySpec {
    pub fn new(time_constant_ms: f32, min_delta: f32) -> Self {
        Self {
            time_constant_ms,
            min_delta,
            horizon_steps: MotionConfig::PREDICTION_HORIZON_STEPS,
            step_ms: MotionConfig::PREDICTION_STEP_MS,
        }
    }

    pub fn from_config(config: &MotionConfig) -> Self {
        Self {
            time_constant_ms: config.time_constant_ms,
            min_delta: config.min_delta_threshold,
            horizon_steps: config.prediction_horizon_steps,
            step_ms: config.prediction_step_ms,
        }
    }

    pub fn time_constant_ms(&self) -> f32 {
        self.time_constant_ms
    }

    /// Deltas smaller than this end a free flick.
    pub fn min_delta(&self) -> f32 {
        self.min_delta
    }

    /// Whether a flick with these inputs can move at all.
    ///
    /// Zero, negative or non-finite friction and zero or non-finite velocity
    /// all mean "no motion".
    pub fn is_moving(velocity: f32, friction: f32) -> bool {
        velocity.is_finite() && velocity != 0.0 && friction.is_finite() && friction > 0.0
    }

    /// Raw decay term for a frame `elapsed_ms` after release.
    pub fn delta_at(&self, elapsed_ms: f32, velocity: f32, friction: f32) -> f32 {
        if !Self::is_moving(velocity, friction) {
            return 0.0;
        }
        let delta = -(velocity / friction) * (-elapsed_ms.max(0.0) / self.time_constant_ms).exp();
        if delta.is_finite() {
            delta
        } else {
            0.0
        }
    }

    /// Delta to apply when homing in on a target: never smaller than
    /// [`Self::min_delta`], so the flick keeps nudging until it arrives.
    pub fn homing_delta(&self, raw_delta: f32) -> f32 {
        if raw_delta == 0.0 {
            return 0.0;
        }
        raw_delta.signum() * raw_delta.abs().max(self.min_delta)
    }

    /// Sums the decay series over the prediction horizon.
    ///
    /// Pure: estimates where a free flick released at `from_value` would be
    /// after `horizon_steps` frames of `step_ms`. The horizon does not scale
    /// with friction; tune it through [`MotionConfig::with_prediction_horizon`].
    pub fn predict(&self, from_value: f32, velocity: f32, friction: f32) -> f32 {
        if !from_value.is_finite() || !Self::is_moving(velocity, friction) {
            return from_value;
        }
        (1..=self.horizon_steps).fold(from_value, |value, step| {
            value + self.delta_at(step as f32 * self.step_ms, velocity, friction)
        })
    }
}

impl Default for ExponentialDecaySpec {
    fn default() -> Self {
        Self::from_config(&MotionConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delta_decays_over_time() {
        let spec = ExponentialDecaySpec::default();
        let early = spec.delta_at(16.0, 5.0, 0.26);
        let late = spec.delta_at(320.0, 5.0, 0.26);
        assert!(early < 0.0, "positive velocity moves toward min");
        assert!(late.abs() < early.abs());
        assert!((spec.delta_at(0.0, 5.0, 0.26) + 5.0 / 0.26).abs() < 1e-4);
    }

    #[test]
    fn test_degenerate_inputs_do_not_move() {
        let spec = ExponentialDecaySpec::default();
        assert_eq!(spec.delta_at(16.0, 0.0, 0.5), 0.0);
        assert_eq!(spec.delta_at(16.0, f32::NAN, 0.5), 0.0);
        assert_eq!(spec.delta_at(16.0, 2.0, 0.0), 0.0);
        assert_eq!(spec.delta_at(16.0, 2.0, f32::INFINITY), 0.0);
        assert_eq!(spec.predict(10.0, f32::INFINITY, 0.5), 10.0);
    }

    #[test]
    fn test_homing_delta_is_floored() {
        let spec = ExponentialDecaySpec::default();
        assert_eq!(spec.homing_delta(-0.01), -0.5);
        assert_eq!(spec.homing_delta(0.2), 0.5);
        assert_eq!(spec.homing_delta(3.0), 3.0);
    }

    #[test]
    fn test_prediction_sums_horizon() {
        let spec = ExponentialDecaySpec::new(325.0, 0.5);
        let predicted = spec.predict(0.0, 1.0, 1.0);
        let expected: f32 = (1..=60)
            .map(|step| -(-(step as f32) * (1000.0 / 60.0) / 325.0).exp())
            .sum();
        assert!((predicted - expected).abs() < 1e-3);

        let longer = ExponentialDecaySpec::from_config(
            &MotionConfig::default().with_prediction_horizon(120, 1000.0 / 60.0),
        );
        assert!(longer.predict(0.0, 1.0, 1.0) < predicted);
    }
}
