//! Tunables shared by the drag arbiter and the flick engine.

/// Motion tunables for a panel.
///
/// Units: positions in device-independent units, velocities in units per
/// millisecond, times in milliseconds.
///
/// Release velocity enters the decay law unscaled. The first step moves
/// about `velocity / friction` and the whole flick covers less than twenty
/// times the release velocity, so a 2 units/ms release travels under 40
/// units. Hosts that want longer throws scale the velocity they report.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MotionConfig {
    /// Decay time constant of the flick simulation.
    pub time_constant_ms: f32,
    /// A flick without target halts once a step moves less than this.
    pub min_delta_threshold: f32,
    /// Drag distance a gesture must exceed before the panel captures it.
    pub min_distance_threshold: f32,
    /// Release speed a gesture must exceed to start a flick.
    pub min_velocity_threshold: f32,
    /// Friction used when the host does not supply one, in `(0, 1]`.
    pub default_friction: f32,
    /// Number of frames summed when predicting a landing position.
    pub prediction_horizon_steps: u32,
    /// Frame duration assumed by the landing prediction.
    pub prediction_step_ms: f32,
}

impl MotionConfig {
    pub const TIME_CONSTANT_MS: f32 = 325.0;
    pub const MIN_DELTA_THRESHOLD: f32 = 0.5;
    pub const MIN_DISTANCE_THRESHOLD: f32 = 0.24;
    pub const MIN_VELOCITY_THRESHOLD: f32 = 0.1;
    pub const DEFAULT_FRICTION: f32 = 0.998;
    pub const PREDICTION_HORIZON_STEPS: u32 = 60;
    pub const PREDICTION_STEP_MS: f32 = 1000.0 / 60.0;

    pub fn with_time_constant(mut self, time_constant_ms: f32) -> Self {
        self.time_constant_ms = time_constant_ms;
        self
    }

    pub fn with_min_delta_threshold(mut self, threshold: f32) -> Self {
        self.min_delta_threshold = threshold;
        self
    }

    pub fn with_min_distance_threshold(mut self, threshold: f32) -> Self {
        self.min_distance_threshold = threshold;
        self
    }

    pub fn with_min_velocity_threshold(mut self, threshold: f32) -> Self {
        self.min_velocity_threshold = threshold;
        self
    }

    pub fn with_default_friction(mut self, friction: f32) -> Self {
        self.default_friction = friction;
        self
    }

    pub fn with_prediction_horizon(mut self, steps: u32, step_ms: f32) -> Self {
        self.prediction_horizon_steps = steps;
        self.prediction_step_ms = step_ms;
        self
    }

    /// Whether every tunable is finite and positive (thresholds may be zero).
    pub fn is_valid(&self) -> bool {
        let positive = |v: f32| v.is_finite() && v > 0.0;
        let non_negative = |v: f32| v.is_finite() && v >= 0.0;
        positive(self.time_constant_ms)
            && non_negative(self.min_delta_threshold)
            && non_negative(self.min_distance_threshold)
            && non_negative(self.min_velocity_threshold)
            && positive(self.default_friction)
            && self.default_friction <= 1.0
            && positive(self.prediction_step_ms)
    }
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            time_constant_ms: Self::TIME_CONSTANT_MS,
            min_delta_threshold: Self::MIN_DELTA_THRESHOLD,
            min_distance_threshold: Self::MIN_DISTANCE_THRESHOLD,
            min_velocity_threshold: Self::MIN_VELOCITY_THRESHOLD,
            default_friction: Self::DEFAULT_FRICTION,
            prediction_horizon_steps: Self::PREDICTION_HORIZON_STEPS,
            prediction_step_ms: Self::PREDICTION_STEP_MS,
        }
    }
}
