//! Panel configuration and its validation.

use glide_animation::TweenSpec;
use glide_core::{DraggableRange, MotionConfig, RangeError};

/// Everything a host sets up front when creating a [`crate::SlidingPanel`].
#[derive(Clone, Debug, PartialEq)]
pub struct PanelConfig {
    pub draggable_range: DraggableRange,
    /// Extra resting positions between the rails. Empty means free flicks.
    pub snapping_points: Vec<f32>,
    /// Damping factor in `(0, 1]` for release momentum.
    pub friction: f32,
    pub allow_dragging: bool,
    pub allow_momentum: bool,
    /// Backdrop opacity with the panel fully open, in `[0, 1]`.
    pub backdrop_opacity: f32,
    pub avoid_keyboard: bool,
    /// Gap kept between a focused element and the keyboard.
    pub keyboard_margin: f32,
    /// Height of the window the keyboard rises into.
    pub viewport_height: f32,
    /// Timing of `show`/`hide` and keyboard displacement.
    pub tween: TweenSpec,
    pub motion: MotionConfig,
}

impl PanelConfig {
    pub const DEFAULT_BACKDROP_OPACITY: f32 = 0.75;
    pub const DEFAULT_KEYBOARD_MARGIN: f32 = 16.0;

    /// Defaults for a panel spanning `[0, viewport_height]`.
    pub fn new(viewport_height: f32) -> Self {
        let motion = MotionConfig::default();
        Self {
            draggable_range: DraggableRange {
                bottom: 0.0,
                top: viewport_height,
            },
            snapping_points: Vec::new(),
            friction: motion.default_friction,
            allow_dragging: true,
            allow_momentum: true,
            backdrop_opacity: Self::DEFAULT_BACKDROP_OPACITY,
            avoid_keyboard: true,
            keyboard_margin: Self::DEFAULT_KEYBOARD_MARGIN,
            viewport_height,
            tween: TweenSpec::default(),
            motion,
        }
    }

    pub fn with_draggable_range(mut self, range: DraggableRange) -> Self {
        self.draggable_range = range;
        self
    }

    pub fn with_snapping_points(mut self, points: impl Into<Vec<f32>>) -> Self {
        self.snapping_points = points.into();
        self
    }

    pub fn with_friction(mut self, friction: f32) -> Self {
        self.friction = friction;
        self
    }

    pub fn with_allow_dragging(mut self, allow: bool) -> Self {
        self.allow_dragging = allow;
        self
    }

    pub fn with_allow_momentum(mut self, allow: bool) -> Self {
        self.allow_momentum = allow;
        self
    }

    pub fn with_backdrop_opacity(mut self, opacity: f32) -> Self {
        self.backdrop_opacity = opacity;
        self
    }

    pub fn with_avoid_keyboard(mut self, avoid: bool) -> Self {
        self.avoid_keyboard = avoid;
        self
    }

    pub fn with_keyboard_margin(mut self, margin: f32) -> Self {
        self.keyboard_margin = margin;
        self
    }

    pub fn with_tween(mut self, tween: TweenSpec) -> Self {
        self.tween = tween;
        self
    }

    pub fn with_motion(mut self, motion: MotionConfig) -> Self {
        self.motion = motion;
        self
    }

    /// Checks every field, returning the first problem found.
    pub fn validate(&self) -> Result<(), PanelError> {
        let range = self.draggable_range;
        DraggableRange::new(range.bottom, range.top).map_err(PanelError::Range)?;

        if let Some((index, value)) = self
            .snapping_points
            .iter()
            .copied()
            .enumerate()
            .find(|(_, value)| !value.is_finite())
        {
            return Err(PanelError::SnappingPoint { index, value });
        }

        if !(self.friction.is_finite() && self.friction > 0.0 && self.friction <= 1.0) {
            return Err(PanelError::Friction(self.friction));
        }

        if !(0.0..=1.0).contains(&self.backdrop_opacity) {
            return Err(PanelError::BackdropOpacity(self.backdrop_opacity));
        }

        let motion = &self.motion;
        let thresholds = [
            ("time_constant_ms", motion.time_constant_ms, false),
            ("min_delta_threshold", motion.min_delta_threshold, true),
            ("min_distance_threshold", motion.min_distance_threshold, true),
            ("min_velocity_threshold", motion.min_velocity_threshold, true),
            ("prediction_step_ms", motion.prediction_step_ms, false),
            ("keyboard_margin", self.keyboard_margin, true),
            ("viewport_height", self.viewport_height, true),
        ];
        for (name, value, zero_allowed) in thresholds {
            let valid = value.is_finite() && (value > 0.0 || (zero_allowed && value == 0.0));
            if !valid {
                return Err(PanelError::Threshold { name, value });
            }
        }
        Ok(())
    }
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self::new(800.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PanelError {
    Range(RangeError),
    SnappingPoint { index: usize, value: f32 },
    Friction(f32),
    BackdropOpacity(f32),
    Threshold { name: &'static str, value: f32 },
}

impl std::fmt::Display for PanelError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PanelError::Range(err) => write!(f, "invalid draggable range: {err}"),
            PanelError::SnappingPoint { index, value } => {
                write!(f, "snapping point {index} is not finite: {value}")
            }
            PanelError::Friction(value) => {
                write!(f, "friction must lie in (0, 1], got {value}")
            }
            PanelError::BackdropOpacity(value) => {
                write!(f, "backdrop opacity must lie in [0, 1], got {value}")
            }
            PanelError::Threshold { name, value } => write!(f, "invalid {name}: {value}"),
        }
    }
}

impl std::error::Error for PanelError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PanelError::Range(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RangeError> for PanelError {
    fn from(err: RangeError) -> Self {
        PanelError::Range(err)
    }
}
