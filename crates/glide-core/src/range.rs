//! Draggable range of a panel.

use std::fmt;

/// Inclusive interval of valid panel positions.
///
/// `bottom` is the fully closed resting position and `top` the fully open
/// one; positions grow from `bottom` toward `top`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DraggableRange {
    pub bottom: f32,
    pub top: f32,
}

impl DraggableRange {
    pub fn new(bottom: f32, top: f32) -> Result<Self, RangeError> {
        if !bottom.is_finite() || !top.is_finite() {
            return Err(RangeError::NonFinite { bottom, top });
        }
        if bottom > top {
            return Err(RangeError::Inverted { bottom, top });
        }
        Ok(Self { bottom, top })
    }

    pub fn min(&self) -> f32 {
        self.bottom
    }

    pub fn max(&self) -> f32 {
        self.top
    }

    pub fn span(&self) -> f32 {
        self.top - self.bottom
    }

    pub fn contains(&self, value: f32) -> bool {
        value >= self.bottom && value <= self.top
    }

    pub fn clamp(&self, value: f32) -> f32 {
        clamp_position(value, self.bottom, self.top)
    }

    /// Whether `value` sits exactly on one of the two rails.
    pub fn is_at_boundary(&self, value: f32) -> bool {
        value == self.bottom || value == self.top
    }
}

/// Clamps `value` into `[min, max]`.
///
/// Unlike [`f32::clamp`] an inverted pair does not panic in release builds;
/// it yields `max`.
pub fn clamp_position(value: f32, min: f32, max: f32) -> f32 {
    debug_assert!(min <= max, "inverted bounds [{min}, {max}]");
    value.max(min).min(max)
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum RangeError {
    NonFinite { bottom: f32, top: f32 },
    Inverted { bottom: f32, top: f32 },
}

impl fmt::Display for RangeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RangeError::NonFinite { bottom, top } => {
                write!(f, "draggable range bounds must be finite, got [{bottom}, {top}]")
            }
            RangeError::Inverted { bottom, top } => {
                write!(f, "draggable range bottom {bottom} lies above top {top}")
            }
        }
    }
}

impl std::error::Error for RangeError {}
