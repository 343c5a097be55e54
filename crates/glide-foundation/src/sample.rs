/// One touch-move or touch-end reading, in screen coordinates.
///
/// `dx`/`dy` are the cumulative displacement since the pointer went down
/// (y grows downwards); `vx`/`vy` are velocities in units per millisecond.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct GestureSample {
    pub dx: f32,
    pub dy: f32,
    pub vx: f32,
    pub vy: f32,
}

impl GestureSample {
    pub fn new(dx: f32, dy: f32, vx: f32, vy: f32) -> Self {
        Self { dx, dy, vx, vy }
    }

    /// Sample for a single vertical axis.
    pub fn vertical(dy: f32, vy: f32) -> Self {
        Self {
            dy,
            vy,
            ..Self::default()
        }
    }

    pub fn is_finite(&self) -> bool {
        self.dx.is_finite() && self.dy.is_finite() && self.vx.is_finite() && self.vy.is_finite()
    }
}
