//! Keeping a focused element above the on-screen keyboard.

use glide_core::DraggableRange;

/// Frame of an element in window coordinates (y grows downwards).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ElementLayout {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl ElementLayout {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }
}

/// Measures an element on screen. Implemented by the hosting view layer.
pub trait ElementMeasure {
    /// Current window frame, or `None` if the element is not laid out.
    fn measure(&self) -> Option<ElementLayout>;
}

impl ElementMeasure for ElementLayout {
    fn measure(&self) -> Option<ElementLayout> {
        Some(*self)
    }
}

impl<F> ElementMeasure for F
where
    F: Fn() -> Option<ElementLayout>,
{
    fn measure(&self) -> Option<ElementLayout> {
        self()
    }
}

/// How far the panel must rise so `layout` clears a keyboard of
/// `keyboard_height`, keeping `margin` between the two. Zero when the
/// element is already visible.
pub fn keyboard_overlap(
    layout: &ElementLayout,
    viewport_height: f32,
    keyboard_height: f32,
    margin: f32,
) -> f32 {
    let keyboard_top = viewport_height - keyboard_height;
    let overlap = layout.bottom() + margin - keyboard_top;
    if overlap.is_finite() && overlap > 0.0 {
        overlap
    } else {
        0.0
    }
}

/// What to put back once the keyboard goes away.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct KeyboardDisplacement {
    pub restore_value: f32,
    pub original_range: DraggableRange,
    /// A drag after displacement means the user chose a new position.
    pub user_dragged: bool,
}
