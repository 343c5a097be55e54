//! Scripted walkthrough of a panel: open, close, drag, keyboard, fling.

use glide_core::DraggableRange;
use glide_panel::{
    ElementLayout, PanelConfig, PanelError, PointerInput, ShowRequest, SlidingPanel,
};

pub const VIEWPORT_HEIGHT: f32 = 800.0;
pub const PANEL_TOP: f32 = 600.0;
pub const HALF_OPEN: f32 = 300.0;
pub const KEYBOARD_HEIGHT: f32 = 300.0;

/// Advances a runtime until the panel stops moving.
pub trait FramePump {
    /// Returns how many frames ran.
    fn settle(&mut self) -> usize;
}

/// Where the panel rested after one scripted step.
#[derive(Clone, Debug, PartialEq)]
pub struct Step {
    pub label: &'static str,
    pub value: f32,
    pub frames: usize,
    pub backdrop: f32,
}

pub fn panel_config() -> Result<PanelConfig, PanelError> {
    let range = DraggableRange::new(0.0, PANEL_TOP)?;
    Ok(PanelConfig::new(VIEWPORT_HEIGHT)
        .with_draggable_range(range)
        .with_snapping_points(vec![HALF_OPEN]))
}

/// Text field near the bottom edge of the open panel.
pub fn focused_field() -> ElementLayout {
    ElementLayout::new(24.0, 560.0, 320.0, 40.0)
}

pub fn run(panel: &SlidingPanel, pump: &mut dyn FramePump) -> Vec<Step> {
    let mut steps = Vec::new();
    let mut record = |label: &'static str, frames: usize| {
        let value = panel.value();
        log::info!("{label}: rested at {value} after {frames} frames");
        steps.push(Step {
            label,
            value,
            frames,
            backdrop: panel.backdrop_opacity(),
        });
    };

    panel.show(ShowRequest::Top);
    record("show", pump.settle());

    panel.hide();
    record("hide", pump.settle());

    swipe_up(panel, 600.0, 200.0);
    record("swipe", pump.settle());

    panel.keyboard_shown(KEYBOARD_HEIGHT, &focused_field());
    record("keyboard shown", pump.settle());

    panel.keyboard_hidden();
    record("keyboard hidden", pump.settle());

    panel.show(ShowRequest::Fling {
        to_value: PANEL_TOP * 0.75,
        velocity: 2.0,
    });
    record("fling", pump.settle());

    steps
}

/// Feeds a quick upward swipe of `distance` starting at window `y`.
fn swipe_up(panel: &SlidingPanel, y: f32, distance: f32) {
    const STEPS: i64 = 5;
    const FRAME_MS: i64 = 16;

    panel.handle_pointer(PointerInput::down(0, 160.0, y));
    for step in 1..=STEPS {
        let travelled = distance * step as f32 / STEPS as f32;
        panel.handle_pointer(PointerInput::moved(step * FRAME_MS, 160.0, y - travelled));
    }
    panel.handle_pointer(PointerInput::up((STEPS + 1) * FRAME_MS, 160.0, y - distance));
}

#[cfg(test)]
#[path = "tests/scenario_tests.rs"]
mod tests;
