//! Snapping points a released panel can settle on.

use glide_core::DraggableRange;
use smallvec::SmallVec;

/// Returns the entry of `sorted` closest to `value`.
///
/// `sorted` must be in ascending order. On an exact tie the entry with the
/// lower index wins. Returns `None` for an empty slice or a NaN `value`.
pub fn closest(value: f32, sorted: &[f32]) -> Option<f32> {
    if value.is_nan() {
        return None;
    }
    debug_assert!(
        sorted.windows(2).all(|pair| pair[0] <= pair[1]),
        "anchors must be sorted: {sorted:?}"
    );
    // First index whose anchor is not below `value`.
    let upper = sorted.partition_point(|anchor| *anchor < value);
    match (upper.checked_sub(1).map(|i| sorted[i]), sorted.get(upper)) {
        (Some(below), Some(&above)) => {
            if value - below <= above - value {
                Some(below)
            } else {
                Some(above)
            }
        }
        (Some(below), None) => Some(below),
        (None, above) => above.copied(),
    }
}

/// Sorted, de-duplicated resting positions including both range ends.
#[derive(Clone, Debug, PartialEq)]
pub struct AnchorSet {
    points: SmallVec<[f32; 8]>,
}

impl AnchorSet {
    /// Builds the set from host-supplied snapping points.
    ///
    /// Points that are not finite or lie outside `range` are dropped.
    pub fn new(points: &[f32], range: DraggableRange) -> Self {
        let mut anchors: SmallVec<[f32; 8]> = points
            .iter()
            .copied()
            .filter(|point| point.is_finite() && range.contains(*point))
            .collect();
        if anchors.len() != points.len() {
            log::debug!(
                "dropped {} snapping points outside [{}, {}]",
                points.len() - anchors.len(),
                range.bottom,
                range.top
            );
        }
        anchors.push(range.bottom);
        anchors.push(range.top);
        anchors.sort_by(f32::total_cmp);
        anchors.dedup();
        Self { points: anchors }
    }

    pub fn points(&self) -> &[f32] {
        &self.points
    }

    /// Only the range ends, no extra snapping points.
    pub fn is_trivial(&self) -> bool {
        self.points.len() <= 2
    }

    pub fn closest_to(&self, value: f32) -> Option<f32> {
        closest(value, &self.points)
    }
}

#[cfg(test)]
#[path = "tests/anchors_tests.rs"]
mod tests;
