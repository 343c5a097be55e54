//! Release velocity estimation for drag gestures.
//!
//! Impulse strategy: every pair of consecutive samples contributes the work
//! needed to change the pointer's kinetic energy, and the final energy is
//! turned back into a velocity. This is far less sensitive to a single noisy
//! sample than a two-point difference.

/// Ring buffer size.
const HISTORY_SIZE: usize = 20;

/// Samples older than this (relative to the newest) are ignored.
pub const HORIZON_MS: i64 = 100;

/// A gap this long between samples means the pointer had stopped.
pub const ASSUME_STOPPED_MS: i64 = 40;

#[derive(Clone, Copy, Debug, Default)]
struct Sample {
    time_ms: i64,
    position: f32,
}

/// Single-axis velocity tracker fed with absolute positions.
#[derive(Clone, Debug)]
pub struct VelocityTracker1D {
    samples: [Option<Sample>; HISTORY_SIZE],
    newest: usize,
}

impl Default for VelocityTracker1D {
    fn default() -> Self {
        Self::new()
    }
}

impl VelocityTracker1D {
    pub fn new() -> Self {
        Self {
            samples: [None; HISTORY_SIZE],
            newest: 0,
        }
    }

    /// Records the pointer at `position` at `time_ms`.
    pub fn add_sample(&mut self, time_ms: i64, position: f32) {
        self.newest = (self.newest + 1) % HISTORY_SIZE;
        self.samples[self.newest] = Some(Sample { time_ms, position });
    }

    /// Velocity in units per second; zero without enough recent movement.
    pub fn velocity(&self) -> f32 {
        let Some(newest) = self.samples[self.newest] else {
            return 0.0;
        };

        // Walk backwards from the newest sample, stopping at the horizon or
        // at the first pause.
        let mut positions = [0.0f32; HISTORY_SIZE];
        let mut ages = [0.0f32; HISTORY_SIZE];
        let mut count = 0;
        let mut index = self.newest;
        let mut previous_time = newest.time_ms;
        while count < HISTORY_SIZE {
            let Some(sample) = self.samples[index] else {
                break;
            };
            let age = newest.time_ms - sample.time_ms;
            let gap = (previous_time - sample.time_ms).abs();
            if age > HORIZON_MS || gap > ASSUME_STOPPED_MS {
                break;
            }
            // Compared against the newest sample, not the neighbour.
            previous_time = newest.time_ms;
            positions[count] = sample.position;
            ages[count] = -(age as f32);
            count += 1;
            index = index.checked_sub(1).unwrap_or(HISTORY_SIZE - 1);
        }

        if count < 2 {
            return 0.0;
        }
        impulse_velocity(&positions[..count], &ages[..count]) * 1_000.0
    }

    /// [`Self::velocity`] clamped to `±max_velocity`.
    pub fn velocity_with_max(&self, max_velocity: f32) -> f32 {
        if !max_velocity.is_finite() || max_velocity <= 0.0 {
            return 0.0;
        }
        let velocity = self.velocity();
        if !velocity.is_finite() {
            return 0.0;
        }
        velocity.clamp(-max_velocity, max_velocity)
    }

    pub fn reset(&mut self) {
        self.samples = [None; HISTORY_SIZE];
        self.newest = 0;
    }
}

/// Velocity in units per millisecond from samples ordered newest first.
fn impulse_velocity(positions: &[f32], times: &[f32]) -> f32 {
    let oldest = positions.len() - 1;
    let mut work = 0.0f32;
    for i in (1..=oldest).rev() {
        let dt = times[i] - times[i - 1];
        if dt == 0.0 {
            continue;
        }
        let segment_velocity = (positions[i] - positions[i - 1]) / dt;
        let previous_velocity = energy_to_velocity(work);
        work += (segment_velocity - previous_velocity) * segment_velocity.abs();
        if i == oldest {
            work *= 0.5;
        }
    }
    energy_to_velocity(work)
}

/// `E = v² / 2` with unit mass, keeping the sign.
#[inline]
fn energy_to_velocity(energy: f32) -> f32 {
    energy.signum() * (2.0 * energy.abs()).sqrt()
}

#[cfg(test)]
#[path = "tests/velocity_tracker_tests.rs"]
mod tests;
