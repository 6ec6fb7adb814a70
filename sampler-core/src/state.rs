use serde::{Deserialize, Serialize};

use crate::constants::{GAP_APPROACH_WINDOW, PIPE_BODY_WIDTH, PIPE_SCROLL_SPEED};

/// Hypothetical bird state during prediction. Positions are not clamped to the
/// screen here; the boundary energy term penalizes out-of-band positions.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BirdState {
    pub position: f64,
    pub velocity: f64,
    pub time_step: u32,
}

impl BirdState {
    pub fn new(position: f64, velocity: f64) -> Self {
        Self {
            position,
            velocity,
            time_step: 0,
        }
    }
}

/// Read-only snapshot of one pipe. `distance` is measured from the bird to the
/// pipe's leading edge and goes negative once the bird is inside the body.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PipeContext {
    pub distance: f64,
    pub gap_top: f64,
    pub gap_bottom: f64,
}

impl PipeContext {
    pub fn gap_center(&self) -> f64 {
        (self.gap_top + self.gap_bottom) * 0.5
    }

    pub fn gap_half_height(&self) -> f64 {
        (self.gap_bottom - self.gap_top) * 0.5
    }

    /// Where this pipe will sit after `steps` simulated frames of scrolling.
    pub fn advanced(&self, steps: u32) -> Self {
        Self {
            distance: self.distance - f64::from(steps) * PIPE_SCROLL_SPEED,
            ..*self
        }
    }

    /// The bird is horizontally inside the pipe body.
    pub fn overlaps_body(&self) -> bool {
        self.distance <= 0.0 && self.distance >= -PIPE_BODY_WIDTH
    }

    /// Close enough ahead (or overlapping) for the gap term to steer.
    pub fn in_approach_window(&self) -> bool {
        self.distance <= GAP_APPROACH_WINDOW && !self.is_past()
    }

    pub fn is_past(&self) -> bool {
        self.distance < -PIPE_BODY_WIDTH
    }
}

/// Per-tick snapshot handed in by the game loop.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WorldSnapshot {
    pub frame_count: u32,
    pub bird: BirdState,
    pub pipes: Vec<PipeContext>,
}

impl WorldSnapshot {
    pub fn new(bird: BirdState, pipes: Vec<PipeContext>) -> Self {
        Self {
            frame_count: 0,
            bird,
            pipes,
        }
    }

    /// Nearest pipe the bird has not fully cleared yet.
    pub fn nearest_pipe(&self) -> Option<&PipeContext> {
        self.pipes
            .iter()
            .filter(|pipe| !pipe.is_past())
            .min_by(|a, b| a.distance.total_cmp(&b.distance))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advanced_moves_pipe_toward_bird() {
        let pipe = PipeContext {
            distance: 100.0,
            gap_top: 250.0,
            gap_bottom: 350.0,
        };
        let later = pipe.advanced(10);
        assert_eq!(later.distance, 100.0 - 10.0 * PIPE_SCROLL_SPEED);
        assert_eq!(later.gap_top, pipe.gap_top);
        assert_eq!(later.gap_bottom, pipe.gap_bottom);
    }

    #[test]
    fn body_overlap_band() {
        let mut pipe = PipeContext {
            distance: 10.0,
            gap_top: 250.0,
            gap_bottom: 350.0,
        };
        assert!(!pipe.overlaps_body());
        pipe.distance = 0.0;
        assert!(pipe.overlaps_body());
        pipe.distance = -PIPE_BODY_WIDTH;
        assert!(pipe.overlaps_body());
        pipe.distance = -PIPE_BODY_WIDTH - 1.0;
        assert!(pipe.is_past());
        assert!(!pipe.overlaps_body());
    }

    #[test]
    fn nearest_pipe_skips_cleared_pipes() {
        let snapshot = WorldSnapshot::new(
            BirdState::new(300.0, 0.0),
            vec![
                PipeContext {
                    distance: -200.0,
                    gap_top: 100.0,
                    gap_bottom: 200.0,
                },
                PipeContext {
                    distance: 240.0,
                    gap_top: 300.0,
                    gap_bottom: 400.0,
                },
                PipeContext {
                    distance: 60.0,
                    gap_top: 250.0,
                    gap_bottom: 350.0,
                },
            ],
        );
        let nearest = snapshot.nearest_pipe().unwrap();
        assert_eq!(nearest.distance, 60.0);
    }
}
