use crate::config::SamplerConfig;
use crate::constants::{BOUNDARY_MARGIN, SCREEN_HEIGHT};
use crate::state::{BirdState, PipeContext};

/// Heuristic scalar score for a hypothetical bird state; lower is better.
/// Deterministic and pure: identical inputs give bit-identical output.
pub fn energy(state: &BirdState, pipes: &[PipeContext], cfg: &SamplerConfig) -> f64 {
    let mut total = gravity_term(state, cfg) + boundary_term(state, cfg);
    if let Some(pipe) = nearest_relevant(pipes) {
        total += pipe_terms(state, pipe, cfg);
    }
    total
}

// Falling is natural: downward velocity lowers energy.
fn gravity_term(state: &BirdState, cfg: &SamplerConfig) -> f64 {
    -cfg.gravity_bias * state.velocity.max(0.0)
}

// Zero in the safe middle band, quadratic ramp once the bird enters the
// margin near floor or ceiling, still growing past the screen edge.
fn boundary_term(state: &BirdState, cfg: &SamplerConfig) -> f64 {
    let to_ceiling = state.position;
    let to_floor = SCREEN_HEIGHT - state.position;
    let clearance = to_ceiling.min(to_floor);
    if clearance >= BOUNDARY_MARGIN {
        return 0.0;
    }
    let overshoot = (BOUNDARY_MARGIN - clearance) / BOUNDARY_MARGIN;
    cfg.boundary_penalty_scale * overshoot * overshoot
}

fn pipe_terms(state: &BirdState, pipe: &PipeContext, cfg: &SamplerConfig) -> f64 {
    let inside_gap = state.position > pipe.gap_top && state.position < pipe.gap_bottom;

    if pipe.overlaps_body() && !inside_gap {
        return cfg.collision_penalty;
    }

    if pipe.in_approach_window() && inside_gap {
        let offset = (state.position - pipe.gap_center()).abs();
        let half = pipe.gap_half_height();
        if half > 0.0 {
            // Strongest reward at the gap center, fading to zero at the lip.
            return -cfg.gap_reward * (1.0 - offset / half);
        }
    }

    0.0
}

fn nearest_relevant(pipes: &[PipeContext]) -> Option<&PipeContext> {
    pipes
        .iter()
        .filter(|pipe| !pipe.is_past())
        .min_by(|a, b| a.distance.total_cmp(&b.distance))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::GAP_APPROACH_WINDOW;

    fn gap_pipe(distance: f64) -> PipeContext {
        PipeContext {
            distance,
            gap_top: 250.0,
            gap_bottom: 350.0,
        }
    }

    #[test]
    fn deterministic_and_pure() {
        let cfg = SamplerConfig::default();
        let state = BirdState::new(287.5, 3.25);
        let pipes = [gap_pipe(40.0)];
        let a = energy(&state, &pipes, &cfg);
        let b = energy(&state, &pipes, &cfg);
        assert_eq!(a.to_bits(), b.to_bits());
    }

    #[test]
    fn no_pipe_in_range_leaves_only_gravity_and_boundary() {
        let cfg = SamplerConfig::default();
        let state = BirdState::new(300.0, 2.0);
        let far = [gap_pipe(GAP_APPROACH_WINDOW + 50.0)];
        let none: [PipeContext; 0] = [];
        assert_eq!(energy(&state, &far, &cfg), energy(&state, &none, &cfg));
        // Mid-screen, mid-band: boundary contributes nothing.
        assert_eq!(energy(&state, &none, &cfg), -cfg.gravity_bias * 2.0);
    }

    #[test]
    fn downward_velocity_lowers_energy() {
        let cfg = SamplerConfig::default();
        let falling = BirdState::new(300.0, 4.0);
        let rising = BirdState::new(300.0, -4.0);
        assert!(energy(&falling, &[], &cfg) < energy(&rising, &[], &cfg));
    }

    #[test]
    fn boundary_penalty_grows_toward_the_floor() {
        let cfg = SamplerConfig::default();
        let mid = energy(&BirdState::new(300.0, 0.0), &[], &cfg);
        let near = energy(&BirdState::new(560.0, 0.0), &[], &cfg);
        let nearer = energy(&BirdState::new(590.0, 0.0), &[], &cfg);
        let below = energy(&BirdState::new(620.0, 0.0), &[], &cfg);
        assert_eq!(mid, 0.0);
        assert!(near > mid);
        assert!(nearer > near);
        assert!(below > nearer);
    }

    #[test]
    fn colliding_state_outranks_every_non_colliding_state() {
        let cfg = SamplerConfig::default();
        let pipes = [gap_pipe(-10.0)];
        let colliding = energy(&BirdState::new(100.0, 0.0), &pipes, &cfg);
        for position in [260.0, 300.0, 340.0] {
            let clear = energy(&BirdState::new(position, 8.0), &pipes, &cfg);
            assert!(colliding > clear);
        }
        // Penalty dwarfs the other terms by construction.
        assert!(colliding >= cfg.collision_penalty - 10.0);
    }

    #[test]
    fn gap_reward_peaks_at_center() {
        let cfg = SamplerConfig::default();
        let pipes = [gap_pipe(60.0)];
        let centered = energy(&BirdState::new(300.0, 0.0), &pipes, &cfg);
        let off_center = energy(&BirdState::new(330.0, 0.0), &pipes, &cfg);
        let outside = energy(&BirdState::new(200.0, 0.0), &pipes, &cfg);
        assert!(centered < off_center);
        assert!(off_center < outside);
    }

    #[test]
    fn gap_reward_requires_strict_interior() {
        let cfg = SamplerConfig::default();
        let pipes = [gap_pipe(60.0)];
        let on_lip = energy(&BirdState::new(250.0, 0.0), &pipes, &cfg);
        assert_eq!(on_lip, 0.0);
    }
}
