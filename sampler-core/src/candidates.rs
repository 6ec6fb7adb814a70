use serde::{Deserialize, Serialize};

use crate::config::SamplerConfig;
use crate::constants::{FLAP_IMPULSE, GRAVITY_PER_FRAME, TERMINAL_VELOCITY};
use crate::rng::SeededRng;
use crate::state::BirdState;

/// Number of randomly perturbed variants generated alongside Flap and Fall.
pub const PERTURB_CANDIDATES: usize = 2;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    Flap,
    Fall,
    Perturb { delta: f64 },
}

impl Action {
    pub fn is_flap(&self) -> bool {
        matches!(self, Action::Flap)
    }
}

/// One hypothetical next step; generated and consumed within a sampling step.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Candidate {
    pub action: Action,
    pub resulting_state: BirdState,
}

/// Advance a state by one discrete time step under `action`. Flap overrides
/// the velocity with the fixed impulse, Fall leaves it to gravity, Perturb
/// nudges it before integrating. Gravity and the terminal-velocity clamp
/// apply to every action.
pub fn apply_action(state: &BirdState, action: Action) -> BirdState {
    let mut velocity = match action {
        Action::Flap => FLAP_IMPULSE,
        Action::Fall => state.velocity,
        Action::Perturb { delta } => state.velocity + delta,
    };
    velocity += GRAVITY_PER_FRAME;
    velocity = velocity.min(TERMINAL_VELOCITY);
    BirdState {
        position: state.position + velocity,
        velocity,
        time_step: state.time_step + 1,
    }
}

/// Fixed small candidate set: Flap, Fall, and `PERTURB_CANDIDATES` perturbed
/// variants. The only randomness here is the perturbation offsets.
pub fn generate_candidates(
    state: &BirdState,
    cfg: &SamplerConfig,
    rng: &mut SeededRng,
) -> Vec<Candidate> {
    let mut candidates = Vec::with_capacity(2 + PERTURB_CANDIDATES);
    for action in [Action::Flap, Action::Fall] {
        candidates.push(Candidate {
            action,
            resulting_state: apply_action(state, action),
        });
    }
    for _ in 0..PERTURB_CANDIDATES {
        let action = Action::Perturb {
            delta: rng.next_symmetric(cfg.perturbation_magnitude),
        };
        candidates.push(Candidate {
            action,
            resulting_state: apply_action(state, action),
        });
    }
    candidates
}
