use serde::{Deserialize, Serialize};

use crate::candidates::{apply_action, Action};
use crate::config::SamplerConfig;
use crate::energy::energy;
use crate::error::SampleError;
use crate::rng::SeededRng;
use crate::rollout::rollout;
use crate::state::{PipeContext, WorldSnapshot};

/// The autoplay verdict for one tick. `flap` is consumed by the input layer
/// exactly like a click or spacebar press.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Decision {
    pub flap: bool,
    pub flap_mean_energy: f64,
    pub fall_mean_energy: f64,
}

/// Best-action-by-simulated-rollout: force Flap or Fall as the first step,
/// run a handful of stochastic rollouts from each, and take the action whose
/// futures carry the lower mean cumulative energy. A single Boltzmann draw
/// would make autoplay erratic; averaging rollouts smooths it out. Ties fall
/// to Fall. Stateless across ticks and recomputed every tick.
pub fn decide(
    snapshot: &WorldSnapshot,
    cfg: &SamplerConfig,
    rng: &mut SeededRng,
) -> Result<Decision, SampleError> {
    let flap_mean_energy = action_mean_energy(Action::Flap, snapshot, cfg, rng)?;
    let fall_mean_energy = action_mean_energy(Action::Fall, snapshot, cfg, rng)?;
    Ok(Decision {
        flap: flap_mean_energy < fall_mean_energy,
        flap_mean_energy,
        fall_mean_energy,
    })
}

fn action_mean_energy(
    first: Action,
    snapshot: &WorldSnapshot,
    cfg: &SamplerConfig,
    rng: &mut SeededRng,
) -> Result<f64, SampleError> {
    let first_state = apply_action(&snapshot.bird, first);
    let first_pipes: Vec<PipeContext> = snapshot.pipes.iter().map(|p| p.advanced(1)).collect();
    let first_energy = energy(&first_state, &first_pipes, cfg);

    // Decision rollouts are shorter and fewer than the visualization cloud's.
    let decision_cfg = SamplerConfig {
        horizon: cfg.decision_horizon,
        ..*cfg
    };
    let mut total = 0.0;
    for _ in 0..cfg.decision_rollouts {
        let mut branch = rng.fork();
        let trajectory = rollout(&first_state, &first_pipes, &decision_cfg, &mut branch)?;
        total += first_energy + trajectory.cumulative_energy;
    }
    Ok(total / f64::from(cfg.decision_rollouts))
}
