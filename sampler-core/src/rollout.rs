use serde::{Deserialize, Serialize};

use crate::candidates::{generate_candidates, Action};
use crate::config::SamplerConfig;
use crate::constants::{HEATMAP_BINS, HEATMAP_LOOKAHEAD_STEPS, SCREEN_HEIGHT};
use crate::error::SampleError;
use crate::rng::SeededRng;
use crate::sampler::sample;
use crate::state::{BirdState, PipeContext, WorldSnapshot};

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TrajectoryPoint {
    pub state: BirdState,
    pub action: Action,
    /// Probability the sampler assigned to the chosen candidate at this step;
    /// consumed by the renderer as heatmap intensity.
    pub probability: f64,
}

/// One simulated future path, exactly `horizon` points long.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Trajectory {
    pub points: Vec<TrajectoryPoint>,
    pub cumulative_energy: f64,
}

impl Trajectory {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Simulate one path of `cfg.horizon` steps: generate candidates, draw one via
/// the Boltzmann sampler, advance. Each step conditions only on the previous
/// state (first-order Markov); steps are never jointly resampled.
pub fn rollout(
    initial: &BirdState,
    pipes: &[PipeContext],
    cfg: &SamplerConfig,
    rng: &mut SeededRng,
) -> Result<Trajectory, SampleError> {
    let mut state = *initial;
    let mut points = Vec::with_capacity(cfg.horizon as usize);
    let mut cumulative_energy = 0.0;
    for step in 0..cfg.horizon {
        // Pipes keep scrolling toward the bird while the future unrolls.
        let stepped: Vec<PipeContext> = pipes.iter().map(|p| p.advanced(step + 1)).collect();
        let candidates = generate_candidates(&state, cfg, rng);
        let choice = sample(&candidates, &stepped, cfg, rng)?;
        let chosen = candidates[choice.index];
        cumulative_energy += choice.energy;
        state = chosen.resulting_state;
        points.push(TrajectoryPoint {
            state,
            action: chosen.action,
            probability: choice.probability,
        });
    }
    Ok(Trajectory {
        points,
        cumulative_energy,
    })
}

/// The probability cloud: `num_trajectories` independent rollouts from the
/// same snapshot plus a height-bin occupancy histogram over the early steps.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TrajectoryCloud {
    pub trajectories: Vec<Trajectory>,
    pub heatmap: Vec<f64>,
}

/// Fully regenerated every frame; nothing is carried over between calls.
pub fn sample_cloud(
    snapshot: &WorldSnapshot,
    cfg: &SamplerConfig,
    rng: &mut SeededRng,
) -> Result<TrajectoryCloud, SampleError> {
    let mut trajectories = Vec::with_capacity(cfg.num_trajectories as usize);
    for _ in 0..cfg.num_trajectories {
        let mut branch = rng.fork();
        trajectories.push(rollout(&snapshot.bird, &snapshot.pipes, cfg, &mut branch)?);
    }
    let heatmap = heatmap(&trajectories);
    Ok(TrajectoryCloud {
        trajectories,
        heatmap,
    })
}

/// Bin the first few points of each trajectory into `HEATMAP_BINS` height
/// bins, normalized to sum 1 (all zeros if nothing landed on screen).
pub fn heatmap(trajectories: &[Trajectory]) -> Vec<f64> {
    let mut bins = vec![0.0f64; HEATMAP_BINS];
    for trajectory in trajectories {
        for point in trajectory.points.iter().take(HEATMAP_LOOKAHEAD_STEPS) {
            let normalized = point.state.position / SCREEN_HEIGHT;
            let index = ((normalized * HEATMAP_BINS as f64) as isize)
                .clamp(0, HEATMAP_BINS as isize - 1) as usize;
            bins[index] += 1.0;
        }
    }
    let total: f64 = bins.iter().sum();
    if total > 0.0 {
        for bin in &mut bins {
            *bin /= total;
        }
    }
    bins
}
