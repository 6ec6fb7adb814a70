use flappy_sampler_core::rollout::heatmap;
use flappy_sampler_core::{
    rollout, SampleError, SamplerConfig, SeededRng, TrajectoryCloud, WorldSnapshot,
};
use rayon::prelude::*;

/// Rayon twin of the core's `sample_cloud`. Rollouts share only the weights
/// and the pipe snapshot, so they fan out with no shared mutable state; each
/// branch RNG is forked up front, which keeps the result identical to the
/// sequential version for the same seed.
pub fn parallel_cloud(
    snapshot: &WorldSnapshot,
    config: &SamplerConfig,
    seed: u32,
) -> Result<TrajectoryCloud, SampleError> {
    let mut base = SeededRng::new(seed);
    let branches: Vec<SeededRng> = (0..config.num_trajectories)
        .map(|_| base.fork())
        .collect();
    let trajectories = branches
        .into_par_iter()
        .map(|mut branch| rollout(&snapshot.bird, &snapshot.pipes, config, &mut branch))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(TrajectoryCloud {
        heatmap: heatmap(&trajectories),
        trajectories,
    })
}
