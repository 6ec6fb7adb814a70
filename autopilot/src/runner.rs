use anyhow::{anyhow, Result};
use flappy_sampler_core::{decide, SamplerConfig, SeededRng};
use serde::{Deserialize, Serialize};

use crate::harness::LiveWorld;
use crate::presets::{config_fingerprint, create_preset};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RunMetrics {
    pub preset_id: String,
    pub preset_fingerprint: String,
    pub seed: u32,
    pub max_frames: u32,
    pub frame_count: u32,
    pub pipes_passed: u32,
    pub flap_frames: u32,
    pub game_over: bool,
    pub final_position: f64,
}

pub fn run_policy(preset_id: &str, seed: u32, max_frames: u32) -> Result<RunMetrics> {
    let config =
        create_preset(preset_id).ok_or_else(|| anyhow!("unknown preset '{preset_id}'"))?;
    run_policy_with_config(preset_id, &config, seed, max_frames)
}

/// Drive the harness with the autoplay policy, one decision per frame.
pub fn run_policy_with_config(
    preset_id: &str,
    config: &SamplerConfig,
    seed: u32,
    max_frames: u32,
) -> Result<RunMetrics> {
    if max_frames == 0 {
        return Err(anyhow!("max_frames must be > 0"));
    }
    config.validate()?;

    let mut world = LiveWorld::new(seed);
    let mut rng = SeededRng::new(seed ^ 0x51AF_F1E5);
    let mut flap_frames = 0u32;

    while world.frame_count() < max_frames && !world.is_game_over() {
        let snapshot = world.snapshot();
        let decision = decide(&snapshot, config, &mut rng)
            .map_err(|err| anyhow!("sampling failed at frame {}: {err}", world.frame_count()))?;
        if decision.flap {
            flap_frames += 1;
        }
        world.step(decision.flap);
    }

    Ok(RunMetrics {
        preset_id: preset_id.to_string(),
        preset_fingerprint: config_fingerprint(config),
        seed,
        max_frames,
        frame_count: world.frame_count(),
        pipes_passed: world.pipes_passed(),
        flap_frames,
        game_over: world.is_game_over(),
        final_position: world.bird().position,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_preset_is_an_error() {
        assert!(run_policy("nope", 1, 100).is_err());
    }

    #[test]
    fn zero_frame_budget_is_an_error() {
        assert!(run_policy("balanced", 1, 0).is_err());
    }

    #[test]
    fn metrics_are_internally_consistent() {
        let metrics = run_policy("balanced", 0xBEEF, 600).unwrap();
        assert!(metrics.frame_count >= 1);
        assert!(metrics.frame_count <= metrics.max_frames);
        assert!(metrics.flap_frames <= metrics.frame_count);
        if !metrics.game_over {
            assert_eq!(metrics.frame_count, metrics.max_frames);
        }
    }

    #[test]
    fn runs_are_reproducible() {
        let a = run_policy("balanced", 7, 400).unwrap();
        let b = run_policy("balanced", 7, 400).unwrap();
        assert_eq!(a.frame_count, b.frame_count);
        assert_eq!(a.pipes_passed, b.pipes_passed);
        assert_eq!(a.flap_frames, b.flap_frames);
    }

    #[test]
    fn policy_outlives_a_never_flap_baseline() {
        let seed = 0x0DD5;
        let mut baseline = LiveWorld::new(seed);
        for _ in 0..2_000 {
            baseline.step(false);
            if baseline.is_game_over() {
                break;
            }
        }
        let metrics = run_policy("balanced", seed, 2_000).unwrap();
        assert!(
            metrics.frame_count > baseline.frame_count(),
            "policy {} <= baseline {}",
            metrics.frame_count,
            baseline.frame_count()
        );
    }
}
