use serde::{Deserialize, Serialize};

use crate::config::SamplerConfig;
use crate::error::ConfigError;
use crate::policy::{decide, Decision};
use crate::rng::SeededRng;
use crate::rollout::{sample_cloud, TrajectoryCloud};
use crate::state::WorldSnapshot;

/// What the caller wants out of this frame: a cloud of trajectories for the
/// renderer, a single autoplay decision, or both. The core never inspects UI
/// state; toggles live outside and arrive here as flags.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct FrameRequest {
    pub cloud: bool,
    pub decision: bool,
}

impl FrameRequest {
    pub fn cloud_only() -> Self {
        Self {
            cloud: true,
            decision: false,
        }
    }

    pub fn decision_only() -> Self {
        Self {
            cloud: false,
            decision: true,
        }
    }

    pub fn both() -> Self {
        Self {
            cloud: true,
            decision: true,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FrameOutput {
    pub cloud: Option<TrajectoryCloud>,
    pub decision: Option<Decision>,
}

/// Per-frame entry point for a game loop. All work is bounded, synchronous,
/// and re-derived each call; nothing is carried across frames except the
/// validated configuration and the random stream.
pub struct FrameSampler {
    cfg: SamplerConfig,
    rng: SeededRng,
}

impl FrameSampler {
    /// Fails fast on invalid configuration; sampling never revalidates.
    pub fn new(cfg: SamplerConfig, seed: u32) -> Result<Self, ConfigError> {
        cfg.validate()?;
        Ok(Self {
            cfg,
            rng: SeededRng::new(seed),
        })
    }

    pub fn config(&self) -> &SamplerConfig {
        &self.cfg
    }

    /// A sampling fault skips that frame's cloud or decision instead of
    /// propagating into the render loop.
    pub fn run_frame(&mut self, snapshot: &WorldSnapshot, request: FrameRequest) -> FrameOutput {
        let cloud = if request.cloud {
            sample_cloud(snapshot, &self.cfg, &mut self.rng).ok()
        } else {
            None
        };
        let decision = if request.decision {
            decide(snapshot, &self.cfg, &mut self.rng).ok()
        } else {
            None
        };
        FrameOutput { cloud, decision }
    }
}
