use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_BOUNDARY_PENALTY_SCALE, DEFAULT_COLLISION_PENALTY, DEFAULT_DECISION_HORIZON,
    DEFAULT_DECISION_ROLLOUTS, DEFAULT_GAP_REWARD, DEFAULT_GRAVITY_BIAS, DEFAULT_HORIZON,
    DEFAULT_NUM_TRAJECTORIES, DEFAULT_PERTURBATION_MAGNITUDE, DEFAULT_TEMPERATURE,
};
use crate::error::ConfigError;

/// Full recognized configuration surface: energy weights plus sampling knobs.
/// Constant for a session; validated once at load, never mid-frame.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SamplerConfig {
    pub temperature: f64,
    pub gravity_bias: f64,
    pub boundary_penalty_scale: f64,
    pub collision_penalty: f64,
    pub gap_reward: f64,
    pub num_trajectories: u32,
    pub horizon: u32,
    pub perturbation_magnitude: f64,
    pub decision_rollouts: u32,
    pub decision_horizon: u32,
}

impl Default for SamplerConfig {
    fn default() -> Self {
        Self {
            temperature: DEFAULT_TEMPERATURE,
            gravity_bias: DEFAULT_GRAVITY_BIAS,
            boundary_penalty_scale: DEFAULT_BOUNDARY_PENALTY_SCALE,
            collision_penalty: DEFAULT_COLLISION_PENALTY,
            gap_reward: DEFAULT_GAP_REWARD,
            num_trajectories: DEFAULT_NUM_TRAJECTORIES,
            horizon: DEFAULT_HORIZON,
            perturbation_magnitude: DEFAULT_PERTURBATION_MAGNITUDE,
            decision_rollouts: DEFAULT_DECISION_ROLLOUTS,
            decision_horizon: DEFAULT_DECISION_HORIZON,
        }
    }
}

impl SamplerConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        // Zero temperature would need an argmin special case in the sampler;
        // rejected here instead of silently handled there.
        if !(self.temperature > 0.0) {
            return Err(ConfigError::NonPositiveTemperature {
                value: self.temperature,
            });
        }
        if self.horizon == 0 {
            return Err(ConfigError::ZeroHorizon);
        }
        if self.num_trajectories == 0 {
            return Err(ConfigError::ZeroTrajectories);
        }
        if self.decision_rollouts == 0 {
            return Err(ConfigError::ZeroDecisionRollouts);
        }
        if self.decision_horizon == 0 {
            return Err(ConfigError::ZeroDecisionHorizon);
        }
        for (field, value) in [
            ("temperature", self.temperature),
            ("gravity_bias", self.gravity_bias),
            ("boundary_penalty_scale", self.boundary_penalty_scale),
            ("collision_penalty", self.collision_penalty),
            ("gap_reward", self.gap_reward),
            ("perturbation_magnitude", self.perturbation_magnitude),
        ] {
            if !value.is_finite() {
                return Err(ConfigError::NonFiniteWeight { field, value });
            }
        }
        if self.perturbation_magnitude < 0.0 {
            return Err(ConfigError::NegativePerturbation {
                value: self.perturbation_magnitude,
            });
        }
        Ok(())
    }

    pub fn validated(self) -> Result<Self, ConfigError> {
        self.validate()?;
        Ok(self)
    }
}
