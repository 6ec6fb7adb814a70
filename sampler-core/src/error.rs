use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ConfigError {
    NonPositiveTemperature { value: f64 },
    ZeroHorizon,
    ZeroTrajectories,
    ZeroDecisionRollouts,
    ZeroDecisionHorizon,
    NonFiniteWeight { field: &'static str, value: f64 },
    NegativePerturbation { value: f64 },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonPositiveTemperature { value } => {
                write!(f, "temperature must be > 0, got {value}")
            }
            Self::ZeroHorizon => write!(f, "horizon must be > 0"),
            Self::ZeroTrajectories => write!(f, "num_trajectories must be > 0"),
            Self::ZeroDecisionRollouts => write!(f, "decision_rollouts must be > 0"),
            Self::ZeroDecisionHorizon => write!(f, "decision_horizon must be > 0"),
            Self::NonFiniteWeight { field, value } => {
                write!(f, "{field} must be finite, got {value}")
            }
            Self::NegativePerturbation { value } => {
                write!(f, "perturbation_magnitude must be >= 0, got {value}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SampleError {
    EmptyCandidateSet,
    DegenerateDistribution { total_weight: f64 },
}

impl fmt::Display for SampleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyCandidateSet => write!(f, "no candidates to sample from"),
            Self::DegenerateDistribution { total_weight } => {
                write!(f, "candidate weights do not normalize: total={total_weight}")
            }
        }
    }
}

impl std::error::Error for SampleError {}
