pub mod candidates;
pub mod config;
pub mod constants;
pub mod energy;
pub mod error;
pub mod frame;
pub mod policy;
pub mod provider;
pub mod rng;
pub mod rollout;
pub mod sampler;
pub mod state;

pub use candidates::{apply_action, generate_candidates, Action, Candidate};
pub use config::SamplerConfig;
pub use energy::energy;
pub use error::{ConfigError, SampleError};
pub use frame::{FrameOutput, FrameRequest, FrameSampler};
pub use policy::{decide, Decision};
pub use provider::{FallbackSampler, TrajectoryProvider};
pub use rng::SeededRng;
pub use rollout::{rollout, sample_cloud, Trajectory, TrajectoryCloud, TrajectoryPoint};
pub use state::{BirdState, PipeContext, WorldSnapshot};
