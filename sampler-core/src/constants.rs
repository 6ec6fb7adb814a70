// Vertical positions grow downward, matching the canvas the snapshots come from.
pub const SCREEN_HEIGHT: f64 = 600.0;

pub const GRAVITY_PER_FRAME: f64 = 0.25;
pub const FLAP_IMPULSE: f64 = -6.5;
pub const TERMINAL_VELOCITY: f64 = 8.0;

pub const PIPE_SCROLL_SPEED: f64 = 3.0;
pub const PIPE_BODY_WIDTH: f64 = 52.0;
/// Horizontal range ahead of a pipe within which the gap term starts steering.
pub const GAP_APPROACH_WINDOW: f64 = 120.0;

/// Width of the band near floor/ceiling where the boundary penalty ramps up.
pub const BOUNDARY_MARGIN: f64 = 80.0;

pub const HEATMAP_BINS: usize = 20;
pub const HEATMAP_LOOKAHEAD_STEPS: usize = 5;

pub const DEFAULT_TEMPERATURE: f64 = 1.0;
// Gravity reward is earned every step of a dive; it has to stay well below
// the near-floor boundary penalty or the policy never pulls up.
pub const DEFAULT_GRAVITY_BIAS: f64 = 0.15;
pub const DEFAULT_BOUNDARY_PENALTY_SCALE: f64 = 25.0;
pub const DEFAULT_COLLISION_PENALTY: f64 = 1_000.0;
pub const DEFAULT_GAP_REWARD: f64 = 3.0;
pub const DEFAULT_PERTURBATION_MAGNITUDE: f64 = 1.5;
pub const DEFAULT_HORIZON: u32 = 15;
pub const DEFAULT_NUM_TRAJECTORIES: u32 = 30;
pub const DEFAULT_DECISION_ROLLOUTS: u32 = 8;
pub const DEFAULT_DECISION_HORIZON: u32 = 10;
