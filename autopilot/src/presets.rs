use flappy_sampler_core::SamplerConfig;
use serde::Serialize;

/// Curated roster of sampler profiles. Each entry is a full, valid
/// `SamplerConfig`; `validate_all` in the tests keeps it that way.
#[derive(Clone, Copy, Debug, Serialize)]
pub struct Preset {
    pub id: &'static str,
    pub description: &'static str,
    pub config: SamplerConfig,
}

#[derive(Clone, Debug, Serialize)]
pub struct PresetManifestEntry {
    pub id: String,
    pub description: String,
    pub fingerprint: String,
    pub config: SamplerConfig,
}

static PRESETS: [Preset; 3] = [
    Preset {
        id: "balanced",
        description: "Stock weights; the cloud and autoplay defaults.",
        config: SamplerConfig {
            temperature: 1.0,
            gravity_bias: 0.15,
            boundary_penalty_scale: 25.0,
            collision_penalty: 1_000.0,
            gap_reward: 3.0,
            num_trajectories: 30,
            horizon: 15,
            perturbation_magnitude: 1.5,
            decision_rollouts: 8,
            decision_horizon: 10,
        },
    },
    Preset {
        id: "cautious",
        description: "Pipe-shy profile: heavier collision and boundary terms, longer decision horizon.",
        config: SamplerConfig {
            temperature: 0.8,
            gravity_bias: 0.1,
            boundary_penalty_scale: 40.0,
            collision_penalty: 5_000.0,
            gap_reward: 4.0,
            num_trajectories: 30,
            horizon: 15,
            perturbation_magnitude: 1.0,
            decision_rollouts: 12,
            decision_horizon: 12,
        },
    },
    Preset {
        id: "greedy",
        description: "Near-deterministic low-temperature profile; sharp but brittle.",
        config: SamplerConfig {
            temperature: 0.2,
            gravity_bias: 0.2,
            boundary_penalty_scale: 25.0,
            collision_penalty: 1_000.0,
            gap_reward: 3.5,
            num_trajectories: 30,
            horizon: 12,
            perturbation_magnitude: 0.75,
            decision_rollouts: 6,
            decision_horizon: 8,
        },
    },
];

pub fn preset_ids() -> Vec<&'static str> {
    PRESETS.iter().map(|preset| preset.id).collect()
}

pub fn create_preset(id: &str) -> Option<SamplerConfig> {
    PRESETS
        .iter()
        .find(|preset| preset.id == id)
        .map(|preset| preset.config)
}

pub fn describe_presets() -> Vec<PresetManifestEntry> {
    PRESETS
        .iter()
        .map(|preset| PresetManifestEntry {
            id: preset.id.to_string(),
            description: preset.description.to_string(),
            fingerprint: config_fingerprint(&preset.config),
            config: preset.config,
        })
        .collect()
}

/// FNV-1a over the canonical JSON form; changing any weight changes the
/// fingerprint, so benchmark reports pin the exact profile they measured.
pub fn config_fingerprint(config: &SamplerConfig) -> String {
    let encoded = serde_json::to_string(config).unwrap_or_default();
    let mut hash: u64 = 0xcbf2_9ce4_8422_2325;
    for byte in encoded.bytes() {
        hash ^= u64::from(byte);
        hash = hash.wrapping_mul(0x0000_0100_0000_01b3);
    }
    format!("{hash:016x}")
}
