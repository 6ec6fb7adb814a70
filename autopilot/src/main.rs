use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use flappy_autopilot::benchmark::{resolve_presets, run_benchmark, BenchmarkConfig, Objective};
use flappy_autopilot::cloud::parallel_cloud;
use flappy_autopilot::presets::{create_preset, describe_presets};
use flappy_autopilot::runner::run_policy_with_config;
use flappy_autopilot::util::{parse_pipes, parse_seed, resolve_seeds, seed_to_hex};
use flappy_sampler_core::{
    decide, BirdState, SamplerConfig, SeededRng, TrajectoryCloud, WorldSnapshot,
};
use serde::Serialize;

#[derive(Parser, Debug)]
#[command(name = "flappy-autopilot")]
#[command(about = "Boltzmann trajectory sampling lab for the flappy autoplay policy")]
struct Cli {
    /// Sampler config JSON overriding the selected preset
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List available sampler presets
    ListPresets,
    /// Sample a trajectory cloud for a given bird state
    Cloud {
        #[arg(long, default_value_t = 300.0)]
        y: f64,
        #[arg(long, default_value_t = 0.0)]
        vy: f64,
        /// Pipes as distance:gap_top:gap_bottom, comma separated
        #[arg(long, default_value = "")]
        pipes: String,
        #[arg(long, default_value = "1")]
        seed: String,
        #[arg(long, default_value = "balanced")]
        preset: String,
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Run one autoplay decision for a given bird state
    Decide {
        #[arg(long, default_value_t = 300.0)]
        y: f64,
        #[arg(long, default_value_t = 0.0)]
        vy: f64,
        #[arg(long, default_value = "")]
        pipes: String,
        #[arg(long, default_value = "1")]
        seed: String,
        #[arg(long, default_value = "balanced")]
        preset: String,
    },
    /// Play one full harness game under the autoplay policy
    Run {
        #[arg(long, default_value = "balanced")]
        preset: String,
        #[arg(long, default_value = "1")]
        seed: String,
        #[arg(long, default_value_t = 18_000)]
        max_frames: u32,
    },
    /// Multi-seed benchmark across one or more presets
    Benchmark {
        #[arg(long)]
        presets: Option<String>,
        #[arg(long)]
        seeds: Option<String>,
        #[arg(long)]
        seed_file: Option<PathBuf>,
        #[arg(long)]
        seed_start: Option<String>,
        #[arg(long, default_value_t = 12)]
        seed_count: u32,
        #[arg(long, default_value_t = 6_000)]
        max_frames: u32,
        #[arg(long, value_enum, default_value_t = CliObjective::Survival)]
        objective: CliObjective,
        #[arg(long, default_value = "benchmark-out")]
        out_dir: PathBuf,
        #[arg(long)]
        jobs: Option<usize>,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum CliObjective {
    Survival,
    Score,
    Hybrid,
}

impl From<CliObjective> for Objective {
    fn from(value: CliObjective) -> Self {
        match value {
            CliObjective::Survival => Objective::Survival,
            CliObjective::Score => Objective::Score,
            CliObjective::Hybrid => Objective::Hybrid,
        }
    }
}

#[derive(Serialize)]
struct CloudResponse {
    preset: String,
    seed: String,
    method: &'static str,
    cloud: TrajectoryCloud,
}

#[derive(Serialize)]
struct DecisionResponse {
    preset: String,
    seed: String,
    flap: bool,
    flap_mean_energy: f64,
    fall_mean_energy: f64,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::filter::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::ListPresets => {
            for entry in describe_presets() {
                println!("{:<10} {}  [{}]", entry.id, entry.description, entry.fingerprint);
            }
            Ok(())
        }
        Commands::Cloud {
            y,
            vy,
            pipes,
            seed,
            preset,
            output,
        } => {
            let config = load_config(cli.config.as_deref(), &preset)?;
            let seed = parse_seed(&seed)?;
            let snapshot = WorldSnapshot::new(BirdState::new(y, vy), parse_pipes(&pipes)?);
            let cloud = parallel_cloud(&snapshot, &config, seed)
                .map_err(|err| anyhow!("cloud sampling failed: {err}"))?;
            let response = CloudResponse {
                preset,
                seed: seed_to_hex(seed),
                method: "boltzmann-local",
                cloud,
            };
            emit_json(&response, output.as_deref())
        }
        Commands::Decide {
            y,
            vy,
            pipes,
            seed,
            preset,
        } => {
            let config = load_config(cli.config.as_deref(), &preset)?;
            let seed = parse_seed(&seed)?;
            let snapshot = WorldSnapshot::new(BirdState::new(y, vy), parse_pipes(&pipes)?);
            let mut rng = SeededRng::new(seed);
            let decision = decide(&snapshot, &config, &mut rng)
                .map_err(|err| anyhow!("decision sampling failed: {err}"))?;
            let response = DecisionResponse {
                preset,
                seed: seed_to_hex(seed),
                flap: decision.flap,
                flap_mean_energy: decision.flap_mean_energy,
                fall_mean_energy: decision.fall_mean_energy,
            };
            emit_json(&response, None)
        }
        Commands::Run {
            preset,
            seed,
            max_frames,
        } => {
            let config = load_config(cli.config.as_deref(), &preset)?;
            let seed = parse_seed(&seed)?;
            let metrics = run_policy_with_config(&preset, &config, seed, max_frames)?;
            emit_json(&metrics, None)
        }
        Commands::Benchmark {
            presets,
            seeds,
            seed_file,
            seed_start,
            seed_count,
            max_frames,
            objective,
            out_dir,
            jobs,
        } => {
            let config = BenchmarkConfig {
                presets: resolve_presets(presets.as_deref())?,
                seeds: resolve_seeds(
                    seeds.as_deref(),
                    seed_file.as_deref(),
                    seed_start.as_deref(),
                    seed_count,
                )?,
                max_frames,
                objective: objective.into(),
                out_dir,
                jobs,
            };
            let report = run_benchmark(config)?;
            for (rank, aggregate) in report.rankings.iter().enumerate() {
                println!(
                    "#{:<2} {:<10} runs={} avg_frames={:.1} avg_pipes={:.2} survival={:.0}% objective={:.1}",
                    rank + 1,
                    aggregate.preset_id,
                    aggregate.runs,
                    aggregate.avg_frames,
                    aggregate.avg_pipes,
                    aggregate.survival_rate * 100.0,
                    aggregate.objective_value,
                );
            }
            Ok(())
        }
    }
}

/// Preset first, optional JSON file override; invalid configuration never
/// reaches the samplers.
fn load_config(path: Option<&Path>, preset: &str) -> Result<SamplerConfig> {
    let config = match path {
        Some(path) => {
            let raw = fs::read_to_string(path)
                .with_context(|| format!("failed reading config {}", path.display()))?;
            serde_json::from_str::<SamplerConfig>(&raw)
                .with_context(|| format!("failed parsing config {}", path.display()))?
        }
        None => {
            create_preset(preset).ok_or_else(|| anyhow!("unknown preset '{preset}'"))?
        }
    };
    config
        .validated()
        .map_err(|err| anyhow!("invalid sampler config: {err}"))
}

fn emit_json<T: Serialize>(value: &T, output: Option<&Path>) -> Result<()> {
    let encoded = serde_json::to_string_pretty(value).context("failed encoding output")?;
    match output {
        Some(path) => {
            fs::write(path, encoded)
                .with_context(|| format!("failed writing {}", path.display()))?;
            tracing::info!(path = %path.display(), "output written");
        }
        None => println!("{encoded}"),
    }
    Ok(())
}
