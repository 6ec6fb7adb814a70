use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{anyhow, Context, Result};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::presets::preset_ids;
use crate::runner::{run_policy, RunMetrics};
use crate::util::seed_to_hex;

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Objective {
    Survival,
    Score,
    Hybrid,
}

impl Objective {
    pub fn run_value(self, metrics: &RunMetrics) -> f64 {
        match self {
            Self::Survival => {
                f64::from(metrics.frame_count) + f64::from(metrics.pipes_passed) * 30.0
            }
            Self::Score => {
                f64::from(metrics.pipes_passed) * 100.0 + f64::from(metrics.frame_count) * 0.05
            }
            Self::Hybrid => {
                f64::from(metrics.frame_count) * 0.5 + f64::from(metrics.pipes_passed) * 60.0
            }
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Survival => "survival",
            Self::Score => "score",
            Self::Hybrid => "hybrid",
        }
    }
}

#[derive(Clone, Debug)]
pub struct BenchmarkConfig {
    pub presets: Vec<String>,
    pub seeds: Vec<u32>,
    pub max_frames: u32,
    pub objective: Objective,
    pub out_dir: PathBuf,
    pub jobs: Option<usize>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RunRecord {
    pub preset_id: String,
    pub preset_fingerprint: String,
    pub seed: u32,
    pub seed_hex: String,
    pub frame_count: u32,
    pub pipes_passed: u32,
    pub flap_frames: u32,
    pub game_over: bool,
    pub objective_value: f64,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PresetAggregate {
    pub preset_id: String,
    pub preset_fingerprint: String,
    pub runs: usize,
    pub avg_frames: f64,
    pub max_frames_survived: u32,
    pub avg_pipes: f64,
    pub max_pipes: u32,
    pub survival_rate: f64,
    pub avg_flap_rate: f64,
    pub objective_value: f64,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BenchmarkReport {
    pub generated_unix_s: u64,
    pub objective: Objective,
    pub max_frames: u32,
    pub jobs: Option<usize>,
    pub presets: Vec<String>,
    pub seeds: Vec<u32>,
    pub run_count: usize,
    pub rankings: Vec<PresetAggregate>,
    pub runs: Vec<RunRecord>,
}

pub fn resolve_presets(input: Option<&str>) -> Result<Vec<String>> {
    match input {
        None => Ok(preset_ids().iter().map(|id| (*id).to_string()).collect()),
        Some(raw) => {
            let presets: Vec<String> = raw
                .split(',')
                .map(str::trim)
                .filter(|token| !token.is_empty())
                .map(str::to_string)
                .collect();
            if presets.is_empty() {
                return Err(anyhow!("--presets resolved to empty list"));
            }
            Ok(presets)
        }
    }
}

pub fn run_benchmark(config: BenchmarkConfig) -> Result<BenchmarkReport> {
    if config.seeds.is_empty() {
        return Err(anyhow!("benchmark requires at least one seed"));
    }
    if config.presets.is_empty() {
        return Err(anyhow!("benchmark requires at least one preset"));
    }
    if let Some(jobs) = config.jobs {
        if jobs == 0 {
            return Err(anyhow!("benchmark --jobs must be >= 1 when provided"));
        }
    }
    fs::create_dir_all(&config.out_dir)
        .with_context(|| format!("failed creating {}", config.out_dir.display()))?;

    let run_jobs: Vec<(String, u32)> = config
        .presets
        .iter()
        .flat_map(|preset| config.seeds.iter().map(move |seed| (preset.clone(), *seed)))
        .collect();

    let run_one = |(preset_id, seed): &(String, u32)| -> Result<RunRecord> {
        let metrics = run_policy(preset_id, *seed, config.max_frames)
            .with_context(|| format!("run failed for preset={preset_id} seed={seed:#x}"))?;
        let objective_value = config.objective.run_value(&metrics);
        Ok(RunRecord {
            preset_id: metrics.preset_id,
            preset_fingerprint: metrics.preset_fingerprint,
            seed: *seed,
            seed_hex: seed_to_hex(*seed),
            frame_count: metrics.frame_count,
            pipes_passed: metrics.pipes_passed,
            flap_frames: metrics.flap_frames,
            game_over: metrics.game_over,
            objective_value,
        })
    };

    // Runs share nothing but the immutable config; fan out freely.
    let run_results: Vec<Result<RunRecord>> = if let Some(jobs) = config.jobs {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(jobs)
            .build()
            .context("failed to build rayon threadpool")?;
        pool.install(|| run_jobs.par_iter().map(run_one).collect())
    } else {
        run_jobs.par_iter().map(run_one).collect()
    };

    let mut runs = Vec::with_capacity(run_results.len());
    for result in run_results {
        runs.push(result?);
    }

    let mut grouped: HashMap<String, Vec<&RunRecord>> = HashMap::new();
    for run in &runs {
        grouped.entry(run.preset_id.clone()).or_default().push(run);
    }

    let mut rankings = Vec::new();
    for (preset_id, preset_runs) in grouped {
        let count = preset_runs.len();
        let fingerprint = preset_runs
            .first()
            .map(|run| run.preset_fingerprint.clone())
            .unwrap_or_else(|| "unknown".to_string());
        let sum_frames: u64 = preset_runs.iter().map(|r| u64::from(r.frame_count)).sum();
        let sum_pipes: u64 = preset_runs.iter().map(|r| u64::from(r.pipes_passed)).sum();
        let survived = preset_runs.iter().filter(|r| !r.game_over).count();
        let flap_rate_sum: f64 = preset_runs
            .iter()
            .map(|r| {
                if r.frame_count == 0 {
                    0.0
                } else {
                    f64::from(r.flap_frames) / f64::from(r.frame_count)
                }
            })
            .sum();
        let objective_value =
            preset_runs.iter().map(|r| r.objective_value).sum::<f64>() / count as f64;
        rankings.push(PresetAggregate {
            preset_id,
            preset_fingerprint: fingerprint,
            runs: count,
            avg_frames: sum_frames as f64 / count as f64,
            max_frames_survived: preset_runs.iter().map(|r| r.frame_count).max().unwrap_or(0),
            avg_pipes: sum_pipes as f64 / count as f64,
            max_pipes: preset_runs.iter().map(|r| r.pipes_passed).max().unwrap_or(0),
            survival_rate: survived as f64 / count as f64,
            avg_flap_rate: flap_rate_sum / count as f64,
            objective_value,
        });
    }
    rankings.sort_by(|a, b| b.objective_value.total_cmp(&a.objective_value));

    let report = BenchmarkReport {
        generated_unix_s: SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0),
        objective: config.objective,
        max_frames: config.max_frames,
        jobs: config.jobs,
        presets: config.presets.clone(),
        seeds: config.seeds.clone(),
        run_count: runs.len(),
        rankings,
        runs,
    };
    write_report(&config.out_dir, &report)?;
    Ok(report)
}

fn write_report(out_dir: &Path, report: &BenchmarkReport) -> Result<()> {
    let path = out_dir.join(format!(
        "benchmark-{}-{}.json",
        report.objective.as_str(),
        report.generated_unix_s
    ));
    let encoded = serde_json::to_string_pretty(report).context("failed encoding report")?;
    fs::write(&path, encoded).with_context(|| format!("failed writing {}", path.display()))?;
    tracing::info!(path = %path.display(), runs = report.run_count, "benchmark report written");
    Ok(())
}
