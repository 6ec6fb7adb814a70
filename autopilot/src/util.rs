use std::fs;
use std::path::Path;

use anyhow::{anyhow, Context, Result};
use flappy_sampler_core::PipeContext;

pub fn parse_seed(seed: &str) -> Result<u32> {
    let s = seed.trim();
    if s.is_empty() {
        return Err(anyhow!("empty seed"));
    }
    if let Some(hex) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        u32::from_str_radix(hex, 16).with_context(|| format!("invalid hex seed: {s}"))
    } else {
        s.parse::<u32>()
            .with_context(|| format!("invalid decimal seed: {s}"))
    }
}

pub fn seed_to_hex(seed: u32) -> String {
    format!("0x{seed:08x}")
}

/// Resolve the benchmark seed set from whichever source the CLI was given:
/// an explicit CSV, a seed file (one per line, `#` comments), or a
/// start+count range. Priority in that order.
pub fn resolve_seeds(
    csv: Option<&str>,
    file: Option<&Path>,
    start: Option<&str>,
    count: u32,
) -> Result<Vec<u32>> {
    if let Some(raw) = csv {
        let mut seeds = Vec::new();
        for token in raw.split(',') {
            let token = token.trim();
            if token.is_empty() {
                continue;
            }
            seeds.push(parse_seed(token)?);
        }
        if seeds.is_empty() {
            return Err(anyhow!("no seeds parsed from --seeds"));
        }
        return Ok(seeds);
    }
    if let Some(path) = file {
        let data = fs::read_to_string(path)
            .with_context(|| format!("failed reading seed file {}", path.display()))?;
        let mut seeds = Vec::new();
        for line in data.lines() {
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }
            seeds.push(parse_seed(trimmed)?);
        }
        if seeds.is_empty() {
            return Err(anyhow!("seed file {} had no seeds", path.display()));
        }
        return Ok(seeds);
    }
    if count == 0 {
        return Err(anyhow!("--seed-count must be >= 1"));
    }
    let base = match start {
        Some(raw) => parse_seed(raw)?,
        None => 1,
    };
    Ok((0..count).map(|offset| base.wrapping_add(offset)).collect())
}

/// Parse the CLI pipe list: `distance:gap_top:gap_bottom`, comma separated.
pub fn parse_pipes(raw: &str) -> Result<Vec<PipeContext>> {
    let mut pipes = Vec::new();
    for token in raw.split(',') {
        let token = token.trim();
        if token.is_empty() {
            continue;
        }
        let fields: Vec<&str> = token.split(':').collect();
        if fields.len() != 3 {
            return Err(anyhow!(
                "pipe '{token}' must be distance:gap_top:gap_bottom"
            ));
        }
        let parse = |name: &str, raw: &str| -> Result<f64> {
            raw.parse::<f64>()
                .with_context(|| format!("pipe '{token}': invalid {name} '{raw}'"))
        };
        let pipe = PipeContext {
            distance: parse("distance", fields[0])?,
            gap_top: parse("gap_top", fields[1])?,
            gap_bottom: parse("gap_bottom", fields[2])?,
        };
        if pipe.gap_bottom <= pipe.gap_top {
            return Err(anyhow!("pipe '{token}': gap_bottom must exceed gap_top"));
        }
        pipes.push(pipe);
    }
    Ok(pipes)
}
