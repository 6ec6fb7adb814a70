use crate::candidates::Candidate;
use crate::config::SamplerConfig;
use crate::energy::energy;
use crate::error::SampleError;
use crate::rng::SeededRng;
use crate::state::PipeContext;

/// Result of one Boltzmann draw: which candidate won, the probability the
/// distribution assigned to it, and its energy.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SampledChoice {
    pub index: usize,
    pub probability: f64,
    pub energy: f64,
}

/// Normalized Boltzmann probabilities `p_i ∝ exp(-e_i / T)`. The minimum
/// energy is subtracted before exponentiating so a large-magnitude term
/// (collision penalty) cannot overflow the exponential.
pub fn candidate_probabilities(
    energies: &[f64],
    temperature: f64,
) -> Result<Vec<f64>, SampleError> {
    if energies.is_empty() {
        return Err(SampleError::EmptyCandidateSet);
    }
    let min_energy = energies.iter().copied().fold(f64::INFINITY, f64::min);
    if !min_energy.is_finite() {
        return Err(SampleError::DegenerateDistribution {
            total_weight: f64::NAN,
        });
    }
    let weights: Vec<f64> = energies
        .iter()
        .map(|e| (-(e - min_energy) / temperature).exp())
        .collect();
    let total: f64 = weights.iter().sum();
    if !total.is_finite() || total <= 0.0 {
        return Err(SampleError::DegenerateDistribution {
            total_weight: total,
        });
    }
    Ok(weights.into_iter().map(|w| w / total).collect())
}

/// Score every candidate against `pipes` and draw one according to the
/// Boltzmann distribution. The single most-reused primitive: both the rollout
/// engine and the autoplay policy funnel through here.
pub fn sample(
    candidates: &[Candidate],
    pipes: &[PipeContext],
    cfg: &SamplerConfig,
    rng: &mut SeededRng,
) -> Result<SampledChoice, SampleError> {
    let energies: Vec<f64> = candidates
        .iter()
        .map(|candidate| energy(&candidate.resulting_state, pipes, cfg))
        .collect();
    let probabilities = candidate_probabilities(&energies, cfg.temperature)?;
    let index = draw_index(&probabilities, rng);
    Ok(SampledChoice {
        index,
        probability: probabilities[index],
        energy: energies[index],
    })
}

// Inverse-CDF draw; the final index absorbs floating-point residue.
fn draw_index(probabilities: &[f64], rng: &mut SeededRng) -> usize {
    let u = rng.next_f64();
    let mut cumulative = 0.0;
    for (index, p) in probabilities.iter().enumerate() {
        cumulative += p;
        if u < cumulative {
            return index;
        }
    }
    probabilities.len() - 1
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::candidates::generate_candidates;
    use crate::state::BirdState;

    #[test]
    fn probabilities_sum_to_one() {
        for energies in [
            vec![0.0, 1.0, 2.0],
            vec![-5.0, 1_000.0, 3.5, 0.25],
            vec![7.0],
            vec![1_000.0, 1_000.0, 1_000.0],
        ] {
            let probabilities = candidate_probabilities(&energies, 1.0).unwrap();
            let total: f64 = probabilities.iter().sum();
            assert!((total - 1.0).abs() < 1e-9, "total={total}");
        }
    }

    #[test]
    fn lower_energy_gets_strictly_higher_probability() {
        for temperature in [1e-3, 0.5, 1.0, 10.0, 1e4] {
            let probabilities = candidate_probabilities(&[1.0, 2.0], temperature).unwrap();
            assert!(
                probabilities[0] > probabilities[1],
                "T={temperature}: {probabilities:?}"
            );
        }
    }

    #[test]
    fn high_temperature_approaches_uniform() {
        let probabilities = candidate_probabilities(&[0.0, 10.0, 25.0], 1e6).unwrap();
        for p in &probabilities {
            assert!((p - 1.0 / 3.0).abs() < 1e-3, "{probabilities:?}");
        }
    }

    #[test]
    fn low_temperature_converges_to_argmin() {
        let cfg = SamplerConfig {
            temperature: 1e-6,
            ..SamplerConfig::default()
        };
        let mut rng = SeededRng::new(0x5EED);
        let candidates = generate_candidates(&BirdState::new(300.0, 0.0), &cfg, &mut rng);
        let energies: Vec<f64> = candidates
            .iter()
            .map(|c| energy(&c.resulting_state, &[], &cfg))
            .collect();
        let argmin = energies
            .iter()
            .enumerate()
            .min_by(|a, b| a.1.total_cmp(b.1))
            .map(|(i, _)| i)
            .unwrap();

        let trials = 10_000;
        let mut hits = 0;
        for _ in 0..trials {
            let choice = sample(&candidates, &[], &cfg, &mut rng).unwrap();
            if choice.index == argmin {
                hits += 1;
            }
        }
        assert!(f64::from(hits) / f64::from(trials) > 0.999, "hits={hits}");
    }

    #[test]
    fn collision_energy_never_overflows_the_weights() {
        // Without the min-shift, exp(1000/1e-3) would blow up.
        let probabilities = candidate_probabilities(&[1_000.0, -3.0], 1e-3).unwrap();
        assert!(probabilities.iter().all(|p| p.is_finite()));
        assert!(probabilities[1] > 0.999);
    }

    #[test]
    fn empty_candidate_set_is_an_error() {
        assert_eq!(
            candidate_probabilities(&[], 1.0),
            Err(SampleError::EmptyCandidateSet)
        );
    }

    #[test]
    fn non_finite_energy_is_degenerate() {
        assert!(matches!(
            candidate_probabilities(&[f64::NAN, 1.0], 1.0),
            Err(SampleError::DegenerateDistribution { .. })
        ));
    }

    #[test]
    fn draw_frequencies_track_the_distribution() {
        let mut rng = SeededRng::new(0xABCD);
        let probabilities = candidate_probabilities(&[0.0, 1.0], 1.0).unwrap();
        let trials = 50_000;
        let mut first = 0u32;
        for _ in 0..trials {
            if draw_index(&probabilities, &mut rng) == 0 {
                first += 1;
            }
        }
        let observed = f64::from(first) / f64::from(trials);
        assert!((observed - probabilities[0]).abs() < 0.01);
    }
}
