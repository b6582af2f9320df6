//! Per-step occupation of eigenstates.
//!
//! The weight of eigenstate `k` is `|alpha_k|^2`. Weights at or below
//! [`NEGLIGIBLE_WEIGHT`] are dropped; survivors keep their original order and
//! carry their absolute eigenstate index `fst_filter + k`.

use super::arrays::ArrayResolver;
use super::matcher::{EigenBasis, match_input_step};
use super::traits::ArtifactSink;
use crate::common::constants::NEGLIGIBLE_WEIGHT;
use crate::domain::{
    FilterWindow, OutputArtifact, SplitFile, StateRecord, WavepacketError, WavepacketResult,
};
use num_complex::Complex64;
use serde::{Deserialize, Serialize};

/// Output record for one step. Field order is the on-disk key order.
///
/// `fst_filter` and `num_filter` describe the propagated window, not the
/// filtered arrays: `num_filter` is usually larger than `indices.len()`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlphaDistribution {
    pub time: f64,
    pub step_num: u64,
    pub actual_msd: f64,
    pub indices: Vec<i64>,
    pub fst_filter: i64,
    pub num_filter: usize,
    pub eigenvalues: Vec<f64>,
    pub means: Vec<f64>,
    pub msds: Vec<f64>,
    pub alpha_weights: Vec<f64>,
}

pub fn alpha_weights(real: &[f64], imag: &[f64]) -> Vec<f64> {
    real.iter()
        .zip(imag)
        .map(|(re, im)| Complex64::new(*re, *im).norm_sqr())
        .collect()
}

pub fn is_negligible(weight: f64) -> bool {
    weight <= NEGLIGIBLE_WEIGHT
}

pub fn compute_distribution(
    state: &StateRecord,
    basis: &EigenBasis,
    window: FilterWindow,
    resolver: &ArrayResolver,
) -> WavepacketResult<AlphaDistribution> {
    let actual_msd = state.actual_msd()?;
    let real = resolver.resolve(&state.alpha.real)?;
    let imag = resolver.resolve(&state.alpha.imag)?;

    if real.len() != imag.len() {
        return Err(WavepacketError::computation(
            "RUN.ALPHA_SHAPE",
            format!(
                "step {} has {} real but {} imaginary alpha components",
                state.step_num,
                real.len(),
                imag.len()
            ),
        ));
    }
    let weights = alpha_weights(&real, &imag);

    if basis.eigenvalues.len() != window.num_filter || weights.len() != window.num_filter {
        return Err(WavepacketError::computation(
            "RUN.EIGENSTATE_COUNT",
            format!(
                "step {} has {} eigenvalues and {} alpha weights; filter window holds {}",
                state.step_num,
                basis.eigenvalues.len(),
                weights.len(),
                window.num_filter
            ),
        ));
    }

    if basis.means.len() != window.num_filter || basis.msds.len() != window.num_filter {
        return Err(WavepacketError::computation(
            "RUN.EIGENSTATE_COUNT",
            format!(
                "step {} has {} eigenstate means and {} msds; filter window holds {}",
                state.step_num,
                basis.means.len(),
                basis.msds.len(),
                window.num_filter
            ),
        ));
    }

    let mut distribution = AlphaDistribution {
        time: state.time,
        step_num: state.step_num,
        actual_msd,
        indices: Vec::new(),
        fst_filter: window.fst_filter,
        num_filter: window.num_filter,
        eigenvalues: Vec::new(),
        means: Vec::new(),
        msds: Vec::new(),
        alpha_weights: Vec::new(),
    };

    for (position, weight) in weights.into_iter().enumerate() {
        if is_negligible(weight) {
            continue;
        }
        distribution.indices.push(window.index_at(position));
        distribution.eigenvalues.push(basis.eigenvalues[position]);
        distribution.means.push(basis.means[position]);
        distribution.msds.push(basis.msds[position]);
        distribution.alpha_weights.push(weight);
    }

    Ok(distribution)
}

/// Matches `state` against the structures of `split`, computes its
/// distribution and hands it to `sink`.
pub fn process_step<S>(
    split: &SplitFile,
    state: &StateRecord,
    window: FilterWindow,
    resolver: &ArrayResolver,
    sink: &mut S,
) -> WavepacketResult<OutputArtifact>
where
    S: ArtifactSink + ?Sized,
{
    let basis = match_input_step(split, state.input_step, resolver)?;
    let distribution = compute_distribution(state, &basis, window, resolver)?;
    sink.emit(&distribution)
}
