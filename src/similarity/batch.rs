//! Pairwise rank-biased overlap over a collection of rankings.

use std::hash::Hash;

use log::debug;
use rayon::prelude::*;

use crate::error::Result;
use crate::similarity::ranking::{bounded_rbo, validate_rbo_weight, validate_unique};

/// Compute the `n x n` matrix of `rbo(depth, p, extrapolate)` between every
/// pair of rankings. Rows are computed in parallel.
///
/// Entry `[i][j]` compares `rankings[i]` (as `S`) with `rankings[j]` (as
/// `T`). Every ranking and the weight are validated once, before any work
/// starts; the pairs then run on the borrowed slices without copying.
pub fn pairwise_rbo<T>(
    rankings: &[Vec<T>],
    depth: Option<usize>,
    p: f64,
    extrapolate: bool,
) -> Result<Vec<Vec<f64>>>
where
    T: Eq + Hash + Sync,
{
    validate_rbo_weight(p)?;
    for (i, ranking) in rankings.iter().enumerate() {
        validate_unique(ranking, &format!("#{i}"))?;
    }

    debug!(
        "Computing pairwise RBO for {} rankings (depth={depth:?}, p={p})",
        rankings.len()
    );

    rankings
        .par_iter()
        .map(|s| {
            rankings
                .iter()
                .map(|t| bounded_rbo(s, t, depth, p, extrapolate, false))
                .collect::<Result<Vec<f64>>>()
        })
        .collect()
}
