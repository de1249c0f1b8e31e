//! Kendall's tau-b restricted to the elements both rankings share.
//!
//! Kendall's tau is only defined for conjoint rankings, so the elements that
//! appear in just one of the lists are dropped first. The remaining elements
//! are compared by their positions in `S` and in `T`.

use std::cmp::Ordering;
use std::hash::Hash;

use ahash::AHashMap;
use log::info;
use serde::{Deserialize, Serialize};

use crate::similarity::ranking::RankingSimilarity;

/// Kendall correlation over the common elements of two rankings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KendallTau {
    /// Tau-b in [-1, 1]; `None` when fewer than two elements are shared.
    pub tau: Option<f64>,
    /// Number of elements present in both lists.
    pub common: usize,
    /// Share of `S` made up of common elements.
    pub proportion_s: f64,
    /// Share of `T` made up of common elements.
    pub proportion_t: f64,
}

impl<T: Eq + Hash> RankingSimilarity<T> {
    /// Kendall's tau-b over the elements common to `S` and `T`.
    pub fn kendall_tau(&self) -> KendallTau {
        let t_positions: AHashMap<&T, usize> =
            self.t().iter().enumerate().map(|(i, x)| (x, i)).collect();

        // Pairs are ordered by position in S. Any common ordering of the pairs
        // yields the same tau.
        let positions: Vec<(usize, usize)> = self
            .s()
            .iter()
            .enumerate()
            .filter_map(|(i, x)| t_positions.get(x).map(|&j| (i, j)))
            .collect();

        let common = positions.len();
        let proportion_s = proportion(common, self.len_s());
        let proportion_t = proportion(common, self.len_t());

        info!("The number of common elements is {common}");
        info!("The proportion used in list S is {:6.3}%.", 100.0 * proportion_s);
        info!("The proportion used in list T is {:6.3}%.", 100.0 * proportion_t);

        KendallTau {
            tau: tau_b(&positions),
            common,
            proportion_s,
            proportion_t,
        }
    }
}

fn proportion(count: usize, len: usize) -> f64 {
    if len == 0 {
        0.0
    } else {
        count as f64 / len as f64
    }
}

/// Tau-b of paired observations, accounting for ties on either side.
fn tau_b(pairs: &[(usize, usize)]) -> Option<f64> {
    if pairs.len() < 2 {
        return None;
    }

    let mut concordant = 0u64;
    let mut discordant = 0u64;
    let mut tied_x_only = 0u64;
    let mut tied_y_only = 0u64;

    for (i, &(x_i, y_i)) in pairs.iter().enumerate() {
        for &(x_j, y_j) in &pairs[i + 1..] {
            match (x_i.cmp(&x_j), y_i.cmp(&y_j)) {
                (Ordering::Equal, Ordering::Equal) => {}
                (Ordering::Equal, _) => tied_x_only += 1,
                (_, Ordering::Equal) => tied_y_only += 1,
                (dx, dy) if dx == dy => concordant += 1,
                _ => discordant += 1,
            }
        }
    }

    let untied_x = (concordant + discordant + tied_y_only) as f64;
    let untied_y = (concordant + discordant + tied_x_only) as f64;
    let denominator = (untied_x * untied_y).sqrt();
    if denominator == 0.0 {
        return None;
    }

    Some((concordant as f64 - discordant as f64) / denominator)
}
