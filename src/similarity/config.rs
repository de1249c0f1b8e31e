//! Configuration and summary report for comparing two rankings.

use std::hash::Hash;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::similarity::ranking::{RankingSimilarity, validate_rbo_weight, validate_weight};

/// Parameters used when computing a [`SimilarityReport`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimilarityConfig {
    /// Evaluation depth for the bounded RBO (`None` = shorter list length).
    pub depth: Option<usize>,
    /// Weight for the bounded RBO. `1.0` means unweighted average overlap.
    pub p: f64,
    /// Weight for the extrapolated RBO and the top-weightness, in (0, 1).
    pub ext_p: f64,
    /// Extrapolate the bounded RBO beyond `depth`.
    pub extrapolate: bool,
    /// Report per-depth progress while scanning.
    pub verbose: bool,
}

impl Default for SimilarityConfig {
    fn default() -> Self {
        Self {
            depth: None,
            p: 1.0,
            ext_p: 0.98,
            extrapolate: false,
            verbose: false,
        }
    }
}

impl SimilarityConfig {
    /// Check both weights before any measure is computed.
    pub fn validate(&self) -> Result<()> {
        validate_rbo_weight(self.p)?;
        validate_weight(self.ext_p)
    }

    /// Load a configuration from a JSON file. Missing fields take defaults.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    pub fn from_json(content: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(content)?;
        config.validate()?;
        Ok(config)
    }
}

/// Every measure for one pair of rankings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimilarityReport {
    pub len_s: usize,
    pub len_t: usize,
    pub common_elements: usize,
    pub rbo: f64,
    pub rbo_ext: f64,
    pub top_weightness: f64,
    pub kendall_tau: Option<f64>,
}

impl<T: Eq + Hash> RankingSimilarity<T> {
    /// Compute every measure with the parameters in `config`.
    pub fn report(&self, config: &SimilarityConfig) -> Result<SimilarityReport> {
        config.validate()?;

        let kendall = self.kendall_tau();
        Ok(SimilarityReport {
            len_s: self.len_s(),
            len_t: self.len_t(),
            common_elements: kendall.common,
            rbo: self.rbo(config.depth, config.p, config.extrapolate)?,
            rbo_ext: self.rbo_ext(config.ext_p)?,
            top_weightness: self.top_weightness(config.ext_p, config.depth)?,
            kendall_tau: kendall.tau,
        })
    }
}
