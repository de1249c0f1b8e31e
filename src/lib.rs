//! # rbo
//!
//! Rank-biased overlap and related similarity measures for indefinite
//! rankings.
//!
//! ## Features
//!
//! - Bounded RBO and unweighted average overlap
//! - Extrapolated RBO for rankings of unequal length
//! - Top-weightness of the RBO weighting
//! - Kendall's tau-b over the elements two rankings share
//! - Parallel pairwise comparison of many rankings
//!
//! ```
//! use rbo::prelude::*;
//!
//! let sim = RankingSimilarity::new("abcdefg".chars(), "zcavwxy".chars())?;
//! let ao = sim.rbo(None, 1.0, false)?;
//! assert!((ao - 0.312).abs() < 1e-3);
//! # Ok::<(), RboError>(())
//! ```

pub mod cli;
pub mod error;
pub mod similarity;

pub mod prelude {
    pub use crate::error::{RboError, Result};
    pub use crate::similarity::{
        KendallTau, RankingSimilarity, SimilarityConfig, SimilarityReport, bound_range,
        pairwise_rbo,
    };
}

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
