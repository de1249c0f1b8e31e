//! Similarity measures between two ranked lists.
//!
//! The lists may be indefinite (truncated at an arbitrary depth), of
//! different lengths, and non-conjoint. The main entry point is
//! [`RankingSimilarity`], which exposes:
//!
//! - [`RankingSimilarity::rbo`]: bounded rank-biased overlap, optionally extrapolated
//! - [`RankingSimilarity::rbo_ext`]: extrapolated RBO for lists of unequal length
//! - [`RankingSimilarity::top_weightness`]: weight carried by the first `d` ranks
//! - [`RankingSimilarity::kendall_tau`]: Kendall's tau-b over the shared elements

pub mod batch;
pub mod config;
pub mod kendall;
pub mod progress;
pub mod ranking;

pub use batch::*;
pub use config::*;
pub use kendall::*;
pub use ranking::*;
