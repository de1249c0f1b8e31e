//! Rank-biased overlap between two ranked lists.
//!
//! The measures here follow Webber, Moffat and Zobel, "A similarity measure
//! for indefinite rankings", ACM TOIS 28(4), 2010. Equation numbers in the
//! method docs refer to that paper. With `p = 1.0` the bounded measure falls
//! back to the unweighted average overlap of Fagin, Kumar and Sivakumar,
//! "Comparing top k lists", 2003.
//!
//! The lists may have different lengths and need not contain the same
//! elements. Every element must be unique within its own list.

use std::hash::Hash;

use ahash::AHashSet;
use log::{info, warn};

use crate::error::{RboError, Result};
use crate::similarity::progress::ScanProgress;

/// Absolute tolerance used when deciding whether a value is "close to" one.
const CLOSE_ATOL: f64 = 1e-8;
/// Relative tolerance used when deciding whether a value is "close to" one.
const CLOSE_RTOL: f64 = 1e-5;

/// Similarity measures between two ranked lists `S` and `T`.
///
/// Both lists are validated at construction and never change afterwards, so
/// every measure is a pure function of the stored lists and its call-time
/// parameters.
///
/// # Examples
///
/// ```
/// use rbo::similarity::RankingSimilarity;
///
/// let sim = RankingSimilarity::new("abcde".chars(), "bacde".chars()).unwrap();
/// let ao = sim.rbo(None, 1.0, false).unwrap();
/// assert!((ao - 0.8).abs() < 1e-3);
/// ```
#[derive(Debug, Clone)]
pub struct RankingSimilarity<T> {
    s: Vec<T>,
    t: Vec<T>,
    verbose: bool,
}

impl<T: Eq + Hash> RankingSimilarity<T> {
    /// Create a new similarity object from two ranked lists.
    ///
    /// Returns [`RboError::InvalidInput`] if either list contains the same
    /// element twice.
    pub fn new<S, U>(s: S, t: U) -> Result<Self>
    where
        S: IntoIterator<Item = T>,
        U: IntoIterator<Item = T>,
    {
        let s: Vec<T> = s.into_iter().collect();
        let t: Vec<T> = t.into_iter().collect();

        validate_unique(&s, "S")?;
        validate_unique(&t, "T")?;

        Ok(Self {
            s,
            t,
            verbose: false,
        })
    }

    /// Enable or disable progress reporting during the depth scans.
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn s(&self) -> &[T] {
        &self.s
    }

    pub fn t(&self) -> &[T] {
        &self.t
    }

    pub fn len_s(&self) -> usize {
        self.s.len()
    }

    pub fn len_t(&self) -> usize {
        self.t.len()
    }

    pub fn is_verbose(&self) -> bool {
        self.verbose
    }

    /// Rank-biased overlap evaluated down to depth `k`.
    ///
    /// Implements Eq. (4) for `p == 1.0` (average overlap) and Eq. (7) for
    /// `0 < p < 1`. `k` defaults to the length of the shorter list and is
    /// clamped to it otherwise. With `extrapolate` and a weighted `p`, the
    /// agreement at depth `k` is assumed to hold for the unseen ranks, as in
    /// Eq. (23).
    ///
    /// Two empty lists agree perfectly (1); one empty list agrees with
    /// nothing (0).
    pub fn rbo(&self, k: Option<usize>, p: f64, extrapolate: bool) -> Result<f64> {
        bounded_rbo(&self.s, &self.t, k, p, extrapolate, self.verbose)
    }

    /// Unweighted average overlap down to depth `k`.
    pub fn average_overlap(&self, k: Option<usize>) -> Result<f64> {
        self.rbo(k, 1.0, false)
    }

    /// Extrapolated rank-biased overlap for lists of unequal length, Eq. (32).
    ///
    /// The shorter list is exhausted before the longer one. Past that point
    /// only the long list advances, and the overlap reached by the short list
    /// is projected onto the deeper ranks. `p` must lie strictly inside
    /// (0, 1).
    pub fn rbo_ext(&self, p: f64) -> Result<f64> {
        validate_weight(p)?;

        if self.s.is_empty() && self.t.is_empty() {
            return Ok(1.0);
        }
        if self.s.is_empty() || self.t.is_empty() {
            return Ok(0.0);
        }

        let (short, long) = if self.s.len() > self.t.len() {
            (&self.t, &self.s)
        } else {
            (&self.s, &self.t)
        };
        let (s, l) = (short.len(), long.len());

        let mut short_running: AHashSet<&T> = AHashSet::with_capacity(s);
        let mut long_running: AHashSet<&T> = AHashSet::with_capacity(s);
        short_running.insert(&short[0]);
        long_running.insert(&long[0]);

        // Raw overlap X[d], and X[s-1] once the short list has run out.
        let mut overlap: usize = usize::from(short[0] == long[0]);
        let mut short_overlap = overlap;

        let mut agreement = overlap as f64;
        let mut rbo = (1.0 - p) * agreement;
        let mut disjoint = 0.0;

        let mut progress = ScanProgress::new("rbo_ext", l, self.verbose);
        for d in 1..l {
            progress.tick(d);
            let weight = (1.0 - p) * p.powf(d as f64);

            if d < s {
                short_running.insert(&short[d]);
                long_running.insert(&long[d]);

                if short[d] == long[d] {
                    overlap += 1;
                } else {
                    if long_running.contains(&short[d]) {
                        overlap += 1;
                    }
                    if short_running.contains(&long[d]) {
                        overlap += 1;
                    }
                }
                short_overlap = overlap;

                // Eq. (28): tie-aware agreement over both running sets.
                agreement =
                    2.0 * overlap as f64 / (short_running.len() + long_running.len()) as f64;
            } else {
                if short_running.contains(&long[d]) {
                    overlap += 1;
                }
                agreement = overlap as f64 / (d + 1) as f64;

                let depth = (d + 1) as f64;
                disjoint +=
                    weight * (short_overlap as f64 * (depth - s as f64) / depth / s as f64);
            }

            rbo += weight * agreement;
        }

        let ext_term = ((overlap - short_overlap) as f64 / l as f64
            + short_overlap as f64 / s as f64)
            * p.powf(l as f64);

        Ok(bound_range(rbo + disjoint + ext_term))
    }

    /// Fraction of the total RBO weight carried by the first `d` ranks,
    /// Eq. (21).
    ///
    /// `d` defaults to the length of the shorter list and is clamped to it
    /// otherwise. `p` must lie strictly inside (0, 1).
    ///
    /// Per the paper, `top_weightness(0.9, 10)` and `top_weightness(0.98, 50)`
    /// are both about 86%.
    pub fn top_weightness(&self, p: f64, d: Option<usize>) -> Result<f64> {
        validate_weight(p)?;

        let bound = self.s.len().min(self.t.len());
        let d = d.map_or(bound, |d| d.min(bound));

        let log_term = (1.0 / (1.0 - p)).ln();
        let top_w = match d {
            0 => 1.0,
            // 1 - p^0 cancels, leaving only the logarithmic term.
            1 => (1.0 - p) / p * log_term,
            _ => {
                let sum_1: f64 = (1..d).map(|i| p.powf(i as f64) / i as f64).sum();
                1.0 - p.powf((d - 1) as f64) + (1.0 - p) / p * d as f64 * (log_term - sum_1)
            }
        };

        if self.verbose {
            info!(
                "The first {} ranks have {:6.3}% of the weight of the evaluation.",
                d,
                100.0 * top_w
            );
        }

        Ok(bound_range(top_w))
    }
}

/// Bounded RBO over two lists already known to hold unique elements.
pub(crate) fn bounded_rbo<T: Eq + Hash>(
    s: &[T],
    t: &[T],
    k: Option<usize>,
    p: f64,
    extrapolate: bool,
    verbose: bool,
) -> Result<f64> {
    validate_rbo_weight(p)?;
    let weighted = p != 1.0;

    if s.is_empty() && t.is_empty() {
        return Ok(1.0);
    }
    if s.is_empty() || t.is_empty() {
        return Ok(0.0);
    }

    let k = k.unwrap_or(usize::MAX).min(s.len()).min(t.len());
    if k == 0 {
        return Ok(0.0);
    }

    let mut s_running: AHashSet<&T> = AHashSet::with_capacity(k);
    let mut t_running: AHashSet<&T> = AHashSet::with_capacity(k);
    s_running.insert(&s[0]);
    t_running.insert(&t[0]);

    let mut agreement = if s[0] == t[0] { 1.0 } else { 0.0 };
    let mut average_overlap = if weighted {
        (1.0 - p) * agreement
    } else {
        agreement
    };

    let mut progress = ScanProgress::new("rbo", k, verbose);
    for d in 1..k {
        progress.tick(d);

        let s_item = &s[d];
        let t_item = &t[d];

        // Neither running set holds depth d yet, so a new item shared by
        // both lists at this depth is only caught by the equality check.
        let mut overlap_incr = 0usize;
        if t_running.contains(s_item) {
            overlap_incr += 1;
        }
        if s_running.contains(t_item) {
            overlap_incr += 1;
        }
        if s_item == t_item {
            overlap_incr += 1;
        }

        let depth = d as f64;
        agreement = (agreement * depth + overlap_incr as f64) / (depth + 1.0);

        if weighted {
            average_overlap += (1.0 - p) * p.powf(depth) * agreement;
        } else {
            average_overlap = (average_overlap * depth + agreement) / (depth + 1.0);
        }

        s_running.insert(s_item);
        t_running.insert(t_item);
    }

    if extrapolate && weighted {
        average_overlap += agreement * p.powf(k as f64);
    }

    Ok(bound_range(average_overlap))
}

/// Bound a computed measure to [0, 1].
///
/// Values within floating-point tolerance of 1 (`|1 - v| <= 1e-8 + 1e-5 * |v|`)
/// are returned unchanged, so a result may exceed 1.0 by that much. Any other
/// value outside the range is clamped and a warning is logged; this is
/// accumulated rounding error, not a failure.
pub fn bound_range(value: f64) -> f64 {
    if (0.0..=1.0).contains(&value) || is_close_to_one(value) {
        return value;
    }

    warn!("Value {value} out of [0, 1] bound, will bound it.");
    value.max(0.0).min(1.0)
}

fn is_close_to_one(value: f64) -> bool {
    (1.0 - value).abs() <= CLOSE_ATOL + CLOSE_RTOL * value.abs()
}

/// Check that `list` holds no element twice.
pub(crate) fn validate_unique<T: Eq + Hash>(list: &[T], name: &str) -> Result<()> {
    let mut seen: AHashSet<&T> = AHashSet::with_capacity(list.len());
    for (position, item) in list.iter().enumerate() {
        if !seen.insert(item) {
            return Err(RboError::invalid_input(format!(
                "list {name} contains a duplicate element at position {position}"
            )));
        }
    }
    Ok(())
}

/// `p` must lie strictly inside (0, 1).
pub(crate) fn validate_weight(p: f64) -> Result<()> {
    if p > 0.0 && p < 1.0 {
        Ok(())
    } else {
        Err(RboError::invalid_parameter(format!(
            "p must be between (0, 1), got {p}"
        )))
    }
}

/// Like [`validate_weight`], but also accepts the unweighted sentinel `1.0`.
pub(crate) fn validate_rbo_weight(p: f64) -> Result<()> {
    if p == 1.0 {
        return Ok(());
    }
    validate_weight(p)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    fn sim(s: &str, t: &str) -> RankingSimilarity<char> {
        RankingSimilarity::new(chars(s), chars(t)).unwrap()
    }

    #[test]
    fn test_rejects_duplicates() {
        let result = RankingSimilarity::new(chars("abca"), chars("xyz"));
        match result {
            Err(RboError::InvalidInput(msg)) => assert!(msg.contains("list S")),
            _ => panic!("Expected invalid input error"),
        }

        let result = RankingSimilarity::new(chars("abc"), chars("xyy"));
        assert!(matches!(result, Err(RboError::InvalidInput(_))));
    }

    #[test]
    fn test_accessors() {
        let sim = sim("abcde", "xy").with_verbose(true);
        assert_eq!(sim.len_s(), 5);
        assert_eq!(sim.len_t(), 2);
        assert_eq!(sim.s(), &['a', 'b', 'c', 'd', 'e']);
        assert_eq!(sim.t(), &['x', 'y']);
        assert!(sim.is_verbose());
    }

    #[test]
    fn test_rbo_paper_figure_5() {
        let value = sim("abcdefg", "zcavwxy").rbo(None, 1.0, false).unwrap();
        assert!((value - 0.312).abs() < 5e-4, "got {value}");
    }

    #[test]
    fn test_rbo_swapped_items() {
        let value = sim("abcde", "bacde").average_overlap(None).unwrap();
        assert!((value - 0.8).abs() < 1e-9);

        let value = sim("abcde", "abced").average_overlap(None).unwrap();
        assert!((value - 0.95).abs() < 1e-9);
    }

    #[test]
    fn test_rbo_empty_lists() {
        let empty = sim("", "");
        assert_eq!(empty.rbo(None, 1.0, false).unwrap(), 1.0);
        assert_eq!(empty.rbo(None, 0.9, true).unwrap(), 1.0);
        assert_eq!(empty.rbo_ext(0.9).unwrap(), 1.0);

        for one_empty in [sim("a", ""), sim("", "a")] {
            assert_eq!(one_empty.rbo(None, 1.0, false).unwrap(), 0.0);
            assert_eq!(one_empty.rbo(Some(3), 0.5, true).unwrap(), 0.0);
            assert_eq!(one_empty.rbo_ext(0.5).unwrap(), 0.0);
        }
    }

    #[test]
    fn test_rbo_zero_depth() {
        assert_eq!(sim("abc", "abc").rbo(Some(0), 1.0, false).unwrap(), 0.0);
    }

    #[test]
    fn test_rbo_depth_is_clamped() {
        let sim = sim("abcde", "abcxy");
        let unbounded = sim.rbo(None, 0.9, false).unwrap();
        let deep = sim.rbo(Some(100), 0.9, false).unwrap();
        assert_eq!(unbounded, deep);

        // The first three ranks agree completely.
        assert_eq!(sim.rbo(Some(3), 1.0, false).unwrap(), 1.0);
    }

    #[test]
    fn test_rbo_weighted_partial_sum() {
        // Identical lists: agreement is 1 at every depth, so the weighted sum
        // down to depth k is 1 - p^k.
        let sim = sim("abcdef", "abcdef");
        let p = 0.8_f64;
        let value = sim.rbo(Some(4), p, false).unwrap();
        assert!((value - (1.0 - p.powi(4))).abs() < 1e-12);

        // Extrapolation adds the unseen mass back.
        let value = sim.rbo(Some(4), p, true).unwrap();
        assert!((value - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_rbo_rejects_bad_weight() {
        let sim = sim("abc", "abc");
        for p in [0.0, -0.5, 1.5, f64::NAN] {
            assert!(matches!(
                sim.rbo(None, p, false),
                Err(RboError::InvalidParameter(_))
            ));
        }
        // Checked even when the lists are empty.
        assert!(self::sim("", "").rbo(None, 2.0, false).is_err());
    }

    #[test]
    fn test_rbo_ext_rejects_unweighted() {
        let sim = sim("abc", "abc");
        assert!(matches!(sim.rbo_ext(1.0), Err(RboError::InvalidParameter(_))));
        assert!(matches!(sim.rbo_ext(0.0), Err(RboError::InvalidParameter(_))));
        assert!(self::sim("", "").rbo_ext(1.0).is_err());
    }

    #[test]
    fn test_rbo_ext_identical_lists() {
        let value = sim("abcdefghij", "abcdefghij").rbo_ext(0.9).unwrap();
        assert!((value - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_rbo_ext_prefix_of_longer_list() {
        // T is a prefix of S: every observed rank agrees, and the short list's
        // complete overlap is carried into the deeper ranks.
        let value = sim("abcdefghijklmnopqrstuvwxyz", "abcdefg")
            .rbo_ext(0.95)
            .unwrap();
        assert!((value - 1.0).abs() < 1e-9, "got {value}");
    }

    #[test]
    fn test_rbo_ext_partial_overlap_unequal_lengths() {
        // s < l with a partial overlap exercises both the disjoint and the
        // tail terms.
        let value = sim("abcdefg", "zcav").rbo_ext(0.9).unwrap();
        assert!((value - 0.4185).abs() < 1e-12, "got {value}");

        let value = sim("abcdefghij", "cxaeb").rbo_ext(0.8).unwrap();
        assert!((value - 0.464213333333333).abs() < 1e-12, "got {value}");
    }

    #[test]
    fn test_bounded_rbo_on_slices() {
        let s = ['a', 'b', 'c', 'd', 'e'];
        let t = ['b', 'a', 'c', 'd', 'e'];
        let value = bounded_rbo(&s, &t, None, 1.0, false, false).unwrap();
        assert!((value - 0.8).abs() < 1e-9);

        let via_struct = sim("abcde", "bacde").rbo(Some(3), 0.9, true).unwrap();
        assert_eq!(bounded_rbo(&s, &t, Some(3), 0.9, true, false).unwrap(), via_struct);
    }

    #[test]
    fn test_rbo_ext_is_symmetric() {
        let a = sim("abcdefg", "zcav").rbo_ext(0.9).unwrap();
        let b = sim("zcav", "abcdefg").rbo_ext(0.9).unwrap();
        assert!((a - b).abs() < 1e-12);
    }

    #[test]
    fn test_rbo_ext_disjoint() {
        let value = sim("abcde", "fghijkl").rbo_ext(0.9).unwrap();
        assert_eq!(value, 0.0);
    }

    #[test]
    fn test_rbo_ext_single_element() {
        // s = 1: the short list is exhausted after the first rank.
        let value = sim("a", "abc").rbo_ext(0.5).unwrap();
        assert!((value - 1.0).abs() < 1e-9, "got {value}");

        let value = sim("a", "b").rbo_ext(0.5).unwrap();
        assert_eq!(value, 0.0);
    }

    #[test]
    fn test_top_weightness_paper_values() {
        let sim = sim(
            "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ",
            "ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz",
        );
        let w = sim.top_weightness(0.9, Some(10)).unwrap();
        assert!((w - 0.86).abs() < 1e-2, "got {w}");

        let w = sim.top_weightness(0.98, Some(50)).unwrap();
        assert!((w - 0.86).abs() < 1e-2, "got {w}");
    }

    #[test]
    fn test_top_weightness_small_depths() {
        let p = 0.9_f64;
        let sim = sim("abc", "abc");
        assert_eq!(sim.top_weightness(p, Some(0)).unwrap(), 1.0);

        let expected = (1.0 - p) / p * (1.0 / (1.0 - p)).ln();
        let w = sim.top_weightness(p, Some(1)).unwrap();
        assert!((w - expected).abs() < 1e-12);

        // Default depth is the shorter list, and larger depths are clamped.
        let default = sim.top_weightness(p, None).unwrap();
        let clamped = sim.top_weightness(p, Some(1000)).unwrap();
        let explicit = sim.top_weightness(p, Some(3)).unwrap();
        assert_eq!(default, explicit);
        assert_eq!(clamped, explicit);
    }

    #[test]
    fn test_top_weightness_empty_list() {
        assert_eq!(sim("", "abc").top_weightness(0.5, None).unwrap(), 1.0);
    }

    #[test]
    fn test_top_weightness_grows_with_depth() {
        let sim = sim("abcdefghij", "jihgfedcba");
        let mut previous = 0.0;
        for d in 1..=10 {
            let w = sim.top_weightness(0.9, Some(d)).unwrap();
            assert!(w >= previous, "depth {d}: {w} < {previous}");
            previous = w;
        }
    }

    #[test]
    fn test_top_weightness_rejects_bad_weight() {
        let sim = sim("abc", "abc");
        assert!(matches!(
            sim.top_weightness(1.0, None),
            Err(RboError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_bound_range() {
        assert_eq!(bound_range(0.5), 0.5);
        assert_eq!(bound_range(0.0), 0.0);
        assert_eq!(bound_range(1.0), 1.0);
        assert_eq!(bound_range(-0.1), 0.0);
        assert_eq!(bound_range(1.5), 1.0);

        // Within tolerance of one: left untouched.
        let nearly_one = 1.0 + 1e-12;
        assert_eq!(bound_range(nearly_one), nearly_one);
        let just_above = 1.0 + 5e-6;
        assert_eq!(bound_range(just_above), just_above);
        assert_eq!(bound_range(1.0 + 1e-4), 1.0);
    }
}
