//! Per-depth progress reporting for the incremental overlap scans.

use log::info;

/// Reports how far an O(k) scan has progressed.
///
/// A message is logged at `info` level every time the integer percentage
/// changes, and once more when the last depth is reached. Disabled trackers
/// do nothing.
#[derive(Debug)]
pub struct ScanProgress {
    label: &'static str,
    total: usize,
    enabled: bool,
    last_percent: Option<usize>,
}

impl ScanProgress {
    /// Create a tracker for a scan over `total` depths.
    pub fn new(label: &'static str, total: usize, enabled: bool) -> Self {
        Self {
            label,
            total,
            enabled,
            last_percent: None,
        }
    }

    /// Record that depth `d` (0-based) has been processed.
    pub fn tick(&mut self, d: usize) {
        if !self.enabled || self.total == 0 {
            return;
        }

        let percent = 100 * d / self.total;
        if self.last_percent != Some(percent) {
            self.last_percent = Some(percent);
            info!("{}: {}%", self.label, percent);
        }

        if d + 1 == self.total {
            info!("{}: finished!", self.label);
        }
    }

    /// Last reported percentage, if any.
    pub fn last_percent(&self) -> Option<usize> {
        self.last_percent
    }
}
