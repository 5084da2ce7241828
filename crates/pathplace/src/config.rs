//! Spacing parameters for the placer.

use serde::{Deserialize, Serialize};

use crate::error::{PlacementError, Result};

/// What to do with a segment whose two vertices coincide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DegeneratePolicy {
    /// Log a warning, emit nothing for the segment and carry on.
    #[default]
    Skip,
    /// Abort the whole call with [`PlacementError::DegenerateSegment`].
    Fail,
}

/// Placement parameters.
///
/// Defaults are those of the concrete barrier asset: 1.24 wide, 0.2 gap,
/// stop one unit short of each segment end.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlacementConfig {
    /// Footprint of one item along the path. Must be positive.
    pub item_width: f64,
    /// Extra spacing inserted after every item.
    pub gap_after_each_item: f64,
    /// No item starts closer than this to the end of its segment.
    pub stop_margin: f64,
    /// Handling of zero-length segments.
    pub degenerate: DegeneratePolicy,
}

impl Default for PlacementConfig {
    fn default() -> Self {
        Self {
            item_width: 1.24,
            gap_after_each_item: 0.2,
            stop_margin: 1.0,
            degenerate: DegeneratePolicy::Skip,
        }
    }
}

impl PlacementConfig {
    /// Config with the given item width and gap, other fields default.
    pub fn new(item_width: f64, gap_after_each_item: f64) -> Self {
        Self {
            item_width,
            gap_after_each_item,
            ..Default::default()
        }
    }

    /// Builder-style setter for the stop margin.
    pub fn with_stop_margin(mut self, stop_margin: f64) -> Self {
        self.stop_margin = stop_margin;
        self
    }

    /// Builder-style setter for the degenerate-segment policy.
    pub fn with_degenerate(mut self, policy: DegeneratePolicy) -> Self {
        self.degenerate = policy;
        self
    }

    /// Validate settings.
    pub fn validate(&self) -> Result<()> {
        if !(self.item_width.is_finite() && self.item_width > 0.0) {
            return Err(PlacementError::InvalidInput(format!(
                "item_width must be positive, got {}",
                self.item_width
            )));
        }
        if !(self.gap_after_each_item.is_finite() && self.gap_after_each_item >= 0.0) {
            return Err(PlacementError::InvalidInput(format!(
                "gap_after_each_item must be non-negative, got {}",
                self.gap_after_each_item
            )));
        }
        if !(self.stop_margin.is_finite() && self.stop_margin >= 0.0) {
            return Err(PlacementError::InvalidInput(format!(
                "stop_margin must be non-negative, got {}",
                self.stop_margin
            )));
        }
        Ok(())
    }
}
