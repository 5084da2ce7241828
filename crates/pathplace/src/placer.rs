//! Segment-by-segment placement of repeated items.
//!
//! Every segment of the polyline gets its own run of items, starting at the
//! segment's first vertex. Nothing carries over from one segment to the next,
//! so a leftover shorter than one pitch at the end of a segment shows up as a
//! gap at the following vertex.

use std::sync::Arc;

use pathplace_geo::{metric_for, SegmentMetric};
use pathplace_math::{heading_degrees, Dir3, Point3, Tolerance};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::{DegeneratePolicy, PlacementConfig};
use crate::error::{PlacementError, Result};
use crate::polyline::{Polyline, Segment};

/// Where one item goes and which way it faces.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacementSpec {
    /// Position of the item's origin.
    pub position: Point3,
    /// Rotation about the vertical axis, degrees counter-clockwise from +X.
    pub heading_degrees: f64,
    /// Index of the segment the item was placed on.
    pub segment: usize,
    /// Distance of the item from the segment's first vertex.
    pub offset: f64,
}

/// What happened on one segment.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SegmentReport {
    /// Segment index.
    pub index: usize,
    /// First vertex.
    pub start: Point3,
    /// Second vertex.
    pub end: Point3,
    /// Length as measured by the metric.
    pub distance: f64,
    /// Heading of the segment; `None` for skipped degenerate segments.
    pub heading_degrees: Option<f64>,
    /// `floor(distance / item_width)`.
    pub item_count: usize,
    /// Items actually emitted after the stop margin.
    pub emitted: usize,
    /// True when the segment was zero-length and skipped.
    pub skipped: bool,
}

/// Placements plus per-segment diagnostics.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlacementReport {
    /// All placements in path order.
    pub placements: Vec<PlacementSpec>,
    /// One entry per segment.
    pub segments: Vec<SegmentReport>,
    /// Sum of segment distances.
    pub total_distance: f64,
    /// Name of the metric used.
    pub metric: &'static str,
}

impl PlacementReport {
    /// Number of placements.
    pub fn placement_count(&self) -> usize {
        self.placements.len()
    }

    /// Number of skipped degenerate segments.
    pub fn skipped_count(&self) -> usize {
        self.segments.iter().filter(|s| s.skipped).count()
    }
}

/// Places items along polylines.
///
/// Without an explicit metric the placer picks one from each polyline's
/// spatial reference: planar 3D distance for projected coordinates, WGS84
/// geodesic distance for longitude/latitude.
#[derive(Clone, Default)]
pub struct SegmentPlacer {
    config: PlacementConfig,
    metric: Option<Arc<dyn SegmentMetric>>,
}

impl std::fmt::Debug for SegmentPlacer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SegmentPlacer")
            .field("config", &self.config)
            .field("metric", &self.metric.as_ref().map(|m| m.name()))
            .finish()
    }
}

impl SegmentPlacer {
    /// Create a placer with the given spacing.
    pub fn new(config: PlacementConfig) -> Self {
        Self {
            config,
            metric: None,
        }
    }

    /// Use `metric` for every polyline regardless of its spatial reference.
    pub fn with_metric(mut self, metric: impl SegmentMetric + 'static) -> Self {
        self.metric = Some(Arc::new(metric));
        self
    }

    /// Compute placements along `polyline`.
    pub fn place(&self, polyline: &Polyline) -> Result<Vec<PlacementSpec>> {
        Ok(self.report(polyline)?.placements)
    }

    /// Compute placements along `polyline` together with a per-segment report.
    pub fn report(&self, polyline: &Polyline) -> Result<PlacementReport> {
        self.config.validate()?;
        polyline.validate()?;

        let metric: &dyn SegmentMetric = match &self.metric {
            Some(m) => m.as_ref(),
            None => metric_for(&polyline.spatial_reference),
        };

        let mut placements = Vec::new();
        let mut segments = Vec::with_capacity(polyline.segment_count());
        for segment in polyline.segments() {
            segments.push(self.place_segment(&segment, metric, &mut placements)?);
        }

        let total_distance = segments.iter().map(|s| s.distance).sum();
        debug!(
            metric = metric.name(),
            segments = segments.len(),
            placements = placements.len(),
            total_distance,
            "placed items along polyline"
        );

        Ok(PlacementReport {
            placements,
            segments,
            total_distance,
            metric: metric.name(),
        })
    }

    fn place_segment(
        &self,
        segment: &Segment,
        metric: &dyn SegmentMetric,
        out: &mut Vec<PlacementSpec>,
    ) -> Result<SegmentReport> {
        let delta = segment.end - segment.start;
        let length = delta.norm();
        let distance = metric.distance(&segment.start, &segment.end);

        // Geographic vertices can differ in coordinates yet be the same place.
        if Tolerance::DEFAULT.is_zero(length) || Tolerance::DEFAULT.is_zero(distance) {
            return match self.config.degenerate {
                DegeneratePolicy::Fail => Err(PlacementError::DegenerateSegment(segment.index)),
                DegeneratePolicy::Skip => {
                    warn!(
                        segment = segment.index,
                        "skipping zero-length segment between coincident vertices"
                    );
                    Ok(SegmentReport {
                        index: segment.index,
                        start: segment.start,
                        end: segment.end,
                        distance: 0.0,
                        heading_degrees: None,
                        item_count: 0,
                        emitted: 0,
                        skipped: true,
                    })
                }
            };
        }

        let direction = Dir3::new_unchecked(delta / length);
        let (dx, dy) = metric.horizontal_delta(&segment.start, &segment.end);
        let heading = heading_degrees(dx, dy);

        let width = self.config.item_width;
        let gap = self.config.gap_after_each_item;
        let item_count = (distance / width).floor() as usize;
        let limit = distance - self.config.stop_margin;

        let mut emitted = 0;
        for i in 0..item_count {
            let step = width * i as f64 + gap * i as f64;
            if step > limit {
                break;
            }
            out.push(PlacementSpec {
                position: metric.advance(&segment.start, &segment.end, &direction, step, distance),
                heading_degrees: heading,
                segment: segment.index,
                offset: step,
            });
            emitted += 1;
        }

        debug!(
            segment = segment.index,
            distance, heading, item_count, emitted, "segment placed"
        );

        Ok(SegmentReport {
            index: segment.index,
            start: segment.start,
            end: segment.end,
            distance,
            heading_degrees: Some(heading),
            item_count,
            emitted,
            skipped: false,
        })
    }
}

/// Place items along `polyline` with `config`, choosing the distance metric
/// from the polyline's spatial reference.
pub fn place(polyline: &Polyline, config: &PlacementConfig) -> Result<Vec<PlacementSpec>> {
    SegmentPlacer::new(config.clone()).place(polyline)
}
