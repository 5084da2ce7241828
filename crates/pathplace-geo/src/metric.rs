//! Segment length and interpolation.

use pathplace_math::{Dir3, Point3};

use crate::geodesic::GeodesicMetric;
use crate::SpatialReference;

/// Measures segments and walks along them.
///
/// Implementations are stateless so one instance can serve any number of
/// concurrent placements.
pub trait SegmentMetric: Send + Sync {
    /// Short name for diagnostics.
    fn name(&self) -> &'static str;

    /// Length of the segment `a -> b` in the metric's linear unit.
    fn distance(&self, a: &Point3, b: &Point3) -> f64;

    /// Horizontal displacement `(dx, dy)` of `a -> b` in coordinate units,
    /// along the same route [`Self::advance`] walks.
    fn horizontal_delta(&self, a: &Point3, b: &Point3) -> (f64, f64) {
        (b.x - a.x, b.y - a.y)
    }

    /// Point `step` units along `a -> b`.
    ///
    /// `direction` is the unit coordinate-space direction of the segment and
    /// `distance` the value previously returned by [`Self::distance`]. The
    /// default moves straight along `direction`, which is correct whenever
    /// the metric's unit is the coordinate unit.
    fn advance(
        &self,
        a: &Point3,
        _b: &Point3,
        direction: &Dir3,
        step: f64,
        _distance: f64,
    ) -> Point3 {
        a + direction.as_ref() * step
    }
}

/// Straight-line 3D distance in coordinate units.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlanarMetric;

impl SegmentMetric for PlanarMetric {
    fn name(&self) -> &'static str {
        "planar"
    }

    fn distance(&self, a: &Point3, b: &Point3) -> f64 {
        (b - a).norm()
    }
}

static PLANAR: PlanarMetric = PlanarMetric;
static GEODESIC: GeodesicMetric = GeodesicMetric;

/// The metric matching a spatial reference.
pub fn metric_for(sr: &SpatialReference) -> &'static dyn SegmentMetric {
    if sr.is_geographic() {
        &GEODESIC
    } else {
        &PLANAR
    }
}
