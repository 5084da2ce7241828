//! Open 3D paths.

use pathplace_geo::SpatialReference;
use pathplace_math::Point3;
use serde::{Deserialize, Serialize};

use crate::error::{PlacementError, Result};

/// An open polyline (non-closed path) in a stated spatial reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Polyline {
    /// Vertices in path order.
    pub points: Vec<Point3>,
    /// Coordinate system of the vertices.
    #[serde(default)]
    pub spatial_reference: SpatialReference,
}

/// One straight piece of a polyline, between consecutive vertices.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    /// Position of the segment in the path, starting at 0.
    pub index: usize,
    /// First vertex.
    pub start: Point3,
    /// Second vertex.
    pub end: Point3,
}

impl Polyline {
    /// Create a planar polyline.
    pub fn new(points: Vec<Point3>) -> Self {
        Self {
            points,
            spatial_reference: SpatialReference::default(),
        }
    }

    /// Create a polyline in the given spatial reference.
    pub fn with_reference(points: Vec<Point3>, spatial_reference: SpatialReference) -> Self {
        Self {
            points,
            spatial_reference,
        }
    }

    /// Number of segments.
    pub fn segment_count(&self) -> usize {
        self.points.len().saturating_sub(1)
    }

    /// Segments in path order.
    pub fn segments(&self) -> impl Iterator<Item = Segment> + '_ {
        self.points
            .windows(2)
            .enumerate()
            .map(|(index, w)| Segment {
                index,
                start: w[0],
                end: w[1],
            })
    }

    /// Check the polyline can be placed along: at least two vertices, all
    /// of them valid in the spatial reference.
    pub fn validate(&self) -> Result<()> {
        if self.points.len() < 2 {
            return Err(PlacementError::InvalidInput(format!(
                "polyline needs at least 2 points, got {}",
                self.points.len()
            )));
        }
        for (i, p) in self.points.iter().enumerate() {
            self.spatial_reference
                .validate_point(p)
                .map_err(|e| PlacementError::InvalidInput(format!("vertex {i}: {e}")))?;
        }
        Ok(())
    }
}
