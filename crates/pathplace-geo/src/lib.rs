#![warn(missing_docs)]

//! Spatial references and distance metrics for pathplace.
//!
//! Placement along a segment needs two things from the coordinate system:
//! how long the segment is, and where a point at a given distance along it
//! lies. Both depend on whether coordinates are planar (projected metres) or
//! geographic (longitude/latitude degrees), so they sit behind the
//! [`SegmentMetric`] trait.
//!
//! # Example
//!
//! ```
//! use pathplace_geo::{metric_for, SpatialReference};
//! use pathplace_math::Point3;
//!
//! let wgs84 = SpatialReference::from_wkid(Some(4326));
//! let metric = metric_for(&wgs84);
//! let d = metric.distance(&Point3::new(0.0, 0.0, 0.0), &Point3::new(1.0, 0.0, 0.0));
//! assert!((d - 111_319.49).abs() < 0.01);
//! ```

mod geodesic;
mod metric;
mod spatial_ref;

pub use geodesic::{
    great_circle_distance, vincenty_distance, GeodesicMetric, WGS84_A, WGS84_B, WGS84_F,
};
pub use metric::{metric_for, PlanarMetric, SegmentMetric};
pub use spatial_ref::SpatialReference;

use thiserror::Error;

/// Errors raised when coordinates do not fit their spatial reference.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeoError {
    /// A coordinate component is NaN or infinite.
    #[error("non-finite coordinate ({x}, {y}, {z})")]
    NonFinite {
        /// X (or longitude).
        x: f64,
        /// Y (or latitude).
        y: f64,
        /// Z (height).
        z: f64,
    },

    /// A latitude lies outside [-90, 90] degrees.
    #[error("latitude {0} is outside [-90, 90]")]
    LatitudeOutOfRange(f64),
}
