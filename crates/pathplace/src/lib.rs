#![warn(missing_docs)]

//! Place repeated 3D objects along drawn polylines.
//!
//! Given a polyline and an item footprint, the placer walks every segment and
//! emits a position and heading for each item (wall panel, barrier, fence
//! post) that fits. Distances are planar or geodesic depending on the
//! polyline's spatial reference.
//!
//! # Example
//!
//! ```
//! use pathplace::{place, PlacementConfig, Point3, Polyline};
//!
//! let line = Polyline::new(vec![
//!     Point3::new(0.0, 0.0, 0.0),
//!     Point3::new(10.0, 0.0, 0.0),
//! ]);
//!
//! // 1.24 wide with a 0.2 gap, stopping one unit short of the end
//! let placements = place(&line, &PlacementConfig::new(1.24, 0.2)).unwrap();
//! assert_eq!(placements.len(), 7);
//! assert_eq!(placements[0].heading_degrees, 0.0);
//! ```

pub mod config;
pub mod error;
pub mod esri;
pub mod placer;
pub mod polyline;
pub mod scene;

pub use config::{DegeneratePolicy, PlacementConfig};
pub use error::{PlacementError, Result};
pub use esri::EsriPolyline;
pub use placer::{place, PlacementReport, PlacementSpec, SegmentPlacer, SegmentReport};
pub use polyline::{Polyline, Segment};
pub use scene::{
    populate, CollectingSink, DrawingSource, MeshInstance, SceneSink, VecDrawingSource,
};

pub use pathplace_geo::{
    metric_for, GeodesicMetric, PlanarMetric, SegmentMetric, SpatialReference,
};
pub use pathplace_math::Point3;
