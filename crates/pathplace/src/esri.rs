//! Esri JSON polyline geometry.
//!
//! Sketch tools in web map views hand back polylines in this shape:
//!
//! ```json
//! { "paths": [[[x, y, z], [x, y, z]]], "spatialReference": { "wkid": 3857 } }
//! ```

use pathplace_geo::SpatialReference;
use pathplace_math::Point3;
use serde::{Deserialize, Serialize};

use crate::error::{PlacementError, Result};
use crate::polyline::Polyline;

/// A polyline geometry as serialized by Esri web APIs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EsriPolyline {
    /// One vertex list per path; vertices are `[x, y]`, `[x, y, z]`,
    /// `[x, y, m]` or `[x, y, z, m]`.
    pub paths: Vec<Vec<Vec<f64>>>,
    /// Coordinate system of all paths.
    #[serde(default)]
    pub spatial_reference: SpatialReference,
    /// Vertices carry a z value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_z: Option<bool>,
    /// Vertices carry a measure value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_m: Option<bool>,
}

impl EsriPolyline {
    /// Parse from a JSON string.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialize to a JSON string.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Every path as a [`Polyline`].
    pub fn polylines(&self) -> Result<Vec<Polyline>> {
        if self.paths.is_empty() {
            return Err(PlacementError::InvalidInput("geometry has no paths".into()));
        }
        self.paths
            .iter()
            .enumerate()
            .map(|(i, path)| self.path_to_polyline(i, path))
            .collect()
    }

    /// The first path only, which is what a single sketch stroke produces.
    pub fn first_polyline(&self) -> Result<Polyline> {
        let path = self
            .paths
            .first()
            .ok_or_else(|| PlacementError::InvalidInput("geometry has no paths".into()))?;
        self.path_to_polyline(0, path)
    }

    fn path_to_polyline(&self, index: usize, path: &[Vec<f64>]) -> Result<Polyline> {
        if path.len() < 2 {
            return Err(PlacementError::InvalidInput(format!(
                "path {index} has {} vertices, need at least 2",
                path.len()
            )));
        }
        let mut points = Vec::with_capacity(path.len());
        for (v, coords) in path.iter().enumerate() {
            let point = self.vertex(coords).ok_or_else(|| {
                PlacementError::InvalidInput(format!(
                    "path {index} vertex {v} has {} coordinates",
                    coords.len()
                ))
            })?;
            points.push(point);
        }
        Ok(Polyline::with_reference(points, self.spatial_reference))
    }

    fn vertex(&self, coords: &[f64]) -> Option<Point3> {
        // A three-value vertex is [x, y, m] when only measures are flagged.
        let measures_only = self.has_m == Some(true) && self.has_z != Some(true);
        match coords {
            &[x, y] => Some(Point3::new(x, y, 0.0)),
            &[x, y, _] if measures_only => Some(Point3::new(x, y, 0.0)),
            &[x, y, z] | &[x, y, z, _] => Some(Point3::new(x, y, z)),
            _ => None,
        }
    }
}

impl From<&Polyline> for EsriPolyline {
    fn from(polyline: &Polyline) -> Self {
        Self {
            paths: vec![polyline.points.iter().map(|p| vec![p.x, p.y, p.z]).collect()],
            spatial_reference: polyline.spatial_reference,
            has_z: Some(true),
            has_m: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_sketch_output() {
        let json = r#"{
            "hasZ": true,
            "paths": [[
                [5196962.1, 2838430.4, 612.0],
                [5197002.9, 2838455.0, 613.5],
                [5197050.0, 2838455.0, 614.0]
            ]],
            "spatialReference": { "wkid": 102100, "latestWkid": 3857 }
        }"#;
        let geom = EsriPolyline::from_json(json).unwrap();
        let line = geom.first_polyline().unwrap();
        assert_eq!(line.points.len(), 3);
        assert_eq!(line.spatial_reference, SpatialReference::WEB_MERCATOR);
        assert_eq!(line.points[1], Point3::new(5197002.9, 2838455.0, 613.5));
    }

    #[test]
    fn test_missing_z_defaults_to_zero() {
        let geom = EsriPolyline::from_json(r#"{"paths": [[[0, 0], [10, 0]]]}"#).unwrap();
        let line = geom.first_polyline().unwrap();
        assert_eq!(line.points[1], Point3::new(10.0, 0.0, 0.0));
        assert_eq!(line.spatial_reference, SpatialReference::default());
    }

    #[test]
    fn test_measures_are_dropped() {
        let json = r#"{"hasM": true, "paths": [[[0, 0, 7], [1, 1, 8]]]}"#;
        let line = EsriPolyline::from_json(json).unwrap().first_polyline().unwrap();
        assert_eq!(line.points[0].z, 0.0);

        let json = r#"{"hasZ": true, "hasM": true, "paths": [[[0, 0, 3, 7], [1, 1, 4, 8]]]}"#;
        let line = EsriPolyline::from_json(json).unwrap().first_polyline().unwrap();
        assert_eq!(line.points[1].z, 4.0);
    }

    #[test]
    fn test_rejects_empty_and_short_paths() {
        let empty = EsriPolyline::from_json(r#"{"paths": []}"#).unwrap();
        assert!(matches!(
            empty.first_polyline(),
            Err(PlacementError::InvalidInput(_))
        ));
        assert!(empty.polylines().is_err());

        let short = EsriPolyline::from_json(r#"{"paths": [[[1, 2, 3]]]}"#).unwrap();
        assert!(short.first_polyline().is_err());

        let bad_vertex = EsriPolyline::from_json(r#"{"paths": [[[1], [2, 3]]]}"#).unwrap();
        assert!(bad_vertex.first_polyline().is_err());
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(
            EsriPolyline::from_json("{\"paths\": 3}"),
            Err(PlacementError::Format(_))
        ));
    }

    #[test]
    fn test_multiple_paths() {
        let json = r#"{
            "paths": [[[0, 0], [1, 0]], [[5, 5], [5, 9], [2, 9]]],
            "spatialReference": {"wkid": 4326}
        }"#;
        let lines = EsriPolyline::from_json(json).unwrap().polylines().unwrap();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1].segment_count(), 2);
        assert!(lines[1].spatial_reference.is_geographic());
    }

    #[test]
    fn test_from_polyline() {
        let line = Polyline::new(vec![Point3::new(0.0, 0.0, 1.0), Point3::new(2.0, 0.0, 1.0)]);
        let geom = EsriPolyline::from(&line);
        let back = EsriPolyline::from_json(&geom.to_json().unwrap())
            .unwrap()
            .first_polyline()
            .unwrap();
        assert_eq!(back, line);
    }
}
