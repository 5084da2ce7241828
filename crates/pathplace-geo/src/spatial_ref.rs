//! Coordinate reference classification.

use pathplace_math::Point3;
use serde::{Deserialize, Serialize};

use crate::GeoError;

/// Well-known IDs of geographic (longitude/latitude) coordinate systems.
const GEOGRAPHIC_WKIDS: &[u32] = &[
    4326, // WGS 84
    4269, // NAD83
    4258, // ETRS89
    4283, // GDA94
    4490, // CGCS2000
    4617, // NAD83(CSRS)
    4674, // SIRGAS 2000
    7844, // GDA2020
];

/// The coordinate system a polyline's vertices are expressed in.
///
/// Serializes in the Esri JSON shape, `{"wkid": 3857}`, and is classified by
/// WKID on the way in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "EsriSpatialReference", into = "EsriSpatialReference")]
pub enum SpatialReference {
    /// Projected or local coordinates; x, y and z share one linear unit.
    Planar {
        /// Well-known ID, if the source carried one.
        wkid: Option<u32>,
    },
    /// Longitude (x) and latitude (y) in degrees, height (z) in metres.
    Geographic {
        /// Well-known ID.
        wkid: u32,
    },
}

impl SpatialReference {
    /// WGS 84 longitude/latitude.
    pub const WGS84: Self = Self::Geographic { wkid: 4326 };

    /// Web Mercator, the default projection of most web map views.
    pub const WEB_MERCATOR: Self = Self::Planar { wkid: Some(3857) };

    /// Classify a WKID. Unknown or missing IDs are treated as planar.
    pub fn from_wkid(wkid: Option<u32>) -> Self {
        match wkid {
            Some(id) if GEOGRAPHIC_WKIDS.contains(&id) => Self::Geographic { wkid: id },
            other => Self::Planar { wkid: other },
        }
    }

    /// The WKID, if known.
    pub fn wkid(&self) -> Option<u32> {
        match *self {
            Self::Planar { wkid } => wkid,
            Self::Geographic { wkid } => Some(wkid),
        }
    }

    /// True for longitude/latitude systems.
    pub fn is_geographic(&self) -> bool {
        matches!(self, Self::Geographic { .. })
    }

    /// Check that a vertex is usable in this reference.
    pub fn validate_point(&self, p: &Point3) -> Result<(), GeoError> {
        if !(p.x.is_finite() && p.y.is_finite() && p.z.is_finite()) {
            return Err(GeoError::NonFinite {
                x: p.x,
                y: p.y,
                z: p.z,
            });
        }
        if self.is_geographic() && !(-90.0..=90.0).contains(&p.y) {
            return Err(GeoError::LatitudeOutOfRange(p.y));
        }
        Ok(())
    }
}

impl Default for SpatialReference {
    fn default() -> Self {
        Self::Planar { wkid: None }
    }
}

/// Wire form of a spatial reference.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct EsriSpatialReference {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    wkid: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    latest_wkid: Option<u32>,
}

impl From<EsriSpatialReference> for SpatialReference {
    fn from(raw: EsriSpatialReference) -> Self {
        // 102100 is the legacy Esri ID for Web Mercator; prefer the modern one.
        Self::from_wkid(raw.latest_wkid.or(raw.wkid))
    }
}

impl From<SpatialReference> for EsriSpatialReference {
    fn from(sr: SpatialReference) -> Self {
        Self {
            wkid: sr.wkid(),
            latest_wkid: None,
        }
    }
}
