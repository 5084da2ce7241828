//! Ellipsoidal distances for longitude/latitude coordinates.

use pathplace_math::{Dir3, Point3};

use crate::metric::SegmentMetric;

/// WGS84 semi-major axis (meters).
pub const WGS84_A: f64 = 6_378_137.0;
/// WGS84 flattening.
pub const WGS84_F: f64 = 1.0 / 298.257_223_563;
/// WGS84 semi-minor axis (meters).
pub const WGS84_B: f64 = WGS84_A * (1.0 - WGS84_F);

/// Mean earth radius (meters), used by the spherical fallback.
const MEAN_RADIUS: f64 = (2.0 * WGS84_A + WGS84_B) / 3.0;

const VINCENTY_MAX_ITERATIONS: usize = 200;
const VINCENTY_CONVERGENCE: f64 = 1e-12;

/// Geodesic distance in metres between two lon/lat points on the WGS84
/// ellipsoid, by Vincenty's inverse formula.
///
/// Arguments are in degrees. Returns `None` when the iteration does not
/// converge, which happens for nearly antipodal points.
pub fn vincenty_distance(lon1: f64, lat1: f64, lon2: f64, lat2: f64) -> Option<f64> {
    let f = WGS84_F;
    let l = (lon2 - lon1).to_radians();
    let u1 = ((1.0 - f) * lat1.to_radians().tan()).atan();
    let u2 = ((1.0 - f) * lat2.to_radians().tan()).atan();
    let (sin_u1, cos_u1) = u1.sin_cos();
    let (sin_u2, cos_u2) = u2.sin_cos();

    let mut lambda = l;
    for _ in 0..VINCENTY_MAX_ITERATIONS {
        let (sin_lambda, cos_lambda) = lambda.sin_cos();
        let cross = cos_u1 * sin_u2 - sin_u1 * cos_u2 * cos_lambda;
        let sin_sigma = ((cos_u2 * sin_lambda).powi(2) + cross * cross).sqrt();
        if sin_sigma == 0.0 {
            return Some(0.0);
        }
        let cos_sigma = sin_u1 * sin_u2 + cos_u1 * cos_u2 * cos_lambda;
        let sigma = sin_sigma.atan2(cos_sigma);
        let sin_alpha = cos_u1 * cos_u2 * sin_lambda / sin_sigma;
        let cos_sq_alpha = 1.0 - sin_alpha * sin_alpha;
        // Equatorial lines have cos²α = 0.
        let cos_2sigma_m = if cos_sq_alpha != 0.0 {
            cos_sigma - 2.0 * sin_u1 * sin_u2 / cos_sq_alpha
        } else {
            0.0
        };
        let c = f / 16.0 * cos_sq_alpha * (4.0 + f * (4.0 - 3.0 * cos_sq_alpha));
        let previous = lambda;
        lambda = l
            + (1.0 - c)
                * f
                * sin_alpha
                * (sigma
                    + c * sin_sigma
                        * (cos_2sigma_m + c * cos_sigma * (-1.0 + 2.0 * cos_2sigma_m.powi(2))));

        if (lambda - previous).abs() < VINCENTY_CONVERGENCE {
            let u_sq = cos_sq_alpha * (WGS84_A * WGS84_A - WGS84_B * WGS84_B) / (WGS84_B * WGS84_B);
            let big_a =
                1.0 + u_sq / 16384.0 * (4096.0 + u_sq * (-768.0 + u_sq * (320.0 - 175.0 * u_sq)));
            let big_b = u_sq / 1024.0 * (256.0 + u_sq * (-128.0 + u_sq * (74.0 - 47.0 * u_sq)));
            let delta_sigma = big_b
                * sin_sigma
                * (cos_2sigma_m
                    + big_b / 4.0
                        * (cos_sigma * (-1.0 + 2.0 * cos_2sigma_m.powi(2))
                            - big_b / 6.0
                                * cos_2sigma_m
                                * (-3.0 + 4.0 * sin_sigma.powi(2))
                                * (-3.0 + 4.0 * cos_2sigma_m.powi(2))));
            return Some(WGS84_B * big_a * (sigma - delta_sigma));
        }
    }
    None
}

/// Great-circle (haversine) distance in metres on a sphere of mean earth
/// radius. Arguments are in degrees.
pub fn great_circle_distance(lon1: f64, lat1: f64, lon2: f64, lat2: f64) -> f64 {
    let (phi1, phi2) = (lat1.to_radians(), lat2.to_radians());
    let d_phi = phi2 - phi1;
    let d_lambda = (lon2 - lon1).to_radians();
    let h = (d_phi / 2.0).sin().powi(2) + phi1.cos() * phi2.cos() * (d_lambda / 2.0).sin().powi(2);
    2.0 * MEAN_RADIUS * h.sqrt().min(1.0).asin()
}

/// Longitude difference `to - from` folded into `[-180, 180]`.
fn longitude_delta(from: f64, to: f64) -> f64 {
    let d = (to - from).rem_euclid(360.0);
    if d > 180.0 { d - 360.0 } else { d }
}

/// Wrap a longitude into `(-180, 180]`.
fn wrap_longitude(lon: f64) -> f64 {
    let wrapped = (lon + 180.0).rem_euclid(360.0) - 180.0;
    if wrapped == -180.0 { 180.0 } else { wrapped }
}

/// Distance over the WGS84 ellipsoid for lon/lat/height coordinates.
///
/// The surface distance is combined with the height difference as
/// `sqrt(s² + dz²)`. Positions along a segment are interpolated linearly in
/// lon/lat/height by the travelled fraction of that distance, taking the
/// short way across the antimeridian.
#[derive(Debug, Clone, Copy, Default)]
pub struct GeodesicMetric;

impl GeodesicMetric {
    /// Surface distance in metres, ignoring height.
    pub fn surface_distance(&self, a: &Point3, b: &Point3) -> f64 {
        let (lon2, lat2) = (a.x + longitude_delta(a.x, b.x), b.y);
        vincenty_distance(a.x, a.y, lon2, lat2).unwrap_or_else(|| {
            tracing::debug!(
                from = ?(a.x, a.y),
                to = ?(b.x, b.y),
                "vincenty did not converge, using great-circle distance"
            );
            great_circle_distance(a.x, a.y, lon2, lat2)
        })
    }
}

impl SegmentMetric for GeodesicMetric {
    fn name(&self) -> &'static str {
        "geodesic"
    }

    fn distance(&self, a: &Point3, b: &Point3) -> f64 {
        let s = self.surface_distance(a, b);
        let dz = b.z - a.z;
        (s * s + dz * dz).sqrt()
    }

    fn horizontal_delta(&self, a: &Point3, b: &Point3) -> (f64, f64) {
        (longitude_delta(a.x, b.x), b.y - a.y)
    }

    fn advance(
        &self,
        a: &Point3,
        b: &Point3,
        _direction: &Dir3,
        step: f64,
        distance: f64,
    ) -> Point3 {
        if distance <= 0.0 {
            return *a;
        }
        let t = step / distance;
        Point3::new(
            wrap_longitude(a.x + longitude_delta(a.x, b.x) * t),
            a.y + (b.y - a.y) * t,
            a.z + (b.z - a.z) * t,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_one_degree_on_equator() {
        let d = vincenty_distance(0.0, 0.0, 1.0, 0.0).unwrap();
        assert_relative_eq!(d, 111_319.490_793, epsilon = 1e-3);
    }

    #[test]
    fn test_one_degree_of_latitude() {
        // Meridian arc from 0° to 1° N on WGS84.
        let d = vincenty_distance(0.0, 0.0, 0.0, 1.0).unwrap();
        assert_relative_eq!(d, 110_574.389, epsilon = 0.01);
    }

    #[test]
    fn test_coincident_points() {
        assert_eq!(vincenty_distance(46.6, 24.7, 46.6, 24.7), Some(0.0));
        assert_eq!(great_circle_distance(46.6, 24.7, 46.6, 24.7), 0.0);
    }

    #[test]
    fn test_great_circle_close_to_vincenty() {
        // Riyadh, across town: the two agree to well under one percent.
        let (lon1, lat1, lon2, lat2) = (46.684_44, 24.689_73, 46.649_01, 24.689_26);
        let ellipsoidal = vincenty_distance(lon1, lat1, lon2, lat2).unwrap();
        let spherical = great_circle_distance(lon1, lat1, lon2, lat2);
        assert!((ellipsoidal - spherical).abs() / ellipsoidal < 0.01);
        assert!(ellipsoidal > 3_500.0 && ellipsoidal < 3_700.0);
    }

    #[test]
    fn test_antipodal_falls_back() {
        let metric = GeodesicMetric;
        let d = metric.surface_distance(&Point3::new(0.0, 0.0, 0.0), &Point3::new(180.0, 0.0, 0.0));
        assert!(d.is_finite());
        assert!(d > 19_900_000.0 && d < 20_100_000.0);
    }

    #[test]
    fn test_distance_includes_height() {
        let metric = GeodesicMetric;
        let a = Point3::new(10.0, 10.0, 0.0);
        let b = Point3::new(10.0, 10.0, 25.0);
        assert_relative_eq!(metric.distance(&a, &b), 25.0, epsilon = 1e-9);
    }

    #[test]
    fn test_advance_interpolates_fraction() {
        let metric = GeodesicMetric;
        let a = Point3::new(0.0, 0.0, 100.0);
        let b = Point3::new(1.0, 0.0, 200.0);
        let dist = metric.distance(&a, &b);
        let dir = Dir3::new_normalize(b - a);
        let mid = metric.advance(&a, &b, &dir, dist / 2.0, dist);
        assert_relative_eq!(mid.x, 0.5, epsilon = 1e-12);
        assert_relative_eq!(mid.y, 0.0, epsilon = 1e-12);
        assert_relative_eq!(mid.z, 150.0, epsilon = 1e-9);
    }

    #[test]
    fn test_advance_crosses_antimeridian() {
        let metric = GeodesicMetric;
        let a = Point3::new(179.5, 0.0, 0.0);
        let b = Point3::new(-179.5, 0.0, 0.0);
        let dist = metric.distance(&a, &b);
        // one degree, not 359
        assert!(dist < 112_000.0);
        let dir = Dir3::new_normalize(b - a);
        let p = metric.advance(&a, &b, &dir, dist * 0.75, dist);
        assert_relative_eq!(p.x, -179.75, epsilon = 1e-9);
    }

    #[test]
    fn test_horizontal_delta_takes_short_way() {
        let metric = GeodesicMetric;
        let (dx, dy) = metric.horizontal_delta(
            &Point3::new(179.9995, 0.0, 0.0),
            &Point3::new(-179.9995, 0.5, 0.0),
        );
        assert_relative_eq!(dx, 0.001, epsilon = 1e-9);
        assert_relative_eq!(dy, 0.5);
    }

    #[test]
    fn test_same_place_across_antimeridian_is_zero() {
        let metric = GeodesicMetric;
        let d = metric.distance(&Point3::new(180.0, 10.0, 0.0), &Point3::new(-180.0, 10.0, 0.0));
        assert_eq!(d, 0.0);
    }

    #[test]
    fn test_wrap_longitude() {
        assert_relative_eq!(wrap_longitude(190.0), -170.0);
        assert_relative_eq!(wrap_longitude(-180.0), 180.0);
        assert_relative_eq!(wrap_longitude(45.0), 45.0);
    }
}
