//! Equirectangular projection for a 2:1 world map with the origin in the
//! top-left corner.

use crate::point::GeoPoint;

/// Convert a position on the map, given as fractions of its width and
/// height, into a location.
pub fn from_fraction(x: f64, y: f64) -> GeoPoint {
    GeoPoint::new((0.5 - y) * 180.0, (x - 0.5) * 360.0)
}

/// Position of `point` on the map as percentages of width and height.
pub fn to_percent(point: GeoPoint) -> (f64, f64) {
    let x = (point.lng + 180.0) / 360.0 * 100.0;
    let y = (90.0 - point.lat) / 180.0 * 100.0;
    (x, y)
}
