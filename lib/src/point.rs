use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Mean Earth radius in kilometers.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// A location on Earth, latitude and longitude in degrees.
#[derive(Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

impl GeoPoint {
    pub fn new(lat: f64, lng: f64) -> Self {
        GeoPoint { lat, lng }
    }

    /// Great-circle distance to `other` in kilometers.
    pub fn distance(&self, other: &Self) -> f64 {
        distance(*self, *other)
    }
}

/// Great-circle distance between `a` and `b` in kilometers, using the
/// haversine formula on a sphere of radius [`EARTH_RADIUS_KM`].
///
/// Coordinates are not range checked. The haversine term is clamped to
/// `[0, 1]` so rounding noise near identical or antipodal points can never
/// produce NaN.
pub fn distance(a: GeoPoint, b: GeoPoint) -> f64 {
    let d_lat = (b.lat - a.lat).to_radians();
    let d_lng = (b.lng - a.lng).to_radians();

    let h = (d_lat / 2.0).sin().powi(2)
        + a.lat.to_radians().cos() * b.lat.to_radians().cos() * (d_lng / 2.0).sin().powi(2);
    let h = h.clamp(0.0, 1.0);

    2.0 * EARTH_RADIUS_KM * h.sqrt().atan2((1.0 - h).sqrt())
}

impl fmt::Debug for GeoPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeoPoint")
            .field("lat", &self.lat)
            .field("lng", &self.lng)
            .finish()
    }
}

impl fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.4},{:.4}", self.lat, self.lng)
    }
}

/// Parses `lat,lng`, e.g. `51.5034,-0.1276`.
impl FromStr for GeoPoint {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let (lat, lng) = s
            .split_once(',')
            .ok_or_else(|| anyhow!("expected `lat,lng`, got `{}`", s))?;

        let lat = lat
            .trim()
            .parse()
            .with_context(|| format!("invalid latitude `{}`", lat))?;
        let lng = lng
            .trim()
            .parse()
            .with_context(|| format!("invalid longitude `{}`", lng))?;

        Ok(GeoPoint::new(lat, lng))
    }
}
