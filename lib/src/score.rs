use crate::point::{self, GeoPoint};
use log::debug;

/// Points for a guess within [`CLOSE_KM`] of the answer.
pub const MAX_GEO_SCORE: u32 = 2;

/// Upper bound, inclusive, of the full points band.
pub const CLOSE_KM: f64 = 500.0;

/// Upper bound, inclusive, of the half points band.
pub const REGION_KM: f64 = 2000.0;

/// Map a distance in kilometers to 2, 1 or 0 points.
///
/// Negative distances land in the closest band. NaN fails every comparison
/// and scores 0.
pub fn score_for_distance(distance_km: f64) -> u32 {
    if distance_km <= CLOSE_KM {
        MAX_GEO_SCORE
    } else if distance_km <= REGION_KM {
        1
    } else {
        0
    }
}

/// Distance from `guess` to `actual` together with the points it earns.
pub fn score_guess(guess: GeoPoint, actual: GeoPoint) -> (f64, u32) {
    let distance = point::distance(guess, actual);
    let score = score_for_distance(distance);
    debug!("Guess {} is {:.1} km from {}, {} points", guess, distance, actual, score);
    (distance, score)
}
