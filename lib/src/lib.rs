//! Scoring for a family trivia quiz with a map guessing round.
//!
//! The core is [`point::distance`], the great-circle distance between two
//! locations, and [`score::score_for_distance`], which turns that distance
//! into 2, 1 or 0 points. The remaining modules hold the quiz data, a
//! team's answer sheet and the quizmaster's navigation.

pub mod map;
pub mod point;
pub mod presenter;
pub mod quiz;
#[cfg(feature = "svg")]
pub mod render;
pub mod score;
pub mod sheet;

pub use point::{distance, GeoPoint};
pub use score::score_for_distance;
