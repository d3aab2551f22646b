use anyhow::{Context, Result};

use crate::map;
use crate::point::GeoPoint;
use std::path;
use svg::node::element::{Circle, Group, Line, Path, Rectangle};
use svg::Document;

const WIDTH: f64 = 360.0;
const HEIGHT: f64 = 180.0;

const OCEAN: &str = "#1a4d6e";
const LAND: &str = "#2d5a3d";
const COAST: &str = "#3d7a4d";
const GUESS: &str = "#ffd700";
const ACTUAL: &str = "#22c55e";

// Rough outlines in map units: North and South America, Europe, Africa, Asia,
// Australia.
const CONTINENTS: [&str; 6] = [
    "M20,20 L80,15 L120,25 L130,50 L120,70 L100,75 L80,90 L60,85 L40,70 L25,50 Z",
    "M70,95 L90,90 L100,100 L95,130 L80,150 L65,145 L55,120 L60,100 Z",
    "M160,25 L180,20 L200,25 L195,45 L175,50 L160,40 Z",
    "M160,55 L190,50 L210,60 L205,100 L185,120 L165,115 L155,90 L160,70 Z",
    "M200,15 L280,10 L320,30 L310,60 L280,70 L250,65 L220,55 L200,40 Z",
    "M280,100 L310,95 L320,110 L310,130 L285,125 L275,110 Z",
];

const ANTARCTICA: &str = "M100,165 L260,165 L250,175 L110,175 Z";

/// Map coordinates of `point` in the 360x180 view box.
fn project(point: GeoPoint) -> (f64, f64) {
    let (x, y) = map::to_percent(point);
    (x / 100.0 * WIDTH, y / 100.0 * HEIGHT)
}

fn draw_land(document: Document) -> Document {
    let mut land = Group::new()
        .set("fill", LAND)
        .set("stroke", COAST)
        .set("stroke-width", 0.5);

    for outline in CONTINENTS.iter() {
        land = land.add(Path::new().set("d", *outline));
    }

    land = land.add(Path::new().set("d", ANTARCTICA).set("opacity", 0.5));

    document.add(land)
}

fn draw_grid(document: Document) -> Document {
    let mut grid = Group::new()
        .set("stroke", "rgba(255,255,255,0.1)")
        .set("stroke-width", 0.3)
        .set("fill", "none");

    for y in [45.0, 90.0, 135.0].iter() {
        grid = grid.add(
            Line::new()
                .set("x1", 0)
                .set("y1", *y)
                .set("x2", WIDTH)
                .set("y2", *y),
        );
    }

    for x in [90.0, 180.0, 270.0].iter() {
        grid = grid.add(
            Line::new()
                .set("x1", *x)
                .set("y1", 0)
                .set("x2", *x)
                .set("y2", HEIGHT),
        );
    }

    document.add(grid)
}

fn draw_marker(document: Document, point: GeoPoint, color: &str) -> Document {
    let (x, y) = project(point);

    document.add(
        Circle::new()
            .set("fill", color)
            .set("stroke", "white")
            .set("stroke-width", 0.8)
            .set("cx", x)
            .set("cy", y)
            .set("r", 2.5),
    )
}

/// Build the world map with the optional guess and true location.
///
/// A dashed line joins the two when both are present.
pub fn map_document(guess: Option<GeoPoint>, actual: Option<GeoPoint>) -> Document {
    let mut document = Document::new()
        .set("viewBox", (0, 0, WIDTH, HEIGHT))
        .add(
            Rectangle::new()
                .set("width", WIDTH)
                .set("height", HEIGHT)
                .set("fill", OCEAN),
        );

    document = draw_land(document);
    document = draw_grid(document);

    if let (Some(guess), Some(actual)) = (guess, actual) {
        let (x1, y1) = project(guess);
        let (x2, y2) = project(actual);

        document = document.add(
            Line::new()
                .set("x1", x1)
                .set("y1", y1)
                .set("x2", x2)
                .set("y2", y2)
                .set("stroke", "white")
                .set("stroke-width", 1.0)
                .set("stroke-dasharray", "5,5"),
        );
    }

    if let Some(actual) = actual {
        document = draw_marker(document, actual, ACTUAL);
    }

    if let Some(guess) = guess {
        document = draw_marker(document, guess, GUESS);
    }

    document
}

pub fn write_map(
    filename: &path::Path,
    guess: Option<GeoPoint>,
    actual: Option<GeoPoint>,
) -> Result<()> {
    let document = map_document(guess, actual);

    svg::save(filename, &document)
        .with_context(|| format!("Could not write map to {}", filename.display()))?;

    Ok(())
}
