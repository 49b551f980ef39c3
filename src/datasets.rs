//! Loading labeled sample points from CSV files.
use crate::history::{Point, PointClass};
use anyhow::{anyhow, Result};
use csv::ReaderBuilder;
use std::fs::File;

/// Load labeled points from a CSV file with `x,y,class` columns.
///
/// The class column accepts `A` or `B` in any casing.
pub fn load_points(filename: &str) -> Result<Vec<(Point, PointClass)>> {
    let file = File::open(filename).map_err(|e| anyhow!("Failed to open {}: {}", filename, e))?;
    let mut rdr = ReaderBuilder::new().has_headers(true).from_reader(file);
    let mut points = Vec::new();
    for result in rdr.records() {
        let record = result.map_err(|e| anyhow!("CSV parse error: {}", e))?;
        if record.len() != 3 {
            continue;
        }
        let x: f64 = record[0].trim().parse().unwrap_or(0.0);
        let y: f64 = record[1].trim().parse().unwrap_or(0.0);
        let label = record[2].trim().trim_matches('"').to_lowercase();
        let class = match label.as_str() {
            "a" => PointClass::A,
            "b" => PointClass::B,
            _ => return Err(anyhow!("Unknown class label: {}", label)),
        };
        points.push((Point::new(x, y), class));
    }
    if points.is_empty() {
        return Err(anyhow!("No points loaded from {}", filename));
    }
    Ok(points)
}
