//! File input and output helpers for layout data.

use std::fs::File;
use std::io::{self, BufRead, BufReader, Read, Write};

use crate::geometry::Coordinate;

pub mod geojson;
pub mod project;

/// Reads a file to string.
pub fn read_to_string(path: &str) -> io::Result<String> {
    let mut buffer = String::new();
    File::open(path)?.read_to_string(&mut buffer)?;
    Ok(buffer)
}

/// Writes `contents` to `path`, replacing any existing file.
pub fn write_string(path: &str, contents: &str) -> io::Result<()> {
    let mut file = File::create(path)?;
    file.write_all(contents.as_bytes())
}

/// Reads all lines of a text file.
pub fn read_lines(path: &str) -> io::Result<Vec<String>> {
    let file = File::open(path)?;
    BufReader::new(file).lines().collect()
}

/// Reads a CSV file of `lat,lng` pairs, skipping blank lines.
pub fn read_coordinates_csv(path: &str) -> io::Result<Vec<Coordinate>> {
    let lines = read_lines(path)?;
    let mut coords = Vec::new();
    for (idx, line) in lines.iter().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let parts: Vec<&str> = line.split(',').collect();
        if parts.len() != 2 {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!("line {}: expected lat,lng", idx + 1),
            ));
        }
        let lat: f64 = parts[0].trim().parse().map_err(|e| {
            io::Error::new(
                io::ErrorKind::InvalidData,
                format!("line {}: {}", idx + 1, e),
            )
        })?;
        let lng: f64 = parts[1].trim().parse().map_err(|e| {
            io::Error::new(
                io::ErrorKind::InvalidData,
                format!("line {}: {}", idx + 1, e),
            )
        })?;
        coords.push(Coordinate::new(lat, lng));
    }
    Ok(coords)
}
