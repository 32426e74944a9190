//! Readers for the ruleset files: tile counts, tile points and the raw word list.
//!
//! Tables are either plain text, one `tile value` pair per line (blank lines
//! and `#` comments ignored), or a `.json` array of `[tile, value]` pairs.
//! Tiles are lower-cased on the way in so they line up with dictionary words.

use std::fs::{self, File};
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::str::FromStr;

use log::info;
use serde::de::DeserializeOwned;

use super::tile::Tile;
use super::word_search::PointTable;
use crate::error::{Result, ScrabbleError};

pub fn parse_table<T: FromStr>(text: &str) -> Result<Vec<(Tile, T)>> {
    let mut table = Vec::new();
    for (i, line) in text.lines().enumerate() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let malformed = || ScrabbleError::MalformedTable {
            line: i + 1,
            content: line.to_string(),
        };
        let mut parts = trimmed.split_whitespace();
        let (tile, value) = match (parts.next(), parts.next(), parts.next()) {
            (Some(tile), Some(value), None) => (tile, value),
            _ => return Err(malformed()),
        };
        let value = value.parse::<T>().map_err(|_| malformed())?;
        table.push((Tile::new(&tile.to_lowercase()), value));
    }
    Ok(table)
}

fn read_table<T, P>(path: P) -> Result<Vec<(Tile, T)>>
where
    T: FromStr + DeserializeOwned,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let data = fs::read_to_string(path)?;
    if path.extension().map_or(false, |ext| ext == "json") {
        let raw: Vec<(String, T)> = serde_json::from_str(&data)?;
        Ok(raw
            .into_iter()
            .map(|(t, v)| (Tile::new(&t.to_lowercase()), v))
            .collect())
    } else {
        parse_table(&data)
    }
}

/// Tile counts of a full bag, zero entries included
pub fn read_tile_counts<P: AsRef<Path>>(path: P) -> Result<Vec<(Tile, usize)>> {
    let counts = read_table(path)?;
    info!("Loaded {} tile counts", counts.len());
    Ok(counts)
}

pub fn read_tile_points<P: AsRef<Path>>(path: P) -> Result<PointTable> {
    let points: Vec<(Tile, i32)> = read_table(path)?;
    Ok(points.into_iter().collect())
}

/// Raw words, one per line, as they appear in the file
pub fn read_word_list<P: AsRef<Path>>(path: P) -> Result<Vec<String>> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let mut words = Vec::new();
    for line in reader.lines() {
        let line = line?;
        let word = line.trim();
        if !word.is_empty() {
            words.push(word.to_string());
        }
    }
    info!("Read {} words", words.len());
    Ok(words)
}
