use std::borrow::Borrow;
use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

/// A single drawable unit from the bag. Usually one character, but a ruleset may
/// define digraphs such as "sz" or "ny" that are drawn and played as one tile.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Tile(String);

impl Tile {
    pub fn new(text: &str) -> Self {
        Self(text.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Number of base characters covered by the tile
    pub fn char_len(&self) -> usize {
        self.0.chars().count()
    }
}

impl Borrow<str> for Tile {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Tile {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

impl From<String> for Tile {
    fn from(text: String) -> Self {
        Self(text)
    }
}

impl fmt::Display for Tile {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Set of tiles that can appear in a spelling. Only tiles that can actually be
/// drawn belong here, so zero-count entries of a tile table are left out.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TileAlphabet {
    tiles: BTreeSet<Tile>,
    /// Longest tile in characters, bounds the block size during enumeration
    max_len: usize,
}

impl TileAlphabet {
    pub fn from_counts<'a, I>(counts: I) -> Self
    where
        I: IntoIterator<Item = (&'a Tile, usize)>,
    {
        let tiles: BTreeSet<Tile> = counts
            .into_iter()
            .filter(|(tile, count)| *count > 0 && !tile.as_str().is_empty())
            .map(|(tile, _)| tile.clone())
            .collect();
        let max_len = tiles.iter().map(Tile::char_len).max().unwrap_or(0);
        Self { tiles, max_len }
    }

    pub fn is_valid_tile(&self, tile: &str) -> bool {
        self.tiles.contains(tile)
    }

    /// Returns the alphabet's own copy of the tile, if there is one
    pub fn get(&self, tile: &str) -> Option<&Tile> {
        self.tiles.get(tile)
    }

    pub fn max_tile_len(&self) -> usize {
        self.max_len
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Tile> {
        self.tiles.iter()
    }
}
