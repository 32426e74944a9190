use super::letter_set::LetterSet;
use super::spelling::Spelling;
use super::tile::Tile;
use crate::error::{Result, ScrabbleError};

/// Tiles held by one player together with the points they have banked
#[derive(Debug, Clone, Default)]
pub struct Rack {
    tiles: LetterSet,
    pub score: i32,
}

impl Rack {
    pub fn new(tiles: LetterSet) -> Self {
        Self { tiles, score: 0 }
    }

    pub fn empty() -> Self {
        Self::new(LetterSet::empty())
    }

    pub fn tiles(&self) -> &LetterSet {
        &self.tiles
    }

    pub fn len(&self) -> usize {
        self.tiles.total()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Adds a freshly drawn tile
    pub fn add_inplace(&mut self, tile: Tile) {
        self.tiles.insert(tile);
    }

    /// Whether every tile of the spelling is on the rack
    pub fn can_play(&self, spelling: &Spelling) -> bool {
        spelling.letters().is_subset(&self.tiles)
    }

    /// Consumes the spelling's tiles and banks `points`. The rack is left as it was
    /// if any tile is missing
    pub fn play(&mut self, spelling: &Spelling, points: i32) -> Result<()> {
        let missing = spelling.letters().difference(&self.tiles);
        if let Some((t, _)) = missing.iter().next() {
            return Err(ScrabbleError::InsufficientTiles {
                tile: Some(t.clone()),
                requested: spelling.letters().count(t.as_str()),
                available: self.tiles.count(t.as_str()),
            });
        }
        for (t, c) in spelling.letters().iter() {
            self.tiles.remove_n(t.as_str(), c);
        }
        self.score += points;
        Ok(())
    }
}

impl std::iter::FromIterator<Tile> for Rack {
    fn from_iter<T: IntoIterator<Item = Tile>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
