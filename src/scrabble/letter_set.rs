use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::tile::{Tile, TileAlphabet};
use crate::error::{Result, ScrabbleError};

/// Multiset of tiles. Used for bag contents, player holdings and the tile
/// composition of a spelling.
#[derive(Clone, PartialEq, Eq, Default, Hash, Serialize, Deserialize)]
pub struct LetterSet {
    // zero counts are never stored, so two equal multisets compare equal
    counts: BTreeMap<Tile, usize>,
}

impl LetterSet {
    pub fn empty() -> Self {
        Self {
            counts: BTreeMap::new(),
        }
    }

    /// Parses space separated tiles such as "a s sz e". Every tile must belong to the alphabet
    pub fn parse(text: &str, alphabet: &TileAlphabet) -> Result<Self> {
        let mut tmp = Self::empty();
        for block in text.split_whitespace() {
            let block = block.to_lowercase();
            match alphabet.get(&block) {
                Some(tile) => tmp.insert(tile.clone()),
                None => return Err(ScrabbleError::UnknownTile(block)),
            }
        }
        Ok(tmp)
    }

    pub fn count(&self, tile: &str) -> usize {
        self.counts.get(tile).copied().unwrap_or(0)
    }

    pub fn contains(&self, tile: &str) -> bool {
        self.counts.contains_key(tile)
    }

    pub fn insert(&mut self, tile: Tile) {
        self.insert_n(tile, 1);
    }

    pub fn insert_n(&mut self, tile: Tile, n: usize) {
        if n > 0 {
            *self.counts.entry(tile).or_insert(0) += n;
        }
    }

    /// Removes `n` copies of the tile. Leaves the set untouched and returns false
    /// when fewer than `n` copies are present
    pub fn remove_n(&mut self, tile: &str, n: usize) -> bool {
        let have = self.count(tile);
        if have < n {
            return false;
        }
        if have == n {
            self.counts.remove(tile);
        } else if let Some(c) = self.counts.get_mut(tile) {
            *c -= n;
        }
        true
    }

    /// Total number of tiles, counting duplicates
    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    /// Number of distinct tiles
    pub fn distinct(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Multiset inclusion: every tile appears here at most as often as in `other`
    pub fn is_subset(&self, other: &LetterSet) -> bool {
        self.counts.iter().all(|(t, &c)| other.count(t.as_str()) >= c)
    }

    /// Tiles of `self` not covered by `have`, per tile `max(self[t] - have[t], 0)`
    pub fn difference(&self, have: &LetterSet) -> LetterSet {
        let counts = self
            .counts
            .iter()
            .filter_map(|(t, &c)| {
                let missing = c.saturating_sub(have.count(t.as_str()));
                (missing > 0).then(|| (t.clone(), missing))
            })
            .collect();
        LetterSet { counts }
    }

    /// Multiset sum
    pub fn union(&self, other: &LetterSet) -> LetterSet {
        let mut tmp = self.clone();
        for (t, &c) in other.counts.iter() {
            tmp.insert_n(t.clone(), c);
        }
        tmp
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Tile, usize)> {
        self.counts.iter().map(|(t, &c)| (t, c))
    }

    /// Every tile repeated by its count, in tile order
    pub fn tiles(&self) -> Vec<Tile> {
        self.counts
            .iter()
            .flat_map(|(t, &c)| std::iter::repeat(t.clone()).take(c))
            .collect()
    }
}

impl std::iter::FromIterator<Tile> for LetterSet {
    fn from_iter<T>(iter: T) -> Self
    where
        T: IntoIterator<Item = Tile>,
    {
        let mut tmp = Self::default();
        iter.into_iter().for_each(|t| tmp.insert(t));
        tmp
    }
}

impl<'a> std::iter::FromIterator<&'a Tile> for LetterSet {
    fn from_iter<T>(iter: T) -> Self
    where
        T: IntoIterator<Item = &'a Tile>,
    {
        iter.into_iter().cloned().collect()
    }
}

impl fmt::Debug for LetterSet {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{{")?;
        for (i, (t, c)) in self.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}: {}", t, c)?;
        }
        write!(f, "}}")
    }
}

impl fmt::Display for LetterSet {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let tiles = self.tiles();
        for (i, t) in tiles.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{}", t)?;
        }
        Ok(())
    }
}
