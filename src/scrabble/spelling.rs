use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::letter_set::LetterSet;
use super::tile::{Tile, TileAlphabet};

/// One way of writing a word with tiles. The tiles concatenate back to the word.
///
/// Tile order matters for validity (it is what makes the concatenation hold)
/// but not for playability, which only looks at the multiset in `letters`.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "Vec<Tile>", into = "Vec<Tile>")]
pub struct Spelling {
    tiles: Vec<Tile>,
    letters: LetterSet,
}

impl Spelling {
    pub fn new(tiles: Vec<Tile>) -> Self {
        let letters = tiles.iter().collect();
        Self { tiles, letters }
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    /// Tile multiset of the spelling
    pub fn letters(&self) -> &LetterSet {
        &self.letters
    }

    /// Number of tiles, which is what the bingo rule and length filters count
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// The word this spelling writes
    pub fn word(&self) -> String {
        self.tiles.iter().map(Tile::as_str).collect()
    }
}

impl From<Vec<Tile>> for Spelling {
    fn from(tiles: Vec<Tile>) -> Self {
        Self::new(tiles)
    }
}

impl From<Spelling> for Vec<Tile> {
    fn from(spelling: Spelling) -> Self {
        spelling.tiles
    }
}

impl Ord for Spelling {
    fn cmp(&self, other: &Self) -> Ordering {
        self.tiles.cmp(&other.tiles)
    }
}

impl PartialOrd for Spelling {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Debug for Spelling {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:?}", self.tiles.iter().map(Tile::as_str).collect::<Vec<_>>())
    }
}

impl fmt::Display for Spelling {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for (i, t) in self.tiles.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{}", t)?;
        }
        Ok(())
    }
}

/// All the ways of cutting `word` into consecutive blocks that are each a tile.
///
/// Conceptually this walks the 2^(n-1) partitions of the word's characters and
/// keeps the ones made only of tiles. The walk is depth first and abandons a
/// prefix as soon as a block is not a tile, and blocks never exceed the
/// longest tile. An empty word, or one containing a character no tile covers,
/// has no spellings.
pub fn spellings(word: &str, alphabet: &TileAlphabet) -> Vec<Spelling> {
    let mut result = Vec::new();
    if word.is_empty() {
        return result;
    }
    // Byte offset of every character boundary, so blocks are cut on characters
    let bounds: Vec<usize> = word
        .char_indices()
        .map(|(i, _)| i)
        .chain(std::iter::once(word.len()))
        .collect();
    let mut current = Vec::with_capacity(bounds.len());
    extend_spellings(word, &bounds, 0, alphabet, &mut current, &mut result);
    result
}

fn extend_spellings(
    word: &str,
    bounds: &[usize],
    start: usize,
    alphabet: &TileAlphabet,
    current: &mut Vec<Tile>,
    result: &mut Vec<Spelling>,
) {
    let last = bounds.len() - 1;
    if start == last {
        result.push(Spelling::new(current.clone()));
        return;
    }
    let furthest = last.min(start + alphabet.max_tile_len());
    for end in (start + 1)..=furthest {
        let block = &word[bounds[start]..bounds[end]];
        if let Some(tile) = alphabet.get(block) {
            current.push(tile.clone());
            extend_spellings(word, bounds, end, alphabet, current, result);
            current.pop();
        }
    }
}
