use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::letter_set::LetterSet;
use super::rack::Rack;
use super::tile::{Tile, TileAlphabet};
use crate::error::{Result, ScrabbleError};

/// Tiles that have not been drawn yet.
///
/// The bag has exactly one owner (the running game). Draws and removals take
/// `&mut self`, while probability queries only borrow it, so a ranking pass
/// always sees one consistent state.
#[derive(Debug, Clone)]
pub struct Bag {
    /// Remaining count of each tile
    tiles: LetterSet,
    rng: StdRng,
}

impl Bag {
    /// Bag with an entropy seeded generator
    pub fn new(tiles: LetterSet) -> Bag {
        Bag {
            tiles,
            rng: StdRng::from_entropy(),
        }
    }

    /// Bag whose draws are reproducible for a given seed
    pub fn with_seed(tiles: LetterSet, seed: u64) -> Bag {
        Bag {
            tiles,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn from_counts<'a, I>(counts: I) -> Bag
    where
        I: IntoIterator<Item = &'a (Tile, usize)>,
    {
        Bag::new(Self::collect_counts(counts))
    }

    pub fn from_counts_seeded<'a, I>(counts: I, seed: u64) -> Bag
    where
        I: IntoIterator<Item = &'a (Tile, usize)>,
    {
        Bag::with_seed(Self::collect_counts(counts), seed)
    }

    fn collect_counts<'a, I>(counts: I) -> LetterSet
    where
        I: IntoIterator<Item = &'a (Tile, usize)>,
    {
        let mut tiles = LetterSet::empty();
        for (t, c) in counts {
            tiles.insert_n(t.clone(), *c);
        }
        tiles
    }

    /// Tiles that can still be drawn
    pub fn alphabet(&self) -> TileAlphabet {
        TileAlphabet::from_counts(self.tiles.iter())
    }

    pub fn tiles(&self) -> &LetterSet {
        &self.tiles
    }

    pub fn count(&self, tile: &str) -> usize {
        self.tiles.count(tile)
    }

    pub fn total_count(&self) -> usize {
        self.tiles.total()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Whether the target could be drawn at all, i.e. it is a subset of the bag
    pub fn contains(&self, target: &LetterSet) -> bool {
        target.is_subset(&self.tiles)
    }

    /// Draws a single tile. Every physical tile is equally likely, so tiles with
    /// a higher remaining count come up more often
    pub fn draw_tile(&mut self) -> Result<Tile> {
        let total = self.total_count();
        if total == 0 {
            return Err(ScrabbleError::InsufficientTiles {
                tile: None,
                requested: 1,
                available: 0,
            });
        }
        let mut pick = self.rng.gen_range(0..total);
        let mut chosen = None;
        for (t, c) in self.tiles.iter() {
            if pick < c {
                chosen = Some(t.clone());
                break;
            }
            pick -= c;
        }
        // pick < total, so the walk always lands on a tile
        let tile = chosen.ok_or(ScrabbleError::InsufficientTiles {
            tile: None,
            requested: 1,
            available: total,
        })?;
        self.tiles.remove_n(tile.as_str(), 1);
        Ok(tile)
    }

    /// Draws `n` tiles without replacement. Fails without touching the bag when
    /// fewer than `n` tiles remain
    pub fn draw(&mut self, n: usize) -> Result<LetterSet> {
        let available = self.total_count();
        if n > available {
            return Err(ScrabbleError::InsufficientTiles {
                tile: None,
                requested: n,
                available,
            });
        }
        let mut drawn = LetterSet::empty();
        for _ in 0..n {
            drawn.insert(self.draw_tile()?);
        }
        Ok(drawn)
    }

    /// Draws up to `n` tiles into the rack, stopping early when the bag runs out.
    /// Returns the drawn tiles
    pub fn deal(&mut self, rack: &mut Rack, n: usize) -> Result<LetterSet> {
        let drawn = self.draw(n.min(self.total_count()))?;
        for (t, c) in drawn.iter() {
            for _ in 0..c {
                rack.add_inplace(t.clone());
            }
        }
        Ok(drawn)
    }

    pub fn remove(&mut self, tile: &str) -> Result<Tile> {
        self.remove_n(tile, 1)
    }

    /// Takes out `n` copies of a known tile, e.g. tiles a player already holds
    pub fn remove_n(&mut self, tile: &str, n: usize) -> Result<Tile> {
        let available = self.count(tile);
        if !self.tiles.remove_n(tile, n) {
            return Err(ScrabbleError::InsufficientTiles {
                tile: Some(Tile::new(tile)),
                requested: n,
                available,
            });
        }
        Ok(Tile::new(tile))
    }

    /// Removes a whole multiset, or nothing if any tile is short
    pub fn remove_all(&mut self, tiles: &LetterSet) -> Result<()> {
        if let Some((t, c)) = tiles.iter().find(|(t, c)| self.count(t.as_str()) < *c) {
            return Err(ScrabbleError::InsufficientTiles {
                tile: Some(t.clone()),
                requested: c,
                available: self.count(t.as_str()),
            });
        }
        for (t, c) in tiles.iter() {
            self.tiles.remove_n(t.as_str(), c);
        }
        Ok(())
    }
}
