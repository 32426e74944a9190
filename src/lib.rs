//! Word finding and draw odds for letter-tile games whose bags may contain
//! multi-character tiles.
//!
//! A word is stored as its spellings, the ways of cutting it into tiles the
//! bag actually contains. Playability is multiset inclusion of a spelling in a
//! holding, and near misses are ranked by the hypergeometric odds of drawing
//! the tiles still missing.

pub mod error;
pub mod logging;
pub mod scrabble;
pub mod utils;

pub use error::{Result, ScrabbleError};
pub use scrabble::bag::Bag;
pub use scrabble::dictionary::{DictionaryEntry, ScrabbleDictionary};
pub use scrabble::letter_set::LetterSet;
pub use scrabble::probability::Odds;
pub use scrabble::rack::Rack;
pub use scrabble::spelling::{spellings, Spelling};
pub use scrabble::tile::{Tile, TileAlphabet};
pub use scrabble::word_search::{missing_letters, Candidate, PointTable, ScoredSpelling, WordSearch};
