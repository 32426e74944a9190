//! Error type shared by the bag, the table loaders and the dictionary cache.
//!
//! Playability problems are not errors: a block that is not a tile is simply
//! not a spelling, a word with no spelling is absent from the dictionary, and
//! an impossible draw has probability zero. What remains here are requests the
//! bag cannot honour and input that cannot be read.

use std::io;

use crate::scrabble::tile::Tile;

pub type Result<T> = std::result::Result<T, ScrabbleError>;

#[derive(Debug, thiserror::Error)]
pub enum ScrabbleError {
    #[error("insufficient tiles: requested {requested} {label}, only {available} left", label = tile_label(.tile))]
    InsufficientTiles {
        /// `None` when the request was for any tile (a draw)
        tile: Option<Tile>,
        requested: usize,
        available: usize,
    },

    #[error("unknown tile \"{0}\"")]
    UnknownTile(String),

    #[error("malformed table entry at line {line}: \"{content}\"")]
    MalformedTable { line: usize, content: String },

    #[error("corrupt dictionary cache at line {line}: {reason}")]
    CorruptCache { line: usize, reason: String },

    #[error("i/o error: {0}")]
    Io(#[from] io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("binary cache error: {0}")]
    Bincode(#[from] bincode::Error),

    #[error("word set error: {0}")]
    Fst(#[from] fst::Error),

    #[error("could not persist file: {0}")]
    Persist(#[from] tempfile::PersistError),
}

fn tile_label(tile: &Option<Tile>) -> String {
    match tile {
        Some(t) => format!("of \"{}\"", t),
        None => "tiles".to_string(),
    }
}

impl ScrabbleError {
    /// True for errors that mean a stored file should be regenerated rather than reported
    pub fn is_recoverable_cache_failure(&self) -> bool {
        matches!(
            self,
            ScrabbleError::Io(_)
                | ScrabbleError::CorruptCache { .. }
                | ScrabbleError::Bincode(_)
                | ScrabbleError::UnknownTile(_)
        )
    }
}
