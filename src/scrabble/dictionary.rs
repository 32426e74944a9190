use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufReader, Write};
use std::path::Path;

use fst::Set;
use log::{debug, info, warn};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use super::bag::Bag;
use super::spelling::{spellings, Spelling};
use super::tile::{Tile, TileAlphabet};
use crate::error::{Result, ScrabbleError};
use crate::utils::serialization;

/// Spellings longer than a board row can never be played
pub const MAX_SPELLING_TILES: usize = 15;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DictionaryEntry {
    pub word: String,
    /// Sorted, without duplicates, never empty
    pub spellings: Vec<Spelling>,
}

/// Lower-cases a raw word list entry. Entries that are empty or contain anything
/// other than letters are rejected
pub fn normalize_word(raw: &str) -> Option<String> {
    let word = raw.trim().to_lowercase();
    if word.is_empty() || !word.chars().all(char::is_alphabetic) {
        None
    } else {
        Some(word)
    }
}

pub struct ScrabbleDictionary {
    /// Sorted by word
    entries: Vec<DictionaryEntry>,
    /// Every word that has at least one spelling
    words: Set<Vec<u8>>,
}

impl ScrabbleDictionary {
    /// Enumerates the spellings of every word against the tiles of `bag`.
    ///
    /// Everything is enumerated up front since the dictionary is hammered with
    /// queries later. A spelling is kept only if the full bag could supply it and it
    /// fits on the board; words left without any spelling are dropped.
    pub fn build<S: AsRef<str>>(raw_words: &[S], bag: &Bag) -> Result<Self> {
        let alphabet = bag.alphabet();
        let words: BTreeSet<String> = raw_words
            .iter()
            .filter_map(|w| normalize_word(w.as_ref()))
            .collect();
        let words: Vec<String> = words.into_iter().collect();

        let entries: Vec<DictionaryEntry> = words
            .par_iter()
            .filter_map(|word| {
                let mut kept: Vec<Spelling> = spellings(word, &alphabet)
                    .into_iter()
                    .filter(|s| s.len() <= MAX_SPELLING_TILES && bag.contains(s.letters()))
                    .collect();
                if kept.is_empty() {
                    return None;
                }
                kept.sort_unstable();
                kept.dedup();
                Some(DictionaryEntry {
                    word: word.clone(),
                    spellings: kept,
                })
            })
            .collect();

        debug!(
            "{} of {} words have no spelling with the current tiles",
            words.len() - entries.len(),
            words.len()
        );
        let dict = Self::from_entries(entries)?;
        info!(
            "Built dictionary: {} words, {} spellings",
            dict.len(),
            dict.spelling_count()
        );
        Ok(dict)
    }

    /// Groups loose spellings back into entries keyed by the word they write
    pub fn from_spellings<I: IntoIterator<Item = Spelling>>(spellings: I) -> Result<Self> {
        let mut grouped: BTreeMap<String, BTreeSet<Spelling>> = BTreeMap::new();
        for s in spellings.into_iter().filter(|s| !s.is_empty()) {
            grouped.entry(s.word()).or_default().insert(s);
        }
        let entries = grouped
            .into_iter()
            .map(|(word, spellings)| DictionaryEntry {
                word,
                spellings: spellings.into_iter().collect(),
            })
            .collect();
        Self::from_entries(entries)
    }

    fn from_entries(entries: Vec<DictionaryEntry>) -> Result<Self> {
        let words = Set::from_iter(entries.iter().map(|e| e.word.as_bytes()))?;
        Ok(Self { entries, words })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn spelling_count(&self) -> usize {
        self.entries.iter().map(|e| e.spellings.len()).sum()
    }

    pub fn entries(&self) -> &[DictionaryEntry] {
        &self.entries
    }

    pub fn contains_word(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    pub fn get(&self, word: &str) -> Option<&DictionaryEntry> {
        self.entries
            .binary_search_by(|e| e.word.as_str().cmp(word))
            .ok()
            .map(|i| &self.entries[i])
    }

    /// Spellings of a word; empty for words that are unknown or unplayable
    pub fn spellings_of(&self, word: &str) -> &[Spelling] {
        self.get(word).map(|e| e.spellings.as_slice()).unwrap_or(&[])
    }

    /// Every spelling of every word, grouped by word
    pub fn spellings(&self) -> impl Iterator<Item = &Spelling> {
        self.entries.iter().flat_map(|e| e.spellings.iter())
    }

    /// Whether the bag still holds the tiles for at least one spelling of the word
    pub fn is_word_in_bag(&self, word: &str, bag: &Bag) -> bool {
        self.spellings_of(word).iter().any(|s| bag.contains(s.letters()))
    }

    /// Writes every spelling to the cache. A `.bin` path gets a bincode encoding,
    /// anything else one spelling per line with tiles separated by spaces
    pub fn save_cache<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        if is_binary_cache(path) {
            let all: Vec<&Spelling> = self.spellings().collect();
            serialization::save_to_disk(&all, path)?;
        } else {
            serialization::write_atomic(path, |writer| {
                for s in self.spellings() {
                    writeln!(writer, "{}", s)?;
                }
                Ok(())
            })?;
        }
        info!("Saved {} spellings to {}", self.spelling_count(), path.display());
        Ok(())
    }

    /// Loads a cache written by [`save_cache`](Self::save_cache). Every tile must
    /// be part of `alphabet`, otherwise the cache belongs to another tile set and
    /// is reported as corrupt
    pub fn load_cache<P: AsRef<Path>>(path: P, alphabet: &TileAlphabet) -> Result<Self> {
        let path = path.as_ref();
        let spellings: Vec<Spelling> = if is_binary_cache(path) {
            serialization::load_from_disk(path)?
        } else {
            read_text_cache(path)?
        };
        if spellings.is_empty() {
            return Err(ScrabbleError::CorruptCache {
                line: 0,
                reason: "no spellings".to_string(),
            });
        }
        for (i, s) in spellings.iter().enumerate() {
            if let Some(t) = s.tiles().iter().find(|t| !alphabet.is_valid_tile(t.as_str())) {
                return Err(ScrabbleError::CorruptCache {
                    line: i + 1,
                    reason: format!("unknown tile \"{}\"", t),
                });
            }
        }
        let dict = Self::from_spellings(spellings)?;
        info!("Loaded {} words from {}", dict.len(), path.display());
        Ok(dict)
    }

    /// Loads the cache, or rebuilds the dictionary from the raw word list when the
    /// cache is missing or unreadable and stores the result for next time
    pub fn load_or_build<P, F>(cache_path: P, bag: &Bag, raw_words: F) -> Result<Self>
    where
        P: AsRef<Path>,
        F: FnOnce() -> Result<Vec<String>>,
    {
        let cache_path = cache_path.as_ref();
        match Self::load_cache(cache_path, &bag.alphabet()) {
            Ok(dict) => return Ok(dict),
            Err(e) if e.is_recoverable_cache_failure() => {
                warn!(
                    "Dictionary cache {} unusable ({}), rebuilding",
                    cache_path.display(),
                    e
                );
            }
            Err(e) => return Err(e),
        }
        let words = raw_words()?;
        let dict = Self::build(&words, bag)?;
        if let Err(e) = dict.save_cache(cache_path) {
            warn!("Could not store dictionary cache: {}", e);
        }
        Ok(dict)
    }
}

fn is_binary_cache(path: &Path) -> bool {
    path.extension().map_or(false, |ext| ext == "bin")
}

fn read_text_cache(path: &Path) -> Result<Vec<Spelling>> {
    let reader = BufReader::new(File::open(path)?);
    let mut spellings = Vec::new();
    for line in reader.lines() {
        let line = line?;
        let tiles: Vec<Tile> = line.split_whitespace().map(Tile::new).collect();
        if !tiles.is_empty() {
            spellings.push(Spelling::new(tiles));
        }
    }
    Ok(spellings)
}

impl PartialEq for ScrabbleDictionary {
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}

impl fmt::Debug for ScrabbleDictionary {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("ScrabbleDictionary")
            .field("words", &self.entries.len())
            .field("spellings", &self.spelling_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hungarian_bag() -> Bag {
        let counts: Vec<(Tile, usize)> = [
            ("a", 6),
            ("e", 6),
            ("k", 2),
            ("s", 2),
            ("z", 1),
            ("sz", 2),
            ("r", 2),
            ("ny", 1),
            ("c", 1),
            ("cs", 1),
            ("q", 0),
        ]
        .iter()
        .map(|&(t, c)| (Tile::new(t), c))
        .collect();
        Bag::from_counts_seeded(&counts, 0)
    }

    fn vocab() -> Vec<String> {
        ["Szesz", "kar", "nyers", "csak", "ÁRA", "qua", "sza-sza", "", "kar", "aeaeaeaeaeaekkrr"]
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    #[test]
    fn test_build() {
        let bag = hungarian_bag();
        let dict = ScrabbleDictionary::build(&vocab(), &bag).unwrap();

        // no q or á tiles, sza-sza is not a word, and the last one fits the bag but
        // not the board
        let words: Vec<&str> = dict.entries().iter().map(|e| e.word.as_str()).collect();
        assert_eq!(words, vec!["csak", "kar", "nyers", "szesz"]);
        assert!(dict.contains_word("kar"));
        assert!(!dict.contains_word("qua"));

        let szesz: Vec<String> = dict.spellings_of("szesz").iter().map(|s| s.to_string()).collect();
        // s z e s z needs more z tiles than the bag holds
        assert_eq!(szesz, vec!["s z e sz", "sz e s z", "sz e sz"]);

        let csak: Vec<String> = dict.spellings_of("csak").iter().map(|s| s.to_string()).collect();
        assert_eq!(csak, vec!["c s a k", "cs a k"]);
        assert!(dict.spellings_of("qua").is_empty());
    }

    #[test]
    fn test_round_trip_invariant() {
        let dict = ScrabbleDictionary::build(&vocab(), &hungarian_bag()).unwrap();
        for entry in dict.entries() {
            assert!(!entry.spellings.is_empty());
            for s in entry.spellings.iter() {
                assert_eq!(s.word(), entry.word);
            }
        }
    }

    #[test]
    fn test_build_is_idempotent() {
        let bag = hungarian_bag();
        let mut shuffled = vocab();
        shuffled.reverse();
        let first = ScrabbleDictionary::build(&vocab(), &bag).unwrap();
        let second = ScrabbleDictionary::build(&shuffled, &bag).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_word_in_bag() {
        let mut bag = hungarian_bag();
        let dict = ScrabbleDictionary::build(&vocab(), &bag).unwrap();
        assert!(dict.is_word_in_bag("nyers", &bag));
        bag.remove("ny").unwrap();
        assert!(!dict.is_word_in_bag("nyers", &bag));
        assert!(!dict.is_word_in_bag("unknown", &bag));
    }

    #[test]
    fn test_text_cache_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dictionary.txt");
        let bag = hungarian_bag();
        let dict = ScrabbleDictionary::build(&vocab(), &bag).unwrap();
        dict.save_cache(&path).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.lines().any(|l| l == "cs a k"));

        let loaded = ScrabbleDictionary::load_cache(&path, &bag.alphabet()).unwrap();
        assert_eq!(loaded, dict);
    }

    #[test]
    fn test_binary_cache_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dictionary.bin");
        let bag = hungarian_bag();
        let dict = ScrabbleDictionary::build(&vocab(), &bag).unwrap();
        dict.save_cache(&path).unwrap();
        let loaded = ScrabbleDictionary::load_cache(&path, &bag.alphabet()).unwrap();
        assert_eq!(loaded, dict);
    }

    #[test]
    fn test_cache_with_foreign_tiles_is_corrupt() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dictionary.txt");
        std::fs::write(&path, "k a r\nq u a\n").unwrap();
        let err = ScrabbleDictionary::load_cache(&path, &hungarian_bag().alphabet()).unwrap_err();
        assert!(matches!(err, ScrabbleError::CorruptCache { line: 2, .. }));
    }

    #[test]
    fn test_load_or_build_falls_back_and_persists() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dictionary.txt");
        let bag = hungarian_bag();

        // Missing cache: rebuilt from the word list and written out
        let built = ScrabbleDictionary::load_or_build(&path, &bag, || Ok(vocab())).unwrap();
        assert!(path.exists());

        // Second time round the word list must not be needed
        let cached = ScrabbleDictionary::load_or_build(&path, &bag, || {
            panic!("word list read although the cache is valid")
        })
        .unwrap();
        assert_eq!(cached, built);

        // Garbage in the cache is replaced by the same dictionary
        std::fs::write(&path, "x y z\n").unwrap();
        let rebuilt = ScrabbleDictionary::load_or_build(&path, &bag, || Ok(vocab())).unwrap();
        assert_eq!(rebuilt, built);
    }

    #[test]
    fn test_normalize_word() {
        assert_eq!(normalize_word("  Kenyér\n"), Some("kenyér".to_string()));
        assert_eq!(normalize_word("don't"), None);
        assert_eq!(normalize_word("   "), None);
    }
}
