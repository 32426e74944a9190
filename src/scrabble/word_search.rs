use std::cmp::Ordering;
use std::collections::HashMap;

use log::debug;

use super::bag::Bag;
use super::dictionary::ScrabbleDictionary;
use super::letter_set::LetterSet;
use super::spelling::Spelling;
use super::tile::Tile;

/// Playing this many tiles at once earns the bonus
pub const BINGO_TILES: usize = 7;
pub const BINGO_BONUS: i32 = 50;

/// Point value of each tile. Tiles missing from the table are worth nothing
#[derive(Debug, Clone, Default)]
pub struct PointTable {
    points: HashMap<Tile, i32>,
}

impl PointTable {
    pub fn value(&self, tile: &str) -> i32 {
        self.points.get(tile).copied().unwrap_or(0)
    }

    /// Face value of the tiles plus the bingo bonus
    pub fn score(&self, spelling: &Spelling) -> i32 {
        let value: i32 = spelling.tiles().iter().map(|t| self.value(t.as_str())).sum();
        if spelling.len() >= BINGO_TILES {
            value + BINGO_BONUS
        } else {
            value
        }
    }
}

impl std::iter::FromIterator<(Tile, i32)> for PointTable {
    fn from_iter<T: IntoIterator<Item = (Tile, i32)>>(iter: T) -> Self {
        Self {
            points: iter.into_iter().collect(),
        }
    }
}

/// Tiles still needed: per tile `max(need - have, 0)`
pub fn missing_letters(have: &LetterSet, need: &LetterSet) -> LetterSet {
    need.difference(have)
}

pub fn is_anagram(a: &Spelling, b: &Spelling) -> bool {
    a.letters() == b.letters()
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScoredSpelling<'a> {
    pub spelling: &'a Spelling,
    pub score: i32,
}

/// A spelling that is a few tiles short of the holding
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate<'a> {
    pub spelling: &'a Spelling,
    pub missing: LetterSet,
    /// Chance of drawing the missing tiles, in `[0, 1]`
    pub probability: f64,
    /// Unclamped formula value the candidates are ranked by. Above 1 when the
    /// draws outnumber the missing tiles
    pub odds: f64,
    pub score: i32,
}

/// Queries over a built dictionary
pub struct WordSearch<'a> {
    dictionary: &'a ScrabbleDictionary,
    points: &'a PointTable,
}

impl<'a> WordSearch<'a> {
    pub fn new(dictionary: &'a ScrabbleDictionary, points: &'a PointTable) -> Self {
        Self { dictionary, points }
    }

    pub fn score(&self, spelling: &Spelling) -> i32 {
        self.points.score(spelling)
    }

    /// Every spelling, across all words, that can be laid from the holding alone.
    /// Best score first; equal scores in tile order
    pub fn find_valid_words(&self, holding: &LetterSet) -> Vec<ScoredSpelling<'a>> {
        let points = self.points;
        let mut valid: Vec<ScoredSpelling<'a>> = self
            .dictionary
            .spellings()
            .filter(|s| s.letters().is_subset(holding))
            .map(|s| ScoredSpelling {
                spelling: s,
                score: points.score(s),
            })
            .collect();
        valid.sort_by(|a, b| b.score.cmp(&a.score).then_with(|| a.spelling.cmp(b.spelling)));
        debug!("{} playable spellings for {}", valid.len(), holding);
        valid
    }

    /// Spellings of at least `min_length` tiles that the holding misses by at most
    /// `max_missing` tiles, most likely to complete first.
    ///
    /// The odds are those of the missing tiles turning up within `min_length`
    /// draws from `bag`, or within whatever is left in the bag if that is less.
    pub fn find_possible_words(
        &self,
        holding: &LetterSet,
        bag: &Bag,
        min_length: usize,
        max_missing: usize,
    ) -> Vec<Candidate<'a>> {
        let draws = min_length.min(bag.total_count());
        let points = self.points;
        let mut candidates: Vec<Candidate<'a>> = self
            .dictionary
            .spellings()
            .filter(|s| s.len() >= min_length)
            .filter_map(|s| {
                let missing = missing_letters(holding, s.letters());
                if missing.total() > max_missing {
                    return None;
                }
                let odds = bag.odds_of(&missing, draws).value();
                Some(Candidate {
                    spelling: s,
                    missing,
                    probability: odds.clamp(0.0, 1.0),
                    odds,
                    score: points.score(s),
                })
            })
            .collect();
        candidates.sort_by(compare_candidates);
        debug!(
            "{} candidates of {}+ tiles missing at most {}",
            candidates.len(),
            min_length,
            max_missing
        );
        candidates
    }

    /// Odds of drawing the word outright, summed over its spellings
    pub fn word_probability(&self, word: &str, bag: &Bag) -> f64 {
        bag.spellings_probability(self.dictionary.spellings_of(word))
    }

    /// The `n` words of `length` characters most likely to be drawn from the bag
    pub fn top_words(&self, bag: &Bag, length: usize, n: usize) -> Vec<(&'a str, f64)> {
        let mut ranked: Vec<(&'a str, f64)> = self
            .dictionary
            .entries()
            .iter()
            .filter(|e| e.word.chars().count() == length)
            .map(|e| (e.word.as_str(), bag.spellings_probability(&e.spellings)))
            .collect();
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        ranked.truncate(n);
        ranked
    }
}

fn compare_candidates(a: &Candidate, b: &Candidate) -> Ordering {
    b.odds
        .total_cmp(&a.odds)
        .then_with(|| a.missing.total().cmp(&b.missing.total()))
        .then_with(|| b.score.cmp(&a.score))
        .then_with(|| a.spelling.cmp(b.spelling))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(text: &str) -> LetterSet {
        text.split_whitespace().map(Tile::new).collect()
    }

    fn counts() -> Vec<(Tile, usize)> {
        vec![(Tile::new("a"), 5), (Tile::new("b"), 2), (Tile::new("c"), 1)]
    }

    fn points() -> PointTable {
        vec![(Tile::new("a"), 1), (Tile::new("b"), 3), (Tile::new("c"), 3)]
            .into_iter()
            .collect()
    }

    fn dictionary(words: &[&str]) -> ScrabbleDictionary {
        let bag = Bag::from_counts_seeded(&counts(), 0);
        ScrabbleDictionary::build(words, &bag).unwrap()
    }

    #[test]
    fn test_score_and_bingo() {
        let table = points();
        let short = Spelling::new(set("c a b").tiles());
        assert_eq!(table.score(&short), 7);

        let six = Spelling::new(set("a a a a a b").tiles());
        assert_eq!(table.score(&six), 8);
        let seven = Spelling::new(set("a a a a a b b").tiles());
        assert_eq!(table.score(&seven), 11 + BINGO_BONUS);

        // Unknown tiles count as zero
        assert_eq!(table.score(&Spelling::new(vec![Tile::new("x")])), 0);
    }

    #[test]
    fn test_find_valid_words() {
        let dict = dictionary(&["cab", "abba", "ab", "cc", "bad", "ba"]);
        let table = points();
        let search = WordSearch::new(&dict, &table);

        let found: Vec<(String, i32)> = search
            .find_valid_words(&set("a b c"))
            .iter()
            .map(|s| (s.spelling.to_string(), s.score))
            .collect();
        assert_eq!(
            found,
            vec![
                ("c a b".to_string(), 7),
                ("a b".to_string(), 4),
                ("b a".to_string(), 4)
            ]
        );
        assert!(search.find_valid_words(&LetterSet::empty()).is_empty());
    }

    #[test]
    fn test_subset_monotonicity() {
        let dict = dictionary(&["cab", "abba", "ab", "baa", "aaa", "ba", "bab"]);
        let table = points();
        let search = WordSearch::new(&dict, &table);
        let small = set("a b");
        let big = set("a a b b c");
        assert!(small.is_subset(&big));

        let from_big: Vec<&Spelling> = search.find_valid_words(&big).iter().map(|s| s.spelling).collect();
        for s in search.find_valid_words(&small) {
            assert!(from_big.contains(&s.spelling));
        }
    }

    #[test]
    fn test_find_possible_words() {
        let dict = dictionary(&["cab", "abba", "baa", "ab"]);
        let table = points();
        let search = WordSearch::new(&dict, &table);

        let holding = set("a b");
        let mut bag = Bag::from_counts_seeded(&counts(), 0);
        bag.remove_all(&holding).unwrap();

        let found = search.find_possible_words(&holding, &bag, 3, 2);
        let words: Vec<String> = found.iter().map(|c| c.spelling.to_string()).collect();
        assert_eq!(words, vec!["b a a", "a b b a", "c a b"]);

        // Drawing 3 from what is left, a:4 b:1 c:1
        assert_eq!(found[0].missing, set("a"));
        assert_eq!(found[0].probability, 1.0);
        assert!((found[0].odds - 40.0 / 20.0).abs() < 1e-12);
        assert!((found[1].probability - 16.0 / 20.0).abs() < 1e-12);
        assert!((found[2].probability - 10.0 / 20.0).abs() < 1e-12);

        let strict = search.find_possible_words(&holding, &bag, 3, 1);
        assert_eq!(strict.len(), 2);
        assert!(strict.iter().all(|c| c.missing.total() <= 1));
    }

    #[test]
    fn test_possible_words_ranked_by_unclamped_odds() {
        let counts = vec![(Tile::new("a"), 10), (Tile::new("e"), 8), (Tile::new("z"), 2)];
        let full = Bag::from_counts_seeded(&counts, 0);
        let dict = ScrabbleDictionary::build(&["zze", "zza"], &full).unwrap();
        let table: PointTable = vec![(Tile::new("a"), 1), (Tile::new("e"), 5), (Tile::new("z"), 10)]
            .into_iter()
            .collect();
        let search = WordSearch::new(&dict, &table);

        let holding = set("z z");
        let mut bag = full.clone();
        bag.remove_all(&holding).unwrap();

        // Both odds exceed 1 with three draws from a:10 e:8, yet "a" is likelier
        let found = search.find_possible_words(&holding, &bag, 3, 1);
        let words: Vec<String> = found.iter().map(|c| c.spelling.word()).collect();
        assert_eq!(words, vec!["zza", "zze"]);
        assert!(found.iter().all(|c| c.probability == 1.0));
        assert!((found[0].odds - 10.0 * 136.0 / 816.0).abs() < 1e-12);
        assert!((found[1].odds - 8.0 * 136.0 / 816.0).abs() < 1e-12);
        assert!(found[0].score < found[1].score);
    }

    #[test]
    fn test_possible_words_draws_limited_by_bag() {
        let dict = dictionary(&["cab"]);
        let table = points();
        let search = WordSearch::new(&dict, &table);
        let counts = vec![(Tile::new("c"), 1), (Tile::new("b"), 1)];
        let bag = Bag::from_counts_seeded(&counts, 0);

        // Only 2 tiles are left to draw
        let found = search.find_possible_words(&set("a"), &bag, 3, 2);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].probability, 1.0);
        assert_eq!(found[0].odds, 1.0);

        // Asking the bag for more draws than it holds directly is impossible
        let missing = &found[0].missing;
        assert_eq!(bag.probability_of(missing, 3), 0.0);
        assert_eq!(bag.probability_of(missing, 2), 1.0);
    }

    #[test]
    fn test_possible_words_on_empty_bag() {
        let dict = dictionary(&["cab", "baa"]);
        let table = points();
        let search = WordSearch::new(&dict, &table);
        let none: Vec<(Tile, usize)> = Vec::new();
        let bag = Bag::from_counts_seeded(&none, 0);

        // Nothing left to draw: complete words stay certain, near misses are lost
        let found = search.find_possible_words(&set("c a b"), &bag, 3, 2);
        let ranked: Vec<(String, f64)> = found
            .iter()
            .map(|c| (c.spelling.word(), c.probability))
            .collect();
        assert_eq!(ranked, vec![("cab".to_string(), 0.0), ("baa".to_string(), 0.0)]);
    }

    #[test]
    fn test_missing_letters() {
        let have = set("a b b");
        let need = set("a a b c");
        let missing = missing_letters(&have, &need);
        assert_eq!(missing, set("a c"));
        assert!(missing.iter().all(|(_, c)| c > 0));
        assert!(missing_letters(&need, &have).count("b") == 1);
        assert!(missing_letters(&set("a a b c d"), &need).is_empty());
        assert!(!missing_letters(&have, &need).is_empty());
    }

    #[test]
    fn test_top_words() {
        let dict = dictionary(&["cab", "baa", "aaa", "ab", "abba"]);
        let table = points();
        let search = WordSearch::new(&dict, &table);
        let bag = Bag::from_counts_seeded(&counts(), 0);

        let top = search.top_words(&bag, 3, 10);
        let words: Vec<&str> = top.iter().map(|t| t.0).collect();
        assert_eq!(words, vec!["baa", "aaa", "cab"]);
        assert!((top[0].1 - 20.0 / 56.0).abs() < 1e-12);
        assert_eq!(search.top_words(&bag, 3, 1).len(), 1);

        assert!((search.word_probability("cab", &bag) - 10.0 / 56.0).abs() < 1e-12);
        assert_eq!(search.word_probability("zzz", &bag), 0.0);
    }

    #[test]
    fn test_is_anagram() {
        let a = Spelling::new(set("a b c").tiles());
        let b = Spelling::new(vec![Tile::new("c"), Tile::new("a"), Tile::new("b")]);
        let c = Spelling::new(set("a b").tiles());
        assert!(is_anagram(&a, &b));
        assert!(!is_anagram(&a, &c));
    }
}
