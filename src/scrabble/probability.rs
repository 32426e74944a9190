//! Hypergeometric odds of drawing a set of tiles from the bag.
//!
//! For a bag holding `c_i` copies of tile `i` (`C` tiles in total) and a
//! target needing `m_i` copies (`M` in total), the odds of a draw of `D` tiles
//! are
//!
//! ```text
//! prod(choose(c_i, m_i)) * choose(C - M, D - M) / choose(C, D)
//! ```
//!
//! The numerator counts ways of picking the required tiles and then filling
//! the rest of the draw with anything. When `D > M` a draw holding surplus
//! copies of a required tile is counted once per way of choosing which copies
//! were "required", so the raw ratio can exceed 1. [`Odds`] keeps that raw
//! value, and [`Bag::probability_of`] reports it clamped into `[0, 1]`.
//!
//! Coefficients are computed exactly in `u128` and only divided at the end.
//! Bags large enough to overflow fall back to summing logarithms in `f64`.

use super::bag::Bag;
use super::letter_set::LetterSet;
use super::spelling::Spelling;

/// Raw ratio of favourable to possible draws
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Odds {
    Exact { favourable: u128, possible: u128 },
    /// Used once a coefficient no longer fits in `u128`
    Approximate(f64),
}

impl Odds {
    pub const IMPOSSIBLE: Odds = Odds::Exact {
        favourable: 0,
        possible: 1,
    };

    pub fn value(&self) -> f64 {
        match *self {
            Odds::Exact {
                favourable,
                possible,
            } => {
                if possible == 0 {
                    0.0
                } else {
                    favourable as f64 / possible as f64
                }
            }
            Odds::Approximate(p) => p,
        }
    }

    pub fn is_impossible(&self) -> bool {
        self.value() <= 0.0
    }
}

fn gcd(mut a: u128, mut b: u128) -> u128 {
    while b != 0 {
        let t = a % b;
        a = b;
        b = t;
    }
    a
}

/// Exact `choose(n, k)`, or `None` if it overflows `u128`. Zero when `k > n`
pub fn binomial(n: usize, k: usize) -> Option<u128> {
    if k > n {
        return Some(0);
    }
    let k = k.min(n - k);
    let mut result: u128 = 1;
    for i in 1..=k {
        // result is choose(n - k + i - 1, i - 1); after this step choose(n - k + i, i)
        let num = (n - k + i) as u128;
        let den = i as u128;
        let g = gcd(result, den);
        result = (result / g).checked_mul(num / (den / g))?;
    }
    Some(result)
}

/// Natural log of `choose(n, k)`; negative infinity when `k > n`
pub fn ln_binomial(n: usize, k: usize) -> f64 {
    if k > n {
        return f64::NEG_INFINITY;
    }
    let k = k.min(n - k);
    (1..=k)
        .map(|i| ((n - k + i) as f64).ln() - (i as f64).ln())
        .sum()
}

fn exact_odds(bag: &Bag, target: &LetterSet, draws: usize) -> Option<Odds> {
    let total = bag.total_count();
    let required = target.total();
    let mut favourable = binomial(total - required, draws - required)?;
    for (t, m) in target.iter() {
        favourable = favourable.checked_mul(binomial(bag.count(t.as_str()), m)?)?;
    }
    let possible = binomial(total, draws)?;
    Some(Odds::Exact {
        favourable,
        possible,
    })
}

fn ln_odds(bag: &Bag, target: &LetterSet, draws: usize) -> f64 {
    let total = bag.total_count();
    let required = target.total();
    let ln_favourable: f64 = target
        .iter()
        .map(|(t, m)| ln_binomial(bag.count(t.as_str()), m))
        .sum::<f64>()
        + ln_binomial(total - required, draws - required);
    (ln_favourable - ln_binomial(total, draws)).exp()
}

impl Bag {
    /// Raw odds that a draw of `draws` tiles from the current bag covers `target`.
    ///
    /// `draws` is raised to the size of the target when smaller. Impossible when the
    /// bag is empty, the target is not a subset of the bag, or more tiles are drawn
    /// than remain.
    pub fn odds_of(&self, target: &LetterSet, draws: usize) -> Odds {
        let draws = draws.max(target.total());
        if self.is_empty() || !self.contains(target) || draws > self.total_count() {
            return Odds::IMPOSSIBLE;
        }
        exact_odds(self, target, draws)
            .unwrap_or_else(|| Odds::Approximate(ln_odds(self, target, draws)))
    }

    /// Probability in `[0, 1]` of drawing `target` within `draws` tiles
    pub fn probability_of(&self, target: &LetterSet, draws: usize) -> f64 {
        self.odds_of(target, draws).value().clamp(0.0, 1.0)
    }

    /// Probability of drawing exactly the spelling's tiles in as many draws
    pub fn spelling_probability(&self, spelling: &Spelling) -> f64 {
        self.probability_of(spelling.letters(), spelling.len())
    }

    /// Sum over alternative spellings of a word. The spellings are treated as
    /// mutually exclusive outcomes, which only holds when they share no tiles
    pub fn spellings_probability(&self, spellings: &[Spelling]) -> f64 {
        spellings.iter().map(|s| self.spelling_probability(s)).sum()
    }
}
