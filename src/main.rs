use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
#[macro_use]
extern crate text_io;

use scrabbler::logging;
use scrabbler::scrabble::tables::{read_tile_counts, read_tile_points, read_word_list};
use scrabbler::{Bag, LetterSet, PointTable, Rack, ScrabbleDictionary, TileAlphabet, WordSearch};

/// Tiles dealt to a fresh rack
const RACK_SIZE: usize = 7;

#[derive(Parser)]
#[command(
    name = "scrabbler",
    about = "Finds playable words and the odds of drawing near misses",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Tile count table, `tile count` per line or a .json list of pairs
    #[arg(long, global = true, default_value = "letter_counts.txt")]
    counts: PathBuf,

    /// Tile point table, same format as the counts
    #[arg(long, global = true, default_value = "letter_points.txt")]
    points: PathBuf,

    /// Raw word list, one word per line
    #[arg(long, global = true, default_value = "words.txt")]
    words: PathBuf,

    /// Precomputed spellings; a .bin extension stores them in binary
    #[arg(long, global = true, default_value = "dictionary_cache.txt")]
    cache: PathBuf,

    /// Seed for reproducible draws
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Number of results to print
    #[arg(short = 'n', long, global = true, default_value = "10")]
    limit: usize,

    #[arg(long, global = true)]
    debug: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Rebuild the dictionary cache from the word list
    Build,

    /// Highest scoring words playable from a holding
    Valid {
        /// Space separated tiles, e.g. "a s sz e é r h"
        #[arg(long)]
        holding: String,
    },

    /// Near misses ranked by the odds of drawing the missing tiles
    Possible {
        #[arg(long)]
        holding: String,

        #[arg(long, default_value = "7")]
        min_length: usize,

        #[arg(long, default_value = "2")]
        max_missing: usize,
    },

    /// Words of a given length most likely to be drawn from a full bag
    Top {
        #[arg(long)]
        length: usize,
    },

    /// Spellings, scores and draw odds of one word
    Word { word: String },

    /// Deal a rack, play its best word, then answer holdings typed in
    Play,
}

struct Session {
    bag: Bag,
    alphabet: TileAlphabet,
    points: PointTable,
    dictionary: ScrabbleDictionary,
}

impl Session {
    /// Reads the tables and the dictionary. With `rebuild` the cache is ignored,
    /// regenerated from the word list and overwritten
    fn load(cli: &Cli, rebuild: bool) -> Result<Self> {
        let counts = read_tile_counts(&cli.counts)
            .with_context(|| format!("reading tile counts from {}", cli.counts.display()))?;
        let bag = match cli.seed {
            Some(seed) => Bag::from_counts_seeded(&counts, seed),
            None => Bag::from_counts(&counts),
        };
        let points = read_tile_points(&cli.points)
            .with_context(|| format!("reading tile points from {}", cli.points.display()))?;
        let dictionary = if rebuild {
            let words = read_word_list(&cli.words)
                .with_context(|| format!("reading word list from {}", cli.words.display()))?;
            let dictionary = ScrabbleDictionary::build(&words, &bag)?;
            dictionary.save_cache(&cli.cache)?;
            dictionary
        } else {
            ScrabbleDictionary::load_or_build(&cli.cache, &bag, || read_word_list(&cli.words))
                .with_context(|| format!("loading dictionary from {}", cli.words.display()))?
        };
        Ok(Self {
            alphabet: bag.alphabet(),
            bag,
            points,
            dictionary,
        })
    }

    fn search(&self) -> WordSearch<'_> {
        WordSearch::new(&self.dictionary, &self.points)
    }

    fn print_valid(&self, holding: &LetterSet, limit: usize) {
        let found = self.search().find_valid_words(holding);
        if found.is_empty() {
            println!("No playable words for {}", holding);
        }
        for s in found.iter().take(limit) {
            println!("{:>4}  {}", s.score, s.spelling);
        }
    }
}

fn play(session: &mut Session, limit: usize) -> Result<()> {
    let mut rack = Rack::empty();
    session.bag.deal(&mut rack, RACK_SIZE)?;
    println!("Rack: {}", rack.tiles());

    let best = session
        .search()
        .find_valid_words(rack.tiles())
        .first()
        .map(|s| (s.spelling.clone(), s.score));
    match best {
        Some((spelling, score)) => {
            rack.play(&spelling, score)?;
            println!("Played {} for {} points, left with {}", spelling.word(), score, rack.tiles());
        }
        None => println!("Nothing to play"),
    }

    loop {
        println!("Enter a holding (empty line to quit):");
        let line: std::result::Result<String, _> = try_read!("{}\n");
        let line = match line {
            Ok(line) => line,
            Err(_) => break,
        };
        if line.trim().is_empty() {
            break;
        }
        match LetterSet::parse(&line, &session.alphabet) {
            Ok(holding) => session.print_valid(&holding, limit),
            Err(e) => println!("{}", e),
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init_logger(cli.debug);

    let mut session = Session::load(&cli, matches!(cli.command, Commands::Build))?;
    match &cli.command {
        Commands::Build => println!(
            "{} words, {} spellings written to {}",
            session.dictionary.len(),
            session.dictionary.spelling_count(),
            cli.cache.display()
        ),
        Commands::Valid { holding } => {
            let holding = LetterSet::parse(holding, &session.alphabet)?;
            session.print_valid(&holding, cli.limit);
        }
        Commands::Possible {
            holding,
            min_length,
            max_missing,
        } => {
            let holding = LetterSet::parse(holding, &session.alphabet)?;
            // The holding is no longer in the bag
            session.bag.remove_all(&holding)?;
            let found = session
                .search()
                .find_possible_words(&holding, &session.bag, *min_length, *max_missing);
            for c in found.iter().take(cli.limit) {
                println!(
                    "{:>4}  {:<20} missing {:<10} {:.6}",
                    c.score,
                    c.spelling.to_string(),
                    c.missing.to_string(),
                    c.probability
                );
            }
        }
        Commands::Top { length } => {
            for (word, p) in session.search().top_words(&session.bag, *length, cli.limit) {
                println!("{:<20} {:.6}", word, p);
            }
        }
        Commands::Word { word } => {
            let word = word.to_lowercase();
            let spellings = session.dictionary.spellings_of(&word);
            if spellings.is_empty() {
                println!("{} cannot be spelled with these tiles", word);
            }
            for s in spellings {
                println!(
                    "{:<20} {:>4}  {:.6}",
                    s.to_string(),
                    session.points.score(s),
                    session.bag.spelling_probability(s)
                );
            }
            println!(
                "in bag: {}, odds: {:.6}",
                session.dictionary.is_word_in_bag(&word, &session.bag),
                session.search().word_probability(&word, &session.bag)
            );
        }
        Commands::Play => play(&mut session, cli.limit)?,
    }
    Ok(())
}
