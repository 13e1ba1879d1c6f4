use clap::Parser;
use std::path::PathBuf;

use crate::model::{GenerateOptions, Syllables};

/// koota -- a word generator
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Pattern files to generate from
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Keep duplicate words (default: false)
    #[arg(short, long)]
    pub duplicates: bool,

    /// Syllables per word: N, or MIN,MAX for a random count (default: 1)
    #[arg(short, long, value_parser = parse_syllables)]
    pub syllables: Option<Syllables>,

    /// String separating each syllable (default: empty)
    #[arg(short = 'r', long)]
    pub syllable_separator: Option<String>,

    /// Amount of words to generate (default: 100)
    #[arg(short, long)]
    pub words: Option<usize>,

    /// String separating each word
    #[arg(short = 'p', long, default_value = "\n")]
    pub word_separator: String,

    /// JSON file with generation options; flags override it
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Output compiled bytecode instead of words
    #[arg(long)]
    pub bytecode: bool,
}

impl Cli {
    /// Layer the command-line flags over `base`.
    pub fn options(&self, base: GenerateOptions) -> GenerateOptions {
        GenerateOptions {
            words: self.words.unwrap_or(base.words),
            syllables: self.syllables.unwrap_or(base.syllables),
            syllable_separator: self
                .syllable_separator
                .clone()
                .unwrap_or(base.syllable_separator),
            duplicates: self.duplicates || base.duplicates,
        }
    }
}

/// `N` or `MIN,MAX`.
pub fn parse_syllables(value: &str) -> Result<Syllables, String> {
    let parts: Vec<&str> = value.split(',').collect();
    let num = |s: &str| {
        s.trim()
            .parse::<u32>()
            .map_err(|e| format!("invalid range argument: {e}"))
    };

    match parts.as_slice() {
        [n] => Ok(Syllables::Fixed(num(n)?)),
        [min, max] => Ok(Syllables::Range {
            min: num(min)?,
            max: num(max)?,
        }),
        _ => Err("invalid range argument".to_string()),
    }
}
