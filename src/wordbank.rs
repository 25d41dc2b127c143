use crate::debug_log;
use rand::Rng;
use rand::seq::SliceRandom;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Built-in German words, used when no word list is supplied or it is empty.
pub const FALLBACK_WORDBANK: &str = include_str!("resources/wordbank.txt");

#[derive(Error, Debug)]
pub enum WordbankError {
    #[error("Wortliste nicht gefunden: {}", .0.display())]
    NotFound(PathBuf),
    #[error("could not read word list '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// One word per line; blank lines and lines with inner whitespace are skipped.
pub fn load_wordbank_from_str(data: &str) -> Vec<String> {
    data.lines()
        .map(str::trim)
        .filter(|word| !word.is_empty() && !word.chars().any(char::is_whitespace))
        .map(str::to_string)
        .collect()
}

/// Load a UTF-8 word list. Bytes that are not valid UTF-8 are dropped.
pub fn load_wordbank_from_file<P: AsRef<Path>>(path: P) -> Result<Vec<String>, WordbankError> {
    let path = path.as_ref();
    let bytes = fs::read(path).map_err(|source| match source.kind() {
        io::ErrorKind::NotFound => WordbankError::NotFound(path.to_path_buf()),
        _ => WordbankError::Io {
            path: path.to_path_buf(),
            source,
        },
    })?;
    let text: String = String::from_utf8_lossy(&bytes)
        .chars()
        .filter(|&c| c != char::REPLACEMENT_CHARACTER)
        .collect();
    let words = load_wordbank_from_str(&text);
    debug_log!("Loaded {} words from {}", words.len(), path.display());
    Ok(words)
}

/// Pick a word uniformly at random, falling back to [`FALLBACK_WORDBANK`].
pub fn pick_word<R: Rng + ?Sized>(words: &[String], rng: &mut R) -> String {
    if let Some(word) = words.choose(rng) {
        return word.clone();
    }
    log::warn!("Word list is empty, using the built-in words");
    let fallback = load_wordbank_from_str(FALLBACK_WORDBANK);
    fallback.choose(rng).cloned().unwrap_or_else(|| "Programmieren".to_string())
}
