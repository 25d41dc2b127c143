//! Guess resolution for a single game.
//!
//! A guess is resolved in a fixed order: a full-word guess first, then one of
//! the umlaut/eszett aliases, then a plain single letter. Every accepted move
//! counts at most once against the player, no matter how many letters an
//! alias expands to.

use crate::debug_log;
use crate::frames::FrameSelector;
use crate::normalize::{fold_case, normalize};
use std::collections::BTreeSet;
use std::fmt;
use thiserror::Error;

/// Alias triggers and the letters they reveal, checked in order.
const ALIASES: &[(&[&str], &[char])] = &[
    (&["ä", "ae"], &['a', 'e']),
    (&["ö", "oe"], &['o', 'e']),
    (&["ü", "ue"], &['u', 'e']),
    (&["ß", "ss", "sz"], &['s']),
];

/// Placeholder for an unrevealed letter in [`GameState::masked_word`].
pub const MASK_CHAR: char = '_';

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("wrong-guess ceiling must be at least 1 (got {0})")]
    InvalidMaxWrong(usize),
    #[error("'{0}' contains no playable letters")]
    EmptyWord(String),
}

/// The word being played, in its original and normalized spelling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Word {
    original: String,
    normalized: String,
    letters: BTreeSet<char>,
    has_eszett: bool,
}

impl Word {
    pub fn new(original: &str) -> Result<Self, GameError> {
        let normalized = normalize(original);
        let letters: BTreeSet<char> = normalized.chars().filter(|c| c.is_alphabetic()).collect();
        if letters.is_empty() {
            return Err(GameError::EmptyWord(original.to_string()));
        }
        Ok(Self {
            original: original.to_string(),
            has_eszett: original.to_lowercase().contains('ß'),
            normalized,
            letters,
        })
    }

    #[must_use]
    pub fn original(&self) -> &str {
        &self.original
    }

    #[must_use]
    pub fn normalized(&self) -> &str {
        &self.normalized
    }

    /// Distinct alphabetic characters of the normalized word.
    #[must_use]
    pub fn letters(&self) -> &BTreeSet<char> {
        &self.letters
    }

    #[must_use]
    pub fn has_eszett(&self) -> bool {
        self.has_eszett
    }
}

/// Why a guess was accepted or rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuessTag {
    EmptyInput,
    LettersOnly,
    AlreadyTried,
    WordCorrect,
    WordIncorrect,
    Hit,
    Miss,
}

impl GuessTag {
    /// `false` for the rejections, which leave the game untouched.
    #[must_use]
    pub fn is_applied(self) -> bool {
        !matches!(self, Self::EmptyInput | Self::LettersOnly | Self::AlreadyTried)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuessOutcome {
    pub applied: bool,
    pub tag: GuessTag,
    /// The trimmed input, kept for the user-facing message.
    pub input: String,
}

impl GuessOutcome {
    fn new(tag: GuessTag, input: &str) -> Self {
        Self {
            applied: tag.is_applied(),
            tag,
            input: input.to_string(),
        }
    }
}

impl fmt::Display for GuessOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.tag {
            GuessTag::EmptyInput => write!(f, "Bitte eingeben 🙂"),
            GuessTag::LettersOnly => write!(f, "Nur Buchstaben bitte 🙂"),
            GuessTag::AlreadyTried => write!(f, "'{}' hattest du schon.", self.input),
            GuessTag::WordCorrect => write!(f, "Wort erraten ✅"),
            GuessTag::WordIncorrect => write!(f, "Nope ❌"),
            GuessTag::Hit => write!(f, "Treffer ✅"),
            GuessTag::Miss => write!(f, "Leider daneben ❌"),
        }
    }
}

/// A single letter or alias move, resolved before it is applied.
struct Move {
    letters: Vec<char>,
    /// Recorded in the wrong attempts if none of `letters` hits.
    token: String,
}

#[derive(Debug, Clone)]
pub struct GameState {
    word: Word,
    guessed: BTreeSet<char>,
    wrong: BTreeSet<String>,
    /// Every applied move token, hit or miss.
    tried: BTreeSet<String>,
    max_wrong: usize,
}

impl GameState {
    pub fn new(original_word: &str, max_wrong: usize) -> Result<Self, GameError> {
        if max_wrong < 1 {
            return Err(GameError::InvalidMaxWrong(max_wrong));
        }
        let word = Word::new(original_word)?;
        debug_log!(
            "GameState::new() - '{}' normalized to '{}', max_wrong={}",
            word.original(),
            word.normalized(),
            max_wrong
        );
        Ok(Self {
            word,
            guessed: BTreeSet::new(),
            wrong: BTreeSet::new(),
            tried: BTreeSet::new(),
            max_wrong,
        })
    }

    /// Start a game whose ceiling is derived from a render sequence.
    pub fn with_frames(original_word: &str, frames: &FrameSelector) -> Result<Self, GameError> {
        Self::new(original_word, frames.max_wrong())
    }

    #[must_use]
    pub fn word(&self) -> &Word {
        &self.word
    }

    #[must_use]
    pub fn guessed_letters(&self) -> &BTreeSet<char> {
        &self.guessed
    }

    /// Wrong tokens in sorted order: single letters, aliases and whole words.
    #[must_use]
    pub fn wrong_attempts(&self) -> &BTreeSet<String> {
        &self.wrong
    }

    #[must_use]
    pub fn wrong_count(&self) -> usize {
        self.wrong.len()
    }

    #[must_use]
    pub fn max_wrong(&self) -> usize {
        self.max_wrong
    }

    #[must_use]
    pub fn remaining(&self) -> usize {
        self.max_wrong.saturating_sub(self.wrong.len())
    }

    #[must_use]
    pub fn is_won(&self) -> bool {
        self.word.letters().is_subset(&self.guessed)
    }

    #[must_use]
    pub fn is_lost(&self) -> bool {
        self.wrong.len() >= self.max_wrong
    }

    #[must_use]
    pub fn is_over(&self) -> bool {
        self.is_won() || self.is_lost()
    }

    /// The normalized word with unrevealed letters replaced by [`MASK_CHAR`],
    /// characters separated by spaces.
    #[must_use]
    pub fn masked_word(&self) -> String {
        let masked: Vec<String> = self
            .word
            .normalized()
            .chars()
            .map(|c| {
                if c.is_alphabetic() && !self.guessed.contains(&c) {
                    MASK_CHAR.to_string()
                } else {
                    c.to_string()
                }
            })
            .collect();
        masked.join(" ")
    }

    /// Resolve and apply one raw input.
    ///
    /// Rejected inputs (`applied == false`) never change the state.
    pub fn guess(&mut self, raw: &str) -> GuessOutcome {
        let raw = raw.trim();
        if raw.is_empty() {
            return GuessOutcome::new(GuessTag::EmptyInput, raw);
        }
        let folded = fold_case(raw);

        if folded.chars().count() > 2 && folded.chars().all(char::is_alphabetic) {
            return self.guess_word(raw, folded);
        }

        let Some(mv) = self.resolve_move(&folded) else {
            return GuessOutcome::new(GuessTag::LettersOnly, raw);
        };

        if self.tried.contains(&mv.token) || mv.letters.iter().all(|c| self.is_seen(*c)) {
            return GuessOutcome::new(GuessTag::AlreadyTried, raw);
        }
        self.tried.insert(mv.token.clone());

        let hits: Vec<char> = mv
            .letters
            .iter()
            .copied()
            .filter(|c| self.word.letters().contains(c))
            .collect();
        if hits.is_empty() {
            debug_log!("guess() - '{}' missed, recording '{}'", raw, mv.token);
            self.wrong.insert(mv.token);
            GuessOutcome::new(GuessTag::Miss, raw)
        } else {
            debug_log!("guess() - '{}' revealed {:?}", raw, hits);
            self.guessed.extend(hits);
            GuessOutcome::new(GuessTag::Hit, raw)
        }
    }

    fn guess_word(&mut self, raw: &str, folded: String) -> GuessOutcome {
        if normalize(&folded) == self.word.normalized() {
            self.guessed.extend(self.word.letters().iter().copied());
            return GuessOutcome::new(GuessTag::WordCorrect, raw);
        }
        if self.tried.contains(&folded) {
            return GuessOutcome::new(GuessTag::AlreadyTried, raw);
        }
        self.tried.insert(folded.clone());
        self.wrong.insert(folded);
        GuessOutcome::new(GuessTag::WordIncorrect, raw)
    }

    /// Expand an alias, or fall back to the first character of the input.
    fn resolve_move(&self, folded: &str) -> Option<Move> {
        let alias = ALIASES
            .iter()
            .find(|(triggers, _)| triggers.contains(&folded))
            .map(|(_, letters)| letters.to_vec());
        let alias = alias.or_else(|| (folded == "z" && self.word.has_eszett()).then(|| vec!['s']));
        if let Some(letters) = alias {
            return Some(Move {
                letters,
                token: folded.to_string(),
            });
        }

        let first = folded.chars().next()?;
        if !first.is_alphabetic() {
            return None;
        }
        Some(Move {
            letters: vec![first],
            token: folded.to_string(),
        })
    }

    fn is_seen(&self, c: char) -> bool {
        let mut buf = [0; 4];
        self.guessed.contains(&c) || self.wrong.contains(&*c.encode_utf8(&mut buf))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn game(word: &str) -> GameState {
        GameState::new(word, 11).unwrap()
    }

    fn single_char_overlap(state: &GameState) -> Vec<char> {
        state
            .wrong_attempts()
            .iter()
            .filter_map(|t| {
                let mut chars = t.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Some(c),
                    _ => None,
                }
            })
            .filter(|c| state.guessed_letters().contains(c))
            .collect()
    }

    #[test]
    fn test_construction_rejects_zero_ceiling() {
        assert_eq!(
            GameState::new("Haus", 0).unwrap_err(),
            GameError::InvalidMaxWrong(0)
        );
    }

    #[test]
    fn test_construction_rejects_word_without_letters() {
        assert!(matches!(
            GameState::new("--", 3),
            Err(GameError::EmptyWord(_))
        ));
        assert!(matches!(GameState::new("", 3), Err(GameError::EmptyWord(_))));
    }

    #[test]
    fn test_word_tracks_eszett() {
        let word = Word::new("Straßenbahn").unwrap();
        assert_eq!(word.normalized(), "strassenbahn");
        assert_eq!(word.original(), "Straßenbahn");
        assert!(word.has_eszett());
        assert!(!Word::new("Strasse").unwrap().has_eszett());
        assert!(Word::new("GROẞ").unwrap().has_eszett());
    }

    #[test]
    fn test_with_frames_uses_sequence_length() {
        let state = GameState::with_frames("Haus", &FrameSelector::default()).unwrap();
        assert_eq!(state.max_wrong(), 11);
        let short = FrameSelector::new(["only"]);
        assert_eq!(
            GameState::with_frames("Haus", &short).unwrap_err(),
            GameError::InvalidMaxWrong(0)
        );
    }

    #[test]
    fn test_empty_input_rejected() {
        let mut state = game("Haus");
        for raw in ["", "   ", "\t\n"] {
            let outcome = state.guess(raw);
            assert!(!outcome.applied);
            assert_eq!(outcome.tag, GuessTag::EmptyInput);
        }
        assert!(state.guessed_letters().is_empty());
        assert!(state.wrong_attempts().is_empty());
    }

    #[test]
    fn test_non_letter_rejected() {
        let mut state = game("Haus");
        for raw in ["1", "?", "-a", "42"] {
            let outcome = state.guess(raw);
            assert!(!outcome.applied, "{raw} was applied");
            assert_eq!(outcome.tag, GuessTag::LettersOnly);
        }
        assert_eq!(state.wrong_count(), 0);
    }

    #[test]
    fn test_single_letter_hit_and_miss() {
        let mut state = game("Haus");
        let hit = state.guess("H");
        assert!(hit.applied);
        assert_eq!(hit.tag, GuessTag::Hit);
        assert!(state.guessed_letters().contains(&'h'));

        let miss = state.guess("x");
        assert!(miss.applied);
        assert_eq!(miss.tag, GuessTag::Miss);
        assert!(state.wrong_attempts().contains("x"));
        assert_eq!(state.wrong_count(), 1);
    }

    #[test]
    fn test_two_char_input_uses_first_letter() {
        let mut state = game("Haus");
        let outcome = state.guess("a1");
        assert_eq!(outcome.tag, GuessTag::Hit);
        assert!(state.guessed_letters().contains(&'a'));
        assert!(state.wrong_attempts().is_empty());
    }

    #[test]
    fn test_two_char_miss_records_folded_input() {
        let mut state = game("Haus");
        let outcome = state.guess("XY");
        assert_eq!(outcome.tag, GuessTag::Miss);
        assert_eq!(
            state.wrong_attempts().iter().collect::<Vec<_>>(),
            vec!["xy"]
        );

        let letter = state.guess("x");
        assert!(letter.applied);
        assert_eq!(letter.tag, GuessTag::Miss);
        assert_eq!(state.wrong_count(), 2);
        assert!(state.wrong_attempts().contains("x"));

        assert_eq!(state.guess("xy").tag, GuessTag::AlreadyTried);
        assert_eq!(state.wrong_count(), 2);
    }

    #[test]
    fn test_eszett_alias_hits_expanded_word() {
        let mut state = game("Straßenbahn");
        let outcome = state.guess("ß");
        assert!(outcome.applied);
        assert_eq!(outcome.tag, GuessTag::Hit);
        assert_eq!(state.guessed_letters().iter().collect::<Vec<_>>(), vec![&'s']);
    }

    #[test]
    fn test_sz_and_ss_aliases() {
        let mut state = game("größer");
        assert_eq!(state.guess("sz").tag, GuessTag::Hit);
        assert_eq!(state.guess("ss").tag, GuessTag::AlreadyTried);
    }

    #[test]
    fn test_umlaut_alias_reveals_both_letters() {
        let mut state = game("Bär");
        assert_eq!(state.word().normalized(), "baer");
        let outcome = state.guess("ae");
        assert_eq!(outcome.tag, GuessTag::Hit);
        assert!(state.guessed_letters().contains(&'a'));
        assert!(state.guessed_letters().contains(&'e'));
        assert!(state.wrong_attempts().is_empty());
    }

    #[test]
    fn test_umlaut_alias_characters() {
        let mut state = game("Wörterbuch");
        assert_eq!(state.guess("Ö").tag, GuessTag::Hit);
        assert!(state.guessed_letters().contains(&'o'));
        assert!(state.guessed_letters().contains(&'e'));
        assert_eq!(state.guess("oe").tag, GuessTag::AlreadyTried);
    }

    #[test]
    fn test_partial_alias_hit_is_single_success() {
        let mut state = game("Haus");
        let outcome = state.guess("ue");
        assert_eq!(outcome.tag, GuessTag::Hit);
        assert!(state.guessed_letters().contains(&'u'));
        assert!(!state.guessed_letters().contains(&'e'));
        assert_eq!(state.wrong_count(), 0);
    }

    #[test]
    fn test_alias_total_miss_counts_once() {
        let mut state = game("Kind");
        let outcome = state.guess("ae");
        assert_eq!(outcome.tag, GuessTag::Miss);
        assert_eq!(state.wrong_count(), 1);
        assert!(state.wrong_attempts().contains("ae"));
    }

    #[test]
    fn test_z_alias_only_with_eszett() {
        let mut with_eszett = game("Straße");
        assert_eq!(with_eszett.guess("z").tag, GuessTag::Hit);
        assert!(with_eszett.guessed_letters().contains(&'s'));

        let mut without = game("Strasse");
        assert_eq!(without.guess("z").tag, GuessTag::Miss);
        assert!(without.wrong_attempts().contains("z"));
    }

    #[test]
    fn test_repeated_guess_is_rejected_without_change() {
        let mut state = game("Haus");
        for raw in ["h", "x", "ae", "oe", "Tisch"] {
            assert!(state.guess(raw).applied, "first {raw} not applied");
            let guessed = state.guessed_letters().clone();
            let wrong = state.wrong_attempts().clone();

            let again = state.guess(raw);
            assert!(!again.applied, "repeated {raw} was applied");
            assert_eq!(again.tag, GuessTag::AlreadyTried);
            assert_eq!(state.guessed_letters(), &guessed);
            assert_eq!(state.wrong_attempts(), &wrong);
        }
    }

    #[test]
    fn test_repeated_partial_alias_is_rejected() {
        let mut state = game("Haus");
        assert_eq!(state.guess("ae").tag, GuessTag::Hit);
        assert_eq!(state.guess("ä").tag, GuessTag::Hit);
        assert_eq!(state.guess("AE").tag, GuessTag::AlreadyTried);
        assert_eq!(state.guess("e").tag, GuessTag::Miss);
    }

    #[test]
    fn test_already_tried_message_names_input() {
        let mut state = game("Haus");
        state.guess("h");
        assert_eq!(state.guess(" H ").to_string(), "'H' hattest du schon.");
    }

    #[test]
    fn test_full_word_guess_wins() {
        let mut state = game("Programmieren");
        let outcome = state.guess("Programmieren");
        assert!(outcome.applied);
        assert_eq!(outcome.tag, GuessTag::WordCorrect);
        assert!(state.is_won());
        assert_eq!(state.guessed_letters(), state.word().letters());
    }

    #[test]
    fn test_full_word_guess_with_umlauts() {
        let mut state = game("Überraschung");
        assert_eq!(state.guess("ueberraschung").tag, GuessTag::WordCorrect);
        let mut state = game("Straßenbahn");
        assert_eq!(state.guess("STRASSENBAHN").tag, GuessTag::WordCorrect);
        assert!(state.is_won());
    }

    #[test]
    fn test_wrong_full_word_counts_once() {
        let mut state = game("Haus");
        let outcome = state.guess("Baum");
        assert!(outcome.applied);
        assert_eq!(outcome.tag, GuessTag::WordIncorrect);
        assert_eq!(state.wrong_count(), 1);
        assert!(state.wrong_attempts().contains("baum"));
        assert!(state.guessed_letters().is_empty());
    }

    #[test]
    fn test_three_misses_lose() {
        let mut state = GameState::new("Haus", 3).unwrap();
        for raw in ["x", "y", "q"] {
            assert_eq!(state.guess(raw).tag, GuessTag::Miss);
        }
        assert!(state.is_lost());
        assert!(!state.is_won());
        assert_eq!(state.wrong_count(), 3);
        assert_eq!(state.remaining(), 0);
    }

    #[test]
    fn test_win_by_letters() {
        let mut state = game("Haus");
        for raw in ["h", "a", "u"] {
            state.guess(raw);
            assert!(!state.is_won());
        }
        state.guess("s");
        assert!(state.is_won());
        assert!(!state.is_lost());
    }

    #[test]
    fn test_masked_word() {
        let mut state = game("Rot-Weiß");
        assert_eq!(state.masked_word(), "_ _ _ - _ _ _ _ _");
        state.guess("s");
        state.guess("o");
        assert_eq!(state.masked_word(), "_ o _ - _ _ _ s s");
        assert!(!state.word().letters().contains(&'-'));
    }

    #[test]
    fn test_guessed_and_wrong_stay_disjoint() {
        let mut state = game("Straßenbahn");
        for raw in ["s", "x", "ae", "ü", "z", "t", "q", "e", "Strandbad", "n", "sz"] {
            state.guess(raw);
            assert!(single_char_overlap(&state).is_empty(), "overlap after {raw}");
        }
    }

    #[test]
    fn test_won_and_lost_exclusive() {
        let mut state = GameState::new("ab", 1).unwrap();
        state.guess("a");
        state.guess("b");
        assert!(state.is_won());
        assert!(!state.is_lost());

        let mut state = GameState::new("ab", 1).unwrap();
        state.guess("c");
        assert!(state.is_lost());
        assert!(!state.is_won());
    }

    #[test]
    fn test_outcome_messages() {
        let mut state = game("Haus");
        assert_eq!(state.guess("h").to_string(), "Treffer ✅");
        assert_eq!(state.guess("x").to_string(), "Leider daneben ❌");
        assert_eq!(state.guess("").to_string(), "Bitte eingeben 🙂");
        assert_eq!(state.guess("7").to_string(), "Nur Buchstaben bitte 🙂");
        assert_eq!(state.guess("Maus").to_string(), "Nope ❌");
        assert_eq!(state.guess("haus").to_string(), "Wort erraten ✅");
    }
}
