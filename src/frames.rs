//! Gallows render stages, ordered from an empty scene to the complete figure.

const STAGE_COUNT: usize = 12;

const STAGES: [&str; STAGE_COUNT] = [
    "\n\n\n\n\n\n##########",
    " |\n |\n |\n |\n |\n |\n##########",
    " |\n |\n |\n |\n |\n/|\n##########",
    " |\n |\n |\n |\n |\n/|\\\n##########",
    "-+-----\n |\n |\n |\n |\n/|\\\n##########",
    "-+-----\n |/\n |\n |\n |\n/|\\\n##########",
    "-+---+-\n |/  O\n |\n |\n |\n/|\\\n##########",
    "-+---+-\n |/  O\n |   |\n |\n |\n/|\\\n##########",
    "-+---+-\n |/  O\n |  /|\n |\n |\n/|\\\n##########",
    "-+---+-\n |/  O\n |  /|\\\n |\n |\n/|\\\n##########",
    "-+---+-\n |/  O\n |  /|\\\n |  /\n |\n/|\\\n##########",
    "-+---+-\n |/  O\n |  /|\\\n |  / \\\n |\n/|\\\n##########",
];

/// A fixed sequence of render stages indexed by wrong-guess count.
///
/// Stage 0 shows no damage and the last stage is the game-over picture, so a
/// game played against this sequence allows `len() - 1` wrong guesses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameSelector {
    stages: Vec<String>,
    height: usize,
}

impl FrameSelector {
    pub fn new<I, S>(stages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let stages: Vec<String> = stages
            .into_iter()
            .map(|s| s.into().trim_end_matches('\n').to_string())
            .collect();
        let height = stages.iter().map(|s| s.lines().count()).max().unwrap_or(0);
        Self { stages, height }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.stages.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    /// Wrong guesses allowed before the last stage is reached.
    #[must_use]
    pub fn max_wrong(&self) -> usize {
        self.stages.len().saturating_sub(1)
    }

    /// Number of lines in the tallest stage.
    #[must_use]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Stage for `wrong_count`, clamped to the last stage.
    #[must_use]
    pub fn select(&self, wrong_count: usize) -> &str {
        match self.stages.len() {
            0 => "",
            len => &self.stages[wrong_count.min(len - 1)],
        }
    }

    /// Like [`select`](Self::select), padded with empty lines to [`height`](Self::height)
    /// so every stage occupies the same screen area.
    #[must_use]
    pub fn padded(&self, wrong_count: usize) -> Vec<&str> {
        let mut lines: Vec<&str> = self.select(wrong_count).lines().collect();
        lines.resize(self.height, "");
        lines
    }
}

impl Default for FrameSelector {
    fn default() -> Self {
        Self::new(STAGES)
    }
}
