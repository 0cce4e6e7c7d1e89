// Round data model: the target letter plus three pictured word options.
use std::fmt;

/// Number of pictured options shown per round.
pub const OPTION_COUNT: usize = 3;

/// A single uppercase ASCII letter, the target of a round.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Letter(char);

impl Letter {
    /// Accepts any ASCII alphabetic character, upper-casing it.
    pub fn new(c: char) -> Option<Self> {
        c.is_ascii_alphabetic().then(|| Self(c.to_ascii_uppercase()))
    }

    /// Parse a string holding exactly one letter (surrounding whitespace allowed).
    pub fn parse(s: &str) -> Option<Self> {
        let mut chars = s.trim().chars();
        let c = chars.next()?;
        if chars.next().is_some() {
            return None;
        }
        Self::new(c)
    }

    pub fn as_char(self) -> char {
        self.0
    }
}

impl fmt::Display for Letter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One word/emoji candidate within a round.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameOption {
    pub word: String,
    pub emoji: String,
    pub is_correct: bool,
}

impl GameOption {
    pub fn new(word: impl Into<String>, emoji: impl Into<String>, is_correct: bool) -> Self {
        Self {
            word: word.into(),
            emoji: emoji.into(),
            is_correct,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Round {
    pub letter: Letter,
    pub options: [GameOption; OPTION_COUNT],
}

impl Round {
    pub fn correct_count(&self) -> usize {
        self.options.iter().filter(|o| o.is_correct).count()
    }

    /// Position of the correct option in presentation order.
    pub fn correct_index(&self) -> Option<usize> {
        self.options.iter().position(|o| o.is_correct)
    }

    /// Build a round from a static `(letter, [correct, wrong, wrong])` table entry.
    /// Returns `None` when the letter is not an ASCII letter.
    pub fn from_entry(letter: char, pairs: &[(&str, &str); OPTION_COUNT]) -> Option<Self> {
        let letter = Letter::new(letter)?;
        let [(w0, e0), (w1, e1), (w2, e2)] = *pairs;
        Some(Self {
            letter,
            options: [
                GameOption::new(w0, e0, true),
                GameOption::new(w1, e1, false),
                GameOption::new(w2, e2, false),
            ],
        })
    }
}
