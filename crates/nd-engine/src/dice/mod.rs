//! Die types, faces, pools, and rolling.
//!
//! Three positive dice (Boost, Ability, Proficiency) and three negative dice
//! (Setback, Difficulty, Challenge). Each die is a fixed, ordered list of
//! faces; each face is a possibly empty multiset of [`Symbol`]s.

pub mod pool;
pub mod roll;

pub use pool::DicePool;
pub use roll::{DieResult, RollResult};

use serde::{Deserialize, Serialize};

use crate::symbols::{Symbol, SymbolCounts};

/// One face of a die.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Face {
    symbols: &'static [Symbol],
}

impl Face {
    const fn new(symbols: &'static [Symbol]) -> Self {
        Self { symbols }
    }

    /// The symbols printed on this face, in printed order.
    pub fn symbols(&self) -> &'static [Symbol] {
        self.symbols
    }

    /// Returns true for a face with no symbols.
    pub fn is_blank(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Aggregated symbol counts of this face.
    pub fn counts(&self) -> SymbolCounts {
        self.symbols.iter().copied().collect()
    }
}

/// Renders the canonical `<count><denomination>` form; blank faces render empty.
impl std::fmt::Display for Face {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.counts())
    }
}

use Symbol::{Advantage as A, Despair as D, Failure as F, Success as S, Threat as H, Triumph as T};

const BLANK: Face = Face::new(&[]);

static BOOST: [Face; 6] = [
    BLANK,
    BLANK,
    Face::new(&[S]),
    Face::new(&[S, A]),
    Face::new(&[A, A]),
    Face::new(&[A]),
];

static ABILITY: [Face; 8] = [
    BLANK,
    Face::new(&[S]),
    Face::new(&[S]),
    Face::new(&[S, S]),
    Face::new(&[A]),
    Face::new(&[A]),
    Face::new(&[S, A]),
    Face::new(&[A, A]),
];

static PROFICIENCY: [Face; 12] = [
    BLANK,
    Face::new(&[S]),
    Face::new(&[S]),
    Face::new(&[S, S]),
    Face::new(&[S, S]),
    Face::new(&[A]),
    Face::new(&[S, A]),
    Face::new(&[S, A]),
    Face::new(&[S, A]),
    Face::new(&[A, A]),
    Face::new(&[A, A]),
    Face::new(&[T]),
];

static SETBACK: [Face; 6] = [
    BLANK,
    BLANK,
    Face::new(&[F]),
    Face::new(&[F]),
    Face::new(&[H]),
    Face::new(&[H]),
];

static DIFFICULTY: [Face; 8] = [
    BLANK,
    Face::new(&[F]),
    Face::new(&[F, F]),
    Face::new(&[H]),
    Face::new(&[H]),
    Face::new(&[H]),
    Face::new(&[H, H]),
    Face::new(&[F, H]),
];

static CHALLENGE: [Face; 12] = [
    BLANK,
    Face::new(&[F]),
    Face::new(&[F]),
    Face::new(&[F, F]),
    Face::new(&[F, F]),
    Face::new(&[H]),
    Face::new(&[H]),
    Face::new(&[F, H]),
    Face::new(&[F, H]),
    Face::new(&[H, H]),
    Face::new(&[H, H]),
    Face::new(&[D]),
];

/// A narrative die type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Die {
    /// Six-sided positive bonus die.
    Boost,
    /// Eight-sided positive die.
    Ability,
    /// Twelve-sided upgraded positive die; carries the Triumph.
    Proficiency,
    /// Six-sided negative penalty die.
    Setback,
    /// Eight-sided negative die.
    Difficulty,
    /// Twelve-sided upgraded negative die; carries the Despair.
    Challenge,
}

impl Die {
    /// Every die, in declaration order.
    pub const ALL: [Die; 6] = [
        Self::Boost,
        Self::Ability,
        Self::Proficiency,
        Self::Setback,
        Self::Difficulty,
        Self::Challenge,
    ];

    /// The unique one-character denomination used in compact notation.
    pub fn denomination(self) -> char {
        match self {
            Self::Boost => 'b',
            Self::Ability => 'a',
            Self::Proficiency => 'p',
            Self::Setback => 's',
            Self::Difficulty => 'd',
            Self::Challenge => 'c',
        }
    }

    /// The ordered faces of this die.
    pub fn faces(self) -> &'static [Face] {
        match self {
            Self::Boost => &BOOST,
            Self::Ability => &ABILITY,
            Self::Proficiency => &PROFICIENCY,
            Self::Setback => &SETBACK,
            Self::Difficulty => &DIFFICULTY,
            Self::Challenge => &CHALLENGE,
        }
    }

    /// Number of faces on this die.
    pub fn face_count(self) -> usize {
        self.faces().len()
    }

    /// Resolve a die from its denomination character.
    pub fn from_denomination(c: char) -> Option<Self> {
        Self::ALL.into_iter().find(|d| d.denomination() == c)
    }

    /// Resolve a die from its name (case-insensitive) or denomination.
    pub fn from_name(s: &str) -> Option<Self> {
        let s = s.trim().to_lowercase();
        match s.as_str() {
            "boost" => Some(Self::Boost),
            "ability" => Some(Self::Ability),
            "proficiency" => Some(Self::Proficiency),
            "setback" => Some(Self::Setback),
            "difficulty" => Some(Self::Difficulty),
            "challenge" => Some(Self::Challenge),
            other => {
                let mut chars = other.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Self::from_denomination(c),
                    _ => None,
                }
            }
        }
    }
}

impl std::fmt::Display for Die {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Boost => write!(f, "Boost"),
            Self::Ability => write!(f, "Ability"),
            Self::Proficiency => write!(f, "Proficiency"),
            Self::Setback => write!(f, "Setback"),
            Self::Difficulty => write!(f, "Difficulty"),
            Self::Challenge => write!(f, "Challenge"),
        }
    }
}
