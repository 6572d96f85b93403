//! Narrative dice symbols and their fixed relationships.
//!
//! Six symbols appear on the dice. Success and Failure cancel each other,
//! as do Advantage and Threat. Triumph and Despair have no opposite, but a
//! Triumph also counts toward net Success and a Despair toward net Failure.

pub mod counts;

pub use counts::SymbolCounts;

use serde::{Deserialize, Serialize};

/// A symbol that can appear on a die face.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Symbol {
    /// Critical positive symbol; also counts as a Success.
    Triumph,
    /// Positive side effect.
    Advantage,
    /// Moves the check toward passing.
    Success,
    /// Critical negative symbol; also counts as a Failure.
    Despair,
    /// Negative side effect.
    Threat,
    /// Moves the check toward failing.
    Failure,
}

impl Symbol {
    /// Every symbol, in declaration order.
    pub const ALL: [Symbol; 6] = [
        Self::Triumph,
        Self::Advantage,
        Self::Success,
        Self::Despair,
        Self::Threat,
        Self::Failure,
    ];

    /// Position of this symbol in [`Symbol::ALL`].
    pub fn index(self) -> usize {
        self as usize
    }

    /// The unique one-character denomination used in compact notation.
    pub fn denomination(self) -> char {
        match self {
            Self::Triumph => 't',
            Self::Advantage => 'a',
            Self::Success => 's',
            Self::Despair => 'd',
            Self::Threat => 'h',
            Self::Failure => 'f',
        }
    }

    /// The symbol this one cancels 1:1, if any.
    pub fn opposes(self) -> Option<Symbol> {
        match self {
            Self::Success => Some(Self::Failure),
            Self::Failure => Some(Self::Success),
            Self::Advantage => Some(Self::Threat),
            Self::Threat => Some(Self::Advantage),
            Self::Triumph | Self::Despair => None,
        }
    }

    /// The symbol whose count also contributes to this one during evaluation.
    pub fn also_in(self) -> Option<Symbol> {
        match self {
            Self::Success => Some(Self::Triumph),
            Self::Failure => Some(Self::Despair),
            _ => None,
        }
    }

    /// Resolve a symbol from its denomination character.
    pub fn from_denomination(c: char) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.denomination() == c)
    }

    /// Resolve a symbol from its name (case-insensitive) or denomination.
    pub fn from_name(s: &str) -> Option<Self> {
        let s = s.trim().to_lowercase();
        match s.as_str() {
            "triumph" => Some(Self::Triumph),
            "advantage" => Some(Self::Advantage),
            "success" => Some(Self::Success),
            "despair" => Some(Self::Despair),
            "threat" => Some(Self::Threat),
            "failure" => Some(Self::Failure),
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

impl std::fmt::Display for Symbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Triumph => write!(f, "Triumph"),
            Self::Advantage => write!(f, "Advantage"),
            Self::Success => write!(f, "Success"),
            Self::Despair => write!(f, "Despair"),
            Self::Threat => write!(f, "Threat"),
            Self::Failure => write!(f, "Failure"),
        }
    }
}
