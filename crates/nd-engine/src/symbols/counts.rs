//! Per-symbol counts: the multiset of symbols on a face, an outcome, or a
//! set of extra symbols.

use std::ops::Add;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::Symbol;
use crate::error::{DiceError, EngineResult};
use crate::notation;

/// A count for every [`Symbol`].
///
/// Two multisets holding the same symbols compare equal and hash equal, so
/// this doubles as the canonical key for permutation tables. `Display`
/// renders the compact `<count><denomination>` form sorted by denomination.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SymbolCounts {
    counts: [i64; 6],
}

impl SymbolCounts {
    /// An empty multiset.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style: add `amount` of `symbol`.
    pub fn with(mut self, symbol: Symbol, amount: i64) -> Self {
        self.add_symbol(symbol, amount);
        self
    }

    /// The count for `symbol`.
    pub fn get(&self, symbol: Symbol) -> i64 {
        self.counts[symbol.index()]
    }

    /// Add `amount` (possibly negative) of `symbol`, saturating at the
    /// `i64` bounds.
    pub fn add_symbol(&mut self, symbol: Symbol, amount: i64) {
        let count = &mut self.counts[symbol.index()];
        *count = count.saturating_add(amount);
    }

    /// Returns true if every count is zero.
    pub fn is_empty(&self) -> bool {
        self.counts.iter().all(|&c| c == 0)
    }

    /// Non-zero entries in [`Symbol::ALL`] order.
    pub fn iter(&self) -> impl Iterator<Item = (Symbol, i64)> + '_ {
        Symbol::ALL
            .into_iter()
            .map(|s| (s, self.get(s)))
            .filter(|&(_, c)| c != 0)
    }

    /// Parse notation leniently: unknown denominations are dropped.
    pub fn parse_lenient(input: &str) -> EngineResult<Self> {
        let mut counts = Self::new();
        for (amount, denom) in notation::tokens(input)? {
            match Symbol::from_denomination(denom) {
                Some(symbol) => counts.add_symbol(symbol, amount),
                None => tracing::warn!(denomination = %denom, "ignoring unknown symbol"),
            }
        }
        Ok(counts)
    }
}

impl Add for SymbolCounts {
    type Output = SymbolCounts;

    fn add(mut self, rhs: SymbolCounts) -> SymbolCounts {
        for (lhs, rhs) in self.counts.iter_mut().zip(rhs.counts) {
            *lhs = lhs.saturating_add(rhs);
        }
        self
    }
}

impl FromIterator<Symbol> for SymbolCounts {
    fn from_iter<I: IntoIterator<Item = Symbol>>(iter: I) -> Self {
        let mut counts = Self::new();
        for symbol in iter {
            counts.add_symbol(symbol, 1);
        }
        counts
    }
}

impl FromStr for SymbolCounts {
    type Err = DiceError;

    fn from_str(s: &str) -> EngineResult<Self> {
        let mut counts = Self::new();
        for (amount, denom) in notation::tokens(s)? {
            let symbol = Symbol::from_denomination(denom)
                .ok_or_else(|| DiceError::UnknownSymbol(denom.to_string()))?;
            counts.add_symbol(symbol, amount);
        }
        Ok(counts)
    }
}

impl std::fmt::Display for SymbolCounts {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut entries: Vec<(Symbol, i64)> = self.iter().collect();
        entries.sort_by_key(|(s, _)| s.denomination());
        for (symbol, count) in entries {
            write!(f, "{count}{}", symbol.denomination())?;
        }
        Ok(())
    }
}
