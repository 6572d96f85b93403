//! Net symbol evaluation.
//!
//! Symbols cancel their opposite one for one, and a symbol's also-in source
//! is folded into it (a Triumph counts toward Success, a Despair toward
//! Failure). For every symbol `k`:
//!
//! ```text
//! net[k] = s[k] - s[opposes(k)] + s[also_in(k)] - s[also_in(opposes(k))]
//! ```
//!
//! where `s = rolled + extra` and missing relations contribute zero.

use serde::{Deserialize, Serialize};

use crate::symbols::{Symbol, SymbolCounts};

/// Net symbol counts after opposition and folding. Values may be negative.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Evaluation {
    net: SymbolCounts,
}

impl Evaluation {
    /// The net count for `symbol`.
    pub fn get(&self, symbol: Symbol) -> i64 {
        self.net.get(symbol)
    }

    /// The underlying per-symbol counts.
    pub fn counts(&self) -> &SymbolCounts {
        &self.net
    }
}

impl std::fmt::Display for Evaluation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.net)
    }
}

/// Evaluate a rolled outcome with extra symbols layered on top.
pub fn evaluate(rolled: &SymbolCounts, extra: &SymbolCounts) -> Evaluation {
    // Saturating throughout: request counts are unbounded.
    let total = |symbol: Option<Symbol>| {
        symbol.map_or(0, |s| rolled.get(s).saturating_add(extra.get(s)))
    };

    let mut net = SymbolCounts::new();
    for symbol in Symbol::ALL {
        let opposite = symbol.opposes();
        let value = total(Some(symbol))
            .saturating_sub(total(opposite))
            .saturating_add(total(symbol.also_in()))
            .saturating_sub(total(opposite.and_then(Symbol::also_in)));
        net.add_symbol(symbol, value);
    }
    Evaluation { net }
}
