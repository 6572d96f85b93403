//! Full distribution of net outcomes for a pool.

use std::collections::BTreeMap;

use crate::criteria::Criterion;
use crate::evaluate::{Evaluation, evaluate};
use crate::permutations::PermutationTable;
use crate::symbols::{Symbol, SymbolCounts};

/// Every distinct net outcome of a pool with the number of raw rolls that
/// produce it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Distribution {
    outcomes: BTreeMap<Evaluation, u128>,
    total: u128,
}

impl Distribution {
    /// Group a permutation table by evaluated outcome.
    pub fn from_table(table: &PermutationTable, extra: &SymbolCounts) -> Self {
        let mut outcomes = BTreeMap::new();
        let mut total = 0;
        for (rolled, count) in table.iter() {
            *outcomes.entry(evaluate(rolled, extra)).or_insert(0) += count;
            total += count;
        }
        Self { outcomes, total }
    }

    /// Number of raw roll outcomes.
    pub fn total(&self) -> u128 {
        self.total
    }

    /// Number of distinct net outcomes.
    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    /// Returns true if there are no outcomes.
    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    /// `(outcome, raw count)` pairs ordered by outcome.
    pub fn iter(&self) -> impl Iterator<Item = (&Evaluation, u128)> + '_ {
        self.outcomes.iter().map(|(e, &c)| (e, c))
    }

    /// Raw roll outcomes satisfying `criterion`.
    pub fn count_where(&self, criterion: Criterion) -> u128 {
        self.iter()
            .filter(|(e, _)| criterion.is_met(e))
            .map(|(_, c)| c)
            .sum()
    }

    /// Probability that `criterion` holds.
    pub fn probability_of(&self, criterion: Criterion) -> f64 {
        self.ratio(self.count_where(criterion))
    }

    /// Probability of landing exactly on `outcome`.
    pub fn probability(&self, outcome: &Evaluation) -> f64 {
        self.ratio(self.outcomes.get(outcome).copied().unwrap_or(0))
    }

    /// Mean net count of `symbol`.
    pub fn expected(&self, symbol: Symbol) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        let weighted: f64 = self
            .iter()
            .map(|(e, c)| e.get(symbol) as f64 * c as f64)
            .sum();
        weighted / self.total as f64
    }

    /// The single most frequent outcome.
    pub fn most_likely(&self) -> Option<(&Evaluation, u128)> {
        self.iter().max_by_key(|&(_, c)| c)
    }

    fn ratio(&self, count: u128) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            count as f64 / self.total as f64
        }
    }
}
