//! Permutation tables: how many raw rolls of a pool land on each symbol
//! multiset.
//!
//! Rolling `n` dice has `faces^n` raw outcomes, far too many to walk for
//! every request. Instead, [`PermutationCache`] groups raw outcomes by the
//! symbols they show and composes tables:
//!
//! - a single die kind is split in halves (`ceil(n/2)` and `floor(n/2)`),
//!   each half computed recursively and cached, then merged;
//! - a mixed pool starts from the largest previously cached pool it
//!   contains and folds in only the missing dice.
//!
//! Tables are only ever added, never evicted, and are shared as
//! `Arc<PermutationTable>`.

use std::collections::HashMap;
use std::sync::Arc;

use serde::Serialize;

use crate::dice::{DicePool, Die};
use crate::symbols::SymbolCounts;

/// Outcome multiset → number of raw roll outcomes producing it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PermutationTable {
    outcomes: HashMap<SymbolCounts, u128>,
}

impl PermutationTable {
    /// A table with no outcomes. Acts as the identity for
    /// [`combine_permutations`].
    pub fn new() -> Self {
        Self::default()
    }

    /// The table of rolling no dice: a single empty outcome, counted once.
    pub fn unit() -> Self {
        let mut table = Self::new();
        table.record(SymbolCounts::new(), 1);
        table
    }

    /// Enumerate the faces of one die.
    pub fn for_die(die: Die) -> Self {
        let mut table = Self::new();
        for face in die.faces() {
            table.record(face.counts(), 1);
        }
        table
    }

    /// Accumulate `count` raw outcomes landing on `outcome`.
    pub fn record(&mut self, outcome: SymbolCounts, count: u128) {
        *self.outcomes.entry(outcome).or_insert(0) += count;
    }

    /// Raw outcome count for `outcome`, zero if it cannot occur.
    pub fn get(&self, outcome: &SymbolCounts) -> u128 {
        self.outcomes.get(outcome).copied().unwrap_or(0)
    }

    /// Number of distinct outcomes.
    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    /// Returns true if the table holds no outcomes.
    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    /// Sum of all counts: the size of the raw outcome space.
    pub fn total(&self) -> u128 {
        self.outcomes.values().sum()
    }

    /// `(outcome, count)` pairs in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&SymbolCounts, u128)> + '_ {
        self.outcomes.iter().map(|(k, &v)| (k, v))
    }
}

/// Cartesian merge of two tables: every pair of outcomes is summed
/// symbol-wise and its counts multiplied. An empty table is the identity.
pub fn combine_permutations(a: &PermutationTable, b: &PermutationTable) -> PermutationTable {
    if a.is_empty() {
        return b.clone();
    }
    if b.is_empty() {
        return a.clone();
    }

    let mut merged = PermutationTable::new();
    for (left, left_count) in a.iter() {
        for (right, right_count) in b.iter() {
            merged.record(*left + *right, left_count * right_count);
        }
    }
    merged
}

/// Counters describing what the cache holds and how often it was reused.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    /// Cached `(die, amount)` tables.
    pub simple_entries: usize,
    /// Cached mixed-pool tables.
    pub mixed_entries: usize,
    /// Single-kind requests served from the cache.
    pub simple_hits: u64,
    /// Mixed-pool requests served from the cache.
    pub mixed_hits: u64,
    /// Mixed-pool computations that started from a smaller cached pool.
    pub prefix_reuses: u64,
}

/// Memoized permutation tables for single die kinds and mixed pools.
#[derive(Debug, Default)]
pub struct PermutationCache {
    simple: HashMap<(Die, u32), Arc<PermutationTable>>,
    mixed: HashMap<DicePool, Arc<PermutationTable>>,
    simple_hits: u64,
    mixed_hits: u64,
    prefix_reuses: u64,
}

impl PermutationCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Table for `amount` dice of a single kind.
    ///
    /// Zero dice yields [`PermutationTable::unit`]; one die enumerates its
    /// faces; more dice are split in halves that are computed (and cached)
    /// recursively, so `n` dice touch O(log n) cache entries.
    pub fn for_simple_pool(&mut self, die: Die, amount: u32) -> Arc<PermutationTable> {
        if let Some(table) = self.simple.get(&(die, amount)) {
            self.simple_hits += 1;
            tracing::trace!(%die, amount, "single-kind table cache hit");
            return Arc::clone(table);
        }

        let table = match amount {
            0 => PermutationTable::unit(),
            1 => PermutationTable::for_die(die),
            n => {
                let upper = self.for_simple_pool(die, n.div_ceil(2));
                let lower = self.for_simple_pool(die, n / 2);
                combine_permutations(&upper, &lower)
            }
        };

        tracing::debug!(%die, amount, outcomes = table.len(), "computed single-kind table");
        let table = Arc::new(table);
        self.simple.insert((die, amount), Arc::clone(&table));
        table
    }

    /// Table for an arbitrary pool spanning any number of die kinds.
    pub fn for_mixed_pool(&mut self, pool: &DicePool) -> Arc<PermutationTable> {
        if let Some(table) = self.mixed.get(pool) {
            self.mixed_hits += 1;
            tracing::trace!(%pool, "mixed-pool table cache hit");
            return Arc::clone(table);
        }

        let (base, mut table) = match self.closest_cached(pool) {
            Some((base, table)) => {
                self.prefix_reuses += 1;
                tracing::debug!(%pool, %base, "extending closest cached pool");
                (base, table)
            }
            None => (DicePool::new(), Arc::new(PermutationTable::unit())),
        };

        for (die, extra) in pool.increment_over(&base).iter() {
            let increment = self.for_simple_pool(die, extra);
            table = Arc::new(combine_permutations(&table, &increment));
        }

        tracing::debug!(%pool, outcomes = table.len(), "computed mixed-pool table");
        self.mixed.insert(pool.clone(), Arc::clone(&table));
        table
    }

    /// The cached pool contained in `pool` that covers the most dice.
    ///
    /// A linear scan; any contained pool gives the same final table, this
    /// only decides how much work is left.
    fn closest_cached(&self, pool: &DicePool) -> Option<(DicePool, Arc<PermutationTable>)> {
        self.mixed
            .iter()
            .filter(|(cached, _)| !cached.is_empty() && cached.fits_within(pool))
            .max_by_key(|(cached, _)| cached.count())
            .map(|(cached, table)| (cached.clone(), Arc::clone(table)))
    }

    /// Snapshot of cache sizes and reuse counters.
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            simple_entries: self.simple.len(),
            mixed_entries: self.mixed.len(),
            simple_hits: self.simple_hits,
            mixed_hits: self.mixed_hits,
            prefix_reuses: self.prefix_reuses,
        }
    }
}
