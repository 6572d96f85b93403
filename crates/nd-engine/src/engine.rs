//! The chance calculator: probability that a criterion holds for a pool.

use std::collections::HashMap;
use std::sync::Arc;

use serde::Serialize;

use crate::config::EngineConfig;
use crate::criteria::Criterion;
use crate::dice::DicePool;
use crate::distribution::Distribution;
use crate::error::{DiceError, EngineResult};
use crate::evaluate::evaluate;
use crate::permutations::{CacheStats, PermutationCache, PermutationTable};
use crate::request::ChanceRequest;
use crate::symbols::SymbolCounts;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct ChanceKey {
    pool: DicePool,
    extra: SymbolCounts,
    criterion: Criterion,
}

/// Cache sizes and counters for an engine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct EngineStats {
    /// Permutation table cache counters.
    pub permutations: CacheStats,
    /// Number of remembered chance ratios.
    pub cached_chances: usize,
}

/// Computes chances and distributions, memoizing every intermediate result.
///
/// Single-threaded and synchronous; caches only ever grow. Wrap it in a
/// [`ChanceWorker`](crate::ChanceWorker) to reach it across an async
/// boundary.
#[derive(Debug, Default)]
pub struct DiceEngine {
    config: EngineConfig,
    permutations: PermutationCache,
    chances: HashMap<ChanceKey, f64>,
}

impl DiceEngine {
    /// Create an engine with the given configuration.
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config,
            permutations: PermutationCache::new(),
            chances: HashMap::new(),
        }
    }

    /// The engine configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Probability in `[0, 1]` that `criterion` holds when rolling `pool`
    /// with `extra` symbols added.
    pub fn chance_of(
        &mut self,
        pool: &DicePool,
        extra: &SymbolCounts,
        criterion: Criterion,
    ) -> EngineResult<f64> {
        let total = self.check_pool(pool)?;

        let key = ChanceKey {
            pool: pool.clone(),
            extra: *extra,
            criterion,
        };
        if let Some(&chance) = self.chances.get(&key) {
            tracing::trace!(%pool, %extra, %criterion, "chance cache hit");
            return Ok(chance);
        }

        let chance = if total == 1 {
            let met = criterion.is_met(&evaluate(&SymbolCounts::new(), extra));
            if met { 1.0 } else { 0.0 }
        } else {
            let table = self.permutations.for_mixed_pool(pool);
            let hits: u128 = table
                .iter()
                .filter(|(rolled, _)| criterion.is_met(&evaluate(rolled, extra)))
                .map(|(_, count)| count)
                .sum();
            hits as f64 / total as f64
        };

        tracing::debug!(%pool, %extra, %criterion, chance, "computed chance");
        if self.config.cache_chances {
            self.chances.insert(key, chance);
        }
        Ok(chance)
    }

    /// Full distribution of net outcomes for `pool` with `extra` symbols.
    pub fn distribution(
        &mut self,
        pool: &DicePool,
        extra: &SymbolCounts,
    ) -> EngineResult<Distribution> {
        let table = self.permutations(pool)?;
        Ok(Distribution::from_table(&table, extra))
    }

    /// The permutation table for `pool`.
    pub fn permutations(&mut self, pool: &DicePool) -> EngineResult<Arc<PermutationTable>> {
        self.check_pool(pool)?;
        Ok(self.permutations.for_mixed_pool(pool))
    }

    /// Serve a request: normalize it permissively, then compute the chance.
    pub fn handle(&mut self, request: &ChanceRequest) -> EngineResult<f64> {
        let normalized = request.normalize();
        self.chance_of(&normalized.pool, &normalized.extra, normalized.criterion)
    }

    /// Snapshot of cache sizes and counters.
    pub fn stats(&self) -> EngineStats {
        EngineStats {
            permutations: self.permutations.stats(),
            cached_chances: self.chances.len(),
        }
    }

    /// Validate the pool against the configured cap and return its total
    /// permutation count.
    fn check_pool(&self, pool: &DicePool) -> EngineResult<u128> {
        self.config.check_pool(pool)?;
        pool.total_permutations().ok_or_else(|| {
            DiceError::InvalidPool(format!("{pool} has too many outcomes to count"))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dice::Die;
    use crate::symbols::Symbol;

    fn engine() -> DiceEngine {
        DiceEngine::new(EngineConfig::default())
    }

    fn none() -> SymbolCounts {
        SymbolCounts::new()
    }

    /// Enumerate every raw roll of `pool` one at a time.
    fn brute_force_chance(pool: &DicePool, extra: &SymbolCounts, criterion: Criterion) -> f64 {
        let dice: Vec<Die> = pool
            .iter()
            .flat_map(|(die, count)| std::iter::repeat_n(die, count as usize))
            .collect();
        let mut faces = vec![0usize; dice.len()];
        let (mut hits, mut total) = (0u64, 0u64);
        loop {
            let rolled = dice
                .iter()
                .zip(&faces)
                .fold(SymbolCounts::new(), |acc, (die, &f)| acc + die.faces()[f].counts());
            total += 1;
            if criterion.is_met(&evaluate(&rolled, extra)) {
                hits += 1;
            }

            let mut i = 0;
            loop {
                if i == dice.len() {
                    return hits as f64 / total as f64;
                }
                faces[i] += 1;
                if faces[i] < dice[i].face_count() {
                    break;
                }
                faces[i] = 0;
                i += 1;
            }
        }
    }

    #[test]
    fn single_ability_die_succeeds_half_the_time() {
        let pool = DicePool::new().add(Die::Ability, 1);
        let chance = engine().chance_of(&pool, &none(), Criterion::Success).unwrap();
        assert!((chance - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn two_boost_dice_match_brute_force() {
        let pool = DicePool::new().add(Die::Boost, 2);
        let chance = engine().chance_of(&pool, &none(), Criterion::Success).unwrap();
        let expected = brute_force_chance(&pool, &none(), Criterion::Success);
        assert_eq!(chance.to_bits(), expected.to_bits());
        assert!((chance - 20.0 / 36.0).abs() < 1e-12);
    }

    #[test]
    fn mixed_pools_match_brute_force() {
        let mut engine = engine();
        let pools = [
            DicePool::new().add(Die::Ability, 2).add(Die::Difficulty, 1),
            DicePool::new().add(Die::Proficiency, 1).add(Die::Ability, 1).add(Die::Challenge, 1),
            DicePool::new().add(Die::Boost, 1).add(Die::Setback, 2).add(Die::Ability, 1),
        ];
        let extra = SymbolCounts::new().with(Symbol::Advantage, 1);
        for pool in &pools {
            for criterion in Criterion::ALL {
                let chance = engine.chance_of(pool, &extra, criterion).unwrap();
                let expected = brute_force_chance(pool, &extra, criterion);
                assert!((chance - expected).abs() < 1e-12, "{pool} {criterion}");
            }
        }
    }

    #[test]
    fn empty_pool_uses_extra_symbols_only() {
        let mut engine = engine();
        let one_success = SymbolCounts::new().with(Symbol::Success, 1);
        assert_eq!(
            engine.chance_of(&DicePool::new(), &one_success, Criterion::Success).unwrap(),
            1.0
        );
        assert_eq!(
            engine.chance_of(&DicePool::new(), &none(), Criterion::Success).unwrap(),
            0.0
        );
        assert_eq!(engine.stats().permutations.mixed_entries, 0);
    }

    #[test]
    fn repeated_requests_are_identical_and_cached() {
        let mut engine = engine();
        let pool = DicePool::new().add(Die::Proficiency, 2).add(Die::Challenge, 2);
        let extra = SymbolCounts::new().with(Symbol::Threat, 1);
        let first = engine.chance_of(&pool, &extra, Criterion::SuccessWithAdvantage).unwrap();
        let second = engine.chance_of(&pool, &extra, Criterion::SuccessWithAdvantage).unwrap();
        assert_eq!(first.to_bits(), second.to_bits());
        assert_eq!(engine.stats().cached_chances, 1);
        assert_eq!(engine.stats().permutations.mixed_entries, 1);
    }

    #[test]
    fn chance_cache_can_be_disabled() {
        let mut engine = DiceEngine::new(EngineConfig::default().with_chance_cache(false));
        let pool = DicePool::new().add(Die::Ability, 2);
        engine.chance_of(&pool, &none(), Criterion::Success).unwrap();
        engine.chance_of(&pool, &none(), Criterion::Success).unwrap();
        assert_eq!(engine.stats().cached_chances, 0);
        assert_eq!(engine.stats().permutations.mixed_hits, 1);
    }

    #[test]
    fn distribution_agrees_with_chance() {
        let mut engine = engine();
        let pool = DicePool::new()
            .add(Die::Ability, 2)
            .add(Die::Proficiency, 1)
            .add(Die::Difficulty, 2)
            .add(Die::Setback, 1);
        let extra = SymbolCounts::new().with(Symbol::Failure, 1);
        let dist = engine.distribution(&pool, &extra).unwrap();
        assert_eq!(Some(dist.total()), pool.total_permutations());
        for criterion in Criterion::ALL {
            let chance = engine.chance_of(&pool, &extra, criterion).unwrap();
            assert!((dist.probability_of(criterion) - chance).abs() < 1e-12);
        }
    }

    #[test]
    fn empty_pool_distribution_is_a_single_outcome() {
        let mut engine = engine();
        let extra = SymbolCounts::new().with(Symbol::Success, 2);
        let dist = engine.distribution(&DicePool::new(), &extra).unwrap();
        assert_eq!(dist.len(), 1);
        assert_eq!(dist.total(), 1);
        assert_eq!(dist.probability_of(Criterion::Success), 1.0);
    }

    #[test]
    fn pool_over_cap_is_rejected() {
        let mut engine = DiceEngine::new(EngineConfig::default().with_max_dice_per_kind(3));
        let pool = DicePool::new().add(Die::Ability, 4);
        let err = engine.chance_of(&pool, &none(), Criterion::Success).unwrap_err();
        assert!(matches!(err, DiceError::InvalidPool(_)));
        assert!(engine.distribution(&pool, &none()).is_err());
    }

    #[test]
    fn overflowing_pool_is_rejected() {
        let pool = DicePool::new().add(Die::Challenge, 200);
        let err = engine().chance_of(&pool, &none(), Criterion::Success).unwrap_err();
        assert!(matches!(err, DiceError::InvalidPool(_)));
    }

    #[test]
    fn unknown_criterion_behaves_like_success() {
        let mut engine = engine();
        let request = ChanceRequest::new()
            .with_die("Ability", 2)
            .with_die("Difficulty", 1)
            .with_criteria("NO_SUCH_THING");
        let fallback = engine.handle(&request).unwrap();
        let pool = DicePool::new().add(Die::Ability, 2).add(Die::Difficulty, 1);
        let success = engine.chance_of(&pool, &none(), Criterion::Success).unwrap();
        assert_eq!(fallback.to_bits(), success.to_bits());
    }
}
