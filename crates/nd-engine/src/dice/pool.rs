//! Dice pool construction, canonical keys, and rolling.

use std::collections::BTreeMap;
use std::str::FromStr;

use rand::Rng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

use super::Die;
use super::roll::{DieResult, RollResult};
use crate::error::{DiceError, EngineResult};
use crate::notation;

/// How many dice of each kind are rolled together.
///
/// Zero counts are never stored, so two pools with the same dice compare
/// and hash equal regardless of how they were built.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DicePool {
    dice: BTreeMap<Die, u32>,
}

impl DicePool {
    /// Create an empty dice pool.
    pub fn new() -> Self {
        Self {
            dice: BTreeMap::new(),
        }
    }

    /// Add `count` dice of the given kind.
    pub fn add(mut self, die: Die, count: u32) -> Self {
        self.insert(die, count);
        self
    }

    /// Add `count` dice of the given kind in place, saturating at
    /// `u32::MAX`. Such a pool is later rejected for having too many
    /// outcomes to count.
    pub fn insert(&mut self, die: Die, count: u32) {
        if count > 0 {
            let held = self.dice.entry(die).or_insert(0);
            *held = held.saturating_add(count);
        }
    }

    /// Add `count` dice of the given kind in place, failing if the total for
    /// that kind would not fit in a `u32`.
    pub fn try_insert(&mut self, die: Die, count: u32) -> EngineResult<()> {
        self.get(die).checked_add(count).ok_or_else(|| {
            DiceError::InvalidPool(format!("too many {die} dice"))
        })?;
        self.insert(die, count);
        Ok(())
    }

    /// How many dice of `die` are in the pool.
    pub fn get(&self, die: Die) -> u32 {
        self.dice.get(&die).copied().unwrap_or(0)
    }

    /// Total number of dice in the pool.
    pub fn count(&self) -> u32 {
        self.dice.values().sum()
    }

    /// Returns true if the pool has no dice.
    pub fn is_empty(&self) -> bool {
        self.dice.is_empty()
    }

    /// Number of distinct die kinds in the pool.
    pub fn kinds(&self) -> usize {
        self.dice.len()
    }

    /// `(die, count)` entries in [`Die::ALL`] order.
    pub fn iter(&self) -> impl Iterator<Item = (Die, u32)> + '_ {
        self.dice.iter().map(|(&d, &c)| (d, c))
    }

    /// Highest count of any single die kind.
    pub fn max_per_kind(&self) -> u32 {
        self.dice.values().copied().max().unwrap_or(0)
    }

    /// Size of the raw outcome space: the product of `faces^count` over the
    /// pool. `None` if it does not fit in a `u128`.
    pub fn total_permutations(&self) -> Option<u128> {
        self.iter().try_fold(1u128, |acc, (die, count)| {
            (die.face_count() as u128)
                .checked_pow(count)
                .and_then(|p| acc.checked_mul(p))
        })
    }

    /// Returns true if every die in `self` is also in `other`, at a count
    /// no higher than `other`'s.
    pub fn fits_within(&self, other: &DicePool) -> bool {
        self.iter().all(|(die, count)| count <= other.get(die))
    }

    /// Dice in `self` beyond those already in `base`.
    pub fn increment_over(&self, base: &DicePool) -> DicePool {
        let mut rest = DicePool::new();
        for (die, count) in self.iter() {
            rest.insert(die, count.saturating_sub(base.get(die)));
        }
        rest
    }

    /// Parse notation leniently: unknown dice and non-positive counts are dropped.
    pub fn parse_lenient(input: &str) -> EngineResult<Self> {
        let mut pool = Self::new();
        for (count, denom) in notation::tokens(input)? {
            match (Die::from_denomination(denom), u32::try_from(count)) {
                (Some(die), Ok(count)) => pool.insert(die, count),
                (None, _) => tracing::warn!(denomination = %denom, "ignoring unknown die"),
                (Some(die), Err(_)) => tracing::warn!(%die, count, "ignoring non-positive count"),
            }
        }
        Ok(pool)
    }

    /// Roll every die in the pool using the given RNG.
    pub fn roll(&self, rng: &mut StdRng) -> RollResult {
        let dice = self
            .iter()
            .flat_map(|(die, count)| std::iter::repeat_n(die, count as usize))
            .map(|die| {
                let face = rng.random_range(0..die.face_count());
                DieResult { die, face }
            })
            .collect();
        RollResult { dice }
    }
}

impl FromIterator<(Die, u32)> for DicePool {
    fn from_iter<I: IntoIterator<Item = (Die, u32)>>(iter: I) -> Self {
        let mut pool = Self::new();
        for (die, count) in iter {
            pool.insert(die, count);
        }
        pool
    }
}

impl FromStr for DicePool {
    type Err = DiceError;

    fn from_str(s: &str) -> EngineResult<Self> {
        let mut pool = Self::new();
        for (count, denom) in notation::tokens(s)? {
            let die = Die::from_denomination(denom)
                .ok_or_else(|| DiceError::UnknownDie(denom.to_string()))?;
            let count = u32::try_from(count).map_err(|_| {
                DiceError::InvalidPool(format!("count {count} for {die} is out of range"))
            })?;
            pool.try_insert(die, count)?;
        }
        Ok(pool)
    }
}

/// Renders the canonical key: `<count><denomination>` sorted by denomination.
impl std::fmt::Display for DicePool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut entries: Vec<(Die, u32)> = self.iter().collect();
        entries.sort_by_key(|(d, _)| d.denomination());
        for (die, count) in entries {
            write!(f, "{count}{}", die.denomination())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn empty_pool() {
        let pool = DicePool::new();
        assert_eq!(pool.count(), 0);
        assert!(pool.is_empty());
        assert_eq!(pool.total_permutations(), Some(1));
        assert_eq!(pool.to_string(), "");
    }

    #[test]
    fn add_dice() {
        let pool = DicePool::new().add(Die::Ability, 2).add(Die::Difficulty, 3);
        assert_eq!(pool.count(), 5);
        assert_eq!(pool.kinds(), 2);
        assert_eq!(pool.get(Die::Ability), 2);
        assert_eq!(pool.get(Die::Boost), 0);
        assert_eq!(pool.max_per_kind(), 3);
    }

    #[test]
    fn zero_counts_are_ignored() {
        let pool = DicePool::new().add(Die::Boost, 0).add(Die::Ability, 1);
        assert_eq!(pool, DicePool::new().add(Die::Ability, 1));
        assert_eq!(pool.kinds(), 1);
    }

    #[test]
    fn canonical_key_sorts_by_denomination() {
        let pool = DicePool::new()
            .add(Die::Setback, 1)
            .add(Die::Ability, 2)
            .add(Die::Challenge, 1);
        assert_eq!(pool.to_string(), "2a1c1s");
    }

    #[test]
    fn total_permutations() {
        let pool = DicePool::new().add(Die::Boost, 2).add(Die::Proficiency, 1);
        assert_eq!(pool.total_permutations(), Some(36 * 12));
    }

    #[test]
    fn total_permutations_overflow() {
        let pool = DicePool::new().add(Die::Proficiency, 100);
        assert_eq!(pool.total_permutations(), None);
    }

    #[test]
    fn parse_notation() {
        let pool: DicePool = "2a1p 1d".parse().unwrap();
        assert_eq!(pool.get(Die::Ability), 2);
        assert_eq!(pool.get(Die::Proficiency), 1);
        assert_eq!(pool.get(Die::Difficulty), 1);
        let repeated: DicePool = "aapd".parse().unwrap();
        assert_eq!(pool, repeated);
    }

    #[test]
    fn parse_rejects_unknown_die() {
        let err = "2a1x".parse::<DicePool>().unwrap_err();
        assert!(matches!(err, DiceError::UnknownDie(ref d) if d == "x"));
    }

    #[test]
    fn parse_rejects_negative_count() {
        assert!(matches!("-1a".parse::<DicePool>(), Err(DiceError::InvalidPool(_))));
    }

    #[test]
    fn parse_rejects_overflowing_total() {
        let notation = format!("{}a1a", u32::MAX);
        assert!(matches!(notation.parse::<DicePool>(), Err(DiceError::InvalidPool(_))));
    }

    #[test]
    fn insert_saturates() {
        let mut pool = DicePool::new().add(Die::Ability, u32::MAX);
        pool.insert(Die::Ability, 1);
        assert_eq!(pool.get(Die::Ability), u32::MAX);
        assert_eq!(pool.total_permutations(), None);
        assert!(pool.try_insert(Die::Ability, 1).is_err());
        assert!(pool.try_insert(Die::Boost, 2).is_ok());
        assert_eq!(pool.get(Die::Boost), 2);
    }

    #[test]
    fn lenient_parse_drops_bad_entries() {
        let pool = DicePool::parse_lenient("2a1x-1d").unwrap();
        assert_eq!(pool, DicePool::new().add(Die::Ability, 2));
    }

    #[test]
    fn fits_within_and_increment() {
        let small = DicePool::new().add(Die::Ability, 1);
        let big = DicePool::new().add(Die::Ability, 2).add(Die::Difficulty, 1);
        assert!(small.fits_within(&big));
        assert!(!big.fits_within(&small));
        assert_eq!(
            big.increment_over(&small),
            DicePool::new().add(Die::Ability, 1).add(Die::Difficulty, 1)
        );
        assert!(DicePool::new().fits_within(&small));
    }

    #[test]
    fn roll_produces_valid_faces() {
        let mut rng = StdRng::seed_from_u64(42);
        let pool = DicePool::new().add(Die::Proficiency, 4).add(Die::Setback, 3);
        let result = pool.roll(&mut rng);
        assert_eq!(result.dice.len(), 7);
        for die_result in &result.dice {
            assert!(die_result.face < die_result.die.face_count());
        }
    }

    #[test]
    fn roll_deterministic_with_seed() {
        let pool = DicePool::new().add(Die::Ability, 3);
        let mut rng1 = StdRng::seed_from_u64(99);
        let mut rng2 = StdRng::seed_from_u64(99);
        let r1 = pool.roll(&mut rng1);
        let r2 = pool.roll(&mut rng2);
        for (a, b) in r1.dice.iter().zip(r2.dice.iter()) {
            assert_eq!(a.face, b.face);
        }
    }
}
