//! The request/response call shape used across the worker boundary.
//!
//! Requests name dice, symbols and criteria by string. Normalization is
//! permissive by default: unknown names and non-positive counts are dropped,
//! and an unknown criterion becomes [`Criterion::Success`].

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::criteria::Criterion;
use crate::dice::{DicePool, Die};
use crate::error::{DiceError, EngineResult};
use crate::symbols::{Symbol, SymbolCounts};

/// A chance request as sent by an external caller.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChanceRequest {
    /// Die name → count.
    #[serde(default)]
    pub dice_pool: HashMap<String, i64>,
    /// Symbol name → count.
    #[serde(default)]
    pub extra_symbols: HashMap<String, i64>,
    /// Name of a registered criterion.
    #[serde(default)]
    pub criteria_type: String,
}

/// A request resolved into engine types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedRequest {
    /// The dice to roll.
    pub pool: DicePool,
    /// Symbols added to every outcome.
    pub extra: SymbolCounts,
    /// The predicate to measure.
    pub criterion: Criterion,
}

impl ChanceRequest {
    /// An empty request: no dice, no symbols, default criterion.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `count` dice named `die`.
    pub fn with_die(mut self, die: &str, count: i64) -> Self {
        let held = self.dice_pool.entry(die.to_string()).or_insert(0);
        *held = held.saturating_add(count);
        self
    }

    /// Add `count` symbols named `symbol`.
    pub fn with_symbol(mut self, symbol: &str, count: i64) -> Self {
        let held = self.extra_symbols.entry(symbol.to_string()).or_insert(0);
        *held = held.saturating_add(count);
        self
    }

    /// Set the criterion name.
    pub fn with_criteria(mut self, criteria: &str) -> Self {
        self.criteria_type = criteria.to_string();
        self
    }

    /// Resolve names permissively; never fails.
    pub fn normalize(&self) -> NormalizedRequest {
        let mut pool = DicePool::new();
        for (name, &count) in &self.dice_pool {
            let Some(die) = Die::from_name(name) else {
                tracing::warn!(die = %name, "ignoring unknown die");
                continue;
            };
            match u32::try_from(count) {
                Ok(count) => pool.insert(die, count),
                Err(_) => tracing::warn!(%die, count, "ignoring unusable die count"),
            }
        }

        let mut extra = SymbolCounts::new();
        for (name, &count) in &self.extra_symbols {
            match Symbol::from_name(name) {
                Some(symbol) if count > 0 => extra.add_symbol(symbol, count),
                Some(_) => {}
                None => tracing::warn!(symbol = %name, "ignoring unknown symbol"),
            }
        }

        NormalizedRequest {
            pool,
            extra,
            criterion: Criterion::from_name(&self.criteria_type),
        }
    }

    /// Resolve names strictly: unknown dice, symbols and criteria are errors.
    ///
    /// Zero and negative counts are still ignored, and an empty criterion
    /// name still selects the default.
    pub fn normalize_strict(&self) -> EngineResult<NormalizedRequest> {
        let mut pool = DicePool::new();
        for (name, &count) in &self.dice_pool {
            let die = Die::from_name(name).ok_or_else(|| DiceError::UnknownDie(name.clone()))?;
            if count > 0 {
                let count = u32::try_from(count).map_err(|_| {
                    DiceError::InvalidPool(format!("{count} {die} dice is too many"))
                })?;
                pool.try_insert(die, count)?;
            }
        }

        let mut extra = SymbolCounts::new();
        for (name, &count) in &self.extra_symbols {
            let symbol =
                Symbol::from_name(name).ok_or_else(|| DiceError::UnknownSymbol(name.clone()))?;
            if count > 0 {
                extra.add_symbol(symbol, count);
            }
        }

        let criterion = if self.criteria_type.trim().is_empty() {
            Criterion::default()
        } else {
            self.criteria_type.parse()?
        };

        Ok(NormalizedRequest {
            pool,
            extra,
            criterion,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_camel_case() {
        let json = r#"{
            "dicePool": {"Ability": 2, "Difficulty": 1},
            "extraSymbols": {"Advantage": 1},
            "criteriaType": "ADVANTAGE"
        }"#;
        let request: ChanceRequest = serde_json::from_str(json).unwrap();
        let normalized = request.normalize();
        assert_eq!(
            normalized.pool,
            DicePool::new().add(Die::Ability, 2).add(Die::Difficulty, 1)
        );
        assert_eq!(normalized.extra.get(Symbol::Advantage), 1);
        assert_eq!(normalized.criterion, Criterion::Advantage);
    }

    #[test]
    fn missing_fields_default() {
        let request: ChanceRequest = serde_json::from_str("{}").unwrap();
        let normalized = request.normalize();
        assert!(normalized.pool.is_empty());
        assert!(normalized.extra.is_empty());
        assert_eq!(normalized.criterion, Criterion::Success);
    }

    #[test]
    fn permissive_normalization_drops_bad_input() {
        let request = ChanceRequest::new()
            .with_die("Ability", 1)
            .with_die("d20", 3)
            .with_die("Setback", 0)
            .with_die("Challenge", -2)
            .with_symbol("Success", 1)
            .with_symbol("Glory", 4)
            .with_symbol("Threat", 0)
            .with_criteria("MAGIC");
        let normalized = request.normalize();
        assert_eq!(normalized.pool, DicePool::new().add(Die::Ability, 1));
        assert_eq!(normalized.extra, SymbolCounts::new().with(Symbol::Success, 1));
        assert_eq!(normalized.criterion, Criterion::Success);
    }

    #[test]
    fn strict_normalization_reports_unknown_names() {
        let request = ChanceRequest::new().with_die("d20", 1);
        assert!(matches!(request.normalize_strict(), Err(DiceError::UnknownDie(_))));

        let request = ChanceRequest::new().with_symbol("Glory", 1);
        assert!(matches!(request.normalize_strict(), Err(DiceError::UnknownSymbol(_))));

        let request = ChanceRequest::new().with_criteria("MAGIC");
        assert!(matches!(request.normalize_strict(), Err(DiceError::UnknownCriterion(_))));
    }

    #[test]
    fn strict_normalization_keeps_zero_impact_defaults() {
        let request = ChanceRequest::new().with_die("Boost", 0).with_symbol("Threat", 0);
        let normalized = request.normalize_strict().unwrap();
        assert!(normalized.pool.is_empty());
        assert!(normalized.extra.is_empty());
        assert_eq!(normalized.criterion, Criterion::Success);
    }

    #[test]
    fn denominations_are_accepted_as_names() {
        let request = ChanceRequest::new().with_die("p", 2).with_symbol("t", 1);
        let normalized = request.normalize_strict().unwrap();
        assert_eq!(normalized.pool.get(Die::Proficiency), 2);
        assert_eq!(normalized.extra.get(Symbol::Triumph), 1);
    }

    #[test]
    fn repeated_die_names_saturate_on_the_permissive_path() {
        let request = ChanceRequest::new()
            .with_die("Ability", i64::from(u32::MAX))
            .with_die("a", 1);
        let normalized = request.normalize();
        assert_eq!(normalized.pool.get(Die::Ability), u32::MAX);
        assert_eq!(normalized.pool.total_permutations(), None);
    }

    #[test]
    fn repeated_die_names_overflow_on_the_strict_path() {
        let request = ChanceRequest::new()
            .with_die("Ability", i64::from(u32::MAX))
            .with_die("a", 1);
        assert!(matches!(request.normalize_strict(), Err(DiceError::InvalidPool(_))));
    }

    #[test]
    fn builder_counts_saturate() {
        let request = ChanceRequest::new()
            .with_symbol("Success", i64::MAX)
            .with_symbol("Success", 1);
        assert_eq!(request.extra_symbols["Success"], i64::MAX);
    }
}
