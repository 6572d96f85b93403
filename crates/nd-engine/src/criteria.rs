//! Named success criteria: boolean predicates over an [`Evaluation`].
//!
//! Callers name criteria by string. Unknown names fall back to
//! [`Criterion::Success`] on the permissive path ([`Criterion::from_name`]);
//! [`Criterion::from_str`](std::str::FromStr) is the strict alternative.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{DiceError, EngineResult};
use crate::evaluate::Evaluation;
use crate::symbols::Symbol;

/// A registered predicate over net symbols.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Criterion {
    /// Net Success (with Triumphs folded in) is positive: the check passes.
    #[default]
    Success,
    /// The check does not pass.
    Failure,
    /// Net Advantage is positive.
    Advantage,
    /// Net Threat is positive.
    Threat,
    /// At least one Triumph.
    Triumph,
    /// At least one Despair.
    Despair,
    /// The check passes with net Advantage.
    SuccessWithAdvantage,
    /// The check passes with net Threat.
    SuccessWithThreat,
    /// The check fails with net Advantage.
    FailureWithAdvantage,
    /// The check fails with net Threat.
    FailureWithThreat,
}

impl Criterion {
    /// Every registered criterion.
    pub const ALL: [Criterion; 10] = [
        Self::Success,
        Self::Failure,
        Self::Advantage,
        Self::Threat,
        Self::Triumph,
        Self::Despair,
        Self::SuccessWithAdvantage,
        Self::SuccessWithThreat,
        Self::FailureWithAdvantage,
        Self::FailureWithThreat,
    ];

    /// The registered name, e.g. `SUCCESS_WITH_THREAT`.
    pub fn name(self) -> &'static str {
        match self {
            Self::Success => "SUCCESS",
            Self::Failure => "FAILURE",
            Self::Advantage => "ADVANTAGE",
            Self::Threat => "THREAT",
            Self::Triumph => "TRIUMPH",
            Self::Despair => "DESPAIR",
            Self::SuccessWithAdvantage => "SUCCESS_WITH_ADVANTAGE",
            Self::SuccessWithThreat => "SUCCESS_WITH_THREAT",
            Self::FailureWithAdvantage => "FAILURE_WITH_ADVANTAGE",
            Self::FailureWithThreat => "FAILURE_WITH_THREAT",
        }
    }

    /// Look up a criterion by name (case-insensitive; `-` and spaces are
    /// read as `_`).
    pub fn lookup(name: &str) -> Option<Self> {
        let wanted = name.trim().to_uppercase().replace(['-', ' '], "_");
        Self::ALL.into_iter().find(|c| c.name() == wanted)
    }

    /// Look up a criterion by name, falling back to [`Criterion::Success`].
    pub fn from_name(name: &str) -> Self {
        Self::lookup(name).unwrap_or_else(|| {
            tracing::warn!(criterion = name, "unknown criterion, using SUCCESS");
            Self::default()
        })
    }

    /// Returns true if `evaluation` satisfies this criterion.
    pub fn is_met(self, evaluation: &Evaluation) -> bool {
        let passes = evaluation.get(Symbol::Success) > 0;
        let advantage = evaluation.get(Symbol::Advantage) > 0;
        let threat = evaluation.get(Symbol::Threat) > 0;
        match self {
            Self::Success => passes,
            Self::Failure => !passes,
            Self::Advantage => advantage,
            Self::Threat => threat,
            Self::Triumph => evaluation.get(Symbol::Triumph) > 0,
            Self::Despair => evaluation.get(Symbol::Despair) > 0,
            Self::SuccessWithAdvantage => passes && advantage,
            Self::SuccessWithThreat => passes && threat,
            Self::FailureWithAdvantage => !passes && advantage,
            Self::FailureWithThreat => !passes && threat,
        }
    }
}

impl FromStr for Criterion {
    type Err = DiceError;

    fn from_str(s: &str) -> EngineResult<Self> {
        Self::lookup(s).ok_or_else(|| DiceError::UnknownCriterion(s.to_string()))
    }
}

impl std::fmt::Display for Criterion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
