//! Narrative dice pool probability engine.
//!
//! Models six dice whose faces carry six symbols that cancel and fold into
//! each other, and computes exact probabilities for mixed pools: either the
//! chance that a named criterion holds ([`DiceEngine::chance_of`]) or the full
//! distribution of net outcomes ([`DiceEngine::distribution`]). Raw outcomes
//! are grouped into memoized permutation tables so repeated and incremental
//! requests reuse earlier work.

pub mod config;
pub mod criteria;
pub mod dice;
pub mod distribution;
pub mod engine;
pub mod error;
pub mod evaluate;
mod notation;
pub mod permutations;
pub mod request;
pub mod symbols;
pub mod worker;

pub use config::EngineConfig;
pub use criteria::Criterion;
pub use dice::{DicePool, Die, DieResult, Face, RollResult};
pub use distribution::Distribution;
pub use engine::{DiceEngine, EngineStats};
pub use error::{DiceError, EngineResult};
pub use evaluate::{Evaluation, evaluate};
pub use permutations::{CacheStats, PermutationCache, PermutationTable, combine_permutations};
pub use request::{ChanceRequest, NormalizedRequest};
pub use symbols::{Symbol, SymbolCounts};
pub use worker::ChanceWorker;
