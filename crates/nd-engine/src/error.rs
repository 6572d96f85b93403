//! Error types for the dice engine.

/// Errors that can occur on the strict surfaces of the engine.
///
/// The request path itself is permissive and never fails on unknown names;
/// these errors come from notation parsing, strict normalization, size caps,
/// and the worker boundary.
#[derive(Debug, thiserror::Error)]
pub enum DiceError {
    /// A die name or denomination is not recognized.
    #[error("unknown die: {0}")]
    UnknownDie(String),

    /// A symbol name or denomination is not recognized.
    #[error("unknown symbol: {0}")]
    UnknownSymbol(String),

    /// A criterion name is not registered.
    #[error("unknown criterion: {0}")]
    UnknownCriterion(String),

    /// Compact notation could not be tokenized.
    #[error("invalid notation: {0}")]
    InvalidNotation(String),

    /// A dice pool is too large or otherwise unusable.
    #[error("invalid pool: {0}")]
    InvalidPool(String),

    /// The background worker thread could not be started.
    #[error("failed to start chance worker: {0}")]
    WorkerSpawn(#[from] std::io::Error),

    /// The background worker has shut down.
    #[error("chance worker is no longer running")]
    WorkerClosed,
}

/// Convenience result type for engine operations.
pub type EngineResult<T> = Result<T, DiceError>;
