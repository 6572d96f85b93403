pub mod chance;
pub mod dist;
pub mod faces;
pub mod query;
pub mod roll;

use nd_engine::{DicePool, Evaluation, Symbol, SymbolCounts};

/// Parse pool notation, rejecting unknown dice.
fn parse_pool(notation: &str) -> Result<DicePool, String> {
    notation.parse().map_err(|e| format!("{e}"))
}

/// Parse extra-symbol notation, rejecting unknown symbols.
fn parse_symbols(notation: &str) -> Result<SymbolCounts, String> {
    notation.parse().map_err(|e| format!("{e}"))
}

/// Human-readable pool, e.g. `2 Ability, 1 Difficulty`.
fn describe_pool(pool: &DicePool) -> String {
    if pool.is_empty() {
        return "no dice".to_string();
    }
    pool.iter()
        .map(|(die, count)| format!("{count} {die}"))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Human-readable net result listing only the symbols left over.
fn describe_net(net: &Evaluation) -> String {
    let parts: Vec<String> = Symbol::ALL
        .iter()
        .filter(|&&s| net.get(s) > 0)
        .map(|&s| format!("{} {s}", net.get(s)))
        .collect();
    if parts.is_empty() {
        "nothing".to_string()
    } else {
        parts.join(", ")
    }
}

/// Probability as a percentage with two decimals.
fn percent(chance: f64) -> String {
    format!("{:.2}%", chance * 100.0)
}
