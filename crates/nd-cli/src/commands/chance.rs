use colored::Colorize;

use nd_engine::{Criterion, DiceEngine, EngineConfig};

pub fn run(config: EngineConfig, pool: &str, symbols: &str, criteria: &str) -> Result<(), String> {
    let pool = super::parse_pool(pool)?;
    let extra = super::parse_symbols(symbols)?;
    let criterion = Criterion::from_name(criteria);

    let mut engine = DiceEngine::new(config);
    let chance = engine
        .chance_of(&pool, &extra, criterion)
        .map_err(|e| e.to_string())?;

    println!(
        "  {} {}",
        criterion.name().bold(),
        format!("({})", super::describe_pool(&pool)).dimmed()
    );
    if !extra.is_empty() {
        println!("  extra symbols: {extra}");
    }
    println!("  chance: {chance:.4} ({})", super::percent(chance));

    Ok(())
}
