use colored::Colorize;
use comfy_table::{ContentArrangement, Table};

use nd_engine::{Criterion, DiceEngine, EngineConfig, Symbol};

pub fn run(config: EngineConfig, pool: &str, symbols: &str, outcomes: bool) -> Result<(), String> {
    let pool = super::parse_pool(pool)?;
    let extra = super::parse_symbols(symbols)?;

    let mut engine = DiceEngine::new(config);
    let dist = engine
        .distribution(&pool, &extra)
        .map_err(|e| e.to_string())?;

    // Header
    println!(
        "  {} {}",
        "Distribution".bold(),
        format!("({})", super::describe_pool(&pool)).dimmed()
    );
    println!(
        "  {} raw outcomes, {} distinct net results",
        dist.total(),
        dist.len()
    );
    if !extra.is_empty() {
        println!("  extra symbols: {extra}");
    }
    println!();

    // Criteria
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Criterion", "Chance", "Rolls"]);
    for criterion in Criterion::ALL {
        table.add_row(vec![
            criterion.name().to_string(),
            super::percent(dist.probability_of(criterion)),
            dist.count_where(criterion).to_string(),
        ]);
    }
    println!("{table}");
    println!();

    // Expectations
    println!("  {}", "Expected net symbols".bold().underline());
    for symbol in [Symbol::Success, Symbol::Advantage, Symbol::Triumph, Symbol::Despair] {
        println!("  {:<10} {:>8.3}", symbol.to_string(), dist.expected(symbol));
    }
    println!();

    if outcomes {
        let mut table = Table::new();
        table.set_content_arrangement(ContentArrangement::Dynamic);
        table.set_header(vec!["Net result", "Chance", "Rolls"]);
        for (net, count) in dist.iter() {
            table.add_row(vec![
                super::describe_net(net),
                super::percent(dist.probability(net)),
                count.to_string(),
            ]);
        }
        println!("{table}");
        println!();
    }

    Ok(())
}
