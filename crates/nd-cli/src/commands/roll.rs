use colored::Colorize;
use rand::SeedableRng;
use rand::rngs::StdRng;

use nd_engine::{Criterion, EngineConfig};

pub fn run(
    config: EngineConfig,
    pool: &str,
    symbols: &str,
    seed: Option<u64>,
) -> Result<(), String> {
    let pool = super::parse_pool(pool)?;
    let extra = super::parse_symbols(symbols)?;
    if pool.is_empty() {
        return Err("nothing to roll: the pool is empty".into());
    }
    config.check_pool(&pool).map_err(|e| e.to_string())?;

    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    let roll = pool.roll(&mut rng);

    println!("  {} {}", "Roll".bold(), format!("({})", super::describe_pool(&pool)).dimmed());
    for result in &roll.dice {
        let shown = match result.face() {
            Some(face) if face.is_blank() => "blank".dimmed().to_string(),
            Some(face) => face
                .symbols()
                .iter()
                .map(|s| s.to_string())
                .collect::<Vec<_>>()
                .join(" + "),
            None => "?".to_string(),
        };
        println!("  {:<12} {shown}", result.die.to_string());
    }
    if !extra.is_empty() {
        println!("  {:<12} {extra}", "extra");
    }
    println!();

    let net = roll.evaluate(&extra);
    let verdict = if Criterion::Success.is_met(&net) {
        "SUCCESS".green().bold()
    } else {
        "FAILURE".red().bold()
    };
    println!("  {verdict}  {}", super::describe_net(&net));

    Ok(())
}
