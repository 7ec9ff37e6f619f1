use battle_turn_order::{BattleRules, TurnOrderResolver, TurnScenario};
use std::path::Path;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

const DEFAULT_SCENARIO: &str = "data/sample_turn.ron";
const DEFAULT_RULES: &str = "data/battle_rules.ron";

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    // Usage: battle-turn-order [scenario.ron] [rules.ron]
    let mut args = std::env::args().skip(1);
    let scenario_path = args.next().unwrap_or_else(|| DEFAULT_SCENARIO.to_string());
    // An explicit rules path must load; only a missing default file falls back.
    let rules = match args.next() {
        Some(rules_path) => BattleRules::load(Path::new(&rules_path)),
        None => BattleRules::load_or_default(Path::new(DEFAULT_RULES)),
    };
    let rules = match rules {
        Ok(rules) => rules,
        Err(e) => {
            tracing::error!("Error loading rules: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let scenario = match TurnScenario::load(Path::new(&scenario_path)) {
        Ok(scenario) => scenario,
        Err(e) => {
            tracing::error!("Error loading scenario: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let resolver = TurnOrderResolver::from_rules(&rules);
    let ranked = match resolver.rank(&scenario.context, &scenario.actions) {
        Ok(ranked) => ranked,
        Err(e) => {
            tracing::error!("Turn {} could not be ordered ({:?}): {}", scenario.context.turn_number, e.kind(), e);
            return ExitCode::FAILURE;
        }
    };

    tracing::info!(
        "Resolved {} actions for turn {}",
        ranked.len(),
        scenario.context.turn_number
    );

    match serde_json::to_string_pretty(&ranked) {
        Ok(json) => {
            println!("{}", json);
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!("Error serializing turn order: {}", e);
            ExitCode::FAILURE
        }
    }
}
