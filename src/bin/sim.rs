use broadside::{init_logging, simulate, Settings, Side};
use serde_json::json;

fn main() -> anyhow::Result<()> {
    init_logging();
    let args: Vec<String> = std::env::args().collect();
    if args.len() != 2 {
        eprintln!("Usage: {} <seed>", args[0]);
        std::process::exit(1);
    }
    let seed: u64 = args[1].parse()?;

    let summary = simulate(Settings::default(), seed)?;
    let winner = match summary.winner {
        Some(Side::A) => Some("player"),
        Some(Side::B) => Some("computer"),
        None => None,
    };

    let result = json!({
        "seed": seed,
        "state": summary.state,
        "player": {"shots": summary.shots_a},
        "computer": {"shots": summary.shots_b},
        "winner": winner,
    });

    println!("{}", serde_json::to_string(&result)?);
    Ok(())
}
