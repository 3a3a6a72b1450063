use std::io::{self, BufRead, Write};

use broadside::{
    init_logging, rng_from_seed, simulate,
    ui::{apply_placement, coord_to_string, parse_coord, render_board, render_inventory, LEGEND},
    BotSpeed, Game, GameState, Settings, ShotOutcome, ShotReport, Side, Token,
    MAX_BOARD_DIM,
};
use clap::{builder::RangedU64ValueParser, Parser, ValueEnum};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Speed {
    Low,
    Medium,
    High,
}

impl From<Speed> for BotSpeed {
    fn from(speed: Speed) -> Self {
        match speed {
            Speed::Low => BotSpeed::Low,
            Speed::Medium => BotSpeed::Medium,
            Speed::High => BotSpeed::High,
        }
    }
}

#[derive(Parser)]
enum Commands {
    /// Play against the computer in the terminal.
    Play {
        #[arg(long, help = "Fix RNG seed for reproducible games (e.g., --seed 12345)")]
        seed: Option<u64>,
        #[arg(long, default_value_t = 10, value_parser = board_dim())]
        rows: usize,
        #[arg(long, default_value_t = 10, value_parser = board_dim())]
        cols: usize,
        #[arg(long, value_enum, default_value_t = Speed::Medium)]
        speed: Speed,
        #[arg(long, help = "Let the computer see your ships")]
        god_mode: bool,
    },
    /// Run one computer-vs-computer game and print a JSON summary.
    Sim {
        #[arg(long, default_value_t = 0)]
        seed: u64,
    },
}

fn board_dim() -> RangedU64ValueParser<usize> {
    RangedU64ValueParser::new().range(1..=MAX_BOARD_DIM as u64)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();
    let cli = Cli::parse();

    match cli.command {
        Commands::Play {
            seed,
            rows,
            cols,
            speed,
            god_mode,
        } => {
            let settings = Settings {
                rows,
                cols,
                bot_speed: speed.into(),
                god_mode,
                seed,
                ..Settings::single_play()
            };
            if let Some(s) = seed {
                println!("Using fixed seed: {} (game will be reproducible)", s);
            }
            let mut game = Game::new(settings, "Player", rng_from_seed(seed))?;
            let token = game
                .token(Side::A)
                .ok_or_else(|| anyhow::anyhow!("host seat is empty"))?;
            play(&mut game, token).await?;
        }
        Commands::Sim { seed } => {
            let summary = simulate(Settings::default(), seed)?;
            println!("{}", serde_json::to_string(&summary)?);
        }
    }
    Ok(())
}

fn prompt(msg: &str) -> io::Result<Option<String>> {
    print!("{}", msg);
    io::stdout().flush()?;
    let mut line = String::new();
    if io::stdin().lock().read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

fn print_boards(game: &Game, token: Token) -> anyhow::Result<()> {
    println!("\nYour fleet:");
    print!("{}", render_board(&game.own_view(token)?));
    println!("\nEnemy waters:");
    print!("{}", render_board(&game.rival_view(token)?));
    println!("{}", LEGEND);
    Ok(())
}

fn describe(report: &ShotReport) -> String {
    let at = coord_to_string(report.row, report.col);
    match report.outcome {
        ShotOutcome::Miss => format!("{}: miss", at),
        ShotOutcome::Hit => format!("{}: hit", at),
        ShotOutcome::Killed(_) => format!("{}: ship sunk!", at),
        ShotOutcome::Repeat => format!("{}: already fired there", at),
    }
}

async fn play(game: &mut Game, token: Token) -> anyhow::Result<()> {
    let (rows, cols) = (game.settings().rows, game.settings().cols);
    println!("Placement: `place B7 SIZE [v]`, `remove B7`, `auto`, `ready`, `show`.");

    while game.state() == GameState::Created {
        println!("Ships left: {}", render_inventory(&game.inventory(token)?));
        let Some(line) = prompt("> ")? else {
            return Ok(());
        };
        if line == "show" {
            print_boards(game, token)?;
            continue;
        }
        println!("{}", apply_placement(game, token, &line)?);
    }

    let mut bot_shots: Vec<ShotReport> = Vec::new();
    while game.state() == GameState::Started {
        if game.bot_turn_pending() {
            println!("Computer is aiming...");
            bot_shots.clear();
            game.drive_bot(&mut bot_shots).await?;
            for report in &bot_shots {
                println!("Computer fires {}", describe(report));
            }
            continue;
        }
        print_boards(game, token)?;
        let Some(line) = prompt("Your shot: ")? else {
            return Ok(());
        };
        let (row, col) = match parse_coord(&line, rows, cols) {
            Ok(c) => c,
            Err(e) => {
                println!("{}", e);
                continue;
            }
        };
        if let Some(report) = game.fire(token, row, col)? {
            println!("You fire {}", describe(&report));
        }
    }

    print_boards(game, token)?;
    if game.is_player_win(token)? {
        println!("You win!");
    } else {
        println!("The computer wins.");
    }
    Ok(())
}
