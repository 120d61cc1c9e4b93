mod app;
mod commands;

use std::io::Write;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use app::App;

#[tokio::main]
async fn main() -> Result<(), String> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let state = Arc::new(tokio::sync::Mutex::new(App::new()));
    app::spawn_tick_loop(Arc::clone(&state));
    app::spawn_board_refresh(Arc::clone(&state));

    println!("clickrush - 'start --name <you> --seconds <10|30|60>' to play, 'exit' to quit");

    loop {
        let line = readline()?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        match respond(line, Arc::clone(&state)).await {
            Ok(quit) => {
                if quit {
                    break;
                }
            }
            Err(err) => {
                write!(std::io::stdout(), "{err}").map_err(|e| e.to_string())?;
                std::io::stdout().flush().map_err(|e| e.to_string())?;
            }
        }
    }

    Ok(())
}

#[derive(Parser)]
#[command(version, about = "click challenge")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Begin a timed session.
    Start {
        #[arg(short, long)]
        name: String,
        #[arg(short, long, default_value_t = 30)]
        seconds: u64,
    },
    /// Click! Repeat with --times.
    Click {
        #[arg(short, long, default_value_t = 1)]
        times: u64,
    },
    /// Show the leaderboard.
    Board,
    /// Show remote stats for a player (defaults to the current one).
    Stats {
        #[arg(short, long)]
        name: Option<String>,
    },
    /// Abandon the current session.
    Reset,
    Exit,
}

async fn respond(line: &str, state: app::Shared) -> Result<bool, String> {
    let mut args = shlex::split(line).ok_or("error: Invalid quoting")?;
    args.insert(0, "clickrush".to_string());
    let cli = Cli::try_parse_from(args).map_err(|e| e.to_string())?;

    match &cli.command {
        Some(Commands::Start { name, seconds }) => {
            commands::start(name, *seconds, Arc::clone(&state)).await
        }
        Some(Commands::Click { times }) => commands::click(*times, Arc::clone(&state)).await,
        Some(Commands::Board) => commands::board(Arc::clone(&state)).await,
        Some(Commands::Stats { name }) => {
            commands::stats(name.as_deref(), Arc::clone(&state)).await
        }
        Some(Commands::Reset) => commands::reset(Arc::clone(&state)).await,
        Some(Commands::Exit) => {
            println!("bye");
            return Ok(true);
        }
        None => {}
    }
    Ok(false)
}

fn readline() -> Result<String, String> {
    write!(std::io::stdout(), "> ").map_err(|e| e.to_string())?;
    std::io::stdout().flush().map_err(|e| e.to_string())?;
    let mut buffer = String::new();
    std::io::stdin()
        .read_line(&mut buffer)
        .map_err(|e| e.to_string())?;
    Ok(buffer)
}
