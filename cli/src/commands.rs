//! Command handlers for the interactive loop.

use std::sync::Arc;

use clickrush_types::formatting::format_compact;

use crate::app::{self, Shared};

pub async fn start(name: &str, seconds: u64, state: Shared) {
    let mut app = state.lock().await;
    match app.controller.start(name, seconds) {
        Ok(()) => {
            let player = app.controller.state().player_name.clone();
            app.current_player = Some(player.clone());
            app.last_shown_remaining = seconds as i64;
            app::spawn_create_user(Arc::clone(&state), player.clone());
            println!("Go, {player}! {seconds} seconds on the clock.");
        }
        Err(err) => println!("error: {err}"),
    }
}

pub async fn click(times: u64, state: Shared) {
    let mut app = state.lock().await;
    let mut last_multiplier = 1;
    for _ in 0..times.max(1) {
        match app.controller.register_click() {
            Ok(outcome) => {
                last_multiplier = outcome.multiplier;
                app::spawn_record_click(Arc::clone(&state), outcome.record);
            }
            Err(err) => {
                println!("error: {err}");
                return;
            }
        }
    }
    let snap = app.controller.snapshot();
    if last_multiplier > 1 {
        println!("clicks: {} (x{last_multiplier} active)", snap.session_clicks);
    } else {
        println!("clicks: {}", snap.session_clicks);
    }
}

pub async fn board(state: Shared) {
    let (service, player) = {
        let app = state.lock().await;
        (app.service.clone(), app.current_player.clone())
    };

    match service.leaderboard(10).await {
        Ok(fresh) => {
            state.lock().await.latest_board = fresh.clone();
            print_board(&fresh, player.as_deref());
        }
        Err(err) => {
            println!("leaderboard unavailable ({err}); showing last known");
            let cached = state.lock().await.latest_board.clone();
            print_board(&cached, player.as_deref());
        }
    }
}

pub async fn stats(name: Option<&str>, state: Shared) {
    let (service, player) = {
        let app = state.lock().await;
        (app.service.clone(), app.current_player.clone())
    };
    let Some(name) = name.map(str::to_string).or(player) else {
        println!("no player yet - start a session or pass --name");
        return;
    };

    match service.user_stats(&name).await {
        Ok(stats) => {
            println!("{}: rank #{}", stats.name, stats.rank);
            println!("  all-time: {}", format_compact(stats.total_clicks));
            println!("  today:    {}", format_compact(stats.today_clicks));
            println!("  playing since {}", stats.created_at.format("%Y-%m-%d"));
        }
        Err(err) => println!("stats unavailable: {err}"),
    }
}

pub async fn reset(state: Shared) {
    state.lock().await.controller.reset();
    println!("session cleared");
}

fn print_board(board: &[clickrush_types::LeaderboardEntry], player: Option<&str>) {
    if board.is_empty() {
        println!("no entries yet - be the first!");
        return;
    }
    for (i, entry) in board.iter().enumerate() {
        let marker = if Some(entry.name.as_str()) == player {
            "  <- you"
        } else {
            ""
        };
        println!(
            "{:>2}. {:<20} {}{marker}",
            i + 1,
            entry.name,
            format_compact(entry.total_clicks)
        );
    }
}
