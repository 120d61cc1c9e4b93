//! Shared terminal-app state and the background loops that drive it.
//!
//! The session controller is synchronous; two tokio tasks feed it: the
//! ~100ms tick that advances the countdown, and the coarse leaderboard
//! refresh. Remote calls are spawned fire-and-forget so a slow or dead
//! server never stalls the game loop.

use std::sync::Arc;
use std::time::Duration;

use clickrush_core::{
    GameRng, HttpClickService, RecordOutcome, SessionController, SessionNotice, SessionPhase,
    SystemClock,
};
use clickrush_types::formatting::{format_clock, format_rate};
use clickrush_types::{LeaderboardEntry, RecordClickRequest};
use tokio::sync::Mutex;
use tracing::{debug, warn};

const TICK_INTERVAL_MS: u64 = 100;
const BOARD_REFRESH_SECS: u64 = 15;
const BOARD_SIZE: usize = 10;
const DEFAULT_SERVER: &str = "http://127.0.0.1:8000";

pub type Shared = Arc<Mutex<App>>;

pub struct App {
    pub controller: SessionController<SystemClock, GameRng>,
    pub service: HttpClickService,
    /// Player of the current (or most recent) session, used to
    /// highlight the leaderboard and default the stats lookup.
    pub current_player: Option<String>,
    /// Last board fetched by the refresh loop, shown when a live fetch
    /// fails.
    pub latest_board: Vec<LeaderboardEntry>,
    /// Last whole second printed by the countdown, to avoid spamming
    /// a line per tick.
    pub last_shown_remaining: i64,
}

impl App {
    pub fn new() -> Self {
        let base_url =
            std::env::var("CLICKRUSH_SERVER").unwrap_or_else(|_| DEFAULT_SERVER.to_string());
        Self {
            controller: SessionController::new(SystemClock, GameRng::new()),
            service: HttpClickService::new(base_url),
            current_player: None,
            latest_board: Vec::new(),
            last_shown_remaining: 0,
        }
    }
}

/// Drive the session tick and print whatever the state machine emits.
pub fn spawn_tick_loop(shared: Shared) {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_millis(TICK_INTERVAL_MS));
        loop {
            interval.tick().await;
            let mut app = shared.lock().await;
            app.controller.tick();

            if app.controller.phase() == SessionPhase::Active {
                let snap = app.controller.snapshot();
                if snap.remaining_secs != app.last_shown_remaining && snap.remaining_secs > 0 {
                    app.last_shown_remaining = snap.remaining_secs;
                    println!(
                        "  {} | {} clicks | {}",
                        format_clock(snap.remaining_secs),
                        snap.session_clicks,
                        format_rate(snap.session_clicks, snap.elapsed_secs as f64)
                    );
                }
            }

            let mut session_over = false;
            for notice in app.controller.take_notices() {
                print_notice(&notice);
                if matches!(notice, SessionNotice::SessionEnded { .. }) {
                    session_over = true;
                }
            }
            if session_over {
                // Back to name entry; the all-time counter survives.
                app.controller.reset();
                println!("type 'start' to play again");
            }
        }
    });
}

/// Coarse leaderboard poll, independent of session state.
pub fn spawn_board_refresh(shared: Shared) {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_secs(BOARD_REFRESH_SECS));
        loop {
            interval.tick().await;
            let service = shared.lock().await.service.clone();
            match service.leaderboard(BOARD_SIZE).await {
                Ok(board) => {
                    debug!(entries = board.len(), "leaderboard refreshed");
                    shared.lock().await.latest_board = board;
                }
                Err(err) => debug!(%err, "leaderboard refresh failed"),
            }
        }
    });
}

/// Send one click record in the background. Rate limiting feeds back
/// into the controller as a one-time notice; transport failures are
/// logged and swallowed.
pub fn spawn_record_click(shared: Shared, record: RecordClickRequest) {
    tokio::spawn(async move {
        let service = shared.lock().await.service.clone();
        match service.record_click(&record).await {
            Ok(RecordOutcome::Recorded(_)) => {}
            Ok(RecordOutcome::RateLimited(message)) => {
                shared.lock().await.controller.note_rate_limited(&message);
            }
            Err(err) => warn!(%err, "click not recorded remotely"),
        }
    });
}

/// Ensure the player exists on the server. Idempotent; failure only
/// means the remote ledger may lag behind.
pub fn spawn_create_user(shared: Shared, name: String) {
    tokio::spawn(async move {
        let service = shared.lock().await.service.clone();
        if let Err(err) = service.create_user(&name).await {
            warn!(%err, player = %name, "could not register player remotely");
        }
    });
}

fn print_notice(notice: &SessionNotice) {
    match notice {
        SessionNotice::PowerUpActivated { kind } => {
            println!("*** POWER-UP: {}! ***", kind.label());
        }
        SessionNotice::PowerUpExpired { kind } => {
            println!("    {} wore off", kind.label());
        }
        SessionNotice::RateLimited { message } => {
            println!("warning: {message} (click still counted locally)");
        }
        SessionNotice::SessionEnded {
            session_clicks,
            average_cps,
        } => {
            println!("TIME! {session_clicks} clicks, {average_cps:.2}/s average");
        }
    }
}
