use std::{env, fmt::Display, str::FromStr};

use tracing::{info, warn};

pub struct Config {
    pub port: u16,
    /// Number of most recent clicks inspected by the anti-cheat check.
    pub rate_limit_clicks: usize,
    /// Rejection window: if the oldest of those clicks is younger than
    /// this, the new click is refused.
    pub rate_limit_window_ms: i64,
    pub leaderboard_default_limit: usize,
}

impl Config {
    pub fn load() -> Self {
        Self {
            port: try_load("CLICKRUSH_PORT", "8000"),
            rate_limit_clicks: try_load("CLICKRUSH_RATE_LIMIT_CLICKS", "5"),
            rate_limit_window_ms: try_load("CLICKRUSH_RATE_LIMIT_WINDOW_MS", "500"),
            leaderboard_default_limit: try_load("CLICKRUSH_LEADERBOARD_LIMIT", "10"),
        }
    }
}

fn var(key: &str) -> Result<String, ()> {
    env::var(key).map_err(|_| {
        warn!("Environment variable {key} not found, using default");
    })
}

fn try_load<T: FromStr>(key: &str, default: &str) -> T
where
    T::Err: Display,
{
    var(key)
        .unwrap_or_else(|_| {
            info!("{key} not set, using default: {default}");
            default.to_string()
        })
        .parse()
        .map_err(|e| {
            warn!("Invalid {key} value: {e}");
        })
        .expect("Environment misconfigured!")
}
