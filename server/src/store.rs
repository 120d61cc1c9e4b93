//! In-memory system of record for users and clicks.
//!
//! Pure storage plus the queries the handlers need; all methods take
//! explicit timestamps so the rate-limit window and the stats queries
//! are testable without HTTP or a real clock. Persistence across
//! restarts is out of scope.

use std::collections::{HashMap, VecDeque};

use chrono::{DateTime, Utc};
use clickrush_types::{ClickResponse, LeaderboardEntry, UserResponse, UserStats};

/// Recent-click log cap. Old entries age out of the rate-limit and
/// "today" queries long before this bound matters.
const CLICK_LOG_CAPACITY: usize = 100_000;

/// Anti-cheat policy: reject a click when the user's
/// `threshold`-most-recent click is younger than `window_ms`.
#[derive(Debug, Clone, Copy)]
pub struct RateLimitPolicy {
    pub threshold: usize,
    pub window_ms: i64,
}

impl Default for RateLimitPolicy {
    fn default() -> Self {
        Self {
            threshold: 5,
            window_ms: 500,
        }
    }
}

/// Why a click was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickRejection {
    UnknownUser,
    RateLimited,
}

#[derive(Debug, Clone)]
struct UserRecord {
    id: u64,
    name: String,
    total_clicks: u64,
    created_at: DateTime<Utc>,
}

impl UserRecord {
    fn response(&self) -> UserResponse {
        UserResponse {
            id: self.id,
            name: self.name.clone(),
            total_clicks: self.total_clicks,
        }
    }
}

#[derive(Debug, Clone)]
struct StoredClick {
    id: u64,
    user_name: String,
    timestamp: DateTime<Utc>,
}

impl StoredClick {
    fn response(&self) -> ClickResponse {
        ClickResponse {
            id: self.id,
            user_name: self.user_name.clone(),
            timestamp: self.timestamp,
        }
    }
}

#[derive(Debug)]
pub struct ClickStore {
    policy: RateLimitPolicy,
    users: HashMap<String, UserRecord>,
    clicks: VecDeque<StoredClick>,
    next_user_id: u64,
    next_click_id: u64,
}

impl ClickStore {
    pub fn new(policy: RateLimitPolicy) -> Self {
        Self {
            policy,
            users: HashMap::new(),
            clicks: VecDeque::new(),
            next_user_id: 1,
            next_click_id: 1,
        }
    }

    /// Create a user, or return the existing record for a duplicate
    /// name. Never fails for an existing name.
    pub fn create_user(&mut self, name: &str, now: DateTime<Utc>) -> UserResponse {
        if let Some(existing) = self.users.get(name) {
            return existing.response();
        }
        let record = UserRecord {
            id: self.next_user_id,
            name: name.to_string(),
            total_clicks: 0,
            created_at: now,
        };
        self.next_user_id += 1;
        let response = record.response();
        self.users.insert(name.to_string(), record);
        response
    }

    pub fn users(&self) -> Vec<UserResponse> {
        let mut all: Vec<_> = self.users.values().map(UserRecord::response).collect();
        all.sort_by_key(|u| u.id);
        all
    }

    /// Record one click, incrementing the user's persisted total by
    /// exactly 1. `clicked_at` is the client-reported time that gets
    /// stored; `now` is the server receive time used for the rate
    /// check.
    pub fn record_click(
        &mut self,
        user_name: &str,
        clicked_at: DateTime<Utc>,
        now: DateTime<Utc>,
    ) -> Result<ClickResponse, ClickRejection> {
        if !self.users.contains_key(user_name) {
            return Err(ClickRejection::UnknownUser);
        }
        if self.is_rate_limited(user_name, now) {
            return Err(ClickRejection::RateLimited);
        }

        let click = StoredClick {
            id: self.next_click_id,
            user_name: user_name.to_string(),
            timestamp: clicked_at,
        };
        self.next_click_id += 1;
        let response = click.response();
        self.clicks.push_back(click);
        self.trim_click_log();

        if let Some(user) = self.users.get_mut(user_name) {
            user.total_clicks += 1;
        }
        Ok(response)
    }

    fn is_rate_limited(&self, user_name: &str, now: DateTime<Utc>) -> bool {
        let mut recent = self
            .clicks
            .iter()
            .rev()
            .filter(|c| c.user_name == user_name)
            .take(self.policy.threshold);
        let Some(oldest_recent) = recent.nth(self.policy.threshold.saturating_sub(1)) else {
            return false;
        };
        (now - oldest_recent.timestamp).num_milliseconds() < self.policy.window_ms
    }

    fn trim_click_log(&mut self) {
        while self.clicks.len() > CLICK_LOG_CAPACITY {
            self.clicks.pop_front();
        }
    }

    /// Most recent clicks, newest first.
    pub fn recent_clicks(&self, limit: usize) -> Vec<ClickResponse> {
        self.clicks
            .iter()
            .rev()
            .take(limit)
            .map(StoredClick::response)
            .collect()
    }

    /// Top users by total clicks, descending. Empty when no one has
    /// registered yet.
    pub fn leaderboard(&self, limit: usize) -> Vec<LeaderboardEntry> {
        let mut entries: Vec<_> = self
            .users
            .values()
            .map(|u| LeaderboardEntry {
                name: u.name.clone(),
                total_clicks: u.total_clicks,
            })
            .collect();
        // Name tie-break keeps the ordering stable for equal totals.
        entries.sort_by(|a, b| {
            b.total_clicks
                .cmp(&a.total_clicks)
                .then_with(|| a.name.cmp(&b.name))
        });
        entries.truncate(limit);
        entries
    }

    /// Per-user stats: rank (1 + users with strictly more clicks) and
    /// clicks since midnight UTC.
    pub fn stats(&self, user_name: &str, now: DateTime<Utc>) -> Option<UserStats> {
        let user = self.users.get(user_name)?;
        let rank = 1 + self
            .users
            .values()
            .filter(|u| u.total_clicks > user.total_clicks)
            .count() as u64;
        let midnight = now
            .date_naive()
            .and_hms_opt(0, 0, 0)
            .map(|t| t.and_utc())
            .unwrap_or(now);
        let today_clicks = self
            .clicks
            .iter()
            .filter(|c| c.user_name == user_name && c.timestamp >= midnight)
            .count() as u64;
        Some(UserStats {
            name: user.name.clone(),
            total_clicks: user.total_clicks,
            rank,
            today_clicks,
            created_at: user.created_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn at(ms: i64) -> DateTime<Utc> {
        Utc.timestamp_millis_opt(1_700_000_000_000 + ms).unwrap()
    }

    fn store() -> ClickStore {
        ClickStore::new(RateLimitPolicy::default())
    }

    #[test]
    fn create_user_is_idempotent() {
        let mut s = store();
        let first = s.create_user("Ada", at(0));
        let second = s.create_user("Ada", at(1_000));
        assert_eq!(first.id, second.id);
        assert_eq!(s.users().len(), 1);
    }

    #[test]
    fn click_for_unknown_user_is_rejected() {
        let mut s = store();
        assert_eq!(
            s.record_click("Nobody", at(0), at(0)),
            Err(ClickRejection::UnknownUser)
        );
    }

    #[test]
    fn rate_limit_trips_on_sixth_rapid_click() {
        let mut s = store();
        s.create_user("Ada", at(0));
        for i in 0..5 {
            s.record_click("Ada", at(i * 50), at(i * 50)).unwrap();
        }
        // Sixth click 250ms after the first: the 5th-most-recent click
        // is only 250ms old.
        assert_eq!(
            s.record_click("Ada", at(250), at(250)),
            Err(ClickRejection::RateLimited)
        );
        // Rejected clicks do not count.
        assert_eq!(s.stats("Ada", at(250)).unwrap().total_clicks, 5);

        // Once the window has passed, clicking resumes.
        assert!(s.record_click("Ada", at(800), at(800)).is_ok());
    }

    #[test]
    fn rate_limit_is_per_user() {
        let mut s = store();
        s.create_user("Ada", at(0));
        s.create_user("Grace", at(0));
        for i in 0..5 {
            s.record_click("Ada", at(i * 10), at(i * 10)).unwrap();
        }
        assert_eq!(
            s.record_click("Ada", at(60), at(60)),
            Err(ClickRejection::RateLimited)
        );
        assert!(s.record_click("Grace", at(60), at(60)).is_ok());
    }

    #[test]
    fn leaderboard_orders_descending_and_truncates() {
        let mut s = store();
        for (name, clicks) in [("Ada", 3), ("Grace", 5), ("Edsger", 1)] {
            s.create_user(name, at(0));
            for i in 0..clicks {
                s.record_click(name, at(i * 1_000), at(i * 1_000)).unwrap();
            }
        }
        let board = s.leaderboard(2);
        assert_eq!(board.len(), 2);
        assert_eq!(board[0].name, "Grace");
        assert_eq!(board[0].total_clicks, 5);
        assert_eq!(board[1].name, "Ada");
    }

    #[test]
    fn empty_leaderboard_is_a_valid_result() {
        let s = store();
        assert!(s.leaderboard(10).is_empty());
    }

    #[test]
    fn stats_compute_rank_and_today_clicks() {
        let mut s = store();
        s.create_user("Ada", at(0));
        s.create_user("Grace", at(0));
        s.record_click("Grace", at(0), at(0)).unwrap();
        s.record_click("Grace", at(1_000), at(1_000)).unwrap();

        // One click well before today's midnight, one after.
        let yesterday = at(0) - chrono::Duration::days(1);
        s.record_click("Ada", yesterday, at(2_000)).unwrap();
        s.record_click("Ada", at(3_000), at(3_000)).unwrap();

        let ada = s.stats("Ada", at(3_000)).unwrap();
        assert_eq!(ada.total_clicks, 2);
        assert_eq!(ada.rank, 1); // tied with Grace: nobody strictly ahead
        assert_eq!(ada.today_clicks, 1);

        assert!(s.stats("Nobody", at(0)).is_none());
    }
}
