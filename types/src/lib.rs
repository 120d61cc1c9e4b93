pub mod api;
pub mod formatting;
pub mod powerup;

// Re-exports for convenience
pub use api::{
    ClickResponse, CreateUserRequest, LeaderboardEntry, RecordClickRequest, UserResponse,
    UserStats,
};
pub use powerup::PowerUpKind;
