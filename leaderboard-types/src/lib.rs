pub mod leaderboard;
pub mod player;

// Re-export all types
pub use leaderboard::*;
pub use player::*;
