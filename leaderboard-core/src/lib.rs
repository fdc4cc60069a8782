pub mod errors;
pub mod leaderboard_controller;
pub mod player_controller;

// Re-export main components
pub use errors::*;
pub use leaderboard_controller::*;
pub use player_controller::*;
