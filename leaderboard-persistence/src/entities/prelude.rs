pub use super::leaderboards::Entity as Leaderboards;
pub use super::players::Entity as Players;
