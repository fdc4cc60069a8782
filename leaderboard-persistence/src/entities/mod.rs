pub mod prelude;

pub mod leaderboards;
pub mod players;
