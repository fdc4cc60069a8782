use leaderboard_persistence::StoreError;

#[derive(Debug, thiserror::Error)]
pub enum PlayerControllerError {
    #[error("player name must not be empty")]
    InvalidName,

    #[error("player name already taken: {name}")]
    NameTaken { name: String },

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl PlayerControllerError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Store(err) if err.is_not_found())
    }
}
