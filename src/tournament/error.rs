use thiserror::Error as ThisError;
use uuid::Uuid;

use crate::models::tournament::Round;

#[derive(Debug, ThisError)]
pub enum TournamentError {
    #[error("Need 8 distinct teams to create quarterfinals, got {0}")]
    InsufficientTeams(usize),

    #[error("{round} cannot be played yet: {reason}")]
    RoundIncomplete { round: Round, reason: String },

    #[error("{round} already has an entry for these teams")]
    DuplicateRoundEntry { round: Round },

    #[error("Teams are not paired against each other in the {round}")]
    InvalidPairing { round: Round },

    #[error("Team not found: {0}")]
    InvalidTeamReference(Uuid),

    #[error("Choose two different teams")]
    SameTeam,

    #[error("Invalid team name: {0}")]
    InvalidTeamName(String),

    #[error("Unknown round: {0}")]
    UnknownRound(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl TournamentError {
    pub fn round_incomplete(round: Round, reason: impl Into<String>) -> Self {
        TournamentError::RoundIncomplete { round, reason: reason.into() }
    }
}
