use uuid::Uuid;

use crate::models::tournament::{Match, NewMatch, NewTeam, Round, Team};
use crate::tournament::error::TournamentError;

/// Storage collaborator for the tournament.
///
/// Listings are ordered by creation time, oldest first. `create_match` must
/// reject a knockout match with `TournamentError::DuplicateRoundEntry` when
/// its round has no free slot or either team already played in that round.
/// The check and the insert happen atomically.
#[allow(async_fn_in_trait)]
pub trait TournamentStore: Send + Sync + 'static {
    async fn list_teams(&self) -> Result<Vec<Team>, TournamentError>;

    async fn find_team(&self, team_id: Uuid) -> Result<Option<Team>, TournamentError>;

    async fn create_team(&self, new_team: NewTeam) -> Result<Team, TournamentError>;

    /// All matches when `round` is `None`, otherwise only knockout matches of that round
    async fn list_matches(&self, round: Option<Round>) -> Result<Vec<Match>, TournamentError>;

    async fn create_match(&self, new_match: NewMatch) -> Result<Match, TournamentError>;

    /// Returns the number of deleted matches
    async fn delete_all_matches(&self) -> Result<u64, TournamentError>;

    /// Returns the deleted team and the number of its deleted matches,
    /// or `None` if no such team exists
    async fn delete_team_and_its_matches(
        &self,
        team_id: Uuid,
    ) -> Result<Option<(Team, u64)>, TournamentError>;
}
