use std::sync::{Arc, Mutex, MutexGuard};

use chrono::Utc;
use uuid::Uuid;

use aafl_backend::db::TournamentStore;
use aafl_backend::models::tournament::{Match, NewMatch, NewTeam, Round, Team};
use aafl_backend::tournament::TournamentError;

#[derive(Default)]
struct Tables {
    teams: Vec<Team>,
    matches: Vec<Match>,
}

/// In-memory `TournamentStore` with the same uniqueness and reference rules
/// as the Postgres schema. Clones share state.
#[derive(Clone, Default)]
pub struct MemoryStore {
    tables: Arc<Mutex<Tables>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn match_count(&self) -> usize {
        self.lock().matches.len()
    }

    pub fn team_count(&self) -> usize {
        self.lock().teams.len()
    }

    /// Append a match as is, skipping the round checks, to stand in for rows
    /// that reached the table before those checks existed
    pub fn insert_unchecked(&self, recorded: Match) {
        self.lock().matches.push(recorded);
    }

    fn lock(&self) -> MutexGuard<'_, Tables> {
        self.tables.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl TournamentStore for MemoryStore {
    async fn list_teams(&self) -> Result<Vec<Team>, TournamentError> {
        Ok(self.lock().teams.clone())
    }

    async fn find_team(&self, team_id: Uuid) -> Result<Option<Team>, TournamentError> {
        Ok(self.lock().teams.iter().find(|team| team.id == team_id).cloned())
    }

    async fn create_team(&self, new_team: NewTeam) -> Result<Team, TournamentError> {
        let team = Team {
            id: Uuid::new_v4(),
            team_name: new_team.team_name,
            federation: new_team.federation,
            created_at: Utc::now(),
        };
        self.lock().teams.push(team.clone());
        Ok(team)
    }

    async fn list_matches(&self, round: Option<Round>) -> Result<Vec<Match>, TournamentError> {
        let tables = self.lock();
        Ok(tables
            .matches
            .iter()
            .filter(|m| round.is_none() || m.round == round)
            .cloned()
            .collect())
    }

    async fn create_match(&self, new_match: NewMatch) -> Result<Match, TournamentError> {
        let mut tables = self.lock();

        for team_id in [new_match.team_a, new_match.team_b] {
            if !tables.teams.iter().any(|team| team.id == team_id) {
                return Err(TournamentError::InvalidTeamReference(team_id));
            }
        }

        if let Some(round) = new_match.round {
            let played: Vec<&Match> = tables.matches.iter().filter(|m| m.round == Some(round)).collect();
            let team_taken = played
                .iter()
                .any(|m| m.involves(new_match.team_a) || m.involves(new_match.team_b));
            if team_taken || played.len() >= round.expected_matches() {
                return Err(TournamentError::DuplicateRoundEntry { round });
            }
        }

        let recorded = Match {
            id: Uuid::new_v4(),
            team_a: new_match.team_a,
            team_b: new_match.team_b,
            score_a: new_match.score_a,
            score_b: new_match.score_b,
            goals: new_match.goals,
            commentary: new_match.commentary,
            result_type: new_match.result_type,
            winner: new_match.winner,
            round: new_match.round,
            created_at: Utc::now(),
        };
        tables.matches.push(recorded.clone());
        Ok(recorded)
    }

    async fn delete_all_matches(&self) -> Result<u64, TournamentError> {
        let mut tables = self.lock();
        let deleted = tables.matches.len() as u64;
        tables.matches.clear();
        Ok(deleted)
    }

    async fn delete_team_and_its_matches(
        &self,
        team_id: Uuid,
    ) -> Result<Option<(Team, u64)>, TournamentError> {
        let mut tables = self.lock();
        let Some(position) = tables.teams.iter().position(|team| team.id == team_id) else {
            return Ok(None);
        };

        let team = tables.teams.remove(position);
        let before = tables.matches.len();
        tables.matches.retain(|m| !m.involves(team_id));
        let deleted = (before - tables.matches.len()) as u64;

        Ok(Some((team, deleted)))
    }
}
