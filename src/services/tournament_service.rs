use std::collections::HashSet;

use rand::Rng;
use uuid::Uuid;

use crate::db::store::TournamentStore;
use crate::models::bracket::{
    BracketResponse, BracketRounds, BracketStage, DashboardSummary, FinalHistoryEntry, RoundView,
    TournamentStatusResponse,
};
use crate::models::standings::{StandingsRow, TeamAnalytics, TopScorersResponse};
use crate::models::tournament::{
    Match, MatchWithTeams, NewTeam, Pairing, PairingWithTeams, PlayMatchRequest, Round, Team, TeamSummary,
};
use crate::services::commentary_service::CommentaryService;
use crate::tournament::error::TournamentError;
use crate::tournament::directory::TeamDirectory;
use crate::tournament::{analytics, bracket, history, pairing, resolver, scorers, standings, BRACKET_SIZE};

const MAX_TEAM_NAME_LENGTH: usize = 100;

/// How a knockout match is played
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayMode {
    /// Outcome plus generated commentary
    WithCommentary,
    /// Outcome only
    Quick,
}

/// Request-scoped orchestration of the tournament: loads the current log
/// from the store, runs the engine and persists results.
///
/// Holds no tournament state of its own.
pub struct TournamentService<S: TournamentStore> {
    store: S,
    commentary: CommentaryService,
}

impl<S: TournamentStore> TournamentService<S> {
    pub fn new(store: S, commentary: CommentaryService) -> Self {
        Self { store, commentary }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub async fn list_teams(&self) -> Result<Vec<Team>, TournamentError> {
        let mut teams = self.store.list_teams().await?;
        teams.sort_by(|x, y| x.team_name.cmp(&y.team_name));
        Ok(teams)
    }

    pub async fn find_team(&self, team_id: Uuid) -> Result<Option<Team>, TournamentError> {
        self.store.find_team(team_id).await
    }

    pub async fn register_team(
        &self,
        team_name: &str,
        federation: Option<&str>,
    ) -> Result<Team, TournamentError> {
        let team_name = sanitize(team_name);
        if team_name.is_empty() {
            return Err(TournamentError::InvalidTeamName("Team name cannot be empty".to_string()));
        }
        if team_name.chars().count() > MAX_TEAM_NAME_LENGTH {
            return Err(TournamentError::InvalidTeamName(format!(
                "Team name too long (max {} characters)",
                MAX_TEAM_NAME_LENGTH
            )));
        }

        let federation = federation.map(sanitize).filter(|f| !f.is_empty());

        self.store
            .create_team(NewTeam { team_name, federation })
            .await
    }

    /// Delete a team together with every match it played in
    pub async fn delete_team(&self, team_id: Uuid) -> Result<(Team, u64), TournamentError> {
        self.store
            .delete_team_and_its_matches(team_id)
            .await?
            .ok_or(TournamentError::InvalidTeamReference(team_id))
    }

    /// Wipe the match log. Teams are kept, so the bracket returns to
    /// `waiting` or `ready`.
    pub async fn restart(&self) -> Result<u64, TournamentError> {
        let deleted = self.store.delete_all_matches().await?;
        tracing::info!("Tournament restarted, {} matches removed", deleted);
        Ok(deleted)
    }

    pub async fn dashboard(&self) -> Result<DashboardSummary, TournamentError> {
        let teams = self.store.list_teams().await?;
        let matches = self.store.list_matches(None).await?;
        let federations: HashSet<&str> = teams
            .iter()
            .filter_map(|team| team.federation.as_deref())
            .collect();

        Ok(DashboardSummary {
            team_count: teams.len(),
            match_count: matches.len(),
            federation_count: federations.len(),
        })
    }

    pub async fn bracket_status(&self) -> Result<TournamentStatusResponse, TournamentError> {
        let teams = self.list_teams().await?;
        let matches = self.store.list_matches(None).await?;

        let status = bracket::compute_bracket_status(teams.len(), &matches);
        let directory = TeamDirectory::new(&teams);
        let champion_name = status.champion.map(|id| directory.name(id));

        Ok(TournamentStatusResponse {
            status,
            champion_name,
            teams: teams.iter().map(TeamSummary::from).collect(),
        })
    }

    /// Draw the quarterfinals from the first eight registered teams
    pub async fn quarterfinal_pairings<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
    ) -> Result<Vec<PairingWithTeams>, TournamentError> {
        let teams = self.store.list_teams().await?;
        let entrants: Vec<Team> = teams.iter().take(BRACKET_SIZE).cloned().collect();
        let pairings = pairing::quarterfinal_pairings(&entrants, rng)?;

        let directory = TeamDirectory::new(&teams);
        Ok(pairings.iter().map(|p| directory.pairing(p)).collect())
    }

    pub async fn semifinal_pairings(&self) -> Result<Vec<PairingWithTeams>, TournamentError> {
        let quarterfinals = self.store.list_matches(Some(Round::Quarterfinal)).await?;
        let pairings = pairing::semifinal_pairings(&quarterfinals)?;

        let teams = self.store.list_teams().await?;
        let directory = TeamDirectory::new(&teams);
        Ok(pairings.iter().map(|p| directory.pairing(p)).collect())
    }

    pub async fn final_pairing(&self) -> Result<PairingWithTeams, TournamentError> {
        let semifinals = self.store.list_matches(Some(Round::Semifinal)).await?;
        let pairing = pairing::final_pairing(&semifinals)?;

        let teams = self.store.list_teams().await?;
        Ok(TeamDirectory::new(&teams).pairing(&pairing))
    }

    /// Play a knockout match and record it under its round.
    ///
    /// Nothing is written unless the round accepts the entry and the
    /// resolver has produced a complete result.
    #[tracing::instrument(
        name = "Play knockout match",
        skip(self, request, rng),
        fields(team_a = %request.team_a_id, team_b = %request.team_b_id)
    )]
    pub async fn play_match<R: Rng + ?Sized>(
        &self,
        request: &PlayMatchRequest,
        mode: PlayMode,
        rng: &mut R,
    ) -> Result<MatchWithTeams, TournamentError> {
        let round = request.round.unwrap_or(Round::Quarterfinal);
        let (team_a, team_b) = self.load_opponents(request.team_a_id, request.team_b_id).await?;

        let teams = self.store.list_teams().await?;
        let matches = self.store.list_matches(None).await?;
        bracket::validate_round_entry(round, teams.len(), &matches, team_a.id, team_b.id)?;

        if round == Round::Quarterfinal {
            let entrants: HashSet<Uuid> = teams.iter().take(BRACKET_SIZE).map(|team| team.id).collect();
            if !entrants.contains(&team_a.id) || !entrants.contains(&team_b.id) {
                return Err(TournamentError::InvalidPairing { round });
            }
        }

        let result = match mode {
            PlayMode::WithCommentary => {
                resolver::resolve_with_commentary(&team_a, &team_b, rng, &self.commentary).await
            }
            PlayMode::Quick => resolver::resolve(&team_a, &team_b, rng),
        };

        let recorded = self.store.create_match(result.into_new_match(Some(round))).await?;

        tracing::info!(
            "{}: {} {} - {} {} ({})",
            round, team_a.team_name, recorded.score_a, recorded.score_b, team_b.team_name, recorded.result_type
        );

        Ok(TeamDirectory::new(&teams).match_with_teams(&recorded))
    }

    /// Simulate a league fixture outside the bracket; draws are kept as draws
    pub async fn simulate_league_fixture<R: Rng + ?Sized>(
        &self,
        team_a_id: Uuid,
        team_b_id: Uuid,
        rng: &mut R,
    ) -> Result<MatchWithTeams, TournamentError> {
        let (team_a, team_b) = self.load_opponents(team_a_id, team_b_id).await?;

        let result = resolver::simulate_league_fixture(&team_a, &team_b, rng);
        let recorded = self.store.create_match(result.into_new_match(None)).await?;

        let teams = [team_a, team_b];
        Ok(TeamDirectory::new(&teams).match_with_teams(&recorded))
    }

    /// All matches, newest first
    pub async fn recent_matches(&self) -> Result<Vec<MatchWithTeams>, TournamentError> {
        let teams = self.store.list_teams().await?;
        let matches = self.store.list_matches(None).await?;
        let directory = TeamDirectory::new(&teams);

        Ok(matches.iter().rev().map(|m| directory.match_with_teams(m)).collect())
    }

    /// Matches of one round in the order they were played
    pub async fn matches_for_round(&self, round: Round) -> Result<Vec<MatchWithTeams>, TournamentError> {
        let teams = self.store.list_teams().await?;
        let matches = self.store.list_matches(Some(round)).await?;
        let directory = TeamDirectory::new(&teams);

        Ok(matches.iter().map(|m| directory.match_with_teams(m)).collect())
    }

    pub async fn league_table(&self) -> Result<Vec<StandingsRow>, TournamentError> {
        let (teams, matches) = self.snapshot().await?;
        Ok(standings::compute_league_table(&matches, &teams))
    }

    pub async fn top_scorers(&self) -> Result<TopScorersResponse, TournamentError> {
        let (teams, matches) = self.snapshot().await?;
        let top_scorers = scorers::compute_scorer_leaderboard(&matches, &teams);

        Ok(TopScorersResponse {
            count: top_scorers.len(),
            top_scorers,
        })
    }

    pub async fn analytics(&self) -> Result<TeamAnalytics, TournamentError> {
        let (teams, matches) = self.snapshot().await?;
        Ok(analytics::compute_team_analytics(&matches, &teams))
    }

    pub async fn finals_history(&self) -> Result<Vec<FinalHistoryEntry>, TournamentError> {
        let (teams, matches) = self.snapshot().await?;
        Ok(history::finals_history(&matches, &teams))
    }

    /// Public bracket: played matches per round plus the pairings of the
    /// round that is up next
    pub async fn bracket_view<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<BracketResponse, TournamentError> {
        let (teams, matches) = self.snapshot().await?;
        let directory = TeamDirectory::new(&teams);
        let stage = bracket::compute_bracket_stage(teams.len(), &matches);

        let quarterfinals = bracket::matches_in_round(&matches, Round::Quarterfinal);
        let semifinals = bracket::matches_in_round(&matches, Round::Semifinal);
        let finals = bracket::matches_in_round(&matches, Round::Final);

        let quarterfinal_pairings = if stage == BracketStage::Ready {
            let entrants: Vec<Team> = teams.iter().take(BRACKET_SIZE).cloned().collect();
            upcoming(Round::Quarterfinal, pairing::quarterfinal_pairings(&entrants, rng))
        } else {
            Vec::new()
        };

        let semifinal_pairings = if stage == BracketStage::SemifinalsReady {
            upcoming(Round::Semifinal, pairing::semifinal_pairings(&quarterfinals))
        } else {
            Vec::new()
        };

        let final_pairings = if stage == BracketStage::FinalReady {
            upcoming(Round::Final, pairing::final_pairing(&semifinals).map(|p| vec![p]))
        } else {
            Vec::new()
        };

        let round_view = |played: &[Match], pairings: &[Pairing]| RoundView {
            matches: played.iter().map(|m| directory.match_with_teams(m)).collect(),
            pairings: pairings.iter().map(|p| directory.pairing(p)).collect(),
        };

        Ok(BracketResponse {
            status: stage.public_status().to_string(),
            stage,
            team_count: teams.len(),
            champion: bracket::champion(&matches).map(|id| directory.name(id)),
            rounds: BracketRounds {
                quarterfinal: round_view(&quarterfinals, &quarterfinal_pairings),
                semifinal: round_view(&semifinals, &semifinal_pairings),
                final_round: round_view(&finals, &final_pairings),
            },
        })
    }

    async fn snapshot(&self) -> Result<(Vec<Team>, Vec<Match>), TournamentError> {
        let teams = self.store.list_teams().await?;
        let matches = self.store.list_matches(None).await?;
        Ok((teams, matches))
    }

    async fn load_opponents(&self, team_a_id: Uuid, team_b_id: Uuid) -> Result<(Team, Team), TournamentError> {
        if team_a_id == team_b_id {
            return Err(TournamentError::SameTeam);
        }

        let team_a = self
            .store
            .find_team(team_a_id)
            .await?
            .ok_or(TournamentError::InvalidTeamReference(team_a_id))?;
        let team_b = self
            .store
            .find_team(team_b_id)
            .await?
            .ok_or(TournamentError::InvalidTeamReference(team_b_id))?;

        Ok((team_a, team_b))
    }
}

/// Pairings shown on the public bracket. A log that yields none leaves the
/// round's list empty instead of failing the whole page.
fn upcoming(round: Round, pairings: Result<Vec<Pairing>, TournamentError>) -> Vec<Pairing> {
    pairings.unwrap_or_else(|e| {
        tracing::warn!("No {} pairings for the bracket view: {}", round, e);
        Vec::new()
    })
}

fn sanitize(input: &str) -> String {
    input
        .chars()
        .filter(|&c| c != '\0')
        .collect::<String>()
        .trim()
        .to_string()
}
