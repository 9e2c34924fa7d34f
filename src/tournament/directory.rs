use std::collections::HashMap;

use uuid::Uuid;

use crate::models::tournament::{Match, MatchWithTeams, Pairing, PairingWithTeams, Team, TeamSummary};

pub const UNKNOWN_TEAM: &str = "Unknown";

/// Read-only lookup of team names and federations for building views
pub struct TeamDirectory<'a> {
    teams: HashMap<Uuid, &'a Team>,
}

impl<'a> TeamDirectory<'a> {
    pub fn new(teams: &'a [Team]) -> Self {
        Self {
            teams: teams.iter().map(|team| (team.id, team)).collect(),
        }
    }

    pub fn get(&self, id: Uuid) -> Option<&'a Team> {
        self.teams.get(&id).copied()
    }

    pub fn name(&self, id: Uuid) -> String {
        self.get(id)
            .map(|team| team.team_name.clone())
            .unwrap_or_else(|| UNKNOWN_TEAM.to_string())
    }

    pub fn federation(&self, id: Uuid) -> Option<String> {
        self.get(id).and_then(|team| team.federation.clone())
    }

    pub fn summary(&self, id: Uuid) -> TeamSummary {
        match self.get(id) {
            Some(team) => TeamSummary::from(team),
            None => TeamSummary {
                id,
                name: UNKNOWN_TEAM.to_string(),
                federation: None,
            },
        }
    }

    pub fn pairing(&self, pairing: &Pairing) -> PairingWithTeams {
        PairingWithTeams {
            team_a: self.summary(pairing.team_a),
            team_b: self.summary(pairing.team_b),
        }
    }

    pub fn match_with_teams(&self, m: &Match) -> MatchWithTeams {
        MatchWithTeams {
            id: m.id,
            team_a: self.name(m.team_a),
            team_b: self.name(m.team_b),
            team_a_federation: self.federation(m.team_a).unwrap_or_default(),
            team_b_federation: self.federation(m.team_b).unwrap_or_default(),
            score_a: m.score_a,
            score_b: m.score_b,
            goals: m.goals.clone(),
            commentary: m.commentary.clone(),
            result_type: m.result_type,
            winner: m.winner.map(|id| self.name(id)),
            round: m.round,
            date: m.created_at,
        }
    }
}
