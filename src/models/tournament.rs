// src/models/tournament.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use std::fmt;
use std::str::FromStr;

use crate::tournament::error::TournamentError;

#[derive(Debug, FromRow, Serialize, Deserialize, Clone, PartialEq)]
pub struct Team {
    pub id: Uuid,
    pub team_name: String,
    pub federation: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct NewTeam {
    pub team_name: String,
    pub federation: Option<String>,
}

/// Knockout stage of the bracket. League fixtures carry no round.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Round {
    Quarterfinal,
    Semifinal,
    Final,
}

impl Round {
    pub fn as_str(&self) -> &'static str {
        match self {
            Round::Quarterfinal => "Quarterfinal",
            Round::Semifinal => "Semifinal",
            Round::Final => "Final",
        }
    }

    /// Number of matches that complete the round
    pub fn expected_matches(&self) -> usize {
        match self {
            Round::Quarterfinal => 4,
            Round::Semifinal => 2,
            Round::Final => 1,
        }
    }

    pub fn previous(&self) -> Option<Round> {
        match self {
            Round::Quarterfinal => None,
            Round::Semifinal => Some(Round::Quarterfinal),
            Round::Final => Some(Round::Semifinal),
        }
    }
}

impl fmt::Display for Round {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Round {
    type Err = TournamentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "quarterfinal" | "quarterfinals" => Ok(Round::Quarterfinal),
            "semifinal" | "semifinals" => Ok(Round::Semifinal),
            "final" => Ok(Round::Final),
            _ => Err(TournamentError::UnknownRound(s.to_string())),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub enum ResultType {
    #[serde(rename = "90min")]
    RegularTime,
    #[serde(rename = "Extra Time")]
    ExtraTime,
    #[serde(rename = "Penalties")]
    Penalties,
}

impl ResultType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResultType::RegularTime => "90min",
            ResultType::ExtraTime => "Extra Time",
            ResultType::Penalties => "Penalties",
        }
    }
}

impl fmt::Display for ResultType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResultType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "90min" => Ok(ResultType::RegularTime),
            "Extra Time" => Ok(ResultType::ExtraTime),
            "Penalties" => Ok(ResultType::Penalties),
            other => Err(format!("Unknown result type: {}", other)),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    A,
    B,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Goal {
    pub scorer: String,
    pub team: Side,
    pub minute: u8,
}

/// A persisted match. Never mutated after creation.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Match {
    pub id: Uuid,
    pub team_a: Uuid,
    pub team_b: Uuid,
    pub score_a: i32,
    pub score_b: i32,
    pub goals: Vec<Goal>,
    pub commentary: Option<String>,
    pub result_type: ResultType,
    pub winner: Option<Uuid>,
    pub round: Option<Round>,
    pub created_at: DateTime<Utc>,
}

impl Match {
    pub fn team_for(&self, side: Side) -> Uuid {
        match side {
            Side::A => self.team_a,
            Side::B => self.team_b,
        }
    }

    pub fn involves(&self, team_id: Uuid) -> bool {
        self.team_a == team_id || self.team_b == team_id
    }

    pub fn is_draw(&self) -> bool {
        self.score_a == self.score_b
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewMatch {
    pub team_a: Uuid,
    pub team_b: Uuid,
    pub score_a: i32,
    pub score_b: i32,
    pub goals: Vec<Goal>,
    pub commentary: Option<String>,
    pub result_type: ResultType,
    pub winner: Option<Uuid>,
    pub round: Option<Round>,
}

/// Output of the match outcome resolver, before persistence.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct MatchResult {
    pub team_a: Uuid,
    pub team_b: Uuid,
    pub score_a: i32,
    pub score_b: i32,
    pub goals: Vec<Goal>,
    pub result_type: ResultType,
    pub winner: Option<Uuid>,
    pub commentary: Option<String>,
}

impl MatchResult {
    pub fn into_new_match(self, round: Option<Round>) -> NewMatch {
        NewMatch {
            team_a: self.team_a,
            team_b: self.team_b,
            score_a: self.score_a,
            score_b: self.score_b,
            goals: self.goals,
            commentary: self.commentary,
            result_type: self.result_type,
            winner: self.winner,
            round,
        }
    }
}

/// Two teams assigned to contest a match in a round
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct Pairing {
    pub team_a: Uuid,
    pub team_b: Uuid,
}

impl Pairing {
    pub fn new(team_a: Uuid, team_b: Uuid) -> Self {
        Self { team_a, team_b }
    }

    /// Pairings are unordered
    pub fn matches_teams(&self, team_a: Uuid, team_b: Uuid) -> bool {
        (self.team_a == team_a && self.team_b == team_b)
            || (self.team_a == team_b && self.team_b == team_a)
    }
}

// Request/Response DTOs
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct PlayMatchRequest {
    pub team_a_id: Uuid,
    pub team_b_id: Uuid,
    #[serde(default)]
    pub round: Option<Round>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SimulateFixtureRequest {
    pub team_a_id: Uuid,
    pub team_b_id: Uuid,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TeamRegistrationRequest {
    pub team_name: String,
    pub federation: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct TeamSummary {
    pub id: Uuid,
    pub name: String,
    pub federation: Option<String>,
}

impl From<&Team> for TeamSummary {
    fn from(team: &Team) -> Self {
        Self {
            id: team.id,
            name: team.team_name.clone(),
            federation: team.federation.clone(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct PairingWithTeams {
    pub team_a: TeamSummary,
    pub team_b: TeamSummary,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct MatchWithTeams {
    pub id: Uuid,
    pub team_a: String,
    pub team_b: String,
    pub team_a_federation: String,
    pub team_b_federation: String,
    pub score_a: i32,
    pub score_b: i32,
    pub goals: Vec<Goal>,
    pub commentary: Option<String>,
    pub result_type: ResultType,
    pub winner: Option<String>,
    pub round: Option<Round>,
    pub date: DateTime<Utc>,
}
