use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::tournament::{MatchWithTeams, PairingWithTeams, TeamSummary};

/// Tournament progress, always derived from the match log
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum BracketStage {
    Waiting,
    Ready,
    QuarterfinalsInProgress,
    SemifinalsReady,
    SemifinalsInProgress,
    FinalReady,
    Completed,
    /// A round holds more matches than it has slots; only a restart recovers
    Inconsistent,
}

impl BracketStage {
    /// Coarse status shown on the public bracket
    pub fn public_status(&self) -> &'static str {
        match self {
            BracketStage::Waiting => "waiting",
            BracketStage::Ready => "ready",
            BracketStage::QuarterfinalsInProgress | BracketStage::SemifinalsReady => "quarterfinals",
            BracketStage::SemifinalsInProgress | BracketStage::FinalReady => "semifinals",
            BracketStage::Completed => "completed",
            BracketStage::Inconsistent => "inconsistent",
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct BracketStatus {
    pub stage: BracketStage,
    pub status: String,
    pub team_count: usize,
    pub quarterfinals_played: usize,
    pub semifinals_played: usize,
    pub finals_played: usize,
    pub can_start: bool,
    pub champion: Option<Uuid>,
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TournamentStatusResponse {
    #[serde(flatten)]
    pub status: BracketStatus,
    pub champion_name: Option<String>,
    pub teams: Vec<TeamSummary>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct RoundView {
    pub matches: Vec<MatchWithTeams>,
    pub pairings: Vec<PairingWithTeams>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct BracketRounds {
    #[serde(rename = "Quarterfinal")]
    pub quarterfinal: RoundView,
    #[serde(rename = "Semifinal")]
    pub semifinal: RoundView,
    #[serde(rename = "Final")]
    pub final_round: RoundView,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct BracketResponse {
    pub status: String,
    pub stage: BracketStage,
    pub team_count: usize,
    pub champion: Option<String>,
    pub rounds: BracketRounds,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct FinalHistoryEntry {
    pub year: i32,
    pub finalist_a: String,
    pub finalist_b: String,
    pub federation_a: String,
    pub federation_b: String,
    pub scoreline: String,
    pub winner: Option<String>,
    pub date: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct DashboardSummary {
    pub team_count: usize,
    pub match_count: usize,
    pub federation_count: usize,
}
