use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct StandingsRow {
    pub team_id: Uuid,
    pub team_name: String,
    pub federation: Option<String>,
    pub played: u32,
    pub wins: u32,
    pub draws: u32,
    pub losses: u32,
    pub goals_for: i32,
    pub goals_against: i32,
    pub points: u32,
}

impl StandingsRow {
    pub fn goal_difference(&self) -> i32 {
        self.goals_for - self.goals_against
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ScorerRow {
    pub player: String,
    pub goals: u32,
    pub team: String,
    pub federation: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct TopScorersResponse {
    pub top_scorers: Vec<ScorerRow>,
    pub count: usize,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct TeamStatsRow {
    pub team_id: Uuid,
    pub team_name: String,
    pub federation: Option<String>,
    pub played: u32,
    pub wins: u32,
    pub losses: u32,
    /// Matches level after 90 minutes, including knockout ties broken on penalties
    pub draws: u32,
    pub goals_for: i32,
    pub goals_against: i32,
}

impl TeamStatsRow {
    pub fn goal_difference(&self) -> i32 {
        self.goals_for - self.goals_against
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct FederationWins {
    pub federation: String,
    pub wins: u32,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct AnalyticsOverview {
    pub matches: usize,
    pub average_goals_per_match: f64,
    pub federation_with_most_wins: Option<FederationWins>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct TeamAnalytics {
    pub overview: AnalyticsOverview,
    pub teams: Vec<TeamStatsRow>,
}
