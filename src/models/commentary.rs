use serde::{Deserialize, Serialize};
use thiserror::Error as ThisError;

use crate::models::tournament::{MatchResult, ResultType, Side, Team};

/// Everything the narrator needs to describe an already decided match
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct CommentaryRequest {
    pub team_a: String,
    pub team_b: String,
    pub score_a: i32,
    pub score_b: i32,
    pub goals: Vec<CommentaryGoal>,
    pub result_type: ResultType,
    pub winner: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct CommentaryGoal {
    pub scorer: String,
    pub team: String,
    pub minute: u8,
}

impl CommentaryRequest {
    pub fn from_result(team_a: &Team, team_b: &Team, result: &MatchResult) -> Self {
        let team_name = |side: Side| match side {
            Side::A => team_a.team_name.clone(),
            Side::B => team_b.team_name.clone(),
        };

        let winner = result.winner.map(|id| {
            if id == team_a.id {
                team_a.team_name.clone()
            } else {
                team_b.team_name.clone()
            }
        });

        Self {
            team_a: team_a.team_name.clone(),
            team_b: team_b.team_name.clone(),
            score_a: result.score_a,
            score_b: result.score_b,
            goals: result
                .goals
                .iter()
                .map(|goal| CommentaryGoal {
                    scorer: goal.scorer.clone(),
                    team: team_name(goal.team),
                    minute: goal.minute,
                })
                .collect(),
            result_type: result.result_type,
            winner,
        }
    }
}

/// Body returned by the generator's `/api/generate` endpoint
#[derive(Debug, Deserialize)]
pub struct GenerateResponse {
    pub response: String,
    #[serde(default)]
    pub model: Option<String>,
}

// Error types for the narrative generator
#[derive(Debug, ThisError)]
pub enum CommentaryError {
    #[error("Commentary service unavailable: {0}")]
    ServiceUnavailable(String),

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),

    #[error("Request timeout")]
    Timeout,

    #[error("Rate limit exceeded")]
    RateLimited,

    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}
