use rand::seq::SliceRandom;
use rand::Rng;

use crate::models::commentary::CommentaryError;
use crate::models::tournament::{Goal, MatchResult, ResultType, Side, Team};

/// Names goals are attributed to
pub const SCORER_POOL: [&str; 10] = [
    "M. Dlamini", "K. Okocha", "S. Mensah", "A. Salah", "P. Mahrez",
    "Y. Touré", "D. Drogba", "S. Eto'o", "J. Mane", "W. Ndidi",
];

pub const MAX_GOALS_PER_SIDE: i32 = 4;
pub const MATCH_MINUTES: u8 = 90;

/// Produces a narrative for a match whose outcome is already fixed.
#[allow(async_fn_in_trait)]
pub trait Narrator {
    async fn narrate(
        &self,
        team_a: &Team,
        team_b: &Team,
        result: &MatchResult,
    ) -> Result<String, CommentaryError>;
}

/// Resolve a knockout match. Always yields a winner: level scores are
/// settled by a coin flip recorded as `Penalties`.
pub fn resolve<R: Rng + ?Sized>(team_a: &Team, team_b: &Team, rng: &mut R) -> MatchResult {
    let (score_a, score_b, goals) = generate_score_line(rng);

    let (winner, result_type) = if score_a > score_b {
        (team_a.id, ResultType::RegularTime)
    } else if score_b > score_a {
        (team_b.id, ResultType::RegularTime)
    } else if rng.gen_bool(0.5) {
        (team_a.id, ResultType::Penalties)
    } else {
        (team_b.id, ResultType::Penalties)
    };

    MatchResult {
        team_a: team_a.id,
        team_b: team_b.id,
        score_a,
        score_b,
        goals,
        result_type,
        winner: Some(winner),
        commentary: None,
    }
}

/// Resolve a knockout match and attach generated commentary.
///
/// The outcome is drawn before the narrator runs and is never touched
/// afterwards; a failing narrator leaves `commentary` empty.
pub async fn resolve_with_commentary<R, N>(
    team_a: &Team,
    team_b: &Team,
    rng: &mut R,
    narrator: &N,
) -> MatchResult
where
    R: Rng + ?Sized,
    N: Narrator,
{
    let mut result = resolve(team_a, team_b, rng);

    match narrator.narrate(team_a, team_b, &result).await {
        Ok(text) if !text.trim().is_empty() => result.commentary = Some(text),
        Ok(_) => {
            tracing::warn!("Narrator returned empty commentary for {} vs {}", team_a.team_name, team_b.team_name);
        }
        Err(e) => {
            tracing::warn!(
                "Commentary generation failed for {} vs {}, keeping plain result: {}",
                team_a.team_name, team_b.team_name, e
            );
        }
    }

    result
}

/// Simulate a league fixture. Unlike `resolve`, level scores stay a draw
/// and no winner is recorded.
pub fn simulate_league_fixture<R: Rng + ?Sized>(team_a: &Team, team_b: &Team, rng: &mut R) -> MatchResult {
    let (score_a, score_b, goals) = generate_score_line(rng);

    let winner = if score_a > score_b {
        Some(team_a.id)
    } else if score_b > score_a {
        Some(team_b.id)
    } else {
        None
    };

    MatchResult {
        team_a: team_a.id,
        team_b: team_b.id,
        score_a,
        score_b,
        goals,
        result_type: ResultType::RegularTime,
        winner,
        commentary: None,
    }
}

fn generate_score_line<R: Rng + ?Sized>(rng: &mut R) -> (i32, i32, Vec<Goal>) {
    let score_a = rng.gen_range(0..=MAX_GOALS_PER_SIDE);
    let score_b = rng.gen_range(0..=MAX_GOALS_PER_SIDE);

    let mut goals = Vec::with_capacity((score_a + score_b) as usize);
    for (side, count) in [(Side::A, score_a), (Side::B, score_b)] {
        for _ in 0..count {
            goals.push(random_goal(side, rng));
        }
    }

    // Stable: goals in the same minute keep generation order
    goals.sort_by_key(|goal| goal.minute);

    (score_a, score_b, goals)
}

fn random_goal<R: Rng + ?Sized>(side: Side, rng: &mut R) -> Goal {
    let scorer = SCORER_POOL
        .choose(rng)
        .copied()
        .unwrap_or(SCORER_POOL[0]);

    Goal {
        scorer: scorer.to_string(),
        team: side,
        minute: rng.gen_range(1..=MATCH_MINUTES),
    }
}
