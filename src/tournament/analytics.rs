use std::collections::HashMap;

use uuid::Uuid;

use crate::models::standings::{AnalyticsOverview, FederationWins, TeamAnalytics, TeamStatsRow};
use crate::models::tournament::{Match, Team};
use crate::tournament::directory::{TeamDirectory, UNKNOWN_TEAM};

/// Per-team performance and a tournament-wide overview.
///
/// Wins and losses come from the recorded winner, so league draws count for
/// neither side; `draws` counts matches level after 90 minutes.
pub fn compute_team_analytics(matches: &[Match], teams: &[Team]) -> TeamAnalytics {
    let directory = TeamDirectory::new(teams);
    let mut rows: Vec<TeamStatsRow> = Vec::new();
    let mut index: HashMap<Uuid, usize> = HashMap::new();
    // Insertion-ordered so ties resolve to the federation that got there first
    let mut federation_wins: Vec<FederationWins> = Vec::new();
    let mut total_goals: i64 = 0;

    for m in matches {
        let a = row_index(&mut rows, &mut index, &directory, m.team_a);
        let b = row_index(&mut rows, &mut index, &directory, m.team_b);

        rows[a].played += 1;
        rows[b].played += 1;
        rows[a].goals_for += m.score_a;
        rows[a].goals_against += m.score_b;
        rows[b].goals_for += m.score_b;
        rows[b].goals_against += m.score_a;

        if m.is_draw() {
            rows[a].draws += 1;
            rows[b].draws += 1;
        }

        if let Some(winner) = m.winner {
            let (w, l) = if winner == m.team_a { (a, b) } else { (b, a) };
            rows[w].wins += 1;
            rows[l].losses += 1;

            let federation = directory
                .federation(winner)
                .unwrap_or_else(|| UNKNOWN_TEAM.to_string());
            match federation_wins.iter_mut().find(|f| f.federation == federation) {
                Some(entry) => entry.wins += 1,
                None => federation_wins.push(FederationWins { federation, wins: 1 }),
            }
        }

        total_goals += i64::from(m.score_a + m.score_b);
    }

    rows.sort_by(|x, y| {
        y.wins
            .cmp(&x.wins)
            .then_with(|| y.goal_difference().cmp(&x.goal_difference()))
    });

    let federation_with_most_wins = federation_wins
        .into_iter()
        .fold(None, |best: Option<FederationWins>, entry| match best {
            Some(current) if current.wins >= entry.wins => Some(current),
            _ => Some(entry),
        });

    let average_goals_per_match = if matches.is_empty() {
        0.0
    } else {
        total_goals as f64 / matches.len() as f64
    };

    TeamAnalytics {
        overview: AnalyticsOverview {
            matches: matches.len(),
            average_goals_per_match,
            federation_with_most_wins,
        },
        teams: rows,
    }
}

fn row_index(
    rows: &mut Vec<TeamStatsRow>,
    index: &mut HashMap<Uuid, usize>,
    directory: &TeamDirectory<'_>,
    team_id: Uuid,
) -> usize {
    *index.entry(team_id).or_insert_with(|| {
        rows.push(TeamStatsRow {
            team_id,
            team_name: directory.name(team_id),
            federation: directory.federation(team_id),
            played: 0,
            wins: 0,
            losses: 0,
            draws: 0,
            goals_for: 0,
            goals_against: 0,
        });
        rows.len() - 1
    })
}
