use std::collections::HashMap;

use uuid::Uuid;

use crate::models::standings::StandingsRow;
use crate::models::tournament::{Match, Team};
use crate::tournament::directory::TeamDirectory;

const POINTS_FOR_WIN: u32 = 3;
const POINTS_FOR_DRAW: u32 = 1;

/// Fold the full match log (knockout and league fixtures) into a league table.
///
/// Results come from the score line, so a knockout tie settled on penalties
/// counts as a draw here. Sorted by points, then goal difference; ties keep
/// the order in which teams first appear in the log.
pub fn compute_league_table(matches: &[Match], teams: &[Team]) -> Vec<StandingsRow> {
    let directory = TeamDirectory::new(teams);
    let mut rows: Vec<StandingsRow> = Vec::new();
    let mut index: HashMap<Uuid, usize> = HashMap::new();

    let mut ensure = |rows: &mut Vec<StandingsRow>, team_id: Uuid| -> usize {
        *index.entry(team_id).or_insert_with(|| {
            rows.push(StandingsRow {
                team_id,
                team_name: directory.name(team_id),
                federation: directory.federation(team_id),
                played: 0,
                wins: 0,
                draws: 0,
                losses: 0,
                goals_for: 0,
                goals_against: 0,
                points: 0,
            });
            rows.len() - 1
        })
    };

    for m in matches {
        let a = ensure(&mut rows, m.team_a);
        let b = ensure(&mut rows, m.team_b);

        record(&mut rows[a], m.score_a, m.score_b);
        record(&mut rows[b], m.score_b, m.score_a);
    }

    rows.sort_by(|x, y| {
        y.points
            .cmp(&x.points)
            .then_with(|| y.goal_difference().cmp(&x.goal_difference()))
    });

    rows
}

fn record(row: &mut StandingsRow, scored: i32, conceded: i32) {
    row.played += 1;
    row.goals_for += scored;
    row.goals_against += conceded;

    if scored > conceded {
        row.wins += 1;
        row.points += POINTS_FOR_WIN;
    } else if scored == conceded {
        row.draws += 1;
        row.points += POINTS_FOR_DRAW;
    } else {
        row.losses += 1;
    }
}
