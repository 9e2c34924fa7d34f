use chrono::Datelike;

use crate::models::bracket::FinalHistoryEntry;
use crate::models::tournament::{Match, ResultType, Round, Team};
use crate::tournament::directory::TeamDirectory;

/// Past finals, newest first
pub fn finals_history(matches: &[Match], teams: &[Team]) -> Vec<FinalHistoryEntry> {
    let directory = TeamDirectory::new(teams);

    let mut finals: Vec<&Match> = matches
        .iter()
        .filter(|m| m.round == Some(Round::Final))
        .collect();
    finals.sort_by(|x, y| y.created_at.cmp(&x.created_at));

    finals
        .into_iter()
        .map(|m| FinalHistoryEntry {
            year: m.created_at.year(),
            finalist_a: directory.name(m.team_a),
            finalist_b: directory.name(m.team_b),
            federation_a: directory.federation(m.team_a).unwrap_or_default(),
            federation_b: directory.federation(m.team_b).unwrap_or_default(),
            scoreline: scoreline(m),
            winner: m.winner.map(|id| directory.name(id)),
            date: m.created_at,
        })
        .collect()
}

/// "2 - 1", with the deciding phase appended when it was not regular time
pub fn scoreline(m: &Match) -> String {
    match m.result_type {
        ResultType::RegularTime => format!("{} - {}", m.score_a, m.score_b),
        other => format!("{} - {} ({})", m.score_a, m.score_b, other),
    }
}
