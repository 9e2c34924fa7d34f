use std::collections::HashMap;

use crate::models::standings::ScorerRow;
use crate::models::tournament::{Match, Team};
use crate::tournament::directory::TeamDirectory;

/// Goals per scorer across every recorded match.
///
/// Names are trimmed and compared case-sensitively. Team and federation
/// follow the most recent goal attributed to that name.
pub fn compute_scorer_leaderboard(matches: &[Match], teams: &[Team]) -> Vec<ScorerRow> {
    let directory = TeamDirectory::new(teams);
    let mut rows: Vec<ScorerRow> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for m in matches {
        for goal in &m.goals {
            let player = goal.scorer.trim();
            if player.is_empty() {
                continue;
            }

            let team_id = m.team_for(goal.team);
            let position = *index.entry(player.to_string()).or_insert_with(|| {
                rows.push(ScorerRow {
                    player: player.to_string(),
                    goals: 0,
                    team: directory.name(team_id),
                    federation: None,
                });
                rows.len() - 1
            });

            let row = &mut rows[position];
            row.goals += 1;
            if let Some(team) = directory.get(team_id) {
                row.team = team.team_name.clone();
                if team.federation.is_some() {
                    row.federation = team.federation.clone();
                }
            }
        }
    }

    rows.sort_by(|x, y| y.goals.cmp(&x.goals));
    rows
}
