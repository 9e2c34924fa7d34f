//! Bracket progress derived from the persisted match log.
//!
//! There is no stored "current stage": every call recounts the knockout
//! matches per round, so the result only depends on the log it is given.

use uuid::Uuid;

use crate::models::bracket::{BracketStage, BracketStatus};
use crate::models::tournament::{Match, Pairing, Round};
use crate::tournament::error::TournamentError;
use crate::tournament::pairing;
use crate::tournament::BRACKET_SIZE;

/// Knockout matches of one round, in the order they were given (creation order)
pub fn matches_in_round(matches: &[Match], round: Round) -> Vec<Match> {
    matches
        .iter()
        .filter(|m| m.round == Some(round))
        .cloned()
        .collect()
}

// Same exact-count rule the pairing generator applies
fn round_complete(round_matches: &[Match], round: Round) -> bool {
    round_matches.len() == round.expected_matches()
        && round_matches.iter().all(|m| m.winner.is_some())
}

/// First round holding more matches than the bracket has slots for
pub fn overfull_round(matches: &[Match]) -> Option<Round> {
    [Round::Quarterfinal, Round::Semifinal, Round::Final]
        .into_iter()
        .find(|&round| matches_in_round(matches, round).len() > round.expected_matches())
}

pub fn compute_bracket_stage(team_count: usize, matches: &[Match]) -> BracketStage {
    let quarterfinals = matches_in_round(matches, Round::Quarterfinal);
    let semifinals = matches_in_round(matches, Round::Semifinal);
    let finals = matches_in_round(matches, Round::Final);

    if overfull_round(matches).is_some() {
        BracketStage::Inconsistent
    } else if !finals.is_empty() {
        BracketStage::Completed
    } else if !semifinals.is_empty() {
        if round_complete(&semifinals, Round::Semifinal) {
            BracketStage::FinalReady
        } else {
            BracketStage::SemifinalsInProgress
        }
    } else if !quarterfinals.is_empty() {
        if round_complete(&quarterfinals, Round::Quarterfinal) {
            BracketStage::SemifinalsReady
        } else {
            BracketStage::QuarterfinalsInProgress
        }
    } else if team_count >= BRACKET_SIZE {
        BracketStage::Ready
    } else {
        BracketStage::Waiting
    }
}

/// Winner of the first final, once one has been played
pub fn champion(matches: &[Match]) -> Option<Uuid> {
    matches
        .iter()
        .find(|m| m.round == Some(Round::Final))
        .and_then(|m| m.winner)
}

pub fn compute_bracket_status(team_count: usize, matches: &[Match]) -> BracketStatus {
    let stage = compute_bracket_stage(team_count, matches);
    let count = |round: Round| matches.iter().filter(|m| m.round == Some(round)).count();

    let can_start = !matches!(
        stage,
        BracketStage::Waiting | BracketStage::Completed | BracketStage::Inconsistent
    );

    let message = match stage {
        BracketStage::Waiting => format!(
            "{}/{} teams registered. Waiting for {} more team(s) to start the tournament.",
            team_count,
            BRACKET_SIZE,
            BRACKET_SIZE.saturating_sub(team_count)
        ),
        BracketStage::Ready if team_count == BRACKET_SIZE => {
            format!("All {} teams registered. Tournament ready to begin!", BRACKET_SIZE)
        }
        BracketStage::Ready => format!(
            "{} teams registered. The first {} make up the bracket. Tournament ready to begin!",
            team_count, BRACKET_SIZE
        ),
        BracketStage::QuarterfinalsInProgress => "Quarterfinals in progress...".to_string(),
        BracketStage::SemifinalsReady => "Quarterfinals completed. Ready for Semifinals!".to_string(),
        BracketStage::SemifinalsInProgress => "Semifinals in progress...".to_string(),
        BracketStage::FinalReady => "Semifinals completed. Ready for the Final!".to_string(),
        BracketStage::Completed => "Tournament complete!".to_string(),
        BracketStage::Inconsistent => match overfull_round(matches) {
            Some(round) => format!(
                "{} has more than {} matches. Restart the tournament to continue.",
                round,
                round.expected_matches()
            ),
            None => "Bracket is inconsistent. Restart the tournament to continue.".to_string(),
        },
    };

    BracketStatus {
        stage,
        status: stage.public_status().to_string(),
        team_count,
        quarterfinals_played: count(Round::Quarterfinal),
        semifinals_played: count(Round::Semifinal),
        finals_played: count(Round::Final),
        can_start,
        champion: champion(matches),
        message,
    }
}

/// Check that `round` can take another match at all, independent of which
/// teams play it.
pub fn round_prerequisites(
    round: Round,
    team_count: usize,
    matches: &[Match],
) -> Result<(), TournamentError> {
    match round.previous() {
        None if team_count < BRACKET_SIZE => {
            return Err(TournamentError::InsufficientTeams(team_count));
        }
        None => {}
        Some(previous) => {
            pairing::next_round_pairings(previous, &matches_in_round(matches, previous))?;
        }
    }

    if matches_in_round(matches, round).len() >= round.expected_matches() {
        return Err(TournamentError::DuplicateRoundEntry { round });
    }
    Ok(())
}

/// Check that a match between `team_a` and `team_b` may be recorded in `round`.
///
/// On top of [`round_prerequisites`], the pair must not have met in this
/// round yet, and for later rounds it must be an actual pairing derived from
/// the previous round.
pub fn validate_round_entry(
    round: Round,
    team_count: usize,
    matches: &[Match],
    team_a: Uuid,
    team_b: Uuid,
) -> Result<(), TournamentError> {
    if team_a == team_b {
        return Err(TournamentError::SameTeam);
    }

    let played = matches_in_round(matches, round);
    if played.iter().any(|m| Pairing::new(m.team_a, m.team_b).matches_teams(team_a, team_b)) {
        return Err(TournamentError::DuplicateRoundEntry { round });
    }
    round_prerequisites(round, team_count, matches)?;

    match round.previous() {
        // A team plays a single quarterfinal
        None if played.iter().any(|m| m.involves(team_a) || m.involves(team_b)) => {
            Err(TournamentError::DuplicateRoundEntry { round })
        }
        None => Ok(()),
        Some(previous) => {
            let previous_matches = matches_in_round(matches, previous);
            let pairings = pairing::next_round_pairings(previous, &previous_matches)?;
            if pairings.iter().any(|p| p.matches_teams(team_a, team_b)) {
                Ok(())
            } else {
                Err(TournamentError::InvalidPairing { round })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use crate::models::tournament::ResultType;

    fn knockout(round: Round, a: Uuid, b: Uuid) -> Match {
        Match {
            id: Uuid::new_v4(),
            team_a: a,
            team_b: b,
            score_a: 1,
            score_b: 0,
            goals: vec![],
            commentary: None,
            result_type: ResultType::RegularTime,
            winner: Some(a),
            round: Some(round),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_league_fixtures_are_not_counted() {
        let mut fixture = knockout(Round::Quarterfinal, Uuid::new_v4(), Uuid::new_v4());
        fixture.round = None;
        assert_eq!(compute_bracket_stage(8, &[fixture]), BracketStage::Ready);
    }

    #[test]
    fn test_semifinal_requires_completed_quarterfinals() {
        let ids: Vec<Uuid> = (0..8).map(|_| Uuid::new_v4()).collect();
        let quarterfinals = vec![
            knockout(Round::Quarterfinal, ids[0], ids[1]),
            knockout(Round::Quarterfinal, ids[2], ids[3]),
        ];
        let result = validate_round_entry(Round::Semifinal, 8, &quarterfinals, ids[0], ids[2]);
        assert!(matches!(result, Err(TournamentError::RoundIncomplete { round: Round::Semifinal, .. })));
    }

    #[test]
    fn test_quarterfinals_need_eight_teams() {
        let result = round_prerequisites(Round::Quarterfinal, 7, &[]);
        assert!(matches!(result, Err(TournamentError::InsufficientTeams(7))));
        assert!(round_prerequisites(Round::Quarterfinal, 8, &[]).is_ok());
    }

    #[test]
    fn test_full_round_rejects_further_entries() {
        let ids: Vec<Uuid> = (0..8).map(|_| Uuid::new_v4()).collect();
        let quarterfinals: Vec<Match> = ids
            .chunks(2)
            .map(|pair| knockout(Round::Quarterfinal, pair[0], pair[1]))
            .collect();
        let result = round_prerequisites(Round::Quarterfinal, 8, &quarterfinals);
        assert!(matches!(result, Err(TournamentError::DuplicateRoundEntry { round: Round::Quarterfinal })));
        assert!(round_prerequisites(Round::Semifinal, 8, &quarterfinals).is_ok());
    }
}
