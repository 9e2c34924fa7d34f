use std::collections::HashSet;

use rand::seq::SliceRandom;
use rand::Rng;
use uuid::Uuid;

use crate::models::tournament::{Match, Pairing, Round, Team};
use crate::tournament::error::TournamentError;
use crate::tournament::BRACKET_SIZE;

/// Randomly draw the quarterfinal bracket from exactly 8 distinct teams.
pub fn quarterfinal_pairings<R: Rng + ?Sized>(
    teams: &[Team],
    rng: &mut R,
) -> Result<Vec<Pairing>, TournamentError> {
    let distinct: HashSet<Uuid> = teams.iter().map(|team| team.id).collect();
    if teams.len() != BRACKET_SIZE || distinct.len() != BRACKET_SIZE {
        return Err(TournamentError::InsufficientTeams(distinct.len()));
    }

    let mut drawn: Vec<Uuid> = teams.iter().map(|team| team.id).collect();
    drawn.shuffle(rng);

    Ok(pair_consecutive(&drawn))
}

/// Winner of QF1 meets winner of QF2, QF3 meets QF4. `quarterfinals` must be
/// in creation order.
pub fn semifinal_pairings(quarterfinals: &[Match]) -> Result<Vec<Pairing>, TournamentError> {
    let winners = round_winners(Round::Quarterfinal, quarterfinals)?;
    Ok(pair_consecutive(&winners))
}

pub fn final_pairing(semifinals: &[Match]) -> Result<Pairing, TournamentError> {
    let winners = round_winners(Round::Semifinal, semifinals)?;
    Ok(Pairing::new(winners[0], winners[1]))
}

/// Pairings of the round following `round`, derived from its results
pub fn next_round_pairings(round: Round, matches: &[Match]) -> Result<Vec<Pairing>, TournamentError> {
    match round {
        Round::Quarterfinal => semifinal_pairings(matches),
        Round::Semifinal => final_pairing(matches).map(|pairing| vec![pairing]),
        Round::Final => Err(TournamentError::round_incomplete(
            Round::Final,
            "the final is the last round",
        )),
    }
}

fn round_winners(round: Round, matches: &[Match]) -> Result<Vec<Uuid>, TournamentError> {
    let expected = round.expected_matches();
    let next = next_round_name(round);

    if matches.len() != expected {
        return Err(TournamentError::round_incomplete(
            next,
            format!("{} of {} {} matches played", matches.len(), expected, round),
        ));
    }

    matches
        .iter()
        .enumerate()
        .map(|(index, m)| {
            m.winner.ok_or_else(|| {
                TournamentError::round_incomplete(
                    next,
                    format!("{} {} has no winner", round, index + 1),
                )
            })
        })
        .collect()
}

fn next_round_name(round: Round) -> Round {
    match round {
        Round::Quarterfinal => Round::Semifinal,
        Round::Semifinal | Round::Final => Round::Final,
    }
}

fn pair_consecutive(team_ids: &[Uuid]) -> Vec<Pairing> {
    team_ids
        .chunks_exact(2)
        .map(|pair| Pairing::new(pair[0], pair[1]))
        .collect()
}
