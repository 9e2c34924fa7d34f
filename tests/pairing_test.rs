use std::collections::HashSet;

use uuid::Uuid;

use aafl_backend::models::tournament::{Pairing, Round};
use aafl_backend::tournament::pairing::{final_pairing, quarterfinal_pairings, semifinal_pairings};
use aafl_backend::tournament::TournamentError;

mod common;
use common::utils::{eight_teams, recorded_match, round_won_by_team_a, seeded_rng, team};

#[test]
fn quarterfinal_pairings_cover_every_team_once() {
    let teams = eight_teams();

    for seed in 0..50 {
        let mut rng = seeded_rng(seed);
        let pairings = quarterfinal_pairings(&teams, &mut rng).expect("Eight teams should be paired");
        assert_eq!(pairings.len(), 4);

        let drawn: Vec<Uuid> = pairings
            .iter()
            .flat_map(|p| [p.team_a, p.team_b])
            .collect();
        let unique: HashSet<Uuid> = drawn.iter().copied().collect();
        assert_eq!(drawn.len(), 8);
        assert_eq!(unique.len(), 8);
        assert!(teams.iter().all(|t| unique.contains(&t.id)));
    }
}

#[test]
fn quarterfinal_draw_is_reproducible_with_a_seed() {
    let teams = eight_teams();

    let first = quarterfinal_pairings(&teams, &mut seeded_rng(7)).unwrap();
    let second = quarterfinal_pairings(&teams, &mut seeded_rng(7)).unwrap();
    assert_eq!(first, second);
}

#[test]
fn quarterfinal_draw_varies_across_seeds() {
    let teams = eight_teams();

    let draws: HashSet<Vec<Uuid>> = (0..20)
        .map(|seed| {
            quarterfinal_pairings(&teams, &mut seeded_rng(seed))
                .unwrap()
                .iter()
                .flat_map(|p| [p.team_a, p.team_b])
                .collect()
        })
        .collect();
    assert!(draws.len() > 1, "Shuffle should not always produce the same draw");
}

#[test]
fn quarterfinal_pairings_reject_wrong_team_counts() {
    let teams = eight_teams();
    let mut rng = seeded_rng(1);

    for count in [0, 1, 7] {
        let result = quarterfinal_pairings(&teams[..count], &mut rng);
        assert!(matches!(result, Err(TournamentError::InsufficientTeams(n)) if n == count));
    }

    let mut nine = teams.clone();
    nine.push(team("Leopards", Some("DR Congo")));
    assert!(matches!(
        quarterfinal_pairings(&nine, &mut rng),
        Err(TournamentError::InsufficientTeams(9))
    ));
}

#[test]
fn quarterfinal_pairings_require_distinct_teams() {
    let mut teams = eight_teams();
    teams[7] = teams[0].clone();

    let result = quarterfinal_pairings(&teams, &mut seeded_rng(3));
    assert!(matches!(result, Err(TournamentError::InsufficientTeams(7))));
}

#[test]
fn semifinals_pair_winners_in_creation_order() {
    let t = eight_teams();
    let quarterfinals = round_won_by_team_a(
        &[(&t[0], &t[1]), (&t[2], &t[3]), (&t[4], &t[5]), (&t[6], &t[7])],
        Round::Quarterfinal,
        0,
    );

    let pairings = semifinal_pairings(&quarterfinals).expect("Quarterfinals are complete");
    assert_eq!(pairings, vec![
        Pairing::new(t[0].id, t[2].id),
        Pairing::new(t[4].id, t[6].id),
    ]);
}

#[test]
fn semifinals_use_the_actual_winner_of_each_quarterfinal() {
    let t = eight_teams();
    let quarterfinals = vec![
        recorded_match(&t[0], &t[1], (0, 2), Some(Round::Quarterfinal), 0),
        recorded_match(&t[2], &t[3], (3, 1), Some(Round::Quarterfinal), 1),
        recorded_match(&t[4], &t[5], (1, 1), Some(Round::Quarterfinal), 2),
        recorded_match(&t[6], &t[7], (0, 4), Some(Round::Quarterfinal), 3),
    ];

    let pairings = semifinal_pairings(&quarterfinals).unwrap();
    assert_eq!(pairings[0], Pairing::new(t[1].id, t[2].id));
    // The 1-1 quarterfinal was settled on penalties for team A
    assert_eq!(pairings[1], Pairing::new(t[4].id, t[7].id));
}

#[test]
fn semifinals_fail_until_all_quarterfinals_have_winners() {
    let t = eight_teams();
    let mut quarterfinals = round_won_by_team_a(
        &[(&t[0], &t[1]), (&t[2], &t[3]), (&t[4], &t[5]), (&t[6], &t[7])],
        Round::Quarterfinal,
        0,
    );

    for played in 0..4 {
        let result = semifinal_pairings(&quarterfinals[..played]);
        assert!(matches!(
            result,
            Err(TournamentError::RoundIncomplete { round: Round::Semifinal, .. })
        ));
    }

    quarterfinals[2].winner = None;
    assert!(matches!(
        semifinal_pairings(&quarterfinals),
        Err(TournamentError::RoundIncomplete { round: Round::Semifinal, .. })
    ));
}

#[test]
fn final_pairs_both_semifinal_winners() {
    let t = eight_teams();
    let semifinals = vec![
        recorded_match(&t[0], &t[2], (2, 3), Some(Round::Semifinal), 10),
        recorded_match(&t[4], &t[6], (1, 0), Some(Round::Semifinal), 11),
    ];

    let pairing = final_pairing(&semifinals).expect("Semifinals are complete");
    assert_eq!(pairing, Pairing::new(t[2].id, t[4].id));

    assert!(matches!(
        final_pairing(&semifinals[..1]),
        Err(TournamentError::RoundIncomplete { round: Round::Final, .. })
    ));
}
