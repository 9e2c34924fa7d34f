use chrono::{DateTime, Utc};
use sqlx::types::Json;
use sqlx::{FromRow, PgPool};
use tracing::{debug, info};
use uuid::Uuid;

use crate::db::store::TournamentStore;
use crate::models::tournament::{Goal, Match, NewMatch, NewTeam, ResultType, Round, Team};
use crate::tournament::error::TournamentError;

const MATCH_COLUMNS: &str = r#"
    id, team_a_id, team_b_id, score_a, score_b, goals, commentary,
    result_type, winner_id, round, created_at
"#;

#[derive(Debug, FromRow)]
struct MatchRow {
    id: Uuid,
    team_a_id: Uuid,
    team_b_id: Uuid,
    score_a: i32,
    score_b: i32,
    goals: Json<Vec<Goal>>,
    commentary: Option<String>,
    result_type: String,
    winner_id: Option<Uuid>,
    round: Option<String>,
    created_at: DateTime<Utc>,
}

impl TryFrom<MatchRow> for Match {
    type Error = sqlx::Error;

    fn try_from(row: MatchRow) -> Result<Self, Self::Error> {
        let result_type = row
            .result_type
            .parse::<ResultType>()
            .map_err(sqlx::Error::Protocol)?;
        let round = row
            .round
            .as_deref()
            .map(str::parse::<Round>)
            .transpose()
            .map_err(|e| sqlx::Error::Protocol(e.to_string()))?;

        Ok(Match {
            id: row.id,
            team_a: row.team_a_id,
            team_b: row.team_b_id,
            score_a: row.score_a,
            score_b: row.score_b,
            goals: row.goals.0,
            commentary: row.commentary,
            result_type,
            winner: row.winner_id,
            round,
            created_at: row.created_at,
        })
    }
}

/// Postgres-backed tournament store
#[derive(Debug, Clone)]
pub struct PgTournamentStore {
    pool: PgPool,
}

impl PgTournamentStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl TournamentStore for PgTournamentStore {
    async fn list_teams(&self) -> Result<Vec<Team>, TournamentError> {
        let teams = sqlx::query_as::<_, Team>(
            r#"
            SELECT id, team_name, federation, created_at
            FROM teams
            ORDER BY created_at ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(teams)
    }

    async fn find_team(&self, team_id: Uuid) -> Result<Option<Team>, TournamentError> {
        let team = sqlx::query_as::<_, Team>(
            "SELECT id, team_name, federation, created_at FROM teams WHERE id = $1",
        )
        .bind(team_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(team)
    }

    async fn create_team(&self, new_team: NewTeam) -> Result<Team, TournamentError> {
        let team = sqlx::query_as::<_, Team>(
            r#"
            INSERT INTO teams (id, team_name, federation)
            VALUES ($1, $2, $3)
            RETURNING id, team_name, federation, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&new_team.team_name)
        .bind(&new_team.federation)
        .fetch_one(&self.pool)
        .await?;

        info!("Registered team {} ({})", team.team_name, team.id);
        Ok(team)
    }

    async fn list_matches(&self, round: Option<Round>) -> Result<Vec<Match>, TournamentError> {
        let rows = match round {
            Some(round) => {
                sqlx::query_as::<_, MatchRow>(&format!(
                    "SELECT {} FROM matches WHERE round = $1 ORDER BY created_at ASC",
                    MATCH_COLUMNS
                ))
                .bind(round.as_str())
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, MatchRow>(&format!(
                    "SELECT {} FROM matches ORDER BY created_at ASC",
                    MATCH_COLUMNS
                ))
                .fetch_all(&self.pool)
                .await?
            }
        };

        debug!("Loaded {} matches (round filter: {:?})", rows.len(), round);

        rows.into_iter()
            .map(|row| Match::try_from(row).map_err(TournamentError::from))
            .collect()
    }

    async fn create_match(&self, new_match: NewMatch) -> Result<Match, TournamentError> {
        let round = new_match.round;
        let mut tx = self.pool.begin().await?;

        if let Some(round) = round {
            // Serializes entries per round until commit
            sqlx::query("SELECT pg_advisory_xact_lock(hashtext($1))")
                .bind(format!("matches_round:{}", round.as_str()))
                .execute(&mut *tx)
                .await?;

            let (played, team_taken): (i64, bool) = sqlx::query_as(
                r#"
                SELECT
                    COUNT(*),
                    COALESCE(BOOL_OR($2 IN (team_a_id, team_b_id) OR $3 IN (team_a_id, team_b_id)), FALSE)
                FROM matches
                WHERE round = $1
                "#,
            )
            .bind(round.as_str())
            .bind(new_match.team_a)
            .bind(new_match.team_b)
            .fetch_one(&mut *tx)
            .await?;

            if team_taken || played as usize >= round.expected_matches() {
                debug!("Rejected {} entry: {} played, team taken: {}", round, played, team_taken);
                return Err(TournamentError::DuplicateRoundEntry { round });
            }
        }

        let row = sqlx::query_as::<_, MatchRow>(&format!(
            r#"
            INSERT INTO matches (
                id, team_a_id, team_b_id, score_a, score_b, goals,
                commentary, result_type, winner_id, round
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING {}
            "#,
            MATCH_COLUMNS
        ))
        .bind(Uuid::new_v4())
        .bind(new_match.team_a)
        .bind(new_match.team_b)
        .bind(new_match.score_a)
        .bind(new_match.score_b)
        .bind(Json(&new_match.goals))
        .bind(&new_match.commentary)
        .bind(new_match.result_type.as_str())
        .bind(new_match.winner)
        .bind(round.map(|r| r.as_str()))
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            // Enforced by uq_matches_round_pair
            if let (Some(round), Some(db_err)) = (round, e.as_database_error()) {
                if db_err.is_unique_violation() {
                    return TournamentError::DuplicateRoundEntry { round };
                }
            }
            TournamentError::Database(e)
        })?;

        tx.commit().await?;

        let created = Match::try_from(row)?;
        info!(
            "Recorded match {} ({:?}): {} {} - {} {}",
            created.id, created.round, created.team_a, created.score_a, created.score_b, created.team_b
        );
        Ok(created)
    }

    async fn delete_all_matches(&self) -> Result<u64, TournamentError> {
        let result = sqlx::query("DELETE FROM matches")
            .execute(&self.pool)
            .await?;

        info!("Deleted {} matches", result.rows_affected());
        Ok(result.rows_affected())
    }

    async fn delete_team_and_its_matches(
        &self,
        team_id: Uuid,
    ) -> Result<Option<(Team, u64)>, TournamentError> {
        let mut tx = self.pool.begin().await?;

        let team = sqlx::query_as::<_, Team>(
            "SELECT id, team_name, federation, created_at FROM teams WHERE id = $1 FOR UPDATE",
        )
        .bind(team_id)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(team) = team else {
            return Ok(None);
        };

        let deleted_matches = sqlx::query("DELETE FROM matches WHERE team_a_id = $1 OR team_b_id = $1")
            .bind(team_id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        sqlx::query("DELETE FROM teams WHERE id = $1")
            .bind(team_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        info!("Deleted team {} and {} of its matches", team.team_name, deleted_matches);
        Ok(Some((team, deleted_matches)))
    }
}
