use chrono::{Duration, Utc};
use once_cell::sync::Lazy;
use rand::rngs::StdRng;
use rand::SeedableRng;
use reqwest::Client;
use secrecy::ExposeSecret;
use serde_json::{json, Value};
use sqlx::{Connection, Executor, PgConnection, PgPool};
use std::net::TcpListener;
use uuid::Uuid;

use aafl_backend::config::settings::{get_config, DatabaseSettings};
use aafl_backend::db::PgTournamentStore;

use aafl_backend::db::TournamentStore;
use aafl_backend::models::tournament::{
    Goal, Match, PlayMatchRequest, ResultType, Round, Side, Team,
};
use aafl_backend::run_with_store;
use aafl_backend::services::{CommentaryService, PlayMode, TournamentService};
use aafl_backend::telemetry::{get_subscriber, init_subscriber};

use super::memory_store::MemoryStore;

// Ensure that the `tracing` stack is only initialised once using `once_cell`
static TRACING: Lazy<()> = Lazy::new(|| {
    let default_filter_level = "info".to_string();
    let subscriber_name = "test".to_string();

    if std::env::var("TEST_LOG").is_ok() {
        let subscriber = get_subscriber(
            subscriber_name,
            default_filter_level,
            std::io::stdout
        );
        init_subscriber(subscriber);
    } else {
        let subscriber = get_subscriber(
            subscriber_name,
            default_filter_level,
            std::io::sink
        );
        init_subscriber(subscriber);
    }
});

pub const FEDERATIONS: [(&str, &str); 8] = [
    ("Super Eagles", "Nigeria"),
    ("Black Stars", "Ghana"),
    ("Pharaohs", "Egypt"),
    ("Atlas Lions", "Morocco"),
    ("Lions of Teranga", "Senegal"),
    ("Indomitable Lions", "Cameroon"),
    ("Bafana Bafana", "South Africa"),
    ("Elephants", "Ivory Coast"),
];

pub struct TestApp {
    pub address: String,
    pub store: MemoryStore,
    pub client: Client,
}

impl TestApp {
    pub async fn register_team(&self, name: &str, federation: &str) -> Uuid {
        let response = self.client
            .post(&format!("{}/admin/teams", &self.address))
            .json(&json!({ "team_name": name, "federation": federation }))
            .send()
            .await
            .expect("Failed to execute request.");
        assert_eq!(201, response.status().as_u16());

        let body: Value = response.json().await.expect("Failed to parse response");
        body["data"]["id"]
            .as_str()
            .and_then(|id| Uuid::parse_str(id).ok())
            .expect("Response should contain the team id")
    }

    pub async fn register_bracket(&self) -> Vec<Uuid> {
        let mut ids = Vec::new();
        for (name, federation) in FEDERATIONS {
            ids.push(self.register_team(name, federation).await);
        }
        ids
    }

    pub async fn get(&self, path: &str) -> reqwest::Response {
        self.client
            .get(&format!("{}{}", &self.address, path))
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn post_json(&self, path: &str, body: &Value) -> reqwest::Response {
        self.client
            .post(&format!("{}{}", &self.address, path))
            .json(body)
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn delete(&self, path: &str) -> reqwest::Response {
        self.client
            .delete(&format!("{}{}", &self.address, path))
            .send()
            .await
            .expect("Failed to execute request.")
    }

    /// Play every pairing of the round currently offered and return the winners
    pub async fn play_round(&self, pairings_path: &str, round: &str) -> Vec<Uuid> {
        let response = self.get(pairings_path).await;
        assert_eq!(200, response.status().as_u16());
        let body: Value = response.json().await.expect("Failed to parse response");

        let pairings = match &body["data"] {
            Value::Array(pairings) => pairings.clone(),
            single => vec![single.clone()],
        };

        let mut winners = Vec::new();
        for pairing in pairings {
            let response = self
                .post_json(
                    "/admin/tournament/simulate-match",
                    &json!({
                        "team_a_id": pairing["team_a"]["id"],
                        "team_b_id": pairing["team_b"]["id"],
                        "round": round,
                    }),
                )
                .await;
            assert_eq!(201, response.status().as_u16());
            let played: Value = response.json().await.expect("Failed to parse response");
            let winner_name = played["data"]["winner"].as_str().expect("Knockout match has a winner");

            let winner_id = if pairing["team_a"]["name"] == winner_name {
                &pairing["team_a"]["id"]
            } else {
                &pairing["team_b"]["id"]
            };
            winners.push(
                winner_id
                    .as_str()
                    .and_then(|id| Uuid::parse_str(id).ok())
                    .expect("Pairing should contain team ids"),
            );
        }
        winners
    }
}

pub async fn spawn_app() -> TestApp {
    // The first time `initialize` is invoked the code in `TRACING` is executed.
    // All other invocations will instead skip execution.
    Lazy::force(&TRACING);

    let listener = TcpListener::bind("127.0.0.1:0")
        .expect("Failed to bind random port");
    // Get port assigned by the OS
    let port = listener.local_addr().unwrap().port();
    let address = format!("http://127.0.0.1:{}", port);

    let store = MemoryStore::new();
    let server = run_with_store(listener, store.clone(), CommentaryService::offline())
        .expect("Failed to bind address");
    // Launch the server as a background task
    let _ = tokio::spawn(server);

    TestApp {
        address,
        store,
        client: Client::new(),
    }
}

/// Postgres store on a freshly created and migrated database
pub async fn spawn_postgres_store() -> PgTournamentStore {
    Lazy::force(&TRACING);

    let mut configuration = get_config().expect("Failed to read configuration.");
    configuration.database.db_name = Uuid::new_v4().to_string();
    configuration.database.db_url = None;

    PgTournamentStore::new(configure_db(&configuration.database).await)
}

pub async fn configure_db(config: &DatabaseSettings) -> PgPool {
    // Create database
    let mut connection = PgConnection::connect(
            &config.connection_string_without_db()
        )
        .await
        .expect("Failed to connect to Postgres");
    connection
        .execute(format!(r#"CREATE DATABASE "{}";"#, config.db_name).as_str())
        .await
        .expect("Failed to create database.");

    // Migrate database
    let connection_pool = PgPool::connect(config.connection_string().expose_secret())
        .await
        .expect("Failed to connect to Postgres.");
    sqlx::migrate!("./migrations")
        .run(&connection_pool)
        .await
        .expect("Failed to migrate the database");

    connection_pool
}

/// Service over a fresh in-memory store with offline commentary
pub fn tournament_service() -> TournamentService<MemoryStore> {
    Lazy::force(&TRACING);
    TournamentService::new(MemoryStore::new(), CommentaryService::offline())
}

pub async fn register_bracket(service: &TournamentService<MemoryStore>) -> Vec<Team> {
    let mut teams = Vec::new();
    for (name, federation) in FEDERATIONS {
        let team = service
            .register_team(name, Some(federation))
            .await
            .expect("Failed to register team");
        teams.push(team);
    }
    teams
}

/// Play every offered pairing of `round` in quick mode
pub async fn play_round(
    service: &TournamentService<MemoryStore>,
    round: Round,
    rng: &mut StdRng,
) -> Vec<Match> {
    let pairings = match round {
        Round::Quarterfinal => service.quarterfinal_pairings(rng).await,
        Round::Semifinal => service.semifinal_pairings().await,
        Round::Final => service.final_pairing().await.map(|pairing| vec![pairing]),
    }
    .expect("Pairings should be available");

    for pairing in &pairings {
        let request = PlayMatchRequest {
            team_a_id: pairing.team_a.id,
            team_b_id: pairing.team_b.id,
            round: Some(round),
        };
        service
            .play_match(&request, PlayMode::Quick, rng)
            .await
            .expect("Failed to play match");
    }

    service
        .store()
        .list_matches(Some(round))
        .await
        .expect("Failed to list matches")
}

pub fn seeded_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

// Builders for engine level tests

pub fn team(name: &str, federation: Option<&str>) -> Team {
    Team {
        id: Uuid::new_v4(),
        team_name: name.to_string(),
        federation: federation.map(str::to_string),
        created_at: Utc::now(),
    }
}

pub fn eight_teams() -> Vec<Team> {
    FEDERATIONS
        .iter()
        .map(|(name, federation)| team(name, Some(federation)))
        .collect()
}

pub fn goal(scorer: &str, side: Side, minute: u8) -> Goal {
    Goal {
        scorer: scorer.to_string(),
        team: side,
        minute,
    }
}

/// A recorded match. `sequence` orders creation times.
pub fn recorded_match(
    team_a: &Team,
    team_b: &Team,
    score: (i32, i32),
    round: Option<Round>,
    sequence: i64,
) -> Match {
    let winner = if score.0 > score.1 {
        Some(team_a.id)
    } else if score.1 > score.0 {
        Some(team_b.id)
    } else if round.is_some() {
        Some(team_a.id)
    } else {
        None
    };
    let result_type = if score.0 == score.1 && round.is_some() {
        ResultType::Penalties
    } else {
        ResultType::RegularTime
    };

    Match {
        id: Uuid::new_v4(),
        team_a: team_a.id,
        team_b: team_b.id,
        score_a: score.0,
        score_b: score.1,
        goals: Vec::new(),
        commentary: None,
        result_type,
        winner,
        round,
        created_at: Utc::now() + Duration::seconds(sequence),
    }
}

/// A completed knockout round where team A of each pairing wins 1-0
pub fn round_won_by_team_a(pairs: &[(&Team, &Team)], round: Round, first_sequence: i64) -> Vec<Match> {
    pairs
        .iter()
        .enumerate()
        .map(|(index, (a, b))| recorded_match(a, b, (1, 0), Some(round), first_sequence + index as i64))
        .collect()
}
