use actix_web::{web, HttpResponse, Result};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::db::helpers::service_result;
use crate::db::store::TournamentStore;
use crate::handlers::ApiResponse;
use crate::models::tournament::SimulateFixtureRequest;
use crate::ok_or_return;
use crate::services::TournamentService;

// GET /admin/dashboard
pub async fn get_dashboard<S: TournamentStore>(
    service: web::Data<TournamentService<S>>,
) -> Result<HttpResponse> {
    let summary = ok_or_return!(service_result(
        service.dashboard().await,
        "Failed to load dashboard"
    ));

    Ok(HttpResponse::Ok().json(ApiResponse::ok(summary)))
}

// POST /admin/simulate-match - League fixture outside the bracket, draws allowed
#[tracing::instrument(
    name = "Simulate league fixture",
    skip(body, service),
    fields(team_a = %body.team_a_id, team_b = %body.team_b_id)
)]
pub async fn simulate_league_fixture<S: TournamentStore>(
    body: web::Json<SimulateFixtureRequest>,
    service: web::Data<TournamentService<S>>,
) -> Result<HttpResponse> {
    let mut rng = StdRng::from_entropy();
    let fixture = ok_or_return!(service_result(
        service
            .simulate_league_fixture(body.team_a_id, body.team_b_id, &mut rng)
            .await,
        "Failed to simulate match"
    ));

    Ok(HttpResponse::Created().json(ApiResponse::with_message(fixture, "Match simulated")))
}

// GET /admin/matches - Newest first
pub async fn get_matches<S: TournamentStore>(
    service: web::Data<TournamentService<S>>,
) -> Result<HttpResponse> {
    let matches = ok_or_return!(service_result(
        service.recent_matches().await,
        "Failed to load matches"
    ));

    Ok(HttpResponse::Ok().json(ApiResponse::ok(matches)))
}

// GET /admin/leaderboard
pub async fn get_leaderboard<S: TournamentStore>(
    service: web::Data<TournamentService<S>>,
) -> Result<HttpResponse> {
    let table = ok_or_return!(service_result(
        service.league_table().await,
        "Failed to load leaderboard"
    ));

    Ok(HttpResponse::Ok().json(ApiResponse::ok(table)))
}
