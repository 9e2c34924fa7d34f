use actix_web::{web, HttpResponse, Result};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde_json::json;

use crate::db::helpers::service_result;
use crate::db::store::TournamentStore;
use crate::handlers::ApiResponse;
use crate::models::tournament::{PlayMatchRequest, Round};
use crate::ok_or_return;
use crate::services::{PlayMode, TournamentService};

/// Get tournament status, derived from the recorded matches
pub async fn get_tournament_status<S: TournamentStore>(
    service: web::Data<TournamentService<S>>,
) -> Result<HttpResponse> {
    let status = ok_or_return!(service_result(
        service.bracket_status().await,
        "Failed to get tournament status"
    ));

    Ok(HttpResponse::Ok().json(ApiResponse::ok(status)))
}

/// Draw quarterfinal pairings
pub async fn get_quarterfinal_pairings<S: TournamentStore>(
    service: web::Data<TournamentService<S>>,
) -> Result<HttpResponse> {
    let mut rng = StdRng::from_entropy();
    let pairings = ok_or_return!(service_result(
        service.quarterfinal_pairings(&mut rng).await,
        "Failed to create pairings"
    ));

    Ok(HttpResponse::Ok().json(ApiResponse::ok(pairings)))
}

/// Semifinal pairings from quarterfinal winners
pub async fn get_semifinal_pairings<S: TournamentStore>(
    service: web::Data<TournamentService<S>>,
) -> Result<HttpResponse> {
    let pairings = ok_or_return!(service_result(
        service.semifinal_pairings().await,
        "Failed to create semifinal pairings"
    ));

    Ok(HttpResponse::Ok().json(ApiResponse::ok(pairings)))
}

/// Final pairing from semifinal winners
pub async fn get_final_pairing<S: TournamentStore>(
    service: web::Data<TournamentService<S>>,
) -> Result<HttpResponse> {
    let pairing = ok_or_return!(service_result(
        service.final_pairing().await,
        "Failed to create final pairing"
    ));

    Ok(HttpResponse::Ok().json(ApiResponse::ok(pairing)))
}

/// Play a knockout match with generated commentary
#[tracing::instrument(
    name = "Play match with commentary",
    skip(body, service),
    fields(round = ?body.round)
)]
pub async fn play_match<S: TournamentStore>(
    body: web::Json<PlayMatchRequest>,
    service: web::Data<TournamentService<S>>,
) -> Result<HttpResponse> {
    record_knockout_match(body.into_inner(), PlayMode::WithCommentary, service).await
}

/// Play a knockout match without commentary
#[tracing::instrument(
    name = "Simulate knockout match",
    skip(body, service),
    fields(round = ?body.round)
)]
pub async fn simulate_match<S: TournamentStore>(
    body: web::Json<PlayMatchRequest>,
    service: web::Data<TournamentService<S>>,
) -> Result<HttpResponse> {
    record_knockout_match(body.into_inner(), PlayMode::Quick, service).await
}

async fn record_knockout_match<S: TournamentStore>(
    request: PlayMatchRequest,
    mode: PlayMode,
    service: web::Data<TournamentService<S>>,
) -> Result<HttpResponse> {
    let mut rng = StdRng::from_entropy();
    let recorded = ok_or_return!(service_result(
        service.play_match(&request, mode, &mut rng).await,
        "Failed to play match"
    ));

    Ok(HttpResponse::Created().json(ApiResponse::ok(recorded)))
}

/// Delete every match; registered teams stay
#[tracing::instrument(name = "Restart tournament", skip(service))]
pub async fn restart_tournament<S: TournamentStore>(
    service: web::Data<TournamentService<S>>,
) -> Result<HttpResponse> {
    let deleted = ok_or_return!(service_result(
        service.restart().await,
        "Failed to restart tournament"
    ));

    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "message": "Tournament reset to Quarterfinals",
        "data": { "deleted_matches": deleted }
    })))
}

/// Matches of one round in the order they were played
pub async fn get_round_matches<S: TournamentStore>(
    path: web::Path<String>,
    service: web::Data<TournamentService<S>>,
) -> Result<HttpResponse> {
    let round = ok_or_return!(service_result(
        path.into_inner().parse::<Round>(),
        "Failed to load matches"
    ));

    let matches = ok_or_return!(service_result(
        service.matches_for_round(round).await,
        "Failed to load matches"
    ));

    Ok(HttpResponse::Ok().json(ApiResponse::ok(matches)))
}
