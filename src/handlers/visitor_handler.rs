use actix_web::{web, HttpResponse, Result};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::db::helpers::service_result;
use crate::db::store::TournamentStore;
use crate::handlers::ApiResponse;
use crate::ok_or_return;
use crate::services::TournamentService;

/// Public bracket with played matches and upcoming pairings
pub async fn get_bracket<S: TournamentStore>(
    service: web::Data<TournamentService<S>>,
) -> Result<HttpResponse> {
    let mut rng = StdRng::from_entropy();
    let bracket = ok_or_return!(service_result(
        service.bracket_view(&mut rng).await,
        "Failed to load bracket"
    ));

    Ok(HttpResponse::Ok().json(ApiResponse::ok(bracket)))
}

pub async fn get_matches<S: TournamentStore>(
    service: web::Data<TournamentService<S>>,
) -> Result<HttpResponse> {
    let matches = ok_or_return!(service_result(
        service.recent_matches().await,
        "Failed to load matches"
    ));

    Ok(HttpResponse::Ok().json(ApiResponse::ok(matches)))
}

pub async fn get_top_scorers<S: TournamentStore>(
    service: web::Data<TournamentService<S>>,
) -> Result<HttpResponse> {
    let scorers = ok_or_return!(service_result(
        service.top_scorers().await,
        "Failed to load top scorers"
    ));

    Ok(HttpResponse::Ok().json(ApiResponse::ok(scorers)))
}

pub async fn get_history<S: TournamentStore>(
    service: web::Data<TournamentService<S>>,
) -> Result<HttpResponse> {
    let history = ok_or_return!(service_result(
        service.finals_history().await,
        "Failed to load history"
    ));

    Ok(HttpResponse::Ok().json(ApiResponse::ok(history)))
}

pub async fn get_analytics<S: TournamentStore>(
    service: web::Data<TournamentService<S>>,
) -> Result<HttpResponse> {
    let analytics = ok_or_return!(service_result(
        service.analytics().await,
        "Failed to load analytics"
    ));

    Ok(HttpResponse::Ok().json(ApiResponse::ok(analytics)))
}

pub async fn get_leaderboard<S: TournamentStore>(
    service: web::Data<TournamentService<S>>,
) -> Result<HttpResponse> {
    let table = ok_or_return!(service_result(
        service.league_table().await,
        "Failed to load leaderboard"
    ));

    Ok(HttpResponse::Ok().json(ApiResponse::ok(table)))
}
