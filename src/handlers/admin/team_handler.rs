use actix_web::{web, HttpResponse, Result};
use serde_json::json;
use uuid::Uuid;

use crate::db::helpers::{require_record, service_result};
use crate::db::store::TournamentStore;
use crate::handlers::ApiResponse;
use crate::models::tournament::{TeamRegistrationRequest, TeamSummary};
use crate::ok_or_return;
use crate::services::TournamentService;

// GET /admin/teams - Teams sorted by name
pub async fn get_teams<S: TournamentStore>(
    service: web::Data<TournamentService<S>>,
) -> Result<HttpResponse> {
    let teams = ok_or_return!(service_result(
        service.list_teams().await,
        "Failed to load teams"
    ));

    let teams: Vec<TeamSummary> = teams.iter().map(TeamSummary::from).collect();
    Ok(HttpResponse::Ok().json(ApiResponse::ok(teams)))
}

// GET /admin/teams/{id}
pub async fn get_team<S: TournamentStore>(
    path: web::Path<Uuid>,
    service: web::Data<TournamentService<S>>,
) -> Result<HttpResponse> {
    let team = ok_or_return!(require_record(
        service.find_team(path.into_inner()).await,
        "Team not found"
    ));

    Ok(HttpResponse::Ok().json(ApiResponse::ok(TeamSummary::from(&team))))
}

// POST /admin/teams - Register a federation's team
#[tracing::instrument(
    name = "Register team",
    skip(body, service),
    fields(team_name = %body.team_name)
)]
pub async fn create_team<S: TournamentStore>(
    body: web::Json<TeamRegistrationRequest>,
    service: web::Data<TournamentService<S>>,
) -> Result<HttpResponse> {
    let team = ok_or_return!(service_result(
        service
            .register_team(&body.team_name, body.federation.as_deref())
            .await,
        "Failed to register team"
    ));

    Ok(HttpResponse::Created().json(ApiResponse::with_message(
        TeamSummary::from(&team),
        format!("Team \"{}\" registered", team.team_name),
    )))
}

// DELETE /admin/teams/{id} - Remove a team and every match it played
#[tracing::instrument(name = "Delete team", skip(service))]
pub async fn delete_team<S: TournamentStore>(
    path: web::Path<Uuid>,
    service: web::Data<TournamentService<S>>,
) -> Result<HttpResponse> {
    let team_id = path.into_inner();

    let (team, deleted_matches) = ok_or_return!(service_result(
        service.delete_team(team_id).await,
        "Failed to delete team"
    ));

    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "message": format!(
            "Team \"{}\" and {} associated match(es) have been deleted successfully",
            team.team_name, deleted_matches
        ),
        "data": {
            "deleted_team": team.team_name,
            "deleted_matches": deleted_matches
        }
    })))
}
