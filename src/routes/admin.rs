use actix_web::web;

use crate::db::store::TournamentStore;
use crate::handlers::admin::{
    dashboard_handler,
    team_handler,
    tournament_handler,
};

pub fn init_admin_routes<S: TournamentStore>(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/admin")
            .service(
                web::resource("/dashboard")
                    .route(web::get().to(dashboard_handler::get_dashboard::<S>))
            )

            // Team management routes
            .service(
                web::resource("/teams")
                    .route(web::get().to(team_handler::get_teams::<S>))
                    .route(web::post().to(team_handler::create_team::<S>))
            )
            .service(
                web::resource("/teams/{id}")
                    .route(web::get().to(team_handler::get_team::<S>))
                    .route(web::delete().to(team_handler::delete_team::<S>))
            )

            // League fixtures and tables
            .service(
                web::resource("/simulate-match")
                    .route(web::post().to(dashboard_handler::simulate_league_fixture::<S>))
            )
            .service(
                web::resource("/matches")
                    .route(web::get().to(dashboard_handler::get_matches::<S>))
            )
            .service(
                web::resource("/leaderboard")
                    .route(web::get().to(dashboard_handler::get_leaderboard::<S>))
            )

            // Knockout tournament routes
            .service(
                web::resource("/tournament/status")
                    .route(web::get().to(tournament_handler::get_tournament_status::<S>))
            )
            .service(
                web::resource("/tournament/quarterfinals")
                    .route(web::get().to(tournament_handler::get_quarterfinal_pairings::<S>))
            )
            .service(
                web::resource("/tournament/semifinals")
                    .route(web::get().to(tournament_handler::get_semifinal_pairings::<S>))
            )
            .service(
                web::resource("/tournament/final")
                    .route(web::get().to(tournament_handler::get_final_pairing::<S>))
            )
            .service(
                web::resource("/tournament/play-match")
                    .route(web::post().to(tournament_handler::play_match::<S>))
            )
            .service(
                web::resource("/tournament/simulate-match")
                    .route(web::post().to(tournament_handler::simulate_match::<S>))
            )
            .service(
                web::resource("/tournament/restart")
                    .route(web::post().to(tournament_handler::restart_tournament::<S>))
            )
            .service(
                web::resource("/tournament/matches/{round}")
                    .route(web::get().to(tournament_handler::get_round_matches::<S>))
            )
    );
}
