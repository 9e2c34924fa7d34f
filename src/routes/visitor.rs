use actix_web::web;

use crate::db::store::TournamentStore;
use crate::handlers::visitor_handler;

pub fn init_visitor_routes<S: TournamentStore>(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/visitor")
            .service(web::resource("/bracket").route(web::get().to(visitor_handler::get_bracket::<S>)))
            .service(web::resource("/matches").route(web::get().to(visitor_handler::get_matches::<S>)))
            .service(web::resource("/top-scorers").route(web::get().to(visitor_handler::get_top_scorers::<S>)))
            .service(web::resource("/history").route(web::get().to(visitor_handler::get_history::<S>)))
            .service(web::resource("/analytics").route(web::get().to(visitor_handler::get_analytics::<S>)))
            .service(web::resource("/leaderboard").route(web::get().to(visitor_handler::get_leaderboard::<S>)))
    );
}
