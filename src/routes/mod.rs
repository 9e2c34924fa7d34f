use actix_web::web;

pub mod admin;
pub mod visitor;
pub mod backend_health;

use crate::db::store::TournamentStore;

pub fn init_routes<S: TournamentStore>(cfg: &mut web::ServiceConfig) {
    cfg.service(backend_health::backend_health);

    admin::init_admin_routes::<S>(cfg);
    visitor::init_visitor_routes::<S>(cfg);
}
