use actix_web::{http, web, App, HttpServer};
use actix_web::dev::Server;
use tracing_actix_web::TracingLogger;
use sqlx::PgPool;
use std::net::TcpListener;
use actix_cors::Cors;

pub mod config;
pub mod telemetry;
pub mod routes;
pub mod handlers;
pub mod models;
pub mod db;
pub mod tournament;
pub mod services;

use crate::db::{PgTournamentStore, TournamentStore};
use crate::routes::init_routes;
use crate::services::{CommentaryService, TournamentService};

pub fn run(
    listener: TcpListener,
    db_pool: PgPool,
    commentary: CommentaryService,
) -> Result<Server, std::io::Error> {
    run_with_store(listener, PgTournamentStore::new(db_pool), commentary)
}

/// Serve the API on top of any tournament store
pub fn run_with_store<S: TournamentStore>(
    listener: TcpListener,
    store: S,
    commentary: CommentaryService,
) -> Result<Server, std::io::Error> {
    // Wrap using web::Data, which boils down to an Arc smart pointer
    let service = web::Data::new(TournamentService::new(store, commentary));

    let server = HttpServer::new(move || {
        let cors = Cors::default()
            .allowed_origin("http://localhost:3000")
            .allowed_origin("http://localhost:5173")
            .allowed_methods(vec!["GET", "POST", "DELETE"])
            .allowed_headers(vec![
                http::header::ACCEPT,
                http::header::CONTENT_TYPE,
            ])
            .max_age(3600);

        App::new()
            .wrap(TracingLogger::default())
            .wrap(cors)
            .app_data(service.clone())
            .configure(init_routes::<S>)
    })
    .listen(listener)?
    .run();

    Ok(server)
}
