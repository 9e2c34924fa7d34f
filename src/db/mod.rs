pub mod helpers;
pub mod store;
pub mod tournament_queries;

pub use store::TournamentStore;
pub use tournament_queries::PgTournamentStore;
