pub mod commentary_service;
pub mod tournament_service;

pub use commentary_service::CommentaryService;
pub use tournament_service::{PlayMode, TournamentService};
