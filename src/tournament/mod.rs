pub mod error;
pub mod resolver;
pub mod pairing;
pub mod bracket;
pub mod standings;
pub mod scorers;
pub mod analytics;
pub mod history;
pub mod directory;

pub use error::TournamentError;

/// Number of teams a bracket starts with
pub const BRACKET_SIZE: usize = 8;
