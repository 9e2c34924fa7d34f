pub mod tournament;
pub mod bracket;
pub mod standings;
pub mod commentary;
