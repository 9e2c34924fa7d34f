pub mod dashboard_handler;
pub mod team_handler;
pub mod tournament_handler;
