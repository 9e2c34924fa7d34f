//! Helpers that turn store and engine errors into HTTP responses.
//!
//! For handlers returning `Result<HttpResponse>`:
//! ```ignore
//! let team = ok_or_return!(require_record(service.find_team(id).await, "Team not found"));
//! ```

use actix_web::HttpResponse;
use serde_json::json;

use crate::tournament::error::TournamentError;

/// Macro for handlers returning `Result<HttpResponse>`.
/// Converts a `DbResult<T>` to return `Ok(error_response)` on error.
#[macro_export]
macro_rules! ok_or_return {
    ($expr:expr) => {
        match $expr {
            Ok(val) => val,
            Err(response) => return Ok(response),
        }
    };
}

/// Result type for operations that return an HttpResponse on error
pub type DbResult<T> = Result<T, HttpResponse>;

/// Map a tournament error to a JSON error response.
///
/// Validation failures keep their message; database errors are logged and
/// reported with `context` only.
pub fn error_response(error: &TournamentError, context: &str) -> HttpResponse {
    let body = |message: String| json!({
        "success": false,
        "message": message
    });

    match error {
        TournamentError::InsufficientTeams(_)
        | TournamentError::RoundIncomplete { .. }
        | TournamentError::InvalidPairing { .. }
        | TournamentError::SameTeam
        | TournamentError::InvalidTeamName(_)
        | TournamentError::UnknownRound(_) => {
            tracing::warn!("{}: {}", context, error);
            HttpResponse::BadRequest().json(body(error.to_string()))
        }
        TournamentError::InvalidTeamReference(_) => {
            tracing::warn!("{}: {}", context, error);
            HttpResponse::NotFound().json(body(error.to_string()))
        }
        TournamentError::DuplicateRoundEntry { .. } => {
            tracing::warn!("{}: {}", context, error);
            HttpResponse::Conflict().json(body(error.to_string()))
        }
        TournamentError::Database(e) => {
            tracing::error!("{}: database error: {}", context, e);
            HttpResponse::InternalServerError().json(body(context.to_string()))
        }
    }
}

/// Unwrap a service result, converting the error with `error_response`
pub fn service_result<T>(result: Result<T, TournamentError>, context: &str) -> DbResult<T> {
    result.map_err(|e| error_response(&e, context))
}

/// Unwrap an optional service result, returning NotFound if None
pub fn require_record<T>(
    result: Result<Option<T>, TournamentError>,
    not_found_message: &str,
) -> DbResult<T> {
    match result {
        Ok(Some(record)) => Ok(record),
        Ok(None) => Err(HttpResponse::NotFound().json(json!({
            "success": false,
            "message": not_found_message
        }))),
        Err(e) => Err(error_response(&e, not_found_message)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use crate::models::tournament::Round;
    use uuid::Uuid;

    #[test]
    fn test_error_status_codes() {
        let cases = vec![
            (TournamentError::InsufficientTeams(5), StatusCode::BAD_REQUEST),
            (TournamentError::round_incomplete(Round::Final, "no semifinals"), StatusCode::BAD_REQUEST),
            (TournamentError::DuplicateRoundEntry { round: Round::Semifinal }, StatusCode::CONFLICT),
            (TournamentError::InvalidTeamReference(Uuid::new_v4()), StatusCode::NOT_FOUND),
            (TournamentError::Database(sqlx::Error::RowNotFound), StatusCode::INTERNAL_SERVER_ERROR),
        ];

        for (error, expected) in cases {
            assert_eq!(error_response(&error, "test").status(), expected, "{}", error);
        }
    }

    #[test]
    fn test_require_record_not_found() {
        let result: DbResult<u32> = require_record(Ok(None), "Team not found");
        assert_eq!(result.unwrap_err().status(), StatusCode::NOT_FOUND);
    }
}
