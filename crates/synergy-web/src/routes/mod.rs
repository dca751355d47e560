//! Route handlers.

pub mod analytics;
pub mod dashboard;
pub mod discussions;
pub mod internal;
pub mod navigation;
pub mod notifications;
pub mod profile;
pub mod projects;
pub mod session;
pub mod swot;
pub mod tasks;
pub mod users;

use axum::http::StatusCode;
use synergy_core::SynergyError;

/// Handler result: JSON on success, status plus message on failure.
pub type ApiResult<T> = Result<T, (StatusCode, String)>;

/// Map a domain error to its HTTP status.
pub fn api_error(err: SynergyError) -> (StatusCode, String) {
    let status = match &err {
        e if e.is_not_found() => StatusCode::NOT_FOUND,
        SynergyError::InvalidCredentials | SynergyError::NotAuthenticated => StatusCode::UNAUTHORIZED,
        SynergyError::PermissionDenied(_) => StatusCode::FORBIDDEN,
        SynergyError::ValidationError(_) => StatusCode::BAD_REQUEST,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };
    if status == StatusCode::INTERNAL_SERVER_ERROR {
        tracing::warn!(error = %err, "Request failed");
    }
    (status, err.to_string())
}

/// Today's date for due-date computations.
pub(crate) fn today() -> chrono::NaiveDate {
    chrono::Local::now().date_naive()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(api_error(SynergyError::TaskNotFound("x".into())).0, StatusCode::NOT_FOUND);
        assert_eq!(api_error(SynergyError::InvalidCredentials).0, StatusCode::UNAUTHORIZED);
        assert_eq!(api_error(SynergyError::NotAuthenticated).0, StatusCode::UNAUTHORIZED);
        assert_eq!(api_error(SynergyError::permission("no")).0, StatusCode::FORBIDDEN);
        assert_eq!(api_error(SynergyError::validation("bad")).0, StatusCode::BAD_REQUEST);

        let (status, body) = api_error(SynergyError::InvalidCredentials);
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body, "Invalid credentials");
    }
}
