//! Leave request lifecycle rules and guarded transitions.
//!
//! The server is the source of truth for every transition, but the client
//! applies the same rules before issuing a request so that stale views fail
//! fast with a precise error instead of a round trip. Checks run in a fixed
//! order: terminal state first, then authority, then payload validation.

use crate::api::{ApiClient, ApiError, LeaveRequestResponse, UserResponse, UserRole};

/// Whether `actor` may decide (approve or reject) requests owned by `owner`.
/// Managers only have authority over their direct reports and never over
/// themselves; hr and admin have authority over everyone.
pub fn has_authority_over(actor: &UserResponse, owner: &UserResponse) -> bool {
    if actor.role.has_blanket_authority() {
        return true;
    }
    actor.role == UserRole::Manager && actor.id != owner.id && owner.manager_id == Some(actor.id)
}

fn decision_allowed(actor: &UserResponse, request: &LeaveRequestResponse) -> bool {
    if request.status.is_terminal() {
        return false;
    }
    // Blanket authority covers everyone, the actor's own requests included;
    // the manager path excludes self inside has_authority_over.
    if actor.role.has_blanket_authority() {
        return true;
    }
    // Managers need the embedded owner record to prove the reporting line;
    // without it the button stays hidden and the server remains the judge.
    request
        .user
        .as_ref()
        .map_or(false, |owner| has_authority_over(actor, owner))
}

pub fn can_approve(actor: &UserResponse, request: &LeaveRequestResponse) -> bool {
    decision_allowed(actor, request)
}

pub fn can_reject(actor: &UserResponse, request: &LeaveRequestResponse) -> bool {
    decision_allowed(actor, request)
}

/// Only the owner may withdraw, and only while the request is still pending.
pub fn can_cancel(actor: &UserResponse, request: &LeaveRequestResponse) -> bool {
    !request.status.is_terminal() && request.user_id == actor.id
}

fn terminal_conflict(request: &LeaveRequestResponse) -> ApiError {
    ApiError::conflict(format!(
        "request is already {}",
        request.status.as_str()
    ))
}

pub async fn approve(
    api: &ApiClient,
    actor: &UserResponse,
    request: &LeaveRequestResponse,
) -> Result<LeaveRequestResponse, ApiError> {
    if request.status.is_terminal() {
        return Err(terminal_conflict(request));
    }
    if !can_approve(actor, request) {
        return Err(ApiError::forbidden("no authority over this request"));
    }
    api.approve_leave(request.id).await
}

pub async fn reject(
    api: &ApiClient,
    actor: &UserResponse,
    request: &LeaveRequestResponse,
    reason: &str,
) -> Result<LeaveRequestResponse, ApiError> {
    if request.status.is_terminal() {
        return Err(terminal_conflict(request));
    }
    if !can_reject(actor, request) {
        return Err(ApiError::forbidden("no authority over this request"));
    }
    let reason = reason.trim();
    if reason.is_empty() {
        return Err(ApiError::validation("a rejection reason is required"));
    }
    api.reject_leave(request.id, reason).await
}

pub async fn cancel(
    api: &ApiClient,
    actor: &UserResponse,
    request: &LeaveRequestResponse,
) -> Result<LeaveRequestResponse, ApiError> {
    if request.status.is_terminal() {
        return Err(terminal_conflict(request));
    }
    if !can_cancel(actor, request) {
        return Err(ApiError::forbidden("only the owner may cancel a request"));
    }
    api.cancel_leave(request.id).await
}


#[cfg(all(test, not(target_arch = "wasm32")))]
mod guard_tests {
    use super::*;
    use crate::api::{ApiErrorKind, LeaveStatus};
    use crate::test_support::{leave_request, leave_request_json, user};
    use httpmock::prelude::*;

    #[tokio::test]
    async fn approve_round_trips_for_an_authorized_manager() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(POST).path("/leave/approve/10");
            then.status(200)
                .json_body(leave_request_json(10, 2, "approved"));
        });

        let api = ApiClient::new_with_base_url(server.url(""));
        let manager = user(1, UserRole::Manager, None);
        let report = user(2, UserRole::Worker, Some(1));
        let request = leave_request(10, &report, LeaveStatus::Pending);

        let updated = approve(&api, &manager, &request).await.unwrap();
        assert_eq!(updated.status, LeaveStatus::Approved);
    }

    #[tokio::test]
    async fn stale_terminal_request_conflicts_without_a_round_trip() {
        let server = MockServer::start_async().await;
        let mock = server.mock(|when, then| {
            when.method(POST).path("/leave/approve/10");
            then.status(200)
                .json_body(leave_request_json(10, 2, "approved"));
        });

        let api = ApiClient::new_with_base_url(server.url(""));
        let admin = user(5, UserRole::Admin, None);
        let report = user(2, UserRole::Worker, Some(1));
        let request = leave_request(10, &report, LeaveStatus::Rejected);

        let err = approve(&api, &admin, &request).await.unwrap_err();
        assert_eq!(err.kind, ApiErrorKind::Conflict);
        mock.assert_hits(0);
    }

    #[tokio::test]
    async fn conflict_takes_precedence_over_missing_authority() {
        let server = MockServer::start_async().await;

        let api = ApiClient::new_with_base_url(server.url(""));
        let manager = user(1, UserRole::Manager, None);
        let outsider = user(3, UserRole::Worker, Some(9));
        let request = leave_request(11, &outsider, LeaveStatus::Cancelled);

        // terminal state wins even though the manager also lacks authority
        let err = approve(&api, &manager, &request).await.unwrap_err();
        assert_eq!(err.kind, ApiErrorKind::Conflict);
    }

    #[tokio::test]
    async fn reject_requires_a_reason() {
        let server = MockServer::start_async().await;
        let mock = server.mock(|when, then| {
            when.method(POST).path("/leave/reject/10");
            then.status(200)
                .json_body(leave_request_json(10, 2, "rejected"));
        });

        let api = ApiClient::new_with_base_url(server.url(""));
        let hr = user(4, UserRole::Hr, None);
        let report = user(2, UserRole::Worker, Some(1));
        let request = leave_request(10, &report, LeaveStatus::Pending);

        let err = reject(&api, &hr, &request, "   ").await.unwrap_err();
        assert_eq!(err.kind, ApiErrorKind::Validation);
        mock.assert_hits(0);

        let updated = reject(&api, &hr, &request, "no coverage").await.unwrap();
        assert_eq!(updated.status, LeaveStatus::Rejected);
        mock.assert_hits(1);
    }

    #[tokio::test]
    async fn cancel_is_owner_only() {
        let server = MockServer::start_async().await;
        let mock = server.mock(|when, then| {
            when.method(POST).path("/leave/cancel/10");
            then.status(200)
                .json_body(leave_request_json(10, 2, "cancelled"));
        });

        let api = ApiClient::new_with_base_url(server.url(""));
        let report = user(2, UserRole::Worker, Some(1));
        let manager = user(1, UserRole::Manager, None);
        let request = leave_request(10, &report, LeaveStatus::Pending);

        let err = cancel(&api, &manager, &request).await.unwrap_err();
        assert_eq!(err.kind, ApiErrorKind::Forbidden);
        mock.assert_hits(0);

        let updated = cancel(&api, &report, &request).await.unwrap();
        assert_eq!(updated.status, LeaveStatus::Cancelled);
    }
}
