use crate::{
    api::{
        ApiClient, ApiError, CreateLeaveRequest, LeaveBalanceResponse, LeaveRequestResponse,
        LeaveStatus, TodayLeaveResponse, UserResponse,
    },
    lifecycle,
};
use leptos::*;
use std::cell::Cell;
use std::collections::HashMap;
use std::rc::Rc;

const PENDING_POLL_INTERVAL_MS: u32 = 30_000;

/// One cached server view. `publish` installs fresh data and bumps the
/// version; `invalidate` only marks it stale, keeping the last good data on
/// screen until a reload replaces it.
#[derive(Debug, Clone)]
pub struct CacheSlot<T> {
    data: Option<T>,
    version: u64,
    stale: bool,
}

impl<T> Default for CacheSlot<T> {
    fn default() -> Self {
        Self {
            data: None,
            version: 0,
            stale: false,
        }
    }
}

impl<T> CacheSlot<T> {
    pub fn get(&self) -> Option<&T> {
        self.data.as_ref()
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn is_stale(&self) -> bool {
        self.stale
    }

    pub fn publish(&mut self, data: T) {
        self.data = Some(data);
        self.version += 1;
        self.stale = false;
    }

    pub fn invalidate(&mut self) {
        self.stale = true;
    }
}

#[derive(Debug, Clone, Default)]
pub struct LeaveState {
    pub pending: CacheSlot<Vec<LeaveRequestResponse>>,
    pub history: CacheSlot<Vec<LeaveRequestResponse>>,
    pub today: CacheSlot<TodayLeaveResponse>,
    pub balance: CacheSlot<LeaveBalanceResponse>,
    pub details: HashMap<i64, CacheSlot<LeaveRequestResponse>>,
    pub loading: bool,
}

impl LeaveState {
    pub fn detail(&self, id: i64) -> Option<&LeaveRequestResponse> {
        self.details.get(&id).and_then(CacheSlot::get)
    }

    fn publish_detail(&mut self, request: LeaveRequestResponse) {
        self.details.entry(request.id).or_default().publish(request);
    }

    /// A decided or withdrawn request invalidates every list that may still
    /// show its previous status.
    fn invalidate_after_transition(&mut self) {
        self.pending.invalidate();
        self.history.invalidate();
        self.today.invalidate();
        self.balance.invalidate();
    }
}

type LeaveContext = (ReadSignal<LeaveState>, WriteSignal<LeaveState>);

/// Installs the one leave store every page reads from, so an invalidation
/// issued on one page is visible to the others.
#[component]
pub fn LeaveProvider(children: Children) -> impl IntoView {
    provide_context::<LeaveContext>(create_signal(LeaveState::default()));
    view! { <>{children()}</> }
}

pub fn use_leave() -> LeaveContext {
    use_context::<LeaveContext>().unwrap_or_else(|| create_signal(LeaveState::default()))
}

pub async fn load_pending(
    api_client: &ApiClient,
    set_leave_state: WriteSignal<LeaveState>,
) -> Result<(), ApiError> {
    set_leave_state.update(|state| state.loading = true);
    match api_client.get_pending_requests().await {
        Ok(requests) => {
            set_leave_state.update(|state| {
                state.pending.publish(requests);
                state.loading = false;
            });
            Ok(())
        }
        Err(error) => {
            set_leave_state.update(|state| state.loading = false);
            Err(error)
        }
    }
}

pub async fn load_history(
    api_client: &ApiClient,
    set_leave_state: WriteSignal<LeaveState>,
    status: Option<LeaveStatus>,
    user_id: Option<i64>,
    limit: Option<u32>,
) -> Result<(), ApiError> {
    set_leave_state.update(|state| state.loading = true);
    match api_client.get_leave_history(status, user_id, limit).await {
        Ok(requests) => {
            set_leave_state.update(|state| {
                state.history.publish(requests);
                state.loading = false;
            });
            Ok(())
        }
        Err(error) => {
            set_leave_state.update(|state| state.loading = false);
            Err(error)
        }
    }
}

pub async fn load_today(
    api_client: &ApiClient,
    set_leave_state: WriteSignal<LeaveState>,
) -> Result<(), ApiError> {
    match api_client.get_today_leaves().await {
        Ok(today) => {
            set_leave_state.update(|state| state.today.publish(today));
            Ok(())
        }
        Err(error) => Err(error),
    }
}

pub async fn load_balance(
    api_client: &ApiClient,
    set_leave_state: WriteSignal<LeaveState>,
    user_id: Option<i64>,
) -> Result<(), ApiError> {
    let result = match user_id {
        Some(user_id) => api_client.get_user_balance(user_id).await,
        None => api_client.get_my_balance().await,
    };
    match result {
        Ok(balance) => {
            set_leave_state.update(|state| state.balance.publish(balance));
            Ok(())
        }
        Err(error) => Err(error),
    }
}

pub async fn load_detail(
    api_client: &ApiClient,
    set_leave_state: WriteSignal<LeaveState>,
    id: i64,
) -> Result<(), ApiError> {
    match api_client.get_leave_request(id).await {
        Ok(request) => {
            set_leave_state.update(|state| state.publish_detail(request));
            Ok(())
        }
        Err(error) => Err(error),
    }
}

pub async fn submit_request(
    api_client: &ApiClient,
    set_leave_state: WriteSignal<LeaveState>,
    payload: CreateLeaveRequest,
) -> Result<LeaveRequestResponse, ApiError> {
    set_leave_state.update(|state| state.loading = true);
    match api_client.create_leave_request(&payload).await {
        Ok(created) => {
            set_leave_state.update(|state| {
                state.publish_detail(created.clone());
                state.history.invalidate();
                state.balance.invalidate();
                state.loading = false;
            });
            Ok(created)
        }
        Err(error) => {
            set_leave_state.update(|state| state.loading = false);
            Err(error)
        }
    }
}

async fn apply_transition(
    api_client: &ApiClient,
    set_leave_state: WriteSignal<LeaveState>,
    request_id: i64,
    result: Result<LeaveRequestResponse, ApiError>,
) -> Result<LeaveRequestResponse, ApiError> {
    match result {
        Ok(updated) => {
            set_leave_state.update(|state| {
                state.publish_detail(updated.clone());
                state.invalidate_after_transition();
                state.loading = false;
            });
            Ok(updated)
        }
        Err(error) => {
            set_leave_state.update(|state| state.loading = false);
            // A conflict means the view was stale; force-refresh the row and
            // the queue so the next render shows the decided state.
            if error.kind == crate::api::ApiErrorKind::Conflict {
                let _ = load_detail(api_client, set_leave_state, request_id).await;
                let _ = load_pending(api_client, set_leave_state).await;
            }
            Err(error)
        }
    }
}

pub async fn approve_request(
    api_client: &ApiClient,
    set_leave_state: WriteSignal<LeaveState>,
    actor: &UserResponse,
    request: &LeaveRequestResponse,
) -> Result<LeaveRequestResponse, ApiError> {
    set_leave_state.update(|state| state.loading = true);
    let result = lifecycle::approve(api_client, actor, request).await;
    apply_transition(api_client, set_leave_state, request.id, result).await
}

pub async fn reject_request(
    api_client: &ApiClient,
    set_leave_state: WriteSignal<LeaveState>,
    actor: &UserResponse,
    request: &LeaveRequestResponse,
    reason: &str,
) -> Result<LeaveRequestResponse, ApiError> {
    set_leave_state.update(|state| state.loading = true);
    let result = lifecycle::reject(api_client, actor, request, reason).await;
    apply_transition(api_client, set_leave_state, request.id, result).await
}

pub async fn cancel_request(
    api_client: &ApiClient,
    set_leave_state: WriteSignal<LeaveState>,
    actor: &UserResponse,
    request: &LeaveRequestResponse,
) -> Result<LeaveRequestResponse, ApiError> {
    set_leave_state.update(|state| state.loading = true);
    let result = lifecycle::cancel(api_client, actor, request).await;
    apply_transition(api_client, set_leave_state, request.id, result).await
}

/// Cancellation flag shared with a background poll loop. Dropping the handle
/// does not stop the loop; call `cancel` from `on_cleanup`.
#[derive(Clone)]
pub struct PollHandle {
    cancelled: Rc<Cell<bool>>,
}

impl PollHandle {
    pub fn cancel(&self) {
        self.cancelled.set(true);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.get()
    }
}

/// Refreshes the pending list on a fixed interval until cancelled. A failed
/// tick leaves the last published list in place; the next tick retries.
pub fn start_pending_poll(
    api_client: ApiClient,
    set_leave_state: WriteSignal<LeaveState>,
) -> PollHandle {
    let handle = PollHandle {
        cancelled: Rc::new(Cell::new(false)),
    };

    #[cfg(target_arch = "wasm32")]
    {
        let cancelled = handle.cancelled.clone();
        spawn_local(async move {
            loop {
                gloo_timers::future::TimeoutFuture::new(PENDING_POLL_INTERVAL_MS).await;
                if cancelled.get() {
                    break;
                }
                if let Err(error) = load_pending(&api_client, set_leave_state).await {
                    log::debug!("pending poll tick failed: {}", error);
                }
            }
        });
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        let _ = (api_client, set_leave_state);
    }

    handle
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn publish_bumps_version_and_clears_staleness() {
        let mut slot: CacheSlot<Vec<i64>> = CacheSlot::default();
        assert!(slot.get().is_none());
        assert_eq!(slot.version(), 0);

        slot.publish(vec![1, 2]);
        assert_eq!(slot.version(), 1);
        assert!(!slot.is_stale());

        slot.invalidate();
        assert!(slot.is_stale());
        // stale data stays readable until replaced
        assert_eq!(slot.get(), Some(&vec![1, 2]));

        slot.publish(vec![3]);
        assert_eq!(slot.version(), 2);
        assert!(!slot.is_stale());
    }

    #[test]
    fn invalidate_before_first_publish_keeps_slot_empty() {
        let mut slot: CacheSlot<i64> = CacheSlot::default();
        slot.invalidate();
        assert!(slot.is_stale());
        assert!(slot.get().is_none());
    }

    #[test]
    fn poll_handle_cancels_once_and_stays_cancelled() {
        let handle = PollHandle {
            cancelled: Rc::new(Cell::new(false)),
        };
        let observer = handle.clone();
        assert!(!observer.is_cancelled());
        handle.cancel();
        assert!(observer.is_cancelled());
        handle.cancel();
        assert!(observer.is_cancelled());
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::api::{ApiErrorKind, UserRole};
    use crate::test_support::{leave_request_json, user};
    use httpmock::prelude::*;
    use leptos::create_runtime;

    #[tokio::test]
    async fn use_leave_shares_one_store_under_a_provider() {
        let runtime = create_runtime();
        provide_context::<LeaveContext>(create_signal(LeaveState::default()));

        let (_, set_from_one_page) = use_leave();
        let (seen_by_another, _) = use_leave();
        set_from_one_page.update(|state| state.pending.publish(Vec::new()));
        assert_eq!(seen_by_another.get().pending.version(), 1);
        runtime.dispose();
    }

    #[tokio::test]
    async fn load_pending_publishes_the_list() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(GET).path("/leave/pending");
            then.status(200)
                .json_body(serde_json::json!([leave_request_json(10, 2, "pending")]));
        });

        let runtime = create_runtime();
        let (state, set_state) = create_signal(LeaveState::default());
        let api = ApiClient::new_with_base_url(server.url(""));

        load_pending(&api, set_state).await.unwrap();
        let snapshot = state.get();
        assert_eq!(snapshot.pending.version(), 1);
        assert_eq!(snapshot.pending.get().map(Vec::len), Some(1));
        assert!(!snapshot.loading);
        runtime.dispose();
    }

    #[tokio::test]
    async fn approval_publishes_detail_and_invalidates_lists() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(GET).path("/leave/pending");
            then.status(200)
                .json_body(serde_json::json!([leave_request_json(10, 2, "pending")]));
        });
        server.mock(|when, then| {
            when.method(POST).path("/leave/approve/10");
            then.status(200)
                .json_body(leave_request_json(10, 2, "approved"));
        });

        let runtime = create_runtime();
        let (state, set_state) = create_signal(LeaveState::default());
        let api = ApiClient::new_with_base_url(server.url(""));
        load_pending(&api, set_state).await.unwrap();

        let manager = user(1, UserRole::Manager, None);
        let request = state.get().pending.get().unwrap()[0].clone();
        let updated = approve_request(&api, set_state, &manager, &request)
            .await
            .unwrap();
        assert_eq!(updated.status, LeaveStatus::Approved);

        let snapshot = state.get();
        assert!(snapshot.pending.is_stale());
        assert!(snapshot.history.is_stale());
        assert!(snapshot.balance.is_stale());
        assert_eq!(
            snapshot.detail(10).map(|r| r.status),
            Some(LeaveStatus::Approved)
        );
        // the stale pending list still shows the last published rows
        assert_eq!(snapshot.pending.get().map(Vec::len), Some(1));
        runtime.dispose();
    }

    #[tokio::test]
    async fn local_guard_failure_leaves_caches_untouched() {
        let server = MockServer::start_async().await;
        let mock = server.mock(|when, then| {
            when.method(POST).path("/leave/approve/10");
            then.status(200)
                .json_body(leave_request_json(10, 2, "approved"));
        });

        let runtime = create_runtime();
        let (state, set_state) = create_signal(LeaveState::default());
        let api = ApiClient::new_with_base_url(server.url(""));

        let manager = user(1, UserRole::Manager, None);
        let outsider = user(3, UserRole::Worker, Some(9));
        let request = crate::test_support::leave_request(10, &outsider, LeaveStatus::Pending);

        let err = approve_request(&api, set_state, &manager, &request)
            .await
            .unwrap_err();
        assert_eq!(err.kind, ApiErrorKind::Forbidden);
        mock.assert_hits(0);

        let snapshot = state.get();
        assert!(!snapshot.pending.is_stale());
        assert!(snapshot.detail(10).is_none());
        assert!(!snapshot.loading);
        runtime.dispose();
    }

    #[tokio::test]
    async fn conflict_forces_a_refresh_of_the_stale_row() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(POST).path("/leave/approve/10");
            then.status(409)
                .json_body(serde_json::json!({ "detail": "Request is already rejected" }));
        });
        server.mock(|when, then| {
            when.method(GET).path("/leave/10");
            then.status(200)
                .json_body(leave_request_json(10, 2, "rejected"));
        });
        let pending_mock = server.mock(|when, then| {
            when.method(GET).path("/leave/pending");
            then.status(200).json_body(serde_json::json!([]));
        });

        let runtime = create_runtime();
        let (state, set_state) = create_signal(LeaveState::default());
        let api = ApiClient::new_with_base_url(server.url(""));

        let hr = user(4, UserRole::Hr, None);
        let report = user(2, UserRole::Worker, Some(1));
        let request = crate::test_support::leave_request(10, &report, LeaveStatus::Pending);

        let err = approve_request(&api, set_state, &hr, &request)
            .await
            .unwrap_err();
        assert_eq!(err.kind, ApiErrorKind::Conflict);
        pending_mock.assert_hits(1);

        let snapshot = state.get();
        assert_eq!(
            snapshot.detail(10).map(|r| r.status),
            Some(LeaveStatus::Rejected)
        );
        assert_eq!(snapshot.pending.get().map(Vec::len), Some(0));
        runtime.dispose();
    }

    #[tokio::test]
    async fn load_detail_caches_by_request_id() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(GET).path("/leave/10");
            then.status(200)
                .json_body(leave_request_json(10, 2, "pending"));
        });

        let runtime = create_runtime();
        let (state, set_state) = create_signal(LeaveState::default());
        let api = ApiClient::new_with_base_url(server.url(""));

        load_detail(&api, set_state, 10).await.unwrap();
        let snapshot = state.get();
        assert_eq!(snapshot.detail(10).map(|r| r.id), Some(10));
        assert!(snapshot.detail(11).is_none());
        runtime.dispose();
    }

    #[tokio::test]
    async fn submit_invalidates_history_and_balance() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(POST).path("/leave/requests");
            then.status(200)
                .json_body(leave_request_json(12, 2, "pending"));
        });

        let runtime = create_runtime();
        let (state, set_state) = create_signal(LeaveState::default());
        let api = ApiClient::new_with_base_url(server.url(""));

        let created = submit_request(
            &api,
            set_state,
            CreateLeaveRequest {
                start_date: chrono::NaiveDate::from_ymd_opt(2024, 12, 15).unwrap(),
                end_date: chrono::NaiveDate::from_ymd_opt(2024, 12, 16).unwrap(),
                leave_type: crate::api::LeaveType::Casual,
                duration_type: crate::api::DurationType::Full,
                reason: None,
            },
        )
        .await
        .unwrap();
        assert_eq!(created.id, 12);

        let snapshot = state.get();
        assert!(snapshot.history.is_stale());
        assert!(snapshot.balance.is_stale());
        assert_eq!(
            snapshot.detail(12).map(|r| r.status),
            Some(LeaveStatus::Pending)
        );
        runtime.dispose();
    }
}
