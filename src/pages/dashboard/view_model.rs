use crate::api::{ApiClient, ApiError, LeaveRequestResponse};
use crate::state::{
    auth::use_session,
    leave::{self, use_leave, LeaveState},
};
use leptos::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecisionKind {
    Approve,
    Reject,
    Cancel,
}

#[derive(Debug, Clone)]
pub struct DecisionPayload {
    pub kind: DecisionKind,
    pub request: LeaveRequestResponse,
    pub reason: Option<String>,
}

#[derive(Clone, Copy)]
pub struct DashboardViewModel {
    pub leave_state: (ReadSignal<LeaveState>, WriteSignal<LeaveState>),
    pub decision_action: Action<DecisionPayload, Result<(), ApiError>>,
    pub decision_error: RwSignal<Option<ApiError>>,
    /// Row whose reject form is currently open, if any.
    pub reject_target: RwSignal<Option<LeaveRequestResponse>>,
    pub reject_reason: RwSignal<String>,
    /// Request id with a transition in flight, so its row disables its
    /// buttons while the rest of the queue stays interactive.
    pub in_flight: RwSignal<Option<i64>>,
}

impl DashboardViewModel {
    pub fn new() -> Self {
        let api = use_context::<ApiClient>().unwrap_or_else(ApiClient::new);
        let (session, _) = use_session();
        let (leave_read, leave_write) = use_leave();

        let decision_error = create_rw_signal(None::<ApiError>);
        let reject_target = create_rw_signal(None::<LeaveRequestResponse>);
        let reject_reason = create_rw_signal(String::new());
        let in_flight = create_rw_signal(None::<i64>);

        let api_for_action = api.clone();
        let decision_action = create_action(move |payload: &DecisionPayload| {
            let api = api_for_action.clone();
            let payload = payload.clone();
            async move {
                let actor = session
                    .get_untracked()
                    .user
                    .ok_or_else(|| ApiError::auth("not signed in"))?;
                match payload.kind {
                    DecisionKind::Approve => {
                        leave::approve_request(&api, leave_write, &actor, &payload.request).await?
                    }
                    DecisionKind::Reject => {
                        leave::reject_request(
                            &api,
                            leave_write,
                            &actor,
                            &payload.request,
                            payload.reason.as_deref().unwrap_or_default(),
                        )
                        .await?
                    }
                    DecisionKind::Cancel => {
                        leave::cancel_request(&api, leave_write, &actor, &payload.request).await?
                    }
                };
                leave::load_pending(&api, leave_write).await
            }
        });

        create_effect(move |_| {
            if let Some(result) = decision_action.value().get() {
                in_flight.set(None);
                match result {
                    Ok(()) => {
                        decision_error.set(None);
                        reject_target.set(None);
                        reject_reason.set(String::new());
                    }
                    Err(err) => decision_error.set(Some(err)),
                }
            }
        });

        // initial load plus a background refresh of the pending queue
        {
            let api = api.clone();
            create_effect(move |_| {
                let api = api.clone();
                spawn_local(async move {
                    let _ = leave::load_pending(&api, leave_write).await;
                    let _ = leave::load_today(&api, leave_write).await;
                    let _ = leave::load_balance(&api, leave_write, None).await;
                });
            });
        }
        let poll = leave::start_pending_poll(api, leave_write);
        on_cleanup(move || poll.cancel());

        Self {
            leave_state: (leave_read, leave_write),
            decision_action,
            decision_error,
            reject_target,
            reject_reason,
            in_flight,
        }
    }

    pub fn dispatch(&self, payload: DecisionPayload) {
        if self.decision_action.pending().get_untracked() {
            return;
        }
        self.decision_error.set(None);
        self.in_flight.set(Some(payload.request.id));
        self.decision_action.dispatch(payload);
    }
}

pub fn use_dashboard_view_model() -> DashboardViewModel {
    match use_context::<DashboardViewModel>() {
        Some(vm) => vm,
        None => {
            let vm = DashboardViewModel::new();
            provide_context(vm);
            vm
        }
    }
}
