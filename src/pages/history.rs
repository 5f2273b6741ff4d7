use crate::{
    api::{ApiClient, ApiError, LeaveRequestResponse, LeaveStatus},
    components::{common::StatusBadge, error::InlineErrorMessage, layout::{Layout, LoadingSpinner}},
    lifecycle,
    state::{
        auth::use_session,
        leave::{self, use_leave},
    },
    utils::format,
};
use leptos::*;

const HISTORY_PAGE_SIZE: u32 = 100;

pub fn status_filter_options() -> [(Option<LeaveStatus>, &'static str); 5] {
    [
        (None, "All"),
        (Some(LeaveStatus::Pending), "Pending"),
        (Some(LeaveStatus::Approved), "Approved"),
        (Some(LeaveStatus::Rejected), "Rejected"),
        (Some(LeaveStatus::Cancelled), "Cancelled"),
    ]
}

fn parse_status_filter(value: &str) -> Option<LeaveStatus> {
    status_filter_options()
        .into_iter()
        .find(|(status, _)| {
            status.map(|s| s.as_str()).unwrap_or("all") == value
        })
        .and_then(|(status, _)| status)
}

#[component]
pub fn HistoryPage() -> impl IntoView {
    let api = use_context::<ApiClient>().unwrap_or_else(ApiClient::new);
    let (session, _) = use_session();
    let (leave_state, set_leave_state) = use_leave();
    let filter = create_rw_signal(None::<LeaveStatus>);
    let error = create_rw_signal(None::<ApiError>);

    {
        let api = api.clone();
        create_effect(move |_| {
            let api = api.clone();
            let status = filter.get();
            spawn_local(async move {
                match leave::load_history(&api, set_leave_state, status, None, Some(HISTORY_PAGE_SIZE))
                    .await
                {
                    Ok(()) => error.set(None),
                    Err(err) => error.set(Some(err)),
                }
            });
        });
    }

    let cancel_action = {
        let api = api.clone();
        create_action(move |request: &LeaveRequestResponse| {
            let api = api.clone();
            let request = request.clone();
            async move {
                let actor = session
                    .get_untracked()
                    .user
                    .ok_or_else(|| ApiError::auth("not signed in"))?;
                leave::cancel_request(&api, set_leave_state, &actor, &request).await?;
                leave::load_history(
                    &api,
                    set_leave_state,
                    filter.get_untracked(),
                    None,
                    Some(HISTORY_PAGE_SIZE),
                )
                .await
            }
        })
    };
    let cancel_pending = cancel_action.pending();
    create_effect(move |_| {
        if let Some(result) = cancel_action.value().get() {
            match result {
                Ok(()) => error.set(None),
                Err(err) => error.set(Some(err)),
            }
        }
    });

    view! {
        <Layout>
            <div class="space-y-4">
                <div class="flex items-center justify-between">
                    <h2 class="text-lg font-semibold text-fg">"Leave history"</h2>
                    <select
                        class="rounded-md border border-border px-3 py-2 text-sm"
                        on:change=move |ev| filter.set(parse_status_filter(&event_target_value(&ev)))
                    >
                        {status_filter_options()
                            .into_iter()
                            .map(|(status, label)| {
                                let value = status.map(|s| s.as_str()).unwrap_or("all");
                                view! { <option value=value>{label}</option> }
                            })
                            .collect_view()}
                    </select>
                </div>
                <InlineErrorMessage error=Signal::derive(move || error.get()) />
                {move || match leave_state.get().history.get().cloned() {
                    None => view! { <LoadingSpinner /> }.into_view(),
                    Some(requests) if requests.is_empty() => {
                        view! { <p class="text-sm text-fg-muted">"No requests match this filter"</p> }
                            .into_view()
                    }
                    Some(requests) => view! {
                        <div class="bg-surface-elevated rounded-lg shadow divide-y divide-border">
                            {requests
                                .into_iter()
                                .map(|request| {
                                    let actor = session.get_untracked().user;
                                    let can_cancel = actor
                                        .as_ref()
                                        .map(|actor| lifecycle::can_cancel(actor, &request))
                                        .unwrap_or(false);
                                    let cancel_request = request.clone();
                                    view! {
                                        <div class="p-4 flex justify-between items-start">
                                            <div>
                                                <p class="text-sm text-fg">
                                                    {format::date_range(request.start_date, request.end_date)}
                                                    " · "
                                                    {format::day_count(request.days)}
                                                    " · "
                                                    {request.leave_type.label()}
                                                </p>
                                                {request.reason.clone().map(|reason| {
                                                    view! { <p class="text-sm text-fg-muted italic">{reason}</p> }
                                                })}
                                                {request.rejection_reason.clone().map(|reason| {
                                                    view! {
                                                        <p class="text-sm text-status-error-text">
                                                            "Rejected: " {reason}
                                                        </p>
                                                    }
                                                })}
                                            </div>
                                            <div class="flex items-center gap-3">
                                                <Show when=move || can_cancel>
                                                    <button
                                                        class="text-sm text-fg-muted hover:text-fg hover:underline disabled:opacity-50"
                                                        disabled=move || cancel_pending.get()
                                                        on:click={
                                                            let request = cancel_request.clone();
                                                            move |_| {
                                                                if !cancel_pending.get_untracked() {
                                                                    cancel_action.dispatch(request.clone());
                                                                }
                                                            }
                                                        }
                                                    >
                                                        "Cancel"
                                                    </button>
                                                </Show>
                                                <StatusBadge status=request.status />
                                            </div>
                                        </div>
                                    }
                                })
                                .collect_view()}
                        </div>
                    }
                    .into_view(),
                }}
            </div>
        </Layout>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter_options_cover_every_status() {
        let options = status_filter_options();
        assert_eq!(options.len(), 5);
        assert_eq!(options[0].0, None);
        for status in [
            LeaveStatus::Pending,
            LeaveStatus::Approved,
            LeaveStatus::Rejected,
            LeaveStatus::Cancelled,
        ] {
            assert!(options.iter().any(|(s, _)| *s == Some(status)));
        }
    }

    #[test]
    fn parse_round_trips_option_values() {
        assert_eq!(parse_status_filter("all"), None);
        assert_eq!(parse_status_filter("approved"), Some(LeaveStatus::Approved));
        assert_eq!(parse_status_filter("rejected"), Some(LeaveStatus::Rejected));
        assert_eq!(parse_status_filter("bogus"), None);
    }
}
