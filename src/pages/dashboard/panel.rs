use crate::{
    components::{
        common::{Button, ButtonVariant, StatusBadge},
        error::InlineErrorMessage,
        layout::{Layout, LoadingSpinner},
    },
    pages::dashboard::{
        utils::{attachment_label, owner_name, row_actions},
        view_model::{use_dashboard_view_model, DecisionKind, DecisionPayload},
    },
    state::auth::use_session,
    utils::format,
};
use leptos::*;

#[component]
pub fn DashboardPage() -> impl IntoView {
    let vm = use_dashboard_view_model();
    let (leave_state, _) = vm.leave_state;

    view! {
        <Layout>
            <div class="grid grid-cols-1 lg:grid-cols-3 gap-6">
                <div class="space-y-6">
                    <BalanceCard />
                    <TodayCard />
                </div>
                <div class="lg:col-span-2 space-y-4">
                    <h2 class="text-lg font-semibold text-fg">"Pending requests"</h2>
                    <Show when=move || leave_state.get().pending.is_stale()>
                        <p class="text-xs text-fg-muted">"Refreshing..."</p>
                    </Show>
                    <InlineErrorMessage error=Signal::derive(move || vm.decision_error.get()) />
                    <PendingList />
                </div>
            </div>
        </Layout>
    }
}

#[component]
fn BalanceCard() -> impl IntoView {
    let vm = use_dashboard_view_model();
    let (leave_state, _) = vm.leave_state;
    view! {
        <div class="bg-surface-elevated rounded-lg shadow p-4 space-y-2">
            <h3 class="text-sm font-semibold text-fg-muted">"My balance"</h3>
            {move || match leave_state.get().balance.get().cloned() {
                None => view! { <LoadingSpinner /> }.into_view(),
                Some(balance) => view! {
                    <dl class="grid grid-cols-3 gap-2 text-center">
                        <div>
                            <dt class="text-xs text-fg-muted">"Casual"</dt>
                            <dd class="text-lg font-semibold text-fg">{format::day_count(balance.casual)}</dd>
                        </div>
                        <div>
                            <dt class="text-xs text-fg-muted">"Sick"</dt>
                            <dd class="text-lg font-semibold text-fg">{format::day_count(balance.sick)}</dd>
                        </div>
                        <div>
                            <dt class="text-xs text-fg-muted">"Special"</dt>
                            <dd class="text-lg font-semibold text-fg">{format::day_count(balance.special)}</dd>
                        </div>
                    </dl>
                }
                .into_view(),
            }}
        </div>
    }
}

#[component]
fn TodayCard() -> impl IntoView {
    let vm = use_dashboard_view_model();
    let (leave_state, _) = vm.leave_state;
    view! {
        <div class="bg-surface-elevated rounded-lg shadow p-4 space-y-2">
            <h3 class="text-sm font-semibold text-fg-muted">"On leave today"</h3>
            {move || match leave_state.get().today.get().cloned() {
                None => view! { <LoadingSpinner /> }.into_view(),
                Some(today) if today.count == 0 => {
                    view! { <p class="text-sm text-fg-muted">"Everyone is in today"</p> }.into_view()
                }
                Some(today) => view! {
                    <ul class="text-sm text-fg space-y-1">
                        {today
                            .employees
                            .iter()
                            .map(|employee| view! { <li>{employee.name.clone()}</li> })
                            .collect_view()}
                    </ul>
                }
                .into_view(),
            }}
        </div>
    }
}

#[component]
fn PendingList() -> impl IntoView {
    let vm = use_dashboard_view_model();
    let (leave_state, _) = vm.leave_state;
    let (session, _) = use_session();

    let rows = move || leave_state.get().pending.get().cloned();

    view! {
        {move || match rows() {
            None => view! { <LoadingSpinner /> }.into_view(),
            Some(requests) if requests.is_empty() => {
                view! { <p class="text-sm text-fg-muted">"No pending requests"</p> }.into_view()
            }
            Some(requests) => requests
                .into_iter()
                .map(|request| {
                    let actor = session.get_untracked().user;
                    let actions = row_actions(actor.as_ref(), &request);
                    let row_busy = Signal::derive({
                        let id = request.id;
                        move || vm.in_flight.get() == Some(id)
                    });
                    let reject_open = Signal::derive({
                        let id = request.id;
                        move || vm.reject_target.get().map(|r| r.id) == Some(id)
                    });
                    let approve_request = request.clone();
                    let reject_request = request.clone();
                    let cancel_request = request.clone();
                    let confirm_request = request.clone();
                    view! {
                        <div class="bg-surface-elevated rounded-lg shadow p-4 space-y-2">
                            <div class="flex justify-between items-start">
                                <div>
                                    <p class="font-medium text-fg">{owner_name(&request)}</p>
                                    <p class="text-sm text-fg-muted">
                                        {format::date_range(request.start_date, request.end_date)}
                                        " · "
                                        {format::day_count(request.days)}
                                        " · "
                                        {request.leave_type.label()}
                                        " · "
                                        {request.duration_type.label()}
                                    </p>
                                    {request
                                        .reason
                                        .clone()
                                        .map(|reason| {
                                            view! { <p class="text-sm text-fg-muted italic">{reason}</p> }
                                        })}
                                    {(!request.attachments.is_empty()).then(|| view! {
                                        <p class="text-sm">
                                            {request
                                                .attachments
                                                .iter()
                                                .map(|attachment| view! {
                                                    <a
                                                        class="text-fg-muted underline hover:text-fg mr-2"
                                                        href=attachment.file_url.clone()
                                                        target="_blank"
                                                    >
                                                        {attachment_label(attachment)}
                                                    </a>
                                                })
                                                .collect_view()}
                                        </p>
                                    })}
                                </div>
                                <StatusBadge status=request.status />
                            </div>
                            <div class="flex gap-2">
                                <Show when=move || actions.approve>
                                    <Button
                                        loading=row_busy
                                        on:click={
                                            let request = approve_request.clone();
                                            move |_| vm.dispatch(DecisionPayload {
                                                kind: DecisionKind::Approve,
                                                request: request.clone(),
                                                reason: None,
                                            })
                                        }
                                    >
                                        "Approve"
                                    </Button>
                                </Show>
                                <Show when=move || actions.reject>
                                    <Button
                                        variant=ButtonVariant::Danger
                                        disabled=row_busy
                                        on:click={
                                            let request = reject_request.clone();
                                            move |_| {
                                                vm.reject_reason.set(String::new());
                                                vm.reject_target.set(Some(request.clone()));
                                            }
                                        }
                                    >
                                        "Reject"
                                    </Button>
                                </Show>
                                <Show when=move || actions.cancel>
                                    <Button
                                        variant=ButtonVariant::Subtle
                                        loading=row_busy
                                        on:click={
                                            let request = cancel_request.clone();
                                            move |_| vm.dispatch(DecisionPayload {
                                                kind: DecisionKind::Cancel,
                                                request: request.clone(),
                                                reason: None,
                                            })
                                        }
                                    >
                                        "Cancel request"
                                    </Button>
                                </Show>
                            </div>
                            <Show when=move || reject_open.get()>
                                <div class="space-y-2 border-t border-border pt-2">
                                    <label class="block text-sm text-fg-muted">"Reason for rejection"</label>
                                    <textarea
                                        class="w-full rounded-md border border-border px-3 py-2 text-sm"
                                        prop:value=move || vm.reject_reason.get()
                                        on:input=move |ev| vm.reject_reason.set(event_target_value(&ev))
                                    ></textarea>
                                    <div class="flex gap-2">
                                        <Button
                                            variant=ButtonVariant::Danger
                                            loading=row_busy
                                            disabled=Signal::derive(move || {
                                                vm.reject_reason.get().trim().is_empty()
                                            })
                                            on:click={
                                                let request = confirm_request.clone();
                                                move |_| vm.dispatch(DecisionPayload {
                                                    kind: DecisionKind::Reject,
                                                    request: request.clone(),
                                                    reason: Some(vm.reject_reason.get_untracked()),
                                                })
                                            }
                                        >
                                            "Confirm rejection"
                                        </Button>
                                        <Button
                                            variant=ButtonVariant::Subtle
                                            on:click=move |_| vm.reject_target.set(None)
                                        >
                                            "Keep pending"
                                        </Button>
                                    </div>
                                </div>
                            </Show>
                        </div>
                    }
                })
                .collect_view(),
        }}
    }
}
