use crate::{
    api::{ApiClient, ApiError, CreateLeaveRequest, DurationType, LeaveType},
    components::{error::InlineErrorMessage, layout::{Layout, SuccessMessage}},
    state::leave::{self, use_leave},
};
use chrono::NaiveDate;
use leptos::{ev::SubmitEvent, *};

/// Client-side shape check before the round trip. Date-order, balance and
/// holiday rules stay on the server so its messages surface verbatim; this
/// only rejects forms that cannot be serialized at all.
pub fn validate_form(
    start: &str,
    end: &str,
    duration: DurationType,
) -> Result<(NaiveDate, NaiveDate), String> {
    let start = NaiveDate::parse_from_str(start, "%Y-%m-%d")
        .map_err(|_| "Pick a start date".to_string())?;
    let end =
        NaiveDate::parse_from_str(end, "%Y-%m-%d").map_err(|_| "Pick an end date".to_string())?;
    if duration != DurationType::Full && start != end {
        return Err("Half-day leave must cover a single date".into());
    }
    Ok((start, end))
}

fn parse_leave_type(value: &str) -> LeaveType {
    LeaveType::ALL
        .into_iter()
        .find(|t| t.as_str() == value)
        .unwrap_or(LeaveType::Casual)
}

fn parse_duration(value: &str) -> DurationType {
    DurationType::ALL
        .into_iter()
        .find(|d| d.as_str() == value)
        .unwrap_or(DurationType::Full)
}

#[component]
pub fn NewRequestPage() -> impl IntoView {
    let api = use_context::<ApiClient>().unwrap_or_else(ApiClient::new);
    let (_, set_leave_state) = use_leave();

    let start = create_rw_signal(String::new());
    let end = create_rw_signal(String::new());
    let leave_type = create_rw_signal(LeaveType::Casual);
    let duration = create_rw_signal(DurationType::Full);
    let reason = create_rw_signal(String::new());
    let error = create_rw_signal(None::<ApiError>);
    let submitted = create_rw_signal(false);

    let submit_action = create_action(move |payload: &CreateLeaveRequest| {
        let api = api.clone();
        let payload = payload.clone();
        async move { leave::submit_request(&api, set_leave_state, payload).await }
    });
    let pending = submit_action.pending();

    create_effect(move |_| {
        if let Some(result) = submit_action.value().get() {
            match result {
                Ok(_) => {
                    error.set(None);
                    submitted.set(true);
                    start.set(String::new());
                    end.set(String::new());
                    reason.set(String::new());
                }
                Err(err) => {
                    submitted.set(false);
                    error.set(Some(err));
                }
            }
        }
    });

    let handle_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        if pending.get_untracked() {
            return;
        }
        submitted.set(false);
        let parsed = validate_form(
            &start.get_untracked(),
            &end.get_untracked(),
            duration.get_untracked(),
        );
        match parsed {
            Err(msg) => error.set(Some(ApiError::validation(msg))),
            Ok((start_date, end_date)) => {
                error.set(None);
                let reason_value = reason.get_untracked();
                submit_action.dispatch(CreateLeaveRequest {
                    start_date,
                    end_date,
                    leave_type: leave_type.get_untracked(),
                    duration_type: duration.get_untracked(),
                    reason: if reason_value.trim().is_empty() {
                        None
                    } else {
                        Some(reason_value)
                    },
                });
            }
        }
    };

    view! {
        <Layout>
            <div class="max-w-lg mx-auto space-y-4">
                <h2 class="text-lg font-semibold text-fg">"Request leave"</h2>
                <Show when=move || submitted.get()>
                    <SuccessMessage message="Request submitted and waiting for approval".into() />
                </Show>
                <InlineErrorMessage error=Signal::derive(move || error.get()) />
                <form class="space-y-4 bg-surface-elevated rounded-lg shadow p-4" on:submit=handle_submit>
                    <div class="grid grid-cols-2 gap-4">
                        <div>
                            <label class="block text-sm text-fg-muted" for="start">"From"</label>
                            <input
                                id="start"
                                type="date"
                                class="mt-1 block w-full rounded-md border border-border px-3 py-2 text-sm"
                                prop:value=start
                                on:input=move |ev| start.set(event_target_value(&ev))
                            />
                        </div>
                        <div>
                            <label class="block text-sm text-fg-muted" for="end">"To"</label>
                            <input
                                id="end"
                                type="date"
                                class="mt-1 block w-full rounded-md border border-border px-3 py-2 text-sm"
                                prop:value=end
                                on:input=move |ev| end.set(event_target_value(&ev))
                            />
                        </div>
                    </div>
                    <div>
                        <label class="block text-sm text-fg-muted" for="leave-type">"Type"</label>
                        <select
                            id="leave-type"
                            class="mt-1 block w-full rounded-md border border-border px-3 py-2 text-sm"
                            on:change=move |ev| leave_type.set(parse_leave_type(&event_target_value(&ev)))
                        >
                            {LeaveType::ALL
                                .into_iter()
                                .map(|t| view! { <option value=t.as_str()>{t.label()}</option> })
                                .collect_view()}
                        </select>
                    </div>
                    <div>
                        <label class="block text-sm text-fg-muted" for="duration">"Duration"</label>
                        <select
                            id="duration"
                            class="mt-1 block w-full rounded-md border border-border px-3 py-2 text-sm"
                            on:change=move |ev| duration.set(parse_duration(&event_target_value(&ev)))
                        >
                            {DurationType::ALL
                                .into_iter()
                                .map(|d| view! { <option value=d.as_str()>{d.label()}</option> })
                                .collect_view()}
                        </select>
                    </div>
                    <div>
                        <label class="block text-sm text-fg-muted" for="reason">"Reason (optional)"</label>
                        <textarea
                            id="reason"
                            class="mt-1 block w-full rounded-md border border-border px-3 py-2 text-sm"
                            prop:value=reason
                            on:input=move |ev| reason.set(event_target_value(&ev))
                        ></textarea>
                    </div>
                    <button
                        type="submit"
                        class="w-full rounded-md bg-action-primary-bg px-4 py-2 text-sm font-semibold text-action-primary-text hover:bg-action-primary-bg-hover disabled:opacity-50"
                        disabled=move || pending.get()
                    >
                        {move || if pending.get() { "Submitting..." } else { "Submit request" }}
                    </button>
                </form>
            </div>
        </Layout>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_missing_dates() {
        assert!(validate_form("", "2024-12-16", DurationType::Full).is_err());
        assert!(validate_form("2024-12-15", "", DurationType::Full).is_err());
    }

    #[test]
    fn inverted_dates_are_left_to_the_server() {
        // the backend reports the range error; its message is shown verbatim
        assert!(validate_form("2024-12-16", "2024-12-15", DurationType::Full).is_ok());
    }

    #[test]
    fn half_day_must_be_a_single_date() {
        assert!(validate_form("2024-12-15", "2024-12-16", DurationType::HalfMorning).is_err());
        assert!(validate_form("2024-12-15", "2024-12-15", DurationType::HalfAfternoon).is_ok());
    }

    #[test]
    fn full_day_ranges_parse() {
        let (start, end) = validate_form("2024-12-15", "2024-12-20", DurationType::Full).unwrap();
        assert_eq!(start, NaiveDate::from_ymd_opt(2024, 12, 15).unwrap());
        assert_eq!(end, NaiveDate::from_ymd_opt(2024, 12, 20).unwrap());
    }

    #[test]
    fn select_values_round_trip() {
        assert_eq!(parse_leave_type("sick"), LeaveType::Sick);
        assert_eq!(parse_leave_type("bogus"), LeaveType::Casual);
        assert_eq!(parse_duration("half_morning"), DurationType::HalfMorning);
        assert_eq!(parse_duration(""), DurationType::Full);
    }
}
