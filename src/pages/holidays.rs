use crate::{
    api::{ApiClient, ApiError, CreateHolidayRequest, HolidayResponse},
    components::{error::InlineErrorMessage, layout::{Layout, LoadingSpinner}},
};
use chrono::NaiveDate;
use leptos::{ev::SubmitEvent, *};

fn validate_holiday(date: &str, name: &str) -> Result<CreateHolidayRequest, String> {
    let date =
        NaiveDate::parse_from_str(date, "%Y-%m-%d").map_err(|_| "Pick a date".to_string())?;
    let name = name.trim();
    if name.is_empty() {
        return Err("Give the holiday a name".into());
    }
    Ok(CreateHolidayRequest {
        date,
        name: name.to_string(),
        description: None,
    })
}

#[component]
pub fn HolidaysPage() -> impl IntoView {
    let api = use_context::<ApiClient>().unwrap_or_else(ApiClient::new);
    let holidays = create_rw_signal(None::<Vec<HolidayResponse>>);
    let error = create_rw_signal(None::<ApiError>);
    let date = create_rw_signal(String::new());
    let name = create_rw_signal(String::new());
    let refresh_tick = create_rw_signal(0u32);

    {
        let api = api.clone();
        create_effect(move |_| {
            refresh_tick.get();
            let api = api.clone();
            spawn_local(async move {
                match api.get_holidays(None).await {
                    Ok(list) => {
                        holidays.set(Some(list));
                        error.set(None);
                    }
                    Err(err) => error.set(Some(err)),
                }
            });
        });
    }

    let add_action = {
        let api = api.clone();
        create_action(move |payload: &CreateHolidayRequest| {
            let api = api.clone();
            let payload = payload.clone();
            async move { api.create_holiday(&payload).await }
        })
    };
    let create_pending = add_action.pending();
    create_effect(move |_| {
        if let Some(result) = add_action.value().get() {
            match result {
                Ok(_) => {
                    error.set(None);
                    date.set(String::new());
                    name.set(String::new());
                    refresh_tick.update(|tick| *tick += 1);
                }
                Err(err) => error.set(Some(err)),
            }
        }
    });

    let delete_action = {
        let api = api.clone();
        create_action(move |id: &i64| {
            let api = api.clone();
            let id = *id;
            async move { api.delete_holiday(id).await }
        })
    };
    create_effect(move |_| {
        if let Some(result) = delete_action.value().get() {
            match result {
                Ok(()) => refresh_tick.update(|tick| *tick += 1),
                Err(err) => error.set(Some(err)),
            }
        }
    });

    let handle_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        if create_pending.get_untracked() {
            return;
        }
        match validate_holiday(&date.get_untracked(), &name.get_untracked()) {
            Err(msg) => error.set(Some(ApiError::validation(msg))),
            Ok(payload) => add_action.dispatch(payload),
        }
    };

    view! {
        <Layout>
            <div class="max-w-2xl mx-auto space-y-4">
                <h2 class="text-lg font-semibold text-fg">"Company holidays"</h2>
                <InlineErrorMessage error=Signal::derive(move || error.get()) />
                <form class="flex gap-2 items-end bg-surface-elevated rounded-lg shadow p-4" on:submit=handle_submit>
                    <div>
                        <label class="block text-sm text-fg-muted" for="holiday-date">"Date"</label>
                        <input
                            id="holiday-date"
                            type="date"
                            class="mt-1 rounded-md border border-border px-3 py-2 text-sm"
                            prop:value=date
                            on:input=move |ev| date.set(event_target_value(&ev))
                        />
                    </div>
                    <div class="flex-1">
                        <label class="block text-sm text-fg-muted" for="holiday-name">"Name"</label>
                        <input
                            id="holiday-name"
                            type="text"
                            class="mt-1 w-full rounded-md border border-border px-3 py-2 text-sm"
                            prop:value=name
                            on:input=move |ev| name.set(event_target_value(&ev))
                        />
                    </div>
                    <button
                        type="submit"
                        class="rounded-md bg-action-primary-bg px-4 py-2 text-sm font-semibold text-action-primary-text hover:bg-action-primary-bg-hover disabled:opacity-50"
                        disabled=move || create_pending.get()
                    >
                        "Add"
                    </button>
                </form>
                {move || match holidays.get() {
                    None => view! { <LoadingSpinner /> }.into_view(),
                    Some(list) if list.is_empty() => {
                        view! { <p class="text-sm text-fg-muted">"No holidays configured"</p> }.into_view()
                    }
                    Some(list) => view! {
                        <div class="bg-surface-elevated rounded-lg shadow divide-y divide-border">
                            {list
                                .into_iter()
                                .map(|holiday| {
                                    let id = holiday.id;
                                    view! {
                                        <div class="p-4 flex justify-between items-center">
                                            <div>
                                                <p class="text-sm text-fg">{holiday.name.clone()}</p>
                                                <p class="text-xs text-fg-muted">{holiday.date.format("%Y-%m-%d").to_string()}</p>
                                            </div>
                                            <button
                                                class="text-sm text-status-error-text hover:underline"
                                                on:click=move |_| delete_action.dispatch(id)
                                            >
                                                "Remove"
                                            </button>
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
