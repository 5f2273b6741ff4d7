use crate::{
    api::{ApiClient, ApiError, LeaveBalanceResponse, UserResponse, UserRole},
    components::{error::InlineErrorMessage, layout::{Layout, LoadingSpinner}},
    utils::format,
};
use leptos::*;

const ROLE_FILTERS: [(Option<UserRole>, &str); 5] = [
    (None, "All roles"),
    (Some(UserRole::Worker), "Workers"),
    (Some(UserRole::Manager), "Managers"),
    (Some(UserRole::Hr), "HR"),
    (Some(UserRole::Admin), "Admins"),
];

fn parse_role_filter(value: &str) -> Option<UserRole> {
    match value {
        "worker" => Some(UserRole::Worker),
        "manager" => Some(UserRole::Manager),
        "hr" => Some(UserRole::Hr),
        "admin" => Some(UserRole::Admin),
        _ => None,
    }
}

fn role_filter_value(role: Option<UserRole>) -> &'static str {
    match role {
        None => "all",
        Some(UserRole::Worker) => "worker",
        Some(UserRole::Manager) => "manager",
        Some(UserRole::Hr) => "hr",
        Some(UserRole::Admin) => "admin",
    }
}

#[component]
pub fn EmployeesPage() -> impl IntoView {
    let api = use_context::<ApiClient>().unwrap_or_else(ApiClient::new);
    let employees = create_rw_signal(None::<Vec<UserResponse>>);
    let error = create_rw_signal(None::<ApiError>);
    let role_filter = create_rw_signal(None::<UserRole>);
    // last balance fetched, keyed by user id so it renders under that row
    let shown_balance = create_rw_signal(None::<(i64, LeaveBalanceResponse)>);

    let balance_action = {
        let api = api.clone();
        create_action(move |user_id: &i64| {
            let api = api.clone();
            let user_id = *user_id;
            async move {
                api.get_user_balance(user_id)
                    .await
                    .map(|balance| (user_id, balance))
            }
        })
    };
    create_effect(move |_| {
        if let Some(result) = balance_action.value().get() {
            match result {
                Ok(entry) => {
                    error.set(None);
                    shown_balance.set(Some(entry));
                }
                Err(err) => error.set(Some(err)),
            }
        }
    });

    {
        let api = api.clone();
        create_effect(move |_| {
            let api = api.clone();
            let role = role_filter.get();
            spawn_local(async move {
                match api.get_users(role).await {
                    Ok(list) => {
                        employees.set(Some(list));
                        error.set(None);
                    }
                    Err(err) => error.set(Some(err)),
                }
            });
        });
    }

    view! {
        <Layout>
            <div class="space-y-4">
                <div class="flex items-center justify-between">
                    <h2 class="text-lg font-semibold text-fg">"Employees"</h2>
                    <select
                        class="rounded-md border border-border px-3 py-2 text-sm"
                        on:change=move |ev| role_filter.set(parse_role_filter(&event_target_value(&ev)))
                    >
                        {ROLE_FILTERS
                            .into_iter()
                            .map(|(role, label)| {
                                view! { <option value=role_filter_value(role)>{label}</option> }
                            })
                            .collect_view()}
                    </select>
                </div>
                <InlineErrorMessage error=Signal::derive(move || error.get()) />
                {move || match employees.get() {
                    None => view! { <LoadingSpinner /> }.into_view(),
                    Some(list) if list.is_empty() => {
                        view! { <p class="text-sm text-fg-muted">"No employees found"</p> }.into_view()
                    }
                    Some(list) => view! {
                        <div class="bg-surface-elevated rounded-lg shadow divide-y divide-border">
                            {list
                                .into_iter()
                                .map(|employee| {
                                    let id = employee.id;
                                    let row_balance = Signal::derive(move || {
                                        shown_balance
                                            .get()
                                            .filter(|(user_id, _)| *user_id == id)
                                            .map(|(_, balance)| balance)
                                    });
                                    view! {
                                        <div class="p-4 flex justify-between items-center">
                                            <div>
                                                <p class="text-sm font-medium text-fg">{employee.name.clone()}</p>
                                                <p class="text-xs text-fg-muted">
                                                    {employee.phone.clone()}
                                                    {employee
                                                        .email
                                                        .clone()
                                                        .map(|email| format!(" · {}", email))
                                                        .unwrap_or_default()}
                                                </p>
                                                <Show when=move || row_balance.get().is_some()>
                                                    {move || row_balance.get().map(|balance| view! {
                                                        <p class="text-xs text-fg-muted">
                                                            "Casual " {format::day_count(balance.casual)}
                                                            " · Sick " {format::day_count(balance.sick)}
                                                            " · Special " {format::day_count(balance.special)}
                                                        </p>
                                                    })}
                                                </Show>
                                            </div>
                                            <div class="flex items-center gap-3">
                                                <button
                                                    class="text-sm text-fg-muted hover:text-fg hover:underline"
                                                    on:click=move |_| balance_action.dispatch(id)
                                                >
                                                    "Balance"
                                                </button>
                                                <span class="text-sm text-fg-muted">{employee.role.label()}</span>
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
    fn role_filter_values_round_trip() {
        for (role, _) in ROLE_FILTERS {
            assert_eq!(parse_role_filter(role_filter_value(role)), role);
        }
        assert_eq!(parse_role_filter("bogus"), None);
    }
}
