use crate::{
    api::ApiError,
    components::error::InlineErrorMessage,
    pages::login::utils,
    state::auth,
};
use leptos::{ev::SubmitEvent, *};

#[component]
pub fn LoginPanel() -> impl IntoView {
    let (email, set_email) = create_signal(String::new());
    let (password, set_password) = create_signal(String::new());
    let (error, set_error) = create_signal(None::<ApiError>);

    let login_action = auth::use_login_action();
    let pending = login_action.pending();

    create_effect(move |_| {
        if let Some(result) = login_action.value().get() {
            match result {
                Ok(_) => {
                    set_error.set(None);
                    #[cfg(target_arch = "wasm32")]
                    if let Some(window) = web_sys::window() {
                        let _ = window.location().set_href("/dashboard");
                    }
                }
                Err(err) => set_error.set(Some(err)),
            }
        }
    });

    let handle_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        if pending.get_untracked() {
            return;
        }
        let email_value = email.get_untracked();
        let password_value = password.get_untracked();

        if let Err(msg) = utils::validate_credentials(&email_value, &password_value) {
            set_error.set(Some(ApiError::validation(msg)));
            return;
        }
        set_error.set(None);
        login_action.dispatch((email_value.trim().to_string(), password_value));
    };

    view! {
        <div class="min-h-screen bg-surface flex items-center justify-center py-12 px-4">
            <div class="max-w-md w-full space-y-6">
                <h1 class="text-center text-3xl font-extrabold text-fg">"Leave Dashboard"</h1>
                <p class="text-center text-sm text-fg-muted">
                    "Sign in with a manager, HR or admin account"
                </p>
                <form class="space-y-4" on:submit=handle_submit>
                    <div>
                        <label class="block text-sm font-medium text-fg-muted" for="email">"Email"</label>
                        <input
                            id="email"
                            type="email"
                            class="mt-1 block w-full rounded-md border border-border px-3 py-2 text-sm"
                            prop:value=email
                            on:input=move |ev| set_email.set(event_target_value(&ev))
                        />
                    </div>
                    <div>
                        <label class="block text-sm font-medium text-fg-muted" for="password">"Password"</label>
                        <input
                            id="password"
                            type="password"
                            class="mt-1 block w-full rounded-md border border-border px-3 py-2 text-sm"
                            prop:value=password
                            on:input=move |ev| set_password.set(event_target_value(&ev))
                        />
                    </div>
                    <InlineErrorMessage error=Signal::derive(move || error.get()) />
                    <button
                        type="submit"
                        class="w-full flex justify-center rounded-md bg-action-primary-bg px-4 py-2 text-sm font-semibold text-action-primary-text hover:bg-action-primary-bg-hover disabled:opacity-50"
                        disabled=move || pending.get()
                    >
                        {move || if pending.get() { "Signing in..." } else { "Sign in" }}
                    </button>
                </form>
            </div>
        </div>
    }
}
