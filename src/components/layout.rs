use crate::state::auth::{self, use_session};
use leptos::*;

#[component]
pub fn Header() -> impl IntoView {
    let (session, _set_session) = use_session();
    let can_manage_people = move || {
        session
            .get()
            .user
            .as_ref()
            .map(|user| user.role.has_blanket_authority())
            .unwrap_or(false)
    };
    let user_label = move || {
        session
            .get()
            .user
            .as_ref()
            .map(|user| format!("{} ({})", user.name, user.role.label()))
            .unwrap_or_default()
    };
    let logout_action = auth::use_logout_action();
    create_effect(move |_| {
        if logout_action.value().get().is_some() {
            #[cfg(target_arch = "wasm32")]
            if let Some(win) = web_sys::window() {
                let _ = win.location().set_href("/login");
            }
        }
    });
    let on_logout = move |_| logout_action.dispatch(());
    view! {
        <header class="bg-surface-elevated shadow-sm border-b border-border">
            <div class="max-w-7xl mx-auto px-4 sm:px-6 lg:px-8">
                <div class="flex justify-between items-center h-16">
                    <h1 class="text-xl font-semibold text-fg">"Leave Dashboard"</h1>
                    <nav class="flex space-x-4 items-center">
                        <a href="/dashboard" class="text-fg-muted hover:text-fg px-3 py-2 rounded-md text-sm font-medium hover:bg-action-ghost-bg-hover">
                            "Dashboard"
                        </a>
                        <a href="/history" class="text-fg-muted hover:text-fg px-3 py-2 rounded-md text-sm font-medium hover:bg-action-ghost-bg-hover">
                            "History"
                        </a>
                        <a href="/requests/new" class="text-fg-muted hover:text-fg px-3 py-2 rounded-md text-sm font-medium hover:bg-action-ghost-bg-hover">
                            "New request"
                        </a>
                        <Show when=can_manage_people>
                            <a href="/holidays" class="text-fg-muted hover:text-fg px-3 py-2 rounded-md text-sm font-medium hover:bg-action-ghost-bg-hover">
                                "Holidays"
                            </a>
                            <a href="/employees" class="text-fg-muted hover:text-fg px-3 py-2 rounded-md text-sm font-medium hover:bg-action-ghost-bg-hover">
                                "Employees"
                            </a>
                        </Show>
                        <span class="text-fg-muted text-sm px-3">{user_label}</span>
                        <button
                            on:click=on_logout
                            class="text-fg-muted hover:text-fg px-3 py-2 rounded-md text-sm font-medium hover:bg-action-ghost-bg-hover"
                        >
                            "Sign out"
                        </button>
                    </nav>
                </div>
            </div>
        </header>
    }
}

#[component]
pub fn Layout(children: Children) -> impl IntoView {
    view! {
        <div class="min-h-screen bg-surface">
            <Header/>
            <main class="max-w-7xl mx-auto py-6 sm:px-6 lg:px-8">
                {children()}
            </main>
        </div>
    }
}

#[component]
pub fn LoadingSpinner() -> impl IntoView {
    view! {
        <div class="flex justify-center items-center p-8">
            <div class="animate-spin rounded-full h-8 w-8 border-b-2 border-action-primary-bg"></div>
        </div>
    }
}

#[component]
pub fn SuccessMessage(message: String) -> impl IntoView {
    view! {
        <div class="bg-status-success-bg border border-status-success-border text-status-success-text px-4 py-3 rounded mb-4">
            <p class="text-sm">{message}</p>
        </div>
    }
}
