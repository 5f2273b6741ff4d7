use crate::{api::UserResponse, components::layout::LoadingSpinner, state::auth::use_session};
use leptos::*;

fn redirect(path: &str) {
    #[cfg(target_arch = "wasm32")]
    if let Some(win) = web_sys::window() {
        let _ = win.location().set_href(path);
    }
    #[cfg(not(target_arch = "wasm32"))]
    let _ = path;
}

#[component]
pub fn RequireSession(children: ChildrenFn) -> impl IntoView {
    let (session, _) = use_session();
    let is_authenticated = create_memo(move |_| session.get().is_authenticated);
    let is_loading = create_memo(move |_| session.get().loading);
    create_effect(move |_| {
        let state = session.get();
        if state.loading || state.is_authenticated {
            return;
        }
        redirect("/login");
    });
    view! {
        <Show
            when=move || should_render_children(is_authenticated.get(), is_loading.get())
            fallback=move || {
                if is_loading.get() {
                    view! { <LoadingSpinner /> }.into_view()
                } else {
                    ().into_view()
                }
            }
        >
            {children()}
        </Show>
    }
}

fn should_render_children(is_authenticated: bool, is_loading: bool) -> bool {
    is_authenticated && !is_loading
}

/// Gate for the people-management pages (holiday calendar, employee
/// directory). Managers keep the dashboard but are bounced from these.
#[component]
pub fn RequireHrAdmin(children: ChildrenFn) -> impl IntoView {
    let (session, _) = use_session();
    let is_authenticated = create_memo(move |_| session.get().is_authenticated);
    let is_loading = create_memo(move |_| session.get().loading);
    let is_hr_admin = create_memo(move |_| is_hr_or_admin(session.get().user.as_ref()));
    create_effect(move |_| {
        let state = session.get();
        if state.loading {
            return;
        }
        let target = if !state.is_authenticated {
            "/login"
        } else if !is_hr_or_admin(state.user.as_ref()) {
            "/dashboard"
        } else {
            return;
        };
        redirect(target);
    });
    view! {
        <Show
            when=move || {
                should_render_hr_children(is_authenticated.get(), is_loading.get(), is_hr_admin.get())
            }
            fallback=move || {
                if is_loading.get() {
                    view! { <LoadingSpinner /> }.into_view()
                } else {
                    ().into_view()
                }
            }
        >
            {children()}
        </Show>
    }
}

fn is_hr_or_admin(user: Option<&UserResponse>) -> bool {
    user.map(|u| u.role.has_blanket_authority()).unwrap_or(false)
}

fn should_render_hr_children(is_authenticated: bool, is_loading: bool, is_hr_admin: bool) -> bool {
    is_authenticated && is_hr_admin && !is_loading
}
