use leptos::*;
use leptos_router::*;

pub mod api;
pub mod components;
pub mod config;
pub mod lifecycle;
pub mod pages;
pub mod state;
pub mod utils;

#[cfg(test)]
pub mod test_support;

use pages::{
    dashboard::DashboardPage, employees::EmployeesPage, history::HistoryPage,
    holidays::HolidaysPage, home::HomePage, login::LoginPage, new_request::NewRequestPage,
};

/// Initializes logging and runtime config, then mounts the router. Config
/// resolution finishes before the first page renders so no request races the
/// base URL lookup.
pub fn run() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
    log::info!("starting leave dashboard");

    spawn_local(async move {
        config::init().await;
        log::info!("runtime config initialized");
        mount_to_body(|| {
            view! {
                <crate::state::auth::SessionProvider>
                    <crate::state::leave::LeaveProvider>
                        <Router>
                            <Routes>
                                <Route path="/" view=HomePage/>
                                <Route path="/login" view=LoginPage/>
                                <Route path="/dashboard" view=ProtectedDashboard/>
                                <Route path="/history" view=ProtectedHistory/>
                                <Route path="/requests/new" view=ProtectedNewRequest/>
                                <Route path="/holidays" view=ProtectedHolidays/>
                                <Route path="/employees" view=ProtectedEmployees/>
                            </Routes>
                        </Router>
                    </crate::state::leave::LeaveProvider>
                </crate::state::auth::SessionProvider>
            }
        });
    });
}

#[component]
fn ProtectedDashboard() -> impl IntoView {
    view! { <crate::components::guard::RequireSession><DashboardPage/></crate::components::guard::RequireSession> }
}

#[component]
fn ProtectedHistory() -> impl IntoView {
    view! { <crate::components::guard::RequireSession><HistoryPage/></crate::components::guard::RequireSession> }
}

#[component]
fn ProtectedNewRequest() -> impl IntoView {
    view! { <crate::components::guard::RequireSession><NewRequestPage/></crate::components::guard::RequireSession> }
}

#[component]
fn ProtectedHolidays() -> impl IntoView {
    view! { <crate::components::guard::RequireHrAdmin><HolidaysPage/></crate::components::guard::RequireHrAdmin> }
}

#[component]
fn ProtectedEmployees() -> impl IntoView {
    view! { <crate::components::guard::RequireHrAdmin><EmployeesPage/></crate::components::guard::RequireHrAdmin> }
}
