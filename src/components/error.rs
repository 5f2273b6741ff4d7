use crate::api::{ApiError, ApiErrorKind};
use leptos::*;

/// Error banner for inline placement under a form or list. Network failures
/// get a retry hint since they are the only transient kind.
#[component]
pub fn InlineErrorMessage(error: Signal<Option<ApiError>>) -> impl IntoView {
    view! {
        <Show when=move || error.get().is_some() fallback=|| ()>
            <div class="bg-status-error-bg border border-status-error-border text-status-error-text px-4 py-3 rounded space-y-1 my-2">
                <div class="font-bold">
                    {move || error.get().map(|e| e.message).unwrap_or_default()}
                </div>
                {move || {
                    let retryable = error
                        .get()
                        .map(|e| e.kind == ApiErrorKind::Network)
                        .unwrap_or(false);
                    if retryable {
                        view! {
                            <div class="text-xs opacity-75">
                                "Could not reach the server. Check your connection and try again."
                            </div>
                        }
                        .into_view()
                    } else {
                        ().into_view()
                    }
                }}
            </div>
        </Show>
    }
}
