use crate::api::LeaveStatus;
use leptos::*;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ButtonVariant {
    #[default]
    Primary,
    Danger,
    Subtle,
}

impl ButtonVariant {
    pub fn classes(&self) -> &'static str {
        match self {
            ButtonVariant::Primary => "bg-action-primary-bg hover:bg-action-primary-bg-hover text-action-primary-text shadow-sm",
            ButtonVariant::Danger => "bg-action-danger-bg hover:bg-action-danger-bg-hover text-action-danger-text shadow-sm",
            ButtonVariant::Subtle => "bg-action-ghost-bg hover:bg-action-ghost-bg-hover text-fg-muted",
        }
    }
}

#[component]
pub fn Button(
    #[prop(optional)] variant: ButtonVariant,
    #[prop(optional, into)] class: String,
    #[prop(optional, into)] disabled: MaybeSignal<bool>,
    #[prop(optional, into)] loading: MaybeSignal<bool>,
    #[prop(attrs)] attributes: Vec<(&'static str, Attribute)>,
    children: Children,
) -> impl IntoView {
    view! {
        <button
            class=move || {
                format!(
                    "inline-flex items-center justify-center rounded-md px-4 py-2 text-sm font-semibold transition-colors duration-200 disabled:opacity-50 disabled:cursor-not-allowed {} {}",
                    variant.classes(),
                    class
                )
            }
            disabled=move || disabled.get() || loading.get()
            {..attributes}
        >
            <Show when=move || loading.get()>
                <span class="mr-2 h-4 w-4 animate-spin rounded-full border-2 border-current border-t-transparent"></span>
            </Show>
            {children()}
        </button>
    }
}

pub fn status_badge_classes(status: LeaveStatus) -> &'static str {
    match status {
        LeaveStatus::Pending => "bg-status-warning-bg text-status-warning-text",
        LeaveStatus::Approved => "bg-status-success-bg text-status-success-text",
        LeaveStatus::Rejected => "bg-status-error-bg text-status-error-text",
        LeaveStatus::Cancelled => "bg-surface-muted text-fg-muted",
    }
}

#[component]
pub fn StatusBadge(status: LeaveStatus) -> impl IntoView {
    view! {
        <span class=format!(
            "inline-flex items-center rounded-full px-2.5 py-0.5 text-xs font-medium {}",
            status_badge_classes(status)
        )>
            {status.label()}
        </span>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn variants_map_to_distinct_classes() {
        assert!(ButtonVariant::Primary.classes().contains("bg-action-primary-bg"));
        assert!(ButtonVariant::Danger.classes().contains("bg-action-danger-bg"));
        assert_ne!(
            ButtonVariant::Primary.classes(),
            ButtonVariant::Subtle.classes()
        );
    }

    #[test]
    fn every_status_has_a_badge_class() {
        assert!(status_badge_classes(LeaveStatus::Pending).contains("warning"));
        assert!(status_badge_classes(LeaveStatus::Approved).contains("success"));
        assert!(status_badge_classes(LeaveStatus::Rejected).contains("error"));
        assert!(status_badge_classes(LeaveStatus::Cancelled).contains("muted"));
    }
}
