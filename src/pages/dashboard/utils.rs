use crate::{
    api::{AttachmentResponse, LeaveRequestResponse, UserResponse},
    lifecycle,
};

/// Buttons a given row should offer the signed-in actor. Everything here is
/// advisory; the server re-checks on every transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RowActions {
    pub approve: bool,
    pub reject: bool,
    pub cancel: bool,
}

pub fn row_actions(actor: Option<&UserResponse>, request: &LeaveRequestResponse) -> RowActions {
    let Some(actor) = actor else {
        return RowActions::default();
    };
    RowActions {
        approve: lifecycle::can_approve(actor, request),
        reject: lifecycle::can_reject(actor, request),
        cancel: lifecycle::can_cancel(actor, request),
    }
}

pub fn owner_name(request: &LeaveRequestResponse) -> String {
    request
        .user
        .as_ref()
        .map(|user| user.name.clone())
        .unwrap_or_else(|| format!("User #{}", request.user_id))
}

/// Link label for an attachment, taken from the tail of its URL.
pub fn attachment_label(attachment: &AttachmentResponse) -> String {
    attachment
        .file_url
        .rsplit('/')
        .next()
        .filter(|tail| !tail.is_empty())
        .unwrap_or("attachment")
        .to_string()
}
