use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    Worker,
    Manager,
    Hr,
    Admin,
}

impl UserRole {
    /// Roles allowed on the dashboard surface. Workers submit leave through
    /// the messaging channel instead.
    pub fn can_use_dashboard(&self) -> bool {
        !matches!(self, UserRole::Worker)
    }

    /// HR and admin have authority over every user; managers only over their
    /// direct reports.
    pub fn has_blanket_authority(&self) -> bool {
        matches!(self, UserRole::Hr | UserRole::Admin)
    }

    pub fn label(&self) -> &'static str {
        match self {
            UserRole::Worker => "Worker",
            UserRole::Manager => "Manager",
            UserRole::Hr => "HR",
            UserRole::Admin => "Admin",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeaveType {
    Casual,
    Sick,
    Special,
}

impl LeaveType {
    pub const ALL: [LeaveType; 3] = [LeaveType::Casual, LeaveType::Sick, LeaveType::Special];

    pub fn label(&self) -> &'static str {
        match self {
            LeaveType::Casual => "Casual",
            LeaveType::Sick => "Sick",
            LeaveType::Special => "Special",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LeaveType::Casual => "casual",
            LeaveType::Sick => "sick",
            LeaveType::Special => "special",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DurationType {
    Full,
    HalfMorning,
    HalfAfternoon,
}

impl DurationType {
    pub const ALL: [DurationType; 3] = [
        DurationType::Full,
        DurationType::HalfMorning,
        DurationType::HalfAfternoon,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            DurationType::Full => "Full day",
            DurationType::HalfMorning => "Half day (morning)",
            DurationType::HalfAfternoon => "Half day (afternoon)",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DurationType::Full => "full",
            DurationType::HalfMorning => "half_morning",
            DurationType::HalfAfternoon => "half_afternoon",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeaveStatus {
    Pending,
    Approved,
    Rejected,
    Cancelled,
}

impl LeaveStatus {
    /// Every status except `pending` is terminal: no further transition is
    /// permitted once a request is decided or withdrawn.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, LeaveStatus::Pending)
    }

    pub fn label(&self) -> &'static str {
        match self {
            LeaveStatus::Pending => "Pending",
            LeaveStatus::Approved => "Approved",
            LeaveStatus::Rejected => "Rejected",
            LeaveStatus::Cancelled => "Cancelled",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LeaveStatus::Pending => "pending",
            LeaveStatus::Approved => "approved",
            LeaveStatus::Rejected => "rejected",
            LeaveStatus::Cancelled => "cancelled",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Token {
    pub access_token: String,
    pub token_type: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: i64,
    pub name: String,
    pub phone: String,
    #[serde(default)]
    pub email: Option<String>,
    pub role: UserRole,
    #[serde(default)]
    pub manager_id: Option<i64>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub phone: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub password: String,
    pub role: UserRole,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manager_id: Option<i64>,
}

/// Self-edit profile payload; role and manager assignment are admin-only
/// server-side and deliberately absent here.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateLeaveRequest {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub leave_type: LeaveType,
    pub duration_type: DurationType,
    pub reason: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RejectRequest {
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaveRequestResponse {
    pub id: i64,
    pub user_id: i64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    /// Server-computed, holidays excluded. Displayed as-is, never recomputed.
    pub days: f64,
    pub leave_type: LeaveType,
    pub duration_type: DurationType,
    #[serde(default)]
    pub reason: Option<String>,
    pub status: LeaveStatus,
    #[serde(default)]
    pub rejection_reason: Option<String>,
    #[serde(default)]
    pub approved_by: Option<i64>,
    #[serde(default)]
    pub approved_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub user: Option<UserResponse>,
    #[serde(default)]
    pub attachments: Vec<AttachmentResponse>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttachmentResponse {
    pub id: i64,
    pub file_url: String,
    #[serde(default)]
    pub file_type: Option<String>,
    #[serde(default)]
    pub uploaded_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaveBalanceResponse {
    pub id: i64,
    pub user_id: i64,
    pub casual: f64,
    pub sick: f64,
    pub special: f64,
    pub year: i32,
}

impl LeaveBalanceResponse {
    pub fn remaining(&self, leave_type: LeaveType) -> f64 {
        match leave_type {
            LeaveType::Casual => self.casual,
            LeaveType::Sick => self.sick,
            LeaveType::Special => self.special,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HolidayResponse {
    pub id: i64,
    pub date: NaiveDate,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateHolidayRequest {
    pub date: NaiveDate,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TodayLeaveResponse {
    #[serde(default)]
    pub employees: Vec<UserResponse>,
    pub count: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApiErrorKind {
    /// Invalid credentials or a role not permitted on this surface.
    Auth,
    /// Authenticated but lacking authority for the attempted operation.
    Forbidden,
    /// Malformed or business-rule-violating input, always surfaced verbatim.
    Validation,
    /// The target is no longer in the expected state.
    Conflict,
    NotFound,
    /// Transport failure; the only retryable kind.
    Network,
    Server,
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error, Serialize, Deserialize)]
#[error("{message}")]
pub struct ApiError {
    pub kind: ApiErrorKind,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
}

impl ApiError {
    fn new(kind: ApiErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            status: None,
        }
    }

    pub fn auth(message: impl Into<String>) -> Self {
        Self::new(ApiErrorKind::Auth, message)
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(ApiErrorKind::Forbidden, message)
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ApiErrorKind::Validation, message)
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(ApiErrorKind::Conflict, message)
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::new(ApiErrorKind::Network, message)
    }

    pub fn unknown(message: impl Into<String>) -> Self {
        Self::new(ApiErrorKind::Unknown, message)
    }

    pub fn is_retryable(&self) -> bool {
        self.kind == ApiErrorKind::Network
    }

    /// Normalizes a non-success response. The backend replies with the
    /// FastAPI shape `{"detail": string | [{loc, msg, type}, ...]}`; when the
    /// body is unusable the message falls back to a generic one per status
    /// class.
    pub fn from_response(status: u16, body: &str) -> Self {
        let detail = serde_json::from_str::<Value>(body)
            .ok()
            .and_then(|value| extract_detail(&value.get("detail")?.clone()));

        let kind = match status {
            400 | 422 => ApiErrorKind::Validation,
            401 => ApiErrorKind::Auth,
            403 => ApiErrorKind::Forbidden,
            404 => ApiErrorKind::NotFound,
            408 => ApiErrorKind::Network,
            409 => ApiErrorKind::Conflict,
            500..=599 => ApiErrorKind::Server,
            _ => ApiErrorKind::Unknown,
        };

        let message = detail.unwrap_or_else(|| fallback_message(status).to_string());
        Self {
            kind,
            message,
            status: Some(status),
        }
    }
}

fn extract_detail(detail: &Value) -> Option<String> {
    match detail {
        Value::String(message) if !message.is_empty() => Some(message.clone()),
        // 422 validation errors arrive as a list of field-level entries.
        Value::Array(entries) => {
            let fields: Vec<String> = entries
                .iter()
                .filter_map(|entry| {
                    let msg = entry.get("msg")?.as_str()?;
                    let loc = entry
                        .get("loc")
                        .and_then(|loc| loc.as_array())
                        .and_then(|parts| parts.last())
                        .and_then(|part| part.as_str().map(str::to_string));
                    Some(match loc {
                        Some(field) => format!("{}: {}", field, msg),
                        None => msg.to_string(),
                    })
                })
                .collect();
            if fields.is_empty() {
                None
            } else {
                Some(fields.join("; "))
            }
        }
        _ => None,
    }
}

fn fallback_message(status: u16) -> &'static str {
    match status {
        400 => "invalid request",
        401 => "session expired",
        403 => "forbidden",
        404 => "not found",
        408 => "request timed out",
        409 => "conflict",
        422 => "validation failed",
        500..=599 => "server error",
        _ => "unexpected error",
    }
}
