//! Shared fixtures for host-side tests.

use crate::api::{
    DurationType, LeaveRequestResponse, LeaveStatus, LeaveType, UserResponse, UserRole,
};
use std::sync::{Mutex, MutexGuard};

// The native token slot is process-global; tests that touch it serialize
// through this lock so they can run under the default parallel harness.
static AUTH_LOCK: Mutex<()> = Mutex::new(());

pub fn auth_lock() -> MutexGuard<'static, ()> {
    AUTH_LOCK
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}

pub fn user(id: i64, role: UserRole, manager_id: Option<i64>) -> UserResponse {
    UserResponse {
        id,
        name: format!("User {}", id),
        phone: format!("+1000000{:04}", id),
        email: Some(format!("user{}@example.com", id)),
        role,
        manager_id,
        created_at: None,
    }
}

pub fn leave_request(
    id: i64,
    owner: &UserResponse,
    status: LeaveStatus,
) -> LeaveRequestResponse {
    LeaveRequestResponse {
        id,
        user_id: owner.id,
        start_date: chrono::NaiveDate::from_ymd_opt(2024, 12, 15).unwrap(),
        end_date: chrono::NaiveDate::from_ymd_opt(2024, 12, 16).unwrap(),
        days: 2.0,
        leave_type: LeaveType::Casual,
        duration_type: DurationType::Full,
        reason: Some("family visit".into()),
        status,
        rejection_reason: None,
        approved_by: None,
        approved_at: None,
        created_at: None,
        user: Some(owner.clone()),
        attachments: Vec::new(),
    }
}

pub fn user_json(id: i64, role: &str, manager_id: Option<i64>) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "name": format!("User {}", id),
        "phone": format!("+1000000{:04}", id),
        "email": format!("user{}@example.com", id),
        "role": role,
        "manager_id": manager_id,
    })
}

pub fn leave_request_json(id: i64, user_id: i64, status: &str) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "user_id": user_id,
        "start_date": "2024-12-15",
        "end_date": "2024-12-16",
        "days": 2.0,
        "leave_type": "casual",
        "duration_type": "full",
        "reason": "family visit",
        "status": status,
        "rejection_reason": if status == "rejected" { Some("no coverage") } else { None },
        "user": user_json(user_id, "worker", Some(1)),
    })
}
