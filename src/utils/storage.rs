//! Bearer token persistence.
//!
//! On wasm the token lives in localStorage under a single well-known key so a
//! reload can rehydrate the session. On native (host tests) the same surface
//! is backed by an in-process slot, keeping every caller target-agnostic.

pub const TOKEN_STORAGE_KEY: &str = "leave_dashboard_token";

#[cfg(target_arch = "wasm32")]
mod imp {
    use super::TOKEN_STORAGE_KEY;
    use web_sys::Storage;

    fn local_storage() -> Option<Storage> {
        web_sys::window()?.local_storage().ok().flatten()
    }

    pub fn stored_token() -> Option<String> {
        local_storage()?
            .get_item(TOKEN_STORAGE_KEY)
            .ok()
            .flatten()
            .filter(|token| !token.is_empty())
    }

    pub fn store_token(token: &str) {
        if let Some(storage) = local_storage() {
            if storage.set_item(TOKEN_STORAGE_KEY, token).is_err() {
                log::warn!("failed to persist session token");
            }
        }
    }

    pub fn clear_token() {
        if let Some(storage) = local_storage() {
            let _ = storage.remove_item(TOKEN_STORAGE_KEY);
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod imp {
    use std::sync::Mutex;

    static TOKEN: Mutex<Option<String>> = Mutex::new(None);

    fn slot() -> std::sync::MutexGuard<'static, Option<String>> {
        TOKEN.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn stored_token() -> Option<String> {
        slot().clone().filter(|token| !token.is_empty())
    }

    pub fn store_token(token: &str) {
        *slot() = Some(token.to_string());
    }

    pub fn clear_token() {
        *slot() = None;
    }
}

pub use imp::{clear_token, store_token, stored_token};

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::*;
    use crate::test_support::auth_lock;

    #[test]
    fn token_round_trip_and_clear() {
        let _guard = auth_lock();
        store_token("tok-123");
        assert_eq!(stored_token().as_deref(), Some("tok-123"));
        clear_token();
        assert!(stored_token().is_none());
        // clearing an already-empty slot is a no-op
        clear_token();
        assert!(stored_token().is_none());
    }

    #[test]
    fn empty_token_reads_as_absent() {
        let _guard = auth_lock();
        store_token("");
        assert!(stored_token().is_none());
        clear_token();
    }
}
