use crate::{
    api::{ApiClient, ApiError, UserResponse},
    utils::storage,
};
use leptos::*;

type SessionContext = (ReadSignal<SessionState>, WriteSignal<SessionState>);

const ROLE_NOT_ALLOWED: &str = "This dashboard is for managers, HR and admins";

#[derive(Debug, Clone, Default)]
pub struct SessionState {
    pub user: Option<UserResponse>,
    pub is_authenticated: bool,
    pub loading: bool,
}

fn create_session_context() -> SessionContext {
    let (session, set_session) = create_signal(SessionState::default());
    set_session.update(|state| state.loading = true);

    let api_client = use_context::<ApiClient>().unwrap_or_else(ApiClient::new);
    let set_session_for_restore = set_session;
    spawn_local(async move {
        match restore_session(&api_client).await {
            Ok(user) => set_session_for_restore.update(|state| {
                state.user = Some(user);
                state.is_authenticated = true;
                state.loading = false;
            }),
            Err(_) => set_session_for_restore.update(|state| {
                state.user = None;
                state.is_authenticated = false;
                state.loading = false;
            }),
        }
    });

    (session, set_session)
}

#[component]
pub fn SessionProvider(children: Children) -> impl IntoView {
    let ctx = create_session_context();
    provide_context::<SessionContext>(ctx);
    view! { <>{children()}</> }
}

pub fn use_session() -> SessionContext {
    use_context::<SessionContext>().unwrap_or_else(|| create_signal(SessionState::default()))
}

/// Rehydrates the session from a persisted token. A token belonging to a
/// role that is not allowed here is discarded on the spot so a reload does
/// not resurrect it.
pub async fn restore_session(api_client: &ApiClient) -> Result<UserResponse, ApiError> {
    if storage::stored_token().is_none() {
        return Err(ApiError::auth("not signed in"));
    }
    let user = api_client.get_me().await?;
    if !user.role.can_use_dashboard() {
        storage::clear_token();
        return Err(ApiError::auth(ROLE_NOT_ALLOWED));
    }
    Ok(user)
}

/// Credential exchange followed by the role gate. The gate runs after the
/// token is issued because the backend authenticates workers fine; it is
/// this surface that turns them away.
pub async fn login(
    api_client: &ApiClient,
    email: &str,
    password: &str,
    set_session: WriteSignal<SessionState>,
) -> Result<(), ApiError> {
    set_session.update(|state| state.loading = true);

    let result = async {
        api_client.login(email, password).await?;
        let user = api_client.get_me().await?;
        if !user.role.can_use_dashboard() {
            storage::clear_token();
            return Err(ApiError::auth(ROLE_NOT_ALLOWED));
        }
        Ok(user)
    }
    .await;

    match result {
        Ok(user) => {
            set_session.update(|state| {
                state.user = Some(user);
                state.is_authenticated = true;
                state.loading = false;
            });
            Ok(())
        }
        Err(error) => {
            set_session.update(|state| state.loading = false);
            Err(error)
        }
    }
}

/// Client-side only: drops the token and resets the session. Safe to call
/// any number of times.
pub fn logout(set_session: WriteSignal<SessionState>) {
    storage::clear_token();
    set_session.update(|state| {
        state.user = None;
        state.is_authenticated = false;
        state.loading = false;
    });
}

pub fn use_login_action() -> Action<(String, String), Result<(), ApiError>> {
    let (_session, set_session) = use_session();
    let api = use_context::<ApiClient>().unwrap_or_else(ApiClient::new);

    create_action(move |credentials: &(String, String)| {
        let (email, password) = credentials.clone();
        let api = api.clone();
        async move { login(&api, &email, &password, set_session).await }
    })
}

pub fn use_logout_action() -> Action<(), ()> {
    let (_session, set_session) = use_session();
    create_action(move |_: &()| async move { logout(set_session) })
}

#[cfg(test)]
mod tests {
    use super::*;
    use leptos::create_runtime;

    fn with_runtime<T>(test: impl FnOnce() -> T) -> T {
        let runtime = create_runtime();
        let result = test();
        runtime.dispose();
        result
    }

    #[test]
    fn use_session_returns_default_without_context() {
        with_runtime(|| {
            let (state, _set_state) = use_session();
            let snapshot = state.get();
            assert!(!snapshot.is_authenticated);
            assert!(snapshot.user.is_none());
        });
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::api::{ApiErrorKind, UserRole};
    use crate::test_support::{auth_lock, user_json};
    use httpmock::prelude::*;
    use serde_json::json;

    fn mock_login(server: &MockServer, token: &str) {
        let token = token.to_string();
        server.mock(move |when, then| {
            when.method(POST).path("/auth/login");
            then.status(200)
                .json_body(json!({ "access_token": token, "token_type": "bearer" }));
        });
    }

    #[tokio::test]
    async fn login_populates_the_session() {
        let _guard = auth_lock();
        let server = MockServer::start_async().await;
        mock_login(&server, "tok-mgr");
        server.mock(|when, then| {
            when.method(GET).path("/auth/me");
            then.status(200).json_body(user_json(1, "manager", None));
        });

        let runtime = create_runtime();
        let (state, set_state) = create_signal(SessionState::default());
        let api = ApiClient::new_with_base_url(server.url(""));

        login(&api, "ana@example.com", "secret", set_state)
            .await
            .unwrap();

        let snapshot = state.get();
        assert!(snapshot.is_authenticated);
        assert_eq!(snapshot.user.as_ref().map(|u| u.role), Some(UserRole::Manager));
        assert_eq!(storage::stored_token().as_deref(), Some("tok-mgr"));

        logout(set_state);
        let snapshot = state.get();
        assert!(!snapshot.is_authenticated);
        assert!(snapshot.user.is_none());
        assert!(storage::stored_token().is_none());
        // logout is idempotent
        logout(set_state);
        assert!(storage::stored_token().is_none());
        runtime.dispose();
    }

    #[tokio::test]
    async fn worker_login_is_turned_away_and_token_discarded() {
        let _guard = auth_lock();
        let server = MockServer::start_async().await;
        mock_login(&server, "tok-worker");
        server.mock(|when, then| {
            when.method(GET).path("/auth/me");
            then.status(200).json_body(user_json(2, "worker", Some(1)));
        });

        let runtime = create_runtime();
        let (state, set_state) = create_signal(SessionState::default());
        let api = ApiClient::new_with_base_url(server.url(""));

        let err = login(&api, "worker@example.com", "secret", set_state)
            .await
            .unwrap_err();
        assert_eq!(err.kind, ApiErrorKind::Auth);
        assert!(storage::stored_token().is_none());
        let snapshot = state.get();
        assert!(!snapshot.is_authenticated);
        assert!(!snapshot.loading);
        runtime.dispose();
    }

    #[tokio::test]
    async fn restore_session_requires_a_stored_token() {
        let _guard = auth_lock();
        storage::clear_token();
        let api = ApiClient::new_with_base_url("http://127.0.0.1:9");
        // no token, so no request is attempted against the dead address
        let err = restore_session(&api).await.unwrap_err();
        assert_eq!(err.kind, ApiErrorKind::Auth);
    }

    #[tokio::test]
    async fn restore_session_rehydrates_from_a_valid_token() {
        let _guard = auth_lock();
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(GET)
                .path("/auth/me")
                .header("authorization", "Bearer tok-hr");
            then.status(200).json_body(user_json(4, "hr", None));
        });

        storage::store_token("tok-hr");
        let api = ApiClient::new_with_base_url(server.url(""));
        let user = restore_session(&api).await.unwrap();
        assert_eq!(user.role, UserRole::Hr);
        storage::clear_token();
    }

    #[tokio::test]
    async fn restore_session_discards_a_worker_token() {
        let _guard = auth_lock();
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(GET).path("/auth/me");
            then.status(200).json_body(user_json(2, "worker", Some(1)));
        });

        storage::store_token("tok-worker");
        let api = ApiClient::new_with_base_url(server.url(""));
        let err = restore_session(&api).await.unwrap_err();
        assert_eq!(err.kind, ApiErrorKind::Auth);
        assert!(storage::stored_token().is_none());
    }
}
