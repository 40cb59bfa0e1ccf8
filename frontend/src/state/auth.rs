use crate::{
    api::{ApiClient, LoginRequest},
    utils::{cookies::DocumentCookies, storage::BrowserSessionStorage},
};
use leavedesk_access::{
    AccessError, AuthBackend, CookieWriter, SessionIdentity, SessionStorage, SessionStore,
};
use leptos::*;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthState {
    pub identity: Option<SessionIdentity>,
    pub loading: bool,
}

impl Default for AuthState {
    fn default() -> Self {
        Self {
            identity: None,
            loading: true,
        }
    }
}

impl AuthState {
    pub fn signed_in(identity: SessionIdentity) -> Self {
        Self {
            identity: Some(identity),
            loading: false,
        }
    }

    pub fn signed_out() -> Self {
        Self {
            identity: None,
            loading: false,
        }
    }
}

pub type BrowserSessionStore = SessionStore<BrowserSessionStorage, DocumentCookies>;

pub fn browser_session_store() -> BrowserSessionStore {
    SessionStore::new(BrowserSessionStorage, DocumentCookies)
}

/// Read-only view of the session plus the two operations that may change it.
#[derive(Clone, Copy)]
pub struct AuthContext {
    state: Signal<AuthState>,
    login: Action<LoginRequest, Result<SessionIdentity, AccessError>>,
    logout: Callback<()>,
}

impl AuthContext {
    pub fn state(&self) -> Signal<AuthState> {
        self.state
    }

    pub fn identity(&self) -> Option<SessionIdentity> {
        self.state.with(|state| state.identity.clone())
    }

    pub fn login_action(&self) -> Action<LoginRequest, Result<SessionIdentity, AccessError>> {
        self.login
    }

    pub fn logout(&self) {
        self.logout.call(());
    }
}

fn create_auth_context<S, C>(
    initial: AuthState,
    open_store: fn() -> SessionStore<S, C>,
    api: ApiClient,
    after_logout: fn(),
) -> (AuthContext, WriteSignal<AuthState>)
where
    S: SessionStorage + 'static,
    C: CookieWriter + 'static,
{
    let (state, set_state) = create_signal(initial);

    let login = create_action(move |request: &LoginRequest| {
        let payload = request.clone();
        let api = api.clone();
        async move {
            let mut store = open_store();
            login_request(&mut store, &api, payload, set_state).await
        }
    });

    let logout = Callback::new(move |_: ()| {
        let mut store = open_store();
        sign_out(&mut store, set_state);
        after_logout();
    });

    let ctx = AuthContext {
        state: state.into(),
        login,
        logout,
    };
    (ctx, set_state)
}

fn navigate_to_login() {
    crate::utils::navigate_to(leavedesk_access::LOGIN_PATH);
}

#[component]
pub fn AuthProvider(children: Children) -> impl IntoView {
    let api = use_context::<ApiClient>().unwrap_or_default();
    let (ctx, set_state) = create_auth_context(
        AuthState::default(),
        browser_session_store,
        api,
        navigate_to_login,
    );

    // Effects only run in the browser; server-side renders stay in `loading`.
    create_effect(move |_| {
        let mut store = browser_session_store();
        set_state.set(match load_session(&mut store) {
            Some(identity) => AuthState::signed_in(identity),
            None => AuthState::signed_out(),
        });
    });

    provide_context(ctx);
    view! { <>{children()}</> }
}

pub fn use_auth() -> AuthContext {
    expect_context::<AuthContext>()
}

/// Provides an [`AuthContext`] over in-memory storage, for component tests.
#[cfg(all(test, not(target_arch = "wasm32")))]
pub(crate) fn provide_test_auth(state: AuthState) -> AuthContext {
    use leavedesk_access::session::testing::{MemoryCookies, MemoryStorage};

    fn memory_store() -> SessionStore<MemoryStorage, MemoryCookies> {
        SessionStore::new(MemoryStorage::default(), MemoryCookies::default())
    }

    let (ctx, _) = create_auth_context(
        state,
        memory_store,
        ApiClient::new_with_base_url("http://127.0.0.1:9/api"),
        || {},
    );
    provide_context(ctx);
    ctx
}

fn load_session<S, C>(store: &mut SessionStore<S, C>) -> Option<SessionIdentity>
where
    S: SessionStorage,
    C: CookieWriter,
{
    store.load().cloned()
}

async fn login_request<S, C, B>(
    store: &mut SessionStore<S, C>,
    backend: &B,
    request: LoginRequest,
    set_auth_state: WriteSignal<AuthState>,
) -> Result<SessionIdentity, AccessError>
where
    S: SessionStorage,
    C: CookieWriter,
    B: AuthBackend + ?Sized,
{
    match store
        .login(backend, &request.email, &request.password)
        .await
    {
        Ok(identity) => {
            let identity = identity.clone();
            log::info!("signed in as {}", identity.subject);
            set_auth_state.set(AuthState::signed_in(identity.clone()));
            Ok(identity)
        }
        Err(err) => {
            log::warn!("login failed: {}", err);
            set_auth_state.set(AuthState::signed_out());
            Err(err)
        }
    }
}

fn sign_out<S, C>(store: &mut SessionStore<S, C>, set_auth_state: WriteSignal<AuthState>)
where
    S: SessionStorage,
    C: CookieWriter,
{
    store.logout();
    set_auth_state.set(AuthState::signed_out());
}
