use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{
    cookie::{build_access_cookie, build_clear_cookie},
    credential::{decode_credential, Claims},
    error::AccessError,
    role::Role,
};

pub const TOKEN_STORAGE_KEY: &str = "access_token";
pub const USER_STORAGE_KEY: &str = "user";

/// Identity of the signed-in user for the current tab.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionIdentity {
    pub subject: String,
    pub roles: Vec<Role>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl SessionIdentity {
    pub fn from_claims(claims: &Claims) -> Self {
        Self {
            subject: claims.subject.clone(),
            roles: claims.roles.clone(),
            full_name: claims.full_name.clone(),
            email: claims.email.clone(),
        }
    }

    /// Role set for gate evaluation; an identity without roles is corrupt.
    pub fn role_set(&self) -> Result<&[Role], AccessError> {
        if self.roles.is_empty() {
            Err(AccessError::IncompleteClaims("identity has no roles".into()))
        } else {
            Ok(&self.roles)
        }
    }

    pub fn display_initial(&self) -> Option<char> {
        self.full_name
            .as_deref()
            .or(self.email.as_deref())
            .and_then(|name| name.trim().chars().next())
            .map(|c| c.to_ascii_uppercase())
    }

    fn merge_profile(&mut self, full_name: Option<String>, email: Option<String>) {
        if full_name.is_some() {
            self.full_name = full_name;
        }
        if email.is_some() {
            self.email = email;
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Body returned by the backend's login endpoint. Both fields are optional
/// here so a partial answer can be reported as an invalid response rather
/// than a parse failure.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginResponse {
    #[serde(default)]
    pub access_token: Option<String>,
    #[serde(default)]
    pub user: Option<Value>,
}

/// Tab-scoped key/value storage.
pub trait SessionStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, AccessError>;
    fn set_item(&self, key: &str, value: &str) -> Result<(), AccessError>;
    fn clear(&self);
}

pub trait CookieWriter {
    fn write_cookie(&self, cookie: &str) -> Result<(), AccessError>;
}

/// The external backend that checks passwords and issues credentials.
#[async_trait(?Send)]
pub trait AuthBackend {
    async fn authenticate(&self, request: &LoginRequest) -> Result<LoginResponse, AccessError>;
}

pub struct SessionStore<S, C> {
    storage: S,
    cookies: C,
    identity: Option<SessionIdentity>,
}

impl<S: SessionStorage, C: CookieWriter> SessionStore<S, C> {
    pub fn new(storage: S, cookies: C) -> Self {
        Self {
            storage,
            cookies,
            identity: None,
        }
    }

    pub fn identity(&self) -> Option<&SessionIdentity> {
        self.identity.as_ref()
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn cookies(&self) -> &C {
        &self.cookies
    }

    pub fn into_parts(self) -> (S, C) {
        (self.storage, self.cookies)
    }

    /// Restores the identity from storage. Any failure wipes the stored
    /// credential and leaves the identity empty.
    pub fn load(&mut self) -> Option<&SessionIdentity> {
        match self.read_stored_identity() {
            Ok(Some(identity)) => self.identity = Some(identity),
            Ok(None) => self.identity = None,
            Err(err) => {
                log::warn!("Invalid token: {}", err);
                self.clear_persisted();
                self.identity = None;
            }
        }
        self.identity.as_ref()
    }

    fn read_stored_identity(&self) -> Result<Option<SessionIdentity>, AccessError> {
        let Some(token) = self.storage.get_item(TOKEN_STORAGE_KEY)? else {
            return Ok(None);
        };
        let claims = decode_credential(Some(&token))?;
        let mut identity = SessionIdentity::from_claims(&claims);

        if let Some(raw) = self.storage.get_item(USER_STORAGE_KEY)? {
            let stored: SessionIdentity = serde_json::from_str(&raw)
                .map_err(|e| AccessError::Storage(format!("stored user is corrupt: {}", e)))?;
            identity.merge_profile(stored.full_name, stored.email);
        }
        Ok(Some(identity))
    }

    /// Authenticates against the backend, then persists the credential to
    /// storage and cookie before the identity is marked loaded.
    pub async fn login<B>(
        &mut self,
        backend: &B,
        identifier: &str,
        secret: &str,
    ) -> Result<&SessionIdentity, AccessError>
    where
        B: AuthBackend + ?Sized,
    {
        let request = LoginRequest {
            email: identifier.to_string(),
            password: secret.to_string(),
        };
        let response = backend.authenticate(&request).await?;

        let token = response
            .access_token
            .filter(|token| !token.trim().is_empty())
            .ok_or(AccessError::InvalidLoginResponse)?;
        let user = match response.user {
            Some(Value::Object(user)) => user,
            _ => return Err(AccessError::InvalidLoginResponse),
        };
        let claims = decode_credential(Some(&token)).map_err(|err| {
            log::error!("LOGIN FAILED: issued credential does not decode: {}", err);
            AccessError::InvalidLoginResponse
        })?;

        let mut identity = SessionIdentity::from_claims(&claims);
        identity.merge_profile(
            user.get("full_name").and_then(Value::as_str).map(str::to_string),
            user.get("email").and_then(Value::as_str).map(str::to_string),
        );

        if let Err(err) = self.persist(&token, &identity) {
            self.clear_persisted();
            return Err(err);
        }
        Ok(&*self.identity.insert(identity))
    }

    fn persist(&self, token: &str, identity: &SessionIdentity) -> Result<(), AccessError> {
        let user_json = serde_json::to_string(identity)
            .map_err(|e| AccessError::Storage(e.to_string()))?;
        self.storage.set_item(TOKEN_STORAGE_KEY, token)?;
        self.storage.set_item(USER_STORAGE_KEY, &user_json)?;
        self.cookies.write_cookie(&build_access_cookie(token))
    }

    pub fn logout(&mut self) {
        self.clear_persisted();
        self.identity = None;
    }

    fn clear_persisted(&self) {
        self.storage.clear();
        if let Err(err) = self.cookies.write_cookie(&build_clear_cookie()) {
            log::warn!("failed to clear access cookie: {}", err);
        }
    }
}

/// In-memory stand-ins for browser storage, cookies and the backend.
#[cfg(any(test, feature = "test-utils"))]
pub mod testing {
    use super::*;
    use crate::cookie::{extract_cookie_value, ACCESS_COOKIE_NAME};
    use std::{cell::RefCell, collections::HashMap};

    #[derive(Debug, Default)]
    pub struct MemoryStorage {
        items: RefCell<HashMap<String, String>>,
        pub fail_writes: bool,
    }

    impl MemoryStorage {
        pub fn failing() -> Self {
            Self {
                fail_writes: true,
                ..Self::default()
            }
        }

        pub fn is_empty(&self) -> bool {
            self.items.borrow().is_empty()
        }
    }

    impl SessionStorage for MemoryStorage {
        fn get_item(&self, key: &str) -> Result<Option<String>, AccessError> {
            Ok(self.items.borrow().get(key).cloned())
        }

        fn set_item(&self, key: &str, value: &str) -> Result<(), AccessError> {
            if self.fail_writes {
                return Err(AccessError::Storage("quota exceeded".into()));
            }
            self.items
                .borrow_mut()
                .insert(key.to_string(), value.to_string());
            Ok(())
        }

        fn clear(&self) {
            self.items.borrow_mut().clear();
        }
    }

    #[derive(Debug, Default)]
    pub struct MemoryCookies {
        access_token: RefCell<Option<String>>,
    }

    impl MemoryCookies {
        pub fn access_token(&self) -> Option<String> {
            self.access_token.borrow().clone()
        }
    }

    impl CookieWriter for MemoryCookies {
        fn write_cookie(&self, cookie: &str) -> Result<(), AccessError> {
            let value = if cookie.contains("Max-Age=0") {
                None
            } else {
                extract_cookie_value(cookie, ACCESS_COOKIE_NAME)
            };
            *self.access_token.borrow_mut() = value;
            Ok(())
        }
    }

    pub struct StaticBackend(pub Result<Value, AccessError>);

    #[async_trait(?Send)]
    impl AuthBackend for StaticBackend {
        async fn authenticate(&self, _request: &LoginRequest) -> Result<LoginResponse, AccessError> {
            let body = self.0.clone()?;
            serde_json::from_value(body).map_err(|_| AccessError::InvalidLoginResponse)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::testing::*;
    use super::*;
    use crate::credential::testing::{token_with_roles, unsigned_token};
    use serde_json::json;

    fn store() -> SessionStore<MemoryStorage, MemoryCookies> {
        SessionStore::new(MemoryStorage::default(), MemoryCookies::default())
    }

    fn login_body(token: &str) -> Value {
        json!({
            "access_token": token,
            "user": {
                "email": "a@b.com",
                "full_name": "Aiko Tanaka",
                "roles": ["HR", "EMPLOYEE"]
            }
        })
    }

    #[tokio::test]
    async fn login_persists_storage_and_cookie() {
        let token = token_with_roles("15", &["HR", "EMPLOYEE"]);
        let backend = StaticBackend(Ok(login_body(&token)));
        let mut store = store();

        let identity = store.login(&backend, "a@b.com", "secret").await.unwrap();
        assert_eq!(identity.subject, "15");
        assert_eq!(identity.roles, vec![Role::Hr, Role::Employee]);
        assert_eq!(identity.full_name.as_deref(), Some("Aiko Tanaka"));

        assert_eq!(
            store.storage().get_item(TOKEN_STORAGE_KEY).unwrap(),
            Some(token.clone())
        );
        assert!(store.storage().get_item(USER_STORAGE_KEY).unwrap().is_some());
        assert_eq!(store.cookies().access_token(), Some(token));
    }

    #[tokio::test]
    async fn login_then_fresh_load_round_trips_identity() {
        let token = token_with_roles("15", &["HR", "EMPLOYEE"]);
        let backend = StaticBackend(Ok(login_body(&token)));
        let mut store = store();
        let logged_in = store
            .login(&backend, "a@b.com", "secret")
            .await
            .unwrap()
            .clone();

        let (storage, cookies) = store.into_parts();
        let mut fresh = SessionStore::new(storage, cookies);
        let loaded = fresh.load().cloned().unwrap();
        assert_eq!(loaded.subject, logged_in.subject);
        assert_eq!(loaded.roles, logged_in.roles);
        assert_eq!(loaded.email.as_deref(), Some("a@b.com"));
    }

    #[tokio::test]
    async fn login_without_access_token_is_invalid_and_writes_nothing() {
        let backend = StaticBackend(Ok(json!({
            "user": { "email": "a@b.com", "roles": ["EMPLOYEE"] }
        })));
        let mut store = store();
        let err = store.login(&backend, "a@b.com", "secret").await.unwrap_err();
        assert_eq!(err, AccessError::InvalidLoginResponse);
        assert!(store.identity().is_none());
        assert!(store.storage().is_empty());
        assert!(store.cookies().access_token().is_none());
    }

    #[tokio::test]
    async fn login_without_user_or_with_undecodable_token_is_invalid() {
        let token = token_with_roles("1", &["EMPLOYEE"]);
        let no_user = StaticBackend(Ok(json!({ "access_token": token })));
        let mut store = store();
        assert_eq!(
            store.login(&no_user, "a@b.com", "x").await.unwrap_err(),
            AccessError::InvalidLoginResponse
        );

        let garbage = StaticBackend(Ok(login_body("not-a-jwt")));
        assert_eq!(
            store.login(&garbage, "a@b.com", "x").await.unwrap_err(),
            AccessError::InvalidLoginResponse
        );
        assert!(store.storage().is_empty());
    }

    #[tokio::test]
    async fn backend_errors_propagate_unchanged() {
        let backend = StaticBackend(Err(AccessError::BackendUnavailable(
            "connection refused".into(),
        )));
        let mut store = store();
        let err = store.login(&backend, "a@b.com", "x").await.unwrap_err();
        assert!(matches!(err, AccessError::BackendUnavailable(_)));
        assert!(store.identity().is_none());
    }

    #[tokio::test]
    async fn failed_storage_write_leaves_nothing_behind() {
        let token = token_with_roles("1", &["EMPLOYEE"]);
        let backend = StaticBackend(Ok(login_body(&token)));
        let mut store = SessionStore::new(MemoryStorage::failing(), MemoryCookies::default());
        let err = store.login(&backend, "a@b.com", "x").await.unwrap_err();
        assert!(matches!(err, AccessError::Storage(_)));
        assert!(store.identity().is_none());
        assert!(store.cookies().access_token().is_none());
    }

    #[tokio::test]
    async fn logout_clears_storage_and_cookie() {
        let token = token_with_roles("9", &["ADMIN"]);
        let backend = StaticBackend(Ok(login_body(&token)));
        let mut store = store();
        store.login(&backend, "a@b.com", "secret").await.unwrap();

        store.logout();
        assert!(store.identity().is_none());
        assert!(store.storage().is_empty());
        assert!(store.cookies().access_token().is_none());

        let (storage, cookies) = store.into_parts();
        let mut fresh = SessionStore::new(storage, cookies);
        assert!(fresh.load().is_none());
    }

    #[test]
    fn load_without_token_is_empty() {
        let mut store = store();
        assert!(store.load().is_none());
    }

    #[test]
    fn load_with_malformed_token_clears_everything() {
        let store_parts = store();
        store_parts
            .storage()
            .set_item(TOKEN_STORAGE_KEY, "garbage")
            .unwrap();
        store_parts
            .cookies()
            .write_cookie("access_token=garbage; Path=/")
            .unwrap();
        let mut store = store_parts;

        assert!(store.load().is_none());
        assert!(store.storage().is_empty());
        assert!(store.cookies().access_token().is_none());
    }

    #[test]
    fn load_with_roleless_token_clears_everything() {
        let mut store = store();
        let token = unsigned_token(&json!({ "sub": "3" }));
        store.storage().set_item(TOKEN_STORAGE_KEY, &token).unwrap();
        assert!(store.load().is_none());
        assert!(store.storage().is_empty());
    }

    #[test]
    fn load_with_corrupt_user_entry_clears_everything() {
        let mut store = store();
        let token = token_with_roles("3", &["EMPLOYEE"]);
        store.storage().set_item(TOKEN_STORAGE_KEY, &token).unwrap();
        store.storage().set_item(USER_STORAGE_KEY, "{not json").unwrap();
        assert!(store.load().is_none());
        assert!(store.storage().is_empty());
    }

    #[test]
    fn load_without_user_entry_uses_claims() {
        let mut store = store();
        let token = unsigned_token(&json!({
            "sub": "3",
            "roles": ["EMPLOYEE"],
            "full_name": "Ren Ito"
        }));
        store.storage().set_item(TOKEN_STORAGE_KEY, &token).unwrap();
        let identity = store.load().unwrap();
        assert_eq!(identity.full_name.as_deref(), Some("Ren Ito"));
        assert_eq!(identity.display_initial(), Some('R'));
    }
}
