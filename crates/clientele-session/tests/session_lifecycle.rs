//! Integration tests for the session lifecycle, end to end through the
//! public API: hydrate → login → update_profile → logout, against both
//! store backends.

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use clientele_session::{
    AuthResponse, AuthService, AuthState, Credentials, ManualClock,
    ProfileUpdate, SessionConfig, SessionError, SessionManager,
};
use clientele_store::{
    FileStore, KeyValueStore, MemoryStore, PROFILE_KEY, ProfileOverlay,
    SessionStore, TOKEN_KEY,
};
use clientele_token::{Claims, JwtCodec, TokenCodec};

// =========================================================================
// Mock authentication service
// =========================================================================

#[derive(Debug, thiserror::Error)]
#[error("invalid username or password")]
struct BadCredentials;

/// Issues a token for `a@b.com` if the password is "secret".
///
/// Mirrors the customer API: 200 with the token in the `Authorization`
/// header and `{token, customerDTO}` in the body.
struct CustomerApi {
    expires_at: u64,
}

impl AuthService for CustomerApi {
    type Error = BadCredentials;

    async fn login(
        &self,
        credentials: &Credentials,
    ) -> Result<AuthResponse, BadCredentials> {
        if credentials.password != "secret" {
            return Err(BadCredentials);
        }
        let claims = Claims::new(
            credentials.username.clone(),
            vec!["ROLE_USER".into()],
            self.expires_at,
        );
        let token = JwtCodec.encode(&claims).expect("encode");
        Ok(AuthResponse::new(200)
            .with_header("Authorization", format!("Bearer {token}"))
            .with_body(serde_json::json!({
                "token": token,
                "customerDTO": { "email": credentials.username },
            })))
    }
}

/// Answers 200 with no `Authorization` header at all.
struct HeaderlessApi;

impl AuthService for HeaderlessApi {
    type Error = BadCredentials;

    async fn login(
        &self,
        _credentials: &Credentials,
    ) -> Result<AuthResponse, BadCredentials> {
        Ok(AuthResponse::new(200))
    }
}

// =========================================================================
// Helpers
// =========================================================================

const NOW_SECS: u64 = 1_700_000_000;

fn mint(subject: &str, exp: u64) -> String {
    JwtCodec
        .encode(&Claims::new(subject, vec!["ROLE_USER".into()], exp))
        .unwrap()
}

fn manager_on<A: AuthService, B: KeyValueStore>(
    backend: B,
    auth: A,
    clock: &ManualClock,
) -> SessionManager<A, B> {
    SessionManager::new(
        SessionStore::new(backend),
        JwtCodec,
        auth,
        SessionConfig::default(),
    )
    .with_clock(clock.clone())
}

fn creds(password: &str) -> Credentials {
    Credentials::new("a@b.com", password)
}

// =========================================================================
// Scenarios
// =========================================================================

#[test]
fn test_valid_stored_token_hydrates_and_authenticates() {
    let backend = MemoryStore::new();
    backend.set(TOKEN_KEY, &mint("a@b.com", NOW_SECS + 3600)).unwrap();
    let clock = ManualClock::at_secs(NOW_SECS);
    let mut mgr = manager_on(backend, HeaderlessApi, &clock);

    mgr.hydrate().unwrap();

    assert_eq!(mgr.session().unwrap().subject(), "a@b.com");
    assert!(mgr.is_authenticated().unwrap());
}

#[test]
fn test_expired_stored_token_hydrates_to_empty_store() {
    let backend = MemoryStore::new();
    backend.set(TOKEN_KEY, &mint("a@b.com", NOW_SECS - 10)).unwrap();
    backend.set(PROFILE_KEY, r#"{"firstName":"John"}"#).unwrap();
    let clock = ManualClock::at_secs(NOW_SECS);
    let mut mgr = manager_on(backend.clone(), HeaderlessApi, &clock);

    mgr.hydrate().unwrap();

    assert!(mgr.session().is_none());
    assert!(backend.is_empty());
}

#[test]
fn test_empty_store_hydrates_without_error() {
    let clock = ManualClock::at_secs(NOW_SECS);
    let mut mgr = manager_on(MemoryStore::new(), HeaderlessApi, &clock);
    assert!(mgr.is_loading());

    let result = mgr.hydrate();

    assert!(matches!(result, Ok(None)));
    assert!(!mgr.is_loading());
    assert!(mgr.session().is_none());
    assert_eq!(mgr.state(), AuthState::Unauthenticated);
}

#[tokio::test]
async fn test_login_stores_token_without_prefix() {
    let backend = MemoryStore::new();
    let clock = ManualClock::at_secs(NOW_SECS);
    let api = CustomerApi {
        expires_at: NOW_SECS + 3600,
    };
    let mut mgr = manager_on(backend.clone(), api, &clock);
    mgr.hydrate().unwrap();

    let response = mgr.login(&creds("secret")).await.unwrap();

    let stored = backend.get(TOKEN_KEY).unwrap().unwrap();
    assert!(!stored.starts_with("Bearer"));
    assert_eq!(response.body["token"], stored.as_str());
    assert_eq!(mgr.state(), AuthState::Authenticated);
}

#[tokio::test]
async fn test_login_rejected_credentials_propagates_service_error() {
    let clock = ManualClock::at_secs(NOW_SECS);
    let api = CustomerApi {
        expires_at: NOW_SECS + 3600,
    };
    let mut mgr = manager_on(MemoryStore::new(), api, &clock);
    mgr.hydrate().unwrap();

    let err = mgr.login(&creds("wrong")).await.unwrap_err();

    match err {
        SessionError::Auth(source) => {
            assert_eq!(source.to_string(), "invalid username or password");
        }
        other => panic!("expected Auth, got {other:?}"),
    }
    assert_eq!(mgr.state(), AuthState::Unauthenticated);
}

#[tokio::test]
async fn test_login_without_header_leaves_stored_token_byte_identical() {
    let backend = MemoryStore::new();
    let previous = mint("old@b.com", NOW_SECS + 3600);
    backend.set(TOKEN_KEY, &previous).unwrap();
    let clock = ManualClock::at_secs(NOW_SECS);
    let mut mgr = manager_on(backend.clone(), HeaderlessApi, &clock);
    mgr.hydrate().unwrap();

    let err = mgr.login(&creds("secret")).await.unwrap_err();

    assert!(matches!(err, SessionError::MissingToken));
    assert_eq!(backend.get(TOKEN_KEY).unwrap(), Some(previous));
    assert_eq!(mgr.session().unwrap().subject(), "old@b.com");
}

// =========================================================================
// Properties
// =========================================================================

#[test]
fn test_every_past_expiry_is_unauthenticated_and_clears_store() {
    for seconds_ago in [1_u64, 10, 3600, NOW_SECS] {
        let backend = MemoryStore::new();
        backend
            .set(TOKEN_KEY, &mint("a@b.com", NOW_SECS - seconds_ago))
            .unwrap();
        backend.set(PROFILE_KEY, "{}").unwrap();
        let clock = ManualClock::at_secs(NOW_SECS);
        let mut mgr = manager_on(backend.clone(), HeaderlessApi, &clock);

        assert!(
            !mgr.is_authenticated().unwrap(),
            "{seconds_ago}s ago should be expired"
        );
        assert!(backend.is_empty(), "{seconds_ago}s ago should clear store");
    }
}

#[tokio::test]
async fn test_update_profile_changes_name_only() {
    let backend = MemoryStore::new();
    SessionStore::new(backend.clone())
        .set_profile(&ProfileOverlay::new("John", "Doe", "me.png"))
        .unwrap();
    let clock = ManualClock::at_secs(NOW_SECS);
    let api = CustomerApi {
        expires_at: NOW_SECS + 3600,
    };
    let mut mgr = manager_on(backend.clone(), api, &clock);
    mgr.hydrate().unwrap();
    mgr.login(&creds("secret")).await.unwrap();
    let before = mgr.session().unwrap().clone();

    let after = mgr
        .update_profile(ProfileUpdate::new().first_name("Jane"))
        .unwrap()
        .unwrap();

    assert_eq!(after.first_name(), "Jane");
    assert_eq!(after.claims(), before.claims());
    let stored = SessionStore::new(backend).get_profile().unwrap().unwrap();
    assert_eq!(stored.first_name, "Jane");
    assert_eq!(stored.last_name, "Doe");
}

#[tokio::test]
async fn test_logout_twice_yields_identical_state() {
    let backend = MemoryStore::new();
    let clock = ManualClock::at_secs(NOW_SECS);
    let api = CustomerApi {
        expires_at: NOW_SECS + 3600,
    };
    let mut mgr = manager_on(backend.clone(), api, &clock);
    mgr.hydrate().unwrap();
    mgr.login(&creds("secret")).await.unwrap();
    mgr.update_profile(ProfileUpdate::new().last_name("Doe"))
        .unwrap();

    mgr.logout().unwrap();
    let first = (mgr.snapshot(), backend.len());
    mgr.logout().unwrap();
    let second = (mgr.snapshot(), backend.len());

    assert_eq!(first, second);
    assert_eq!(second.1, 0);
    assert!(second.0.session.is_none());
}

#[test]
fn test_stored_profile_survives_restart_on_file_store() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session.json");
    let profile = ProfileOverlay::new("Jane", "Doe", "https://img/jane.png");
    {
        let store = SessionStore::new(FileStore::new(&path));
        store.set_token(&mint("a@b.com", NOW_SECS + 3600)).unwrap();
        store.set_profile(&profile).unwrap();
    }
    let clock = ManualClock::at_secs(NOW_SECS);
    let mut mgr = manager_on(FileStore::new(&path), HeaderlessApi, &clock);

    let session = mgr.hydrate().unwrap().unwrap();

    assert_eq!(session.profile(), &profile);
}

// =========================================================================
// Shared store (two clients, one storage)
// =========================================================================

#[test]
fn test_logout_in_one_client_invalidates_other_on_next_check() {
    let backend = MemoryStore::new();
    backend.set(TOKEN_KEY, &mint("a@b.com", NOW_SECS + 3600)).unwrap();
    let clock = ManualClock::at_secs(NOW_SECS);
    let mut tab_a = manager_on(backend.clone(), HeaderlessApi, &clock);
    let mut tab_b = manager_on(backend.clone(), HeaderlessApi, &clock);
    tab_a.hydrate().unwrap();
    tab_b.hydrate().unwrap();

    tab_a.logout().unwrap();

    // B hasn't looked yet: it still believes someone is signed in.
    assert!(tab_b.session().is_some());
    assert!(!tab_b.is_authenticated().unwrap());
    assert!(tab_b.session().is_none());
}

#[tokio::test]
async fn test_subscriber_sees_login_then_logout() {
    let clock = ManualClock::at_secs(NOW_SECS);
    let api = CustomerApi {
        expires_at: NOW_SECS + 3600,
    };
    let mut mgr = manager_on(MemoryStore::new(), api, &clock);
    let mut rx = mgr.subscribe();
    mgr.hydrate().unwrap();
    assert_eq!(rx.borrow_and_update().state, AuthState::Unauthenticated);

    mgr.login(&creds("secret")).await.unwrap();
    assert_eq!(rx.borrow_and_update().state, AuthState::Authenticated);

    mgr.logout().unwrap();
    let snapshot = rx.borrow_and_update().clone();
    assert_eq!(snapshot.state, AuthState::Unauthenticated);
    assert!(snapshot.session.is_none());
}

#[test]
fn test_token_expires_while_signed_in() {
    let backend = MemoryStore::new();
    backend.set(TOKEN_KEY, &mint("a@b.com", NOW_SECS + 60)).unwrap();
    let clock = ManualClock::at_secs(NOW_SECS);
    let mut mgr = manager_on(backend.clone(), HeaderlessApi, &clock);
    mgr.hydrate().unwrap();
    assert!(mgr.is_authenticated().unwrap());

    clock.advance(Duration::from_secs(120));

    // No background timer: the session lingers until someone asks.
    assert!(mgr.session().is_some());
    assert!(!mgr.is_authenticated().unwrap());
    assert!(mgr.session().is_none());
    assert!(backend.is_empty());
}

#[test]
fn test_default_system_clock_accepts_fresh_token() {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_secs();
    let backend = MemoryStore::new();
    backend.set(TOKEN_KEY, &mint("a@b.com", now + 3600)).unwrap();
    let mut mgr = SessionManager::new(
        SessionStore::new(backend),
        JwtCodec,
        HeaderlessApi,
        SessionConfig::default(),
    );

    assert!(mgr.hydrate().unwrap().is_some());
}
