//! Auth service: password login, sessions, and the bootstrap operator account.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;

use purgehub_domain::error::{AuthError, PurgeHubError};
use purgehub_domain::id::UserId;
use purgehub_domain::user::{Credentials, User};

use crate::ports::{SessionStore, UserRepository};

/// A freshly opened login session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginSession {
    /// Opaque token to hand to the browser.
    pub token: String,
    /// The authenticated user.
    pub user_id: UserId,
}

/// Application service for operator authentication.
pub struct AuthService<U, S> {
    users: U,
    sessions: S,
}

impl<U, S> AuthService<U, S>
where
    U: UserRepository,
    S: SessionStore,
{
    /// Create a new service from a user repository and a session store.
    pub fn new(users: U, sessions: S) -> Self {
        Self { users, sessions }
    }

    /// Make sure an account named `username` exists, creating it with
    /// `password` if it does not. An existing account is left untouched.
    ///
    /// # Errors
    ///
    /// Returns [`PurgeHubError::Auth`] if hashing fails, or a storage error
    /// from the repository.
    #[tracing::instrument(skip(self, password))]
    pub async fn ensure_user(&self, username: &str, password: &str) -> Result<User, PurgeHubError> {
        if let Some(existing) = self.users.find_by_username(username).await? {
            return Ok(existing);
        }
        let password = password.to_string();
        let hash = off_runtime(move || hash_password(&password)).await?;
        let user = self.users.create(username, &hash).await?;
        tracing::info!(id = %user.id, "bootstrap user created");
        Ok(user)
    }

    /// Check credentials and open a session.
    ///
    /// # Errors
    ///
    /// Returns [`PurgeHubError::Validation`] for blank fields,
    /// [`AuthError::InvalidCredentials`] for an unknown user or a wrong
    /// password, or a storage error from the repository.
    #[tracing::instrument(skip(self, credentials), fields(username = %credentials.username))]
    pub async fn login(&self, credentials: &Credentials) -> Result<LoginSession, PurgeHubError> {
        credentials.validate()?;
        let Some(user) = self
            .users
            .find_by_username(credentials.username.trim())
            .await?
        else {
            tracing::info!("login rejected: unknown user");
            return Err(AuthError::InvalidCredentials.into());
        };
        let password = credentials.password.clone();
        let stored = user.password_hash.clone();
        if !off_runtime(move || verify_password(&password, &stored)).await? {
            tracing::info!("login rejected: wrong password");
            return Err(AuthError::InvalidCredentials.into());
        }
        let token = self.sessions.open(user.id);
        tracing::info!(id = %user.id, "login accepted");
        Ok(LoginSession {
            token,
            user_id: user.id,
        })
    }

    /// Resolve a session token to its user.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::SessionRequired`] when the token is absent,
    /// unknown or expired.
    pub fn authenticate(&self, token: Option<&str>) -> Result<UserId, PurgeHubError> {
        token
            .and_then(|t| self.sessions.resolve(t))
            .ok_or_else(|| AuthError::SessionRequired.into())
    }

    /// Close a session. Unknown tokens are ignored.
    pub fn logout(&self, token: &str) {
        self.sessions.close(token);
    }
}

/// Run CPU-bound argon2 work on the blocking pool so request tasks keep moving.
async fn off_runtime<T, F>(work: F) -> Result<T, PurgeHubError>
where
    F: FnOnce() -> Result<T, PurgeHubError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(work)
        .await
        .map_err(|err| AuthError::Hashing(err.to_string()))?
}

/// Hash a password into a PHC string with a random salt.
///
/// # Errors
///
/// Returns [`AuthError::Hashing`] if argon2 fails.
pub fn hash_password(password: &str) -> Result<String, PurgeHubError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|err| AuthError::Hashing(err.to_string()).into())
}

/// Check a password against a stored PHC string.
///
/// # Errors
///
/// Returns [`AuthError::Hashing`] if the stored hash cannot be parsed.
pub fn verify_password(password: &str, stored: &str) -> Result<bool, PurgeHubError> {
    let parsed = PasswordHash::new(stored).map_err(|err| AuthError::Hashing(err.to_string()))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session_store::InMemorySessionStore;
    use std::future::Future;
    use std::sync::Mutex;
    use std::time::Duration;

    #[derive(Default)]
    struct InMemoryUserRepo {
        users: Mutex<Vec<User>>,
    }

    impl UserRepository for InMemoryUserRepo {
        fn create(
            &self,
            username: &str,
            password_hash: &str,
        ) -> impl Future<Output = Result<User, PurgeHubError>> + Send {
            let mut users = self.users.lock().unwrap();
            let user = User {
                id: UserId::new(i64::try_from(users.len()).unwrap() + 1),
                username: username.to_string(),
                password_hash: password_hash.to_string(),
            };
            users.push(user.clone());
            async { Ok(user) }
        }

        fn find_by_username(
            &self,
            username: &str,
        ) -> impl Future<Output = Result<Option<User>, PurgeHubError>> + Send {
            let found = self
                .users
                .lock()
                .unwrap()
                .iter()
                .find(|u| u.username == username)
                .cloned();
            async { Ok(found) }
        }
    }

    fn make_service() -> AuthService<InMemoryUserRepo, InMemorySessionStore> {
        AuthService::new(
            InMemoryUserRepo::default(),
            InMemorySessionStore::new(Duration::from_secs(3600)),
        )
    }

    fn creds(username: &str, password: &str) -> Credentials {
        Credentials {
            username: username.to_string(),
            password: password.to_string(),
        }
    }

    #[test]
    fn should_verify_hashed_password() {
        let hash = hash_password("admin123").unwrap();
        assert!(hash.starts_with("$argon2"));
        assert!(verify_password("admin123", &hash).unwrap());
        assert!(!verify_password("admin124", &hash).unwrap());
    }

    #[test]
    fn should_fail_on_malformed_stored_hash() {
        assert!(matches!(
            verify_password("x", "not-a-phc-string"),
            Err(PurgeHubError::Auth(AuthError::Hashing(_)))
        ));
    }

    #[tokio::test]
    async fn should_run_hashing_on_blocking_pool() {
        let caller = std::thread::current().id();
        let worker = off_runtime(|| Ok(std::thread::current().id()))
            .await
            .unwrap();
        assert_ne!(caller, worker);

        let err = off_runtime(|| verify_password("x", "not-a-phc-string"))
            .await
            .unwrap_err();
        assert!(matches!(err, PurgeHubError::Auth(AuthError::Hashing(_))));
    }

    #[tokio::test]
    async fn should_reject_login_when_stored_hash_is_corrupt() {
        let svc = make_service();
        svc.users.create("admin", "not-a-phc-string").await.unwrap();

        let err = svc.login(&creds("admin", "admin123")).await.unwrap_err();

        assert!(matches!(err, PurgeHubError::Auth(AuthError::Hashing(_))));
    }

    #[tokio::test]
    async fn should_create_bootstrap_user_only_once() {
        let svc = make_service();
        let first = svc.ensure_user("admin", "admin123").await.unwrap();
        let second = svc.ensure_user("admin", "other").await.unwrap();
        assert_eq!(first, second);
        assert_eq!(svc.users.users.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn should_open_session_when_credentials_match() {
        let svc = make_service();
        let user = svc.ensure_user("admin", "admin123").await.unwrap();

        let session = svc.login(&creds("admin", "admin123")).await.unwrap();

        assert_eq!(session.user_id, user.id);
        assert_eq!(svc.authenticate(Some(&session.token)).unwrap(), user.id);
    }

    #[tokio::test]
    async fn should_reject_wrong_password_and_unknown_user_alike() {
        let svc = make_service();
        svc.ensure_user("admin", "admin123").await.unwrap();

        let wrong = svc.login(&creds("admin", "nope")).await.unwrap_err();
        let unknown = svc.login(&creds("root", "admin123")).await.unwrap_err();

        assert_eq!(wrong.to_string(), unknown.to_string());
        assert!(matches!(
            wrong,
            PurgeHubError::Auth(AuthError::InvalidCredentials)
        ));
    }

    #[tokio::test]
    async fn should_require_session_after_logout() {
        let svc = make_service();
        svc.ensure_user("admin", "admin123").await.unwrap();
        let session = svc.login(&creds("admin", "admin123")).await.unwrap();

        svc.logout(&session.token);

        assert!(matches!(
            svc.authenticate(Some(&session.token)),
            Err(PurgeHubError::Auth(AuthError::SessionRequired))
        ));
        assert!(svc.authenticate(None).is_err());
    }
}
